//! CSV persistence for filtered results.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use placescan_sweep::ResultRecord;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum SinkError {
    #[error("failed to create {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Write `records` to `path`, replacing any existing file.
///
/// The header row comes from the record's column names.
pub(crate) fn write_csv(path: &Path, records: &[ResultRecord]) -> Result<(), SinkError> {
    let file = File::create(path).map_err(|source| SinkError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_records(file, records)
}

pub(crate) fn write_records<W: Write>(
    writer: W,
    records: &[ResultRecord],
) -> Result<(), SinkError> {
    let mut writer = csv::Writer::from_writer(writer);
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, rating: Option<f64>) -> ResultRecord {
        ResultRecord {
            business_name: format!("Venue {id}"),
            business_status: "OPERATIONAL".to_string(),
            rating,
            rating_count: rating.map(|_| 12),
            business_type: "event_venue".to_string(),
            google_place_url: format!("https://maps.google.com/?cid={id}"),
            phone_number: String::new(),
            website: "https://venue.example, with comma".to_string(),
            address: "1 Main St".to_string(),
            distance_in_miles: "7.0 mi".to_string(),
            duration: "11 mins".to_string(),
            place_id: id.to_string(),
            driving_miles: 7.0,
            duration_minutes: 10.5,
        }
    }

    fn render(records: &[ResultRecord]) -> String {
        let mut buf = Vec::new();
        write_records(&mut buf, records).expect("write to buffer");
        String::from_utf8(buf).expect("csv is utf-8")
    }

    #[test]
    fn header_lists_columns_in_output_order() {
        let out = render(&[record("a", Some(4.5))]);
        let header = out.lines().next().expect("header row");
        assert_eq!(
            header,
            "Business Name,Business Status,Rating,Rating Count,Business Type,\
             Google Place URL,Phone Number,Website,Address,distanceInMiles,duration,placeId"
        );
    }

    #[test]
    fn missing_rating_is_an_empty_cell() {
        let out = render(&[record("a", None)]);
        let row = out.lines().nth(1).expect("data row");
        assert!(
            row.starts_with("Venue a,OPERATIONAL,,,event_venue,"),
            "{row}"
        );
    }

    #[test]
    fn fields_with_commas_are_quoted() {
        let out = render(&[record("a", Some(4.5))]);
        assert!(
            out.contains("\"https://venue.example, with comma\""),
            "{out}"
        );
    }

    #[test]
    fn one_row_per_record() {
        let out = render(&[record("a", Some(4.0)), record("b", Some(3.0))]);
        assert_eq!(out.lines().count(), 3);
    }

    #[test]
    fn writes_file_to_disk() {
        let path = std::env::temp_dir().join(format!("placescan-sink-{}.csv", std::process::id()));
        write_csv(&path, &[record("disk", Some(5.0))]).expect("write csv");

        let contents = std::fs::read_to_string(&path).expect("read back");
        let row = contents.lines().nth(1).expect("data row");
        assert!(row.ends_with(",disk"), "{row}");
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn unwritable_path_is_an_io_error() {
        // A directory cannot be opened as a file.
        let err = write_csv(&std::env::temp_dir(), &[record("a", None)])
            .expect_err("directory target must fail");
        assert!(matches!(err, SinkError::Io { .. }));
    }
}
