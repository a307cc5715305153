use std::path::{Path, PathBuf};

use placescan_core::AppConfig;
use placescan_places::PlacesClient;
use placescan_sweep::{build_report, ExpansionController, Report, ResultRecord, StopReason};

use crate::sink;

/// What a sweep produced, for callers that want more than console output.
#[derive(Debug)]
pub(crate) struct SweepRun {
    pub(crate) report: Report,
    pub(crate) stop_reason: StopReason,
    /// Where the CSV landed, if it was written.
    pub(crate) written: Option<PathBuf>,
}

/// Run the full search pipeline: expand, filter, print, persist.
///
/// Provider failures never abort the run. A failed write is reported on
/// stderr but does not fail the command, since the results were already
/// printed. With `target` of `None` nothing is written.
///
/// # Errors
///
/// Returns an error only if the places client cannot be constructed.
pub(crate) async fn run_sweep(
    config: &AppConfig,
    target: Option<&Path>,
) -> anyhow::Result<SweepRun> {
    let client = PlacesClient::with_base_url(
        &config.api_key,
        config.request_timeout_secs,
        config.max_retries,
        config.retry_backoff_base_secs,
        &config.places_base_url,
    )?;

    let settings = &config.search;
    tracing::info!(
        center = %settings.center,
        radius_miles = settings.radius_miles,
        categories = ?settings.categories,
        "starting sweep"
    );

    let outcome = ExpansionController::new(&client, settings).run().await;
    println!(
        "collected {} unique places over {} round(s) ({})",
        outcome.places.len(),
        outcome.rounds.len(),
        outcome.stop_reason
    );

    let report = build_report(&outcome.places, settings);
    let mut run = SweepRun {
        report,
        stop_reason: outcome.stop_reason,
        written: None,
    };

    if let Some(reason) = run.report.empty_reason() {
        println!("{reason}");
        return Ok(run);
    }

    print_table(&run.report.records);

    if let Some(path) = target {
        match sink::write_csv(path, &run.report.records) {
            Ok(()) => {
                println!("Results saved to {}", path.display());
                run.written = Some(path.to_path_buf());
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "failed to save results");
                eprintln!("warning: could not save results to {}: {e}", path.display());
            }
        }
    }

    Ok(run)
}

fn print_table(records: &[ResultRecord]) {
    for line in table_lines(records) {
        println!("{line}");
    }
}

/// One summary row per record followed by its contact and id details, so the
/// console carries every output column.
fn table_lines(records: &[ResultRecord]) -> Vec<String> {
    let or_dash = |value: &str| {
        if value.is_empty() {
            "-".to_string()
        } else {
            value.to_string()
        }
    };

    let mut lines = vec![format!(
        "{:<42}{:<14}{:<10}{:<10}{:<12}TYPE",
        "NAME", "STATUS", "DISTANCE", "DURATION", "RATING"
    )];
    for record in records {
        let rating = record.rating.map_or_else(
            || "-".to_string(),
            |r| match record.rating_count {
                Some(count) => format!("{r:.1} ({count})"),
                None => format!("{r:.1}"),
            },
        );
        lines.push(format!(
            "{:<42}{:<14}{:<10}{:<10}{:<12}{}",
            record.business_name,
            record.business_status,
            record.distance_in_miles,
            record.duration,
            rating,
            or_dash(&record.business_type)
        ));
        let details = [
            ("address:", &record.address),
            ("phone:", &record.phone_number),
            ("website:", &record.website),
            ("maps:", &record.google_place_url),
            ("place id:", &record.place_id),
        ];
        for (label, value) in details {
            lines.push(format!("    {label:<10}{}", or_dash(value)));
        }
    }
    lines
}
