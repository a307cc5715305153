//! Post-processing of the unique place set into output records.
//!
//! Only operational places survive. Straight-line distance from the run
//! center is inflated by the road buffer factor to approximate driving
//! distance, and anything whose approximate drive exceeds the search radius
//! is dropped.

use placescan_core::{Place, SearchSettings};
use serde::Serialize;

use crate::dedup::UniquePlaces;
use crate::geo::haversine_miles;

/// One output row. Field order is the column order of the written file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRecord {
    #[serde(rename = "Business Name")]
    pub business_name: String,
    #[serde(rename = "Business Status")]
    pub business_status: String,
    #[serde(rename = "Rating")]
    pub rating: Option<f64>,
    #[serde(rename = "Rating Count")]
    pub rating_count: Option<u64>,
    #[serde(rename = "Business Type")]
    pub business_type: String,
    #[serde(rename = "Google Place URL")]
    pub google_place_url: String,
    #[serde(rename = "Phone Number")]
    pub phone_number: String,
    #[serde(rename = "Website")]
    pub website: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "distanceInMiles")]
    pub distance_in_miles: String,
    #[serde(rename = "duration")]
    pub duration: String,
    #[serde(rename = "placeId")]
    pub place_id: String,
    #[serde(skip)]
    pub driving_miles: f64,
    #[serde(skip)]
    pub duration_minutes: f64,
}

/// Why a report ended up with no records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    NoOperational,
    NoneInRadius,
}

impl std::fmt::Display for EmptyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmptyReason::NoOperational => write!(f, "No operational places found."),
            EmptyReason::NoneInRadius => {
                write!(f, "No places within the specified driving distance radius.")
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    pub records: Vec<ResultRecord>,
    pub operational: usize,
    /// Places dropped for any status other than operational.
    pub inactive: usize,
    pub missing_location: usize,
    pub out_of_radius: usize,
}

impl Report {
    #[must_use]
    pub fn empty_reason(&self) -> Option<EmptyReason> {
        if !self.records.is_empty() {
            None
        } else if self.operational == 0 {
            Some(EmptyReason::NoOperational)
        } else {
            Some(EmptyReason::NoneInRadius)
        }
    }
}

/// Filter and shape `places` against the run center and radius in `settings`.
///
/// Pure: calling it twice on the same set yields the same report.
#[must_use]
pub fn build_report(places: &UniquePlaces, settings: &SearchSettings) -> Report {
    let mut report = Report::default();

    for place in places {
        if !place.is_operational() {
            report.inactive += 1;
            continue;
        }
        report.operational += 1;

        let Some(point) = place.point() else {
            report.missing_location += 1;
            continue;
        };

        let straight_miles = haversine_miles(settings.center, point);
        let driving_miles = straight_miles * settings.road_buffer_factor;
        let duration_minutes = driving_miles / settings.avg_speed_mph * 60.0;

        if driving_miles > settings.radius_miles {
            report.out_of_radius += 1;
            continue;
        }

        report
            .records
            .push(to_record(place, driving_miles, duration_minutes));
    }

    tracing::debug!(
        kept = report.records.len(),
        inactive = report.inactive,
        missing_location = report.missing_location,
        out_of_radius = report.out_of_radius,
        "filtered place set"
    );

    report
}

fn to_record(place: &Place, driving_miles: f64, duration_minutes: f64) -> ResultRecord {
    let text = |value: Option<&String>| value.cloned().unwrap_or_default();

    ResultRecord {
        business_name: place.name().to_string(),
        business_status: place.business_status.as_str().to_string(),
        rating: place.rating,
        rating_count: place.user_rating_count,
        business_type: place.primary_type().unwrap_or_default().to_string(),
        google_place_url: text(place.google_maps_uri.as_ref()),
        phone_number: text(place.international_phone_number.as_ref()),
        website: text(place.website_uri.as_ref()),
        address: text(place.formatted_address.as_ref()),
        distance_in_miles: format_distance(driving_miles),
        duration: format_duration(duration_minutes),
        place_id: place.id.clone(),
        driving_miles,
        duration_minutes,
    }
}

/// `"<miles> mi"` rounded half away from zero to one decimal.
#[must_use]
pub fn format_distance(miles: f64) -> String {
    format!("{:.1} mi", (miles * 10.0).round() / 10.0)
}

/// `"<minutes> mins"` rounded half away from zero to a whole minute.
#[must_use]
pub fn format_duration(minutes: f64) -> String {
    format!("{:.0} mins", minutes.round())
}
