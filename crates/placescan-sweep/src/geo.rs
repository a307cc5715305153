//! Great-circle distance and search-origin generation.
//!
//! Longitude offsets are scaled by `cos(latitude)` so the east/west origins
//! sit roughly the same physical distance from the center as north/south.

use placescan_core::GeoPoint;

const EARTH_RADIUS_MILES: f64 = 3958.8;
const MILES_PER_LAT_DEGREE: f64 = 69.0;
const METERS_PER_MILE: f64 = 1609.34;

/// Highest level the origin generator distinguishes. Anything above behaves
/// like this level.
pub const MAX_ORIGIN_LEVEL: u32 = 2;

/// Haversine distance between two points in statute miles.
#[must_use]
pub fn haversine_miles(a: GeoPoint, b: GeoPoint) -> f64 {
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();
    let h = (dlat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (dlng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_MILES * c
}

#[must_use]
pub fn miles_to_meters(miles: f64) -> f64 {
    miles * METERS_PER_MILE
}

/// Search origins for an expansion level.
///
/// Level 1 (and 0) is the center alone. Level 2 and above add four origins
/// `radius_miles` to the north, south, east and west, in that order, after
/// the center.
#[must_use]
pub fn generate_origins(center: GeoPoint, radius_miles: f64, level: u32) -> Vec<GeoPoint> {
    if level.min(MAX_ORIGIN_LEVEL) < 2 {
        return vec![center];
    }

    let delta_lat = radius_miles / MILES_PER_LAT_DEGREE;
    let delta_lng = radius_miles / (MILES_PER_LAT_DEGREE * center.lat.to_radians().cos());

    vec![
        center,
        GeoPoint::new(center.lat + delta_lat, center.lng),
        GeoPoint::new(center.lat - delta_lat, center.lng),
        GeoPoint::new(center.lat, center.lng + delta_lng),
        GeoPoint::new(center.lat, center.lng - delta_lng),
    ]
}
