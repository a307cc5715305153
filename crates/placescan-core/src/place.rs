//! Place records as returned by the places search API.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

/// Operational state reported by the provider.
///
/// Missing or unrecognised values decode as [`BusinessStatus::Unspecified`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BusinessStatus {
    Operational,
    ClosedTemporarily,
    ClosedPermanently,
    #[default]
    #[serde(other)]
    Unspecified,
}

impl BusinessStatus {
    /// Wire representation, or an empty string when the provider gave none.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            BusinessStatus::Operational => "OPERATIONAL",
            BusinessStatus::ClosedTemporarily => "CLOSED_TEMPORARILY",
            BusinessStatus::ClosedPermanently => "CLOSED_PERMANENTLY",
            BusinessStatus::Unspecified => "",
        }
    }
}

impl std::fmt::Display for BusinessStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayName {
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
}

/// Provider location object. Either coordinate may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceLocation {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// A single place candidate. Identity is `id`; every other field is opaque
/// payload carried through to the output record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub display_name: Option<DisplayName>,
    #[serde(default)]
    pub location: Option<PlaceLocation>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_rating_count: Option<u64>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub website_uri: Option<String>,
    #[serde(default)]
    pub international_phone_number: Option<String>,
    #[serde(default)]
    pub business_status: BusinessStatus,
    #[serde(default)]
    pub google_maps_uri: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
}

impl Place {
    /// Coordinates of the place, if the provider returned both.
    #[must_use]
    pub fn point(&self) -> Option<GeoPoint> {
        let location = self.location?;
        Some(GeoPoint::new(location.latitude?, location.longitude?))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.display_name.as_ref().map_or("", |n| n.text.as_str())
    }

    #[must_use]
    pub fn primary_type(&self) -> Option<&str> {
        self.types.first().map(String::as_str)
    }

    #[must_use]
    pub fn is_operational(&self) -> bool {
        self.business_status == BusinessStatus::Operational
    }
}
