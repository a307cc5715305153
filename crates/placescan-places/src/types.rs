//! Wire types for `POST /v1/places:searchNearby`.

use placescan_core::{GeoPoint, Place, SearchRequest};
use serde::{Deserialize, Serialize};

/// Fields requested through the `X-Goog-FieldMask` header.
pub const FIELD_MASK: &str = "places.displayName,places.location,places.rating,\
places.userRatingCount,places.types,places.websiteUri,places.internationalPhoneNumber,\
places.businessStatus,places.googleMapsUri,places.id,places.formattedAddress";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchNearbyRequest {
    pub location_restriction: LocationRestriction,
    pub included_types: Vec<String>,
    pub max_result_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationRestriction {
    pub circle: Circle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Circle {
    pub center: LatLng,
    /// Radius in meters.
    pub radius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<GeoPoint> for LatLng {
    fn from(point: GeoPoint) -> Self {
        Self {
            latitude: point.lat,
            longitude: point.lng,
        }
    }
}

impl From<&SearchRequest> for SearchNearbyRequest {
    fn from(request: &SearchRequest) -> Self {
        Self {
            location_restriction: LocationRestriction {
                circle: Circle {
                    center: request.center.into(),
                    radius: request.radius_meters,
                },
            },
            included_types: request.categories.clone(),
            max_result_count: request.result_cap,
        }
    }
}

/// Response envelope. The API omits `places` entirely when nothing matched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchNearbyResponse {
    #[serde(default)]
    pub places: Vec<Place>,
}
