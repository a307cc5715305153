//! Fixtures shared by the unit tests in this crate.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use placescan_core::{
    BusinessStatus, DisplayName, GeoPoint, Place, PlaceLocation, ProviderError, SearchProvider,
    SearchRequest,
};

pub(crate) const CENTER: GeoPoint = GeoPoint::new(34.849_303, -117.085_266);

/// Operational place with no location.
pub(crate) fn place(id: &str) -> Place {
    Place {
        id: id.to_string(),
        display_name: Some(DisplayName {
            text: format!("Place {id}"),
            language_code: None,
        }),
        business_status: BusinessStatus::Operational,
        ..Place::default()
    }
}

pub(crate) fn place_at(id: &str, point: GeoPoint) -> Place {
    Place {
        location: Some(PlaceLocation {
            latitude: Some(point.lat),
            longitude: Some(point.lng),
        }),
        ..place(id)
    }
}

/// Point due north of `origin` at `miles` great-circle distance.
pub(crate) fn north_of(origin: GeoPoint, miles: f64) -> GeoPoint {
    let miles_per_degree = 3958.8_f64.to_radians();
    GeoPoint::new(origin.lat + miles / miles_per_degree, origin.lng)
}

/// `count` distinct places `miles` north of [`CENTER`], ids `{prefix}-{n}`.
pub(crate) fn batch(prefix: &str, count: usize, miles: f64) -> Vec<Place> {
    (0..count)
        .map(|n| place_at(&format!("{prefix}-{n}"), north_of(CENTER, miles)))
        .collect()
}

/// Provider that replays scripted responses in call order and records every
/// request it receives. Calls beyond the script return an empty list.
pub(crate) struct ScriptedProvider {
    responses: Mutex<VecDeque<Result<Vec<Place>, ProviderError>>>,
    requests: Mutex<Vec<SearchRequest>>,
}

impl ScriptedProvider {
    pub(crate) fn new(responses: Vec<Result<Vec<Place>, ProviderError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<SearchRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl SearchProvider for ScriptedProvider {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Place>, ProviderError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}
