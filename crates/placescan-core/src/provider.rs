//! The seam between the expansion controller and a concrete places backend.

use async_trait::async_trait;
use thiserror::Error;

use crate::place::{GeoPoint, Place};

/// One circular nearby-search query.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub center: GeoPoint,
    pub radius_meters: f64,
    /// Provider category filter, e.g. `["event_venue"]`.
    pub categories: Vec<String>,
    /// Maximum number of places the provider may return for this call.
    pub result_cap: u32,
}

/// Failure of a single provider call.
///
/// The controller treats both kinds the same way: the origin is skipped and
/// the round continues.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("decode failure: {0}")]
    Decode(String),
}

/// A places backend that answers circular nearby-search queries.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Returns at most `request.result_cap` places inside the requested circle.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when the call cannot be completed or its
    /// response cannot be decoded.
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Place>, ProviderError>;
}
