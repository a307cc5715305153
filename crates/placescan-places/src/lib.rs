//! Google Places "Nearby Search" client.
//!
//! Implements [`placescan_core::SearchProvider`] on top of the v1
//! `places:searchNearby` endpoint, with exponential-backoff retries for
//! rate limiting and transient transport failures.

pub mod client;
pub mod error;
pub mod types;

mod rate_limit;

pub use client::PlacesClient;
pub use error::PlacesError;
pub use types::{SearchNearbyRequest, SearchNearbyResponse};
