//! Shared domain types and configuration for placescan.
//!
//! Everything the search pipeline passes between crates lives here: the
//! [`Place`] record decoded from the places API, the [`SearchSettings`]
//! tunables that drive origin expansion, the [`SearchProvider`] seam the
//! controller calls through, and env-driven [`AppConfig`] loading.

pub mod app_config;
pub mod config;
pub mod place;
pub mod provider;
pub mod settings;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env, load_search_settings};
pub use place::{BusinessStatus, DisplayName, GeoPoint, Place, PlaceLocation};
pub use provider::{ProviderError, SearchProvider, SearchRequest};
pub use settings::SearchSettings;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("invalid search settings: {0}")]
    Validation(String),
}
