use placescan_core::ProviderError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlacesError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited by places API (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("unexpected HTTP status {status} from {url}: {body}")]
    UnexpectedStatus {
        status: u16,
        url: String,
        body: String,
    },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl From<PlacesError> for ProviderError {
    fn from(err: PlacesError) -> Self {
        match err {
            PlacesError::Deserialize { .. } => ProviderError::Decode(err.to_string()),
            PlacesError::Http(_)
            | PlacesError::RateLimited { .. }
            | PlacesError::UnexpectedStatus { .. }
            | PlacesError::InvalidBaseUrl { .. } => ProviderError::Transport(err.to_string()),
        }
    }
}
