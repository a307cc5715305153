//! HTTP client for the places `searchNearby` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use placescan_core::{Place, ProviderError, SearchProvider, SearchRequest};
use reqwest::{Client, Url};

use crate::error::PlacesError;
use crate::rate_limit::RetryPolicy;
use crate::types::{SearchNearbyRequest, SearchNearbyResponse, FIELD_MASK};

const DEFAULT_BASE_URL: &str = "https://places.googleapis.com";
const SEARCH_NEARBY_PATH: &str = "v1/places:searchNearby";

/// Client for the places nearby-search API.
///
/// Use [`PlacesClient::new`] for production or [`PlacesClient::with_base_url`]
/// to point at a mock server in tests. Transient errors (429, 5xx, network
/// failures) are retried with exponential backoff up to `max_retries`
/// additional attempts; a 429 waits at least as long as its `Retry-After`.
pub struct PlacesClient {
    client: Client,
    api_key: String,
    endpoint: Url,
    retry: RetryPolicy,
}

impl PlacesClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        timeout_secs: u64,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, PlacesError> {
        Self::with_base_url(
            api_key,
            timeout_secs,
            max_retries,
            backoff_base_secs,
            DEFAULT_BASE_URL,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`PlacesError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        max_retries: u32,
        backoff_base_secs: u64,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("placescan/0.1 (lead-discovery)")
            .build()?;

        // Ensure exactly one trailing slash so `join` appends rather than
        // replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join(SEARCH_NEARBY_PATH))
            .map_err(|e| PlacesError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            endpoint,
            retry: RetryPolicy {
                max_retries,
                backoff_base_secs,
            },
        })
    }

    /// Runs one nearby search, retrying transient failures.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::RateLimited`]: HTTP 429 after all retries.
    /// - [`PlacesError::UnexpectedStatus`]: any other non-2xx (5xx retried).
    /// - [`PlacesError::Http`]: network or TLS failure after all retries.
    /// - [`PlacesError::Deserialize`]: body is not the expected JSON (not retried).
    pub async fn search_nearby(&self, request: &SearchRequest) -> Result<Vec<Place>, PlacesError> {
        let body = SearchNearbyRequest::from(request);
        self.retry.run(|| self.send_once(&body)).await
    }

    async fn send_once(&self, body: &SearchNearbyRequest) -> Result<Vec<Place>, PlacesError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", FIELD_MASK)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() == 429 {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok())
                .unwrap_or(0);
            return Err(PlacesError::RateLimited { retry_after_secs });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PlacesError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.endpoint.to_string(),
                body,
            });
        }

        let text = response.text().await?;
        let decoded: SearchNearbyResponse =
            serde_json::from_str(&text).map_err(|e| PlacesError::Deserialize {
                context: format!(
                    "searchNearby({}, {})",
                    body.location_restriction.circle.center.latitude,
                    body.location_restriction.circle.center.longitude
                ),
                source: e,
            })?;

        Ok(decoded.places)
    }
}

#[async_trait]
impl SearchProvider for PlacesClient {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Place>, ProviderError> {
        self.search_nearby(request)
            .await
            .map_err(ProviderError::from)
    }
}
