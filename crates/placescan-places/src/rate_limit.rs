//! Retry policy for transient places API failures.
//!
//! Rate limiting (429), network failures and 5xx responses are retried.
//! Everything else (bad request, auth rejection, undecodable body) is
//! returned immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::PlacesError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RetryPolicy {
    /// Extra attempts after the first. `2` means at most three calls.
    pub(crate) max_retries: u32,
    pub(crate) backoff_base_secs: u64,
}

impl RetryPolicy {
    /// How long to wait before retrying after `err` on zero-based `attempt`,
    /// or `None` when the error is final.
    ///
    /// Backoff doubles per attempt. A 429 waits at least as long as the
    /// server's `Retry-After`.
    pub(crate) fn delay_for(&self, attempt: u32, err: &PlacesError) -> Option<Duration> {
        if attempt >= self.max_retries {
            return None;
        }
        let backoff = self
            .backoff_base_secs
            .saturating_mul(1u64 << attempt.min(62));
        let secs = match err {
            PlacesError::RateLimited { retry_after_secs } => backoff.max(*retry_after_secs),
            PlacesError::Http(_) => backoff,
            PlacesError::UnexpectedStatus { status, .. } if *status >= 500 => backoff,
            PlacesError::UnexpectedStatus { .. }
            | PlacesError::Deserialize { .. }
            | PlacesError::InvalidBaseUrl { .. } => return None,
        };
        Some(Duration::from_secs(secs))
    }

    /// Run `operation` until it succeeds or [`RetryPolicy::delay_for`] gives up.
    pub(crate) async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T, PlacesError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, PlacesError>>,
    {
        let mut attempt = 0u32;
        loop {
            let err = match operation().await {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };
            let Some(delay) = self.delay_for(attempt, &err) else {
                return Err(err);
            };
            tracing::warn!(
                attempt = attempt + 1,
                max_retries = self.max_retries,
                delay_secs = delay.as_secs(),
                error = %err,
                "places API call failed; retrying"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    fn status(status: u16) -> PlacesError {
        PlacesError::UnexpectedStatus {
            status,
            url: "https://places.test/v1/places:searchNearby".to_owned(),
            body: String::new(),
        }
    }

    fn decode_error() -> PlacesError {
        let source = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        PlacesError::Deserialize {
            context: "test".to_owned(),
            source,
        }
    }

    const POLICY: RetryPolicy = RetryPolicy {
        max_retries: 3,
        backoff_base_secs: 2,
    };

    #[test]
    fn backoff_doubles_per_attempt() {
        let delays: Vec<_> = (0..3)
            .map(|n| POLICY.delay_for(n, &status(503)).map(|d| d.as_secs()))
            .collect();
        assert_eq!(delays, vec![Some(2), Some(4), Some(8)]);
    }

    #[test]
    fn gives_up_after_max_retries() {
        assert_eq!(POLICY.delay_for(3, &status(503)), None);
    }

    #[test]
    fn rate_limit_waits_for_retry_after_when_longer() {
        let err = PlacesError::RateLimited {
            retry_after_secs: 30,
        };
        assert_eq!(POLICY.delay_for(0, &err), Some(Duration::from_secs(30)));
        assert_eq!(POLICY.delay_for(2, &err), Some(Duration::from_secs(30)));

        let short = PlacesError::RateLimited {
            retry_after_secs: 1,
        };
        assert_eq!(POLICY.delay_for(1, &short), Some(Duration::from_secs(4)));
    }

    #[test]
    fn client_errors_and_bad_bodies_are_final() {
        assert_eq!(POLICY.delay_for(0, &status(403)), None);
        assert_eq!(POLICY.delay_for(0, &status(400)), None);
        assert_eq!(POLICY.delay_for(0, &decode_error()), None);
    }

    #[tokio::test]
    async fn run_returns_first_success() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let policy = RetryPolicy {
            max_retries: 3,
            backoff_base_secs: 0,
        };
        let result = policy
            .run(move || async move {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                if n < 2 {
                    Err(status(502))
                } else {
                    Ok(n)
                }
            })
            .await;
        assert_eq!(result.unwrap(), 2);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn run_surfaces_last_error_when_exhausted() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let policy = RetryPolicy {
            max_retries: 2,
            backoff_base_secs: 0,
        };
        let result: Result<(), _> = policy
            .run(move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(status(503))
            })
            .await;
        assert_eq!(counter.load(Ordering::SeqCst), 3);
        assert!(matches!(
            result,
            Err(PlacesError::UnexpectedStatus { status: 503, .. })
        ));
    }

    #[tokio::test]
    async fn run_stops_on_decode_error() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: Result<(), _> = POLICY
            .run(move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(decode_error())
            })
            .await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(PlacesError::Deserialize { .. })));
    }
}
