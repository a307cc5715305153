use std::path::PathBuf;

use crate::settings::SearchSettings;

#[derive(Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub search: SearchSettings,
    pub output_path: PathBuf,
    pub log_level: String,
    pub places_base_url: String,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &"[redacted]")
            .field("search", &self.search)
            .field("output_path", &self.output_path)
            .field("log_level", &self.log_level)
            .field("places_base_url", &self.places_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_secs", &self.retry_backoff_base_secs)
            .finish()
    }
}
