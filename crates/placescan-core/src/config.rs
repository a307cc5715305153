use std::path::PathBuf;
use std::str::FromStr;

use crate::app_config::AppConfig;
use crate::place::GeoPoint;
use crate::settings::{
    SearchSettings, DEFAULT_AVG_SPEED_MPH, DEFAULT_CATEGORY, DEFAULT_CENTER,
    DEFAULT_CLUSTERING_RATIO, DEFAULT_MAX_LEVEL, DEFAULT_MIN_UNIQUE_LEADS, DEFAULT_RADIUS_MILES,
    DEFAULT_RESULT_CAP, DEFAULT_ROAD_BUFFER_FACTOR,
};
use crate::ConfigError;

pub const DEFAULT_PLACES_BASE_URL: &str = "https://places.googleapis.com";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Load only the search tunables from the environment (plus `.env`).
///
/// Unlike [`load_app_config`] this does not require an API key, so it can
/// back commands that never call the places API.
///
/// # Errors
///
/// Returns `ConfigError` if a value is unparsable or fails validation.
pub fn load_search_settings() -> Result<SearchSettings, ConfigError> {
    dotenvy::dotenv().ok();
    build_search_settings(&|key: &str| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let api_key = require("PLACESCAN_API_KEY")?;
    let search = build_search_settings(&lookup)?;

    let output_path = PathBuf::from(or_default("PLACESCAN_OUTPUT_PATH", "output.csv"));
    let log_level = or_default("PLACESCAN_LOG_LEVEL", "info");
    let places_base_url = or_default("PLACESCAN_PLACES_BASE_URL", DEFAULT_PLACES_BASE_URL);
    let request_timeout_secs = parse_var(&lookup, "PLACESCAN_REQUEST_TIMEOUT_SECS", 30_u64)?;
    let max_retries = parse_var(&lookup, "PLACESCAN_MAX_RETRIES", 2_u32)?;
    let retry_backoff_base_secs = parse_var(&lookup, "PLACESCAN_RETRY_BACKOFF_BASE_SECS", 1_u64)?;

    Ok(AppConfig {
        api_key,
        search,
        output_path,
        log_level,
        places_base_url,
        request_timeout_secs,
        max_retries,
        retry_backoff_base_secs,
    })
}

/// Build and validate the search tunables from the provided env-var lookup.
fn build_search_settings<F>(lookup: &F) -> Result<SearchSettings, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let categories =
        lookup("PLACESCAN_CATEGORIES").unwrap_or_else(|_| DEFAULT_CATEGORY.to_string());

    let center = GeoPoint::new(
        parse_var(lookup, "PLACESCAN_CENTER_LAT", DEFAULT_CENTER.lat)?,
        parse_var(lookup, "PLACESCAN_CENTER_LNG", DEFAULT_CENTER.lng)?,
    );

    let search = SearchSettings {
        center,
        radius_miles: parse_var(lookup, "PLACESCAN_RADIUS_MILES", DEFAULT_RADIUS_MILES)?,
        categories: parse_categories(&categories),
        result_cap: parse_var(lookup, "PLACESCAN_RESULT_CAP", DEFAULT_RESULT_CAP)?,
        min_unique_leads: parse_var(
            lookup,
            "PLACESCAN_MIN_UNIQUE_LEADS",
            DEFAULT_MIN_UNIQUE_LEADS,
        )?,
        clustering_ratio: parse_var(
            lookup,
            "PLACESCAN_CLUSTERING_RATIO",
            DEFAULT_CLUSTERING_RATIO,
        )?,
        max_level: parse_var(lookup, "PLACESCAN_MAX_EXPANSION_LEVEL", DEFAULT_MAX_LEVEL)?,
        avg_speed_mph: parse_var(lookup, "PLACESCAN_AVG_SPEED_MPH", DEFAULT_AVG_SPEED_MPH)?,
        road_buffer_factor: parse_var(
            lookup,
            "PLACESCAN_ROAD_BUFFER_FACTOR",
            DEFAULT_ROAD_BUFFER_FACTOR,
        )?,
    };
    search.validate()?;

    Ok(search)
}

/// Parse `var` when present, otherwise return `default`.
fn parse_var<F, T>(lookup: &F, var: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            }),
        Err(_) => Ok(default),
    }
}

/// Split a comma-separated category list, trimming whitespace and dropping empties.
fn parse_categories(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
