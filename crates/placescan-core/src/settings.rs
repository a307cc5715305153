//! Tunables for one search run.

use crate::place::GeoPoint;
use crate::ConfigError;

pub const DEFAULT_CENTER: GeoPoint = GeoPoint::new(34.849_303, -117.085_266);
pub const DEFAULT_RADIUS_MILES: f64 = 20.0;
pub const DEFAULT_CATEGORY: &str = "event_venue";
/// Hard per-call maximum accepted by the nearby-search endpoint.
pub const PROVIDER_MAX_RESULT_CAP: u32 = 20;
pub const DEFAULT_RESULT_CAP: u32 = 20;
pub const DEFAULT_MIN_UNIQUE_LEADS: usize = 100;
pub const DEFAULT_CLUSTERING_RATIO: f64 = 0.5;
pub const DEFAULT_MAX_LEVEL: u32 = 2;
pub const DEFAULT_AVG_SPEED_MPH: f64 = 40.0;
pub const DEFAULT_ROAD_BUFFER_FACTOR: f64 = 1.4;

/// Parameters shared by the expansion controller and the result formatter.
///
/// `max_level = 1` runs a single center-only round; `max_level = 2` allows
/// the four cardinal origins to be added when a round saturates or clusters.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSettings {
    pub center: GeoPoint,
    pub radius_miles: f64,
    pub categories: Vec<String>,
    pub result_cap: u32,
    /// Stop expanding once this many unique places have been collected.
    pub min_unique_leads: usize,
    /// Fraction of the radius that counts as "near the center" for clustering.
    pub clustering_ratio: f64,
    pub max_level: u32,
    pub avg_speed_mph: f64,
    /// Multiplier from straight-line to approximate road distance.
    pub road_buffer_factor: f64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            radius_miles: DEFAULT_RADIUS_MILES,
            categories: vec![DEFAULT_CATEGORY.to_string()],
            result_cap: DEFAULT_RESULT_CAP,
            min_unique_leads: DEFAULT_MIN_UNIQUE_LEADS,
            clustering_ratio: DEFAULT_CLUSTERING_RATIO,
            max_level: DEFAULT_MAX_LEVEL,
            avg_speed_mph: DEFAULT_AVG_SPEED_MPH,
            road_buffer_factor: DEFAULT_ROAD_BUFFER_FACTOR,
        }
    }
}

impl SearchSettings {
    /// Check ranges before any provider call is made.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] naming the first offending setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fail = |msg: String| Err(ConfigError::Validation(msg));

        if !(-90.0..=90.0).contains(&self.center.lat) {
            return fail(format!("center latitude {} out of range", self.center.lat));
        }
        if !(-180.0..=180.0).contains(&self.center.lng) {
            return fail(format!("center longitude {} out of range", self.center.lng));
        }
        if !self.radius_miles.is_finite() || self.radius_miles <= 0.0 {
            return fail(format!(
                "radius must be positive, got {}",
                self.radius_miles
            ));
        }
        if self.categories.is_empty() {
            return fail("at least one category is required".to_string());
        }
        if self.result_cap == 0 || self.result_cap > PROVIDER_MAX_RESULT_CAP {
            return fail(format!(
                "result cap must be within 1..={PROVIDER_MAX_RESULT_CAP}, got {}",
                self.result_cap
            ));
        }
        if self.max_level == 0 {
            return fail("max expansion level must be at least 1".to_string());
        }
        if !(self.clustering_ratio > 0.0 && self.clustering_ratio <= 1.0) {
            return fail(format!(
                "clustering ratio must be within (0, 1], got {}",
                self.clustering_ratio
            ));
        }
        if !self.avg_speed_mph.is_finite() || self.avg_speed_mph <= 0.0 {
            return fail(format!(
                "average speed must be positive, got {}",
                self.avg_speed_mph
            ));
        }
        if !self.road_buffer_factor.is_finite() || self.road_buffer_factor <= 0.0 {
            return fail(format!(
                "road buffer factor must be positive, got {}",
                self.road_buffer_factor
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(SearchSettings::default().validate().is_ok());
    }

    #[test]
    fn rejects_zero_radius() {
        let settings = SearchSettings {
            radius_miles: 0.0,
            ..SearchSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::Validation(ref msg)) if msg.contains("radius")
        ));
    }

    #[test]
    fn rejects_result_cap_above_provider_limit() {
        let settings = SearchSettings {
            result_cap: 21,
            ..SearchSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn rejects_empty_categories() {
        let settings = SearchSettings {
            categories: Vec::new(),
            ..SearchSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn rejects_level_zero() {
        let settings = SearchSettings {
            max_level: 0,
            ..SearchSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_latitude() {
        let settings = SearchSettings {
            center: GeoPoint::new(91.0, 0.0),
            ..SearchSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn rejects_clustering_ratio_out_of_bounds() {
        let settings = SearchSettings {
            clustering_ratio: 1.5,
            ..SearchSettings::default()
        };
        assert!(settings.validate().is_err());
    }
}
