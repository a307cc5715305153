//! Adaptive origin expansion.
//!
//! Each round searches every origin for the current level, merges the
//! results into the run's [`UniquePlaces`], then decides:
//!
//! 1. enough unique places collected → stop;
//! 2. below the level cap and the round saturated an origin or clustered
//!    near the center → add origins and run another round;
//! 3. otherwise → stop.
//!
//! Provider failures are isolated to the origin that produced them.

use placescan_core::{GeoPoint, Place, SearchProvider, SearchRequest, SearchSettings};

use crate::dedup::UniquePlaces;
use crate::geo::{generate_origins, haversine_miles, miles_to_meters, MAX_ORIGIN_LEVEL};

/// Why the controller stopped issuing rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Unique place count reached `min_unique_leads`.
    SufficientVolume,
    /// Expansion signals fired but no higher level is allowed.
    MaxLevelReached,
    /// Neither saturation nor clustering was observed.
    CoverageAdequate,
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopReason::SufficientVolume => write!(f, "sufficient volume reached"),
            StopReason::MaxLevelReached => write!(f, "max expansion level reached"),
            StopReason::CoverageAdequate => write!(f, "coverage adequate"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Expand,
    Stop(StopReason),
}

/// What one round observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSummary {
    pub level: u32,
    pub origins: usize,
    pub failed_origins: usize,
    /// Places returned this round, duplicates included.
    pub returned: usize,
    pub new_unique: usize,
    pub cumulative_unique: usize,
    /// Origins whose response hit the result cap.
    pub saturation_count: usize,
    pub clustered: bool,
}

#[derive(Debug, Clone)]
pub struct SweepOutcome {
    pub places: UniquePlaces,
    pub rounds: Vec<RoundSummary>,
    pub stop_reason: StopReason,
}

/// Evaluate the stop/expand rules for a finished round.
///
/// Volume is checked first so a round that crosses `min_unique_leads` stops
/// even if it also saturated.
#[must_use]
pub fn decide(round: &RoundSummary, min_unique_leads: usize, max_level: u32) -> Decision {
    if round.cumulative_unique >= min_unique_leads {
        return Decision::Stop(StopReason::SufficientVolume);
    }
    let wants_more = round.saturation_count > 0 || round.clustered;
    if !wants_more {
        return Decision::Stop(StopReason::CoverageAdequate);
    }
    if round.level < max_level {
        Decision::Expand
    } else {
        Decision::Stop(StopReason::MaxLevelReached)
    }
}

/// `true` when more than half of `places` lie within
/// `clustering_ratio * radius_miles` of `center`.
///
/// Distance is always measured from the run's center, not from the origin
/// that returned the place. Places without coordinates count toward the
/// total but never as near. An empty slice is not clustered.
#[must_use]
pub fn is_clustered(
    places: &[Place],
    center: GeoPoint,
    radius_miles: f64,
    clustering_ratio: f64,
) -> bool {
    if places.is_empty() {
        return false;
    }
    let near_limit = clustering_ratio * radius_miles;
    let near = places
        .iter()
        .filter_map(Place::point)
        .filter(|p| haversine_miles(center, *p) <= near_limit)
        .count();
    near * 2 > places.len()
}

/// Drives rounds of provider calls until a stop condition holds.
pub struct ExpansionController<'a, P: SearchProvider + ?Sized> {
    provider: &'a P,
    settings: &'a SearchSettings,
}

impl<'a, P: SearchProvider + ?Sized> ExpansionController<'a, P> {
    pub fn new(provider: &'a P, settings: &'a SearchSettings) -> Self {
        Self { provider, settings }
    }

    /// Highest level this run may reach.
    fn max_level(&self) -> u32 {
        self.settings.max_level.clamp(1, MAX_ORIGIN_LEVEL)
    }

    /// Run rounds from level 1 until [`decide`] says stop.
    pub async fn run(&self) -> SweepOutcome {
        let mut places = UniquePlaces::new();
        let mut rounds = Vec::new();
        let max_level = self.max_level();
        let mut level = 1;

        let stop_reason = loop {
            let summary = self.run_round(level, &mut places).await;
            let decision = decide(&summary, self.settings.min_unique_leads, max_level);
            tracing::info!(
                level = summary.level,
                origins = summary.origins,
                failed = summary.failed_origins,
                returned = summary.returned,
                new_unique = summary.new_unique,
                total_unique = summary.cumulative_unique,
                saturated = summary.saturation_count,
                clustered = summary.clustered,
                ?decision,
                "search round complete"
            );
            rounds.push(summary);

            match decision {
                Decision::Expand => level += 1,
                Decision::Stop(reason) => break reason,
            }
        };

        tracing::info!(
            unique = places.len(),
            rounds = rounds.len(),
            reason = %stop_reason,
            "search expansion stopped"
        );

        SweepOutcome {
            places,
            rounds,
            stop_reason,
        }
    }

    /// Search every origin for `level` in order, merging into `places`.
    ///
    /// A failing origin is logged and skipped; the rest of the round runs.
    pub async fn run_round(&self, level: u32, places: &mut UniquePlaces) -> RoundSummary {
        let settings = self.settings;
        let origins = generate_origins(settings.center, settings.radius_miles, level);
        let radius_meters = miles_to_meters(settings.radius_miles);
        let cap = usize::try_from(settings.result_cap).unwrap_or(usize::MAX);

        let mut round_places: Vec<Place> = Vec::new();
        let mut failed_origins = 0;
        let mut saturation_count = 0;
        let mut new_unique = 0;

        for origin in &origins {
            let request = SearchRequest {
                center: *origin,
                radius_meters,
                categories: settings.categories.clone(),
                result_cap: settings.result_cap,
            };

            let fetched = match self.provider.search(&request).await {
                Ok(fetched) => fetched,
                Err(error) => {
                    failed_origins += 1;
                    tracing::warn!(level, %origin, %error, "search failed for origin; skipping");
                    continue;
                }
            };

            let saturated = fetched.len() >= cap;
            if saturated {
                saturation_count += 1;
            }

            round_places.extend(fetched.iter().cloned());
            let stats = places.merge(fetched);
            new_unique += stats.inserted;

            tracing::debug!(
                level,
                %origin,
                inserted = stats.inserted,
                duplicates = stats.duplicates,
                skipped_no_id = stats.skipped_no_id,
                saturated,
                "fetched places for origin"
            );
        }

        let clustered = is_clustered(
            &round_places,
            settings.center,
            settings.radius_miles,
            settings.clustering_ratio,
        );

        RoundSummary {
            level,
            origins: origins.len(),
            failed_origins,
            returned: round_places.len(),
            new_unique,
            cumulative_unique: places.len(),
            saturation_count,
            clustered,
        }
    }
}

#[cfg(test)]
#[path = "expansion_test.rs"]
mod tests;
