//! Adaptive multi-origin place search.
//!
//! Issues nearby searches from a growing set of origins around a center,
//! deduplicates the results, decides when coverage is good enough to stop,
//! and shapes the survivors into output records with approximate driving
//! distance and duration.

pub mod dedup;
pub mod expansion;
pub mod geo;
pub mod report;

#[cfg(test)]
mod test_support;

pub use dedup::{MergeStats, UniquePlaces};
pub use expansion::{
    decide, is_clustered, Decision, ExpansionController, RoundSummary, StopReason, SweepOutcome,
};
pub use geo::{generate_origins, haversine_miles, miles_to_meters};
pub use report::{build_report, EmptyReason, Report, ResultRecord};
