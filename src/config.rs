//! Planner tuning knobs.

use crate::itinerary::PackingRules;
use crate::local_search::DEFAULT_MAX_ITERATIONS;
use crate::selector::{DEFAULT_SOFT_MAX_DEGRADATION, SelectorOptions};
use crate::snapshot::ALL_REGIONS;

/// Most coordinates a single travel table request may carry.
pub const MAX_MATRIX_STOPS: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    pub max_matrix_stops: usize,
    /// Extra cost (as a fraction of the baseline) a soft region preference may add.
    pub soft_max_degradation: f64,
    pub two_opt_max_iterations: usize,
    /// Region tag snapshots are stored under.
    pub snapshot_region: String,
    pub packing: PackingRules,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_matrix_stops: MAX_MATRIX_STOPS,
            soft_max_degradation: DEFAULT_SOFT_MAX_DEGRADATION,
            two_opt_max_iterations: DEFAULT_MAX_ITERATIONS,
            snapshot_region: ALL_REGIONS.to_string(),
            packing: PackingRules::default(),
        }
    }
}

impl PlannerConfig {
    pub fn selector_options(&self) -> SelectorOptions {
        SelectorOptions {
            soft_max_degradation: self.soft_max_degradation,
            max_iterations: self.two_opt_max_iterations,
        }
    }
}
