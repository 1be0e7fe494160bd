//! Constrained route selection.
//!
//! Hard anchors (explicit stop ids) are always honored. Soft preferences are
//! region labels: every stop whose region or locality fuzzy-matches the label
//! becomes a candidate anchor, each start/end combination is optimized, and
//! the cheapest one is accepted only if it stays within the degradation
//! ceiling of the hard-anchor baseline.

use tracing::{debug, warn};

use crate::error::Result;
use crate::matrix::CostMatrix;
use crate::optimizer::{Anchors, Route, optimize_order};
use crate::traits::Stop;

/// Default ceiling for soft preferences: at most +12% over the baseline.
pub const DEFAULT_SOFT_MAX_DEGRADATION: f64 = 0.12;

/// Above this many hypotheses the enumeration is logged as expensive.
const LARGE_ENUMERATION: usize = 400;

const SIMILARITY_THRESHOLD: f64 = 0.8;

/// Trip-level start/end region preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionPreferences {
    pub start_region: Option<String>,
    pub end_region: Option<String>,
}

impl RegionPreferences {
    pub fn new(start_region: Option<&str>, end_region: Option<&str>) -> Self {
        Self {
            start_region: start_region.map(str::to_string),
            end_region: end_region.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SelectorOptions {
    pub soft_max_degradation: f64,
    pub max_iterations: usize,
}

impl Default for SelectorOptions {
    fn default() -> Self {
        Self {
            soft_max_degradation: DEFAULT_SOFT_MAX_DEGRADATION,
            max_iterations: crate::local_search::DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Which hypothesis produced the returned route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Baseline,
    SoftPreference { start: Option<usize>, end: Option<usize> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub route: Route,
    pub choice: Choice,
    /// Cost of the hard-anchor-only route.
    pub baseline_cost: f64,
}

/// Loose region comparison: substring either way, or a close edit distance.
pub fn region_matches(preference: &str, value: &str) -> bool {
    let preference = preference.trim().to_lowercase();
    let value = value.trim().to_lowercase();
    if preference.is_empty() || value.is_empty() {
        return false;
    }
    if preference.contains(&value) || value.contains(&preference) {
        return true;
    }
    strsim::normalized_levenshtein(&preference, &value) > SIMILARITY_THRESHOLD
}

/// Indices of stops whose region or locality matches `preference`.
pub fn soft_candidates<S: Stop>(stops: &[S], preference: Option<&str>) -> Vec<usize> {
    let Some(preference) = preference.map(str::trim).filter(|p| !p.is_empty()) else {
        return Vec::new();
    };
    stops
        .iter()
        .enumerate()
        .filter(|(_, stop)| {
            let locality = stop.locality().is_some_and(|l| region_matches(preference, l));
            let region = stop.region().is_some_and(|r| region_matches(preference, r));
            locality || region
        })
        .map(|(index, _)| index)
        .collect()
}

/// Pick the route for `matrix` given hard anchors and soft region preferences.
///
/// `stops` must be indexed like the matrix.
pub fn select_route<S: Stop>(
    matrix: &CostMatrix,
    stops: &[S],
    hard: Anchors,
    preferences: &RegionPreferences,
    options: SelectorOptions,
) -> Result<Selection> {
    let base = optimize_order(matrix, hard, options.max_iterations)?;
    debug!(cost = base.cost, ?hard, "baseline route");

    let start_candidates = if hard.start.is_none() {
        soft_candidates(stops, preferences.start_region.as_deref())
    } else {
        Vec::new()
    };
    let end_candidates = if hard.end.is_none() {
        soft_candidates(stops, preferences.end_region.as_deref())
    } else {
        Vec::new()
    };

    let hypotheses = (start_candidates.len() + 1) * (end_candidates.len() + 1) - 1;
    if hypotheses > LARGE_ENUMERATION {
        warn!(
            hypotheses,
            start_candidates = start_candidates.len(),
            end_candidates = end_candidates.len(),
            "soft region preferences matched many stops"
        );
    }

    let start_options = std::iter::once(None).chain(start_candidates.iter().copied().map(Some));
    let mut best_soft: Option<(Route, Anchors)> = None;

    for soft_start in start_options {
        let end_options = std::iter::once(None).chain(end_candidates.iter().copied().map(Some));
        for soft_end in end_options {
            if soft_start.is_none() && soft_end.is_none() {
                continue;
            }
            let anchors = Anchors::new(hard.start.or(soft_start), hard.end.or(soft_end));
            if anchors.start.is_some() && anchors.start == anchors.end {
                continue;
            }

            let candidate = optimize_order(matrix, anchors, options.max_iterations)?;
            debug!(cost = candidate.cost, ?anchors, "soft hypothesis");
            let better = best_soft
                .as_ref()
                .is_none_or(|(best, _)| candidate.cost < best.cost);
            if better {
                best_soft = Some((candidate, anchors));
            }
        }
    }

    let baseline_cost = base.cost;
    let selection = match best_soft {
        Some((route, anchors))
            if base.cost > 0.0
                && route.cost <= base.cost * (1.0 + options.soft_max_degradation) =>
        {
            Selection {
                route,
                choice: Choice::SoftPreference {
                    start: anchors.start,
                    end: anchors.end,
                },
                baseline_cost,
            }
        }
        _ => Selection {
            route: base,
            choice: Choice::Baseline,
            baseline_cost,
        },
    };
    Ok(selection)
}
