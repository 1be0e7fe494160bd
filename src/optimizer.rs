//! Route optimizer: nearest-neighbor seed followed by 2-opt, over an open path.

use serde::{Deserialize, Serialize};

use crate::construction::{central_start, nearest_neighbor_path};
use crate::error::{PlannerError, Result};
use crate::local_search::{DEFAULT_MAX_ITERATIONS, TwoOptOptions, two_opt};
use crate::matrix::CostMatrix;

/// An ordered visit sequence (indices into the matrix) and its open-path cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub order: Vec<usize>,
    pub cost: f64,
}

impl Route {
    pub fn trivial(size: usize) -> Self {
        Self {
            order: (0..size).collect(),
            cost: 0.0,
        }
    }
}

/// Start/end positions pinned for one optimization run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Anchors {
    pub start: Option<usize>,
    pub end: Option<usize>,
}

impl Anchors {
    pub const fn new(start: Option<usize>, end: Option<usize>) -> Self {
        Self { start, end }
    }
}

/// Optimize the visit order for `matrix`.
///
/// A fixed start is honored as position 0; without one, the most central
/// index (excluding a fixed end) is used and may later move. A fixed end
/// always stays last. An end equal to the start is dropped.
pub fn optimize_order(matrix: &CostMatrix, anchors: Anchors, max_iterations: usize) -> Result<Route> {
    let n = matrix.len();
    for index in [anchors.start, anchors.end].into_iter().flatten() {
        if index >= n {
            return Err(PlannerError::invalid(format!(
                "anchor index {index} out of range for {n} stops"
            )));
        }
    }
    if n <= 1 {
        return Ok(Route::trivial(n));
    }

    let (start, fixed_start) = match anchors.start {
        Some(start) => (start, true),
        None => match central_start(matrix, anchors.end) {
            Some(start) => (start, false),
            None => return Ok(Route::trivial(n)),
        },
    };
    let end = anchors.end.filter(|&end| end != start);

    let seed = nearest_neighbor_path(matrix, start, end);
    let options = TwoOptOptions {
        fixed_start,
        fixed_end: end.is_some(),
        max_iterations,
    };
    let order = two_opt(matrix, &seed, options);
    let cost = matrix.path_cost(&order);

    Ok(Route { order, cost })
}

/// [`optimize_order`] with the default iteration cap.
pub fn optimize_default(matrix: &CostMatrix, anchors: Anchors) -> Result<Route> {
    optimize_order(matrix, anchors, DEFAULT_MAX_ITERATIONS)
}
