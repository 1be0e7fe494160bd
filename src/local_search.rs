//! 2-opt improvement for open paths.
//!
//! First-improvement strategy: scan `i` ascending then `k` ascending, apply
//! the first reversal that strictly lowers the path cost, then restart the
//! scan. Costs may be asymmetric, so the reversed segment is re-priced in
//! the opposite direction rather than assumed equal.
//!
//! Paths of three stops are still improved. Without a fixed end a reversal
//! may run through the last position; with one, the last position never moves.

use tracing::debug;

use crate::matrix::CostMatrix;

/// Minimum gain for a move to count, guards against float-noise thrashing.
pub const IMPROVEMENT_EPSILON: f64 = 1e-9;

/// Default cap on full scans.
pub const DEFAULT_MAX_ITERATIONS: usize = 2000;

#[derive(Debug, Clone, Copy)]
pub struct TwoOptOptions {
    /// Keep position 0 in place.
    pub fixed_start: bool,
    /// Keep the last position in place.
    pub fixed_end: bool,
    /// Maximum number of full scans.
    pub max_iterations: usize,
}

impl Default for TwoOptOptions {
    fn default() -> Self {
        Self {
            fixed_start: true,
            fixed_end: false,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Improve `order` in place-by-copy; the result never costs more than the input.
pub fn two_opt(matrix: &CostMatrix, order: &[usize], options: TwoOptOptions) -> Vec<usize> {
    let mut best = order.to_vec();
    let n = best.len();
    if n < 3 {
        return best;
    }

    let first_i = usize::from(options.fixed_start);
    let last_k = if options.fixed_end { n - 2 } else { n - 1 };
    let seed_cost = matrix.path_cost(&best);

    let mut iterations = 0;
    let mut improved = true;
    while improved && iterations < options.max_iterations {
        improved = false;
        iterations += 1;

        if let Some((i, k)) = first_improving_move(matrix, &best, first_i, last_k) {
            best[i..=k].reverse();
            improved = true;
        }
    }

    debug!(
        iterations,
        seed_cost,
        final_cost = matrix.path_cost(&best),
        "2-opt finished"
    );
    best
}

fn first_improving_move(
    matrix: &CostMatrix,
    path: &[usize],
    first_i: usize,
    last_k: usize,
) -> Option<(usize, usize)> {
    let n = path.len();
    for i in first_i..last_k {
        let mut forward = 0.0;
        let mut backward = 0.0;
        for k in (i + 1)..=last_k {
            forward += matrix.cost(path[k - 1], path[k]);
            backward += matrix.cost(path[k], path[k - 1]);

            let mut old = forward;
            let mut new = backward;
            if i > 0 {
                old += matrix.cost(path[i - 1], path[i]);
                new += matrix.cost(path[i - 1], path[k]);
            }
            if k + 1 < n {
                old += matrix.cost(path[k], path[k + 1]);
                new += matrix.cost(path[i], path[k + 1]);
            }

            if new + IMPROVEMENT_EPSILON < old {
                return Some((i, k));
            }
        }
    }
    None
}
