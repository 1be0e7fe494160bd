//! Nearest-neighbor construction of open paths.

use crate::matrix::CostMatrix;

/// Pick a stable start: the index with the smallest row sum, skipping `exclude`.
///
/// Ties go to the lowest index. Returns `None` when no index is eligible.
pub fn central_start(matrix: &CostMatrix, exclude: Option<usize>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for index in 0..matrix.len() {
        if Some(index) == exclude {
            continue;
        }
        let sum = matrix.row_sum(index);
        match best {
            Some((_, best_sum)) if sum >= best_sum => {}
            _ => best = Some((index, sum)),
        }
    }
    best.map(|(index, _)| index)
}

/// Greedy open path from `start` visiting every index exactly once.
///
/// When `end` is set it is held back until it is the only unvisited index, so
/// it always lands last. An `end` equal to `start` is ignored. Ties pick the
/// lowest index.
pub fn nearest_neighbor_path(matrix: &CostMatrix, start: usize, end: Option<usize>) -> Vec<usize> {
    let n = matrix.len();
    if n == 0 {
        return Vec::new();
    }
    let end = end.filter(|&end| end != start);

    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    visited[start] = true;
    order.push(start);
    let mut current = start;

    while order.len() < n {
        let remaining = n - order.len();
        let mut next: Option<(usize, f64)> = None;

        for candidate in 0..n {
            if visited[candidate] {
                continue;
            }
            if Some(candidate) == end && remaining > 1 {
                continue;
            }
            let cost = matrix.cost(current, candidate);
            match next {
                Some((_, best)) if cost >= best => {}
                _ => next = Some((candidate, cost)),
            }
        }

        let Some((chosen, _)) = next else {
            break;
        };
        visited[chosen] = true;
        order.push(chosen);
        current = chosen;
    }

    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CostMatrix {
        CostMatrix::from_rows(&[
            vec![0.0, 10.0, 15.0, 20.0],
            vec![10.0, 0.0, 35.0, 25.0],
            vec![15.0, 35.0, 0.0, 30.0],
            vec![20.0, 25.0, 30.0, 0.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_central_start_picks_min_row_sum() {
        assert_eq!(central_start(&sample(), None), Some(0));
    }

    #[test]
    fn test_central_start_skips_excluded() {
        // row sums: 45, 70, 80, 75
        assert_eq!(central_start(&sample(), Some(0)), Some(1));
    }

    #[test]
    fn test_central_start_ties_pick_lowest_index() {
        let matrix = CostMatrix::from_rows(&[vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();
        assert_eq!(central_start(&matrix, None), Some(0));
    }

    #[test]
    fn test_central_start_nothing_eligible() {
        let matrix = CostMatrix::from_rows(&[vec![0.0]]).unwrap();
        assert_eq!(central_start(&matrix, Some(0)), None);
    }

    #[test]
    fn test_nearest_neighbor_greedy() {
        assert_eq!(nearest_neighbor_path(&sample(), 0, None), vec![0, 1, 3, 2]);
    }

    #[test]
    fn test_nearest_neighbor_holds_end_back() {
        let path = nearest_neighbor_path(&sample(), 0, Some(1));
        assert_eq!(path, vec![0, 2, 3, 1]);
    }

    #[test]
    fn test_end_equal_to_start_is_ignored() {
        assert_eq!(nearest_neighbor_path(&sample(), 2, Some(2)), vec![2, 0, 1, 3]);
    }

    #[test]
    fn test_ties_pick_first_index() {
        let matrix = CostMatrix::from_rows(&[
            vec![0.0, 5.0, 5.0],
            vec![5.0, 0.0, 5.0],
            vec![5.0, 5.0, 0.0],
        ])
        .unwrap();
        assert_eq!(nearest_neighbor_path(&matrix, 2, None), vec![2, 0, 1]);
    }

    #[test]
    fn test_single_node() {
        let matrix = CostMatrix::from_rows(&[vec![0.0]]).unwrap();
        assert_eq!(nearest_neighbor_path(&matrix, 0, None), vec![0]);
    }
}
