//! Validated cost matrices.
//!
//! A [`CostMatrix`] is built from a raw provider matrix at the validation
//! boundary. Once built, every entry is a finite, non-negative number, so the
//! path algorithms never deal with missing values.

use crate::error::{PlannerError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    size: usize,
    values: Vec<f64>,
}

impl CostMatrix {
    /// Validate a raw matrix.
    ///
    /// Fails with `InvalidInput` if the matrix is not square or holds a
    /// negative value, and with `UnreachablePair` if any cell is absent or
    /// not finite.
    pub fn from_raw(raw: &[Vec<Option<f64>>]) -> Result<Self> {
        let size = raw.len();
        let mut values = Vec::with_capacity(size * size);

        for (from, row) in raw.iter().enumerate() {
            if row.len() != size {
                return Err(PlannerError::invalid(format!(
                    "cost matrix must be NxN: row {from} has {} entries, expected {size}",
                    row.len()
                )));
            }
            for (to, cell) in row.iter().enumerate() {
                let value = match cell {
                    Some(value) if value.is_finite() => *value,
                    _ => return Err(PlannerError::UnreachablePair { from, to }),
                };
                if value < 0.0 {
                    return Err(PlannerError::invalid(format!(
                        "cost matrix entry {from} -> {to} is negative ({value})"
                    )));
                }
                values.push(value);
            }
        }

        Ok(Self { size, values })
    }

    /// Build from a fully populated matrix.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let raw: Vec<Vec<Option<f64>>> = rows
            .iter()
            .map(|row| row.iter().copied().map(Some).collect())
            .collect();
        Self::from_raw(&raw)
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Cost of the edge `from -> to`. Both indices must be `< len()`.
    pub fn cost(&self, from: usize, to: usize) -> f64 {
        self.values[from * self.size + to]
    }

    pub fn row_sum(&self, from: usize) -> f64 {
        let start = from * self.size;
        self.values[start..start + self.size].iter().sum()
    }

    /// Sum of consecutive edge costs along an open path.
    pub fn path_cost(&self, order: &[usize]) -> f64 {
        order
            .windows(2)
            .map(|pair| self.cost(pair[0], pair[1]))
            .sum()
    }
}
