//! Route snapshots and an in-memory store.
//!
//! A snapshot is a point-in-time record of an optimized route. Each
//! re-optimization replaces the previous snapshot for the same trip and
//! region as a whole; edges are never patched individually.

use std::collections::HashMap;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::traits::{Id, RawMatrix, SnapshotStore};

/// Region tag for snapshots that cover the whole trip.
pub const ALL_REGIONS: &str = "ALL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteEdge<S> {
    pub from: S,
    pub to: S,
    pub distance_m: f64,
    pub duration_s: f64,
}

impl<S> RouteEdge<S> {
    pub fn distance_km(&self) -> f64 {
        self.distance_m / 1000.0
    }

    pub fn duration_min(&self) -> f64 {
        self.duration_s / 60.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSnapshot<T, S> {
    pub trip_id: T,
    pub region: String,
    pub ordered_stop_ids: Vec<S>,
    pub total_distance_m: f64,
    pub total_duration_s: f64,
    pub edges: Vec<RouteEdge<S>>,
}

impl<T, S: Clone> RouteSnapshot<T, S> {
    /// Build a snapshot for a path through the matrices.
    ///
    /// `ordered_stop_ids[i]` is the id of the stop at `path[i]`. Edges whose
    /// matrix cells are absent are skipped and contribute nothing to the
    /// totals. A path of one stop or fewer has no edges.
    pub fn build(
        trip_id: T,
        region: impl Into<String>,
        ordered_stop_ids: Vec<S>,
        distances_m: &RawMatrix,
        durations_s: &RawMatrix,
        path: &[usize],
    ) -> Self {
        let mut edges = Vec::with_capacity(path.len().saturating_sub(1));
        for (ids, indices) in ordered_stop_ids.windows(2).zip(path.windows(2)) {
            let (a, b) = (indices[0], indices[1]);
            let distance = cell(distances_m, a, b);
            let duration = cell(durations_s, a, b);
            if let (Some(distance_m), Some(duration_s)) = (distance, duration) {
                edges.push(RouteEdge {
                    from: ids[0].clone(),
                    to: ids[1].clone(),
                    distance_m,
                    duration_s,
                });
            }
        }

        let total_distance_m = edges.iter().map(|edge| edge.distance_m).sum();
        let total_duration_s = edges.iter().map(|edge| edge.duration_s).sum();

        Self {
            trip_id,
            region: region.into(),
            ordered_stop_ids,
            total_distance_m,
            total_duration_s,
            edges,
        }
    }

    pub fn total_distance_km(&self) -> f64 {
        round_to(self.total_distance_m / 1000.0, 3)
    }

    pub fn total_duration_min(&self) -> f64 {
        round_to(self.total_duration_s / 60.0, 1)
    }
}

impl<T, S: Id> RouteSnapshot<T, S> {
    /// Travel minutes for each stored edge, keyed by (from, to).
    pub fn segment_minutes(&self) -> HashMap<(S, S), f64> {
        self.edges
            .iter()
            .map(|edge| ((edge.from.clone(), edge.to.clone()), edge.duration_min()))
            .collect()
    }
}

fn cell(matrix: &RawMatrix, from: usize, to: usize) -> Option<f64> {
    matrix
        .get(from)
        .and_then(|row| row.get(to))
        .copied()
        .flatten()
        .filter(|value| value.is_finite())
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Process-local snapshot store, keyed by (trip, region).
#[derive(Debug)]
pub struct InMemorySnapshotStore<T, S> {
    snapshots: Mutex<HashMap<(T, String), RouteSnapshot<T, S>>>,
}

impl<T, S> Default for InMemorySnapshotStore<T, S> {
    fn default() -> Self {
        Self {
            snapshots: Mutex::new(HashMap::new()),
        }
    }
}

impl<T, S> InMemorySnapshotStore<T, S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.snapshots.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Id, S: Id> SnapshotStore for InMemorySnapshotStore<T, S> {
    type TripId = T;
    type StopId = S;

    fn store(&self, snapshot: RouteSnapshot<T, S>) -> Result<()> {
        let key = (snapshot.trip_id.clone(), snapshot.region.clone());
        self.snapshots.lock().insert(key, snapshot);
        Ok(())
    }

    fn load(&self, trip_id: &T, region: &str) -> Result<Option<RouteSnapshot<T, S>>> {
        let key = (trip_id.clone(), region.to_string());
        Ok(self.snapshots.lock().get(&key).cloned())
    }
}
