//! Core domain traits for the trip planner.
//!
//! The planner never touches a database or an HTTP router. Apps implement
//! these traits for their own stop and trip models.

use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::snapshot::RouteSnapshot;
use crate::visit_time::Category;

/// Unique identifier for planner entities.
pub trait Id: Clone + Eq + Hash + Debug {}

impl<T> Id for T where T: Clone + Eq + Hash + Debug {}

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinates {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// A stop selected for a trip.
pub trait Stop {
    type Id: Id;

    fn id(&self) -> &Self::Id;

    /// Location, if the upstream workflow managed to resolve one.
    fn coordinates(&self) -> Option<Coordinates>;

    /// Category tag, used only for visit-time estimation.
    fn category(&self) -> Category;

    /// Free-text region label (state, province, ...).
    fn region(&self) -> Option<&str>;

    /// Free-text locality label (city, town, ...).
    fn locality(&self) -> Option<&str>;
}

/// Supplies the stops currently selected or confirmed for a trip.
///
/// Stops are returned in the trip's current visit order.
pub trait StopProvider {
    type TripId: Id;
    type Stop: Stop;

    fn selected_stops(&self, trip_id: &Self::TripId) -> Result<Vec<Self::Stop>>;
}

/// Raw N×N matrix where `None` marks an unreachable pair.
pub type RawMatrix = Vec<Vec<Option<f64>>>;

/// Distance (meters) and duration (seconds) matrices for a set of locations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TravelTable {
    pub distances_m: RawMatrix,
    pub durations_s: RawMatrix,
}

/// Provides a distance/duration table for a set of locations.
///
/// Both matrices are indexed by the provided location order.
pub trait MatrixProvider {
    fn table_for(&self, locations: &[Coordinates]) -> Result<TravelTable>;
}

/// Persists route snapshots, one per (trip, region) pair.
pub trait SnapshotStore {
    type TripId: Id;
    type StopId: Id;

    /// Replace any prior snapshot for the same trip and region wholesale.
    fn store(&self, snapshot: RouteSnapshot<Self::TripId, Self::StopId>) -> Result<()>;

    fn load(
        &self,
        trip_id: &Self::TripId,
        region: &str,
    ) -> Result<Option<RouteSnapshot<Self::TripId, Self::StopId>>>;
}
