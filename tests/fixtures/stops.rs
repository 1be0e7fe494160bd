//! Builders and test doubles for stops and providers.

use std::cell::Cell;
use std::collections::HashMap;

use itinerary_planner::error::{PlannerError, Result};
use itinerary_planner::traits::{Coordinates, MatrixProvider, Stop, StopProvider, TravelTable};
use itinerary_planner::visit_time::Category;

use super::Location;

/// Builder for test stops with sensible defaults.
#[derive(Clone, Debug)]
pub struct TestStop {
    pub id: String,
    pub coordinates: Option<Coordinates>,
    pub category: Category,
    pub region: Option<String>,
    pub locality: Option<String>,
}

impl TestStop {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            coordinates: Some(Coordinates::new(0.0, 0.0)),
            category: Category::Other,
            region: None,
            locality: None,
        }
    }

    pub fn from_location(location: &Location) -> Self {
        Self::new(location.name)
            .at(location.lon, location.lat)
            .category(location.category)
            .region(location.region)
            .locality(location.locality)
    }

    pub fn at(mut self, lon: f64, lat: f64) -> Self {
        self.coordinates = Some(Coordinates::new(lon, lat));
        self
    }

    pub fn without_coordinates(mut self) -> Self {
        self.coordinates = None;
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn region(mut self, region: &str) -> Self {
        self.region = Some(region.to_string());
        self
    }

    pub fn locality(mut self, locality: &str) -> Self {
        self.locality = Some(locality.to_string());
        self
    }
}

impl Stop for TestStop {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    fn category(&self) -> Category {
        self.category
    }

    fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    fn locality(&self) -> Option<&str> {
        self.locality.as_deref()
    }
}

/// `n` stops named `s0..s{n-1}`.
pub fn numbered_stops(n: usize) -> Vec<TestStop> {
    (0..n).map(|i| TestStop::new(&format!("s{i}"))).collect()
}

/// Stop provider backed by a map of trip id -> stops.
#[derive(Default)]
pub struct MemoryStops {
    trips: HashMap<u32, Vec<TestStop>>,
}

impl MemoryStops {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trip(mut self, trip_id: u32, stops: Vec<TestStop>) -> Self {
        self.trips.insert(trip_id, stops);
        self
    }
}

impl StopProvider for MemoryStops {
    type TripId = u32;
    type Stop = TestStop;

    fn selected_stops(&self, trip_id: &u32) -> Result<Vec<TestStop>> {
        Ok(self.trips.get(trip_id).cloned().unwrap_or_default())
    }
}

/// Matrix provider returning a canned table (or error) and counting calls.
pub struct StubMatrix {
    response: Result<TravelTable>,
    calls: Cell<usize>,
}

impl StubMatrix {
    pub fn with_table(table: TravelTable) -> Self {
        Self {
            response: Ok(table),
            calls: Cell::new(0),
        }
    }

    /// Durations in seconds; distances are durations × 10 meters.
    pub fn with_durations(durations: &[Vec<f64>]) -> Self {
        Self::with_table(table_from_durations(durations))
    }

    pub fn with_error(error: PlannerError) -> Self {
        Self {
            response: Err(error),
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl MatrixProvider for StubMatrix {
    fn table_for(&self, _locations: &[Coordinates]) -> Result<TravelTable> {
        self.calls.set(self.calls.get() + 1);
        self.response.clone()
    }
}

pub fn table_from_durations(durations: &[Vec<f64>]) -> TravelTable {
    let wrap = |scale: f64| -> Vec<Vec<Option<f64>>> {
        durations
            .iter()
            .map(|row| row.iter().map(|value| Some(value * scale)).collect())
            .collect()
    };
    TravelTable {
        distances_m: wrap(10.0),
        durations_s: wrap(1.0),
    }
}

/// The 4-stop matrix used across the optimizer scenarios.
pub fn four_stop_matrix() -> Vec<Vec<f64>> {
    vec![
        vec![0.0, 10.0, 15.0, 20.0],
        vec![10.0, 0.0, 35.0, 25.0],
        vec![15.0, 35.0, 0.0, 30.0],
        vec![20.0, 25.0, 30.0, 0.0],
    ]
}
