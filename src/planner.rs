//! Trip planner: wires stops, the travel table and snapshots together.
//!
//! `optimize` runs the constrained route selection once for a trip and
//! stores the result as a snapshot. `build_itinerary` replays the stored
//! order and travel times through the day packer.
//!
//! Calls are not serialized per trip. Two concurrent `optimize` calls for the
//! same trip both write a snapshot and the last write wins.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::PlannerConfig;
use crate::error::{PlannerError, Result};
use crate::itinerary::{Itinerary, pack_days};
use crate::matrix::CostMatrix;
use crate::optimizer::Anchors;
use crate::selector::{RegionPreferences, select_route};
use crate::snapshot::RouteSnapshot;
use crate::traits::{Coordinates, MatrixProvider, SnapshotStore, Stop, StopProvider};
use crate::visit_time::Pace;

type StopIdOf<P> = <<P as StopProvider>::Stop as Stop>::Id;

#[derive(Debug, Clone, PartialEq)]
pub struct OptimizeRequest<T, S> {
    pub trip_id: T,
    /// Hard start: this stop always comes first.
    pub start_stop: Option<S>,
    /// Hard end: this stop always comes last.
    pub end_stop: Option<S>,
    pub preferences: RegionPreferences,
}

impl<T, S> OptimizeRequest<T, S> {
    pub fn new(trip_id: T) -> Self {
        Self {
            trip_id,
            start_stop: None,
            end_stop: None,
            preferences: RegionPreferences::default(),
        }
    }

    pub fn start_at(mut self, stop: S) -> Self {
        self.start_stop = Some(stop);
        self
    }

    pub fn end_at(mut self, stop: S) -> Self {
        self.end_stop = Some(stop);
        self
    }

    pub fn prefer_regions(mut self, start_region: Option<&str>, end_region: Option<&str>) -> Self {
        self.preferences = RegionPreferences::new(start_region, end_region);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizeOutcome<S> {
    pub ordered_stop_ids: Vec<S>,
    pub total_distance_km: f64,
    pub total_duration_min: f64,
    pub total_stops: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePlanSummary<S> {
    pub ordered_stop_ids: Vec<S>,
    pub total_distance_km: f64,
    pub total_duration_min: f64,
}

#[derive(Debug)]
pub struct TripPlanner<P, M, S> {
    stops: P,
    matrix: M,
    snapshots: S,
    config: PlannerConfig,
}

impl<P, M, S> TripPlanner<P, M, S>
where
    P: StopProvider,
    M: MatrixProvider,
    S: SnapshotStore<TripId = P::TripId, StopId = StopIdOf<P>>,
{
    pub fn new(stops: P, matrix: M, snapshots: S) -> Self {
        Self::with_config(stops, matrix, snapshots, PlannerConfig::default())
    }

    pub fn with_config(stops: P, matrix: M, snapshots: S, config: PlannerConfig) -> Self {
        Self {
            stops,
            matrix,
            snapshots,
            config,
        }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn matrix(&self) -> &M {
        &self.matrix
    }

    pub fn snapshots(&self) -> &S {
        &self.snapshots
    }

    /// Optimize the visit order of a trip's selected stops and store a snapshot.
    pub fn optimize(
        &self,
        request: &OptimizeRequest<P::TripId, StopIdOf<P>>,
    ) -> Result<OptimizeOutcome<StopIdOf<P>>> {
        let stops = self.stops.selected_stops(&request.trip_id)?;
        let coordinates = collect_coordinates(&stops)?;

        let n = stops.len();
        if n > self.config.max_matrix_stops {
            return Err(PlannerError::TooManyStops {
                count: n,
                max: self.config.max_matrix_stops,
            });
        }

        let start = resolve_anchor(&stops, request.start_stop.as_ref(), "start")?;
        let mut end = resolve_anchor(&stops, request.end_stop.as_ref(), "end")?;
        if start.is_some() && start == end {
            end = None;
        }

        if n <= 1 {
            let ids: Vec<_> = stops.iter().map(|stop| stop.id().clone()).collect();
            let path: Vec<usize> = (0..n).collect();
            let snapshot = RouteSnapshot::build(
                request.trip_id.clone(),
                self.config.snapshot_region.as_str(),
                ids.clone(),
                &Vec::new(),
                &Vec::new(),
                &path,
            );
            self.snapshots.store(snapshot)?;
            return Ok(OptimizeOutcome {
                ordered_stop_ids: ids,
                total_distance_km: 0.0,
                total_duration_min: 0.0,
                total_stops: n,
            });
        }

        let table = self.matrix.table_for(&coordinates)?;
        if table.durations_s.len() != n || table.distances_m.len() != n {
            return Err(PlannerError::Provider(format!(
                "travel table has {} x {} rows for {n} stops",
                table.distances_m.len(),
                table.durations_s.len()
            )));
        }
        let durations = CostMatrix::from_raw(&table.durations_s)?;
        CostMatrix::from_raw(&table.distances_m)?;

        let selection = select_route(
            &durations,
            &stops,
            Anchors::new(start, end),
            &request.preferences,
            self.config.selector_options(),
        )?;

        let order = selection.route.order;
        let ordered_stop_ids: Vec<_> = order.iter().map(|&index| stops[index].id().clone()).collect();
        let snapshot = RouteSnapshot::build(
            request.trip_id.clone(),
            self.config.snapshot_region.as_str(),
            ordered_stop_ids.clone(),
            &table.distances_m,
            &table.durations_s,
            &order,
        );
        let total_distance_km = snapshot.total_distance_km();
        let total_duration_min = snapshot.total_duration_min();
        self.snapshots.store(snapshot)?;

        info!(
            trip = ?request.trip_id,
            stops = n,
            total_distance_km,
            total_duration_min,
            choice = ?selection.choice,
            "route optimized"
        );

        Ok(OptimizeOutcome {
            ordered_stop_ids,
            total_distance_km,
            total_duration_min,
            total_stops: n,
        })
    }

    /// Split a trip's stops into days, using the stored route order and travel times.
    pub fn build_itinerary(&self, trip_id: &P::TripId, pace: Pace) -> Result<Itinerary<StopIdOf<P>>> {
        let mut stops = self.stops.selected_stops(trip_id)?;
        let snapshot = self.snapshots.load(trip_id, &self.config.snapshot_region)?;

        let segments = match &snapshot {
            Some(snapshot) => {
                let rank: HashMap<&StopIdOf<P>, usize> = snapshot
                    .ordered_stop_ids
                    .iter()
                    .enumerate()
                    .map(|(position, id)| (id, position))
                    .collect();
                stops.sort_by_key(|stop| rank.get(stop.id()).copied().unwrap_or(usize::MAX));
                snapshot.segment_minutes()
            }
            None => HashMap::new(),
        };

        Ok(pack_days(&stops, pace, &segments, &self.config.packing))
    }

    /// The stored route for a trip, if it was ever optimized.
    pub fn route_plan(&self, trip_id: &P::TripId) -> Result<Option<RoutePlanSummary<StopIdOf<P>>>> {
        let snapshot = self.snapshots.load(trip_id, &self.config.snapshot_region)?;
        Ok(snapshot.map(|snapshot| RoutePlanSummary {
            total_distance_km: snapshot.total_distance_km(),
            total_duration_min: snapshot.total_duration_min(),
            ordered_stop_ids: snapshot.ordered_stop_ids,
        }))
    }
}

fn collect_coordinates<T: Stop>(stops: &[T]) -> Result<Vec<Coordinates>> {
    stops
        .iter()
        .map(|stop| {
            stop.coordinates()
                .ok_or_else(|| PlannerError::invalid(format!("Missing coordinates for stop {:?}", stop.id())))
        })
        .collect()
}

fn resolve_anchor<T: Stop>(stops: &[T], id: Option<&T::Id>, role: &str) -> Result<Option<usize>> {
    let Some(id) = id else {
        return Ok(None);
    };
    stops
        .iter()
        .position(|stop| stop.id() == id)
        .map(Some)
        .ok_or_else(|| PlannerError::invalid(format!("{role} stop {id:?} is not selected for this trip")))
}
