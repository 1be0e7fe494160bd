//! Day packing: split an ordered stop list into calendar days.
//!
//! Stops are consumed in order. A day always takes at least one stop and
//! keeps taking stops while its active time (travel + visit) stays within
//! the pace target plus a tolerance. Short days have their visit times
//! stretched, and a lone trailing stop may borrow the previous day's last
//! stop. Days are finally grouped under the region of their first stop.

use std::collections::{HashMap, VecDeque};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::snapshot::round_to;
use crate::traits::{Id, Stop};
use crate::visit_time::{Category, Pace};

/// Region heading for days whose first stop carries no region label.
pub const UNKNOWN_REGION: &str = "Other";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackingRules {
    /// Minutes a day may run over its target before the next stop is refused.
    pub tolerance_min: f64,
    /// Fixed daily allowance for meals and rest, outside active time.
    pub overhead_min: f64,
    /// Slack below target that triggers stretching.
    pub stretch_threshold_min: f64,
    pub max_stretch: f64,
    /// A lone trailing stop is rebalanced when its day is under this share of the target.
    pub trailing_day_fraction: f64,
}

impl Default for PackingRules {
    fn default() -> Self {
        Self {
            tolerance_min: 45.0,
            overhead_min: 120.0,
            stretch_threshold_min: 15.0,
            max_stretch: 1.5,
            trailing_day_fraction: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedStop<S> {
    pub stop_id: S,
    pub category: Category,
    pub region: Option<String>,
    pub estimated_visit_min: f64,
    pub estimated_travel_from_prev_min: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan<S> {
    pub day_number: usize,
    pub stops: Vec<PlannedStop<S>>,
    pub travel_min: f64,
    pub visit_min: f64,
    pub active_min: f64,
    pub overhead_min: f64,
    pub total_min: f64,
}

impl<S> DayPlan<S> {
    fn new(day_number: usize, stops: Vec<PlannedStop<S>>, overhead_min: f64) -> Self {
        let mut day = Self {
            day_number,
            stops,
            travel_min: 0.0,
            visit_min: 0.0,
            active_min: 0.0,
            overhead_min,
            total_min: 0.0,
        };
        day.recompute();
        day
    }

    fn recompute(&mut self) {
        let travel: f64 = self.stops.iter().map(|s| s.estimated_travel_from_prev_min).sum();
        let visit: f64 = self.stops.iter().map(|s| s.estimated_visit_min).sum();
        self.travel_min = round_to(travel, 1);
        self.visit_min = round_to(visit, 1);
        self.active_min = round_to(travel + visit, 1);
        self.total_min = round_to(travel + visit + self.overhead_min, 1);
    }

    pub fn region_name(&self) -> &str {
        self.stops
            .first()
            .and_then(|stop| stop.region.as_deref())
            .unwrap_or(UNKNOWN_REGION)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionGroup<S> {
    pub name: String,
    pub days: Vec<DayPlan<S>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary<S> {
    pub regions: Vec<RegionGroup<S>>,
    pub pace: Pace,
    pub target_active_min: f64,
    pub overhead_min: f64,
    pub total_stops: usize,
    pub total_days: usize,
}

impl<S> Itinerary<S> {
    /// All days, region by region.
    pub fn days(&self) -> impl Iterator<Item = &DayPlan<S>> {
        self.regions.iter().flat_map(|region| region.days.iter())
    }
}

/// Pack `stops` (already in visit order) into days.
///
/// `segments` holds known travel minutes between consecutive stops; missing
/// pairs count as zero, as does the first stop of every day.
pub fn pack_days<T>(
    stops: &[T],
    pace: Pace,
    segments: &HashMap<(T::Id, T::Id), f64>,
    rules: &PackingRules,
) -> Itinerary<T::Id>
where
    T: Stop,
{
    let target = pace.target_active_minutes();
    let ceiling = target + rules.tolerance_min;
    let travel_between = |from: &T::Id, to: &T::Id| -> f64 {
        segments.get(&(from.clone(), to.clone())).copied().unwrap_or(0.0)
    };

    let mut queue: VecDeque<&T> = stops.iter().collect();
    let mut days: Vec<DayPlan<T::Id>> = Vec::new();

    while !queue.is_empty() {
        let mut planned: Vec<PlannedStop<T::Id>> = Vec::new();
        let mut active = 0.0;
        let mut prev: Option<&T::Id> = None;

        while let Some(&stop) = queue.front() {
            let travel = prev.map_or(0.0, |prev| travel_between(prev, stop.id()));
            let visit = pace.visit_minutes(stop.category());
            let step = travel + visit;

            if !planned.is_empty() && active + step > ceiling {
                break;
            }

            queue.pop_front();
            planned.push(PlannedStop {
                stop_id: stop.id().clone(),
                category: stop.category(),
                region: stop.region().map(str::to_string),
                estimated_visit_min: visit,
                estimated_travel_from_prev_min: travel,
            });
            active += step;
            prev = Some(stop.id());
        }

        stretch(&mut planned, active, target, rules);
        days.push(DayPlan::new(days.len() + 1, planned, rules.overhead_min));
    }

    equalize_trailing_day(&mut days, target, rules, travel_between);

    let total_days = days.len();
    let regions = group_by_region(days);
    info!(pace = %pace, stops = stops.len(), days = total_days, "itinerary packed");

    Itinerary {
        regions,
        pace,
        target_active_min: target,
        overhead_min: rules.overhead_min,
        total_stops: stops.len(),
        total_days,
    }
}

/// Scale visit times uniformly so a short day absorbs its slack.
fn stretch<S>(planned: &mut [PlannedStop<S>], active: f64, target: f64, rules: &PackingRules) {
    let visit: f64 = planned.iter().map(|s| s.estimated_visit_min).sum();
    let slack = target - active;
    if slack <= rules.stretch_threshold_min || visit <= 0.0 {
        return;
    }
    let factor = ((visit + slack) / visit).min(rules.max_stretch);
    for stop in planned.iter_mut() {
        stop.estimated_visit_min = round_to(stop.estimated_visit_min * factor, 1);
    }
}

/// Move the previous day's last stop onto a lone, light final day. Runs once.
fn equalize_trailing_day<S, F>(days: &mut [DayPlan<S>], target: f64, rules: &PackingRules, travel_between: F)
where
    S: Id,
    F: Fn(&S, &S) -> f64,
{
    let [.., prev, last] = days else {
        return;
    };
    let light = last.active_min < target * rules.trailing_day_fraction;
    if last.stops.len() != 1 || prev.stops.len() <= 2 || !light {
        return;
    }
    let Some(mut moved) = prev.stops.pop() else {
        return;
    };

    moved.estimated_travel_from_prev_min = 0.0;
    if let Some(next) = last.stops.first_mut() {
        next.estimated_travel_from_prev_min = travel_between(&moved.stop_id, &next.stop_id);
    }
    last.stops.insert(0, moved);

    prev.recompute();
    last.recompute();
}

fn group_by_region<S>(days: Vec<DayPlan<S>>) -> Vec<RegionGroup<S>> {
    let mut groups: Vec<RegionGroup<S>> = Vec::new();
    for day in days {
        let name = day.region_name().to_string();
        match groups.iter_mut().find(|group| group.name == name) {
            Some(group) => group.days.push(day),
            None => groups.push(RegionGroup { name, days: vec![day] }),
        }
    }
    groups
}
