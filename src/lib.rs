//! itinerary-planner core
//!
//! Route ordering and day packing for multi-stop trips: an open-path
//! nearest-neighbor + 2-opt optimizer with hard and soft start/end anchors,
//! and a day packer that turns the ordered stops into a regional itinerary.

pub mod config;
pub mod construction;
pub mod error;
pub mod haversine;
pub mod itinerary;
pub mod local_search;
pub mod matrix;
pub mod optimizer;
pub mod osrm;
pub mod planner;
pub mod rate_limiter;
pub mod selector;
pub mod snapshot;
pub mod traits;
pub mod visit_time;

pub use error::{ErrorKind, PlannerError, Result};
