//! Test fixtures for itinerary-planner.
//!
//! Provides realistic test data including:
//! - Real Sri Lankan sights with region/locality labels
//! - Builders for stops, stop providers and stub travel tables

#![allow(dead_code)]

pub mod sri_lanka_locations;
pub mod stops;

pub use sri_lanka_locations::*;
pub use stops::*;
