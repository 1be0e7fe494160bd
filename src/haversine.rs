//! Haversine travel table provider (fallback when OSRM is unavailable).
//!
//! Uses great-circle distance and an assumed speed to estimate travel time.
//! Less accurate than OSRM (ignores roads) but always available and never
//! reports an unreachable pair.

use crate::error::Result;
use crate::traits::{Coordinates, MatrixProvider, TravelTable};

/// Average driving speed assumption for time estimation.
const DEFAULT_SPEED_KMH: f64 = 40.0;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone)]
pub struct HaversineMatrix {
    /// Assumed average driving speed in km/h.
    pub speed_kmh: f64,
}

impl Default for HaversineMatrix {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
        }
    }
}

impl HaversineMatrix {
    pub fn new(speed_kmh: f64) -> Self {
        Self { speed_kmh }
    }

    /// Great-circle distance between two points in kilometers.
    pub fn haversine_km(from: Coordinates, to: Coordinates) -> f64 {
        let lat1_rad = from.lat.to_radians();
        let lat2_rad = to.lat.to_radians();
        let delta_lat = (to.lat - from.lat).to_radians();
        let delta_lon = (to.lon - from.lon).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();

        EARTH_RADIUS_KM * c
    }

    fn km_to_seconds(&self, km: f64) -> f64 {
        (km / self.speed_kmh * 3600.0).round()
    }
}

impl MatrixProvider for HaversineMatrix {
    fn table_for(&self, locations: &[Coordinates]) -> Result<TravelTable> {
        let n = locations.len();
        let mut distances_m = vec![vec![Some(0.0); n]; n];
        let mut durations_s = vec![vec![Some(0.0); n]; n];

        for (i, from) in locations.iter().enumerate() {
            for (j, to) in locations.iter().enumerate() {
                if i != j {
                    let km = Self::haversine_km(*from, *to);
                    distances_m[i][j] = Some((km * 1000.0).round());
                    durations_s[i][j] = Some(self.km_to_seconds(km));
                }
            }
        }

        Ok(TravelTable {
            distances_m,
            durations_s,
        })
    }
}
