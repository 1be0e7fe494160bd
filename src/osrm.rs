//! OSRM HTTP adapter for distance/duration tables.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use crate::config::MAX_MATRIX_STOPS;
use crate::error::{PlannerError, Result};
use crate::rate_limiter::RateLimiter;
use crate::traits::{Coordinates, MatrixProvider, TravelTable};

pub const DEFAULT_BASE_URL: &str = "https://router.project-osrm.org";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            profile: "driving".to_string(),
            timeout_secs: 20,
        }
    }
}

impl OsrmConfig {
    /// Defaults overridden by `OSRM_BASE_URL`, `OSRM_PROFILE` and `OSRM_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(base_url) = lookup("OSRM_BASE_URL").filter(|v| !v.trim().is_empty()) {
            config.base_url = base_url.trim().trim_end_matches('/').to_string();
        }
        if let Some(profile) = lookup("OSRM_PROFILE").filter(|v| !v.trim().is_empty()) {
            config.profile = profile.trim().to_string();
        }
        if let Some(timeout) = lookup("OSRM_TIMEOUT_SECS") {
            config.timeout_secs = timeout.trim().parse().map_err(|_| {
                PlannerError::invalid(format!("OSRM_TIMEOUT_SECS must be a whole number, got '{timeout}'"))
            })?;
        }
        Ok(config)
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
    limiter: Option<Arc<RateLimiter>>,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            config,
            client,
            limiter: None,
        })
    }

    /// Space out requests through a shared limiter.
    pub fn with_rate_limiter(mut self, limiter: Arc<RateLimiter>) -> Self {
        self.limiter = Some(limiter);
        self
    }

    pub fn config(&self) -> &OsrmConfig {
        &self.config
    }

    fn table_url(&self, locations: &[Coordinates]) -> String {
        format!(
            "{}/table/v1/{}/{}?annotations=distance,duration",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            format_coordinates(locations)
        )
    }
}

/// OSRM expects `lon,lat;lon,lat`.
pub fn format_coordinates(locations: &[Coordinates]) -> String {
    locations
        .iter()
        .map(|c| format!("{:.6},{:.6}", c.lon, c.lat))
        .collect::<Vec<_>>()
        .join(";")
}

impl MatrixProvider for OsrmClient {
    fn table_for(&self, locations: &[Coordinates]) -> Result<TravelTable> {
        match locations.len() {
            0 => return Ok(TravelTable::default()),
            1 => {
                return Ok(TravelTable {
                    distances_m: vec![vec![Some(0.0)]],
                    durations_s: vec![vec![Some(0.0)]],
                });
            }
            count if count > MAX_MATRIX_STOPS => {
                return Err(PlannerError::TooManyStops {
                    count,
                    max: MAX_MATRIX_STOPS,
                });
            }
            _ => {}
        }

        if let Some(limiter) = &self.limiter {
            limiter.acquire();
        }

        let url = self.table_url(locations);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|err| PlannerError::Provider(format!("OSRM request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PlannerError::Provider(format!("OSRM error: HTTP {}", status.as_u16())));
        }

        let body = response
            .json::<TableResponse>()
            .map_err(|_| PlannerError::Provider("OSRM returned non-JSON response".to_string()))?;
        body.into_table()
    }
}

/// OSRM Table service response. Cells are `null` when no route exists.
#[derive(Debug, Deserialize)]
pub(crate) struct TableResponse {
    code: String,
    message: Option<String>,
    distances: Option<Vec<Vec<Option<f64>>>>,
    durations: Option<Vec<Vec<Option<f64>>>>,
}

impl TableResponse {
    fn into_table(self) -> Result<TravelTable> {
        if self.code != "Ok" {
            let message = self.message.unwrap_or(self.code);
            return Err(PlannerError::Provider(format!("OSRM error: {message}")));
        }
        match (self.distances, self.durations) {
            (Some(distances_m), Some(durations_s)) => Ok(TravelTable {
                distances_m,
                durations_s,
            }),
            _ => Err(PlannerError::Provider(
                "OSRM table response missing distances/durations".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn parse(json: &str) -> Result<TravelTable> {
        serde_json::from_str::<TableResponse>(json)
            .expect("valid JSON")
            .into_table()
    }

    #[test]
    fn test_url_uses_lon_lat_order() {
        let client = OsrmClient::new(OsrmConfig {
            base_url: "http://localhost:5000/".to_string(),
            ..OsrmConfig::default()
        })
        .unwrap();
        assert_eq!(client.config().profile, "driving");
        let url = client.table_url(&[Coordinates::new(79.8428, 6.9344), Coordinates::new(80.635, 7.2906)]);
        assert_eq!(
            url,
            "http://localhost:5000/table/v1/driving/79.842800,6.934400;80.635000,7.290600?annotations=distance,duration"
        );
    }

    /// Client pointed at a closed port: any request that goes out fails.
    fn offline_client() -> OsrmClient {
        OsrmClient::new(OsrmConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 1,
            ..OsrmConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_single_location_needs_no_request() {
        let table = offline_client().table_for(&[Coordinates::new(79.8428, 6.9344)]).unwrap();
        assert_eq!(table.distances_m, vec![vec![Some(0.0)]]);
        assert_eq!(table.durations_s, vec![vec![Some(0.0)]]);
    }

    #[test]
    fn test_too_many_locations_rejected_before_request() {
        let locations = vec![Coordinates::new(79.8428, 6.9344); MAX_MATRIX_STOPS + 1];
        let err = offline_client().table_for(&locations).unwrap_err();
        assert_eq!(err, PlannerError::TooManyStops { count: 101, max: 100 });
    }

    #[test]
    fn test_ok_response() {
        let table = parse(
            r#"{"code":"Ok","distances":[[0.0,1200.5],[1190.0,0.0]],"durations":[[0.0,95.2],[101.0,0.0]]}"#,
        )
        .unwrap();
        assert_eq!(table.distances_m[0][1], Some(1200.5));
        assert_eq!(table.durations_s[1][0], Some(101.0));
    }

    #[test]
    fn test_null_cells_pass_through() {
        let table = parse(r#"{"code":"Ok","distances":[[0.0,null],[null,0.0]],"durations":[[0.0,null],[null,0.0]]}"#)
            .unwrap();
        assert_eq!(table.durations_s[0][1], None);
    }

    #[test]
    fn test_error_code_is_provider_error() {
        let err = parse(r#"{"code":"InvalidQuery","message":"Coordinates are invalid"}"#).unwrap_err();
        assert_eq!(err, PlannerError::Provider("OSRM error: Coordinates are invalid".to_string()));
    }

    #[test]
    fn test_missing_matrix_is_provider_error() {
        let err = parse(r#"{"code":"Ok","durations":[[0.0]]}"#).unwrap_err();
        assert!(matches!(err, PlannerError::Provider(_)));
    }

    #[test]
    fn test_config_from_lookup() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("OSRM_BASE_URL", "http://osrm.internal:5000/"),
            ("OSRM_TIMEOUT_SECS", "5"),
        ]);
        let config = OsrmConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap();
        assert_eq!(config.base_url, "http://osrm.internal:5000");
        assert_eq!(config.profile, "driving");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_config_rejects_bad_timeout() {
        let err = OsrmConfig::from_lookup(|key| (key == "OSRM_TIMEOUT_SECS").then(|| "soon".to_string()))
            .unwrap_err();
        assert!(matches!(err, PlannerError::InvalidInput(_)));
    }
}
