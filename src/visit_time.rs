//! Category and pace tables used to estimate how long a stop takes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlannerError;

/// Shortest visit we ever schedule, in minutes.
const MIN_VISIT_MINUTES: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Heritage,
    Museum,
    Religious,
    Nature,
    Beach,
    Adventure,
    Food,
    Shopping,
    Viewpoint,
    Entertainment,
    Wellness,
    LocalExperience,
    Other,
}

impl Category {
    /// Parse a free-text category tag. Unknown tags fall back to `Other`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "heritage" => Self::Heritage,
            "museum" => Self::Museum,
            "religious" => Self::Religious,
            "nature" => Self::Nature,
            "beach" => Self::Beach,
            "adventure" => Self::Adventure,
            "food" => Self::Food,
            "shopping" => Self::Shopping,
            "viewpoint" => Self::Viewpoint,
            "entertainment" => Self::Entertainment,
            "wellness" => Self::Wellness,
            "local-experience" => Self::LocalExperience,
            _ => Self::Other,
        }
    }

    /// Typical visit length at a balanced pace, in minutes.
    pub const fn base_minutes(self) -> u32 {
        match self {
            Self::Heritage | Self::Museum => 90,
            Self::Religious => 75,
            Self::Nature | Self::Beach => 120,
            Self::Adventure => 180,
            Self::Food => 60,
            Self::Shopping => 75,
            Self::Viewpoint => 45,
            Self::Entertainment => 90,
            Self::Wellness => 120,
            Self::LocalExperience => 90,
            Self::Other => 75,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pace {
    Relaxed,
    #[default]
    Balanced,
    Packed,
}

impl Pace {
    pub const fn key(self) -> &'static str {
        match self {
            Self::Relaxed => "relaxed",
            Self::Balanced => "balanced",
            Self::Packed => "packed",
        }
    }

    /// Daily budget of travel + visit minutes.
    pub const fn target_active_minutes(self) -> f64 {
        match self {
            Self::Relaxed => 360.0,
            Self::Balanced => 480.0,
            Self::Packed => 600.0,
        }
    }

    /// Scale applied to category visit times.
    pub const fn visit_multiplier(self) -> f64 {
        match self {
            Self::Relaxed => 1.15,
            Self::Balanced => 1.0,
            Self::Packed => 0.85,
        }
    }

    /// Estimated minutes spent at a stop of `category` at this pace.
    ///
    /// Exact halves round to even (76.5 -> 76). Floating-point products that
    /// land just under a half round down (90 * 1.15 -> 103).
    pub fn visit_minutes(self, category: Category) -> f64 {
        let scaled = f64::from(category.base_minutes()) * self.visit_multiplier();
        scaled.round_ties_even().max(MIN_VISIT_MINUTES)
    }
}

impl fmt::Display for Pace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Pace {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "relaxed" => Ok(Self::Relaxed),
            "balanced" => Ok(Self::Balanced),
            "packed" => Ok(Self::Packed),
            other => Err(PlannerError::invalid(format!("unknown pace '{other}'"))),
        }
    }
}
