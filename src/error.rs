//! Error taxonomy for the planner.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlannerError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlannerError {
    /// Caller-supplied data is unusable (missing coordinates, unknown anchor ids, ...).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The cost matrix has no value for a pair of stops.
    #[error("unreachable pair in cost matrix: {from} -> {to}")]
    UnreachablePair { from: usize, to: usize },

    #[error("too many stops for a travel matrix: {count} (max {max})")]
    TooManyStops { count: usize, max: usize },

    /// The matrix provider failed; no retry is attempted here.
    #[error("matrix provider error: {0}")]
    Provider(String),
}

/// Coarse classification for mapping errors onto caller responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    UnreachablePair,
    TooManyStops,
    Provider,
}

impl PlannerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::UnreachablePair { .. } => ErrorKind::UnreachablePair,
            Self::TooManyStops { .. } => ErrorKind::TooManyStops,
            Self::Provider(_) => ErrorKind::Provider,
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

impl From<reqwest::Error> for PlannerError {
    fn from(err: reqwest::Error) -> Self {
        PlannerError::Provider(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(PlannerError::invalid("x").kind(), ErrorKind::InvalidInput);
        assert_eq!(
            PlannerError::UnreachablePair { from: 0, to: 1 }.kind(),
            ErrorKind::UnreachablePair
        );
        assert_eq!(
            PlannerError::TooManyStops { count: 101, max: 100 }.kind(),
            ErrorKind::TooManyStops
        );
        assert_eq!(PlannerError::Provider("down".into()).kind(), ErrorKind::Provider);
    }

    #[test]
    fn test_display_is_verbatim() {
        let err = PlannerError::invalid("Missing coordinates for stop 7");
        assert_eq!(err.to_string(), "invalid input: Missing coordinates for stop 7");
        let err = PlannerError::TooManyStops { count: 120, max: 100 };
        assert_eq!(err.to_string(), "too many stops for a travel matrix: 120 (max 100)");
    }
}
