//! Error types shared across robosim crates

use thiserror::Error;

/// What was being placed when a position check failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Obstacle,
    Target,
    Start,
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Placement::Obstacle => write!(f, "Obstacle"),
            Placement::Target => write!(f, "Target"),
            Placement::Start => write!(f, "Start"),
        }
    }
}

/// robosim errors
#[derive(Debug, Error)]
pub enum RoboSimError {
    #[error("{kind} position {pos} is out of field bounds ({width} x {height})")]
    InvalidPosition {
        kind: Placement,
        pos: String,
        width: f64,
        height: f64,
    },

    #[error("Unknown algorithm '{0}'")]
    UnknownAlgorithm(String),

    #[error("Algorithm '{algorithm}' requires a {required} field")]
    IncompatibleField {
        algorithm: &'static str,
        required: &'static str,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for robosim operations
pub type RoboSimResult<T> = Result<T, RoboSimError>;

impl RoboSimError {
    /// Build an `InvalidPosition` error for anything displayable
    pub fn invalid_position(
        kind: Placement,
        pos: impl std::fmt::Display,
        bounds: (f64, f64),
    ) -> Self {
        RoboSimError::InvalidPosition {
            kind,
            pos: pos.to_string(),
            width: bounds.0,
            height: bounds.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_position_message() {
        let err = RoboSimError::invalid_position(Placement::Target, "(12, 3)", (10.0, 10.0));
        assert_eq!(
            err.to_string(),
            "Target position (12, 3) is out of field bounds (10 x 10)"
        );
    }

    #[test]
    fn test_unknown_algorithm_message() {
        let err = RoboSimError::UnknownAlgorithm("dwa".to_string());
        assert_eq!(err.to_string(), "Unknown algorithm 'dwa'");
    }
}
