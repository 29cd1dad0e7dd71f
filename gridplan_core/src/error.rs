//! Error types shared by every gridplan crate.
//!
//! Note that an unreachable goal is *not* an error: a search that exhausts its
//! open set returns normally with `SearchStatus::Unreachable`.

use thiserror::Error;

/// Planner errors
#[derive(Debug, Error)]
pub enum PlanError {
    /// Start or goal is outside the encodable range or sits on an occupied cell.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// `pop_min` on a queue with no valid entries. Reaching this from the
    /// search loop means the loop's termination check is broken.
    #[error("Pop from empty priority queue")]
    EmptyQueue,

    /// A state or index does not fit the state space's linear encoding.
    #[error("Encoding overflow: {what} is outside [0, {limit})")]
    EncodingOverflow { what: String, limit: usize },

    #[error("Invalid occupancy grid: {0}")]
    InvalidGrid(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type for planner operations
pub type PlanResult<T> = Result<T, PlanError>;

impl PlanError {
    pub fn overflow(what: impl std::fmt::Display, limit: usize) -> Self {
        PlanError::EncodingOverflow {
            what: what.to_string(),
            limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = PlanError::InvalidState("start (3, 4) is occupied".into());
        assert_eq!(err.to_string(), "Invalid state: start (3, 4) is occupied");

        let err = PlanError::overflow("index 100", 25);
        assert_eq!(
            err.to_string(),
            "Encoding overflow: index 100 is outside [0, 25)"
        );
    }

    #[test]
    fn test_io_conversion() {
        fn read_missing() -> PlanResult<String> {
            Ok(std::fs::read_to_string("/definitely/not/here.yaml")?)
        }

        assert!(matches!(read_missing(), Err(PlanError::Io(_))));
    }
}
