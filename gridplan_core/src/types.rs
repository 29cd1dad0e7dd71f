//! Small enums shared between the configuration layer and the algorithms.

use crate::error::PlanError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Heuristic used to estimate the remaining cost to the goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Heuristic {
    /// L1 distance. Velocity-aware spaces divide it by the current speed.
    #[default]
    Manhattan,
    /// L2 distance over position only
    Euclidean,
}

impl FromStr for Heuristic {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "manhattan" => Ok(Heuristic::Manhattan),
            "euclidean" => Ok(Heuristic::Euclidean),
            other => Err(PlanError::InvalidConfig(format!(
                "unknown heuristic '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Heuristic::Manhattan => write!(f, "manhattan"),
            Heuristic::Euclidean => write!(f, "euclidean"),
        }
    }
}

/// Motion set of the positional state space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Connectivity {
    /// Axis moves only
    #[default]
    Four,
    /// Axis moves plus diagonals (no corner cutting)
    Eight,
}

/// Cost charged for one positional move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeCost {
    /// Every move costs 1
    #[default]
    Unit,
    /// Moves cost their Euclidean length (sqrt(2) for diagonals)
    Euclidean,
}

/// Which state space a configuration describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpaceKind {
    /// (x, y)
    Position,
    /// (x, y, vx, vy)
    #[default]
    Velocity,
}
