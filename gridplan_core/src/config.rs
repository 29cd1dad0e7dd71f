//! Planner configuration
//!
//! Every knob the search core exposes, grouped into sections. All fields have
//! defaults, so an empty YAML or TOML document is a valid configuration.
//!
//! ```yaml
//! search:
//!   heuristic: manhattan
//!   epsilon: 1.0
//! state_space:
//!   kind: velocity
//!   max_velocity: 2
//! goal: [79, 59, 0, 0]
//! anytime:
//!   enabled: true
//!   time_budget_ms: 500
//! ```

use crate::error::{PlanError, PlanResult};
use crate::types::{Connectivity, EdgeCost, Heuristic, SpaceKind};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

mod defaults {
    pub fn epsilon() -> f64 {
        1.0
    }
    pub fn max_velocity() -> u32 {
        2
    }
    pub fn time_budget_ms() -> u64 {
        1000
    }
    pub fn initial_epsilon() -> f64 {
        10.0
    }
    pub fn decay() -> f64 {
        0.5
    }
    pub fn snap_threshold() -> f64 {
        1.001
    }
}

/// Top-level planner configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default)]
    pub search: SearchSection,

    #[serde(default)]
    pub state_space: StateSpaceSection,

    /// `[x, y]` or `[x, y, vx, vy]`. `None` means the origin at rest.
    #[serde(default)]
    pub start: Option<Vec<i64>>,

    /// `[x, y]` or `[x, y, vx, vy]`. `None` means the far corner at rest.
    #[serde(default)]
    pub goal: Option<Vec<i64>>,

    #[serde(default)]
    pub anytime: AnytimeSection,
}

/// Search engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSection {
    #[serde(default)]
    pub heuristic: Heuristic,

    /// Heuristic inflation factor. 0 = Dijkstra, 1 = A*, >1 = weighted A*.
    #[serde(default = "defaults::epsilon")]
    pub epsilon: f64,
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            heuristic: Heuristic::default(),
            epsilon: defaults::epsilon(),
        }
    }
}

/// State space settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSpaceSection {
    #[serde(default)]
    pub kind: SpaceKind,

    /// Largest velocity component (velocity space only)
    #[serde(default = "defaults::max_velocity")]
    pub max_velocity: u32,

    /// Motion set (position space only)
    #[serde(default)]
    pub connectivity: Connectivity,

    /// Move cost model (position space only)
    #[serde(default)]
    pub edge_cost: EdgeCost,
}

impl Default for StateSpaceSection {
    fn default() -> Self {
        Self {
            kind: SpaceKind::default(),
            max_velocity: defaults::max_velocity(),
            connectivity: Connectivity::default(),
            edge_cost: EdgeCost::default(),
        }
    }
}

/// Anytime search settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnytimeSection {
    #[serde(default)]
    pub enabled: bool,

    /// Wall-clock budget, checked between search attempts
    #[serde(default = "defaults::time_budget_ms")]
    pub time_budget_ms: u64,

    /// Inflation used by the first attempt
    #[serde(default = "defaults::initial_epsilon")]
    pub initial_epsilon: f64,

    /// Fraction of the gap to 1 removed after each attempt
    #[serde(default = "defaults::decay")]
    pub decay: f64,

    /// Once epsilon drops below this it snaps to exactly 1
    #[serde(default = "defaults::snap_threshold")]
    pub snap_threshold: f64,
}

impl Default for AnytimeSection {
    fn default() -> Self {
        Self {
            enabled: false,
            time_budget_ms: defaults::time_budget_ms(),
            initial_epsilon: defaults::initial_epsilon(),
            decay: defaults::decay(),
            snap_threshold: defaults::snap_threshold(),
        }
    }
}

impl AnytimeSection {
    pub fn time_budget(&self) -> Duration {
        Duration::from_millis(self.time_budget_ms)
    }

    /// Check the epsilon schedule: initial >= 1, decay in (0, 1], threshold >= 1
    pub fn validate(&self) -> PlanResult<()> {
        if !self.initial_epsilon.is_finite() || self.initial_epsilon < 1.0 {
            return Err(PlanError::InvalidConfig(format!(
                "anytime.initial_epsilon must be finite and >= 1, got {}",
                self.initial_epsilon
            )));
        }
        if !(self.decay > 0.0 && self.decay <= 1.0) {
            return Err(PlanError::InvalidConfig(format!(
                "anytime.decay must be in (0, 1], got {}",
                self.decay
            )));
        }
        if !self.snap_threshold.is_finite() || self.snap_threshold < 1.0 {
            return Err(PlanError::InvalidConfig(format!(
                "anytime.snap_threshold must be finite and >= 1, got {}",
                self.snap_threshold
            )));
        }
        Ok(())
    }
}

impl PlannerConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> PlanResult<Self> {
        let config: PlannerConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(toml_str: &str) -> PlanResult<Self> {
        let config: PlannerConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.yaml`/`.yml` or `.toml` file
    pub fn load(path: &Path) -> PlanResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&text)?,
            Some("yaml") | Some("yml") => Self::from_yaml_str(&text)?,
            other => {
                return Err(PlanError::InvalidConfig(format!(
                    "unsupported config extension {:?} for {}",
                    other,
                    path.display()
                )))
            }
        };
        log::info!("Loaded planner config from {}", path.display());
        Ok(config)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> PlanResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check value ranges that serde cannot express
    pub fn validate(&self) -> PlanResult<()> {
        let eps = self.search.epsilon;
        if !eps.is_finite() || eps < 0.0 {
            return Err(PlanError::InvalidConfig(format!(
                "search.epsilon must be finite and >= 0, got {}",
                eps
            )));
        }

        self.anytime.validate()?;

        for (name, coords) in [("start", &self.start), ("goal", &self.goal)] {
            if let Some(coords) = coords {
                self.check_coords(name, coords)?;
            }
        }

        Ok(())
    }

    fn check_coords(&self, name: &str, coords: &[i64]) -> PlanResult<()> {
        let ok = match self.state_space.kind {
            SpaceKind::Position => coords.len() == 2,
            SpaceKind::Velocity => coords.len() == 2 || coords.len() == 4,
        };
        if ok {
            Ok(())
        } else {
            Err(PlanError::InvalidConfig(format!(
                "{} has {} coordinates, which does not fit a {:?} state space",
                name,
                coords.len(),
                self.state_space.kind
            )))
        }
    }
}
