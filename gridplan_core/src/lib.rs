//! # gridplan Core
//!
//! Shared foundation for the gridplan motion-planning crates:
//!
//! - **Errors**: [`PlanError`] and the [`PlanResult`] alias used everywhere
//! - **Types**: small enums naming heuristics, motion sets and cost models
//! - **Config**: [`PlannerConfig`], loadable from YAML or TOML
//!
//! ## Quick Start
//!
//! ```rust
//! use gridplan_core::{Heuristic, PlannerConfig};
//!
//! let config = PlannerConfig::from_yaml_str("search:\n  heuristic: euclidean\n").unwrap();
//! assert_eq!(config.search.heuristic, Heuristic::Euclidean);
//! ```

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types for easy access
pub use config::{AnytimeSection, PlannerConfig, SearchSection, StateSpaceSection};
pub use error::{PlanError, PlanResult};
pub use types::{Connectivity, EdgeCost, Heuristic, SpaceKind};
