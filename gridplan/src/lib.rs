//! # gridplan
//!
//! Weighted A*, Dijkstra and anytime search over 2D occupancy grids, in
//! position or position + velocity state spaces.
//!
//! ## Quick Start
//!
//! ```rust
//! use gridplan::prelude::*;
//!
//! fn main() -> AnyResult<()> {
//!     let grid = worlds::world(2)?;
//!     let space = GridSpace::new(&grid);
//!
//!     let result = WeightedAStar::new(&space)
//!         .with_epsilon(1.5)
//!         .search(GridState::new(5, 5), GridState::new(35, 25))?;
//!     ensure!(result.is_found(), "no path");
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Lazy-deletion open set** with deterministic tie-breaking
//! - **Continuous collision checks** for multi-cell velocity moves
//! - **Anytime mode** that tightens ε until a deadline
//! - **YAML/TOML configuration**

// Re-export core components
pub use gridplan_core::{self, *};

// Re-export the algorithm library with alias
pub use gridplan_library as library;

/// The gridplan prelude - everything you need to get started
pub mod prelude {
    // Environment
    pub use gridplan_library::algorithms::occupancy_grid::{worlds, GridBuilder, OccupancyGrid};
    pub use gridplan_library::algorithms::state_space::{
        GridSpace, GridState, StateIndex, StateSpace, VelocitySpace, VelocityState,
    };

    // Search
    pub use gridplan_library::algorithms::anytime::{AnytimePlanner, AnytimeSchedule, PlanOutcome};
    pub use gridplan_library::algorithms::astar::{
        dijkstra, SearchResult, SearchStatus, WeightedAStar,
    };
    pub use gridplan_library::planner::{plan_with_config, ConfiguredPlan};

    // Configuration and shared enums
    pub use gridplan_core::config::PlannerConfig;
    pub use gridplan_core::types::{Connectivity, EdgeCost, Heuristic, SpaceKind};

    // Error types
    pub use gridplan_core::error::{PlanError, PlanResult};
    pub type Result<T> = PlanResult<T>;

    // Common std types
    pub use std::time::{Duration, Instant};

    // Common traits
    pub use serde::{Deserialize, Serialize};

    // Re-export anyhow for error handling
    pub use anyhow::{anyhow, bail, ensure, Context, Result as AnyResult};
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get gridplan version
pub fn version() -> &'static str {
    VERSION
}
