//! # gridplan library
//!
//! Grid search over occupancy maps.
//!
//! ## Structure
//!
//! ```text
//! gridplan_library/
//! ── algorithms/     # Grid, state spaces, queue, search engines
//! ── planner/        # Config-driven entry point
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use gridplan_library::{GridSpace, GridState, OccupancyGrid, WeightedAStar};
//!
//! let grid = OccupancyGrid::empty(5, 5).unwrap();
//! let space = GridSpace::new(&grid);
//! let result = WeightedAStar::new(&space)
//!     .search(GridState::new(0, 0), GridState::new(4, 4))
//!     .unwrap();
//! assert_eq!(result.cost, 8.0);
//! ```

pub mod algorithms;
pub mod planner;

pub use algorithms::anytime::{
    anytime_search, AnytimeAttempt, AnytimePlanner, AnytimeSchedule, PlanOutcome,
};
pub use algorithms::astar::{dijkstra, path_length, SearchResult, SearchStatus, WeightedAStar};
pub use algorithms::occupancy_grid::{worlds, GridBuilder, OccupancyGrid};
pub use algorithms::priority_queue::PriorityQueue;
pub use algorithms::state_space::{
    line_march_clear, GridSpace, GridState, StateIndex, StateSpace, VelocitySpace, VelocityState,
};
pub use planner::{plan_with_config, ConfiguredPlan};

// Enums the config layer names
pub use gridplan_core::types::{Connectivity, EdgeCost, Heuristic, SpaceKind};
