//! Config-driven planning entry point
//!
//! Picks the state space, endpoints and search mode from a
//! [`PlannerConfig`] and runs either a single weighted A* search or the
//! anytime driver over a borrowed grid.
//!
//! ```rust
//! use gridplan_core::PlannerConfig;
//! use gridplan_library::algorithms::occupancy_grid::OccupancyGrid;
//! use gridplan_library::planner::plan_with_config;
//!
//! let grid = OccupancyGrid::empty(10, 10).unwrap();
//! let config = PlannerConfig::from_yaml_str("state_space:\n  kind: position\n").unwrap();
//!
//! let plan = plan_with_config(&grid, &config).unwrap();
//! assert!(plan.is_found());
//! assert_eq!(plan.positions().last(), Some(&(9, 9)));
//! ```

use crate::algorithms::anytime::{
    AnytimeAttempt, AnytimePlanner, AnytimeSchedule, PlanOutcome,
};
use crate::algorithms::astar::{SearchStatus, WeightedAStar};
use crate::algorithms::occupancy_grid::OccupancyGrid;
use crate::algorithms::state_space::{
    GridSpace, GridState, StateSpace, VelocitySpace, VelocityState,
};
use gridplan_core::config::PlannerConfig;
use gridplan_core::error::{PlanError, PlanResult};
use gridplan_core::types::SpaceKind;
use std::time::Instant;

/// Outcome of a config-driven run, tagged by state space
#[derive(Debug, Clone)]
pub enum ConfiguredPlan {
    Position(PlanOutcome<GridState>),
    Velocity(PlanOutcome<VelocityState>),
}

impl ConfiguredPlan {
    pub fn status(&self) -> SearchStatus {
        match self {
            Self::Position(o) => o.result.status,
            Self::Velocity(o) => o.result.status,
        }
    }

    pub fn is_found(&self) -> bool {
        self.status() == SearchStatus::Found
    }

    pub fn cost(&self) -> f64 {
        match self {
            Self::Position(o) => o.result.cost,
            Self::Velocity(o) => o.result.cost,
        }
    }

    /// Cells along the final path
    pub fn positions(&self) -> Vec<(i64, i64)> {
        match self {
            Self::Position(o) => o.result.path.iter().map(|s| (s.x, s.y)).collect(),
            Self::Velocity(o) => o.result.path.iter().map(|s| (s.x, s.y)).collect(),
        }
    }

    /// States popped by the final search
    pub fn visited_count(&self) -> usize {
        match self {
            Self::Position(o) => o.result.visited.len(),
            Self::Velocity(o) => o.result.visited.len(),
        }
    }

    pub fn attempts(&self) -> &[AnytimeAttempt] {
        match self {
            Self::Position(o) => &o.attempts,
            Self::Velocity(o) => &o.attempts,
        }
    }
}

/// Plan over `grid` as described by `config`
///
/// Missing endpoints default to the origin and the far corner (at rest in a
/// velocity space). A two-coordinate endpoint in a velocity space means at
/// rest.
pub fn plan_with_config(grid: &OccupancyGrid, config: &PlannerConfig) -> PlanResult<ConfiguredPlan> {
    config.validate()?;
    let space_cfg = &config.state_space;

    match space_cfg.kind {
        SpaceKind::Position => {
            let space = GridSpace::new(grid)
                .with_connectivity(space_cfg.connectivity)
                .with_edge_cost(space_cfg.edge_cost);
            let start = endpoint_2d(config.start.as_deref(), space.default_start())?;
            let goal = endpoint_2d(config.goal.as_deref(), space.default_goal())?;
            run(&space, start, goal, config).map(ConfiguredPlan::Position)
        }
        SpaceKind::Velocity => {
            let space = VelocitySpace::new(grid, space_cfg.max_velocity)?;
            let start = endpoint_4d(config.start.as_deref(), space.default_start())?;
            let goal = endpoint_4d(config.goal.as_deref(), space.default_goal())?;
            run(&space, start, goal, config).map(ConfiguredPlan::Velocity)
        }
    }
}

fn run<S: StateSpace>(
    space: &S,
    start: S::State,
    goal: S::State,
    config: &PlannerConfig,
) -> PlanResult<PlanOutcome<S::State>> {
    let heuristic = config.search.heuristic;
    log::info!(
        "planning {:?} -> {:?} over {} states ({} heuristic)",
        start,
        goal,
        space.size(),
        heuristic
    );

    if config.anytime.enabled {
        return AnytimePlanner::new(space)
            .with_heuristic(heuristic)
            .with_schedule(AnytimeSchedule::from_section(&config.anytime))
            .with_budget(config.anytime.time_budget())
            .plan(start, goal);
    }

    let begin = Instant::now();
    let result = WeightedAStar::new(space)
        .with_heuristic(heuristic)
        .with_epsilon(config.search.epsilon)
        .search(start, goal)?;
    let elapsed = begin.elapsed();

    let attempt = AnytimeAttempt {
        epsilon: result.epsilon,
        status: result.status,
        cost: result.cost,
        expansions: result.expansions,
        elapsed,
    };
    Ok(PlanOutcome {
        result,
        attempts: vec![attempt],
        elapsed,
    })
}

fn endpoint_2d(coords: Option<&[i64]>, default: GridState) -> PlanResult<GridState> {
    match coords {
        None => Ok(default),
        Some(&[x, y]) => Ok(GridState::new(x, y)),
        Some(other) => Err(arity_error(other, "2")),
    }
}

fn endpoint_4d(coords: Option<&[i64]>, default: VelocityState) -> PlanResult<VelocityState> {
    match coords {
        None => Ok(default),
        Some(&[x, y]) => Ok(VelocityState::at_rest(x, y)),
        Some(&[x, y, vx, vy]) => Ok(VelocityState::new(x, y, vx, vy)),
        Some(other) => Err(arity_error(other, "2 or 4")),
    }
}

fn arity_error(coords: &[i64], expected: &str) -> PlanError {
    PlanError::InvalidConfig(format!(
        "endpoint {:?} has {} coordinates, expected {}",
        coords,
        coords.len(),
        expected
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::occupancy_grid::{worlds, GridBuilder};

    fn config(yaml: &str) -> PlannerConfig {
        PlannerConfig::from_yaml_str(yaml).unwrap()
    }

    #[test]
    fn test_position_defaults_to_corners() {
        let grid = OccupancyGrid::empty(6, 4).unwrap();
        let plan = plan_with_config(&grid, &config("state_space:\n  kind: position\n")).unwrap();

        assert!(matches!(plan, ConfiguredPlan::Position(_)));
        let cells = plan.positions();
        assert_eq!(cells.first(), Some(&(0, 0)));
        assert_eq!(cells.last(), Some(&(5, 3)));
        assert_eq!(plan.cost(), 8.0);
        assert_eq!(plan.attempts().len(), 1);
    }

    #[test]
    fn test_velocity_is_default_kind() {
        let grid = OccupancyGrid::empty(8, 8).unwrap();
        let plan = plan_with_config(&grid, &PlannerConfig::default()).unwrap();

        match &plan {
            ConfiguredPlan::Velocity(outcome) => {
                let path = &outcome.result.path;
                assert_eq!(path[0], VelocityState::at_rest(0, 0));
                assert_eq!(path[path.len() - 1], VelocityState::at_rest(7, 7));
            }
            ConfiguredPlan::Position(_) => panic!("expected a velocity plan"),
        }
    }

    #[test]
    fn test_explicit_endpoints_on_world() {
        let grid = worlds::world(2).unwrap();
        let yaml = r#"
search:
  heuristic: euclidean
  epsilon: 1.5
state_space:
  kind: position
  connectivity: eight
  edge_cost: euclidean
start: [5, 5]
goal: [35, 25]
"#;
        let plan = plan_with_config(&grid, &config(yaml)).unwrap();

        assert!(plan.is_found());
        assert_eq!(plan.positions().first(), Some(&(5, 5)));
        assert_eq!(plan.positions().last(), Some(&(35, 25)));
        assert_eq!(plan.attempts()[0].epsilon, 1.5);
        assert!(plan.visited_count() > 0);
    }

    #[test]
    fn test_anytime_section_enables_driver() {
        let grid = OccupancyGrid::empty(12, 12).unwrap();
        let yaml = r#"
state_space:
  kind: position
anytime:
  enabled: true
  time_budget_ms: 60000
  initial_epsilon: 4.0
  decay: 1.0
"#;
        let plan = plan_with_config(&grid, &config(yaml)).unwrap();

        let tried: Vec<f64> = plan.attempts().iter().map(|a| a.epsilon).collect();
        assert_eq!(tried, vec![4.0, 1.0]);
        assert_eq!(plan.cost(), 22.0);
    }

    #[test]
    fn test_unreachable_goal_is_not_an_error() {
        let mut b = GridBuilder::new(10, 10);
        b.add_line((5, 0), (5, 9));
        let grid = b.build();

        let plan = plan_with_config(&grid, &config("state_space:\n  kind: position\n")).unwrap();
        assert_eq!(plan.status(), SearchStatus::Unreachable);
        assert!(plan.positions().is_empty());
        assert!(plan.cost().is_infinite());
    }

    #[test]
    fn test_blocked_endpoint_is_an_error() {
        let mut b = GridBuilder::new(10, 10);
        b.set_occupied(3, 3);
        let grid = b.build();

        let yaml = "state_space:\n  kind: velocity\nstart: [3, 3]\n";
        let result = plan_with_config(&grid, &config(yaml));
        assert!(matches!(result, Err(PlanError::InvalidState(_))));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let grid = OccupancyGrid::empty(5, 5).unwrap();
        let mut cfg = PlannerConfig::default();
        cfg.search.epsilon = f64::NAN;

        assert!(matches!(
            plan_with_config(&grid, &cfg),
            Err(PlanError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_oversized_velocity_range_is_an_error() {
        let grid = OccupancyGrid::empty(4, 4).unwrap();
        let cfg = config("state_space:\n  kind: velocity\n  max_velocity: 4294967295\n");

        let result = plan_with_config(&grid, &cfg);
        assert!(matches!(result, Err(PlanError::EncodingOverflow { .. })));
    }
}
