//! Anytime weighted A*
//!
//! Runs a sequence of independent weighted A* searches with a shrinking
//! inflation factor, starting greedy (large ε) and converging to plain A*
//! (ε = 1). Every attempt starts from scratch. The wall-clock budget is only
//! checked between attempts, so the first attempt always runs to completion.
//!
//! # Example
//!
//! ```rust
//! use gridplan_library::algorithms::anytime::AnytimePlanner;
//! use gridplan_library::algorithms::occupancy_grid::OccupancyGrid;
//! use gridplan_library::algorithms::state_space::{GridSpace, GridState};
//! use std::time::Duration;
//!
//! let grid = OccupancyGrid::empty(20, 20).unwrap();
//! let space = GridSpace::new(&grid);
//!
//! let outcome = AnytimePlanner::new(&space)
//!     .with_budget(Duration::from_secs(10))
//!     .plan(GridState::new(0, 0), GridState::new(19, 19))
//!     .unwrap();
//!
//! assert!(outcome.is_found());
//! assert_eq!(outcome.result.epsilon, 1.0);
//! ```

use crate::algorithms::astar::{SearchResult, SearchStatus, WeightedAStar};
use crate::algorithms::state_space::StateSpace;
use gridplan_core::config::AnytimeSection;
use gridplan_core::error::PlanResult;
use gridplan_core::types::Heuristic;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// How ε shrinks from one attempt to the next
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnytimeSchedule {
    pub initial_epsilon: f64,
    /// Fraction of the gap `ε - 1` removed per attempt
    pub decay: f64,
    /// ε below this snaps to exactly 1
    pub snap_threshold: f64,
}

impl Default for AnytimeSchedule {
    fn default() -> Self {
        Self {
            initial_epsilon: 10.0,
            decay: 0.5,
            snap_threshold: 1.001,
        }
    }
}

impl AnytimeSchedule {
    pub fn new(initial_epsilon: f64, decay: f64, snap_threshold: f64) -> Self {
        Self {
            initial_epsilon,
            decay,
            snap_threshold,
        }
    }

    pub fn from_section(section: &AnytimeSection) -> Self {
        Self::new(section.initial_epsilon, section.decay, section.snap_threshold)
    }

    pub fn validate(&self) -> PlanResult<()> {
        self.to_section().validate()
    }

    /// The config section this schedule corresponds to, not enabled
    pub fn to_section(&self) -> AnytimeSection {
        AnytimeSection {
            initial_epsilon: self.initial_epsilon,
            decay: self.decay,
            snap_threshold: self.snap_threshold,
            ..AnytimeSection::default()
        }
    }

    /// ε of the first attempt
    pub fn first(&self) -> f64 {
        self.snap(self.initial_epsilon, f64::INFINITY)
    }

    /// ε of the attempt after one run at `epsilon`
    pub fn next(&self, epsilon: f64) -> f64 {
        self.snap(epsilon - self.decay * (epsilon - 1.0), epsilon)
    }

    /// Full sequence of ε values, ending at 1
    pub fn epsilons(&self) -> Vec<f64> {
        let mut epsilon = self.first();
        let mut out = vec![epsilon];
        while epsilon > 1.0 {
            epsilon = self.next(epsilon);
            out.push(epsilon);
        }
        out
    }

    // A step that no longer makes progress (rounding near 1) also snaps
    fn snap(&self, epsilon: f64, previous: f64) -> f64 {
        if epsilon < self.snap_threshold || epsilon >= previous {
            1.0
        } else {
            epsilon
        }
    }
}

/// Log entry for one search attempt
#[derive(Debug, Clone, Serialize)]
pub struct AnytimeAttempt {
    pub epsilon: f64,
    pub status: SearchStatus,
    pub cost: f64,
    pub expansions: usize,
    pub elapsed: Duration,
}

/// Result of an anytime run
#[derive(Debug, Clone, Serialize)]
pub struct PlanOutcome<T> {
    /// Latest successful search, or the failed first search if the goal
    /// cannot be reached
    pub result: SearchResult<T>,
    pub attempts: Vec<AnytimeAttempt>,
    pub elapsed: Duration,
}

impl<T: Copy> PlanOutcome<T> {
    pub fn is_found(&self) -> bool {
        self.result.is_found()
    }

    /// True once the ε = 1 attempt has completed
    pub fn is_optimal(&self) -> bool {
        self.result.is_found() && self.result.epsilon <= 1.0
    }
}

/// Anytime planner borrowing a state space
pub struct AnytimePlanner<'s, S: StateSpace> {
    space: &'s S,
    heuristic: Heuristic,
    schedule: AnytimeSchedule,
    budget: Duration,
}

impl<'s, S: StateSpace> AnytimePlanner<'s, S> {
    /// Manhattan heuristic, default schedule, one second budget
    pub fn new(space: &'s S) -> Self {
        Self {
            space,
            heuristic: Heuristic::Manhattan,
            schedule: AnytimeSchedule::default(),
            budget: Duration::from_secs(1),
        }
    }

    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn with_schedule(mut self, schedule: AnytimeSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_budget(mut self, budget: Duration) -> Self {
        self.budget = budget;
        self
    }

    pub fn schedule(&self) -> &AnytimeSchedule {
        &self.schedule
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Plan with the configured budget starting now
    pub fn plan(&self, start: S::State, goal: S::State) -> PlanResult<PlanOutcome<S::State>> {
        // An unrepresentable deadline is treated as no deadline
        let deadline = Instant::now().checked_add(self.budget);
        self.plan_until(start, goal, deadline)
    }

    /// Plan until `deadline` passes (checked between attempts) or the ε = 1
    /// attempt finishes
    pub fn plan_until(
        &self,
        start: S::State,
        goal: S::State,
        deadline: Option<Instant>,
    ) -> PlanResult<PlanOutcome<S::State>> {
        self.schedule.validate()?;

        let begin = Instant::now();
        let mut engine = WeightedAStar::new(self.space).with_heuristic(self.heuristic);
        let mut attempts = Vec::new();

        let mut epsilon = self.schedule.first();
        let mut best = run_attempt(&mut engine, epsilon, start, goal, &mut attempts)?;

        // Reachability does not depend on ε, so a miss ends the run
        while best.is_found() && epsilon > 1.0 {
            if deadline.map_or(false, |d| Instant::now() >= d) {
                log::debug!(
                    "anytime: budget exhausted after {} attempts, best eps={:.3}",
                    attempts.len(),
                    epsilon
                );
                break;
            }
            epsilon = self.schedule.next(epsilon);
            let result = run_attempt(&mut engine, epsilon, start, goal, &mut attempts)?;
            if !result.is_found() {
                break;
            }
            best = result;
        }

        let elapsed = begin.elapsed();
        if best.is_found() {
            log::info!(
                "anytime: {} attempts in {:?}, final eps={:.3}, cost {:.3}",
                attempts.len(),
                elapsed,
                best.epsilon,
                best.cost
            );
        } else {
            log::warn!("anytime: goal unreachable");
        }

        Ok(PlanOutcome {
            result: best,
            attempts,
            elapsed,
        })
    }
}

fn run_attempt<S: StateSpace>(
    engine: &mut WeightedAStar<'_, S>,
    epsilon: f64,
    start: S::State,
    goal: S::State,
    attempts: &mut Vec<AnytimeAttempt>,
) -> PlanResult<SearchResult<S::State>> {
    engine.set_epsilon(epsilon);
    let started = Instant::now();
    let result = engine.search(start, goal)?;
    attempts.push(AnytimeAttempt {
        epsilon,
        status: result.status,
        cost: result.cost,
        expansions: result.expansions,
        elapsed: started.elapsed(),
    });
    Ok(result)
}

/// One-call form of [`AnytimePlanner`]
pub fn anytime_search<S: StateSpace>(
    space: &S,
    start: S::State,
    goal: S::State,
    heuristic: Heuristic,
    schedule: AnytimeSchedule,
    budget: Duration,
) -> PlanResult<PlanOutcome<S::State>> {
    AnytimePlanner::new(space)
        .with_heuristic(heuristic)
        .with_schedule(schedule)
        .with_budget(budget)
        .plan(start, goal)
}
