//! Weighted A* / Dijkstra search
//!
//! Best-first search over any [`StateSpace`], with the heuristic inflated by
//! a factor ε:
//!
//! - ε = 0: Dijkstra (uniform cost), the heuristic is ignored
//! - ε = 1: A*, optimal with an admissible heuristic
//! - ε > 1: weighted A*, cost bounded by ε × optimal, usually far fewer
//!   expansions
//!
//! # Example
//!
//! ```rust
//! use gridplan_library::algorithms::astar::WeightedAStar;
//! use gridplan_library::algorithms::occupancy_grid::OccupancyGrid;
//! use gridplan_library::algorithms::state_space::{GridSpace, GridState};
//! use gridplan_core::Heuristic;
//!
//! let grid = OccupancyGrid::empty(5, 5).unwrap();
//! let space = GridSpace::new(&grid);
//!
//! let result = WeightedAStar::new(&space)
//!     .with_heuristic(Heuristic::Manhattan)
//!     .with_epsilon(1.0)
//!     .search(GridState::new(0, 0), GridState::new(4, 4))
//!     .unwrap();
//!
//! assert!(result.is_found());
//! assert_eq!(result.edge_count(), 8);
//! ```

use crate::algorithms::priority_queue::PriorityQueue;
use crate::algorithms::state_space::{StateIndex, StateSpace};
use gridplan_core::error::{PlanError, PlanResult};
use gridplan_core::types::Heuristic;
use serde::Serialize;
use std::collections::HashMap;

/// How a search ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SearchStatus {
    /// Goal popped from the open set
    Found,
    /// Open set exhausted first
    Unreachable,
}

/// Output of one search
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult<T> {
    pub status: SearchStatus,
    /// Start to goal inclusive; empty when unreachable
    pub path: Vec<T>,
    /// Indices in the order they were popped, goal included
    pub visited: Vec<StateIndex>,
    /// Cost of `path`, infinite when unreachable
    pub cost: f64,
    /// Inflation factor the search ran with
    pub epsilon: f64,
    /// States closed (expanded)
    pub expansions: usize,
}

impl<T: Copy> SearchResult<T> {
    pub fn is_found(&self) -> bool {
        self.status == SearchStatus::Found
    }

    /// Number of moves in the path
    pub fn edge_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Grid cells along the path
    pub fn positions<S>(&self, space: &S) -> Vec<(i64, i64)>
    where
        S: StateSpace<State = T>,
    {
        self.path.iter().map(|s| space.position(s)).collect()
    }

    /// Decode the visited order for a renderer
    pub fn visited_states<S>(&self, space: &S) -> PlanResult<Vec<T>>
    where
        S: StateSpace<State = T>,
    {
        self.visited.iter().map(|&i| space.state_of(i)).collect()
    }
}

/// Per-state bookkeeping, alive for one search
#[derive(Debug, Clone, Copy)]
struct SearchRecord {
    g: f64,
    f: f64,
    parent: StateIndex,
    closed: bool,
}

impl SearchRecord {
    fn unseen(index: StateIndex) -> Self {
        Self {
            g: f64::INFINITY,
            f: f64::INFINITY,
            parent: index,
            closed: false,
        }
    }
}

/// Weighted A* planner borrowing a state space
pub struct WeightedAStar<'s, S: StateSpace> {
    space: &'s S,
    heuristic: Heuristic,
    epsilon: f64,
}

impl<'s, S: StateSpace> WeightedAStar<'s, S> {
    /// A* (ε = 1) with the Manhattan heuristic
    pub fn new(space: &'s S) -> Self {
        Self {
            space,
            heuristic: Heuristic::Manhattan,
            epsilon: 1.0,
        }
    }

    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set heuristic type
    pub fn set_heuristic(&mut self, heuristic: Heuristic) {
        self.heuristic = heuristic;
    }

    /// Set heuristic inflation (ε)
    pub fn set_epsilon(&mut self, epsilon: f64) {
        self.epsilon = epsilon;
    }

    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn space(&self) -> &S {
        self.space
    }

    /// Plan from `start` to `goal`.
    ///
    /// An unreachable goal is a normal result. Errors mean the request itself
    /// was malformed: start/goal off the state space or occupied
    /// (`InvalidState`), or a negative/non-finite ε (`InvalidConfig`).
    pub fn search(&self, start: S::State, goal: S::State) -> PlanResult<SearchResult<S::State>> {
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(PlanError::InvalidConfig(format!(
                "epsilon must be finite and >= 0, got {}",
                self.epsilon
            )));
        }
        let start_index = self.checked_index("start", &start)?;
        let goal_index = self.checked_index("goal", &goal)?;

        let mut records: HashMap<StateIndex, SearchRecord> = HashMap::new();
        let mut open = PriorityQueue::new();
        let mut visited = Vec::new();

        let start_f = self.epsilon * self.space.heuristic(&start, &goal, self.heuristic);
        records.insert(
            start_index,
            SearchRecord {
                g: 0.0,
                f: start_f,
                parent: start_index,
                closed: false,
            },
        );
        open.insert(start_index, start_f);

        while let Some(current) = open.pop() {
            visited.push(current);

            if current == goal_index {
                let path = reconstruct_path(&records, start_index, goal_index)
                    .into_iter()
                    .map(|i| self.space.state_of(i))
                    .collect::<PlanResult<Vec<_>>>()?;
                let cost = records.get(&goal_index).map_or(f64::INFINITY, |r| r.g);
                let expansions = visited.len() - 1;

                log::debug!(
                    "search eps={:.3}: found goal, {} expansions, {} path edges, cost {:.3}",
                    self.epsilon,
                    expansions,
                    path.len().saturating_sub(1),
                    cost
                );

                return Ok(SearchResult {
                    status: SearchStatus::Found,
                    path,
                    visited,
                    cost,
                    epsilon: self.epsilon,
                    expansions,
                });
            }

            let g_current = match records.get_mut(&current) {
                Some(record) => {
                    record.closed = true;
                    record.g
                }
                None => continue,
            };

            for (next, edge_cost) in self.space.neighbors(current) {
                let record = records
                    .entry(next)
                    .or_insert_with(|| SearchRecord::unseen(next));
                if record.closed {
                    continue;
                }

                // Ties relax too, so the latest equal-cost parent wins
                let candidate = g_current + edge_cost;
                if candidate <= record.g {
                    let next_state = self.space.state_of(next)?;
                    let h = self.space.heuristic(&next_state, &goal, self.heuristic);
                    record.g = candidate;
                    record.parent = current;
                    record.f = candidate + self.epsilon * h;
                    open.insert(next, record.f);
                }
            }
        }

        log::debug!(
            "search eps={:.3}: goal unreachable after {} expansions",
            self.epsilon,
            visited.len()
        );

        Ok(SearchResult {
            status: SearchStatus::Unreachable,
            path: Vec::new(),
            expansions: visited.len(),
            visited,
            cost: f64::INFINITY,
            epsilon: self.epsilon,
        })
    }

    fn checked_index(&self, role: &str, state: &S::State) -> PlanResult<StateIndex> {
        let index = self.space.index_of(state).map_err(|_| {
            PlanError::InvalidState(format!("{} {:?} is outside the state space", role, state))
        })?;
        if !self.space.is_traversable(state) {
            return Err(PlanError::InvalidState(format!(
                "{} {:?} is on an occupied cell",
                role, state
            )));
        }
        Ok(index)
    }
}

/// Follow parents from goal back to start; returned in start-to-goal order
fn reconstruct_path(
    records: &HashMap<StateIndex, SearchRecord>,
    start: StateIndex,
    goal: StateIndex,
) -> Vec<StateIndex> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        match records.get(&current) {
            Some(record) if record.parent != current => {
                current = record.parent;
                path.push(current);
            }
            _ => break,
        }
    }
    path.reverse();
    path
}

/// Uniform-cost search: weighted A* with ε = 0
pub fn dijkstra<S: StateSpace>(
    space: &S,
    start: S::State,
    goal: S::State,
) -> PlanResult<SearchResult<S::State>> {
    WeightedAStar::new(space).with_epsilon(0.0).search(start, goal)
}

/// Euclidean length of a polyline of grid cells
pub fn path_length(path: &[(i64, i64)]) -> f64 {
    path.windows(2)
        .map(|w| ((w[1].0 - w[0].0) as f64).hypot((w[1].1 - w[0].1) as f64))
        .sum()
}
