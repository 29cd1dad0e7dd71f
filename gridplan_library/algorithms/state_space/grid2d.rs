//! Positional state space: one state per grid cell.

use super::{euclidean, line_march_clear, manhattan, StateIndex, StateSpace};
use crate::algorithms::occupancy_grid::OccupancyGrid;
use gridplan_core::error::{PlanError, PlanResult};
use gridplan_core::types::{Connectivity, EdgeCost, Heuristic};
use serde::{Deserialize, Serialize};

const FOUR_CONNECTED: [(i64, i64); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

const EIGHT_CONNECTED: [(i64, i64); 8] = [
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
];

/// Grid position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridState {
    pub x: i64,
    pub y: i64,
}

impl GridState {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl From<(i64, i64)> for GridState {
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}

/// `(x, y)` state space over an occupancy grid
///
/// Encoding is column-major: `index = x * rows + y`.
#[derive(Debug, Clone)]
pub struct GridSpace<'g> {
    grid: &'g OccupancyGrid,
    connectivity: Connectivity,
    edge_cost: EdgeCost,
}

impl<'g> GridSpace<'g> {
    /// 4-connected space with unit edge costs
    pub fn new(grid: &'g OccupancyGrid) -> Self {
        Self {
            grid,
            connectivity: Connectivity::Four,
            edge_cost: EdgeCost::Unit,
        }
    }

    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }

    pub fn with_edge_cost(mut self, edge_cost: EdgeCost) -> Self {
        self.edge_cost = edge_cost;
        self
    }

    pub fn grid(&self) -> &OccupancyGrid {
        self.grid
    }

    /// Origin, the conventional start
    pub fn default_start(&self) -> GridState {
        GridState::new(0, 0)
    }

    /// Far corner, the conventional goal
    pub fn default_goal(&self) -> GridState {
        GridState::new(self.grid.cols() as i64 - 1, self.grid.rows() as i64 - 1)
    }

    fn encode(&self, state: &GridState) -> StateIndex {
        state.x as usize * self.grid.rows() + state.y as usize
    }

    fn decode(&self, index: StateIndex) -> GridState {
        let rows = self.grid.rows();
        GridState::new((index / rows) as i64, (index % rows) as i64)
    }

    fn move_cost(&self, delta: (i64, i64)) -> f64 {
        match self.edge_cost {
            EdgeCost::Unit => 1.0,
            EdgeCost::Euclidean => (delta.0 as f64).hypot(delta.1 as f64),
        }
    }

    /// A diagonal move may not squeeze between two cells that touch its corner
    fn cuts_corner(&self, from: GridState, delta: (i64, i64)) -> bool {
        delta.0 != 0
            && delta.1 != 0
            && (self.grid.is_occupied(from.x + delta.0, from.y)
                || self.grid.is_occupied(from.x, from.y + delta.1))
    }
}

impl StateSpace for GridSpace<'_> {
    type State = GridState;

    fn size(&self) -> usize {
        self.grid.cols() * self.grid.rows()
    }

    fn index_of(&self, state: &GridState) -> PlanResult<StateIndex> {
        if !self.grid.contains(state.x, state.y) {
            return Err(PlanError::overflow(
                format!("state ({}, {})", state.x, state.y),
                self.size(),
            ));
        }
        Ok(self.encode(state))
    }

    fn state_of(&self, index: StateIndex) -> PlanResult<GridState> {
        if index >= self.size() {
            return Err(PlanError::overflow(format!("index {}", index), self.size()));
        }
        Ok(self.decode(index))
    }

    fn is_traversable(&self, state: &GridState) -> bool {
        self.grid.is_free(state.x, state.y)
    }

    fn neighbors(&self, index: StateIndex) -> Vec<(StateIndex, f64)> {
        if index >= self.size() {
            return Vec::new();
        }
        let state = self.decode(index);
        let deltas: &[(i64, i64)] = match self.connectivity {
            Connectivity::Four => &FOUR_CONNECTED,
            Connectivity::Eight => &EIGHT_CONNECTED,
        };

        deltas
            .iter()
            .filter(|&&delta| line_march_clear(self.grid, (state.x, state.y), delta))
            .filter(|&&delta| !self.cuts_corner(state, delta))
            .map(|&delta| {
                let next = GridState::new(state.x + delta.0, state.y + delta.1);
                (self.encode(&next), self.move_cost(delta))
            })
            .collect()
    }

    fn heuristic(&self, state: &GridState, goal: &GridState, mode: Heuristic) -> f64 {
        let (a, b) = ((state.x, state.y), (goal.x, goal.y));
        match mode {
            Heuristic::Manhattan => manhattan(a, b),
            Heuristic::Euclidean => euclidean(a, b),
        }
    }

    fn position(&self, state: &GridState) -> (i64, i64) {
        (state.x, state.y)
    }
}
