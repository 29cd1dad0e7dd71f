//! Discrete state spaces for grid search
//!
//! A state space turns a structured state into a dense index (so the search
//! can keep flat bookkeeping), and back, and answers "where can I go from
//! here and what does it cost".
//!
//! - [`GridSpace`]: position only, `(x, y)`
//! - [`VelocitySpace`]: position plus bounded velocity, `(x, y, vx, vy)`
//!
//! Both consult an [`OccupancyGrid`] through [`line_march_clear`], which walks
//! a straight displacement cell by cell so a fast move cannot tunnel through
//! a wall.

mod grid2d;
mod velocity4d;

pub use grid2d::{GridSpace, GridState};
pub use velocity4d::{VelocitySpace, VelocityState};

use super::occupancy_grid::OccupancyGrid;
use gridplan_core::error::PlanResult;
use gridplan_core::types::Heuristic;
use std::fmt::Debug;

/// Dense index of a state
pub type StateIndex = usize;

/// Capability interface the search engine drives
pub trait StateSpace {
    type State: Copy + Eq + Debug;

    /// Size of the encoding range: every valid index is `< size()`
    fn size(&self) -> usize;

    /// Encode a state. Fails with `EncodingOverflow` outside the range.
    fn index_of(&self, state: &Self::State) -> PlanResult<StateIndex>;

    /// Decode an index. Fails with `EncodingOverflow` outside the range.
    fn state_of(&self, index: StateIndex) -> PlanResult<Self::State>;

    /// Encodable and standing on a free cell
    fn is_traversable(&self, state: &Self::State) -> bool;

    /// Feasible successors of `index` with their edge costs
    fn neighbors(&self, index: StateIndex) -> Vec<(StateIndex, f64)>;

    /// Estimated remaining cost from `state` to `goal`
    fn heuristic(&self, state: &Self::State, goal: &Self::State, mode: Heuristic) -> f64;

    /// Grid cell occupied by a state
    fn position(&self, state: &Self::State) -> (i64, i64);
}

/// Returns true if moving from `start` by `(dx, dy)` in a straight line stays
/// on free cells.
///
/// The move is split into `max(|dx|, |dy|)` unit-ish steps; step `i` lands on
/// `start + floor(d * i / n)`. Integer arithmetic keeps long moves exact.
pub fn line_march_clear(grid: &OccupancyGrid, start: (i64, i64), delta: (i64, i64)) -> bool {
    let (x, y) = start;
    if !grid.is_free(x, y) {
        return false;
    }

    let (dx, dy) = delta;
    if dx == 0 && dy == 0 {
        return true;
    }

    let steps = dx.abs().max(dy.abs());
    (1..=steps).all(|i| {
        let cx = x + (dx * i).div_euclid(steps);
        let cy = y + (dy * i).div_euclid(steps);
        grid.is_free(cx, cy)
    })
}

pub(crate) fn manhattan(a: (i64, i64), b: (i64, i64)) -> f64 {
    ((a.0 - b.0).abs() + (a.1 - b.1).abs()) as f64
}

pub(crate) fn euclidean(a: (i64, i64), b: (i64, i64)) -> f64 {
    ((a.0 - b.0) as f64).hypot((a.1 - b.1) as f64)
}
