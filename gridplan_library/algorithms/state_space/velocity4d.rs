//! Position + velocity state space.
//!
//! Each step the robot may change one velocity component by one (or keep its
//! velocity) and then travels for one time step at the *new* velocity. The
//! whole displacement is collision checked, so a robot at speed 2 cannot hop
//! over a one-cell wall.

use super::{euclidean, line_march_clear, manhattan, StateIndex, StateSpace};
use crate::algorithms::occupancy_grid::OccupancyGrid;
use gridplan_core::error::{PlanError, PlanResult};
use gridplan_core::types::Heuristic;
use serde::{Deserialize, Serialize};

/// Velocity changes tried from every state; the last one keeps the velocity
const VELOCITY_DELTAS: [(i64, i64); 5] = [(0, -1), (0, 1), (-1, 0), (1, 0), (0, 0)];

/// Grid position plus discrete velocity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VelocityState {
    pub x: i64,
    pub y: i64,
    pub vx: i64,
    pub vy: i64,
}

impl VelocityState {
    pub fn new(x: i64, y: i64, vx: i64, vy: i64) -> Self {
        Self { x, y, vx, vy }
    }

    /// State at rest at `(x, y)`
    pub fn at_rest(x: i64, y: i64) -> Self {
        Self::new(x, y, 0, 0)
    }

    pub fn speed(&self) -> f64 {
        (self.vx as f64).hypot(self.vy as f64)
    }
}

/// `(x, y, vx, vy)` state space with `0 <= vx, vy <= max_velocity`
///
/// Encoding: `vy*(rows*cols*V) + vx*(rows*cols) + x*rows + y` with
/// `V = max_velocity + 1`.
#[derive(Debug, Clone)]
pub struct VelocitySpace<'g> {
    grid: &'g OccupancyGrid,
    max_velocity: i64,
    velocities: usize,
    size: usize,
}

impl<'g> VelocitySpace<'g> {
    /// Fails with `EncodingOverflow` if the encoding range does not fit in
    /// `usize`.
    pub fn new(grid: &'g OccupancyGrid, max_velocity: u32) -> PlanResult<Self> {
        let overflow = || {
            PlanError::overflow(
                format!(
                    "{}x{} grid with max velocity {}",
                    grid.cols(),
                    grid.rows(),
                    max_velocity
                ),
                usize::MAX,
            )
        };
        let velocities = usize::try_from(max_velocity)
            .ok()
            .and_then(|v| v.checked_add(1))
            .ok_or_else(overflow)?;
        let size = (grid.cols() * grid.rows())
            .checked_mul(velocities)
            .and_then(|n| n.checked_mul(velocities))
            .ok_or_else(overflow)?;

        Ok(Self {
            grid,
            max_velocity: i64::from(max_velocity),
            velocities,
            size,
        })
    }

    pub fn grid(&self) -> &OccupancyGrid {
        self.grid
    }

    pub fn max_velocity(&self) -> i64 {
        self.max_velocity
    }

    /// Origin at rest
    pub fn default_start(&self) -> VelocityState {
        VelocityState::at_rest(0, 0)
    }

    /// Far corner at rest
    pub fn default_goal(&self) -> VelocityState {
        VelocityState::at_rest(self.grid.cols() as i64 - 1, self.grid.rows() as i64 - 1)
    }

    fn velocity_ok(&self, v: i64) -> bool {
        (0..=self.max_velocity).contains(&v)
    }

    fn encode(&self, s: &VelocityState) -> StateIndex {
        let rows = self.grid.rows();
        let plane = rows * self.grid.cols();
        s.vy as usize * plane * self.velocities
            + s.vx as usize * plane
            + s.x as usize * rows
            + s.y as usize
    }

    fn decode(&self, index: StateIndex) -> VelocityState {
        let rows = self.grid.rows();
        let plane = rows * self.grid.cols();
        let cube = plane * self.velocities;

        let vy = index / cube;
        let rest = index % cube;
        let vx = rest / plane;
        let rest = rest % plane;
        VelocityState::new((rest / rows) as i64, (rest % rows) as i64, vx as i64, vy as i64)
    }
}

impl StateSpace for VelocitySpace<'_> {
    type State = VelocityState;

    fn size(&self) -> usize {
        self.size
    }

    fn index_of(&self, state: &VelocityState) -> PlanResult<StateIndex> {
        if !self.grid.contains(state.x, state.y)
            || !self.velocity_ok(state.vx)
            || !self.velocity_ok(state.vy)
        {
            return Err(PlanError::overflow(
                format!(
                    "state ({}, {}, {}, {}) with max velocity {}",
                    state.x, state.y, state.vx, state.vy, self.max_velocity
                ),
                self.size(),
            ));
        }
        Ok(self.encode(state))
    }

    fn state_of(&self, index: StateIndex) -> PlanResult<VelocityState> {
        if index >= self.size() {
            return Err(PlanError::overflow(format!("index {}", index), self.size()));
        }
        Ok(self.decode(index))
    }

    fn is_traversable(&self, state: &VelocityState) -> bool {
        self.velocity_ok(state.vx)
            && self.velocity_ok(state.vy)
            && self.grid.is_free(state.x, state.y)
    }

    fn neighbors(&self, index: StateIndex) -> Vec<(StateIndex, f64)> {
        if index >= self.size() {
            return Vec::new();
        }
        let s = self.decode(index);

        VELOCITY_DELTAS
            .iter()
            .map(|&(dvx, dvy)| (s.vx + dvx, s.vy + dvy))
            // Out-of-range velocities would not encode; drop them before they do
            .filter(|&(vx, vy)| self.velocity_ok(vx) && self.velocity_ok(vy))
            .filter(|&(vx, vy)| line_march_clear(self.grid, (s.x, s.y), (vx, vy)))
            .map(|(vx, vy)| {
                let next = VelocityState::new(s.x + vx, s.y + vy, vx, vy);
                (self.encode(&next), 1.0)
            })
            .collect()
    }

    fn heuristic(&self, state: &VelocityState, goal: &VelocityState, mode: Heuristic) -> f64 {
        let (a, b) = ((state.x, state.y), (goal.x, goal.y));
        match mode {
            Heuristic::Manhattan => {
                // Time to goal at the current speed; at rest fall back to distance
                let speed = state.speed();
                if speed != 0.0 {
                    manhattan(a, b) / speed
                } else {
                    manhattan(a, b)
                }
            }
            Heuristic::Euclidean => euclidean(a, b),
        }
    }

    fn position(&self, state: &VelocityState) -> (i64, i64) {
        (state.x, state.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::occupancy_grid::GridBuilder;
    use approx::assert_relative_eq;

    fn states(space: &VelocitySpace, neighbors: Vec<(StateIndex, f64)>) -> Vec<VelocityState> {
        neighbors
            .into_iter()
            .map(|(i, _)| space.state_of(i).unwrap())
            .collect()
    }

    #[test]
    fn test_encoding_formula() {
        let grid = OccupancyGrid::empty(4, 3).unwrap();
        let space = VelocitySpace::new(&grid, 2).unwrap();

        assert_eq!(space.size(), 4 * 3 * 9);
        let s = VelocityState::new(2, 1, 1, 2);
        // 2*(3*4*3) + 1*(3*4) + 2*3 + 1
        assert_eq!(space.index_of(&s).unwrap(), 72 + 12 + 6 + 1);
    }

    #[test]
    fn test_index_bijection() {
        let grid = OccupancyGrid::empty(5, 4).unwrap();
        let space = VelocitySpace::new(&grid, 3).unwrap();

        for i in 0..space.size() {
            let s = space.state_of(i).unwrap();
            assert_eq!(space.index_of(&s).unwrap(), i);
            assert!(s.vx >= 0 && s.vx <= 3 && s.vy >= 0 && s.vy <= 3);
        }
    }

    #[test]
    fn test_velocity_overflow() {
        let grid = OccupancyGrid::empty(5, 5).unwrap();
        let space = VelocitySpace::new(&grid, 2).unwrap();

        assert!(matches!(
            space.index_of(&VelocityState::new(0, 0, 3, 0)),
            Err(PlanError::EncodingOverflow { .. })
        ));
        assert!(space.index_of(&VelocityState::new(0, 0, 0, -1)).is_err());
        assert!(space.state_of(space.size()).is_err());
        assert!(!space.is_traversable(&VelocityState::new(1, 1, 0, 5)));
    }

    #[test]
    fn test_neighbors_at_rest() {
        let grid = OccupancyGrid::empty(5, 5).unwrap();
        let space = VelocitySpace::new(&grid, 2).unwrap();

        let origin = space.index_of(&space.default_start()).unwrap();
        let next = states(&space, space.neighbors(origin));

        // Negative velocities are rejected, leaving +vy, +vx and staying put
        assert_eq!(
            next,
            vec![
                VelocityState::new(0, 1, 0, 1),
                VelocityState::new(1, 0, 1, 0),
                VelocityState::new(0, 0, 0, 0),
            ]
        );
        assert!(space.neighbors(origin).iter().all(|&(_, c)| c == 1.0));
    }

    #[test]
    fn test_speed_limit() {
        let grid = OccupancyGrid::empty(10, 10).unwrap();
        let space = VelocitySpace::new(&grid, 2).unwrap();

        let fast = space.index_of(&VelocityState::new(0, 0, 2, 2)).unwrap();
        for s in states(&space, space.neighbors(fast)) {
            assert!(s.vx <= 2 && s.vy <= 2);
        }
        assert_eq!(space.neighbors(fast).len(), 3);
    }

    #[test]
    fn test_no_tunneling() {
        let mut b = GridBuilder::new(5, 2);
        b.set_occupied(1, 0);
        let grid = b.build();
        let space = VelocitySpace::new(&grid, 2).unwrap();

        let moving = space.index_of(&VelocityState::new(0, 0, 1, 0)).unwrap();
        let next = states(&space, space.neighbors(moving));

        // Speeding up to 2 would land on the free (2, 0) but cross the wall
        assert!(!next.contains(&VelocityState::new(2, 0, 2, 0)));
        assert!(!next.contains(&VelocityState::new(1, 0, 1, 0)));
        assert!(next.contains(&VelocityState::new(0, 0, 0, 0)));
        assert!(next.contains(&VelocityState::new(1, 1, 1, 1)));
    }

    #[test]
    fn test_heuristics() {
        let grid = OccupancyGrid::empty(10, 10).unwrap();
        let space = VelocitySpace::new(&grid, 5).unwrap();
        let goal = VelocityState::at_rest(6, 8);

        let moving = VelocityState::new(0, 0, 3, 4);
        assert_relative_eq!(space.heuristic(&moving, &goal, Heuristic::Manhattan), 2.8);
        assert_eq!(space.heuristic(&moving, &goal, Heuristic::Euclidean), 10.0);

        let resting = VelocityState::at_rest(0, 0);
        assert_eq!(space.heuristic(&resting, &goal, Heuristic::Manhattan), 14.0);
    }

    #[test]
    fn test_encoding_range_too_large() {
        let grid = OccupancyGrid::empty(4, 4).unwrap();

        let huge = VelocitySpace::new(&grid, u32::MAX);
        assert!(matches!(huge, Err(PlanError::EncodingOverflow { .. })));

        // Large but representable ranges are fine; records are allocated lazily
        let wide = VelocitySpace::new(&grid, 1 << 20).unwrap();
        assert_eq!(wide.size(), 16 * ((1 << 20) + 1) * ((1 << 20) + 1));
        let corner = VelocityState::new(3, 3, 1 << 20, 1 << 20);
        assert_eq!(wide.index_of(&corner).unwrap(), wide.size() - 1);
    }
}
