//! Reference obstacle worlds
//!
//! Two walled rooms used throughout the tests and benchmarks. The outer wall
//! is drawn at the grid extent, so its far edges clip and the grid boundary
//! itself plays that role.

use super::{GridBuilder, OccupancyGrid};
use gridplan_core::error::{PlanError, PlanResult};

/// Start/goal pair conventionally used with each world
pub fn default_endpoints(id: u32) -> PlanResult<((i64, i64), (i64, i64))> {
    match id {
        1 => Ok(((10, 10), (70, 50))),
        2 => Ok(((5, 5), (35, 25))),
        _ => Err(unknown(id)),
    }
}

/// Build reference world `id` (1 or 2)
pub fn world(id: u32) -> PlanResult<OccupancyGrid> {
    match id {
        1 => Ok(world_one()),
        2 => Ok(world_two()),
        _ => Err(unknown(id)),
    }
}

fn unknown(id: u32) -> PlanError {
    PlanError::InvalidConfig(format!("unknown world id {} (expected 1 or 2)", id))
}

/// 80x60 room split by walls into six chambers
fn world_one() -> OccupancyGrid {
    let mut b = GridBuilder::new(80, 60);
    b.add_rectangle((0, 0), (80, 60))
        .add_line((20, 0), (20, 15))
        .add_line((20, 40), (20, 60))
        .add_line((0, 30), (30, 30))
        .add_line((40, 30), (40, 60))
        .add_line((50, 0), (50, 20))
        .add_line((50, 30), (80, 30))
        .add_line((50, 30), (50, 40))
        .add_line((60, 50), (60, 60));
    b.build()
}

/// 40x30 room, world one at half scale
fn world_two() -> OccupancyGrid {
    let mut b = GridBuilder::new(40, 30);
    b.add_rectangle((0, 0), (40, 30))
        .add_line((10, 0), (10, 8))
        .add_line((10, 20), (10, 30))
        .add_line((0, 15), (15, 15))
        .add_line((20, 15), (20, 30))
        .add_line((25, 0), (25, 10))
        .add_line((25, 15), (40, 15))
        .add_line((25, 15), (25, 20))
        .add_line((30, 25), (30, 30));
    b.build()
}
