//! Shared fixtures for the gridplan benchmarks
//!
//! Run with: cargo bench -p gridplan_benchmarks

use gridplan::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A reference world with its conventional endpoints
pub struct Scenario {
    pub name: &'static str,
    pub grid: OccupancyGrid,
    pub start: (i64, i64),
    pub goal: (i64, i64),
}

/// Both reference worlds
pub fn reference_scenarios() -> Result<Vec<Scenario>> {
    [(1, "world1"), (2, "world2")]
        .into_iter()
        .map(|(id, name)| -> Result<Scenario> {
            let (start, goal) = worlds::default_endpoints(id)?;
            Ok(Scenario {
                name,
                grid: worlds::world(id)?,
                start,
                goal,
            })
        })
        .collect()
}

/// Square grid with roughly `density` of its cells blocked. The corners are
/// always left free.
pub fn random_grid(side: usize, density: f64, seed: u64) -> Result<OccupancyGrid> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut builder = GridBuilder::new(side, side);
    for x in 0..side as i64 {
        for y in 0..side as i64 {
            if rng.gen_bool(density) {
                builder.set_occupied(x, y);
            }
        }
    }
    let far = side as i64 - 1;
    builder.set_free(0, 0).set_free(far, far);
    builder.try_build()
}
