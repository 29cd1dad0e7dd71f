//! Search engine benchmarks
//!
//! Compares Dijkstra, A* and weighted A* on the reference worlds in both
//! state spaces, plus A* on random clutter.
//!
//! Run with: cargo bench --bench search

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::time::Duration;

use gridplan::prelude::*;
use gridplan_benchmarks::{random_grid, reference_scenarios};

/// Inflation factors to compare (0 = Dijkstra)
const EPSILONS: &[f64] = &[0.0, 1.0, 1.5, 3.0];

fn bench_position_space(c: &mut Criterion) {
    let mut group = c.benchmark_group("position_space");
    group.measurement_time(Duration::from_secs(5));

    for scenario in reference_scenarios().unwrap() {
        let space = GridSpace::new(&scenario.grid);
        let start = GridState::from(scenario.start);
        let goal = GridState::from(scenario.goal);

        for &eps in EPSILONS {
            let id = BenchmarkId::new(scenario.name, eps);
            group.bench_with_input(id, &eps, |b, &eps| {
                let planner = WeightedAStar::new(&space).with_epsilon(eps);
                b.iter(|| black_box(planner.search(start, goal).unwrap()));
            });
        }
    }

    group.finish();
}

fn bench_velocity_space(c: &mut Criterion) {
    let mut group = c.benchmark_group("velocity_space");
    group.sample_size(20);

    for scenario in reference_scenarios().unwrap() {
        let space = VelocitySpace::new(&scenario.grid, 2).unwrap();
        let start = VelocityState::at_rest(scenario.start.0, scenario.start.1);
        let goal = VelocityState::at_rest(scenario.goal.0, scenario.goal.1);

        for &eps in &EPSILONS[1..] {
            let id = BenchmarkId::new(scenario.name, eps);
            group.bench_with_input(id, &eps, |b, &eps| {
                let planner = WeightedAStar::new(&space).with_epsilon(eps);
                b.iter(|| black_box(planner.search(start, goal).unwrap()));
            });
        }
    }

    group.finish();
}

fn bench_random_clutter(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_clutter");

    for &side in &[32usize, 64, 128] {
        let grid = random_grid(side, 0.2, 42).unwrap();
        let space = GridSpace::new(&grid).with_connectivity(Connectivity::Eight);
        let goal = GridState::new(side as i64 - 1, side as i64 - 1);

        group.bench_with_input(BenchmarkId::new("astar_8", side), &side, |b, _| {
            let planner = WeightedAStar::new(&space).with_heuristic(Heuristic::Euclidean);
            b.iter(|| black_box(planner.search(GridState::new(0, 0), goal).unwrap()));
        });
    }

    group.finish();
}

fn bench_anytime(c: &mut Criterion) {
    let mut group = c.benchmark_group("anytime");
    group.sample_size(20);

    for scenario in reference_scenarios().unwrap() {
        let space = GridSpace::new(&scenario.grid);
        let start = GridState::from(scenario.start);
        let goal = GridState::from(scenario.goal);

        group.bench_function(scenario.name, |b| {
            let planner = AnytimePlanner::new(&space);
            b.iter(|| black_box(planner.plan_until(start, goal, None).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_position_space,
    bench_velocity_space,
    bench_random_clutter,
    bench_anytime
);
criterion_main!(benches);
