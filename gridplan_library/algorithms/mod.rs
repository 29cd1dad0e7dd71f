//! Pure computational search algorithms
//!
//! Everything here is computation only: no I/O, no global state. Grids and
//! state spaces are borrowed immutably, so independent searches may share
//! them across threads.
//!
//! # Available Algorithms
//!
//! ## Environment
//! - **occupancy_grid**: free/occupied field, builder and reference worlds
//! - **state_space**: 2D position and 4D position + velocity spaces
//!
//! ## Search
//! - **priority_queue**: lazy-deletion min-queue used as the open set
//! - **astar**: weighted A* / Dijkstra engine
//! - **anytime**: repeated weighted A* with shrinking inflation

pub mod anytime;
pub mod astar;
pub mod occupancy_grid;
pub mod priority_queue;
pub mod state_space;
