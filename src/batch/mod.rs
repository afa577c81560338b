//! Independent multi-start runs.
//!
//! Runs several ACO solvers over the same graph and keeps the shortest
//! tour. Each instance starts from a cold pheromone field. Nothing is
//! shared between instances, so they can run on separate threads.

mod runner;

pub use runner::{reduce_best, BatchConfig, BatchResult, BatchRunner};
