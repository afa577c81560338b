//! Ant Colony Optimization (Ant System) for the Traveling Salesman Problem.
//!
//! A colony of ants repeatedly builds closed tours over a [`Graph`]. Each
//! ant moves from town to town with a probability proportional to
//! `trail^alpha * (1/distance)^beta`, and sometimes explores uniformly at
//! random. After every iteration the shared [`PheromoneField`] decays and
//! each ant reinforces the edges of its tour by `q / length`, so short tours
//! attract later ants.
//!
//! # Key Types
//!
//! - [`Graph`]: Immutable distance matrix with the load-time offset applied
//! - [`PheromoneField`]: Trail strengths shared by the colony
//! - [`Ant`]: Reusable tour buffer and the town-selection rule
//! - [`Colony`]: Fixed ant pool running one iteration at a time
//! - [`AcoConfig`]: Algorithm parameters
//! - [`AcoRunner`]: Executes the iteration loop and tracks the best tour
//! - [`AcoResult`]: Best tour, its length and run statistics
//!
//! # References
//!
//! - Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a
//!   Colony of Cooperating Agents"
//! - Dorigo & Stützle (2004), *Ant Colony Optimization*

mod ant;
mod colony;
mod config;
mod graph;
mod pheromone;
mod power;
mod runner;

pub use ant::{transition_weights, Ant, Pick};
pub use colony::{BestTour, Colony, IterationStats};
pub use config::{AcoConfig, MAX_ANTS};
pub use graph::{Graph, DEFAULT_DISTANCE_OFFSET};
pub use pheromone::PheromoneField;
pub use power::{fast_pow, PowerMode};
pub use runner::{AcoResult, AcoRunner};
