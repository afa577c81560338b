//! Ant Colony Optimization for the Traveling Salesman Problem.
//!
//! - **ACO**: the Ant System solver. A colony of ants builds closed tours
//!   guided by a shared pheromone field that short tours reinforce and
//!   every iteration decays. One run takes a square distance matrix and a
//!   configuration and returns one best tour with its length.
//! - **Batch**: runs several independent solvers over the same graph and
//!   reduces them to the shortest tour.
//!
//! # Example
//!
//! ```
//! use u_antsp::aco::{AcoConfig, AcoRunner, Graph, DEFAULT_DISTANCE_OFFSET};
//!
//! let graph = Graph::parse(
//!     "0 2 9 10\n1 0 6 4\n15 7 0 8\n6 3 12 0\n",
//!     DEFAULT_DISTANCE_OFFSET,
//! )?;
//! let config = AcoConfig::default().with_iterations(100).with_seed(1);
//! let result = AcoRunner::run(&graph, &config)?;
//! assert_eq!(result.best_tour.len(), 4);
//! # Ok::<(), u_antsp::AcoError>(())
//! ```

pub mod aco;
pub mod batch;
mod error;
pub mod random;

pub use error::{AcoError, Result};
