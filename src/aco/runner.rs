//! ACO execution loop.

use super::colony::{BestTour, Colony};
use super::config::AcoConfig;
use super::graph::Graph;
use crate::error::Result;
use crate::random::create_rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result of an ACO run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AcoResult {
    /// The shortest closed tour found, as town indices in visiting order.
    ///
    /// Empty only when the run was cancelled before its first iteration.
    pub best_tour: Vec<usize>,

    /// Length of `best_tour`, including the closing edge. `INFINITY` when
    /// no iteration ran.
    pub best_length: f64,

    /// Number of iterations executed.
    pub iterations: usize,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Best length after each iteration. Non-increasing.
    pub length_history: Vec<f64>,
}

/// Executes the Ant System on a distance matrix.
///
/// # Usage
///
/// ```
/// use u_antsp::aco::{AcoConfig, AcoRunner, Graph};
///
/// let graph = Graph::parse("0 3 4\n3 0 5\n4 5 0\n", 1.0).unwrap();
/// let config = AcoConfig::default().with_iterations(20).with_seed(42);
/// let result = AcoRunner::run(&graph, &config).unwrap();
/// assert_eq!(result.best_tour.len(), 3);
/// assert_eq!(result.best_length, 15.0);
/// ```
pub struct AcoRunner;

impl AcoRunner {
    /// Runs the solver for `config.iterations` iterations.
    ///
    /// # Errors
    ///
    /// Returns [`AcoError::InvalidConfig`](crate::AcoError::InvalidConfig)
    /// before any iteration runs if the configuration is invalid or would
    /// build a colony larger than [`MAX_ANTS`](super::MAX_ANTS).
    pub fn run(graph: &Graph, config: &AcoConfig) -> Result<AcoResult> {
        Self::run_with_cancel(graph, config, None)
    }

    /// Runs the solver with an optional cancellation token.
    ///
    /// The flag is checked before every iteration. A cancelled run returns
    /// the best tour found so far.
    pub fn run_with_cancel(
        graph: &Graph,
        config: &AcoConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<AcoResult> {
        config.validate_for(graph.size())?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = create_rng(seed);
        let mut colony = Colony::new(graph, config, &mut rng);
        colony.reset(config.pheromone_init);

        info!(
            towns = graph.size(),
            ants = colony.ants().len(),
            iterations = config.iterations,
            seed,
            "starting ant colony run"
        );

        let mut best: Option<BestTour> = None;
        let mut length_history = Vec::with_capacity(config.iterations);
        let mut cancelled = false;

        for iteration in 0..config.iterations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            let stats = colony.iterate(graph, config, &mut best);
            let best_length = best.as_ref().map_or(f64::INFINITY, |b| b.length);
            length_history.push(best_length);

            if stats.fallbacks > 0 {
                warn!(
                    iteration,
                    fallbacks = stats.fallbacks,
                    "selection weights degenerated, fell back to uniform choice"
                );
            }
            if stats.improved {
                debug!(iteration, best_length, "new best tour");
            }
            trace!(
                iteration,
                iteration_best = stats.iteration_best,
                best_length,
                "iteration done"
            );
        }

        let (best_tour, best_length) = best.map_or((Vec::new(), f64::INFINITY), |b| {
            (b.tour, b.length)
        });
        info!(
            best_length,
            iterations = length_history.len(),
            cancelled,
            "ant colony run finished"
        );

        Ok(AcoResult {
            best_tour,
            best_length,
            iterations: length_history.len(),
            cancelled,
            length_history,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aco::PowerMode;
    use crate::error::AcoError;

    fn sample_graph() -> Graph {
        Graph::parse(
            "0 2 9 10\n\
             1 0 6 4\n\
             15 7 0 8\n\
             6 3 12 0\n",
            1.0,
        )
        .unwrap()
    }

    fn brute_force(graph: &Graph) -> f64 {
        fn permute(rest: &mut Vec<usize>, tour: &mut Vec<usize>, graph: &Graph, best: &mut f64) {
            if rest.is_empty() {
                *best = best.min(graph.tour_length(tour));
                return;
            }
            for k in 0..rest.len() {
                let t = rest.remove(k);
                tour.push(t);
                permute(rest, tour, graph, best);
                tour.pop();
                rest.insert(k, t);
            }
        }
        let mut best = f64::INFINITY;
        let mut rest: Vec<usize> = (1..graph.size()).collect();
        permute(&mut rest, &mut vec![0], graph, &mut best);
        best
    }

    #[test]
    fn test_two_towns_trivial_tour() {
        let graph = Graph::parse("0 4\n7 0\n", 1.0).unwrap();
        for seed in 0..10 {
            let config = AcoConfig::default().with_iterations(5).with_seed(seed);
            let result = AcoRunner::run(&graph, &config).unwrap();
            assert!(result.best_tour == vec![0, 1] || result.best_tour == vec![1, 0]);
            assert_eq!(result.best_length, 5.0 + 8.0);
        }
        let unseeded = AcoRunner::run(&graph, &AcoConfig::default().with_iterations(3)).unwrap();
        assert_eq!(unseeded.best_length, 13.0);
    }

    #[test]
    fn test_finds_optimum_on_small_graph() {
        let graph = sample_graph();
        let config = AcoConfig::default().with_iterations(50).with_seed(42);
        let result = AcoRunner::run(&graph, &config).unwrap();
        assert_eq!(result.best_length, brute_force(&graph));
        assert_eq!(graph.tour_length(&result.best_tour), result.best_length);
        assert_eq!(result.iterations, 50);
        assert!(!result.cancelled);
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let graph = sample_graph();
        let config = AcoConfig::default().with_iterations(30).with_seed(7);
        let a = AcoRunner::run(&graph, &config).unwrap();
        let b = AcoRunner::run(&graph, &config).unwrap();
        assert_eq!(a, b);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let rows: Vec<Vec<f64>> = (0..12)
            .map(|i: i32| (0..12).map(|j: i32| ((i - j).abs() * 7 % 11) as f64).collect())
            .collect();
        let graph = Graph::from_matrix(rows, 1.0).unwrap();
        let config = AcoConfig::default().with_iterations(40).with_seed(3);
        let seq = AcoRunner::run(&graph, &config).unwrap();
        let par = AcoRunner::run(&graph, &config.clone().with_parallel(true)).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn test_history_non_increasing() {
        let rows: Vec<Vec<f64>> = (0..9)
            .map(|i: i32| (0..9).map(|j: i32| ((i * 13 + j * 7) % 17) as f64).collect())
            .collect();
        let graph = Graph::from_matrix(rows, 1.0).unwrap();
        let config = AcoConfig::default().with_iterations(60).with_seed(11);
        let result = AcoRunner::run(&graph, &config).unwrap();
        assert_eq!(result.length_history.len(), 60);
        for w in result.length_history.windows(2) {
            assert!(w[1] <= w[0], "best length increased: {} -> {}", w[0], w[1]);
        }
        assert_eq!(result.length_history.last(), Some(&result.best_length));
    }

    #[test]
    fn test_invalid_config_fails_before_running() {
        let graph = sample_graph();
        let err = AcoRunner::run(&graph, &AcoConfig::default().with_evaporation(1.5)).unwrap_err();
        assert!(matches!(err, AcoError::InvalidConfig(_)));
    }

    #[test]
    fn test_oversized_colony_is_config_error() {
        let graph = Graph::parse("0 4\n7 0\n", 1.0).unwrap();
        let config = AcoConfig::default()
            .with_iterations(1)
            .with_ant_count_factor(1e30);
        let err = AcoRunner::run(&graph, &config).unwrap_err();
        assert!(matches!(err, AcoError::InvalidConfig(_)));
    }

    #[test]
    fn test_cancellation() {
        let graph = sample_graph();
        let config = AcoConfig::default().with_seed(1);
        let cancel = Arc::new(AtomicBool::new(true));
        let result = AcoRunner::run_with_cancel(&graph, &config, Some(cancel)).unwrap();
        assert!(result.cancelled);
        assert_eq!(result.iterations, 0);
        assert!(result.best_tour.is_empty());
        assert_eq!(result.best_length, f64::INFINITY);
    }

    #[test]
    fn test_fast_power_mode_still_builds_valid_tours() {
        let graph = sample_graph();
        let config = AcoConfig::default()
            .with_iterations(30)
            .with_power(PowerMode::FastApprox)
            .with_seed(5);
        let result = AcoRunner::run(&graph, &config).unwrap();
        let mut towns = result.best_tour.clone();
        towns.sort_unstable();
        assert_eq!(towns, vec![0, 1, 2, 3]);
        assert_eq!(graph.tour_length(&result.best_tour), result.best_length);
    }

    #[test]
    fn test_random_search_mode() {
        let graph = sample_graph();
        let config = AcoConfig::default()
            .with_iterations(40)
            .with_exploration_rate(1.0)
            .with_seed(2);
        let result = AcoRunner::run(&graph, &config).unwrap();
        assert!(result.best_length.is_finite());
        assert_eq!(result.best_tour.len(), 4);
    }
}
