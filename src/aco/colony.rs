//! The ant population and one Ant System iteration.
//!
//! An iteration runs four phases in order:
//!
//! 1. **Setup**: every ant clears its buffers and starts on a random town.
//! 2. **Construction**: `n - 1` lock-step rounds. In each round every ant
//!    picks one more town. No ant starts round `k + 1` before all ants have
//!    finished round `k`.
//! 3. **Update**: evaporate the whole field, then every ant deposits
//!    `q / length` on each edge of its tour.
//! 4. **Best tracking**: any ant strictly shorter than the current best
//!    replaces it.
//!
//! The pheromone field is only read during construction and only written
//! during the update, so construction can fan out across ants safely.

use super::ant::{Ant, Pick};
use super::config::AcoConfig;
use super::graph::Graph;
use super::pheromone::PheromoneField;
use crate::random::split_rng;
use rand::rngs::StdRng;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Best closed tour observed so far.
#[derive(Debug, Clone, PartialEq)]
pub struct BestTour {
    /// Towns in visiting order.
    pub tour: Vec<usize>,
    /// Closed tour length.
    pub length: f64,
}

/// Per-iteration counters.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IterationStats {
    /// Shortest tour built in this iteration.
    pub iteration_best: f64,
    /// Whether the run's best tour improved.
    pub improved: bool,
    /// Selections that fell back to uniform choice because the weights
    /// degenerated.
    pub fallbacks: usize,
}

/// Fixed pool of ants plus the shared pheromone field.
#[derive(Debug, Clone)]
pub struct Colony {
    ants: Vec<Ant>,
    trails: PheromoneField,
}

impl Colony {
    /// Creates a colony sized for `graph`, with the field set to
    /// `config.pheromone_init`. Ant generators are split off `rng`.
    pub fn new(graph: &Graph, config: &AcoConfig, rng: &mut StdRng) -> Self {
        let towns = graph.size();
        let ants = split_rng(rng, config.ant_count(towns))
            .into_iter()
            .map(|r| Ant::new(towns, r))
            .collect();
        Self {
            ants,
            trails: PheromoneField::new(towns, config.pheromone_init),
        }
    }

    /// Sets every trail back to `c`.
    pub fn reset(&mut self, c: f64) {
        self.trails.reset(c);
    }

    /// Runs one full iteration and folds its ants into `best`.
    pub fn iterate(
        &mut self,
        graph: &Graph,
        config: &AcoConfig,
        best: &mut Option<BestTour>,
    ) -> IterationStats {
        self.setup();
        let fallbacks = self.construct(graph, config);
        let iteration_best = self.evaluate(graph);
        self.update_trails(config);
        let improved = self.update_best(best);
        IterationStats {
            iteration_best,
            improved,
            fallbacks,
        }
    }

    fn setup(&mut self) {
        for ant in &mut self.ants {
            ant.start();
        }
    }

    fn construct(&mut self, graph: &Graph, config: &AcoConfig) -> usize {
        let mut fallbacks = 0;
        for step in 1..graph.size() {
            fallbacks += self.construct_step(graph, config);
            debug_assert!(self.ants.iter().all(|a| a.tour().len() == step + 1));
        }
        fallbacks
    }

    /// Advances every ant by one town. Returns the number of fallbacks.
    fn construct_step(&mut self, graph: &Graph, config: &AcoConfig) -> usize {
        let trails = &self.trails;

        #[cfg(feature = "parallel")]
        {
            if config.parallel {
                return self
                    .ants
                    .par_iter_mut()
                    .map(|ant| usize::from(ant.step(graph, trails, config) == Pick::Fallback))
                    .sum();
            }
        }

        self.ants
            .iter_mut()
            .map(|ant| usize::from(ant.step(graph, trails, config) == Pick::Fallback))
            .sum()
    }

    /// Computes every tour length once. Returns the shortest.
    fn evaluate(&mut self, graph: &Graph) -> f64 {
        self.ants
            .iter_mut()
            .map(|ant| ant.finish(graph))
            .fold(f64::INFINITY, f64::min)
    }

    fn update_trails(&mut self, config: &AcoConfig) {
        self.trails.evaporate(config.evaporation);
        for ant in &self.ants {
            self.trails.reinforce(ant.tour(), config.q / ant.length());
        }
    }

    fn update_best(&self, best: &mut Option<BestTour>) -> bool {
        let mut improved = false;
        for ant in &self.ants {
            match best {
                Some(b) if ant.length() >= b.length => {}
                Some(b) => {
                    b.tour.clear();
                    b.tour.extend_from_slice(ant.tour());
                    b.length = ant.length();
                    improved = true;
                }
                None => {
                    *best = Some(BestTour {
                        tour: ant.tour().to_vec(),
                        length: ant.length(),
                    });
                    improved = true;
                }
            }
        }
        improved
    }

    /// The ant pool.
    pub fn ants(&self) -> &[Ant] {
        &self.ants
    }

    /// The shared pheromone field.
    pub fn trails(&self) -> &PheromoneField {
        &self.trails
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn ring_graph(n: usize) -> Graph {
        // cheap edges between neighbours on a ring, expensive elsewhere
        let rows = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| {
                        let d = (i as isize - j as isize).unsigned_abs();
                        if d == 1 || d == n - 1 {
                            1.0
                        } else {
                            20.0
                        }
                    })
                    .collect()
            })
            .collect();
        Graph::from_matrix(rows, 1.0).unwrap()
    }

    #[test]
    fn test_colony_size_follows_factor() {
        let graph = ring_graph(10);
        let config = AcoConfig::default();
        let colony = Colony::new(&graph, &config, &mut create_rng(1));
        assert_eq!(colony.ants().len(), 8);
        assert_eq!(colony.trails().size(), 10);
    }

    #[test]
    fn test_iteration_builds_permutations() {
        let graph = ring_graph(7);
        let config = AcoConfig::default();
        let mut colony = Colony::new(&graph, &config, &mut create_rng(2));
        let mut best = None;
        for _ in 0..5 {
            colony.iterate(&graph, &config, &mut best);
            for ant in colony.ants() {
                let mut towns = ant.tour().to_vec();
                towns.sort_unstable();
                assert_eq!(towns, (0..7).collect::<Vec<_>>());
                assert_eq!(ant.length(), graph.tour_length(ant.tour()));
            }
        }
    }

    #[test]
    fn test_update_matches_evaporation_plus_deposits() {
        let graph = ring_graph(5);
        let config = AcoConfig::default().with_evaporation(0.3).with_q(10.0);
        let mut colony = Colony::new(&graph, &config, &mut create_rng(3));
        let mut best = None;
        colony.iterate(&graph, &config, &mut best);

        let mut expected = PheromoneField::new(5, config.pheromone_init);
        expected.evaporate(0.3);
        for ant in colony.ants() {
            expected.reinforce(ant.tour(), 10.0 / graph.tour_length(ant.tour()));
        }
        for (a, b) in colony.trails().values().iter().zip(expected.values()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_trails_accumulate_across_iterations() {
        let graph = ring_graph(4);
        let config = AcoConfig::default().with_evaporation(0.0);
        let mut colony = Colony::new(&graph, &config, &mut create_rng(4));
        let mut best = None;
        colony.iterate(&graph, &config, &mut best);
        let after_one: f64 = colony.trails().values().iter().sum();
        colony.iterate(&graph, &config, &mut best);
        let after_two: f64 = colony.trails().values().iter().sum();
        assert!(after_two > after_one);

        colony.reset(1.0);
        assert!(colony.trails().values().iter().all(|&t| t == 1.0));
    }

    #[test]
    fn test_best_is_minimum_of_ants() {
        let graph = ring_graph(6);
        let config = AcoConfig::default();
        let mut colony = Colony::new(&graph, &config, &mut create_rng(5));
        let mut best = None;
        let stats = colony.iterate(&graph, &config, &mut best);
        let best = best.expect("best set after first iteration");
        let min = colony
            .ants()
            .iter()
            .map(Ant::length)
            .fold(f64::INFINITY, f64::min);
        assert_eq!(best.length, min);
        assert_eq!(stats.iteration_best, min);
        assert!(stats.improved);
        assert_eq!(graph.tour_length(&best.tour), best.length);
    }

    #[test]
    fn test_best_only_replaced_when_strictly_lower() {
        let graph = ring_graph(5);
        let config = AcoConfig::default();
        let mut colony = Colony::new(&graph, &config, &mut create_rng(6));
        let mut best = Some(BestTour {
            tour: vec![0, 1, 2, 3, 4],
            length: 0.5,
        });
        let stats = colony.iterate(&graph, &config, &mut best);
        assert!(!stats.improved);
        assert_eq!(best.unwrap().tour, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_ring_is_found() {
        let graph = ring_graph(8);
        let config = AcoConfig::default();
        let mut colony = Colony::new(&graph, &config, &mut create_rng(7));
        let mut best = None;
        for _ in 0..100 {
            colony.iterate(&graph, &config, &mut best);
        }
        // eight cheap edges of 2.0 each
        assert_eq!(best.unwrap().length, 16.0);
    }
}
