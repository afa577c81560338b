//! Ant tour construction and the town-selection rule.
//!
//! An [`Ant`] is a reusable slot: its tour, visited set and weight scratch
//! are allocated once and cleared at the start of every iteration. Each
//! slot owns its generator so ants never share mutable state while they
//! build tours.

use super::config::AcoConfig;
use super::graph::Graph;
use super::pheromone::PheromoneField;
use rand::rngs::StdRng;
use rand::Rng;

/// How the last town was picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    /// Uniform choice by rank among unvisited towns.
    Explored,
    /// Roulette over trail/distance weights.
    Weighted,
    /// The weights degenerated (zero or non-finite sum) and the ant fell
    /// back to a uniform choice.
    Fallback,
}

/// One agent of the colony.
#[derive(Debug, Clone)]
pub struct Ant {
    tour: Vec<usize>,
    visited: Vec<bool>,
    weights: Vec<f64>,
    length: f64,
    rng: StdRng,
}

impl Ant {
    /// Creates an idle ant for a graph of `towns` towns.
    pub fn new(towns: usize, rng: StdRng) -> Self {
        Self {
            tour: Vec::with_capacity(towns),
            visited: vec![false; towns],
            weights: vec![0.0; towns],
            length: f64::INFINITY,
            rng,
        }
    }

    /// Clears the ant and places it on a uniformly random town.
    pub fn start(&mut self) {
        let town = self.rng.random_range(0..self.visited.len());
        self.start_at(town);
    }

    /// Clears the ant and places it on `town`.
    pub fn start_at(&mut self, town: usize) {
        self.tour.clear();
        self.visited.fill(false);
        self.length = f64::INFINITY;
        self.visit(town);
    }

    /// Selects and visits the next town.
    pub fn step(&mut self, graph: &Graph, trails: &PheromoneField, config: &AcoConfig) -> Pick {
        debug_assert!(!self.tour.is_empty(), "ant must be started before stepping");
        debug_assert!(!self.is_complete(), "ant already holds a full tour");
        let (town, pick) = self.select_next_town(graph, trails, config);
        self.visit(town);
        pick
    }

    /// Computes and stores the closed tour length. Call once complete.
    pub fn finish(&mut self, graph: &Graph) -> f64 {
        debug_assert!(self.is_complete(), "tour is incomplete");
        self.length = graph.tour_length(&self.tour);
        self.length
    }

    /// Whether every town has been visited.
    pub fn is_complete(&self) -> bool {
        self.tour.len() == self.visited.len()
    }

    /// Towns in visiting order.
    pub fn tour(&self) -> &[usize] {
        &self.tour
    }

    /// Tour length from the last [`Ant::finish`], `INFINITY` before that.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Whether `town` is already on the tour.
    pub fn visited(&self, town: usize) -> bool {
        self.visited[town]
    }

    fn visit(&mut self, town: usize) {
        debug_assert!(!self.visited[town], "town {town} visited twice");
        self.visited[town] = true;
        self.tour.push(town);
    }

    fn select_next_town(
        &mut self,
        graph: &Graph,
        trails: &PheromoneField,
        config: &AcoConfig,
    ) -> (usize, Pick) {
        let unvisited = self.visited.len() - self.tour.len();

        if self.rng.random::<f64>() < config.exploration_rate {
            let rank = self.rng.random_range(0..unvisited);
            return (self.nth_unvisited(rank), Pick::Explored);
        }

        let current = self.tour[self.tour.len() - 1];
        let denom = transition_weights(
            graph,
            trails,
            &self.visited,
            current,
            config,
            &mut self.weights,
        );
        if !(denom > 0.0 && denom.is_finite()) {
            let rank = self.rng.random_range(0..unvisited);
            return (self.nth_unvisited(rank), Pick::Fallback);
        }

        let r = self.rng.random::<f64>();
        (
            roulette(&self.weights, &self.visited, denom, r),
            Pick::Weighted,
        )
    }

    /// Index of the `rank`-th unvisited town in index order.
    fn nth_unvisited(&self, rank: usize) -> usize {
        self.visited
            .iter()
            .enumerate()
            .filter(|&(_, &v)| !v)
            .nth(rank)
            .map(|(i, _)| i)
            .expect("rank is below the unvisited count")
    }
}

/// Fills `out[j]` with `trail(i,j)^alpha * (1/distance(i,j))^beta` for
/// every unvisited `j` (zero for visited towns) and returns their sum.
///
/// Dividing an entry by the returned sum gives the probability of moving
/// from `current` to that town under the weighted rule.
pub fn transition_weights(
    graph: &Graph,
    trails: &PheromoneField,
    visited: &[bool],
    current: usize,
    config: &AcoConfig,
    out: &mut [f64],
) -> f64 {
    let power = config.power;
    let mut denom = 0.0;
    for (j, slot) in out.iter_mut().enumerate() {
        *slot = if visited[j] {
            0.0
        } else {
            power.pow(trails.strength(current, j), config.alpha)
                * power.pow(1.0 / graph.distance(current, j), config.beta)
        };
        denom += *slot;
    }
    denom
}

/// Roulette-wheel scan over unvisited towns in index order.
///
/// Accumulates `weights[j] / denom` and returns the first unvisited `j`
/// whose running sum reaches `r`. If rounding leaves the sum short of `r`,
/// returns the last unvisited town scanned. At least one town must be
/// unvisited.
pub(crate) fn roulette(weights: &[f64], visited: &[bool], denom: f64, r: f64) -> usize {
    let mut total = 0.0;
    let mut last = None;
    for (j, &w) in weights.iter().enumerate() {
        if visited[j] {
            continue;
        }
        total += w / denom;
        last = Some(j);
        if total >= r {
            return j;
        }
    }
    // rounding left the running sum just short of r
    last.expect("at least one town is unvisited")
}
