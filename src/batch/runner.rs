//! Batch execution and reduction.

use crate::aco::{AcoConfig, AcoResult, AcoRunner, Graph};
use crate::error::{AcoError, Result};
use std::time::{Duration, Instant};
use tracing::info;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for a batch of independent runs.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BatchConfig {
    /// Number of solver instances. Must be at least 1.
    pub instances: usize,

    /// Whether to run instances on the rayon pool.
    ///
    /// Only has an effect with the `parallel` feature.
    pub parallel: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            instances: 4,
            parallel: true,
        }
    }
}

impl BatchConfig {
    pub fn with_instances(mut self, n: usize) -> Self {
        self.instances = n;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.instances == 0 {
            return Err(AcoError::InvalidConfig(
                "batch needs at least one instance".into(),
            ));
        }
        Ok(())
    }
}

/// Outcome of a batch.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BatchResult {
    /// Every instance's result, in instance order.
    pub runs: Vec<AcoResult>,

    /// Index into `runs` of the shortest tour.
    pub best: usize,

    /// Wall-clock time for the whole batch.
    pub elapsed: Duration,
}

impl BatchResult {
    /// The winning run.
    pub fn best(&self) -> &AcoResult {
        &self.runs[self.best]
    }
}

/// Index of the shortest result. The earliest wins ties.
///
/// Returns `None` for an empty slice.
pub fn reduce_best(results: &[AcoResult]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, r) in results.iter().enumerate() {
        match best {
            Some(b) if r.best_length >= results[b].best_length => {}
            _ => best = Some(i),
        }
    }
    best
}

/// Executes independent ACO instances and reduces them to the best tour.
pub struct BatchRunner;

impl BatchRunner {
    /// Runs `batch.instances` solvers on `graph`.
    ///
    /// With a seeded `config`, instance `k` uses seed `seed + k` so the
    /// whole batch is reproducible.
    pub fn run(graph: &Graph, config: &AcoConfig, batch: &BatchConfig) -> Result<BatchResult> {
        batch.validate()?;
        config.validate_for(graph.size())?;

        let started = Instant::now();
        let configs: Vec<AcoConfig> = (0..batch.instances)
            .map(|k| {
                let mut c = config.clone();
                c.seed = config.seed.map(|s| s.wrapping_add(k as u64));
                c
            })
            .collect();

        let runs = run_all(graph, &configs, batch.parallel)?;
        let best = reduce_best(&runs).expect("batch has at least one run");
        let elapsed = started.elapsed();

        info!(
            instances = runs.len(),
            best_instance = best,
            best_length = runs[best].best_length,
            elapsed_ms = elapsed.as_millis() as u64,
            "batch finished"
        );

        Ok(BatchResult {
            runs,
            best,
            elapsed,
        })
    }
}

fn run_one(graph: &Graph, k: usize, config: &AcoConfig) -> Result<AcoResult> {
    let result = AcoRunner::run(graph, config)?;
    info!(instance = k, best_length = result.best_length, "instance finished");
    Ok(result)
}

#[allow(unused_variables)]
fn run_all(graph: &Graph, configs: &[AcoConfig], parallel: bool) -> Result<Vec<AcoResult>> {
    #[cfg(feature = "parallel")]
    {
        if parallel {
            return configs
                .par_iter()
                .enumerate()
                .map(|(k, c)| run_one(graph, k, c))
                .collect();
        }
    }

    configs
        .iter()
        .enumerate()
        .map(|(k, c)| run_one(graph, k, c))
        .collect()
}
