//! ACO configuration.
//!
//! [`AcoConfig`] holds every parameter of an Ant System run.

use super::power::PowerMode;
use crate::error::{AcoError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest colony a run will allocate.
pub const MAX_ANTS: usize = 1 << 20;

/// Configuration for the Ant Colony Optimization solver.
///
/// # Defaults
///
/// ```
/// use u_antsp::aco::AcoConfig;
///
/// let config = AcoConfig::default();
/// assert_eq!(config.iterations, 2000);
/// assert_eq!(config.ant_count(10), 8);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_antsp::aco::{AcoConfig, PowerMode};
///
/// let config = AcoConfig::default()
///     .with_iterations(500)
///     .with_beta(3.0)
///     .with_power(PowerMode::FastApprox)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AcoConfig {
    /// Number of colony iterations. Must be at least 1.
    pub iterations: usize,

    /// Exponent applied to trail strength.
    pub alpha: f64,

    /// Exponent applied to inverse distance.
    pub beta: f64,

    /// Fraction of every trail removed per iteration, in `[0, 1)`.
    pub evaporation: f64,

    /// Deposit scale: an ant adds `q / tour_length` to each of its edges.
    pub q: f64,

    /// Trail strength every edge starts the run with.
    pub pheromone_init: f64,

    /// Probability of picking the next town uniformly at random instead
    /// of by trail/distance weight, in `[0, 1]`.
    ///
    /// `1.0` turns the colony into pure random search.
    pub exploration_rate: f64,

    /// Ants per town. The colony has `round(towns * factor)` ants, at
    /// least one.
    pub ant_count_factor: f64,

    /// Random seed for reproducibility. `None` draws a fresh seed.
    pub seed: Option<u64>,

    /// Power evaluation used for selection weights.
    pub power: PowerMode,

    /// Whether to run each construction step across ants in parallel.
    ///
    /// Only has an effect with the `parallel` feature. Seeded results are
    /// identical either way.
    pub parallel: bool,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            iterations: 2000,
            alpha: 1.0,
            beta: 5.0,
            evaporation: 0.5,
            q: 500.0,
            pheromone_init: 1.0,
            exploration_rate: 0.01,
            ant_count_factor: 0.8,
            seed: None,
            power: PowerMode::Exact,
            parallel: false,
        }
    }
}

impl AcoConfig {
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    pub fn with_evaporation(mut self, rho: f64) -> Self {
        self.evaporation = rho;
        self
    }

    pub fn with_q(mut self, q: f64) -> Self {
        self.q = q;
        self
    }

    pub fn with_pheromone_init(mut self, c: f64) -> Self {
        self.pheromone_init = c;
        self
    }

    pub fn with_exploration_rate(mut self, pr: f64) -> Self {
        self.exploration_rate = pr;
        self
    }

    pub fn with_ant_count_factor(mut self, factor: f64) -> Self {
        self.ant_count_factor = factor;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_power(mut self, power: PowerMode) -> Self {
        self.power = power;
        self
    }

    /// Enables or disables parallel construction.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Number of ants for a graph with `towns` towns.
    pub fn ant_count(&self, towns: usize) -> usize {
        ((towns as f64 * self.ant_count_factor).round() as usize).max(1)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| -> Result<()> { Err(AcoError::InvalidConfig(msg)) };

        if self.iterations == 0 {
            return invalid("iterations must be at least 1".into());
        }
        for (name, value) in [
            ("alpha", self.alpha),
            ("beta", self.beta),
            ("evaporation", self.evaporation),
            ("q", self.q),
            ("pheromone_init", self.pheromone_init),
            ("exploration_rate", self.exploration_rate),
            ("ant_count_factor", self.ant_count_factor),
        ] {
            if !value.is_finite() {
                return invalid(format!("{name} must be finite, got {value}"));
            }
        }
        if !(0.0..1.0).contains(&self.evaporation) {
            return invalid(format!(
                "evaporation must be in [0, 1), got {}",
                self.evaporation
            ));
        }
        if !(0.0..=1.0).contains(&self.exploration_rate) {
            return invalid(format!(
                "exploration_rate must be in [0, 1], got {}",
                self.exploration_rate
            ));
        }
        if self.q <= 0.0 {
            return invalid(format!("q must be positive, got {}", self.q));
        }
        if self.pheromone_init < 0.0 {
            return invalid(format!(
                "pheromone_init must be non-negative, got {}",
                self.pheromone_init
            ));
        }
        if self.ant_count_factor <= 0.0 {
            return invalid(format!(
                "ant_count_factor must be positive, got {}",
                self.ant_count_factor
            ));
        }
        Ok(())
    }

    /// Validates the configuration against a graph with `towns` towns.
    ///
    /// Runs [`validate`](Self::validate), then rejects a colony larger
    /// than [`MAX_ANTS`].
    pub fn validate_for(&self, towns: usize) -> Result<()> {
        self.validate()?;
        let ants = (towns as f64 * self.ant_count_factor).round();
        if ants > MAX_ANTS as f64 {
            return Err(AcoError::InvalidConfig(format!(
                "ant_count_factor {} gives {ants} ants for {towns} towns, at most {MAX_ANTS} allowed",
                self.ant_count_factor
            )));
        }
        Ok(())
    }
}
