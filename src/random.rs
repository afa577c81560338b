//! Seeded random number generation.
//!
//! All randomness in a run flows from one master generator. Each ant slot
//! receives its own generator split off the master, so a seeded run gives
//! the same result whether the construction phase runs sequentially or
//! across threads.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Creates a deterministic generator from a seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Splits `n` independent generators off `rng`.
pub fn split_rng(rng: &mut StdRng, n: usize) -> Vec<StdRng> {
    (0..n).map(|_| create_rng(rng.random())).collect()
}
