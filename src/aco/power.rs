//! Power evaluation used by the selection rule.
//!
//! The selection weight of an edge is `trail^alpha * (1/distance)^beta`.
//! [`PowerMode::Exact`] uses `f64::powf`. [`PowerMode::FastApprox`] uses a
//! bit-level approximation that manipulates the high word of the IEEE-754
//! representation. It is faster but its error shifts selection
//! probabilities, so seeded runs differ between the two modes.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How `x^y` is evaluated when computing selection weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PowerMode {
    /// `f64::powf`.
    #[default]
    Exact,

    /// High-word bit approximation (Schraudolph-style).
    ///
    /// Relative error is typically a few percent and grows with the
    /// exponent. Exact when `exponent == 1.0` and the base has a zero low
    /// word (e.g. powers of two).
    FastApprox,
}

impl PowerMode {
    /// Computes `base^exponent` in this mode.
    #[inline]
    pub fn pow(self, base: f64, exponent: f64) -> f64 {
        match self {
            PowerMode::Exact => base.powf(exponent),
            PowerMode::FastApprox => fast_pow(base, exponent),
        }
    }
}

/// Approximates `a^b` for non-negative `a`.
///
/// Returns `0.0` for `a <= 0.0`; the bit trick goes negative there.
#[inline]
pub fn fast_pow(a: f64, b: f64) -> f64 {
    if a <= 0.0 {
        return 0.0;
    }
    const MAGIC: i32 = 1_072_632_447;
    let x = (a.to_bits() as i64 >> 32) as i32;
    let y = (b * f64::from(x.wrapping_sub(MAGIC)) + f64::from(MAGIC)) as i32;
    f64::from_bits(((y as i64) << 32) as u64)
}
