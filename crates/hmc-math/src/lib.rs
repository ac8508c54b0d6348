//! # hmc-math
//!
//! Mathematical utilities: the normal distribution (via statrs), injectable
//! standard-normal variate sources, and a statistics accumulator.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Probability distributions.
pub mod distributions;

/// Random number generators and the `NormalVariateSource` seam.
pub mod random_numbers;

/// Statistics accumulators.
pub mod statistics;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use distributions::{normal_cdf, normal_cdf_inverse, normal_pdf};
pub use random_numbers::{
    stream_seed, FixedSequenceRng, InverseCumulativeNormalRng, MersenneTwisterUniformRng,
    NormalVariateSource, PseudoRandomNormalRng,
};
pub use statistics::Statistics;
