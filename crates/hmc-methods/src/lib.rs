//! # hmc-methods
//!
//! Monte Carlo path generation for the Heston model.
//!
//! # Modules
//!
//! * [`monte_carlo`]: the [`PathGrid`] of simulated prices and variances
//!   and the [`PathSimulator`] that fills it (full grid, streaming, or in
//!   parallel)

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Monte Carlo simulation: path grid and path simulator.
pub mod monte_carlo;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use monte_carlo::{PathGrid, PathSimulator};
