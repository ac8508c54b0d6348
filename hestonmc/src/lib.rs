//! # hestonmc
//!
//! Monte Carlo pricing of vanilla options under the Heston
//! stochastic-volatility model.
//!
//! This crate is a **façade** that re-exports the underlying workspace
//! crates. Application code should depend on this crate rather than the
//! individual `hmc-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use hestonmc::instruments::{ExerciseStyle, OptionType};
//! use hestonmc::pricingengines::{McConfig, McHestonEngine};
//! use hestonmc::processes::SimulationParameters;
//!
//! let params = SimulationParameters::illustrative().with_paths(1_000).with_steps(10);
//! let engine = McHestonEngine::with_config(params, McConfig::default().with_seed(42))?;
//!
//! let european = engine.option_price(OptionType::Call, ExerciseStyle::European);
//! let american = engine.option_price_str("call", ExerciseStyle::AmericanApprox)?;
//! assert!(european > 0.0 && american > european);
//! # Ok::<(), hestonmc::core::Error>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Type aliases and error definitions.
pub use hmc_core as core;

/// Normal distribution, random number sources and sample statistics.
pub use hmc_math as math;

/// The Heston process and simulation parameters.
pub use hmc_processes as processes;

/// Vanilla options, payoffs and exercise styles.
pub use hmc_instruments as instruments;

/// Monte Carlo path simulation.
pub use hmc_methods as methods;

/// Pricing engines.
pub use hmc_pricingengines as pricingengines;
