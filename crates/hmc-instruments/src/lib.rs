//! # hmc-instruments
//!
//! Vanilla option descriptions (option type, exercise style, payoff) and
//! the [`PricingEngine`] trait engines implement to price them.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod exercise;
pub mod instrument;
pub mod option;
pub mod payoff;

pub use exercise::ExerciseStyle;
pub use instrument::{PricingEngine, PricingResults};
pub use option::{VanillaOption, VanillaOptionArguments};
pub use payoff::{OptionType, Payoff, PlainVanillaPayoff};
