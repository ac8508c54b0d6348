//! # hmc-pricingengines
//!
//! Pricing engines for vanilla options.
//!
//! ## Engines
//!
//! - [`McHestonEngine`]: Monte Carlo under the Heston model, with European
//!   discounting or the American discount-and-compare approximation
//! - [`AnalyticEuropeanEngine`]: Black-Scholes closed form, the limit of
//!   the Heston model when the vol-of-vol is zero

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod analytic_european_engine;
pub mod mc_heston_engine;

pub use analytic_european_engine::{black_scholes_price, black_scholes_vega, AnalyticEuropeanEngine};
pub use mc_heston_engine::{
    apply_exercise_policy, mc_heston_price, mean, terminal_payoffs, McConfig, McHestonEngine,
    PathStorage,
};
