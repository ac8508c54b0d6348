//! # hmc-processes
//!
//! The Heston stochastic-volatility process and the parameter record that
//! drives a Monte Carlo pricing run.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod heston_process;
pub mod simulation_parameters;

pub use heston_process::{HestonProcess, HestonState};
pub use simulation_parameters::SimulationParameters;
