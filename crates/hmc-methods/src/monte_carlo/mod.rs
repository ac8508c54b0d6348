//! Monte Carlo simulation of the Heston model.
//!
//! # Overview
//!
//! * [`PathSimulator`]: discretizes the Heston SDEs for every path
//! * [`PathGrid`]: the full time-indexed history of simulated prices and
//!   variances produced by [`PathSimulator::generate_paths`]
//!
//! Only the terminal snapshot is needed for pricing, so the simulator also
//! offers [`PathSimulator::simulate_terminal`], which keeps one snapshot in
//! memory, and [`PathSimulator::simulate_terminal_parallel`], which spreads
//! paths over the rayon thread pool.

mod path_grid;
mod path_simulator;

pub use path_grid::PathGrid;
pub use path_simulator::PathSimulator;
