//! Storage for simulated price and variance trajectories.

use hmc_core::{Real, Size};
use hmc_processes::HestonState;

/// Simulated prices and variances for all paths at all time points.
///
/// Two parallel collections of `M + 1` snapshots, each holding one value per
/// path: `price(t, i)` and `variance(t, i)` for `t ∈ 0..=M`, `i ∈ 0..N`.
/// Snapshot 0 holds `(S0, v0)` for every path.
#[derive(Debug, Clone, PartialEq)]
pub struct PathGrid {
    prices: Vec<Vec<Real>>,
    variances: Vec<Vec<Real>>,
}

impl PathGrid {
    /// Build a grid from its snapshots.
    ///
    /// Used by [`PathSimulator`](crate::PathSimulator); both collections hold
    /// the same number of equally long snapshots.
    pub(crate) fn from_snapshots(prices: Vec<Vec<Real>>, variances: Vec<Vec<Real>>) -> Self {
        debug_assert_eq!(prices.len(), variances.len());
        Self { prices, variances }
    }

    /// Number of paths `N`.
    pub fn paths(&self) -> Size {
        self.prices.first().map_or(0, Vec::len)
    }

    /// Number of time steps `M` (snapshots − 1).
    pub fn steps(&self) -> Size {
        self.prices.len().saturating_sub(1)
    }

    /// Simulated price of path `i` at time index `t`.
    ///
    /// # Panics
    /// If `t > steps()` or `i >= paths()`.
    pub fn price(&self, t: Size, i: Size) -> Real {
        self.prices[t][i]
    }

    /// Simulated variance of path `i` at time index `t`.
    ///
    /// # Panics
    /// If `t > steps()` or `i >= paths()`.
    pub fn variance(&self, t: Size, i: Size) -> Real {
        self.variances[t][i]
    }

    /// Both state variables of path `i` at time index `t`.
    pub fn state(&self, t: Size, i: Size) -> HestonState {
        HestonState {
            price: self.price(t, i),
            variance: self.variance(t, i),
        }
    }

    /// All price snapshots, indexed by time.
    pub fn prices(&self) -> &[Vec<Real>] {
        &self.prices
    }

    /// All variance snapshots, indexed by time.
    pub fn variances(&self) -> &[Vec<Real>] {
        &self.variances
    }

    /// The price trajectory of path `i`.
    pub fn path_prices(&self, i: Size) -> Vec<Real> {
        self.prices.iter().map(|snapshot| snapshot[i]).collect()
    }

    /// The variance trajectory of path `i`.
    pub fn path_variances(&self, i: Size) -> Vec<Real> {
        self.variances.iter().map(|snapshot| snapshot[i]).collect()
    }

    /// Prices at maturity, one per path.
    pub fn terminal_prices(&self) -> &[Real] {
        self.prices.last().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Consume the grid, keeping only the prices at maturity.
    pub fn into_terminal_prices(mut self) -> Vec<Real> {
        self.prices.pop().unwrap_or_default()
    }
}
