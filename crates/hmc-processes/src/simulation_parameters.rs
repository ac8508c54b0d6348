//! Parameters of a Heston Monte Carlo pricing run.

use crate::heston_process::HestonProcess;
use hmc_core::{ensure, errors::Result, Price, Rate, Real, Size, Time};

/// Everything a pricing run needs: the Heston dynamics, the contract
/// (strike, maturity) and the simulation size.
///
/// The record is plain data. [`new`](Self::new) stores its arguments
/// verbatim; call [`validate`](Self::validate) (the engines and simulators
/// do) to reject inputs the discretization is not defined for.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationParameters {
    /// Initial asset price `S0`.
    pub s0: Price,
    /// Strike `K`.
    pub strike: Price,
    /// Maturity `T` in years.
    pub maturity: Time,
    /// Continuously-compounded risk-free rate `r`.
    pub risk_free_rate: Rate,
    /// Mean-reversion speed `κ`.
    pub kappa: Real,
    /// Long-run variance `θ`.
    pub theta: Real,
    /// Vol-of-vol `σ`.
    pub sigma: Real,
    /// Correlation `ρ` between price and variance shocks.
    pub rho: Real,
    /// Initial variance `v0`.
    pub v0: Real,
    /// Number of simulated paths `N`.
    pub paths: Size,
    /// Number of time steps `M`.
    pub steps: Size,
}

impl SimulationParameters {
    /// Create a parameter set. No validation is performed.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        s0: Price,
        strike: Price,
        maturity: Time,
        risk_free_rate: Rate,
        kappa: Real,
        theta: Real,
        sigma: Real,
        rho: Real,
        v0: Real,
        paths: Size,
        steps: Size,
    ) -> Self {
        Self {
            s0,
            strike,
            maturity,
            risk_free_rate,
            kappa,
            theta,
            sigma,
            rho,
            v0,
            paths,
            steps,
        }
    }

    /// The illustrative at-the-money scenario: one-year option on a spot of
    /// 100, 5 % rate, 20 % initial volatility, ρ = −0.7, 10 000 paths of
    /// 100 steps.
    pub fn illustrative() -> Self {
        Self::new(100.0, 100.0, 1.0, 0.05, 2.0, 0.04, 0.3, -0.7, 0.04, 10_000, 100)
    }

    /// A copy with a different number of paths.
    pub fn with_paths(mut self, paths: Size) -> Self {
        self.paths = paths;
        self
    }

    /// A copy with a different number of time steps.
    pub fn with_steps(mut self, steps: Size) -> Self {
        self.steps = steps;
        self
    }

    /// Step size `Δt = T / M`.
    pub fn dt(&self) -> Time {
        self.maturity / self.steps as Real
    }

    /// The Heston dynamics described by these parameters.
    pub fn process(&self) -> HestonProcess {
        HestonProcess::new(
            self.s0,
            self.v0,
            self.risk_free_rate,
            self.kappa,
            self.theta,
            self.sigma,
            self.rho,
        )
    }

    /// Check the preconditions of the discretization.
    ///
    /// Negative rates are accepted.
    pub fn validate(&self) -> Result<()> {
        let reals = [
            ("s0", self.s0),
            ("strike", self.strike),
            ("maturity", self.maturity),
            ("risk_free_rate", self.risk_free_rate),
            ("kappa", self.kappa),
            ("theta", self.theta),
            ("sigma", self.sigma),
            ("rho", self.rho),
            ("v0", self.v0),
        ];
        for (name, value) in reals {
            ensure!(value.is_finite(), "{name} must be finite, got {value}");
        }

        ensure!(self.paths >= 1, "path count must be at least 1, got {}", self.paths);
        ensure!(self.steps >= 1, "step count must be at least 1, got {}", self.steps);
        ensure!(self.maturity > 0.0, "maturity must be positive, got {}", self.maturity);
        ensure!(
            (-1.0..=1.0).contains(&self.rho),
            "correlation ρ must be in [-1, 1], got {}",
            self.rho
        );
        ensure!(self.s0 > 0.0, "initial price must be positive, got {}", self.s0);
        ensure!(self.strike >= 0.0, "strike must be non-negative, got {}", self.strike);
        ensure!(self.v0 >= 0.0, "initial variance must be non-negative, got {}", self.v0);
        ensure!(
            self.kappa >= 0.0,
            "mean reversion speed must be non-negative, got {}",
            self.kappa
        );
        ensure!(
            self.theta >= 0.0,
            "long-run variance must be non-negative, got {}",
            self.theta
        );
        ensure!(self.sigma >= 0.0, "vol-of-vol must be non-negative, got {}", self.sigma);
        Ok(())
    }
}
