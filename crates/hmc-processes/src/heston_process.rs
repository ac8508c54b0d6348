//! Heston stochastic volatility process.
//!
//! The Heston model describes two coupled SDEs under the risk-neutral
//! measure:
//!
//! ```text
//! dS = r S dt + √v S dW₁
//! dv = κ(θ − v) dt + σ √v dW₂
//! dW₁ dW₂ = ρ dt
//! ```
//!
//! [`HestonProcess::evolve`] advances one `(S, v)` pair by a single time
//! step: an Euler–Maruyama step with full truncation for the variance and a
//! log-Euler step for the price, both driven by the variance at the start
//! of the step.

use hmc_core::{Rate, Real, Time};

/// The state of one simulated path at one point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HestonState {
    /// Asset price `S`.
    pub price: Real,
    /// Instantaneous variance `v`.
    pub variance: Real,
}

/// The Heston stochastic volatility process.
///
/// * `v0`   : initial variance
/// * `kappa`: mean-reversion speed of variance
/// * `theta`: long-run variance level
/// * `sigma`: vol-of-vol
/// * `rho`  : correlation between the two Brownian motions
#[derive(Debug, Clone, PartialEq)]
pub struct HestonProcess {
    s0: Real,
    v0: Real,
    risk_free_rate: Rate,
    kappa: Real,
    theta: Real,
    sigma: Real,
    rho: Real,
    // √(1 − ρ²), fixed for the life of the process
    rho_complement: Real,
}

impl HestonProcess {
    /// Create a new Heston process.
    ///
    /// No validation is done here; see
    /// [`SimulationParameters::validate`](crate::SimulationParameters::validate).
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        s0: Real,
        v0: Real,
        risk_free_rate: Rate,
        kappa: Real,
        theta: Real,
        sigma: Real,
        rho: Real,
    ) -> Self {
        Self {
            s0,
            v0,
            risk_free_rate,
            kappa,
            theta,
            sigma,
            rho,
            rho_complement: (1.0 - rho * rho).sqrt(),
        }
    }

    /// Spot price.
    pub fn s0(&self) -> Real {
        self.s0
    }

    /// Initial variance.
    pub fn v0(&self) -> Real {
        self.v0
    }

    /// Continuously-compounded risk-free rate.
    pub fn risk_free_rate(&self) -> Rate {
        self.risk_free_rate
    }

    /// Mean-reversion speed.
    pub fn kappa(&self) -> Real {
        self.kappa
    }

    /// Long-run variance.
    pub fn theta(&self) -> Real {
        self.theta
    }

    /// Vol-of-vol.
    pub fn sigma(&self) -> Real {
        self.sigma
    }

    /// Correlation.
    pub fn rho(&self) -> Real {
        self.rho
    }

    /// The state every path starts from, `(S0, v0)`.
    pub fn initial_state(&self) -> HestonState {
        HestonState {
            price: self.s0,
            variance: self.v0,
        }
    }

    /// Whether the Feller condition `2κθ > σ²` holds.
    ///
    /// When it fails the continuous-time variance can touch zero; the full
    /// truncation scheme still keeps every simulated variance non-negative.
    pub fn feller_satisfied(&self) -> bool {
        2.0 * self.kappa * self.theta > self.sigma * self.sigma
    }

    /// Correlate two independent standard normals.
    ///
    /// Cholesky factor of `[[1, ρ], [ρ, 1]]`: returns `ρ·z1 + √(1−ρ²)·z2`,
    /// the variance shock that pairs with the price shock `z1`.
    #[inline]
    pub fn correlate(&self, z1: Real, z2: Real) -> Real {
        self.rho * z1 + self.rho_complement * z2
    }

    /// Advance `state` by one step of length `dt`.
    ///
    /// `z1` drives the price and `z2` is the independent draw that is
    /// correlated into the variance shock.
    ///
    /// ```text
    /// v' = max(v + κ(θ − v)Δt + σ√(vΔt)·(ρz1 + √(1−ρ²)z2), 0)
    /// S' = S·exp((r − v/2)Δt + √(vΔt)·z1)
    /// ```
    ///
    /// Both updates use the variance `v` from the start of the step.
    #[inline]
    pub fn evolve(&self, state: HestonState, dt: Time, z1: Real, z2: Real) -> HestonState {
        let v = state.variance;
        let sqrt_v_dt = (v * dt).sqrt();
        let dw_v = self.correlate(z1, z2);

        let variance =
            (v + self.kappa * (self.theta - v) * dt + self.sigma * sqrt_v_dt * dw_v).max(0.0);
        let price = state.price
            * ((self.risk_free_rate - 0.5 * v) * dt + sqrt_v_dt * z1).exp();

        HestonState { price, variance }
    }
}
