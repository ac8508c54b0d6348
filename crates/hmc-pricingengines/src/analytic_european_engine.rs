//! Analytic European option engine (Black-Scholes).
//!
//! With zero vol-of-vol and `v0 = θ` the Heston variance never moves, and
//! the model collapses to Black-Scholes with volatility `√v0`. This engine
//! gives the closed-form reference for that limit.

use hmc_core::{ensure, errors::Result, Rate, Real, Time, Volatility};
use hmc_instruments::{OptionType, PricingEngine, PricingResults, VanillaOptionArguments};
use hmc_math::distributions::{normal_cdf, normal_pdf};

/// Black-Scholes price of a European call or put on a non-dividend-paying
/// asset.
///
/// $$C = S N(d_1) - K e^{-rT} N(d_2)$$
/// $$P = K e^{-rT} N(-d_2) - S N(-d_1)$$
///
/// where $d_{1,2} = \frac{\ln(S/K) + (r \pm \sigma^2/2)T}{\sigma\sqrt{T}}$.
/// With zero total variance the price is the discounted intrinsic value of
/// the forward.
pub fn black_scholes_price(
    option_type: OptionType,
    spot: Real,
    strike: Real,
    risk_free_rate: Rate,
    volatility: Volatility,
    time_to_expiry: Time,
) -> Real {
    let phi = option_type.sign();
    let t = time_to_expiry;
    if t <= 0.0 {
        return (phi * (spot - strike)).max(0.0);
    }

    let r = risk_free_rate;
    let df = (-r * t).exp();
    let std_dev = volatility * t.sqrt();
    if std_dev <= 1e-15 {
        let forward = spot / df;
        return df * (phi * (forward - strike)).max(0.0);
    }

    let d1 = ((spot / strike).ln() + (r + 0.5 * volatility * volatility) * t) / std_dev;
    let d2 = d1 - std_dev;
    phi * (spot * normal_cdf(phi * d1) - strike * df * normal_cdf(phi * d2))
}

/// Black-Scholes vega, `S·φ(d1)·√T`, identical for calls and puts.
///
/// Zero at or after expiry and when the total variance vanishes.
pub fn black_scholes_vega(
    spot: Real,
    strike: Real,
    risk_free_rate: Rate,
    volatility: Volatility,
    time_to_expiry: Time,
) -> Real {
    let std_dev = volatility * time_to_expiry.max(0.0).sqrt();
    if std_dev <= 1e-15 {
        return 0.0;
    }
    let drift = risk_free_rate + 0.5 * volatility * volatility;
    let d1 = ((spot / strike).ln() + drift * time_to_expiry) / std_dev;
    spot * normal_pdf(d1) * time_to_expiry.sqrt()
}

/// Analytic pricing engine for European vanilla options.
///
/// Reports `"vega"` as an additional result.
#[derive(Debug, Clone)]
pub struct AnalyticEuropeanEngine {
    spot: Real,
    risk_free_rate: Rate,
    volatility: Volatility,
    maturity: Time,
}

impl AnalyticEuropeanEngine {
    /// Create a new engine.
    pub fn new(spot: Real, risk_free_rate: Rate, volatility: Volatility, maturity: Time) -> Self {
        Self {
            spot,
            risk_free_rate,
            volatility,
            maturity,
        }
    }
}

impl PricingEngine<VanillaOptionArguments> for AnalyticEuropeanEngine {
    fn calculate(&self, args: &VanillaOptionArguments) -> Result<PricingResults> {
        ensure!(
            !args.exercise.is_american(),
            "the analytic engine prices European exercise only, got {}",
            args.exercise
        );
        let npv = black_scholes_price(
            args.payoff.option_type,
            self.spot,
            args.payoff.strike,
            self.risk_free_rate,
            self.volatility,
            self.maturity,
        );
        let vega = black_scholes_vega(
            self.spot,
            args.payoff.strike,
            self.risk_free_rate,
            self.volatility,
            self.maturity,
        );
        Ok(PricingResults::from_npv(npv).with_result("vega", vega))
    }
}
