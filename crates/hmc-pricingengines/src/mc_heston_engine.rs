//! Monte Carlo Heston engine for vanilla options.
//!
//! Pricing runs in four stages:
//!
//! 1. simulate terminal prices `S[M][i]` (full grid, streaming, or parallel,
//!    see [`McConfig`]);
//! 2. evaluate the vanilla payoff on each terminal price;
//! 3. apply the exercise policy ([`apply_exercise_policy`]);
//! 4. average.
//!
//! # The American approximation
//!
//! [`ExerciseStyle::AmericanApprox`] does **not** value early exercise. It
//! repeats `payoff = max(payoff, exp(−rΔt)·payoff)` once per time step on
//! the terminal payoff and never applies the `exp(−rT)` discount. For
//! `r ≥ 0` the pass is a no-op and the "American" price is the undiscounted
//! mean terminal payoff, above the European price whenever `r > 0`. For
//! `r < 0` every pass multiplies the payoff by `exp(−rΔt) > 1`.

use hmc_core::{errors::Result, DiscountFactor, Price, Rate, Real, Size, Time};
use hmc_instruments::{
    ExerciseStyle, OptionType, Payoff, PlainVanillaPayoff, PricingEngine, PricingResults,
    VanillaOptionArguments,
};
use hmc_math::random_numbers::{
    InverseCumulativeNormalRng, NormalVariateSource, PseudoRandomNormalRng,
};
use hmc_math::Statistics;
use hmc_methods::{PathGrid, PathSimulator};
use hmc_processes::SimulationParameters;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Which simulated states are kept while pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PathStorage {
    /// Build the full `(M+1) × N` [`PathGrid`], then read its last snapshot.
    #[default]
    FullGrid,
    /// Keep one snapshot; O(N) memory, identical prices for the same seed.
    TerminalOnly,
}

/// Run-time configuration of [`McHestonEngine`].
///
/// ```
/// use hmc_pricingengines::{McConfig, PathStorage};
/// let config = McConfig::default()
///     .with_seed(42)
///     .with_path_storage(PathStorage::TerminalOnly);
/// assert_eq!(config.seed, Some(42));
/// assert!(!config.parallel);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct McConfig {
    /// Seed of the normal-variate source. `None` seeds from OS entropy, so
    /// every pricing call sees a different sample.
    pub seed: Option<u64>,
    /// Full grid or terminal snapshot only. Ignored when `parallel` is set.
    pub path_storage: PathStorage,
    /// Simulate paths on the rayon thread pool with one random stream per
    /// path.
    pub parallel: bool,
}

impl McConfig {
    /// Fix the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Choose how much of each path is kept.
    pub fn with_path_storage(mut self, path_storage: PathStorage) -> Self {
        self.path_storage = path_storage;
        self
    }

    /// Enable or disable parallel simulation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

// ─── Payoff helpers ───────────────────────────────────────────────────────────

/// Evaluate `payoff` on every terminal price.
pub fn terminal_payoffs(payoff: &impl Payoff, terminal_prices: &[Price]) -> Vec<Real> {
    terminal_prices.iter().map(|&s| payoff.value(s)).collect()
}

/// Turn raw terminal payoffs into present values, in place.
///
/// * European: every payoff is multiplied by `exp(−r·T)`.
/// * AmericanApprox: for each of the `steps` time steps, every payoff
///   becomes `max(payoff, exp(−r·T/steps)·payoff)`. No terminal discount is
///   applied (see the module documentation).
pub fn apply_exercise_policy(
    payoffs: &mut [Real],
    exercise: ExerciseStyle,
    risk_free_rate: Rate,
    maturity: Time,
    steps: Size,
) {
    match exercise {
        ExerciseStyle::European => {
            let discount: DiscountFactor = (-risk_free_rate * maturity).exp();
            for p in payoffs.iter_mut() {
                *p *= discount;
            }
        }
        ExerciseStyle::AmericanApprox => {
            let dt = maturity / steps as Real;
            let step_discount: DiscountFactor = (-risk_free_rate * dt).exp();
            for _ in 0..steps {
                for p in payoffs.iter_mut() {
                    let discounted = step_discount * *p;
                    *p = p.max(discounted);
                }
            }
        }
    }
}

/// Arithmetic mean, `Σx / n`. Zero for an empty slice.
pub fn mean(values: &[Real]) -> Real {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<Real>() / values.len() as Real
}

// ─── Engine ───────────────────────────────────────────────────────────────────

/// Monte Carlo pricing engine for vanilla options under the Heston model.
///
/// Each pricing call simulates a fresh set of paths; nothing is cached
/// between calls. With a fixed seed every call sees the same sample.
///
/// ```
/// use hmc_instruments::{ExerciseStyle, OptionType};
/// use hmc_pricingengines::{McConfig, McHestonEngine};
/// use hmc_processes::SimulationParameters;
///
/// let params = SimulationParameters::illustrative().with_paths(2_000).with_steps(20);
/// let engine = McHestonEngine::with_config(params, McConfig::default().with_seed(7)).unwrap();
/// let call = engine.option_price(OptionType::Call, ExerciseStyle::European);
/// assert!(call > 0.0);
/// assert!(engine.option_price_str("straddle", ExerciseStyle::European).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct McHestonEngine {
    params: SimulationParameters,
    simulator: PathSimulator,
    config: McConfig,
}

impl McHestonEngine {
    /// Create an engine with the default configuration (unseeded, full
    /// grid, sequential).
    pub fn new(params: SimulationParameters) -> Result<Self> {
        Self::with_config(params, McConfig::default())
    }

    /// Create an engine with an explicit configuration.
    ///
    /// Fails with `InvalidParameters` if `params` do not validate.
    pub fn with_config(params: SimulationParameters, config: McConfig) -> Result<Self> {
        let simulator = PathSimulator::new(&params)?;
        if !simulator.process().feller_satisfied() {
            tracing::warn!(
                kappa = params.kappa,
                theta = params.theta,
                sigma = params.sigma,
                "Feller condition 2κθ > σ² violated; simulated variance will hit zero"
            );
        }
        Ok(Self {
            params,
            simulator,
            config,
        })
    }

    /// The parameters this engine was built with.
    pub fn parameters(&self) -> &SimulationParameters {
        &self.params
    }

    /// The engine configuration.
    pub fn config(&self) -> &McConfig {
        &self.config
    }

    /// The underlying path simulator.
    pub fn simulator(&self) -> &PathSimulator {
        &self.simulator
    }

    /// Generate the full grid of simulated prices and variances with the
    /// engine's own random source.
    ///
    /// `exercise` does not affect the discretization.
    pub fn generate_paths(&self, exercise: ExerciseStyle) -> PathGrid {
        let mut rng = self.sequential_source();
        self.simulator.generate_paths(exercise, rng.as_mut())
    }

    /// Price of the option, the mean of the policy-adjusted payoffs.
    pub fn option_price(&self, option_type: OptionType, exercise: ExerciseStyle) -> Real {
        self.price(option_type, exercise).npv
    }

    /// Like [`option_price`](Self::option_price) with the option type given
    /// as `"call"` or `"put"` (any case).
    ///
    /// An unrecognised token fails with `InvalidOptionType` before any path
    /// is simulated.
    pub fn option_price_str(&self, option_type: &str, exercise: ExerciseStyle) -> Result<Real> {
        let option_type: OptionType = option_type.parse()?;
        Ok(self.option_price(option_type, exercise))
    }

    /// Price with an explicitly supplied normal-variate source.
    ///
    /// The configured seed and the `parallel` flag are ignored; the
    /// configured path storage still applies and both storages give the same
    /// result for the same source state.
    pub fn option_price_with<R>(
        &self,
        option_type: OptionType,
        exercise: ExerciseStyle,
        rng: &mut R,
    ) -> Real
    where
        R: NormalVariateSource + ?Sized,
    {
        let terminal = match self.config.path_storage {
            PathStorage::FullGrid => self
                .simulator
                .generate_paths(exercise, rng)
                .into_terminal_prices(),
            PathStorage::TerminalOnly => self.simulator.simulate_terminal(rng),
        };
        let payoff = PlainVanillaPayoff::new(option_type, self.params.strike);
        self.value_terminal(&payoff, exercise, &terminal).npv
    }

    /// Price with the Monte Carlo standard error and run diagnostics.
    ///
    /// Additional results: `"samples"` (path count) and, for European
    /// exercise, `"discount_factor"`.
    pub fn price(&self, option_type: OptionType, exercise: ExerciseStyle) -> PricingResults {
        let payoff = PlainVanillaPayoff::new(option_type, self.params.strike);
        self.price_payoff(&payoff, exercise)
    }

    fn price_payoff(&self, payoff: &PlainVanillaPayoff, exercise: ExerciseStyle) -> PricingResults {
        tracing::debug!(
            paths = self.params.paths,
            steps = self.params.steps,
            option = %payoff.option_type,
            strike = payoff.strike,
            %exercise,
            storage = ?self.config.path_storage,
            parallel = self.config.parallel,
            "simulating Heston paths"
        );
        let terminal = self.terminal_prices(exercise);
        self.value_terminal(payoff, exercise, &terminal)
    }

    fn terminal_prices(&self, exercise: ExerciseStyle) -> Vec<Price> {
        if self.config.parallel {
            let seed = self.config.seed.unwrap_or_else(rand::random);
            return self.simulator.simulate_terminal_parallel(seed);
        }
        match self.config.path_storage {
            PathStorage::FullGrid => self.generate_paths(exercise).into_terminal_prices(),
            PathStorage::TerminalOnly => {
                let mut rng = self.sequential_source();
                self.simulator.simulate_terminal(rng.as_mut())
            }
        }
    }

    fn value_terminal(
        &self,
        payoff: &PlainVanillaPayoff,
        exercise: ExerciseStyle,
        terminal: &[Price],
    ) -> PricingResults {
        let mut payoffs = terminal_payoffs(payoff, terminal);
        apply_exercise_policy(
            &mut payoffs,
            exercise,
            self.params.risk_free_rate,
            self.params.maturity,
            self.params.steps,
        );

        let npv = mean(&payoffs);
        let stats: Statistics = payoffs.iter().copied().collect();
        let error = stats.error_estimate();
        tracing::debug!(npv, error = ?error, samples = payoffs.len(), "Monte Carlo price");

        let results = PricingResults::from_npv(npv)
            .with_error_estimate(error)
            .with_result("samples", payoffs.len() as Real);
        match exercise {
            ExerciseStyle::European => results.with_result(
                "discount_factor",
                (-self.params.risk_free_rate * self.params.maturity).exp(),
            ),
            ExerciseStyle::AmericanApprox => results,
        }
    }

    fn sequential_source(&self) -> Box<dyn NormalVariateSource> {
        match self.config.seed {
            Some(seed) => Box::new(InverseCumulativeNormalRng::new(seed)),
            None => Box::new(PseudoRandomNormalRng::from_entropy()),
        }
    }
}

impl PricingEngine<VanillaOptionArguments> for McHestonEngine {
    fn calculate(&self, args: &VanillaOptionArguments) -> Result<PricingResults> {
        Ok(self.price_payoff(&args.payoff, args.exercise))
    }
}

/// Convenience function: seeded Monte Carlo Heston price.
///
/// `option_type` is `"call"` or `"put"` (any case).
pub fn mc_heston_price(
    params: SimulationParameters,
    option_type: &str,
    exercise: ExerciseStyle,
    seed: u64,
) -> Result<Real> {
    let option_type: OptionType = option_type.parse()?;
    let engine = McHestonEngine::with_config(params, McConfig::default().with_seed(seed))?;
    Ok(engine.option_price(option_type, exercise))
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytic_european_engine::black_scholes_price;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use hmc_core::Error;
    use hmc_instruments::VanillaOption;
    use hmc_math::random_numbers::FixedSequenceRng;

    fn params() -> SimulationParameters {
        SimulationParameters::illustrative()
            .with_paths(4_000)
            .with_steps(25)
    }

    fn seeded(params: SimulationParameters, seed: u64) -> McHestonEngine {
        McHestonEngine::with_config(params, McConfig::default().with_seed(seed)).unwrap()
    }

    #[test]
    fn european_policy_discounts_by_exp_minus_rt() {
        let mut payoffs = vec![10.0, 0.0, 3.5];
        apply_exercise_policy(&mut payoffs, ExerciseStyle::European, 0.05, 2.0, 10);
        let df = (-0.1_f64).exp();
        assert_eq!(payoffs, vec![10.0 * df, 0.0, 3.5 * df]);
    }

    #[test]
    fn american_policy_is_identity_for_non_negative_rates() {
        for r in [0.0, 0.01, 0.05, 0.25] {
            let mut payoffs = vec![10.0, 0.0, 3.5];
            apply_exercise_policy(&mut payoffs, ExerciseStyle::AmericanApprox, r, 1.0, 100);
            assert_eq!(payoffs, vec![10.0, 0.0, 3.5]);
        }
    }

    #[test]
    fn american_policy_compounds_for_negative_rates() {
        let mut payoffs = vec![10.0, 0.0];
        apply_exercise_policy(&mut payoffs, ExerciseStyle::AmericanApprox, -0.02, 1.0, 50);
        // fifty passes of exp(0.02/50)
        assert_relative_eq!(payoffs[0], 10.0 * (0.02_f64).exp(), max_relative = 1e-12);
        assert_eq!(payoffs[1], 0.0);
    }

    #[test]
    fn mean_of_values() {
        assert_eq!(mean(&[1.0, 2.0, 3.0, 6.0]), 3.0);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn terminal_payoffs_by_type() {
        let terminal = [80.0, 100.0, 130.0];
        let call = terminal_payoffs(&PlainVanillaPayoff::new(OptionType::Call, 100.0), &terminal);
        let put = terminal_payoffs(&PlainVanillaPayoff::new(OptionType::Put, 100.0), &terminal);
        assert_eq!(call, vec![0.0, 0.0, 30.0]);
        assert_eq!(put, vec![20.0, 0.0, 0.0]);
    }

    #[test]
    fn new_rejects_invalid_parameters() {
        let bad = SimulationParameters {
            rho: -2.0,
            ..params()
        };
        assert!(matches!(
            McHestonEngine::new(bad).unwrap_err(),
            Error::InvalidParameters(_)
        ));
    }

    #[test]
    fn invalid_option_type_is_rejected() {
        let engine = seeded(params(), 1);
        for token in ["straddle", "", "calll", "PUTS"] {
            assert_eq!(
                engine.option_price_str(token, ExerciseStyle::European),
                Err(Error::InvalidOptionType(token.to_string()))
            );
        }
        assert!(mc_heston_price(params(), "binary", ExerciseStyle::European, 1).is_err());
    }

    #[test]
    fn option_type_token_is_case_insensitive() {
        let engine = seeded(params(), 3);
        let typed = engine.option_price(OptionType::Put, ExerciseStyle::European);
        assert_eq!(engine.option_price_str("PuT", ExerciseStyle::European), Ok(typed));
    }

    #[test]
    fn seeded_engine_is_deterministic() {
        let engine = seeded(params(), 99);
        let a = engine.option_price(OptionType::Call, ExerciseStyle::European);
        let b = engine.option_price(OptionType::Call, ExerciseStyle::European);
        assert_eq!(a, b);
        assert_eq!(
            mc_heston_price(params(), "call", ExerciseStyle::European, 99),
            Ok(a)
        );
    }

    #[test]
    fn unseeded_engine_draws_fresh_samples() {
        let engine = McHestonEngine::new(params()).unwrap();
        let a = engine.option_price(OptionType::Call, ExerciseStyle::European);
        let b = engine.option_price(OptionType::Call, ExerciseStyle::European);
        assert_ne!(a, b);
    }

    #[test]
    fn terminal_only_storage_matches_full_grid() {
        let full = seeded(params(), 17);
        let streaming = McHestonEngine::with_config(
            params(),
            McConfig::default()
                .with_seed(17)
                .with_path_storage(PathStorage::TerminalOnly),
        )
        .unwrap();
        for style in [ExerciseStyle::European, ExerciseStyle::AmericanApprox] {
            assert_eq!(
                full.option_price(OptionType::Call, style),
                streaming.option_price(OptionType::Call, style)
            );
        }
    }

    #[test]
    fn parallel_is_reproducible_and_consistent() {
        let config = McConfig::default().with_seed(5).with_parallel(true);
        let parallel = McHestonEngine::with_config(params(), config).unwrap();
        let a = parallel.price(OptionType::Call, ExerciseStyle::European);
        let b = parallel.price(OptionType::Call, ExerciseStyle::European);
        assert_eq!(a, b);

        let sequential = seeded(params(), 5).price(OptionType::Call, ExerciseStyle::European);
        let tolerance = 4.0 * (a.error_estimate.unwrap() + sequential.error_estimate.unwrap());
        assert!(
            (a.npv - sequential.npv).abs() < tolerance,
            "parallel {} vs sequential {}",
            a.npv,
            sequential.npv
        );
    }

    #[test]
    fn injected_source_matches_manual_pipeline() {
        let p = params().with_paths(3).with_steps(4);
        let engine = seeded(p, 0);
        let draws = vec![0.3, -0.1, 1.2, 0.8, -0.5, 0.05, 2.0, -1.4, 0.0, 0.6];

        let price = engine.option_price_with(
            OptionType::Call,
            ExerciseStyle::European,
            &mut FixedSequenceRng::new(draws.clone()),
        );

        let grid = engine
            .simulator()
            .generate_paths(ExerciseStyle::European, &mut FixedSequenceRng::new(draws));
        let df = (-p.risk_free_rate * p.maturity).exp();
        let expected = grid
            .terminal_prices()
            .iter()
            .map(|&s| (s - p.strike).max(0.0) * df)
            .sum::<Real>()
            / 3.0;
        assert_eq!(price, expected);
    }

    #[test]
    fn zero_rate_european_is_undiscounted_mean() {
        let p = SimulationParameters {
            risk_free_rate: 0.0,
            ..params()
        };
        let engine = seeded(p, 21);
        let european = engine.option_price(OptionType::Put, ExerciseStyle::European);
        let american = engine.option_price(OptionType::Put, ExerciseStyle::AmericanApprox);
        assert_eq!(european, american);
    }

    #[test]
    fn american_is_undiscounted_european_for_positive_rates() {
        let engine = seeded(params(), 8);
        let european = engine.option_price(OptionType::Call, ExerciseStyle::European);
        let american = engine.option_price(OptionType::Call, ExerciseStyle::AmericanApprox);
        assert!(american > european);
        assert_relative_eq!(american * (-0.05_f64).exp(), european, max_relative = 1e-12);
    }

    #[test]
    fn pricing_results_carry_diagnostics() {
        let engine = seeded(params(), 4);
        let european = engine.price(OptionType::Call, ExerciseStyle::European);
        assert_eq!(european.additional_results["samples"], 4_000.0);
        assert_abs_diff_eq!(
            european.additional_results["discount_factor"],
            (-0.05_f64).exp(),
            epsilon = 1e-15
        );
        let error = european.error_estimate.unwrap();
        assert!(error > 0.0 && error < 1.0, "standard error {error}");

        let american = engine.price(OptionType::Call, ExerciseStyle::AmericanApprox);
        assert!(!american.additional_results.contains_key("discount_factor"));
    }

    #[test]
    fn zero_vol_of_vol_converges_to_black_scholes() {
        // σ = 0 and v0 = θ freeze the variance at 0.04: Black-Scholes at 20 %
        let p = SimulationParameters {
            sigma: 0.0,
            ..SimulationParameters::illustrative()
                .with_paths(40_000)
                .with_steps(4)
        };
        let engine = seeded(p, 2024);
        for option_type in [OptionType::Call, OptionType::Put] {
            let mc = engine.price(option_type, ExerciseStyle::European);
            let bs = black_scholes_price(option_type, 100.0, 100.0, 0.05, 0.2, 1.0);
            let stderr = mc.error_estimate.unwrap();
            assert!(
                (mc.npv - bs).abs() < 4.0 * stderr,
                "{option_type}: MC {:.4} ± {stderr:.4}, BS {bs:.4}",
                mc.npv
            );
        }
    }

    #[test]
    fn pricing_engine_trait_uses_instrument_strike() {
        let engine = seeded(params(), 12);
        let itm = VanillaOption::european(OptionType::Call, 80.0)
            .price(&engine)
            .unwrap();
        let atm = VanillaOption::european(OptionType::Call, 100.0)
            .price(&engine)
            .unwrap();
        assert!(itm.npv > atm.npv);
        assert_eq!(atm.npv, engine.option_price(OptionType::Call, ExerciseStyle::European));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn config_deserializes_with_defaults() {
        let config: McConfig = serde_json::from_str(r#"{ "seed": 3 }"#).unwrap();
        assert_eq!(config, McConfig::default().with_seed(3));
        let config: McConfig =
            serde_json::from_str(r#"{ "path_storage": "terminal_only", "parallel": true }"#)
                .unwrap();
        assert_eq!(config.path_storage, PathStorage::TerminalOnly);
        assert!(config.parallel);
    }
}
