//! Vanilla option instrument.

use crate::exercise::ExerciseStyle;
use crate::instrument::{PricingEngine, PricingResults};
use crate::payoff::{OptionType, PlainVanillaPayoff};
use hmc_core::{errors::Result, Real};

/// Arguments handed to a pricing engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VanillaOptionArguments {
    /// The payoff.
    pub payoff: PlainVanillaPayoff,
    /// The exercise style.
    pub exercise: ExerciseStyle,
}

/// A plain vanilla option on a single underlying asset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VanillaOption {
    payoff: PlainVanillaPayoff,
    exercise: ExerciseStyle,
}

impl VanillaOption {
    /// Create a new vanilla option.
    pub fn new(payoff: PlainVanillaPayoff, exercise: ExerciseStyle) -> Self {
        Self { payoff, exercise }
    }

    /// Convenience: a European call/put.
    pub fn european(option_type: OptionType, strike: Real) -> Self {
        Self::new(
            PlainVanillaPayoff::new(option_type, strike),
            ExerciseStyle::European,
        )
    }

    /// Convenience: a call/put priced with the American approximation.
    pub fn american(option_type: OptionType, strike: Real) -> Self {
        Self::new(
            PlainVanillaPayoff::new(option_type, strike),
            ExerciseStyle::AmericanApprox,
        )
    }

    /// The strike price.
    pub fn strike(&self) -> Real {
        self.payoff.strike
    }

    /// The option type (call/put).
    pub fn option_type(&self) -> OptionType {
        self.payoff.option_type
    }

    /// The payoff.
    pub fn payoff(&self) -> &PlainVanillaPayoff {
        &self.payoff
    }

    /// The exercise style.
    pub fn exercise(&self) -> ExerciseStyle {
        self.exercise
    }

    /// Get the arguments for a pricing engine.
    pub fn arguments(&self) -> VanillaOptionArguments {
        VanillaOptionArguments {
            payoff: self.payoff,
            exercise: self.exercise,
        }
    }

    /// Price this option using the given engine.
    pub fn price(
        &self,
        engine: &dyn PricingEngine<VanillaOptionArguments>,
    ) -> Result<PricingResults> {
        engine.calculate(&self.arguments())
    }
}
