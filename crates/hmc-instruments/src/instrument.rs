//! Pricing results and the `PricingEngine` trait.

use hmc_core::{errors::Result, Real};
use std::collections::HashMap;

/// Results of pricing an instrument.
///
/// Contains the NPV and optionally additional named results
/// (e.g. "samples", "discount_factor").
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PricingResults {
    /// Net present value.
    pub npv: Real,
    /// Error estimate (e.g. from MC simulation).
    pub error_estimate: Option<Real>,
    /// Additional named results.
    pub additional_results: HashMap<String, Real>,
}

impl PricingResults {
    /// Create pricing results with just an NPV.
    pub fn from_npv(npv: Real) -> Self {
        Self {
            npv,
            error_estimate: None,
            additional_results: HashMap::new(),
        }
    }

    /// Attach an error estimate.
    pub fn with_error_estimate(mut self, error: Option<Real>) -> Self {
        self.error_estimate = error;
        self
    }

    /// Add a named result.
    pub fn with_result(mut self, key: impl Into<String>, value: Real) -> Self {
        self.additional_results.insert(key.into(), value);
        self
    }
}

/// Base trait for all pricing engines.
///
/// A pricing engine computes `PricingResults` for a specific instrument type.
pub trait PricingEngine<Args>: std::fmt::Debug + Send + Sync {
    /// Price the instrument described by `args`.
    fn calculate(&self, args: &Args) -> Result<PricingResults>;
}
