//! Exercise styles.

use std::fmt;

/// How the option may be exercised, and therefore how simulated terminal
/// payoffs are turned into a price.
///
/// `AmericanApprox` is not an optimal-stopping algorithm. It applies a
/// per-step discount-and-compare pass to each terminal payoff:
/// `payoff = max(payoff, exp(−rΔt)·payoff)`, repeated once per time step.
/// For `r ≥ 0` that pass never changes a payoff, so the result is the
/// *undiscounted* mean terminal payoff; for `r < 0` each pass grows the
/// payoff by `exp(−rΔt)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExerciseStyle {
    /// Exercise at maturity only; payoffs are discounted by `exp(−rT)`.
    #[default]
    European,
    /// The discount-and-compare approximation described above.
    AmericanApprox,
}

impl ExerciseStyle {
    /// Whether this is the American approximation.
    pub fn is_american(self) -> bool {
        matches!(self, ExerciseStyle::AmericanApprox)
    }
}

/// `true` selects [`ExerciseStyle::AmericanApprox`].
impl From<bool> for ExerciseStyle {
    fn from(american: bool) -> Self {
        if american {
            ExerciseStyle::AmericanApprox
        } else {
            ExerciseStyle::European
        }
    }
}

impl fmt::Display for ExerciseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExerciseStyle::European => write!(f, "European"),
            ExerciseStyle::AmericanApprox => write!(f, "American (approx.)"),
        }
    }
}
