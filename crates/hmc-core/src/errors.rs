//! Error types for hestonmc.
//!
//! A single `thiserror`-derived enum covers every failure the pricing stack
//! can report. Parameter preconditions are checked with the [`ensure!`]
//! macro defined here.

use thiserror::Error;

/// The top-level error type used throughout hestonmc.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// The option-type token is neither "call" nor "put".
    #[error("invalid option type '{0}': choose 'call' or 'put'")]
    InvalidOptionType(String),

    /// A simulation parameter violates its precondition.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Shorthand `Result` type used throughout hestonmc.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::InvalidParameters(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use hmc_core::{ensure, errors::Error};
/// fn positive(x: f64) -> hmc_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert_eq!(
///     positive(-1.0),
///     Err(Error::InvalidParameters("x must be positive, got -1".into()))
/// );
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::InvalidParameters(
                format!($($msg)*)
            ));
        }
    };
}
