//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors raised by every pricing entry point
//! - `SolverError`: Errors from root-finding solvers

use thiserror::Error;

/// Categorised pricing errors.
///
/// Every failure of a pricing request maps onto one of four categories.
/// Each is local to the request that raised it; a price is never reported
/// as NaN or infinity.
///
/// # Variants
/// - `InvalidParameter`: An input is out of its admissible domain
/// - `DegenerateComputation`: A formula hit a singular point (zero volatility,
///   zero remaining maturity, vanishing vega, non-finite intermediate)
/// - `NonConvergent`: An iterative solver exhausted its iteration budget
/// - `ZeroControlVariateVariance`: The geometric control variate has no
///   variance, so the correction coefficient is undefined
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::invalid("volatility", "must be non-negative, got -0.1");
/// assert_eq!(
///     format!("{}", err),
///     "Invalid parameter `volatility`: must be non-negative, got -0.1"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// Input outside its admissible domain.
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter
        name: &'static str,
        /// Human-readable reason
        reason: String,
    },

    /// Formula evaluated at a singular point.
    #[error("Degenerate computation: {0}")]
    DegenerateComputation(String),

    /// Iterative solver did not converge.
    #[error("Failed to converge after {iterations} iterations")]
    NonConvergent {
        /// Number of iterations attempted
        iterations: usize,
    },

    /// Control variate sample variance is zero.
    #[error("Control variate has zero variance; correction coefficient is undefined")]
    ZeroControlVariateVariance,
}

impl PricingError {
    /// Shorthand for [`PricingError::InvalidParameter`].
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        PricingError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Shorthand for [`PricingError::DegenerateComputation`].
    pub fn degenerate(msg: impl Into<String>) -> Self {
        PricingError::DegenerateComputation(msg.into())
    }
}

/// Root-finding solver errors.
///
/// # Variants
/// - `MaxIterationsExceeded`: Solver failed to converge within iteration limit
/// - `DerivativeNearZero`: Derivative too small for Newton-Raphson
/// - `NumericalInstability`: An iterate became non-finite
///
/// # Examples
/// ```
/// use pricer_core::types::SolverError;
///
/// let err = SolverError::MaxIterationsExceeded { iterations: 100 };
/// assert!(format!("{}", err).contains("100 iterations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverError {
    /// Solver failed to converge within maximum iterations.
    #[error("Failed to converge after {iterations} iterations")]
    MaxIterationsExceeded {
        /// Number of iterations attempted
        iterations: usize,
    },

    /// Derivative near zero (division by zero risk in Newton-Raphson).
    #[error("Derivative near zero at x = {x}")]
    DerivativeNearZero {
        /// The x value where derivative was near zero
        x: f64,
    },

    /// Numerical instability during computation.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}

impl From<SolverError> for PricingError {
    fn from(err: SolverError) -> Self {
        match err {
            SolverError::MaxIterationsExceeded { iterations } => {
                PricingError::NonConvergent { iterations }
            }
            SolverError::DerivativeNearZero { x } => {
                PricingError::DegenerateComputation(format!("derivative vanished at x = {}", x))
            }
            SolverError::NumericalInstability(msg) => PricingError::DegenerateComputation(msg),
        }
    }
}
