//! Error types for the Monte Carlo engine.
//!
//! - [`ConfigError`]: rejected [`MonteCarloConfig`](super::MonteCarloConfig)
//! - [`McError`]: everything a Monte Carlo pricing run can fail with

use std::fmt;

use pricer_core::types::PricingError;
use thiserror::Error;

use super::config::MAX_TRIALS;

/// Configuration error for the Monte Carlo pricer.
///
/// These errors occur during construction when invalid parameters are provided.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Trial count outside valid range [1, MAX_TRIALS].
    InvalidTrialCount(usize),
    /// Progress interval of zero.
    InvalidProgressInterval(usize),
    /// Worker thread count of zero.
    InvalidThreadCount(usize),
    /// Invalid parameter value with name and description.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTrialCount(count) => write!(
                f,
                "Invalid trial count {}: must be in range [1, {}]",
                count, MAX_TRIALS
            ),
            Self::InvalidProgressInterval(interval) => write!(
                f,
                "Invalid progress interval {}: must be at least 1",
                interval
            ),
            Self::InvalidThreadCount(threads) => {
                write!(f, "Invalid thread count {}: must be at least 1", threads)
            }
            Self::InvalidParameter { name, value } => {
                write!(f, "Invalid parameter '{}': {}", name, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Failure of a Monte Carlo pricing run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum McError {
    /// Rejected configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Invalid, degenerate or otherwise unpriceable input.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// The run was cancelled through its [`CancellationToken`](super::CancellationToken).
    #[error("Pricing cancelled after {completed} of {requested} trials")]
    Cancelled {
        /// Trials finished before cancellation was observed.
        completed: usize,
        /// Trials requested.
        requested: usize,
    },

    /// The dedicated worker pool could not be built.
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),

    /// A background job ended without delivering a result.
    #[error("Pricing worker terminated without a result")]
    WorkerDisconnected,
}

impl McError {
    /// Returns `true` for [`McError::Cancelled`].
    pub fn is_cancelled(&self) -> bool {
        matches!(self, McError::Cancelled { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidTrialCount(0);
        assert!(err.to_string().contains("Invalid trial count 0"));

        let err = ConfigError::InvalidProgressInterval(0);
        assert!(err.to_string().contains("progress interval"));

        let err = ConfigError::InvalidParameter {
            name: "n_trials",
            value: "must be specified".to_string(),
        };
        assert!(err.to_string().contains("n_trials"));
    }

    #[test]
    fn test_mc_error_conversions() {
        let err: McError = ConfigError::InvalidThreadCount(0).into();
        assert!(matches!(err, McError::Config(_)));

        let err: McError = PricingError::ZeroControlVariateVariance.into();
        assert_eq!(
            err.to_string(),
            PricingError::ZeroControlVariateVariance.to_string()
        );
    }

    #[test]
    fn test_cancelled_display() {
        let err = McError::Cancelled {
            completed: 3000,
            requested: 10_000,
        };
        assert!(err.is_cancelled());
        assert_eq!(err.to_string(), "Pricing cancelled after 3000 of 10000 trials");
    }
}
