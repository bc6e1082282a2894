//! Error types for the `pricer` binary.

use pricer_core::types::PricingError;
use pricer_pricing::mc::McError;
use thiserror::Error;

use crate::config::ConfigError;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration file or environment error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Closed-form, implied volatility or lattice pricing error
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    /// Monte Carlo engine error
    #[error("Monte Carlo error: {0}")]
    MonteCarlo(#[from] McError),

    /// Monte Carlo run exceeded `--timeout-secs`
    #[error("Monte Carlo run timed out after {seconds}s ({completed} of {requested} trials done)")]
    Timeout {
        /// Configured timeout
        seconds: u64,
        /// Trials finished before cancellation
        completed: usize,
        /// Trials requested
        requested: usize,
    },

    /// JSON output error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_error_wrapped() {
        let err: CliError = PricingError::invalid("strike", "must be positive").into();
        assert!(err.to_string().starts_with("Pricing error:"));
        assert!(err.to_string().contains("strike"));
    }

    #[test]
    fn test_unreadable_config_is_a_config_error() {
        let missing = std::path::Path::new("/nonexistent/pricer/config.toml");
        let err: CliError = crate::config::CliConfig::load(missing).unwrap_err().into();
        assert!(matches!(err, CliError::Config(ConfigError::Io { .. })));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_timeout_display() {
        let err = CliError::Timeout {
            seconds: 5,
            completed: 2000,
            requested: 1_000_000,
        };
        assert_eq!(
            err.to_string(),
            "Monte Carlo run timed out after 5s (2000 of 1000000 trials done)"
        );
    }
}
