//! # Pricer Engine (Layer 3: Monte Carlo)
//!
//! Monte Carlo pricing of arithmetic-average Asian and two-asset basket
//! options, with the geometric closed forms of `pricer_models` as control
//! variates.
//!
//! ## Layer Integration
//!
//! - Layer 1 (`pricer_core`): error taxonomy
//! - Layer 2 (`pricer_models`): option definitions and closed-form oracles
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::price_monte_carlo;
//! use pricer_models::instruments::{AsianOption, OptionType, Underlying};
//!
//! let option = AsianOption::new(
//!     Underlying::new(100.0, 0.3).unwrap(),
//!     0.05,
//!     3.0,
//!     100.0,
//!     50,
//!     OptionType::Put,
//! )
//! .unwrap();
//!
//! let result = price_monte_carlo(&option.into(), 10_000, true).unwrap();
//! assert!(result.confidence_interval.contains(result.price));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

// Random number generation infrastructure
pub mod rng;

// Monte Carlo engine
pub mod mc;

// Re-export commonly used items for convenience
pub use mc::{
    CancellationToken, ConfidenceInterval, EstimatorKind, McError, MonteCarloConfig,
    MonteCarloPricer, PricingJob, PricingResult,
};

use pricer_models::instruments::OptionSpec;

/// Prices `spec` by Monte Carlo with `n_trials` trials and a fresh random
/// seed.
///
/// Asian and basket options are priced on their arithmetic average; with
/// `use_control_variate` the geometric closed form corrects the estimate.
/// European options are simulated as a single observation at maturity.
///
/// Use [`MonteCarloPricer`] directly for a fixed seed, a dedicated thread
/// pool, progress reporting or cancellation.
///
/// # Errors
///
/// - [`McError::Config`] if `n_trials` is 0 or above [`mc::MAX_TRIALS`]
/// - [`McError::Pricing`] for zero volatility or maturity, or a degenerate
///   control-variate oracle
pub fn price_monte_carlo(
    spec: &OptionSpec,
    n_trials: usize,
    use_control_variate: bool,
) -> Result<PricingResult, McError> {
    let config = MonteCarloConfig::builder()
        .n_trials(n_trials)
        .control_variate(use_control_variate)
        .build()?;
    MonteCarloPricer::new(config)?.price(spec)
}
