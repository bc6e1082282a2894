//! Monte Carlo pricing of arithmetic-average options.
//!
//! # Architecture
//!
//! ```text
//! MonteCarloPricer
//! ├── MonteCarloConfig   (trials, seed, control variate, parallelism)
//! ├── PricerRng          (one seeded stream per trial)
//! └── Orchestration
//!     ├── fill_gbm_path() / correlated_terminal_prices()
//!     ├── PayoffParams::evaluate()
//!     └── plain or control-variate estimator
//! ```
//!
//! Long runs can be observed with a [`ProgressCallback`], stopped with a
//! [`CancellationToken`] or moved off the calling thread with
//! [`PricingJob`].
//!
//! # Examples
//!
//! ```rust
//! use pricer_pricing::mc::{EstimatorKind, MonteCarloConfig, MonteCarloPricer};
//! use pricer_models::instruments::{BasketOption, OptionType, Underlying};
//!
//! let asset = Underlying::new(100.0, 0.3).unwrap();
//! let basket = BasketOption::new([asset, asset], 0.5, 0.05, 3.0, 100.0, OptionType::Call)
//!     .unwrap();
//!
//! let config = MonteCarloConfig::builder()
//!     .n_trials(20_000)
//!     .control_variate(true)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let result = MonteCarloPricer::new(config).unwrap().price_basket(&basket).unwrap();
//! assert_eq!(result.estimator, EstimatorKind::ControlVariate);
//! println!("Price: {:.4} +/- {:.4}", result.price, 1.96 * result.std_error());
//! ```

pub mod config;
pub mod error;
pub mod estimator;
pub mod job;
pub mod monitor;
pub mod paths;
pub mod payoff;
pub mod pricer;

// Re-exports for convenient access
pub use config::{MonteCarloConfig, MonteCarloConfigBuilder, MAX_TRIALS};
pub use error::{ConfigError, McError};
pub use estimator::{ConfidenceInterval, Estimate, EstimatorKind};
pub use job::{JobResult, PricingJob};
pub use monitor::{CancellationToken, ProgressCallback};
pub use paths::{correlated_terminal_prices, fill_gbm_path, GbmParams};
pub use payoff::{PayoffParams, PayoffSample};
pub use pricer::{MonteCarloPricer, PricingResult};
