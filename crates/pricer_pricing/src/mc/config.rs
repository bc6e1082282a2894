//! Monte Carlo simulation configuration.
//!
//! This module provides the configuration type and builder for Monte Carlo
//! pricing runs.

use super::error::ConfigError;

/// Maximum number of trials allowed.
pub const MAX_TRIALS: usize = 10_000_000;

/// Default number of trials between progress reports and cancellation
/// checks.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 1000;

/// Below this many trials the run stays on the calling thread.
pub const PARALLEL_THRESHOLD: usize = 2000;

/// Monte Carlo simulation configuration.
///
/// Immutable configuration specifying simulation parameters.
/// Use [`MonteCarloConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::MonteCarloConfig;
///
/// let config = MonteCarloConfig::builder()
///     .n_trials(10_000)
///     .control_variate(true)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_trials(), 10_000);
/// assert!(config.control_variate());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonteCarloConfig {
    /// Number of independent trials `m`.
    n_trials: usize,
    /// Optional seed for reproducibility.
    seed: Option<u64>,
    /// Apply the geometric control variate.
    control_variate: bool,
    /// Trials per work chunk, progress report and cancellation check.
    progress_interval: usize,
    /// Allow the rayon pool to run chunks concurrently.
    parallel: bool,
    /// Dedicated pool size; `None` uses the global rayon pool.
    threads: Option<usize>,
}

impl MonteCarloConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> MonteCarloConfigBuilder {
        MonteCarloConfigBuilder::default()
    }

    /// Returns the number of trials.
    #[inline]
    pub fn n_trials(&self) -> usize {
        self.n_trials
    }

    /// Returns the optional seed for reproducibility.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns whether the control-variate correction is applied.
    #[inline]
    pub fn control_variate(&self) -> bool {
        self.control_variate
    }

    /// Returns the number of trials per chunk.
    #[inline]
    pub fn progress_interval(&self) -> usize {
        self.progress_interval
    }

    /// Returns whether chunks may run concurrently.
    #[inline]
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Returns the dedicated worker pool size, if any.
    #[inline]
    pub fn threads(&self) -> Option<usize> {
        self.threads
    }

    /// Returns `true` if this run should be spread over worker threads.
    #[inline]
    pub fn should_parallelise(&self) -> bool {
        self.parallel && self.n_trials >= PARALLEL_THRESHOLD
    }

    /// Copy of this configuration with a different trial count.
    pub fn with_trials(&self, n_trials: usize) -> Result<Self, ConfigError> {
        let config = Self {
            n_trials,
            ..self.clone()
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `n_trials` is 0 or greater than [`MAX_TRIALS`]
    /// - `progress_interval` is 0
    /// - `threads` is `Some(0)`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_trials == 0 || self.n_trials > MAX_TRIALS {
            return Err(ConfigError::InvalidTrialCount(self.n_trials));
        }
        if self.progress_interval == 0 {
            return Err(ConfigError::InvalidProgressInterval(self.progress_interval));
        }
        if let Some(0) = self.threads {
            return Err(ConfigError::InvalidThreadCount(0));
        }
        Ok(())
    }
}

/// Builder for [`MonteCarloConfig`].
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::MonteCarloConfig;
///
/// let config = MonteCarloConfig::builder()
///     .n_trials(50_000)
///     .threads(2)
///     .progress_interval(5000)
///     .build()
///     .expect("valid config");
/// assert_eq!(config.threads(), Some(2));
/// ```
#[derive(Clone, Debug)]
pub struct MonteCarloConfigBuilder {
    n_trials: Option<usize>,
    seed: Option<u64>,
    control_variate: bool,
    progress_interval: usize,
    parallel: bool,
    threads: Option<usize>,
}

impl Default for MonteCarloConfigBuilder {
    fn default() -> Self {
        Self {
            n_trials: None,
            seed: None,
            control_variate: false,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            parallel: true,
            threads: None,
        }
    }
}

impl MonteCarloConfigBuilder {
    /// Sets the number of trials, in [1, 10_000_000].
    #[inline]
    pub fn n_trials(mut self, n_trials: usize) -> Self {
        self.n_trials = Some(n_trials);
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets an optional seed; `None` draws a fresh one per run.
    #[inline]
    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Enables or disables the geometric control variate.
    #[inline]
    pub fn control_variate(mut self, enabled: bool) -> Self {
        self.control_variate = enabled;
        self
    }

    /// Sets the number of trials per chunk.
    #[inline]
    pub fn progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Enables or disables concurrent execution.
    #[inline]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Runs on a dedicated pool of `threads` workers.
    #[inline]
    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `n_trials` is missing or any value is
    /// out of range.
    pub fn build(self) -> Result<MonteCarloConfig, ConfigError> {
        let n_trials = self.n_trials.ok_or(ConfigError::InvalidParameter {
            name: "n_trials",
            value: "must be specified".to_string(),
        })?;

        let config = MonteCarloConfig {
            n_trials,
            seed: self.seed,
            control_variate: self.control_variate,
            progress_interval: self.progress_interval,
            parallel: self.parallel,
            threads: self.threads,
        };

        config.validate()?;
        Ok(config)
    }
}
