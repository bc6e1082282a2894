//! Monte Carlo pricing engine.
//!
//! # Overview
//!
//! The [`MonteCarloPricer`] coordinates:
//! 1. Per-trial random streams (via [`PricerRng::for_trial`])
//! 2. Path generation (via [`fill_gbm_path`] and [`correlated_terminal_prices`])
//! 3. Payoff evaluation (via [`PayoffParams::evaluate`])
//! 4. Aggregation with the plain or control-variate estimator
//!
//! # Execution
//!
//! The payoff array is preallocated to the trial count and split into chunks
//! of `progress_interval` trials. Each chunk is filled by one rayon task that
//! owns a scratch buffer for the path, so no locking is needed. Trial `i`
//! always draws from the stream seeded by `seed_for_trial(seed, i)`, which
//! makes the result independent of scheduling and worker count.

use rayon::prelude::*;

use pricer_core::types::PricingError;
use pricer_models::analytical::{european_price, geometric_asian_price, geometric_basket_price};
use pricer_models::instruments::{AsianOption, BasketOption, OptionSpec, VanillaOption};

use super::config::MonteCarloConfig;
use super::error::{ConfigError, McError};
use super::estimator::{
    arithmetic_estimate, control_variate_estimate, geometric_estimate, ConfidenceInterval,
    EstimatorKind,
};
use super::monitor::{CancellationToken, ProgressCallback, ProgressTracker};
use super::paths::{correlated_terminal_prices, fill_gbm_path, GbmParams};
use super::payoff::{PayoffParams, PayoffSample};
use crate::rng::PricerRng;

/// Outcome of a Monte Carlo pricing run.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{MonteCarloConfig, MonteCarloPricer};
/// use pricer_models::instruments::{AsianOption, OptionType, Underlying};
///
/// let asian = AsianOption::new(
///     Underlying::new(100.0, 0.3).unwrap(),
///     0.05,
///     3.0,
///     100.0,
///     50,
///     OptionType::Put,
/// )
/// .unwrap();
///
/// let config = MonteCarloConfig::builder()
///     .n_trials(2000)
///     .control_variate(true)
///     .seed(42)
///     .build()
///     .unwrap();
/// let result = MonteCarloPricer::new(config).unwrap().price_asian(&asian).unwrap();
///
/// assert!(result.confidence_interval.contains(result.price));
/// println!("{:.4} in [{:.4}, {:.4}]", result.price,
///     result.confidence_interval.lower, result.confidence_interval.upper);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingResult {
    /// Point estimate of the option value.
    pub price: f64,
    /// Population standard deviation of the per-trial values.
    pub std_dev: f64,
    /// 95% confidence interval of the estimate.
    pub confidence_interval: ConfidenceInterval,
    /// Number of trials `m`.
    pub n_trials: usize,
    /// Estimator that produced `price`.
    pub estimator: EstimatorKind,
    /// Control-variate coefficient θ, when the correction was applied.
    pub theta: Option<f64>,
    /// The control variate was requested but had zero variance, so the plain
    /// estimate was reported instead.
    pub control_variate_fallback: bool,
    /// Closed-form price of the geometric counterpart.
    pub geometric_closed_form: Option<f64>,
    /// Plain Monte Carlo estimate of the geometric payoff.
    pub geometric_estimate: f64,
    /// 95% confidence interval of the geometric payoff estimate.
    pub geometric_interval: ConfidenceInterval,
    /// Seed the run was generated from.
    pub seed: u64,
}

impl PricingResult {
    /// Standard error of the estimate, `std_dev / √m`.
    #[inline]
    pub fn std_error(&self) -> f64 {
        self.std_dev / (self.n_trials as f64).sqrt()
    }
}

/// What a single trial simulates.
#[derive(Clone, Copy, Debug)]
enum TrialKernel {
    /// `n` equally spaced observations of one asset.
    Path {
        gbm: GbmParams,
        n_observations: usize,
    },
    /// Terminal prices of two correlated assets.
    Basket {
        assets: [GbmParams; 2],
        correlation: f64,
    },
}

impl TrialKernel {
    fn scratch_len(&self) -> usize {
        match self {
            TrialKernel::Path { n_observations, .. } => 2 * n_observations,
            TrialKernel::Basket { .. } => 0,
        }
    }

    #[inline]
    fn simulate(
        &self,
        payoff: &PayoffParams,
        rng: &mut PricerRng,
        scratch: &mut [f64],
    ) -> PayoffSample {
        match self {
            TrialKernel::Path { gbm, .. } => {
                let (normals, path) = scratch.split_at_mut(scratch.len() / 2);
                rng.fill_normal(normals);
                fill_gbm_path(gbm, normals, path);
                payoff.evaluate(path)
            }
            TrialKernel::Basket {
                assets,
                correlation,
            } => {
                let z_first = rng.gen_normal();
                let z_independent = rng.gen_normal();
                let terminals = correlated_terminal_prices(
                    &assets[0],
                    &assets[1],
                    *correlation,
                    z_first,
                    z_independent,
                );
                payoff.evaluate(&terminals)
            }
        }
    }
}

/// Everything a worker needs to fill a chunk of the payoff array.
struct TrialBatch<'a> {
    kernel: TrialKernel,
    payoff: PayoffParams,
    seed: u64,
    chunk_size: usize,
    tracker: &'a ProgressTracker,
    cancellation: &'a CancellationToken,
}

impl TrialBatch<'_> {
    fn fill(&self, scratch: &mut [f64], chunk_index: usize, out: &mut [PayoffSample]) {
        if self.cancellation.is_cancelled() {
            return;
        }
        let first_trial = chunk_index * self.chunk_size;
        for (offset, slot) in out.iter_mut().enumerate() {
            let mut rng = PricerRng::for_trial(self.seed, first_trial + offset);
            *slot = self.kernel.simulate(&self.payoff, &mut rng, scratch);
        }
        self.tracker.advance(out.len());
    }
}

/// Monte Carlo pricing engine for arithmetic Asian, arithmetic basket and
/// European options.
///
/// A pricer is immutable once built and may price any number of options;
/// every call allocates its own payoff array.
pub struct MonteCarloPricer {
    config: MonteCarloConfig,
    progress: Option<ProgressCallback>,
    cancellation: CancellationToken,
}

impl MonteCarloPricer {
    /// Creates a new pricer with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration is invalid.
    pub fn new(config: MonteCarloConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            progress: None,
            cancellation: CancellationToken::new(),
        })
    }

    /// Reports `(completed, total)` trial counts to `callback` after every
    /// chunk.
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Observes `token` for cancellation requests.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Returns a reference to the configuration.
    #[inline]
    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// Returns a handle to the token this pricer observes.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    /// Prices any supported option.
    ///
    /// European options are simulated as a single observation at maturity.
    pub fn price(&self, spec: &OptionSpec) -> Result<PricingResult, McError> {
        match spec {
            OptionSpec::European(option) => self.price_european(option),
            OptionSpec::Asian(option) => self.price_asian(option),
            OptionSpec::Basket(option) => self.price_basket(option),
        }
    }

    /// Prices an arithmetic-average Asian option; the geometric Asian closed
    /// form is the control variate.
    ///
    /// # Errors
    ///
    /// - `McError::Pricing(InvalidParameter)` for zero volatility or maturity
    /// - `McError::Cancelled` if the run was cancelled
    pub fn price_asian(&self, option: &AsianOption) -> Result<PricingResult, McError> {
        let underlying = option.underlying();
        let gbm = GbmParams::new(
            underlying.spot(),
            option.rate(),
            underlying.volatility(),
            option.maturity(),
        );
        gbm.validate()?;

        let kernel = TrialKernel::Path {
            gbm,
            n_observations: option.n_observations(),
        };
        let payoff = PayoffParams::new(
            option.strike(),
            option.option_type(),
            option.rate(),
            option.maturity(),
        );
        self.run("asian", kernel, payoff, geometric_asian_price(option, 0.0))
    }

    /// Prices an arithmetic two-asset basket option; the geometric basket
    /// closed form is the control variate.
    ///
    /// # Errors
    ///
    /// - `McError::Pricing(InvalidParameter)` for zero volatility or maturity
    /// - `McError::Cancelled` if the run was cancelled
    pub fn price_basket(&self, option: &BasketOption) -> Result<PricingResult, McError> {
        let [first, second] = option.underlyings();
        let asset = |spot: f64, volatility: f64| {
            GbmParams::new(spot, option.rate(), volatility, option.maturity())
        };
        let assets = [
            asset(first.spot(), first.volatility()),
            asset(second.spot(), second.volatility()),
        ];
        for gbm in &assets {
            gbm.validate()?;
        }

        let kernel = TrialKernel::Basket {
            assets,
            correlation: option.correlation(),
        };
        let payoff = PayoffParams::new(
            option.strike(),
            option.option_type(),
            option.rate(),
            option.maturity(),
        );
        self.run("basket", kernel, payoff, geometric_basket_price(option, 0.0))
    }

    /// Prices a European option from one observation at maturity, with the
    /// Black-Scholes price as control variate.
    ///
    /// # Errors
    ///
    /// - `McError::Pricing(InvalidParameter)` for zero volatility or maturity
    /// - `McError::Cancelled` if the run was cancelled
    pub fn price_european(&self, option: &VanillaOption) -> Result<PricingResult, McError> {
        let underlying = option.underlying();
        let gbm = GbmParams::new(
            underlying.spot(),
            option.rate() - option.repo_rate(),
            underlying.volatility(),
            option.maturity(),
        );
        gbm.validate()?;

        let kernel = TrialKernel::Path {
            gbm,
            n_observations: 1,
        };
        let payoff = PayoffParams::new(
            option.strike(),
            option.option_type(),
            option.rate(),
            option.maturity(),
        );
        self.run("european", kernel, payoff, european_price(option, 0.0))
    }

    fn run(
        &self,
        kind: &'static str,
        kernel: TrialKernel,
        payoff: PayoffParams,
        geometric_price: Result<f64, PricingError>,
    ) -> Result<PricingResult, McError> {
        let geometric_closed_form = match geometric_price {
            Ok(price) => Some(price),
            Err(err) if self.config.control_variate() => return Err(err.into()),
            Err(err) => {
                tracing::debug!(kind, error = %err, "no closed-form geometric price");
                None
            }
        };

        let seed = self.config.seed().unwrap_or_else(rand::random);
        tracing::debug!(
            kind,
            seed,
            n_trials = self.config.n_trials(),
            control_variate = self.config.control_variate(),
            parallel = self.config.should_parallelise(),
            "starting Monte Carlo run"
        );

        let samples = self.simulate(kernel, payoff, seed)?;

        let arithmetic = arithmetic_estimate(&samples)?;
        let geometric = geometric_estimate(&samples)?;

        let (estimate, estimator, control_variate_fallback) = match geometric_closed_form {
            Some(price) if self.config.control_variate() => {
                match control_variate_estimate(&samples, price) {
                    Ok(estimate) => (estimate, EstimatorKind::ControlVariate, false),
                    Err(PricingError::ZeroControlVariateVariance) => {
                        tracing::warn!(
                            kind,
                            "geometric payoffs have zero variance; reporting the plain estimate"
                        );
                        (arithmetic, EstimatorKind::Plain, true)
                    }
                    Err(err) => return Err(err.into()),
                }
            }
            _ => (arithmetic, EstimatorKind::Plain, false),
        };

        tracing::info!(
            kind,
            price = estimate.mean,
            lower = estimate.interval.lower,
            upper = estimate.interval.upper,
            estimator = %estimator,
            "Monte Carlo run finished"
        );

        Ok(PricingResult {
            price: estimate.mean,
            std_dev: estimate.std_dev,
            confidence_interval: estimate.interval,
            n_trials: samples.len(),
            estimator,
            theta: estimate.theta,
            control_variate_fallback,
            geometric_closed_form,
            geometric_estimate: geometric.mean,
            geometric_interval: geometric.interval,
            seed,
        })
    }

    /// Fills one payoff sample per trial.
    fn simulate(
        &self,
        kernel: TrialKernel,
        payoff: PayoffParams,
        seed: u64,
    ) -> Result<Vec<PayoffSample>, McError> {
        let n_trials = self.config.n_trials();
        let chunk_size = self.config.progress_interval();
        let scratch_len = kernel.scratch_len();

        let tracker = ProgressTracker::new(n_trials, self.progress.clone());
        let batch = TrialBatch {
            kernel,
            payoff,
            seed,
            chunk_size,
            tracker: &tracker,
            cancellation: &self.cancellation,
        };

        let mut samples = vec![PayoffSample::default(); n_trials];

        if self.config.should_parallelise() {
            let fill_all = |samples: &mut [PayoffSample]| {
                samples
                    .par_chunks_mut(chunk_size)
                    .enumerate()
                    .for_each_init(
                        || vec![0.0; scratch_len],
                        |scratch, (chunk_index, out)| batch.fill(scratch, chunk_index, out),
                    );
            };
            match self.config.threads() {
                Some(threads) => {
                    let pool = rayon::ThreadPoolBuilder::new()
                        .num_threads(threads)
                        .thread_name(|index| format!("pricer-mc-{}", index))
                        .build()
                        .map_err(|err| McError::ThreadPool(err.to_string()))?;
                    pool.install(|| fill_all(samples.as_mut_slice()));
                }
                None => fill_all(samples.as_mut_slice()),
            }
        } else {
            let mut scratch = vec![0.0; scratch_len];
            for (chunk_index, out) in samples.chunks_mut(chunk_size).enumerate() {
                if self.cancellation.is_cancelled() {
                    break;
                }
                batch.fill(&mut scratch, chunk_index, out);
            }
        }

        let completed = tracker.completed();
        if completed < n_trials {
            tracing::info!(completed, requested = n_trials, "Monte Carlo run cancelled");
            return Err(McError::Cancelled {
                completed,
                requested: n_trials,
            });
        }
        Ok(samples)
    }
}

impl std::fmt::Debug for MonteCarloPricer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MonteCarloPricer")
            .field("config", &self.config)
            .field("progress", &self.progress.is_some())
            .field("cancellation", &self.cancellation)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_models::instruments::{OptionType, Underlying};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn asian(option_type: OptionType, n: usize) -> AsianOption {
        AsianOption::new(
            Underlying::new(100.0, 0.3).unwrap(),
            0.05,
            3.0,
            100.0,
            n,
            option_type,
        )
        .unwrap()
    }

    fn pricer(n_trials: usize, control_variate: bool) -> MonteCarloPricer {
        let config = MonteCarloConfig::builder()
            .n_trials(n_trials)
            .control_variate(control_variate)
            .seed(2024)
            .build()
            .unwrap();
        MonteCarloPricer::new(config).unwrap()
    }

    #[test]
    fn test_result_fields_populated() {
        let result = pricer(500, true)
            .price_asian(&asian(OptionType::Call, 12))
            .unwrap();

        assert_eq!(result.n_trials, 500);
        assert_eq!(result.estimator, EstimatorKind::ControlVariate);
        assert!(result.theta.is_some());
        assert!(!result.control_variate_fallback);
        assert_eq!(result.seed, 2024);
        assert!(result.geometric_closed_form.is_some());
        assert!(result.confidence_interval.contains(result.price));
        assert_relative_eq!(
            result.std_error(),
            result.std_dev / 500f64.sqrt(),
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_single_trial_zero_width() {
        let result = pricer(1, false)
            .price_asian(&asian(OptionType::Call, 10))
            .unwrap();
        assert_eq!(result.n_trials, 1);
        assert_eq!(result.confidence_interval.width(), 0.0);
        assert_eq!(result.confidence_interval.lower, result.price);
    }

    #[test]
    fn test_single_trial_control_variate_falls_back() {
        let result = pricer(1, true)
            .price_asian(&asian(OptionType::Call, 10))
            .unwrap();
        assert_eq!(result.estimator, EstimatorKind::Plain);
        assert!(result.control_variate_fallback);
        assert_eq!(result.confidence_interval.width(), 0.0);
    }

    #[test]
    fn test_zero_volatility_rejected_before_simulation() {
        let option = AsianOption::new(
            Underlying::new(100.0, 0.0).unwrap(),
            0.05,
            1.0,
            100.0,
            10,
            OptionType::Call,
        )
        .unwrap();

        let err = pricer(100, false).price_asian(&option).unwrap_err();
        assert!(matches!(
            err,
            McError::Pricing(PricingError::InvalidParameter {
                name: "volatility",
                ..
            })
        ));
    }

    #[test]
    fn test_european_control_variate_recovers_black_scholes() {
        let option = VanillaOption::new(
            Underlying::new(100.0, 0.2).unwrap(),
            0.05,
            0.0,
            1.0,
            100.0,
            OptionType::Call,
        )
        .unwrap();
        let result = pricer(2000, true).price_european(&option).unwrap();

        assert_eq!(result.estimator, EstimatorKind::ControlVariate);
        assert_relative_eq!(result.price, 10.4506, epsilon = 1e-3);
        assert!(result.confidence_interval.width() < 1e-6);
    }

    #[test]
    fn test_cancelled_before_start() {
        let token = CancellationToken::new();
        token.cancel();
        let err = pricer(5000, false)
            .with_cancellation(token)
            .price_asian(&asian(OptionType::Put, 5))
            .unwrap_err();

        assert_eq!(
            err,
            McError::Cancelled {
                completed: 0,
                requested: 5000
            }
        );
    }

    #[test]
    fn test_cancel_from_progress_callback() {
        let token = CancellationToken::new();
        let handle = token.clone();
        let config = MonteCarloConfig::builder()
            .n_trials(10_000)
            .progress_interval(1000)
            .parallel(false)
            .seed(1)
            .build()
            .unwrap();

        let err = MonteCarloPricer::new(config)
            .unwrap()
            .with_cancellation(token)
            .with_progress(Arc::new(move |done, _| {
                if done >= 3000 {
                    handle.cancel();
                }
            }))
            .price_asian(&asian(OptionType::Put, 5))
            .unwrap_err();

        assert_eq!(
            err,
            McError::Cancelled {
                completed: 3000,
                requested: 10_000
            }
        );
    }

    #[test]
    fn test_progress_called_per_chunk() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let config = MonteCarloConfig::builder()
            .n_trials(2500)
            .progress_interval(1000)
            .parallel(false)
            .build()
            .unwrap();

        MonteCarloPricer::new(config)
            .unwrap()
            .with_progress(Arc::new(move |_, total| {
                assert_eq!(total, 2500);
                counter.fetch_add(1, Ordering::SeqCst);
            }))
            .price_asian(&asian(OptionType::Call, 4))
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_random_seed_recorded() {
        let config = MonteCarloConfig::builder().n_trials(10).build().unwrap();
        let pricer = MonteCarloPricer::new(config).unwrap();
        let option = asian(OptionType::Call, 3);

        let first = pricer.price_asian(&option).unwrap();
        let replay = MonteCarloConfig::builder()
            .n_trials(10)
            .seed(first.seed)
            .build()
            .unwrap();
        let second = MonteCarloPricer::new(replay)
            .unwrap()
            .price_asian(&option)
            .unwrap();

        assert_eq!(first.price, second.price);
    }
}
