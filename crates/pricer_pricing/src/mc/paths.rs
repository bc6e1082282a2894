//! Path generation for Monte Carlo simulation.
//!
//! Asset prices follow Geometric Brownian Motion under the risk-neutral
//! measure and are advanced with the exact log-space step:
//!
//! ```text
//! S(t+dt) = S(t) × exp((μ - 0.5σ²)dt + σ√dt × Z)
//! ```
//!
//! Paths are written into caller-owned scratch buffers so that a worker can
//! reuse one allocation for every trial it runs.

use pricer_core::types::PricingError;

/// Parameters for Geometric Brownian Motion path generation.
///
/// # Model
///
/// ```text
/// dS = μ S dt + σ S dW
/// ```
///
/// where μ is the risk-neutral drift (rate less repo rate), σ the
/// volatility and W a Wiener process.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::GbmParams;
///
/// let params = GbmParams::new(100.0, 0.05, 0.2, 1.0);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GbmParams {
    /// Initial spot price (S₀).
    pub spot: f64,
    /// Risk-neutral drift (μ), annualised.
    pub drift: f64,
    /// Volatility (σ), annualised.
    pub volatility: f64,
    /// Time to maturity (T) in years.
    pub maturity: f64,
}

impl GbmParams {
    /// Creates new GBM parameters.
    #[inline]
    pub fn new(spot: f64, drift: f64, volatility: f64, maturity: f64) -> Self {
        Self {
            spot,
            drift,
            volatility,
            maturity,
        }
    }

    /// Checks that the parameters describe a non-degenerate diffusion.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` when the spot is not positive, the drift is not
    /// finite, or the volatility or maturity is not strictly positive.
    pub fn validate(&self) -> Result<(), PricingError> {
        if !self.spot.is_finite() || self.spot <= 0.0 {
            return Err(PricingError::invalid("spot", "must be positive and finite"));
        }
        if !self.drift.is_finite() {
            return Err(PricingError::invalid("rate", "must be finite"));
        }
        if !self.volatility.is_finite() || self.volatility <= 0.0 {
            return Err(PricingError::invalid(
                "volatility",
                "must be strictly positive to simulate",
            ));
        }
        if !self.maturity.is_finite() || self.maturity <= 0.0 {
            return Err(PricingError::invalid(
                "maturity",
                "must be strictly positive to simulate",
            ));
        }
        Ok(())
    }

    /// Log-space drift and diffusion coefficients of one step of length `dt`.
    #[inline]
    fn step_terms(&self, dt: f64) -> (f64, f64) {
        let drift_dt = (self.drift - 0.5 * self.volatility * self.volatility) * dt;
        let vol_sqrt_dt = self.volatility * dt.sqrt();
        (drift_dt, vol_sqrt_dt)
    }
}

/// Fills `path` with `path.len()` equally spaced observations ending at
/// maturity, driven by `normals`.
///
/// The initial spot is not part of the output: `path[j]` holds the price at
/// time `(j + 1)·T/n`.
///
/// # Panics
///
/// Panics in debug builds if `normals` and `path` differ in length.
pub fn fill_gbm_path(params: &GbmParams, normals: &[f64], path: &mut [f64]) {
    debug_assert_eq!(normals.len(), path.len());
    let n_steps = path.len();
    if n_steps == 0 {
        return;
    }

    let dt = params.maturity / n_steps as f64;
    let (drift_dt, vol_sqrt_dt) = params.step_terms(dt);

    let mut price = params.spot;
    for (slot, &z) in path.iter_mut().zip(normals) {
        price *= (drift_dt + vol_sqrt_dt * z).exp();
        *slot = price;
    }
}

/// Terminal prices of two correlated assets after a single step to
/// maturity.
///
/// `z_first` drives the first asset; the second uses
/// `ρ·z_first + sqrt(1 - ρ²)·z_independent`.
#[inline]
pub fn correlated_terminal_prices(
    first: &GbmParams,
    second: &GbmParams,
    correlation: f64,
    z_first: f64,
    z_independent: f64,
) -> [f64; 2] {
    let z_second =
        correlation * z_first + (1.0 - correlation * correlation).max(0.0).sqrt() * z_independent;

    let terminal = |params: &GbmParams, z: f64| {
        let (drift_dt, vol_sqrt_dt) = params.step_terms(params.maturity);
        params.spot * (drift_dt + vol_sqrt_dt * z).exp()
    };

    [terminal(first, z_first), terminal(second, z_second)]
}
