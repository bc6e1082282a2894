//! Closed-form pricing of options on a lognormal geometric average.
//!
//! Both the discretely sampled geometric Asian and the two-asset geometric
//! basket reduce to the same problem: the average `G` is lognormal with
//! effective volatility `σ̂` and drift `μ̂`, so
//!
//! ```text
//! d1 = [ln(G0/K) + (μ̂ + σ̂²/2)·τ] / (σ̂·√τ)
//! d2 = d1 - σ̂·√τ
//! Call = e^(-rτ)·[G0·e^(μ̂τ)·N(d1) - K·N(d2)]
//! Put  = e^(-rτ)·[K·N(-d2) - G0·e^(μ̂τ)·N(-d1)]
//! ```

use pricer_core::types::PricingError;

use super::distributions::norm_cdf;
use super::ensure_finite;
use crate::instruments::OptionType;

/// Price together with the intermediate values of a geometric-average
/// closed form.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeometricPriceDetails {
    /// Option price
    pub price: f64,
    /// Effective volatility σ̂ of the average
    pub adjusted_volatility: f64,
    /// Effective drift μ̂ of the average
    pub adjusted_drift: f64,
    /// d1 parameter
    pub d1: f64,
    /// d2 parameter
    pub d2: f64,
}

/// Lognormal-average inputs shared by the Asian and basket formulas.
#[derive(Clone, Copy, Debug)]
pub(crate) struct LognormalAverage {
    /// Value of the average today, `G0`.
    pub anchor: f64,
    pub adjusted_volatility: f64,
    pub adjusted_drift: f64,
}

impl LognormalAverage {
    pub(crate) fn price(
        &self,
        strike: f64,
        rate: f64,
        tau: f64,
        option_type: OptionType,
    ) -> Result<GeometricPriceDetails, PricingError> {
        if tau.is_nan() || tau <= 0.0 {
            return Err(PricingError::degenerate(format!(
                "no time remaining to expiry (tau = {})",
                tau
            )));
        }
        if self.adjusted_volatility <= 0.0 {
            return Err(PricingError::degenerate(
                "effective volatility of the geometric average is zero",
            ));
        }

        let sigma = self.adjusted_volatility;
        let mu = self.adjusted_drift;
        let vol_sqrt_tau = sigma * tau.sqrt();
        let d1 = ensure_finite(
            ((self.anchor / strike).ln() + (mu + 0.5 * sigma * sigma) * tau) / vol_sqrt_tau,
            "d1",
        )?;
        let d2 = d1 - vol_sqrt_tau;

        let discount = (-rate * tau).exp();
        let growth = self.anchor * (mu * tau).exp();
        let price = match option_type {
            OptionType::Call => discount * (growth * norm_cdf(d1) - strike * norm_cdf(d2)),
            OptionType::Put => discount * (strike * norm_cdf(-d2) - growth * norm_cdf(-d1)),
        };

        Ok(GeometricPriceDetails {
            price: ensure_finite(price, "geometric average price")?,
            adjusted_volatility: sigma,
            adjusted_drift: mu,
            d1,
            d2,
        })
    }
}
