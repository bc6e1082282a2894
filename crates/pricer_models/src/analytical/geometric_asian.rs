//! Geometric average Asian option, discretely sampled.
//!
//! For `n` equally spaced observations of a GBM the geometric mean is
//! lognormal with
//!
//! ```text
//! σ̂ = σ·√[(n+1)(2n+1) / (6n²)]
//! μ̂ = (r - σ²/2)·(n+1)/(2n) + σ̂²/2
//! ```
//!
//! With `n = 1` both collapse to `σ` and `r`, recovering Black-Scholes.
//!
//! At a valuation time `t > 0` the `n` observations are taken to span the
//! remaining life `τ = T - t`, starting from the current spot; fixings
//! already made are not part of the contract.

use pricer_core::types::PricingError;

use super::black_scholes::remaining_life;
use super::geometric::{GeometricPriceDetails, LognormalAverage};
use crate::instruments::AsianOption;

/// Closed-form price of the geometric-average counterpart of `option` at
/// valuation time `t`.
///
/// # Errors
/// `InvalidParameter` for a negative or non-finite `t`.
/// `DegenerateComputation` for zero volatility or `τ = T - t <= 0`.
///
/// # Examples
/// ```
/// use pricer_models::analytical::geometric_asian_price;
/// use pricer_models::instruments::{AsianOption, OptionType, Underlying};
///
/// let underlying = Underlying::new(100.0, 0.3).unwrap();
/// let put = AsianOption::new(underlying, 0.05, 3.0, 100.0, 50, OptionType::Put).unwrap();
/// let price = geometric_asian_price(&put, 0.0).unwrap();
/// assert!((price - 8.4827).abs() < 1e-3);
/// ```
pub fn geometric_asian_price(
    option: &AsianOption,
    valuation_time: f64,
) -> Result<f64, PricingError> {
    geometric_asian_with_details(option, valuation_time).map(|details| details.price)
}

/// Same as [`geometric_asian_price`] with the intermediate values.
pub fn geometric_asian_with_details(
    option: &AsianOption,
    valuation_time: f64,
) -> Result<GeometricPriceDetails, PricingError> {
    let tau = remaining_life(option.maturity(), valuation_time)?;
    let sigma = option.underlying().volatility();
    let rate = option.rate();
    let n = option.n_observations() as f64;

    let adjusted_volatility = sigma * ((n + 1.0) * (2.0 * n + 1.0) / (6.0 * n * n)).sqrt();
    let adjusted_drift = (rate - 0.5 * sigma * sigma) * (n + 1.0) / (2.0 * n)
        + 0.5 * adjusted_volatility * adjusted_volatility;

    LognormalAverage {
        anchor: option.underlying().spot(),
        adjusted_volatility,
        adjusted_drift,
    }
    .price(option.strike(), rate, tau, option.option_type())
}
