//! Geometric two-asset basket option.
//!
//! The geometric mean `B = √(S1·S2)` of two correlated GBMs is lognormal.
//! With the covariance matrix `{σ1², ρσ1σ2; ρσ1σ2, σ2²}` averaged over the
//! n² = 4 entries:
//!
//! ```text
//! B0  = √(S1·S2)
//! σ_B = √(σ1² + 2ρσ1σ2 + σ2²) / 2
//! μ_B = r - (σ1² + σ2²)/4 + σ_B²/2
//! ```

use pricer_core::types::PricingError;

use super::black_scholes::remaining_life;
use super::geometric::{GeometricPriceDetails, LognormalAverage};
use crate::instruments::BasketOption;

/// Closed-form price of the geometric-average counterpart of `option` at
/// valuation time `t`, with remaining life `τ = T - t`.
///
/// # Errors
/// `InvalidParameter` for a negative or non-finite `t`.
/// `DegenerateComputation` for `τ <= 0` or a basket whose effective
/// volatility vanishes (both volatilities zero, or perfectly
/// anti-correlated equal volatilities).
///
/// # Examples
/// ```
/// use pricer_models::analytical::geometric_basket_price;
/// use pricer_models::instruments::{BasketOption, OptionType, Underlying};
///
/// let asset = Underlying::new(100.0, 0.3).unwrap();
/// let call = BasketOption::new([asset, asset], 0.5, 0.05, 3.0, 100.0, OptionType::Call).unwrap();
/// let price = geometric_basket_price(&call, 0.0).unwrap();
/// assert!((price - 22.1021).abs() < 1e-3);
/// ```
pub fn geometric_basket_price(
    option: &BasketOption,
    valuation_time: f64,
) -> Result<f64, PricingError> {
    geometric_basket_with_details(option, valuation_time).map(|details| details.price)
}

/// Same as [`geometric_basket_price`] with the intermediate values.
pub fn geometric_basket_with_details(
    option: &BasketOption,
    valuation_time: f64,
) -> Result<GeometricPriceDetails, PricingError> {
    let tau = remaining_life(option.maturity(), valuation_time)?;
    let [first, second] = option.underlyings();
    let (s1, s2) = (first.volatility(), second.volatility());
    let rho = option.correlation();

    // Round-off near ρ = -1 is treated as an exactly riskless basket.
    let raw_variance = s1 * s1 + 2.0 * rho * s1 * s2 + s2 * s2;
    let total_variance = if raw_variance <= f64::EPSILON * (s1 * s1 + s2 * s2) {
        0.0
    } else {
        raw_variance
    };
    let adjusted_volatility = 0.5 * total_variance.sqrt();
    let adjusted_drift = option.rate() - 0.25 * (s1 * s1 + s2 * s2)
        + 0.5 * adjusted_volatility * adjusted_volatility;

    LognormalAverage {
        anchor: (first.spot() * second.spot()).sqrt(),
        adjusted_volatility,
        adjusted_drift,
    }
    .price(option.strike(), option.rate(), tau, option.option_type())
}
