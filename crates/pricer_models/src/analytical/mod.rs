//! Closed-form pricing formulas.
//!
//! - Black-Scholes with a continuous repo rate, plus vega
//! - Implied volatility by Newton-Raphson
//! - Discretely sampled geometric Asian options
//! - Two-asset geometric basket options
//!
//! All pricers return [`PricingError::DegenerateComputation`] instead of a
//! non-finite price when evaluated at a singular point (zero volatility,
//! no remaining life).

pub mod black_scholes;
pub mod distributions;
mod geometric;
pub mod geometric_asian;
pub mod geometric_basket;
pub mod implied_volatility;

pub use black_scholes::{european_price, european_vega, BlackScholes};
pub use distributions::{norm_cdf, norm_pdf};
pub use geometric::GeometricPriceDetails;
pub use geometric_asian::{geometric_asian_price, geometric_asian_with_details};
pub use geometric_basket::{geometric_basket_price, geometric_basket_with_details};
pub use implied_volatility::{implied_volatility, ImpliedVolatilitySolver};

use pricer_core::types::PricingError;

use crate::instruments::OptionSpec;

/// Reject NaN/±∞ intermediates.
#[inline]
pub(crate) fn ensure_finite(value: f64, what: &str) -> Result<f64, PricingError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PricingError::degenerate(format!(
            "{} is not finite ({})",
            what, value
        )))
    }
}

/// Closed-form price of `spec` at time zero.
///
/// European options use Black-Scholes; Asian and basket options are priced
/// by their geometric-average counterparts.
///
/// # Examples
/// ```
/// use pricer_models::analytical::price_closed_form;
/// use pricer_models::instruments::{BasketOption, OptionSpec, OptionType, Underlying};
///
/// let asset = Underlying::new(100.0, 0.3).unwrap();
/// let basket = BasketOption::new([asset, asset], 0.5, 0.05, 3.0, 100.0, OptionType::Put).unwrap();
/// let price = price_closed_form(&OptionSpec::Basket(basket)).unwrap();
/// assert!((price - 11.4916).abs() < 1e-3);
/// ```
pub fn price_closed_form(spec: &OptionSpec) -> Result<f64, PricingError> {
    price_closed_form_at(spec, 0.0)
}

/// Closed-form price of `spec` at valuation time `t`, over the remaining
/// life `τ = T - t`.
///
/// # Errors
/// `InvalidParameter` for a negative or non-finite `t`;
/// `DegenerateComputation` once `t` reaches maturity.
pub fn price_closed_form_at(
    spec: &OptionSpec,
    valuation_time: f64,
) -> Result<f64, PricingError> {
    match spec {
        OptionSpec::European(option) => european_price(option, valuation_time),
        OptionSpec::Asian(option) => geometric_asian_price(option, valuation_time),
        OptionSpec::Basket(option) => geometric_basket_price(option, valuation_time),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruments::{
        AsianOption, BasketOption, OptionSpec, OptionType, Underlying, VanillaOption,
    };

    #[test]
    fn test_dispatch_matches_direct_calls() {
        let underlying = Underlying::new(100.0, 0.3).unwrap();

        let vanilla =
            VanillaOption::new(underlying, 0.05, 0.0, 3.0, 100.0, OptionType::Call).unwrap();
        assert_eq!(
            price_closed_form(&vanilla.into()).unwrap(),
            european_price(&vanilla, 0.0).unwrap()
        );

        let asian = AsianOption::new(underlying, 0.05, 3.0, 100.0, 50, OptionType::Put).unwrap();
        assert_eq!(
            price_closed_form(&asian.into()).unwrap(),
            geometric_asian_price(&asian, 0.0).unwrap()
        );
    }

    #[test]
    fn test_valuation_time_dispatch() {
        let asset = Underlying::new(100.0, 0.3).unwrap();
        let later: OptionSpec = BasketOption::new([asset, asset], 0.5, 0.05, 3.0, 100.0, OptionType::Call)
            .unwrap()
            .into();
        let now: OptionSpec = BasketOption::new([asset, asset], 0.5, 0.05, 2.25, 100.0, OptionType::Call)
            .unwrap()
            .into();
        assert_eq!(
            price_closed_form_at(&later, 0.0).unwrap(),
            price_closed_form(&later).unwrap()
        );
        assert!(
            (price_closed_form_at(&later, 0.75).unwrap() - price_closed_form(&now).unwrap()).abs()
                < 1e-12
        );
        assert!(matches!(
            price_closed_form_at(&later, 3.0),
            Err(PricingError::DegenerateComputation(_))
        ));
    }

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite(1.5, "x").unwrap(), 1.5);
        assert!(matches!(
            ensure_finite(f64::NAN, "x"),
            Err(PricingError::DegenerateComputation(_))
        ));
        assert!(ensure_finite(f64::NEG_INFINITY, "x").is_err());
    }
}
