//! Two-asset European basket option.

use pricer_core::types::PricingError;

use super::params::{finite, non_negative, positive, Underlying};
use super::OptionType;

/// European option on the average of two correlated assets, settled at
/// expiry.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{BasketOption, OptionType, Underlying};
///
/// let a = Underlying::new(100.0, 0.3).unwrap();
/// let b = Underlying::new(100.0, 0.3).unwrap();
/// let basket = BasketOption::new([a, b], 0.5, 0.05, 3.0, 100.0, OptionType::Call).unwrap();
/// assert_eq!(basket.correlation(), 0.5);
///
/// assert!(BasketOption::new([a, b], 1.5, 0.05, 3.0, 100.0, OptionType::Call).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasketOption {
    underlyings: [Underlying; 2],
    correlation: f64,
    rate: f64,
    maturity: f64,
    strike: f64,
    option_type: OptionType,
}

impl BasketOption {
    /// Creates a validated basket option.
    ///
    /// # Errors
    /// `InvalidParameter` if `|correlation| > 1`, the rate is not finite,
    /// the maturity is negative, or the strike is non-positive.
    pub fn new(
        underlyings: [Underlying; 2],
        correlation: f64,
        rate: f64,
        maturity: f64,
        strike: f64,
        option_type: OptionType,
    ) -> Result<Self, PricingError> {
        let correlation = finite("correlation", correlation)?;
        if correlation.abs() > 1.0 {
            return Err(PricingError::invalid(
                "correlation",
                format!("must lie in [-1, 1], got {}", correlation),
            ));
        }
        Ok(Self {
            underlyings,
            correlation,
            rate: finite("rate", rate)?,
            maturity: non_negative("maturity", maturity)?,
            strike: positive("strike", strike)?,
            option_type,
        })
    }

    /// The two basket constituents.
    #[inline]
    pub fn underlyings(&self) -> &[Underlying; 2] {
        &self.underlyings
    }

    /// Correlation `ρ` of the driving Brownian motions.
    #[inline]
    pub fn correlation(&self) -> f64 {
        self.correlation
    }

    /// Risk-free rate `r`.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Time to expiry `T`.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Strike `K`.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Call or put.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> [Underlying; 2] {
        [
            Underlying::new(100.0, 0.3).unwrap(),
            Underlying::new(80.0, 0.2).unwrap(),
        ]
    }

    #[test]
    fn test_correlation_bounds_inclusive() {
        assert!(BasketOption::new(pair(), 1.0, 0.05, 1.0, 90.0, OptionType::Call).is_ok());
        assert!(BasketOption::new(pair(), -1.0, 0.05, 1.0, 90.0, OptionType::Put).is_ok());
    }

    #[test]
    fn test_correlation_out_of_range() {
        match BasketOption::new(pair(), -1.01, 0.05, 1.0, 90.0, OptionType::Put) {
            Err(PricingError::InvalidParameter { name, .. }) => assert_eq!(name, "correlation"),
            other => panic!("Expected InvalidParameter, got {:?}", other),
        }
        assert!(BasketOption::new(pair(), f64::NAN, 0.05, 1.0, 90.0, OptionType::Put).is_err());
    }

    #[test]
    fn test_accessors() {
        let basket = BasketOption::new(pair(), 0.25, 0.04, 2.0, 90.0, OptionType::Put).unwrap();
        assert_eq!(basket.underlyings()[1].spot(), 80.0);
        assert_eq!(basket.rate(), 0.04);
        assert_eq!(basket.maturity(), 2.0);
        assert_eq!(basket.strike(), 90.0);
        assert_eq!(basket.option_type(), OptionType::Put);
    }
}
