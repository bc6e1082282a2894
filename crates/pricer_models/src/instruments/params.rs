//! Validated market parameters shared by every option type.

use pricer_core::types::PricingError;

/// Require a finite value.
pub(crate) fn finite(name: &'static str, value: f64) -> Result<f64, PricingError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PricingError::invalid(
            name,
            format!("must be finite, got {}", value),
        ))
    }
}

/// Require a finite, strictly positive value.
pub(crate) fn positive(name: &'static str, value: f64) -> Result<f64, PricingError> {
    finite(name, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(PricingError::invalid(
            name,
            format!("must be positive, got {}", value),
        ))
    }
}

/// Require a finite, non-negative value.
pub(crate) fn non_negative(name: &'static str, value: f64) -> Result<f64, PricingError> {
    finite(name, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(PricingError::invalid(
            name,
            format!("must be non-negative, got {}", value),
        ))
    }
}

/// A single risky asset: current price and lognormal volatility.
///
/// Zero volatility is representable so that degenerate inputs reach the
/// pricers, which report them as degenerate rather than invalid.
///
/// # Examples
/// ```
/// use pricer_models::instruments::Underlying;
///
/// let asset = Underlying::new(100.0, 0.3).unwrap();
/// assert_eq!(asset.spot(), 100.0);
/// assert_eq!(asset.volatility(), 0.3);
///
/// assert!(Underlying::new(0.0, 0.3).is_err());
/// assert!(Underlying::new(100.0, -0.1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Underlying {
    spot: f64,
    volatility: f64,
}

impl Underlying {
    /// Creates a validated underlying.
    ///
    /// # Errors
    /// `InvalidParameter` if `spot <= 0`, `volatility < 0`, or either is
    /// not finite.
    pub fn new(spot: f64, volatility: f64) -> Result<Self, PricingError> {
        Ok(Self {
            spot: positive("spot", spot)?,
            volatility: non_negative("volatility", volatility)?,
        })
    }

    /// Current asset price `S0`.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Annualised volatility `σ`.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Copy of this underlying with a different volatility.
    pub fn with_volatility(&self, volatility: f64) -> Result<Self, PricingError> {
        Self::new(self.spot, volatility)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_volatility_is_allowed() {
        let asset = Underlying::new(50.0, 0.0).unwrap();
        assert_eq!(asset.volatility(), 0.0);
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(matches!(
            Underlying::new(f64::NAN, 0.2),
            Err(PricingError::InvalidParameter { name: "spot", .. })
        ));
        assert!(matches!(
            Underlying::new(100.0, f64::INFINITY),
            Err(PricingError::InvalidParameter {
                name: "volatility",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_negative_spot() {
        match Underlying::new(-1.0, 0.2) {
            Err(PricingError::InvalidParameter { name, reason }) => {
                assert_eq!(name, "spot");
                assert!(reason.contains("-1"));
            }
            other => panic!("Expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_with_volatility() {
        let asset = Underlying::new(100.0, 0.2).unwrap();
        let bumped = asset.with_volatility(0.25).unwrap();
        assert_eq!(bumped.spot(), 100.0);
        assert_eq!(bumped.volatility(), 0.25);
        assert!(asset.with_volatility(-0.25).is_err());
    }

    #[test]
    fn test_helpers() {
        assert_eq!(finite("rate", -0.01).unwrap(), -0.01);
        assert!(positive("strike", 0.0).is_err());
        assert_eq!(non_negative("maturity", 0.0).unwrap(), 0.0);
        assert!(non_negative("maturity", -1e-9).is_err());
    }
}
