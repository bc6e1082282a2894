//! European/American vanilla option definition.

use pricer_core::types::PricingError;

use super::params::{finite, non_negative, positive, Underlying};
use super::OptionType;

/// Vanilla option on a single underlying paying a continuous repo
/// (dividend) rate `q`.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{OptionType, Underlying, VanillaOption};
///
/// let underlying = Underlying::new(100.0, 0.2).unwrap();
/// let option = VanillaOption::new(underlying, 0.05, 0.0, 1.0, 100.0, OptionType::Call).unwrap();
/// assert_eq!(option.strike(), 100.0);
/// assert_eq!(option.repo_rate(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VanillaOption {
    underlying: Underlying,
    rate: f64,
    repo_rate: f64,
    maturity: f64,
    strike: f64,
    option_type: OptionType,
}

impl VanillaOption {
    /// Creates a validated vanilla option.
    ///
    /// # Arguments
    /// * `underlying` - Asset price and volatility
    /// * `rate` - Continuously compounded risk-free rate `r`
    /// * `repo_rate` - Continuous repo/dividend rate `q`
    /// * `maturity` - Time to expiry `T` in years (may be zero)
    /// * `strike` - Strike `K` (must be positive)
    /// * `option_type` - Call or put
    ///
    /// # Errors
    /// `InvalidParameter` for non-finite rates, negative maturity, or
    /// non-positive strike.
    pub fn new(
        underlying: Underlying,
        rate: f64,
        repo_rate: f64,
        maturity: f64,
        strike: f64,
        option_type: OptionType,
    ) -> Result<Self, PricingError> {
        Ok(Self {
            underlying,
            rate: finite("rate", rate)?,
            repo_rate: finite("repo_rate", repo_rate)?,
            maturity: non_negative("maturity", maturity)?,
            strike: positive("strike", strike)?,
            option_type,
        })
    }

    /// Copy of this option with the underlying volatility replaced.
    pub fn with_volatility(&self, volatility: f64) -> Result<Self, PricingError> {
        Ok(Self {
            underlying: self.underlying.with_volatility(volatility)?,
            ..*self
        })
    }

    /// Underlying asset.
    #[inline]
    pub fn underlying(&self) -> &Underlying {
        &self.underlying
    }

    /// Risk-free rate `r`.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Repo/dividend rate `q`.
    #[inline]
    pub fn repo_rate(&self) -> f64 {
        self.repo_rate
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

    fn underlying() -> Underlying {
        Underlying::new(100.0, 0.2).unwrap()
    }

    #[test]
    fn test_accessors() {
        let option =
            VanillaOption::new(underlying(), 0.05, 0.02, 0.5, 110.0, OptionType::Put).unwrap();
        assert_eq!(option.underlying().spot(), 100.0);
        assert_eq!(option.rate(), 0.05);
        assert_eq!(option.repo_rate(), 0.02);
        assert_eq!(option.maturity(), 0.5);
        assert_eq!(option.strike(), 110.0);
        assert_eq!(option.option_type(), OptionType::Put);
    }

    #[test]
    fn test_negative_rates_allowed() {
        assert!(VanillaOption::new(underlying(), -0.01, -0.02, 1.0, 100.0, OptionType::Call).is_ok());
    }

    #[test]
    fn test_rejects_bad_strike_and_maturity() {
        assert!(matches!(
            VanillaOption::new(underlying(), 0.05, 0.0, 1.0, 0.0, OptionType::Call),
            Err(PricingError::InvalidParameter { name: "strike", .. })
        ));
        assert!(matches!(
            VanillaOption::new(underlying(), 0.05, 0.0, -1.0, 100.0, OptionType::Call),
            Err(PricingError::InvalidParameter {
                name: "maturity",
                ..
            })
        ));
        assert!(matches!(
            VanillaOption::new(underlying(), f64::NAN, 0.0, 1.0, 100.0, OptionType::Call),
            Err(PricingError::InvalidParameter { name: "rate", .. })
        ));
    }

    #[test]
    fn test_with_volatility_keeps_contract_terms() {
        let option =
            VanillaOption::new(underlying(), 0.05, 0.0, 1.0, 100.0, OptionType::Call).unwrap();
        let bumped = option.with_volatility(0.35).unwrap();
        assert_eq!(bumped.underlying().volatility(), 0.35);
        assert_eq!(bumped.strike(), option.strike());
        assert_eq!(bumped.maturity(), option.maturity());
    }
}
