//! Discretely monitored average-price option.

use pricer_core::types::PricingError;

use super::params::{finite, non_negative, positive, Underlying};
use super::OptionType;

/// Average-price option observed at `n` equally spaced dates
/// `T/n, 2T/n, ..., T`. The initial price is not part of the average.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{AsianOption, OptionType, Underlying};
///
/// let underlying = Underlying::new(100.0, 0.3).unwrap();
/// let option = AsianOption::new(underlying, 0.05, 3.0, 100.0, 50, OptionType::Put).unwrap();
/// assert_eq!(option.n_observations(), 50);
///
/// assert!(AsianOption::new(underlying, 0.05, 3.0, 100.0, 0, OptionType::Put).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AsianOption {
    underlying: Underlying,
    rate: f64,
    maturity: f64,
    strike: f64,
    n_observations: usize,
    option_type: OptionType,
}

impl AsianOption {
    /// Creates a validated Asian option.
    ///
    /// # Errors
    /// `InvalidParameter` for a non-finite rate, negative maturity,
    /// non-positive strike, or zero observations.
    pub fn new(
        underlying: Underlying,
        rate: f64,
        maturity: f64,
        strike: f64,
        n_observations: usize,
        option_type: OptionType,
    ) -> Result<Self, PricingError> {
        if n_observations == 0 {
            return Err(PricingError::invalid(
                "n_observations",
                "at least one observation is required",
            ));
        }
        Ok(Self {
            underlying,
            rate: finite("rate", rate)?,
            maturity: non_negative("maturity", maturity)?,
            strike: positive("strike", strike)?,
            n_observations,
            option_type,
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

    /// Number of averaging dates `n`.
    #[inline]
    pub fn n_observations(&self) -> usize {
        self.n_observations
    }

    /// Call or put.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }
}
