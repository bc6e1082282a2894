//! Black-Scholes pricing for European options with a continuous repo rate.
//!
//! ## Mathematical Formulas
//!
//! With remaining life τ = T - t:
//!
//! **Call Price**: C = S·e^(-qτ)·N(d₁) - K·e^(-rτ)·N(d₂)
//! **Put Price**: P = K·e^(-rτ)·N(-d₂) - S·e^(-qτ)·N(-d₁)
//! **Vega**: S·e^(-qτ)·√τ·φ(d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r - q)τ) / (σ√τ) + σ√τ / 2
//! - d₂ = d₁ - σ√τ

use pricer_core::types::PricingError;

use super::distributions::{norm_cdf, norm_pdf};
use super::ensure_finite;
use crate::instruments::{OptionType, VanillaOption};

/// Black-Scholes model for European option pricing.
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0, 0.05, 0.0, 0.2).unwrap();
/// let call = bs.price_call(100.0, 1.0).unwrap();
/// let put = bs.price_put(100.0, 1.0).unwrap();
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call - put - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholes {
    spot: f64,
    rate: f64,
    repo_rate: f64,
    volatility: f64,
}

impl BlackScholes {
    /// Creates a new Black-Scholes model.
    ///
    /// # Arguments
    /// * `spot` - Current spot price (must be positive)
    /// * `rate` - Risk-free interest rate (annualised)
    /// * `repo_rate` - Continuous repo/dividend rate (annualised)
    /// * `volatility` - Volatility (must be non-negative)
    ///
    /// # Errors
    /// `InvalidParameter` if spot <= 0, volatility < 0, or any input is not
    /// finite. Zero volatility is accepted here and reported as degenerate
    /// when pricing.
    pub fn new(spot: f64, rate: f64, repo_rate: f64, volatility: f64) -> Result<Self, PricingError> {
        let underlying = crate::instruments::Underlying::new(spot, volatility)?;
        if !rate.is_finite() {
            return Err(PricingError::invalid("rate", format!("must be finite, got {}", rate)));
        }
        if !repo_rate.is_finite() {
            return Err(PricingError::invalid(
                "repo_rate",
                format!("must be finite, got {}", repo_rate),
            ));
        }
        Ok(Self {
            spot: underlying.spot(),
            rate,
            repo_rate,
            volatility: underlying.volatility(),
        })
    }

    /// Model parameters of a validated vanilla option.
    pub fn from_option(option: &VanillaOption) -> Self {
        Self {
            spot: option.underlying().spot(),
            rate: option.rate(),
            repo_rate: option.repo_rate(),
            volatility: option.underlying().volatility(),
        }
    }

    /// Same model with volatility `sigma`, skipping validation. Used by
    /// iterative solvers whose trial points may leave the admissible range.
    pub(crate) fn at_volatility(&self, sigma: f64) -> Self {
        Self {
            volatility: sigma,
            ..*self
        }
    }

    /// Spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Repo/dividend rate.
    #[inline]
    pub fn repo_rate(&self) -> f64 {
        self.repo_rate
    }

    /// Volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    fn check_regular(&self, tau: f64) -> Result<(), PricingError> {
        if tau.is_nan() || tau <= 0.0 {
            return Err(PricingError::degenerate(format!(
                "no time remaining to expiry (tau = {})",
                tau
            )));
        }
        if self.volatility <= 0.0 {
            return Err(PricingError::degenerate(format!(
                "non-positive volatility (sigma = {})",
                self.volatility
            )));
        }
        Ok(())
    }

    /// Computes d₁ for remaining life `tau`.
    ///
    /// # Errors
    /// `DegenerateComputation` when `tau <= 0` or the volatility is zero.
    pub fn d1(&self, strike: f64, tau: f64) -> Result<f64, PricingError> {
        self.check_regular(tau)?;
        let vol_sqrt_tau = self.volatility * tau.sqrt();
        let d1 = ((self.spot / strike).ln() + (self.rate - self.repo_rate) * tau) / vol_sqrt_tau
            + 0.5 * vol_sqrt_tau;
        ensure_finite(d1, "d1")
    }

    /// Computes d₂ = d₁ - σ√τ.
    pub fn d2(&self, strike: f64, tau: f64) -> Result<f64, PricingError> {
        Ok(self.d1(strike, tau)? - self.volatility * tau.sqrt())
    }

    /// Prices a European option with strike `strike` and remaining life `tau`.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    /// use pricer_models::instruments::OptionType;
    ///
    /// let bs = BlackScholes::new(100.0, 0.05, 0.0, 0.2).unwrap();
    /// let call = bs.price(100.0, 1.0, OptionType::Call).unwrap();
    /// assert!((call - 10.4506).abs() < 1e-3);
    ///
    /// assert!(bs.price(100.0, 0.0, OptionType::Call).is_err());
    /// ```
    pub fn price(&self, strike: f64, tau: f64, option_type: OptionType) -> Result<f64, PricingError> {
        let d1 = self.d1(strike, tau)?;
        let d2 = d1 - self.volatility * tau.sqrt();
        let forward_leg = self.spot * (-self.repo_rate * tau).exp();
        let strike_leg = strike * (-self.rate * tau).exp();

        let price = match option_type {
            OptionType::Call => forward_leg * norm_cdf(d1) - strike_leg * norm_cdf(d2),
            OptionType::Put => strike_leg * norm_cdf(-d2) - forward_leg * norm_cdf(-d1),
        };
        ensure_finite(price, "Black-Scholes price")
    }

    /// Call price; see [`price`](Self::price).
    pub fn price_call(&self, strike: f64, tau: f64) -> Result<f64, PricingError> {
        self.price(strike, tau, OptionType::Call)
    }

    /// Put price; see [`price`](Self::price).
    pub fn price_put(&self, strike: f64, tau: f64) -> Result<f64, PricingError> {
        self.price(strike, tau, OptionType::Put)
    }

    /// Vega: S·e^(-qτ)·√τ·φ(d₁), identical for calls and puts.
    pub fn vega(&self, strike: f64, tau: f64) -> Result<f64, PricingError> {
        let d1 = self.d1(strike, tau)?;
        let vega = self.spot * (-self.repo_rate * tau).exp() * tau.sqrt() * norm_pdf(d1);
        ensure_finite(vega, "vega")
    }
}

/// Remaining life `T - t` of `option` at valuation time `t`.
pub(crate) fn remaining_life(maturity: f64, valuation_time: f64) -> Result<f64, PricingError> {
    if !valuation_time.is_finite() || valuation_time < 0.0 {
        return Err(PricingError::invalid(
            "valuation_time",
            format!("must be finite and non-negative, got {}", valuation_time),
        ));
    }
    Ok(maturity - valuation_time)
}

/// Black-Scholes price of a vanilla option at valuation time `t`.
///
/// The option's exercise style is ignored; the price is the European one.
///
/// # Examples
/// ```
/// use pricer_models::analytical::european_price;
/// use pricer_models::instruments::{OptionType, Underlying, VanillaOption};
///
/// let underlying = Underlying::new(100.0, 0.2).unwrap();
/// let put = VanillaOption::new(underlying, 0.05, 0.0, 1.0, 100.0, OptionType::Put).unwrap();
/// let price = european_price(&put, 0.0).unwrap();
/// assert!((price - 5.5735).abs() < 1e-3);
/// ```
pub fn european_price(option: &VanillaOption, valuation_time: f64) -> Result<f64, PricingError> {
    let tau = remaining_life(option.maturity(), valuation_time)?;
    BlackScholes::from_option(option).price(option.strike(), tau, option.option_type())
}

/// Black-Scholes vega of a vanilla option at valuation time `t`.
pub fn european_vega(option: &VanillaOption, valuation_time: f64) -> Result<f64, PricingError> {
    let tau = remaining_life(option.maturity(), valuation_time)?;
    BlackScholes::from_option(option).vega(option.strike(), tau)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruments::Underlying;
    use approx::assert_relative_eq;

    fn standard() -> BlackScholes {
        BlackScholes::new(100.0, 0.05, 0.0, 0.2).unwrap()
    }

    // ==========================================================
    // Construction
    // ==========================================================

    #[test]
    fn test_new_invalid_inputs() {
        assert!(matches!(
            BlackScholes::new(-100.0, 0.05, 0.0, 0.2),
            Err(PricingError::InvalidParameter { name: "spot", .. })
        ));
        assert!(matches!(
            BlackScholes::new(100.0, 0.05, 0.0, -0.2),
            Err(PricingError::InvalidParameter {
                name: "volatility",
                ..
            })
        ));
        assert!(matches!(
            BlackScholes::new(100.0, f64::NAN, 0.0, 0.2),
            Err(PricingError::InvalidParameter { name: "rate", .. })
        ));
        assert!(matches!(
            BlackScholes::new(100.0, 0.05, f64::INFINITY, 0.2),
            Err(PricingError::InvalidParameter {
                name: "repo_rate",
                ..
            })
        ));
    }

    // ==========================================================
    // d1 / d2
    // ==========================================================

    #[test]
    fn test_d1_atm() {
        // d1 = (0 + 0.05) / 0.2 + 0.1 = 0.35
        assert_relative_eq!(standard().d1(100.0, 1.0).unwrap(), 0.35, epsilon = 1e-12);
    }

    #[test]
    fn test_d1_d2_relationship() {
        let bs = standard();
        let d1 = bs.d1(110.0, 0.5).unwrap();
        let d2 = bs.d2(110.0, 0.5).unwrap();
        assert_relative_eq!(d1 - d2, 0.2 * 0.5_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_repo_rate_lowers_d1() {
        let with_repo = BlackScholes::new(100.0, 0.05, 0.03, 0.2).unwrap();
        assert!(with_repo.d1(100.0, 1.0).unwrap() < standard().d1(100.0, 1.0).unwrap());
    }

    // ==========================================================
    // Prices
    // ==========================================================

    #[test]
    fn test_reference_values() {
        let bs = standard();
        assert_relative_eq!(bs.price_call(100.0, 1.0).unwrap(), 10.450584, epsilon = 1e-4);
        assert_relative_eq!(bs.price_put(100.0, 1.0).unwrap(), 5.573526, epsilon = 1e-4);

        let with_repo = BlackScholes::new(100.0, 0.05, 0.02, 0.2).unwrap();
        assert_relative_eq!(
            with_repo.price_call(110.0, 1.0).unwrap(),
            5.188582,
            epsilon = 1e-4
        );
    }

    #[test]
    fn test_put_call_parity_with_repo() {
        let bs = BlackScholes::new(120.0, 0.03, 0.015, 0.35).unwrap();
        for (strike, tau) in [(80.0, 0.25), (120.0, 1.0), (150.0, 4.0)] {
            let call = bs.price_call(strike, tau).unwrap();
            let put = bs.price_put(strike, tau).unwrap();
            let forward = 120.0 * (-0.015 * tau).exp() - strike * (-0.03 * tau).exp();
            assert_relative_eq!(call - put, forward, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_deep_itm_call_approaches_forward() {
        let call = standard().price_call(1.0, 1.0).unwrap();
        assert_relative_eq!(call, 100.0 - (-0.05_f64).exp(), epsilon = 1e-6);
    }

    #[test]
    fn test_deep_otm_prices_are_non_negative() {
        let bs = standard();
        assert!(bs.price_call(1e6, 0.1).unwrap() >= 0.0);
        assert!(bs.price_put(1e-3, 0.1).unwrap() >= 0.0);
    }

    #[test]
    fn test_vega_reference() {
        // S·√τ·φ(0.35)
        assert_relative_eq!(standard().vega(100.0, 1.0).unwrap(), 37.524035, epsilon = 1e-5);
    }

    #[test]
    fn test_vega_matches_finite_difference() {
        let h = 1e-5;
        let up = BlackScholes::new(100.0, 0.05, 0.01, 0.25 + h).unwrap();
        let down = BlackScholes::new(100.0, 0.05, 0.01, 0.25 - h).unwrap();
        let mid = BlackScholes::new(100.0, 0.05, 0.01, 0.25).unwrap();
        let numerical = (up.price_call(95.0, 2.0).unwrap() - down.price_call(95.0, 2.0).unwrap())
            / (2.0 * h);
        assert!((numerical - mid.vega(95.0, 2.0).unwrap()).abs() < 1e-3);
    }

    // ==========================================================
    // Degenerate inputs
    // ==========================================================

    #[test]
    fn test_zero_volatility_is_degenerate() {
        let bs = BlackScholes::new(100.0, 0.05, 0.0, 0.0).unwrap();
        assert!(matches!(
            bs.price_call(100.0, 1.0),
            Err(PricingError::DegenerateComputation(_))
        ));
        assert!(matches!(
            bs.vega(100.0, 1.0),
            Err(PricingError::DegenerateComputation(_))
        ));
    }

    #[test]
    fn test_zero_remaining_life_is_degenerate() {
        assert!(matches!(
            standard().price_put(100.0, 0.0),
            Err(PricingError::DegenerateComputation(_))
        ));
        assert!(matches!(
            standard().price_put(100.0, -0.5),
            Err(PricingError::DegenerateComputation(_))
        ));
    }

    // ==========================================================
    // Option-level helpers
    // ==========================================================

    #[test]
    fn test_valuation_time_shortens_life() {
        let underlying = Underlying::new(100.0, 0.2).unwrap();
        let option =
            VanillaOption::new(underlying, 0.05, 0.0, 1.0, 100.0, OptionType::Call).unwrap();

        // t = 0.25 prices as a 0.75-year option
        let shifted = european_price(&option, 0.25).unwrap();
        assert_relative_eq!(shifted, 8.772268, epsilon = 1e-4);
        assert!(shifted < european_price(&option, 0.0).unwrap());
    }

    #[test]
    fn test_valuation_time_validation() {
        let underlying = Underlying::new(100.0, 0.2).unwrap();
        let option =
            VanillaOption::new(underlying, 0.05, 0.0, 1.0, 100.0, OptionType::Call).unwrap();

        assert!(matches!(
            european_price(&option, -0.1),
            Err(PricingError::InvalidParameter {
                name: "valuation_time",
                ..
            })
        ));
        assert!(matches!(
            european_price(&option, 1.0),
            Err(PricingError::DegenerateComputation(_))
        ));
    }
}
