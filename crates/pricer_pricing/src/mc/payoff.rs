//! Discounted payoffs of a single simulated path.
//!
//! Every trial yields one [`PayoffSample`]: the option payoff on the
//! arithmetic mean of the observed prices and, as control variate, the
//! payoff on their geometric mean. Both use the same discount factor.

use pricer_models::instruments::OptionType;

/// Discounted arithmetic- and geometric-mean payoffs of one trial.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PayoffSample {
    /// Discounted payoff on the arithmetic mean.
    pub arithmetic: f64,
    /// Discounted payoff on the geometric mean.
    pub geometric: f64,
}

/// Strike, option type and discount factor shared by every trial of a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PayoffParams {
    /// Strike price.
    pub strike: f64,
    /// Call or put.
    pub option_type: OptionType,
    /// `exp(-rT)`.
    pub discount: f64,
}

impl PayoffParams {
    /// Creates payoff parameters discounting over `maturity` at `rate`.
    #[inline]
    pub fn new(strike: f64, option_type: OptionType, rate: f64, maturity: f64) -> Self {
        Self {
            strike,
            option_type,
            discount: (-rate * maturity).exp(),
        }
    }

    /// Evaluates both payoffs over the observed `prices`.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `prices` is empty.
    #[inline]
    pub fn evaluate(&self, prices: &[f64]) -> PayoffSample {
        debug_assert!(!prices.is_empty());
        let n = prices.len() as f64;

        let mut sum = 0.0;
        let mut log_sum = 0.0;
        for &price in prices {
            sum += price;
            log_sum += price.ln();
        }

        let arithmetic_mean = sum / n;
        let geometric_mean = (log_sum / n).exp();

        PayoffSample {
            arithmetic: self.discount * self.option_type.intrinsic(arithmetic_mean, self.strike),
            geometric: self.discount * self.option_type.intrinsic(geometric_mean, self.strike),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_call_and_put_payoffs() {
        let call = PayoffParams::new(100.0, OptionType::Call, 0.0, 1.0);
        let sample = call.evaluate(&[100.0, 121.0]);
        assert_relative_eq!(sample.arithmetic, 10.5, epsilon = 1e-12);
        assert_relative_eq!(sample.geometric, 10.0, epsilon = 1e-12);

        let put = PayoffParams::new(100.0, OptionType::Put, 0.0, 1.0);
        let sample = put.evaluate(&[100.0, 121.0]);
        assert_eq!(sample.arithmetic, 0.0);
        assert_eq!(sample.geometric, 0.0);

        let sample = put.evaluate(&[64.0, 100.0]);
        assert_relative_eq!(sample.arithmetic, 18.0, epsilon = 1e-12);
        assert_relative_eq!(sample.geometric, 20.0, epsilon = 1e-12);
    }

    #[test]
    fn test_discount_applied_to_both() {
        let params = PayoffParams::new(100.0, OptionType::Call, 0.05, 3.0);
        let sample = params.evaluate(&[120.0]);
        let df = (-0.15_f64).exp();
        assert_relative_eq!(sample.arithmetic, 20.0 * df, epsilon = 1e-12);
        assert_relative_eq!(sample.geometric, 20.0 * df, epsilon = 1e-12);
    }

    #[test]
    fn test_geometric_never_exceeds_arithmetic_for_calls() {
        let params = PayoffParams::new(90.0, OptionType::Call, 0.05, 1.0);
        let sample = params.evaluate(&[80.0, 95.0, 130.0, 101.0]);
        assert!(sample.geometric <= sample.arithmetic);
    }

    #[test]
    fn test_single_observation_means_coincide() {
        let params = PayoffParams::new(100.0, OptionType::Put, 0.05, 1.0);
        let sample = params.evaluate(&[87.5]);
        assert_relative_eq!(sample.arithmetic, sample.geometric, epsilon = 1e-12);
    }
}
