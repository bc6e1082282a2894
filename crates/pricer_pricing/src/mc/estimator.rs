//! Point estimates and confidence intervals from payoff samples.
//!
//! # Plain estimator
//!
//! ```text
//! mean = (1/m) Σ X_i
//! std  = sqrt((1/m) Σ (X_i - mean)²)
//! CI   = mean ± 1.96 · std / √m
//! ```
//!
//! # Control-variate estimator
//!
//! With `A_i` the arithmetic payoffs, `G_i` the geometric payoffs and `g`
//! the closed-form geometric price:
//!
//! ```text
//! θ   = Cov(A, G) / Var(G)
//! Z_i = A_i + θ · (g - G_i)
//! ```
//!
//! and the plain estimator is applied to `Z`. Population moments are used
//! throughout.

use pricer_core::types::PricingError;

use super::payoff::PayoffSample;

/// Two-sided 95% standard-normal quantile.
pub const Z_95: f64 = 1.96;

/// Symmetric confidence interval around a Monte Carlo estimate.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfidenceInterval {
    /// Lower bound.
    pub lower: f64,
    /// Upper bound.
    pub upper: f64,
}

impl ConfidenceInterval {
    /// Distance between the bounds.
    #[inline]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Returns `true` if `value` lies within the closed interval.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

/// Which estimator produced a result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EstimatorKind {
    /// Sample mean of the arithmetic payoffs.
    Plain,
    /// Arithmetic payoffs corrected by the geometric control variate.
    ControlVariate,
}

impl std::fmt::Display for EstimatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EstimatorKind::Plain => write!(f, "plain"),
            EstimatorKind::ControlVariate => write!(f, "control variate"),
        }
    }
}

/// Output of an estimator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Estimate {
    /// Point estimate.
    pub mean: f64,
    /// Population standard deviation of the per-trial values.
    pub std_dev: f64,
    /// 95% confidence interval of the mean.
    pub interval: ConfidenceInterval,
    /// Control-variate coefficient, when one was applied.
    pub theta: Option<f64>,
}

#[inline]
fn mean_of<I: Iterator<Item = f64>>(values: I, count: f64) -> f64 {
    values.sum::<f64>() / count
}

fn finish(mean: f64, variance: f64, count: usize, theta: Option<f64>) -> Estimate {
    let std_dev = variance.max(0.0).sqrt();
    let half_width = Z_95 * std_dev / (count as f64).sqrt();
    Estimate {
        mean,
        std_dev,
        interval: ConfidenceInterval {
            lower: mean - half_width,
            upper: mean + half_width,
        },
        theta,
    }
}

/// Plain sample-mean estimate of `values`.
///
/// # Errors
///
/// `DegenerateComputation` if `values` is empty or the estimate is not
/// finite.
pub fn plain_estimate(values: &[f64]) -> Result<Estimate, PricingError> {
    if values.is_empty() {
        return Err(PricingError::degenerate("no Monte Carlo samples"));
    }
    let m = values.len() as f64;
    let mean = mean_of(values.iter().copied(), m);
    let variance = mean_of(values.iter().map(|x| (x - mean) * (x - mean)), m);

    if !mean.is_finite() || !variance.is_finite() {
        return Err(PricingError::degenerate(
            "Monte Carlo estimate is not finite",
        ));
    }
    Ok(finish(mean, variance, values.len(), None))
}

/// Plain estimate of the arithmetic payoffs of `samples`.
pub fn arithmetic_estimate(samples: &[PayoffSample]) -> Result<Estimate, PricingError> {
    let values: Vec<f64> = samples.iter().map(|s| s.arithmetic).collect();
    plain_estimate(&values)
}

/// Plain estimate of the geometric payoffs of `samples`.
pub fn geometric_estimate(samples: &[PayoffSample]) -> Result<Estimate, PricingError> {
    let values: Vec<f64> = samples.iter().map(|s| s.geometric).collect();
    plain_estimate(&values)
}

/// Control-variate estimate of the arithmetic payoffs, using the
/// geometric payoffs and their closed-form expectation `geometric_price`.
///
/// # Errors
///
/// - `ZeroControlVariateVariance` if the geometric payoffs have no spread
///   (variance within `ε·mean²` of zero)
/// - `DegenerateComputation` if `samples` is empty or a moment is not
///   finite
pub fn control_variate_estimate(
    samples: &[PayoffSample],
    geometric_price: f64,
) -> Result<Estimate, PricingError> {
    if samples.is_empty() {
        return Err(PricingError::degenerate("no Monte Carlo samples"));
    }
    let m = samples.len() as f64;

    let mean_arith = mean_of(samples.iter().map(|s| s.arithmetic), m);
    let mean_geo = mean_of(samples.iter().map(|s| s.geometric), m);
    let covariance = mean_of(
        samples
            .iter()
            .map(|s| (s.arithmetic - mean_arith) * (s.geometric - mean_geo)),
        m,
    );
    let variance_geo = mean_of(
        samples
            .iter()
            .map(|s| (s.geometric - mean_geo) * (s.geometric - mean_geo)),
        m,
    );

    if !covariance.is_finite() || !variance_geo.is_finite() {
        return Err(PricingError::degenerate(
            "control-variate moments are not finite",
        ));
    }
    if variance_geo <= f64::EPSILON * mean_geo * mean_geo {
        return Err(PricingError::ZeroControlVariateVariance);
    }

    let theta = covariance / variance_geo;
    let corrected: Vec<f64> = samples
        .iter()
        .map(|s| s.arithmetic + theta * (geometric_price - s.geometric))
        .collect();

    let mut estimate = plain_estimate(&corrected)?;
    estimate.theta = Some(theta);
    Ok(estimate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn samples(pairs: &[(f64, f64)]) -> Vec<PayoffSample> {
        pairs
            .iter()
            .map(|&(arithmetic, geometric)| PayoffSample {
                arithmetic,
                geometric,
            })
            .collect()
    }

    #[test]
    fn test_plain_estimate_moments() {
        let estimate = plain_estimate(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_relative_eq!(estimate.mean, 2.5, epsilon = 1e-12);
        assert_relative_eq!(estimate.std_dev, 1.25_f64.sqrt(), epsilon = 1e-12);
        let half = 1.96 * 1.25_f64.sqrt() / 2.0;
        assert_relative_eq!(estimate.interval.lower, 2.5 - half, epsilon = 1e-12);
        assert_relative_eq!(estimate.interval.upper, 2.5 + half, epsilon = 1e-12);
        assert!(estimate.theta.is_none());
    }

    #[test]
    fn test_single_sample_zero_width() {
        let estimate = plain_estimate(&[7.25]).unwrap();
        assert_eq!(estimate.mean, 7.25);
        assert_eq!(estimate.std_dev, 0.0);
        assert_eq!(estimate.interval.width(), 0.0);
    }

    #[test]
    fn test_empty_rejected() {
        assert!(plain_estimate(&[]).is_err());
        assert!(control_variate_estimate(&[], 1.0).is_err());
    }

    #[test]
    fn test_perfectly_correlated_control() {
        // A = 2G + 1 exactly, so the corrected values are constant.
        let data = samples(&[(1.0, 0.0), (3.0, 1.0), (5.0, 2.0), (9.0, 4.0)]);
        let estimate = control_variate_estimate(&data, 1.5).unwrap();

        assert_relative_eq!(estimate.theta.unwrap(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(estimate.mean, 4.0, epsilon = 1e-12);
        assert!(estimate.std_dev < 1e-12);
    }

    #[test]
    fn test_control_variate_not_wider_than_plain() {
        let data = samples(&[
            (12.0, 10.5),
            (0.0, 0.0),
            (3.5, 2.9),
            (25.0, 22.0),
            (7.0, 6.2),
            (0.4, 0.0),
        ]);
        let plain = arithmetic_estimate(&data).unwrap();
        let cv = control_variate_estimate(&data, 6.5).unwrap();
        assert!(cv.interval.width() <= plain.interval.width());
    }

    #[test]
    fn test_zero_variance_control() {
        let data = samples(&[(1.0, 0.0), (0.0, 0.0), (2.0, 0.0)]);
        assert_eq!(
            control_variate_estimate(&data, 0.0),
            Err(PricingError::ZeroControlVariateVariance)
        );

        let data = samples(&[(1.0, 3.0), (2.0, 3.0)]);
        assert_eq!(
            control_variate_estimate(&data, 3.0),
            Err(PricingError::ZeroControlVariateVariance)
        );
    }

    #[test]
    fn test_interval_helpers() {
        let interval = ConfidenceInterval {
            lower: 1.0,
            upper: 3.0,
        };
        assert_eq!(interval.width(), 2.0);
        assert!(interval.contains(1.0));
        assert!(!interval.contains(3.5));
    }

    #[test]
    fn test_estimator_kind_display() {
        assert_eq!(EstimatorKind::Plain.to_string(), "plain");
        assert_eq!(EstimatorKind::ControlVariate.to_string(), "control variate");
    }
}
