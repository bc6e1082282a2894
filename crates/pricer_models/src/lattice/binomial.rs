//! Cox-Ross-Rubinstein binomial tree for vanilla options.
//!
//! Up/down factors `u = e^(σ√Δt)`, `d = 1/u` and risk-neutral probability
//! `p = (e^((r-q)Δt) - d) / (u - d)`. Values are rolled back from the
//! payoff at expiry; for American exercise each node takes the larger of
//! its continuation and exercise value.

use pricer_core::types::PricingError;

use crate::analytical::ensure_finite;
use crate::instruments::{ExerciseStyle, VanillaOption};

/// Binomial lattice pricer.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{ExerciseStyle, OptionType, Underlying, VanillaOption};
/// use pricer_models::lattice::BinomialTree;
///
/// let underlying = Underlying::new(100.0, 0.2).unwrap();
/// let put = VanillaOption::new(underlying, 0.05, 0.0, 1.0, 100.0, OptionType::Put).unwrap();
///
/// let tree = BinomialTree::new(500).unwrap();
/// let american = tree.price(&put, ExerciseStyle::American).unwrap();
/// let european = tree.price(&put, ExerciseStyle::European).unwrap();
/// assert!(american > european);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinomialTree {
    steps: usize,
}

impl Default for BinomialTree {
    fn default() -> Self {
        Self {
            steps: Self::DEFAULT_STEPS,
        }
    }
}

impl BinomialTree {
    /// Number of time steps used by [`BinomialTree::default`].
    pub const DEFAULT_STEPS: usize = 500;

    /// Largest accepted step count; rollback work grows with `steps²`.
    pub const MAX_STEPS: usize = 100_000;

    /// Tree with `steps` time steps.
    ///
    /// # Errors
    /// `InvalidParameter` if `steps == 0` or `steps > MAX_STEPS`.
    pub fn new(steps: usize) -> Result<Self, PricingError> {
        if steps == 0 {
            return Err(PricingError::invalid("steps", "binomial steps must be > 0"));
        }
        if steps > Self::MAX_STEPS {
            return Err(PricingError::invalid(
                "steps",
                format!("binomial steps must be <= {}, got {}", Self::MAX_STEPS, steps),
            ));
        }
        Ok(Self { steps })
    }

    /// Number of time steps.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Prices `option` with the given exercise rights.
    ///
    /// # Errors
    /// - `DegenerateComputation` for zero volatility or zero maturity
    /// - `DegenerateComputation` when the step is too coarse for the
    ///   carry, making `p` fall outside `[0, 1]`
    /// - `DegenerateComputation` when node spots overflow `f64`
    pub fn price(&self, option: &VanillaOption, style: ExerciseStyle) -> Result<f64, PricingError> {
        let maturity = option.maturity();
        let vol = option.underlying().volatility();
        if maturity <= 0.0 {
            return Err(PricingError::degenerate(
                "no time remaining to expiry for the binomial tree",
            ));
        }
        if vol <= 0.0 {
            return Err(PricingError::degenerate("zero volatility in binomial tree"));
        }

        let n = self.steps;
        let dt = maturity / n as f64;
        let log_u = vol * dt.sqrt();
        let u = log_u.exp();
        let d = 1.0 / u;
        let growth = ((option.rate() - option.repo_rate()) * dt).exp();
        let p = (growth - d) / (u - d);
        if !p.is_finite() || !(0.0..=1.0).contains(&p) {
            return Err(PricingError::degenerate(format!(
                "risk-neutral probability {} is outside [0, 1]; increase the step count",
                p
            )));
        }

        let discount = (-option.rate() * dt).exp();
        let disc_up = discount * p;
        let disc_down = discount * (1.0 - p);
        let strike = option.strike();
        let option_type = option.option_type();
        let spot = option.underlying().spot();

        // Node j at step i sits at S·e^((2j - i)·σ√Δt). Each spot is computed
        // directly so an underflowed low node cannot zero the ones above it.
        let node_spot = |i: usize, j: usize| spot * ((2.0 * j as f64 - i as f64) * log_u).exp();

        let mut values: Vec<f64> = (0..=n)
            .map(|j| option_type.intrinsic(node_spot(n, j), strike))
            .collect();

        let american = style.is_american();
        for i in (0..n).rev() {
            for j in 0..=i {
                let continuation = disc_up * values[j + 1] + disc_down * values[j];
                values[j] = if american {
                    continuation.max(option_type.intrinsic(node_spot(i, j), strike))
                } else {
                    continuation
                };
            }
        }

        let price = ensure_finite(values[0], "binomial price")?;
        tracing::debug!(
            steps = n,
            exercise = %style,
            price,
            "binomial tree rolled back"
        );
        Ok(price)
    }
}
