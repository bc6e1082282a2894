//! Solver configuration types.

use num_traits::Float;

/// Rule deciding when a Newton iteration has converged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoppingRule {
    /// Stop when `|f(x)| < tolerance`.
    #[default]
    Residual,
    /// Stop when the Newton step `|f(x) / f'(x)| < tolerance`.
    ///
    /// The step size is scale-free in `x`, which suits inversions such as
    /// implied volatility where `f` is a price difference.
    StepSize,
}

/// Configuration for root-finding algorithms.
///
/// # Type Parameters
///
/// * `T` - Floating-point type for tolerance (e.g., `f64`)
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::{SolverConfig, StoppingRule};
///
/// let config: SolverConfig<f64> = SolverConfig::default();
/// assert!(config.tolerance < 1e-8);
/// assert_eq!(config.stopping_rule, StoppingRule::Residual);
///
/// let custom = SolverConfig::new(1e-8, 100).with_stopping_rule(StoppingRule::StepSize);
/// assert_eq!(custom.max_iterations, 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig<T: Float> {
    /// Convergence tolerance, interpreted by `stopping_rule`.
    pub tolerance: T,

    /// Maximum number of iterations before giving up.
    ///
    /// If the solver doesn't converge within this limit,
    /// it returns `SolverError::MaxIterationsExceeded`.
    pub max_iterations: usize,

    /// Convergence test applied at each iterate.
    pub stopping_rule: StoppingRule,
}

impl<T: Float> Default for SolverConfig<T> {
    /// Default values:
    /// - `tolerance`: 1e-10
    /// - `max_iterations`: 100
    /// - `stopping_rule`: [`StoppingRule::Residual`]
    fn default() -> Self {
        Self {
            tolerance: T::from(1e-10).unwrap_or_else(T::epsilon),
            max_iterations: 100,
            stopping_rule: StoppingRule::Residual,
        }
    }
}

impl<T: Float> SolverConfig<T> {
    /// Create a new configuration with specified values.
    ///
    /// # Panics
    ///
    /// Panics if `tolerance <= 0` or `max_iterations == 0`.
    pub fn new(tolerance: T, max_iterations: usize) -> Self {
        assert!(tolerance > T::zero(), "tolerance must be positive");
        assert!(max_iterations > 0, "max_iterations must be > 0");
        Self {
            tolerance,
            max_iterations,
            stopping_rule: StoppingRule::Residual,
        }
    }

    /// Replace the stopping rule.
    pub fn with_stopping_rule(mut self, rule: StoppingRule) -> Self {
        self.stopping_rule = rule;
        self
    }
}
