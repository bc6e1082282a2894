//! Implied volatility by Newton-Raphson inversion of Black-Scholes.
//!
//! Starting point `σ₀ = √(2·|ln(S/K) + (r − q)τ| / τ)`, the inflection point
//! of the price as a function of volatility, floored at a small positive
//! value for at-the-money-forward quotes where the formula gives zero.
//! Iteration stops once the Newton step `|C(σ) − V| / vega(σ)` drops below
//! the tolerance.

use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig, StoppingRule};
use pricer_core::types::PricingError;

use super::black_scholes::{remaining_life, BlackScholes};
use crate::instruments::{OptionType, VanillaOption};

/// Default Newton step tolerance.
pub const DEFAULT_TOLERANCE: f64 = 1e-8;

/// Default iteration cap.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Default lower bound on the starting volatility.
pub const DEFAULT_INITIAL_FLOOR: f64 = 0.05;

/// Newton-Raphson implied volatility solver.
///
/// # Examples
/// ```
/// use pricer_models::analytical::{european_price, ImpliedVolatilitySolver};
/// use pricer_models::instruments::{OptionType, Underlying, VanillaOption};
///
/// let underlying = Underlying::new(100.0, 0.25).unwrap();
/// let option = VanillaOption::new(underlying, 0.05, 0.01, 2.0, 110.0, OptionType::Call).unwrap();
/// let premium = european_price(&option, 0.0).unwrap();
///
/// let solver = ImpliedVolatilitySolver::default();
/// let sigma = solver.solve(&option, premium).unwrap();
/// assert!((sigma - 0.25).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct ImpliedVolatilitySolver {
    solver: NewtonRaphsonSolver<f64>,
    initial_floor: f64,
    valuation_time: f64,
}

impl Default for ImpliedVolatilitySolver {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE, DEFAULT_MAX_ITERATIONS)
    }
}

impl ImpliedVolatilitySolver {
    /// Solver with the given step tolerance and iteration cap.
    ///
    /// # Panics
    /// Panics if `tolerance <= 0` or `max_iterations == 0`.
    pub fn new(tolerance: f64, max_iterations: usize) -> Self {
        let config = SolverConfig::new(tolerance, max_iterations)
            .with_stopping_rule(StoppingRule::StepSize);
        Self {
            solver: NewtonRaphsonSolver::new(config),
            initial_floor: DEFAULT_INITIAL_FLOOR,
            valuation_time: 0.0,
        }
    }

    /// Lower bound applied to the starting volatility.
    pub fn with_initial_floor(mut self, floor: f64) -> Self {
        self.initial_floor = floor;
        self
    }

    /// Value the option at time `t` instead of today.
    pub fn with_valuation_time(mut self, valuation_time: f64) -> Self {
        self.valuation_time = valuation_time;
        self
    }

    /// Newton configuration in use.
    pub fn config(&self) -> &SolverConfig<f64> {
        self.solver.config()
    }

    /// Starting volatility for remaining life `tau`.
    pub fn initial_guess(&self, option: &VanillaOption, tau: f64) -> f64 {
        let moneyness = (option.underlying().spot() / option.strike()).ln()
            + (option.rate() - option.repo_rate()) * tau;
        let guess = (2.0 * moneyness.abs() / tau).sqrt();
        if guess.is_finite() {
            guess.max(self.initial_floor)
        } else {
            self.initial_floor
        }
    }

    /// Volatility at which the Black-Scholes price of `option` equals
    /// `premium`. The option's own volatility is ignored.
    ///
    /// # Errors
    /// - `InvalidParameter` if `premium` is not finite or violates the
    ///   no-arbitrage bounds, or the valuation time is invalid
    /// - `DegenerateComputation` if no time remains, vega vanishes, or an
    ///   iterate becomes non-finite
    /// - `NonConvergent` if the iteration cap is reached
    pub fn solve(&self, option: &VanillaOption, premium: f64) -> Result<f64, PricingError> {
        let tau = remaining_life(option.maturity(), self.valuation_time)?;
        if tau.is_nan() || tau <= 0.0 {
            return Err(PricingError::degenerate(format!(
                "no time remaining to expiry (tau = {})",
                tau
            )));
        }
        check_premium_bounds(option, premium, tau)?;

        let model = BlackScholes::from_option(option);
        let strike = option.strike();
        let option_type = option.option_type();

        let objective = |sigma: f64| {
            model
                .at_volatility(sigma)
                .price(strike, tau, option_type)
                .map_or(f64::NAN, |price| price - premium)
        };
        let vega = |sigma: f64| {
            model
                .at_volatility(sigma)
                .vega(strike, tau)
                .unwrap_or(f64::NAN)
        };

        let sigma0 = self.initial_guess(option, tau);
        let outcome = self.solver.solve(objective, vega, sigma0)?;

        if outcome.root <= 0.0 {
            return Err(PricingError::degenerate(format!(
                "Newton iteration converged to non-positive volatility {}",
                outcome.root
            )));
        }

        tracing::debug!(
            premium,
            sigma0,
            implied_volatility = outcome.root,
            iterations = outcome.iterations,
            "implied volatility solved"
        );
        Ok(outcome.root)
    }
}

/// Premium must lie strictly inside the model-free bounds, otherwise no
/// positive volatility reproduces it.
fn check_premium_bounds(option: &VanillaOption, premium: f64, tau: f64) -> Result<(), PricingError> {
    if !premium.is_finite() {
        return Err(PricingError::invalid(
            "premium",
            format!("must be finite, got {}", premium),
        ));
    }

    let discounted_spot = option.underlying().spot() * (-option.repo_rate() * tau).exp();
    let discounted_strike = option.strike() * (-option.rate() * tau).exp();
    let (lower, upper) = match option.option_type() {
        OptionType::Call => ((discounted_spot - discounted_strike).max(0.0), discounted_spot),
        OptionType::Put => ((discounted_strike - discounted_spot).max(0.0), discounted_strike),
    };

    if premium <= lower || premium >= upper {
        return Err(PricingError::invalid(
            "premium",
            format!(
                "{} lies outside the no-arbitrage range ({:.6}, {:.6})",
                premium, lower, upper
            ),
        ));
    }
    Ok(())
}

/// Implied volatility of `option` at `premium` with default settings.
///
/// # Examples
/// ```
/// use pricer_models::analytical::implied_volatility;
/// use pricer_models::instruments::{OptionType, Underlying, VanillaOption};
///
/// let underlying = Underlying::new(100.0, 0.0).unwrap();
/// let call = VanillaOption::new(underlying, 0.05, 0.0, 1.0, 100.0, OptionType::Call).unwrap();
/// let sigma = implied_volatility(&call, 10.450584).unwrap();
/// assert!((sigma - 0.2).abs() < 1e-4);
/// ```
pub fn implied_volatility(option: &VanillaOption, premium: f64) -> Result<f64, PricingError> {
    ImpliedVolatilitySolver::default().solve(option, premium)
}
