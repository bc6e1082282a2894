//! Root-finding solvers for numerical computation.
//!
//! ## Available Solvers
//!
//! - [`NewtonRaphsonSolver`]: Fast quadratic convergence using derivatives
//!
//! ## Configuration
//!
//! Solvers use [`SolverConfig`] for configuring:
//! - `tolerance`: Convergence tolerance (default: 1e-10)
//! - `max_iterations`: Maximum iteration count (default: 100)
//! - `stopping_rule`: Residual or step-size test (default: residual)
//!
//! ## Examples
//!
//! ```
//! use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig, StoppingRule};
//!
//! // Solve x² - 2 = 0 (find √2), stopping on step size
//! let config = SolverConfig::new(1e-12, 50).with_stopping_rule(StoppingRule::StepSize);
//! let solver = NewtonRaphsonSolver::new(config);
//!
//! let root = solver.find_root(|x: f64| x * x - 2.0, |x: f64| 2.0 * x, 1.0).unwrap();
//! assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
//! ```

mod config;
mod newton_raphson;

pub use config::{SolverConfig, StoppingRule};
pub use newton_raphson::{NewtonOutcome, NewtonRaphsonSolver};
