//! Integration tests for module exports.
//!
//! Verify that all public modules and types are reachable via absolute paths.

/// Solver types are accessible via absolute path.
#[test]
fn test_solver_module_exports() {
    use pricer_core::math::solvers::NewtonOutcome;
    use pricer_core::math::solvers::NewtonRaphsonSolver;
    use pricer_core::math::solvers::SolverConfig;
    use pricer_core::math::solvers::StoppingRule;

    let config = SolverConfig::new(1e-10, 20).with_stopping_rule(StoppingRule::StepSize);
    let solver = NewtonRaphsonSolver::new(config);
    let outcome: NewtonOutcome<f64> = solver.solve(|x| x * x - 9.0, |x| 2.0 * x, 1.0).unwrap();
    assert!((outcome.root - 3.0).abs() < 1e-10);
}

/// Error types are accessible via absolute path and compose with `?`.
#[test]
fn test_error_module_exports() {
    use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
    use pricer_core::types::error::{PricingError, SolverError};

    fn solve_with_cap(cap: usize) -> Result<f64, PricingError> {
        let solver = NewtonRaphsonSolver::new(SolverConfig::new(1e-300, cap));
        let root = solver.find_root(|x: f64| x * x - 2.0, |x: f64| 2.0 * x, 10.0)?;
        Ok(root)
    }

    assert_eq!(
        solve_with_cap(2),
        Err(PricingError::NonConvergent { iterations: 2 })
    );

    let solver_err = SolverError::NumericalInstability("overflow".to_string());
    let pricing_err: PricingError = solver_err.into();
    assert!(pricing_err.to_string().contains("overflow"));
}
