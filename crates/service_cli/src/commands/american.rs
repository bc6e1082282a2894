//! American command implementation
//!
//! Cox-Ross-Rubinstein tree prices for American and European exercise,
//! with Black-Scholes for reference.

use pricer_models::analytical::european_price;
use pricer_models::instruments::{ExerciseStyle, OptionType, Underlying, VanillaOption};
use pricer_models::lattice::BinomialTree;
use serde::Serialize;

use super::ContractArgs;
use crate::output::{price, render, OutputFormat, Report};
use crate::Result;

/// Lattice valuation of a vanilla option
#[derive(Debug, Serialize)]
pub struct AmericanReport {
    /// Call or put
    pub option_type: OptionType,
    /// Tree steps
    pub steps: usize,
    /// American exercise price on the tree
    pub american: f64,
    /// European exercise price on the tree
    pub european: f64,
    /// Black-Scholes price
    pub black_scholes: f64,
    /// `american - european`
    pub early_exercise_premium: f64,
}

impl Report for AmericanReport {
    fn title(&self) -> String {
        format!("American {} (CRR, {} steps)", self.option_type, self.steps)
    }

    fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("American", price(self.american)),
            ("European (tree)", price(self.european)),
            ("Black-Scholes", price(self.black_scholes)),
            ("Early exercise premium", price(self.early_exercise_premium)),
        ]
    }
}

/// Price the option on a tree with `steps` steps
pub fn evaluate(
    contract: &ContractArgs,
    spot: f64,
    volatility: f64,
    repo_rate: f64,
    steps: usize,
) -> Result<AmericanReport> {
    let option = VanillaOption::new(
        Underlying::new(spot, volatility)?,
        contract.rate,
        repo_rate,
        contract.maturity,
        contract.strike,
        contract.option_type,
    )?;
    let tree = BinomialTree::new(steps)?;

    let american = tree.price(&option, ExerciseStyle::American)?;
    let european = tree.price(&option, ExerciseStyle::European)?;

    Ok(AmericanReport {
        option_type: contract.option_type,
        steps,
        american,
        european,
        black_scholes: european_price(&option, 0.0)?,
        early_exercise_premium: american - european,
    })
}

/// Run the american command
pub fn run(
    contract: &ContractArgs,
    spot: f64,
    volatility: f64,
    repo_rate: f64,
    steps: usize,
    format: OutputFormat,
) -> Result<String> {
    tracing::info!(spot, volatility, steps, "pricing on binomial tree");
    render(
        &evaluate(contract, spot, volatility, repo_rate, steps)?,
        format,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_american_put_premium() {
        let contract = ContractArgs {
            strike: 100.0,
            maturity: 1.0,
            rate: 0.05,
            option_type: OptionType::Put,
        };
        let report = evaluate(&contract, 100.0, 0.2, 0.0, 1000).unwrap();

        assert_relative_eq!(report.american, 6.0896, epsilon = 5e-3);
        assert!(report.early_exercise_premium > 0.0);
        assert_relative_eq!(report.european, report.black_scholes, epsilon = 5e-3);
    }

    #[test]
    fn test_zero_steps_rejected() {
        let contract = ContractArgs {
            strike: 100.0,
            maturity: 1.0,
            rate: 0.05,
            option_type: OptionType::Call,
        };
        assert!(evaluate(&contract, 100.0, 0.2, 0.0, 0).is_err());
    }
}
