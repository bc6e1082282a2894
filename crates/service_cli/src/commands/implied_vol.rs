//! Implied volatility command implementation

use pricer_models::analytical::{european_price, ImpliedVolatilitySolver};
use pricer_models::instruments::{OptionType, Underlying, VanillaOption};
use serde::Serialize;

use super::ContractArgs;
use crate::config::ImpliedVolSection;
use crate::output::{price, render, OutputFormat, Report};
use crate::Result;

/// Volatility implied by an observed premium
#[derive(Debug, Serialize)]
pub struct ImpliedVolReport {
    /// Call or put
    pub option_type: OptionType,
    /// Observed premium
    pub premium: f64,
    /// Implied volatility σ
    pub implied_volatility: f64,
    /// Black-Scholes price at the implied volatility
    pub repriced: f64,
}

impl Report for ImpliedVolReport {
    fn title(&self) -> String {
        format!("Implied volatility ({})", self.option_type)
    }

    fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Premium", price(self.premium)),
            ("Implied volatility", format!("{:.8}", self.implied_volatility)),
            ("Repriced", price(self.repriced)),
        ]
    }
}

/// Solve for the volatility matching `premium`
pub fn evaluate(
    contract: &ContractArgs,
    spot: f64,
    repo_rate: f64,
    valuation_time: f64,
    premium: f64,
    settings: &ImpliedVolSection,
) -> Result<ImpliedVolReport> {
    // The solver ignores the volatility of the quote.
    let quote = VanillaOption::new(
        Underlying::new(spot, 0.0)?,
        contract.rate,
        repo_rate,
        contract.maturity,
        contract.strike,
        contract.option_type,
    )?;

    let solver = ImpliedVolatilitySolver::new(settings.tolerance, settings.max_iterations)
        .with_initial_floor(settings.initial_floor)
        .with_valuation_time(valuation_time);
    let sigma = solver.solve(&quote, premium)?;
    let repriced = european_price(&quote.with_volatility(sigma)?, valuation_time)?;

    Ok(ImpliedVolReport {
        option_type: contract.option_type,
        premium,
        implied_volatility: sigma,
        repriced,
    })
}

/// Run the implied-vol command
pub fn run(
    contract: &ContractArgs,
    spot: f64,
    repo_rate: f64,
    valuation_time: f64,
    premium: f64,
    settings: &ImpliedVolSection,
    format: OutputFormat,
) -> Result<String> {
    tracing::info!(spot, premium, strike = contract.strike, "solving implied volatility");
    render(
        &evaluate(contract, spot, repo_rate, valuation_time, premium, settings)?,
        format,
    )
}
