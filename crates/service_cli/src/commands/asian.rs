//! Asian command implementation
//!
//! Arithmetic-average Asian option by Monte Carlo, with the geometric
//! closed form reported alongside.

use pricer_models::instruments::{AsianOption, Underlying};

use super::monte_carlo::{run_job, MonteCarloReport};
use super::{ContractArgs, MonteCarloArgs};
use crate::config::MonteCarloSection;
use crate::output::{render, OutputFormat};
use crate::Result;

/// Price the arithmetic Asian option described by the arguments
pub fn evaluate(
    contract: &ContractArgs,
    spot: f64,
    volatility: f64,
    observations: usize,
    mc: &MonteCarloArgs,
    section: &MonteCarloSection,
) -> Result<MonteCarloReport> {
    let option = AsianOption::new(
        Underlying::new(spot, volatility)?,
        contract.rate,
        contract.maturity,
        contract.strike,
        observations,
        contract.option_type,
    )?;

    Ok(MonteCarloReport {
        kind: "asian",
        option_type: contract.option_type,
        result: run_job(option.into(), mc, section)?,
    })
}

/// Run the asian command
pub fn run(
    contract: &ContractArgs,
    spot: f64,
    volatility: f64,
    observations: usize,
    mc: &MonteCarloArgs,
    section: &MonteCarloSection,
    format: OutputFormat,
) -> Result<String> {
    tracing::info!(spot, volatility, observations, "pricing arithmetic Asian option");
    render(
        &evaluate(contract, spot, volatility, observations, mc, section)?,
        format,
    )
}
