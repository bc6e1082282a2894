//! Basket command implementation
//!
//! Arithmetic two-asset basket option by Monte Carlo.

use pricer_models::instruments::{BasketOption, Underlying};

use super::monte_carlo::{run_job, MonteCarloReport};
use super::{ContractArgs, MonteCarloArgs};
use crate::config::MonteCarloSection;
use crate::output::{render, OutputFormat};
use crate::Result;

/// Spot and volatility of both basket constituents
#[derive(Debug, Clone, Copy)]
pub struct BasketAssets {
    /// Spot prices S1, S2
    pub spots: [f64; 2],
    /// Volatilities σ1, σ2
    pub volatilities: [f64; 2],
    /// Correlation ρ of the two Brownian drivers
    pub correlation: f64,
}

/// Price the arithmetic basket option described by the arguments
pub fn evaluate(
    contract: &ContractArgs,
    assets: BasketAssets,
    mc: &MonteCarloArgs,
    section: &MonteCarloSection,
) -> Result<MonteCarloReport> {
    let option = BasketOption::new(
        [
            Underlying::new(assets.spots[0], assets.volatilities[0])?,
            Underlying::new(assets.spots[1], assets.volatilities[1])?,
        ],
        assets.correlation,
        contract.rate,
        contract.maturity,
        contract.strike,
        contract.option_type,
    )?;

    Ok(MonteCarloReport {
        kind: "basket",
        option_type: contract.option_type,
        result: run_job(option.into(), mc, section)?,
    })
}

/// Run the basket command
pub fn run(
    contract: &ContractArgs,
    assets: BasketAssets,
    mc: &MonteCarloArgs,
    section: &MonteCarloSection,
    format: OutputFormat,
) -> Result<String> {
    tracing::info!(correlation = assets.correlation, "pricing arithmetic basket option");
    render(&evaluate(contract, assets, mc, section)?, format)
}
