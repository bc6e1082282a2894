//! European command implementation
//!
//! Black-Scholes price and vega of a European option.

use pricer_models::analytical::{european_price, european_vega};
use pricer_models::instruments::{OptionType, Underlying, VanillaOption};
use serde::Serialize;

use super::ContractArgs;
use crate::output::{price, render, OutputFormat, Report};
use crate::Result;

/// Black-Scholes valuation of a European option
#[derive(Debug, Serialize)]
pub struct EuropeanReport {
    /// Call or put
    pub option_type: OptionType,
    /// Valuation time t
    pub valuation_time: f64,
    /// Option price
    pub price: f64,
    /// ∂Price/∂σ
    pub vega: f64,
}

impl Report for EuropeanReport {
    fn title(&self) -> String {
        format!("European {} (Black-Scholes)", self.option_type)
    }

    fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Valuation time", format!("{}", self.valuation_time)),
            ("Price", price(self.price)),
            ("Vega", price(self.vega)),
        ]
    }
}

/// Price the option described by the arguments
pub fn evaluate(
    contract: &ContractArgs,
    spot: f64,
    volatility: f64,
    repo_rate: f64,
    valuation_time: f64,
) -> Result<EuropeanReport> {
    let option = VanillaOption::new(
        Underlying::new(spot, volatility)?,
        contract.rate,
        repo_rate,
        contract.maturity,
        contract.strike,
        contract.option_type,
    )?;

    Ok(EuropeanReport {
        option_type: contract.option_type,
        valuation_time,
        price: european_price(&option, valuation_time)?,
        vega: european_vega(&option, valuation_time)?,
    })
}

/// Run the european command
pub fn run(
    contract: &ContractArgs,
    spot: f64,
    volatility: f64,
    repo_rate: f64,
    valuation_time: f64,
    format: OutputFormat,
) -> Result<String> {
    tracing::info!(spot, volatility, strike = contract.strike, "pricing European option");
    render(
        &evaluate(contract, spot, volatility, repo_rate, valuation_time)?,
        format,
    )
}
