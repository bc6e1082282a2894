//! CLI command implementations
//!
//! Each submodule implements one subcommand and returns the rendered
//! report for `main` to print.

use clap::Args;
use pricer_models::instruments::OptionType;

pub mod american;
pub mod asian;
pub mod basket;
pub mod european;
pub mod implied_vol;
pub mod monte_carlo;

/// Contract terms shared by every command
#[derive(Args, Debug, Clone)]
pub struct ContractArgs {
    /// Strike price K
    #[arg(long)]
    pub strike: f64,

    /// Time to maturity T in years
    #[arg(long)]
    pub maturity: f64,

    /// Continuously compounded risk-free rate r
    #[arg(long, allow_negative_numbers = true)]
    pub rate: f64,

    /// Option type (call or put)
    #[arg(long, default_value = "call")]
    pub option_type: OptionType,
}

/// Monte Carlo run settings; unset values come from the config file
#[derive(Args, Debug, Clone, Default)]
pub struct MonteCarloArgs {
    /// Number of trials m
    #[arg(long)]
    pub trials: Option<usize>,

    /// Seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Correct the estimate with the geometric control variate
    #[arg(long)]
    pub control_variate: bool,

    /// Worker threads for this run
    #[arg(long)]
    pub threads: Option<usize>,

    /// Cancel the run after this many seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}
