//! `pricer` - command-line option pricing
//!
//! # Commands
//!
//! - `pricer european` - Black-Scholes price and vega
//! - `pricer implied-vol` - volatility implied by a premium
//! - `pricer asian` - arithmetic Asian option by Monte Carlo
//! - `pricer basket` - arithmetic two-asset basket option by Monte Carlo
//! - `pricer american` - binomial tree with early exercise
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate parses arguments, loads
//! the TOML configuration, installs the tracing subscriber and hands the
//! work to `pricer_models` and `pricer_pricing`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

pub use error::{CliError, Result};

use commands::basket::BasketAssets;
use commands::{ContractArgs, MonteCarloArgs};
use config::CliConfig;
use output::OutputFormat;

/// Option pricing: Black-Scholes, implied volatility, Monte Carlo and lattices
#[derive(Parser)]
#[command(name = "pricer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "pricer.toml")]
    config: PathBuf,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a European option with Black-Scholes
    European {
        #[command(flatten)]
        contract: ContractArgs,

        /// Spot price S
        #[arg(long)]
        spot: f64,

        /// Volatility σ
        #[arg(long)]
        volatility: f64,

        /// Repo (dividend) rate q
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        repo_rate: f64,

        /// Valuation time t in years
        #[arg(long, default_value_t = 0.0)]
        valuation_time: f64,
    },

    /// Solve for the volatility implied by an option premium
    ImpliedVol {
        #[command(flatten)]
        contract: ContractArgs,

        /// Spot price S
        #[arg(long)]
        spot: f64,

        /// Observed option premium
        #[arg(long)]
        premium: f64,

        /// Repo (dividend) rate q
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        repo_rate: f64,

        /// Valuation time t in years
        #[arg(long, default_value_t = 0.0)]
        valuation_time: f64,
    },

    /// Price an arithmetic-average Asian option by Monte Carlo
    Asian {
        #[command(flatten)]
        contract: ContractArgs,

        /// Spot price S
        #[arg(long)]
        spot: f64,

        /// Volatility σ
        #[arg(long)]
        volatility: f64,

        /// Number of averaging observations n
        #[arg(long)]
        observations: usize,

        #[command(flatten)]
        monte_carlo: MonteCarloArgs,
    },

    /// Price an arithmetic two-asset basket option by Monte Carlo
    Basket {
        #[command(flatten)]
        contract: ContractArgs,

        /// Spot price of the first asset
        #[arg(long)]
        spot1: f64,

        /// Spot price of the second asset
        #[arg(long)]
        spot2: f64,

        /// Volatility of the first asset
        #[arg(long)]
        volatility1: f64,

        /// Volatility of the second asset
        #[arg(long)]
        volatility2: f64,

        /// Correlation between the assets
        #[arg(long, allow_negative_numbers = true)]
        correlation: f64,

        #[command(flatten)]
        monte_carlo: MonteCarloArgs,
    },

    /// Price an American option on a binomial tree
    American {
        #[command(flatten)]
        contract: ContractArgs,

        /// Spot price S
        #[arg(long)]
        spot: f64,

        /// Volatility σ
        #[arg(long)]
        volatility: f64,

        /// Repo (dividend) rate q
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        repo_rate: f64,

        /// Tree steps (defaults to the config file)
        #[arg(long)]
        steps: Option<usize>,
    },
}

fn init_tracing(verbose: bool, log_level: &str) {
    let default_level = if verbose { "debug" } else { log_level };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load_or_default(Some(&cli.config))?.with_env_override()?;
    config.validate()?;

    init_tracing(cli.verbose, &config.log_level);
    tracing::debug!(config = ?config, "configuration loaded");

    let format = cli.format;
    let output = match cli.command {
        Commands::European {
            contract,
            spot,
            volatility,
            repo_rate,
            valuation_time,
        } => commands::european::run(
            &contract,
            spot,
            volatility,
            repo_rate,
            valuation_time,
            format,
        ),
        Commands::ImpliedVol {
            contract,
            spot,
            premium,
            repo_rate,
            valuation_time,
        } => commands::implied_vol::run(
            &contract,
            spot,
            repo_rate,
            valuation_time,
            premium,
            &config.implied_vol,
            format,
        ),
        Commands::Asian {
            contract,
            spot,
            volatility,
            observations,
            monte_carlo,
        } => commands::asian::run(
            &contract,
            spot,
            volatility,
            observations,
            &monte_carlo,
            &config.monte_carlo,
            format,
        ),
        Commands::Basket {
            contract,
            spot1,
            spot2,
            volatility1,
            volatility2,
            correlation,
            monte_carlo,
        } => commands::basket::run(
            &contract,
            BasketAssets {
                spots: [spot1, spot2],
                volatilities: [volatility1, volatility2],
                correlation,
            },
            &monte_carlo,
            &config.monte_carlo,
            format,
        ),
        Commands::American {
            contract,
            spot,
            volatility,
            repo_rate,
            steps,
        } => commands::american::run(
            &contract,
            spot,
            volatility,
            repo_rate,
            steps.unwrap_or(config.lattice.steps),
            format,
        ),
    }?;

    println!("{}", output);
    Ok(())
}
