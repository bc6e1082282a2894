//! Monte Carlo runs shared by the `asian` and `basket` commands.
//!
//! Runs go through a [`PricingJob`] so that `--timeout-secs` can cancel
//! them; progress is logged at every tenth of the requested trials.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use pricer_models::instruments::{OptionSpec, OptionType};
use pricer_pricing::mc::{
    McError, MonteCarloConfig, MonteCarloPricer, PricingJob, PricingResult, ProgressCallback,
};
use serde::Serialize;

use super::MonteCarloArgs;
use crate::config::MonteCarloSection;
use crate::output::{price, Report};
use crate::{CliError, Result};

/// Monte Carlo valuation of an Asian or basket option
#[derive(Debug, Serialize)]
pub struct MonteCarloReport {
    /// Option kind ("asian" or "basket")
    pub kind: &'static str,
    /// Call or put
    pub option_type: OptionType,
    /// Simulation outcome
    #[serde(flatten)]
    pub result: PricingResult,
}

impl Report for MonteCarloReport {
    fn title(&self) -> String {
        format!("Arithmetic {} {} (Monte Carlo)", self.kind, self.option_type)
    }

    fn rows(&self) -> Vec<(&'static str, String)> {
        let r = &self.result;
        let mut rows = vec![
            ("Price", price(r.price)),
            (
                "95% CI",
                format!(
                    "[{}, {}]",
                    price(r.confidence_interval.lower),
                    price(r.confidence_interval.upper)
                ),
            ),
            ("Std error", price(r.std_error())),
            ("Estimator", r.estimator.to_string()),
        ];
        if let Some(theta) = r.theta {
            rows.push(("Theta", format!("{:.6}", theta)));
        }
        if r.control_variate_fallback {
            rows.push(("Control variate", "zero variance, plain used".to_string()));
        }
        if let Some(closed_form) = r.geometric_closed_form {
            rows.push(("Geometric closed form", price(closed_form)));
        }
        rows.push(("Geometric MC", price(r.geometric_estimate)));
        rows.push(("Trials", r.n_trials.to_string()));
        rows.push(("Seed", r.seed.to_string()));
        rows
    }
}

/// Merge command-line arguments over the config file settings
pub fn build_config(
    args: &MonteCarloArgs,
    section: &MonteCarloSection,
) -> Result<MonteCarloConfig> {
    let mut builder = MonteCarloConfig::builder()
        .n_trials(args.trials.unwrap_or(section.trials))
        .maybe_seed(args.seed.or(section.seed))
        .control_variate(args.control_variate || section.control_variate)
        .progress_interval(section.progress_interval)
        .parallel(section.parallel);
    if let Some(threads) = args.threads.or(section.threads) {
        builder = builder.threads(threads);
    }
    builder.build().map_err(|e| CliError::MonteCarlo(e.into()))
}

fn progress_logger() -> ProgressCallback {
    let reported = AtomicUsize::new(0);
    Arc::new(move |completed, total| {
        let decile = completed * 10 / total.max(1);
        if reported.fetch_max(decile, Ordering::Relaxed) < decile {
            tracing::info!(completed, total, "Monte Carlo progress {}%", decile * 10);
        }
    })
}

/// Price `spec` on a background job, honouring `--timeout-secs`
pub fn run_job(
    spec: OptionSpec,
    args: &MonteCarloArgs,
    section: &MonteCarloSection,
) -> Result<PricingResult> {
    let config = build_config(args, section)?;
    let pricer = MonteCarloPricer::new(config)
        .map_err(McError::from)?
        .with_progress(progress_logger());
    let job = PricingJob::spawn(pricer, spec)?;

    let Some(seconds) = args.timeout_secs else {
        return Ok(job.wait()?);
    };

    if let Some(result) = job.wait_timeout(Duration::from_secs(seconds)) {
        return Ok(result?);
    }

    tracing::warn!(seconds, "timeout reached, cancelling Monte Carlo run");
    job.cancel();
    match job.wait() {
        Err(McError::Cancelled {
            completed,
            requested,
        }) => Err(CliError::Timeout {
            seconds,
            completed,
            requested,
        }),
        other => Ok(other?),
    }
}
