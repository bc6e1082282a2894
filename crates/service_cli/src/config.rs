//! CLI configuration management.
//!
//! Settings are read from an optional TOML file, overridden by `PRICER_*`
//! environment variables and validated before any pricing starts:
//!
//! ```toml
//! log_level = "info"
//!
//! [monte_carlo]
//! trials = 100000
//! seed = 42
//! control_variate = true
//! progress_interval = 5000
//! threads = 4
//!
//! [implied_vol]
//! tolerance = 1e-8
//! max_iterations = 100
//!
//! [lattice]
//! steps = 1000
//! ```

use std::path::Path;

use pricer_models::analytical::implied_volatility::{
    DEFAULT_INITIAL_FLOOR, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE,
};
use pricer_models::lattice::BinomialTree;
use pricer_pricing::mc::MAX_TRIALS;
use serde::Deserialize;
use thiserror::Error;

/// Environment variable overriding `monte_carlo.trials`.
pub const ENV_TRIALS: &str = "PRICER_TRIALS";
/// Environment variable overriding `monte_carlo.seed`.
pub const ENV_SEED: &str = "PRICER_SEED";
/// Environment variable overriding `monte_carlo.threads`.
pub const ENV_THREADS: &str = "PRICER_THREADS";
/// Environment variable overriding `log_level`.
pub const ENV_LOG_LEVEL: &str = "PRICER_LOG_LEVEL";

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Monte Carlo defaults for the `asian` and `basket` commands.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct MonteCarloSection {
    /// Number of trials when `--trials` is not given
    pub trials: usize,
    /// Fixed seed; a fresh one is drawn per run when absent
    pub seed: Option<u64>,
    /// Apply the geometric control variate
    pub control_variate: bool,
    /// Trials per progress report
    pub progress_interval: usize,
    /// Run trials on several threads
    pub parallel: bool,
    /// Dedicated worker count; the global pool is used when absent
    pub threads: Option<usize>,
}

impl Default for MonteCarloSection {
    fn default() -> Self {
        Self {
            trials: 100_000,
            seed: None,
            control_variate: false,
            progress_interval: 10_000,
            parallel: true,
            threads: None,
        }
    }
}

/// Newton-Raphson settings for the `implied-vol` command.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ImpliedVolSection {
    /// Step-size tolerance
    pub tolerance: f64,
    /// Iteration cap
    pub max_iterations: usize,
    /// Lower bound on the starting volatility
    pub initial_floor: f64,
}

impl Default for ImpliedVolSection {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            initial_floor: DEFAULT_INITIAL_FLOOR,
        }
    }
}

/// Binomial tree settings for the `american` command.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LatticeSection {
    /// Number of time steps
    pub steps: usize,
}

impl Default for LatticeSection {
    fn default() -> Self {
        Self {
            steps: BinomialTree::DEFAULT_STEPS,
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Default tracing filter level
    pub log_level: String,
    /// Monte Carlo settings
    pub monte_carlo: MonteCarloSection,
    /// Implied volatility settings
    pub implied_vol: ImpliedVolSection,
    /// Lattice settings
    pub lattice: LatticeSection,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            monte_carlo: MonteCarloSection::default(),
            implied_vol: ImpliedVolSection::default(),
            lattice: LatticeSection::default(),
        }
    }
}

impl CliConfig {
    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    /// Load `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) if path.exists() => Self::load(path),
            Some(path) => {
                tracing::debug!(path = %path.display(), "config file not found, using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply `PRICER_*` environment variable overrides
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, keyed by environment variable name
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(trials) = lookup(ENV_TRIALS) {
            self.monte_carlo.trials = parse_env(ENV_TRIALS, &trials)?;
        }
        if let Some(seed) = lookup(ENV_SEED) {
            self.monte_carlo.seed = Some(parse_env(ENV_SEED, &seed)?);
        }
        if let Some(threads) = lookup(ENV_THREADS) {
            self.monte_carlo.threads = Some(parse_env(ENV_THREADS, &threads)?);
        }
        if let Some(log_level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = log_level;
        }
        Ok(self)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !VALID_LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, VALID_LOG_LEVELS
            ));
        }

        let mc = &self.monte_carlo;
        if mc.trials == 0 || mc.trials > MAX_TRIALS {
            errors.push(format!(
                "monte_carlo.trials {} must be in [1, {}]",
                mc.trials, MAX_TRIALS
            ));
        }
        if mc.progress_interval == 0 {
            errors.push("monte_carlo.progress_interval must be greater than 0".to_string());
        }
        if mc.threads == Some(0) {
            errors.push("monte_carlo.threads must be greater than 0".to_string());
        }

        let iv = &self.implied_vol;
        if !(iv.tolerance.is_finite() && iv.tolerance > 0.0) {
            errors.push(format!(
                "implied_vol.tolerance {} must be positive",
                iv.tolerance
            ));
        }
        if iv.max_iterations == 0 {
            errors.push("implied_vol.max_iterations must be greater than 0".to_string());
        }
        if !(iv.initial_floor.is_finite() && iv.initial_floor > 0.0) {
            errors.push(format!(
                "implied_vol.initial_floor {} must be positive",
                iv.initial_floor
            ));
        }

        if self.lattice.steps == 0 {
            errors.push("lattice.steps must be greater than 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        key,
        value: value.to_string(),
    })
}

/// Configuration error type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("Cannot read {path}: {message}")]
    Io {
        /// File that failed to load
        path: String,
        /// Underlying error
        message: String,
    },
    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),
    /// Environment variable that does not parse
    #[error("Invalid value '{value}' for {key}")]
    InvalidEnv {
        /// Variable name
        key: &'static str,
        /// Raw value
        value: String,
    },
    /// Validation error
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config_validates() {
        let config = CliConfig::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.monte_carlo.trials, 100_000);
        assert_eq!(config.lattice.steps, BinomialTree::DEFAULT_STEPS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = CliConfig::from_toml(
            r#"
            log_level = "debug"

            [monte_carlo]
            trials = 5000
            control_variate = true
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.monte_carlo.trials, 5000);
        assert!(config.monte_carlo.control_variate);
        assert_eq!(config.monte_carlo.progress_interval, 10_000);
        assert_eq!(config.implied_vol, ImpliedVolSection::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = CliConfig::from_toml("[monte_carlo]\npaths = 10\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[lattice]\nsteps = 250").unwrap();

        let config = CliConfig::load(file.path()).unwrap();
        assert_eq!(config.lattice.steps, 250);

        let config = CliConfig::load_or_default(Some(file.path())).unwrap();
        assert_eq!(config.lattice.steps, 250);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("pricer.toml");

        assert_eq!(
            CliConfig::load_or_default(Some(&missing)).unwrap(),
            CliConfig::default()
        );
        assert!(matches!(
            CliConfig::load(&missing),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_env_overrides() {
        let config = CliConfig::default()
            .with_overrides(lookup(&[
                (ENV_TRIALS, "2500"),
                (ENV_SEED, "7"),
                (ENV_THREADS, "2"),
                (ENV_LOG_LEVEL, "warn"),
            ]))
            .unwrap();

        assert_eq!(config.monte_carlo.trials, 2500);
        assert_eq!(config.monte_carlo.seed, Some(7));
        assert_eq!(config.monte_carlo.threads, Some(2));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_env_override_rejects_garbage() {
        let err = CliConfig::default()
            .with_overrides(lookup(&[(ENV_TRIALS, "many")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidEnv {
                key: ENV_TRIALS,
                value: "many".to_string()
            }
        );
    }

    #[test]
    fn test_validation_collects_errors() {
        let mut config = CliConfig::default();
        config.log_level = "loud".to_string();
        config.monte_carlo.trials = 0;
        config.implied_vol.tolerance = -1.0;
        config.lattice.steps = 0;

        match config.validate() {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors.len(), 4);
                assert!(errors.iter().any(|e| e.contains("log_level")));
                assert!(errors.iter().any(|e| e.contains("trials")));
                assert!(errors.iter().any(|e| e.contains("tolerance")));
                assert!(errors.iter().any(|e| e.contains("lattice.steps")));
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_log_levels_case_insensitive() {
        for level in ["trace", "DEBUG", "Info", "warn", "error"] {
            let mut config = CliConfig::default();
            config.log_level = level.to_string();
            assert!(config.validate().is_ok(), "'{}' should be valid", level);
        }
    }
}
