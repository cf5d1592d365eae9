//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::AnalysisConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Overrides the remote service base address.
pub const ENV_SERVICE_URL: &str = "AI_SERVICE_URL";
/// Overrides `timeouts.single_ms`.
pub const ENV_SINGLE_TIMEOUT_MS: &str = "ARBOR_SINGLE_TIMEOUT_MS";
/// Overrides `timeouts.batch_ms`.
pub const ENV_BATCH_TIMEOUT_MS: &str = "ARBOR_BATCH_TIMEOUT_MS";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value '{value}' for {var}: expected milliseconds")]
    Env { var: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file, then apply env overrides.
pub fn load_config(path: &Path) -> Result<AnalysisConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let mut config: AnalysisConfig = toml::from_str(&content)?;

    apply_env_overrides(&mut config, |var| std::env::var(var).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Build a configuration from defaults plus env overrides.
pub fn from_env() -> Result<AnalysisConfig, ConfigError> {
    let mut config = AnalysisConfig::default();

    apply_env_overrides(&mut config, |var| std::env::var(var).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply environment-style overrides using `lookup` to read variables.
pub fn apply_env_overrides<F>(config: &mut AnalysisConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(address) = lookup(ENV_SERVICE_URL) {
        config.service.address = address;
    }
    if let Some(value) = lookup(ENV_SINGLE_TIMEOUT_MS) {
        config.timeouts.single_ms = parse_millis(ENV_SINGLE_TIMEOUT_MS, value)?;
    }
    if let Some(value) = lookup(ENV_BATCH_TIMEOUT_MS) {
        config.timeouts.batch_ms = parse_millis(ENV_BATCH_TIMEOUT_MS, value)?;
    }
    Ok(())
}

fn parse_millis(var: &'static str, value: String) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Env { var, value })
}
