//! # Runtime Configuration
//!
//! Preloader settings read from the environment, then overridden by
//! command-line flags.
//!
//! # Environment Variables
//!
//! - `CP_EXPECTED_ITEMS`: store capacity (default: 1000000)
//! - `CP_FALSE_POSITIVE_RATE`: target rate in (0, 1) (default: 0.01)
//! - `CP_RETAIN_PLAIN_PATHS`: keep the diagnostic path set (default: false)
//! - `CP_PARALLEL_SCAN`: scan classpath roots in parallel (default: false)
//! - `CP_LOG_LEVEL`: log filter when `RUST_LOG` is unset (default: info)
//! - `CP_JSON_OUTPUT`: print the report as JSON (default: false)

use std::env;
use std::str::FromStr;

use cp_preloader::{PreloadError, PreloaderConfig};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} has an invalid value: {value:?}")]
    InvalidValue { var: &'static str, value: String },

    #[error(transparent)]
    Preloader(#[from] PreloadError),
}

/// Complete runtime configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    /// Store sizing and diagnostics.
    pub preloader: PreloaderConfig,
    /// Scan classpath roots on the rayon pool.
    pub parallel_scan: bool,
    /// Log filter directive used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Emit the report as JSON on stdout.
    pub json_output: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            preloader: PreloaderConfig::default(),
            parallel_scan: false,
            log_level: "info".to_string(),
            json_output: false,
        }
    }
}

impl RuntimeConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create configuration from any key lookup, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            preloader: PreloaderConfig {
                expected_items: parse_or(&lookup, "CP_EXPECTED_ITEMS", defaults.preloader.expected_items)?,
                false_positive_rate: parse_or(
                    &lookup,
                    "CP_FALSE_POSITIVE_RATE",
                    defaults.preloader.false_positive_rate,
                )?,
                retain_plain_paths: parse_flag(
                    &lookup,
                    "CP_RETAIN_PLAIN_PATHS",
                    defaults.preloader.retain_plain_paths,
                )?,
            },
            parallel_scan: parse_flag(&lookup, "CP_PARALLEL_SCAN", defaults.parallel_scan)?,
            log_level: lookup("CP_LOG_LEVEL").unwrap_or(defaults.log_level),
            json_output: parse_flag(&lookup, "CP_JSON_OUTPUT", defaults.json_output)?,
        })
    }

    /// Validate before the scan starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.preloader.validate()?;
        Ok(())
    }
}

fn parse_or<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { var, value }),
    }
}

fn parse_flag<F>(lookup: &F, var: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidValue { var, value }),
        },
    }
}
