//! Preloader configuration and validation
//!
//! # Example
//!
//! ```ignore
//! use cp_preloader::domain::PreloaderConfigBuilder;
//!
//! let config = PreloaderConfigBuilder::new()
//!     .expected_items(250_000)
//!     .false_positive_rate(0.01)
//!     .build()
//!     .expect("Valid config");
//! ```

use serde::{Deserialize, Serialize};

use super::parameters::{calculate_optimal_parameters, validate_parameters, StoreParams};
use crate::error::PreloadError;

/// Default number of classpath entries the store is sized for
pub const DEFAULT_EXPECTED_ITEMS: usize = 1_000_000;

/// Default target false positive rate
pub const DEFAULT_FALSE_POSITIVE_RATE: f64 = 0.01;

/// Preloader configuration
///
/// All wrapped finders must exist before the build pass runs, so this is
/// settled once at startup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreloaderConfig {
    /// Number of paths the membership store is sized for
    pub expected_items: usize,
    /// Target false positive rate at `expected_items`, in (0, 1)
    pub false_positive_rate: f64,
    /// Keep an exact copy of every scanned path next to the filter
    ///
    /// Diagnostic only: memory then grows with the classpath, which the
    /// filter exists to avoid.
    pub retain_plain_paths: bool,
}

impl Default for PreloaderConfig {
    fn default() -> Self {
        Self {
            expected_items: DEFAULT_EXPECTED_ITEMS,
            false_positive_rate: DEFAULT_FALSE_POSITIVE_RATE,
            retain_plain_paths: false,
        }
    }
}

impl PreloaderConfig {
    /// Create a new configuration with validation
    pub fn new(expected_items: usize, false_positive_rate: f64) -> Result<Self, PreloadError> {
        let config = Self {
            expected_items,
            false_positive_rate,
            retain_plain_paths: false,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate capacity and rate
    pub fn validate(&self) -> Result<(), PreloadError> {
        validate_parameters(self.expected_items, self.false_positive_rate)
    }

    /// Filter dimensions this configuration produces
    pub fn store_params(&self) -> Result<StoreParams, PreloadError> {
        calculate_optimal_parameters(self.expected_items, self.false_positive_rate)
    }

    /// Builder-style method to enable the diagnostic plain path set
    pub fn with_plain_paths(mut self, retain: bool) -> Self {
        self.retain_plain_paths = retain;
        self
    }
}

/// Builder for PreloaderConfig with validation
#[derive(Default)]
pub struct PreloaderConfigBuilder {
    expected_items: Option<usize>,
    false_positive_rate: Option<f64>,
    retain_plain_paths: Option<bool>,
}

impl PreloaderConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of paths the store is sized for
    pub fn expected_items(mut self, items: usize) -> Self {
        self.expected_items = Some(items);
        self
    }

    /// Set the target false positive rate (must be in (0, 1))
    pub fn false_positive_rate(mut self, fpr: f64) -> Self {
        self.false_positive_rate = Some(fpr);
        self
    }

    /// Keep the diagnostic plain path set
    pub fn retain_plain_paths(mut self, retain: bool) -> Self {
        self.retain_plain_paths = Some(retain);
        self
    }

    /// Build the PreloaderConfig, validating all parameters
    pub fn build(self) -> Result<PreloaderConfig, PreloadError> {
        let config = self.build_unchecked();
        config.validate()?;
        Ok(config)
    }

    /// Build without validation
    pub fn build_unchecked(self) -> PreloaderConfig {
        let defaults = PreloaderConfig::default();

        PreloaderConfig {
            expected_items: self.expected_items.unwrap_or(defaults.expected_items),
            false_positive_rate: self
                .false_positive_rate
                .unwrap_or(defaults.false_positive_rate),
            retain_plain_paths: self
                .retain_plain_paths
                .unwrap_or(defaults.retain_plain_paths),
        }
    }
}
