//! Application configuration
//!
//! This module provides centralized configuration management using the `config` crate.
//! Configuration can be loaded from environment variables and config files.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

use crate::models::{RateConfig, RateDefinition};
use crate::AppResult;

/// Main application configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Rate applied to priced calls
    #[serde(default)]
    pub rate: RateConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Default filter directive when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment and optional config file
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        let rate = RateConfig::default();

        let config = Config::builder()
            // Start with default values
            .set_default("rate.standard_begin", rate.standard_begin)?
            .set_default("rate.standard_end", rate.standard_end)?
            .set_default("rate.reduced_begin", rate.reduced_begin)?
            .set_default("rate.reduced_end", rate.reduced_end)?
            .set_default("rate.standard_standing_charge", rate.standard_standing_charge)?
            .set_default("rate.standard_minute_charge", rate.standard_minute_charge)?
            .set_default("rate.reduced_standing_charge", rate.reduced_standing_charge)?
            .set_default("rate.reduced_minute_charge", rate.reduced_minute_charge)?
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Load from environment variables with CALLRATE_ prefix
            .add_source(
                Environment::with_prefix("CALLRATE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Validated rate built from the configured rate input
    pub fn rate_definition(&self) -> AppResult<RateDefinition> {
        RateDefinition::try_from(self.rate.clone())
    }
}
