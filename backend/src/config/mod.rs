//! Configuration management for the Fitlog estimator
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: FITLOG__)

use anyhow::Result;
use fitlog_shared::{BiologicalSex, BmrMethod, DefaultProfile};
use serde::{Deserialize, Serialize};
use std::env;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub defaults: DefaultsConfig,
    pub estimates: EstimatesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Profile values assumed when a caller leaves them out
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    pub age_years: u32,
    pub sex: BiologicalSex,
}

/// Estimate behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimatesConfig {
    /// BMR equation used on cache misses
    pub bmr_method: BmrMethod,
    /// Reject physically impossible input before estimating
    pub validate_inputs: bool,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// Used when RUST_LOG is not set
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
            filter: "fitlog_backend=debug,fitlog_estimator=debug".to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let defaults = DefaultProfile::default();
        Self {
            defaults: DefaultsConfig {
                age_years: defaults.age_years,
                sex: defaults.sex,
            },
            estimates: EstimatesConfig {
                bmr_method: BmrMethod::MifflinStJeor,
                validate_inputs: true,
            },
            logging: LoggingConfig::default(),
        }
    }
}

impl From<&DefaultsConfig> for DefaultProfile {
    fn from(config: &DefaultsConfig) -> Self {
        DefaultProfile {
            age_years: config.age_years,
            sex: config.sex,
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with FITLOG__ prefix
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // Load from environment-specific config file
            .add_source(config::File::with_name(&config_file).required(false))
            // Override with environment variables (FITLOG__ prefix)
            // e.g., FITLOG__DEFAULTS__AGE_YEARS=35 sets defaults.age_years
            .add_source(config::Environment::with_prefix("FITLOG").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }

    /// Default profile as the estimate cache consumes it
    pub fn default_profile(&self) -> DefaultProfile {
        DefaultProfile::from(&self.defaults)
    }
}
