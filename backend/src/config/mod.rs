//! Configuration management for the Calorie Calculator backend
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: CC__)

use anyhow::Result;
use calorie_calc_shared::{EstimationConstants, MacroDefaults};
use serde::{Deserialize, Serialize};
use std::env;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub estimation: EstimationConstants,
    #[serde(default)]
    pub defaults: MacroDefaults,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                request_timeout_secs: 30,
            },
            estimation: EstimationConstants::default(),
            defaults: MacroDefaults::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with CC__ prefix
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        Self::load_from(&config_file, Self::environment())
    }

    /// Environment variable source (CC__ prefix, `__` between nested keys)
    ///
    /// e.g., CC__SERVER__PORT=9000 sets server.port
    ///       CC__ESTIMATION__KCAL_PER_KG=7800 sets estimation.kcal_per_kg
    pub fn environment() -> config::Environment {
        config::Environment::with_prefix("CC")
            .prefix_separator("__")
            .separator("__")
    }

    fn load_from(config_file: &str, environment: config::Environment) -> Result<Self> {
        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // Load from environment-specific config file
            .add_source(config::File::with_name(config_file).required(false))
            // Override with environment variables
            .add_source(environment)
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }

    /// Reject estimation overrides that would break engine invariants
    pub fn validate(&self) -> Result<()> {
        self.estimation
            .validate()
            .map_err(|e| anyhow::anyhow!("estimation.{}", e))?;
        self.defaults
            .validate()
            .map_err(|e| anyhow::anyhow!("defaults.{}", e))?;
        Ok(())
    }
}
