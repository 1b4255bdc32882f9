//! Server Configuration
//!
//! Loaded from an optional TOML file, then `AQUACARE__*` environment
//! variables (e.g. `AQUACARE__ALERTS__MAINTENANCE_EXPIRY_DAYS=3`).

use crate::rate_limit::RateLimitConfig;
use alerting::AlertConfig;
use config::{Config, ConfigError, Environment, File};
use data_validator::ValidationConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default config file name, looked up without extension
pub const DEFAULT_CONFIG_FILE: &str = "aquacare";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// Snapshot file restored on start and written on shutdown
    pub snapshot_path: Option<PathBuf>,
    /// Seconds between scheduled alert checks
    pub alert_check_interval_secs: u64,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_filter: String,
    /// Emit JSON log lines
    pub log_json: bool,
    pub rate_limit: RateLimitConfig,
    pub alerts: AlertConfig,
    pub validation: ValidationConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:5000".to_string(),
            snapshot_path: None,
            alert_check_interval_secs: 3600,
            log_filter: "info".to_string(),
            log_json: false,
            rate_limit: RateLimitConfig::default(),
            alerts: AlertConfig::default(),
            validation: ValidationConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `file` (if present) and the environment
    pub fn load(file: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = Config::builder()
            .add_source(File::with_name(file).required(false))
            .add_source(
                Environment::with_prefix("AQUACARE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the server cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.alerts
            .validate()
            .map_err(|e| ConfigError::Message(e.to_string()))?;
        if self.alert_check_interval_secs == 0 {
            return Err(ConfigError::Message(
                "alert_check_interval_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
