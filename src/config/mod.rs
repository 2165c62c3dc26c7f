//! Configuration management for hashpulse
//!
//! This module handles loading and validating configuration from environment variables
//! and TOML files.

use anyhow::{Context, Result};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Database configuration
    pub database: DatabaseConfig,

    /// HTTP server configuration
    pub server: ServerConfig,

    /// Default analytics windows and limits
    pub analytics: AnalyticsConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite database path
    pub sqlite_path: PathBuf,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind, e.g. `0.0.0.0:8080`
    pub bind_address: String,

    pub enable_cors: bool,

    pub enable_request_logging: bool,
}

/// Analytics defaults applied by callers when a request leaves them out
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub trend_period_days: u32,
    pub growth_period_days: u32,
    pub report_period_days: u32,
    pub trending_limit: usize,
    pub ranking_limit: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            sqlite_path: PathBuf::from("data/hashpulse.db"),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: String::from("0.0.0.0:8080"),
            enable_cors: true,
            enable_request_logging: true,
        }
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            trend_period_days: 30,
            growth_period_days: 30,
            report_period_days: 7,
            trending_limit: 20,
            ranking_limit: 10,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

impl AnalyticsConfig {
    #[must_use]
    pub fn trend_period(&self) -> Duration {
        Duration::days(i64::from(self.trend_period_days))
    }

    #[must_use]
    pub fn growth_period(&self) -> Duration {
        Duration::days(i64::from(self.growth_period_days))
    }

    #[must_use]
    pub fn report_period(&self) -> Duration {
        Duration::days(i64::from(self.report_period_days))
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env();
        Ok(config)
    }

    /// Load configuration from a file
    ///
    /// Environment variables still override values from the file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;
        config.apply_env();

        Ok(config)
    }

    /// Load from `path` when given, otherwise from the environment, then validate
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::from_env()?,
        };
        config.validate().context("Invalid configuration")?;
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(path) = std::env::var("HASHPULSE_SQLITE_PATH") {
            self.database.sqlite_path = path.into();
        }
        if let Ok(bind) = std::env::var("HASHPULSE_BIND") {
            self.server.bind_address = bind;
        }
        if let Ok(level) = std::env::var("HASHPULSE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("HASHPULSE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.database.sqlite_path.as_os_str().is_empty() {
            anyhow::bail!("sqlite_path must not be empty");
        }

        if self.server.bind_address.trim().is_empty() {
            anyhow::bail!("bind_address must not be empty");
        }

        let analytics = &self.analytics;
        if analytics.trend_period_days == 0
            || analytics.growth_period_days == 0
            || analytics.report_period_days == 0
        {
            anyhow::bail!("analytics periods must be greater than 0 days");
        }

        if analytics.trending_limit == 0 || analytics.ranking_limit == 0 {
            anyhow::bail!("analytics limits must be greater than 0");
        }

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            anyhow::bail!("logging format must be 'text' or 'json'");
        }

        Ok(())
    }
}
