//! Service settings loading from config.toml
//!
//! Every key has a default, so the file is optional. The path comes from
//! `GATEHOUSE_CONFIG` and falls back to `./config.toml`.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Environment variable naming the settings file
pub const CONFIG_PATH_VAR: &str = "GATEHOUSE_CONFIG";

const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP listener settings
    pub server: ServerConfig,
    /// Access logging settings
    pub access: AccessConfig,
    /// Reporting settings
    pub reports: ReportsConfig,
}

/// `[server]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address the HTTP server binds to
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// `[access]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    /// How many events the recent-activity list shows
    pub recent_limit: u64,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self { recent_limit: 10 }
    }
}

/// `[reports]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportsConfig {
    /// Length of the default report range, ending today
    pub default_range_days: u32,
    /// Maximum number of events included in the report table
    pub display_limit: usize,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            default_range_days: 30,
            display_limit: 50,
        }
    }
}

/// Loads settings from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path.as_ref().display()),
    })?;

    parse_config(&contents)
}

/// Parses settings from TOML text
///
/// # Errors
/// Returns an error if the TOML syntax is invalid or a value has the wrong type.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads settings from `GATEHOUSE_CONFIG` (or `./config.toml`).
///
/// A missing file is not an error: defaults are used and a warning is logged.
pub fn load_app_config() -> Result<AppConfig> {
    let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    tracing::debug!("Attempting to load configuration from: {path}");

    if !Path::new(&path).exists() {
        tracing::warn!("Config file {path} not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config(&path)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            [server]
            bind_address = "127.0.0.1:8080"

            [access]
            recent_limit = 25

            [reports]
            default_range_days = 7
            display_limit = 100
        "#;

        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.server.bind_address, "127.0.0.1:8080");
        assert_eq!(config.access.recent_limit, 25);
        assert_eq!(config.reports.default_range_days, 7);
        assert_eq!(config.reports.display_limit, 100);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = parse_config("[reports]\ndisplay_limit = 20\n").unwrap();
        assert_eq!(config.server.bind_address, "0.0.0.0:3000");
        assert_eq!(config.access.recent_limit, 10);
        assert_eq!(config.reports.default_range_days, 30);
        assert_eq!(config.reports.display_limit, 20);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = parse_config("[server\nbind_address = ");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_unreadable_file_is_config_error() {
        let result = load_config("/nonexistent/gatehouse/config.toml");
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
