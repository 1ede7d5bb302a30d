//! Configuration loading and config file resolution

use crate::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::debug;

/// Gig service configuration
///
/// Values resolve in priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file
/// 4. Compiled default (fallback)
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// HTTP listen port
    pub port: u16,
    /// Run the fan-activity simulator alongside real intake
    pub simulate: bool,
    /// Display currency for simulated tips
    pub currency: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: 5850,
            simulate: false,
            currency: "USD".to_string(),
        }
    }
}

/// Load service configuration from the platform config file, falling back
/// to defaults when no file exists
pub fn load_service_config() -> Result<ServiceConfig> {
    let path = match find_config_file() {
        Some(path) => path,
        None => return Ok(ServiceConfig::default()),
    };
    debug!("Loading config from {}", path.display());

    let content = std::fs::read_to_string(&path)?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Locate the configuration file for the platform
///
/// Checks the user config directory first, then the system-wide location
/// on Linux.
pub fn find_config_file() -> Option<PathBuf> {
    if let Some(user_config) = dirs::config_dir().map(|d| d.join("bandit").join("config.toml")) {
        if user_config.exists() {
            return Some(user_config);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/bandit/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServiceConfig::default();
        assert_eq!(config.port, 5850);
        assert!(!config.simulate);
        assert_eq!(config.currency, "USD");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: ServiceConfig = toml::from_str("port = 6000").unwrap();
        assert_eq!(config.port, 6000);
        assert!(!config.simulate);
        assert_eq!(config.currency, "USD");
    }

    #[test]
    fn test_full_toml_roundtrip() {
        let config: ServiceConfig = toml::from_str(
            "port = 7000\nsimulate = true\ncurrency = \"EUR\"",
        )
        .unwrap();
        assert_eq!(config.port, 7000);
        assert!(config.simulate);
        assert_eq!(config.currency, "EUR");
    }
}
