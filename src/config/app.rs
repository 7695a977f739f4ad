//! Main application configuration
//!
//! This module defines the primary configuration structures for the kickabout
//! scorekeeper, including environment variable loading, TOML file loading and
//! validation.

use crate::config::{RatingSettings, SplitSettings};
use crate::error::ScorekeeperError;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub rating: RatingSettings,
    pub split: SplitSettings,
}

/// Service-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Name used in log output
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "kickabout".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file; environment variables still override it
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config = Self::from_toml_str(&raw)?;
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Parse configuration from TOML text without consulting the environment
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(raw).map_err(|e| anyhow!("Invalid configuration file: {}", e))?;
        validate_config(&config)?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }

        // Rating settings
        if let Ok(initial) = env::var("INITIAL_RATING") {
            self.rating.initial_rating = initial
                .parse()
                .map_err(|_| anyhow!("Invalid INITIAL_RATING value: {}", initial))?;
        }
        if let Ok(k_factor) = env::var("K_FACTOR") {
            self.rating.k_factor = k_factor
                .parse()
                .map_err(|_| anyhow!("Invalid K_FACTOR value: {}", k_factor))?;
        }

        // Split settings
        if let Ok(top_k) = env::var("SPLIT_TOP_K") {
            self.split.top_k = top_k
                .parse()
                .map_err(|_| anyhow!("Invalid SPLIT_TOP_K value: {}", top_k))?;
        }
        if let Ok(dedupe) = env::var("SPLIT_DEDUPE_COMPLEMENTS") {
            self.split.dedupe_complements = dedupe
                .parse()
                .map_err(|_| anyhow!("Invalid SPLIT_DEDUPE_COMPLEMENTS value: {}", dedupe))?;
        }

        Ok(())
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => {
            return Err(config_error(format!(
                "Invalid log level: {}",
                config.service.log_level
            )))
        }
    }

    // Validate rating settings
    if !config.rating.initial_rating.is_finite() {
        return Err(config_error("Initial rating must be a finite number"));
    }
    if !config.rating.k_factor.is_finite() || config.rating.k_factor <= 0.0 {
        return Err(config_error("K factor must be positive"));
    }

    // Validate split settings
    if config.split.top_k == 0 {
        return Err(config_error("Split top_k must be at least 1"));
    }

    Ok(())
}

fn config_error(message: impl Into<String>) -> anyhow::Error {
    ScorekeeperError::ConfigurationError {
        message: message.into(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.rating.initial_rating, 1500.0);
        assert_eq!(config.rating.k_factor, 32.0);
        assert_eq!(config.split.top_k, 3);
        assert!(config.split.dedupe_complements);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [rating]
            k_factor = 16.0

            [split]
            dedupe_complements = false
            "#,
        )
        .unwrap();

        assert_eq!(config.rating.k_factor, 16.0);
        assert_eq!(config.rating.initial_rating, 1500.0);
        assert!(!config.split.dedupe_complements);
        assert_eq!(config.split.top_k, 3);
        assert_eq!(config.service.log_level, "info");
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = AppConfig::default();
        config.service.log_level = "loud".to_string();
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.rating.k_factor = 0.0;
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.rating.k_factor = f64::NAN;
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.split.top_k = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_malformed_toml_rejected() {
        assert!(AppConfig::from_toml_str("[rating]\nk_factor = \"fast\"").is_err());
    }
}
