//! Configuration management for Garcom
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::cli::Cli;
use crate::error::{GarcomError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for Garcom
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend API settings
    #[serde(default)]
    pub backend: BackendConfig,
    /// Restaurant selection
    #[serde(default)]
    pub restaurant: RestaurantConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the restaurant REST backend
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_api_base() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Restaurant selection configuration
///
/// The id may be absent; the session then refuses suggestion generation
/// with a domain error instead of calling the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestaurantConfig {
    /// Id of the currently selected restaurant
    #[serde(default)]
    pub id: Option<String>,
}

impl Config {
    /// Loads configuration from a YAML file with env and CLI overrides
    ///
    /// Missing files fall back to defaults so the CLI works out of the box.
    /// Precedence, lowest to highest: file, environment
    /// (`GARCOM_API_BASE`, `GARCOM_RESTAURANT_ID`), CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read or parsed.
    pub fn load(path: &str, cli: &Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            let contents = std::fs::read_to_string(path)?;
            serde_yaml::from_str(&contents)?
        } else {
            tracing::debug!(path, "config file not found, using defaults");
            Self::default()
        };

        if let Ok(api_base) = std::env::var("GARCOM_API_BASE") {
            config.backend.api_base = api_base;
        }
        if let Ok(restaurant_id) = std::env::var("GARCOM_RESTAURANT_ID") {
            config.restaurant.id = Some(restaurant_id);
        }

        if let Some(api_base) = &cli.api_base {
            config.backend.api_base = api_base.clone();
        }
        if let Some(restaurant_id) = &cli.restaurant {
            config.restaurant.id = Some(restaurant_id.clone());
        }

        Ok(config)
    }

    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the backend base URL is empty or not HTTP(S),
    /// or the timeout is zero.
    pub fn validate(&self) -> Result<()> {
        if self.backend.api_base.is_empty() {
            return Err(GarcomError::Config("backend api_base must not be empty".to_string()).into());
        }
        if !self.backend.api_base.starts_with("http://")
            && !self.backend.api_base.starts_with("https://")
        {
            return Err(GarcomError::Config(format!(
                "backend api_base must be an HTTP(S) URL, got '{}'",
                self.backend.api_base
            ))
            .into());
        }
        if self.backend.timeout_seconds == 0 {
            return Err(
                GarcomError::Config("backend timeout_seconds must be positive".to_string()).into(),
            );
        }
        if let Some(id) = &self.restaurant.id {
            if id.trim().is_empty() {
                return Err(
                    GarcomError::Config("restaurant id must not be blank".to_string()).into(),
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Commands;

    fn bare_cli() -> Cli {
        Cli {
            config: None,
            api_base: None,
            restaurant: None,
            verbose: false,
            command: Commands::Validate,
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.backend.api_base, "http://localhost:3000");
        assert_eq!(config.backend.timeout_seconds, 30);
        assert!(config.restaurant.id.is_none());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = Config::load("/nonexistent/garcom.yaml", &bare_cli()).unwrap();
        assert_eq!(config.backend.api_base, default_api_base());
    }

    #[test]
    fn test_cli_overrides_win() {
        let mut cli = bare_cli();
        cli.api_base = Some("http://backend.test".to_string());
        cli.restaurant = Some("r42".to_string());

        let config = Config::load("/nonexistent/garcom.yaml", &cli).unwrap();
        assert_eq!(config.backend.api_base, "http://backend.test");
        assert_eq!(config.restaurant.id.as_deref(), Some("r42"));
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
backend:
  api_base: "https://api.example.com"
  timeout_seconds: 5
restaurant:
  id: "r1"
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.backend.api_base, "https://api.example.com");
        assert_eq!(config.backend.timeout_seconds, 5);
        assert_eq!(config.restaurant.id.as_deref(), Some("r1"));
    }

    #[test]
    fn test_parse_yaml_partial_uses_defaults() {
        let yaml = "restaurant:\n  id: \"r2\"\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.backend.api_base, default_api_base());
        assert_eq!(config.restaurant.id.as_deref(), Some("r2"));
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_api_base() {
        let mut config = Config::default();
        config.backend.api_base = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_http_api_base() {
        let mut config = Config::default();
        config.backend.api_base = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.backend.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_blank_restaurant_id() {
        let mut config = Config::default();
        config.restaurant.id = Some("  ".to_string());
        assert!(config.validate().is_err());
    }
}
