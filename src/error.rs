//! Error types for Garcom
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Garcom operations
///
/// This enum encompasses all possible errors that can occur during
/// configuration loading, suggestion generation, catalog lookups,
/// and flow navigation.
#[derive(Error, Debug)]
pub enum GarcomError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Suggestion provider errors (backend calls, bad responses)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Dish catalog errors (listing, lookup by id)
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Flow navigation errors (malformed table, unresolved steps)
    #[error("Navigation error: {0}")]
    Navigation(String),

    /// No restaurant selected when a suggestion was requested
    ///
    /// The message is matched by the session's user-facing copy selection,
    /// so the Portuguese phrase is part of the contract.
    #[error("Restaurante não selecionado")]
    MissingRestaurant,

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Garcom operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = GarcomError::Config("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_provider_error_display() {
        let error = GarcomError::Provider("backend timeout".to_string());
        assert_eq!(error.to_string(), "Provider error: backend timeout");
    }

    #[test]
    fn test_catalog_error_display() {
        let error = GarcomError::Catalog("dish not found".to_string());
        assert_eq!(error.to_string(), "Catalog error: dish not found");
    }

    #[test]
    fn test_navigation_error_display() {
        let error = GarcomError::Navigation("missing start step".to_string());
        assert_eq!(error.to_string(), "Navigation error: missing start step");
    }

    #[test]
    fn test_missing_restaurant_message_is_stable() {
        // The session copy matcher searches for this exact phrase.
        let error = GarcomError::MissingRestaurant;
        assert_eq!(error.to_string(), "Restaurante não selecionado");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: GarcomError = io_error.into();
        assert!(matches!(error, GarcomError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_str = "{invalid json}";
        let json_error = serde_json::from_str::<serde_json::Value>(json_str).unwrap_err();
        let error: GarcomError = json_error.into();
        assert!(matches!(error, GarcomError::Serialization(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_str = "invalid: : yaml";
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let error: GarcomError = yaml_error.into();
        assert!(matches!(error, GarcomError::Yaml(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GarcomError>();
    }
}
