//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File not found at the specified path.
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    /// The configuration could not be parsed or extracted.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Invalid configuration value.
    #[error("Invalid configuration: {message}")]
    ValidationError { message: String },

    /// Missing required field.
    #[error("Missing required configuration field: {field}")]
    MissingField { field: String },

    /// Invalid event topic base.
    #[error("Invalid topic base '{base}': {reason}")]
    InvalidTopicBase { base: String, reason: String },
}

impl ConfigError {
    /// Creates a validation error with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    /// Creates a missing field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Creates an invalid topic base error.
    pub fn invalid_topic_base(base: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTopicBase {
            base: base.into(),
            reason: reason.into(),
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_figment_error_becomes_parse_error() {
        let err: ConfigError = figment::Error::from("invalid type".to_string()).into();
        assert!(matches!(&err, ConfigError::ParseError(msg) if msg.contains("invalid type")));
    }

    #[test]
    fn test_helper_constructors() {
        assert_eq!(
            ConfigError::invalid_topic_base("/a", "leading slash").to_string(),
            "Invalid topic base '/a': leading slash"
        );
        assert_eq!(
            ConfigError::missing_field("events.topic_base").to_string(),
            "Missing required configuration field: events.topic_base"
        );
    }
}
