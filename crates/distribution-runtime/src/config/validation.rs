//! Configuration validation utilities.

use super::error::{ConfigError, ConfigResult};
use super::schema::{DistributionConfig, EventsConfig, LogOutput, LoggingConfig};

/// Validates the entire configuration.
pub fn validate_config(config: &DistributionConfig) -> ConfigResult<()> {
    validate_logging_config(&config.logging)?;
    validate_events_config(&config.events)?;
    Ok(())
}

/// Validates logging settings.
fn validate_logging_config(logging: &LoggingConfig) -> ConfigResult<()> {
    for target in logging.filters.keys() {
        if target.is_empty() {
            return Err(ConfigError::validation("Log filter target cannot be empty"));
        }
        if target.contains(char::is_whitespace) || target.contains('=') {
            return Err(ConfigError::validation(format!(
                "Invalid log filter target: '{target}'"
            )));
        }
    }

    if logging.max_files == 0 {
        return Err(ConfigError::validation("max_files must be greater than 0"));
    }

    if logging.output == LogOutput::File && logging.file_path.is_none() {
        return Err(ConfigError::missing_field("logging.file_path"));
    }

    Ok(())
}

/// Validates event publishing settings.
fn validate_events_config(events: &EventsConfig) -> ConfigResult<()> {
    validate_topic_base(&events.topic_base)
}

/// A topic base is a non-empty, slash-separated namespace without empty,
/// wildcard or whitespace-bearing segments.
fn validate_topic_base(base: &str) -> ConfigResult<()> {
    if base.is_empty() {
        return Err(ConfigError::missing_field("events.topic_base"));
    }
    if base.starts_with('/') || base.ends_with('/') {
        return Err(ConfigError::invalid_topic_base(
            base,
            "must not start or end with '/'",
        ));
    }
    for segment in base.split('/') {
        if segment.is_empty() {
            return Err(ConfigError::invalid_topic_base(base, "empty segment"));
        }
        if segment == "*" {
            return Err(ConfigError::invalid_topic_base(
                base,
                "wildcards are not allowed",
            ));
        }
        if segment.contains(char::is_whitespace) {
            return Err(ConfigError::invalid_topic_base(
                base,
                "segments cannot contain whitespace",
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::LogLevel;

    #[test]
    fn test_validate_default_config() {
        let config = DistributionConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_topic_base() {
        assert!(validate_topic_base("com/example/distribution").is_ok());
        assert!(validate_topic_base("single").is_ok());

        for bad in ["/abs", "trailing/", "a//b", "a/*", "a b/c"] {
            assert!(
                matches!(
                    validate_topic_base(bad),
                    Err(ConfigError::InvalidTopicBase { .. })
                ),
                "{bad} should be rejected"
            );
        }
        assert!(matches!(
            validate_topic_base(""),
            Err(ConfigError::MissingField { .. })
        ));
    }

    #[test]
    fn test_validate_file_output_needs_path() {
        let mut config = DistributionConfig::default();
        config.logging.output = LogOutput::File;
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::MissingField { field }) if field == "logging.file_path"
        ));

        config.logging.file_path = Some("logs/distribution.log".into());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_invalid_filter_target() {
        let mut config = DistributionConfig::default();
        config
            .logging
            .filters
            .insert("distribution core".to_string(), LogLevel::Debug);
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::ValidationError { .. })
        ));
    }
}
