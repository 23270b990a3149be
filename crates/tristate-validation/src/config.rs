//! Validator configuration

use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for field '{field}': '{value}'. Expected: {expected}")]
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },

    #[error("Configuration validation failed: {message}")]
    ValidationFailed { message: String },
}

impl ConfigError {
    /// Create an invalid value error
    pub fn invalid_value(
        field: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }
}

/// Knobs for building a rule registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Install `length`, `stringlength`, `url`, `requrl` and `requri`
    pub builtin_rules: bool,
    /// Upper bound (exclusive) on the byte length accepted by the `url` rule
    pub url_max_length: usize,
}

impl ValidatorConfig {
    pub const DEFAULT_URL_MAX_LENGTH: usize = 2083;

    pub fn new() -> Self {
        Self {
            builtin_rules: true,
            url_max_length: Self::DEFAULT_URL_MAX_LENGTH,
        }
    }

    /// Load configuration from `TRISTATE_*` environment variables, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::new();

        if let Ok(value) = env::var("TRISTATE_BUILTIN_RULES") {
            config.builtin_rules = value.parse().map_err(|_| {
                ConfigError::invalid_value("builtin_rules", value.as_str(), "true or false")
            })?;
        }

        if let Ok(value) = env::var("TRISTATE_URL_MAX_LENGTH") {
            config.url_max_length = value.parse().map_err(|_| {
                ConfigError::invalid_value("url_max_length", value.as_str(), "positive integer")
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url_max_length == 0 {
            return Err(ConfigError::ValidationFailed {
                message: "url_max_length must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self::new()
    }
}
