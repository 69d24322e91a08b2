//! Error handling for the numeric input library
//!
//! Sanitization and range classification never fail. The only fallible
//! surface is loading a field configuration from named options or JSON,
//! which is what the errors in this module describe.

use thiserror::Error;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while building a [`crate::NumericInputConfig`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// An option value could not be parsed for its key
    #[error("Invalid value '{value}' for option '{key}': {reason}")]
    InvalidOption {
        /// Option name as supplied by the host
        key: String,
        /// Raw value as supplied by the host
        value: String,
        /// Why the value was rejected
        reason: String,
    },

    /// The separator must be exactly one non-digit character
    #[error("Invalid separator '{0}': expected a single non-digit character")]
    InvalidSeparator(String),

    /// Lower bound above upper bound
    #[error("Minimum value {min} is greater than maximum value {max}")]
    InvertedBounds {
        /// Configured lower bound
        min: f64,
        /// Configured upper bound
        max: f64,
    },

    /// JSON configuration could not be deserialized
    #[error("Invalid JSON configuration: {0}")]
    Json(String),
}

impl ConfigError {
    /// Create an invalid-option error
    pub fn invalid_option<K, V, R>(key: K, value: V, reason: R) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        R: Into<String>,
    {
        ConfigError::InvalidOption {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if the error concerns a single named option
    pub fn is_option_error(&self) -> bool {
        matches!(
            self,
            ConfigError::InvalidOption { .. } | ConfigError::InvalidSeparator(_)
        )
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Json(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_option_message() {
        let err = ConfigError::invalid_option("max-pre-sep", "four", "not an integer");
        assert!(err.is_option_error());
        assert_eq!(
            err.to_string(),
            "Invalid value 'four' for option 'max-pre-sep': not an integer"
        );
    }

    #[test]
    fn test_inverted_bounds_is_not_option_error() {
        let err = ConfigError::InvertedBounds { min: 10.0, max: 1.0 };
        assert!(!err.is_option_error());
        assert!(err.to_string().contains("greater than"));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ConfigError = json_err.into();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
