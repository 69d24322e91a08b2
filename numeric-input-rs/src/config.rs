//! Per-field configuration
//!
//! A [`NumericInputConfig`] is built once when a field is bound and then only
//! read. It can be assembled from defaults with the `with_*` methods, from the
//! named string options a host attaches to the field, or from JSON.

use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, ConfigResult};
use crate::{
    DEFAULT_FORCE_TEXT_MODE, DEFAULT_MAX_FRACTION_DIGITS, DEFAULT_MAX_INTEGER_DIGITS,
    DEFAULT_MAX_VALUE, DEFAULT_MIN_VALUE, DEFAULT_SEPARATOR, DEFAULT_SEPARATOR_ALLOWED,
};

/// Configuration for one numeric input field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "RawConfig")]
pub struct NumericInputConfig {
    separator: char,
    separator_allowed: bool,
    max_integer_digits: usize,
    max_fraction_digits: usize,
    min_value: f64,
    max_value: f64,
    force_text_mode: bool,
    next_field_selector: Option<String>,
}

impl Default for NumericInputConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            separator_allowed: DEFAULT_SEPARATOR_ALLOWED,
            max_integer_digits: DEFAULT_MAX_INTEGER_DIGITS,
            max_fraction_digits: DEFAULT_MAX_FRACTION_DIGITS,
            min_value: DEFAULT_MIN_VALUE,
            max_value: DEFAULT_MAX_VALUE,
            force_text_mode: DEFAULT_FORCE_TEXT_MODE,
            next_field_selector: None,
        }
    }
}

impl NumericInputConfig {
    /// Create a configuration with the documented defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the decimal separator. Digits are rejected.
    pub fn with_separator(mut self, separator: char) -> ConfigResult<Self> {
        self.separator = check_separator(&separator.to_string())?;
        Ok(self)
    }

    /// Allow or forbid the separator entirely
    pub fn with_separator_allowed(mut self, allowed: bool) -> Self {
        self.separator_allowed = allowed;
        self
    }

    /// Cap the number of digits before the separator
    pub fn with_max_integer_digits(mut self, max: usize) -> Self {
        self.max_integer_digits = max;
        self
    }

    /// Cap the number of digits after the separator
    pub fn with_max_fraction_digits(mut self, max: usize) -> Self {
        self.max_fraction_digits = max;
        self
    }

    /// Set the inclusive acceptance range
    pub fn with_bounds(mut self, min: f64, max: f64) -> Self {
        self.min_value = min;
        self.max_value = max;
        self
    }

    /// Whether the host should present the field as free text while editing
    pub fn with_force_text_mode(mut self, force: bool) -> Self {
        self.force_text_mode = force;
        self
    }

    /// Field to focus after a commit key
    pub fn with_next_field_selector<S: Into<String>>(mut self, selector: S) -> Self {
        self.next_field_selector = Some(selector.into());
        self
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    pub fn separator_allowed(&self) -> bool {
        self.separator_allowed
    }

    pub fn max_integer_digits(&self) -> usize {
        self.max_integer_digits
    }

    pub fn max_fraction_digits(&self) -> usize {
        self.max_fraction_digits
    }

    pub fn min_value(&self) -> f64 {
        self.min_value
    }

    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    pub fn force_text_mode(&self) -> bool {
        self.force_text_mode
    }

    pub fn next_field_selector(&self) -> Option<&str> {
        self.next_field_selector.as_deref()
    }

    /// Opt-in consistency check. The sanitizer and validator never call this;
    /// an inverted range simply classifies every number as a violation.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.min_value > self.max_value {
            return Err(ConfigError::InvertedBounds {
                min: self.min_value,
                max: self.max_value,
            });
        }
        Ok(())
    }

    /// Build a configuration from named string options.
    ///
    /// Keys use the kebab-case option names; the short attribute names
    /// (`sep`, `has-sep`, `max-pre-sep`, `max-post-sep`, `force-type-to-text`)
    /// are accepted as aliases. Keys may carry a `data-` prefix. Unknown keys
    /// are logged and ignored. Options that are absent keep their defaults.
    pub fn from_options<I, K, V>(options: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();

        for (key, value) in options {
            let key = key.as_ref().trim();
            let key = key.strip_prefix("data-").unwrap_or(key);
            let value = value.as_ref().trim();

            match key {
                "separator" | "sep" => config.separator = check_separator(value)?,
                "separator-allowed" | "has-sep" => {
                    config.separator_allowed = parse_bool(key, value)?
                }
                "max-integer-digits" | "max-pre-sep" => {
                    config.max_integer_digits = parse_count(key, value)?
                }
                "max-fraction-digits" | "max-post-sep" => {
                    config.max_fraction_digits = parse_count(key, value)?
                }
                "min-value" => config.min_value = parse_bound(key, value)?,
                "max-value" => config.max_value = parse_bound(key, value)?,
                "force-text-mode" | "force-type-to-text" => {
                    config.force_text_mode = parse_bool(key, value)?
                }
                "next-field-selector" => {
                    config.next_field_selector = if value.is_empty() {
                        None
                    } else {
                        Some(value.to_string())
                    }
                }
                other => log::warn!("Ignoring unknown numeric input option '{}'", other),
            }
        }

        log::debug!("Loaded numeric input config: {:?}", config);
        Ok(config)
    }

    /// Build a configuration from a JSON object using the option names
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build a configuration from an already-parsed JSON value
    pub fn from_json_value(value: serde_json::Value) -> ConfigResult<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

/// Wire shape used while deserializing, so the separator can be checked
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
struct RawConfig {
    #[serde(alias = "sep")]
    separator: String,
    #[serde(alias = "has-sep")]
    separator_allowed: bool,
    #[serde(alias = "max-pre-sep")]
    max_integer_digits: usize,
    #[serde(alias = "max-post-sep")]
    max_fraction_digits: usize,
    min_value: f64,
    max_value: f64,
    #[serde(alias = "force-type-to-text")]
    force_text_mode: bool,
    next_field_selector: Option<String>,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            separator_allowed: DEFAULT_SEPARATOR_ALLOWED,
            max_integer_digits: DEFAULT_MAX_INTEGER_DIGITS,
            max_fraction_digits: DEFAULT_MAX_FRACTION_DIGITS,
            min_value: DEFAULT_MIN_VALUE,
            max_value: DEFAULT_MAX_VALUE,
            force_text_mode: DEFAULT_FORCE_TEXT_MODE,
            next_field_selector: None,
        }
    }
}

impl TryFrom<RawConfig> for NumericInputConfig {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        Ok(Self {
            separator: check_separator(&raw.separator)?,
            separator_allowed: raw.separator_allowed,
            max_integer_digits: raw.max_integer_digits,
            max_fraction_digits: raw.max_fraction_digits,
            min_value: raw.min_value,
            max_value: raw.max_value,
            force_text_mode: raw.force_text_mode,
            next_field_selector: raw.next_field_selector,
        })
    }
}

fn check_separator(value: &str) -> ConfigResult<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if !c.is_ascii_digit() => Ok(c),
        _ => Err(ConfigError::InvalidSeparator(value.to_string())),
    }
}

fn parse_bool(key: &str, value: &str) -> ConfigResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(ConfigError::invalid_option(key, value, "expected a boolean")),
    }
}

fn parse_count(key: &str, value: &str) -> ConfigResult<usize> {
    value
        .parse::<usize>()
        .map_err(|e| ConfigError::invalid_option(key, value, e.to_string()))
}

fn parse_bound(key: &str, value: &str) -> ConfigResult<f64> {
    match value.parse::<f64>() {
        Ok(bound) if bound.is_finite() => Ok(bound),
        Ok(_) => Err(ConfigError::invalid_option(key, value, "bound must be finite")),
        Err(e) => Err(ConfigError::invalid_option(key, value, e.to_string())),
    }
}
