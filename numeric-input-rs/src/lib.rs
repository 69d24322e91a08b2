//! # Numeric Input Library
//!
//! Real-time sanitization and range validation for numeric text entry on
//! touch-oriented text fields. The host UI delivers the raw text on every
//! edit and the final text when the edit session ends; this library returns
//! the corrected text and the classified range outcome.
//!
//! ## Features
//!
//! - Single-pass sanitizer with digit caps on both sides of one separator
//! - Inclusive range classification with ordered violation signals
//! - Explicit handling of final text that holds no number
//! - Per-field controller with observer registration and input-mode switching
//! - Configuration from named field options or JSON

mod config;
mod controller;
mod errors;
pub mod sanitizers;
pub mod validators;

pub use config::NumericInputConfig;
pub use controller::{InputMode, NumericField, NumericInput, COMMIT_KEYS};
pub use errors::{ConfigError, ConfigResult};
pub use sanitizers::{sanitize, sanitize_text, SanitizeResult};
pub use validators::{parse_value, validate, validate_text, OutcomeKind, ValidationOutcome};

/// Re-export commonly used items for convenience
pub mod prelude {
    pub use crate::config::NumericInputConfig;
    pub use crate::controller::{InputMode, NumericField, NumericInput};
    pub use crate::errors::{ConfigError, ConfigResult};
    pub use crate::sanitizers;
    pub use crate::validators;
    pub use crate::validators::{OutcomeKind, ValidationOutcome};
}

/// Version of the numeric input library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default decimal separator
pub const DEFAULT_SEPARATOR: char = '.';

/// Whether a separator is accepted by default
pub const DEFAULT_SEPARATOR_ALLOWED: bool = true;

/// Default cap on digits before the separator
pub const DEFAULT_MAX_INTEGER_DIGITS: usize = 4;

/// Default cap on digits after the separator
pub const DEFAULT_MAX_FRACTION_DIGITS: usize = 2;

/// Default inclusive lower bound
pub const DEFAULT_MIN_VALUE: f64 = 5.00;

/// Default inclusive upper bound
pub const DEFAULT_MAX_VALUE: f64 = 2000.00;

/// Whether fields are switched to text mode while editing by default
pub const DEFAULT_FORCE_TEXT_MODE: bool = true;

/// Get a new default field configuration
pub fn default_config() -> NumericInputConfig {
    NumericInputConfig::default()
}
