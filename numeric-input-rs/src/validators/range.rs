//! Range classification
//!
//! Classifies a field's final value against the configured inclusive bounds.
//! A violation is a normal outcome here, not an error: the caller receives the
//! ordered list of signals to raise and decides how to present them.

use std::fmt;

use serde::Serialize;

use crate::config::NumericInputConfig;
use crate::validators::parse::parse_value;

/// Kind of a validation outcome, used to route outcomes to observers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutcomeKind {
    BelowMin,
    AboveMax,
    RangeViolation,
    Ok,
    Invalid,
}

impl OutcomeKind {
    /// Name of the outbound signal raised for this kind
    pub fn signal_name(self) -> &'static str {
        match self {
            OutcomeKind::BelowMin => "below-min",
            OutcomeKind::AboveMax => "above-max",
            OutcomeKind::RangeViolation => "range-violation",
            OutcomeKind::Ok => "value-ok",
            OutcomeKind::Invalid => "value-invalid",
        }
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.signal_name())
    }
}

/// One classified signal for a final field value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "signal")]
pub enum ValidationOutcome {
    /// Value is below the lower bound
    #[serde(rename = "below-min", rename_all = "kebab-case")]
    BelowMin { value: f64, min_value: f64 },

    /// Value is above the upper bound
    #[serde(rename = "above-max", rename_all = "kebab-case")]
    AboveMax { value: f64, max_value: f64 },

    /// Raised right after either bound violation
    #[serde(rename = "range-violation", rename_all = "kebab-case")]
    RangeViolation {
        value: f64,
        min_value: f64,
        max_value: f64,
    },

    /// Value is inside the inclusive range
    #[serde(rename = "value-ok", rename_all = "kebab-case")]
    Ok {
        value: f64,
        min_value: f64,
        max_value: f64,
    },

    /// Final text did not hold a number
    #[serde(rename = "value-invalid", rename_all = "kebab-case")]
    Invalid { min_value: f64, max_value: f64 },
}

impl ValidationOutcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            ValidationOutcome::BelowMin { .. } => OutcomeKind::BelowMin,
            ValidationOutcome::AboveMax { .. } => OutcomeKind::AboveMax,
            ValidationOutcome::RangeViolation { .. } => OutcomeKind::RangeViolation,
            ValidationOutcome::Ok { .. } => OutcomeKind::Ok,
            ValidationOutcome::Invalid { .. } => OutcomeKind::Invalid,
        }
    }

    /// The classified value, absent for [`ValidationOutcome::Invalid`]
    pub fn value(&self) -> Option<f64> {
        match self {
            ValidationOutcome::BelowMin { value, .. }
            | ValidationOutcome::AboveMax { value, .. }
            | ValidationOutcome::RangeViolation { value, .. }
            | ValidationOutcome::Ok { value, .. } => Some(*value),
            ValidationOutcome::Invalid { .. } => None,
        }
    }

    /// True for the three signals raised on an out-of-range value
    pub fn is_violation(&self) -> bool {
        matches!(
            self.kind(),
            OutcomeKind::BelowMin | OutcomeKind::AboveMax | OutcomeKind::RangeViolation
        )
    }

    /// Signal payload with kebab-case keys, without the signal name
    pub fn payload(&self) -> serde_json::Value {
        let mut value = serde_json::to_value(self).unwrap_or(serde_json::Value::Null);
        if let Some(map) = value.as_object_mut() {
            map.remove("signal");
        }
        value
    }
}

/// Classify `value` against the configured bounds.
///
/// Returns the signals to raise, in order: a bound violation is followed by a
/// generic [`ValidationOutcome::RangeViolation`], an in-range value yields a
/// single [`ValidationOutcome::Ok`], and NaN yields a single
/// [`ValidationOutcome::Invalid`].
pub fn validate(value: f64, config: &NumericInputConfig) -> Vec<ValidationOutcome> {
    let min_value = config.min_value();
    let max_value = config.max_value();

    let outcomes = if value.is_nan() {
        vec![ValidationOutcome::Invalid {
            min_value,
            max_value,
        }]
    } else if value < min_value {
        vec![
            ValidationOutcome::BelowMin { value, min_value },
            ValidationOutcome::RangeViolation {
                value,
                min_value,
                max_value,
            },
        ]
    } else if value > max_value {
        vec![
            ValidationOutcome::AboveMax { value, max_value },
            ValidationOutcome::RangeViolation {
                value,
                min_value,
                max_value,
            },
        ]
    } else {
        vec![ValidationOutcome::Ok {
            value,
            min_value,
            max_value,
        }]
    };

    log::debug!(
        "Classified {} against [{}, {}] as {}",
        value,
        min_value,
        max_value,
        outcomes[0].kind()
    );

    outcomes
}

/// Parse a field's final text and classify it. Text without a number is NaN.
pub fn validate_text(text: &str, config: &NumericInputConfig) -> Vec<ValidationOutcome> {
    let value = parse_value(text, config.separator()).unwrap_or(f64::NAN);
    validate(value, config)
}
