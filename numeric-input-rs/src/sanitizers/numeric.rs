//! Numeric text sanitization
//!
//! Reduces whatever the host field currently holds to digits and at most one
//! separator, with the digit groups on either side of the separator capped by
//! the field configuration. The whole text is rescanned on every call, so the
//! function carries no state between keystrokes and is idempotent: feeding its
//! output back in returns the same text.

use super::SanitizeResult;
use crate::config::NumericInputConfig;

/// Characters removed or inserted during one scan, used for result details
#[derive(Debug, Default)]
struct ScanReport {
    invalid_chars: usize,
    extra_separators: usize,
    excess_integer_digits: usize,
    excess_fraction_digits: usize,
    leading_zeros: usize,
    inserted_zero: bool,
}

impl ScanReport {
    fn describe(&self) -> Option<String> {
        let mut parts = Vec::new();

        if self.invalid_chars > 0 {
            parts.push(format!("Removed {} invalid characters", self.invalid_chars));
        }
        if self.extra_separators > 0 {
            parts.push(format!("Removed {} extra separators", self.extra_separators));
        }
        if self.excess_integer_digits > 0 {
            parts.push(format!(
                "Dropped {} digits over the integer limit",
                self.excess_integer_digits
            ));
        }
        if self.excess_fraction_digits > 0 {
            parts.push(format!(
                "Dropped {} digits over the fraction limit",
                self.excess_fraction_digits
            ));
        }
        if self.leading_zeros > 0 {
            parts.push(format!("Stripped {} leading zeros", self.leading_zeros));
        }
        if self.inserted_zero {
            parts.push("Inserted zero before separator".to_string());
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join("; "))
        }
    }
}

/// Sanitize raw field text against the field configuration.
///
/// Digits before the separator are capped at `max_integer_digits` and digits
/// after it at `max_fraction_digits`; the first separator is kept (when
/// allowed) and every other character is dropped. Leading zeros are stripped
/// while another digit follows them, so they never use up the integer budget,
/// and a text that starts with the separator gets a single `0` in front of it.
pub fn sanitize(raw: &str, config: &NumericInputConfig) -> SanitizeResult<String> {
    let separator = config.separator();
    let max_pre = config.max_integer_digits();
    let max_post = config.max_fraction_digits();

    let mut out = String::with_capacity(raw.len() + 1);
    let mut report = ScanReport::default();
    let mut separator_seen = false;
    let mut pre_count = 0usize;
    let mut post_count = 0usize;

    for c in raw.chars() {
        if c.is_ascii_digit() {
            if separator_seen {
                if post_count < max_post {
                    out.push(c);
                    post_count += 1;
                } else {
                    report.excess_fraction_digits += 1;
                }
            } else if out == "0" {
                // A lone leading zero is replaced by the next digit
                out.clear();
                out.push(c);
                report.leading_zeros += 1;
            } else if pre_count < max_pre {
                out.push(c);
                pre_count += 1;
            } else {
                report.excess_integer_digits += 1;
            }
        } else if c == separator && config.separator_allowed() {
            if separator_seen {
                report.extra_separators += 1;
            } else {
                out.push(separator);
                separator_seen = true;
            }
        } else {
            report.invalid_chars += 1;
        }
    }

    // Never insert a zero the integer cap would forbid
    if max_pre > 0 && out.starts_with(separator) {
        out.insert(0, '0');
        report.inserted_zero = true;
    }

    if out == raw {
        SanitizeResult::unmodified(out)
    } else {
        let details = report.describe();
        log::trace!(
            "Sanitized numeric input {:?} -> {:?} ({})",
            raw,
            out,
            details.as_deref().unwrap_or_default()
        );
        SanitizeResult::modified(out, details)
    }
}

/// Sanitize and return only the corrected text
pub fn sanitize_text(raw: &str, config: &NumericInputConfig) -> String {
    sanitize(raw, config).into_inner()
}
