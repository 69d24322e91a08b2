//! Final value parsing
//!
//! Reads the number at the start of a field's final text. Anything after the
//! numeric prefix is ignored, and text without a single digit has no value.

use lazy_static::lazy_static;
use regex::Regex;

use crate::DEFAULT_SEPARATOR;

lazy_static! {
    static ref DEFAULT_PARSER: ValueParser =
        ValueParser::new(DEFAULT_SEPARATOR).unwrap();
}

/// Prefix number reader for one separator character
#[derive(Debug, Clone)]
pub struct ValueParser {
    separator: char,
    pattern: Regex,
}

impl ValueParser {
    /// Compile a parser for the given decimal separator
    pub fn new(separator: char) -> Result<Self, regex::Error> {
        let sep = regex::escape(&separator.to_string());
        let pattern = Regex::new(&format!(r"^\s*([+-]?)([0-9]*)(?:{}([0-9]*))?", sep))?;
        Ok(Self { separator, pattern })
    }

    /// The separator this parser recognizes
    pub fn separator(&self) -> char {
        self.separator
    }

    /// Parse the numeric prefix of `text`, or `None` if there are no digits
    pub fn parse(&self, text: &str) -> Option<f64> {
        let caps = self.pattern.captures(text)?;

        let sign = caps.get(1).map_or("", |m| m.as_str());
        let int_part = caps.get(2).map_or("", |m| m.as_str());
        let frac_part = caps.get(3).map_or("", |m| m.as_str());

        if int_part.is_empty() && frac_part.is_empty() {
            return None;
        }

        let normalized = format!(
            "{}{}.{}",
            sign,
            if int_part.is_empty() { "0" } else { int_part },
            if frac_part.is_empty() { "0" } else { frac_part }
        );

        normalized.parse::<f64>().ok()
    }
}

/// Parse the numeric prefix of `text` using `separator` as the decimal point
pub fn parse_value(text: &str, separator: char) -> Option<f64> {
    if separator == DEFAULT_PARSER.separator() {
        return DEFAULT_PARSER.parse(text);
    }

    match ValueParser::new(separator) {
        Ok(parser) => parser.parse(text),
        Err(e) => {
            log::warn!("Cannot build value parser for separator {:?}: {}", separator, e);
            None
        }
    }
}
