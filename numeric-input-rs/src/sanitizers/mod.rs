//! Input sanitization utilities
//!
//! This module reduces raw keystroke text to the text a numeric field is
//! allowed to display. Sanitizers never fail; rejected characters are dropped.

pub mod numeric;

pub use numeric::*;

/// Sanitization result containing the sanitized content and information
/// about whether changes were made during sanitization
#[derive(Debug, Clone, PartialEq)]
pub struct SanitizeResult<T> {
    /// Sanitized content
    pub sanitized: T,
    /// Whether any changes were made during sanitization
    pub was_modified: bool,
    /// Optional details about what was modified
    pub details: Option<String>,
}

impl<T> SanitizeResult<T> {
    /// Create a new sanitization result
    pub fn new(sanitized: T, was_modified: bool, details: Option<String>) -> Self {
        Self {
            sanitized,
            was_modified,
            details,
        }
    }

    /// Create a result with unmodified content
    pub fn unmodified(content: T) -> Self {
        Self {
            sanitized: content,
            was_modified: false,
            details: None,
        }
    }

    /// Create a result with modified content
    pub fn modified(content: T, details: Option<String>) -> Self {
        Self {
            sanitized: content,
            was_modified: true,
            details,
        }
    }

    /// Consume the result, keeping only the sanitized content
    pub fn into_inner(self) -> T {
        self.sanitized
    }
}
