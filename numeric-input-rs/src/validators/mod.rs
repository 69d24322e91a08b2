//! Value validation
//!
//! Parsing a field's final text into a number and classifying that number
//! against the field's acceptance range.

pub mod parse;
pub mod range;

pub use parse::*;
pub use range::*;
