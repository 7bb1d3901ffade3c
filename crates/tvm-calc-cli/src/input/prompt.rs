//! Explicit parsing of values typed at interactive prompts.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::{CliError, Result};

/// A value that can be read from a single prompt line.
pub trait PromptValue: FromStr {
    /// Human description used in parse-failure messages.
    const EXPECTED: &'static str;
}

impl PromptValue for Decimal {
    const EXPECTED: &'static str = "number (e.g. 1000 or 0.05)";
}

impl PromptValue for u32 {
    const EXPECTED: &'static str = "whole number (e.g. 12)";
}

/// Parse one trimmed prompt line, naming `field` on failure.
pub fn parse_field<T: PromptValue>(field: &str, raw: &str) -> Result<T> {
    let trimmed = raw.trim();
    trimmed.parse::<T>().map_err(|_| CliError::InputParse {
        field: field.to_string(),
        value: trimmed.to_string(),
        expected: T::EXPECTED,
    })
}
