//! Decimal quantity parsing.

use crate::error::ParseError;

/// Parse a quantity typed by a user or read from the pantry file.
///
/// Accepts any finite decimal (`2`, `0.5`, `-1.25`). Negative values are
/// allowed because stock may legitimately dip below zero after usage.
pub fn parse_quantity(input: &str) -> Result<f64, ParseError> {
    let trimmed = input.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ParseError::invalid_quantity(input)),
    }
}

/// Accept the result of quantity arithmetic only while it stays finite.
///
/// Sums of large finite inputs can overflow to infinity, which the pantry
/// file cannot represent.
pub fn checked_quantity(value: f64) -> Result<f64, ParseError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParseError::invalid_quantity(value.to_string()))
    }
}
