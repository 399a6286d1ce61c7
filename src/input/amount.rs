//! Amount text parsing
//!
//! Amounts are entered as text. Before an action reaches the state machine the
//! text is shaped into an [`EnteredAmount`]: either a parsed decimal or the raw
//! text that failed to parse. The core never sees raw strings.

use crate::types::Rejection;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// Longest amount text accepted, in characters
///
/// Bounds the magnitude of anything typed into the amount field.
pub const MAX_AMOUNT_INPUT_LEN: usize = 8;

/// An amount as it arrives from the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnteredAmount {
    /// Successfully parsed decimal (sign not yet checked)
    Value(Decimal),

    /// Text that is empty, too long, or not a number
    Invalid(String),
}

impl EnteredAmount {
    /// Parse raw amount text
    ///
    /// Surrounding whitespace is ignored. Empty text, text longer than
    /// [`MAX_AMOUNT_INPUT_LEN`] characters, and anything that is not plain
    /// decimal notation (see [`is_numeric_text`]) become
    /// [`EnteredAmount::Invalid`].
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.chars().count() > MAX_AMOUNT_INPUT_LEN || !is_numeric_text(trimmed) {
            return EnteredAmount::Invalid(trimmed.to_string());
        }

        match Decimal::from_str(trimmed) {
            Ok(value) => EnteredAmount::Value(value),
            Err(_) => EnteredAmount::Invalid(trimmed.to_string()),
        }
    }

    /// The amount as a strictly positive decimal
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` for unparsable text and for values ≤ 0.
    pub fn positive(&self) -> Result<Decimal, Rejection> {
        match self {
            EnteredAmount::Value(value) if *value > Decimal::ZERO => Ok(*value),
            other => Err(Rejection::invalid_amount(other.to_string())),
        }
    }
}

/// Whether `text` is plain decimal notation
///
/// An optional sign, then digits with at most one `.`, and at least one digit.
/// Digit separators (`1_0`) and exponents (`1e3`) are not numbers here, even
/// though `Decimal::from_str` accepts separators.
pub fn is_numeric_text(text: &str) -> bool {
    let unsigned = text.strip_prefix(&['+', '-'][..]).unwrap_or(text);

    let mut digits = 0;
    let mut points = 0;
    for c in unsigned.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => points += 1,
            _ => return false,
        }
    }

    digits > 0 && points <= 1
}

impl From<Decimal> for EnteredAmount {
    fn from(value: Decimal) -> Self {
        EnteredAmount::Value(value)
    }
}

impl fmt::Display for EnteredAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnteredAmount::Value(value) => write!(f, "{}", value),
            EnteredAmount::Invalid(raw) => f.write_str(raw),
        }
    }
}
