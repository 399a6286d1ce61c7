//! Keypad amount buffer
//!
//! Models the amount field of an ATM screen: digits are appended one key at a
//! time, free typing is accepted only while the text stays numeric, and the
//! buffer never grows past [`MAX_AMOUNT_INPUT_LEN`] characters.

use super::amount::{is_numeric_text, EnteredAmount, MAX_AMOUNT_INPUT_LEN};

/// Amount text being composed by the actor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmountEntry {
    buffer: String,
}

impl AmountEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Append one keypad digit
    ///
    /// Returns `false` (and leaves the buffer alone) when the buffer is full
    /// or `digit` is not 0-9.
    pub fn push_digit(&mut self, digit: char) -> bool {
        if !digit.is_ascii_digit() || self.buffer.len() >= MAX_AMOUNT_INPUT_LEN {
            return false;
        }
        self.buffer.push(digit);
        true
    }

    /// Replace the buffer with free-typed text
    ///
    /// Accepted only when the text is at most [`MAX_AMOUNT_INPUT_LEN`]
    /// characters and is either empty or a number. Returns whether the text
    /// was accepted.
    pub fn replace(&mut self, text: &str) -> bool {
        let acceptable = text.chars().count() <= MAX_AMOUNT_INPUT_LEN
            && (text.trim().is_empty() || is_numeric_text(text.trim()));
        if acceptable {
            self.buffer = text.to_string();
        }
        acceptable
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Hand the composed text over as an amount and empty the buffer
    pub fn submit(&mut self) -> EnteredAmount {
        let amount = EnteredAmount::parse(&self.buffer);
        self.buffer.clear();
        amount
    }
}
