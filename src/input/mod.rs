//! Input shaping module
//!
//! Turns what the actor types into values the state machine accepts:
//! - `amount` - Raw text to [`EnteredAmount`] with the 8-character cap
//! - `keypad` - Digit-by-digit amount buffer

pub mod amount;
pub mod keypad;

pub use amount::{is_numeric_text, EnteredAmount, MAX_AMOUNT_INPUT_LEN};
pub use keypad::AmountEntry;
