//! Error types for the ATM session engine
//!
//! This module defines the error types that can occur while replaying a session.
//! Errors are designed to be descriptive and user-friendly for CLI output.
//!
//! # Error Categories
//!
//! - **Rejections**: user-correctable reasons an action was refused. These are
//!   returned as data from the transition function and never abort a replay.
//! - **Invariant violations**: a state that breaks the account invariants.
//! - **Host errors**: file I/O, script parsing, session persistence and
//!   dispatcher failures surrounding the core.

use super::action::ActionType;
use rust_decimal::Decimal;
use thiserror::Error;

/// Reason an action was refused by the transition function
///
/// Every variant is recoverable. A rejected action leaves the state
/// exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// Amount text was unparsable, or the value was zero or negative
    #[error("Invalid amount '{input}'")]
    InvalidAmount {
        /// The offending input as entered
        input: String,
    },

    /// Withdrawal exceeds the current balance
    #[error("Insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// Balance at the time of the request
        balance: Decimal,
        /// Requested withdrawal amount
        requested: Decimal,
    },

    /// Withdrawal would push the daily total past the daily limit
    #[error("Daily withdrawal limit exceeded: withdrawn {withdrawn} of {limit}, requested {requested}")]
    DailyLimitExceeded {
        /// Total already withdrawn since the last reset
        withdrawn: Decimal,
        /// Current daily limit
        limit: Decimal,
        /// Requested withdrawal amount
        requested: Decimal,
    },

    /// Financial action submitted without a logged-in actor
    #[error("{action} requires an authenticated session")]
    NotAuthenticated {
        /// The refused action
        action: ActionType,
    },

    /// Arithmetic overflow would occur
    #[error("Arithmetic overflow in {action}")]
    ArithmeticOverflow {
        /// Action whose arithmetic overflowed
        action: ActionType,
    },
}

impl Rejection {
    /// Create an InvalidAmount rejection
    pub fn invalid_amount(input: impl Into<String>) -> Self {
        Rejection::InvalidAmount {
            input: input.into(),
        }
    }

    /// Create an InsufficientFunds rejection
    pub fn insufficient_funds(balance: Decimal, requested: Decimal) -> Self {
        Rejection::InsufficientFunds { balance, requested }
    }

    /// Create a DailyLimitExceeded rejection
    pub fn daily_limit_exceeded(withdrawn: Decimal, limit: Decimal, requested: Decimal) -> Self {
        Rejection::DailyLimitExceeded {
            withdrawn,
            limit,
            requested,
        }
    }

    /// Create a NotAuthenticated rejection
    pub fn not_authenticated(action: ActionType) -> Self {
        Rejection::NotAuthenticated { action }
    }

    /// Create an ArithmeticOverflow rejection
    pub fn arithmetic_overflow(action: ActionType) -> Self {
        Rejection::ArithmeticOverflow { action }
    }
}

/// Broken account invariant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("Balance is negative: {balance}")]
    NegativeBalance { balance: Decimal },

    #[error("Daily limit must be positive, got {daily_limit}")]
    NonPositiveDailyLimit { daily_limit: Decimal },
}

/// Host-side error type
///
/// Covers everything around the core: reading action scripts, writing output,
/// persisting the session record and talking to the async dispatcher.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AtmError {
    /// File not found at the specified path
    ///
    /// This is a fatal error that prevents replay from starting.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    ///
    /// This is a recoverable error - the malformed record is skipped
    /// and replay continues with the next record.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// Action record could not be turned into an action
    ///
    /// Unknown action names and logins without an identity end up here.
    #[error("Invalid action '{action}'{}: {reason}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    InvalidAction {
        /// The action name as written
        action: String,
        /// Line number (if available)
        line: Option<u64>,
        /// Why the record was refused
        reason: String,
    },

    /// Loading or saving the persisted session record failed
    ///
    /// Never fatal to the in-memory session; the caller logs and continues.
    #[error("Session store error: {message}")]
    SessionStore {
        /// Description of the failure
        message: String,
    },

    /// The async session dispatcher is no longer accepting requests
    #[error("Session dispatcher closed")]
    DispatcherClosed,

    /// Async runtime could not be created or a task failed
    #[error("Runtime error: {message}")]
    Runtime {
        /// Description of the failure
        message: String,
    },
}

// Conversion from io::Error to AtmError
impl From<std::io::Error> for AtmError {
    fn from(error: std::io::Error) -> Self {
        AtmError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to AtmError
impl From<csv::Error> for AtmError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        AtmError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for AtmError {
    fn from(error: serde_json::Error) -> Self {
        AtmError::session_store(error.to_string())
    }
}

impl AtmError {
    /// Create a ParseError
    pub fn parse_error(line: Option<u64>, message: impl Into<String>) -> Self {
        AtmError::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create an InvalidAction error
    pub fn invalid_action(action: &str, line: Option<u64>, reason: &str) -> Self {
        AtmError::InvalidAction {
            action: action.to_string(),
            line,
            reason: reason.to_string(),
        }
    }

    /// Create a SessionStore error
    pub fn session_store(message: impl Into<String>) -> Self {
        AtmError::SessionStore {
            message: message.into(),
        }
    }

    /// Create a Runtime error
    pub fn runtime(message: impl Into<String>) -> Self {
        AtmError::Runtime {
            message: message.into(),
        }
    }
}
