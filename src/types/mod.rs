//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: AccountState and session defaults
//! - `action`: Actions and the identity token
//! - `error`: Rejections, invariant violations and host errors

pub mod account;
pub mod action;
pub mod error;

pub use account::{AccountState, DEFAULT_BALANCE, DEFAULT_DAILY_LIMIT};
pub use action::{Action, ActionType, Identity};
pub use error::{AtmError, InvariantViolation, Rejection};
