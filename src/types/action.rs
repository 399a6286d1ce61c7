//! Action types for the ATM session engine
//!
//! This module defines the user-initiated requests a presentation layer
//! submits to the state machine, and the opaque identity token carried by
//! a login.

use crate::input::EnteredAmount;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque token identifying the authenticated actor
///
/// The engine never inspects the token; it only records whether one is present.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// Wrap a token supplied by the presentation layer
    pub fn new(token: impl Into<String>) -> Self {
        Identity(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kinds of action, without payload
///
/// Used for log fields and error context where the payload is irrelevant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Login,
    Logout,
    Deposit,
    Withdraw,
    SetDailyLimit,
    ResetDailyLimit,
    ToggleDarkMode,
}

impl ActionType {
    /// Name used in action scripts and log output
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Login => "login",
            ActionType::Logout => "logout",
            ActionType::Deposit => "deposit",
            ActionType::Withdraw => "withdraw",
            ActionType::SetDailyLimit => "set_daily_limit",
            ActionType::ResetDailyLimit => "reset_daily_limit",
            ActionType::ToggleDarkMode => "toggle_dark_mode",
        }
    }

    /// Whether the action touches money or limits and therefore needs a logged-in actor
    pub fn requires_authentication(&self) -> bool {
        matches!(
            self,
            ActionType::Deposit
                | ActionType::Withdraw
                | ActionType::SetDailyLimit
                | ActionType::ResetDailyLimit
        )
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A discrete user-initiated request
///
/// Amount-carrying actions hold an [`EnteredAmount`]: either a parsed decimal or
/// the raw text that failed to parse. The transition function reports both an
/// unparsable and a non-positive amount as `InvalidAmount`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Start (or refresh) an authenticated session
    Login(Identity),

    /// End the session and reset financial state to defaults
    Logout,

    /// Credit the balance
    Deposit(EnteredAmount),

    /// Debit the balance, bounded by funds and the daily limit
    Withdraw(EnteredAmount),

    /// Replace the daily withdrawal ceiling
    SetDailyLimit(EnteredAmount),

    /// Restore the default daily withdrawal ceiling
    ResetDailyLimit,

    /// Flip the dark-mode preference
    ToggleDarkMode,
}

impl Action {
    pub fn action_type(&self) -> ActionType {
        match self {
            Action::Login(_) => ActionType::Login,
            Action::Logout => ActionType::Logout,
            Action::Deposit(_) => ActionType::Deposit,
            Action::Withdraw(_) => ActionType::Withdraw,
            Action::SetDailyLimit(_) => ActionType::SetDailyLimit,
            Action::ResetDailyLimit => ActionType::ResetDailyLimit,
            Action::ToggleDarkMode => ActionType::ToggleDarkMode,
        }
    }

    /// Convenience constructor parsing raw deposit text
    pub fn deposit(raw: &str) -> Self {
        Action::Deposit(EnteredAmount::parse(raw))
    }

    /// Convenience constructor parsing raw withdrawal text
    pub fn withdraw(raw: &str) -> Self {
        Action::Withdraw(EnteredAmount::parse(raw))
    }

    /// Convenience constructor parsing raw limit text
    pub fn set_daily_limit(raw: &str) -> Self {
        Action::SetDailyLimit(EnteredAmount::parse(raw))
    }

    pub fn login(token: impl Into<String>) -> Self {
        Action::Login(Identity::new(token))
    }
}
