//! Account state for the ATM session engine
//!
//! This module defines the AccountState value that every transition consumes
//! and produces, together with the defaults a fresh session starts from.

use super::action::Identity;
use super::error::InvariantViolation;
use rust_decimal::Decimal;

/// Balance of a freshly started session
pub const DEFAULT_BALANCE: Decimal = Decimal::from_parts(2000, 0, 0, false, 0);

/// Daily withdrawal ceiling of a fresh session and the value `ResetDailyLimit` restores
pub const DEFAULT_DAILY_LIMIT: Decimal = Decimal::from_parts(500, 0, 0, false, 0);

/// Financial and presentation state of one session
///
/// A value type: transitions never mutate an existing AccountState, they
/// return a new one. Equality is structural, so a rejected action can be
/// checked against its input with `==`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountState {
    /// The authenticated actor, if any
    ///
    /// Only presence matters to the transition rules.
    pub identity: Option<Identity>,

    /// Current funds
    ///
    /// Never negative under valid transitions.
    pub balance: Decimal,

    /// Ceiling on total withdrawals accumulated since the last reset
    pub daily_limit: Decimal,

    /// Running total of withdrawals applied since login
    pub daily_withdrawn: Decimal,

    /// Presentation preference carried across sessions
    pub dark_mode: bool,
}

impl AccountState {
    /// Create the state a session starts with
    ///
    /// # Returns
    ///
    /// A new AccountState with:
    /// - no identity
    /// - balance = 2000
    /// - daily_limit = 500
    /// - daily_withdrawn = 0
    /// - dark_mode = false
    pub fn new() -> Self {
        AccountState {
            identity: None,
            balance: DEFAULT_BALANCE,
            daily_limit: DEFAULT_DAILY_LIMIT,
            daily_withdrawn: Decimal::ZERO,
            dark_mode: false,
        }
    }

    /// Whether an actor is currently logged in
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// Withdrawals still allowed before the daily limit is reached
    ///
    /// Zero when the limit was lowered below what has already been withdrawn.
    pub fn remaining_allowance(&self) -> Decimal {
        (self.daily_limit - self.daily_withdrawn).max(Decimal::ZERO)
    }

    /// Verify the invariants that must hold after every transition
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The balance is negative
    /// - The daily limit is not strictly positive
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if self.balance < Decimal::ZERO {
            return Err(InvariantViolation::NegativeBalance {
                balance: self.balance,
            });
        }
        if self.daily_limit <= Decimal::ZERO {
            return Err(InvariantViolation::NonPositiveDailyLimit {
                daily_limit: self.daily_limit,
            });
        }
        Ok(())
    }
}

impl Default for AccountState {
    fn default() -> Self {
        Self::new()
    }
}
