//! Account transition function
//!
//! This module provides the pure state machine at the centre of the engine:
//! `transition(state, action) -> (state, outcome)`.
//!
//! The function enforces the account rules:
//! - Financial actions require an authenticated session
//! - Amounts must be parsed and strictly positive
//! - Withdrawals are gated by balance, then by the daily limit
//! - A rejected action returns its input state unchanged
//!
//! It performs no I/O and holds no state of its own. Persistence and logging
//! belong to the caller (see [`crate::core::session`]).

use crate::input::EnteredAmount;
use crate::types::{
    AccountState, Action, ActionType, Identity, Rejection, DEFAULT_BALANCE, DEFAULT_DAILY_LIMIT,
};
use rust_decimal::Decimal;

/// Result of a transition: `Ok(())` when applied, the rejection reason otherwise
pub type Outcome = Result<(), Rejection>;

/// Apply an action to a state
///
/// Pure and total: every action yields a state and an outcome. When the
/// outcome is a rejection the returned state equals `state`.
///
/// # Arguments
///
/// * `state` - The most recently committed state
/// * `action` - The action to apply
///
/// # Returns
///
/// The next state and the outcome of the action
pub fn transition(state: &AccountState, action: &Action) -> (AccountState, Outcome) {
    match apply(state, action) {
        Ok(next) => (next, Ok(())),
        Err(rejection) => (state.clone(), Err(rejection)),
    }
}

fn apply(state: &AccountState, action: &Action) -> Result<AccountState, Rejection> {
    let action_type = action.action_type();
    if action_type.requires_authentication() && !state.is_authenticated() {
        return Err(Rejection::not_authenticated(action_type));
    }

    match action {
        Action::Login(identity) => Ok(login(state, identity)),
        Action::Logout => Ok(logout(state)),
        Action::Deposit(amount) => deposit(state, amount),
        Action::Withdraw(amount) => withdraw(state, amount),
        Action::SetDailyLimit(limit) => set_daily_limit(state, limit),
        Action::ResetDailyLimit => Ok(AccountState {
            daily_limit: DEFAULT_DAILY_LIMIT,
            ..state.clone()
        }),
        Action::ToggleDarkMode => Ok(AccountState {
            dark_mode: !state.dark_mode,
            ..state.clone()
        }),
    }
}

/// Log an actor in
///
/// A login from the unauthenticated state opens a fresh session, so the
/// financial fields start from defaults. A login while already authenticated
/// only swaps the identity.
fn login(state: &AccountState, identity: &Identity) -> AccountState {
    if state.is_authenticated() {
        return AccountState {
            identity: Some(identity.clone()),
            ..state.clone()
        };
    }

    AccountState {
        identity: Some(identity.clone()),
        dark_mode: state.dark_mode,
        ..AccountState::new()
    }
}

/// Log the actor out, keeping only the dark-mode preference
fn logout(state: &AccountState) -> AccountState {
    AccountState {
        identity: None,
        balance: DEFAULT_BALANCE,
        daily_limit: DEFAULT_DAILY_LIMIT,
        daily_withdrawn: Decimal::ZERO,
        dark_mode: state.dark_mode,
    }
}

fn deposit(state: &AccountState, amount: &EnteredAmount) -> Result<AccountState, Rejection> {
    let amount = amount.positive()?;

    let balance = state
        .balance
        .checked_add(amount)
        .ok_or_else(|| Rejection::arithmetic_overflow(ActionType::Deposit))?;

    Ok(AccountState {
        balance,
        ..state.clone()
    })
}

/// Withdraw funds
///
/// Checks run in a fixed order and the first failure wins:
/// 1. amount is parsed and positive (`InvalidAmount`)
/// 2. amount does not exceed the balance (`InsufficientFunds`)
/// 3. the daily total stays within the limit (`DailyLimitExceeded`)
fn withdraw(state: &AccountState, amount: &EnteredAmount) -> Result<AccountState, Rejection> {
    let amount = amount.positive()?;

    if amount > state.balance {
        return Err(Rejection::insufficient_funds(state.balance, amount));
    }

    let daily_withdrawn = state
        .daily_withdrawn
        .checked_add(amount)
        .ok_or_else(|| Rejection::arithmetic_overflow(ActionType::Withdraw))?;

    if daily_withdrawn > state.daily_limit {
        return Err(Rejection::daily_limit_exceeded(
            state.daily_withdrawn,
            state.daily_limit,
            amount,
        ));
    }

    // Cannot underflow: amount <= balance was checked above
    let balance = state.balance - amount;

    Ok(AccountState {
        balance,
        daily_withdrawn,
        ..state.clone()
    })
}

fn set_daily_limit(state: &AccountState, limit: &EnteredAmount) -> Result<AccountState, Rejection> {
    let daily_limit = limit.positive()?;

    Ok(AccountState {
        daily_limit,
        ..state.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn dec(value: i64) -> Decimal {
        Decimal::from(value)
    }

    /// Default session with a logged-in actor
    #[fixture]
    fn logged_in() -> AccountState {
        let (state, outcome) = transition(&AccountState::new(), &Action::login("alice"));
        assert!(outcome.is_ok());
        state
    }

    #[rstest]
    fn test_deposit_increases_balance_only(logged_in: AccountState) {
        let (next, outcome) = transition(&logged_in, &Action::deposit("250"));

        assert_eq!(outcome, Ok(()));
        assert_eq!(next.balance, dec(2250));
        assert_eq!(
            next,
            AccountState {
                balance: dec(2250),
                ..logged_in
            }
        );
    }

    #[rstest]
    #[case::letters("abc")]
    #[case::empty("")]
    #[case::zero("0")]
    #[case::negative("-10")]
    #[case::too_long("100000000")]
    #[case::digit_separator("1_0")]
    #[case::trailing_separator("5_")]
    fn test_deposit_rejects_invalid_amount(logged_in: AccountState, #[case] raw: &str) {
        let (next, outcome) = transition(&logged_in, &Action::deposit(raw));

        assert!(matches!(outcome, Err(Rejection::InvalidAmount { .. })));
        assert_eq!(next, logged_in);
    }

    #[rstest]
    fn test_deposit_overflow_is_rejected(logged_in: AccountState) {
        let state = AccountState {
            balance: Decimal::MAX,
            ..logged_in
        };

        let (next, outcome) = transition(&state, &Action::Deposit(dec(1).into()));

        assert_eq!(
            outcome,
            Err(Rejection::arithmetic_overflow(ActionType::Deposit))
        );
        assert_eq!(next, state);
    }

    #[rstest]
    fn test_withdraw_debits_balance_and_accumulates(logged_in: AccountState) {
        let (next, outcome) = transition(&logged_in, &Action::withdraw("300"));

        assert_eq!(outcome, Ok(()));
        assert_eq!(next.balance, dec(1700));
        assert_eq!(next.daily_withdrawn, dec(300));
        assert_eq!(next.daily_limit, logged_in.daily_limit);
    }

    #[rstest]
    fn test_withdraw_over_limit_but_within_balance(logged_in: AccountState) {
        let (next, outcome) = transition(&logged_in, &Action::withdraw("600"));

        assert_eq!(
            outcome,
            Err(Rejection::daily_limit_exceeded(dec(0), dec(500), dec(600)))
        );
        assert_eq!(next, logged_in);
    }

    #[rstest]
    fn test_second_withdraw_hits_daily_limit(logged_in: AccountState) {
        let (first, outcome) = transition(&logged_in, &Action::withdraw("300"));
        assert_eq!(outcome, Ok(()));
        assert_eq!(first.balance, dec(1700));
        assert_eq!(first.daily_withdrawn, dec(300));

        let (second, outcome) = transition(&first, &Action::withdraw("300"));
        assert!(matches!(
            outcome,
            Err(Rejection::DailyLimitExceeded { .. })
        ));
        assert_eq!(second.balance, dec(1700));
        assert_eq!(second, first);
    }

    #[rstest]
    fn test_withdraw_exactly_to_limit_is_allowed(logged_in: AccountState) {
        let (next, outcome) = transition(&logged_in, &Action::withdraw("500"));

        assert_eq!(outcome, Ok(()));
        assert_eq!(next.daily_withdrawn, next.daily_limit);
    }

    #[rstest]
    fn test_withdraw_entire_balance_leaves_zero(logged_in: AccountState) {
        let state = AccountState {
            balance: dec(100),
            ..logged_in
        };

        let (next, outcome) = transition(&state, &Action::withdraw("100"));

        assert_eq!(outcome, Ok(()));
        assert_eq!(next.balance, Decimal::ZERO);
        assert!(next.check_invariants().is_ok());
    }

    // Every withdrawal below breaks more than one precondition; the reported
    // rejection must follow InvalidAmount > InsufficientFunds > DailyLimitExceeded.
    #[rstest]
    #[case::invalid_beats_everything("-5", dec(0), dec(10), "InvalidAmount")]
    #[case::unparsable_beats_everything("abc", dec(0), dec(10), "InvalidAmount")]
    #[case::funds_beat_limit("900", dec(100), dec(400), "InsufficientFunds")]
    #[case::limit_only("200", dec(2000), dec(400), "DailyLimitExceeded")]
    fn test_withdraw_precedence(
        logged_in: AccountState,
        #[case] raw: &str,
        #[case] balance: Decimal,
        #[case] withdrawn: Decimal,
        #[case] expected: &str,
    ) {
        let state = AccountState {
            balance,
            daily_withdrawn: withdrawn,
            ..logged_in
        };

        let (next, outcome) = transition(&state, &Action::withdraw(raw));

        let kind = match outcome {
            Err(Rejection::InvalidAmount { .. }) => "InvalidAmount",
            Err(Rejection::InsufficientFunds { .. }) => "InsufficientFunds",
            Err(Rejection::DailyLimitExceeded { .. }) => "DailyLimitExceeded",
            other => panic!("unexpected outcome {:?}", other),
        };
        assert_eq!(kind, expected);
        assert_eq!(next, state);
    }

    #[rstest]
    fn test_set_daily_limit_then_larger_withdraw(logged_in: AccountState) {
        let (raised, outcome) = transition(&logged_in, &Action::set_daily_limit("1000"));
        assert_eq!(outcome, Ok(()));
        assert_eq!(raised.daily_limit, dec(1000));

        let (next, outcome) = transition(&raised, &Action::withdraw("800"));
        assert_eq!(outcome, Ok(()));
        assert_eq!(next.daily_withdrawn, dec(800));
        assert_eq!(next.daily_limit, dec(1000));
        assert_eq!(next.balance, dec(1200));
    }

    #[rstest]
    #[case::zero("0")]
    #[case::negative("-1")]
    #[case::letters("lots")]
    fn test_set_daily_limit_rejects_invalid(logged_in: AccountState, #[case] raw: &str) {
        let (next, outcome) = transition(&logged_in, &Action::set_daily_limit(raw));

        assert!(matches!(outcome, Err(Rejection::InvalidAmount { .. })));
        assert_eq!(next, logged_in);
    }

    #[rstest]
    #[case(dec(1))]
    #[case(dec(500))]
    #[case(dec(25_000))]
    fn test_reset_daily_limit_restores_default(logged_in: AccountState, #[case] limit: Decimal) {
        let state = AccountState {
            daily_limit: limit,
            daily_withdrawn: dec(120),
            ..logged_in
        };

        let (next, outcome) = transition(&state, &Action::ResetDailyLimit);

        assert_eq!(outcome, Ok(()));
        assert_eq!(next.daily_limit, dec(500));
        assert_eq!(next.daily_withdrawn, dec(120));
    }

    #[rstest]
    fn test_toggle_dark_mode_is_involutive(logged_in: AccountState) {
        let (once, _) = transition(&logged_in, &Action::ToggleDarkMode);
        let (twice, _) = transition(&once, &Action::ToggleDarkMode);

        assert_ne!(once.dark_mode, logged_in.dark_mode);
        assert_eq!(twice, logged_in);
    }

    #[test]
    fn test_toggle_dark_mode_allowed_without_login() {
        let (next, outcome) = transition(&AccountState::new(), &Action::ToggleDarkMode);

        assert_eq!(outcome, Ok(()));
        assert!(next.dark_mode);
    }

    #[rstest]
    #[case(Action::deposit("10"), ActionType::Deposit)]
    #[case(Action::withdraw("abc"), ActionType::Withdraw)]
    #[case(Action::set_daily_limit("100"), ActionType::SetDailyLimit)]
    #[case(Action::ResetDailyLimit, ActionType::ResetDailyLimit)]
    fn test_financial_actions_require_login(#[case] action: Action, #[case] action_type: ActionType) {
        let state = AccountState::new();

        let (next, outcome) = transition(&state, &action);

        assert_eq!(outcome, Err(Rejection::not_authenticated(action_type)));
        assert_eq!(next, state);
    }

    #[rstest]
    fn test_rejected_action_is_idempotent(logged_in: AccountState) {
        let action = Action::withdraw("5000");

        let (first, first_outcome) = transition(&logged_in, &action);
        let (second, second_outcome) = transition(&first, &action);

        assert_eq!(first_outcome, second_outcome);
        assert_eq!(first, logged_in);
        assert_eq!(second, logged_in);
    }

    #[rstest]
    fn test_logout_resets_financials_and_keeps_dark_mode(logged_in: AccountState) {
        let state = AccountState {
            balance: dec(42),
            daily_limit: dec(900),
            daily_withdrawn: dec(300),
            dark_mode: true,
            ..logged_in
        };

        let (next, outcome) = transition(&state, &Action::Logout);

        assert_eq!(outcome, Ok(()));
        assert_eq!(
            next,
            AccountState {
                dark_mode: true,
                ..AccountState::new()
            }
        );
    }

    #[rstest]
    fn test_relogin_keeps_financial_state(logged_in: AccountState) {
        let (withdrawn, _) = transition(&logged_in, &Action::withdraw("100"));

        let (next, outcome) = transition(&withdrawn, &Action::login("bob"));

        assert_eq!(outcome, Ok(()));
        assert_eq!(next.identity, Some(Identity::new("bob")));
        assert_eq!(next.balance, dec(1900));
        assert_eq!(next.daily_withdrawn, dec(100));
    }

    #[test]
    fn test_fresh_login_keeps_dark_mode() {
        let (dark, _) = transition(&AccountState::new(), &Action::ToggleDarkMode);

        let (next, outcome) = transition(&dark, &Action::login("alice"));

        assert_eq!(outcome, Ok(()));
        assert!(next.is_authenticated());
        assert!(next.dark_mode);
        assert_eq!(next.balance, dec(2000));
    }

    #[rstest]
    fn test_invariants_hold_across_mixed_sequence(logged_in: AccountState) {
        let actions = [
            Action::deposit("150.25"),
            Action::withdraw("200"),
            Action::withdraw("999999"),
            Action::set_daily_limit("50"),
            Action::withdraw("10"),
            Action::ResetDailyLimit,
            Action::withdraw("250"),
            Action::ToggleDarkMode,
        ];

        let mut state = logged_in;
        for action in &actions {
            let (next, outcome) = transition(&state, action);
            assert!(next.check_invariants().is_ok());
            if matches!(action, Action::Withdraw(_)) && outcome.is_ok() {
                assert!(next.daily_withdrawn <= next.daily_limit);
            }
            state = next;
        }

        // 2000 + 150.25 - 200 - 250
        assert_eq!(state.balance, Decimal::new(170025, 2));
        assert_eq!(state.daily_withdrawn, dec(450));
    }
}
