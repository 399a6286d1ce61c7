//! CSV format handling for action scripts and state output
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for deserialization
//! - Conversion from CSV records to actions
//! - Final state serialization
//!
//! All functions are pure (no I/O) for easy testing.

use crate::input::EnteredAmount;
use crate::types::{AccountState, Action, AtmError, Identity};
use serde::Deserialize;
use std::io::Write;

/// CSV record structure for deserialization
///
/// Matches the script format with columns: action, value.
/// The value holds the identity for a login and the amount text for
/// deposits, withdrawals and limit changes; other actions leave it empty.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvRecord {
    pub action: String,
    #[serde(default)]
    pub value: Option<String>,
}

/// Convert a CsvRecord to an Action
///
/// This function:
/// - Matches the action name case-insensitively (`-` and `_` are interchangeable)
/// - Requires a non-empty identity for `login`
/// - Shapes amount text into an [`EnteredAmount`] without judging it; an
///   unparsable amount is still a valid record and is rejected later by the
///   state machine as `InvalidAmount`
///
/// # Arguments
///
/// * `csv_record` - The deserialized CSV record
/// * `line` - Source line, used for error context
///
/// # Returns
///
/// * `Ok(Action)` - Successfully converted record
/// * `Err(AtmError::InvalidAction)` - Unknown action or login without identity
pub fn convert_csv_record(csv_record: CsvRecord, line: Option<u64>) -> Result<Action, AtmError> {
    let name = csv_record.action.trim().to_lowercase().replace('-', "_");
    let value = csv_record.value.unwrap_or_default();

    let action = match name.as_str() {
        "login" => {
            let token = value.trim();
            if token.is_empty() {
                return Err(AtmError::invalid_action(
                    &csv_record.action,
                    line,
                    "login requires an identity",
                ));
            }
            Action::Login(Identity::new(token))
        }
        "logout" => Action::Logout,
        "deposit" => Action::Deposit(EnteredAmount::parse(&value)),
        "withdraw" | "withdrawal" => Action::Withdraw(EnteredAmount::parse(&value)),
        "set_daily_limit" => Action::SetDailyLimit(EnteredAmount::parse(&value)),
        "reset_daily_limit" => Action::ResetDailyLimit,
        "toggle_dark_mode" => Action::ToggleDarkMode,
        _ => {
            return Err(AtmError::invalid_action(
                &csv_record.action,
                line,
                "unknown action",
            ))
        }
    };

    Ok(action)
}

/// Write the final session state in CSV format
///
/// Writes a header and one row with columns:
/// user, authenticated, balance, daily_limit, daily_withdrawn, dark_mode.
/// Money columns are printed with two decimal places.
///
/// # Arguments
///
/// * `state` - The state to write
/// * `output` - Mutable reference to a writer for outputting CSV
pub fn write_state_csv(state: &AccountState, output: &mut dyn Write) -> Result<(), AtmError> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer.write_record([
        "user",
        "authenticated",
        "balance",
        "daily_limit",
        "daily_withdrawn",
        "dark_mode",
    ])?;

    writer.write_record(&[
        state
            .identity
            .as_ref()
            .map(|identity| identity.to_string())
            .unwrap_or_default(),
        state.is_authenticated().to_string(),
        format!("{:.2}", state.balance),
        format!("{:.2}", state.daily_limit),
        format!("{:.2}", state.daily_withdrawn),
        state.dark_mode.to_string(),
    ])?;

    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;

    fn record(action: &str, value: Option<&str>) -> CsvRecord {
        CsvRecord {
            action: action.to_string(),
            value: value.map(|s| s.to_string()),
        }
    }

    #[rstest]
    #[case("login", Some("alice"), Action::login("alice"))]
    #[case("LOGIN", Some("  alice "), Action::login("alice"))]
    #[case("logout", None, Action::Logout)]
    #[case("deposit", Some("100"), Action::deposit("100"))]
    #[case("withdraw", Some("50.5"), Action::withdraw("50.5"))]
    #[case("Withdrawal", Some("50"), Action::withdraw("50"))]
    #[case("set_daily_limit", Some("1000"), Action::set_daily_limit("1000"))]
    #[case("set-daily-limit", Some("1000"), Action::set_daily_limit("1000"))]
    #[case("reset_daily_limit", None, Action::ResetDailyLimit)]
    #[case("toggle_dark_mode", Some("ignored"), Action::ToggleDarkMode)]
    fn test_convert_csv_record_valid(
        #[case] action: &str,
        #[case] value: Option<&str>,
        #[case] expected: Action,
    ) {
        let result = convert_csv_record(record(action, value), Some(2));
        assert_eq!(result, Ok(expected));
    }

    #[rstest]
    #[case::unparsable("deposit", Some("abc"))]
    #[case::missing("deposit", None)]
    #[case::too_long("withdraw", Some("123456789"))]
    fn test_convert_csv_record_keeps_bad_amounts(
        #[case] action: &str,
        #[case] value: Option<&str>,
    ) {
        let result = convert_csv_record(record(action, value), None).unwrap();

        let amount = match result {
            Action::Deposit(amount) | Action::Withdraw(amount) => amount,
            other => panic!("unexpected action {:?}", other),
        };
        assert!(matches!(amount, EnteredAmount::Invalid(_)));
    }

    #[rstest]
    #[case::unknown("transfer", Some("10"), "unknown action")]
    #[case::login_without_identity("login", None, "requires an identity")]
    #[case::login_blank_identity("login", Some("   "), "requires an identity")]
    fn test_convert_csv_record_errors(
        #[case] action: &str,
        #[case] value: Option<&str>,
        #[case] expected_error: &str,
    ) {
        let result = convert_csv_record(record(action, value), Some(7));

        let error = result.unwrap_err();
        assert!(matches!(error, AtmError::InvalidAction { line: Some(7), .. }));
        assert!(error.to_string().contains(expected_error));
    }

    #[rstest]
    #[case::defaults(
        AccountState::new(),
        "user,authenticated,balance,daily_limit,daily_withdrawn,dark_mode\n,false,2000.00,500.00,0.00,false\n"
    )]
    #[case::logged_in(
        AccountState {
            identity: Some(Identity::new("alice")),
            balance: Decimal::new(170025, 2),
            daily_limit: Decimal::from(1000),
            daily_withdrawn: Decimal::from(300),
            dark_mode: true,
        },
        "user,authenticated,balance,daily_limit,daily_withdrawn,dark_mode\nalice,true,1700.25,1000.00,300.00,true\n"
    )]
    fn test_write_state_csv(#[case] state: AccountState, #[case] expected_output: &str) {
        let mut output = Vec::new();
        let result = write_state_csv(&state, &mut output);
        assert!(result.is_ok());

        let output_str = String::from_utf8(output).unwrap();
        assert_eq!(output_str, expected_output);
    }
}
