//! Rust ATM Engine Library
//! # Overview
//!
//! This library implements the account state machine of a simulated ATM: a
//! single actor logs in, deposits, withdraws against a daily limit, adjusts
//! that limit and toggles a display preference. Action scripts can be replayed
//! with a sync strategy or through an async session dispatcher.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (AccountState, Action, errors)
//! - [`input`] - Amount entry shaping before the core (keypad buffer, parsing)
//! - [`core`] - Business logic components:
//!   - [`core::transition`] - The pure transition function
//!   - [`core::session`] - Session host committing states and persisting the record
//!   - [`core::session_store`] - JSON file and in-memory session stores
//!   - `core::async` - Single-flight session dispatcher for async hosts
//! - [`io`] - Action-script readers and final-state CSV output
//! - [`strategy`] - Pluggable sync/async replay pipelines
//! - [`cli`] - CLI arguments parsing and tracing setup
//!
//! # Actions
//!
//! - **Login / Logout**: start or end a session (logout restores defaults)
//! - **Deposit**: credit a positive amount
//! - **Withdraw**: debit a positive amount, bounded by balance and the daily limit
//! - **SetDailyLimit / ResetDailyLimit**: change the daily withdrawal ceiling
//! - **ToggleDarkMode**: flip the display preference
//!
//! Every action either commits a new state or is rejected with a
//! [`types::Rejection`] and leaves the state untouched.
//!
//! # Example
//!
//! ```
//! use rust_atm_engine::{transition, AccountState, Action};
//!
//! let state = AccountState::new();
//! let (state, outcome) = transition(&state, &Action::login("alice"));
//! assert!(outcome.is_ok());
//!
//! let (state, outcome) = transition(&state, &Action::withdraw("600"));
//! assert!(outcome.is_err());
//! assert_eq!(state.daily_withdrawn, rust_decimal::Decimal::ZERO);
//! ```

// Module declarations
pub mod cli;
pub mod core;
pub mod input;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{
    transition, JsonSessionStore, MemorySessionStore, Outcome, PersistedSession, Session,
    SessionDispatcher, SessionHandle, SessionStore, TransitionReport,
};
pub use input::{AmountEntry, EnteredAmount};
pub use io::write_state_csv;
pub use types::{AccountState, Action, ActionType, AtmError, Identity, InvariantViolation, Rejection};
