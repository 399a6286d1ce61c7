//! Session host
//!
//! This module provides the `Session` struct which owns the single long-lived
//! AccountState of one actor and drives it through the transition function.
//!
//! The Session is responsible for:
//! - Serializing actions (`apply` takes `&mut self`)
//! - Committing the state returned by each transition
//! - Logging outcomes
//! - Writing the persisted record after a login, a logout or a dark-mode change
//! - Restoring identity and dark mode from the persisted record at start-up
//!
//! Store failures are logged and swallowed; they never alter the in-memory state.

use crate::core::traits::{PersistedSession, SessionStore};
use crate::core::transition::{transition, Outcome};
use crate::types::{AccountState, Action, ActionType};
use tracing::{debug, error, info, warn};

/// What happened to one submitted action
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionReport {
    /// Kind of the submitted action
    pub action: ActionType,

    /// Applied or the rejection reason
    pub outcome: Outcome,

    /// Committed state after the action
    pub state: AccountState,
}

/// Owner of one actor's state
pub struct Session {
    state: AccountState,
    store: Option<Box<dyn SessionStore>>,
}

impl Session {
    /// Create a session with default state and no persistence
    pub fn new() -> Self {
        Session {
            state: AccountState::new(),
            store: None,
        }
    }

    /// Create a session with default state that persists to `store`
    ///
    /// Nothing is loaded from the store; see [`Session::restore`].
    pub fn with_store<S: SessionStore + 'static>(store: S) -> Self {
        Session {
            state: AccountState::new(),
            store: Some(Box::new(store)),
        }
    }

    /// Bootstrap a session from the persisted record in `store`
    ///
    /// A stored identity is replayed as a login and a stored dark-mode flag as
    /// a toggle, so the restored state is exactly what those actions produce.
    /// An unreadable record is logged and the session starts from defaults.
    pub fn restore<S: SessionStore + 'static>(store: S) -> Self {
        let mut state = AccountState::new();

        match store.load() {
            Ok(Some(record)) => {
                if let Some(user) = record.user {
                    state = transition(&state, &Action::Login(user)).0;
                }
                if record.dark_mode {
                    state = transition(&state, &Action::ToggleDarkMode).0;
                }
                info!(
                    authenticated = state.is_authenticated(),
                    dark_mode = state.dark_mode,
                    "Restored session record"
                );
            }
            Ok(None) => debug!("No session record found, starting fresh"),
            Err(e) => warn!(error = %e, "Failed to load session record, starting fresh"),
        }

        Session {
            state,
            store: Some(Box::new(store)),
        }
    }

    /// The most recently committed state
    pub fn state(&self) -> &AccountState {
        &self.state
    }

    /// Consume the session, keeping its final state
    pub fn into_state(self) -> AccountState {
        self.state
    }

    /// Submit one action
    ///
    /// Runs the transition against the committed state, commits the result
    /// and, when the persisted fields changed, writes the session record.
    pub fn apply(&mut self, action: Action) -> TransitionReport {
        let action_type = action.action_type();
        let (next, outcome) = transition(&self.state, &action);

        match &outcome {
            Ok(()) => debug!(
                action = %action_type,
                balance = %next.balance,
                daily_withdrawn = %next.daily_withdrawn,
                daily_limit = %next.daily_limit,
                "Action applied"
            ),
            Err(rejection) => info!(action = %action_type, %rejection, "Action rejected"),
        }

        let persist = outcome.is_ok()
            && (matches!(action_type, ActionType::Login | ActionType::Logout)
                || next.dark_mode != self.state.dark_mode);

        self.state = next;

        if persist {
            self.persist();
        }

        TransitionReport {
            action: action_type,
            outcome,
            state: self.state.clone(),
        }
    }

    fn persist(&mut self) {
        let Some(store) = self.store.as_mut() else {
            return;
        };

        let record = PersistedSession::from_state(&self.state);
        if let Err(e) = store.save(&record) {
            error!(error = %e, "Failed to write session record");
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("persistent", &self.store.is_some())
            .finish()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
