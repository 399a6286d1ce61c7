//! Core traits for session persistence
//!
//! The transition function is pure; everything that outlives a process goes
//! through a [`SessionStore`]. Implementations can write to a file, keep the
//! record in memory, or do nothing at all.

use crate::types::{AccountState, AtmError, Identity};
use serde::{Deserialize, Serialize};

/// The key-value record kept between runs
///
/// Only the login marker and the dark-mode preference survive a restart.
/// Balances and limits are never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSession {
    /// Identity of the logged-in actor, `None` after logout
    #[serde(default)]
    pub user: Option<Identity>,

    /// Dark-mode preference
    #[serde(default)]
    pub dark_mode: bool,
}

impl PersistedSession {
    /// Extract the persisted part of a state
    pub fn from_state(state: &AccountState) -> Self {
        PersistedSession {
            user: state.identity.clone(),
            dark_mode: state.dark_mode,
        }
    }
}

/// Trait for loading and saving the persisted session record
pub trait SessionStore: Send {
    /// Load the stored record, `Ok(None)` when nothing has been stored yet
    fn load(&self) -> Result<Option<PersistedSession>, AtmError>;

    /// Replace the stored record
    fn save(&mut self, record: &PersistedSession) -> Result<(), AtmError>;
}
