//! Core business logic module
//!
//! This module contains the session engine components:
//! - `transition` - The pure account state machine
//! - `session` - Session host that commits transitions and runs the persistence hook
//! - `traits` - Persistence abstraction and the persisted record
//! - `session_store` - JSON file and in-memory session stores
//! - `async` - Single-flight dispatcher for async hosts

pub mod r#async;
pub mod session;
pub mod session_store;
pub mod traits;
pub mod transition;

pub use r#async::{PendingReport, SessionDispatcher, SessionHandle};
pub use session::{Session, TransitionReport};
pub use session_store::{JsonSessionStore, MemorySessionStore};
pub use traits::{PersistedSession, SessionStore};
pub use transition::{transition, Outcome};
