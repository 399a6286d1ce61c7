//! Asynchronous session hosting
//!
//! This module provides the tokio-based host for a [`Session`](crate::core::Session):
//!
//! - **SessionDispatcher**: owns the session inside a task and applies queued
//!   actions one at a time
//! - **SessionHandle**: cloneable endpoint that submits actions and awaits reports
//! - **PendingReport**: reply to an action that was queued but not awaited
//!
//! # Thread Safety
//!
//! Handles can be shared freely across tasks and threads. The session itself
//! is never shared: only the dispatcher task touches it, which is what keeps
//! transitions strictly serialized.

pub mod dispatcher;

pub use dispatcher::{PendingReport, SessionDispatcher, SessionHandle};
