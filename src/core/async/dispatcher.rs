//! Single-flight session dispatcher
//!
//! This module provides the `SessionDispatcher`, which moves a [`Session`] into
//! a tokio task and feeds it through a bounded mpsc queue.
//!
//! # Architecture
//!
//! ```text
//! SessionHandle ─┐
//! SessionHandle ─┼──► mpsc queue ──► dispatcher task ──► Session::apply
//! SessionHandle ─┘                        │
//!                                         └──► oneshot reply per request
//! ```
//!
//! # Ordering
//!
//! The task owns the session exclusively and handles one request at a time,
//! so every transition observes the most recently committed state and no two
//! mutations interleave, however many handles submit concurrently.
//!
//! # Blocking
//!
//! The loop runs on tokio's blocking pool: a session store may write files
//! with `std::fs` after a commit, which must not stall runtime workers.

use crate::core::session::{Session, TransitionReport};
use crate::types::{AccountState, Action, AtmError};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::debug;

/// Request sent to the dispatcher task
#[derive(Debug)]
enum Request {
    Submit {
        action: Action,
        reply: oneshot::Sender<TransitionReport>,
    },
    Snapshot {
        reply: oneshot::Sender<AccountState>,
    },
}

/// Owner of the dispatcher task
///
/// Dropping the dispatcher without calling [`SessionDispatcher::shutdown`]
/// leaves the task running until every handle is dropped.
#[derive(Debug)]
pub struct SessionDispatcher {
    handle: SessionHandle,
    task: JoinHandle<Session>,
}

/// Cloneable submission endpoint
#[derive(Debug, Clone)]
pub struct SessionHandle {
    sender: mpsc::Sender<Request>,
}

impl SessionDispatcher {
    /// Spawn the dispatcher on the blocking pool of the current tokio runtime
    ///
    /// # Arguments
    ///
    /// * `session` - The session to own; it is handed back by `shutdown`
    /// * `queue_capacity` - Maximum number of queued requests before submitters wait
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime, or if `queue_capacity` is zero.
    pub fn spawn(session: Session, queue_capacity: usize) -> Self {
        let (sender, receiver) = mpsc::channel(queue_capacity);
        let task = tokio::task::spawn_blocking(move || run(session, receiver));

        Self {
            handle: SessionHandle { sender },
            task,
        }
    }

    /// A new handle for submitting actions
    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    /// Drop the dispatcher's own handle and wait for the task
    ///
    /// The task finishes once every outstanding handle has been dropped and
    /// the queue has drained. Returns the session with its final state.
    pub async fn shutdown(self) -> Result<Session, AtmError> {
        drop(self.handle);
        self.task
            .await
            .map_err(|e| AtmError::runtime(format!("Session dispatcher task failed: {}", e)))
    }
}

impl SessionHandle {
    /// Submit an action and wait for its report
    ///
    /// # Errors
    ///
    /// Returns `DispatcherClosed` if the dispatcher task is gone.
    pub async fn submit(&self, action: Action) -> Result<TransitionReport, AtmError> {
        self.enqueue(action).await?.wait().await
    }

    /// Queue an action without waiting for it to be applied
    ///
    /// Waits only for room in the queue. Actions enqueued one after another
    /// from the same caller are applied in that order.
    pub async fn enqueue(&self, action: Action) -> Result<PendingReport, AtmError> {
        let (reply, response) = oneshot::channel();
        self.sender
            .send(Request::Submit { action, reply })
            .await
            .map_err(|_| AtmError::DispatcherClosed)?;
        Ok(PendingReport { response })
    }

    /// Read the committed state, ordered after every request already queued
    pub async fn snapshot(&self) -> Result<AccountState, AtmError> {
        let (reply, response) = oneshot::channel();
        self.sender
            .send(Request::Snapshot { reply })
            .await
            .map_err(|_| AtmError::DispatcherClosed)?;
        response.await.map_err(|_| AtmError::DispatcherClosed)
    }
}

/// Report of an enqueued action that may not have been applied yet
#[derive(Debug)]
pub struct PendingReport {
    response: oneshot::Receiver<TransitionReport>,
}

impl PendingReport {
    /// Wait until the dispatcher has applied the action
    pub async fn wait(self) -> Result<TransitionReport, AtmError> {
        self.response.await.map_err(|_| AtmError::DispatcherClosed)
    }
}

fn run(mut session: Session, mut receiver: mpsc::Receiver<Request>) -> Session {
    while let Some(request) = receiver.blocking_recv() {
        match request {
            Request::Submit { action, reply } => {
                let report = session.apply(action);
                // The submitter may have stopped waiting; the state is committed either way
                let _ = reply.send(report);
            }
            Request::Snapshot { reply } => {
                let _ = reply.send(session.state().clone());
            }
        }
    }

    debug!("Session dispatcher queue closed");
    session
}
