//! Replay strategy module
//!
//! This module defines the Strategy pattern for complete replay pipelines: read
//! an action script, drive a session with it, and write the final state. This
//! allows the synchronous host and the dispatcher-backed async host to be
//! selected at runtime.

use crate::cli::StrategyType;
use crate::core::{JsonSessionStore, Session, TransitionReport};
use crate::types::AtmError;
use std::io::Write;
use std::path::{Path, PathBuf};

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, DispatchConfig};
pub use sync::SyncProcessingStrategy;

/// Counts collected while replaying a script
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Actions the state machine applied
    pub applied: usize,
    /// Actions the state machine rejected
    pub rejected: usize,
    /// Script records that never became actions
    pub skipped: usize,
}

impl ReplaySummary {
    /// Count one transition report
    pub fn record(&mut self, report: &TransitionReport) {
        if report.outcome.is_ok() {
            self.applied += 1;
        } else {
            self.rejected += 1;
        }
    }
}

/// Replay strategy trait
///
/// Each strategy reads actions from a CSV script, submits them in order to a
/// single session, and writes the final session state to output.
pub trait ProcessingStrategy: Send + Sync {
    /// Replay the script at `input_path` and write the final state to `output`
    ///
    /// # Returns
    ///
    /// * `Ok(ReplaySummary)` if the replay completed (rejections and skipped
    ///   records included)
    /// * `Err(AtmError)` if a fatal error occurred
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The script cannot be opened (file not found, permission denied)
    /// - The output cannot be written
    /// - The async runtime or dispatcher fails
    ///
    /// Rejected actions and malformed records are logged and do not stop the replay.
    fn process(&self, input_path: &Path, output: &mut dyn Write)
        -> Result<ReplaySummary, AtmError>;
}

/// Open the session a replay drives
///
/// With a session file the session is restored from (and persists to) that
/// file; without one it starts from defaults and persists nothing.
pub fn open_session(session_file: Option<&Path>) -> Session {
    match session_file {
        Some(path) => Session::restore(JsonSessionStore::new(path)),
        None => Session::new(),
    }
}

/// Create a replay strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - Sync or Async
/// * `config` - Dispatcher configuration (ignored for sync, defaults when `None`)
/// * `session_file` - Optional path of the persisted session record
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<DispatchConfig>,
    session_file: Option<PathBuf>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(session_file)),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config, session_file))
        }
    }
}
