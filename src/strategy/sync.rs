//! Synchronous replay strategy
//!
//! Single-threaded implementation of the ProcessingStrategy trait. It delegates:
//! - CSV parsing to `SyncReader` (iterator interface)
//! - State transitions and persistence to `Session`
//! - CSV output to `csv_format::write_state_csv`
//!
//! Actions are applied in script order through `Session::apply`, which takes
//! `&mut self`; that alone serializes every transition.

use crate::io::csv_format::write_state_csv;
use crate::io::sync_reader::SyncReader;
use crate::strategy::{open_session, ProcessingStrategy, ReplaySummary};
use crate::types::AtmError;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Synchronous replay strategy
///
/// # Examples
///
/// ```no_run
/// use rust_atm_engine::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use std::path::Path;
/// use std::io;
///
/// let strategy = SyncProcessingStrategy::new(None);
/// let mut output = io::stdout();
///
/// strategy.process(Path::new("script.csv"), &mut output)
///     .expect("Replay failed");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SyncProcessingStrategy {
    session_file: Option<PathBuf>,
}

impl SyncProcessingStrategy {
    /// Create a strategy, optionally backed by a persisted session record
    pub fn new(session_file: Option<PathBuf>) -> Self {
        Self { session_file }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    /// Replay a script synchronously
    ///
    /// 1. Opens (or restores) the session
    /// 2. Streams actions from the script with a SyncReader
    /// 3. Applies each action to the session in order
    /// 4. Writes the final state with csv_format::write_state_csv
    fn process(
        &self,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<ReplaySummary, AtmError> {
        let reader = SyncReader::new(input_path)?;
        let mut session = open_session(self.session_file.as_deref());
        let mut summary = ReplaySummary::default();

        for result in reader {
            match result {
                Ok(action) => {
                    let report = session.apply(action);
                    summary.record(&report);
                }
                Err(e) => {
                    summary.skipped += 1;
                    warn!(error = %e, "Skipping script record");
                }
            }
        }

        write_state_csv(session.state(), output)?;

        info!(
            applied = summary.applied,
            rejected = summary.rejected,
            skipped = summary.skipped,
            "Replay finished"
        );

        Ok(summary)
    }
}
