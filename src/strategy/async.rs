//! Asynchronous dispatcher-backed replay strategy
//!
//! This module provides an asynchronous implementation of the ProcessingStrategy
//! trait. The session is moved into a `SessionDispatcher` task and the script is
//! streamed into its queue in batches.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── DispatchConfig (batch_size, queue_capacity, worker_threads)
//!     ├── AsyncReader (batch CSV reading)
//!     └── SessionDispatcher (single-flight task owning the Session)
//!         └── SessionHandle::enqueue → PendingReport
//! ```
//!
//! # Ordering
//!
//! Every action of a batch is enqueued before any report is awaited, so the
//! reader keeps the queue busy while the dispatcher applies actions. A single
//! handle enqueues in script order and the dispatcher applies in queue order,
//! so the final state matches the synchronous strategy exactly.

use crate::core::SessionDispatcher;
use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::write_state_csv;
use crate::strategy::{open_session, ProcessingStrategy, ReplaySummary};
use crate::types::AtmError;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Configuration for dispatcher-backed replay
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Number of script records read per batch
    pub batch_size: usize,
    /// Capacity of the dispatcher queue
    pub queue_capacity: usize,
    /// Worker threads of the tokio runtime
    pub worker_threads: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            queue_capacity: 64,
            worker_threads: num_cpus::get(),
        }
    }
}

impl DispatchConfig {
    /// Create a new DispatchConfig, replacing zero values with defaults
    pub fn new(batch_size: usize, queue_capacity: usize, worker_threads: usize) -> Self {
        let default = Self::default();

        Self {
            batch_size: non_zero_or("batch_size", batch_size, default.batch_size),
            queue_capacity: non_zero_or("queue_capacity", queue_capacity, default.queue_capacity),
            worker_threads: non_zero_or("worker_threads", worker_threads, default.worker_threads),
        }
    }
}

fn non_zero_or(field: &str, value: usize, default: usize) -> usize {
    if value == 0 {
        warn!(field, value, default, "Invalid dispatch setting, using default");
        default
    } else {
        value
    }
}

/// Asynchronous replay strategy
///
/// Runs the replay on a dedicated multi-threaded tokio runtime. The session
/// (restored from the session file when one is configured) is owned by a
/// dispatcher task for the whole replay and handed back for output.
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    config: DispatchConfig,
    session_file: Option<PathBuf>,
}

impl AsyncProcessingStrategy {
    /// Create a new AsyncProcessingStrategy
    ///
    /// # Arguments
    ///
    /// * `config` - Batch, queue and runtime sizing
    /// * `session_file` - Optional path of the persisted session record
    pub fn new(config: DispatchConfig, session_file: Option<PathBuf>) -> Self {
        Self {
            config,
            session_file,
        }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    /// Replay the script through a session dispatcher
    ///
    /// 1. Builds a tokio multi-threaded runtime and restores the session
    /// 2. Opens the script with tokio::fs and wraps it for csv-async
    /// 3. Spawns a SessionDispatcher owning the session
    /// 4. Enqueues each batch in order, then awaits its reports
    /// 5. Shuts the dispatcher down and writes the final state
    fn process(
        &self,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<ReplaySummary, AtmError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.worker_threads)
            .build()
            .map_err(|e| AtmError::runtime(format!("Failed to create tokio runtime: {}", e)))?;

        // The session file is read with std::fs, so restore before entering the runtime
        let session = open_session(self.session_file.as_deref());

        runtime.block_on(async {
            let file = tokio::fs::File::open(input_path).await.map_err(|e| {
                if e.kind() == io::ErrorKind::NotFound {
                    AtmError::FileNotFound {
                        path: input_path.display().to_string(),
                    }
                } else {
                    AtmError::from(e)
                }
            })?;

            // Wrap tokio file in a compatibility layer for csv-async
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
            let mut reader = AsyncReader::new(compat_file);

            let dispatcher = SessionDispatcher::spawn(session, self.config.queue_capacity);
            let handle = dispatcher.handle();
            let mut summary = ReplaySummary::default();

            loop {
                let batch = reader.read_batch(self.config.batch_size).await;
                if batch.is_empty() {
                    break;
                }

                let mut pending = Vec::with_capacity(batch.len());
                for action in batch {
                    pending.push(handle.enqueue(action).await?);
                }
                for report in pending {
                    summary.record(&report.wait().await?);
                }
            }
            summary.skipped = reader.skipped();

            drop(handle);
            let session = dispatcher.shutdown().await?;
            write_state_csv(session.state(), output)?;

            info!(
                applied = summary.applied,
                rejected = summary.rejected,
                skipped = summary.skipped,
                "Replay finished"
            );

            Ok::<_, AtmError>(summary)
        })
    }
}
