//! Asynchronous CSV reader with batch interface
//!
//! Provides batch reading over the actions of a script for async hosts.
//!
//! # Design
//!
//! The AsyncReader uses:
//! - csv-async for streaming CSV parsing
//! - futures streams to pull records
//! - Batch reading so the dispatcher queue can be kept busy
//!
//! ```text
//! CSV Reader → AsyncReader → Batches of Actions
//!                  ↓
//!           csv_format module
//!           (CsvRecord, convert_csv_record)
//! ```

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::{Action, AtmError};
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;
use tracing::warn;

/// Asynchronous CSV reader
///
/// Preserves script order within and across batches.
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
    line_num: u64,
    skipped: usize,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    /// Create a new AsyncReader from an async reader
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self {
            csv_reader,
            line_num: 1,
            skipped: 0,
        }
    }

    /// Number of records skipped so far because they could not be read or converted
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Read a batch of actions
    ///
    /// Reads up to `batch_size` valid actions. Invalid records are logged
    /// and skipped.
    ///
    /// # Returns
    ///
    /// A vector of actions in script order. Returns an empty vector when the
    /// end of the script is reached.
    pub async fn read_batch(&mut self, batch_size: usize) -> Vec<Action> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut records = self.csv_reader.deserialize::<CsvRecord>();

        while batch.len() < batch_size {
            let next = records.next().await;
            let Some(result) = next else {
                break;
            };
            self.line_num += 1;

            let converted = result
                .map_err(|e| AtmError::parse_error(Some(self.line_num), e.to_string()))
                .and_then(|csv_record| convert_csv_record(csv_record, Some(self.line_num)));

            match converted {
                Ok(action) => batch.push(action),
                Err(e) => {
                    self.skipped += 1;
                    warn!(error = %e, "Skipping script record");
                }
            }
        }

        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::io::Cursor;

    #[tokio::test]
    async fn test_async_reader_read_batch() {
        let csv_content = "action,value\nlogin,alice\ndeposit,100\nwithdraw,50\n";
        let mut reader = AsyncReader::new(Cursor::new(csv_content.as_bytes()));

        let batch = reader.read_batch(2).await;
        assert_eq!(batch, vec![Action::login("alice"), Action::deposit("100")]);

        let batch = reader.read_batch(2).await;
        assert_eq!(batch, vec![Action::withdraw("50")]);

        let batch = reader.read_batch(2).await;
        assert!(batch.is_empty());
    }

    #[tokio::test]
    async fn test_async_reader_empty_csv() {
        let mut reader = AsyncReader::new(Cursor::new("action,value\n".as_bytes()));

        let batch = reader.read_batch(10).await;
        assert!(batch.is_empty());
    }

    #[tokio::test]
    async fn test_async_reader_skips_invalid_records() {
        let csv_content = "action,value\nteleport,1\nlogin,\nlogout,\n";
        let mut reader = AsyncReader::new(Cursor::new(csv_content.as_bytes()));

        let batch = reader.read_batch(10).await;

        assert_eq!(batch, vec![Action::Logout]);
        assert_eq!(reader.skipped(), 2);
    }

    #[tokio::test]
    async fn test_async_reader_whitespace_and_case() {
        let csv_content = "action,value\n  DEPOSIT  ,  25  \nToggle_Dark_Mode,\n";
        let mut reader = AsyncReader::new(Cursor::new(csv_content.as_bytes()));

        let batch = reader.read_batch(10).await;
        assert_eq!(batch, vec![Action::deposit("25"), Action::ToggleDarkMode]);
    }
}
