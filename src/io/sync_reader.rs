//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over the actions of a script file.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding `Result<Action, AtmError>`
//! for each CSV row:
//!
//! ```no_run
//! use rust_atm_engine::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("script.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(action) => println!("Submitting {:?}", action),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual record errors are yielded as Err variants in the iterator
//! - Line numbers are included in errors for debugging

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::{Action, AtmError};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

/// Synchronous CSV reader
///
/// Reads one record at a time; the script is never loaded into memory as a whole.
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    line_num: u64,
}

impl SyncReader {
    /// Create a new SyncReader from a file path
    ///
    /// The CSV reader is configured to:
    /// - Trim whitespace from all fields
    /// - Allow flexible field counts (for the optional value column)
    /// - Use an 8KB buffer for efficient I/O
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` for a missing file and `IoError` for any other
    /// failure to open it.
    pub fn new(path: &Path) -> Result<Self, AtmError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => AtmError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => AtmError::IoError {
                message: format!("Failed to open file '{}': {}", path.display(), e),
            },
        })?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 1,
        })
    }
}

impl Iterator for SyncReader {
    type Item = Result<Action, AtmError>;

    /// Get the next action from the script
    ///
    /// # Returns
    ///
    /// * `Some(Ok(Action))` - Successfully parsed record
    /// * `Some(Err(AtmError))` - Parse or conversion error with line number
    /// * `None` - End of file reached
    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<CsvRecord>();
        let result = deserializer.next()?;
        self.line_num += 1;

        Some(match result {
            Ok(csv_record) => convert_csv_record(csv_record, Some(self.line_num)),
            Err(e) => Err(AtmError::parse_error(Some(self.line_num), e.to_string())),
        })
    }
}
