//! Session store implementations
//!
//! - [`JsonSessionStore`] keeps the record in a pretty-printed JSON file. Writes
//!   go to a temporary sibling first and are renamed over the target so a crash
//!   never leaves a half-written record behind.
//! - [`MemorySessionStore`] keeps the record in a shared in-memory slot; clones
//!   see the same record, which makes it handy for tests and embedding.

use crate::core::traits::{PersistedSession, SessionStore};
use crate::types::AtmError;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

const TMP_SUFFIX: &str = "tmp";

/// File-backed session store
#[derive(Debug, Clone)]
pub struct JsonSessionStore {
    path: PathBuf,
}

impl JsonSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for JsonSessionStore {
    fn load(&self) -> Result<Option<PersistedSession>, AtmError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&data)?))
    }

    fn save(&mut self, record: &PersistedSession) -> Result<(), AtmError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(record)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".");
    tmp.push(TMP_SUFFIX);
    PathBuf::from(tmp)
}

fn write_atomic(path: &Path, contents: &str) -> Result<(), AtmError> {
    let mut file = File::create(path)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()?;
    Ok(())
}

/// In-memory session store
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    record: Arc<Mutex<Option<PersistedSession>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an existing record, as if left behind by an earlier run
    pub fn with_record(record: PersistedSession) -> Self {
        Self {
            record: Arc::new(Mutex::new(Some(record))),
        }
    }

    /// The record as last saved
    pub fn record(&self) -> Option<PersistedSession> {
        self.record
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<PersistedSession>, AtmError> {
        Ok(self.record())
    }

    fn save(&mut self, record: &PersistedSession) -> Result<(), AtmError> {
        let mut guard = self
            .record
            .lock()
            .map_err(|_| AtmError::session_store("in-memory record lock poisoned"))?;
        *guard = Some(record.clone());
        Ok(())
    }
}
