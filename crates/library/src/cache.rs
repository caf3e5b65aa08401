//! Persistent record cache.
//!
//! The whole mapping lives in one pretty-printed JSON file. It is read in
//! full and rewritten in full; there is no locking and no schema version.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::LibraryError;
use crate::types::GameRecord;

/// Title to record, ordered by title so rewrites are byte-stable.
pub type RecordMap = BTreeMap<String, GameRecord>;

/// JSON file holding every assembled record.
#[derive(Debug, Clone)]
pub struct RecordCache {
    path: PathBuf,
}

impl RecordCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the persisted mapping.
    ///
    /// A missing, unreadable or malformed file is an empty cache.
    pub fn load(&self) -> RecordMap {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no record cache yet");
                return RecordMap::new();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read record cache, starting empty");
                return RecordMap::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(records) => records,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "malformed record cache, starting empty");
                RecordMap::new()
            }
        }
    }

    /// Looks up one record in the persisted mapping.
    pub fn get(&self, name: &str) -> Option<GameRecord> {
        self.load().remove(name)
    }

    /// Replaces the persisted mapping with exactly `records`.
    ///
    /// Writes a sibling temp file first and renames it over the cache.
    pub fn save(&self, records: &RecordMap) -> Result<(), LibraryError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(records)?;
        let tmp = self.temp_path();
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;

        debug!(path = %self.path.display(), records = records.len(), "record cache saved");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }
}
