//! File-backed search history for Skycast.
//!
//! Keeps the five most recent distinct city searches in a single JSON
//! array file, newest first. Every operation re-reads the backing file,
//! so out-of-process edits are picked up. Concurrent writers are not
//! coordinated: two overlapping read-modify-write cycles resolve as
//! last write wins.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of entries kept in the store. Appending past this
/// drops the oldest entries.
pub const MAX_ENTRIES: usize = 5;

/// A record of one past successful city search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Opaque unique id (uuid v4).
    pub id: String,
    /// Canonical city name as resolved by the geocoder.
    pub name: String,
    /// Creation time, RFC 3339.
    pub timestamp: String,
}

/// Backing-store failures. Malformed persisted content is surfaced, not
/// silently reset.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("history file error: {0}")]
    Io(#[from] io::Error),

    #[error("history file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Ordered, bounded, deduplicated search history persisted as a JSON
/// array at a fixed path.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current entries, newest first. A missing file is an empty store
    /// and is initialized to a persisted `[]` on first read.
    ///
    /// # Errors
    /// `Io` on read failure, `Corrupt` on malformed content.
    pub fn list(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.persist(&[])?;
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Record a search for `name`.
    ///
    /// Returns `Ok(None)` without any mutation when the exact name is
    /// already present: no duplicate, no reorder, no timestamp refresh.
    /// Otherwise inserts a fresh entry at the head, truncates to
    /// [`MAX_ENTRIES`], persists, and returns the new entry.
    ///
    /// # Errors
    /// `Io` or `Corrupt` from the backing file.
    pub fn append(&self, name: &str) -> Result<Option<HistoryEntry>, HistoryError> {
        let mut entries = self.list()?;

        if entries.iter().any(|e| e.name == name) {
            tracing::debug!("history already contains {name:?}");
            return Ok(None);
        }

        let entry = HistoryEntry {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        entries.insert(0, entry.clone());
        entries.truncate(MAX_ENTRIES);
        self.persist(&entries)?;

        tracing::info!("recorded search for {name:?}");
        Ok(Some(entry))
    }

    /// Delete the entry with the given id. Deleting an absent id is not
    /// an error; the store is persisted either way.
    ///
    /// # Errors
    /// `Io` or `Corrupt` from the backing file.
    pub fn remove(&self, id: &str) -> Result<(), HistoryError> {
        let mut entries = self.list()?;
        entries.retain(|e| e.id != id);
        self.persist(&entries)?;
        Ok(())
    }

    fn persist(&self, entries: &[HistoryEntry]) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use tempfile::tempdir;

    fn store_in(dir: &tempfile::TempDir) -> HistoryStore {
        HistoryStore::new(dir.path().join("search_history.json"))
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        assert!(store.list().unwrap().is_empty());
        // Lazily initialized to a persisted empty array.
        assert!(store.path().exists());
    }

    #[test]
    fn test_append_then_list_round_trip() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        let entry = store.append("Tokyo").unwrap().unwrap();
        assert_eq!(entry.name, "Tokyo");
        assert!(!entry.id.is_empty());

        let entries = store.list().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0], entry);
    }

    #[test]
    fn test_append_dedup_by_name() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        let first = store.append("Paris").unwrap().unwrap();
        assert!(store.append("Paris").unwrap().is_none());

        let entries = store.list().unwrap();
        assert_eq!(entries.len(), 1);
        // No reorder, no timestamp refresh.
        assert_eq!(entries[0], first);
    }

    #[test]
    fn test_dedup_is_case_sensitive() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        store.append("paris").unwrap().unwrap();
        assert!(store.append("Paris").unwrap().is_some());
        assert_eq!(store.list().unwrap().len(), 2);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        for name in ["Oslo", "Lima", "Cairo", "Quito", "Hanoi", "Dakar"] {
            store.append(name).unwrap();
        }

        let entries = store.list().unwrap();
        assert_eq!(entries.len(), MAX_ENTRIES);
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        // Newest first; the first-inserted name is gone.
        assert_eq!(names, ["Dakar", "Hanoi", "Quito", "Cairo", "Lima"]);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        let entry = store.append("Tokyo").unwrap().unwrap();

        store.remove(&entry.id).unwrap();
        assert!(store.list().unwrap().is_empty());

        // Second remove of the same id: still no error, same state.
        store.remove(&entry.id).unwrap();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_remove_unknown_id_keeps_entries() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        store.append("Tokyo").unwrap();
        store.remove("no-such-id").unwrap();
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn test_corrupt_file_surfaces_error() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        fs::write(store.path(), "{ not json").unwrap();

        assert!(matches!(store.list(), Err(HistoryError::Corrupt(_))));
        assert!(matches!(store.append("Tokyo"), Err(HistoryError::Corrupt(_))));
        // The corrupt file is never silently replaced.
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "{ not json");
    }

    #[test]
    fn test_ids_are_unique() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        store.append("Oslo").unwrap();
        store.append("Lima").unwrap();
        store.append("Cairo").unwrap();

        let entries = store.list().unwrap();
        let mut ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), entries.len());
    }

    #[test]
    fn test_full_scenario() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        let tokyo = store.append("Tokyo").unwrap().unwrap();
        assert_eq!(tokyo.name, "Tokyo");

        let entries = store.list().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Tokyo");

        assert!(store.append("Tokyo").unwrap().is_none());
        assert_eq!(store.list().unwrap(), entries);

        store.remove(&tokyo.id).unwrap();
        assert!(store.list().unwrap().is_empty());

        store.remove(&tokyo.id).unwrap();
        assert!(store.list().unwrap().is_empty());
    }
}
