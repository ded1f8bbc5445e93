//! Bounded, newest-first log of past predictions.
//!
//! The persisted medium is the source of truth: every operation re-reads it,
//! applies its change and writes it back. Persistence failures are logged and
//! swallowed so they never interrupt the caller's flow.

pub mod storage;

pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};

use crate::domain::{HistoryEntry, PredictionResult};
use chrono::Utc;
use parking_lot::Mutex;
use serde_json::Value;
use tracing::{debug, error, warn};

/// Key under which the serialized log is stored.
pub const HISTORY_KEY: &str = "cotton_disease_history";
pub const MAX_HISTORY_ITEMS: usize = 20;

pub struct HistoryStore<S> {
    storage: S,
    max_items: usize,
    // Serializes read-modify-write cycles issued from one process
    write_lock: Mutex<()>,
}

impl<S: KeyValueStore> HistoryStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_max_items(storage, MAX_HISTORY_ITEMS)
    }

    pub fn with_max_items(storage: S, max_items: usize) -> Self {
        Self {
            storage,
            max_items,
            write_lock: Mutex::new(()),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn max_items(&self) -> usize {
        self.max_items
    }

    /// Current log, newest first. Missing or unreadable data reads as empty.
    pub fn list(&self) -> Vec<HistoryEntry> {
        let raw = match self.storage.get(HISTORY_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                error!(error = %e, "Error reading history");
                return Vec::new();
            }
        };

        let values = match serde_json::from_str::<Vec<Value>>(&raw) {
            Ok(values) => values,
            Err(e) => {
                error!(error = %e, "Error reading history");
                return Vec::new();
            }
        };

        // A malformed entry is dropped on its own so the rest survive the next write
        values
            .into_iter()
            .filter_map(|value| {
                serde_json::from_value::<HistoryEntry>(value)
                    .inspect_err(|e| warn!(error = %e, "Skipping unreadable history entry"))
                    .ok()
            })
            .take(self.max_items)
            .collect()
    }

    /// Prepends `result` under a fresh id and evicts anything past the cap.
    ///
    /// The result is sanitized first so every stored entry reads back.
    pub fn append(&self, result: PredictionResult) -> Vec<HistoryEntry> {
        let _guard = self.write_lock.lock();

        let mut entries = self.list();
        let id = next_id(&entries);
        entries.insert(0, HistoryEntry::new(id, result.sanitized()));
        entries.truncate(self.max_items);

        if let Err(e) = self.persist(&entries) {
            error!(error = %e, "Error saving to history");
        } else {
            debug!(id, len = entries.len(), "appended history entry");
        }
        entries
    }

    /// Drops the entry with `id`, keeping the others in order.
    pub fn remove(&self, id: i64) -> Vec<HistoryEntry> {
        let _guard = self.write_lock.lock();

        let mut entries = self.list();
        entries.retain(|entry| entry.id != id);

        if let Err(e) = self.persist(&entries) {
            error!(error = %e, id, "Error removing from history");
        }
        entries
    }

    pub fn clear(&self) {
        let _guard = self.write_lock.lock();

        if let Err(e) = self.storage.remove(HISTORY_KEY) {
            error!(error = %e, "Error clearing history");
        }
    }

    fn persist(&self, entries: &[HistoryEntry]) -> Result<(), StorageError> {
        let serialized = serde_json::to_string(entries)?;
        self.storage.set(HISTORY_KEY, &serialized)
    }
}

/// Millisecond timestamp, bumped past the newest id when the clock has not moved.
fn next_id(entries: &[HistoryEntry]) -> i64 {
    let now = Utc::now().timestamp_millis();
    entries
        .iter()
        .map(|entry| entry.id)
        .max()
        .map_or(now, |newest| now.max(newest.saturating_add(1)))
}
