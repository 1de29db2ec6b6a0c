//! # File Backend
//!
//! Persists the slot map as a single JSON object file, rewritten in
//! full on every save. This mirrors the overwrite semantics of the
//! browser local storage the slots originally lived in: one write per
//! mutation, last writer wins, no partial updates.
//!
//! ## Recovery
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  open(path)                                                             │
//! │       │                                                                 │
//! │       ├── file missing ────────► empty store (first run)                │
//! │       │                                                                 │
//! │       ├── file unreadable ─────► empty store + warning                  │
//! │       │                                                                 │
//! │       ├── file not valid JSON ─► empty store + warning                  │
//! │       │                                                                 │
//! │       └── valid ───────────────► slots loaded                           │
//! │                                                                         │
//! │  A corrupt store must never fail startup; losing the snapshot is        │
//! │  the recovery, not the failure.                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, warn};

use crate::backend::StorageBackend;
use crate::error::{StorageError, StorageResult};

/// File-backed storage: one JSON object, keys are slot names.
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    slots: Mutex<HashMap<String, String>>,
}

impl FileBackend {
    /// Opens (or initializes) the store at `path`.
    ///
    /// The parent directory is created if needed. Unreadable or corrupt
    /// contents are recovered as an empty store with a warning.
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StorageError::WriteFailed {
                key: path.display().to_string(),
                source,
            })?;
        }

        let slots = Self::read_slots(&path);
        debug!(path = %path.display(), slots = slots.len(), "storage opened");

        Ok(FileBackend {
            path,
            slots: Mutex::new(slots),
        })
    }

    /// Reads and parses the store file, recovering corruption as empty.
    fn read_slots(path: &Path) -> HashMap<String, String> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return HashMap::new();
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "store unreadable, starting empty");
                return HashMap::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(slots) => slots,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "store corrupt, starting empty");
                HashMap::new()
            }
        }
    }

    /// Writes the whole slot map back to disk.
    fn flush(&self, slots: &HashMap<String, String>, key: &str) -> StorageResult<()> {
        let body = serde_json::to_string_pretty(slots).map_err(|source| {
            StorageError::Serialize {
                key: key.to_string(),
                source,
            }
        })?;

        fs::write(&self.path, body).map_err(|source| StorageError::WriteFailed {
            key: key.to_string(),
            source,
        })
    }

    /// The file this store writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for FileBackend {
    fn load(&self, key: &str) -> StorageResult<Option<String>> {
        let slots = self.slots.lock().map_err(|_| StorageError::LockPoisoned)?;
        Ok(slots.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut slots = self.slots.lock().map_err(|_| StorageError::LockPoisoned)?;
        slots.insert(key.to_string(), value.to_string());
        self.flush(&slots, key)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut slots = self.slots.lock().map_err(|_| StorageError::LockPoisoned)?;
        if slots.remove(key).is_some() {
            self.flush(&slots, key)?;
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
