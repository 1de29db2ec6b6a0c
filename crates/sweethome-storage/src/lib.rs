//! # sweethome-storage: Key-Value Persistence for the Storefront
//!
//! The storage adapter: a small set of named string slots persisted by
//! whole-value overwrite, plus per-process session flags.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Storage Layering                                     │
//! │                                                                         │
//! │  apps/storefront (CartState, EventLog, AbTest)                         │
//! │       │                                                                 │
//! │       │  storage.get_json::<Vec<LineItem>>(StorageSlot::CartItems)     │
//! │       ▼                                                                 │
//! │  Storage (typed wrapper, THIS CRATE)                                   │
//! │  ├── JSON encode/decode per slot                                       │
//! │  └── malformed persisted value ⇒ treated as absent, with a warning     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StorageBackend (trait)                                                │
//! │  ├── MemoryBackend   - tests, ephemeral sessions                       │
//! │  └── FileBackend     - one JSON file, overwrite per save               │
//! │                                                                         │
//! │  Storage is untrusted: callers treat every failure as "keep going      │
//! │  with what's in memory", never as a reason to crash.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backend;
pub mod error;
pub mod file;
pub mod slot;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use backend::{MemoryBackend, StorageBackend};
pub use error::{StorageError, StorageResult};
pub use file::FileBackend;
pub use slot::StorageSlot;

use std::collections::HashMap;
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

// =============================================================================
// Typed Storage Wrapper
// =============================================================================

/// Typed access to the persistent slots over any backend.
pub struct Storage {
    backend: Box<dyn StorageBackend>,
}

impl Storage {
    /// Wraps a backend.
    pub fn new(backend: impl StorageBackend + 'static) -> Self {
        Storage {
            backend: Box::new(backend),
        }
    }

    /// Loads and deserializes a slot.
    ///
    /// ## Behavior
    /// - Absent slot: `Ok(None)`
    /// - Malformed JSON: `Ok(None)` with a warning — a corrupted snapshot
    ///   must behave exactly like a missing one (reset, don't crash)
    /// - Unreadable store: `Err`, for the caller to log and degrade
    pub fn get_json<T: DeserializeOwned>(&self, slot: StorageSlot) -> StorageResult<Option<T>> {
        let raw = match self.backend.load(slot.key())? {
            Some(raw) => raw,
            None => return Ok(None),
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                warn!(slot = slot.key(), error = %err, "malformed persisted value, treating as absent");
                Ok(None)
            }
        }
    }

    /// Serializes and saves a slot (whole-value overwrite).
    pub fn put_json<T: Serialize>(&self, slot: StorageSlot, value: &T) -> StorageResult<()> {
        let raw = serde_json::to_string(value).map_err(|source| StorageError::Serialize {
            key: slot.key().to_string(),
            source,
        })?;
        self.backend.save(slot.key(), &raw)
    }

    /// Removes a slot.
    pub fn remove(&self, slot: StorageSlot) -> StorageResult<()> {
        self.backend.remove(slot.key())
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage").finish_non_exhaustive()
    }
}

// =============================================================================
// Session Store
// =============================================================================

/// Per-process session flags.
///
/// The session analogue of [`Storage`]: same string-flag shape, but
/// nothing is written to disk and everything dies with the process.
/// Holds exactly the state the site keeps in session scope (the
/// chat-opened marker).
#[derive(Debug, Default)]
pub struct SessionStore {
    flags: Mutex<HashMap<String, String>>,
}

impl SessionStore {
    /// Creates an empty session store.
    pub fn new() -> Self {
        SessionStore::default()
    }

    /// Reads a session flag.
    pub fn get(&self, key: &str) -> Option<String> {
        self.flags.lock().ok()?.get(key).cloned()
    }

    /// Sets a session flag.
    pub fn set(&self, key: &str, value: &str) {
        if let Ok(mut flags) = self.flags.lock() {
            flags.insert(key.to_string(), value.to_string());
        }
    }

    /// Checks whether a flag is set (to any value).
    pub fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Snapshot {
        names: Vec<String>,
        total: i64,
    }

    #[test]
    fn test_get_json_absent_slot() {
        let storage = Storage::new(MemoryBackend::new());
        let loaded: Option<Snapshot> = storage.get_json(StorageSlot::CartItems).unwrap();
        assert_eq!(loaded, None);
    }

    #[test]
    fn test_put_then_get_round_trip() {
        let storage = Storage::new(MemoryBackend::new());
        let snapshot = Snapshot {
            names: vec!["Apple Pie".to_string()],
            total: 3200,
        };

        storage.put_json(StorageSlot::CartItems, &snapshot).unwrap();
        let loaded: Option<Snapshot> = storage.get_json(StorageSlot::CartItems).unwrap();
        assert_eq!(loaded, Some(snapshot));
    }

    #[test]
    fn test_malformed_value_treated_as_absent() {
        let backend = MemoryBackend::new();
        backend.save(StorageSlot::CartItems.key(), "{definitely not json").unwrap();

        let storage = Storage::new(backend);
        let loaded: Option<Snapshot> = storage.get_json(StorageSlot::CartItems).unwrap();
        assert_eq!(loaded, None);
    }

    #[test]
    fn test_wrong_shape_treated_as_absent() {
        let backend = MemoryBackend::new();
        backend.save(StorageSlot::CartTotal.key(), "\"not a number\"").unwrap();

        let storage = Storage::new(backend);
        let loaded: Option<i64> = storage.get_json(StorageSlot::CartTotal).unwrap();
        assert_eq!(loaded, None);
    }

    #[test]
    fn test_remove() {
        let storage = Storage::new(MemoryBackend::new());
        storage.put_json(StorageSlot::AbGroup, &"A").unwrap();
        storage.remove(StorageSlot::AbGroup).unwrap();

        let loaded: Option<String> = storage.get_json(StorageSlot::AbGroup).unwrap();
        assert_eq!(loaded, None);
    }

    #[test]
    fn test_session_store_flags() {
        let session = SessionStore::new();
        assert!(!session.is_set(slot::session::CHAT_OPENED));

        session.set(slot::session::CHAT_OPENED, "true");
        assert!(session.is_set(slot::session::CHAT_OPENED));
        assert_eq!(session.get(slot::session::CHAT_OPENED).as_deref(), Some("true"));
    }
}
