//! # Storage Backends
//!
//! The `StorageBackend` trait is the seam between the typed [`Storage`]
//! wrapper and whatever actually holds the bytes. Two implementations
//! ship with the crate:
//!
//! - [`MemoryBackend`] - a `HashMap` behind a mutex, for tests and
//!   ephemeral sessions
//! - [`FileBackend`](crate::file::FileBackend) - a single JSON file,
//!   for real use
//!
//! [`Storage`]: crate::Storage

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{StorageError, StorageResult};

// =============================================================================
// Backend Trait
// =============================================================================

/// Raw string-slot storage.
///
/// ## Contract
/// - `load` returns `Ok(None)` for an absent key; errors are reserved
///   for the store itself being unreadable
/// - `save` overwrites the whole value (there are no partial updates)
/// - All methods take `&self`; implementations handle their own locking
pub trait StorageBackend: Send + Sync {
    /// Reads the raw value of a key, if present.
    fn load(&self, key: &str) -> StorageResult<Option<String>>;

    /// Writes (or overwrites) the value of a key.
    fn save(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Removes a key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;
}

// =============================================================================
// Memory Backend
// =============================================================================

/// In-memory backend. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    /// Creates a new empty in-memory backend.
    pub fn new() -> Self {
        MemoryBackend::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn load(&self, key: &str) -> StorageResult<Option<String>> {
        let slots = self.slots.lock().map_err(|_| StorageError::LockPoisoned)?;
        Ok(slots.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut slots = self.slots.lock().map_err(|_| StorageError::LockPoisoned)?;
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut slots = self.slots.lock().map_err(|_| StorageError::LockPoisoned)?;
        slots.remove(key);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
