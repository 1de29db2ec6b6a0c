//! # Storage Error Types
//!
//! Error types for persistence operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  I/O error (std::io::Error) or serde_json::Error                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StorageError (this module) ← adds the slot key as context             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Callers log a warning and keep the in-memory state authoritative;     │
//! │  a storage failure is never fatal to the session                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Persistence operation errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading a slot from the backing store failed.
    #[error("Failed to read slot '{key}': {source}")]
    ReadFailed {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Writing a slot to the backing store failed.
    ///
    /// ## When This Occurs
    /// - Disk full / quota exceeded
    /// - Store file or directory not writable
    #[error("Failed to write slot '{key}': {source}")]
    WriteFailed {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Serializing a value for a slot failed.
    #[error("Failed to serialize value for slot '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A concurrent user of the store panicked while holding the lock.
    #[error("Storage lock poisoned")]
    LockPoisoned,
}

/// Convenience type alias for Results with StorageError.
pub type StorageResult<T> = Result<T, StorageError>;
