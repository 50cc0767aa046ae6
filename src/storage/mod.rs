//! Persistent key-value storage for chat collections.
//!
//! A [`KeyValueBackend`] stores opaque JSON blobs by key. [`ChatStorage`]
//! layers typed access for the two logical keys on top and swallows
//! failures after logging them, so callers never see storage errors.

mod chat;
mod file;
mod memory;

use std::path::PathBuf;

use thiserror::Error;

pub use chat::{ChatStorage, StoredChat, MESSAGES_KEY, USERS_KEY};
pub use file::FileBackend;
pub use memory::MemoryBackend;

/// Errors raised by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to remove '{path}': {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to lock storage directory '{path}': {source}")]
    Lock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid storage key '{key}'")]
    InvalidKey { key: String },

    #[error("Storage quota exceeded writing '{key}' ({needed} bytes, {quota} allowed)")]
    QuotaExceeded {
        key: String,
        needed: usize,
        quota: usize,
    },

    #[error("Failed to encode '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to decode '{key}': {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Durable string storage addressed by key.
///
/// Absence of a key is `Ok(None)`, not an error. Removing a missing key
/// succeeds.
pub trait KeyValueBackend: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn save(&self, key: &str, blob: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
