//! Typed access to the persisted chat collections.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{FileBackend, KeyValueBackend, MemoryBackend, StorageError};
use crate::chat::{Message, UserMap};
use crate::config::{StorageConfig, StorageKind};

/// Key holding the JSON array of messages.
pub const MESSAGES_KEY: &str = "chat_messages";
/// Key holding the JSON object of users by id.
pub const USERS_KEY: &str = "chat_users";

/// Everything storage currently holds; `None` where a key is absent or
/// unreadable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoredChat {
    pub messages: Option<Vec<Message>>,
    pub users: Option<UserMap>,
}

/// Chat-aware wrapper around a [`KeyValueBackend`].
///
/// Reads fall back to `None` and writes are best effort: failures are
/// logged and never reach the caller.
#[derive(Clone)]
pub struct ChatStorage {
    backend: Arc<dyn KeyValueBackend>,
}

impl ChatStorage {
    pub fn new(backend: impl KeyValueBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Build the backend selected in config.
    pub fn open(config: &StorageConfig) -> Self {
        match config.backend {
            StorageKind::File => {
                let dir = config.resolved_dir();
                tracing::debug!(dir = %dir.display(), "Using file storage");
                Self::new(FileBackend::new(dir))
            }
            StorageKind::Memory => {
                tracing::debug!("Using in-memory storage");
                Self::new(MemoryBackend::new())
            }
        }
    }

    pub fn load_messages(&self) -> Option<Vec<Message>> {
        self.load_or_warn(MESSAGES_KEY)
    }

    pub fn load_users(&self) -> Option<UserMap> {
        self.load_or_warn(USERS_KEY)
    }

    pub fn load(&self) -> StoredChat {
        StoredChat {
            messages: self.load_messages(),
            users: self.load_users(),
        }
    }

    pub fn save_messages(&self, messages: &[Message]) {
        self.save_or_warn(MESSAGES_KEY, messages);
    }

    pub fn save_users(&self, users: &UserMap) {
        self.save_or_warn(USERS_KEY, users);
    }

    /// Remove the message entry entirely rather than storing `[]`.
    pub fn clear_messages(&self) {
        if let Err(e) = self.backend.remove(MESSAGES_KEY) {
            tracing::warn!(key = MESSAGES_KEY, error = %e, "Failed to clear stored messages");
        }
    }

    /// Typed load that surfaces errors.
    pub fn try_load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(blob) = self.backend.load(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&blob)
            .map(Some)
            .map_err(|source| StorageError::Decode {
                key: key.to_string(),
                source,
            })
    }

    /// Typed save that surfaces errors.
    pub fn try_save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let blob = serde_json::to_string(value).map_err(|source| StorageError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.backend.save(key, &blob)
    }

    fn load_or_warn<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.try_load(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "Ignoring unreadable stored value");
                None
            }
        }
    }

    fn save_or_warn<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        if let Err(e) = self.try_save(key, value) {
            tracing::warn!(key, error = %e, "Failed to persist chat state");
        }
    }
}
