//! Shared test utilities.

#![allow(dead_code, unused_imports)]

use std::sync::Arc;

use chrono::Utc;
use pairchat::chat::{ChatIntent, ChatReducer, ChatState, MessageDraft, MessageId, seed_users};
use pairchat::config::SyncConfig;
use pairchat::mvi::Reducer;
use pairchat::storage::{ChatStorage, FileBackend, MemoryBackend};
use pairchat::store::ChatStore;
use tempfile::TempDir;

/// Fresh state with the seeded users and nobody logged in.
pub fn seeded_state() -> ChatState {
    ChatState::with_users(seed_users(Utc::now()))
}

/// Store over a fresh in-memory backend. The backend is returned so a
/// second store can share it.
pub fn memory_store() -> (MemoryBackend, Arc<ChatStore>) {
    let backend = MemoryBackend::new();
    let store = Arc::new(ChatStore::open(ChatStorage::new(backend.clone())));
    (backend, store)
}

/// Another session over the same backend.
pub fn second_session(backend: &MemoryBackend) -> Arc<ChatStore> {
    Arc::new(ChatStore::open(ChatStorage::new(backend.clone())))
}

/// File storage in a new temp dir. Keep the `TempDir` alive for the test.
pub fn file_storage() -> (TempDir, ChatStorage) {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let storage = ChatStorage::new(FileBackend::new(temp.path()));
    (temp, storage)
}

pub fn fast_sync() -> SyncConfig {
    SyncConfig {
        refresh_interval_ms: 100,
        read_interval_ms: 500,
    }
}

pub fn login(state: ChatState, user_id: &str) -> ChatState {
    ChatReducer::reduce(
        state,
        ChatIntent::Login {
            user_id: user_id.to_string(),
            at: Utc::now(),
        },
    )
}

pub fn logout(state: ChatState) -> ChatState {
    ChatReducer::reduce(state, ChatIntent::Logout { at: Utc::now() })
}

pub fn send(state: ChatState, sender: &str, text: &str) -> ChatState {
    ChatReducer::reduce(
        state,
        ChatIntent::SendMessage {
            id: MessageId::generate(),
            at: Utc::now(),
            draft: MessageDraft {
                sender_id: sender.to_string(),
                text: text.to_string(),
                attachment: None,
            },
        },
    )
}
