//! Store plus its background sync loops.

use std::sync::Arc;

use super::tasks::RecurringTask;
use super::ChatStore;
use crate::config::SyncConfig;

/// Keeps a [`ChatStore`] in sync with storage for as long as it lives.
///
/// Runs the refresh loop on the current tokio runtime. Dropping the
/// provider (or calling [`ChatProvider::shutdown`]) stops the loop; the
/// store itself stays usable through any other `Arc` handles.
pub struct ChatProvider {
    store: Arc<ChatStore>,
    sync: SyncConfig,
    refresh: RecurringTask,
}

impl ChatProvider {
    /// Start refreshing `store` every `sync.refresh_interval()`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(store: Arc<ChatStore>, sync: &SyncConfig) -> Self {
        let refresh_store = Arc::clone(&store);
        let refresh = RecurringTask::spawn("refresh", sync.refresh_interval(), false, move || {
            refresh_store.refresh();
        });
        Self {
            store,
            sync: sync.clone(),
            refresh,
        }
    }

    pub fn store(&self) -> &Arc<ChatStore> {
        &self.store
    }

    /// Mark incoming messages read now and every `read_interval` until the
    /// returned task is dropped. Meant to live as long as a conversation
    /// view is open.
    pub fn read_receipts(&self) -> RecurringTask {
        let store = Arc::clone(&self.store);
        RecurringTask::spawn("read-receipts", self.sync.read_interval(), true, move || {
            store.read_messages();
        })
    }

    /// Stop the refresh loop and wait for it to exit.
    pub async fn shutdown(self) {
        self.refresh.stop().await;
        tracing::debug!("Chat provider shut down");
    }
}
