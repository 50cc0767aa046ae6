//! The single owner of live chat state.
//!
//! [`ChatStore`] serializes every transition: it resolves the intent,
//! runs the reducer, writes the affected collection to storage and only
//! then publishes the new state to observers. [`ChatProvider`] adds the
//! background refresh loop that pulls in the other session's writes.

mod provider;
mod tasks;

use chrono::Utc;
use parking_lot::Mutex;
use tokio::sync::watch;

use crate::chat::{
    seed_users, Attachment, ChatIntent, ChatReducer, ChatState, MessageDraft, MessageId, Persist,
};
use crate::mvi::Reducer;
use crate::storage::ChatStorage;

pub use provider::ChatProvider;
pub use tasks::{CancelToken, RecurringTask};

/// Owns the live [`ChatState`] for one session.
pub struct ChatStore {
    state: Mutex<ChatState>,
    storage: ChatStorage,
    updates: watch::Sender<ChatState>,
}

impl ChatStore {
    /// Load persisted collections, falling back to the seeded users and an
    /// empty conversation. Sessions never survive a restart: nobody is
    /// logged in and nobody is typing.
    pub fn open(storage: ChatStorage) -> Self {
        let stored = storage.load();
        let users = stored.users.unwrap_or_else(|| seed_users(Utc::now()));
        let mut state = ChatState::with_users(users);
        state.messages = stored.messages.unwrap_or_default();

        tracing::info!(
            messages = state.messages.len(),
            users = state.users.len(),
            "Chat state loaded"
        );

        let (updates, _) = watch::channel(state.clone());
        Self {
            state: Mutex::new(state),
            storage,
            updates,
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ChatState {
        self.state.lock().clone()
    }

    /// Observe committed states. The receiver starts at the current state
    /// and is woken for every transition that changed something.
    pub fn subscribe(&self) -> watch::Receiver<ChatState> {
        self.updates.subscribe()
    }

    /// Apply a fully-resolved intent and return the resulting state.
    pub fn dispatch(&self, intent: ChatIntent) -> ChatState {
        self.apply(move |_| Some(intent))
    }

    /// Log in as `user_id`. Returns `false` for an unknown id.
    pub fn login(&self, user_id: &str) -> bool {
        let state = self.apply(|_| {
            Some(ChatIntent::Login {
                user_id: user_id.to_string(),
                at: Utc::now(),
            })
        });
        let ok = state
            .current_user
            .as_ref()
            .is_some_and(|u| u.id == user_id);
        if ok {
            tracing::info!(user_id, "Logged in");
        } else {
            tracing::debug!(user_id, "Login ignored for unknown user");
        }
        ok
    }

    pub fn logout(&self) {
        self.apply(|state| {
            let user = state.current_user.as_ref()?;
            tracing::info!(user_id = %user.id, "Logged out");
            Some(ChatIntent::Logout { at: Utc::now() })
        });
    }

    /// Send as the current user. Text is trimmed; returns `false` when
    /// nobody is logged in or there is neither text nor attachment.
    pub fn send_message(&self, text: &str, attachment: Option<Attachment>) -> bool {
        let mut sent = false;
        self.apply(|state| {
            let Some(user) = state.current_user.as_ref() else {
                tracing::debug!("Dropping message sent without a session");
                return None;
            };
            let draft = MessageDraft {
                sender_id: user.id.clone(),
                text: text.trim().to_string(),
                attachment,
            };
            if !draft.is_sendable() {
                tracing::debug!(user_id = %user.id, "Dropping empty message");
                return None;
            }
            let id = MessageId::generate();
            tracing::debug!(user_id = %user.id, message_id = %id, "Sending message");
            sent = true;
            Some(ChatIntent::SendMessage {
                id,
                at: Utc::now(),
                draft,
            })
        });
        sent
    }

    pub fn set_typing(&self, is_typing: bool) {
        self.dispatch(ChatIntent::SetTyping(is_typing));
    }

    pub fn read_messages(&self) {
        self.dispatch(ChatIntent::ReadMessages);
    }

    pub fn clear_messages(&self) {
        self.dispatch(ChatIntent::ClearMessages);
    }

    /// Pull in whatever storage holds now.
    pub fn refresh(&self) {
        self.apply(|_| {
            let stored = self.storage.load();
            Some(ChatIntent::Refresh {
                messages: stored.messages,
                users: stored.users,
            })
        });
    }

    /// Resolve, reduce, persist, publish, all under the state lock so
    /// transitions apply strictly in dispatch order.
    fn apply<F>(&self, resolve: F) -> ChatState
    where
        F: FnOnce(&ChatState) -> Option<ChatIntent>,
    {
        let mut state = self.state.lock();
        let Some(intent) = resolve(&*state) else {
            return state.clone();
        };

        let name = intent.name();
        let persist = intent.persist();
        let next = ChatReducer::reduce(state.clone(), intent);
        self.persist(persist, &*state, &next);

        let changed = *state != next;
        *state = next;
        if changed {
            self.updates.send_replace(state.clone());
        }
        tracing::trace!(intent = name, changed, "Intent applied");
        state.clone()
    }

    fn persist(&self, persist: Persist, before: &ChatState, after: &ChatState) {
        match persist {
            Persist::Users if before.users != after.users => {
                self.storage.save_users(&after.users)
            }
            Persist::Messages if before.messages != after.messages => {
                self.storage.save_messages(&after.messages)
            }
            Persist::RemoveMessages => self.storage.clear_messages(),
            Persist::Users | Persist::Messages | Persist::Nothing => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::USER_1;
    use crate::storage::MemoryBackend;

    fn store() -> ChatStore {
        ChatStore::open(ChatStorage::new(MemoryBackend::new()))
    }

    #[test]
    fn opens_with_seeded_users_and_no_session() {
        let store = store();
        let state = store.state();
        assert_eq!(state.users.len(), 2);
        assert!(state.messages.is_empty());
        assert!(state.current_user.is_none());
        assert!(!state.is_typing);
    }

    #[test]
    fn send_without_session_is_noop() {
        let store = store();
        assert!(!store.send_message("hi", None));
        assert!(store.state().messages.is_empty());
    }

    #[test]
    fn blank_message_is_rejected() {
        let store = store();
        store.login(USER_1);
        assert!(!store.send_message("   ", None));
        assert!(store.state().messages.is_empty());
    }

    #[test]
    fn text_is_trimmed() {
        let store = store();
        store.login(USER_1);
        assert!(store.send_message("  hi  ", None));
        assert_eq!(store.state().messages[0].text, "hi");
    }

    #[test]
    fn subscribers_see_changes() {
        let store = store();
        let mut rx = store.subscribe();
        assert!(!rx.has_changed().unwrap());
        store.set_typing(true);
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_typing);
    }

    #[test]
    fn no_op_does_not_notify() {
        let store = store();
        let mut rx = store.subscribe();
        store.logout();
        store.read_messages();
        assert!(!rx.has_changed().unwrap());
    }
}
