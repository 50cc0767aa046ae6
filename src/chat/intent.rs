//! Intents accepted by the chat reducer.

use chrono::{DateTime, Utc};

use crate::chat::types::{Message, MessageDraft, MessageId, UserMap};
use crate::mvi::Intent;

/// State transition requests.
///
/// Clock readings, generated ids and storage snapshots travel inside the
/// intent; the store fills them in before dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatIntent {
    /// Mark `user_id` online and make it the current user.
    Login { user_id: String, at: DateTime<Utc> },

    /// Mark the current user offline and end the session.
    Logout { at: DateTime<Utc> },

    /// Append a new unread message.
    SendMessage {
        id: MessageId,
        at: DateTime<Utc>,
        draft: MessageDraft,
    },

    /// Session-local typing indicator.
    SetTyping(bool),

    /// Mark every message from the peer as read.
    ReadMessages,

    /// Replace in-memory collections with what storage holds.
    /// `None` means storage had nothing for that key.
    Refresh {
        messages: Option<Vec<Message>>,
        users: Option<UserMap>,
    },

    /// Drop all messages.
    ClearMessages,
}

impl Intent for ChatIntent {}

/// Storage effect that follows an intent once it has been reduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persist {
    Nothing,
    Users,
    Messages,
    RemoveMessages,
}

impl ChatIntent {
    pub fn persist(&self) -> Persist {
        match self {
            ChatIntent::Login { .. } | ChatIntent::Logout { .. } => Persist::Users,
            ChatIntent::SendMessage { .. } | ChatIntent::ReadMessages => Persist::Messages,
            ChatIntent::ClearMessages => Persist::RemoveMessages,
            ChatIntent::SetTyping(_) | ChatIntent::Refresh { .. } => Persist::Nothing,
        }
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            ChatIntent::Login { .. } => "login",
            ChatIntent::Logout { .. } => "logout",
            ChatIntent::SendMessage { .. } => "send_message",
            ChatIntent::SetTyping(_) => "set_typing",
            ChatIntent::ReadMessages => "read_messages",
            ChatIntent::Refresh { .. } => "refresh",
            ChatIntent::ClearMessages => "clear_messages",
        }
    }
}
