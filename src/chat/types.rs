//! Core data types for the two-party chat.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::mvi::ViewState;

/// Id of the first seeded user.
pub const USER_1: &str = "user_1";
/// Id of the second seeded user.
pub const USER_2: &str = "user_2";

const USER_1_AVATAR: &str =
    "https://images.pexels.com/photos/614810/pexels-photo-614810.jpeg?auto=compress&cs=tinysrgb&w=150";
const USER_2_AVATAR: &str =
    "https://images.pexels.com/photos/1222271/pexels-photo-1222271.jpeg?auto=compress&cs=tinysrgb&w=150";

/// Users keyed by id. Ordered so "the other user" and the persisted JSON
/// are deterministic.
pub type UserMap = BTreeMap<String, User>;

/// One of the two local identities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    /// Avatar image URI.
    pub avatar: String,
    pub is_online: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<DateTime<Utc>>,
}

impl User {
    fn seeded(id: &str, username: &str, avatar: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: id.to_string(),
            username: username.to_string(),
            avatar: avatar.to_string(),
            is_online: false,
            last_seen: Some(now),
        }
    }

    /// Copy of this user with presence updated.
    pub fn with_presence(&self, is_online: bool, at: DateTime<Utc>) -> Self {
        Self {
            is_online,
            last_seen: Some(at),
            ..self.clone()
        }
    }
}

/// The built-in pair of users, both offline.
pub fn seed_users(now: DateTime<Utc>) -> UserMap {
    [
        User::seeded(USER_1, "User 1", USER_1_AVATAR, now),
        User::seeded(USER_2, "User 2", USER_2_AVATAR, now),
    ]
    .into_iter()
    .map(|user| (user.id.clone(), user))
    .collect()
}

/// Unique, time-ordered message identifier (`msg_<uuid v7>`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

impl MessageId {
    /// Generate a fresh id. UUIDv7 embeds the creation time, so later ids
    /// sort after earlier ones.
    pub fn generate() -> Self {
        Self(format!("msg_{}", uuid::Uuid::now_v7().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MessageId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Kind of attached file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Image,
    Document,
}

impl FileKind {
    const IMAGE_EXTENSIONS: &'static [&'static str] =
        &["png", "jpg", "jpeg", "gif", "webp", "bmp", "svg", "heic"];

    /// Classify a file by the extension of its name or URL.
    pub fn from_name(name: &str) -> Self {
        let name = name.split(['?', '#']).next().unwrap_or(name);
        let ext = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        if Self::IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            FileKind::Image
        } else {
            FileKind::Document
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Image => "image",
            FileKind::Document => "document",
        }
    }
}

/// File reference attached to a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub url: String,
    pub name: Option<String>,
    pub kind: Option<FileKind>,
}

impl Attachment {
    /// Attachment named after the last path segment of `url`, kind guessed
    /// from its extension.
    pub fn from_url(url: impl Into<String>) -> Self {
        let url = url.into();
        let path = url.split(['?', '#']).next().unwrap_or(&url);
        let name = path
            .rsplit(['/', '\\'])
            .next()
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let kind = Some(FileKind::from_name(&url));
        Self { url, name, kind }
    }
}

/// A chat message. Immutable apart from `read`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub sender_id: String,
    /// May be empty when a file is attached.
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<FileKind>,
}

impl Message {
    /// Build an unread message from a draft.
    pub fn from_draft(id: MessageId, timestamp: DateTime<Utc>, draft: MessageDraft) -> Self {
        let (file_url, file_name, file_type) = match draft.attachment {
            Some(a) => (Some(a.url), a.name, a.kind),
            None => (None, None, None),
        };
        Self {
            id,
            sender_id: draft.sender_id,
            text: draft.text,
            timestamp,
            read: false,
            file_url,
            file_name,
            file_type,
        }
    }

    pub fn is_from(&self, user_id: &str) -> bool {
        self.sender_id == user_id
    }
}

/// Message content before the store stamps it with an id and time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDraft {
    pub sender_id: String,
    pub text: String,
    pub attachment: Option<Attachment>,
}

impl MessageDraft {
    /// A draft needs visible text or a file.
    pub fn is_sendable(&self) -> bool {
        !self.text.trim().is_empty() || self.attachment.is_some()
    }
}

/// Complete conversation state.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatState {
    /// Chronological, insertion ordered.
    pub messages: Vec<Message>,
    pub users: UserMap,
    /// Snapshot of the logged-in user, refreshed by every transition that
    /// touches it.
    pub current_user: Option<User>,
    pub is_typing: bool,
}

impl Default for ChatState {
    fn default() -> Self {
        Self::with_users(seed_users(Utc::now()))
    }
}

impl ViewState for ChatState {}

impl ChatState {
    /// Fresh session state: nobody logged in, nobody typing.
    pub fn with_users(users: UserMap) -> Self {
        Self {
            messages: Vec::new(),
            users,
            current_user: None,
            is_typing: false,
        }
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.get(id)
    }

    /// The user who is not currently logged in.
    pub fn peer(&self) -> Option<&User> {
        let current = self.current_user.as_ref()?;
        self.users.values().find(|u| u.id != current.id)
    }

    /// Messages from the peer not yet marked read.
    pub fn unread_count(&self) -> usize {
        match self.peer() {
            Some(peer) => self
                .messages
                .iter()
                .filter(|m| m.is_from(&peer.id) && !m.read)
                .count(),
            None => 0,
        }
    }
}
