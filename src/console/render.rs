//! Text rendering of the login screen and conversation.

use std::collections::HashSet;

use crate::chat::{ChatState, Message, MessageId, User};
use crate::console::command::EMOJIS;
use crate::console::format::format_local;

pub fn login_screen(state: &ChatState) -> String {
    let mut out = String::from("Choose a user to start chatting:\n");
    for (i, user) in state.users.values().enumerate() {
        out.push_str(&format!("  {}) {} [{}]\n", i + 1, user.username, user.id));
    }
    out.push_str("> ");
    out
}

/// Conversation header with the peer's presence and an unread badge.
pub fn header(peer: &User, unread: usize) -> String {
    let presence = if peer.is_online { "Online" } else { "Offline" };
    let badge = match unread {
        0 => String::new(),
        n => format!(" [{n} unread]"),
    };
    format!("== {} ({presence}){badge} ==  /help for commands", peer.username)
}

pub fn help() -> String {
    [
        "Type a line and press enter to send it.",
        "  /file <path-or-url> [caption]  attach a file",
        "  /emoji [n]                     list emojis or send the n-th",
        "  /typing on|off                 toggle the typing indicator",
        "  /clear                         delete the conversation",
        "  /logout                        switch user",
        "  /quit                          exit",
    ]
    .join("\n")
}

pub fn emoji_picker() -> String {
    EMOJIS
        .iter()
        .enumerate()
        .map(|(i, e)| format!("{}:{e}", i + 1))
        .collect::<Vec<_>>()
        .join("  ")
}

/// One message line, e.g. `[09:05] User 1: hi [report.pdf (document)] ✓✓`.
pub fn message_line(message: &Message, state: &ChatState) -> String {
    let sender = state
        .user(&message.sender_id)
        .map(|u| u.username.as_str())
        .unwrap_or(message.sender_id.as_str());
    let own = state
        .current_user
        .as_ref()
        .is_some_and(|u| message.is_from(&u.id));

    let mut line = format!("[{}] {sender}:", format_local(message.timestamp));
    if !message.text.is_empty() {
        line.push(' ');
        line.push_str(&message.text);
    }
    if let Some(url) = &message.file_url {
        let name = message.file_name.as_deref().unwrap_or(url);
        match message.file_type {
            Some(kind) => line.push_str(&format!(" [{name} ({})]", kind.as_str())),
            None => line.push_str(&format!(" [{name}]")),
        }
    }
    if own {
        line.push_str(if message.read { " ✓✓" } else { " ✓" });
    }
    line
}

/// Tracks what has already been printed so each state update only emits
/// what is new.
#[derive(Debug, Default)]
pub struct ConversationView {
    shown: HashSet<MessageId>,
    read: HashSet<MessageId>,
    peer_online: Option<bool>,
    peer_typing: bool,
}

impl ConversationView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines to print for `state` since the previous call.
    pub fn update(&mut self, state: &ChatState) -> Vec<String> {
        let mut lines = Vec::new();
        let Some(peer) = state.peer() else {
            return lines;
        };

        let first = self.peer_online.is_none();
        match self.peer_online {
            None => lines.push(header(peer, state.unread_count())),
            Some(was) if was != peer.is_online => {
                let presence = if peer.is_online { "online" } else { "offline" };
                lines.push(format!("-- {} is now {presence} --", peer.username));
            }
            Some(_) => {}
        }
        self.peer_online = Some(peer.is_online);

        if state.messages.is_empty() && !self.shown.is_empty() {
            lines.push("-- conversation cleared --".to_string());
            self.shown.clear();
            self.read.clear();
        } else if first && state.messages.is_empty() {
            lines.push("No messages yet. Start the conversation!".to_string());
        }

        let mut newly_read = 0;
        for message in &state.messages {
            if self.shown.insert(message.id.clone()) {
                lines.push(message_line(message, state));
                if message.read {
                    self.read.insert(message.id.clone());
                }
            } else if message.read
                && self.read.insert(message.id.clone())
                && !message.is_from(&peer.id)
            {
                newly_read += 1;
            }
        }
        if newly_read > 0 {
            lines.push(format!("-- {} read {newly_read} message(s) ✓✓ --", peer.username));
        }

        let typing = state.is_typing && peer.is_online;
        if typing && !self.peer_typing {
            lines.push(format!("{} is typing...", peer.username));
        }
        self.peer_typing = typing;

        lines
    }
}
