//! Reducer for the chat state.

use crate::chat::intent::ChatIntent;
use crate::chat::types::{ChatState, Message, MessageId};
use crate::mvi::Reducer;

/// Pure chat reducer. Storage writes that follow a transition are the
/// store's job, driven by [`ChatIntent::persist`].
pub struct ChatReducer;

impl Reducer for ChatReducer {
    type State = ChatState;
    type Intent = ChatIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ChatIntent::Login { user_id, at } => {
                let Some(updated) = state.users.get(&user_id).map(|u| u.with_presence(true, at))
                else {
                    return state;
                };
                let mut users = state.users;
                users.insert(user_id, updated.clone());
                ChatState {
                    users,
                    current_user: Some(updated),
                    ..state
                }
            }

            ChatIntent::Logout { at } => {
                let Some(current_id) = state.current_user.as_ref().map(|u| u.id.clone()) else {
                    return state;
                };
                let mut users = state.users;
                if let Some(user) = users.get_mut(&current_id) {
                    *user = user.with_presence(false, at);
                }
                ChatState {
                    users,
                    current_user: None,
                    ..state
                }
            }

            ChatIntent::SendMessage { id, at, draft } => {
                let id = unique_id(&state.messages, id);
                let mut messages = state.messages;
                messages.push(Message::from_draft(id, at, draft));
                ChatState { messages, ..state }
            }

            ChatIntent::SetTyping(is_typing) => ChatState { is_typing, ..state },

            ChatIntent::ReadMessages => {
                let Some(peer_id) = state.peer().map(|u| u.id.clone()) else {
                    return state;
                };
                let mut messages = state.messages;
                for message in messages.iter_mut().filter(|m| m.is_from(&peer_id)) {
                    message.read = true;
                }
                ChatState { messages, ..state }
            }

            ChatIntent::Refresh { messages, users } => ChatState {
                messages: messages.unwrap_or(state.messages),
                users: users.unwrap_or(state.users),
                ..state
            },

            ChatIntent::ClearMessages => ChatState {
                messages: Vec::new(),
                ..state
            },
        }
    }
}

/// Keep `id` unless it is already taken, else suffix it until it is free.
fn unique_id(messages: &[Message], id: MessageId) -> MessageId {
    let taken = |candidate: &MessageId| messages.iter().any(|m| &m.id == candidate);
    if !taken(&id) {
        return id;
    }
    let mut n = 1u64;
    loop {
        let candidate = MessageId(format!("{}_{}", id.as_str(), n));
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
