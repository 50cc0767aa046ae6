mod common;

use std::collections::HashSet;

use chrono::Utc;
use common::{login, logout, seeded_state, send};
use pairchat::chat::{
    Attachment, ChatIntent, ChatReducer, ChatState, FileKind, MessageDraft, MessageId, USER_1,
    USER_2,
};
use pairchat::mvi::Reducer;

fn online_ids(state: &ChatState) -> Vec<&str> {
    state
        .users
        .values()
        .filter(|u| u.is_online)
        .map(|u| u.id.as_str())
        .collect()
}

#[test]
fn login_then_logout_cycles_presence() {
    let mut state = seeded_state();
    for user in [USER_1, USER_2, USER_1, USER_2] {
        state = login(state, user);
        assert_eq!(online_ids(&state), vec![user]);
        assert_eq!(state.current_user.as_ref(), state.users.get(user));

        state = logout(state);
        assert!(online_ids(&state).is_empty());
        assert!(state.current_user.is_none());
    }
}

#[test]
fn logout_records_last_seen() {
    let at = Utc::now() + chrono::Duration::minutes(5);
    let state = login(seeded_state(), USER_2);
    let state = ChatReducer::reduce(state, ChatIntent::Logout { at });
    assert_eq!(state.users[USER_2].last_seen, Some(at));
    assert!(!state.users[USER_2].is_online);
}

#[test]
fn login_without_logout_leaves_both_online() {
    // The reducer tracks presence per user; switching sessions without a
    // logout is left to the front end.
    let state = login(login(seeded_state(), USER_1), USER_2);
    assert_eq!(online_ids(&state), vec![USER_1, USER_2]);
    assert_eq!(state.current_user.as_ref().map(|u| u.id.as_str()), Some(USER_2));
}

#[test]
fn send_appends_unread_message_with_fresh_id() {
    let mut state = login(seeded_state(), USER_1);
    let mut ids = HashSet::new();
    for i in 0..20 {
        let before = state.messages.len();
        state = send(state, USER_1, &format!("message {i}"));
        assert_eq!(state.messages.len(), before + 1);
        let last = state.messages.last().unwrap();
        assert!(!last.read);
        assert!(ids.insert(last.id.clone()), "duplicate id {}", last.id);
    }
}

#[test]
fn send_keeps_attachment_fields() {
    let state = ChatReducer::reduce(
        seeded_state(),
        ChatIntent::SendMessage {
            id: MessageId::generate(),
            at: Utc::now(),
            draft: MessageDraft {
                sender_id: USER_2.to_string(),
                text: String::new(),
                attachment: Some(Attachment {
                    url: "blob:photo".to_string(),
                    name: Some("photo.jpg".to_string()),
                    kind: Some(FileKind::Image),
                }),
            },
        },
    );
    let message = &state.messages[0];
    assert_eq!(message.file_url.as_deref(), Some("blob:photo"));
    assert_eq!(message.file_name.as_deref(), Some("photo.jpg"));
    assert_eq!(message.file_type, Some(FileKind::Image));
    assert!(message.text.is_empty());
}

#[test]
fn read_messages_is_idempotent() {
    let state = send(seeded_state(), USER_2, "hello");
    let state = send(state, USER_1, "hi back");
    let state = send(state, USER_2, "how are you");
    let state = login(state, USER_1);

    let once = ChatReducer::reduce(state, ChatIntent::ReadMessages);
    let twice = ChatReducer::reduce(once.clone(), ChatIntent::ReadMessages);
    assert_eq!(once, twice);
    assert_eq!(
        once.messages.iter().map(|m| m.read).collect::<Vec<_>>(),
        vec![true, false, true]
    );
}

#[test]
fn read_messages_without_session_is_noop() {
    let state = send(seeded_state(), USER_2, "hello");
    let after = ChatReducer::reduce(state.clone(), ChatIntent::ReadMessages);
    assert_eq!(state, after);
}

#[test]
fn read_never_reverses() {
    let state = login(send(seeded_state(), USER_2, "hello"), USER_1);
    let state = ChatReducer::reduce(state, ChatIntent::ReadMessages);
    let state = logout(state);
    let state = login(state, USER_2);
    let state = ChatReducer::reduce(state, ChatIntent::ReadMessages);
    assert!(state.messages[0].read);
}

#[test]
fn refresh_replaces_collections_but_not_session() {
    let state = login(seeded_state(), USER_1);
    let state = ChatReducer::reduce(state, ChatIntent::SetTyping(true));

    let remote = send(seeded_state(), USER_2, "from the other tab");
    let remote = login(remote, USER_2);

    let after = ChatReducer::reduce(
        state.clone(),
        ChatIntent::Refresh {
            messages: Some(remote.messages.clone()),
            users: Some(remote.users.clone()),
        },
    );
    assert_eq!(after.messages, remote.messages);
    assert_eq!(after.users, remote.users);
    assert_eq!(after.current_user, state.current_user);
    assert!(after.is_typing);
}

#[test]
fn refresh_applies_only_present_collections() {
    let state = send(seeded_state(), USER_1, "local");
    let remote_users = login(seeded_state(), USER_2).users;
    let after = ChatReducer::reduce(
        state.clone(),
        ChatIntent::Refresh {
            messages: None,
            users: Some(remote_users.clone()),
        },
    );
    assert_eq!(after.messages, state.messages);
    assert_eq!(after.users, remote_users);
}

#[test]
fn clear_empties_messages_only() {
    let state = login(send(seeded_state(), USER_1, "bye"), USER_1);
    let after = ChatReducer::reduce(state.clone(), ChatIntent::ClearMessages);
    assert!(after.messages.is_empty());
    assert_eq!(after.users, state.users);
    assert_eq!(after.current_user, state.current_user);
}

#[test]
fn scenario_login_and_send_hi() {
    let state = login(seeded_state(), USER_1);
    let state = send(state, USER_1, "hi");
    assert!(state.users[USER_1].is_online);
    assert_eq!(state.messages.len(), 1);
    let message = &state.messages[0];
    assert_eq!(message.sender_id, USER_1);
    assert_eq!(message.text, "hi");
    assert!(!message.read);
}
