//! Conversation state machine.
//!
//! # Architecture
//!
//! Uses the MVI pattern from [`crate::mvi`]:
//! - `types.rs` - users, messages and the aggregate `ChatState`
//! - `intent.rs` - login/logout, send, read, typing, refresh, clear
//! - `reducer.rs` - state transitions (pure, no side effects)

mod intent;
mod reducer;
mod types;

pub use intent::{ChatIntent, Persist};
pub use reducer::ChatReducer;
pub use types::{
    seed_users, Attachment, ChatState, FileKind, Message, MessageDraft, MessageId, User, UserMap,
    USER_1, USER_2,
};
