//! Model-View-Intent primitives shared by the chat state machine.
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ Observers
//!    ↑                                │
//!    └────────────────────────────────┘
//! ```
//!
//! - **State**: immutable snapshot handed to observers
//! - **Intent**: user action or timer event, fully resolved before dispatch
//! - **Reducer**: pure function producing the next state

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::ViewState;
