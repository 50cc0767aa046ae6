//! Base trait for intents.

/// Marker trait for intent objects.
///
/// Intents carry everything the reducer needs: timestamps, generated ids
/// and storage snapshots are resolved by the store before dispatch, so
/// reducing the same intent twice gives the same result.
pub trait Intent: Send + 'static {}
