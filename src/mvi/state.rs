//! Base trait for observable state.

/// Marker trait for state objects published to observers.
///
/// States are cloned into snapshots for observers and compared to decide
/// whether a transition changed anything worth persisting.
pub trait ViewState: Clone + PartialEq + Default + Send + Sync + 'static {}
