use std::fmt::Debug;

use crate::options::{ListenerOptions, Phase};

/// The host's native add/remove-listener facility.
///
/// Implementations must behave like the DOM primitive: adding an identical
/// `(type, listener, capture)` triple twice is a no-op, and removal only takes
/// effect on an exact `(type, listener, capture)` match.
pub trait EventTarget {
    /// Listener handle, compared by identity.
    type Listener: Clone + PartialEq;
    type Error: Debug;

    fn add_event_listener(
        &self,
        event_type: &str,
        listener: &Self::Listener,
        options: &ListenerOptions,
    ) -> Result<(), Self::Error>;

    fn remove_event_listener(
        &self,
        event_type: &str,
        listener: &Self::Listener,
        options: &ListenerOptions,
    ) -> Result<(), Self::Error>;

    /// Whether the triple is still attached, when the facility can tell.
    ///
    /// Lets the registry forget `once` listeners the target already dropped.
    /// Facilities without such a query, like the DOM, keep the default.
    fn has_event_listener(&self, _event_type: &str, _listener: &Self::Listener, _phase: Phase) -> Option<bool> {
        None
    }
}
