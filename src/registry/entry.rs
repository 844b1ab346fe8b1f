use crate::options::{ListenerOptions, Phase};

/// A listener this crate registered through the native facility.
#[derive(Clone, Debug, PartialEq)]
pub struct ListenerEntry<L> {
    pub event_type: String,
    pub listener: L,
    /// Options exactly as passed to the native call.
    pub options: ListenerOptions,
    pub name: Option<String>,
}

impl<L> ListenerEntry<L> {
    pub fn capture(&self) -> bool {
        self.options.capture()
    }

    pub fn phase(&self) -> Phase {
        self.options.phase()
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }
}

/// AND-combined filter for `get_listeners`. Unset fields match anything.
#[derive(Debug)]
pub struct ListenerCriteria<'a, L> {
    pub name: Option<&'a str>,
    pub event_type: Option<&'a str>,
    pub listener: Option<&'a L>,
    /// Compared with the derived capture value, not the raw options.
    pub capture: Option<bool>,
}

impl<L> Default for ListenerCriteria<'_, L> {
    fn default() -> Self {
        Self {
            name: None,
            event_type: None,
            listener: None,
            capture: None,
        }
    }
}

impl<'a, L: PartialEq> ListenerCriteria<'a, L> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: &'a str) -> Self {
        self.name = Some(name);
        self
    }

    pub fn event_type(mut self, event_type: &'a str) -> Self {
        self.event_type = Some(event_type);
        self
    }

    pub fn listener(mut self, listener: &'a L) -> Self {
        self.listener = Some(listener);
        self
    }

    pub fn capture(mut self, capture: bool) -> Self {
        self.capture = Some(capture);
        self
    }

    pub fn matches(&self, entry: &ListenerEntry<L>) -> bool {
        self.name.map_or(true, |name| entry.has_name(name))
            && self.event_type.map_or(true, |t| entry.event_type == t)
            && self.listener.map_or(true, |l| &entry.listener == l)
            && self.capture.map_or(true, |c| entry.capture() == c)
    }
}
