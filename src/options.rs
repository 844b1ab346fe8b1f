use into_static_str::IntoStaticStr;
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

/// Dispatch phase a listener observes an event in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, IntoStaticStr)]
pub enum Phase {
    Bubble,
    Capture,
}

impl Phase {
    pub fn from_capture(capture: bool) -> Self {
        if capture {
            Phase::Capture
        } else {
            Phase::Bubble
        }
    }

    pub fn is_capture(self) -> bool {
        self == Phase::Capture
    }
}

/// Structured form of listener options, as in `addEventListener(type, fn, {..})`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListenerFlags {
    pub capture: bool,
    pub once: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passive: Option<bool>,
}

impl ListenerFlags {
    pub fn capture(capture: bool) -> Self {
        Self {
            capture,
            ..Self::default()
        }
    }

    pub fn once(mut self, once: bool) -> Self {
        self.once = once;
        self
    }

    pub fn passive(mut self, passive: bool) -> Self {
        self.passive = Some(passive);
        self
    }
}

/// A host options object, kept untouched for the native call.
///
/// `capture` and `once` are read from the object when it is decoded, by
/// truthiness, so later mutation of the object does not move the entry.
#[derive(Clone, Debug, PartialEq)]
pub struct HostOptions {
    pub value: JsValue,
    pub capture: bool,
    pub once: bool,
}

/// The options value handed to the native registration call.
///
/// Kept exactly as the caller supplied it; only [`ListenerOptions::capture`]
/// interprets it.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ListenerOptions {
    #[default]
    Unset,
    Capture(bool),
    Flags(ListenerFlags),
    Host(HostOptions),
}

impl ListenerOptions {
    pub fn capture(&self) -> bool {
        match self {
            ListenerOptions::Unset => false,
            ListenerOptions::Capture(capture) => *capture,
            ListenerOptions::Flags(flags) => flags.capture,
            ListenerOptions::Host(host) => host.capture,
        }
    }

    /// Whether the native facility drops the listener after its first call.
    pub fn once(&self) -> bool {
        match self {
            ListenerOptions::Flags(flags) => flags.once,
            ListenerOptions::Host(host) => host.once,
            ListenerOptions::Unset | ListenerOptions::Capture(_) => false,
        }
    }

    pub fn phase(&self) -> Phase {
        Phase::from_capture(self.capture())
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, ListenerOptions::Unset)
    }
}

impl From<bool> for ListenerOptions {
    fn from(capture: bool) -> Self {
        ListenerOptions::Capture(capture)
    }
}

impl From<ListenerFlags> for ListenerOptions {
    fn from(flags: ListenerFlags) -> Self {
        ListenerOptions::Flags(flags)
    }
}

impl<T: Into<ListenerOptions>> From<Option<T>> for ListenerOptions {
    fn from(value: Option<T>) -> Self {
        value.map_or(ListenerOptions::Unset, Into::into)
    }
}
