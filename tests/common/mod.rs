#![allow(dead_code)]

use std::cell::RefCell;

use listener_register::{EventTarget, ListenerOptions};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Add(String, u32, ListenerOptions),
    Remove(String, u32, bool),
}

pub fn added(event_type: &str, listener: u32, options: impl Into<ListenerOptions>) -> Call {
    Call::Add(event_type.to_string(), listener, options.into())
}

pub fn removed(event_type: &str, listener: u32, capture: bool) -> Call {
    Call::Remove(event_type.to_string(), listener, capture)
}

/// Target that records every native call. Listeners are plain ids.
#[derive(Default)]
pub struct SpyTarget {
    calls: RefCell<Vec<Call>>,
}

impl SpyTarget {
    pub fn take_calls(&self) -> Vec<Call> {
        self.calls.take()
    }
}

impl EventTarget for SpyTarget {
    type Listener = u32;
    type Error = String;

    fn add_event_listener(
        &self,
        event_type: &str,
        listener: &u32,
        options: &ListenerOptions,
    ) -> Result<(), String> {
        self.calls
            .borrow_mut()
            .push(Call::Add(event_type.to_string(), *listener, options.clone()));
        Ok(())
    }

    fn remove_event_listener(
        &self,
        event_type: &str,
        listener: &u32,
        options: &ListenerOptions,
    ) -> Result<(), String> {
        self.calls
            .borrow_mut()
            .push(Call::Remove(event_type.to_string(), *listener, options.capture()));
        Ok(())
    }
}
