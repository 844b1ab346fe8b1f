use std::cell::RefCell;
use std::collections::HashMap;
use std::convert::Infallible;

use crate::callback::Callback;
use crate::options::{ListenerOptions, Phase};
use crate::target::EventTarget;

struct Registered<E> {
    callback: Callback<E>,
    once: bool,
}

struct PhaseListeners<E> {
    capture: Vec<Registered<E>>,
    bubble: Vec<Registered<E>>,
}

impl<E> PhaseListeners<E> {
    fn new() -> Self {
        Self {
            capture: Vec::new(),
            bubble: Vec::new(),
        }
    }

    fn for_phase(&mut self, phase: Phase) -> &mut Vec<Registered<E>> {
        match phase {
            Phase::Capture => &mut self.capture,
            Phase::Bubble => &mut self.bubble,
        }
    }

    fn is_empty(&self) -> bool {
        self.capture.is_empty() && self.bubble.is_empty()
    }
}

/// In-process event target with DOM-like listener semantics.
///
/// Capture listeners run before bubble listeners; within a phase, listeners
/// run in registration order.
pub struct EventManager<E> {
    listeners: RefCell<HashMap<String, PhaseListeners<E>>>,
}

impl<E> EventManager<E> {
    pub fn new() -> Self {
        EventManager {
            listeners: RefCell::new(HashMap::new()),
        }
    }

    /// Invokes every listener for `event_type` and returns how many ran.
    ///
    /// Listeners are snapshotted first, so they may add or remove listeners
    /// on this manager while being dispatched.
    pub fn dispatch(&self, event_type: &str, event: &E) -> usize {
        let snapshot: Vec<Callback<E>> = {
            let mut listeners = self.listeners.borrow_mut();
            let Some(entry) = listeners.get_mut(event_type) else {
                return 0;
            };
            let mut snapshot = Vec::new();
            for phase in [Phase::Capture, Phase::Bubble] {
                let list = entry.for_phase(phase);
                snapshot.extend(list.iter().map(|r| r.callback.clone()));
                list.retain(|r| !r.once);
            }
            if entry.is_empty() {
                listeners.remove(event_type);
            }
            snapshot
        };

        for callback in &snapshot {
            callback.call(event);
        }
        snapshot.len()
    }

    pub fn listener_count(&self, event_type: &str) -> usize {
        self.listeners
            .borrow()
            .get(event_type)
            .map_or(0, |l| l.capture.len() + l.bubble.len())
    }

    pub fn has_listener(&self, event_type: &str, callback: &Callback<E>, phase: Phase) -> bool {
        let listeners = self.listeners.borrow();
        let Some(entry) = listeners.get(event_type) else {
            return false;
        };
        let list = match phase {
            Phase::Capture => &entry.capture,
            Phase::Bubble => &entry.bubble,
        };
        list.iter().any(|r| &r.callback == callback)
    }
}

impl<E> Default for EventManager<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EventTarget for EventManager<E> {
    type Listener = Callback<E>;
    type Error = Infallible;

    fn add_event_listener(
        &self,
        event_type: &str,
        listener: &Callback<E>,
        options: &ListenerOptions,
    ) -> Result<(), Infallible> {
        let once = options.once();
        let mut listeners = self.listeners.borrow_mut();
        let list = listeners
            .entry(event_type.to_string())
            .or_insert_with(PhaseListeners::new)
            .for_phase(options.phase());
        if !list.iter().any(|r| &r.callback == listener) {
            list.push(Registered {
                callback: listener.clone(),
                once,
            });
        }
        Ok(())
    }

    fn remove_event_listener(
        &self,
        event_type: &str,
        listener: &Callback<E>,
        options: &ListenerOptions,
    ) -> Result<(), Infallible> {
        let mut listeners = self.listeners.borrow_mut();
        if let Some(entry) = listeners.get_mut(event_type) {
            entry.for_phase(options.phase()).retain(|r| &r.callback != listener);
            if entry.is_empty() {
                listeners.remove(event_type);
            }
        }
        Ok(())
    }

    fn has_event_listener(&self, event_type: &str, listener: &Callback<E>, phase: Phase) -> Option<bool> {
        Some(self.has_listener(event_type, listener, phase))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ListenerFlags;
    use std::rc::Rc;

    fn recorder(log: &Rc<RefCell<Vec<&'static str>>>, label: &'static str) -> Callback<()> {
        let log = log.clone();
        Callback::new(move |_| log.borrow_mut().push(label))
    }

    #[test]
    fn capture_runs_before_bubble() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let manager = EventManager::new();
        let bubble = recorder(&log, "bubble");
        let capture = recorder(&log, "capture");

        manager.add_event_listener("click", &bubble, &ListenerOptions::Unset).unwrap();
        manager.add_event_listener("click", &capture, &true.into()).unwrap();

        assert_eq!(manager.dispatch("click", &()), 2);
        assert_eq!(*log.borrow(), vec!["capture", "bubble"]);
    }

    #[test]
    fn identical_triple_is_added_once() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let manager = EventManager::new();
        let cb = recorder(&log, "cb");

        manager.add_event_listener("click", &cb, &false.into()).unwrap();
        manager.add_event_listener("click", &cb, &ListenerOptions::Unset).unwrap();
        assert_eq!(manager.listener_count("click"), 1);

        manager.add_event_listener("click", &cb, &true.into()).unwrap();
        assert_eq!(manager.listener_count("click"), 2);
    }

    #[test]
    fn removal_needs_matching_phase() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let manager = EventManager::new();
        let cb = recorder(&log, "cb");

        manager.add_event_listener("focus", &cb, &true.into()).unwrap();
        manager.remove_event_listener("focus", &cb, &false.into()).unwrap();
        assert!(manager.has_listener("focus", &cb, Phase::Capture));

        let flags = ListenerFlags::capture(true);
        manager.remove_event_listener("focus", &cb, &flags.into()).unwrap();
        assert_eq!(manager.listener_count("focus"), 0);
    }

    #[test]
    fn once_listeners_fire_a_single_time() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let manager = EventManager::new();
        let cb = recorder(&log, "once");
        let opts = ListenerOptions::from(ListenerFlags::default().once(true));

        manager.add_event_listener("keydown", &cb, &opts).unwrap();
        assert_eq!(manager.dispatch("keydown", &()), 1);
        assert_eq!(manager.dispatch("keydown", &()), 0);
        assert_eq!(log.borrow().len(), 1);
    }
}
