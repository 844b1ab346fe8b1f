use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use log::trace;

use crate::api::{self, AddResult};
use crate::config::RegistryOptions;
use crate::registry::{ListenerCriteria, ListenerEntry, TargetListeners};
use crate::request::{AddSpec, RemoveSpec};
use crate::target::EventTarget;

struct Slot<T: EventTarget> {
    target: Weak<T>,
    listeners: TargetListeners<T::Listener>,
}

impl<T: EventTarget> Slot<T> {
    fn is_live(&self) -> bool {
        self.target.strong_count() > 0
    }
}

/// Side table from `Rc` targets to the listeners registered on them.
///
/// Targets are held weakly: a dropped target's record is discarded on the
/// next registration or [`purge`](Self::purge). Not `Sync`; native calls are
/// made while the table is borrowed, so targets must not call back into the
/// same table from `add_event_listener`/`remove_event_listener`.
pub struct ListenerRegistries<T: EventTarget> {
    tables: RefCell<HashMap<usize, Slot<T>>>,
    options: RegistryOptions,
}

fn key<T>(target: &Rc<T>) -> usize {
    Rc::as_ptr(target) as *const () as usize
}

impl<T: EventTarget> ListenerRegistries<T> {
    pub fn new() -> Self {
        Self::with_options(RegistryOptions::default())
    }

    pub fn with_options(options: RegistryOptions) -> Self {
        Self {
            tables: RefCell::new(HashMap::new()),
            options,
        }
    }

    pub fn options(&self) -> &RegistryOptions {
        &self.options
    }

    pub fn add_listener(&self, target: &Rc<T>, spec: impl Into<AddSpec<T::Listener>>) -> AddResult {
        let spec = spec.into();
        let key = key(target);
        let mut tables = self.tables.borrow_mut();
        tables.retain(|_, slot| slot.is_live());

        let slot = tables.entry(key).or_insert_with(|| Slot {
            target: Rc::downgrade(target),
            listeners: TargetListeners::new(),
        });
        let result = api::add(target.as_ref(), &mut slot.listeners, &spec);
        if slot.listeners.is_empty() {
            tables.remove(&key);
        }
        result
    }

    pub fn remove_listener(&self, target: &Rc<T>, spec: impl Into<RemoveSpec<T::Listener>>) {
        let key = key(target);
        let mut tables = self.tables.borrow_mut();
        let Some(slot) = Self::live_slot(&mut tables, key) else {
            trace!("no listeners recorded for target");
            return;
        };

        api::remove(target.as_ref(), &mut slot.listeners, &spec.into(), self.options.removal_order);
        if slot.listeners.is_empty() {
            tables.remove(&key);
        }
    }

    /// Removes every listener recorded for `target`.
    pub fn clear(&self, target: &Rc<T>) {
        self.remove_listener(target, RemoveSpec::from(""));
    }

    pub fn get_listeners(
        &self,
        target: &Rc<T>,
        criteria: &ListenerCriteria<'_, T::Listener>,
    ) -> Vec<ListenerEntry<T::Listener>> {
        let key = key(target);
        let mut tables = self.tables.borrow_mut();
        let Some(slot) = Self::live_slot(&mut tables, key) else {
            return Vec::new();
        };
        slot.listeners.prune_fired(target.as_ref());
        let entries = api::query(Some(&slot.listeners), criteria);
        if slot.listeners.is_empty() {
            tables.remove(&key);
        }
        entries
    }

    /// Drops records of targets that no longer exist. Returns how many.
    pub fn purge(&self) -> usize {
        let mut tables = self.tables.borrow_mut();
        let before = tables.len();
        tables.retain(|_, slot| slot.is_live());
        before - tables.len()
    }

    /// Number of live targets with at least one recorded listener.
    pub fn tracked_targets(&self) -> usize {
        self.tables.borrow().values().filter(|slot| slot.is_live()).count()
    }

    fn live_slot(tables: &mut HashMap<usize, Slot<T>>, key: usize) -> Option<&mut Slot<T>> {
        // a dead slot at this address belonged to an earlier allocation
        if tables.get(&key).is_some_and(|slot| !slot.is_live()) {
            tables.remove(&key);
        }
        tables.get_mut(&key)
    }
}

impl<T: EventTarget> Default for ListenerRegistries<T> {
    fn default() -> Self {
        Self::new()
    }
}
