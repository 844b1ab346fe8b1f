mod entry;
mod side_table;

pub use entry::{ListenerCriteria, ListenerEntry};
pub use side_table::ListenerRegistries;

use log::{debug, trace, warn};

use crate::config::RemovalOrder;
use crate::options::Phase;
use crate::request::{AddRequest, RemoveCriterion, RemoveRequest};
use crate::target::EventTarget;

/// Listeners recorded for one target, in insertion order.
///
/// Invariants: a `(type, listener, capture)` triple appears at most once, and
/// a name appears at most once per type.
#[derive(Clone, Debug)]
pub struct TargetListeners<L> {
    entries: Vec<ListenerEntry<L>>,
}

impl<L> Default for TargetListeners<L> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<L: Clone + PartialEq> TargetListeners<L> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ListenerEntry<L>] {
        &self.entries
    }

    pub fn find(&self, event_type: &str, listener: &L, phase: Phase) -> Option<&ListenerEntry<L>> {
        self.entries
            .iter()
            .find(|e| e.event_type == event_type && &e.listener == listener && e.phase() == phase)
    }

    pub fn find_by_name(&self, event_type: &str, name: &str) -> Option<&ListenerEntry<L>> {
        self.entries
            .iter()
            .find(|e| e.event_type == event_type && e.has_name(name))
    }

    /// Registers `request` natively and records it.
    ///
    /// Returns `false` without any native call when the name is taken for
    /// the type or the triple is already registered.
    pub fn add<T>(&mut self, target: &T, request: &AddRequest<'_, L>) -> bool
    where
        T: EventTarget<Listener = L>,
    {
        let event_type = request.event_type;
        let phase = request.options.phase();

        if let Some(name) = request.name {
            if self.find_by_name(event_type, name).is_some() {
                trace!("name {name:?} already used for {event_type:?}");
                return false;
            }
        }
        if self.find(event_type, request.listener, phase).is_some() {
            trace!("{} listener already registered for {event_type:?}", phase.as_str());
            return false;
        }

        if let Err(err) = target.add_event_listener(event_type, request.listener, request.options) {
            warn!("native registration for {event_type:?} failed: {err:?}");
            return false;
        }
        debug!(
            "registered {} listener for {event_type:?} (name: {:?})",
            phase.as_str(),
            request.name
        );

        self.entries.push(ListenerEntry {
            event_type: event_type.to_string(),
            listener: request.listener.clone(),
            options: request.options.clone(),
            name: request.name.map(str::to_string),
        });
        true
    }

    /// Unregisters and forgets every entry `request` selects.
    ///
    /// An empty request type selects across all types. Returns the number of
    /// entries removed.
    pub fn remove<T>(&mut self, target: &T, request: &RemoveRequest<'_, L>, order: RemovalOrder) -> usize
    where
        T: EventTarget<Listener = L>,
    {
        let event_type = request.event_type;
        let in_scope = |e: &ListenerEntry<L>| event_type.is_empty() || e.event_type == event_type;

        let removed = match request.criterion {
            RemoveCriterion::Name(name) => {
                self.remove_where(target, order, |e| in_scope(e) && e.has_name(name))
            }
            RemoveCriterion::Listener(listener, phase) => self.remove_where(target, order, |e| {
                in_scope(e) && &e.listener == listener && e.phase() == phase
            }),
            RemoveCriterion::Everything => self.remove_where(target, order, in_scope),
        };
        if removed == 0 {
            trace!("nothing to remove for {event_type:?}");
        }
        removed
    }

    /// Forgets `once` entries the target reports as already detached.
    ///
    /// Returns how many were forgotten.
    pub fn prune_fired<T>(&mut self, target: &T) -> usize
    where
        T: EventTarget<Listener = L>,
    {
        let before = self.entries.len();
        self.entries.retain(|e| {
            !e.options.once()
                || target.has_event_listener(&e.event_type, &e.listener, e.phase()) != Some(false)
        });
        let pruned = before - self.entries.len();
        if pruned > 0 {
            debug!("forgot {pruned} once listener(s) already dropped by the target");
        }
        pruned
    }

    pub fn query<'s>(
        &'s self,
        criteria: &'s ListenerCriteria<'s, L>,
    ) -> impl Iterator<Item = &'s ListenerEntry<L>> + 's {
        self.entries.iter().filter(move |e| criteria.matches(e))
    }

    fn remove_where<T>(
        &mut self,
        target: &T,
        order: RemovalOrder,
        predicate: impl Fn(&ListenerEntry<L>) -> bool,
    ) -> usize
    where
        T: EventTarget<Listener = L>,
    {
        let mut selected: Vec<usize> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| predicate(e))
            .map(|(i, _)| i)
            .collect();
        if order == RemovalOrder::PhaseGrouped {
            // stable, so insertion order holds within each phase
            selected.sort_by_key(|&i| self.entries[i].capture());
        }

        let mut removed = vec![false; self.entries.len()];
        let mut count = 0;
        for i in selected {
            let entry = &self.entries[i];
            match target.remove_event_listener(&entry.event_type, &entry.listener, &entry.options) {
                Ok(()) => {
                    debug!(
                        "unregistered {} listener for {:?} (name: {:?})",
                        entry.phase().as_str(),
                        entry.event_type,
                        entry.name
                    );
                    removed[i] = true;
                    count += 1;
                }
                Err(err) => warn!(
                    "native removal for {:?} failed, keeping entry: {err:?}",
                    entry.event_type
                ),
            }
        }

        if count > 0 {
            let mut index = 0;
            self.entries.retain(|_| {
                let keep = !removed[index];
                index += 1;
                keep
            });
        }
        count
    }
}
