//! Orchestration of parser, normalizer and registry, and shaping of results
//! after the caller's input.

use indexmap::IndexMap;

use crate::config::RemovalOrder;
use crate::options::ListenerOptions;
use crate::registry::{ListenerCriteria, ListenerEntry, TargetListeners};
use crate::request::{expand_add, AddGroup, AddSpec, RemoveSpec};
use crate::target::EventTarget;

/// Result for one caller entry: a flag, or one flag per declared type when
/// the entry's type token named several.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AddOutcome {
    Single(bool),
    Multi(Vec<bool>),
}

impl AddOutcome {
    pub fn added_any(&self) -> bool {
        match self {
            AddOutcome::Single(added) => *added,
            AddOutcome::Multi(added) => added.iter().any(|a| *a),
        }
    }

    pub fn added_all(&self) -> bool {
        match self {
            AddOutcome::Single(added) => *added,
            AddOutcome::Multi(added) => added.iter().all(|a| *a),
        }
    }
}

impl From<bool> for AddOutcome {
    fn from(added: bool) -> Self {
        AddOutcome::Single(added)
    }
}

impl From<Vec<bool>> for AddOutcome {
    fn from(added: Vec<bool>) -> Self {
        AddOutcome::Multi(added)
    }
}

/// Mirrors the shape of the [`AddSpec`] it answers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AddResult {
    Single(AddOutcome),
    List(Vec<AddOutcome>),
    Map(IndexMap<String, AddOutcome>),
}

impl AddResult {
    /// The flag of a single-type, single-entry call.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AddResult::Single(AddOutcome::Single(added)) => Some(*added),
            _ => None,
        }
    }
}

fn add_group<T: EventTarget>(
    target: &T,
    listeners: &mut TargetListeners<T::Listener>,
    group: AddGroup<'_, T::Listener>,
) -> AddOutcome {
    let mut added: Vec<bool> = group
        .requests
        .iter()
        .map(|request| listeners.add(target, request))
        .collect();
    if group.multi {
        AddOutcome::Multi(added)
    } else {
        AddOutcome::Single(added.pop().unwrap_or(false))
    }
}

pub fn add<T: EventTarget>(
    target: &T,
    listeners: &mut TargetListeners<T::Listener>,
    spec: &AddSpec<T::Listener>,
) -> AddResult {
    listeners.prune_fired(target);
    match spec {
        AddSpec::Single(entry) => AddResult::Single(add_group(target, listeners, entry.expand())),
        AddSpec::List(entries) => AddResult::List(
            entries
                .iter()
                .map(|entry| add_group(target, listeners, entry.expand()))
                .collect(),
        ),
        AddSpec::Map(map) => {
            let unset = ListenerOptions::Unset;
            AddResult::Map(
                map.iter()
                    .map(|(types, listener)| {
                        let group = expand_add(types, listener, &unset, None);
                        (types.clone(), add_group(target, listeners, group))
                    })
                    .collect(),
            )
        }
    }
}

/// Applies every request of `spec`, left to right. Returns the number of
/// entries removed.
pub fn remove<T: EventTarget>(
    target: &T,
    listeners: &mut TargetListeners<T::Listener>,
    spec: &RemoveSpec<T::Listener>,
    order: RemovalOrder,
) -> usize {
    listeners.prune_fired(target);
    spec.requests()
        .iter()
        .map(|request| listeners.remove(target, request, order))
        .sum()
}

pub fn query<L: Clone + PartialEq>(
    listeners: Option<&TargetListeners<L>>,
    criteria: &ListenerCriteria<'_, L>,
) -> Vec<ListenerEntry<L>> {
    listeners.map_or_else(Vec::new, |listeners| {
        listeners.query(criteria).cloned().collect()
    })
}
