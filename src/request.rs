//! Argument normalization.
//!
//! Every call shape accepted by the public operations (a single entry, a list
//! of entries, or a type-to-listener mapping) is reduced here to flat
//! sequences of single add/remove requests. Grouping is kept per caller entry
//! so results can be shaped like the input.

use indexmap::IndexMap;

use crate::options::{ListenerOptions, Phase};
use crate::parser::{parse_type, split_types};

/// Value in the slot following the listener of a positional add call.
///
/// That slot holds either the options or, when nothing follows it, the name.
#[derive(Clone, Debug, PartialEq)]
pub enum OptionsSlot {
    Absent,
    Text(String),
    Options(ListenerOptions),
}

/// Resolves `add(type, listener, slot, name)` into options and a fallback name.
///
/// | `slot`       | `name`   | options                    | name      |
/// |--------------|----------|----------------------------|-----------|
/// | `Text(s)`    | absent   | `Unset`                    | `s`       |
/// | `Text(s)`    | `n`      | `Capture(!s.is_empty())`   | `n`       |
/// | `Options(o)` | any      | `o`                        | `name`    |
/// | `Absent`     | any      | `Unset`                    | `name`    |
///
/// Text with an explicit name after it is passed on as options, coerced the
/// way the host coerces a non-boolean capture flag.
pub fn resolve_slots(slot: OptionsSlot, name: Option<String>) -> (ListenerOptions, Option<String>) {
    match (slot, name) {
        (OptionsSlot::Text(text), None) => (ListenerOptions::Unset, Some(text)),
        (OptionsSlot::Text(text), Some(name)) => {
            (ListenerOptions::Capture(!text.is_empty()), Some(name))
        }
        (OptionsSlot::Options(options), name) => (options, name),
        (OptionsSlot::Absent, name) => (ListenerOptions::Unset, name),
    }
}

/// One native registration to attempt.
#[derive(Debug)]
pub struct AddRequest<'a, L> {
    pub event_type: &'a str,
    pub listener: &'a L,
    pub options: &'a ListenerOptions,
    pub name: Option<&'a str>,
}

/// Requests produced by one caller entry.
#[derive(Debug)]
pub struct AddGroup<'a, L> {
    pub requests: Vec<AddRequest<'a, L>>,
    /// Whether the entry's type token named more than one type.
    pub multi: bool,
}

/// Expands one `(types, listener, options, name)` entry, one request per type.
pub fn expand_add<'a, L>(
    types: &'a str,
    listener: &'a L,
    options: &'a ListenerOptions,
    name: Option<&'a str>,
) -> AddGroup<'a, L> {
    let tokens = split_types(types);
    let multi = tokens.len() > 1;
    let requests = tokens
        .into_iter()
        .map(|token| {
            let parsed = parse_type(token, name);
            AddRequest {
                event_type: parsed.event_type,
                listener,
                options,
                name: parsed.name,
            }
        })
        .collect();
    AddGroup { requests, multi }
}

#[derive(Clone, Debug)]
pub struct AddEntry<L> {
    pub types: String,
    pub listener: L,
    pub options: ListenerOptions,
    pub name: Option<String>,
}

impl<L> AddEntry<L> {
    pub fn new(types: impl Into<String>, listener: L) -> Self {
        Self {
            types: types.into(),
            listener,
            options: ListenerOptions::Unset,
            name: None,
        }
    }

    /// Builds an entry from the positional form; see [`resolve_slots`].
    pub fn positional(
        types: impl Into<String>,
        listener: L,
        slot: OptionsSlot,
        name: Option<String>,
    ) -> Self {
        let (options, name) = resolve_slots(slot, name);
        Self {
            types: types.into(),
            listener,
            options,
            name,
        }
    }

    pub fn options(mut self, options: impl Into<ListenerOptions>) -> Self {
        self.options = options.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn expand(&self) -> AddGroup<'_, L> {
        expand_add(&self.types, &self.listener, &self.options, self.name.as_deref())
    }
}

impl<L, S: Into<String>> From<(S, L)> for AddEntry<L> {
    fn from((types, listener): (S, L)) -> Self {
        AddEntry::new(types, listener)
    }
}

/// The three shapes accepted by `add_listener`.
#[derive(Clone, Debug)]
pub enum AddSpec<L> {
    Single(AddEntry<L>),
    List(Vec<AddEntry<L>>),
    /// Type token to listener, expanded in key order.
    Map(IndexMap<String, L>),
}

impl<L> From<AddEntry<L>> for AddSpec<L> {
    fn from(entry: AddEntry<L>) -> Self {
        AddSpec::Single(entry)
    }
}

impl<L> From<Vec<AddEntry<L>>> for AddSpec<L> {
    fn from(entries: Vec<AddEntry<L>>) -> Self {
        AddSpec::List(entries)
    }
}

impl<L> From<IndexMap<String, L>> for AddSpec<L> {
    fn from(map: IndexMap<String, L>) -> Self {
        AddSpec::Map(map)
    }
}

/// How a removal identifies the listener.
#[derive(Clone, Debug, PartialEq)]
pub enum ListenerRef<L> {
    Listener(L),
    Name(String),
}

impl<L> ListenerRef<L> {
    /// An empty name means "no listener given".
    fn normalized(this: Option<&Self>) -> Option<&Self> {
        match this {
            Some(ListenerRef::Name(name)) if name.is_empty() => None,
            other => other,
        }
    }
}

/// What a single removal request selects within its type.
#[derive(Debug, PartialEq)]
pub enum RemoveCriterion<'a, L> {
    Name(&'a str),
    Listener(&'a L, Phase),
    Everything,
}

#[derive(Debug, PartialEq)]
pub struct RemoveRequest<'a, L> {
    /// Empty when the request spans every type of the target.
    pub event_type: &'a str,
    pub criterion: RemoveCriterion<'a, L>,
}

pub fn expand_remove<'a, L>(
    types: &'a str,
    listener: Option<&'a ListenerRef<L>>,
    options: &ListenerOptions,
) -> Vec<RemoveRequest<'a, L>> {
    let listener = ListenerRef::normalized(listener);
    let fallback_name = match listener {
        Some(ListenerRef::Name(name)) => Some(name.as_str()),
        _ => None,
    };

    split_types(types)
        .into_iter()
        .filter_map(|token| {
            let parsed = parse_type(token, fallback_name);
            let criterion = match (parsed.name, listener) {
                (Some(name), _) => RemoveCriterion::Name(name),
                (None, Some(ListenerRef::Listener(l))) => {
                    RemoveCriterion::Listener(l, options.phase())
                }
                // a name cleared by an empty `.` suffix selects nothing
                (None, Some(ListenerRef::Name(_))) => return None,
                (None, None) => RemoveCriterion::Everything,
            };
            Some(RemoveRequest {
                event_type: parsed.event_type,
                criterion,
            })
        })
        .collect()
}

#[derive(Clone, Debug)]
pub struct RemoveEntry<L> {
    pub types: String,
    pub listener: Option<ListenerRef<L>>,
    /// Only the capture value is used, and only when removing by listener.
    pub options: ListenerOptions,
}

impl<L> RemoveEntry<L> {
    pub fn new(types: impl Into<String>) -> Self {
        Self {
            types: types.into(),
            listener: None,
            options: ListenerOptions::Unset,
        }
    }

    pub fn listener(mut self, listener: L) -> Self {
        self.listener = Some(ListenerRef::Listener(listener));
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.listener = Some(ListenerRef::Name(name.into()));
        self
    }

    pub fn options(mut self, options: impl Into<ListenerOptions>) -> Self {
        self.options = options.into();
        self
    }

    pub fn expand(&self) -> Vec<RemoveRequest<'_, L>> {
        expand_remove(&self.types, self.listener.as_ref(), &self.options)
    }
}

impl<L> From<&str> for RemoveEntry<L> {
    fn from(types: &str) -> Self {
        RemoveEntry::new(types)
    }
}

/// The three shapes accepted by `remove_listener`.
#[derive(Clone, Debug)]
pub enum RemoveSpec<L> {
    Single(RemoveEntry<L>),
    List(Vec<RemoveEntry<L>>),
    Map(IndexMap<String, Option<ListenerRef<L>>>),
}

impl<L> RemoveSpec<L> {
    /// Every removal request, in caller order.
    pub fn requests(&self) -> Vec<RemoveRequest<'_, L>> {
        match self {
            RemoveSpec::Single(entry) => entry.expand(),
            RemoveSpec::List(entries) => entries.iter().flat_map(RemoveEntry::expand).collect(),
            RemoveSpec::Map(map) => map
                .iter()
                .flat_map(|(types, listener)| {
                    expand_remove(types, listener.as_ref(), &ListenerOptions::Unset)
                })
                .collect(),
        }
    }
}

impl<L> From<RemoveEntry<L>> for RemoveSpec<L> {
    fn from(entry: RemoveEntry<L>) -> Self {
        RemoveSpec::Single(entry)
    }
}

impl<L> From<&str> for RemoveSpec<L> {
    fn from(types: &str) -> Self {
        RemoveSpec::Single(RemoveEntry::new(types))
    }
}

impl<L> From<Vec<RemoveEntry<L>>> for RemoveSpec<L> {
    fn from(entries: Vec<RemoveEntry<L>>) -> Self {
        RemoveSpec::List(entries)
    }
}

impl<L> From<IndexMap<String, Option<ListenerRef<L>>>> for RemoveSpec<L> {
    fn from(map: IndexMap<String, Option<ListenerRef<L>>>) -> Self {
        RemoveSpec::Map(map)
    }
}
