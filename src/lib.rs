//! Bookkeeping layer over a host's native add/remove-listener facility.
//!
//! Listeners are added in bulk (one entry, a list of entries, or a
//! type-to-listener map), can carry a short reference name (`"click.menu"`),
//! and can later be removed by name, by listener, by type, or all at once
//! without keeping the listener and capture flag around.
//!
//! ```
//! use std::rc::Rc;
//! use listener_register::{AddEntry, Callback, EventManager, ListenerCriteria, ListenerRegistries, RemoveEntry};
//!
//! let target = Rc::new(EventManager::<()>::new());
//! let registries = ListenerRegistries::new();
//! let on_click = Callback::new(|_: &()| {});
//!
//! let added = registries.add_listener(&target, AddEntry::new("click.menu", on_click.clone()).options(true));
//! assert_eq!(added.as_bool(), Some(true));
//! assert_eq!(registries.get_listeners(&target, &ListenerCriteria::new().name("menu")).len(), 1);
//!
//! registries.remove_listener(&target, RemoveEntry::new("click").name("menu"));
//! assert_eq!(target.listener_count("click"), 0);
//! ```

mod api;
mod callback;
mod config;
mod error;
mod event_manager;
mod options;
mod parser;
mod registry;
mod request;
mod target;
#[cfg(target_arch = "wasm32")]
mod web;

pub use api::{add, query, remove, AddOutcome, AddResult};
pub use callback::Callback;
pub use config::{RegistryOptions, RemovalOrder};
pub use error::ArgumentError;
pub use event_manager::EventManager;
pub use options::{HostOptions, ListenerFlags, ListenerOptions, Phase};
pub use parser::{parse_type, split_types, ParsedType};
pub use registry::{ListenerCriteria, ListenerEntry, ListenerRegistries, TargetListeners};
pub use request::{
    resolve_slots, AddEntry, AddRequest, AddSpec, ListenerRef, OptionsSlot, RemoveCriterion,
    RemoveEntry, RemoveRequest, RemoveSpec,
};
pub use target::EventTarget;
#[cfg(target_arch = "wasm32")]
pub use web::{add_listener, configure, get_listeners, remove_listener};
