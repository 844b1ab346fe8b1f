//! Browser binding: DOM event targets as the native facility, and the
//! exported `addListener`, `removeListener`, `getListeners` functions.

mod args;
mod console;
mod side_table;

use std::sync::{Mutex, PoisonError};

use once_cell::sync::Lazy;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::js_sys::{Array, Function};
use web_sys::{AddEventListenerOptions, EventTarget as DomEventTarget};

use crate::api;
use crate::config::RegistryOptions;
use crate::error::ArgumentError;
use crate::options::ListenerOptions;
use crate::target::EventTarget;

static OPTIONS: Lazy<Mutex<RegistryOptions>> = Lazy::new(|| Mutex::new(RegistryOptions::default()));

fn current_options() -> RegistryOptions {
    OPTIONS.lock().unwrap_or_else(PoisonError::into_inner).clone()
}

impl EventTarget for DomEventTarget {
    type Listener = Function;
    type Error = JsValue;

    fn add_event_listener(
        &self,
        event_type: &str,
        listener: &Function,
        options: &ListenerOptions,
    ) -> Result<(), JsValue> {
        match options {
            ListenerOptions::Unset => self.add_event_listener_with_callback(event_type, listener),
            ListenerOptions::Capture(capture) => {
                self.add_event_listener_with_callback_and_bool(event_type, listener, *capture)
            }
            ListenerOptions::Flags(flags) => {
                let native = AddEventListenerOptions::new();
                native.set_capture(flags.capture);
                native.set_once(flags.once);
                if let Some(passive) = flags.passive {
                    native.set_passive(passive);
                }
                self.add_event_listener_with_callback_and_add_event_listener_options(
                    event_type, listener, &native,
                )
            }
            ListenerOptions::Host(host) => self
                .add_event_listener_with_callback_and_add_event_listener_options(
                    event_type,
                    listener,
                    host.value.unchecked_ref(),
                ),
        }
    }

    fn remove_event_listener(
        &self,
        event_type: &str,
        listener: &Function,
        options: &ListenerOptions,
    ) -> Result<(), JsValue> {
        self.remove_event_listener_with_callback_and_bool(event_type, listener, options.capture())
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console::init(current_options().log_level);
}

/// Replaces the registry options, e.g. `configure({removalOrder: "insertion"})`.
#[wasm_bindgen]
pub fn configure(options: JsValue) -> Result<(), JsValue> {
    let options: RegistryOptions = if options.is_undefined() || options.is_null() {
        RegistryOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| ArgumentError::InvalidOptions(e.to_string()))?
    };
    console::init(options.log_level);
    *OPTIONS.lock().unwrap_or_else(PoisonError::into_inner) = options;
    Ok(())
}

/// `addListener(target, type, listener?, options?, name?)`
///
/// `type` is a type token (`"click touchstart.tap"`), an array of
/// `[type, listener, options?, name?]` arrays, or a `{type: listener}` object.
/// Returns a boolean, an array of booleans per space-separated type, or an
/// array/object of those mirroring `type`.
#[wasm_bindgen(js_name = addListener)]
pub fn add_listener(
    target: &DomEventTarget,
    types: JsValue,
    listener: JsValue,
    options: JsValue,
    name: JsValue,
) -> Result<JsValue, JsValue> {
    let spec = args::add_spec(&types, &listener, &options, &name)?;
    let result = side_table::with_listeners(target, |listeners| api::add(target, listeners, &spec));
    args::add_result_to_js(&result)
}

/// `removeListener(target, type?, listener?, options?)`
///
/// `listener` may be a function, a reference name, or omitted to remove every
/// listener of the type. An omitted or empty `type` spans all types.
#[wasm_bindgen(js_name = removeListener)]
pub fn remove_listener(
    target: &DomEventTarget,
    types: JsValue,
    listener: JsValue,
    options: JsValue,
) -> Result<(), JsValue> {
    let spec = args::remove_spec(&types, &listener, &options)?;
    let order = current_options().removal_order;
    side_table::with_existing(target, |listeners| {
        api::remove(target, listeners, &spec, order)
    });
    Ok(())
}

/// `getListeners(target, {name?, type?, fn?, capture?}?)`
#[wasm_bindgen(js_name = getListeners)]
pub fn get_listeners(target: &DomEventTarget, criteria: JsValue) -> Result<Array, JsValue> {
    let criteria = args::Criteria::from_js(&criteria)?;
    let criteria = criteria.as_criteria();
    let entries = side_table::with_existing(target, |listeners| {
        api::query(Some(&*listeners), &criteria)
    })
    .unwrap_or_default();

    let array = Array::new();
    for entry in &entries {
        array.push(&args::entry_to_js(entry)?);
    }
    Ok(array)
}
