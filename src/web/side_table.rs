use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use log::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::js_sys::{Function, Object, WeakMap};
use web_sys::EventTarget as DomEventTarget;

use crate::registry::TargetListeners;

#[wasm_bindgen]
extern "C" {
    type FinalizationRegistry;

    #[wasm_bindgen(constructor)]
    fn new(cleanup: &Function) -> FinalizationRegistry;

    #[wasm_bindgen(method)]
    fn register(this: &FinalizationRegistry, target: &Object, held_value: &JsValue);
}

/// Per-target listener records keyed through a JS `WeakMap`.
///
/// The map only holds a slot number; the records live on the Rust side and
/// are released by a `FinalizationRegistry` once the target is collected.
struct JsSideTable {
    slots: WeakMap,
    records: RefCell<HashMap<u32, TargetListeners<Function>>>,
    next_slot: Cell<u32>,
    finalizer: FinalizationRegistry,
    _cleanup: Closure<dyn FnMut(JsValue)>,
}

thread_local! {
    static SIDE_TABLE: JsSideTable = JsSideTable::new();
}

impl JsSideTable {
    fn new() -> Self {
        let cleanup = Closure::<dyn FnMut(JsValue)>::new(|held: JsValue| {
            if let Some(slot) = held.as_f64() {
                SIDE_TABLE.with(|table| table.release(slot as u32));
            }
        });
        let finalizer = FinalizationRegistry::new(cleanup.as_ref().unchecked_ref());

        Self {
            slots: WeakMap::new(),
            records: RefCell::new(HashMap::new()),
            next_slot: Cell::new(0),
            finalizer,
            _cleanup: cleanup,
        }
    }

    fn slot_of(&self, key: &Object) -> Option<u32> {
        self.slots.get(key).as_f64().map(|slot| slot as u32)
    }

    fn slot_or_insert(&self, key: &Object) -> u32 {
        if let Some(slot) = self.slot_of(key) {
            return slot;
        }
        let slot = self.next_slot.get();
        self.next_slot.set(slot.wrapping_add(1));
        let held = JsValue::from(slot);
        self.slots.set(key, &held);
        self.finalizer.register(key, &held);
        slot
    }

    fn release(&self, slot: u32) {
        if self.records.borrow_mut().remove(&slot).is_some() {
            debug!("released listener records of a collected target");
        }
    }
}

/// Runs `f` on the records of `target`, creating them if needed.
///
/// Emptied records are dropped; the slot number stays with the target.
pub fn with_listeners<R>(
    target: &DomEventTarget,
    f: impl FnOnce(&mut TargetListeners<Function>) -> R,
) -> R {
    SIDE_TABLE.with(|table| {
        let slot = table.slot_or_insert(target.as_ref());
        let mut records = table.records.borrow_mut();
        let listeners = records.entry(slot).or_default();
        let result = f(listeners);
        if listeners.is_empty() {
            records.remove(&slot);
        }
        result
    })
}

/// Runs `f` on the records of `target` if it has any.
pub fn with_existing<R>(
    target: &DomEventTarget,
    f: impl FnOnce(&mut TargetListeners<Function>) -> R,
) -> Option<R> {
    SIDE_TABLE.with(|table| {
        let slot = table.slot_of(target.as_ref())?;
        let mut records = table.records.borrow_mut();
        let listeners = records.get_mut(&slot)?;
        let result = f(listeners);
        if listeners.is_empty() {
            records.remove(&slot);
        }
        Some(result)
    })
}
