//! Decoding of JavaScript call arguments and encoding of results.

use indexmap::IndexMap;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::{Array, Function, Object, Reflect};

use crate::api::{AddOutcome, AddResult};
use crate::error::ArgumentError;
use crate::options::{HostOptions, ListenerOptions};
use crate::registry::{ListenerCriteria, ListenerEntry};
use crate::request::{AddEntry, AddSpec, ListenerRef, OptionsSlot, RemoveEntry, RemoveSpec};

fn is_absent(value: &JsValue) -> bool {
    value.is_undefined() || value.is_null()
}

fn function(value: &JsValue, types: &str) -> Result<Function, ArgumentError> {
    value
        .dyn_ref::<Function>()
        .cloned()
        .ok_or_else(|| ArgumentError::NotCallable(types.to_string()))
}

fn object_entries(value: &JsValue) -> Vec<(String, JsValue)> {
    Object::entries(value.unchecked_ref())
        .iter()
        .filter_map(|pair| {
            let pair = Array::from(&pair);
            Some((pair.get(0).as_string()?, pair.get(1)))
        })
        .collect()
}

/// Booleans pass through and objects are kept as they are, with `capture`
/// and `once` read by truthiness. Anything else counts by truthiness.
pub fn options(value: &JsValue) -> ListenerOptions {
    if is_absent(value) {
        return ListenerOptions::Unset;
    }
    if let Some(capture) = value.as_bool() {
        return ListenerOptions::Capture(capture);
    }
    if value.is_object() {
        let flag = |key: &str| {
            Reflect::get(value, &JsValue::from_str(key)).map_or(false, |v| v.is_truthy())
        };
        return ListenerOptions::Host(HostOptions {
            value: value.clone(),
            capture: flag("capture"),
            once: flag("once"),
        });
    }
    ListenerOptions::Capture(value.is_truthy())
}

fn options_slot(value: &JsValue) -> OptionsSlot {
    if is_absent(value) {
        OptionsSlot::Absent
    } else if let Some(text) = value.as_string() {
        OptionsSlot::Text(text)
    } else {
        OptionsSlot::Options(options(value))
    }
}

/// Names are compared as strings; other values are stringified like JS does.
fn name(value: &JsValue) -> Option<String> {
    if is_absent(value) {
        None
    } else {
        Some(
            value
                .as_string()
                .unwrap_or_else(|| value.unchecked_ref::<Object>().to_string().into()),
        )
    }
}

fn add_entry(
    types: String,
    listener: &JsValue,
    options: &JsValue,
    name: &JsValue,
) -> Result<AddEntry<Function>, ArgumentError> {
    let listener = function(listener, &types)?;
    Ok(AddEntry::positional(
        types,
        listener,
        options_slot(options),
        self::name(name),
    ))
}

pub fn add_spec(
    types: &JsValue,
    listener: &JsValue,
    options: &JsValue,
    name: &JsValue,
) -> Result<AddSpec<Function>, ArgumentError> {
    if let Some(types) = types.as_string() {
        return add_entry(types, listener, options, name).map(AddSpec::Single);
    }
    if Array::is_array(types) {
        let entries = Array::from(types)
            .iter()
            .enumerate()
            .map(|(i, item)| {
                if !Array::is_array(&item) {
                    return Err(ArgumentError::InvalidEntry(i));
                }
                let item = Array::from(&item);
                let types = item.get(0).as_string().ok_or(ArgumentError::InvalidEntry(i))?;
                add_entry(types, &item.get(1), &item.get(2), &item.get(3))
            })
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(AddSpec::List(entries));
    }
    if types.is_object() {
        let mut map = IndexMap::new();
        for (key, value) in object_entries(types) {
            let listener = function(&value, &key)?;
            map.insert(key, listener);
        }
        return Ok(AddSpec::Map(map));
    }
    Err(ArgumentError::InvalidType)
}

fn listener_ref(value: &JsValue, types: &str) -> Result<Option<ListenerRef<Function>>, ArgumentError> {
    if is_absent(value) {
        Ok(None)
    } else if let Some(name) = value.as_string() {
        Ok(Some(ListenerRef::Name(name)))
    } else if let Some(listener) = value.dyn_ref::<Function>() {
        Ok(Some(ListenerRef::Listener(listener.clone())))
    } else {
        Err(ArgumentError::InvalidListener(types.to_string()))
    }
}

fn remove_entry(
    types: String,
    listener: &JsValue,
    options: &JsValue,
) -> Result<RemoveEntry<Function>, ArgumentError> {
    let listener = listener_ref(listener, &types)?;
    Ok(RemoveEntry {
        types,
        listener,
        options: self::options(options),
    })
}

pub fn remove_spec(
    types: &JsValue,
    listener: &JsValue,
    options: &JsValue,
) -> Result<RemoveSpec<Function>, ArgumentError> {
    if is_absent(types) {
        return remove_entry(String::new(), listener, options).map(RemoveSpec::Single);
    }
    if let Some(types) = types.as_string() {
        return remove_entry(types, listener, options).map(RemoveSpec::Single);
    }
    if Array::is_array(types) {
        let entries = Array::from(types)
            .iter()
            .enumerate()
            .map(|(i, item)| {
                if let Some(types) = item.as_string() {
                    return Ok(RemoveEntry::new(types));
                }
                if !Array::is_array(&item) {
                    return Err(ArgumentError::InvalidEntry(i));
                }
                let item = Array::from(&item);
                let types = item.get(0).as_string().ok_or(ArgumentError::InvalidEntry(i))?;
                remove_entry(types, &item.get(1), &item.get(2))
            })
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(RemoveSpec::List(entries));
    }
    if types.is_object() {
        let mut map = IndexMap::new();
        for (key, value) in object_entries(types) {
            let listener = listener_ref(&value, &key)?;
            map.insert(key, listener);
        }
        return Ok(RemoveSpec::Map(map));
    }
    Err(ArgumentError::InvalidType)
}

/// Owned form of the `{name, type, fn, capture}` criteria object.
#[derive(Default)]
pub struct Criteria {
    name: Option<String>,
    event_type: Option<String>,
    listener: Option<Function>,
    capture: Option<bool>,
}

impl Criteria {
    pub fn from_js(value: &JsValue) -> Result<Self, ArgumentError> {
        if is_absent(value) {
            return Ok(Self::default());
        }
        if !value.is_object() {
            return Err(ArgumentError::InvalidCriteria);
        }
        let field = |key: &str| Reflect::get(value, &JsValue::from_str(key)).unwrap_or(JsValue::UNDEFINED);

        let listener = field("fn");
        let listener = if is_absent(&listener) {
            None
        } else {
            Some(listener.dyn_into::<Function>().map_err(|_| ArgumentError::InvalidCriteria)?)
        };
        let capture = field("capture");

        Ok(Self {
            name: field("name").as_string(),
            event_type: field("type").as_string(),
            listener,
            capture: (!is_absent(&capture)).then(|| capture.is_truthy()),
        })
    }

    pub fn as_criteria(&self) -> ListenerCriteria<'_, Function> {
        ListenerCriteria {
            name: self.name.as_deref(),
            event_type: self.event_type.as_deref(),
            listener: self.listener.as_ref(),
            capture: self.capture,
        }
    }
}

fn outcome_to_js(outcome: &AddOutcome) -> JsValue {
    match outcome {
        AddOutcome::Single(added) => JsValue::from_bool(*added),
        AddOutcome::Multi(added) => added
            .iter()
            .map(|a| JsValue::from_bool(*a))
            .collect::<Array>()
            .into(),
    }
}

pub fn add_result_to_js(result: &AddResult) -> Result<JsValue, JsValue> {
    match result {
        AddResult::Single(outcome) => Ok(outcome_to_js(outcome)),
        AddResult::List(outcomes) => Ok(outcomes.iter().map(outcome_to_js).collect::<Array>().into()),
        AddResult::Map(outcomes) => {
            let object = Object::new();
            for (types, outcome) in outcomes {
                Reflect::set(&object, &JsValue::from_str(types), &outcome_to_js(outcome))?;
            }
            Ok(object.into())
        }
    }
}

fn options_to_js(options: &ListenerOptions) -> Result<JsValue, JsValue> {
    match options {
        ListenerOptions::Unset => Ok(JsValue::UNDEFINED),
        ListenerOptions::Capture(capture) => Ok(JsValue::from_bool(*capture)),
        ListenerOptions::Flags(flags) => Ok(serde_wasm_bindgen::to_value(flags)?),
        ListenerOptions::Host(host) => Ok(host.value.clone()),
    }
}

pub fn entry_to_js(entry: &ListenerEntry<Function>) -> Result<JsValue, JsValue> {
    let object = Object::new();
    let name = entry
        .name
        .as_deref()
        .map_or(JsValue::UNDEFINED, JsValue::from_str);
    Reflect::set(&object, &"type".into(), &JsValue::from_str(&entry.event_type))?;
    Reflect::set(&object, &"fn".into(), &entry.listener)?;
    Reflect::set(&object, &"options".into(), &options_to_js(&entry.options)?)?;
    Reflect::set(&object, &"name".into(), &name)?;
    Reflect::set(&object, &"capture".into(), &JsValue::from_bool(entry.capture()))?;
    Ok(object.into())
}
