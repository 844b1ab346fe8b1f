use thiserror::Error;
use wasm_bindgen::JsValue;
use web_sys::js_sys::TypeError;

/// A JavaScript argument of the wrong kind.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("listener for {0:?} is not a function")]
    NotCallable(String),
    #[error("listener for {0:?} must be a function, a name or empty")]
    InvalidListener(String),
    #[error("type must be a string, an array or an object")]
    InvalidType,
    #[error("entry {0} must be a type string or an array starting with one")]
    InvalidEntry(usize),
    #[error("invalid options: {0}")]
    InvalidOptions(String),
    #[error("criteria must be an object whose `fn` is a function")]
    InvalidCriteria,
}

impl From<ArgumentError> for JsValue {
    fn from(err: ArgumentError) -> Self {
        TypeError::new(&err.to_string()).into()
    }
}
