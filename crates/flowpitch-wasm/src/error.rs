//! Error types for the browser bindings

use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

/// Errors raised while wiring the page
#[derive(Error, Debug)]
pub enum WasmError {
    /// No browser window (not running in a page)
    #[error("No window available")]
    NoWindow,

    /// A required element is missing from the page
    #[error("Missing element #{0}")]
    MissingElement(&'static str),

    /// An element exists but has the wrong type
    #[error("Element #{id} is not a {expected}")]
    WrongElement {
        id: &'static str,
        expected: &'static str,
    },

    /// The settings object passed to `start` could not be decoded
    #[error("Invalid settings: {0}")]
    Settings(String),

    /// A DOM call threw
    #[error("DOM error: {0}")]
    Dom(String),
}

impl WasmError {
    /// Wrap a thrown JavaScript value
    pub fn dom(value: &JsValue) -> Self {
        Self::Dom(describe(value))
    }
}

/// Readable description of a thrown JavaScript value
pub fn describe(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{value:?}")
}

/// Result type for page wiring
pub type Result<T> = std::result::Result<T, WasmError>;
