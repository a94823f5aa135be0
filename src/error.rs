use thiserror::Error;
use wasm_bindgen::JsValue;

/// Why a page enhancement could not be mounted.
///
/// None of these are fatal: the caller logs them and the section stays static.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("missing element: {0}")]
    MissingElement(&'static str),
    #[error("slide width could not be measured")]
    DegenerateGeometry,
    #[error("dom call failed: {0}")]
    Js(String),
}

impl From<JsValue> for PageError {
    fn from(value: JsValue) -> Self {
        PageError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}
