//! Error types for the petal engine

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error, PartialEq)]
pub enum PetalError {
    #[error("Invalid config: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error("Browser error: {0}")]
    Browser(String),
}

pub type Result<T> = std::result::Result<T, PetalError>;

impl PetalError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        PetalError::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn browser(err: JsValue) -> Self {
        PetalError::Browser(err.as_string().unwrap_or_else(|| format!("{err:?}")))
    }
}

impl From<PetalError> for JsValue {
    fn from(err: PetalError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
