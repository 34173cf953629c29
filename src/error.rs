use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug)]
pub enum AquariumError {
    #[error("HTTP error: status {status}")]
    Http { status: u16 },

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("JS error: {0}")]
    Js(String),

    #[error("Image encode error: {0}")]
    Encode(String),

    #[error("Color '{0}' is not allowed")]
    UnknownColor(String),

    #[error("Invalid config: {0}")]
    Config(String),
}

pub type AquariumResult<T> = Result<T, AquariumError>;

impl From<JsValue> for AquariumError {
    fn from(value: JsValue) -> Self {
        AquariumError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<png::EncodingError> for AquariumError {
    fn from(err: png::EncodingError) -> Self {
        AquariumError::Encode(err.to_string())
    }
}

impl From<AquariumError> for JsValue {
    fn from(err: AquariumError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
