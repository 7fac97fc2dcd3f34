use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures while wiring the effects into the host document.
///
/// None of these reach the visitor; the runtime logs them and carries on
/// with whatever it managed to attach.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("document has no body")]
    NoBody,
    #[error("{context}: {message}")]
    Js {
        context: &'static str,
        message: String,
    },
    #[error("stylesheet rejected: {0}")]
    Style(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config is not valid json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

pub trait JsResultExt<T> {
    fn context(self, context: &'static str) -> Result<T, SetupError>;
}

impl<T> JsResultExt<T> for Result<T, JsValue> {
    fn context(self, context: &'static str) -> Result<T, SetupError> {
        self.map_err(|err| SetupError::Js {
            context,
            message: js_message(&err),
        })
    }
}

fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
