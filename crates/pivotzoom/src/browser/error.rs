//! Browser binding errors.

use pivotzoom_core::ConfigError;
use thiserror::Error;

/// Failures while wiring gestures to a DOM element.
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// No global `window` (not running in a browser main thread).
    #[error("no window available")]
    NoWindow,

    /// No document on the window.
    #[error("no document available")]
    NoDocument,

    /// Element lookup by id failed.
    #[error("element '{0}' not found")]
    ElementNotFound(String),

    /// `addEventListener` threw.
    #[error("failed to attach '{event}' listener: {message}")]
    Listener {
        /// DOM event type
        event: &'static str,
        /// JavaScript error message
        message: String,
    },

    /// `setTimeout` threw.
    #[error("failed to schedule timeout: {0}")]
    Timer(String),

    /// Gesture configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SurfaceError {
    #[cfg(target_arch = "wasm32")]
    pub(crate) fn listener(event: &'static str, err: &wasm_bindgen::JsValue) -> Self {
        Self::Listener {
            event,
            message: js_message(err),
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub(crate) fn timer(err: &wasm_bindgen::JsValue) -> Self {
        Self::Timer(js_message(err))
    }
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn js_message(value: &wasm_bindgen::JsValue) -> String {
    use wasm_bindgen::JsCast;

    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

#[cfg(target_arch = "wasm32")]
impl From<SurfaceError> for wasm_bindgen::JsValue {
    fn from(err: SurfaceError) -> Self {
        Self::from_str(&err.to_string())
    }
}
