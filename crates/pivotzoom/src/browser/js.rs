//! JavaScript entry point.
//!
//! ```javascript
//! import init, { PanZoom } from './pivotzoom.js';
//!
//! await init();
//! const zoom = new PanZoom('viewer', 1600, 1200, (json) => {
//!     const s = JSON.parse(json);
//!     img.style.transform = `translate(${s.positionX}px, ${s.positionY}px)`;
//!     img.style.width = `${1600 * s.scale}px`;
//! });
//! ```

use super::controller::{GestureController, SurfaceView};
use super::error::SurfaceError;
use pivotzoom_core::{GestureConfig, Size, View, ViewState, ViewStateUpdate};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::Element;

/// View whose state lives in Rust and is reported to a JS callback.
struct JsView {
    element: Element,
    state: ViewState,
    image_size: Size,
    on_change: js_sys::Function,
}

impl std::fmt::Debug for JsView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsView")
            .field("state", &self.state)
            .field("image_size", &self.image_size)
            .finish_non_exhaustive()
    }
}

impl View for JsView {
    fn state(&self) -> ViewState {
        self.state
    }

    fn set_state(&mut self, update: ViewStateUpdate) {
        self.state.apply(&update);
        let json = serde_json::to_string(&self.state).unwrap_or_default();
        if let Err(err) = self.on_change.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
            tracing::debug!(error = %super::error::js_message(&err), "view callback threw");
        }
    }

    fn image_size(&self) -> Size {
        self.image_size
    }
}

impl SurfaceView for JsView {
    fn element(&self) -> Element {
        self.element.clone()
    }
}

/// Pan and zoom gestures on a DOM element, reporting view state as JSON.
///
/// The callback receives the full state (`positionX`, `positionY`, `scale`,
/// `pivotPointX`, `pivotPointY`) after every change. It must not call back
/// into this object.
#[wasm_bindgen]
#[derive(Debug)]
pub struct PanZoom {
    view: Rc<RefCell<JsView>>,
    controller: GestureController<Rc<RefCell<JsView>>>,
}

#[wasm_bindgen]
impl PanZoom {
    /// Attach to the element with id `element_id`.
    ///
    /// `config_json` optionally overrides gesture constants, e.g.
    /// `{"double_tap_step": 0.5}`.
    #[wasm_bindgen(constructor)]
    pub fn new(
        element_id: &str,
        image_width: f64,
        image_height: f64,
        on_change: js_sys::Function,
        config_json: Option<String>,
    ) -> Result<PanZoom, JsValue> {
        console_error_panic_hook::set_once();

        let document = web_sys::window()
            .ok_or(SurfaceError::NoWindow)?
            .document()
            .ok_or(SurfaceError::NoDocument)?;
        let element = document
            .get_element_by_id(element_id)
            .ok_or_else(|| SurfaceError::ElementNotFound(element_id.to_string()))?;
        let config = match config_json {
            Some(json) => GestureConfig::from_json(&json).map_err(SurfaceError::from)?,
            None => GestureConfig::default(),
        };

        let view = Rc::new(RefCell::new(JsView {
            element,
            state: ViewState::default(),
            image_size: Size::new(image_width, image_height),
            on_change,
        }));
        let controller = GestureController::create(Rc::clone(&view), config)?;
        Ok(Self { view, controller })
    }

    /// Current view state as JSON.
    pub fn state_json(&self) -> Result<String, JsValue> {
        let view = self
            .view
            .try_borrow()
            .map_err(|_| JsValue::from_str("view is being updated"))?;
        serde_json::to_string(&view.state).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Merge a partial state (same field names as the callback JSON).
    pub fn set_state_json(&self, json: &str) -> Result<(), JsValue> {
        let update: ViewStateUpdate =
            serde_json::from_str(json).map_err(|e| JsValue::from_str(&format!("JSON parse error: {e}")))?;
        self.controller.reset();
        let mut view = self
            .view
            .try_borrow_mut()
            .map_err(|_| JsValue::from_str("view is being updated"))?;
        view.set_state(update);
        Ok(())
    }

    /// Update the unscaled image size.
    pub fn set_image_size(&self, width: f64, height: f64) {
        if let Ok(mut view) = self.view.try_borrow_mut() {
            view.image_size = Size::new(width, height);
        }
    }

    /// Detach every listener. Idempotent.
    pub fn destroy(&mut self) {
        self.controller.destroy();
    }
}

/// Initialize panic hook for better error messages.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}
