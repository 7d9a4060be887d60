//! DOM listener attachment for an input surface.
//!
//! One closure handles every event type; listeners are registrations of that
//! closure on the element (and, for held mouse buttons, on the document
//! element). Destroying the surface removes every registration before the
//! closure is dropped.

use super::error::SurfaceError;
use super::events::raw_input;
use pivotzoom_core::{
    classify_event_type, CanonicalEvent, ContactAction, InputFamily, InputNormalizer, Point,
    Tracking,
};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, PointerEvent};

type EventSink = Box<dyn FnMut(CanonicalEvent)>;

const POINTER_EVENTS: &[&str] = &[
    "pointerdown",
    "pointermove",
    "pointerup",
    "pointercancel",
    "pointerleave",
    "touchstart",
    "touchmove",
    "touchend",
    "touchcancel",
    "wheel",
];

const MOUSE_AND_TOUCH_EVENTS: &[&str] = &[
    "mousedown",
    "touchstart",
    "touchmove",
    "touchend",
    "touchcancel",
    "wheel",
];

const DOCUMENT_MOUSE_EVENTS: &[&str] = &["mousemove", "mouseup"];

/// Which event families a surface listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Pointer events; native touch events are swallowed.
    Pointer,
    /// Mouse and touch events, for browsers without pointer events.
    MouseAndTouch,
}

impl InputMode {
    /// Pick the mode the current browser supports.
    pub fn detect() -> Self {
        let supported = web_sys::window()
            .and_then(|window| js_sys::Reflect::has(&window, &JsValue::from_str("PointerEvent")).ok())
            .unwrap_or(false);
        if supported {
            Self::Pointer
        } else {
            Self::MouseAndTouch
        }
    }

    fn element_events(self) -> &'static [&'static str] {
        match self {
            Self::Pointer => POINTER_EVENTS,
            Self::MouseAndTouch => MOUSE_AND_TOUCH_EVENTS,
        }
    }
}

struct Registration {
    target: EventTarget,
    event_type: &'static str,
}

struct Shared {
    element: Element,
    mode: InputMode,
    function: js_sys::Function,
    normalizer: RefCell<InputNormalizer<EventSink>>,
    registrations: RefCell<Vec<Registration>>,
    document_registrations: RefCell<Vec<Registration>>,
    destroyed: Cell<bool>,
}

impl Shared {
    fn listen(&self, target: &EventTarget, event_type: &'static str) -> Result<Registration, SurfaceError> {
        target
            .add_event_listener_with_callback(event_type, &self.function)
            .map_err(|err| SurfaceError::listener(event_type, &err))?;
        Ok(Registration {
            target: target.clone(),
            event_type,
        })
    }

    fn unlisten(&self, registration: &Registration) {
        if let Err(err) = registration
            .target
            .remove_event_listener_with_callback(registration.event_type, &self.function)
        {
            tracing::debug!(
                event_type = registration.event_type,
                error = %super::error::js_message(&err),
                "listener removal failed"
            );
        }
    }

    fn dispatch(&self, event: &Event) {
        if self.destroyed.get() {
            return;
        }
        let Some(class) = classify_event_type(&event.type_()) else {
            return;
        };
        event.prevent_default();
        if class.family == InputFamily::Touch && self.mode == InputMode::Pointer {
            return;
        }
        let Some(input) = raw_input(event, class) else {
            tracing::trace!(event_type = %event.type_(), "unexpected event interface");
            return;
        };
        if class.family == InputFamily::Pointer && class.action == Some(ContactAction::Down) {
            self.capture_pointer(event);
        }

        let origin = self.surface_origin();
        let tracking = match self.normalizer.try_borrow_mut() {
            Ok(mut normalizer) => normalizer.process(input, origin),
            Err(_) => {
                tracing::debug!(event_type = %event.type_(), "re-entrant input event dropped");
                return;
            }
        };

        if class.family == InputFamily::Mouse {
            match tracking {
                Tracking::Began => self.track_document(),
                Tracking::Ended => self.untrack_document(),
                Tracking::Unchanged => {}
            }
        }
    }

    fn surface_origin(&self) -> Point {
        let rect = self.element.get_bounding_client_rect();
        Point::new(rect.left(), rect.top())
    }

    fn capture_pointer(&self, event: &Event) {
        let Some(pointer) = event.dyn_ref::<PointerEvent>() else {
            return;
        };
        if let Err(err) = self.element.set_pointer_capture(pointer.pointer_id()) {
            tracing::debug!(
                pointer_id = pointer.pointer_id(),
                error = %super::error::js_message(&err),
                "pointer capture failed"
            );
        }
    }

    fn track_document(&self) {
        let mut registrations = self.document_registrations.borrow_mut();
        if !registrations.is_empty() {
            return;
        }
        let Some(document) = self.element.owner_document().and_then(|d| d.document_element()) else {
            return;
        };
        for &event_type in DOCUMENT_MOUSE_EVENTS {
            match self.listen(&document, event_type) {
                Ok(registration) => registrations.push(registration),
                Err(err) => tracing::debug!(error = %err, "document mouse tracking unavailable"),
            }
        }
        tracing::debug!("document mouse tracking attached");
    }

    fn untrack_document(&self) {
        let registrations: Vec<_> = self.document_registrations.borrow_mut().drain(..).collect();
        for registration in &registrations {
            self.unlisten(registration);
        }
        if !registrations.is_empty() {
            tracing::debug!("document mouse tracking detached");
        }
    }
}

/// DOM element wired to an [`InputNormalizer`].
///
/// Listeners stay attached until [`InputSurface::destroy`] is called or the
/// surface is dropped.
pub struct InputSurface {
    shared: Rc<Shared>,
    handler: Option<Closure<dyn FnMut(Event)>>,
}

impl InputSurface {
    /// Attach listeners to `element`, picking pointer events when the
    /// browser has them.
    ///
    /// `on_event` receives every canonical event synchronously. It must not
    /// destroy this surface.
    pub fn create(
        element: &Element,
        on_event: impl FnMut(CanonicalEvent) + 'static,
    ) -> Result<Self, SurfaceError> {
        Self::create_with_mode(element, InputMode::detect(), on_event)
    }

    /// Attach listeners for a specific input mode.
    pub fn create_with_mode(
        element: &Element,
        mode: InputMode,
        on_event: impl FnMut(CanonicalEvent) + 'static,
    ) -> Result<Self, SurfaceError> {
        let mut handler = None;
        let shared = Rc::new_cyclic(|weak: &Weak<Shared>| {
            let weak = weak.clone();
            let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                if let Some(shared) = weak.upgrade() {
                    shared.dispatch(&event);
                }
            });
            let function = closure.as_ref().unchecked_ref::<js_sys::Function>().clone();
            handler = Some(closure);
            let sink: EventSink = Box::new(on_event);
            Shared {
                element: element.clone(),
                mode,
                function,
                normalizer: RefCell::new(InputNormalizer::new(sink)),
                registrations: RefCell::new(Vec::new()),
                document_registrations: RefCell::new(Vec::new()),
                destroyed: Cell::new(false),
            }
        });

        // Built first so a failed attach below is cleaned up by Drop.
        let surface = Self { shared, handler };
        let target: &EventTarget = element.as_ref();
        for &event_type in mode.element_events() {
            let registration = surface.shared.listen(target, event_type)?;
            surface.shared.registrations.borrow_mut().push(registration);
        }
        tracing::debug!(?mode, listeners = mode.element_events().len(), "input surface attached");
        Ok(surface)
    }

    /// Event families this surface listens to.
    pub fn mode(&self) -> InputMode {
        self.shared.mode
    }

    /// The element receiving input.
    pub fn element(&self) -> &Element {
        &self.shared.element
    }

    /// Number of active listener registrations.
    pub fn listener_count(&self) -> usize {
        self.shared.registrations.borrow().len() + self.shared.document_registrations.borrow().len()
    }

    /// True once [`InputSurface::destroy`] has run.
    pub fn is_destroyed(&self) -> bool {
        self.shared.destroyed.get()
    }

    /// Detach every listener and forget tracked contacts. Idempotent.
    pub fn destroy(&mut self) {
        if self.shared.destroyed.replace(true) {
            return;
        }
        self.shared.untrack_document();
        let registrations: Vec<_> = self.shared.registrations.borrow_mut().drain(..).collect();
        for registration in &registrations {
            self.shared.unlisten(registration);
        }
        if let Ok(mut normalizer) = self.shared.normalizer.try_borrow_mut() {
            normalizer.reset();
        }
        self.handler = None;
        tracing::debug!(listeners = registrations.len(), "input surface destroyed");
    }
}

impl std::fmt::Debug for InputSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputSurface")
            .field("mode", &self.shared.mode)
            .field("listeners", &self.listener_count())
            .field("destroyed", &self.is_destroyed())
            .finish()
    }
}

impl Drop for InputSurface {
    fn drop(&mut self) {
        self.destroy();
    }
}
