//! Wires a view's element to a gesture interpreter.

use super::error::SurfaceError;
use super::surface::InputSurface;
use super::timer::{PerformanceClock, Timeout};
use pivotzoom_core::{CanonicalEvent, GestureConfig, GestureInterpreter, View};
use std::cell::{Ref, RefCell};
use std::rc::{Rc, Weak};

/// A [`View`] rendered into a DOM element.
pub trait SurfaceView: View {
    /// Element that receives input.
    fn element(&self) -> web_sys::Element;
}

impl<V: SurfaceView + ?Sized> SurfaceView for Rc<RefCell<V>> {
    fn element(&self) -> web_sys::Element {
        self.borrow().element()
    }
}

type SharedInterpreter<V> = Rc<RefCell<GestureInterpreter<V, PerformanceClock>>>;

/// Pan and zoom gestures for one view.
///
/// Input on the view's element is normalized, interpreted and written back
/// to the view. The debounce window is backed by a single re-armed
/// `setTimeout`.
#[derive(Debug)]
pub struct GestureController<V: SurfaceView + 'static> {
    interpreter: SharedInterpreter<V>,
    timeout: Rc<RefCell<Timeout>>,
    surface: Option<InputSurface>,
}

impl<V: SurfaceView + 'static> GestureController<V> {
    /// Validate `config` and start listening on the view's element.
    pub fn create(view: V, config: GestureConfig) -> Result<Self, SurfaceError> {
        config.validate()?;
        let window = web_sys::window().ok_or(SurfaceError::NoWindow)?;
        let element = view.element();

        let interpreter = Rc::new(RefCell::new(GestureInterpreter::with_clock(
            view,
            PerformanceClock::new(),
            config,
        )));
        let timeout = Rc::new(RefCell::new(Timeout::new(window)));

        let weak_interpreter = Rc::downgrade(&interpreter);
        let weak_timeout = Rc::downgrade(&timeout);
        let surface = InputSurface::create(&element, move |event| {
            on_event(&weak_interpreter, &weak_timeout, event);
        })?;

        Ok(Self {
            interpreter,
            timeout,
            surface: Some(surface),
        })
    }

    /// The interpreter, for inspecting phase, flags and the view.
    pub fn interpreter(&self) -> Ref<'_, GestureInterpreter<V, PerformanceClock>> {
        self.interpreter.borrow()
    }

    /// Forget any gesture in progress.
    pub fn reset(&self) {
        if let Ok(mut interpreter) = self.interpreter.try_borrow_mut() {
            interpreter.reset();
        }
        if let Ok(mut timeout) = self.timeout.try_borrow_mut() {
            timeout.cancel();
        }
    }

    /// True once [`GestureController::destroy`] has run.
    pub fn is_destroyed(&self) -> bool {
        self.surface.is_none()
    }

    /// Detach listeners and clear the pending timeout. Idempotent.
    pub fn destroy(&mut self) {
        let Some(mut surface) = self.surface.take() else {
            return;
        };
        surface.destroy();
        if let Ok(mut timeout) = self.timeout.try_borrow_mut() {
            if timeout.is_pending() {
                timeout.cancel();
                tracing::debug!("pending debounce timeout cleared");
            }
        }
    }
}

impl<V: SurfaceView + 'static> Drop for GestureController<V> {
    fn drop(&mut self) {
        self.destroy();
    }
}

fn on_event<V: SurfaceView + 'static>(
    interpreter: &Weak<RefCell<GestureInterpreter<V, PerformanceClock>>>,
    timeout: &Weak<RefCell<Timeout>>,
    event: CanonicalEvent,
) {
    let (Some(interpreter), Some(timeout)) = (interpreter.upgrade(), timeout.upgrade()) else {
        return;
    };
    let (token, window_ms) = {
        let Ok(mut interp) = interpreter.try_borrow_mut() else {
            tracing::debug!(kind = %event.kind, "interpreter busy, event dropped");
            return;
        };
        interp.handle_event(event);
        (interp.debounce_token(), interp.debounce_window_ms())
    };
    let Some(token) = token else {
        return;
    };

    let target = Rc::downgrade(&interpreter);
    let scheduled = timeout.borrow_mut().schedule(window_ms.ceil() as i32, move || {
        if let Some(interpreter) = target.upgrade() {
            if let Ok(mut interp) = interpreter.try_borrow_mut() {
                interp.on_debounce_timeout(token);
            }
        }
    });
    if let Err(err) = scheduled {
        // Lazy expiry on the next event still applies.
        tracing::debug!(error = %err, "debounce timeout not scheduled");
    }
}
