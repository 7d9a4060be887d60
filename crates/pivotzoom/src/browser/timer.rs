//! Browser time: `performance.now()` clock and a re-armable `setTimeout`.

use super::error::SurfaceError;
use pivotzoom_core::Clock;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Performance, Window};

/// [`Clock`] backed by `performance.now()`, falling back to `Date.now()`.
#[derive(Debug, Clone)]
pub struct PerformanceClock {
    performance: Option<Performance>,
}

impl PerformanceClock {
    /// Clock for the current window.
    pub fn new() -> Self {
        Self {
            performance: web_sys::window().and_then(|w| w.performance()),
        }
    }
}

impl Default for PerformanceClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for PerformanceClock {
    fn now_ms(&self) -> f64 {
        self.performance
            .as_ref()
            .map_or_else(js_sys::Date::now, Performance::now)
    }
}

/// At most one pending `setTimeout`. Scheduling clears the previous one.
pub struct Timeout {
    window: Window,
    pending: Option<(i32, Closure<dyn FnMut()>)>,
}

impl Timeout {
    /// Timeout slot on `window`.
    pub fn new(window: Window) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Run `callback` after `delay_ms`, replacing any pending callback.
    pub fn schedule(
        &mut self,
        delay_ms: i32,
        callback: impl FnMut() + 'static,
    ) -> Result<(), SurfaceError> {
        self.cancel();
        let closure = Closure::<dyn FnMut()>::new(callback);
        let handle = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                delay_ms,
            )
            .map_err(|err| SurfaceError::timer(&err))?;
        self.pending = Some((handle, closure));
        Ok(())
    }

    /// Clear the pending callback, if any.
    pub fn cancel(&mut self) {
        if let Some((handle, _closure)) = self.pending.take() {
            self.window.clear_timeout_with_handle(handle);
        }
    }

    /// True while a callback is scheduled (or has fired and not been replaced).
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl std::fmt::Debug for Timeout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Timeout")
            .field("handle", &self.pending.as_ref().map(|(handle, _)| *handle))
            .finish()
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        self.cancel();
    }
}
