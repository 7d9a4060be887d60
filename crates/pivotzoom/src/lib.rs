//! pivotzoom: pan and zoom gestures for images in the browser.
//!
//! Mouse, touch, pointer and wheel input on a DOM element is normalized into
//! one event stream and interpreted as drag, pinch, one-finger zoom,
//! double-tap zoom and wheel zoom. Every zoom keeps the image point under
//! the finger or cursor in place.
//!
//! # Browser Usage (WASM)
//!
//! ```javascript
//! import init, { PanZoom } from './pivotzoom.js';
//!
//! async function main() {
//!     await init();
//!     const zoom = new PanZoom('viewer', 1600, 1200, (json) => render(JSON.parse(json)));
//! }
//! ```
//!
//! # Rust Usage
//!
//! Implement [`browser::SurfaceView`] for your view and hand it to
//! `GestureController::create`. Everything platform independent is
//! re-exported from `pivotzoom-core`.

#![allow(
    clippy::missing_const_for_fn,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::use_self,
    clippy::new_without_default,
    clippy::needless_pass_by_value,
    clippy::float_cmp
)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub use pivotzoom_core::*;

pub mod browser;

#[cfg(target_arch = "wasm32")]
pub use browser::{
    init, GestureController, InputMode, InputSurface, PanZoom, PerformanceClock, SurfaceView,
};

pub use browser::SurfaceError;
