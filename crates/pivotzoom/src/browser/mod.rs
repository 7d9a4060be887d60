//! Browser binding for pivotzoom gestures.
//!
//! Attaches DOM listeners to an element, feeds them through the core
//! normalizer and interpreter, and writes view state back.

// WASM-only modules
#[cfg(target_arch = "wasm32")]
pub mod controller;
#[cfg(target_arch = "wasm32")]
pub mod events;
#[cfg(target_arch = "wasm32")]
pub mod js;
#[cfg(target_arch = "wasm32")]
pub mod surface;
#[cfg(target_arch = "wasm32")]
pub mod timer;

// Cross-platform modules
pub mod error;

#[cfg(target_arch = "wasm32")]
pub use controller::{GestureController, SurfaceView};
#[cfg(target_arch = "wasm32")]
pub use js::{init, PanZoom};
#[cfg(target_arch = "wasm32")]
pub use surface::{InputMode, InputSurface};
#[cfg(target_arch = "wasm32")]
pub use timer::{PerformanceClock, Timeout};
pub use error::SurfaceError;
