#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::float_cmp)]
#![allow(clippy::suboptimal_flops)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Core types for pivotzoom: pan and zoom gestures for image views.
//!
//! This crate is platform independent:
//! - Geometry: [`Point`], [`Size`]
//! - Input normalization: [`InputNormalizer`] turns mouse, touch, pointer and
//!   wheel input into [`CanonicalEvent`]s
//! - Gesture interpretation: [`GestureInterpreter`] recognizes double tap,
//!   one-finger zoom, pinch, drag and wheel zoom and drives a [`View`]
//! - Zoom math: [`scale_about`] keeps the image point under the pivot fixed
//!
//! Browser bindings live in the `pivotzoom` crate.

mod config;
mod contacts;
mod debounce;
mod error;
mod event;
mod geometry;
pub mod gesture;
mod normalizer;
mod transform;
mod view;

pub use config::GestureConfig;
pub use contacts::{ContactPoint, ContactSummary, ContactTracker};
pub use debounce::{Clock, DebounceTimer, InstantClock, TimerToken};
pub use error::{ConfigError, ZoomError};
pub use event::{
    classify_event_type, CanonicalEvent, ContactAction, ContactId, EventKind, InputFamily,
    PointerKind, RawContact, RawEventClass, RawInput,
};
pub use geometry::{Point, Size};
pub use gesture::{
    GestureAnchor, GestureFlags, GestureHistory, GestureInterpreter, GesturePhase,
    RecognizedGesture,
};
pub use normalizer::{InputNormalizer, Tracking};
pub use transform::scale_about;
pub use view::{View, ViewState, ViewStateUpdate};
