#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::float_cmp)]
#![allow(clippy::unwrap_used)]
//! Testing harness for pivotzoom gesture handling.
//!
//! - [`GestureHarness`]: script raw mouse, touch, pointer and wheel input and
//!   assert on the resulting view state
//! - [`RecordingView`]: a [`pivotzoom_core::View`] that logs every update
//! - [`ManualClock`]: deterministic time for debounce behavior
//!
//! # Example
//!
//! ```
//! use pivotzoom_test::GestureHarness;
//!
//! let mut harness = GestureHarness::new();
//! harness.drag((10.0, 10.0), (15.0, 18.0), 3);
//! harness.assert_position(5.0, 8.0);
//! ```

mod clock;
mod harness;
mod view;

pub use clock::ManualClock;
pub use harness::GestureHarness;
pub use view::RecordingView;

/// Install a test subscriber honoring `RUST_LOG` (default `warn`).
///
/// Safe to call from every test; only the first call installs.
pub fn init_test_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
