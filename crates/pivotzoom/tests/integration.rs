//! Integration tests for the pivotzoom facade on the host.

#![cfg(not(target_arch = "wasm32"))]

use pivotzoom::{
    classify_event_type, ContactAction, GestureConfig, GesturePhase, InputFamily, SurfaceError,
};
use pivotzoom_test::{GestureHarness, RecordingView};
use proptest::prelude::*;

// =============================================================================
// Re-exports
// =============================================================================

#[test]
fn test_core_reexported() {
    let class = classify_event_type("pointerleave").unwrap();
    assert_eq!(class.family, InputFamily::Pointer);
    assert_eq!(class.action, Some(ContactAction::Leave));
    assert!(classify_event_type("click").is_none());
}

#[test]
fn test_config_error_converts() {
    let err = GestureConfig::from_json(r#"{"history_capacity": 0}"#).unwrap_err();
    let err = SurfaceError::from(err);
    assert!(err.to_string().contains("history_capacity"));
}

// =============================================================================
// Event listener parity
// =============================================================================

// The browser surface feeds every family through the same normalizer; the
// harness drives that path with the same raw input.
#[test]
fn test_mouse_and_pointer_drag_agree() {
    let mut mouse = GestureHarness::new();
    mouse.drag((0.0, 0.0), (30.0, -10.0), 3);

    let mut pen = GestureHarness::new();
    pen.pointer(ContactAction::Down, 4, pivotzoom::PointerKind::Pen, 0.0, 0.0)
        .pointer(ContactAction::Move, 4, pivotzoom::PointerKind::Pen, 30.0, -10.0)
        .pointer(ContactAction::Up, 4, pivotzoom::PointerKind::Pen, 30.0, -10.0);

    assert_eq!(mouse.state(), pen.state());
    pen.assert_phase(GesturePhase::Idle);
}

#[test]
fn test_touch_and_pointer_pinch_agree() {
    let mut touch = GestureHarness::with_parts(RecordingView::new(), GestureConfig::default());
    touch
        .touch_start(&[(0, 100.0, 100.0)])
        .touch_start(&[(1, 200.0, 100.0)])
        .touch_move(&[(1, 250.0, 100.0)]);

    let mut pointer = GestureHarness::new();
    let kind = pivotzoom::PointerKind::Touch;
    pointer
        .pointer(ContactAction::Down, 10, kind, 100.0, 100.0)
        .pointer(ContactAction::Down, 11, kind, 200.0, 100.0)
        .pointer(ContactAction::Move, 11, kind, 250.0, 100.0);

    touch.assert_scale(1.5);
    assert_eq!(touch.state(), pointer.state());
}

proptest! {
    #[test]
    fn prop_touch_and_pointer_families_agree(
        x in 0.0f64..800.0,
        y in 0.0f64..600.0,
        start in 20.0f64..300.0,
        end in 20.0f64..300.0,
    ) {
        let mut touch = GestureHarness::new();
        touch
            .touch_start(&[(0, x, y)])
            .touch_start(&[(1, x + start, y)])
            .touch_move(&[(1, x + end, y)]);

        let mut pointer = GestureHarness::new();
        let kind = pivotzoom::PointerKind::Touch;
        pointer
            .pointer(ContactAction::Down, 0, kind, x, y)
            .pointer(ContactAction::Down, 1, kind, x + start, y)
            .pointer(ContactAction::Move, 1, kind, x + end, y);

        prop_assert_eq!(touch.state(), pointer.state());
        prop_assert!(touch.state().scale > 0.0);
    }
}
