//! Pivot-preserving scale transform shared by every zoom gesture.

use crate::error::ZoomError;
use crate::geometry::{Point, Size};
use crate::view::ViewState;

/// Rescale `state` to `new_scale` keeping the image point under `pivot` fixed.
///
/// `state` must be the state immediately preceding this step; chaining
/// steps from a stale state breaks the invariant.
pub fn scale_about(
    state: &ViewState,
    image_size: Size,
    pivot: Point,
    new_scale: f64,
) -> Result<ViewState, ZoomError> {
    if !new_scale.is_finite() || new_scale <= 0.0 {
        return Err(ZoomError::NonFinite(new_scale));
    }

    // Pivot position on the image at the current scale.
    let origin = pivot - state.position();

    let current = image_size.scale(state.scale);
    if current.is_degenerate() {
        return Err(ZoomError::DegenerateExtent {
            width: current.width,
            height: current.height,
        });
    }

    // Relative position of the pivot on the scaled image.
    let mx = origin.x / current.width;
    let my = origin.y / current.height;

    let next = image_size.scale(new_scale);

    let position_x = state.position_x + origin.x - next.width * mx;
    let position_y = state.position_y + origin.y - next.height * my;
    if !(position_x.is_finite() && position_y.is_finite()) {
        return Err(ZoomError::NonFinite(new_scale));
    }

    Ok(ViewState {
        position_x,
        position_y,
        scale: new_scale,
        pivot_point_x: pivot.x,
        pivot_point_y: pivot.y,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const IMAGE: Size = Size::new(800.0, 600.0);

    #[test]
    fn test_zoom_about_origin_keeps_position() {
        let state = ViewState::default();
        let next = scale_about(&state, IMAGE, Point::ORIGIN, 2.0).unwrap();
        assert_eq!(next.position(), Point::ORIGIN);
        assert_eq!(next.scale, 2.0);
    }

    #[test]
    fn test_zoom_about_center() {
        let state = ViewState::default();
        let next = scale_about(&state, IMAGE, Point::new(400.0, 300.0), 2.0).unwrap();
        assert!((next.position_x + 400.0).abs() < 1e-9);
        assert!((next.position_y + 300.0).abs() < 1e-9);
        assert_eq!(next.pivot(), Point::new(400.0, 300.0));
    }

    #[test]
    fn test_same_scale_is_identity() {
        let state = ViewState::new(Point::new(-12.0, 40.0), 1.7);
        let next = scale_about(&state, IMAGE, Point::new(100.0, 90.0), 1.7).unwrap();
        assert!((next.position_x - state.position_x).abs() < 1e-9);
        assert!((next.position_y - state.position_y).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_image_rejected() {
        let state = ViewState::default();
        let err = scale_about(&state, Size::ZERO, Point::ORIGIN, 2.0).unwrap_err();
        assert!(matches!(err, ZoomError::DegenerateExtent { .. }));
    }

    #[test]
    fn test_non_finite_scale_rejected() {
        let state = ViewState::default();
        assert!(matches!(
            scale_about(&state, IMAGE, Point::ORIGIN, f64::INFINITY),
            Err(ZoomError::NonFinite(_))
        ));
        assert!(scale_about(&state, IMAGE, Point::ORIGIN, 0.0).is_err());
        assert!(scale_about(&state, IMAGE, Point::ORIGIN, -1.0).is_err());
    }

    #[test]
    fn test_chained_zooms_keep_pivot() {
        let pivot = Point::new(123.0, 77.0);
        let mut state = ViewState::new(Point::new(15.0, -30.0), 1.0);
        let before = state.surface_to_image(pivot);
        for scale in [1.2, 1.9, 0.6, 3.3] {
            state = scale_about(&state, IMAGE, pivot, scale).unwrap();
        }
        let after = state.surface_to_image(pivot);
        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_pivot_invariance(
            px in -2000.0f64..2000.0,
            py in -2000.0f64..2000.0,
            pos_x in -2000.0f64..2000.0,
            pos_y in -2000.0f64..2000.0,
            scale in 0.05f64..20.0,
            new_scale in 0.05f64..20.0,
            width in 1.0f64..4000.0,
            height in 1.0f64..4000.0,
        ) {
            let state = ViewState::new(Point::new(pos_x, pos_y), scale);
            let pivot = Point::new(px, py);
            let next = scale_about(&state, Size::new(width, height), pivot, new_scale).unwrap();

            let before = state.surface_to_image(pivot);
            let after = next.surface_to_image(pivot);
            let tolerance = 1e-6 * (1.0 + before.x.abs().max(before.y.abs()));
            prop_assert!((before.x - after.x).abs() < tolerance);
            prop_assert!((before.y - after.y).abs() < tolerance);
            prop_assert_eq!(next.scale, new_scale);
            prop_assert_eq!(next.pivot(), pivot);
        }
    }
}
