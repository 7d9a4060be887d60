//! Scripted input harness: raw input in, view state out.

use crate::clock::ManualClock;
use crate::view::RecordingView;
use pivotzoom_core::{
    CanonicalEvent, ContactAction, ContactId, GestureConfig, GestureFlags, GestureInterpreter,
    GesturePhase, InputNormalizer, Point, PointerKind, RawContact, RawInput, RecognizedGesture,
    Tracking, View, ViewState,
};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

type Sink = Box<dyn FnMut(CanonicalEvent)>;

/// Drives raw input through an [`InputNormalizer`] into a
/// [`GestureInterpreter`] over a [`RecordingView`], on a [`ManualClock`].
pub struct GestureHarness {
    normalizer: InputNormalizer<Sink>,
    event_queue: Rc<RefCell<VecDeque<CanonicalEvent>>>,
    interpreter: GestureInterpreter<RecordingView, ManualClock>,
    clock: ManualClock,
    surface_origin: Point,
    emitted: Vec<CanonicalEvent>,
    recognized: Vec<RecognizedGesture>,
    tracking: Tracking,
}

impl GestureHarness {
    /// Harness with the default config over an 800x600 image.
    pub fn new() -> Self {
        Self::with_parts(RecordingView::new(), GestureConfig::default())
    }

    /// Harness over a specific view and config.
    pub fn with_parts(view: RecordingView, config: GestureConfig) -> Self {
        let event_queue = Rc::new(RefCell::new(VecDeque::new()));
        let sink = Rc::clone(&event_queue);
        let on_event: Sink = Box::new(move |event: CanonicalEvent| sink.borrow_mut().push_back(event));
        let normalizer = InputNormalizer::new(on_event);
        let clock = ManualClock::new();
        Self {
            normalizer,
            event_queue,
            interpreter: GestureInterpreter::with_clock(view, clock.clone(), config),
            clock,
            surface_origin: Point::ORIGIN,
            emitted: Vec::new(),
            recognized: Vec::new(),
            tracking: Tracking::Unchanged,
        }
    }

    /// Place the surface's top-left corner in viewport coordinates.
    #[must_use]
    pub fn surface_origin(mut self, x: f64, y: f64) -> Self {
        self.surface_origin = Point::new(x, y);
        self
    }

    // === Time ===

    /// Let `ms` milliseconds pass without input.
    pub fn wait(&mut self, ms: f64) -> &mut Self {
        self.clock.advance(ms);
        self
    }

    /// Fire the host debounce timer for the latest arming, as a browser
    /// `setTimeout` would.
    pub fn fire_debounce(&mut self) -> bool {
        match self.interpreter.debounce_token() {
            Some(token) => self.interpreter.on_debounce_timeout(token),
            None => false,
        }
    }

    // === Raw input (viewport coordinates) ===

    /// Send any raw input.
    pub fn raw(&mut self, input: RawInput) -> &mut Self {
        self.tracking = self.normalizer.process(input, self.surface_origin);
        self.process_events();
        self
    }

    /// Primary mouse button down.
    pub fn mouse_down(&mut self, x: f64, y: f64) -> &mut Self {
        self.mouse(ContactAction::Down, x, y)
    }

    /// Mouse move.
    pub fn mouse_move(&mut self, x: f64, y: f64) -> &mut Self {
        self.mouse(ContactAction::Move, x, y)
    }

    /// Primary mouse button up.
    pub fn mouse_up(&mut self, x: f64, y: f64) -> &mut Self {
        self.mouse(ContactAction::Up, x, y)
    }

    /// Touches placed on the surface: `(identifier, x, y)`.
    pub fn touch_start(&mut self, touches: &[(i32, f64, f64)]) -> &mut Self {
        self.touch(ContactAction::Down, touches)
    }

    /// Touches moved.
    pub fn touch_move(&mut self, touches: &[(i32, f64, f64)]) -> &mut Self {
        self.touch(ContactAction::Move, touches)
    }

    /// Touches lifted.
    pub fn touch_end(&mut self, touches: &[(i32, f64, f64)]) -> &mut Self {
        self.touch(ContactAction::Up, touches)
    }

    /// Pointer event for a single pointer.
    pub fn pointer(
        &mut self,
        action: ContactAction,
        id: i32,
        kind: PointerKind,
        x: f64,
        y: f64,
    ) -> &mut Self {
        self.raw(RawInput::contact(
            action,
            RawContact::new(ContactId::new(id), Point::new(x, y), kind),
        ))
    }

    /// Wheel event at the cursor.
    pub fn wheel(&mut self, x: f64, y: f64, delta_y: f64) -> &mut Self {
        self.raw(RawInput::Wheel {
            client: Point::new(x, y),
            delta_y,
        })
    }

    // === Gestures ===

    /// One quick touch tap.
    pub fn tap(&mut self, x: f64, y: f64) -> &mut Self {
        self.touch_start(&[(0, x, y)]).touch_end(&[(0, x, y)])
    }

    /// Two quick touch taps at the same spot.
    pub fn double_tap(&mut self, x: f64, y: f64) -> &mut Self {
        self.tap(x, y).wait(50.0).tap(x, y)
    }

    /// Mouse drag from one point to another in `steps` moves.
    pub fn drag(&mut self, from: (f64, f64), to: (f64, f64), steps: u32) -> &mut Self {
        self.mouse_down(from.0, from.1);
        for (x, y) in interpolate(from, to, steps) {
            self.mouse_move(x, y);
        }
        self.mouse_up(to.0, to.1)
    }

    /// Tap, then press again and drag vertically by `dy` to zoom.
    pub fn one_finger_zoom(&mut self, x: f64, y: f64, dy: f64, steps: u32) -> &mut Self {
        self.tap(x, y).wait(50.0).touch_start(&[(0, x, y)]);
        for (mx, my) in interpolate((x, y), (x, y + dy), steps) {
            self.touch_move(&[(0, mx, my)]);
        }
        self.touch_end(&[(0, x, y + dy)])
    }

    /// Two-finger horizontal pinch around `center`, from one finger spread
    /// to another, lifting both fingers at the end.
    pub fn pinch(&mut self, center: (f64, f64), from: f64, to: f64, steps: u32) -> &mut Self {
        let (cx, cy) = center;
        self.touch_start(&[(0, cx - from / 2.0, cy)])
            .touch_start(&[(1, cx + from / 2.0, cy)]);
        for (spread, _) in interpolate((from, 0.0), (to, 0.0), steps) {
            self.touch_move(&[(0, cx - spread / 2.0, cy), (1, cx + spread / 2.0, cy)]);
        }
        self.touch_end(&[(1, cx + to / 2.0, cy)])
            .touch_end(&[(0, cx - to / 2.0, cy)])
    }

    // === Queries ===

    /// Current view state.
    pub fn state(&self) -> ViewState {
        self.interpreter.view().state()
    }

    /// Current gesture phase.
    pub fn phase(&self) -> GesturePhase {
        self.interpreter.phase()
    }

    /// Active gesture flags.
    pub fn flags(&self) -> GestureFlags {
        self.interpreter.flags()
    }

    /// Every canonical event emitted so far.
    pub fn emitted(&self) -> &[CanonicalEvent] {
        &self.emitted
    }

    /// Every gesture dispatched so far.
    pub fn recognized(&self) -> &[RecognizedGesture] {
        &self.recognized
    }

    /// Tracking change caused by the last raw input.
    pub fn last_tracking(&self) -> Tracking {
        self.tracking
    }

    /// The interpreter under test.
    pub fn interpreter(&self) -> &GestureInterpreter<RecordingView, ManualClock> {
        &self.interpreter
    }

    /// The recording view.
    pub fn view(&self) -> &RecordingView {
        self.interpreter.view()
    }

    /// Image point under a surface point.
    pub fn image_point_at(&self, x: f64, y: f64) -> Point {
        self.state().surface_to_image(Point::new(x, y))
    }

    // === Assertions ===

    /// Assert the current scale.
    ///
    /// # Panics
    ///
    /// Panics if the scale differs by more than 1e-9.
    pub fn assert_scale(&self, expected: f64) -> &Self {
        let actual = self.state().scale;
        assert!(
            (actual - expected).abs() < 1e-9,
            "Expected scale {expected} but got {actual}"
        );
        self
    }

    /// Assert the current position.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate differs by more than 1e-9.
    pub fn assert_position(&self, x: f64, y: f64) -> &Self {
        let actual = self.state().position();
        assert!(
            (actual.x - x).abs() < 1e-9 && (actual.y - y).abs() < 1e-9,
            "Expected position ({x}, {y}) but got ({}, {})",
            actual.x,
            actual.y
        );
        self
    }

    /// Assert the current phase.
    ///
    /// # Panics
    ///
    /// Panics if the phase differs.
    pub fn assert_phase(&self, expected: GesturePhase) -> &Self {
        let actual = self.phase();
        assert_eq!(actual, expected, "Expected phase {expected:?} but got {actual:?}");
        self
    }

    /// Assert that the surface point `(x, y)` still shows `image_point`.
    ///
    /// # Panics
    ///
    /// Panics if the image point moved by more than 1e-6.
    pub fn assert_pinned(&self, x: f64, y: f64, image_point: Point) -> &Self {
        let actual = self.image_point_at(x, y);
        assert!(
            (actual.x - image_point.x).abs() < 1e-6 && (actual.y - image_point.y).abs() < 1e-6,
            "Expected ({x}, {y}) to show image point ({}, {}) but it shows ({}, {})",
            image_point.x,
            image_point.y,
            actual.x,
            actual.y
        );
        self
    }

    // === Internal ===

    fn mouse(&mut self, action: ContactAction, x: f64, y: f64) -> &mut Self {
        self.raw(RawInput::contact(action, RawContact::mouse(Point::new(x, y))))
    }

    fn touch(&mut self, action: ContactAction, touches: &[(i32, f64, f64)]) -> &mut Self {
        let contacts = touches
            .iter()
            .map(|&(id, x, y)| {
                RawContact::new(ContactId::new(id), Point::new(x, y), PointerKind::Touch)
            })
            .collect();
        self.raw(RawInput::Contact { action, contacts })
    }

    fn process_events(&mut self) {
        loop {
            let Some(event) = self.event_queue.borrow_mut().pop_front() else {
                break;
            };
            self.emitted.push(event);
            if let Some(gesture) = self.interpreter.handle_event(event) {
                self.recognized.push(gesture);
            }
        }
    }
}

impl Default for GestureHarness {
    fn default() -> Self {
        Self::new()
    }
}

fn interpolate(from: (f64, f64), to: (f64, f64), steps: u32) -> impl Iterator<Item = (f64, f64)> {
    let steps = steps.max(1);
    (1..=steps).map(move |i| {
        let t = f64::from(i) / f64::from(steps);
        (from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pivotzoom_core::EventKind;

    #[test]
    fn test_drag_moves_view() {
        let mut h = GestureHarness::new();
        h.drag((10.0, 10.0), (15.0, 18.0), 4);
        h.assert_position(5.0, 8.0).assert_phase(GesturePhase::Idle);
        assert!(h.recognized().contains(&RecognizedGesture::Drag));
    }

    #[test]
    fn test_surface_origin_applied() {
        let mut h = GestureHarness::new().surface_origin(100.0, 50.0);
        h.mouse_down(110.0, 60.0);
        assert_eq!(h.emitted()[0].target_point, Point::new(10.0, 10.0));
        assert_eq!(h.last_tracking(), Tracking::Began);
    }

    #[test]
    fn test_double_tap_scales_up() {
        let mut h = GestureHarness::new();
        h.double_tap(200.0, 100.0);
        h.assert_scale(1.2);
        assert_eq!(h.recognized(), &[RecognizedGesture::DoubleTap]);
    }

    #[test]
    fn test_pinch_emits_pair_distance() {
        let mut h = GestureHarness::new();
        h.pinch((300.0, 300.0), 100.0, 200.0, 2);
        let starts: Vec<f64> = h
            .emitted()
            .iter()
            .filter(|e| e.kind == EventKind::Start)
            .map(|e| e.distance)
            .collect();
        assert_eq!(starts, vec![1.0, 100.0]);
        h.assert_scale(2.0);
    }

    #[test]
    fn test_fire_debounce_without_events() {
        let mut h = GestureHarness::new();
        assert!(!h.fire_debounce());
        h.tap(1.0, 1.0);
        assert!(h.fire_debounce());
        h.assert_phase(GesturePhase::Idle);
    }

    #[test]
    fn test_interpolate_reaches_target() {
        let points: Vec<_> = interpolate((0.0, 0.0), (10.0, 20.0), 4).collect();
        assert_eq!(points.len(), 4);
        assert_eq!(points[3], (10.0, 20.0));
        assert_eq!(interpolate((0.0, 0.0), (1.0, 1.0), 0).count(), 1);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_drag_pans_by_total_delta(
                x in 0.0f64..400.0,
                y in 0.0f64..300.0,
                dx in -200.0f64..200.0,
                dy in -200.0f64..200.0,
                steps in 1u32..8,
            ) {
                let mut h = GestureHarness::new();
                h.drag((x, y), (x + dx, y + dy), steps);
                let position = h.state().position();
                prop_assert!((position.x - dx).abs() < 1e-6);
                prop_assert!((position.y - dy).abs() < 1e-6);
                prop_assert_eq!(h.phase(), GesturePhase::Idle);
            }
        }
    }
}
