//! Gesture interpretation over the canonical event stream.
//!
//! [`GestureInterpreter`] classifies canonical events into double-tap zoom,
//! one-finger zoom, pinch zoom, drag and wheel zoom, and pushes the resulting
//! view state to its [`View`]. Classification is a small state machine
//! ([`GesturePhase`]); the tap-pattern phases are reset when the debounce
//! window elapses without new input.

use crate::config::GestureConfig;
use crate::debounce::{Clock, DebounceTimer, InstantClock, TimerToken};
use crate::error::ZoomError;
use crate::event::{CanonicalEvent, EventKind};
use crate::geometry::Point;
use crate::transform::scale_about;
use crate::view::{View, ViewState, ViewStateUpdate};
use std::collections::VecDeque;
use std::fmt;

/// Where the interpreter is in recognizing a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GesturePhase {
    /// Nothing in progress.
    #[default]
    Idle,
    /// A contact is down and has not moved.
    Pressed,
    /// One tap completed inside the debounce window.
    AwaitingSecondTap,
    /// A contact went down right after a tap.
    SecondPress,
    /// Single-contact pan.
    Dragging,
    /// Tap-then-drag vertical zoom.
    OneFingerZooming,
    /// Two-contact pinch.
    Pinching,
}

impl GesturePhase {
    /// Phases that only exist while the tap history is alive.
    #[must_use]
    pub const fn is_tap_pattern(self) -> bool {
        matches!(self, Self::Pressed | Self::AwaitingSecondTap | Self::SecondPress)
    }

    /// Continuous-gesture markers for this phase.
    #[must_use]
    pub const fn flags(self) -> GestureFlags {
        GestureFlags {
            one_finger_zoom: matches!(self, Self::OneFingerZooming),
            multitouch_zoom: matches!(self, Self::Pinching),
            drag: matches!(self, Self::Dragging),
        }
    }
}

/// Which continuous gesture is active. At most one field is ever set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GestureFlags {
    /// One-finger zoom active
    pub one_finger_zoom: bool,
    /// Pinch zoom active
    pub multitouch_zoom: bool,
    /// Drag active
    pub drag: bool,
}

impl GestureFlags {
    /// Number of set flags (0 or 1).
    #[must_use]
    pub fn active_count(&self) -> usize {
        [self.one_finger_zoom, self.multitouch_zoom, self.drag]
            .into_iter()
            .filter(|f| *f)
            .count()
    }

    /// True when no continuous gesture is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }
}

/// Reference snapshot for relative gesture math.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureAnchor {
    /// View state when the anchor was taken.
    pub init_state: ViewState,
    /// Event that took the anchor.
    pub init_event: CanonicalEvent,
}

/// Bounded record of recent event kinds.
#[derive(Debug, Clone)]
pub struct GestureHistory {
    kinds: VecDeque<EventKind>,
    capacity: usize,
}

impl GestureHistory {
    /// Create an empty history holding at most `capacity` kinds.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            kinds: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a kind, dropping the oldest one when full.
    pub fn push(&mut self, kind: EventKind) {
        if self.kinds.len() == self.capacity {
            self.kinds.pop_front();
        }
        self.kinds.push_back(kind);
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.kinds.clear();
    }

    /// Number of recorded kinds.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// True when nothing is recorded.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Recorded kinds, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = EventKind> + '_ {
        self.kinds.iter().copied()
    }
}

impl fmt::Display for GestureHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, kind) in self.kinds.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(kind.as_str())?;
        }
        Ok(())
    }
}

/// Gesture an event was dispatched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecognizedGesture {
    /// Two quick taps: fixed-step zoom at the tap.
    DoubleTap,
    /// Pan.
    Drag,
    /// Tap-then-drag zoom.
    OneFingerZoom,
    /// Two-contact zoom.
    Pinch,
    /// Wheel zoom at the cursor.
    Wheel,
}

/// Interprets canonical events as gestures and drives a [`View`].
#[derive(Debug)]
pub struct GestureInterpreter<V: View, C: Clock = InstantClock> {
    view: V,
    clock: C,
    config: GestureConfig,
    phase: GesturePhase,
    history: GestureHistory,
    anchor: Option<GestureAnchor>,
    timer: DebounceTimer,
    token: Option<TimerToken>,
}

impl<V: View> GestureInterpreter<V> {
    /// Create an interpreter with the default config and a wall clock.
    pub fn new(view: V) -> Self {
        Self::with_clock(view, InstantClock::new(), GestureConfig::default())
    }
}

impl<V: View, C: Clock> GestureInterpreter<V, C> {
    /// Create an interpreter with an explicit clock and config.
    pub fn with_clock(view: V, clock: C, config: GestureConfig) -> Self {
        Self {
            view,
            clock,
            history: GestureHistory::new(config.history_capacity),
            timer: DebounceTimer::new(config.double_tap_window_ms),
            config,
            phase: GesturePhase::Idle,
            anchor: None,
            token: None,
        }
    }

    /// The driven view.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Mutable access to the driven view.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Give the view back.
    pub fn into_view(self) -> V {
        self.view
    }

    /// Active configuration.
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Current recognition phase.
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// Active continuous-gesture flags.
    pub fn flags(&self) -> GestureFlags {
        self.phase.flags()
    }

    /// Recent event kinds.
    pub fn history(&self) -> &GestureHistory {
        &self.history
    }

    /// Current anchor, if any non-move event has been seen.
    pub fn anchor(&self) -> Option<&GestureAnchor> {
        self.anchor.as_ref()
    }

    /// Token of the most recent debounce arming.
    ///
    /// Hosts with a real timer schedule [`Self::on_debounce_timeout`] with
    /// this token after every event, cancelling the previous schedule.
    pub fn debounce_token(&self) -> Option<TimerToken> {
        self.token
    }

    /// Debounce window in milliseconds.
    pub fn debounce_window_ms(&self) -> f64 {
        self.timer.window_ms()
    }

    /// Host timer callback. Stale tokens are ignored; returns true when the
    /// history was cleared.
    pub fn on_debounce_timeout(&mut self, token: TimerToken) -> bool {
        if self.timer.fire(token) {
            self.expire_history();
            true
        } else {
            false
        }
    }

    /// Forget history, flags and anchor.
    pub fn reset(&mut self) {
        self.history.clear();
        self.timer.cancel();
        self.token = None;
        self.anchor = None;
        self.set_phase(GesturePhase::Idle);
    }

    /// Interpret one canonical event.
    ///
    /// Returns the gesture the event was dispatched to, if any. A zoom step
    /// that cannot be computed is skipped and logged.
    pub fn handle_event(&mut self, event: CanonicalEvent) -> Option<RecognizedGesture> {
        let now = self.clock.now_ms();
        if self.timer.expire(now) {
            self.expire_history();
        }
        self.history.push(event.kind);
        self.token = Some(self.timer.arm(now));

        tracing::trace!(kind = %event.kind, history = %self.history, phase = ?self.phase, "gesture event");

        if event.kind == EventKind::Move {
            self.rebase_after_release(&event);
        }

        let mut recognized = None;
        if event.kind == EventKind::End && self.phase == GesturePhase::SecondPress {
            self.history.clear();
            self.set_phase(GesturePhase::Idle);
            let result = self.double_tap_zoom(&event);
            self.report(result);
            recognized = Some(RecognizedGesture::DoubleTap);
        } else if self.is_pinch_escalation(&event) {
            self.history.clear();
            self.set_phase(GesturePhase::Pinching);
        } else if event.kind == EventKind::Move && self.phase == GesturePhase::SecondPress {
            self.history.clear();
            // One-finger zoom is a touch gesture; a mouse tap-then-drag pans.
            self.set_phase(if event.is_touch {
                GesturePhase::OneFingerZooming
            } else {
                GesturePhase::Dragging
            });
        }

        self.advance(event.kind);

        match event.kind {
            EventKind::Move => self.dispatch_move(&event),
            EventKind::Wheel => {
                let result = self.wheel_zoom(&event);
                self.report(result);
                Some(RecognizedGesture::Wheel)
            }
            EventKind::Start | EventKind::End => {
                self.anchor = Some(GestureAnchor {
                    init_state: self.view.state(),
                    init_event: event,
                });
                recognized
            }
        }
    }

    /// An End anchor describes the contacts held before the release. The
    /// first move from the contacts still down replaces it, so a lifted
    /// finger never turns into a pan or scale jump.
    fn rebase_after_release(&mut self, event: &CanonicalEvent) {
        if self.anchor.is_some_and(|anchor| anchor.init_event.kind == EventKind::End) {
            tracing::debug!(distance = event.distance, "anchor rebased after release");
            self.anchor = Some(GestureAnchor {
                init_state: self.view.state(),
                init_event: *event,
            });
        }
    }

    fn is_pinch_escalation(&self, event: &CanonicalEvent) -> bool {
        event.is_multi_contact()
            && self
                .anchor
                .is_some_and(|anchor| event.distance != anchor.init_event.distance)
    }

    fn advance(&mut self, kind: EventKind) {
        use GesturePhase::{
            AwaitingSecondTap, Dragging, Idle, OneFingerZooming, Pinching, Pressed, SecondPress,
        };
        let next = match (self.phase, kind) {
            (Idle, EventKind::Start) => Pressed,
            (AwaitingSecondTap, EventKind::Start) => SecondPress,
            (Idle | Pressed | AwaitingSecondTap, EventKind::Move) => Dragging,
            (Pressed, EventKind::End) => AwaitingSecondTap,
            (
                AwaitingSecondTap | SecondPress | Dragging | OneFingerZooming | Pinching,
                EventKind::End,
            )
            | (Pressed | AwaitingSecondTap | SecondPress, EventKind::Wheel) => Idle,
            (phase, _) => phase,
        };
        self.set_phase(next);
    }

    fn set_phase(&mut self, phase: GesturePhase) {
        if phase != self.phase {
            tracing::debug!(from = ?self.phase, to = ?phase, "gesture phase");
            self.phase = phase;
        }
    }

    fn expire_history(&mut self) {
        self.history.clear();
        if self.phase.is_tap_pattern() {
            self.set_phase(GesturePhase::Idle);
        }
    }

    fn dispatch_move(&mut self, event: &CanonicalEvent) -> Option<RecognizedGesture> {
        let anchor = self.anchor?;
        match self.phase {
            GesturePhase::Pinching => {
                let result = self.pinch_zoom(&anchor, event);
                self.report(result);
                Some(RecognizedGesture::Pinch)
            }
            GesturePhase::OneFingerZooming => {
                let result = self.one_finger_zoom(&anchor, event);
                self.report(result);
                Some(RecognizedGesture::OneFingerZoom)
            }
            GesturePhase::Dragging => {
                self.drag(&anchor, event);
                Some(RecognizedGesture::Drag)
            }
            _ => None,
        }
    }

    fn drag(&mut self, anchor: &GestureAnchor, event: &CanonicalEvent) {
        let delta = event.target_point - anchor.init_event.target_point;
        let position = anchor.init_state.position() + delta;
        if position.is_finite() {
            self.view.set_state(ViewStateUpdate::position(position));
        }
    }

    fn one_finger_zoom(
        &mut self,
        anchor: &GestureAnchor,
        event: &CanonicalEvent,
    ) -> Result<(), ZoomError> {
        if !event.is_touch {
            return Ok(());
        }
        let dy = event.target_point.y - anchor.init_event.target_point.y;
        let scale = anchor.init_state.scale + dy / self.config.zoom_divider;
        self.zoom_to(anchor.init_event.target_point, scale)
    }

    fn pinch_zoom(&mut self, anchor: &GestureAnchor, event: &CanonicalEvent) -> Result<(), ZoomError> {
        let initial = anchor.init_event.distance;
        if !initial.is_finite() || initial <= 0.0 {
            return Err(ZoomError::DegenerateDistance(initial));
        }
        let scale = anchor.init_state.scale * (event.distance / initial);
        self.zoom_to(event.target_point, scale)
    }

    fn double_tap_zoom(&mut self, event: &CanonicalEvent) -> Result<(), ZoomError> {
        let scale = self.view.state().scale + self.config.double_tap_step;
        self.zoom_to(event.target_point, scale)
    }

    fn wheel_zoom(&mut self, event: &CanonicalEvent) -> Result<(), ZoomError> {
        let delta_y = event.delta_y.unwrap_or(0.0);
        let scale = self.view.state().scale - delta_y / self.config.zoom_divider;
        self.zoom_to(event.target_point, scale)
    }

    /// Zoom to `scale` (clamped to the configured bounds) about `pivot`,
    /// starting from the view's current state.
    fn zoom_to(&mut self, pivot: Point, scale: f64) -> Result<(), ZoomError> {
        if !scale.is_finite() {
            return Err(ZoomError::NonFinite(scale));
        }
        let state = self.view.state();
        let next = scale_about(
            &state,
            self.view.image_size(),
            pivot,
            self.config.clamp_scale(scale),
        )?;
        self.view.set_state(ViewStateUpdate::full(&next));
        Ok(())
    }

    fn report(&self, result: Result<(), ZoomError>) {
        if let Err(err) = result {
            tracing::debug!(error = %err, phase = ?self.phase, "zoom step skipped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Debug)]
    struct TestView {
        state: ViewState,
        image: Size,
        writes: usize,
    }

    impl TestView {
        fn new() -> Self {
            Self {
                state: ViewState::default(),
                image: Size::new(800.0, 600.0),
                writes: 0,
            }
        }
    }

    impl View for TestView {
        fn state(&self) -> ViewState {
            self.state
        }

        fn set_state(&mut self, update: ViewStateUpdate) {
            self.writes += 1;
            self.state.apply(&update);
        }

        fn image_size(&self) -> Size {
            self.image
        }
    }

    #[derive(Debug, Default, Clone)]
    struct TestClock(Rc<Cell<f64>>);

    impl TestClock {
        fn advance(&self, ms: f64) {
            self.0.set(self.0.get() + ms);
        }
    }

    impl Clock for TestClock {
        fn now_ms(&self) -> f64 {
            self.0.get()
        }
    }

    fn interpreter() -> (GestureInterpreter<TestView, TestClock>, TestClock) {
        let clock = TestClock::default();
        let interp =
            GestureInterpreter::with_clock(TestView::new(), clock.clone(), GestureConfig::default());
        (interp, clock)
    }

    fn ev(kind: EventKind, x: f64, y: f64) -> CanonicalEvent {
        CanonicalEvent::new(kind, Point::new(x, y), 1.0)
    }

    fn touch(kind: EventKind, x: f64, y: f64) -> CanonicalEvent {
        ev(kind, x, y).with_touch(true)
    }

    fn pair(kind: EventKind, x: f64, y: f64, distance: f64) -> CanonicalEvent {
        CanonicalEvent::new(kind, Point::new(x, y), distance).with_touch(true)
    }

    #[test]
    fn test_history_display_and_capacity() {
        let mut history = GestureHistory::new(3);
        for kind in [EventKind::Start, EventKind::End, EventKind::Start, EventKind::Move] {
            history.push(kind);
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.to_string(), "end start move");
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.to_string(), "");
    }

    #[test]
    fn test_phase_flags_exclusive() {
        for phase in [
            GesturePhase::Idle,
            GesturePhase::Pressed,
            GesturePhase::AwaitingSecondTap,
            GesturePhase::SecondPress,
            GesturePhase::Dragging,
            GesturePhase::OneFingerZooming,
            GesturePhase::Pinching,
        ] {
            assert!(phase.flags().active_count() <= 1, "{phase:?}");
        }
        assert!(GesturePhase::Dragging.flags().drag);
        assert!(GesturePhase::Pinching.flags().multitouch_zoom);
        assert!(GesturePhase::OneFingerZooming.flags().one_finger_zoom);
    }

    #[test]
    fn test_single_contact_drag() {
        let (mut interp, _) = interpreter();
        interp.handle_event(ev(EventKind::Start, 10.0, 10.0));
        let gesture = interp.handle_event(ev(EventKind::Move, 15.0, 18.0));

        assert_eq!(gesture, Some(RecognizedGesture::Drag));
        assert_eq!(interp.view().state.position(), Point::new(5.0, 8.0));
        assert!(interp.flags().drag);
    }

    #[test]
    fn test_drag_is_relative_to_anchor() {
        let (mut interp, _) = interpreter();
        interp.handle_event(ev(EventKind::Start, 10.0, 10.0));
        for step in 1..=50 {
            let d = f64::from(step) * 0.1;
            interp.handle_event(ev(EventKind::Move, 10.0 + d, 10.0 - d));
        }
        let position = interp.view().state.position();
        assert!((position.x - 5.0).abs() < 1e-9);
        assert!((position.y + 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_end_clears_flags() {
        let (mut interp, _) = interpreter();
        interp.handle_event(ev(EventKind::Start, 0.0, 0.0));
        interp.handle_event(ev(EventKind::Move, 5.0, 0.0));
        assert!(interp.flags().drag);
        interp.handle_event(ev(EventKind::End, 5.0, 0.0));
        assert!(interp.flags().is_empty());
        assert_eq!(interp.phase(), GesturePhase::Idle);
    }

    #[test]
    fn test_pinch_ratio() {
        let (mut interp, _) = interpreter();
        interp.handle_event(touch(EventKind::Start, 0.0, 0.0));
        interp.handle_event(pair(EventKind::Start, 0.0, 0.0, 100.0));
        assert_eq!(interp.phase(), GesturePhase::Pinching);

        let gesture = interp.handle_event(pair(EventKind::Move, 0.0, 0.0, 150.0));
        assert_eq!(gesture, Some(RecognizedGesture::Pinch));
        assert!((interp.view().state.scale - 1.5).abs() < 1e-9);
        assert!(interp.flags().multitouch_zoom);
    }

    #[test]
    fn test_pinch_uses_anchor_not_previous_move() {
        let (mut interp, _) = interpreter();
        interp.handle_event(touch(EventKind::Start, 0.0, 0.0));
        interp.handle_event(pair(EventKind::Start, 0.0, 0.0, 100.0));
        interp.handle_event(pair(EventKind::Move, 0.0, 0.0, 200.0));
        interp.handle_event(pair(EventKind::Move, 0.0, 0.0, 150.0));
        assert!((interp.view().state.scale - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_pinch_degenerate_anchor_skipped() {
        let (mut interp, _) = interpreter();
        interp.handle_event(pair(EventKind::Start, 10.0, 10.0, 0.0));
        interp.handle_event(pair(EventKind::Move, 10.0, 10.0, 40.0));
        assert_eq!(interp.phase(), GesturePhase::Pinching);
        let state = interp.view().state;
        assert_eq!(state.scale, 1.0);
        assert!(state.position_x.is_finite());
    }

    #[test]
    fn test_double_tap_zoom() {
        let (mut interp, clock) = interpreter();
        let at = Point::new(200.0, 150.0);
        let before = interp.view().state.surface_to_image(at);

        let mut last = None;
        for kind in [EventKind::Start, EventKind::End, EventKind::Start, EventKind::End] {
            clock.advance(50.0);
            last = interp.handle_event(touch(kind, at.x, at.y));
        }

        assert_eq!(last, Some(RecognizedGesture::DoubleTap));
        let state = interp.view().state;
        assert!((state.scale - 1.2).abs() < 1e-9);
        let after = state.surface_to_image(at);
        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);
        assert_eq!(state.pivot(), at);
        assert!(interp.history().is_empty());
    }

    #[test]
    fn test_double_tap_with_mouse() {
        let (mut interp, _) = interpreter();
        for kind in [EventKind::Start, EventKind::End, EventKind::Start, EventKind::End] {
            interp.handle_event(ev(kind, 10.0, 10.0));
        }
        assert!((interp.view().state.scale - 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_debounce_expiry_prevents_double_tap() {
        let (mut interp, clock) = interpreter();
        interp.handle_event(touch(EventKind::Start, 10.0, 10.0));
        interp.handle_event(touch(EventKind::End, 10.0, 10.0));
        clock.advance(450.0);
        interp.handle_event(touch(EventKind::Start, 10.0, 10.0));
        let gesture = interp.handle_event(touch(EventKind::End, 10.0, 10.0));

        assert_eq!(gesture, None);
        assert_eq!(interp.view().state.scale, 1.0);
        assert_eq!(interp.phase(), GesturePhase::AwaitingSecondTap);
    }

    #[test]
    fn test_rearmed_window_spans_slow_sequence() {
        let (mut interp, clock) = interpreter();
        for kind in [EventKind::Start, EventKind::End, EventKind::Start, EventKind::End] {
            clock.advance(300.0);
            interp.handle_event(touch(kind, 10.0, 10.0));
        }
        assert!((interp.view().state.scale - 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_move_between_taps_is_not_double_tap() {
        let (mut interp, _) = interpreter();
        interp.handle_event(touch(EventKind::Start, 10.0, 10.0));
        interp.handle_event(touch(EventKind::Move, 12.0, 10.0));
        interp.handle_event(touch(EventKind::End, 12.0, 10.0));
        interp.handle_event(touch(EventKind::Start, 12.0, 10.0));
        interp.handle_event(touch(EventKind::End, 12.0, 10.0));
        assert_eq!(interp.view().state.scale, 1.0);
    }

    #[test]
    fn test_one_finger_zoom() {
        let (mut interp, _) = interpreter();
        interp.handle_event(touch(EventKind::Start, 100.0, 100.0));
        interp.handle_event(touch(EventKind::End, 100.0, 100.0));
        interp.handle_event(touch(EventKind::Start, 100.0, 100.0));
        let gesture = interp.handle_event(touch(EventKind::Move, 100.0, 200.0));

        assert_eq!(gesture, Some(RecognizedGesture::OneFingerZoom));
        assert!(interp.flags().one_finger_zoom);
        let state = interp.view().state;
        assert!((state.scale - 1.2).abs() < 1e-9);
        // Pivot stays where the gesture began.
        assert_eq!(state.pivot(), Point::new(100.0, 100.0));
    }

    #[test]
    fn test_one_finger_zoom_out() {
        let (mut interp, _) = interpreter();
        interp.handle_event(touch(EventKind::Start, 100.0, 300.0));
        interp.handle_event(touch(EventKind::End, 100.0, 300.0));
        interp.handle_event(touch(EventKind::Start, 100.0, 300.0));
        interp.handle_event(touch(EventKind::Move, 100.0, 250.0));
        assert!((interp.view().state.scale - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_mouse_tap_then_drag_pans() {
        let (mut interp, _) = interpreter();
        interp.handle_event(ev(EventKind::Start, 100.0, 100.0));
        interp.handle_event(ev(EventKind::End, 100.0, 100.0));
        interp.handle_event(ev(EventKind::Start, 100.0, 100.0));
        let gesture = interp.handle_event(ev(EventKind::Move, 110.0, 130.0));

        assert_eq!(gesture, Some(RecognizedGesture::Drag));
        let state = interp.view().state;
        assert_eq!(state.scale, 1.0);
        assert_eq!(state.position(), Point::new(10.0, 30.0));
    }

    #[test]
    fn test_wheel_zoom_at_cursor() {
        let (mut interp, _) = interpreter();
        let cursor = Point::new(320.0, 240.0);
        let before = interp.view().state.surface_to_image(cursor);
        let gesture = interp.handle_event(CanonicalEvent::wheel(cursor, -100.0));

        assert_eq!(gesture, Some(RecognizedGesture::Wheel));
        let state = interp.view().state;
        assert!((state.scale - 1.2).abs() < 1e-9);
        let after = state.surface_to_image(cursor);
        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);
    }

    #[test]
    fn test_wheel_does_not_move_anchor() {
        let (mut interp, _) = interpreter();
        interp.handle_event(ev(EventKind::Start, 10.0, 10.0));
        let anchor = *interp.anchor().unwrap();
        interp.handle_event(CanonicalEvent::wheel(Point::new(50.0, 50.0), 10.0));
        assert_eq!(interp.anchor().unwrap().init_event, anchor.init_event);
    }

    #[test]
    fn test_wheel_clamped_to_min_scale() {
        let (mut interp, _) = interpreter();
        interp.handle_event(CanonicalEvent::wheel(Point::ORIGIN, 10_000.0));
        let state = interp.view().state;
        assert_eq!(state.scale, interp.config().min_scale);
        assert!(state.scale > 0.0);
    }

    #[test]
    fn test_stale_timer_token_ignored() {
        let (mut interp, _) = interpreter();
        interp.handle_event(touch(EventKind::Start, 0.0, 0.0));
        let stale = interp.debounce_token().unwrap();
        interp.handle_event(touch(EventKind::End, 0.0, 0.0));
        let fresh = interp.debounce_token().unwrap();

        assert!(!interp.on_debounce_timeout(stale));
        assert_eq!(interp.phase(), GesturePhase::AwaitingSecondTap);
        assert_eq!(interp.history().len(), 2);

        assert!(interp.on_debounce_timeout(fresh));
        assert_eq!(interp.phase(), GesturePhase::Idle);
        assert!(interp.history().is_empty());
    }

    #[test]
    fn test_timeout_keeps_continuous_gesture() {
        let (mut interp, _) = interpreter();
        interp.handle_event(ev(EventKind::Start, 0.0, 0.0));
        interp.handle_event(ev(EventKind::Move, 1.0, 0.0));
        let token = interp.debounce_token().unwrap();
        assert!(interp.on_debounce_timeout(token));
        assert_eq!(interp.phase(), GesturePhase::Dragging);
    }

    #[test]
    fn test_partial_release_does_not_jump() {
        let (mut interp, _) = interpreter();
        interp.handle_event(touch(EventKind::Start, 0.0, 0.0));
        interp.handle_event(pair(EventKind::Start, 50.0, 0.0, 100.0));
        interp.handle_event(pair(EventKind::Move, 50.0, 0.0, 200.0));
        interp.handle_event(pair(EventKind::End, 50.0, 0.0, 200.0));
        let released = interp.view().state;
        assert!((released.scale - 2.0).abs() < 1e-9);

        interp.handle_event(touch(EventKind::Move, -50.0, 0.0));
        assert_eq!(interp.view().state.position(), released.position());
        assert_eq!(interp.view().state.scale, released.scale);
        assert_eq!(interp.anchor().unwrap().init_event.kind, EventKind::Move);

        interp.handle_event(touch(EventKind::Move, -40.0, 5.0));
        assert_eq!(interp.phase(), GesturePhase::Dragging);
        let position = interp.view().state.position();
        assert!((position.x - released.position_x - 10.0).abs() < 1e-9);
        assert!((position.y - released.position_y - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_move_without_anchor_is_ignored() {
        let (mut interp, _) = interpreter();
        assert_eq!(interp.handle_event(ev(EventKind::Move, 5.0, 5.0)), None);
        assert_eq!(interp.view().writes, 0);
    }

    #[test]
    fn test_reset() {
        let (mut interp, _) = interpreter();
        interp.handle_event(ev(EventKind::Start, 0.0, 0.0));
        interp.handle_event(ev(EventKind::Move, 1.0, 0.0));
        interp.reset();
        assert_eq!(interp.phase(), GesturePhase::Idle);
        assert!(interp.anchor().is_none());
        assert!(interp.history().is_empty());
        assert!(interp.debounce_token().is_none());
    }
}
