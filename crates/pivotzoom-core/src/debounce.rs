//! Re-armable debounce timer and the clocks that drive it.
//!
//! Only one deadline is ever pending: arming replaces the previous deadline
//! and invalidates its token, so a stale expiry cannot clear state that a
//! newer event depends on.

use std::time::Instant;

/// Millisecond clock.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin.
    fn now_ms(&self) -> f64;
}

/// Clock backed by [`std::time::Instant`].
///
/// Not usable on `wasm32-unknown-unknown`; the browser binding supplies a
/// `performance.now()` clock instead.
#[derive(Debug, Clone, Copy)]
pub struct InstantClock {
    origin: Instant,
}

impl InstantClock {
    /// Start a clock at zero.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for InstantClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for InstantClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> f64 {
        (**self).now_ms()
    }
}

impl<C: Clock + ?Sized> Clock for std::rc::Rc<C> {
    fn now_ms(&self) -> f64 {
        (**self).now_ms()
    }
}

/// Identifies one arming of a [`DebounceTimer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

/// Single pending deadline, re-armed rather than stacked.
#[derive(Debug, Clone)]
pub struct DebounceTimer {
    window_ms: f64,
    deadline: Option<f64>,
    generation: u64,
}

impl DebounceTimer {
    /// Create a disarmed timer.
    pub fn new(window_ms: f64) -> Self {
        Self {
            window_ms,
            deadline: None,
            generation: 0,
        }
    }

    /// Debounce window in milliseconds.
    pub fn window_ms(&self) -> f64 {
        self.window_ms
    }

    /// (Re)start the window at `now`, invalidating any earlier token.
    pub fn arm(&mut self, now: f64) -> TimerToken {
        self.generation = self.generation.wrapping_add(1);
        self.deadline = Some(now + self.window_ms);
        TimerToken(self.generation)
    }

    /// Drop the pending deadline.
    pub fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.deadline = None;
    }

    /// True while a deadline is pending.
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// True if a deadline is pending and `now` has reached it.
    pub fn is_expired(&self, now: f64) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }

    /// Fire the timer for `token`. Returns false, and does nothing, when the
    /// token is stale or the timer is not armed.
    pub fn fire(&mut self, token: TimerToken) -> bool {
        if token.0 != self.generation || self.deadline.is_none() {
            return false;
        }
        self.deadline = None;
        true
    }

    /// Disarm if the deadline has passed. Returns true when it had.
    pub fn expire(&mut self, now: f64) -> bool {
        if self.is_expired(now) {
            self.deadline = None;
            true
        } else {
            false
        }
    }
}
