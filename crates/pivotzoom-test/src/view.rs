//! A [`View`] that records every update it receives.

use pivotzoom_core::{Size, View, ViewState, ViewStateUpdate};

/// In-memory view that keeps the update log for assertions.
#[derive(Debug, Clone)]
pub struct RecordingView {
    state: ViewState,
    image_size: Size,
    updates: Vec<ViewStateUpdate>,
}

impl RecordingView {
    /// Default image is 800x600 at scale 1 and the origin.
    pub fn new() -> Self {
        Self::with_image(800.0, 600.0)
    }

    /// View over an image of the given unscaled size.
    pub fn with_image(width: f64, height: f64) -> Self {
        Self {
            state: ViewState::default(),
            image_size: Size::new(width, height),
            updates: Vec::new(),
        }
    }

    /// Replace the current state without recording an update.
    #[must_use]
    pub fn starting_at(mut self, state: ViewState) -> Self {
        self.state = state;
        self
    }

    /// Every update received, oldest first.
    pub fn updates(&self) -> &[ViewStateUpdate] {
        &self.updates
    }

    /// Most recent update.
    pub fn last_update(&self) -> Option<&ViewStateUpdate> {
        self.updates.last()
    }

    /// Forget the update log.
    pub fn clear_updates(&mut self) {
        self.updates.clear();
    }
}

impl Default for RecordingView {
    fn default() -> Self {
        Self::new()
    }
}

impl View for RecordingView {
    fn state(&self) -> ViewState {
        self.state
    }

    fn set_state(&mut self, update: ViewStateUpdate) {
        self.state.apply(&update);
        self.updates.push(update);
    }

    fn image_size(&self) -> Size {
        self.image_size
    }
}
