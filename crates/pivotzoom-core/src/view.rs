//! View collaborator: the pan/zoom state the gestures mutate.

use crate::geometry::{Point, Size};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

/// Pan offset, scale and last zoom pivot of a view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    /// Horizontal offset of the image's top-left corner
    pub position_x: f64,
    /// Vertical offset of the image's top-left corner
    pub position_y: f64,
    /// Scale factor, always positive
    pub scale: f64,
    /// X of the most recent zoom pivot
    pub pivot_point_x: f64,
    /// Y of the most recent zoom pivot
    pub pivot_point_y: f64,
}

impl ViewState {
    /// Create a state at `position` with `scale`; the pivot starts at the origin.
    #[must_use]
    pub const fn new(position: Point, scale: f64) -> Self {
        Self {
            position_x: position.x,
            position_y: position.y,
            scale,
            pivot_point_x: 0.0,
            pivot_point_y: 0.0,
        }
    }

    /// Pan offset as a point.
    #[must_use]
    pub const fn position(&self) -> Point {
        Point::new(self.position_x, self.position_y)
    }

    /// Most recent zoom pivot.
    #[must_use]
    pub const fn pivot(&self) -> Point {
        Point::new(self.pivot_point_x, self.pivot_point_y)
    }

    /// Merge a partial update into this state.
    pub fn apply(&mut self, update: &ViewStateUpdate) {
        if let Some(x) = update.position_x {
            self.position_x = x;
        }
        if let Some(y) = update.position_y {
            self.position_y = y;
        }
        if let Some(scale) = update.scale {
            self.scale = scale;
        }
        if let Some(x) = update.pivot_point_x {
            self.pivot_point_x = x;
        }
        if let Some(y) = update.pivot_point_y {
            self.pivot_point_y = y;
        }
    }

    /// Convert a surface point to image coordinates (unscaled image pixels).
    #[must_use]
    pub fn surface_to_image(&self, point: Point) -> Point {
        Point::new(
            (point.x - self.position_x) / self.scale,
            (point.y - self.position_y) / self.scale,
        )
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(Point::ORIGIN, 1.0)
    }
}

/// Partial view state; `None` fields are left untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewStateUpdate {
    /// New horizontal offset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_x: Option<f64>,
    /// New vertical offset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_y: Option<f64>,
    /// New scale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    /// New pivot X
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pivot_point_x: Option<f64>,
    /// New pivot Y
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pivot_point_y: Option<f64>,
}

impl ViewStateUpdate {
    /// Update only the pan offset.
    #[must_use]
    pub const fn position(position: Point) -> Self {
        Self {
            position_x: Some(position.x),
            position_y: Some(position.y),
            scale: None,
            pivot_point_x: None,
            pivot_point_y: None,
        }
    }

    /// Update every field.
    #[must_use]
    pub const fn full(state: &ViewState) -> Self {
        Self {
            position_x: Some(state.position_x),
            position_y: Some(state.position_y),
            scale: Some(state.scale),
            pivot_point_x: Some(state.pivot_point_x),
            pivot_point_y: Some(state.pivot_point_y),
        }
    }
}

/// The view a gesture interpreter drives.
pub trait View {
    /// Current state, read whole.
    fn state(&self) -> ViewState;

    /// Merge `update` into the current state.
    fn set_state(&mut self, update: ViewStateUpdate);

    /// Natural (unscaled) size of the displayed image.
    fn image_size(&self) -> Size;
}

impl<V: View + ?Sized> View for Rc<RefCell<V>> {
    fn state(&self) -> ViewState {
        self.borrow().state()
    }

    fn set_state(&mut self, update: ViewStateUpdate) {
        self.borrow_mut().set_state(update);
    }

    fn image_size(&self) -> Size {
        self.borrow().image_size()
    }
}

impl<V: View + ?Sized> View for Box<V> {
    fn state(&self) -> ViewState {
        (**self).state()
    }

    fn set_state(&mut self, update: ViewStateUpdate) {
        (**self).set_state(update);
    }

    fn image_size(&self) -> Size {
        (**self).image_size()
    }
}
