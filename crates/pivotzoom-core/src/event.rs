//! Input events: raw platform input and the canonical stream built from it.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a canonical event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// A contact went down.
    Start,
    /// A tracked contact moved.
    Move,
    /// A contact was released, cancelled or left the surface.
    End,
    /// The wheel was scrolled.
    Wheel,
}

impl EventKind {
    /// Lowercase name, as used in gesture history dumps.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Move => "move",
            Self::End => "end",
            Self::Wheel => "wheel",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The unified event every input family is normalized into.
///
/// `target_point` is relative to the input surface's top-left corner.
/// `distance` is 1 for single-contact interactions and wheel events, and the
/// Euclidean distance between the two active contacts otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanonicalEvent {
    /// Event kind
    pub kind: EventKind,
    /// Surface-local target (contact position or midpoint of the pair)
    pub target_point: Point,
    /// Distance between the active pair, or 1
    pub distance: f64,
    /// Raw wheel delta (wheel events only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta_y: Option<f64>,
    /// Whether the contacts behind this event are touch contacts
    #[serde(default)]
    pub is_touch: bool,
}

impl CanonicalEvent {
    /// Distance reported for single-contact and wheel events.
    pub const SINGLE_CONTACT_DISTANCE: f64 = 1.0;

    /// Create a contact event.
    #[must_use]
    pub const fn new(kind: EventKind, target_point: Point, distance: f64) -> Self {
        Self {
            kind,
            target_point,
            distance,
            delta_y: None,
            is_touch: false,
        }
    }

    /// Create a wheel event.
    #[must_use]
    pub const fn wheel(target_point: Point, delta_y: f64) -> Self {
        Self {
            kind: EventKind::Wheel,
            target_point,
            distance: Self::SINGLE_CONTACT_DISTANCE,
            delta_y: Some(delta_y),
            is_touch: false,
        }
    }

    /// Mark the event as coming from touch contacts.
    #[must_use]
    pub const fn with_touch(mut self, is_touch: bool) -> Self {
        self.is_touch = is_touch;
        self
    }

    /// True when two or more contacts produced this event.
    #[must_use]
    pub fn is_multi_contact(&self) -> bool {
        self.distance > Self::SINGLE_CONTACT_DISTANCE
    }
}

/// Platform-assigned contact identifier (pointer id or touch identifier).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContactId(pub i32);

impl ContactId {
    /// Identifier used for the single mouse contact of the mouse family.
    pub const MOUSE: Self = Self(-1);

    /// Create a new contact ID.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }
}

/// Device behind a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PointerKind {
    /// Mouse
    #[default]
    Mouse,
    /// Touch
    Touch,
    /// Pen or stylus
    Pen,
}

impl PointerKind {
    /// Parse a DOM `pointerType` string. Unknown types count as mouse.
    #[must_use]
    pub fn from_pointer_type(s: &str) -> Self {
        match s {
            "touch" => Self::Touch,
            "pen" => Self::Pen,
            _ => Self::Mouse,
        }
    }
}

/// Input event family a platform event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFamily {
    /// `mouse*` events
    Mouse,
    /// `touch*` events
    Touch,
    /// `pointer*` events
    Pointer,
    /// `wheel` events
    Wheel,
}

/// What a platform event does to its contacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactAction {
    /// Contact went down
    Down,
    /// Contact moved
    Move,
    /// Contact released
    Up,
    /// Platform cancelled the contact
    Cancel,
    /// Contact left the surface
    Leave,
}

impl ContactAction {
    /// Canonical kind this action produces.
    #[must_use]
    pub const fn kind(self) -> EventKind {
        match self {
            Self::Down => EventKind::Start,
            Self::Move => EventKind::Move,
            Self::Up | Self::Cancel | Self::Leave => EventKind::End,
        }
    }
}

/// Classification of a platform event type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawEventClass {
    /// Family the event belongs to
    pub family: InputFamily,
    /// Contact action, `None` for wheel events
    pub action: Option<ContactAction>,
}

/// Classify a DOM event type name.
///
/// Returns `None` for anything the normalizer does not handle.
#[must_use]
pub fn classify_event_type(event_type: &str) -> Option<RawEventClass> {
    use ContactAction::{Cancel, Down, Leave, Move, Up};
    let (family, action) = match event_type {
        "mousedown" => (InputFamily::Mouse, Down),
        "mousemove" => (InputFamily::Mouse, Move),
        "mouseup" => (InputFamily::Mouse, Up),
        "touchstart" => (InputFamily::Touch, Down),
        "touchmove" => (InputFamily::Touch, Move),
        "touchend" => (InputFamily::Touch, Up),
        "touchcancel" => (InputFamily::Touch, Cancel),
        "pointerdown" => (InputFamily::Pointer, Down),
        "pointermove" => (InputFamily::Pointer, Move),
        "pointerup" => (InputFamily::Pointer, Up),
        "pointercancel" => (InputFamily::Pointer, Cancel),
        "pointerleave" => (InputFamily::Pointer, Leave),
        "wheel" => {
            return Some(RawEventClass {
                family: InputFamily::Wheel,
                action: None,
            })
        }
        _ => return None,
    };
    Some(RawEventClass {
        family,
        action: Some(action),
    })
}

/// One contact as reported by a platform event, in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawContact {
    /// Contact identifier
    pub id: ContactId,
    /// Viewport (client) position
    pub client: Point,
    /// Device kind
    pub pointer_kind: PointerKind,
}

impl RawContact {
    /// Create a new raw contact.
    #[must_use]
    pub const fn new(id: ContactId, client: Point, pointer_kind: PointerKind) -> Self {
        Self {
            id,
            client,
            pointer_kind,
        }
    }

    /// The mouse family's single contact.
    #[must_use]
    pub const fn mouse(client: Point) -> Self {
        Self::new(ContactId::MOUSE, client, PointerKind::Mouse)
    }
}

/// A platform event reduced to what the normalizer needs.
#[derive(Debug, Clone, PartialEq)]
pub enum RawInput {
    /// Contacts changed. For touch events `contacts` holds the changed touches.
    Contact {
        /// What happened to the contacts
        action: ContactAction,
        /// Contacts affected by this event
        contacts: Vec<RawContact>,
    },
    /// Wheel scrolled.
    Wheel {
        /// Viewport (client) cursor position
        client: Point,
        /// Raw vertical delta
        delta_y: f64,
    },
}

impl RawInput {
    /// Single-contact input.
    #[must_use]
    pub fn contact(action: ContactAction, contact: RawContact) -> Self {
        Self::Contact {
            action,
            contacts: vec![contact],
        }
    }
}
