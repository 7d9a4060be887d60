//! Normalizes mouse, touch, pointer and wheel input into [`CanonicalEvent`]s.
//!
//! The normalizer is platform independent: a binding translates each
//! platform event into a [`RawInput`] plus the surface's current viewport
//! offset, and the normalizer fires its callback at most once per call.

use crate::contacts::{ContactPoint, ContactSummary, ContactTracker};
use crate::event::{
    CanonicalEvent, ContactAction, ContactId, EventKind, PointerKind, RawContact, RawInput,
};
use crate::geometry::Point;

/// Change in contact tracking caused by one platform event.
///
/// Bindings use this to attach document-wide move/end listeners while a
/// contact is down and to detach them once it is released. The mouse
/// contact is reported on its own, so a held touch does not hide a mouse
/// press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tracking {
    /// Tracking state did not change.
    Unchanged,
    /// The first contact, or the mouse contact, went down.
    Began,
    /// The last contact, or the mouse contact, was released.
    Ended,
}

/// Turns raw platform input into the canonical event stream.
pub struct InputNormalizer<F>
where
    F: FnMut(CanonicalEvent),
{
    contacts: ContactTracker,
    on_event: F,
}

impl<F> std::fmt::Debug for InputNormalizer<F>
where
    F: FnMut(CanonicalEvent),
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputNormalizer")
            .field("contacts", &self.contacts)
            .finish_non_exhaustive()
    }
}

impl<F> InputNormalizer<F>
where
    F: FnMut(CanonicalEvent),
{
    /// Create a normalizer that reports to `on_event`.
    pub fn new(on_event: F) -> Self {
        Self {
            contacts: ContactTracker::new(),
            on_event,
        }
    }

    /// Active contacts.
    pub fn contacts(&self) -> &ContactTracker {
        &self.contacts
    }

    /// Forget every tracked contact without emitting anything.
    pub fn reset(&mut self) {
        self.contacts.clear();
    }

    /// Apply one platform event.
    ///
    /// `surface_origin` is the surface's top-left corner in viewport
    /// coordinates; every emitted target point is relative to it.
    pub fn process(&mut self, input: RawInput, surface_origin: Point) -> Tracking {
        match input {
            RawInput::Wheel { client, delta_y } => {
                self.emit(CanonicalEvent::wheel(client - surface_origin, delta_y));
                Tracking::Unchanged
            }
            RawInput::Contact { action, contacts } => match action {
                ContactAction::Down => self.on_down(&contacts, surface_origin),
                ContactAction::Move => {
                    self.on_move(&contacts, surface_origin);
                    Tracking::Unchanged
                }
                ContactAction::Up | ContactAction::Cancel | ContactAction::Leave => {
                    self.on_up(&contacts, surface_origin)
                }
            },
        }
    }

    fn on_down(&mut self, raw: &[RawContact], origin: Point) -> Tracking {
        if raw.is_empty() {
            return Tracking::Unchanged;
        }
        let was_idle = self.contacts.is_empty();
        let mouse_pressed = raw
            .iter()
            .any(|c| c.id == ContactId::MOUSE && self.contacts.get(c.id).is_none());
        for contact in raw {
            self.contacts.insert(ContactPoint {
                id: contact.id,
                position: contact.client - origin,
                pointer_kind: contact.pointer_kind,
            });
        }
        if let Some(summary) = self.contacts.summary() {
            self.emit_summary(EventKind::Start, summary);
        }
        if was_idle || mouse_pressed {
            Tracking::Began
        } else {
            Tracking::Unchanged
        }
    }

    fn on_move(&mut self, raw: &[RawContact], origin: Point) {
        let mut any_tracked = false;
        for contact in raw {
            any_tracked |= self.contacts.update(contact.id, contact.client - origin);
        }
        if !any_tracked {
            tracing::trace!(count = raw.len(), "move for untracked contact ignored");
            return;
        }
        if let Some(summary) = self.contacts.summary() {
            self.emit_summary(EventKind::Move, summary);
        }
    }

    /// End geometry is taken from the contacts active just before removal,
    /// with the released contacts at their final positions.
    fn on_up(&mut self, raw: &[RawContact], origin: Point) -> Tracking {
        let mut any_tracked = false;
        for contact in raw {
            any_tracked |= self.contacts.update(contact.id, contact.client - origin);
        }
        if !any_tracked {
            tracing::trace!(count = raw.len(), "end for untracked contact ignored");
            return Tracking::Unchanged;
        }
        let before = self.contacts.summary();

        let mut released: Option<ContactPoint> = None;
        let mut mouse_released = false;
        for contact in raw {
            if let Some(removed) = self.contacts.remove(contact.id) {
                mouse_released |= removed.id == ContactId::MOUSE;
                released = Some(removed);
            }
        }

        let summary = before.or_else(|| {
            released.map(|released| ContactSummary {
                target_point: released.position,
                distance: CanonicalEvent::SINGLE_CONTACT_DISTANCE,
                is_touch: released.pointer_kind == PointerKind::Touch,
            })
        });
        if let Some(summary) = summary {
            self.emit_summary(EventKind::End, summary);
        }

        if self.contacts.is_empty() || mouse_released {
            Tracking::Ended
        } else {
            Tracking::Unchanged
        }
    }

    fn emit_summary(&mut self, kind: EventKind, summary: ContactSummary) {
        let event = CanonicalEvent::new(kind, summary.target_point, summary.distance)
            .with_touch(summary.is_touch);
        self.emit(event);
    }

    fn emit(&mut self, event: CanonicalEvent) {
        tracing::trace!(
            kind = %event.kind,
            x = event.target_point.x,
            y = event.target_point.y,
            distance = event.distance,
            "canonical event"
        );
        (self.on_event)(event);
    }
}
