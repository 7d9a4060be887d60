//! Ordered bookkeeping of active contacts.
//!
//! Contacts are kept in arrival order so the pair used for pinch math is
//! always the two earliest contacts still down.

use crate::event::{ContactId, PointerKind};
use crate::geometry::Point;

/// Active touch/pointer contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactPoint {
    /// Platform identifier.
    pub id: ContactId,
    /// Surface-local position.
    pub position: Point,
    /// Device kind.
    pub pointer_kind: PointerKind,
}

/// Where the contacts currently point, as consumed by the canonical stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactSummary {
    /// Single contact position, or midpoint of the active pair.
    pub target_point: Point,
    /// 1 for a single contact, distance between the pair otherwise.
    pub distance: f64,
    /// Whether the contacts involved are touch contacts.
    pub is_touch: bool,
}

impl ContactSummary {
    fn single(contact: &ContactPoint) -> Self {
        Self {
            target_point: contact.position,
            distance: 1.0,
            is_touch: contact.pointer_kind == PointerKind::Touch,
        }
    }

    fn pair(first: &ContactPoint, second: &ContactPoint) -> Self {
        Self {
            target_point: first.position.midpoint(&second.position),
            distance: first.position.distance(&second.position),
            is_touch: first.pointer_kind == PointerKind::Touch
                && second.pointer_kind == PointerKind::Touch,
        }
    }
}

/// Contacts in arrival order.
#[derive(Debug, Default, Clone)]
pub struct ContactTracker {
    contacts: Vec<ContactPoint>,
}

impl ContactTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of active contacts.
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    /// True when no contact is down.
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Look up a contact.
    pub fn get(&self, id: ContactId) -> Option<&ContactPoint> {
        self.contacts.iter().find(|c| c.id == id)
    }

    /// Contacts in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = &ContactPoint> {
        self.contacts.iter()
    }

    /// Register a contact. A repeated down for a known id only moves it and
    /// keeps its place in the arrival order.
    pub fn insert(&mut self, contact: ContactPoint) {
        if let Some(existing) = self.contacts.iter_mut().find(|c| c.id == contact.id) {
            *existing = contact;
        } else {
            self.contacts.push(contact);
        }
    }

    /// Move a tracked contact. Returns false for an unknown id.
    pub fn update(&mut self, id: ContactId, position: Point) -> bool {
        match self.contacts.iter_mut().find(|c| c.id == id) {
            Some(contact) => {
                contact.position = position;
                true
            }
            None => false,
        }
    }

    /// Remove a contact, returning it if it was tracked.
    pub fn remove(&mut self, id: ContactId) -> Option<ContactPoint> {
        let index = self.contacts.iter().position(|c| c.id == id)?;
        Some(self.contacts.remove(index))
    }

    /// The first two contacts by arrival order.
    pub fn pair(&self) -> Option<(&ContactPoint, &ContactPoint)> {
        match self.contacts.as_slice() {
            [first, second, ..] => Some((first, second)),
            _ => None,
        }
    }

    /// Target point and distance for the current contacts.
    pub fn summary(&self) -> Option<ContactSummary> {
        if let Some((first, second)) = self.pair() {
            return Some(ContactSummary::pair(first, second));
        }
        self.contacts.first().map(ContactSummary::single)
    }

    /// Drop every contact.
    pub fn clear(&mut self) {
        self.contacts.clear();
    }
}
