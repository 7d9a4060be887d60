//! Browser event conversion - web_sys events to [`RawInput`].
//!
//! Supports mouse, touch, pointer and wheel events. Coordinates stay in
//! viewport space; the normalizer subtracts the surface origin.

use pivotzoom_core::{
    ContactId, InputFamily, Point, PointerKind, RawContact, RawEventClass, RawInput,
};
use wasm_bindgen::JsCast;
use web_sys::{Event, MouseEvent, PointerEvent, TouchEvent, WheelEvent};

/// Convert a classified DOM event into raw input.
///
/// Returns `None` when the event is not of the interface its type name
/// implies.
pub fn raw_input(event: &Event, class: RawEventClass) -> Option<RawInput> {
    match (class.family, class.action) {
        (InputFamily::Wheel, _) => {
            let wheel = event.dyn_ref::<WheelEvent>()?;
            Some(RawInput::Wheel {
                client: client_point(wheel),
                delta_y: wheel.delta_y(),
            })
        }
        (InputFamily::Mouse, Some(action)) => {
            let mouse = event.dyn_ref::<MouseEvent>()?;
            Some(RawInput::contact(action, RawContact::mouse(client_point(mouse))))
        }
        (InputFamily::Pointer, Some(action)) => {
            let pointer = event.dyn_ref::<PointerEvent>()?;
            Some(RawInput::contact(action, pointer_contact(pointer)))
        }
        (InputFamily::Touch, Some(action)) => {
            let touch = event.dyn_ref::<TouchEvent>()?;
            Some(RawInput::Contact {
                action,
                contacts: changed_touches(touch),
            })
        }
        _ => None,
    }
}

/// Pointer event as a single contact.
pub fn pointer_contact(event: &PointerEvent) -> RawContact {
    RawContact::new(
        ContactId::new(event.pointer_id()),
        client_point(event),
        PointerKind::from_pointer_type(&event.pointer_type()),
    )
}

/// Touches that changed in this event.
pub fn changed_touches(event: &TouchEvent) -> Vec<RawContact> {
    let touches = event.changed_touches();
    let mut contacts = Vec::with_capacity(touches.length() as usize);

    for i in 0..touches.length() {
        if let Some(touch) = touches.get(i) {
            contacts.push(RawContact::new(
                ContactId::new(touch.identifier()),
                Point::new(f64::from(touch.client_x()), f64::from(touch.client_y())),
                PointerKind::Touch,
            ));
        }
    }

    contacts
}

fn client_point(event: &MouseEvent) -> Point {
    Point::new(f64::from(event.client_x()), f64::from(event.client_y()))
}
