//! Touch wiring. Same evasion algorithm as the pointer path; only the
//! polling cadence, thresholds and haptics differ.

use crate::constants::*;
use crate::dom;
use crate::events::pointer::{poll_once, viewport_once, BTN_NO};
use crate::Shared;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_touch_tracking(shared: &Shared) {
    for kind in ["touchstart", "touchmove"] {
        let s = shared.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::TouchEvent| {
            if let Some(touch) = ev.touches().get(0) {
                s.pointer
                    .borrow_mut()
                    .record(touch.client_x() as f32, touch.client_y() as f32);
            }
        }) as Box<dyn FnMut(web::TouchEvent)>);
        if let Some(w) = web::window() {
            _ = w.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }
}

pub fn wire_touch_evasion(shared: &Shared) {
    let s = shared.clone();
    shared
        .registry
        .borrow_mut()
        .set("evade-poll", POLL_MS_TOUCH, move || poll_once(&s));
    let s = shared.clone();
    shared
        .registry
        .borrow_mut()
        .set("evade-viewport", VIEWPORT_CHECK_MS, move || viewport_once(&s));
    wire_tap_trigger(shared);
}

// A direct tap on the button flees immediately (the poll would otherwise
// only catch it on the next tick). Rapid taps are debounced.
fn wire_tap_trigger(shared: &Shared) {
    let Some(el) = shared.document.get_element_by_id(BTN_NO) else {
        return;
    };
    let s = shared.clone();
    let last_tap: Rc<Cell<f64>> = Rc::new(Cell::new(0.0));
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::TouchEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        let now = js_sys::Date::now();
        if now - last_tap.get() < TOUCH_DEBOUNCE_MS {
            return;
        }
        last_tap.set(now);
        if let Some(touch) = ev.touches().get(0) {
            s.pointer
                .borrow_mut()
                .record(touch.client_x() as f32, touch.client_y() as f32);
        }
        dom::vibrate_pattern(&HAPTIC_TAP_PATTERN);
        poll_once(&s);
    }) as Box<dyn FnMut(web::TouchEvent)>);
    _ = el.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
    closure.forget();
}
