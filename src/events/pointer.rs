use crate::constants::*;
use crate::core::{FleeKind, Phase, Rect, Reposition, Spring2, SpringConfig};
use crate::dom;
use crate::frame::ActiveFlee;
use crate::Shared;
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

pub const BTN_NO: &str = "btn-no";
pub const BTN_YES: &str = "btn-yes";

/// Global pointer tracking: handlers only overwrite the latest sample, the
/// proximity check runs on its own polling cadence.
pub fn wire_pointer_tracking(shared: &Shared) {
    let s = shared.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        s.pointer
            .borrow_mut()
            .record(ev.client_x() as f32, ev.client_y() as f32);
    }) as Box<dyn FnMut(web::PointerEvent)>);
    if let Some(w) = web::window() {
        _ = w.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

pub fn wire_pointer_evasion(shared: &Shared) {
    let s = shared.clone();
    shared
        .registry
        .borrow_mut()
        .set("evade-poll", POLL_MS_POINTER, move || poll_once(&s));
    let s = shared.clone();
    shared
        .registry
        .borrow_mut()
        .set("evade-viewport", VIEWPORT_CHECK_MS, move || viewport_once(&s));
    wire_backup_triggers(shared);
}

/// One proximity check. Outside the question phase, or while the button is
/// missing/unmeasured, this is a silent no-op.
pub(crate) fn poll_once(shared: &Shared) {
    if shared.flow.borrow().phase != Phase::Question {
        return;
    }
    let Some(vp) = dom::viewport() else { return };
    let Some(rect) = dom::measure_rect(&shared.document, BTN_NO) else {
        return;
    };
    let pointer = shared.pointer.borrow().pos;
    let rep = shared.controller.borrow_mut().poll(pointer, Some(rect), vp);
    if let Some(rep) = rep {
        begin_flee(shared, rect, rep);
    }
}

/// Out-of-viewport recovery check, run every half second.
pub(crate) fn viewport_once(shared: &Shared) {
    if shared.flow.borrow().phase != Phase::Question {
        return;
    }
    let Some(vp) = dom::viewport() else { return };
    let Some(rect) = dom::measure_rect(&shared.document, BTN_NO) else {
        return;
    };
    let rep = shared.controller.borrow_mut().check_viewport(Some(rect), vp);
    if let Some(rep) = rep {
        begin_flee(shared, rect, rep);
    }
}

/// Apply a reposition: pin the button, start the spring, and fire the
/// side effects (accept-button growth, haptics) for pointer-driven flees.
pub(crate) fn begin_flee(shared: &Shared, from: Rect, rep: Reposition) {
    if rep.kind != FleeKind::SnapBack {
        let scale = shared.flow.borrow_mut().note_evaded();
        if let Some(yes) = dom::html_element(&shared.document, BTN_YES) {
            dom::set_scale(&yes, scale);
        }
        if shared.touch {
            dom::vibrate(HAPTIC_FLEE_MS);
        }
    }
    let cfg = match rep.kind {
        FleeKind::SnapBack => SpringConfig::snap_back(),
        _ if shared.touch => SpringConfig::escape_touch(),
        _ => SpringConfig::escape(),
    };
    let cooldown = if shared.touch {
        SETTLE_SEC_TOUCH
    } else {
        SETTLE_SEC_POINTER
    };
    if let Some(el) = dom::html_element(&shared.document, BTN_NO) {
        dom::set_fixed_position(&el, from.left, from.top);
    }
    let spring = Spring2::new(
        Vec2::new(from.left, from.top),
        Vec2::new(rep.rect.left, rep.rect.top),
        cfg,
    );
    *shared.active_flee.borrow_mut() = Some(ActiveFlee::new(spring, cooldown));
    log::debug!(
        "[evade] {:?} -> ({:.0},{:.0})",
        rep.kind,
        rep.rect.left,
        rep.rect.top
    );
}

// Hover and click on the button itself act as backup triggers for pointers
// that arrive without a recent move sample.
fn wire_backup_triggers(shared: &Shared) {
    let s = shared.clone();
    add_mouse_listener(&shared.document, BTN_NO, "mouseenter", move |ev| {
        s.pointer
            .borrow_mut()
            .record(ev.client_x() as f32, ev.client_y() as f32);
        poll_once(&s);
    });
    let s = shared.clone();
    add_mouse_listener(&shared.document, BTN_NO, "click", move |ev| {
        ev.prevent_default();
        s.pointer
            .borrow_mut()
            .record(ev.client_x() as f32, ev.client_y() as f32);
        poll_once(&s);
    });
}

fn add_mouse_listener(
    document: &web::Document,
    element_id: &str,
    kind: &str,
    mut handler: impl FnMut(web::MouseEvent) + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = wasm_bindgen::closure::Closure::wrap(
            Box::new(move |ev: web::MouseEvent| handler(ev)) as Box<dyn FnMut(web::MouseEvent)>,
        );
        _ = el.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
