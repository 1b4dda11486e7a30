//! Scratch-to-reveal wiring. The canvas only paints; the pure coverage mask
//! decides when the photo counts as revealed.

use crate::core::{Phase, ScratchMask, BRUSH_RADIUS_POINTER, BRUSH_RADIUS_TOUCH};
use crate::{dom, overlay, Shared};
use rand::prelude::*;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

const SCRATCH_CANVAS: &str = "scratch-canvas";
const COVER_COLOR: &str = "#C0C0C0";
const TEXTURE_COLOR: &str = "#D3D3D3";

/// Entering the reveal phase: point the photo at this stage's image and
/// repaint the cover with a fresh mask.
pub fn enter_reveal(shared: &Shared) {
    let stage = shared.flow.borrow().stage;
    if let Some(url) = shared.images.get(stage) {
        dom::set_attr(&shared.document, "reveal-photo", "src", url);
    }
    overlay::hide(&shared.document, "btn-continue");

    let Some(canvas) = canvas_element(&shared.document) else {
        return;
    };
    let rect = canvas.get_bounding_client_rect();
    let (w, h) = (rect.width().max(1.0), rect.height().max(1.0));
    canvas.set_width(w as u32);
    canvas.set_height(h as u32);
    _ = canvas.style().remove_property("opacity");

    if let Some(ctx) = context_2d(&canvas) {
        paint_cover(&ctx, w, h);
    }
    *shared.mask.borrow_mut() = Some(ScratchMask::new(w as f32, h as f32));
}

pub fn wire_reveal(shared: &Shared) {
    let Some(canvas) = canvas_element(&shared.document) else {
        return;
    };
    let scratching = Rc::new(Cell::new(false));

    {
        let scratching = scratching.clone();
        add_pointer_listener(&canvas, "pointerdown", move |_| scratching.set(true));
    }
    for kind in ["pointerup", "pointerleave"] {
        let scratching = scratching.clone();
        add_pointer_listener(&canvas, kind, move |_| scratching.set(false));
    }
    {
        let s = shared.clone();
        let canvas_move = canvas.clone();
        add_pointer_listener(&canvas, "pointermove", move |ev| {
            if !scratching.get() {
                return;
            }
            scratch_at(&s, &canvas_move, &ev);
        });
    }

    for id in ["btn-continue", "btn-skip"] {
        let s = shared.clone();
        dom::add_click_listener(&shared.document, id, move || {
            if s.flow.borrow().phase != Phase::Reveal {
                return;
            }
            s.flow.borrow_mut().advance();
            crate::apply_phase(&s);
        });
    }
}

fn scratch_at(shared: &Shared, canvas: &web::HtmlCanvasElement, ev: &web::PointerEvent) {
    let rect = canvas.get_bounding_client_rect();
    let x = ev.client_x() as f32 - rect.left() as f32;
    let y = ev.client_y() as f32 - rect.top() as f32;
    let radius = if shared.touch {
        BRUSH_RADIUS_TOUCH
    } else {
        BRUSH_RADIUS_POINTER
    };

    if let Some(ctx) = context_2d(canvas) {
        ctx.set_global_composite_operation("destination-out").ok();
        ctx.begin_path();
        _ = ctx.arc(x as f64, y as f64, radius as f64, 0.0, std::f64::consts::TAU);
        ctx.fill();
    }

    let revealed = {
        let mut mask = shared.mask.borrow_mut();
        let Some(mask) = mask.as_mut() else { return };
        mask.scratch(x, y, radius);
        mask.is_revealed()
    };
    if revealed {
        _ = canvas.style().set_property("opacity", "0");
        overlay::show(&shared.document, "btn-continue");
    }
}

fn paint_cover(ctx: &web::CanvasRenderingContext2d, w: f64, h: f64) {
    ctx.set_fill_style_str(COVER_COLOR);
    ctx.fill_rect(0.0, 0.0, w, h);
    // light texture dots so the cover reads as scratchable foil
    let mut rng = StdRng::seed_from_u64(js_sys::Date::now() as u64);
    ctx.set_fill_style_str(TEXTURE_COLOR);
    let dots = ((w * h) / 600.0) as usize;
    for _ in 0..dots {
        let x = rng.gen::<f64>() * w;
        let y = rng.gen::<f64>() * h;
        ctx.begin_path();
        _ = ctx.arc(x, y, 1.0 + rng.gen::<f64>() * 2.0, 0.0, std::f64::consts::TAU);
        ctx.fill();
    }
}

fn canvas_element(document: &web::Document) -> Option<web::HtmlCanvasElement> {
    document
        .get_element_by_id(SCRATCH_CANVAS)?
        .dyn_into::<web::HtmlCanvasElement>()
        .ok()
}

fn context_2d(canvas: &web::HtmlCanvasElement) -> Option<web::CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()??
        .dyn_into::<web::CanvasRenderingContext2d>()
        .ok()
}

fn add_pointer_listener(
    canvas: &web::HtmlCanvasElement,
    kind: &str,
    mut handler: impl FnMut(web::PointerEvent) + 'static,
) {
    let closure = wasm_bindgen::closure::Closure::wrap(
        Box::new(move |ev: web::PointerEvent| handler(ev)) as Box<dyn FnMut(web::PointerEvent)>,
    );
    _ = canvas.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
    closure.forget();
}
