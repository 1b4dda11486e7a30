use crate::core::{Rect, Viewport};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn viewport() -> Option<Viewport> {
    let w = web::window()?;
    let width = w.inner_width().ok()?.as_f64()?;
    let height = w.inner_height().ok()?.as_f64()?;
    Some(Viewport::new(width as f32, height as f32))
}

/// Bounding rect of an element by id, in viewport px. `None` while the
/// element is missing or not yet laid out (zero size).
pub fn measure_rect(document: &web::Document, element_id: &str) -> Option<Rect> {
    let el = document.get_element_by_id(element_id)?;
    let r = el.get_bounding_client_rect();
    if r.width() <= 0.0 || r.height() <= 0.0 {
        return None;
    }
    Some(Rect::new(
        r.left() as f32,
        r.top() as f32,
        r.width() as f32,
        r.height() as f32,
    ))
}

#[inline]
pub fn html_element(document: &web::Document, element_id: &str) -> Option<web::HtmlElement> {
    document
        .get_element_by_id(element_id)?
        .dyn_into::<web::HtmlElement>()
        .ok()
}

/// Pin an element at absolute viewport coordinates (the "fixed" state of the
/// protected button).
pub fn set_fixed_position(el: &web::HtmlElement, left: f32, top: f32) {
    let style = el.style();
    _ = style.set_property("position", "fixed");
    _ = style.set_property("left", &format!("{left:.1}px"));
    _ = style.set_property("top", &format!("{top:.1}px"));
    _ = style.set_property("transform", "none");
}

/// Return an element to its default layout-relative position.
pub fn clear_fixed_position(el: &web::HtmlElement) {
    let style = el.style();
    _ = style.remove_property("position");
    _ = style.remove_property("left");
    _ = style.remove_property("top");
    _ = style.remove_property("transform");
}

pub fn set_scale(el: &web::HtmlElement, scale: f32) {
    _ = el.style().set_property("transform", &format!("scale({scale:.2})"));
}

#[inline]
pub fn set_text(document: &web::Document, element_id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        el.set_text_content(Some(text));
    }
}

#[inline]
pub fn set_attr(document: &web::Document, element_id: &str, name: &str, value: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        _ = el.set_attribute(name, value);
    }
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// `<meta name="...">` content from the served page; carries gateway config.
pub fn meta_content(document: &web::Document, name: &str) -> Option<String> {
    let el = document
        .query_selector(&format!("meta[name=\"{name}\"]"))
        .ok()??;
    el.get_attribute("content").filter(|c| !c.is_empty())
}

// Haptics via Reflect so a browser without the API is a silent no-op.
pub fn vibrate(duration_ms: i32) {
    vibrate_value(&wasm_bindgen::JsValue::from(duration_ms));
}

pub fn vibrate_pattern(pattern: &[i32]) {
    let arr = js_sys::Array::new();
    for ms in pattern {
        arr.push(&wasm_bindgen::JsValue::from(*ms));
    }
    vibrate_value(&arr.into());
}

fn vibrate_value(pattern: &wasm_bindgen::JsValue) {
    let Some(w) = web::window() else { return };
    let navigator = w.navigator();
    if let Ok(f) = js_sys::Reflect::get(&navigator, &"vibrate".into()) {
        if let Some(f) = f.dyn_ref::<js_sys::Function>() {
            _ = f.call1(&navigator, pattern);
        }
    }
}

pub fn copy_to_clipboard(text: &str) {
    if let Some(w) = web::window() {
        let clipboard = w.navigator().clipboard();
        let _promise = clipboard.write_text(text);
    }
}

pub fn local_storage_get(key: &str) -> Option<String> {
    web::window()?.local_storage().ok()??.get_item(key).ok()?
}

pub fn local_storage_set(key: &str, value: &str) {
    if let Some(Ok(Some(storage))) = web::window().map(|w| w.local_storage()) {
        _ = storage.set_item(key, value);
    }
}

/// Strip the query string without a navigation (used after a bad share code).
pub fn strip_query() {
    if let Some(w) = web::window() {
        if let Ok(history) = w.history() {
            _ = history.replace_state_with_url(
                &wasm_bindgen::JsValue::NULL,
                "",
                Some("/"),
            );
        }
    }
}
