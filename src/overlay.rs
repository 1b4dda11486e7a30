//! Panel and banner visibility. All copy text lives in the served page;
//! this layer only toggles elements by id.

use web_sys as web;

pub const PANEL_CREATOR: &str = "panel-creator";
pub const PANEL_QUESTION: &str = "panel-question";
pub const PANEL_REVEAL: &str = "panel-reveal";
pub const PANEL_METER: &str = "panel-meter";
pub const PANEL_CELEBRATION: &str = "panel-celebration";
pub const PANEL_SHARE: &str = "panel-share";

const ALL_PANELS: [&str; 6] = [
    PANEL_CREATOR,
    PANEL_QUESTION,
    PANEL_REVEAL,
    PANEL_METER,
    PANEL_CELEBRATION,
    PANEL_SHARE,
];

#[inline]
pub fn show(document: &web::Document, element_id: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let cl = el.class_list();
        _ = cl.remove_1("hidden");
        // fallback for environments without CSS class
        _ = el.set_attribute("style", "");
    }
}

#[inline]
pub fn hide(document: &web::Document, element_id: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let cl = el.class_list();
        _ = cl.add_1("hidden");
        // fallback
        _ = el.set_attribute("style", "display:none");
    }
}

/// Show exactly one stage panel.
pub fn show_only(document: &web::Document, panel_id: &str) {
    for id in ALL_PANELS {
        if id == panel_id {
            show(document, id);
        } else {
            hide(document, id);
        }
    }
}

/// Inline error under the creator form; one message at a time.
pub fn show_error(document: &web::Document, message: &str) {
    if let Some(el) = document.get_element_by_id("creator-error") {
        el.set_text_content(Some(message));
    }
    show(document, "creator-error");
}

pub fn clear_error(document: &web::Document) {
    if let Some(el) = document.get_element_by_id("creator-error") {
        el.set_text_content(None);
    }
    hide(document, "creator-error");
}

/// One-time banner shown when a share code does not resolve.
pub fn show_alert(document: &web::Document) {
    show(document, "alert-banner");
}
