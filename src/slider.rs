//! Love-meter wiring: slider input drives the message tier, a release at
//! maximum fires the ball drop exactly once; the flow advances when the
//! ball lands (frame loop).

use crate::core::{BallDrop, MeterTier};
use crate::{dom, overlay, Shared};
use rand::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

const SLIDER: &str = "love-slider";

pub fn wire_slider(shared: &Shared) {
    let Some(slider) = slider_element(&shared.document) else {
        return;
    };

    {
        let s = shared.clone();
        let slider_input = slider.clone();
        add_listener(&slider, "input", move || {
            let value = slider_input.value().parse::<u32>().unwrap_or(0);
            let tier = s.meter.borrow_mut().set_value(value);
            dom::set_attr(&s.document, "meter-message", "data-tier", tier_name(tier));
        });
    }

    for kind in ["change", "pointerup", "touchend"] {
        let s = shared.clone();
        add_listener(&slider, kind, move || release(&s));
    }
}

fn release(shared: &Shared) {
    if !shared.meter.borrow_mut().release() {
        return;
    }
    log::info!("[flow] meter released at max, dropping ball");
    let mut rng = StdRng::seed_from_u64(js_sys::Date::now() as u64);
    *shared.ball.borrow_mut() = Some(BallDrop::new(&mut rng));
    overlay::show(&shared.document, "meter-ball");

    if let Some(rect) = dom::measure_rect(&shared.document, "meter-ball") {
        shared
            .particles
            .borrow_mut()
            .burst(rect.center(), crate::constants::CONFETTI_BURST_COUNT);
    }
}

fn tier_name(tier: MeterTier) -> &'static str {
    match tier {
        MeterTier::Start => "start",
        MeterTier::Warm => "warm",
        MeterTier::Strong => "strong",
        MeterTier::Intense => "intense",
        MeterTier::Max => "max",
    }
}

fn slider_element(document: &web::Document) -> Option<web::HtmlInputElement> {
    document
        .get_element_by_id(SLIDER)?
        .dyn_into::<web::HtmlInputElement>()
        .ok()
}

fn add_listener(
    target: &web::HtmlInputElement,
    kind: &str,
    mut handler: impl FnMut() + 'static,
) {
    let closure =
        wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
    _ = target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
    closure.forget();
}
