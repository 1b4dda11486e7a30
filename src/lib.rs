#![cfg(target_arch = "wasm32")]
use crate::core::{
    BallDrop, EvadeController, FleeParams, FlowEngine, MeterState, ParticleSystem, Phase,
    ScratchMask, ShareCode, SHARE_PARAM,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod core;
mod creator;
mod dom;
mod events;
mod frame;
mod gateway;
mod input;
mod overlay;
mod reveal;
mod slider;

/// Per-experience state shared between event wiring and the frame loop.
/// Everything lives on the single UI thread behind `Rc<RefCell<…>>`.
#[derive(Clone)]
pub(crate) struct Shared {
    pub document: web::Document,
    pub flow: Rc<RefCell<FlowEngine>>,
    pub controller: Rc<RefCell<EvadeController>>,
    pub pointer: Rc<RefCell<input::PointerState>>,
    pub active_flee: Rc<RefCell<Option<frame::ActiveFlee>>>,
    pub ball: Rc<RefCell<Option<BallDrop>>>,
    pub meter: Rc<RefCell<MeterState>>,
    pub particles: Rc<RefCell<ParticleSystem>>,
    pub mask: Rc<RefCell<Option<ScratchMask>>>,
    pub registry: Rc<RefCell<events::IntervalRegistry>>,
    pub images: Rc<Vec<String>>,
    pub touch: bool,
}

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("valentine-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let gateway = Rc::new(gateway::Gateway::from_meta(&document)?);
    creator::wire_creator(&document, gateway.clone());

    let search = window.location().search().unwrap_or_default();
    let Some(raw_code) = core::query_param(&search, SHARE_PARAM) else {
        overlay::show_only(&document, overlay::PANEL_CREATOR);
        return Ok(());
    };

    let code = match ShareCode::parse(&raw_code) {
        Ok(code) => code,
        Err(e) => {
            log::warn!("[gateway] bad share code: {e}");
            reject_link(&document);
            return Ok(());
        }
    };

    match gateway.get_record_by_key(code.as_str()).await {
        Ok(Some(record)) => {
            log::info!(
                "[gateway] record {} loaded, {} photos, {} views",
                code,
                record.image_urls.len(),
                record.view_count
            );
            // analytics only: a failed bump must not break the experience
            let gateway_bump = gateway.clone();
            let views = record.view_count;
            let code_bump = code.clone();
            spawn_local(async move {
                if let Err(e) = gateway_bump
                    .increment_view_count(code_bump.as_str(), views)
                    .await
                {
                    log::warn!("[gateway] view count bump failed: {e:#}");
                }
            });
            enter_experience(&document, record)?;
        }
        Ok(None) => {
            log::warn!("[gateway] share code {code} not found");
            reject_link(&document);
        }
        Err(e) => {
            log::warn!("[gateway] lookup failed: {e:#}");
            reject_link(&document);
        }
    }
    Ok(())
}

/// Missing or invalid share code: one-time alert, clean URL, creator mode.
fn reject_link(document: &web::Document) {
    overlay::show_alert(document);
    dom::strip_query();
    overlay::show_only(document, overlay::PANEL_CREATOR);
}

fn enter_experience(
    document: &web::Document,
    record: core::GreetingRecord,
) -> anyhow::Result<()> {
    let touch = web::window()
        .map(|w| w.navigator().max_touch_points() > 0)
        .unwrap_or(false);
    let params = if touch {
        FleeParams::touch()
    } else {
        FleeParams::pointer()
    };
    let seed = js_sys::Date::now() as u64;

    dom::set_text(document, "partner-name-display", &record.partner_name);

    let shared = Shared {
        document: document.clone(),
        flow: Rc::new(RefCell::new(FlowEngine::new(record.image_urls.len()))),
        controller: Rc::new(RefCell::new(EvadeController::new(params, seed))),
        pointer: Rc::new(RefCell::new(input::PointerState::default())),
        active_flee: Rc::new(RefCell::new(None)),
        ball: Rc::new(RefCell::new(None)),
        meter: Rc::new(RefCell::new(MeterState::default())),
        particles: Rc::new(RefCell::new(ParticleSystem::new(seed ^ 0x9E37_79B9_7F4A_7C15))),
        mask: Rc::new(RefCell::new(None)),
        registry: Rc::new(RefCell::new(events::IntervalRegistry::default())),
        images: Rc::new(record.image_urls),
        touch,
    };

    if touch {
        events::wire_touch_tracking(&shared);
        events::wire_touch_evasion(&shared);
    } else {
        events::wire_pointer_tracking(&shared);
        events::wire_pointer_evasion(&shared);
    }

    // accept control: the only way forward through the questions
    {
        let s = shared.clone();
        dom::add_click_listener(document, events::pointer::BTN_YES, move || {
            if s.flow.borrow().phase != Phase::Question {
                return;
            }
            s.flow.borrow_mut().accept();
            apply_phase(&s);
        });
    }

    reveal::wire_reveal(&shared);
    slider::wire_slider(&shared);
    apply_phase(&shared);

    let fx_canvas = document
        .get_element_by_id("fx-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #fx-canvas"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("{e:?}"))?;
    wire_canvas_resize(&fx_canvas);
    let fx_ctx = fx_canvas
        .get_context("2d")
        .ok()
        .flatten()
        .ok_or_else(|| anyhow::anyhow!("no 2d context on #fx-canvas"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|e| anyhow::anyhow!("{e:?}"))?;

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(
        shared,
        fx_canvas,
        fx_ctx,
        seed.rotate_left(17),
    )));
    frame::start_loop(frame_ctx);
    Ok(())
}

/// Bring the page in line with the flow state. Every stage change resets the
/// protected button to its default position and the accept scale to 1.
pub(crate) fn apply_phase(shared: &Shared) {
    let (phase, stage) = {
        let flow = shared.flow.borrow();
        (flow.phase, flow.stage)
    };
    let document = &shared.document;

    *shared.active_flee.borrow_mut() = None;
    shared.controller.borrow_mut().reset();
    // stale samples from the previous stage must not instantly re-trigger
    shared.pointer.borrow_mut().clear();
    if let Some(el) = dom::html_element(document, events::pointer::BTN_NO) {
        dom::clear_fixed_position(&el);
    }
    if let Some(yes) = dom::html_element(document, events::pointer::BTN_YES) {
        dom::set_scale(&yes, 1.0);
    }

    match phase {
        Phase::Question => {
            dom::set_attr(
                document,
                overlay::PANEL_QUESTION,
                "data-stage",
                &stage.to_string(),
            );
            overlay::show_only(document, overlay::PANEL_QUESTION);
        }
        Phase::Reveal => {
            overlay::show_only(document, overlay::PANEL_REVEAL);
            reveal::enter_reveal(shared);
        }
        Phase::Meter => {
            shared.meter.borrow_mut().reset();
            // past the questions: the evasion timers have nothing left to do
            shared.registry.borrow_mut().cancel("evade-poll");
            shared.registry.borrow_mut().cancel("evade-viewport");
            overlay::show_only(document, overlay::PANEL_METER);
        }
        Phase::Celebration => {
            shared.registry.borrow_mut().clear_all();
            overlay::show_only(document, overlay::PANEL_CELEBRATION);
        }
    }
    log::info!("[flow] phase {:?} stage {}", phase, stage);
}
