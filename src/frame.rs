use crate::constants::*;
use crate::core::{ParticleKind, Phase, Spring2};
use crate::events::pointer::BTN_NO;
use crate::{dom, Shared};
use instant::Instant;
use rand::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// One in-flight reposition of the protected button. The spring runs to
/// completion, then the settle cooldown elapses before the controller is
/// released for the next trigger.
pub struct ActiveFlee {
    spring: Spring2,
    cooldown: f32,
}

impl ActiveFlee {
    pub fn new(spring: Spring2, cooldown: f32) -> Self {
        Self { spring, cooldown }
    }
}

pub struct FrameContext {
    pub shared: Shared,
    pub fx_canvas: web::HtmlCanvasElement,
    pub fx_ctx: web::CanvasRenderingContext2d,
    pub last_instant: Instant,
    pub rng: StdRng,
    confetti_timer: f32,
    heart_timer: f32,
}

impl FrameContext {
    pub fn new(
        shared: Shared,
        fx_canvas: web::HtmlCanvasElement,
        fx_ctx: web::CanvasRenderingContext2d,
        seed: u64,
    ) -> Self {
        Self {
            shared,
            fx_canvas,
            fx_ctx,
            last_instant: Instant::now(),
            rng: StdRng::seed_from_u64(seed),
            confetti_timer: 0.0,
            heart_timer: 0.0,
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_instant).as_secs_f32().min(0.1);
        self.last_instant = now;

        self.drive_flee(dt);
        self.sample_trail();
        self.drive_celebration(dt);
        self.drive_ball(dt);

        self.shared.particles.borrow_mut().step(dt);
        self.paint();
    }

    fn drive_flee(&mut self, dt: f32) {
        let mut slot = self.shared.active_flee.borrow_mut();
        let Some(active) = slot.as_mut() else { return };
        if !active.spring.is_done() {
            active.spring.step(dt);
            if let Some(el) = dom::html_element(&self.shared.document, BTN_NO) {
                dom::set_fixed_position(&el, active.spring.pos.x, active.spring.pos.y);
            }
            return;
        }
        active.cooldown -= dt;
        if active.cooldown <= 0.0 {
            *slot = None;
            self.shared.controller.borrow_mut().settle();
        }
    }

    fn sample_trail(&mut self) {
        let pointer = self.shared.pointer.borrow();
        let Some(pos) = pointer.pos else { return };
        let speed = pointer.speed();
        drop(pointer);
        self.shared.particles.borrow_mut().sample_trail(pos, speed);
    }

    fn drive_celebration(&mut self, dt: f32) {
        if self.shared.flow.borrow().phase != Phase::Celebration {
            return;
        }
        let Some(vp) = dom::viewport() else { return };
        self.confetti_timer += dt;
        if self.confetti_timer >= CONFETTI_BURST_EVERY {
            self.confetti_timer = 0.0;
            let origin = glam::Vec2::new(
                self.rng.gen::<f32>() * vp.width,
                self.rng.gen::<f32>() * vp.height * 0.5,
            );
            self.shared
                .particles
                .borrow_mut()
                .burst(origin, CONFETTI_BURST_COUNT);
        }
        self.heart_timer += dt;
        if self.heart_timer >= HEART_SPAWN_EVERY {
            self.heart_timer = 0.0;
            let x = self.rng.gen::<f32>() * vp.width;
            self.shared
                .particles
                .borrow_mut()
                .float_heart(x, vp.height + 20.0);
        }
    }

    fn drive_ball(&mut self, dt: f32) {
        let done = {
            let mut slot = self.shared.ball.borrow_mut();
            let Some(ball) = slot.as_mut() else { return };
            let done = ball.step(dt);
            let sample = ball.sample();
            if let Some(el) = dom::html_element(&self.shared.document, "meter-ball") {
                let Some(vp) = dom::viewport() else { return };
                let fall_px = sample.fall_frac * vp.height;
                _ = el.style().set_property(
                    "transform",
                    &format!(
                        "translate({:.1}px, {:.1}px) rotate({:.0}deg)",
                        sample.x_offset, fall_px, sample.rotation_deg
                    ),
                );
            }
            if done {
                *slot = None;
            }
            done
        };
        if done {
            self.shared.flow.borrow_mut().meter_done();
            crate::apply_phase(&self.shared);
        }
    }

    fn paint(&mut self) {
        let canvas = &self.fx_canvas;
        let ctx = &self.fx_ctx;
        let dpr = web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
        _ = ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
        ctx.clear_rect(
            0.0,
            0.0,
            canvas.width() as f64 / dpr,
            canvas.height() as f64 / dpr,
        );

        let particles = self.shared.particles.borrow();
        for p in &particles.particles {
            ctx.set_global_alpha(p.life.clamp(0.0, 1.0) as f64);
            match p.kind {
                ParticleKind::Trail => {
                    ctx.set_fill_style_str(&format!("hsl({:.0}, 100%, 70%)", p.hue));
                    ctx.begin_path();
                    _ = ctx.arc(
                        p.pos.x as f64,
                        p.pos.y as f64,
                        (p.size * 0.5) as f64,
                        0.0,
                        std::f64::consts::TAU,
                    );
                    ctx.fill();
                }
                ParticleKind::Confetti => {
                    ctx.save();
                    _ = ctx.translate(p.pos.x as f64, p.pos.y as f64);
                    _ = ctx.rotate(p.spin as f64);
                    ctx.set_fill_style_str(&format!("hsl({:.0}, 90%, 60%)", p.hue));
                    let s = p.size as f64;
                    ctx.fill_rect(-s * 0.5, -s * 0.25, s, s * 0.5);
                    ctx.restore();
                }
                ParticleKind::Heart => {
                    ctx.set_fill_style_str(&format!("hsl({:.0}, 90%, 65%)", p.hue));
                    ctx.set_font(&format!("{:.0}px serif", p.size));
                    _ = ctx.fill_text("\u{2665}", p.pos.x as f64, p.pos.y as f64);
                }
            }
        }
        ctx.set_global_alpha(1.0);
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let Some(w) = web::window() {
            _ = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        _ = w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}
