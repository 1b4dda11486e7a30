// Evasive target controller: keeps a protected element away from the
// pointer while confining it to the viewport and escaping corner traps.

use glam::Vec2;
use rand::prelude::*;

// Proximity thresholds per input kind (touch has no hover pre-warning)
pub const FLEE_DISTANCE_POINTER: f32 = 150.0;
pub const FLEE_DISTANCE_TOUCH: f32 = 100.0;

// Escape geometry
pub const EDGE_PADDING: f32 = 50.0;
pub const MIN_RUN_DISTANCE: f32 = 120.0;
pub const MAX_RUN_DISTANCE: f32 = 200.0;
pub const CORNER_THRESHOLD: f32 = 100.0;

// Out-of-viewport recovery
pub const OOB_TOLERANCE: f32 = 10.0;
pub const RECOVERY_BAND: f32 = 0.6; // central fraction of each viewport axis

/// Axis-aligned rectangle in viewport pixels (top-left origin).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width * 0.5, self.top + self.height * 0.5)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    #[inline]
    pub fn with_origin(&self, origin: Vec2) -> Self {
        Self {
            left: origin.x,
            top: origin.y,
            ..*self
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Tuning for one controller instance. Pointer and touch share the same
/// algorithm; only the numbers differ.
#[derive(Clone, Copy, Debug)]
pub struct FleeParams {
    pub flee_distance: f32,
    pub padding: f32,
    pub min_run: f32,
    pub max_run: f32,
    pub corner_threshold: f32,
    pub oob_tolerance: f32,
}

impl FleeParams {
    pub fn pointer() -> Self {
        Self {
            flee_distance: FLEE_DISTANCE_POINTER,
            padding: EDGE_PADDING,
            min_run: MIN_RUN_DISTANCE,
            max_run: MAX_RUN_DISTANCE,
            corner_threshold: CORNER_THRESHOLD,
            oob_tolerance: OOB_TOLERANCE,
        }
    }

    pub fn touch() -> Self {
        Self {
            flee_distance: FLEE_DISTANCE_TOUCH,
            ..Self::pointer()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FleeKind {
    Escape,
    CornerEscape,
    SnapBack,
}

/// A decision to move the target; the caller animates the transition.
#[derive(Clone, Copy, Debug)]
pub struct Reposition {
    pub rect: Rect,
    pub kind: FleeKind,
}

// Corner trap: near two perpendicular edges at once, pointer-independent.
#[inline]
pub fn is_in_corner(rect: Rect, vp: Viewport, threshold: f32) -> bool {
    let near_left = rect.left < threshold;
    let near_right = rect.left + rect.width > vp.width - threshold;
    let near_top = rect.top < threshold;
    let near_bottom = rect.top + rect.height > vp.height - threshold;
    (near_left || near_right) && (near_top || near_bottom)
}

#[inline]
pub fn is_out_of_viewport(rect: Rect, vp: Viewport, tolerance: f32) -> bool {
    rect.left < -tolerance
        || rect.top < -tolerance
        || rect.left + rect.width > vp.width + tolerance
        || rect.top + rect.height > vp.height + tolerance
}

// Clamp a top-left origin so the whole rect stays inside the padded viewport.
#[inline]
pub fn clamp_origin(origin: Vec2, size: Vec2, vp: Viewport, padding: f32) -> Vec2 {
    let max_x = (vp.width - size.x - padding).max(padding);
    let max_y = (vp.height - size.y - padding).max(padding);
    Vec2::new(origin.x.clamp(padding, max_x), origin.y.clamp(padding, max_y))
}

pub struct EvadeController {
    pub params: FleeParams,
    rng: StdRng,
    fleeing: bool,
}

impl EvadeController {
    pub fn new(params: FleeParams, seed: u64) -> Self {
        Self {
            params,
            rng: StdRng::seed_from_u64(seed),
            fleeing: false,
        }
    }

    #[inline]
    pub fn is_fleeing(&self) -> bool {
        self.fleeing
    }

    /// Proximity check, run on a fixed polling interval. Returns a move when
    /// the pointer is inside the flee window; a missing pointer sample or an
    /// unmeasurable target is a silent no-op.
    pub fn poll(
        &mut self,
        pointer: Option<Vec2>,
        target: Option<Rect>,
        vp: Viewport,
    ) -> Option<Reposition> {
        if self.fleeing {
            return None;
        }
        let (pointer, rect) = match (pointer, target) {
            (Some(p), Some(r)) => (p, r),
            _ => return None,
        };
        let dist = pointer.distance(rect.center());
        // dist == 0 would degenerate into repositioning onto the pointer
        if dist <= 0.0 || dist >= self.params.flee_distance {
            return None;
        }
        let moved = if is_in_corner(rect, vp, self.params.corner_threshold) {
            Reposition {
                rect: rect.with_origin(self.random_origin(rect.size(), vp)),
                kind: FleeKind::CornerEscape,
            }
        } else {
            Reposition {
                rect: rect.with_origin(self.escape_origin(pointer, rect, vp)),
                kind: FleeKind::Escape,
            }
        };
        self.fleeing = true;
        Some(moved)
    }

    /// Periodic recovery check: a rect outside the viewport beyond the
    /// tolerance is snapped back into the central band.
    pub fn check_viewport(&mut self, target: Option<Rect>, vp: Viewport) -> Option<Reposition> {
        if self.fleeing {
            return None;
        }
        let rect = target?;
        if !is_out_of_viewport(rect, vp, self.params.oob_tolerance) {
            return None;
        }
        let moved = Reposition {
            rect: rect.with_origin(self.recovery_origin(rect.size(), vp)),
            kind: FleeKind::SnapBack,
        };
        self.fleeing = true;
        Some(moved)
    }

    /// Animation finished and the settle cooldown elapsed.
    pub fn settle(&mut self) {
        self.fleeing = false;
    }

    /// Stage teardown: any in-flight flee is superseded.
    pub fn reset(&mut self) {
        self.fleeing = false;
    }

    // Directional escape: away from the pointer, angle perturbed within
    // +/-90 degrees, run distance drawn so the post-move distance stays at
    // or above the flee threshold before clamping.
    fn escape_origin(&mut self, pointer: Vec2, rect: Rect, vp: Viewport) -> Vec2 {
        let center = rect.center();
        let away = center - pointer;
        let base = away.y.atan2(away.x);
        let angle = base + (self.rng.gen::<f32>() - 0.5) * std::f32::consts::PI;
        let lo = self.params.min_run.max(self.params.flee_distance);
        let run = if lo < self.params.max_run {
            self.rng.gen_range(lo..self.params.max_run)
        } else {
            lo
        };
        let target = center + Vec2::new(angle.cos(), angle.sin()) * run;
        clamp_origin(target - rect.size() * 0.5, rect.size(), vp, self.params.padding)
    }

    // Fully random placement anywhere in the padded viewport, used for
    // corner traps where a directional escape would oscillate.
    fn random_origin(&mut self, size: Vec2, vp: Viewport) -> Vec2 {
        let p = self.params.padding;
        let max_x = (vp.width - size.x - p).max(p);
        let max_y = (vp.height - size.y - p).max(p);
        Vec2::new(
            p + self.rng.gen::<f32>() * (max_x - p),
            p + self.rng.gen::<f32>() * (max_y - p),
        )
    }

    // Random placement inside the central band of the viewport.
    fn recovery_origin(&mut self, size: Vec2, vp: Viewport) -> Vec2 {
        let margin = (1.0 - RECOVERY_BAND) * 0.5;
        let span_x = (vp.width * RECOVERY_BAND - size.x).max(0.0);
        let span_y = (vp.height * RECOVERY_BAND - size.y).max(0.0);
        Vec2::new(
            vp.width * margin + self.rng.gen::<f32>() * span_x,
            vp.height * margin + self.rng.gen::<f32>() * span_y,
        )
    }
}
