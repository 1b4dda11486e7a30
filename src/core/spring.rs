use glam::Vec2;

// Position/speed window under which a spring counts as settled
pub const SETTLE_DISTANCE: f32 = 0.5;
pub const SETTLE_SPEED: f32 = 10.0;

// Integration guard for background-tab frame gaps
const MAX_STEP_SEC: f32 = 0.05;

/// Spring tuning. `max_duration` bounds the transition; whatever is left at
/// the deadline snaps to the target.
#[derive(Clone, Copy, Debug)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
    pub max_duration: f32,
}

impl SpringConfig {
    pub fn escape() -> Self {
        Self {
            stiffness: 200.0,
            damping: 15.0,
            mass: 0.2,
            max_duration: 0.25,
        }
    }

    // Touch flees run slightly softer and longer (no hover pre-warning)
    pub fn escape_touch() -> Self {
        Self {
            stiffness: 180.0,
            damping: 15.0,
            mass: 0.25,
            max_duration: 0.3,
        }
    }

    // Stiffer and shorter: used when hauling the target back on screen
    pub fn snap_back() -> Self {
        Self {
            stiffness: 250.0,
            damping: 15.0,
            mass: 0.2,
            max_duration: 0.2,
        }
    }
}

/// Damped 2D spring integrated with semi-implicit Euler.
#[derive(Clone, Copy, Debug)]
pub struct Spring2 {
    pub pos: Vec2,
    pub vel: Vec2,
    pub target: Vec2,
    cfg: SpringConfig,
    elapsed: f32,
    done: bool,
}

impl Spring2 {
    pub fn new(from: Vec2, to: Vec2, cfg: SpringConfig) -> Self {
        Self {
            pos: from,
            vel: Vec2::ZERO,
            target: to,
            cfg,
            elapsed: 0.0,
            done: false,
        }
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Advance by `dt` seconds; returns true once the spring has finished.
    pub fn step(&mut self, dt: f32) -> bool {
        if self.done {
            return true;
        }
        let dt = dt.clamp(0.0, MAX_STEP_SEC);
        let k = self.cfg.stiffness;
        let c = self.cfg.damping;
        let inv_m = 1.0 / self.cfg.mass.max(1e-6);
        let accel = ((self.target - self.pos) * k - self.vel * c) * inv_m;
        self.vel += accel * dt;
        self.pos += self.vel * dt;
        self.elapsed += dt;

        let settled = self.pos.distance(self.target) < SETTLE_DISTANCE
            && self.vel.length() < SETTLE_SPEED;
        if settled || self.elapsed >= self.cfg.max_duration {
            self.pos = self.target;
            self.vel = Vec2::ZERO;
            self.done = true;
        }
        self.done
    }
}
