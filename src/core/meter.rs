use rand::prelude::*;

pub const METER_MAX: u32 = 10_000;

// Message tier thresholds (copy text lives in the page)
pub const TIER_WARM: u32 = 1_000;
pub const TIER_STRONG: u32 = 2_000;
pub const TIER_INTENSE: u32 = 5_000;

// Falling-ball animation
pub const BALL_FALL_SEC: f32 = 2.5;
pub const BALL_DRIFT_MAX: f32 = 150.0;
pub const BALL_SPIN_BASE_DEG: f32 = 720.0;
pub const BALL_SPIN_EXTRA_DEG: f32 = 360.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeterTier {
    Start,
    Warm,
    Strong,
    Intense,
    Max,
}

#[inline]
pub fn tier_for(value: u32) -> MeterTier {
    match value {
        v if v >= METER_MAX => MeterTier::Max,
        v if v >= TIER_INTENSE => MeterTier::Intense,
        v if v >= TIER_STRONG => MeterTier::Strong,
        v if v >= TIER_WARM => MeterTier::Warm,
        _ => MeterTier::Start,
    }
}

/// Slider state. The meter arms at the maximum value and fires exactly once
/// on release.
#[derive(Debug, Default)]
pub struct MeterState {
    pub value: u32,
    fired: bool,
}

impl MeterState {
    pub fn set_value(&mut self, value: u32) -> MeterTier {
        self.value = value.min(METER_MAX);
        tier_for(self.value)
    }

    #[inline]
    pub fn at_max(&self) -> bool {
        self.value >= METER_MAX
    }

    /// Release at maximum triggers the drop; further releases are no-ops.
    pub fn release(&mut self) -> bool {
        if self.at_max() && !self.fired {
            self.fired = true;
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.value = 0;
        self.fired = false;
    }
}

/// One gravity-shaped ball drop: quadratic fall, linear drift and spin.
#[derive(Clone, Copy, Debug)]
pub struct BallDrop {
    drift: f32,
    spin_deg: f32,
    duration: f32,
    elapsed: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BallSample {
    /// Horizontal offset from the drop origin, px.
    pub x_offset: f32,
    /// Fraction of the fall height covered, 0..=1.
    pub fall_frac: f32,
    pub rotation_deg: f32,
}

impl BallDrop {
    pub fn new(rng: &mut impl Rng) -> Self {
        Self {
            drift: (rng.gen::<f32>() - 0.5) * 2.0 * BALL_DRIFT_MAX,
            spin_deg: BALL_SPIN_BASE_DEG + rng.gen::<f32>() * BALL_SPIN_EXTRA_DEG,
            duration: BALL_FALL_SEC,
            elapsed: 0.0,
        }
    }

    /// Advance; returns true when the fall has completed.
    pub fn step(&mut self, dt: f32) -> bool {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        self.is_done()
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn sample(&self) -> BallSample {
        let t = (self.elapsed / self.duration).clamp(0.0, 1.0);
        BallSample {
            x_offset: self.drift * t,
            fall_frac: t * t,
            rotation_deg: self.spin_deg * t,
        }
    }
}
