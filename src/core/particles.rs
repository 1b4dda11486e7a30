// Pointer trail and celebration particles. Velocities and decay rates are
// in px-per-frame units at a 60 Hz reference; `step` rescales by dt.

use glam::Vec2;
use rand::prelude::*;
use smallvec::SmallVec;

// Trail spawning
pub const TRAIL_SPAWN_EVERY: u32 = 2; // frames
pub const TRAIL_MAX_PER_SAMPLE: usize = 5;
pub const SPEED_PER_PARTICLE: f32 = 10.0;

// Lifecycle
pub const LIFE_DECAY_MIN: f32 = 0.01;
pub const LIFE_DECAY_MAX: f32 = 0.03;
pub const SIZE_DECAY: f32 = 0.96;
pub const MIN_SIZE: f32 = 0.5;

// Celebration
pub const BURST_MAX: usize = 32;
pub const CONFETTI_SPIN_RATE: f32 = 0.2; // radians per frame

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleKind {
    Trail,
    Confetti,
    Heart,
}

#[derive(Clone, Copy, Debug)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub life: f32,
    pub decay: f32,
    pub hue: f32,
    pub spin: f32,
    pub kind: ParticleKind,
}

impl Particle {
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0 && self.size >= MIN_SIZE
    }
}

pub struct ParticleSystem {
    pub particles: Vec<Particle>,
    rng: StdRng,
    frame: u32,
}

impl ParticleSystem {
    pub fn new(seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
            frame: 0,
        }
    }

    /// Trail sampling, called once per animation frame with the pointer
    /// position and its speed in px/frame. Spawns every other frame, count
    /// scaled by speed.
    pub fn sample_trail(&mut self, pointer: Vec2, speed: f32) {
        self.frame = self.frame.wrapping_add(1);
        if self.frame % TRAIL_SPAWN_EVERY != 0 {
            return;
        }
        let count = ((speed / SPEED_PER_PARTICLE) as usize).min(TRAIL_MAX_PER_SAMPLE);
        if count == 0 {
            return;
        }
        let mut batch: SmallVec<[Particle; TRAIL_MAX_PER_SAMPLE]> = SmallVec::new();
        for _ in 0..count {
            batch.push(Particle {
                pos: pointer,
                vel: Vec2::new(
                    (self.rng.gen::<f32>() - 0.5) * 2.0,
                    (self.rng.gen::<f32>() - 0.5) * 2.0,
                ),
                size: 2.0 + self.rng.gen::<f32>() * 5.0,
                life: 1.0,
                decay: self.rng.gen_range(LIFE_DECAY_MIN..LIFE_DECAY_MAX),
                hue: 320.0 + self.rng.gen::<f32>() * 40.0,
                spin: 0.0,
                kind: ParticleKind::Trail,
            });
        }
        self.particles.extend(batch);
    }

    /// Radial confetti burst with a slight upward bias.
    pub fn burst(&mut self, origin: Vec2, count: usize) {
        let count = count.min(BURST_MAX);
        let mut batch: SmallVec<[Particle; 8]> = SmallVec::new();
        for _ in 0..count {
            let angle = self.rng.gen::<f32>() * std::f32::consts::TAU;
            let speed = 2.0 + self.rng.gen::<f32>() * 4.0;
            batch.push(Particle {
                pos: origin,
                vel: Vec2::new(angle.cos() * speed, angle.sin() * speed - 2.0),
                size: 3.0 + self.rng.gen::<f32>() * 3.0,
                life: 1.0,
                decay: self.rng.gen_range(0.008..0.02),
                hue: self.rng.gen::<f32>() * 360.0,
                spin: self.rng.gen::<f32>() * std::f32::consts::TAU,
                kind: ParticleKind::Confetti,
            });
        }
        self.particles.extend(batch);
    }

    /// A heart drifting upward from the bottom of the viewport.
    pub fn float_heart(&mut self, x: f32, base_y: f32) {
        self.particles.push(Particle {
            pos: Vec2::new(x, base_y),
            vel: Vec2::new(
                (self.rng.gen::<f32>() - 0.5) * 0.8,
                -(0.8 + self.rng.gen::<f32>() * 0.8),
            ),
            size: 10.0 + self.rng.gen::<f32>() * 14.0,
            life: 1.0,
            decay: self.rng.gen_range(0.004..0.008),
            hue: 340.0 + self.rng.gen::<f32>() * 20.0,
            spin: self.rng.gen::<f32>() * std::f32::consts::TAU,
            kind: ParticleKind::Heart,
        });
    }

    /// Advance all particles by `dt` seconds and drop the dead ones.
    pub fn step(&mut self, dt: f32) {
        let frames = dt * 60.0;
        let size_decay = SIZE_DECAY.powf(frames);
        for p in &mut self.particles {
            p.pos += p.vel * frames;
            p.life -= p.decay * frames;
            p.size *= size_decay;
            if p.kind == ParticleKind::Confetti {
                p.spin += CONFETTI_SPIN_RATE * frames;
            }
        }
        self.particles.retain(|p| p.is_alive());
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
