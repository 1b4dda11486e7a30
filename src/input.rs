use glam::Vec2;

/// Latest pointer/touch sample in viewport px. Event handlers only overwrite
/// the sample; consumers read it on their own cadence (last-write-wins).
#[derive(Default, Clone, Copy)]
pub struct PointerState {
    pub pos: Option<Vec2>,
    prev: Option<Vec2>,
}

impl PointerState {
    pub fn record(&mut self, x: f32, y: f32) {
        self.prev = self.pos;
        self.pos = Some(Vec2::new(x, y));
    }

    /// Distance moved since the previous sample, px. Zero until two samples
    /// exist.
    #[inline]
    pub fn speed(&self) -> f32 {
        match (self.prev, self.pos) {
            (Some(a), Some(b)) => a.distance(b),
            _ => 0.0,
        }
    }

    pub fn clear(&mut self) {
        self.prev = None;
        self.pos = None;
    }
}
