// Coverage mask for the scratch-to-reveal card. The canvas paints the
// strokes; this grid decides when enough has been cleared.

pub const BRUSH_RADIUS_POINTER: f32 = 30.0;
pub const BRUSH_RADIUS_TOUCH: f32 = 40.0;
pub const REVEAL_THRESHOLD: f32 = 0.70;
pub const MASK_CELL_PX: f32 = 8.0;

pub struct ScratchMask {
    cols: usize,
    rows: usize,
    cell: f32,
    cleared: Vec<bool>,
    cleared_count: usize,
}

impl ScratchMask {
    pub fn new(width: f32, height: f32) -> Self {
        let cols = ((width / MASK_CELL_PX).ceil() as usize).max(1);
        let rows = ((height / MASK_CELL_PX).ceil() as usize).max(1);
        Self {
            cols,
            rows,
            cell: MASK_CELL_PX,
            cleared: vec![false; cols * rows],
            cleared_count: 0,
        }
    }

    /// Clear every cell whose center lies within the stroke circle.
    /// Returns how many cells were newly cleared.
    pub fn scratch(&mut self, x: f32, y: f32, radius: f32) -> usize {
        let c0 = (((x - radius) / self.cell).floor().max(0.0)) as usize;
        let r0 = (((y - radius) / self.cell).floor().max(0.0)) as usize;
        let c1 = ((((x + radius) / self.cell).ceil()) as usize).min(self.cols);
        let r1 = ((((y + radius) / self.cell).ceil()) as usize).min(self.rows);
        let r2 = radius * radius;
        let mut newly = 0;
        for row in r0..r1 {
            for col in c0..c1 {
                let idx = row * self.cols + col;
                if self.cleared[idx] {
                    continue;
                }
                let cx = (col as f32 + 0.5) * self.cell;
                let cy = (row as f32 + 0.5) * self.cell;
                let dx = cx - x;
                let dy = cy - y;
                if dx * dx + dy * dy <= r2 {
                    self.cleared[idx] = true;
                    self.cleared_count += 1;
                    newly += 1;
                }
            }
        }
        newly
    }

    #[inline]
    pub fn coverage(&self) -> f32 {
        self.cleared_count as f32 / self.cleared.len() as f32
    }

    #[inline]
    pub fn is_revealed(&self) -> bool {
        self.coverage() > REVEAL_THRESHOLD
    }

    pub fn reset(&mut self) {
        self.cleared.fill(false);
        self.cleared_count = 0;
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }
}
