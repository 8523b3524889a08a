use glam::{DVec2, Vec2};

/// Turns absolute cursor positions into per-sample offsets.
///
/// The first sample after construction or [`MouseTracker::reset`] only
/// records a reference point and yields a zero offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseTracker {
    last: DVec2,
    first_sample: bool,
}

impl Default for MouseTracker {
    fn default() -> Self {
        Self {
            last: DVec2::ZERO,
            first_sample: true,
        }
    }
}

impl MouseTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_first_sample(&self) -> bool {
        self.first_sample
    }

    pub fn last_position(&self) -> DVec2 {
        self.last
    }

    /// Treat the next sample as a fresh reference point.
    pub fn reset(&mut self) {
        self.first_sample = true;
    }

    /// Offset since the previous sample. Y is flipped so moving the cursor up
    /// gives a positive offset.
    pub fn sample(&mut self, x: f64, y: f64) -> Vec2 {
        let pos = DVec2::new(x, y);
        if self.first_sample {
            self.last = pos;
            self.first_sample = false;
        }
        let offset = Vec2::new((pos.x - self.last.x) as f32, (self.last.y - pos.y) as f32);
        self.last = pos;
        offset
    }
}
