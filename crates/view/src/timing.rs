/// Per-frame clock bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTiming {
    last: f64,
    delta: f32,
    frames: u64,
}

impl FrameTiming {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `now` (seconds) and return the time since the previous call.
    ///
    /// The first call measures from time zero. A clock that steps backwards
    /// yields zero, never a negative delta.
    pub fn tick(&mut self, now: f64) -> f32 {
        self.delta = (now - self.last).max(0.0) as f32;
        self.last = now;
        self.frames += 1;
        self.delta
    }

    pub fn delta(&self) -> f32 {
        self.delta
    }

    pub fn last_time(&self) -> f64 {
        self.last
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_between_ticks() {
        let mut t = FrameTiming::new();
        assert_eq!(t.tick(0.5), 0.5);
        assert!((t.tick(0.516) - 0.016).abs() < 1e-6);
        assert_eq!(t.last_time(), 0.516);
        assert_eq!(t.frame_count(), 2);
    }

    #[test]
    fn never_negative() {
        let mut t = FrameTiming::new();
        t.tick(2.0);
        assert_eq!(t.tick(1.0), 0.0);
        assert_eq!(t.delta(), 0.0);
    }
}
