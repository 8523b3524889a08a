use crate::action::Action;
use std::collections::BTreeSet;

/// What the frame loop needs from the window each frame.
pub trait InputSource {
    /// Framebuffer size in pixels.
    fn window_size(&self) -> (u32, u32);

    fn is_pressed(&self, action: Action) -> bool;

    /// Monotonic time in seconds.
    fn now(&self) -> f64;

    fn aspect_ratio(&self) -> f32 {
        let (w, h) = self.window_size();
        w as f32 / h.max(1) as f32
    }
}

/// Plain-data input source: held actions, window size and a clock value.
///
/// The desktop app keeps one of these up to date from window events; tests
/// and headless tools build them directly.
#[derive(Debug, Clone, PartialEq)]
pub struct InputSnapshot {
    pub window_size: (u32, u32),
    pub time: f64,
    held: BTreeSet<Action>,
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self::new(1000, 800)
    }
}

impl InputSnapshot {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            window_size: (width, height),
            time: 0.0,
            held: BTreeSet::new(),
        }
    }

    pub fn press(&mut self, action: Action) {
        if self.held.insert(action) {
            tracing::trace!(?action, "pressed");
        }
    }

    pub fn release(&mut self, action: Action) {
        if self.held.remove(&action) {
            tracing::trace!(?action, "released");
        }
    }

    /// Release everything, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    pub fn held(&self) -> impl Iterator<Item = Action> + '_ {
        self.held.iter().copied()
    }

    pub fn with_pressed(mut self, action: Action) -> Self {
        self.press(action);
        self
    }

    pub fn at_time(mut self, time: f64) -> Self {
        self.time = time;
        self
    }
}

impl InputSource for InputSnapshot {
    fn window_size(&self) -> (u32, u32) {
        self.window_size
    }

    fn is_pressed(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    fn now(&self) -> f64 {
        self.time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release() {
        let mut s = InputSnapshot::default();
        s.press(Action::Forward);
        s.press(Action::Forward);
        assert!(s.is_pressed(Action::Forward));
        assert_eq!(s.held().count(), 1);
        s.release(Action::Forward);
        assert!(!s.is_pressed(Action::Forward));
    }

    #[test]
    fn aspect_ratio_guards_zero_height() {
        let s = InputSnapshot::new(1000, 800);
        assert!((s.aspect_ratio() - 1.25).abs() < 1e-6);
        let minimized = InputSnapshot::new(640, 0);
        assert_eq!(minimized.aspect_ratio(), 640.0);
    }

    #[test]
    fn builder_helpers() {
        let s = InputSnapshot::default()
            .with_pressed(Action::Quit)
            .at_time(2.5);
        assert!(s.is_pressed(Action::Quit));
        assert_eq!(s.now(), 2.5);
        let mut s = s;
        s.release_all();
        assert_eq!(s.held().count(), 0);
    }
}
