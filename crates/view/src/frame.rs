use crate::camera::Camera;
use crate::config::ViewConfig;
use crate::mouse::MouseTracker;
use crate::projection::{Projection, ProjectionMode};
use crate::timing::FrameTiming;
use glam::Mat4;
use tableau_common::UniformSink;
use tableau_input::{Action, InputSource};

/// Uniform names written once per frame.
pub const VIEW_UNIFORM: &str = "view";
pub const PROJECTION_UNIFORM: &str = "projection";
pub const VIEW_POSITION_UNIFORM: &str = "viewPosition";

/// Result of [`ViewContext::prepare_frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Uniforms were pushed; keep running.
    Continue,
    /// Uniforms were pushed and the quit action is held.
    Quit,
    /// No window: nothing was read or written.
    Skipped,
}

/// All per-session view state, owned in one place.
///
/// The event pump calls [`ViewContext::on_cursor_moved`] between frames and
/// [`ViewContext::prepare_frame`] once per frame, both on the same thread.
#[derive(Debug, Clone)]
pub struct ViewContext {
    camera: Camera,
    projection: Projection,
    mouse: MouseTracker,
    timing: FrameTiming,
}

impl Default for ViewContext {
    fn default() -> Self {
        Self::new(&ViewConfig::default())
    }
}

impl ViewContext {
    pub fn new(config: &ViewConfig) -> Self {
        Self {
            camera: Camera::from_config(&config.camera),
            projection: Projection::new(config.projection),
            mouse: MouseTracker::new(),
            timing: FrameTiming::new(),
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn mouse(&self) -> &MouseTracker {
        &self.mouse
    }

    pub fn timing(&self) -> &FrameTiming {
        &self.timing
    }

    /// Switch projection mode. A real change also resets cursor tracking so
    /// the next sample cannot snap the camera.
    pub fn set_projection(&mut self, mode: ProjectionMode) -> bool {
        if !self.projection.transition(mode) {
            return false;
        }
        self.mouse.reset();
        tracing::info!(?mode, "projection changed");
        true
    }

    /// Cursor position callback. Samples are dropped entirely while
    /// orthographic; they are not queued for later.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) {
        if !self.projection.look_enabled() {
            return;
        }
        let offset = self.mouse.sample(x, y);
        self.camera.process_look(offset.x, offset.y);
    }

    /// Scroll wheel callback; positive `delta` zooms in.
    pub fn on_scroll(&mut self, delta: f32) {
        self.camera.process_zoom(delta);
    }

    /// Run one frame of the view protocol and push `view`, `projection` and
    /// `viewPosition` into `sink`.
    ///
    /// Order: clock, input, view matrix, projection matrix, push. Movement
    /// therefore uses this frame's delta and shows up in this frame's matrices.
    pub fn prepare_frame<S: UniformSink + ?Sized>(
        &mut self,
        input: Option<&dyn InputSource>,
        sink: &mut S,
    ) -> FrameOutcome {
        let Some(input) = input else {
            tracing::trace!("no window, frame skipped");
            return FrameOutcome::Skipped;
        };

        let dt = self.timing.tick(input.now());
        let quit = self.process_input(input, dt);

        let view = self.camera.view_matrix();
        let projection = self.projection_matrix(input.aspect_ratio());

        sink.set_mat4(VIEW_UNIFORM, view);
        sink.set_mat4(PROJECTION_UNIFORM, projection);
        sink.set_vec3(VIEW_POSITION_UNIFORM, self.camera.position);

        if quit {
            FrameOutcome::Quit
        } else {
            FrameOutcome::Continue
        }
    }

    /// Projection for the current mode and camera zoom.
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        self.projection.matrix(self.camera.zoom, aspect)
    }

    fn process_input(&mut self, input: &dyn InputSource, dt: f32) -> bool {
        let quit = input.is_pressed(Action::Quit);

        for action in Action::ALL {
            if let Some(direction) = action.direction() {
                if input.is_pressed(action) {
                    self.camera.process_move(direction, dt);
                }
            }
        }

        if input.is_pressed(Action::EnableOrtho) {
            self.set_projection(ProjectionMode::Orthographic);
        }
        if input.is_pressed(Action::EnablePerspective) {
            self.set_projection(ProjectionMode::Perspective);
        }
        quit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use tableau_common::{CommandLog, UniformValue};
    use tableau_input::InputSnapshot;

    fn frame(ctx: &mut ViewContext, input: &InputSnapshot) -> (FrameOutcome, CommandLog) {
        let mut log = CommandLog::new();
        let outcome = ctx.prepare_frame(Some(input), &mut log);
        (outcome, log)
    }

    #[test]
    fn pushes_view_projection_and_position() {
        let mut ctx = ViewContext::default();
        let (outcome, log) = frame(&mut ctx, &InputSnapshot::new(1000, 800).at_time(0.016));
        assert_eq!(outcome, FrameOutcome::Continue);
        assert_eq!(log.len(), 3);
        assert_eq!(
            log.latest(VIEW_UNIFORM),
            Some(UniformValue::Mat4(ctx.camera().view_matrix()))
        );
        assert_eq!(
            log.latest(PROJECTION_UNIFORM),
            Some(UniformValue::Mat4(ctx.projection_matrix(1.25)))
        );
        assert_eq!(
            log.latest(VIEW_POSITION_UNIFORM),
            Some(UniformValue::Vec3(Vec3::new(0.5, 5.5, 10.0)))
        );
    }

    #[test]
    fn no_window_is_a_no_op() {
        let mut ctx = ViewContext::default();
        let mut log = CommandLog::new();
        assert_eq!(ctx.prepare_frame(None, &mut log), FrameOutcome::Skipped);
        assert!(log.is_empty());
        assert_eq!(ctx.timing().frame_count(), 0);
    }

    #[test]
    fn movement_uses_this_frames_delta() {
        let mut ctx = ViewContext::default();
        let start = ctx.camera().position;
        let forward = ctx.camera().forward();

        let input = InputSnapshot::default()
            .with_pressed(Action::Forward)
            .at_time(0.5);
        let (_, log) = frame(&mut ctx, &input);

        let expected = start + forward * 10.0 * 0.5;
        assert!(ctx.camera().position.abs_diff_eq(expected, 1e-4));
        assert_eq!(
            log.latest(VIEW_POSITION_UNIFORM),
            Some(UniformValue::Vec3(ctx.camera().position))
        );
    }

    #[test]
    fn quit_still_pushes_uniforms() {
        let mut ctx = ViewContext::default();
        let (outcome, log) = frame(&mut ctx, &InputSnapshot::default().with_pressed(Action::Quit));
        assert_eq!(outcome, FrameOutcome::Quit);
        assert_eq!(log.write_count(VIEW_UNIFORM), 1);
    }

    #[test]
    fn ortho_perspective_toggle_is_idempotent_and_resets_mouse() {
        let mut ctx = ViewContext::default();
        for _ in 0..2 {
            ctx.on_cursor_moved(10.0, 10.0);
            assert!(!ctx.mouse().is_first_sample());
            assert!(ctx.set_projection(ProjectionMode::Orthographic));
            assert!(ctx.mouse().is_first_sample());
            assert!(!ctx.set_projection(ProjectionMode::Orthographic));

            assert!(ctx.set_projection(ProjectionMode::Perspective));
            assert!(ctx.mouse().is_first_sample());
            ctx.on_cursor_moved(20.0, 20.0);

            assert!(ctx.set_projection(ProjectionMode::Orthographic));
            assert!(ctx.mouse().is_first_sample());
            assert!(ctx.set_projection(ProjectionMode::Perspective));
        }
        ctx.set_projection(ProjectionMode::Orthographic);
        assert_eq!(ctx.projection().mode(), ProjectionMode::Orthographic);
    }

    #[test]
    fn held_ortho_key_does_not_retrigger_reset() {
        let mut ctx = ViewContext::default();
        let held = InputSnapshot::default().with_pressed(Action::EnableOrtho);
        frame(&mut ctx, &held.clone().at_time(0.1));
        assert!(ctx.projection().is_orthographic());
        assert!(ctx.mouse().is_first_sample());
        // A no-op transition leaves tracking alone.
        frame(&mut ctx, &held.at_time(0.2));
        assert!(ctx.mouse().is_first_sample());
    }

    #[test]
    fn look_is_dropped_while_orthographic() {
        let mut ctx = ViewContext::default();
        ctx.on_cursor_moved(500.0, 400.0);
        let before = ctx.camera().clone();

        ctx.set_projection(ProjectionMode::Orthographic);
        for i in 0..50 {
            ctx.on_cursor_moved(500.0 + i as f64 * 37.0, 400.0 - i as f64 * 11.0);
        }
        assert_eq!(ctx.camera().forward(), before.forward());
        assert_eq!(ctx.camera().yaw(), before.yaw());
        assert_eq!(ctx.camera().pitch(), before.pitch());

        // Back in perspective the first sample is a new reference point.
        ctx.set_projection(ProjectionMode::Perspective);
        ctx.on_cursor_moved(5000.0, -3000.0);
        assert_eq!(ctx.camera().forward(), before.forward());
        ctx.on_cursor_moved(5010.0, -3000.0);
        assert!((ctx.camera().yaw() - (before.yaw() + 1.0)).abs() < 1e-4);
    }

    #[test]
    fn first_cursor_sample_never_moves_camera() {
        let mut ctx = ViewContext::default();
        let before = ctx.camera().forward();
        ctx.on_cursor_moved(1234.0, 5678.0);
        assert_eq!(ctx.camera().forward(), before);
    }

    #[test]
    fn ortho_projection_ignores_camera_pose() {
        let mut a = ViewContext::default();
        let mut b = ViewContext::default();
        a.set_projection(ProjectionMode::Orthographic);
        b.set_projection(ProjectionMode::Orthographic);
        b.camera_mut().position = Vec3::new(-40.0, 3.0, 7.0);
        b.camera_mut().process_look(300.0, -50.0);
        b.on_scroll(20.0);
        assert_eq!(a.projection_matrix(1.25), b.projection_matrix(1.25));
        assert_ne!(a.camera().view_matrix(), b.camera().view_matrix());
    }

    #[test]
    fn projection_tracks_window_aspect() {
        let mut ctx = ViewContext::default();
        let (_, wide) = frame(&mut ctx, &InputSnapshot::new(1600, 800).at_time(0.1));
        let (_, square) = frame(&mut ctx, &InputSnapshot::new(800, 800).at_time(0.2));
        assert_ne!(
            wide.latest(PROJECTION_UNIFORM),
            square.latest(PROJECTION_UNIFORM)
        );
    }
}
