use crate::config::CameraConfig;
use glam::{Mat4, Vec3};
use tableau_input::Direction;

/// World up axis used to re-derive the camera basis.
pub const WORLD_UP: Vec3 = Vec3::Y;

/// Pitch limit in degrees when `constrain_pitch` is set.
pub const PITCH_LIMIT: f32 = 89.0;

/// Zoom (vertical field of view) range in degrees.
pub const MIN_ZOOM: f32 = 1.0;
pub const MAX_ZOOM: f32 = 90.0;

/// Free-fly camera: position plus an orthonormal basis derived from yaw/pitch.
///
/// Angles are in degrees. The basis is rebuilt from the angles on every look
/// update, so rounding error never accumulates in `forward`/`up`.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    forward: Vec3,
    up: Vec3,
    right: Vec3,
    yaw: f32,
    pitch: f32,
    /// Vertical field of view in degrees (perspective only).
    pub zoom: f32,
    /// Units per second.
    pub speed: f32,
    /// Degrees per cursor pixel.
    pub sensitivity: f32,
    pub constrain_pitch: bool,
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

impl Camera {
    /// Camera at `position` looking along `forward` (need not be normalized).
    ///
    /// Yaw and pitch are derived from `forward`, so the first look update
    /// continues from this orientation instead of snapping.
    pub fn new(position: Vec3, forward: Vec3) -> Self {
        let dir = forward.try_normalize().unwrap_or(Vec3::NEG_Z);
        let yaw = dir.z.atan2(dir.x).to_degrees();
        let pitch = dir.y.clamp(-1.0, 1.0).asin().to_degrees();
        let mut camera = Self {
            position,
            forward: dir,
            up: WORLD_UP,
            right: Vec3::X,
            yaw,
            pitch,
            zoom: 45.0,
            speed: 2.5,
            sensitivity: 0.1,
            constrain_pitch: true,
        };
        camera.update_vectors();
        camera
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        let mut camera = Self::new(config.position, config.forward);
        camera.zoom = config.zoom;
        camera.speed = config.speed;
        camera.sensitivity = config.sensitivity;
        camera.constrain_pitch = config.constrain_pitch;
        if camera.constrain_pitch {
            camera.pitch = camera.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
            camera.update_vectors();
        }
        camera
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Rotate by a cursor offset. Positive `dy` looks up.
    pub fn process_look(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.pitch += dy * self.sensitivity;
        if self.constrain_pitch {
            self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }
        self.update_vectors();
    }

    /// Translate along the basis vector for `direction` by `speed * dt`.
    pub fn process_move(&mut self, direction: Direction, dt: f32) {
        let velocity = self.speed * dt;
        let step = match direction {
            Direction::Forward => self.forward,
            Direction::Backward => -self.forward,
            Direction::Left => -self.right,
            Direction::Right => self.right,
            Direction::Up => self.up,
            Direction::Down => -self.up,
        };
        self.position += step * velocity;
    }

    /// Narrow or widen the field of view; positive `offset` zooms in.
    pub fn process_zoom(&mut self, offset: f32) {
        self.zoom = (self.zoom - offset).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Right-handed look-at from the current pose.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward, self.up)
    }

    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.forward = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
        // Looking straight up or down: keep the previous horizontal right.
        self.right = self
            .forward
            .cross(WORLD_UP)
            .try_normalize()
            .unwrap_or(self.right);
        self.up = self.right.cross(self.forward).normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_orthonormal(cam: &Camera) {
        let (f, u, r) = (cam.forward(), cam.up(), cam.right());
        assert!((f.length() - 1.0).abs() < 1e-4, "forward length {}", f.length());
        assert!((u.length() - 1.0).abs() < 1e-4, "up length {}", u.length());
        assert!(f.dot(u).abs() < 1e-4, "forward.up = {}", f.dot(u));
        assert!(f.dot(r).abs() < 1e-4, "forward.right = {}", f.dot(r));
    }

    /// Small deterministic generator so the sequences are reproducible.
    struct Lcg(u64);

    impl Lcg {
        fn next_f32(&mut self) -> f32 {
            self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((self.0 >> 33) as f32 / (1u64 << 31) as f32) * 2.0 - 1.0
        }
    }

    #[test]
    fn default_camera_matches_initial_pose() {
        let cam = Camera::default();
        assert_eq!(cam.position, Vec3::new(0.5, 5.5, 10.0));
        assert_eq!(cam.zoom, 80.0);
        assert_eq!(cam.speed, 10.0);
        let expected = Vec3::new(0.0, -0.5, -2.0).normalize();
        assert!(cam.forward().abs_diff_eq(expected, 1e-5));
        assert_orthonormal(&cam);
    }

    #[test]
    fn move_forward_one_second_at_default_speed() {
        let mut cam = Camera::default();
        let start = cam.position;
        cam.process_move(Direction::Forward, 1.0);
        let expected = start + Vec3::new(0.0, -0.5, -2.0).normalize() * 10.0;
        assert!(
            cam.position.abs_diff_eq(expected, 1e-4),
            "got {}, expected {expected}",
            cam.position
        );
    }

    #[test]
    fn opposite_moves_cancel() {
        let mut cam = Camera::default();
        let start = cam.position;
        for (a, b) in [
            (Direction::Forward, Direction::Backward),
            (Direction::Left, Direction::Right),
            (Direction::Up, Direction::Down),
        ] {
            cam.process_move(a, 0.25);
            cam.process_move(b, 0.25);
        }
        assert!(cam.position.abs_diff_eq(start, 1e-4));
    }

    #[test]
    fn moves_scale_with_delta_time() {
        let mut a = Camera::default();
        let mut b = Camera::default();
        a.process_move(Direction::Right, 0.5);
        b.process_move(Direction::Right, 0.25);
        b.process_move(Direction::Right, 0.25);
        assert!(a.position.abs_diff_eq(b.position, 1e-5));
    }

    #[test]
    fn basis_stays_orthonormal_under_mixed_input() {
        let mut cam = Camera::default();
        let mut rng = Lcg(7);
        let dirs = [
            Direction::Forward,
            Direction::Backward,
            Direction::Left,
            Direction::Right,
            Direction::Up,
            Direction::Down,
        ];
        for i in 0..2000 {
            let d = dirs[i % dirs.len()];
            cam.process_move(d, rng.next_f32().abs() * 0.1);
            cam.process_look(rng.next_f32() * 200.0, rng.next_f32() * 200.0);
            assert_orthonormal(&cam);
        }
    }

    #[test]
    fn basis_survives_unconstrained_vertical_pitch() {
        let mut cam = Camera::default();
        cam.constrain_pitch = false;
        // Pitch straight up, then past vertical.
        cam.process_look(0.0, (90.0 - cam.pitch()) / cam.sensitivity);
        assert_orthonormal(&cam);
        cam.process_look(0.0, 100.0);
        assert!(cam.pitch() > 90.0);
        assert_orthonormal(&cam);
    }

    #[test]
    fn pitch_is_clamped_by_default() {
        let mut cam = Camera::default();
        cam.process_look(0.0, 10_000.0);
        assert_eq!(cam.pitch(), PITCH_LIMIT);
        cam.process_look(0.0, -100_000.0);
        assert_eq!(cam.pitch(), -PITCH_LIMIT);
        assert_orthonormal(&cam);
    }

    #[test]
    fn look_right_turns_toward_right_vector() {
        let mut cam = Camera::default();
        let right = cam.right();
        cam.process_look(100.0, 0.0);
        assert!(cam.forward().dot(right) > 0.0);
        assert!((cam.yaw() - (-90.0 + 10.0)).abs() < 1e-3);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut cam = Camera::default();
        cam.process_zoom(200.0);
        assert_eq!(cam.zoom, MIN_ZOOM);
        cam.process_zoom(-200.0);
        assert_eq!(cam.zoom, MAX_ZOOM);
    }

    #[test]
    fn view_matrix_maps_position_to_origin() {
        let mut cam = Camera::default();
        cam.process_look(37.0, -12.0);
        let view = cam.view_matrix();
        let p = view.transform_point3(cam.position);
        assert!(p.abs_diff_eq(Vec3::ZERO, 1e-4));
        // Right-handed: forward maps to -Z in view space.
        let ahead = view.transform_point3(cam.position + cam.forward());
        assert!(ahead.abs_diff_eq(Vec3::NEG_Z, 1e-4));
        assert!(!view.col(0).x.is_nan());
    }

    #[test]
    fn zero_forward_falls_back_to_negative_z() {
        let cam = Camera::new(Vec3::ZERO, Vec3::ZERO);
        assert!(cam.forward().abs_diff_eq(Vec3::NEG_Z, 1e-5));
        assert_orthonormal(&cam);
    }
}
