use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Per-draw placement: scale, Euler rotation in degrees, translation.
///
/// This is pure input to [`Transform::model_matrix`]; nothing stores it
/// between draws.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub scale: Vec3,
    /// Rotation about the X, Y and Z axes, in degrees.
    pub rotation_degrees: Vec3,
    pub translation: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scale: Vec3::ONE,
            rotation_degrees: Vec3::ZERO,
            translation: Vec3::ZERO,
        }
    }
}

impl Transform {
    pub fn new(scale: Vec3, rotation_degrees: Vec3, translation: Vec3) -> Self {
        Self {
            scale,
            rotation_degrees,
            translation,
        }
    }

    /// Translation-only placement at unit scale.
    pub fn at(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::default()
        }
    }

    /// Model matrix `T * Rz * Ry * Rx * S`.
    ///
    /// The axis order is fixed: Z, then Y, then X.
    pub fn model_matrix(&self) -> Mat4 {
        let r = self.rotation_degrees;
        Mat4::from_translation(self.translation)
            * Mat4::from_rotation_z(r.z.to_radians())
            * Mat4::from_rotation_y(r.y.to_radians())
            * Mat4::from_rotation_x(r.x.to_radians())
            * Mat4::from_scale(self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_default_is_identity() {
        let t = Transform::default();
        assert_eq!(t.scale, Vec3::ONE);
        assert_eq!(t.rotation_degrees, Vec3::ZERO);
        assert!(t.model_matrix().abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn scale_applies_before_translation() {
        let t = Transform::new(Vec3::splat(2.0), Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));
        let p = t.model_matrix().transform_point3(Vec3::new(1.0, 1.0, 1.0));
        assert!(p.abs_diff_eq(Vec3::new(3.0, 2.0, 2.0), 1e-5));
    }

    #[test]
    fn rotation_order_is_z_then_y_then_x() {
        let t = Transform::new(Vec3::ONE, Vec3::new(90.0, 90.0, 0.0), Vec3::ZERO);
        // Rx first: +Y -> +Z, then Ry: +Z -> +X.
        let p = t.model_matrix().transform_vector3(Vec3::Y);
        assert!(p.abs_diff_eq(Vec3::X, 1e-5), "got {p}");

        let expected = Mat4::from_rotation_z(0.3_f32.to_radians())
            * Mat4::from_rotation_y(20.0_f32.to_radians())
            * Mat4::from_rotation_x(45.0_f32.to_radians());
        let t = Transform::new(Vec3::ONE, Vec3::new(45.0, 20.0, 0.3), Vec3::ZERO);
        assert!(t.model_matrix().abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn at_keeps_unit_scale() {
        let t = Transform::at(Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(t.scale, Vec3::ONE);
        assert_eq!(t.translation.y, 5.0);
    }
}
