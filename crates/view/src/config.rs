use crate::projection::ProjectionConfig;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Initial camera pose and tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    /// Initial look direction; normalized on use.
    pub forward: Vec3,
    /// Vertical field of view in degrees.
    pub zoom: f32,
    pub speed: f32,
    pub sensitivity: f32,
    pub constrain_pitch: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.5, 5.5, 10.0),
            forward: Vec3::new(0.0, -0.5, -2.0),
            zoom: 80.0,
            speed: 10.0,
            sensitivity: 0.1,
            constrain_pitch: true,
        }
    }
}

/// The `camera` and `projection` sections of the viewer config.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub camera: CameraConfig,
    pub projection: ProjectionConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_keeps_defaults() {
        let cfg: ViewConfig =
            serde_yaml::from_str("camera:\n  speed: 4.0\nprojection:\n  far: 250.0\n").unwrap();
        assert_eq!(cfg.camera.speed, 4.0);
        assert_eq!(cfg.camera.zoom, 80.0);
        assert_eq!(cfg.camera.position, Vec3::new(0.5, 5.5, 10.0));
        assert_eq!(cfg.projection.far, 250.0);
        assert_eq!(cfg.projection.near, 0.1);
    }

    #[test]
    fn vectors_parse_as_sequences() {
        let cfg: CameraConfig = serde_yaml::from_str("position: [1.0, 2.0, 3.0]\n").unwrap();
        assert_eq!(cfg.position, Vec3::new(1.0, 2.0, 3.0));
        assert!(cfg.constrain_pitch);
    }
}
