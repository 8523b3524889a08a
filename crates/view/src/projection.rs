use glam::Mat4;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionMode {
    #[default]
    Perspective,
    Orthographic,
}

/// Clip planes and the orthographic volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    pub near: f32,
    pub far: f32,
    /// Half width and half height of the orthographic volume.
    pub ortho_half_extent: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            near: 0.1,
            far: 100.0,
            ortho_half_extent: 10.0,
        }
    }
}

/// Two-state projection machine.
///
/// The orthographic volume is fixed and does not follow the camera; only the
/// view matrix moves the scene while orthographic.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Projection {
    mode: ProjectionMode,
    config: ProjectionConfig,
}

impl Projection {
    pub fn new(config: ProjectionConfig) -> Self {
        Self {
            mode: ProjectionMode::Perspective,
            config,
        }
    }

    pub fn mode(&self) -> ProjectionMode {
        self.mode
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    pub fn is_orthographic(&self) -> bool {
        self.mode == ProjectionMode::Orthographic
    }

    /// Cursor look is applied only in perspective.
    pub fn look_enabled(&self) -> bool {
        self.mode == ProjectionMode::Perspective
    }

    /// Switch to `target`. Returns `false` (and changes nothing) if already there.
    pub fn transition(&mut self, target: ProjectionMode) -> bool {
        if self.mode == target {
            return false;
        }
        self.mode = target;
        true
    }

    /// Projection matrix, right-handed with a zero-to-one depth range.
    ///
    /// `zoom_degrees` is the perspective vertical field of view; the
    /// orthographic branch ignores it and `aspect`.
    pub fn matrix(&self, zoom_degrees: f32, aspect: f32) -> Mat4 {
        let ProjectionConfig {
            near,
            far,
            ortho_half_extent: e,
        } = self.config;
        match self.mode {
            ProjectionMode::Perspective => {
                Mat4::perspective_rh(zoom_degrees.to_radians(), aspect, near, far)
            }
            ProjectionMode::Orthographic => Mat4::orthographic_rh(-e, e, -e, e, near, far),
        }
    }
}
