use crate::uniform::UniformSink;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Primitive shapes a draw backend knows how to rasterize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MeshKind {
    Plane,
    Box,
    Cylinder,
    TaperedCylinder,
    Sphere,
    Torus,
}

impl MeshKind {
    pub const ALL: [MeshKind; 6] = [
        MeshKind::Plane,
        MeshKind::Box,
        MeshKind::Cylinder,
        MeshKind::TaperedCylinder,
        MeshKind::Sphere,
        MeshKind::Torus,
    ];
}

impl fmt::Display for MeshKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MeshKind::Plane => "plane",
            MeshKind::Box => "box",
            MeshKind::Cylinder => "cylinder",
            MeshKind::TaperedCylinder => "tapered_cylinder",
            MeshKind::Sphere => "sphere",
            MeshKind::Torus => "torus",
        };
        f.write_str(name)
    }
}

/// Which parts of a capped shape to draw. Ignored by shapes without caps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeshFlags {
    pub top: bool,
    pub bottom: bool,
    pub sides: bool,
}

impl Default for MeshFlags {
    fn default() -> Self {
        Self {
            top: true,
            bottom: true,
            sides: true,
        }
    }
}

impl MeshFlags {
    /// Open tube: sides only, both caps omitted.
    pub fn sides_only() -> Self {
        Self {
            top: false,
            bottom: false,
            sides: true,
        }
    }
}

/// Accepts "draw mesh of kind K" commands.
pub trait MeshBackend {
    fn draw_mesh(&mut self, kind: MeshKind, flags: MeshFlags);
}

/// Anything that takes both per-draw uniforms and draw commands.
pub trait DrawTarget: UniformSink + MeshBackend {}

impl<T: UniformSink + MeshBackend + ?Sized> DrawTarget for T {}
