use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use std::collections::BTreeSet;
use tableau_common::{MeshBackend, MeshFlags, MeshKind, UniformSink, UniformValue};

/// Point-light slots in [`FrameUniforms`].
pub const POINT_LIGHT_SLOTS: usize = 5;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct GpuDirectionalLight {
    pub direction: [f32; 3],
    pub active: u32,
    pub ambient: [f32; 3],
    _pad0: f32,
    pub diffuse: [f32; 3],
    _pad1: f32,
    pub specular: [f32; 3],
    _pad2: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct GpuPointLight {
    pub position: [f32; 3],
    pub active: u32,
    pub ambient: [f32; 3],
    _pad0: f32,
    pub diffuse: [f32; 3],
    _pad1: f32,
    pub specular: [f32; 3],
    _pad2: f32,
}

/// Group 0: written once per frame.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub view_position: [f32; 3],
    pub use_lighting: u32,
    pub directional: GpuDirectionalLight,
    pub point_lights: [GpuPointLight; POINT_LIGHT_SLOTS],
}

impl Default for FrameUniforms {
    fn default() -> Self {
        Self {
            view: Mat4::IDENTITY.to_cols_array_2d(),
            projection: Mat4::IDENTITY.to_cols_array_2d(),
            ..Zeroable::zeroed()
        }
    }
}

/// Group 1: one block per draw, addressed with a dynamic offset.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ObjectUniforms {
    pub model: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub diffuse: [f32; 3],
    pub shininess: f32,
    pub specular: [f32; 3],
    pub use_texture: u32,
    pub uv_scale: [f32; 2],
    pub texture_slot: i32,
    _pad: u32,
}

impl Default for ObjectUniforms {
    fn default() -> Self {
        Self {
            model: Mat4::IDENTITY.to_cols_array_2d(),
            normal_matrix: Mat4::IDENTITY.to_cols_array_2d(),
            color: [1.0; 4],
            diffuse: [1.0; 3],
            shininess: 1.0,
            specular: [0.0; 3],
            use_texture: 0,
            uv_scale: [1.0, 1.0],
            texture_slot: -1,
            _pad: 0,
        }
    }
}

impl ObjectUniforms {
    fn set_model(&mut self, model: Mat4) {
        self.model = model.to_cols_array_2d();
        // Singular models (zero scale on an axis) keep the model matrix for
        // normals; the shader renormalizes.
        let normal = if model.determinant().abs() > f32::EPSILON {
            model.inverse().transpose()
        } else {
            model
        };
        self.normal_matrix = normal.to_cols_array_2d();
    }
}

/// A draw with the object uniforms that were bound when it was issued.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordedDraw {
    pub kind: MeshKind,
    pub flags: MeshFlags,
    pub object: ObjectUniforms,
}

/// CPU-side draw target for the wgpu backend.
///
/// Accepts the viewer's named uniforms, keeps the bound state the way a GL
/// program would (values persist until overwritten, across frames too) and
/// snapshots the per-object block at each draw.
#[derive(Debug, Default)]
pub struct FrameRecorder {
    frame: FrameUniforms,
    current: ObjectUniforms,
    draws: Vec<RecordedDraw>,
    unhandled: BTreeSet<String>,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop last frame's draws. Bound uniform values are kept.
    pub fn begin_frame(&mut self) {
        self.draws.clear();
    }

    pub fn frame_uniforms(&self) -> &FrameUniforms {
        &self.frame
    }

    pub fn current_object(&self) -> &ObjectUniforms {
        &self.current
    }

    pub fn draws(&self) -> &[RecordedDraw] {
        &self.draws
    }

    /// Names written at least once that this backend ignores.
    pub fn unhandled(&self) -> impl Iterator<Item = &str> {
        self.unhandled.iter().map(String::as_str)
    }

    fn note_unhandled(&mut self, name: &str, value: UniformValue) {
        if !self.unhandled.contains(name) {
            tracing::debug!("uniform '{name}' ({value:?}) not used by the wgpu backend");
            self.unhandled.insert(name.to_string());
        }
    }

    fn set_directional(&mut self, field: &str, value: UniformValue) -> bool {
        let light = &mut self.frame.directional;
        match (field, value) {
            ("bActive", UniformValue::Bool(b)) => light.active = b as u32,
            ("direction", UniformValue::Vec3(v)) => light.direction = v.to_array(),
            ("ambient", UniformValue::Vec3(v)) => light.ambient = v.to_array(),
            ("diffuse", UniformValue::Vec3(v)) => light.diffuse = v.to_array(),
            ("specular", UniformValue::Vec3(v)) => light.specular = v.to_array(),
            _ => return false,
        }
        true
    }

    fn set_point_light(&mut self, index: usize, field: &str, value: UniformValue) -> bool {
        let Some(light) = self.frame.point_lights.get_mut(index) else {
            return false;
        };
        match (field, value) {
            ("bActive", UniformValue::Bool(b)) => light.active = b as u32,
            ("position", UniformValue::Vec3(v)) => light.position = v.to_array(),
            ("ambient", UniformValue::Vec3(v)) => light.ambient = v.to_array(),
            ("diffuse", UniformValue::Vec3(v)) => light.diffuse = v.to_array(),
            ("specular", UniformValue::Vec3(v)) => light.specular = v.to_array(),
            _ => return false,
        }
        true
    }
}

/// Split `pointLights[3].diffuse` into `(3, "diffuse")`.
fn parse_point_light(name: &str) -> Option<(usize, &str)> {
    let (index, field) = name.strip_prefix("pointLights[")?.split_once("].")?;
    Some((index.parse().ok()?, field))
}

impl UniformSink for FrameRecorder {
    fn set_uniform(&mut self, name: &str, value: UniformValue) {
        let obj = &mut self.current;
        match (name, value) {
            ("view", UniformValue::Mat4(m)) => self.frame.view = m.to_cols_array_2d(),
            ("projection", UniformValue::Mat4(m)) => {
                self.frame.projection = m.to_cols_array_2d()
            }
            ("viewPosition", UniformValue::Vec3(v)) => self.frame.view_position = v.to_array(),
            ("bUseLighting", UniformValue::Bool(b)) => self.frame.use_lighting = b as u32,
            ("model", UniformValue::Mat4(m)) => obj.set_model(m),
            ("objectColor", UniformValue::Vec4(c)) => obj.color = c.to_array(),
            ("bUseTexture", UniformValue::Bool(b)) => obj.use_texture = b as u32,
            ("objectTexture", UniformValue::Int(slot)) => obj.texture_slot = slot,
            ("UVscale", UniformValue::Vec2(uv)) => obj.uv_scale = uv.to_array(),
            ("material.diffuseColor", UniformValue::Vec3(v)) => obj.diffuse = v.to_array(),
            ("material.specularColor", UniformValue::Vec3(v)) => obj.specular = v.to_array(),
            ("material.shininess", UniformValue::Float(s)) => obj.shininess = s,
            _ => {
                let handled = if let Some(field) = name.strip_prefix("directionalLight.") {
                    self.set_directional(field, value)
                } else if let Some((index, field)) = parse_point_light(name) {
                    self.set_point_light(index, field, value)
                } else {
                    false
                };
                if !handled {
                    self.note_unhandled(name, value);
                }
            }
        }
    }
}

impl MeshBackend for FrameRecorder {
    fn draw_mesh(&mut self, kind: MeshKind, flags: MeshFlags) {
        self.draws.push(RecordedDraw {
            kind,
            flags,
            object: self.current,
        });
    }
}
