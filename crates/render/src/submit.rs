use glam::{Vec2, Vec4};
use tableau_assets::ResourceRegistry;
use tableau_common::{DrawTarget, MeshFlags, MeshKind, Transform};

pub const MODEL_UNIFORM: &str = "model";
pub const COLOR_UNIFORM: &str = "objectColor";
pub const TEXTURE_UNIFORM: &str = "objectTexture";
pub const USE_TEXTURE_UNIFORM: &str = "bUseTexture";
pub const UV_SCALE_UNIFORM: &str = "UVscale";
pub const MATERIAL_DIFFUSE_UNIFORM: &str = "material.diffuseColor";
pub const MATERIAL_SPECULAR_UNIFORM: &str = "material.specularColor";
pub const MATERIAL_SHININESS_UNIFORM: &str = "material.shininess";

/// Sampler value pushed when a texture tag is not registered.
pub const MISSING_TEXTURE_SLOT: i32 = -1;

/// Per-object uniform composition for one frame.
///
/// Every setter writes straight through to the target, so whatever was pushed
/// last stays bound for following draws until it is overwritten.
pub struct DrawSubmitter<'a> {
    target: &'a mut dyn DrawTarget,
    registry: &'a ResourceRegistry,
}

impl<'a> DrawSubmitter<'a> {
    pub fn new(target: &'a mut dyn DrawTarget, registry: &'a ResourceRegistry) -> Self {
        Self { target, registry }
    }

    pub fn registry(&self) -> &ResourceRegistry {
        self.registry
    }

    /// Push the model matrix `T * Rz * Ry * Rx * S`.
    pub fn set_transform(&mut self, transform: &Transform) {
        self.target.set_mat4(MODEL_UNIFORM, transform.model_matrix());
    }

    /// Flat color mode: texture sampling off.
    pub fn set_color(&mut self, rgba: Vec4) {
        self.target.set_bool(USE_TEXTURE_UNIFORM, false);
        self.target.set_vec4(COLOR_UNIFORM, rgba);
    }

    /// Texture mode. Unknown tags still enable sampling but point it at the
    /// `-1` slot, which the backend treats as "no texture".
    ///
    /// Returns whether the tag was found.
    pub fn set_texture(&mut self, tag: &str) -> bool {
        let slot = self.registry.find_slot(tag);
        if slot.is_none() {
            tracing::debug!("texture tag '{tag}' not registered");
        }
        let slot = slot
            .and_then(|s| i32::try_from(s).ok())
            .unwrap_or(MISSING_TEXTURE_SLOT);
        self.target.set_bool(USE_TEXTURE_UNIFORM, true);
        self.target.set_int(TEXTURE_UNIFORM, slot);
        slot != MISSING_TEXTURE_SLOT
    }

    pub fn set_uv_scale(&mut self, u: f32, v: f32) {
        self.target.set_vec2(UV_SCALE_UNIFORM, Vec2::new(u, v));
    }

    /// Push the material registered under `tag`. An unknown tag writes
    /// nothing, leaving the previous material bound, and returns `false`.
    pub fn set_material(&mut self, tag: &str) -> bool {
        let Some(material) = self.registry.find_material(tag) else {
            tracing::debug!("material tag '{tag}' not registered");
            return false;
        };
        self.target.set_vec3(MATERIAL_DIFFUSE_UNIFORM, material.diffuse);
        self.target.set_vec3(MATERIAL_SPECULAR_UNIFORM, material.specular);
        self.target.set_float(MATERIAL_SHININESS_UNIFORM, material.shininess);
        true
    }

    pub fn draw(&mut self, kind: MeshKind, flags: MeshFlags) {
        self.target.draw_mesh(kind, flags);
    }

    /// Draw with every part of the mesh enabled.
    pub fn draw_full(&mut self, kind: MeshKind) {
        self.draw(kind, MeshFlags::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Mat4, Vec3};
    use tableau_assets::{
        AssetError, DecodedImage, ImageDecoder, MaterialDescriptor, TextureBackend, TextureHandle,
    };
    use tableau_common::{Command, CommandLog, UniformValue};

    struct SolidDecoder;

    impl ImageDecoder for SolidDecoder {
        fn decode(&self, _path: &std::path::Path) -> Result<DecodedImage, AssetError> {
            Ok(DecodedImage {
                width: 1,
                height: 1,
                channels: 3,
                pixels: vec![200, 100, 50],
            })
        }
    }

    #[derive(Default)]
    struct CountingBackend(u32);

    impl TextureBackend for CountingBackend {
        fn create_texture(
            &mut self,
            _image: &DecodedImage,
            _label: &str,
        ) -> Result<TextureHandle, AssetError> {
            self.0 += 1;
            Ok(TextureHandle(self.0))
        }
        fn bind(&mut self, _slot: usize, _handle: TextureHandle) {}
        fn release(&mut self, _handle: TextureHandle) {}
    }

    fn registry() -> ResourceRegistry {
        let mut reg = ResourceRegistry::new();
        let mut gpu = CountingBackend::default();
        for tag in ["wood", "wall"] {
            reg.register_texture(&SolidDecoder, &mut gpu, format!("{tag}.jpg"), tag)
                .unwrap();
        }
        for m in MaterialDescriptor::presets() {
            reg.register_material(m);
        }
        reg
    }

    #[test]
    fn transform_pushes_model_matrix() {
        let reg = registry();
        let mut log = CommandLog::new();
        let t = Transform::new(Vec3::splat(2.0), Vec3::new(0.0, 90.0, 0.0), Vec3::X);
        DrawSubmitter::new(&mut log, &reg).set_transform(&t);
        assert_eq!(log.latest(MODEL_UNIFORM), Some(UniformValue::Mat4(t.model_matrix())));
        assert_ne!(t.model_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn color_mode_disables_texture() {
        let reg = registry();
        let mut log = CommandLog::new();
        DrawSubmitter::new(&mut log, &reg).set_color(Vec4::new(0.16, 0.11, 0.07, 1.0));
        assert_eq!(log.latest(USE_TEXTURE_UNIFORM), Some(UniformValue::Bool(false)));
        assert_eq!(
            log.latest(COLOR_UNIFORM),
            Some(UniformValue::Vec4(Vec4::new(0.16, 0.11, 0.07, 1.0)))
        );
    }

    #[test]
    fn texture_mode_pushes_registration_slot() {
        let reg = registry();
        let mut log = CommandLog::new();
        let mut submit = DrawSubmitter::new(&mut log, &reg);
        assert!(submit.set_texture("wall"));
        assert_eq!(log.latest(USE_TEXTURE_UNIFORM), Some(UniformValue::Bool(true)));
        assert_eq!(log.latest(TEXTURE_UNIFORM), Some(UniformValue::Int(1)));
    }

    #[test]
    fn unknown_texture_gets_sentinel_slot() {
        let reg = registry();
        let mut log = CommandLog::new();
        assert!(!DrawSubmitter::new(&mut log, &reg).set_texture("unregistered_tag"));
        assert_eq!(log.latest(TEXTURE_UNIFORM), Some(UniformValue::Int(-1)));
    }

    #[test]
    fn material_pushes_three_uniforms() {
        let reg = registry();
        let mut log = CommandLog::new();
        assert!(DrawSubmitter::new(&mut log, &reg).set_material("tableTop"));
        assert_eq!(
            log.latest(MATERIAL_DIFFUSE_UNIFORM),
            Some(UniformValue::Vec3(Vec3::new(0.80, 0.76, 0.70)))
        );
        assert_eq!(
            log.latest(MATERIAL_SHININESS_UNIFORM),
            Some(UniformValue::Float(256.0))
        );
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn unknown_material_leaves_previous_uniforms() {
        let reg = registry();
        let mut log = CommandLog::new();
        let mut submit = DrawSubmitter::new(&mut log, &reg);
        submit.set_material("ceramic");
        assert!(!submit.set_material("unobtainium"));

        assert_eq!(log.len(), 3);
        assert_eq!(log.write_count(MATERIAL_SHININESS_UNIFORM), 1);
        assert_eq!(
            log.latest(MATERIAL_SHININESS_UNIFORM),
            Some(UniformValue::Float(12.0))
        );
    }

    #[test]
    fn uv_scale_and_draw_forward_in_order() {
        let reg = registry();
        let mut log = CommandLog::new();
        let mut submit = DrawSubmitter::new(&mut log, &reg);
        submit.set_uv_scale(2.0, 0.5);
        submit.draw(MeshKind::Cylinder, MeshFlags::sides_only());
        submit.draw_full(MeshKind::Box);

        assert_eq!(
            log.commands()[0],
            Command::Uniform {
                name: UV_SCALE_UNIFORM.into(),
                value: UniformValue::Vec2(Vec2::new(2.0, 0.5)),
            }
        );
        assert_eq!(
            log.draws(),
            vec![
                (MeshKind::Cylinder, MeshFlags::sides_only()),
                (MeshKind::Box, MeshFlags::default()),
            ]
        );
    }
}
