use crate::material::MaterialDescriptor;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One texture to load: image path and the tag draws refer to it by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureEntry {
    pub path: PathBuf,
    pub tag: String,
}

/// The `textures` and `materials` sections of the viewer config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneManifest {
    pub textures: Vec<TextureEntry>,
    pub materials: Vec<MaterialDescriptor>,
    /// Register the built-in material library before `materials`.
    pub material_presets: bool,
}

impl Default for SceneManifest {
    fn default() -> Self {
        Self {
            textures: Vec::new(),
            materials: Vec::new(),
            material_presets: true,
        }
    }
}

impl SceneManifest {
    /// Make relative texture paths relative to `base` (usually the config
    /// file's directory).
    pub fn resolve_paths(&mut self, base: &Path) {
        for entry in &mut self.textures {
            if entry.path.is_relative() {
                entry.path = base.join(&entry.path);
            }
        }
    }

    /// Materials in registration order: presets first, then custom entries.
    pub fn all_materials(&self) -> Vec<MaterialDescriptor> {
        let mut out = if self.material_presets {
            MaterialDescriptor::presets()
        } else {
            Vec::new()
        };
        out.extend(self.materials.iter().cloned());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_textures_and_materials() {
        let yaml = r#"
textures:
  - { path: textures/pot.jpg, tag: pot }
  - { path: /abs/wall.jpg, tag: wall }
materials:
  - { tag: glass, diffuse: [0.1, 0.1, 0.1], specular: [1.0, 1.0, 1.0], shininess: 96.0 }
window:
  width: 1000
"#;
        let mut m: SceneManifest = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(m.textures.len(), 2);
        assert!(m.material_presets);

        m.resolve_paths(Path::new("/scenes/kitchen"));
        assert_eq!(
            m.textures[0].path,
            PathBuf::from("/scenes/kitchen/textures/pot.jpg")
        );
        assert_eq!(m.textures[1].path, PathBuf::from("/abs/wall.jpg"));
    }

    #[test]
    fn custom_materials_follow_presets() {
        let m = SceneManifest {
            materials: vec![MaterialDescriptor::new(
                "glass",
                glam::Vec3::ZERO,
                glam::Vec3::ONE,
                96.0,
            )],
            ..SceneManifest::default()
        };
        let all = m.all_materials();
        assert_eq!(all.len(), MaterialDescriptor::presets().len() + 1);
        assert_eq!(all.last().unwrap().tag, "glass");

        let bare = SceneManifest {
            material_presets: false,
            ..m
        };
        assert_eq!(bare.all_materials().len(), 1);
    }
}
