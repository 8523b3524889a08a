use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Phong surface parameters looked up by tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialDescriptor {
    pub tag: String,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub shininess: f32,
}

impl MaterialDescriptor {
    pub fn new(tag: impl Into<String>, diffuse: Vec3, specular: Vec3, shininess: f32) -> Self {
        Self {
            tag: tag.into(),
            diffuse,
            specular,
            shininess,
        }
    }

    /// The built-in material library.
    pub fn presets() -> Vec<MaterialDescriptor> {
        let m = |tag: &str, d: [f32; 3], s: [f32; 3], shininess: f32| {
            MaterialDescriptor::new(tag, Vec3::from(d), Vec3::from(s), shininess)
        };
        vec![
            m("grayMatte", [0.45, 0.45, 0.45], [0.1, 0.1, 0.1], 2.0),
            m("ceramic", [0.95, 0.93, 0.90], [0.20, 0.20, 0.19], 12.0),
            m("wood", [0.6, 0.4, 0.2], [0.15, 0.1, 0.05], 8.0),
            m("woodie", [0.55, 0.35, 0.18], [0.2, 0.15, 0.08], 12.0),
            m("lightWood", [0.75, 0.65, 0.50], [0.1, 0.1, 0.08], 4.0),
            m("darkMetal", [0.08, 0.08, 0.08], [0.6, 0.6, 0.6], 32.0),
            m("counter", [0.82, 0.78, 0.72], [0.92, 0.90, 0.88], 128.0),
            m("tableTop", [0.80, 0.76, 0.70], [0.98, 0.97, 0.95], 256.0),
            m("metal", [0.5, 0.5, 0.5], [0.6, 0.6, 0.6], 24.0),
            m("foliage", [0.16, 0.46, 0.14], [0.12, 0.22, 0.10], 14.0),
            m("bark", [0.30, 0.24, 0.18], [0.05, 0.04, 0.03], 2.0),
            m("soil", [0.25, 0.18, 0.10], [0.02, 0.02, 0.02], 1.0),
            m("napkin", [0.95, 0.95, 0.93], [0.10, 0.10, 0.10], 4.0),
            m("wall", [0.95, 0.95, 0.90], [0.02, 0.02, 0.02], 1.0),
            m("cabinetWhite", [0.78, 0.78, 0.77], [0.12, 0.12, 0.11], 12.0),
            m("stainless", [0.40, 0.40, 0.41], [0.55, 0.55, 0.56], 48.0),
            m("fridgeHandle", [0.14, 0.14, 0.14], [0.35, 0.35, 0.35], 32.0),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn preset_tags_are_unique() {
        let presets = MaterialDescriptor::presets();
        let tags: BTreeSet<_> = presets.iter().map(|m| m.tag.as_str()).collect();
        assert_eq!(tags.len(), presets.len());
        assert!(tags.contains("tableTop"));
    }

    #[test]
    fn presets_have_positive_shininess() {
        assert!(MaterialDescriptor::presets().iter().all(|m| m.shininess >= 1.0));
    }

    #[test]
    fn parses_from_yaml() {
        let m: MaterialDescriptor = serde_yaml::from_str(
            "tag: glass\ndiffuse: [0.1, 0.1, 0.1]\nspecular: [1.0, 1.0, 1.0]\nshininess: 96.0\n",
        )
        .unwrap();
        assert_eq!(m.tag, "glass");
        assert_eq!(m.specular, Vec3::ONE);
    }
}
