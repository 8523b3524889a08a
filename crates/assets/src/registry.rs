use crate::AssetError;
use crate::decode::ImageDecoder;
use crate::manifest::SceneManifest;
use crate::material::MaterialDescriptor;
use crate::texture::{TaggedTexture, TextureBackend, TextureHandle};
use std::path::Path;

/// Outcome of [`ResourceRegistry::load_manifest`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// Tags of textures that registered.
    pub loaded: Vec<String>,
    /// `(tag, reason)` for textures that did not.
    pub failed: Vec<(String, String)>,
    pub materials: usize,
}

/// Owns registered textures and materials.
///
/// Scale is tens of entries, so lookups are linear scans in registration
/// order. Duplicate tags are allowed; the first registration wins.
#[derive(Debug, Clone, Default)]
pub struct ResourceRegistry {
    textures: Vec<TaggedTexture>,
    materials: Vec<MaterialDescriptor>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `path`, upload it and register it under `tag`.
    ///
    /// Returns the texture's slot. Only 3- and 4-channel images are accepted;
    /// on any failure nothing is registered.
    pub fn register_texture(
        &mut self,
        decoder: &dyn ImageDecoder,
        backend: &mut dyn TextureBackend,
        path: impl AsRef<Path>,
        tag: impl Into<String>,
    ) -> Result<usize, AssetError> {
        let path = path.as_ref();
        let tag = tag.into();

        let image = decoder.decode(path).inspect_err(|e| {
            tracing::warn!("could not load texture '{tag}': {e}");
        })?;
        if !matches!(image.channels, 3 | 4) {
            let err = AssetError::UnsupportedChannels {
                path: path.to_path_buf(),
                channels: image.channels,
            };
            tracing::warn!("could not load texture '{tag}': {err}");
            return Err(err);
        }

        let handle = backend.create_texture(&image, &tag).inspect_err(|e| {
            tracing::warn!("could not upload texture '{tag}': {e}");
        })?;

        if self.find_slot(&tag).is_some() {
            tracing::warn!("texture tag '{tag}' already registered; lookups return the first");
        }
        let slot = self.textures.len();
        tracing::info!(
            "loaded texture '{tag}' from {}: {}x{}, {} channels, slot {slot}",
            path.display(),
            image.width,
            image.height,
            image.channels
        );
        self.textures.push(TaggedTexture { tag, handle, slot });
        Ok(slot)
    }

    /// Bind every texture to the unit equal to its slot.
    pub fn bind_all(&self, backend: &mut dyn TextureBackend) {
        for texture in &self.textures {
            backend.bind(texture.slot, texture.handle);
        }
    }

    /// Free every texture. The registry's textures are drained, so later
    /// lookups miss and a second call does nothing.
    pub fn release_all(&mut self, backend: &mut dyn TextureBackend) {
        let count = self.textures.len();
        for texture in self.textures.drain(..) {
            backend.release(texture.handle);
        }
        if count > 0 {
            tracing::debug!("released {count} textures");
        }
    }

    pub fn find_handle(&self, tag: &str) -> Option<TextureHandle> {
        self.textures.iter().find(|t| t.tag == tag).map(|t| t.handle)
    }

    pub fn find_slot(&self, tag: &str) -> Option<usize> {
        self.textures.iter().find(|t| t.tag == tag).map(|t| t.slot)
    }

    pub fn textures(&self) -> &[TaggedTexture] {
        &self.textures
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    pub fn register_material(&mut self, material: MaterialDescriptor) {
        if self.materials.iter().any(|m| m.tag == material.tag) {
            tracing::warn!(
                "material tag '{}' already registered; lookups return the first",
                material.tag
            );
        }
        self.materials.push(material);
    }

    /// Copy of the first material registered under `tag`.
    pub fn find_material(&self, tag: &str) -> Option<MaterialDescriptor> {
        self.materials.iter().find(|m| m.tag == tag).cloned()
    }

    pub fn materials(&self) -> &[MaterialDescriptor] {
        &self.materials
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// Register everything a manifest lists. Texture failures are logged and
    /// skipped so one bad file does not stop the rest from loading.
    pub fn load_manifest(
        &mut self,
        manifest: &SceneManifest,
        decoder: &dyn ImageDecoder,
        backend: &mut dyn TextureBackend,
    ) -> LoadReport {
        let mut report = LoadReport::default();
        for entry in &manifest.textures {
            match self.register_texture(decoder, backend, &entry.path, entry.tag.clone()) {
                Ok(_) => report.loaded.push(entry.tag.clone()),
                Err(e) => report.failed.push((entry.tag.clone(), e.to_string())),
            }
        }
        for material in manifest.all_materials() {
            self.register_material(material);
            report.materials += 1;
        }
        tracing::info!(
            "manifest loaded: {} textures, {} failed, {} materials",
            report.loaded.len(),
            report.failed.len(),
            report.materials
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::DecodedImage;
    use crate::manifest::TextureEntry;
    use glam::Vec3;
    use std::collections::HashMap;
    use std::path::PathBuf;

    /// Decoder serving in-memory images keyed by path.
    #[derive(Default)]
    struct FakeDecoder {
        images: HashMap<PathBuf, DecodedImage>,
    }

    impl FakeDecoder {
        fn with(mut self, path: &str, channels: u8) -> Self {
            let image = DecodedImage {
                width: 2,
                height: 2,
                channels,
                pixels: vec![128; 4 * channels as usize],
            };
            self.images.insert(PathBuf::from(path), image);
            self
        }
    }

    impl ImageDecoder for FakeDecoder {
        fn decode(&self, path: &Path) -> Result<DecodedImage, AssetError> {
            self.images
                .get(path)
                .cloned()
                .ok_or_else(|| AssetError::Decode {
                    path: path.to_path_buf(),
                    message: "not found".into(),
                })
        }
    }

    /// Backend that records every call.
    #[derive(Default)]
    struct SpyBackend {
        next: u32,
        created: Vec<(TextureHandle, String)>,
        bound: Vec<(usize, TextureHandle)>,
        released: Vec<TextureHandle>,
        fail_uploads: bool,
    }

    impl TextureBackend for SpyBackend {
        fn create_texture(
            &mut self,
            _image: &DecodedImage,
            label: &str,
        ) -> Result<TextureHandle, AssetError> {
            if self.fail_uploads {
                return Err(AssetError::Upload("device lost".into()));
            }
            // Start above zero so handles and slots never coincide.
            self.next += 1;
            let handle = TextureHandle(100 + self.next);
            self.created.push((handle, label.to_string()));
            Ok(handle)
        }

        fn bind(&mut self, slot: usize, handle: TextureHandle) {
            self.bound.push((slot, handle));
        }

        fn release(&mut self, handle: TextureHandle) {
            self.released.push(handle);
        }
    }

    fn decoder() -> FakeDecoder {
        FakeDecoder::default()
            .with("rgb.png", 3)
            .with("rgba.png", 4)
            .with("la.png", 2)
            .with("grey.png", 1)
    }

    #[test]
    fn rgb_and_rgba_get_sequential_slots() {
        let mut reg = ResourceRegistry::new();
        let mut gpu = SpyBackend::default();
        let d = decoder();

        assert_eq!(reg.register_texture(&d, &mut gpu, "rgb.png", "wood").unwrap(), 0);
        assert_eq!(reg.register_texture(&d, &mut gpu, "rgba.png", "wall").unwrap(), 1);
        assert_eq!(reg.find_slot("wood"), Some(0));
        assert_eq!(reg.find_slot("wall"), Some(1));
        assert_ne!(reg.find_handle("wood"), reg.find_handle("wall"));
        assert_eq!(gpu.created.len(), 2);
        assert_eq!(gpu.created[1].1, "wall");
    }

    #[test]
    fn unsupported_channels_register_nothing() {
        let mut reg = ResourceRegistry::new();
        let mut gpu = SpyBackend::default();
        let d = decoder();
        reg.register_texture(&d, &mut gpu, "rgb.png", "wood").unwrap();

        let err = reg.register_texture(&d, &mut gpu, "la.png", "napkin").unwrap_err();
        assert!(matches!(err, AssetError::UnsupportedChannels { channels: 2, .. }));
        assert!(reg.register_texture(&d, &mut gpu, "grey.png", "soil").is_err());
        assert_eq!(reg.texture_count(), 1);
        assert_eq!(reg.find_slot("napkin"), None);
        // Nothing was allocated for the rejected images.
        assert_eq!(gpu.created.len(), 1);
    }

    #[test]
    fn decode_and_upload_failures_register_nothing() {
        let mut reg = ResourceRegistry::new();
        let mut gpu = SpyBackend::default();
        let d = decoder();
        assert!(matches!(
            reg.register_texture(&d, &mut gpu, "missing.png", "pot"),
            Err(AssetError::Decode { .. })
        ));
        gpu.fail_uploads = true;
        assert!(matches!(
            reg.register_texture(&d, &mut gpu, "rgb.png", "pot"),
            Err(AssetError::Upload(_))
        ));
        assert_eq!(reg.texture_count(), 0);
    }

    #[test]
    fn unknown_tags_miss() {
        let reg = ResourceRegistry::new();
        assert_eq!(reg.find_slot("unregistered_tag"), None);
        assert_eq!(reg.find_handle("unregistered_tag"), None);
        assert!(reg.find_material("unregistered_tag").is_none());
    }

    #[test]
    fn duplicate_tag_returns_first() {
        let mut reg = ResourceRegistry::new();
        let mut gpu = SpyBackend::default();
        let d = decoder();
        reg.register_texture(&d, &mut gpu, "rgb.png", "wood").unwrap();
        reg.register_texture(&d, &mut gpu, "rgba.png", "wood").unwrap();
        assert_eq!(reg.find_slot("wood"), Some(0));
        assert_eq!(reg.texture_count(), 2);
    }

    #[test]
    fn bind_all_uses_registration_order() {
        let mut reg = ResourceRegistry::new();
        let mut gpu = SpyBackend::default();
        let d = decoder();
        for (path, tag) in [("rgb.png", "a"), ("rgba.png", "b"), ("rgb.png", "c")] {
            reg.register_texture(&d, &mut gpu, path, tag).unwrap();
        }
        reg.bind_all(&mut gpu);
        let slots: Vec<usize> = gpu.bound.iter().map(|(s, _)| *s).collect();
        assert_eq!(slots, vec![0, 1, 2]);
        assert_eq!(gpu.bound[2].1, reg.find_handle("c").unwrap());
    }

    #[test]
    fn release_all_frees_every_handle_once() {
        let mut reg = ResourceRegistry::new();
        let mut gpu = SpyBackend::default();
        let d = decoder();
        reg.register_texture(&d, &mut gpu, "rgb.png", "a").unwrap();
        reg.register_texture(&d, &mut gpu, "rgba.png", "b").unwrap();

        reg.release_all(&mut gpu);
        assert_eq!(gpu.released.len(), 2);
        assert_eq!(reg.find_slot("a"), None);
        reg.release_all(&mut gpu);
        assert_eq!(gpu.released.len(), 2);
    }

    #[test]
    fn material_lookup_returns_a_copy() {
        let mut reg = ResourceRegistry::new();
        reg.register_material(MaterialDescriptor::new(
            "wood",
            Vec3::new(0.6, 0.4, 0.2),
            Vec3::splat(0.1),
            8.0,
        ));
        let mut copy = reg.find_material("wood").unwrap();
        copy.shininess = 999.0;
        assert_eq!(reg.find_material("wood").unwrap().shininess, 8.0);
    }

    #[test]
    fn load_manifest_skips_bad_textures() {
        let mut reg = ResourceRegistry::new();
        let mut gpu = SpyBackend::default();
        let manifest = SceneManifest {
            textures: vec![
                TextureEntry {
                    path: "rgb.png".into(),
                    tag: "pot".into(),
                },
                TextureEntry {
                    path: "la.png".into(),
                    tag: "napkin".into(),
                },
                TextureEntry {
                    path: "rgba.png".into(),
                    tag: "wall".into(),
                },
            ],
            ..SceneManifest::default()
        };
        let report = reg.load_manifest(&manifest, &decoder(), &mut gpu);
        assert_eq!(report.loaded, vec!["pot".to_string(), "wall".to_string()]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "napkin");
        assert_eq!(report.materials, MaterialDescriptor::presets().len());
        assert_eq!(reg.find_slot("wall"), Some(1));
        assert!(reg.find_material("ceramic").is_some());
    }
}
