use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tableau_assets::SceneManifest;
use tableau_input::KeyBindings;
use tableau_view::ViewConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    /// Hide and confine the cursor so mouse look never leaves the window.
    pub grab_cursor: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 800,
            title: "tableau".into(),
            grab_cursor: true,
        }
    }
}

/// Everything the desktop viewer reads from its config file.
///
/// `camera`/`projection` and `textures`/`materials` sit at the top level next
/// to `window` and `bindings`; each crate owns the shape of its sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    #[serde(flatten)]
    pub view: ViewConfig,
    pub bindings: KeyBindings,
    #[serde(flatten)]
    pub manifest: SceneManifest,
    /// Use the daylight rig; when off, objects show their raw color.
    pub lighting: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            view: ViewConfig::default(),
            bindings: KeyBindings::default(),
            manifest: SceneManifest::default(),
            lighting: true,
        }
    }
}

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "tableau.yaml";

impl AppConfig {
    /// [`DEFAULT_CONFIG_FILE`] in the working directory, if there is one.
    pub fn default_path() -> Option<PathBuf> {
        let path = PathBuf::from(DEFAULT_CONFIG_FILE);
        path.is_file().then_some(path)
    }

    /// Load `path`, or the defaults when no path is given. Texture paths are
    /// resolved against the config file's directory.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            tracing::info!("no config file given, using defaults");
            return Ok(Self::default());
        };
        let mut config: AppConfig = tableau_common::load_config(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        if let Some(dir) = path.parent() {
            config.manifest.resolve_paths(dir);
        }
        let unbound = config.bindings.unbound_actions();
        if !unbound.is_empty() {
            tracing::warn!("no key bound to {unbound:?}");
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tableau_input::Action;

    #[test]
    fn defaults_give_a_1000_by_800_window() {
        let c = AppConfig::default();
        assert_eq!((c.window.width, c.window.height), (1000, 800));
        assert_eq!(c.view.camera.zoom, 80.0);
        assert!(c.manifest.textures.is_empty());
        assert!(c.lighting);
    }

    #[test]
    fn sections_parse_side_by_side() {
        let yaml = r#"
window:
  width: 1280
  title: kitchen
camera:
  speed: 4.0
projection:
  ortho_half_extent: 12.0
bindings:
  KeyW: forward
  Escape: quit
textures:
  - { path: textures/wall.jpg, tag: wall }
materials:
  - { tag: glass, diffuse: [0.1, 0.1, 0.1], specular: [1.0, 1.0, 1.0], shininess: 96.0 }
lighting: false
"#;
        let c: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(c.window.width, 1280);
        assert_eq!(c.window.height, 800);
        assert_eq!(c.view.camera.speed, 4.0);
        assert_eq!(c.view.projection.ortho_half_extent, 12.0);
        assert_eq!(c.bindings.action_for("Escape"), Some(Action::Quit));
        assert_eq!(c.bindings.action_for("KeyS"), None);
        assert_eq!(c.manifest.textures[0].tag, "wall");
        assert_eq!(c.manifest.materials[0].shininess, 96.0);
        assert!(!c.lighting);
    }

    #[test]
    fn shipped_config_lists_every_scene_texture() {
        use crate::scene::CounterScene;
        use tableau_render::SceneScript;

        let c: AppConfig = serde_yaml::from_str(include_str!("../tableau.yaml")).unwrap();
        assert_eq!(c.manifest.textures.len(), 8);
        let listed: Vec<&str> = c.manifest.textures.iter().map(|t| t.tag.as_str()).collect();
        for tag in CounterScene::new().required_tags() {
            assert!(listed.contains(&tag), "{tag} missing from tableau.yaml");
        }
        assert_eq!(c.view, ViewConfig::default());
        assert_eq!(c.bindings, KeyBindings::default());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(AppConfig::load(Some(Path::new("/no/such/tableau.yaml"))).is_err());
        assert_eq!(AppConfig::load(None).unwrap(), AppConfig::default());
    }
}
