//! Tagged resource registry: textures and materials looked up by string tag.
//!
//! Textures are decoded through an [`ImageDecoder`] and uploaded through a
//! [`TextureBackend`]; the registry itself never touches a GPU API.
//!
//! # Invariants
//! - A texture's slot is its registration index; `bind_all` binds slot i to unit i.
//! - Lookups scan in registration order and return the first match.
//! - A failed registration leaves the registry unchanged.
//! - Material queries hand out copies; the registry's descriptors are immutable.

use std::path::PathBuf;

pub mod decode;
pub mod manifest;
pub mod material;
pub mod registry;
pub mod texture;

pub use decode::{DecodedImage, ImageCrateDecoder, ImageDecoder};
pub use manifest::{SceneManifest, TextureEntry};
pub use material::MaterialDescriptor;
pub use registry::{LoadReport, ResourceRegistry};
pub use texture::{TaggedTexture, TextureBackend, TextureHandle, mip_level_count};

/// Errors from resource operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("could not decode image {}: {message}", .path.display())]
    Decode { path: PathBuf, message: String },
    #[error("unsupported channel count {channels} in {}", .path.display())]
    UnsupportedChannels { path: PathBuf, channels: u8 },
    #[error("texture upload failed: {0}")]
    Upload(String),
}
