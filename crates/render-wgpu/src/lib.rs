//! wgpu render backend for the tableau viewer.
//!
//! The core talks to this crate only through named uniforms and mesh draws.
//! [`FrameRecorder`] turns those into plain-old-data uniform blocks on the
//! CPU; [`WgpuRenderer`] replays the recorded draws on the GPU.
//!
//! # Invariants
//! - One draw records one snapshot of the per-object uniforms; later writes
//!   never affect draws already recorded.
//! - Texture slot `-1`, and any slot nothing is bound to, samples a 1x1
//!   white fallback.

mod gpu;
pub mod meshes;
pub mod recorder;
mod shaders;
pub mod textures;

pub use gpu::WgpuRenderer;
pub use meshes::{MeshData, Vertex};
pub use recorder::{FrameRecorder, FrameUniforms, ObjectUniforms, RecordedDraw};
pub use textures::{TextureStore, WgpuTextureBackend};
