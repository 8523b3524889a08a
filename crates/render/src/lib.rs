//! Rendering adapter: renderer-agnostic draw submission.
//!
//! # Invariants
//! - Submission only writes to the target; it never reads uniforms back.
//! - Texture and material lookups go through the resource registry, which is
//!   borrowed read-only for the whole frame.
//!
//! Any [`DrawTarget`](tableau_common::DrawTarget) can receive the commands: the
//! wgpu backend, a [`CommandLog`](tableau_common::CommandLog) spy or the
//! [`DebugTextSink`].

mod debug;
pub mod lighting;
pub mod scene;
pub mod submit;

pub use debug::DebugTextSink;
pub use lighting::{DirectionalLight, LightRig, MAX_POINT_LIGHTS, PointLight};
pub use scene::SceneScript;
pub use submit::DrawSubmitter;
