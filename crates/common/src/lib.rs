//! Shared contracts between the viewer core and its GPU-facing collaborators.
//!
//! # Invariants
//! - The uniform sink is write-only: nothing in the core reads values back.
//! - Mesh geometry is owned by the draw backend; the core only names a mesh kind.

pub mod config;
pub mod mesh;
pub mod types;
pub mod uniform;

pub use config::{ConfigError, load_config};
pub use mesh::{DrawTarget, MeshBackend, MeshFlags, MeshKind};
pub use types::Transform;
pub use uniform::{Command, CommandLog, UniformSink, UniformValue};
