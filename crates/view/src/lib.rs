//! View core: camera pose, projection mode, mouse tracking and the per-frame
//! protocol that turns input into view/projection uniforms.
//!
//! # Invariants
//! - The camera basis stays orthonormal after every update.
//! - Exactly one projection mode is active; it changes only on explicit command.
//! - The first cursor sample after start or after any projection change is a
//!   reference sample and never moves the camera.
//! - All session state lives in one [`ViewContext`]; there are no globals.

pub mod camera;
pub mod config;
pub mod frame;
pub mod mouse;
pub mod projection;
pub mod timing;

pub use camera::Camera;
pub use config::{CameraConfig, ViewConfig};
pub use frame::{FrameOutcome, ViewContext};
pub use mouse::MouseTracker;
pub use projection::{Projection, ProjectionConfig, ProjectionMode};
pub use timing::FrameTiming;
