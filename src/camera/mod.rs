//! Camera system for the timeline scene.
//!
//! A follower rig that tracks the comet along the timeline path, plus the
//! perspective camera and GPU uniform built from its output.

/// Core camera struct and GPU uniform types.
pub mod core;
/// Follower camera rig and orbit dragging.
pub mod rig;

pub use self::core::{Camera, CameraUniform};
pub use self::rig::{CameraRig, CameraState, RigSettings};
