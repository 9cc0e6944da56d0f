use std::sync::Arc;

use glam::Vec3;

use crate::camera::CameraState;
use crate::stage::Stage;

/// A timeline caption resolved to a world position.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelAnchor {
    /// Caption text.
    pub text: String,
    /// Point on the path the caption is pinned to.
    pub position: Vec3,
}

/// Dynamic state of the mounted scene for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneFrame {
    /// Camera position and look target.
    pub camera: CameraState,
    /// Comet marker position.
    pub comet: Vec3,
    /// Accumulated planet spin about +Y, in radians.
    pub planet_rotation: f32,
    /// Caption anchors along the path.
    pub labels: Arc<[LabelAnchor]>,
    /// Polyline through the path.
    pub path: Arc<[Vec3]>,
    /// Smoothed timeline progress the frame was built from.
    pub progress: f32,
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    /// Stage being shown.
    pub stage: Stage,
    /// Loading counter in [0, 100].
    pub loading_percent: u8,
    /// Scene state, present only while the scene is mounted.
    pub scene: Option<SceneFrame>,
}

impl FrameSnapshot {
    /// Camera for this frame, or `resting` when no scene is mounted.
    #[must_use]
    pub fn camera_or(&self, resting: CameraState) -> CameraState {
        self.scene.as_ref().map_or(resting, |scene| scene.camera)
    }
}
