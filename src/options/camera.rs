use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection, follow and orbit parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 110.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance. Must reach past the starfield shell.
    #[schemars(skip)]
    pub zfar: f32,
    /// Camera position before the timeline starts.
    #[schemars(skip)]
    pub initial_position: [f32; 3],
    /// Resting distance between the camera and the comet.
    #[schemars(title = "Follow Distance", range(min = 5.0, max = 200.0), extend("step" = 1.0))]
    pub follow_distance: f32,
    /// Fraction of the remaining distance the camera covers per frame.
    #[schemars(title = "Camera Ease", range(min = 0.005, max = 1.0), extend("step" = 0.005))]
    pub ease_factor: f32,
    /// Offset direction used when the camera sits exactly on the comet.
    #[schemars(skip)]
    pub fallback_axis: [f32; 3],
    /// Radians of orbit per pixel of drag.
    #[schemars(title = "Orbit Speed", range(min = 0.001, max = 0.02), extend("step" = 0.001))]
    pub orbit_speed: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 75.0,
            znear: 0.1,
            zfar: 3000.0,
            initial_position: [0.0, 0.0, 30.0],
            follow_distance: 30.0,
            ease_factor: 0.05,
            fallback_axis: [0.0, 0.0, 1.0],
            orbit_speed: 0.005,
        }
    }
}
