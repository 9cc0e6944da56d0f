//! The mounted comet scene.
//!
//! A [`SceneView`] owns the timeline path, the scroll-driven progress and
//! the follower camera rig. Each frame it produces a [`SceneFrame`] that,
//! together with the [`StaticBodies`], fully describes what to draw.

mod bodies;
mod frame;

use std::f32::consts::TAU;
use std::sync::Arc;
use std::time::Duration;

pub use bodies::{scatter_stars, Light, StaticBodies};
pub use frame::{FrameSnapshot, LabelAnchor, SceneFrame};
use glam::{Vec2, Vec3};

use crate::camera::{CameraRig, CameraState, RigSettings};
use crate::options::Options;
use crate::timeline::{Curve, ProgressController};

// ---------------------------------------------------------------------------
// SceneView
// ---------------------------------------------------------------------------

/// The interactive scene: comet on the timeline, followed by the camera.
///
/// The scroll listener is attached for exactly the lifetime of the view.
#[derive(Debug)]
pub struct SceneView {
    curve: Curve,
    progress: ProgressController,
    rig: CameraRig,
    /// Offset direction from the comet at the start of the path.
    home_direction: Vec3,
    labels: Arc<[LabelAnchor]>,
    path: Arc<[Vec3]>,
    rotation_per_frame: f32,
    planet_rotation: f32,
}

impl SceneView {
    /// Mount a view over `curve`, configured by `options`.
    #[must_use]
    pub fn new(curve: Curve, options: &Options) -> Self {
        let timeline = &options.timeline;
        let mut progress =
            ProgressController::new(timeline.scroll_gain, timeline.smoothing);
        progress.mount();

        let resting_camera = resting_camera(options);
        let rig = CameraRig::new(
            resting_camera.position,
            resting_camera.look_target,
            RigSettings::from(&options.camera),
        );

        let labels: Arc<[LabelAnchor]> = timeline
            .labels
            .iter()
            .map(|label| LabelAnchor {
                text: label.text.clone(),
                position: curve.point_at(label.t),
            })
            .collect();
        let path: Arc<[Vec3]> = curve.sample(timeline.path_samples).into();
        let home_direction = resting_camera.position - curve.start();

        log::info!(
            "scene mounted: {} control points, path length {:.1}",
            curve.control_points().len(),
            curve.length()
        );

        Self {
            curve,
            progress,
            rig,
            home_direction,
            labels,
            path,
            rotation_per_frame: options.scene.rotation_per_frame,
            planet_rotation: 0.0,
        }
    }

    /// Advance one rendered frame: progress, then camera, then planet spin.
    pub fn frame(&mut self, dt: Duration) -> SceneFrame {
        let t = self.progress.tick(dt.as_secs_f32());
        let camera = self.rig.follow(&self.curve, t);
        self.planet_rotation =
            (self.planet_rotation + self.rotation_per_frame).rem_euclid(TAU);

        SceneFrame {
            camera,
            comet: camera.look_target,
            planet_rotation: self.planet_rotation,
            labels: Arc::clone(&self.labels),
            path: Arc::clone(&self.path),
            progress: t,
        }
    }

    /// Forward a wheel delta to the timeline.
    pub fn on_scroll(&mut self, delta_y: f32) {
        self.progress.on_scroll(delta_y);
    }

    /// Orbit the camera around the comet.
    pub fn orbit(&mut self, delta: Vec2) {
        self.rig.orbit(delta);
    }

    /// Scroll the timeline back to its start. The comet eases there.
    pub fn reset_timeline(&mut self) {
        self.progress.reset();
    }

    /// Ease the camera back to the viewing angle it started with.
    pub fn reset_camera(&mut self) {
        self.rig.return_home(self.home_direction);
    }

    /// The timeline path.
    #[must_use]
    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    /// Scroll-driven progress.
    #[must_use]
    pub fn progress(&self) -> &ProgressController {
        &self.progress
    }

    /// Current camera output.
    #[must_use]
    pub fn camera(&self) -> CameraState {
        self.rig.state()
    }

    /// Accumulated planet spin in radians.
    #[must_use]
    pub fn planet_rotation(&self) -> f32 {
        self.planet_rotation
    }
}

impl Drop for SceneView {
    fn drop(&mut self) {
        self.progress.unmount();
    }
}

/// Where the camera sits before the scene takes over: the configured start
/// position, looking at the planet.
#[must_use]
pub fn resting_camera(options: &Options) -> CameraState {
    CameraState {
        position: Vec3::from(options.camera.initial_position),
        look_target: Vec3::ZERO,
    }
}
