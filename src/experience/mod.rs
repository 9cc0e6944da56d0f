//! Top-level experience: the stage sequencer plus the mounted scene view.
//!
//! The [`Experience`] is the single entry point for the host loop. Input
//! arrives as [`Command`]s through [`Experience::execute`]; once per
//! rendered frame [`Experience::update`] advances time and returns the
//! [`FrameSnapshot`] to draw.
//!
//! ```ignore
//! let mut experience = Experience::new(Options::default())?;
//! experience.execute(Command::Begin);
//! let snapshot = experience.update(dt);
//! ```

mod command;

use std::time::Duration;

pub use command::Command;

use crate::camera::CameraState;
use crate::error::LookupError;
use crate::options::Options;
use crate::scene::{resting_camera, FrameSnapshot, SceneView, StaticBodies};
use crate::stage::{Stage, StageSequencer, Transition};
use crate::timeline::Curve;

/// Owns the stage state machine and, once loading completes, the
/// [`SceneView`].
#[derive(Debug)]
pub struct Experience {
    options: Options,
    curve: Curve,
    bodies: StaticBodies,
    sequencer: StageSequencer,
    scene: Option<SceneView>,
}

impl Experience {
    /// Mount the experience in [`Stage::Intro`].
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Curve`] if the configured timeline path is
    /// invalid.
    pub fn new(options: Options) -> Result<Self, LookupError> {
        let curve = options.timeline.build_curve()?;
        let bodies = StaticBodies::new(&options.scene);
        let sequencer = StageSequencer::new(&options.loading);
        log::info!("experience mounted in {} stage", sequencer.stage());
        Ok(Self {
            options,
            curve,
            bodies,
            sequencer,
            scene: None,
        })
    }

    /// Apply one command. Commands aimed at a view that is not mounted are
    /// dropped.
    pub fn execute(&mut self, command: Command) {
        match command {
            Command::Begin => {
                let transition = self.sequencer.begin();
                self.apply(transition);
            }
            Command::SkipLoading => {
                let transition = self.sequencer.complete_loading();
                self.apply(transition);
            }
            Command::ScrollTimeline { delta_y } => {
                self.with_scene(|scene| scene.on_scroll(delta_y));
            }
            Command::OrbitCamera { delta } => {
                self.with_scene(|scene| scene.orbit(delta));
            }
            Command::ResetTimeline => self.with_scene(SceneView::reset_timeline),
            Command::ResetCamera => self.with_scene(SceneView::reset_camera),
        }
    }

    /// Advance one frame of `dt` and return what to draw.
    ///
    /// The sequencer moves first, so the frame that completes loading
    /// already shows the scene.
    pub fn update(&mut self, dt: Duration) -> FrameSnapshot {
        let transition = self.sequencer.advance(dt);
        self.apply(transition);

        FrameSnapshot {
            stage: self.sequencer.stage(),
            loading_percent: self.sequencer.loading_percent(),
            scene: self.scene.as_mut().map(|scene| scene.frame(dt)),
        }
    }

    /// Tear down the scene view and any pending loading task.
    pub fn unmount(&mut self) {
        self.sequencer.unmount();
        if self.scene.take().is_some() {
            log::info!("scene unmounted");
        }
    }

    /// Current stage.
    #[must_use]
    pub fn stage(&self) -> Stage {
        self.sequencer.stage()
    }

    /// Loading counter in [0, 100].
    #[must_use]
    pub fn loading_percent(&self) -> u8 {
        self.sequencer.loading_percent()
    }

    /// Options the experience was built from.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Static scene bodies.
    #[must_use]
    pub fn bodies(&self) -> &StaticBodies {
        &self.bodies
    }

    /// The mounted scene view, if loading has completed.
    #[must_use]
    pub fn scene(&self) -> Option<&SceneView> {
        self.scene.as_ref()
    }

    /// Camera used while no scene is mounted.
    #[must_use]
    pub fn resting_camera(&self) -> CameraState {
        resting_camera(&self.options)
    }

    fn apply(&mut self, transition: Option<Transition>) {
        let Some(transition) = transition else {
            return;
        };
        if transition.to == Stage::Scene && self.scene.is_none() {
            self.scene = Some(SceneView::new(self.curve.clone(), &self.options));
        }
    }

    fn with_scene(&mut self, f: impl FnOnce(&mut SceneView)) {
        match self.scene.as_mut() {
            Some(scene) => f(scene),
            None => log::trace!(
                "command ignored in {} stage",
                self.sequencer.stage()
            ),
        }
    }
}
