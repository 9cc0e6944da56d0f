//! Top-level stage state machine: Intro → Loading → Scene.
//!
//! The intro waits for the user's call to action. Loading runs a simulated
//! progress counter from 0 to 100, driven by a [`TimedTask`]. Reaching 100
//! (or skipping) mounts the scene, which is terminal.

mod task;

use std::fmt;
use std::time::Duration;

pub use task::TimedTask;

use crate::options::LoadingOptions;

/// Loading percent at which the scene is mounted.
pub const LOADING_COMPLETE: u8 = 100;

/// Mutually exclusive top-level views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Stage {
    /// Title card with the call to action.
    #[default]
    Intro,
    /// Simulated loading bar.
    Loading,
    /// The interactive comet scene.
    Scene,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Intro => "intro",
            Self::Loading => "loading",
            Self::Scene => "scene",
        };
        f.write_str(name)
    }
}

/// A stage change, reported so the owner can mount and unmount views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Stage being left.
    pub from: Stage,
    /// Stage being entered.
    pub to: Stage,
}

/// Drives the [`Stage`] transitions and the loading counter.
#[derive(Debug)]
pub struct StageSequencer {
    stage: Stage,
    percent: u8,
    step: u8,
    period: Duration,
    task: Option<TimedTask>,
}

impl StageSequencer {
    /// Sequencer in [`Stage::Intro`] with the given loading pacing.
    #[must_use]
    pub fn new(loading: &LoadingOptions) -> Self {
        Self {
            stage: Stage::Intro,
            percent: 0,
            step: loading.step.max(1),
            period: loading.period(),
            task: None,
        }
    }

    /// Current stage.
    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Loading counter in [0, 100].
    #[must_use]
    pub fn loading_percent(&self) -> u8 {
        self.percent
    }

    /// Whether a loading task is scheduled.
    #[must_use]
    pub fn has_pending_task(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_cancelled())
    }

    /// Leave the intro and start loading. No-op outside [`Stage::Intro`].
    pub fn begin(&mut self) -> Option<Transition> {
        if self.stage != Stage::Intro {
            log::trace!("begin ignored in {} stage", self.stage);
            return None;
        }
        self.percent = 0;
        self.task = Some(TimedTask::new(self.period));
        Some(self.enter(Stage::Loading))
    }

    /// Feed elapsed time to the loading task. Returns the transition to
    /// [`Stage::Scene`] on the tick that reaches 100.
    pub fn advance(&mut self, dt: Duration) -> Option<Transition> {
        if self.stage != Stage::Loading {
            return None;
        }
        let fires = self.task.as_mut().map_or(0, |task| task.advance(dt));
        if fires == 0 {
            return None;
        }
        let gained = u32::from(self.step).saturating_mul(fires);
        let percent = u32::from(self.percent)
            .saturating_add(gained)
            .min(u32::from(LOADING_COMPLETE));
        self.percent = u8::try_from(percent).unwrap_or(LOADING_COMPLETE);

        (self.percent >= LOADING_COMPLETE).then(|| self.finish_loading())
    }

    /// Jump straight to the scene. No-op unless loading.
    pub fn complete_loading(&mut self) -> Option<Transition> {
        if self.stage != Stage::Loading {
            log::trace!("complete_loading ignored in {} stage", self.stage);
            return None;
        }
        self.percent = LOADING_COMPLETE;
        Some(self.finish_loading())
    }

    /// Cancel any pending task. Safe to call repeatedly.
    pub fn unmount(&mut self) {
        if let Some(mut task) = self.task.take() {
            task.cancel();
        }
    }

    fn finish_loading(&mut self) -> Transition {
        self.unmount();
        self.enter(Stage::Scene)
    }

    fn enter(&mut self, to: Stage) -> Transition {
        let transition = Transition {
            from: self.stage,
            to,
        };
        self.stage = to;
        log::info!("stage {} -> {}", transition.from, transition.to);
        transition
    }
}

impl Drop for StageSequencer {
    fn drop(&mut self) {
        self.unmount();
    }
}
