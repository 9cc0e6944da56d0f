//! The experience's complete interactive vocabulary.
//!
//! Every user-facing operation, whether triggered by a key press, a mouse
//! gesture or a programmatic call, is represented as a `Command`. Consumers
//! construct commands and pass them to
//! [`Experience::execute`](super::Experience::execute).

use glam::Vec2;

/// A discrete or parameterized operation the experience can perform.
///
/// The experience never cares *how* a command was triggered:
///
/// ```ignore
/// experience.execute(Command::Begin);
/// experience.execute(Command::ScrollTimeline { delta_y: 100.0 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    // ── Stage ───────────────────────────────────────────────────────
    /// Leave the intro and start the loading bar.
    Begin,

    /// Finish the loading bar now and mount the scene.
    SkipLoading,

    // ── Timeline ────────────────────────────────────────────────────
    /// Move the timeline target by a wheel delta (pixels, positive moves
    /// toward the planet).
    ScrollTimeline {
        /// Vertical wheel delta.
        delta_y: f32,
    },

    /// Put the timeline back at its start.
    ResetTimeline,

    // ── Camera ──────────────────────────────────────────────────────
    /// Orbit the camera around the comet by `delta` pixels of drag.
    OrbitCamera {
        /// Horizontal and vertical drag delta.
        delta: Vec2,
    },

    /// Put the camera back at its starting position.
    ResetCamera,
}
