use serde::{Deserialize, Serialize};

use crate::experience::Command;

/// Experience-level actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// begin = "Enter"
/// reset_timeline = "KeyR"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Leave the intro and start loading.
    Begin,
    /// Finish the loading bar immediately.
    SkipLoading,
    /// Scroll the timeline back to the start.
    ResetTimeline,
    /// Put the camera back at its starting position.
    ResetCamera,
}

impl KeyAction {
    /// The parameterless [`Command`] this action triggers.
    #[must_use]
    pub fn to_command(self) -> Command {
        match self {
            Self::Begin => Command::Begin,
            Self::SkipLoading => Command::SkipLoading,
            Self::ResetTimeline => Command::ResetTimeline,
            Self::ResetCamera => Command::ResetCamera,
        }
    }
}
