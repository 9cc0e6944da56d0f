use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::input::KeyAction;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "RawKeybindings")]
/// Configurable keyboard bindings mapping actions to key codes.
pub struct KeybindingOptions {
    /// Maps action → key string (e.g. `Begin` → `"Enter"`).
    pub bindings: HashMap<KeyAction, String>,
    /// Reverse lookup cache (key string → action). Rebuilt on load.
    #[serde(skip)]
    key_to_action: HashMap<String, KeyAction>,
}

/// Wire form; converting rebuilds the reverse map.
#[derive(Deserialize)]
#[serde(default)]
struct RawKeybindings {
    bindings: HashMap<KeyAction, String>,
}

impl Default for RawKeybindings {
    fn default() -> Self {
        Self {
            bindings: default_bindings(),
        }
    }
}

impl From<RawKeybindings> for KeybindingOptions {
    fn from(raw: RawKeybindings) -> Self {
        let mut opts = Self {
            bindings: raw.bindings,
            key_to_action: HashMap::new(),
        };
        opts.rebuild_reverse_map();
        opts
    }
}

fn default_bindings() -> HashMap<KeyAction, String> {
    HashMap::from([
        (KeyAction::Begin, "Enter".into()),
        (KeyAction::SkipLoading, "Escape".into()),
        (KeyAction::ResetTimeline, "KeyR".into()),
        (KeyAction::ResetCamera, "KeyC".into()),
    ])
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        Self::from(RawKeybindings::default())
    }
}

impl PartialEq for KeybindingOptions {
    fn eq(&self, other: &Self) -> bool {
        self.bindings == other.bindings
    }
}

impl Eq for KeybindingOptions {}

impl KeybindingOptions {
    /// Rebuild the reverse lookup map (key string → action).
    pub fn rebuild_reverse_map(&mut self) {
        self.key_to_action.clear();
        for (action, key) in &self.bindings {
            let _ = self.key_to_action.insert(key.clone(), *action);
        }
    }

    /// Bind `action` to `key`, replacing its previous key.
    pub fn bind(&mut self, action: KeyAction, key: impl Into<String>) {
        let _ = self.bindings.insert(action, key.into());
        self.rebuild_reverse_map();
    }

    /// Look up the action for a key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<KeyAction> {
        self.key_to_action.get(key).copied()
    }
}
