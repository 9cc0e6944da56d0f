//! Centralized experience options with TOML preset support.
//!
//! All tweakable settings (timeline path and scroll feel, camera follow,
//! loading pacing, scene bodies, keybindings) are consolidated here.
//! Options serialize to/from TOML presets.

mod camera;
mod keybindings;
mod loading;
mod scene;
mod timeline;

use std::path::Path;

pub use camera::CameraOptions;
pub use keybindings::KeybindingOptions;
pub use loading::LoadingOptions;
pub use scene::{SceneOptions, TextureOptions};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use timeline::{TimelineLabel, TimelineOptions};

use crate::error::LookupError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[camera]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Comet path and scroll behaviour.
    pub timeline: TimelineOptions,
    /// Camera projection, follow and orbit parameters.
    pub camera: CameraOptions,
    /// Simulated loading bar pacing.
    pub loading: LoadingOptions,
    /// Static bodies and lighting.
    pub scene: SceneOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Io`] if the file cannot be read and
    /// [`LookupError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, LookupError> {
        let content = std::fs::read_to_string(path).map_err(LookupError::Io)?;
        let options = Self::from_toml(&content)?;
        log::debug!("loaded options from {}", path.display());
        Ok(options)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::OptionsParse`] on malformed TOML.
    pub fn from_toml(content: &str) -> Result<Self, LookupError> {
        toml::from_str(content)
            .map_err(|e| LookupError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::OptionsParse`] if serialization fails and
    /// [`LookupError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), LookupError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| LookupError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(LookupError::Io)?;
        }
        std::fs::write(path, content).map_err(LookupError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyAction;
    use crate::timeline::{CurveKind, Smoothing};

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[camera]
follow_distance = 45.0
";
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.camera.follow_distance, 45.0);
        // Everything else should be default
        assert_eq!(opts.camera.ease_factor, 0.05);
        assert_eq!(opts.loading.period_ms, 40);
        assert_eq!(opts.timeline.control_points.len(), 3);
    }

    #[test]
    fn tagged_enums_parse() {
        let toml_str = r#"
[timeline]
scroll_gain = 0.00001
curve_kind = { type = "uniform", tension = 0.5 }
smoothing = { mode = "frame_time", factor = 0.1, reference_fps = 60.0 }
"#;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(
            opts.timeline.curve_kind,
            CurveKind::Uniform { tension: 0.5 }
        );
        assert_eq!(
            opts.timeline.smoothing,
            Smoothing::FrameTime {
                factor: 0.1,
                reference_fps: 60.0
            }
        );
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let err = Options::from_toml("[camera\nfovy = ").unwrap_err();
        assert!(matches!(err, LookupError::OptionsParse(_)));
    }

    #[test]
    fn too_few_control_points_fail_to_build() {
        let toml_str = r"
[timeline]
control_points = [[0.0, 0.0, 0.0]]
";
        let opts = Options::from_toml(toml_str).unwrap();
        assert!(opts.timeline.build_curve().is_err());
    }

    #[test]
    fn keybinding_lookup() {
        let opts = Options::default();
        assert_eq!(opts.keybindings.lookup("Enter"), Some(KeyAction::Begin));
        assert_eq!(
            opts.keybindings.lookup("Escape"),
            Some(KeyAction::SkipLoading)
        );
        assert_eq!(opts.keybindings.lookup("KeyZ"), None);
    }

    #[test]
    fn keybindings_survive_loading() {
        let toml_str = r#"
[keybindings.bindings]
begin = "Space"
"#;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.keybindings.lookup("Space"), Some(KeyAction::Begin));
        assert_eq!(opts.keybindings.lookup("Enter"), None);
    }

    #[test]
    fn rebinding_updates_lookup() {
        let mut opts = Options::default();
        opts.keybindings.bind(KeyAction::ResetTimeline, "Home");
        assert_eq!(
            opts.keybindings.lookup("Home"),
            Some(KeyAction::ResetTimeline)
        );
        assert_eq!(opts.keybindings.lookup("KeyR"), None);
    }

    #[test]
    fn save_load_and_list_presets() {
        let dir = std::env::temp_dir()
            .join(format!("lookup-presets-{}", std::process::id()));
        let mut opts = Options::default();
        opts.camera.follow_distance = 12.0;
        opts.save(&dir.join("close.toml")).unwrap();
        Options::default().save(&dir.join("default.toml")).unwrap();

        assert_eq!(Options::list_presets(&dir), vec!["close", "default"]);
        let loaded = Options::load(&dir.join("close.toml")).unwrap();
        assert_eq!(loaded, opts);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("timeline"));
        assert!(props.contains_key("camera"));
        assert!(props.contains_key("loading"));
        assert!(props.contains_key("scene"));
        assert!(!props.contains_key("keybindings"));

        let camera = &props["camera"]["properties"];
        assert!(camera.get("follow_distance").is_some());
        assert!(camera.get("znear").is_none());
    }
}
