use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Texture references for the renderer. Opaque to the animation core.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct TextureOptions {
    /// Planet surface texture.
    pub planet: String,
    /// Cloud layer texture (also used as its alpha map).
    pub clouds: String,
    /// Inside of the starfield shell.
    pub starfield: String,
    /// Comet marker sprite.
    pub comet: String,
}

impl Default for TextureOptions {
    fn default() -> Self {
        Self {
            planet: "assets/earth3.jpeg".into(),
            clouds: "assets/earth3-clouds.jpeg".into(),
            starfield: "assets/starfield.jpeg".into(),
            comet: "assets/comet.png".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Scene", inline)]
#[serde(default)]
/// Static bodies and lighting.
pub struct SceneOptions {
    /// Planet radius.
    #[schemars(skip)]
    pub planet_radius: f32,
    /// Cloud layer radius, just above the surface.
    #[schemars(skip)]
    pub cloud_radius: f32,
    /// Cloud layer opacity.
    #[schemars(title = "Cloud Opacity", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub cloud_opacity: f32,
    /// Planet spin in radians per rendered frame.
    #[schemars(title = "Planet Spin", range(min = 0.0, max = 0.01), extend("step" = 0.0001))]
    pub rotation_per_frame: f32,
    /// Radius of the starfield shell around the origin.
    #[schemars(skip)]
    pub starfield_radius: f32,
    /// Number of star beads scattered on the shell.
    #[schemars(skip)]
    pub star_count: u32,
    /// Seed for the star scatter.
    #[schemars(skip)]
    pub star_seed: u64,
    /// Comet marker radius.
    #[schemars(skip)]
    pub comet_radius: f32,
    /// Label bead radius.
    #[schemars(skip)]
    pub label_radius: f32,
    /// Directional light position (the light points at the origin).
    #[schemars(skip)]
    pub light_position: [f32; 3],
    /// Directional light intensity.
    #[schemars(title = "Sun", range(min = 0.0, max = 4.0), extend("step" = 0.05))]
    pub light_intensity: f32,
    /// Texture references.
    #[schemars(skip)]
    pub textures: TextureOptions,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            planet_radius: 3.0,
            cloud_radius: 3.02,
            cloud_opacity: 0.8,
            rotation_per_frame: 0.0005,
            starfield_radius: 1000.0,
            star_count: 1500,
            star_seed: 0x5EED_1007,
            comet_radius: 1.5,
            label_radius: 0.8,
            light_position: [300.0, 0.0, 500.0],
            light_intensity: 2.0,
            textures: TextureOptions::default(),
        }
    }
}
