//! Static bodies of the scene, resolved once from [`SceneOptions`].

use std::f32::consts::TAU;

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::options::{SceneOptions, TextureOptions};

/// Stars sit just inside the shell so they are never depth-clipped by it.
const STAR_INSET: f32 = 0.98;

/// Directional light pointing at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    /// Light position in world space.
    pub position: Vec3,
    /// Intensity multiplier.
    pub intensity: f32,
}

impl Light {
    /// Unit direction the light travels (from its position to the origin).
    #[must_use]
    pub fn direction(&self) -> Vec3 {
        (-self.position).try_normalize().unwrap_or(Vec3::NEG_Z)
    }
}

/// Everything in the scene that does not move along the timeline.
#[derive(Debug, Clone)]
pub struct StaticBodies {
    /// Planet radius.
    pub planet_radius: f32,
    /// Cloud layer radius.
    pub cloud_radius: f32,
    /// Cloud layer opacity in [0, 1].
    pub cloud_opacity: f32,
    /// Starfield shell radius.
    pub starfield_radius: f32,
    /// Star bead positions on the shell.
    pub stars: Vec<Vec3>,
    /// Comet marker radius.
    pub comet_radius: f32,
    /// Label bead radius.
    pub label_radius: f32,
    /// Scene light.
    pub light: Light,
    /// Texture references. The renderer maps each to a placeholder colour.
    pub textures: TextureOptions,
}

impl StaticBodies {
    /// Resolve the bodies described by `options`.
    #[must_use]
    pub fn new(options: &SceneOptions) -> Self {
        let stars = scatter_stars(
            options.star_count,
            options.starfield_radius * STAR_INSET,
            options.star_seed,
        );
        log::debug!("scattered {} stars", stars.len());
        Self {
            planet_radius: options.planet_radius,
            cloud_radius: options.cloud_radius,
            cloud_opacity: options.cloud_opacity.clamp(0.0, 1.0),
            starfield_radius: options.starfield_radius,
            stars,
            comet_radius: options.comet_radius,
            label_radius: options.label_radius,
            light: Light {
                position: Vec3::from(options.light_position),
                intensity: options.light_intensity,
            },
            textures: options.textures.clone(),
        }
    }
}

/// `count` points spread uniformly over a sphere of `radius`.
///
/// Deterministic for a given `seed`.
#[must_use]
pub fn scatter_stars(count: u32, radius: f32, seed: u64) -> Vec<Vec3> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            // Uniform z and azimuth give a uniform area density.
            let z: f32 = rng.random_range(-1.0..=1.0);
            let phi: f32 = rng.random::<f32>() * TAU;
            let ring = (1.0 - z * z).max(0.0).sqrt();
            Vec3::new(ring * phi.cos(), z, ring * phi.sin()) * radius
        })
        .collect()
}
