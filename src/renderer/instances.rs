//! Per-instance data for the body pipeline and the placeholder materials.
//!
//! Textures are opaque references; every body is drawn as a shaded sphere
//! with a flat material colour instead.

use glam::{Mat4, Quat, Vec3};

use crate::options::TextureOptions;
use crate::scene::{FrameSnapshot, StaticBodies};

/// Star bead radius on the shell.
const STAR_RADIUS: f32 = 1.2;
/// Path bead radius.
const PATH_BEAD_RADIUS: f32 = 0.25;
/// Rim glow on the planet, in [0, 1].
const PLANET_RIM: f32 = 0.6;

const STARFIELD_COLOR: [f32; 3] = [0.01, 0.012, 0.03];
const STAR_COLOR: [f32; 3] = [0.9, 0.92, 1.0];
const PLANET_COLOR: [f32; 3] = [0.12, 0.3, 0.62];
const CLOUD_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
const COMET_COLOR: [f32; 3] = [1.0, 0.82, 0.55];
const LABEL_COLOR: [f32; 3] = [0.85, 0.9, 1.0];
const PATH_COLOR: [f32; 3] = [0.35, 0.45, 0.8];

/// One sphere instance: unit icosphere → world transform plus material.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BodyInstance {
    /// Model matrix (columns).
    pub model: [[f32; 4]; 4],
    /// Linear RGBA colour.
    pub color: [f32; 4],
    /// x: lit (1) or emissive (0), y: rim strength, zw unused.
    pub material: [f32; 4],
}

impl BodyInstance {
    fn emissive(center: Vec3, radius: f32, rgb: [f32; 3]) -> Self {
        Self::new(center, radius, Quat::IDENTITY, rgb, 1.0, [0.0; 4])
    }

    fn new(
        center: Vec3,
        radius: f32,
        rotation: Quat,
        [r, g, b]: [f32; 3],
        alpha: f32,
        material: [f32; 4],
    ) -> Self {
        let model = Mat4::from_scale_rotation_translation(
            Vec3::splat(radius),
            rotation,
            center,
        );
        Self {
            model: model.to_cols_array_2d(),
            color: [r, g, b, alpha],
            material,
        }
    }
}

/// Instances that never change: the shell first, then the stars.
#[must_use]
pub fn static_instances(bodies: &StaticBodies) -> Vec<BodyInstance> {
    let shell = BodyInstance::emissive(
        Vec3::ZERO,
        bodies.starfield_radius,
        STARFIELD_COLOR,
    );
    std::iter::once(shell)
        .chain(
            bodies
                .stars
                .iter()
                .map(|&star| BodyInstance::emissive(star, STAR_RADIUS, STAR_COLOR)),
        )
        .collect()
}

/// Placeholder colour drawn in place of each texture reference.
#[must_use]
pub fn placeholder_materials(
    textures: &TextureOptions,
) -> [(&str, [f32; 3]); 4] {
    [
        (textures.planet.as_str(), PLANET_COLOR),
        (textures.clouds.as_str(), CLOUD_COLOR),
        (textures.starfield.as_str(), STARFIELD_COLOR),
        (textures.comet.as_str(), COMET_COLOR),
    ]
}

/// Per-frame instances split by blend mode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInstances {
    /// Depth-written bodies: planet, comet, labels, path beads.
    pub opaque: Vec<BodyInstance>,
    /// Alpha-blended bodies drawn last: the cloud layer.
    pub translucent: Vec<BodyInstance>,
}

/// Build this frame's dynamic instances. Without a mounted scene only the
/// planet and its clouds are drawn, unrotated.
#[must_use]
pub fn frame_instances(
    bodies: &StaticBodies,
    snapshot: &FrameSnapshot,
) -> FrameInstances {
    let rotation = snapshot
        .scene
        .as_ref()
        .map_or(0.0, |scene| scene.planet_rotation);
    let spin = Quat::from_rotation_y(rotation);

    let planet = BodyInstance::new(
        Vec3::ZERO,
        bodies.planet_radius,
        spin,
        PLANET_COLOR,
        1.0,
        [1.0, PLANET_RIM, 0.0, 0.0],
    );
    let clouds = BodyInstance::new(
        Vec3::ZERO,
        bodies.cloud_radius,
        spin,
        CLOUD_COLOR,
        bodies.cloud_opacity,
        [1.0, 0.0, 0.0, 0.0],
    );

    let mut opaque = vec![planet];
    if let Some(scene) = &snapshot.scene {
        opaque.push(BodyInstance::emissive(
            scene.comet,
            bodies.comet_radius,
            COMET_COLOR,
        ));
        opaque.extend(scene.labels.iter().map(|label| {
            BodyInstance::emissive(label.position, bodies.label_radius, LABEL_COLOR)
        }));
        opaque.extend(scene.path.iter().map(|&point| {
            BodyInstance::emissive(point, PATH_BEAD_RADIUS, PATH_COLOR)
        }));
    }

    FrameInstances {
        opaque,
        translucent: vec![clouds],
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::camera::CameraState;
    use crate::options::SceneOptions;
    use crate::scene::{LabelAnchor, SceneFrame};
    use crate::stage::Stage;

    fn bodies() -> StaticBodies {
        StaticBodies::new(&SceneOptions {
            star_count: 10,
            ..SceneOptions::default()
        })
    }

    fn translation(instance: &BodyInstance) -> Vec3 {
        Vec3::from_slice(&instance.model[3][..3])
    }

    #[test]
    fn every_texture_gets_a_placeholder() {
        let bodies = bodies();
        let materials = placeholder_materials(&bodies.textures);
        assert_eq!(materials[0], ("assets/earth3.jpeg", PLANET_COLOR));
        assert_eq!(materials[3].0, bodies.textures.comet);
        assert!(materials.iter().all(|(texture, _)| !texture.is_empty()));
    }

    #[test]
    fn shell_comes_first() {
        let instances = static_instances(&bodies());
        assert_eq!(instances.len(), 11);
        assert_eq!(instances[0].model[0][0], 1000.0);
        assert_eq!(instances[0].material[0], 0.0);
    }

    #[test]
    fn intro_draws_only_the_planet() {
        let snapshot = FrameSnapshot {
            stage: Stage::Intro,
            loading_percent: 0,
            scene: None,
        };
        let frame = frame_instances(&bodies(), &snapshot);
        assert_eq!(frame.opaque.len(), 1);
        assert_eq!(frame.translucent.len(), 1);
        assert_eq!(frame.translucent[0].color[3], 0.8);
    }

    #[test]
    fn scene_adds_comet_labels_and_path() {
        let comet = Vec3::new(10.0, 0.0, 200.0);
        let snapshot = FrameSnapshot {
            stage: Stage::Scene,
            loading_percent: 100,
            scene: Some(SceneFrame {
                camera: CameraState {
                    position: Vec3::new(0.0, 0.0, 230.0),
                    look_target: comet,
                },
                comet,
                planet_rotation: 0.5,
                labels: Arc::from(vec![LabelAnchor {
                    text: "Arrival".into(),
                    position: Vec3::ZERO,
                }]),
                path: Arc::from(vec![Vec3::ZERO; 3]),
                progress: 0.4,
            }),
        };
        let frame = frame_instances(&bodies(), &snapshot);
        assert_eq!(frame.opaque.len(), 1 + 1 + 1 + 3);
        assert_eq!(translation(&frame.opaque[1]), comet);

        // The planet spins with the scene.
        let spun = Mat4::from_cols_array_2d(&frame.opaque[0].model);
        let x_axis = spun.transform_vector3(Vec3::X).normalize();
        assert!((x_axis.z + 0.5_f32.sin()).abs() < 1e-5);
    }
}
