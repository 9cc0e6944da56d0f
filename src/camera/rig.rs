//! Follower camera that tracks the comet along the timeline path.
//!
//! Each tick the orbit target jumps to the sampled path point, while the
//! camera position eases toward a point `follow_distance` away from it.
//! The offset direction is taken from the camera's current position, not
//! its forward vector, so the viewing angle the user picked by orbiting is
//! kept as the comet moves.

use glam::{Quat, Vec2, Vec3};

use crate::options::CameraOptions;
use crate::timeline::Curve;

/// Offsets shorter than this have no usable direction.
const MIN_DIRECTION_LENGTH: f32 = 1e-6;

/// Orbiting stops this close (radians) to straight up or down.
const POLE_MARGIN: f32 = 0.05;

/// A return home ends once the offset direction is this close (1 - cos) to
/// the home direction.
const HOME_TOLERANCE: f32 = 1e-6;

/// Camera output for one frame, handed to the renderer by value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    /// Eye position in world space.
    pub position: Vec3,
    /// Point the camera looks at and orbits around.
    pub look_target: Vec3,
}

/// Follow tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigSettings {
    /// Resting distance between the camera and the followed point.
    pub follow_distance: f32,
    /// Fraction of the remaining distance covered per tick, in (0, 1].
    pub ease_factor: f32,
    /// Offset direction used when the camera sits on the followed point.
    pub fallback_axis: Vec3,
    /// Radians of orbit per pixel of drag.
    pub orbit_speed: f32,
}

impl Default for RigSettings {
    fn default() -> Self {
        Self {
            follow_distance: 30.0,
            ease_factor: 0.05,
            fallback_axis: Vec3::Z,
            orbit_speed: 0.005,
        }
    }
}

impl From<&CameraOptions> for RigSettings {
    fn from(options: &CameraOptions) -> Self {
        Self {
            follow_distance: options.follow_distance,
            ease_factor: options.ease_factor,
            fallback_axis: Vec3::from(options.fallback_axis),
            orbit_speed: options.orbit_speed,
        }
    }
}

/// Owns the [`CameraState`] and moves it toward the timeline point.
#[derive(Debug, Clone)]
pub struct CameraRig {
    state: CameraState,
    settings: RigSettings,
    /// Offset direction the camera is easing back to, if any.
    home: Option<Vec3>,
}

impl CameraRig {
    /// Rig at `position` looking at `look_target`.
    #[must_use]
    pub fn new(position: Vec3, look_target: Vec3, settings: RigSettings) -> Self {
        Self {
            state: CameraState {
                position,
                look_target,
            },
            settings,
            home: None,
        }
    }

    /// Sample `curve` at `t` and follow that point.
    pub fn follow(&mut self, curve: &Curve, t: f32) -> CameraState {
        self.tick(curve.point_at(t))
    }

    /// Retarget at `sample` and ease the position toward the follow point.
    pub fn tick(&mut self, sample: Vec3) -> CameraState {
        self.state.look_target = sample;
        let desired = self.desired_position(sample);
        let ease = self.settings.ease_factor.clamp(0.0, 1.0);
        self.state.position = self.state.position.lerp(desired, ease);

        if let Some(home) = self.home {
            let offset = (self.state.position - sample).normalize_or_zero();
            if offset.dot(home) >= 1.0 - HOME_TOLERANCE {
                self.home = None;
            }
        }
        self.state
    }

    /// Where the camera would settle if `sample` stayed put.
    #[must_use]
    pub fn desired_position(&self, sample: Vec3) -> Vec3 {
        let direction = self
            .home
            .unwrap_or_else(|| self.direction_from(sample));
        sample + direction * self.settings.follow_distance
    }

    /// Unit direction from `sample` toward the current camera position.
    fn direction_from(&self, sample: Vec3) -> Vec3 {
        let offset = self.state.position - sample;
        let length = offset.length();
        if length > MIN_DIRECTION_LENGTH && length.is_finite() {
            offset / length
        } else {
            self.settings
                .fallback_axis
                .try_normalize()
                .unwrap_or(Vec3::Z)
        }
    }

    /// Orbit the camera around the look target by a drag of `delta`
    /// pixels: yaw about world up, pitch about the camera's right axis.
    pub fn orbit(&mut self, delta: Vec2) {
        self.home = None;
        let target = self.state.look_target;
        let offset = self.state.position - target;
        if offset.length_squared() <= MIN_DIRECTION_LENGTH {
            return;
        }

        let yaw = Quat::from_axis_angle(
            Vec3::Y,
            -delta.x * self.settings.orbit_speed,
        );
        let offset = yaw * offset;

        let right = offset.cross(Vec3::Y).normalize_or_zero();
        let pitched = if right == Vec3::ZERO {
            offset
        } else {
            Quat::from_axis_angle(right, delta.y * self.settings.orbit_speed)
                * offset
        };

        let polar = pitched.angle_between(Vec3::Y);
        let same_side = pitched.cross(Vec3::Y).dot(right) > 0.0;
        let offset = if same_side
            && (POLE_MARGIN..=std::f32::consts::PI - POLE_MARGIN)
                .contains(&polar)
        {
            pitched
        } else {
            offset
        };
        self.state.position = target + offset;
    }

    /// Ease back to viewing the followed point from `direction`. The
    /// position still moves only through [`tick`](Self::tick); orbiting
    /// cancels the return.
    pub fn return_home(&mut self, direction: Vec3) {
        self.home = direction.try_normalize();
    }

    /// Whether a [`return_home`](Self::return_home) is still in progress.
    #[must_use]
    pub fn is_returning_home(&self) -> bool {
        self.home.is_some()
    }

    /// Current camera output.
    #[must_use]
    pub fn state(&self) -> CameraState {
        self.state
    }

    /// Follow tuning.
    #[must_use]
    pub fn settings(&self) -> RigSettings {
        self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rig_at(position: Vec3) -> CameraRig {
        CameraRig::new(position, Vec3::ZERO, RigSettings::default())
    }

    #[test]
    fn tick_retargets_immediately() {
        let mut rig = rig_at(Vec3::new(0.0, 0.0, 30.0));
        let sample = Vec3::new(5.0, 1.0, 200.0);
        let state = rig.tick(sample);
        assert_eq!(state.look_target, sample);
    }

    #[test]
    fn camera_never_snaps() {
        let mut rig = rig_at(Vec3::new(0.0, 0.0, 30.0));
        let sample = Vec3::new(0.0, 0.0, 500.0);
        let before = rig.state().position;
        let desired = rig.desired_position(sample);
        let after = rig.tick(sample).position;

        let full = before.distance(desired);
        let moved = before.distance(after);
        assert!((moved - full * 0.05).abs() < 1e-3, "{moved} vs {full}");
    }

    #[test]
    fn converges_to_follow_distance_at_steady_t() {
        let mut rig = rig_at(Vec3::new(10.0, 5.0, 30.0));
        let sample = Vec3::new(0.0, 0.0, 400.0);
        for _ in 0..600 {
            let _ = rig.tick(sample);
        }
        let distance = rig.state().position.distance(sample);
        assert!((distance - 30.0).abs() < 1e-2, "{distance}");
    }

    #[test]
    fn convergence_is_geometric() {
        let mut rig = rig_at(Vec3::new(0.0, 0.0, 100.0));
        let sample = Vec3::ZERO;
        let mut gap = rig.state().position.distance(sample) - 30.0;
        for _ in 0..50 {
            let _ = rig.tick(sample);
            let next = rig.state().position.distance(sample) - 30.0;
            assert!((next - gap * 0.95).abs() < 1e-3);
            gap = next;
        }
    }

    #[test]
    fn viewing_direction_is_preserved() {
        let start = Vec3::new(20.0, 10.0, 20.0);
        let mut rig = rig_at(start);
        for _ in 0..300 {
            let _ = rig.tick(Vec3::ZERO);
        }
        let dir = rig.state().position.normalize();
        assert!(dir.abs_diff_eq(start.normalize(), 1e-4));
    }

    #[test]
    fn coincident_camera_uses_fallback_axis() {
        let sample = Vec3::new(1.0, 2.0, 3.0);
        let mut rig = CameraRig::new(sample, sample, RigSettings::default());
        assert_eq!(rig.desired_position(sample), sample + Vec3::Z * 30.0);

        let state = rig.tick(sample);
        assert!(state.position.is_finite());
        assert!(state.position.z > sample.z);
    }

    #[test]
    fn degenerate_fallback_axis_still_finite() {
        let settings = RigSettings {
            fallback_axis: Vec3::ZERO,
            ..RigSettings::default()
        };
        let mut rig = CameraRig::new(Vec3::ONE, Vec3::ONE, settings);
        assert!(rig.tick(Vec3::ONE).position.is_finite());
    }

    #[test]
    fn follow_samples_the_curve() {
        let curve = Curve::centripetal(&[
            Vec3::new(0.0, 0.0, 500.0),
            Vec3::new(60.0, 0.0, 400.0),
            Vec3::ZERO,
        ])
        .unwrap();
        let mut rig = rig_at(Vec3::new(0.0, 0.0, 30.0));
        assert_eq!(rig.follow(&curve, 0.0).look_target, curve.start());
        assert_eq!(rig.follow(&curve, 1.0).look_target, curve.end());
    }

    #[test]
    fn orbit_keeps_distance_to_target() {
        let mut rig = rig_at(Vec3::new(0.0, 0.0, 30.0));
        rig.orbit(Vec2::new(120.0, -40.0));
        let distance = rig.state().position.distance(Vec3::ZERO);
        assert!((distance - 30.0).abs() < 1e-3);
        assert_ne!(rig.state().position, Vec3::new(0.0, 0.0, 30.0));
    }

    #[test]
    fn return_home_eases_instead_of_snapping() {
        let mut rig = rig_at(Vec3::new(0.0, 0.0, 30.0));
        let _ = rig.tick(Vec3::ZERO);
        rig.orbit(Vec2::new(300.0, 0.0));
        let before = rig.state().position;

        rig.return_home(Vec3::Z * 5.0);
        assert!(rig.is_returning_home());
        assert_eq!(rig.state().position, before);

        let desired = rig.desired_position(Vec3::ZERO);
        assert!(desired.abs_diff_eq(Vec3::new(0.0, 0.0, 30.0), 1e-4));
        let after = rig.tick(Vec3::ZERO).position;
        let moved = before.distance(after);
        assert!((moved - before.distance(desired) * 0.05).abs() < 1e-3);

        for _ in 0..600 {
            let _ = rig.tick(Vec3::ZERO);
        }
        assert!(!rig.is_returning_home());
        let dir = rig.state().position.normalize();
        assert!(dir.abs_diff_eq(Vec3::Z, 1e-3));
    }

    #[test]
    fn orbit_cancels_return_home() {
        let mut rig = rig_at(Vec3::new(30.0, 0.0, 0.0));
        rig.return_home(Vec3::Z);
        rig.orbit(Vec2::new(10.0, 0.0));
        assert!(!rig.is_returning_home());
        rig.return_home(Vec3::ZERO);
        assert!(!rig.is_returning_home());
    }

    #[test]
    fn orbit_stops_short_of_the_poles() {
        let mut rig = rig_at(Vec3::new(0.0, 0.0, 30.0));
        for _ in 0..200 {
            rig.orbit(Vec2::new(0.0, 50.0));
        }
        let polar = rig.state().position.angle_between(Vec3::Y);
        assert!(polar >= POLE_MARGIN * 0.5);
        assert!(polar <= std::f32::consts::PI - POLE_MARGIN * 0.5);
    }
}
