use glam::Vec3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::timeline::{Curve, CurveError, CurveKind, Smoothing};

/// A caption pinned to a point on the timeline path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct TimelineLabel {
    /// Caption text.
    pub text: String,
    /// Curve parameter the caption is anchored at, in [0, 1].
    pub t: f32,
}

impl TimelineLabel {
    fn new(text: &str, t: f32) -> Self {
        Self {
            text: text.to_owned(),
            t,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Timeline", inline)]
#[serde(default)]
/// Comet path and scroll behaviour.
pub struct TimelineOptions {
    /// Ordered path points, from the comet's start to the planet.
    #[schemars(skip)]
    pub control_points: Vec<[f32; 3]>,
    /// Knot spacing of the path.
    #[schemars(skip)]
    pub curve_kind: CurveKind,
    /// Progress added per unit of wheel delta.
    #[schemars(title = "Scroll Gain", range(min = 0.00001, max = 0.01), extend("step" = 0.00001))]
    pub scroll_gain: f32,
    /// How the rendered progress chases the scrolled target.
    #[schemars(skip)]
    pub smoothing: Smoothing,
    /// Captions along the path.
    #[schemars(skip)]
    pub labels: Vec<TimelineLabel>,
    /// Number of beads used to draw the path.
    #[schemars(title = "Path Beads", range(min = 0, max = 512))]
    pub path_samples: usize,
}

impl TimelineOptions {
    /// Build the path described by `control_points`.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError`] if fewer than two points are configured or a
    /// coordinate is not finite.
    pub fn build_curve(&self) -> Result<Curve, CurveError> {
        let points: Vec<Vec3> =
            self.control_points.iter().copied().map(Vec3::from).collect();
        Curve::new(&points, self.curve_kind)
    }
}

impl Default for TimelineOptions {
    fn default() -> Self {
        Self {
            control_points: vec![
                [0.0, 0.0, 500.0],
                [60.0, 0.0, 400.0],
                [0.0, 0.0, 0.0],
            ],
            curve_kind: CurveKind::Centripetal,
            scroll_gain: 0.0001,
            smoothing: Smoothing::default(),
            labels: vec![
                TimelineLabel::new("Departure", 0.0),
                TimelineLabel::new("Deep space", 0.35),
                TimelineLabel::new("Approach", 0.7),
                TimelineLabel::new("Arrival", 0.98),
            ],
            path_samples: 96,
        }
    }
}
