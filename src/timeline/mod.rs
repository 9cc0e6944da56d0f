//! The comet's timeline: a fixed 3D path and the scroll-driven progress
//! value that selects a point on it.

/// Catmull-Rom path through the timeline control points.
pub mod curve;
/// Wheel input → smoothed progress in [0, 1].
pub mod progress;

pub use curve::{Curve, CurveError, CurveKind};
pub use progress::{ProgressController, ProgressState, Smoothing};
