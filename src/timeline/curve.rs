//! Catmull-Rom path through the timeline control points.
//!
//! Pure `Vec3 → Vec3` math with no GPU dependencies. The curve interpolates
//! every control point; the two ends get phantom neighbours reflected
//! through the end points so the first and last spans still have tangents.

use std::fmt;

use glam::Vec3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Number of chord samples in the cumulative arc-length table.
pub const ARC_LENGTH_DIVISIONS: usize = 200;

/// Knot intervals shorter than this are treated as degenerate.
const MIN_KNOT_INTERVAL: f32 = 1e-4;

/// Catmull-Rom variant used to space the knots.
#[derive(
    Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default, JsonSchema,
)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum CurveKind {
    /// Knots spaced by the square root of the chord length (alpha = 0.5).
    /// Never forms cusps or self-intersections within a span.
    #[default]
    Centripetal,
    /// Knots spaced by the chord length (alpha = 1).
    Chordal,
    /// Evenly spaced knots with a tangent scale.
    Uniform {
        /// Tangent scale; 0.5 is the classic Catmull-Rom spline.
        tension: f32,
    },
}

/// Reasons a [`Curve`] cannot be built.
#[derive(Debug, Clone, PartialEq)]
pub enum CurveError {
    /// Fewer than two control points were supplied.
    TooFewPoints {
        /// Number of points actually supplied.
        found: usize,
    },
    /// A control point had a NaN or infinite coordinate.
    NonFinite {
        /// Index of the offending control point.
        index: usize,
    },
}

impl fmt::Display for CurveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewPoints { found } => write!(
                f,
                "a path needs at least 2 control points, got {found}"
            ),
            Self::NonFinite { index } => {
                write!(f, "control point {index} is not finite")
            }
        }
    }
}

impl std::error::Error for CurveError {}

/// Cubic polynomial `c0 + c1·t + c2·t² + c3·t³` for one span.
#[derive(Clone, Copy)]
struct CubicSpan {
    c0: Vec3,
    c1: Vec3,
    c2: Vec3,
    c3: Vec3,
}

impl CubicSpan {
    /// Hermite form from end points `x0`, `x1` and tangents `t0`, `t1`.
    fn hermite(x0: Vec3, x1: Vec3, t0: Vec3, t1: Vec3) -> Self {
        Self {
            c0: x0,
            c1: t0,
            c2: -3.0 * x0 + 3.0 * x1 - 2.0 * t0 - t1,
            c3: 2.0 * x0 - 2.0 * x1 + t0 + t1,
        }
    }

    /// Uniform Catmull-Rom span between `p1` and `p2`.
    fn uniform(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, tension: f32) -> Self {
        Self::hermite(p1, p2, tension * (p2 - p0), tension * (p3 - p1))
    }

    /// Non-uniform Catmull-Rom span between `p1` and `p2` with knot
    /// intervals `dt0`, `dt1`, `dt2`, re-parameterized to [0, 1].
    fn non_uniform(
        [p0, p1, p2, p3]: [Vec3; 4],
        dt0: f32,
        dt1: f32,
        dt2: f32,
    ) -> Self {
        let t1 = ((p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1)
            * dt1;
        let t2 = ((p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2)
            * dt1;
        Self::hermite(p1, p2, t1, t2)
    }

    #[inline]
    fn eval(&self, t: f32) -> Vec3 {
        let t2 = t * t;
        let t3 = t2 * t;
        self.c0 + self.c1 * t + self.c2 * t2 + self.c3 * t3
    }
}

/// Immutable smooth path through an ordered set of control points.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    points: Vec<Vec3>,
    kind: CurveKind,
    /// Cumulative chord length at `i / ARC_LENGTH_DIVISIONS`.
    lengths: Vec<f32>,
}

impl Curve {
    /// Build a curve of the given kind.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::TooFewPoints`] for fewer than two points and
    /// [`CurveError::NonFinite`] if any coordinate is NaN or infinite.
    pub fn new(points: &[Vec3], kind: CurveKind) -> Result<Self, CurveError> {
        if points.len() < 2 {
            return Err(CurveError::TooFewPoints {
                found: points.len(),
            });
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(CurveError::NonFinite { index });
        }

        let mut curve = Self {
            points: points.to_vec(),
            kind,
            lengths: Vec::new(),
        };
        curve.lengths = curve.arc_lengths(ARC_LENGTH_DIVISIONS);
        Ok(curve)
    }

    /// Build a centripetal curve.
    ///
    /// # Errors
    ///
    /// See [`Curve::new`].
    pub fn centripetal(points: &[Vec3]) -> Result<Self, CurveError> {
        Self::new(points, CurveKind::Centripetal)
    }

    /// The control points the curve interpolates.
    #[must_use]
    pub fn control_points(&self) -> &[Vec3] {
        &self.points
    }

    /// Knot spacing variant.
    #[must_use]
    pub fn kind(&self) -> CurveKind {
        self.kind
    }

    /// First control point (`point_at(0.0)`).
    #[must_use]
    pub fn start(&self) -> Vec3 {
        self.points[0]
    }

    /// Last control point (`point_at(1.0)`).
    #[must_use]
    pub fn end(&self) -> Vec3 {
        self.points[self.points.len() - 1]
    }

    /// Approximate total length (sum of chords over the length table).
    #[must_use]
    pub fn length(&self) -> f32 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    /// Point at curve parameter `t`, clamped to [0, 1]. NaN maps to the
    /// start.
    ///
    /// The end points are returned exactly rather than evaluated.
    #[must_use]
    pub fn point_at(&self, t: f32) -> Vec3 {
        if t.is_nan() || t <= 0.0 {
            return self.start();
        }
        if t >= 1.0 {
            return self.end();
        }

        let spans = self.points.len() - 1;
        let p = spans as f32 * t;
        let mut index = p.floor() as usize;
        let mut weight = p - index as f32;
        if index >= spans {
            index = spans - 1;
            weight = 1.0;
        }
        self.span(index).eval(weight)
    }

    /// Point at arc-length fraction `u`: equal steps in `u` cover equal
    /// distances along the path.
    #[must_use]
    pub fn point_at_uniform(&self, u: f32) -> Vec3 {
        self.point_at(self.arc_to_parameter(u))
    }

    /// `count` points evenly spaced in `t`, including both end points.
    ///
    /// `count == 0` yields nothing and `count == 1` yields just the start.
    #[must_use]
    pub fn sample(&self, count: usize) -> Vec<Vec3> {
        match count {
            0 => Vec::new(),
            1 => vec![self.start()],
            _ => {
                let last = (count - 1) as f32;
                (0..count).map(|i| self.point_at(i as f32 / last)).collect()
            }
        }
    }

    /// Map an arc-length fraction to the curve parameter.
    #[must_use]
    pub fn arc_to_parameter(&self, u: f32) -> f32 {
        if u.is_nan() || u <= 0.0 {
            return 0.0;
        }
        if u >= 1.0 {
            return 1.0;
        }
        let total = self.length();
        if total <= 0.0 {
            return u;
        }

        let target = u * total;
        let upper = self.lengths.partition_point(|&l| l < target);
        if upper == 0 {
            return 0.0;
        }
        if upper >= self.lengths.len() {
            return 1.0;
        }

        let lower = upper - 1;
        let before = self.lengths[lower];
        let span = self.lengths[upper] - before;
        let fraction = if span > 0.0 {
            (target - before) / span
        } else {
            0.0
        };
        (lower as f32 + fraction) / ARC_LENGTH_DIVISIONS as f32
    }

    fn span(&self, index: usize) -> CubicSpan {
        let n = self.points.len();
        let p1 = self.points[index];
        let p2 = self.points[index + 1];
        let p0 = if index > 0 {
            self.points[index - 1]
        } else {
            p1 * 2.0 - p2
        };
        let p3 = if index + 2 < n {
            self.points[index + 2]
        } else {
            p2 * 2.0 - p1
        };

        match self.kind {
            CurveKind::Uniform { tension } => {
                CubicSpan::uniform(p0, p1, p2, p3, tension)
            }
            CurveKind::Centripetal => Self::knotted([p0, p1, p2, p3], 0.25),
            CurveKind::Chordal => Self::knotted([p0, p1, p2, p3], 0.5),
        }
    }

    /// Knot intervals from squared distances raised to `pow`
    /// (alpha / 2), with degenerate intervals replaced.
    fn knotted(p: [Vec3; 4], pow: f32) -> CubicSpan {
        let mut dt0 = p[0].distance_squared(p[1]).powf(pow);
        let mut dt1 = p[1].distance_squared(p[2]).powf(pow);
        let mut dt2 = p[2].distance_squared(p[3]).powf(pow);

        if dt1 < MIN_KNOT_INTERVAL {
            dt1 = 1.0;
        }
        if dt0 < MIN_KNOT_INTERVAL {
            dt0 = dt1;
        }
        if dt2 < MIN_KNOT_INTERVAL {
            dt2 = dt1;
        }
        CubicSpan::non_uniform(p, dt0, dt1, dt2)
    }

    fn arc_lengths(&self, divisions: usize) -> Vec<f32> {
        let mut lengths = Vec::with_capacity(divisions + 1);
        let mut sum = 0.0;
        let mut last = self.point_at(0.0);
        lengths.push(sum);
        for i in 1..=divisions {
            let current = self.point_at(i as f32 / divisions as f32);
            sum += current.distance(last);
            lengths.push(sum);
            last = current;
        }
        lengths
    }
}
