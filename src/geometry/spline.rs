use crate::error::{GeometryError, Result};
use crate::math::{Point2, Vector2};

use super::bezier::CubicBezier;

/// Incoming handle, anchor and outgoing handle of a control point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BezierTriple {
    pub handle_in: Point2,
    pub anchor: Point2,
    pub handle_out: Point2,
}

impl BezierTriple {
    /// Creates a triple from its three control coordinates.
    #[must_use]
    pub fn new(handle_in: Point2, anchor: Point2, handle_out: Point2) -> Self {
        Self {
            handle_in,
            anchor,
            handle_out,
        }
    }

    /// A corner point whose handles coincide with the anchor.
    #[must_use]
    pub fn corner(anchor: Point2) -> Self {
        Self::new(anchor, anchor, anchor)
    }
}

/// Feather width at a parameter inside the segment leaving a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightSample {
    /// Segment parameter, strictly inside `(0, 1)`.
    pub u: f64,
    /// Feather width at `u`.
    pub w: f64,
}

impl WeightSample {
    /// Creates a sample of width `w` at parameter `u`.
    #[must_use]
    pub fn new(u: f64, w: f64) -> Self {
        Self { u, w }
    }
}

/// A control point of a mask spline.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskPoint {
    pub triple: BezierTriple,
    weight: f64,
    weight_samples: Vec<WeightSample>,
}

impl MaskPoint {
    /// Creates a point with zero feather width.
    #[must_use]
    pub fn new(triple: BezierTriple) -> Self {
        Self {
            triple,
            weight: 0.0,
            weight_samples: Vec::new(),
        }
    }

    /// Sets the base feather width at the anchor.
    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Sets the extra weight samples along the outgoing segment.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ParameterOutOfRange`] if a sample lies outside
    /// the open interval `(0, 1)`, or [`GeometryError::NonMonotonicWeights`]
    /// if the parameters are not strictly increasing.
    pub fn with_weight_samples(mut self, samples: Vec<WeightSample>) -> Result<Self> {
        let mut previous = 0.0;
        for (index, sample) in samples.iter().enumerate() {
            if !(sample.u > 0.0 && sample.u < 1.0) {
                return Err(GeometryError::ParameterOutOfRange {
                    parameter: "u",
                    value: sample.u,
                    min: 0.0,
                    max: 1.0,
                }
                .into());
            }
            if index > 0 && sample.u <= previous {
                return Err(GeometryError::NonMonotonicWeights {
                    index,
                    previous,
                    current: sample.u,
                }
                .into());
            }
            previous = sample.u;
        }
        self.weight_samples = samples;
        Ok(self)
    }

    /// Base feather width at the anchor.
    #[must_use]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Weight samples, ordered by parameter.
    #[must_use]
    pub fn weight_samples(&self) -> &[WeightSample] {
        &self.weight_samples
    }

    /// Anchor coordinate.
    #[must_use]
    pub fn anchor(&self) -> Point2 {
        self.triple.anchor
    }
}

/// An ordered sequence of mask points, optionally closed.
///
/// Segment `i` runs from point `i` to point `i + 1`; a cyclic spline has an
/// extra segment from the last point back to the first.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskSpline {
    points: Vec<MaskPoint>,
    cyclic: bool,
    no_self_intersect: bool,
}

impl MaskSpline {
    /// Creates a spline from its points.
    #[must_use]
    pub fn new(points: Vec<MaskPoint>, cyclic: bool) -> Self {
        Self {
            points,
            cyclic,
            no_self_intersect: false,
        }
    }

    /// Requests collapsing of self-intersecting feather loops.
    #[must_use]
    pub fn with_self_intersection_check(mut self, enabled: bool) -> Self {
        self.no_self_intersect = enabled;
        self
    }

    /// Control points in path order.
    #[must_use]
    pub fn points(&self) -> &[MaskPoint] {
        &self.points
    }

    /// Number of control points.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Whether the last point connects back to the first.
    #[must_use]
    pub fn is_cyclic(&self) -> bool {
        self.cyclic
    }

    /// Whether feather loops should be collapsed.
    #[must_use]
    pub fn self_intersection_check(&self) -> bool {
        self.no_self_intersect
    }

    /// Index of the point the segment leaving point `index` ends at.
    ///
    /// `None` for the last point of an open spline, for single-point splines
    /// and for out-of-range indices.
    #[must_use]
    pub fn next_point_index(&self, index: usize) -> Option<usize> {
        let n = self.points.len();
        if n < 2 || index >= n {
            return None;
        }
        if index + 1 < n {
            Some(index + 1)
        } else if self.cyclic {
            Some(0)
        } else {
            None
        }
    }

    /// Number of segments: `n` when cyclic, `n - 1` otherwise.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        let n = self.points.len();
        if n < 2 {
            0
        } else if self.cyclic {
            n
        } else {
            n - 1
        }
    }

    /// The cubic leaving point `index`, if any.
    #[must_use]
    pub fn segment(&self, index: usize) -> Option<CubicBezier> {
        let next = self.next_point_index(index)?;
        let a = &self.points[index].triple;
        let b = &self.points[next].triple;
        Some(CubicBezier::new(a.anchor, a.handle_out, b.handle_in, b.anchor))
    }

    /// All segments in order, paired with the index of their start point.
    pub fn segments(&self) -> impl Iterator<Item = (usize, CubicBezier)> + '_ {
        (0..self.segment_count()).filter_map(move |i| self.segment(i).map(|s| (i, s)))
    }

    /// Position at `u` along the segment leaving point `index`.
    ///
    /// Points without an outgoing segment evaluate to their anchor.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn point_segment_co(&self, index: usize, u: f64) -> Point2 {
        match self.segment(index) {
            Some(segment) => segment.evaluate(u),
            None => self.points[index].anchor(),
        }
    }

    /// Unit left normal at `u` along the segment leaving point `index`.
    ///
    /// The last point of an open spline uses the end tangent of its incoming
    /// segment, and a lone point uses its own handle direction. Returns the
    /// zero vector when no direction can be derived.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn point_normal(&self, index: usize, u: f64) -> Vector2 {
        if let Some(segment) = self.segment(index) {
            return segment.unit_normal(u);
        }
        if index > 0 {
            if let Some(incoming) = self.segment(index - 1) {
                return incoming.unit_normal(1.0);
            }
        }
        let t = &self.points[index].triple;
        CubicBezier::new(t.handle_in, t.anchor, t.anchor, t.handle_out).unit_normal(0.5)
    }

    /// Feather width at `u` along the segment leaving point `index`.
    ///
    /// Piecewise linear through the point's base weight at `u = 0`, its weight
    /// samples, and the next point's base weight at `u = 1`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn point_weight(&self, index: usize, u: f64) -> f64 {
        let point = &self.points[index];
        let Some(next) = self.next_point_index(index) else {
            return point.weight;
        };
        let next_weight = self.points[next].weight;
        if u <= 0.0 {
            return point.weight;
        }
        if u >= 1.0 {
            return next_weight;
        }

        let (mut cur_u, mut cur_w) = (0.0, point.weight);
        for sample in &point.weight_samples {
            if u <= sample.u {
                return interpolate_weight(cur_u, cur_w, sample.u, sample.w, u);
            }
            cur_u = sample.u;
            cur_w = sample.w;
        }
        interpolate_weight(cur_u, cur_w, 1.0, next_weight, u)
    }
}

fn interpolate_weight(u0: f64, w0: f64, u1: f64, w1: f64, u: f64) -> f64 {
    let span = u1 - u0;
    if span <= 0.0 {
        return w1;
    }
    w0 + (w1 - w0) * ((u - u0) / span)
}
