use crate::math::{lerp, left_normal, Point2, Vector2, TOLERANCE};

/// A planar cubic Bezier segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    /// Start anchor.
    pub p0: Point2,
    /// Handle leaving the start anchor.
    pub p1: Point2,
    /// Handle entering the end anchor.
    pub p2: Point2,
    /// End anchor.
    pub p3: Point2,
}

impl CubicBezier {
    /// Creates a segment from its four control points.
    #[must_use]
    pub fn new(p0: Point2, p1: Point2, p2: Point2, p3: Point2) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Evaluates the segment at `u` by repeated interpolation.
    #[must_use]
    pub fn evaluate(&self, u: f64) -> Point2 {
        let q0 = lerp(&self.p0, &self.p1, u);
        let q1 = lerp(&self.p1, &self.p2, u);
        let q2 = lerp(&self.p2, &self.p3, u);
        let r0 = lerp(&q0, &q1, u);
        let r1 = lerp(&q1, &q2, u);
        lerp(&r0, &r1, u)
    }

    /// First derivative with respect to `u`.
    #[must_use]
    pub fn derivative(&self, u: f64) -> Vector2 {
        let s = 1.0 - u;
        ((self.p1 - self.p0) * (s * s) + (self.p2 - self.p1) * (2.0 * s * u) + (self.p3 - self.p2) * (u * u))
            * 3.0
    }

    /// Unit tangent at `u`.
    ///
    /// Where a handle coincides with its anchor the derivative vanishes at
    /// that end, so the direction towards the next distinct control point is
    /// used instead. Falls back to the chord and finally to the zero vector.
    #[must_use]
    pub fn unit_tangent(&self, u: f64) -> Vector2 {
        let d = self.derivative(u);
        if let Some(t) = d.try_normalize(TOLERANCE) {
            return t;
        }
        let fallback = if u < 0.5 {
            [self.p1 - self.p0, self.p2 - self.p0, self.p3 - self.p0]
        } else {
            [self.p3 - self.p2, self.p3 - self.p1, self.p3 - self.p0]
        };
        fallback
            .iter()
            .find_map(|v| v.try_normalize(TOLERANCE))
            .unwrap_or_else(Vector2::zeros)
    }

    /// Unit normal at `u`, pointing to the left of the direction of travel.
    #[must_use]
    pub fn unit_normal(&self, u: f64) -> Vector2 {
        left_normal(&self.unit_tangent(u))
    }

    /// Length of the control polygon, an upper bound on the arc length.
    #[must_use]
    pub fn control_polygon_length(&self) -> f64 {
        (self.p1 - self.p0).norm() + (self.p2 - self.p1).norm() + (self.p3 - self.p2).norm()
    }

    /// Returns a stepper sampling the segment at `steps` even parameter
    /// intervals.
    #[must_use]
    pub fn forward_differences(&self, steps: u32) -> ForwardDifference {
        ForwardDifference::new(self, steps)
    }
}

/// Incremental cubic evaluator.
///
/// Seeded once from the control points, each [`ForwardDifference::advance`]
/// moves from `u = j / steps` to `u = (j + 1) / steps` with three vector
/// additions, both axes at once.
#[derive(Debug, Clone, Copy)]
pub struct ForwardDifference {
    value: Point2,
    d1: Vector2,
    d2: Vector2,
    d3: Vector2,
}

impl ForwardDifference {
    /// Seeds the differences for `steps` intervals (`0` is treated as `1`).
    #[must_use]
    pub fn new(curve: &CubicBezier, steps: u32) -> Self {
        let f = f64::from(steps.max(1));
        let q0 = curve.p0.coords;
        let q1 = curve.p1.coords;
        let q2 = curve.p2.coords;
        let q3 = curve.p3.coords;

        let rt1 = (q1 - q0) * (3.0 / f);
        let rt2 = (q0 - q1 * 2.0 + q2) * (3.0 / (f * f));
        let rt3 = (q3 - q0 + (q1 - q2) * 3.0) / (f * f * f);

        Self {
            value: curve.p0,
            d1: rt1 + rt2 + rt3,
            d2: rt2 * 2.0 + rt3 * 6.0,
            d3: rt3 * 6.0,
        }
    }

    /// The sample at the current step.
    #[must_use]
    pub fn current(&self) -> Point2 {
        self.value
    }

    /// Returns the current sample and moves to the next step.
    pub fn advance(&mut self) -> Point2 {
        let out = self.value;
        self.value += self.d1;
        self.d1 += self.d2;
        self.d2 += self.d3;
        out
    }
}

impl Iterator for ForwardDifference {
    type Item = Point2;

    fn next(&mut self) -> Option<Point2> {
        Some(self.advance())
    }
}
