use super::Point2;

/// An axis-aligned bounding rectangle in the plane.
///
/// An empty box has `min = +inf` and `max = -inf`, so the first
/// [`Bounds2::include`] initialises both corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds2 {
    /// Minimum corner.
    pub min: Point2,
    /// Maximum corner.
    pub max: Point2,
}

impl Default for Bounds2 {
    fn default() -> Self {
        Self::empty()
    }
}

impl Bounds2 {
    /// Creates an empty bounding box.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            min: Point2::new(f64::INFINITY, f64::INFINITY),
            max: Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Computes the bounding box of a set of points.
    #[must_use]
    pub fn from_points<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a Point2>,
    {
        let mut bounds = Self::empty();
        for p in points {
            bounds.include(p);
        }
        bounds
    }

    /// Grows the box to contain `p`.
    pub fn include(&mut self, p: &Point2) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    /// Extent along X. Negative infinity for an empty box.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Extent along Y. Negative infinity for an empty box.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Pads any axis whose extent is below `epsilon` by `margin` on both sides.
    pub fn pad_degenerate(&mut self, epsilon: f64, margin: f64) {
        if self.width() < epsilon {
            self.min.x -= margin;
            self.max.x += margin;
        }
        if self.height() < epsilon {
            self.min.y -= margin;
            self.max.y += margin;
        }
    }
}
