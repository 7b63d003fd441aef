use tracing::debug;

use crate::math::{Bounds2, Point2, Vector2, EXTENT_EPSILON};

/// Capacity added whenever a bucket runs out of room.
const BUCKET_CHUNK: usize = 256;

/// Padding applied to a bounding box axis that has collapsed to a line.
const DEGENERATE_PADDING: f64 = 0.01;

/// Fraction of a bucket the longest edge may span on its dominant axis.
const EDGE_FILL: f64 = 0.9;

/// Edge of a polyline, as `(start, end)` vertex indices.
pub type EdgeIndices = (usize, usize);

/// A grid cell holding the edges registered into it.
#[derive(Debug, Clone, Default)]
pub struct Bucket {
    edges: Vec<EdgeIndices>,
}

impl Bucket {
    fn add_edge(&mut self, start: usize, end: usize) {
        if self.edges.len() == self.edges.capacity() {
            self.edges.reserve_exact(BUCKET_CHUNK);
        }
        self.edges.push((start, end));
    }

    /// Edges registered into this bucket, in insertion order.
    #[must_use]
    pub fn edges(&self) -> &[EdgeIndices] {
        &self.edges
    }
}

/// Uniform square grid over a polyline's bounding box.
///
/// Sized from the longest edge so that one edge rarely spans more than two
/// buckets per axis. Each edge is registered into the buckets of its two
/// endpoints and the two buckets at the remaining corners of the rectangle
/// they span.
#[derive(Debug, Clone)]
pub struct BucketGrid {
    min: Point2,
    scale: Vector2,
    buckets_per_side: usize,
    buckets: Vec<Bucket>,
}

impl BucketGrid {
    /// Builds the grid for `points`.
    ///
    /// Returns `None` for fewer than four points, where no self-intersection
    /// is possible.
    #[must_use]
    pub fn build(points: &[Point2], cyclic: bool, max_buckets_per_side: usize) -> Option<Self> {
        let n = points.len();
        if n < 4 {
            return None;
        }

        let mut bounds = Bounds2::from_points(points);
        let mut max_delta = Vector2::zeros();
        for (start, end) in edges(n, cyclic) {
            let d = points[start] - points[end];
            max_delta.x = max_delta.x.max(d.x.abs());
            max_delta.y = max_delta.y.max(d.y.abs());
        }
        bounds.pad_degenerate(EXTENT_EPSILON, DEGENERATE_PADDING);

        let extent = Vector2::new(bounds.width(), bounds.height());
        let buckets_per_side = buckets_per_side(
            max_delta.x / extent.x,
            max_delta.y / extent.y,
            max_buckets_per_side,
        );
        #[allow(clippy::cast_precision_loss)]
        let side = buckets_per_side as f64;
        let scale = Vector2::new(side / extent.x, side / extent.y);

        let mut grid = Self {
            min: bounds.min,
            scale,
            buckets_per_side,
            buckets: vec![Bucket::default(); buckets_per_side * buckets_per_side],
        };

        for (start, end) in edges(n, cyclic) {
            let start_bucket = grid.bucket_index(&points[start]);
            let end_bucket = grid.bucket_index(&points[end]);

            grid.buckets[start_bucket].add_edge(start, end);
            if start_bucket != end_bucket {
                let (diagonal_a, diagonal_b) = grid.diagonal(start_bucket, end_bucket);
                grid.buckets[end_bucket].add_edge(start, end);
                grid.buckets[diagonal_a].add_edge(start, end);
                grid.buckets[diagonal_b].add_edge(start, end);
            }
        }

        debug!(points = n, buckets_per_side, "built feather bucket grid");
        Some(grid)
    }

    /// Number of buckets along each side of the grid.
    #[must_use]
    pub fn buckets_per_side(&self) -> usize {
        self.buckets_per_side
    }

    /// The bucket at a flat `row * side + column` index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn bucket(&self, index: usize) -> &Bucket {
        &self.buckets[index]
    }

    /// Flat index of the bucket containing `p`.
    ///
    /// Points on the maximum edge of the box fall into the last row or
    /// column; points outside the box clamp to the nearest bucket.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn bucket_index(&self, p: &Point2) -> usize {
        let last = self.buckets_per_side - 1;
        let cell = |value: f64| -> usize {
            if value.is_nan() || value <= 0.0 {
                0
            } else {
                (value as usize).min(last)
            }
        };
        let x = cell((p.x - self.min.x) * self.scale.x);
        let y = cell((p.y - self.min.y) * self.scale.y);
        y * self.buckets_per_side + x
    }

    /// The two buckets sharing a row with one index and a column with the
    /// other.
    #[must_use]
    pub fn diagonal(&self, start: usize, end: usize) -> (usize, usize) {
        let side = self.buckets_per_side;
        let (start_x, start_y) = (start % side, start / side);
        let (end_x, end_y) = (end % side, end / side);
        (start_y * side + end_x, end_y * side + start_x)
    }
}

/// Picks the grid side for normalized longest-edge extents.
///
/// `0.9 / max(dx, dy)` truncated and clamped to `[1, max_buckets_per_side]`.
/// Polylines whose edges all have zero length get a single bucket.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub fn buckets_per_side(
    normalized_delta_x: f64,
    normalized_delta_y: f64,
    max_buckets_per_side: usize,
) -> usize {
    let max_buckets_per_side = max_buckets_per_side.max(1);
    let max_delta = normalized_delta_x.max(normalized_delta_y);
    if max_delta.is_nan() || max_delta <= 0.0 {
        return 1;
    }
    let side = EDGE_FILL / max_delta;
    if side >= max_buckets_per_side as f64 {
        return max_buckets_per_side;
    }
    (side as usize).max(1)
}

/// Edges of an `n`-vertex polyline, including the wrap edge when cyclic.
pub(crate) fn edges(n: usize, cyclic: bool) -> impl Iterator<Item = EdgeIndices> {
    let count = match n {
        0 | 1 => 0,
        _ if cyclic => n,
        _ => n - 1,
    };
    (0..count).map(move |i| (i, (i + 1) % n))
}
