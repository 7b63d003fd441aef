mod bucket_grid;

pub use bucket_grid::{buckets_per_side, Bucket, BucketGrid, EdgeIndices};

use tracing::trace;

use crate::math::intersect_2d::segment_crossing_point_2d;
use crate::math::{Bounds2, Point2};
use crate::tessellation::EvaluationParams;

use bucket_grid::edges;

/// Removes self-intersecting inner loops from a feather polyline.
///
/// Every edge is tested against the edges sharing its grid buckets. When two
/// edges cross, the polyline splits into the span between them and its
/// complement; whichever has the smaller bounding box on either axis is
/// overwritten with the crossing point.
///
/// The pass is greedy and runs in increasing edge order over a grid built
/// once up front. Buckets are not updated after a collapse, so later tests
/// may see edges whose vertices were already moved to a crossing point.
#[derive(Debug, Clone, Copy)]
pub struct CollapseInnerLoops {
    cyclic: bool,
    max_buckets_per_side: usize,
}

impl CollapseInnerLoops {
    /// Creates a collapse pass for a closed (`cyclic`) or open polyline.
    #[must_use]
    pub fn new(cyclic: bool) -> Self {
        Self {
            cyclic,
            max_buckets_per_side: EvaluationParams::default().max_buckets_per_side,
        }
    }

    /// Caps the side of the bucket grid.
    #[must_use]
    pub fn with_max_buckets_per_side(mut self, max_buckets_per_side: usize) -> Self {
        self.max_buckets_per_side = max_buckets_per_side;
        self
    }

    /// Collapses inner loops of `points` in place.
    ///
    /// Polylines with fewer than four points are left untouched.
    pub fn execute(&self, points: &mut [Point2]) {
        let Some(grid) = BucketGrid::build(points, self.cyclic, self.max_buckets_per_side) else {
            return;
        };

        for (cur_a, cur_b) in edges(points.len(), self.cyclic) {
            let start_bucket = grid.bucket_index(&points[cur_a]);
            let end_bucket = grid.bucket_index(&points[cur_b]);

            check_bucket(points, grid.bucket(start_bucket), cur_a, cur_b);

            if start_bucket != end_bucket {
                let (diagonal_a, diagonal_b) = grid.diagonal(start_bucket, end_bucket);
                check_bucket(points, grid.bucket(end_bucket), cur_a, cur_b);
                check_bucket(points, grid.bucket(diagonal_a), cur_a, cur_b);
                check_bucket(points, grid.bucket(diagonal_b), cur_a, cur_b);
            }
        }
    }
}

/// Tests edge `cur_a -> cur_b` against earlier, non-adjacent edges of a
/// bucket, collapsing a loop for every crossing found.
fn check_bucket(points: &mut [Point2], bucket: &Bucket, cur_a: usize, cur_b: usize) {
    for &(check_a, check_b) in bucket.edges() {
        if check_a + 1 >= cur_a || check_a == cur_b {
            continue;
        }

        let Some(p) = segment_crossing_point_2d(
            &points[cur_a],
            &points[cur_b],
            &points[check_a],
            &points[check_b],
        ) else {
            continue;
        };

        let inner = check_b..=cur_a;
        let mut inner_bounds = Bounds2::empty();
        let mut outer_bounds = Bounds2::empty();
        for (k, point) in points.iter().enumerate() {
            if inner.contains(&k) {
                inner_bounds.include(point);
            } else {
                outer_bounds.include(point);
            }
        }

        if inner_bounds.width() < outer_bounds.width()
            || inner_bounds.height() < outer_bounds.height()
        {
            trace!(check_b, cur_a, x = p.x, y = p.y, "collapsing inner span");
            points[inner].fill(p);
        } else {
            trace!(check_a, cur_b, x = p.x, y = p.y, "collapsing outer span");
            points[..=check_a].fill(p);
            if cur_b != 0 {
                points[cur_b..].fill(p);
            }
        }
    }
}
