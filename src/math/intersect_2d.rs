use super::{Point2, Vector2, TOLERANCE};

/// Returns `true` when `c` lies strictly counter-clockwise of the ray `a -> b`.
#[inline]
fn ccw(a: &Point2, b: &Point2, c: &Point2) -> bool {
    (c.y - a.y) * (b.x - a.x) > (b.y - a.y) * (c.x - a.x)
}

/// Tests whether two segments properly cross.
///
/// Collinear, parallel, touching and zero-length configurations never count
/// as a crossing.
#[must_use]
pub fn segments_cross_2d(a0: &Point2, a1: &Point2, b0: &Point2, b1: &Point2) -> bool {
    crossing_parameters(a0, a1, b0, b1).is_some()
}

/// Parameters `(t, u)` along `a` and `b` where the two segments cross.
///
/// The orientation predicates alone are fooled by rounding on collinear
/// segments, so the crossing must also solve as a non-parallel line pair with
/// both parameters inside `[0, 1]` up to [`TOLERANCE`].
fn crossing_parameters(a0: &Point2, a1: &Point2, b0: &Point2, b1: &Point2) -> Option<(f64, f64)> {
    if ccw(a0, b0, b1) == ccw(a1, b0, b1) || ccw(a0, a1, b0) == ccw(a0, a1, b1) {
        return None;
    }
    let da = a1 - a0;
    let db = b1 - b0;
    let cross = da.x * db.y - da.y * db.x;
    if cross.abs() <= TOLERANCE * da.norm() * db.norm() {
        return None;
    }
    let (t, u) = line_line_intersect_2d(a0, &da, b0, &db)?;
    let range = -TOLERANCE..=1.0 + TOLERANCE;
    (range.contains(&t) && range.contains(&u)).then_some((t, u))
}

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
) -> Option<(f64, f64)> {
    let cross = d1.x * d2.y - d1.y * d2.x;
    if cross.abs() < TOLERANCE * TOLERANCE {
        return None;
    }
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let t = (dx * d2.y - dy * d2.x) / cross;
    let u = (dx * d1.y - dy * d1.x) / cross;
    Some((t, u))
}

/// Crossing point of two segments.
///
/// Returns `None` unless [`segments_cross_2d`] holds. The returned point lies
/// on segment `a`; its parameter is already within [`TOLERANCE`] of `[0, 1]`
/// and is clamped onto it.
#[must_use]
pub fn segment_crossing_point_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
) -> Option<Point2> {
    let (t, _) = crossing_parameters(a0, a1, b0, b1)?;
    Some(a0 + (a1 - a0) * t.clamp(0.0, 1.0))
}
