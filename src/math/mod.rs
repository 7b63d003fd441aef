pub mod bounds_2d;
pub mod intersect_2d;

pub use bounds_2d::Bounds2;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Smallest spacing treated as a real extent or parameter step.
///
/// Matches single-precision machine epsilon, the granularity mask control
/// data is authored at.
pub const EXTENT_EPSILON: f64 = 1.192_092_9e-7;

/// Linear interpolation between two points.
#[must_use]
pub fn lerp(a: &Point2, b: &Point2, t: f64) -> Point2 {
    a + (b - a) * t
}

/// Returns the left-pointing normal of a direction vector.
#[must_use]
pub fn left_normal(dir: &Vector2) -> Vector2 {
    Vector2::new(-dir.y, dir.x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_midpoint() {
        let p = lerp(&Point2::new(0.0, 2.0), &Point2::new(4.0, 6.0), 0.5);
        assert!((p.x - 2.0).abs() < TOLERANCE);
        assert!((p.y - 4.0).abs() < TOLERANCE);
    }

    #[test]
    fn left_normal_basic() {
        let n = left_normal(&Vector2::new(1.0, 0.0));
        assert!(n.x.abs() < TOLERANCE);
        assert!((n.y - 1.0).abs() < TOLERANCE);
    }
}
