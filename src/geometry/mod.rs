pub mod bezier;
pub mod spline;

pub use bezier::{CubicBezier, ForwardDifference};
pub use spline::{BezierTriple, MaskPoint, MaskSpline, WeightSample};
