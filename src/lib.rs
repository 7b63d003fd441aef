//! Evaluation of feathered mask splines.
//!
//! A [`MaskSpline`] is tessellated into a centerline polyline and a matching
//! feather polyline offset by a per-point weight field. Feather polylines can
//! have their self-intersecting inner loops collapsed.

pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod tessellation;

pub use error::{MaskError, Result};
pub use geometry::{BezierTriple, MaskPoint, MaskSpline, WeightSample};
pub use operations::CollapseInnerLoops;
pub use tessellation::{DisplaySize, EvaluationParams};
