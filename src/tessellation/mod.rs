mod differentiate;
mod feather;
mod resolution;

pub use differentiate::{
    differentiate, differentiate_calc_total, differentiate_with_resolution, point_segment_diff,
    DifferentiateSpline,
};
pub use feather::{
    feather_differentiated_points, feather_differentiated_points_with_resolution, feather_points,
    point_segment_feather_diff, FeatherSpline,
};
pub use resolution::{feather_resolution, spline_resolution};

use crate::error::{EvaluationError, Result};

/// Parameters bounding evaluation cost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationParams {
    /// Ceiling on samples per segment.
    pub max_resolution: u32,
    /// Target sample spacing, in normalized spline space, when the display
    /// size is unknown.
    pub fallback_segment_length: f64,
    /// Target weight change per sample used to refine the feather resolution.
    pub feather_max_segment: f64,
    /// Ceiling on the bucket grid side used by the loop collapser.
    pub max_buckets_per_side: usize,
}

impl Default for EvaluationParams {
    fn default() -> Self {
        Self {
            max_resolution: 128,
            fallback_segment_length: 0.01,
            feather_max_segment: 0.005,
            max_buckets_per_side: 512,
        }
    }
}

impl EvaluationParams {
    /// Creates validated evaluation parameters.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::InvalidParameters`] if any value is zero,
    /// negative or not finite.
    pub fn new(
        max_resolution: u32,
        fallback_segment_length: f64,
        feather_max_segment: f64,
        max_buckets_per_side: usize,
    ) -> Result<Self> {
        if max_resolution == 0 {
            return Err(EvaluationError::InvalidParameters(
                "max_resolution must be at least 1".to_owned(),
            )
            .into());
        }
        if !(fallback_segment_length.is_finite() && fallback_segment_length > 0.0) {
            return Err(EvaluationError::InvalidParameters(
                "fallback_segment_length must be positive".to_owned(),
            )
            .into());
        }
        if !(feather_max_segment.is_finite() && feather_max_segment > 0.0) {
            return Err(EvaluationError::InvalidParameters(
                "feather_max_segment must be positive".to_owned(),
            )
            .into());
        }
        if max_buckets_per_side == 0 {
            return Err(EvaluationError::InvalidParameters(
                "max_buckets_per_side must be at least 1".to_owned(),
            )
            .into());
        }
        Ok(Self {
            max_resolution,
            fallback_segment_length,
            feather_max_segment,
            max_buckets_per_side,
        })
    }
}

/// Pixel size of the view a spline is drawn into.
///
/// A zero dimension means the size is unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplaySize {
    pub width: u32,
    pub height: u32,
}

impl DisplaySize {
    /// Unknown display size, selecting the fallback sample spacing.
    pub const UNKNOWN: Self = Self {
        width: 0,
        height: 0,
    };

    /// Display of `width` x `height` pixels.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether both dimensions are non-zero.
    #[must_use]
    pub fn is_known(&self) -> bool {
        self.width != 0 && self.height != 0
    }
}
