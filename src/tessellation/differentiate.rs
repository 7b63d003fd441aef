use tracing::debug;

use crate::error::{try_buffer, EvaluationError, Result};
use crate::geometry::MaskSpline;
use crate::math::Point2;

use super::{spline_resolution, DisplaySize, EvaluationParams};

/// Number of centerline points produced for a spline at `resolution`.
///
/// `resolution * point_count` when cyclic, otherwise
/// `resolution * (point_count - 1) + 1`. Zero for fewer than two points.
#[must_use]
pub fn differentiate_calc_total(point_count: usize, cyclic: bool, resolution: u32) -> usize {
    if point_count < 2 {
        return 0;
    }
    let resolution = resolution as usize;
    if cyclic {
        point_count * resolution
    } else {
        (point_count - 1) * resolution + 1
    }
}

/// Tessellates a spline centerline into a polyline.
///
/// Every segment contributes `resolution` samples marched with forward
/// differences; an open spline is closed off with the exact last anchor.
/// The layout matches [`super::FeatherSpline`] at the same resolution, index
/// for index.
#[derive(Debug)]
pub struct DifferentiateSpline<'a> {
    spline: &'a MaskSpline,
    resolution: u32,
}

impl<'a> DifferentiateSpline<'a> {
    /// Creates a new centerline tessellation.
    #[must_use]
    pub fn new(spline: &'a MaskSpline, resolution: u32) -> Self {
        Self { spline, resolution }
    }

    /// Executes the tessellation.
    ///
    /// Returns an empty buffer for splines with fewer than two points.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::InvalidParameters`] for a zero resolution
    /// and [`EvaluationError::Allocation`] if the output cannot be allocated.
    pub fn execute(&self) -> Result<Vec<Point2>> {
        if self.resolution == 0 {
            return Err(EvaluationError::InvalidParameters(
                "resolution must be at least 1".to_owned(),
            )
            .into());
        }
        let n = self.spline.point_count();
        if n <= 1 {
            return Ok(Vec::new());
        }

        let cyclic = self.spline.is_cyclic();
        let total = differentiate_calc_total(n, cyclic, self.resolution);
        let mut points = try_buffer(total)?;

        for (_, segment) in self.spline.segments() {
            points.extend(segment.forward_differences(self.resolution).take(self.resolution as usize));
        }
        if !cyclic {
            points.push(self.spline.points()[n - 1].anchor());
        }

        debug_assert_eq!(points.len(), total);
        Ok(points)
    }
}

/// Centerline polyline at the resolution estimated for `display`.
///
/// # Errors
///
/// Returns [`EvaluationError::Allocation`] if the output cannot be allocated.
pub fn differentiate_with_resolution(
    spline: &MaskSpline,
    display: DisplaySize,
    params: &EvaluationParams,
) -> Result<Vec<Point2>> {
    let resolution = spline_resolution(spline, display, params);
    debug!(resolution, points = spline.point_count(), "differentiating spline");
    DifferentiateSpline::new(spline, resolution).execute()
}

/// Centerline polyline using the fallback spacing and default parameters.
///
/// # Errors
///
/// Returns [`EvaluationError::Allocation`] if the output cannot be allocated.
pub fn differentiate(spline: &MaskSpline) -> Result<Vec<Point2>> {
    differentiate_with_resolution(spline, DisplaySize::UNKNOWN, &EvaluationParams::default())
}

/// Centerline samples of the single segment leaving point `index`.
///
/// Returns `resolution + 1` points including both anchors, or an empty
/// buffer when the point has no outgoing segment.
///
/// # Errors
///
/// Returns [`EvaluationError::Allocation`] if the output cannot be allocated.
pub fn point_segment_diff(
    spline: &MaskSpline,
    index: usize,
    display: DisplaySize,
    params: &EvaluationParams,
) -> Result<Vec<Point2>> {
    let Some(segment) = spline.segment(index) else {
        return Ok(Vec::new());
    };
    let resolution = spline_resolution(spline, display, params);
    let mut points = try_buffer(resolution as usize + 1)?;
    points.extend(segment.forward_differences(resolution).take(resolution as usize));
    points.push(segment.p3);
    Ok(points)
}
