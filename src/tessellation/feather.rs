use tracing::debug;

use crate::error::{try_buffer, EvaluationError, Result};
use crate::geometry::{CubicBezier, MaskSpline};
use crate::math::Point2;
use crate::operations::CollapseInnerLoops;

use super::{differentiate_calc_total, feather_resolution, DisplaySize, EvaluationParams};

/// Offsets the point at `u` on the segment leaving `index` by the feather
/// width along the local normal.
fn feather_offset(spline: &MaskSpline, index: usize, segment: &CubicBezier, u: f64) -> Point2 {
    segment.evaluate(u) + segment.unit_normal(u) * spline.point_weight(index, u)
}

/// Evaluates the feather outline of a spline.
///
/// Produces one point per segment sample at `u = j / resolution`, plus the
/// `u = 1` point of the last segment for open splines, so the output aligns
/// with [`super::DifferentiateSpline`] at the same resolution. When collapse is
/// requested and the spline asks for it, self-intersecting loops are removed
/// in place before returning.
#[derive(Debug)]
pub struct FeatherSpline<'a> {
    spline: &'a MaskSpline,
    resolution: u32,
    collapse: bool,
    max_buckets_per_side: usize,
}

impl<'a> FeatherSpline<'a> {
    /// Creates a new feather evaluation.
    ///
    /// `collapse` is combined with the spline's own self-intersection flag.
    #[must_use]
    pub fn new(spline: &'a MaskSpline, resolution: u32, collapse: bool) -> Self {
        Self {
            spline,
            resolution,
            collapse,
            max_buckets_per_side: EvaluationParams::default().max_buckets_per_side,
        }
    }

    /// Overrides the bucket grid ceiling used by the loop collapser.
    #[must_use]
    pub fn with_params(mut self, params: &EvaluationParams) -> Self {
        self.max_buckets_per_side = params.max_buckets_per_side;
        self
    }

    /// Executes the evaluation.
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
        let step = 1.0 / f64::from(self.resolution);

        let mut last = None;
        for (index, segment) in self.spline.segments() {
            for j in 0..self.resolution {
                let u = f64::from(j) * step;
                points.push(feather_offset(self.spline, index, &segment, u));
            }
            last = Some((index, segment));
        }
        if let (false, Some((index, segment))) = (cyclic, last) {
            points.push(feather_offset(self.spline, index, &segment, 1.0));
        }
        debug_assert_eq!(points.len(), total);

        if self.collapse && self.spline.self_intersection_check() {
            CollapseInnerLoops::new(cyclic)
                .with_max_buckets_per_side(self.max_buckets_per_side)
                .execute(&mut points);
        }

        Ok(points)
    }
}

/// Feather polyline at the feather resolution estimated for `display`.
///
/// # Errors
///
/// Returns [`EvaluationError::Allocation`] if the output cannot be allocated.
pub fn feather_differentiated_points_with_resolution(
    spline: &MaskSpline,
    display: DisplaySize,
    do_feather_isect: bool,
    params: &EvaluationParams,
) -> Result<Vec<Point2>> {
    let resolution = feather_resolution(spline, display, params);
    debug!(resolution, do_feather_isect, "evaluating feather");
    FeatherSpline::new(spline, resolution, do_feather_isect)
        .with_params(params)
        .execute()
}

/// Feather polyline using the fallback spacing, default parameters and
/// loop collapsing where the spline requests it.
///
/// # Errors
///
/// Returns [`EvaluationError::Allocation`] if the output cannot be allocated.
pub fn feather_differentiated_points(spline: &MaskSpline) -> Result<Vec<Point2>> {
    feather_differentiated_points_with_resolution(
        spline,
        DisplaySize::UNKNOWN,
        true,
        &EvaluationParams::default(),
    )
}

/// Feather points at the control data itself rather than a smooth sampling.
///
/// Each point contributes its anchor offset by its base weight, followed by
/// one offset point per weight sample, giving `sum(1 + samples)` points.
///
/// # Errors
///
/// Returns [`EvaluationError::Allocation`] if the output cannot be allocated.
pub fn feather_points(spline: &MaskSpline) -> Result<Vec<Point2>> {
    let total = spline
        .points()
        .iter()
        .map(|p| 1 + p.weight_samples().len())
        .sum();
    let mut points = try_buffer(total)?;

    for (index, point) in spline.points().iter().enumerate() {
        let normal = spline.point_normal(index, 0.0);
        points.push(point.anchor() + normal * spline.point_weight(index, 0.0));

        for sample in point.weight_samples() {
            let co = spline.point_segment_co(index, sample.u);
            let normal = spline.point_normal(index, sample.u);
            points.push(co + normal * spline.point_weight(index, sample.u));
        }
    }

    Ok(points)
}

/// Feather samples of the single segment leaving point `index`.
///
/// Returns `resolution` points at `u = j / resolution`, or an empty buffer
/// when the point has no outgoing segment.
///
/// # Errors
///
/// Returns [`EvaluationError::Allocation`] if the output cannot be allocated.
pub fn point_segment_feather_diff(
    spline: &MaskSpline,
    index: usize,
    display: DisplaySize,
    params: &EvaluationParams,
) -> Result<Vec<Point2>> {
    let Some(segment) = spline.segment(index) else {
        return Ok(Vec::new());
    };
    let resolution = feather_resolution(spline, display, params);
    let mut points = try_buffer(resolution as usize)?;
    let step = 1.0 / f64::from(resolution);
    for j in 0..resolution {
        points.push(feather_offset(spline, index, &segment, f64::from(j) * step));
    }
    Ok(points)
}
