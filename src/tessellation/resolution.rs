use tracing::debug;

use crate::geometry::MaskSpline;
use crate::math::EXTENT_EPSILON;

use super::{DisplaySize, EvaluationParams};

/// Truncates a sample count and clamps it into `[1, max]`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_resolution(value: f64, max: u32) -> u32 {
    let max = max.max(1);
    if value.is_nan() || value < 1.0 {
        1
    } else if value >= f64::from(max) {
        max
    } else {
        value as u32
    }
}

/// Samples per segment needed to keep the centerline within one pixel.
///
/// The control polygon of each segment bounds its arc length; the longest
/// segment divided by the target spacing picks the shared resolution.
#[must_use]
pub fn spline_resolution(spline: &MaskSpline, display: DisplaySize, params: &EvaluationParams) -> u32 {
    let max_segment = if display.is_known() {
        1.0 / f64::from(display.width.max(display.height))
    } else {
        params.fallback_segment_length
    };

    let mut resolution = 1.0_f64;
    for (_, segment) in spline.segments() {
        let len = segment.control_polygon_length();
        resolution = resolution.max((len / max_segment).floor());
        if resolution >= f64::from(params.max_resolution) {
            break;
        }
    }

    let resolution = clamp_resolution(resolution, params.max_resolution);
    debug!(max_segment, resolution, "spline resolution");
    resolution
}

/// Centerline resolution refined by how steeply the feather width changes.
#[must_use]
pub fn feather_resolution(spline: &MaskSpline, display: DisplaySize, params: &EvaluationParams) -> u32 {
    let base = spline_resolution(spline, display, params);
    if base >= params.max_resolution {
        return params.max_resolution;
    }

    let mut max_jump = 0.0_f64;
    for point in spline.points() {
        let mut prev_u = 0.0;
        let mut prev_w = point.weight();
        for sample in point.weight_samples() {
            let u_diff = sample.u - prev_u;
            if u_diff > EXTENT_EPSILON {
                max_jump = max_jump.max(((sample.w - prev_w) / u_diff).abs());
            }
            prev_u = sample.u;
            prev_w = sample.w;
        }
    }

    let resolution = clamp_resolution(
        f64::from(base) + max_jump / params.feather_max_segment,
        params.max_resolution,
    );
    debug!(base, max_jump, resolution, "feather resolution");
    resolution
}
