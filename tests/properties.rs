#![allow(clippy::unwrap_used)]

use maskfeather::math::{Bounds2, Point2};
use maskfeather::tessellation::{
    differentiate_calc_total, spline_resolution, DifferentiateSpline, FeatherSpline,
};
use maskfeather::{
    BezierTriple, CollapseInnerLoops, DisplaySize, EvaluationParams, MaskPoint, MaskSpline, WeightSample,
};
use proptest::prelude::*;

fn arb_point() -> impl Strategy<Value = MaskPoint> {
    (0.0f64..1.0, 0.0f64..1.0, -0.1f64..0.1, -0.1f64..0.1, 0.0f64..0.05).prop_map(|(x, y, hx, hy, w)| {
        MaskPoint::new(BezierTriple::new(
            Point2::new(x - hx, y - hy),
            Point2::new(x, y),
            Point2::new(x + hx, y + hy),
        ))
        .with_weight(w)
    })
}

fn arb_spline() -> impl Strategy<Value = MaskSpline> {
    (prop::collection::vec(arb_point(), 2..8), any::<bool>())
        .prop_map(|(points, cyclic)| MaskSpline::new(points, cyclic))
}

fn scaled(spline: &MaskSpline, k: f64) -> MaskSpline {
    let points = spline
        .points()
        .iter()
        .map(|p| {
            let t = p.triple;
            MaskPoint::new(BezierTriple::new(
                Point2::from(t.handle_in.coords * k),
                Point2::from(t.anchor.coords * k),
                Point2::from(t.handle_out.coords * k),
            ))
            .with_weight(p.weight())
        })
        .collect();
    MaskSpline::new(points, spline.is_cyclic())
}

/// Star-shaped polygon around the origin; always simple.
fn arb_star() -> impl Strategy<Value = Vec<Point2>> {
    prop::collection::vec((0.0f64..0.9, 1.0f64..10.0), 4..40).prop_map(|samples| {
        let n = samples.len();
        samples
            .iter()
            .enumerate()
            .map(|(i, &(jitter, radius))| {
                #[allow(clippy::cast_precision_loss)]
                let a = std::f64::consts::TAU * (i as f64 + jitter) / n as f64;
                Point2::new(radius * a.cos(), radius * a.sin())
            })
            .collect()
    })
}

/// Star polygon with every edge split into `pieces` collinear runs.
fn arb_dense_star() -> impl Strategy<Value = Vec<Point2>> {
    (arb_star(), 2usize..12).prop_map(|(star, pieces)| {
        let n = star.len();
        let mut out = Vec::with_capacity(n * pieces);
        for i in 0..n {
            let (a, b) = (star[i], star[(i + 1) % n]);
            for k in 0..pieces {
                #[allow(clippy::cast_precision_loss)]
                let t = k as f64 / pieces as f64;
                out.push(a + (b - a) * t);
            }
        }
        out
    })
}

fn arb_scribble() -> impl Strategy<Value = Vec<Point2>> {
    prop::collection::vec((-10.0f64..10.0, -10.0f64..10.0), 4..60)
        .prop_map(|coords| coords.into_iter().map(|(x, y)| Point2::new(x, y)).collect())
}

proptest! {
    #[test]
    fn centerline_count_matches_formula(spline in arb_spline(), resolution in 1u32..32) {
        let pts = DifferentiateSpline::new(&spline, resolution).execute().unwrap();
        let n = spline.point_count();
        let expected = if spline.is_cyclic() {
            resolution as usize * n
        } else {
            resolution as usize * (n - 1) + 1
        };
        prop_assert_eq!(pts.len(), expected);
        prop_assert_eq!(pts.len(), differentiate_calc_total(n, spline.is_cyclic(), resolution));
    }

    #[test]
    fn first_sample_is_first_anchor(spline in arb_spline(), resolution in 1u32..32) {
        let pts = DifferentiateSpline::new(&spline, resolution).execute().unwrap();
        let start = spline.segment(0).unwrap().evaluate(0.0);
        prop_assert!((pts[0] - start).norm() < 1e-12);
    }

    #[test]
    fn feather_matches_centerline_count(spline in arb_spline(), resolution in 1u32..32) {
        let center = DifferentiateSpline::new(&spline, resolution).execute().unwrap();
        let feather = FeatherSpline::new(&spline, resolution, false).execute().unwrap();
        prop_assert_eq!(center.len(), feather.len());
        for (c, f) in center.iter().zip(&feather) {
            prop_assert!((f - c).norm() <= 0.05 + 1e-9);
        }
    }

    #[test]
    fn resolution_is_bounded(spline in arb_spline(), width in 0u32..4096, height in 0u32..4096) {
        let params = EvaluationParams::default();
        let r = spline_resolution(&spline, DisplaySize::new(width, height), &params);
        prop_assert!((1..=params.max_resolution).contains(&r));
    }

    #[test]
    fn resolution_grows_with_scale(spline in arb_spline(), k in 1.01f64..10.0) {
        let params = EvaluationParams::default();
        let base = spline_resolution(&spline, DisplaySize::UNKNOWN, &params);
        let zoomed = spline_resolution(&scaled(&spline, k), DisplaySize::UNKNOWN, &params);
        prop_assert!(zoomed >= base);
    }

    #[test]
    fn resolution_grows_with_display(spline in arb_spline(), side in 1u32..1024, k in 1u32..8) {
        let params = EvaluationParams::default();
        let small = spline_resolution(&spline, DisplaySize::new(side, side), &params);
        let large = spline_resolution(&spline, DisplaySize::new(side * k, side * k), &params);
        prop_assert!(large >= small);
    }

    #[test]
    fn weight_is_piecewise_linear(w0 in -1.0f64..1.0, w1 in -1.0f64..1.0, ws in -1.0f64..1.0,
                                  us in 0.05f64..0.95, u in 0.0f64..1.0) {
        let first = MaskPoint::new(BezierTriple::corner(Point2::new(0.0, 0.0)))
            .with_weight(w0)
            .with_weight_samples(vec![WeightSample::new(us, ws)])
            .unwrap();
        let last = MaskPoint::new(BezierTriple::corner(Point2::new(1.0, 0.0))).with_weight(w1);
        let spline = MaskSpline::new(vec![first, last], false);
        let expected = if u <= us {
            w0 + (ws - w0) * (u / us)
        } else {
            ws + (w1 - ws) * ((u - us) / (1.0 - us))
        };
        prop_assert!((spline.point_weight(0, u) - expected).abs() < 1e-9);
    }

    #[test]
    fn simple_polygons_are_untouched(points in arb_star()) {
        let mut collapsed = points.clone();
        CollapseInnerLoops::new(true).execute(&mut collapsed);
        prop_assert_eq!(collapsed, points);
    }

    #[test]
    fn collinear_runs_are_untouched(points in arb_dense_star(), cyclic in any::<bool>()) {
        let mut collapsed = points.clone();
        CollapseInnerLoops::new(cyclic).execute(&mut collapsed);
        prop_assert_eq!(&collapsed, &points);

        CollapseInnerLoops::new(cyclic).execute(&mut collapsed);
        prop_assert_eq!(collapsed, points);
    }

    #[test]
    fn collapse_is_deterministic_and_stays_in_bounds(points in arb_scribble(), cyclic in any::<bool>()) {
        let bounds = Bounds2::from_points(&points);
        let mut first = points.clone();
        let mut second = points.clone();
        CollapseInnerLoops::new(cyclic).execute(&mut first);
        CollapseInnerLoops::new(cyclic).execute(&mut second);

        prop_assert_eq!(first.len(), points.len());
        prop_assert_eq!(&first, &second);
        for p in &first {
            prop_assert!(p.x >= bounds.min.x - 1e-9 && p.x <= bounds.max.x + 1e-9);
            prop_assert!(p.y >= bounds.min.y - 1e-9 && p.y <= bounds.max.y + 1e-9);
        }
    }

    #[test]
    fn bucket_ceiling_does_not_change_simple_input(points in arb_star(), cap in 1usize..16) {
        let mut capped = points.clone();
        CollapseInnerLoops::new(true)
            .with_max_buckets_per_side(cap)
            .execute(&mut capped);
        prop_assert_eq!(capped, points);
    }
}
