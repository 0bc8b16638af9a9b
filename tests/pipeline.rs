//! End-to-end: fit a spatial trajectory, project it and analyze the result.

use approx::assert_relative_eq;
use linea::analysis::{analyze, length_ratio, trajectory_score, AnalysisOptions, SegmentOptions};
use linea::fit::{fit, ConvergenceReason, FitOptions, FittedCurve};
use linea::geometry::{project_to_plane, ViewPlane};
use linea::record::BSplineRecord;
use linea::Point3;

fn trajectory() -> Vec<Point3<f64>> {
    (0..40)
        .map(|i| {
            let t = i as f64 / 39.0;
            Point3::new(4.0 * t, (2.0 * std::f64::consts::PI * t).sin(), 0.0)
        })
        .collect()
}

fn fitted() -> FittedCurve<Point3<f64>, f64> {
    let options = FitOptions::default().with_error_threshold(0.04);
    fit(&trajectory(), &options).unwrap()
}

fn options() -> AnalysisOptions {
    AnalysisOptions::default().with_segment(SegmentOptions::default().with_splits(2000))
}

#[test]
fn test_fit_meets_threshold() {
    let fitted = fitted();
    assert_eq!(fitted.reason, ConvergenceReason::ErrorThreshold);
    assert!(fitted.total_error <= 0.04);
    assert_eq!(fitted.curve.degree(), 4);
    assert!(fitted.curve.control_points().len() <= trajectory().len());

    let samples = trajectory();
    for (q, &t) in samples.iter().zip(fitted.parameterization.as_slice()) {
        let c = fitted.curve.eval(t);
        assert!((q.x - c.x).hypot(q.y - c.y) <= 0.04);
    }
}

#[test]
fn test_projected_analysis_finds_an_s_curve() {
    let fitted = fitted();
    let view = ViewPlane::parse("xy").unwrap();
    let screen = project_to_plane(fitted.curve, view.matrix());
    let report = analyze(&screen, &options()).unwrap();

    assert!(report.inflection_points.len() >= 3);
    assert_eq!(report.inflection_points[0], 0.0);
    assert_eq!(*report.inflection_points.last().unwrap(), 1.0);
    assert!(report.inflection_points.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(report.curve_count(), report.inflection_points.len() - 2);

    // the sine turns by well over the target on both sides of its middle
    let valid: Vec<_> = report.valid_curves().collect();
    assert!(!valid.is_empty());
    assert!(valid[0].arcs.iter().all(|a| a.is_trimmed));

    let trim = options().trim;
    let score = trajectory_score(&report, &trim).unwrap();
    assert!(score > 0.0);
    let ratio = length_ratio(&report).unwrap();
    assert!(ratio > 0.0 && ratio <= 1.0);
}

#[test]
fn test_mirrored_view_keeps_inflections() {
    let fitted = fitted();
    let xy = project_to_plane(fitted.curve.clone(), ViewPlane::parse("xy").unwrap().matrix());
    let yx = project_to_plane(fitted.curve, ViewPlane::parse("yx").unwrap().matrix());

    let a = analyze(&xy, &options()).unwrap();
    let b = analyze(&yx, &options()).unwrap();
    assert_eq!(a.inflection_points.len(), b.inflection_points.len());
    for (s, t) in a.inflection_points.iter().zip(&b.inflection_points) {
        assert_relative_eq!(*s, *t, epsilon = 1e-9);
    }
    for (v, w) in a.curves.iter().zip(&b.curves) {
        assert_eq!(v.is_valid, w.is_valid);
        assert_relative_eq!(
            v.arcs[0].total_curvature,
            w.arcs[0].total_curvature,
            epsilon = 1e-6
        );
    }
}

#[test]
fn test_record_rebuilds_fitted_curve() {
    let fitted = fitted();
    let record = BSplineRecord::from_fitted(&fitted);
    assert_eq!(record.degree, 4);
    assert_eq!(record.parameter.len(), 40);
    assert_eq!(
        record.knot_vector.len(),
        record.control_point.len() + record.degree + 1
    );

    let rebuilt = record.to_curve::<Point3<f64>>().unwrap();
    for i in 0..=50 {
        let t = i as f64 / 50.0;
        assert_eq!(rebuilt.eval(t), fitted.curve.eval(t));
    }
    assert_eq!(record.parameterization().unwrap(), fitted.parameterization);
}
