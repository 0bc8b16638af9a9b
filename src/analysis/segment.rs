//! Inflection search and S-curve windows.

use super::Curvature;
use crate::curves::Differentiable;
use crate::error::{LineaError, Result};
use crate::numeric::{brentq, ScalarOptions};
use crate::primitives::Point2;
use tracing::debug;

/// Options for [`find_inflection_points`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentOptions {
    /// Number of equal sub-intervals the domain is scanned in.
    pub n_splits: usize,
    /// Roots closer than this are merged.
    pub dedup_tolerance: f64,
    /// Brent options for refining each sign change.
    pub root: ScalarOptions,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            n_splits: 100_000,
            dedup_tolerance: 1e-9,
            root: ScalarOptions::default(),
        }
    }
}

impl SegmentOptions {
    /// Sets the scan resolution.
    pub fn with_splits(mut self, n_splits: usize) -> Self {
        self.n_splits = n_splits;
        self
    }

    /// Sets the merge tolerance.
    pub fn with_dedup_tolerance(mut self, tolerance: f64) -> Self {
        self.dedup_tolerance = tolerance;
        self
    }
}

/// Three consecutive inflection points bounding one S-shaped stretch.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SCurveWindow {
    /// Start of the first arc.
    pub begin: f64,
    /// Inflection shared by both arcs.
    pub center: f64,
    /// End of the second arc.
    pub end: f64,
}

impl SCurveWindow {
    /// Creates a window.
    pub fn new(begin: f64, center: f64, end: f64) -> Self {
        Self { begin, center, end }
    }

    /// `[begin, center]` and `[center, end]`.
    pub fn arcs(&self) -> [(f64, f64); 2] {
        [(self.begin, self.center), (self.center, self.end)]
    }
}

/// Parameters where the signed curvature of `curve` changes sign, bracketed
/// by the domain ends.
///
/// The domain is cut into `n_splits` equal sub-intervals. Each one whose
/// curvature strictly changes sign, or starts at an exact zero, is refined
/// with Brent's method; sub-intervals where the root finder fails are
/// skipped. The result is ascending and free of near duplicates.
///
/// # Errors
///
/// * [`LineaError::InvalidInput`] when `n_splits` is zero.
/// * [`LineaError::DegenerateDerivative`] when the curve cannot be
///   differentiated twice.
pub fn find_inflection_points<C>(curve: &C, options: &SegmentOptions) -> Result<Vec<f64>>
where
    C: Differentiable<f64, Point = Point2<f64>>,
{
    if options.n_splits == 0 {
        return Err(LineaError::invalid("n_splits must be positive"));
    }
    let curvature = Curvature::new(curve)?;
    let (lo, hi) = curvature.domain();
    let n = options.n_splits;
    let at = |i: usize| lo + (hi - lo) * (i as f64) / (n as f64);

    let mut roots = Vec::new();
    let mut skipped = 0usize;
    let mut left = curvature.signed(lo);
    for i in 0..n {
        let (a, b) = (at(i), at(i + 1));
        let right = curvature.signed(b);
        if left == 0.0 {
            roots.push(a);
        } else if (left < 0.0 && right > 0.0) || (left > 0.0 && right < 0.0) {
            match brentq(|t| curvature.signed(t), a, b, &options.root) {
                Ok(r) => roots.push(r.root),
                Err(_) => skipped += 1,
            }
        }
        left = right;
    }
    if skipped > 0 {
        debug!(skipped, "inflection brackets without a root");
    }

    let tol = options.dedup_tolerance;
    let mut points = vec![lo];
    for root in roots {
        let last = points[points.len() - 1];
        if root - last > tol && hi - root > tol {
            points.push(root);
        }
    }
    points.push(hi);
    Ok(points)
}

/// Slides a width-3 window over consecutive inflection points.
pub fn build_windows(points: &[f64]) -> Vec<SCurveWindow> {
    points
        .windows(3)
        .map(|w| SCurveWindow::new(w[0], w[1], w[2]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::BSpline2;
    use approx::assert_relative_eq;

    fn s_bezier() -> BSpline2<f64> {
        BSpline2::new(
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 1.0),
                Point2::new(2.0, -1.0),
                Point2::new(3.0, 0.0),
            ],
            3,
            vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0],
        )
        .unwrap()
    }

    #[test]
    fn test_single_inflection() {
        let points = find_inflection_points(&s_bezier(), &SegmentOptions::default()).unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[0], 0.0);
        assert_relative_eq!(points[1], 0.5, epsilon = 1e-9);
        assert_eq!(points[2], 1.0);
    }

    #[test]
    fn test_inflection_between_grid_points() {
        // 7 splits never land on 0.5
        let options = SegmentOptions::default().with_splits(7);
        let points = find_inflection_points(&s_bezier(), &options).unwrap();
        assert_eq!(points.len(), 3);
        assert_relative_eq!(points[1], 0.5, epsilon = 1e-9);
    }

    #[test]
    fn test_convex_curve_has_only_endpoints() {
        let arch = BSpline2::new(
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 2.0),
                Point2::new(3.0, 2.0),
                Point2::new(4.0, 0.0),
            ],
            3,
            vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0],
        )
        .unwrap();
        let points = find_inflection_points(&arch, &SegmentOptions::default().with_splits(1000)).unwrap();
        assert_eq!(points, vec![0.0, 1.0]);
        assert!(build_windows(&points).is_empty());
    }

    #[test]
    fn test_rejects_zero_splits() {
        let options = SegmentOptions::default().with_splits(0);
        assert!(find_inflection_points(&s_bezier(), &options).is_err());
    }

    #[test]
    fn test_build_windows() {
        let windows = build_windows(&[0.0, 0.2, 0.5, 1.0]);
        assert_eq!(
            windows,
            vec![
                SCurveWindow::new(0.0, 0.2, 0.5),
                SCurveWindow::new(0.2, 0.5, 1.0),
            ]
        );
        assert_eq!(windows[1].arcs(), [(0.2, 0.5), (0.5, 1.0)]);
        assert!(build_windows(&[0.0, 1.0]).is_empty());
    }
}
