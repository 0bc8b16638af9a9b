//! Whole-curve analysis: inflections, windows and trimmed arcs.

use super::{
    build_windows, find_inflection_points, ArcTrimmer, SegmentOptions, TrimOptions, WindowAnalysis,
};
use crate::curves::Differentiable;
use crate::error::Result;
use crate::primitives::Point2;
use tracing::info;

/// Options for [`analyze`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnalysisOptions {
    /// Inflection search.
    pub segment: SegmentOptions,
    /// Arc trimming.
    pub trim: TrimOptions,
}

impl AnalysisOptions {
    /// Sets the inflection search options.
    pub fn with_segment(mut self, segment: SegmentOptions) -> Self {
        self.segment = segment;
        self
    }

    /// Sets the trimming options.
    pub fn with_trim(mut self, trim: TrimOptions) -> Self {
        self.trim = trim;
        self
    }
}

/// Result of [`analyze`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurveAnalysis {
    /// Inflection parameters including the domain ends.
    pub inflection_points: Vec<f64>,
    /// One entry per S-curve window.
    pub curves: Vec<WindowAnalysis>,
}

impl CurveAnalysis {
    /// Number of analyzed windows.
    pub fn curve_count(&self) -> usize {
        self.curves.len()
    }

    /// Windows whose arcs both reach the lower bound.
    pub fn valid_curves(&self) -> impl Iterator<Item = &WindowAnalysis> {
        self.curves.iter().filter(|w| w.is_valid)
    }
}

/// Finds the inflections of `curve` and analyzes every S-curve window.
///
/// # Example
///
/// ```
/// use linea::analysis::{analyze, AnalysisOptions, SegmentOptions};
/// use linea::curves::BSpline2;
/// use linea::Point2;
///
/// let s = BSpline2::new(
///     vec![
///         Point2::new(0.0, 0.0),
///         Point2::new(1.0, 1.0),
///         Point2::new(2.0, -1.0),
///         Point2::new(3.0, 0.0),
///     ],
///     3,
///     vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0],
/// )
/// .unwrap();
/// let options = AnalysisOptions::default().with_segment(SegmentOptions::default().with_splits(1000));
/// let report = analyze(&s, &options).unwrap();
/// assert_eq!(report.inflection_points.len(), 3);
/// assert_eq!(report.curve_count(), 1);
/// ```
pub fn analyze<C>(curve: &C, options: &AnalysisOptions) -> Result<CurveAnalysis>
where
    C: Differentiable<f64, Point = Point2<f64>>,
{
    let inflection_points = find_inflection_points(curve, &options.segment)?;
    let trimmer = ArcTrimmer::new(curve, options.trim)?;
    let curves = build_windows(&inflection_points)
        .into_iter()
        .map(|w| trimmer.analyze_window(w.begin, w.center, w.end))
        .collect::<Result<Vec<_>>>()?;

    let report = CurveAnalysis {
        inflection_points,
        curves,
    };
    info!(
        inflections = report.inflection_points.len(),
        windows = report.curve_count(),
        valid = report.valid_curves().count(),
        "curve analyzed"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::trim::tests::zigzag;
    use approx::assert_relative_eq;

    fn coarse() -> AnalysisOptions {
        AnalysisOptions::default().with_segment(SegmentOptions::default().with_splits(999))
    }

    #[test]
    fn test_zigzag_report() {
        let report = analyze(&zigzag(80.0), &coarse()).unwrap();
        assert_eq!(report.inflection_points.len(), 3);
        assert_relative_eq!(report.inflection_points[1], 0.5, epsilon = 1e-9);
        assert_eq!(report.curve_count(), 1);
        assert_eq!(report.valid_curves().count(), 1);
        assert!(report.curves[0].arcs.iter().all(|a| a.is_trimmed));
    }

    #[test]
    fn test_no_windows_without_inflection() {
        let arch = crate::curves::BSpline2::new(
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 1.0),
                Point2::new(2.0, 0.0),
            ],
            2,
            vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
        )
        .unwrap();
        let report = analyze(&arch, &coarse()).unwrap();
        assert_eq!(report.inflection_points, vec![0.0, 1.0]);
        assert_eq!(report.curve_count(), 0);
    }
}
