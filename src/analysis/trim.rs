//! Cutting S-curve arcs down to a target total curvature.

use super::{SCurveWindow, TotalCurvature};
use crate::curves::Differentiable;
use crate::error::{LineaError, Result};
use crate::numeric::{try_brentq, QuadOptions, ScalarOptions};
use crate::primitives::Point2;
use std::f64::consts::PI;
use tracing::trace;

/// Smallest total curvature (50°) each arc of a valid window must reach.
pub const LOWER_TOTAL_CURVATURE: f64 = 50.0 * PI / 180.0;

/// Total curvature (75°) arcs are trimmed down to.
pub const TARGET_TOTAL_CURVATURE: f64 = 75.0 * PI / 180.0;

/// Options for [`ArcTrimmer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrimOptions {
    /// Lower bound on the total curvature of both arcs, in radians.
    pub lower: f64,
    /// Trim target, in radians.
    pub target: f64,
    /// Brent options for locating trim points.
    pub root: ScalarOptions,
    /// Quadrature options for curvature and length integrals.
    pub quad: QuadOptions,
}

impl Default for TrimOptions {
    fn default() -> Self {
        Self {
            lower: LOWER_TOTAL_CURVATURE,
            target: TARGET_TOTAL_CURVATURE,
            root: ScalarOptions::default(),
            quad: QuadOptions::default(),
        }
    }
}

impl TrimOptions {
    /// Sets both bounds, in radians.
    pub fn with_bounds(mut self, lower: f64, target: f64) -> Self {
        self.lower = lower;
        self.target = target;
        self
    }

    /// Sets the quadrature options.
    pub fn with_quad(mut self, quad: QuadOptions) -> Self {
        self.quad = quad;
        self
    }
}

/// One arc of an S-curve window.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArcAnalysis {
    /// Parameter range between the two inflections.
    pub original_ts: (f64, f64),
    /// Parameter range after trimming; equal to `original_ts` when untrimmed.
    pub trim_ts: (f64, f64),
    /// Total curvature over `original_ts`.
    pub total_curvature: f64,
    /// Whether the arc was cut down to the target.
    pub is_trimmed: bool,
    /// The target, for trimmed arcs.
    pub trimmed_total_curvature: Option<f64>,
    /// Arc length over `original_ts`.
    pub original_length: f64,
    /// Arc length over `trim_ts`.
    pub trim_length: f64,
}

impl ArcAnalysis {
    /// Total curvature over `trim_ts`.
    pub fn effective_total_curvature(&self) -> f64 {
        self.trimmed_total_curvature.unwrap_or(self.total_curvature)
    }
}

/// Both arcs of one S-curve window.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowAnalysis {
    /// The window.
    pub ts: SCurveWindow,
    /// Both arcs reach the lower bound.
    pub is_valid: bool,
    /// `[begin, center]` and `[center, end]`.
    pub arcs: [ArcAnalysis; 2],
}

/// Trims the arcs of S-curve windows on one planar curve.
pub struct ArcTrimmer<C>
where
    C: Differentiable<f64, Point = Point2<f64>>,
{
    total: TotalCurvature<C>,
    options: TrimOptions,
}

impl<C> ArcTrimmer<C>
where
    C: Differentiable<f64, Point = Point2<f64>>,
{
    /// Prepares the curvature integrals of `curve`.
    pub fn new(curve: &C, options: TrimOptions) -> Result<Self> {
        Ok(Self {
            total: TotalCurvature::new(curve, options.quad)?,
            options,
        })
    }

    /// The options in use.
    pub fn options(&self) -> &TrimOptions {
        &self.options
    }

    /// The underlying total curvature integrator.
    pub fn total_curvature(&self) -> &TotalCurvature<C> {
        &self.total
    }

    /// Analyzes the window `(tb, tc, te)`.
    ///
    /// The window is valid when both arcs have at least `lower` total
    /// curvature. Arcs of a valid window above `target` are trimmed from
    /// their outer end until exactly `target` remains.
    ///
    /// # Errors
    ///
    /// * [`LineaError::TrimFailed`] when no trim point can be located.
    /// * [`LineaError::QuadratureFailed`] when an integral diverges.
    pub fn analyze_window(&self, tb: f64, tc: f64, te: f64) -> Result<WindowAnalysis> {
        let first = self.total.between(tb, tc)?;
        let second = self.total.between(tc, te)?;
        let is_valid = first >= self.options.lower && second >= self.options.lower;

        let (trim_begin, first_trimmed) = if is_valid && first > self.options.target {
            (self.trim_point(tb, tc, |t| self.total.between(t, tc))?, true)
        } else {
            (tb, false)
        };
        let (trim_end, second_trimmed) = if is_valid && second > self.options.target {
            (self.trim_point(tc, te, |t| self.total.between(tc, t))?, true)
        } else {
            (te, false)
        };

        trace!(tb, tc, te, first, second, is_valid, "analyzed window");
        Ok(WindowAnalysis {
            ts: SCurveWindow::new(tb, tc, te),
            is_valid,
            arcs: [
                self.arc((tb, tc), (trim_begin, tc), first, first_trimmed)?,
                self.arc((tc, te), (tc, trim_end), second, second_trimmed)?,
            ],
        })
    }

    fn trim_point<G>(&self, begin: f64, end: f64, total: G) -> Result<f64>
    where
        G: Fn(f64) -> Result<f64>,
    {
        let target = self.options.target;
        match try_brentq(|t| Ok(total(t)? - target), begin, end, &self.options.root) {
            Ok(r) => Ok(r.root),
            Err(e @ LineaError::QuadratureFailed { .. }) => Err(e),
            Err(e) => Err(LineaError::TrimFailed {
                begin,
                end,
                source: Box::new(e),
            }),
        }
    }

    fn arc(
        &self,
        original_ts: (f64, f64),
        trim_ts: (f64, f64),
        total_curvature: f64,
        is_trimmed: bool,
    ) -> Result<ArcAnalysis> {
        let original_length = self.total.arc_length(original_ts.0, original_ts.1)?;
        let trim_length = if trim_ts == original_ts {
            original_length
        } else {
            self.total.arc_length(trim_ts.0, trim_ts.1)?
        };
        Ok(ArcAnalysis {
            original_ts,
            trim_ts,
            total_curvature,
            is_trimmed,
            trimmed_total_curvature: is_trimmed.then_some(self.options.target),
            original_length,
            trim_length,
        })
    }
}
