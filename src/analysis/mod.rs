//! Curvature analysis of planar curves.
//!
//! The signed curvature splits a curve at its inflection points. Every three
//! consecutive inflections bound an S-shaped window made of two arcs turning
//! in opposite directions. [`ArcTrimmer`] keeps windows whose arcs both turn
//! far enough and trims arcs that turn too far, and [`score`] rates what is
//! left.
//!
//! Everything here works in `f64` on any [`Differentiable`](crate::curves::Differentiable)
//! curve with [`Point2`](crate::Point2) values, so spatial splines are
//! projected with [`geometry`](crate::geometry) first.

mod curvature;
mod report;
pub mod score;
mod segment;
mod trim;

pub use curvature::{arc_length, Curvature, TotalCurvature};
pub use report::{analyze, AnalysisOptions, CurveAnalysis};
pub use score::{length_ratio, trajectory_score, window_score};
pub use segment::{build_windows, find_inflection_points, SCurveWindow, SegmentOptions};
pub use trim::{
    ArcAnalysis, ArcTrimmer, TrimOptions, WindowAnalysis, LOWER_TOTAL_CURVATURE,
    TARGET_TOTAL_CURVATURE,
};
