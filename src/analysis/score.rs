//! Beauty scores of analyzed curves.
//!
//! A window scores its trimmed size, damped by how far either arc's total
//! curvature lies from the target and by how unequal the two arcs are.

use super::{CurveAnalysis, TrimOptions, WindowAnalysis};

/// Score of one window; 0 for invalid windows.
///
/// `(l1 + l2) · exp(-|(target - μ1) / (target - lower)|)
/// · exp(-|(target - μ2) / (target - lower)|) · exp(-|(l1 - l2) / (l1 + l2)|)`
/// with trimmed lengths `l` and trimmed total curvatures `μ`.
pub fn window_score(window: &WindowAnalysis, options: &TrimOptions) -> f64 {
    if !window.is_valid {
        return 0.0;
    }
    let [a, b] = &window.arcs;
    let (l1, l2) = (a.trim_length, b.trim_length);
    let size = l1 + l2;
    if size == 0.0 {
        return 0.0;
    }
    let spread = options.target - options.lower;
    let curvature_penalty = |mu: f64| (-((options.target - mu) / spread).abs()).exp();
    let balance = (-((l1 - l2) / size).abs()).exp();
    size * curvature_penalty(a.effective_total_curvature())
        * curvature_penalty(b.effective_total_curvature())
        * balance
}

/// Mean valid window score, weighted by the share of the curve length the
/// trimmed valid windows cover.
///
/// `None` when no window is valid or the windows have no length.
pub fn trajectory_score(analysis: &CurveAnalysis, options: &TrimOptions) -> Option<f64> {
    let scores: Vec<f64> = analysis
        .valid_curves()
        .map(|w| window_score(w, options))
        .collect();
    if scores.is_empty() {
        return None;
    }
    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
    length_ratio(analysis).map(|ratio| mean * ratio)
}

/// Trimmed length of the valid windows over the original length of all
/// windows; `None` when the total is zero.
pub fn length_ratio(analysis: &CurveAnalysis) -> Option<f64> {
    let original: f64 = analysis
        .curves
        .iter()
        .flat_map(|w| w.arcs.iter())
        .map(|a| a.original_length)
        .sum();
    let trimmed: f64 = analysis
        .valid_curves()
        .flat_map(|w| w.arcs.iter())
        .map(|a| a.trim_length)
        .sum();
    (original > 0.0).then(|| trimmed / original)
}
