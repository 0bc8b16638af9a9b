//! Fitter configuration.

use crate::numeric::{from_f64, from_usize};
use num_traits::Float;

/// Configuration for [`Lspia`](super::Lspia).
///
/// # Example
///
/// ```
/// use linea::fit::FitOptions;
///
/// // 1e-3 average error per sample over 120 samples
/// let options = FitOptions::<f64>::from_average_error(1e-3, 1e-3, 120).with_degree(3);
/// assert_eq!(options.degree, 3);
/// assert!((options.error_threshold - 0.12).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitOptions<F> {
    /// Spline degree.
    pub degree: usize,
    /// Stop once the summed residual norm is at or below this value.
    pub error_threshold: F,
    /// A step whose every movement component is at or below this value
    /// counts as steady.
    pub movement_threshold: F,
    /// Upper bound on the control point count; `None` means one control point
    /// per sample.
    pub max_control_points: Option<usize>,
    /// Number of steps after which fitting gives up.
    pub max_iterations: usize,
}

impl<F: Float> Default for FitOptions<F> {
    fn default() -> Self {
        Self {
            degree: 4,
            error_threshold: from_f64(1e-3),
            movement_threshold: from_f64(1e-6),
            max_control_points: None,
            max_iterations: 100_000,
        }
    }
}

impl<F: Float> FitOptions<F> {
    /// Thresholds scaled from an average per-sample error.
    ///
    /// The error threshold is `average_error * n_samples` and the movement
    /// threshold `average_error * rate`.
    pub fn from_average_error(average_error: F, rate: F, n_samples: usize) -> Self {
        Self {
            error_threshold: average_error * from_usize(n_samples),
            movement_threshold: average_error * rate,
            ..Self::default()
        }
    }

    /// Sets the degree.
    pub fn with_degree(mut self, degree: usize) -> Self {
        self.degree = degree;
        self
    }

    /// Sets the total error threshold.
    pub fn with_error_threshold(mut self, threshold: F) -> Self {
        self.error_threshold = threshold;
        self
    }

    /// Sets the movement threshold.
    pub fn with_movement_threshold(mut self, threshold: F) -> Self {
        self.movement_threshold = threshold;
        self
    }

    /// Caps the number of control points.
    pub fn with_max_control_points(mut self, max: usize) -> Self {
        self.max_control_points = Some(max);
        self
    }

    /// Sets the iteration guard.
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }
}
