//! B-spline approximation of sample sequences.
//!
//! [`Lspia`] fits a clamped B-spline to ordered samples by progressive
//! iteration, inserting knots where the fit is worst. [`fit`] drives it to
//! completion.
//!
//! # Example
//!
//! ```
//! use linea::fit::{fit, FitOptions};
//! use linea::Point3;
//!
//! let samples: Vec<_> = (0..20)
//!     .map(|i| {
//!         let t = i as f64 / 19.0;
//!         Point3::new(t, (3.0 * t).sin(), 0.5 * t * t)
//!     })
//!     .collect();
//!
//! let options = FitOptions::default().with_degree(3).with_error_threshold(0.02);
//! let fitted = fit(&samples, &options).unwrap();
//! assert!(fitted.total_error <= 0.02);
//! assert_eq!(fitted.parameterization.len(), samples.len());
//! ```

mod lspia;
mod options;
mod parameterization;
mod refine;

pub use lspia::{ConvergenceReason, FitStatus, FitStep, Lspia};
pub use options::FitOptions;
pub use parameterization::Parameterization;
pub use refine::{select_knot, KnotSplit};

use crate::curves::BSpline;
use crate::error::Result;
use crate::primitives::Coordinates;
use num_traits::Float;

/// Result of a completed fit.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedCurve<P, F> {
    /// The fitted spline.
    pub curve: BSpline<P, F>,
    /// Chord-length parameters of the samples.
    pub parameterization: Parameterization<F>,
    /// Summed residual norm at the last step.
    pub total_error: F,
    /// Steps taken.
    pub iterations: usize,
    /// Why fitting stopped.
    pub reason: ConvergenceReason,
}

/// Fits `samples` until the fitter converges.
///
/// Any step error (stalled refinement, iteration guard) is returned as is.
pub fn fit<P: Coordinates<F>, F: Float>(
    samples: &[P],
    options: &FitOptions<F>,
) -> Result<FittedCurve<P, F>> {
    let mut lspia = Lspia::new(samples, options)?;
    let (last, reason) = loop {
        let step = lspia.step()?;
        if let FitStatus::Converged(reason) = step.status {
            break (step, reason);
        }
    };
    let (curve, parameterization) = lspia.into_parts();
    Ok(FittedCurve {
        curve,
        parameterization,
        total_error: last.total_error,
        iterations: last.iteration,
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LineaError;
    use crate::primitives::Point2;

    #[test]
    fn test_fit_reports_final_state() {
        let samples = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 2.0),
            Point2::new(2.0, 2.0),
            Point2::new(3.0, 0.0),
            Point2::new(4.0, -2.0),
            Point2::new(5.0, -2.0),
            Point2::new(6.0, 0.0),
        ];
        let options = FitOptions::default()
            .with_degree(3)
            .with_error_threshold(0.01)
            .with_movement_threshold(1e-6);
        let fitted = fit(&samples, &options).unwrap();
        assert_eq!(fitted.reason, ConvergenceReason::ErrorThreshold);
        assert!(fitted.total_error <= 0.01);
        assert!(fitted.iterations > 0);
        assert_eq!(fitted.curve.degree(), 3);
        assert_eq!(fitted.curve.domain(), (0.0, 1.0));
    }

    #[test]
    fn test_fit_propagates_iteration_guard() {
        let samples: Vec<_> = (0..10)
            .map(|i| Point2::new(i as f64, ((i * i) % 7) as f64))
            .collect();
        let options = FitOptions::default()
            .with_degree(3)
            .with_error_threshold(1e-6)
            .with_max_iterations(3);
        assert_eq!(
            fit(&samples, &options),
            Err(LineaError::ConvergenceFailed { iterations: 3 })
        );
    }
}
