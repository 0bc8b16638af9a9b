//! The "evaluable curve with derivative" capability.
//!
//! [`BSpline`](super::BSpline) implements both traits directly. The geometry
//! decorators (projection, dimensional reduction, homogeneous coordinates)
//! wrap any implementor and implement them again, so a projected curve can be
//! differentiated as many times as the underlying spline allows.

use crate::error::Result;
use num_traits::Float;

/// A curve that can be evaluated over a closed parameter interval.
pub trait ParametricCurve<F: Float> {
    /// Value type produced by [`eval`](Self::eval).
    type Point: Copy;

    /// The valid parameter range `(t_min, t_max)`.
    fn domain(&self) -> (F, F);

    /// Evaluates the curve at `t`.
    ///
    /// Parameters outside [`domain`](Self::domain) have no defined result.
    fn eval(&self, t: F) -> Self::Point;
}

/// A curve whose derivative is again a curve of the same kind.
pub trait Differentiable<F: Float>: ParametricCurve<F> {
    /// Type of the derivative curve.
    type Derivative: Differentiable<F, Point = Self::Point>;

    /// Returns the derivative curve.
    ///
    /// Fails with [`LineaError::DegenerateDerivative`](crate::LineaError::DegenerateDerivative)
    /// when the curve has no further derivative (a degree-0 spline).
    fn derivative(&self) -> Result<Self::Derivative>;
}
