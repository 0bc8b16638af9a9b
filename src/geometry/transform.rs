//! Linear curve decorators: matrix projection and dropping to the plane.

use super::Mat3;
use crate::curves::{Differentiable, ParametricCurve};
use crate::error::Result;
use crate::primitives::{Point2, Point3};
use num_traits::Float;

/// A spatial curve seen through a 3×3 matrix.
///
/// The map is linear, so the derivative is the projected derivative.
#[derive(Debug, Clone, PartialEq)]
pub struct Projected<C, F> {
    curve: C,
    matrix: Mat3<F>,
}

impl<C, F: Float> Projected<C, F> {
    /// Wraps `curve`, transforming every value by `matrix`.
    pub fn new(curve: C, matrix: Mat3<F>) -> Self {
        Self { curve, matrix }
    }

    /// The wrapped curve.
    pub fn inner(&self) -> &C {
        &self.curve
    }

    /// The projection matrix.
    pub fn matrix(&self) -> &Mat3<F> {
        &self.matrix
    }
}

impl<C, F> ParametricCurve<F> for Projected<C, F>
where
    F: Float,
    C: ParametricCurve<F, Point = Point3<F>>,
{
    type Point = Point3<F>;

    fn domain(&self) -> (F, F) {
        self.curve.domain()
    }

    fn eval(&self, t: F) -> Point3<F> {
        self.matrix.transform(self.curve.eval(t))
    }
}

impl<C, F> Differentiable<F> for Projected<C, F>
where
    F: Float,
    C: Differentiable<F, Point = Point3<F>>,
{
    type Derivative = Projected<C::Derivative, F>;

    fn derivative(&self) -> Result<Self::Derivative> {
        Ok(Projected::new(self.curve.derivative()?, self.matrix))
    }
}

/// The first two coordinates of a spatial curve.
#[derive(Debug, Clone, PartialEq)]
pub struct Planar<C> {
    curve: C,
}

impl<C> Planar<C> {
    /// Wraps `curve`, keeping `x` and `y`.
    pub fn new(curve: C) -> Self {
        Self { curve }
    }

    /// The wrapped curve.
    pub fn inner(&self) -> &C {
        &self.curve
    }
}

impl<C, F> ParametricCurve<F> for Planar<C>
where
    F: Float,
    C: ParametricCurve<F, Point = Point3<F>>,
{
    type Point = Point2<F>;

    fn domain(&self) -> (F, F) {
        self.curve.domain()
    }

    fn eval(&self, t: F) -> Point2<F> {
        let p = self.curve.eval(t);
        Point2::new(p.x, p.y)
    }
}

impl<C, F> Differentiable<F> for Planar<C>
where
    F: Float,
    C: Differentiable<F, Point = Point3<F>>,
{
    type Derivative = Planar<C::Derivative>;

    fn derivative(&self) -> Result<Self::Derivative> {
        Ok(Planar::new(self.curve.derivative()?))
    }
}

/// Projects a spatial curve onto a view plane and keeps the screen
/// coordinates.
pub fn project_to_plane<C, F>(curve: C, matrix: Mat3<F>) -> Planar<Projected<C, F>>
where
    F: Float,
    C: ParametricCurve<F, Point = Point3<F>>,
{
    Planar::new(Projected::new(curve, matrix))
}
