//! Homogeneous coordinates for spatial curves.

use crate::curves::{Differentiable, ParametricCurve};
use crate::error::Result;
use crate::primitives::Point3;
use num_traits::Float;

/// A point or direction in homogeneous coordinates.
///
/// Positions carry `w != 0`, directions `w == 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HPoint3<F> {
    /// Weighted x coordinate.
    pub x: F,
    /// Weighted y coordinate.
    pub y: F,
    /// Weighted z coordinate.
    pub z: F,
    /// Weight; 0 for directions.
    pub w: F,
}

impl<F: Float> HPoint3<F> {
    /// Creates a homogeneous point.
    #[inline]
    pub fn new(x: F, y: F, z: F, w: F) -> Self {
        Self { x, y, z, w }
    }

    /// A position (`w = 1`).
    #[inline]
    pub fn position(p: Point3<F>) -> Self {
        Self::new(p.x, p.y, p.z, F::one())
    }

    /// A direction (`w = 0`).
    #[inline]
    pub fn direction(v: Point3<F>) -> Self {
        Self::new(v.x, v.y, v.z, F::zero())
    }

    /// Back to three coordinates: divides by `w`, or drops it when `w == 0`.
    pub fn dehomogenize(self) -> Point3<F> {
        if self.w != F::zero() {
            Point3::new(self.x / self.w, self.y / self.w, self.z / self.w)
        } else {
            Point3::new(self.x, self.y, self.z)
        }
    }
}

/// A spatial position curve lifted to homogeneous coordinates (`w = 1`).
///
/// ```
/// use linea::curves::{BSpline3, Differentiable, ParametricCurve};
/// use linea::geometry::{Dehomogenized, Homogeneous};
/// use linea::Point3;
///
/// let line = BSpline3::with_uniform_knots(
///     vec![Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 4.0, 6.0)],
///     1,
/// )
/// .unwrap();
/// let lifted = Homogeneous::new(line.clone());
/// assert_eq!(lifted.eval(0.5).w, 1.0);
/// assert_eq!(lifted.derivative().unwrap().eval(0.5).w, 0.0);
///
/// let back = Dehomogenized::new(lifted);
/// assert_eq!(back.eval(0.5), line.eval(0.5));
/// assert_eq!(back.derivative().unwrap().eval(0.5), Point3::new(2.0, 4.0, 6.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Homogeneous<C> {
    curve: C,
}

impl<C> Homogeneous<C> {
    /// Wraps a `Point3` curve.
    pub fn new(curve: C) -> Self {
        Self { curve }
    }
}

impl<C, F> ParametricCurve<F> for Homogeneous<C>
where
    F: Float,
    C: ParametricCurve<F, Point = Point3<F>>,
{
    type Point = HPoint3<F>;

    fn domain(&self) -> (F, F) {
        self.curve.domain()
    }

    fn eval(&self, t: F) -> HPoint3<F> {
        HPoint3::position(self.curve.eval(t))
    }
}

impl<C, F> Differentiable<F> for Homogeneous<C>
where
    F: Float,
    C: Differentiable<F, Point = Point3<F>>,
{
    type Derivative = HomogeneousVector<C::Derivative>;

    /// The derivative of a `w = 1` curve is a direction field (`w = 0`).
    fn derivative(&self) -> Result<Self::Derivative> {
        Ok(HomogeneousVector::new(self.curve.derivative()?))
    }
}

/// A spatial direction curve lifted to homogeneous coordinates (`w = 0`).
#[derive(Debug, Clone, PartialEq)]
pub struct HomogeneousVector<C> {
    curve: C,
}

impl<C> HomogeneousVector<C> {
    /// Wraps a `Point3` curve whose values are directions.
    pub fn new(curve: C) -> Self {
        Self { curve }
    }
}

impl<C, F> ParametricCurve<F> for HomogeneousVector<C>
where
    F: Float,
    C: ParametricCurve<F, Point = Point3<F>>,
{
    type Point = HPoint3<F>;

    fn domain(&self) -> (F, F) {
        self.curve.domain()
    }

    fn eval(&self, t: F) -> HPoint3<F> {
        HPoint3::direction(self.curve.eval(t))
    }
}

impl<C, F> Differentiable<F> for HomogeneousVector<C>
where
    F: Float,
    C: Differentiable<F, Point = Point3<F>>,
{
    type Derivative = HomogeneousVector<C::Derivative>;

    fn derivative(&self) -> Result<Self::Derivative> {
        Ok(HomogeneousVector::new(self.curve.derivative()?))
    }
}

/// A homogeneous curve brought back to three coordinates.
///
/// Each value is divided by its `w` when non-zero. The derivative
/// dehomogenizes the derivative of the wrapped curve, which is exact for
/// curves with constant `w` such as [`Homogeneous`] and its derivatives.
#[derive(Debug, Clone, PartialEq)]
pub struct Dehomogenized<C> {
    curve: C,
}

impl<C> Dehomogenized<C> {
    /// Wraps an `HPoint3` curve.
    pub fn new(curve: C) -> Self {
        Self { curve }
    }
}

impl<C, F> ParametricCurve<F> for Dehomogenized<C>
where
    F: Float,
    C: ParametricCurve<F, Point = HPoint3<F>>,
{
    type Point = Point3<F>;

    fn domain(&self) -> (F, F) {
        self.curve.domain()
    }

    fn eval(&self, t: F) -> Point3<F> {
        self.curve.eval(t).dehomogenize()
    }
}

impl<C, F> Differentiable<F> for Dehomogenized<C>
where
    F: Float,
    C: Differentiable<F, Point = HPoint3<F>>,
{
    type Derivative = Dehomogenized<C::Derivative>;

    fn derivative(&self) -> Result<Self::Derivative> {
        Ok(Dehomogenized::new(self.curve.derivative()?))
    }
}
