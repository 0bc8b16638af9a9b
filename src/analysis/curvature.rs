//! Signed curvature, total curvature and arc length of planar curves.

use crate::curves::{Differentiable, ParametricCurve};
use crate::error::Result;
use crate::numeric::{quad, QuadOptions};
use crate::primitives::{Coordinates, Point2};

type SecondDerivative<C> =
    <<C as Differentiable<f64>>::Derivative as Differentiable<f64>>::Derivative;

/// Curvature of a planar curve, with both derivative curves cached.
pub struct Curvature<C>
where
    C: Differentiable<f64, Point = Point2<f64>>,
{
    domain: (f64, f64),
    first: C::Derivative,
    second: SecondDerivative<C>,
}

impl<C> Curvature<C>
where
    C: Differentiable<f64, Point = Point2<f64>>,
{
    /// Differentiates `curve` twice.
    ///
    /// Fails with [`LineaError::DegenerateDerivative`](crate::LineaError::DegenerateDerivative)
    /// for curves of degree below 2.
    pub fn new(curve: &C) -> Result<Self> {
        let first = curve.derivative()?;
        let second = first.derivative()?;
        Ok(Self {
            domain: curve.domain(),
            first,
            second,
        })
    }

    /// Parameter range of the underlying curve.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// `(x' y'' - y' x'') / (x'² + y'²)^1.5`.
    ///
    /// Positive where the curve turns counter-clockwise. NaN or infinite
    /// where the speed vanishes.
    pub fn signed(&self, t: f64) -> f64 {
        let d = self.first.eval(t).to_vec();
        d.signed_curvature(self.second.eval(t).to_vec())
    }

    /// Speed `|C'(t)|`.
    pub fn speed(&self, t: f64) -> f64 {
        self.first.eval(t).to_vec().magnitude()
    }

    /// `|κ(t)| |C'(t)|`, evaluated as `|C' × C''| / |C'|²`; 0 where the speed
    /// vanishes.
    pub fn turning_rate(&self, t: f64) -> f64 {
        let d = self.first.eval(t).to_vec();
        let speed_squared = d.magnitude_squared();
        if speed_squared == 0.0 {
            0.0
        } else {
            d.cross(self.second.eval(t).to_vec()).abs() / speed_squared
        }
    }
}

/// Total absolute curvature `∫ |κ| ds` of a planar curve.
///
/// # Example
///
/// ```
/// use linea::analysis::TotalCurvature;
/// use linea::curves::BSpline2;
/// use linea::numeric::QuadOptions;
/// use linea::Point2;
///
/// // a quadratic Bézier turning through a right angle
/// let corner = BSpline2::new(
///     vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(1.0, 1.0)],
///     2,
///     vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
/// )
/// .unwrap();
/// let total = TotalCurvature::new(&corner, QuadOptions::default()).unwrap();
/// let turn = total.between(0.0, 1.0).unwrap();
/// assert!((turn - std::f64::consts::FRAC_PI_2).abs() < 1e-7);
/// ```
pub struct TotalCurvature<C>
where
    C: Differentiable<f64, Point = Point2<f64>>,
{
    curvature: Curvature<C>,
    quad: QuadOptions,
}

impl<C> TotalCurvature<C>
where
    C: Differentiable<f64, Point = Point2<f64>>,
{
    /// Prepares total curvature integrals of `curve`.
    pub fn new(curve: &C, quad: QuadOptions) -> Result<Self> {
        Ok(Self {
            curvature: Curvature::new(curve)?,
            quad,
        })
    }

    /// The cached curvature.
    pub fn curvature(&self) -> &Curvature<C> {
        &self.curvature
    }

    /// Total curvature over `[a, b]`; for `a > b` over `[b, a]`.
    ///
    /// # Errors
    ///
    /// [`LineaError::QuadratureFailed`](crate::LineaError::QuadratureFailed)
    /// when the integral does not converge.
    pub fn between(&self, a: f64, b: f64) -> Result<f64> {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        Ok(quad(|t| self.curvature.turning_rate(t), lo, hi, &self.quad)?.value)
    }

    /// Arc length over `[a, b]` from the cached derivative.
    pub fn arc_length(&self, a: f64, b: f64) -> Result<f64> {
        Ok(quad(|t| self.curvature.speed(t), a, b, &self.quad)?.value)
    }
}

/// Arc length `∫ |C'(t)| dt` of any differentiable curve over `[a, b]`.
pub fn arc_length<C>(curve: &C, a: f64, b: f64, options: &QuadOptions) -> Result<f64>
where
    C: Differentiable<f64>,
    C::Point: Coordinates<f64>,
{
    let derivative = curve.derivative()?;
    Ok(quad(|t| derivative.eval(t).norm(), a, b, options)?.value)
}
