//! B-spline curves of arbitrary degree over any point type.
//!
//! A B-spline is defined by a degree `p`, a knot vector and a list of control
//! points with `knots.len() == control_points.len() + p + 1`. Each control
//! point only influences the `p + 1` knot spans it is supported on, which is
//! what makes local refinement by knot insertion possible.
//!
//! # Example
//!
//! ```
//! use linea::{Point2, curves::BSpline2};
//!
//! let control_points = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 2.0),
//!     Point2::new(2.0, 2.0),
//!     Point2::new(3.0, 0.0),
//!     Point2::new(4.0, 1.0),
//! ];
//!
//! let spline = BSpline2::with_uniform_knots(control_points, 3).unwrap();
//! let (start, end) = spline.domain();
//! assert_eq!(spline.eval(start), Point2::new(0.0, 0.0));
//! assert_eq!(spline.eval(end), Point2::new(4.0, 1.0));
//! ```

use super::{BasisWeights, Differentiable, KnotVector, ParametricCurve};
use crate::error::{LineaError, Result};
use crate::numeric::{from_usize, to_f64};
use crate::primitives::{Coordinates, Point2, Point3};
use num_traits::Float;

/// A B-spline curve with control points of type `P`.
#[derive(Debug, Clone, PartialEq)]
pub struct BSpline<P, F> {
    degree: usize,
    knots: KnotVector<F>,
    control_points: Vec<P>,
}

/// A planar B-spline.
pub type BSpline2<F> = BSpline<Point2<F>, F>;

/// A spatial B-spline.
pub type BSpline3<F> = BSpline<Point3<F>, F>;

impl<P: Coordinates<F>, F: Float> BSpline<P, F> {
    /// Creates a B-spline from raw knots.
    ///
    /// Fails with [`LineaError::InvalidInput`] when the knots are not a valid
    /// knot vector, when `knots.len() != control_points.len() + degree + 1`,
    /// or when `degree >= control_points.len()`.
    pub fn new(control_points: Vec<P>, degree: usize, knots: Vec<F>) -> Result<Self> {
        Self::from_knot_vector(control_points, degree, KnotVector::new(knots)?)
    }

    /// Creates a B-spline from an already validated knot vector.
    pub fn from_knot_vector(
        control_points: Vec<P>,
        degree: usize,
        knots: KnotVector<F>,
    ) -> Result<Self> {
        let n = control_points.len();
        if degree >= n {
            return Err(LineaError::invalid(format!(
                "degree {} needs more than {} control points",
                degree, n
            )));
        }
        if knots.len() != n + degree + 1 {
            return Err(LineaError::invalid(format!(
                "expected {} knots for {} control points of degree {}, got {}",
                n + degree + 1,
                n,
                degree,
                knots.len()
            )));
        }
        Ok(Self {
            degree,
            knots,
            control_points,
        })
    }

    /// Creates a clamped B-spline over `[0, 1]` with uniform interior knots.
    ///
    /// The curve passes through the first and last control points.
    pub fn with_uniform_knots(control_points: Vec<P>, degree: usize) -> Result<Self> {
        let knots = KnotVector::clamped_uniform(control_points.len(), degree)?;
        Self::from_knot_vector(control_points, degree, knots)
    }

    /// Degree of the spline.
    #[inline]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// The knot vector.
    #[inline]
    pub fn knots(&self) -> &KnotVector<F> {
        &self.knots
    }

    /// The control points.
    #[inline]
    pub fn control_points(&self) -> &[P] {
        &self.control_points
    }

    /// Mutable control points; the knot vector stays fixed.
    pub(crate) fn control_points_mut(&mut self) -> &mut [P] {
        &mut self.control_points
    }

    /// Splits the curve into degree, knots and control points.
    pub fn into_parts(self) -> (usize, KnotVector<F>, Vec<P>) {
        (self.degree, self.knots, self.control_points)
    }

    /// Valid parameter range `[knots[p], knots[n]]`.
    ///
    /// For clamped knot vectors this is the first and last knot.
    pub fn domain(&self) -> (F, F) {
        (
            self.knots[self.degree],
            self.knots[self.control_points.len()],
        )
    }

    /// Non-zero basis functions at `u`.
    pub fn basis_weights(&self, u: F) -> BasisWeights<F> {
        BasisWeights::compute(&self.knots, self.degree, self.control_points.len(), u)
    }

    /// Evaluates the curve at `u`.
    ///
    /// Parameters outside the domain are clamped to it. At exactly the first
    /// or last knot the result is the first or last control point.
    pub fn eval(&self, u: F) -> P {
        let (lo, hi) = self.domain();
        let u = if u.is_nan() { lo } else { u.max(lo).min(hi) };
        self.combine(&self.basis_weights(u))
    }

    /// Evaluates the curve at `u`, returning `None` outside the domain.
    pub fn try_eval(&self, u: F) -> Option<P> {
        let (lo, hi) = self.domain();
        if u >= lo && u <= hi {
            Some(self.combine(&self.basis_weights(u)))
        } else {
            None
        }
    }

    fn combine(&self, weights: &BasisWeights<F>) -> P {
        let first = weights.first_index();
        weights
            .values
            .iter()
            .enumerate()
            .fold(P::zero(), |acc, (j, &w)| {
                acc.plus(self.control_points[first + j].scaled(w))
            })
    }

    /// Evaluates `n` points at uniformly spaced parameters over the domain.
    pub fn sample(&self, n: usize) -> Vec<P> {
        let (lo, hi) = self.domain();
        match n {
            0 => Vec::new(),
            1 => vec![self.eval(lo)],
            _ => {
                let step = (hi - lo) / from_usize(n - 1);
                (0..n)
                    .map(|i| {
                        let u = if i == n - 1 {
                            hi
                        } else {
                            lo + step * from_usize(i)
                        };
                        self.eval(u)
                    })
                    .collect()
            }
        }
    }

    /// Component-wise minimum and maximum of the control points.
    ///
    /// By the convex hull property the curve lies inside this box.
    pub fn control_bounds(&self) -> Option<(P, P)> {
        let mut min = self.control_points[0].to_coords();
        let mut max = min.clone();
        for point in &self.control_points[1..] {
            for axis in 0..P::DIM {
                let c = point.coord(axis);
                min[axis] = min[axis].min(c);
                max[axis] = max[axis].max(c);
            }
        }
        Some((P::from_coords(&min)?, P::from_coords(&max)?))
    }

    /// Computes the derivative curve.
    ///
    /// The derivative of a degree-`p` B-spline is a degree-`p - 1` B-spline
    /// with control points `p / (k[i+p+1] - k[i+1]) * (P[i+1] - P[i])`
    /// (zero where the knot difference vanishes) on the knot vector with its
    /// first and last knot removed.
    ///
    /// Fails with [`LineaError::DegenerateDerivative`] for degree 0.
    pub fn derivative(&self) -> Result<Self> {
        if self.degree == 0 {
            return Err(LineaError::DegenerateDerivative);
        }
        let p = self.degree;
        let pf: F = from_usize(p);
        let points = self
            .control_points
            .windows(2)
            .enumerate()
            .map(|(i, pair)| {
                let denom = self.knots[i + p + 1] - self.knots[i + 1];
                let factor = if denom == F::zero() {
                    F::zero()
                } else {
                    pf / denom
                };
                pair[1].minus(pair[0]).scaled(factor)
            })
            .collect();

        Ok(Self {
            degree: p - 1,
            knots: self.knots.without_ends(),
            control_points: points,
        })
    }

    /// Evaluates the first derivative at `u`.
    pub fn derivative_at(&self, u: F) -> Result<P> {
        Ok(self.derivative()?.eval(u))
    }

    /// Inserts the knot `t`, returning a curve of identical shape with one
    /// more control point.
    ///
    /// Fails when `t` is not strictly inside the domain or when `t` already
    /// has multiplicity `degree`.
    pub fn insert_knot(&self, t: F) -> Result<Self> {
        let (lo, hi) = self.domain();
        if !(t > lo && t < hi) {
            return Err(LineaError::invalid(format!(
                "knot {:?} is not inside the domain",
                to_f64(t)
            )));
        }
        if self.knots.multiplicity(t) >= self.degree {
            return Err(LineaError::invalid(format!(
                "knot {:?} already has multiplicity {}",
                to_f64(t),
                self.degree
            )));
        }
        let span = self
            .knots
            .find_span(t, self.degree, self.control_points.len());
        Ok(self.insert_knot_in_span(t, span))
    }

    /// Inserts `t` into the known span `span` (`knots[span] <= t < knots[span+1]`).
    ///
    /// Control points `span-p+1..=span` become blends of their neighbours with
    /// `a_i = (t - k[i]) / (k[i+p] - k[i])`.
    pub(crate) fn insert_knot_in_span(&self, t: F, span: usize) -> Self {
        let p = self.degree;
        let n = self.control_points.len();
        let mut points = Vec::with_capacity(n + 1);

        for i in 0..=n {
            if i + p <= span {
                points.push(self.control_points[i]);
            } else if i > span {
                points.push(self.control_points[i - 1]);
            } else {
                let denom = self.knots[i + p] - self.knots[i];
                let a = if denom == F::zero() {
                    F::zero()
                } else {
                    (t - self.knots[i]) / denom
                };
                points.push(self.control_points[i - 1].blend(self.control_points[i], a));
            }
        }

        Self {
            degree: p,
            knots: self.knots.with_inserted(span, t),
            control_points: points,
        }
    }

    /// Splits the curve at `t` into two clamped pieces covering
    /// `[start, t]` and `[t, end]`.
    ///
    /// `t` is inserted until it has multiplicity `degree`; the control point
    /// shared by both halves is the curve point at `t`.
    pub fn subdivide(&self, t: F) -> Result<(Self, Self)> {
        let (lo, hi) = self.domain();
        if !(t > lo && t < hi) {
            return Err(LineaError::invalid(format!(
                "split parameter {:?} is not inside the domain",
                to_f64(t)
            )));
        }
        let p = self.degree;
        let existing = self.knots.multiplicity(t);
        if existing > p {
            return Err(LineaError::invalid(format!(
                "split parameter {:?} has multiplicity {} above degree {}",
                to_f64(t),
                existing,
                p
            )));
        }

        let mut refined = self.clone();
        for _ in existing..p {
            let span = refined
                .knots
                .find_span(t, p, refined.control_points.len());
            refined = refined.insert_knot_in_span(t, span);
        }

        let knots = refined.knots.as_slice();
        let first = knots.iter().take_while(|&&k| k < t).count();
        let clamp = std::iter::repeat(t).take(p + 1);

        let left_knots = knots[..first].iter().copied().chain(clamp.clone()).collect();
        let right_knots = clamp.chain(knots[first + p..].iter().copied()).collect();

        let left = Self::new(refined.control_points[..first].to_vec(), p, left_knots)?;
        let right = Self::new(refined.control_points[first - 1..].to_vec(), p, right_knots)?;
        Ok((left, right))
    }
}

impl<P: Coordinates<F>, F: Float> ParametricCurve<F> for BSpline<P, F> {
    type Point = P;

    fn domain(&self) -> (F, F) {
        BSpline::domain(self)
    }

    fn eval(&self, t: F) -> P {
        BSpline::eval(self, t)
    }
}

impl<P: Coordinates<F>, F: Float> Differentiable<F> for BSpline<P, F> {
    type Derivative = Self;

    fn derivative(&self) -> Result<Self> {
        BSpline::derivative(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn cubic() -> BSpline2<f64> {
        BSpline::new(
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 2.0),
                Point2::new(2.0, -1.0),
                Point2::new(3.0, 3.0),
                Point2::new(5.0, 0.0),
                Point2::new(6.0, 1.0),
            ],
            3,
            vec![0.0, 0.0, 0.0, 0.0, 0.3, 0.6, 1.0, 1.0, 1.0, 1.0],
        )
        .unwrap()
    }

    fn bezier3() -> BSpline3<f64> {
        BSpline::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 2.0, 1.0),
                Point3::new(3.0, 2.0, -1.0),
                Point3::new(4.0, 0.0, 0.0),
            ],
            3,
            vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0],
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_inconsistent_lengths() {
        let points = vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)];
        assert!(BSpline::new(points.clone(), 1, vec![0.0, 0.0, 1.0]).is_err());
        assert!(BSpline::new(points.clone(), 2, vec![0.0, 0.0, 0.0, 1.0, 1.0]).is_err());
        assert!(BSpline::new(points, 1, vec![0.0, 0.0, 1.0, 1.0]).is_ok());
    }

    #[test]
    fn test_eval_endpoints_exact() {
        let spline = cubic();
        assert_eq!(spline.eval(0.0), Point2::new(0.0, 0.0));
        assert_eq!(spline.eval(1.0), Point2::new(6.0, 1.0));
    }

    #[test]
    fn test_eval_clamps_outside_domain() {
        let spline = cubic();
        assert_eq!(spline.eval(-0.5), spline.eval(0.0));
        assert_eq!(spline.eval(1.5), spline.eval(1.0));
        assert!(spline.try_eval(1.5).is_none());
        assert!(spline.try_eval(0.5).is_some());
    }

    #[test]
    fn test_bezier_equivalent() {
        let spline = bezier3();
        let t: f64 = 0.4;
        let mt = 1.0 - t;
        let b = [mt.powi(3), 3.0 * mt * mt * t, 3.0 * mt * t * t, t.powi(3)];
        let expected = spline
            .control_points()
            .iter()
            .zip(b.iter())
            .fold(Point3::origin(), |acc, (p, &w)| acc.plus(p.scaled(w)));
        let got = spline.eval(t);
        assert_relative_eq!(got.x, expected.x, epsilon = 1e-12);
        assert_relative_eq!(got.y, expected.y, epsilon = 1e-12);
        assert_relative_eq!(got.z, expected.z, epsilon = 1e-12);
    }

    #[test]
    fn test_degree_1_is_polyline() {
        let spline = BSpline::new(
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 1.0),
                Point2::new(2.0, 0.0),
            ],
            1,
            vec![0.0, 0.0, 0.5, 1.0, 1.0],
        )
        .unwrap();
        let p = spline.eval(0.25);
        assert_relative_eq!(p.x, 0.5, epsilon = 1e-12);
        assert_relative_eq!(p.y, 0.5, epsilon = 1e-12);
        let p = spline.eval(0.5);
        assert_relative_eq!(p.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_derivative_structure() {
        let spline = cubic();
        let d = spline.derivative().unwrap();
        assert_eq!(d.degree(), 2);
        assert_eq!(d.control_points().len(), 5);
        assert_eq!(d.knots().len(), spline.knots().len() - 2);

        let constant = BSpline::new(vec![Point2::new(1.0, 1.0)], 0, vec![0.0, 1.0]).unwrap();
        assert_eq!(constant.derivative(), Err(LineaError::DegenerateDerivative));
    }

    #[test]
    fn test_derivative_matches_finite_difference() {
        let spline = cubic();
        let d = spline.derivative().unwrap();
        let h = 1e-6;
        for &t in &[0.1, 0.45, 0.8] {
            let fd = spline.eval(t + h).minus(spline.eval(t - h)).scaled(0.5 / h);
            let exact = d.eval(t);
            assert_relative_eq!(fd.x, exact.x, epsilon = 1e-5);
            assert_relative_eq!(fd.y, exact.y, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_second_derivative_error_shrinks() {
        let spline = bezier3();
        let dd = spline.derivative().unwrap().derivative().unwrap();
        let t = 0.37;
        let exact = dd.eval(t);
        // forward difference, first order in h
        let error = |h: f64| {
            let fd = spline
                .eval(t + 2.0 * h)
                .minus(spline.eval(t + h).scaled(2.0))
                .plus(spline.eval(t))
                .scaled(1.0 / (h * h));
            fd.minus(exact).norm()
        };
        let coarse = error(1e-2);
        let fine = error(1e-3);
        assert!(fine < 0.2 * coarse);
        assert!(fine < 0.05);
    }

    #[test]
    fn test_derivative_at_endpoint_follows_first_leg() {
        let spline = bezier3();
        let d0 = spline.derivative_at(0.0).unwrap();
        // 3 * (P1 - P0) for a cubic Bezier
        assert_relative_eq!(d0.x, 3.0, epsilon = 1e-12);
        assert_relative_eq!(d0.y, 6.0, epsilon = 1e-12);
        assert_relative_eq!(d0.z, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_knot_insertion_preserves_shape() {
        let spline = cubic();
        let refined = spline.insert_knot(0.45).unwrap();
        assert_eq!(refined.control_points().len(), 7);
        assert_eq!(refined.knots().len(), 11);
        for i in 0..=50 {
            let t = i as f64 / 50.0;
            let a = spline.eval(t);
            let b = refined.eval(t);
            assert_relative_eq!(a.x, b.x, epsilon = 1e-12);
            assert_relative_eq!(a.y, b.y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_knot_insertion_rejects_boundary() {
        let spline = cubic();
        assert!(spline.insert_knot(0.0).is_err());
        assert!(spline.insert_knot(1.0).is_err());
    }

    #[test]
    fn test_subdivide() {
        let spline = bezier3();
        let (left, right) = spline.subdivide(0.5).unwrap();
        assert_eq!(left.domain(), (0.0, 0.5));
        assert_eq!(right.domain(), (0.5, 1.0));
        assert_eq!(left.control_points().len(), 4);
        assert_eq!(right.control_points().len(), 4);

        let mid = spline.eval(0.5);
        let joint = left.control_points()[3];
        assert_relative_eq!(joint.x, mid.x, epsilon = 1e-12);
        assert_relative_eq!(joint.y, mid.y, epsilon = 1e-12);
        assert_eq!(joint, right.control_points()[0]);

        for i in 0..=10 {
            let t = 0.05 * i as f64;
            let a = spline.eval(t);
            let b = left.eval(t);
            assert_relative_eq!(a.x, b.x, epsilon = 1e-12);
            assert_relative_eq!(a.z, b.z, epsilon = 1e-12);
            let a = spline.eval(0.5 + t);
            let b = right.eval(0.5 + t);
            assert_relative_eq!(a.y, b.y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_subdivide_with_existing_knot() {
        let spline = cubic();
        let (left, right) = spline.subdivide(0.3).unwrap();
        assert!(left.knots().is_clamped(3));
        assert!(right.knots().is_clamped(3));
        let p = spline.eval(0.7);
        let q = right.eval(0.7);
        assert_relative_eq!(p.x, q.x, epsilon = 1e-12);
        assert_relative_eq!(p.y, q.y, epsilon = 1e-12);
        assert!(spline.subdivide(1.0).is_err());
    }

    #[test]
    fn test_sample() {
        let spline = cubic();
        let points = spline.sample(11);
        assert_eq!(points.len(), 11);
        assert_eq!(points[0], spline.eval(0.0));
        assert_eq!(points[10], spline.eval(1.0));
        assert!(spline.sample(0).is_empty());
    }

    #[test]
    fn test_control_bounds() {
        let (min, max) = cubic().control_bounds().unwrap();
        assert_eq!(min, Point2::new(0.0, -1.0));
        assert_eq!(max, Point2::new(6.0, 3.0));
    }

    #[test]
    fn test_uniform_knots_and_f32() {
        let spline: BSpline2<f32> = BSpline::with_uniform_knots(
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 1.0),
                Point2::new(2.0, 0.0),
            ],
            2,
        )
        .unwrap();
        assert_eq!(spline.domain(), (0.0, 1.0));
        let p = spline.eval(0.5);
        assert!((p.x - 1.0).abs() < 1e-6);
        assert!((p.y - 0.5).abs() < 1e-6);
    }
}
