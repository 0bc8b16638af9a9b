//! Knot vectors.

use crate::error::{LineaError, Result};
use crate::numeric::from_usize;
use num_traits::Float;
use std::ops::Index;

/// A non-decreasing sequence of knots.
///
/// A knot vector is immutable: insertion and differentiation return a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct KnotVector<F> {
    knots: Vec<F>,
}

impl<F: Float> KnotVector<F> {
    /// Creates a knot vector, validating that it has at least two finite,
    /// non-decreasing values.
    pub fn new(knots: Vec<F>) -> Result<Self> {
        if knots.len() < 2 {
            return Err(LineaError::invalid("knot vector needs at least two knots"));
        }
        if knots.iter().any(|k| !k.is_finite()) {
            return Err(LineaError::invalid("knot vector contains a non-finite value"));
        }
        if knots.windows(2).any(|w| w[1] < w[0]) {
            return Err(LineaError::invalid("knot vector must be non-decreasing"));
        }
        Ok(Self { knots })
    }

    /// Clamped knot vector over `[0, 1]` with uniformly spaced interior knots.
    ///
    /// `[0, ..., 0, 1/s, 2/s, ..., 1, ..., 1]` with `degree + 1` copies of each
    /// end knot and `s = n_control - degree` spans.
    pub fn clamped_uniform(n_control: usize, degree: usize) -> Result<Self> {
        if degree >= n_control {
            return Err(LineaError::invalid(format!(
                "degree {} needs more than {} control points",
                degree, n_control
            )));
        }
        let spans = n_control - degree;
        let mut knots = Vec::with_capacity(n_control + degree + 1);
        knots.extend(std::iter::repeat(F::zero()).take(degree + 1));
        for i in 1..spans {
            knots.push(from_usize::<F>(i) / from_usize(spans));
        }
        knots.extend(std::iter::repeat(F::one()).take(degree + 1));
        Self::new(knots)
    }

    /// Clamped knot vector whose interior knots average the sample parameters.
    ///
    /// `n` is the index of the last control point (`n + 1` control points).
    /// For `j = 1..=n-p`, with `d = (m+1)/(n+1-p)`, `i = floor(j d)` and
    /// `alpha = j d - i`, the knot `u[j+p]` is `(1 - alpha) t[i-1] + alpha t[i]`.
    /// Configurations that would index outside `params` are rejected.
    pub fn averaged(n: usize, degree: usize, params: &[F]) -> Result<Self> {
        let p = degree;
        if n < p {
            return Err(LineaError::invalid(format!(
                "control point index {} is below degree {}",
                n, p
            )));
        }
        if params.len() < 2 {
            return Err(LineaError::invalid("need at least two parameters"));
        }
        let m = params.len() - 1;
        let mut knots = vec![F::zero(); n + p + 2];
        let d = from_usize::<F>(m + 1) / from_usize(n + 1 - p);
        for j in 1..=(n - p) {
            let jd = from_usize::<F>(j) * d;
            let i = jd.floor().to_usize().unwrap_or(usize::MAX);
            if i == 0 || i > m {
                return Err(LineaError::invalid(format!(
                    "averaged knot {} falls outside the {} parameters",
                    j,
                    params.len()
                )));
            }
            let alpha = jd - jd.floor();
            knots[j + p] = (F::one() - alpha) * params[i - 1] + alpha * params[i];
        }
        for knot in knots.iter_mut().skip(n + 1) {
            *knot = F::one();
        }
        Self::new(knots)
    }

    /// Number of knots.
    #[inline]
    pub fn len(&self) -> usize {
        self.knots.len()
    }

    /// Always `false`; a knot vector holds at least two knots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.knots.is_empty()
    }

    /// The knots as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[F] {
        &self.knots
    }

    /// First knot.
    #[inline]
    pub fn first(&self) -> F {
        self.knots[0]
    }

    /// Last knot.
    #[inline]
    pub fn last(&self) -> F {
        self.knots[self.knots.len() - 1]
    }

    /// Number of knots equal to `u`.
    pub fn multiplicity(&self, u: F) -> usize {
        self.knots.iter().filter(|&&k| k == u).count()
    }

    /// Returns `true` if both end knots appear `degree + 1` times.
    pub fn is_clamped(&self, degree: usize) -> bool {
        let n = self.knots.len();
        n >= 2 * (degree + 1)
            && self.knots[..=degree].iter().all(|&k| k == self.first())
            && self.knots[n - degree - 1..].iter().all(|&k| k == self.last())
    }

    /// Finds the span index `k` with `knots[k] <= u < knots[k+1]`, restricted
    /// to `degree..n_control`.
    ///
    /// Parameters at or beyond the end of the domain map to the last span.
    pub fn find_span(&self, u: F, degree: usize, n_control: usize) -> usize {
        let p = degree;
        let n = n_control;

        if u >= self.knots[n] {
            // last non-empty span
            let mut k = n - 1;
            while k > p && self.knots[k] >= self.knots[n] {
                k -= 1;
            }
            return k;
        }
        if u <= self.knots[p] {
            let mut k = p;
            while k + 1 < n && self.knots[k + 1] <= u {
                k += 1;
            }
            return k;
        }

        let mut low = p;
        let mut high = n;
        while low < high {
            let mid = (low + high) / 2;
            if u < self.knots[mid] {
                high = mid;
            } else {
                low = mid + 1;
            }
        }
        low - 1
    }

    /// Returns a copy with `t` inserted after index `span`.
    pub(crate) fn with_inserted(&self, span: usize, t: F) -> Self {
        let mut knots = Vec::with_capacity(self.knots.len() + 1);
        knots.extend_from_slice(&self.knots[..=span]);
        knots.push(t);
        knots.extend_from_slice(&self.knots[span + 1..]);
        Self { knots }
    }

    /// Returns a copy without the first and last knot.
    pub(crate) fn without_ends(&self) -> Self {
        Self {
            knots: self.knots[1..self.knots.len() - 1].to_vec(),
        }
    }
}

impl<F> Index<usize> for KnotVector<F> {
    type Output = F;

    #[inline]
    fn index(&self, i: usize) -> &F {
        &self.knots[i]
    }
}

impl<F: Float> TryFrom<Vec<F>> for KnotVector<F> {
    type Error = LineaError;

    fn try_from(knots: Vec<F>) -> Result<Self> {
        Self::new(knots)
    }
}

impl<F> From<KnotVector<F>> for Vec<F> {
    fn from(knots: KnotVector<F>) -> Self {
        knots.knots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rejects_decreasing() {
        assert!(KnotVector::new(vec![0.0, 1.0, 0.5]).is_err());
        assert!(KnotVector::new(vec![0.0]).is_err());
        assert!(KnotVector::new(vec![0.0, f64::NAN]).is_err());
    }

    #[test]
    fn test_clamped_uniform() {
        let knots: KnotVector<f64> = KnotVector::clamped_uniform(5, 2).unwrap();
        assert_eq!(knots.as_slice(), &[0.0, 0.0, 0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0, 1.0, 1.0]);
        assert!(knots.is_clamped(2));
        assert!(!knots.is_clamped(3));
        assert_eq!(knots.multiplicity(0.0), 3);
    }

    #[test]
    fn test_averaged_bezier_has_no_interior_knots() {
        let params = [0.0, 0.2, 0.5, 0.7, 1.0];
        let knots: KnotVector<f64> = KnotVector::averaged(3, 3, &params).unwrap();
        assert_eq!(knots.as_slice(), &[0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_averaged_interior_knot() {
        // m = 4, n = 3, p = 2: d = 5/2, j = 1 -> i = 2, alpha = 0.5
        let params = [0.0, 0.2, 0.5, 0.7, 1.0];
        let knots: KnotVector<f64> = KnotVector::averaged(3, 2, &params).unwrap();
        assert_eq!(knots.len(), 7);
        assert_relative_eq!(knots[3], 0.35, epsilon = 1e-12);
        assert!(knots.is_clamped(2));
    }

    #[test]
    fn test_averaged_rejects_out_of_range() {
        // n + 1 - p spans over two parameters cannot be placed
        let params = [0.0, 1.0];
        assert!(KnotVector::<f64>::averaged(4, 1, &params).is_err());
        assert!(KnotVector::<f64>::averaged(1, 2, &params).is_err());
    }

    #[test]
    fn test_find_span() {
        let knots: KnotVector<f64> =
            KnotVector::new(vec![0.0, 0.0, 0.0, 0.5, 1.0, 1.0, 1.0]).unwrap();
        assert_eq!(knots.find_span(0.0, 2, 4), 2);
        assert_eq!(knots.find_span(0.25, 2, 4), 2);
        assert_eq!(knots.find_span(0.5, 2, 4), 3);
        assert_eq!(knots.find_span(0.75, 2, 4), 3);
        assert_eq!(knots.find_span(1.0, 2, 4), 3);
    }

    #[test]
    fn test_find_span_repeated_interior() {
        let knots: KnotVector<f64> =
            KnotVector::new(vec![0.0, 0.0, 0.5, 0.5, 1.0, 1.0]).unwrap();
        // degree 1, 4 control points; span [0.5, 0.5] is empty
        assert_eq!(knots.find_span(0.5, 1, 4), 3);
        assert_eq!(knots.find_span(0.49, 1, 4), 1);
    }

    #[test]
    fn test_insert_and_trim() {
        let knots: KnotVector<f64> = KnotVector::clamped_uniform(3, 2).unwrap();
        let inserted = knots.with_inserted(2, 0.5);
        assert_eq!(inserted.as_slice(), &[0.0, 0.0, 0.0, 0.5, 1.0, 1.0, 1.0]);
        assert_eq!(inserted.without_ends().as_slice(), &[0.0, 0.0, 0.5, 1.0, 1.0]);
    }
}
