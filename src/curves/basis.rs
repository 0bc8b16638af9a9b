//! Non-zero B-spline basis functions at a parameter.

use super::KnotVector;
use num_traits::Float;

/// The `degree + 1` basis functions that are non-zero at a parameter.
///
/// `values[j]` is the weight of control point `span - degree + j`. Every other
/// basis function vanishes at that parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct BasisWeights<F> {
    /// Knot span index `k` with `knots[k] <= u < knots[k+1]`.
    pub span: usize,
    /// Non-zero basis values, lowest control point index first.
    pub values: Vec<F>,
}

impl<F: Float> BasisWeights<F> {
    /// Computes the non-zero basis values at `u`.
    ///
    /// Uses the triangular recurrence: start from the degree-0 indicator of
    /// the span and raise the degree one step at a time, blending
    /// neighbouring values with the knot-ratio weights. At exactly the first
    /// or last knot the result is one-hot on the first or last control point,
    /// since the recurrence would divide by a zero-length span there.
    pub fn compute(knots: &KnotVector<F>, degree: usize, n_control: usize, u: F) -> Self {
        let p = degree;

        if u <= knots.first() {
            let mut values = vec![F::zero(); p + 1];
            values[0] = F::one();
            return Self { span: p, values };
        }
        if u >= knots.last() {
            let mut values = vec![F::zero(); p + 1];
            values[p] = F::one();
            return Self {
                span: n_control - 1,
                values,
            };
        }

        let k = knots.find_span(u, p, n_control);
        let mut values = vec![F::zero(); p + 1];
        let mut left = vec![F::zero(); p + 1];
        let mut right = vec![F::zero(); p + 1];
        values[0] = F::one();

        for d in 1..=p {
            left[d] = u - knots[k + 1 - d];
            right[d] = knots[k + d] - u;
            let mut saved = F::zero();
            for r in 0..d {
                let denom = right[r + 1] + left[d - r];
                let temp = if denom == F::zero() {
                    F::zero()
                } else {
                    values[r] / denom
                };
                values[r] = saved + right[r + 1] * temp;
                saved = left[d - r] * temp;
            }
            values[d] = saved;
        }

        Self { span: k, values }
    }

    /// Index of the control point weighted by `values[0]`.
    #[inline]
    pub fn first_index(&self) -> usize {
        self.span + 1 - self.values.len()
    }

    /// Expands the weights into a row of length `n_control`.
    pub fn dense(&self, n_control: usize) -> Vec<F> {
        let mut row = vec![F::zero(); n_control];
        let first = self.first_index();
        for (j, &v) in self.values.iter().enumerate() {
            row[first + j] = v;
        }
        row
    }

    /// Weight of control point `i` (zero outside the support).
    pub fn weight(&self, i: usize) -> F {
        let first = self.first_index();
        if i < first || i >= first + self.values.len() {
            F::zero()
        } else {
            self.values[i - first]
        }
    }

    /// Sum of the weights; 1 for any parameter inside the domain.
    pub fn sum(&self) -> F {
        self.values.iter().fold(F::zero(), |acc, &v| acc + v)
    }
}
