//! Collocation matrix of a knot vector at sample parameters.

use super::{BasisWeights, KnotVector};
use crate::primitives::Coordinates;
use num_traits::Float;

/// Basis function values of every control point at every sample parameter.
///
/// Row `j` holds the basis weights at parameter `t[j]`; column `i` belongs to
/// control point `i`. Only the `degree + 1` non-zero entries of a row are
/// stored.
#[derive(Debug, Clone, PartialEq)]
pub struct CollocationMatrix<F> {
    rows: Vec<BasisWeights<F>>,
    n_control: usize,
}

impl<F: Float> CollocationMatrix<F> {
    /// Builds the matrix for `params` on a knot vector with
    /// `knots.len() - degree - 1` control points.
    ///
    /// # Panics
    ///
    /// Panics if `knots.len() <= degree + 1`.
    pub fn new(params: &[F], knots: &KnotVector<F>, degree: usize) -> Self {
        assert!(
            knots.len() > degree + 1,
            "knot vector too short for degree {}",
            degree
        );
        let n_control = knots.len() - degree - 1;
        let rows = params
            .iter()
            .map(|&t| BasisWeights::compute(knots, degree, n_control, t))
            .collect();
        Self { rows, n_control }
    }

    /// Number of rows (samples).
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (control points).
    #[inline]
    pub fn cols(&self) -> usize {
        self.n_control
    }

    /// Entry `A[row, col]`.
    pub fn get(&self, row: usize, col: usize) -> F {
        self.rows[row].weight(col)
    }

    /// Sparse row `row`.
    pub fn row(&self, row: usize) -> &BasisWeights<F> {
        &self.rows[row]
    }

    /// Largest row sum of `AᵀA`, i.e. `max_i Σ_j A[j,i] * (Σ_k A[j,k])`.
    ///
    /// Because basis rows sum to one inside the domain this equals the
    /// largest column sum of `A`, but it is computed from the entries so it
    /// stays exact for rows that do not.
    pub fn max_row_sum_of_normal(&self) -> F {
        let mut sums = vec![F::zero(); self.n_control];
        for row in &self.rows {
            let row_sum = row.sum();
            let first = row.first_index();
            for (j, &w) in row.values.iter().enumerate() {
                sums[first + j] = sums[first + j] + w * row_sum;
            }
        }
        sums.into_iter().fold(F::zero(), F::max)
    }

    /// Computes `A p`: the curve evaluated at every sample parameter.
    ///
    /// # Panics
    ///
    /// Panics if `control_points.len() != self.cols()`.
    pub fn apply<P: Coordinates<F>>(&self, control_points: &[P]) -> Vec<P> {
        assert_eq!(control_points.len(), self.n_control, "one point per column");
        self.rows
            .iter()
            .map(|row| {
                let first = row.first_index();
                row.values
                    .iter()
                    .enumerate()
                    .fold(P::zero(), |acc, (j, &w)| {
                        acc.plus(control_points[first + j].scaled(w))
                    })
            })
            .collect()
    }

    /// Computes `Aᵀ delta`: `Σ_j A[j,i] * delta[j]` for every column `i`.
    ///
    /// # Panics
    ///
    /// Panics if `delta.len() != self.rows()`.
    pub fn transpose_apply<P: Coordinates<F>>(&self, delta: &[P]) -> Vec<P> {
        assert_eq!(delta.len(), self.rows.len(), "one residual per sample");
        let mut out = vec![P::zero(); self.n_control];
        for (row, d) in self.rows.iter().zip(delta) {
            let first = row.first_index();
            for (j, &w) in row.values.iter().enumerate() {
                out[first + j] = out[first + j].plus(d.scaled(w));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::Point2;
    use approx::assert_relative_eq;

    fn linear() -> CollocationMatrix<f64> {
        let knots = KnotVector::new(vec![0.0, 0.0, 0.5, 1.0, 1.0]).unwrap();
        CollocationMatrix::new(&[0.0, 0.25, 0.5, 1.0], &knots, 1)
    }

    #[test]
    fn test_dense_entries() {
        let a = linear();
        assert_eq!(a.rows(), 4);
        assert_eq!(a.cols(), 3);
        let expected = [
            [1.0, 0.0, 0.0],
            [0.5, 0.5, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ];
        for (r, row) in expected.iter().enumerate() {
            for (c, &want) in row.iter().enumerate() {
                assert_relative_eq!(a.get(r, c), want, epsilon = 1e-15);
            }
        }
    }

    #[test]
    fn test_max_row_sum_of_normal_matches_dense_product() {
        let knots = KnotVector::new(vec![0.0, 0.0, 0.0, 0.4, 1.0, 1.0, 1.0]).unwrap();
        let params = [0.0, 0.1, 0.3, 0.5, 0.8, 1.0];
        let a = CollocationMatrix::new(&params, &knots, 2);

        let mut best: f64 = 0.0;
        for i in 0..a.cols() {
            let mut sum = 0.0;
            for k in 0..a.cols() {
                for j in 0..a.rows() {
                    sum += a.get(j, i) * a.get(j, k);
                }
            }
            best = best.max(sum);
        }
        assert_relative_eq!(a.max_row_sum_of_normal(), best, epsilon = 1e-12);
    }

    #[test]
    fn test_apply_matches_curve() {
        let knots = KnotVector::new(vec![0.0, 0.0, 0.0, 0.4, 1.0, 1.0, 1.0]).unwrap();
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 3.0),
            Point2::new(2.0, -1.0),
            Point2::new(4.0, 0.5),
        ];
        let params = [0.0, 0.2, 0.4, 0.7, 1.0];
        let a = CollocationMatrix::new(&params, &knots, 2);
        let spline = crate::curves::BSpline::from_knot_vector(points.clone(), 2, knots).unwrap();
        for (p, &t) in a.apply(&points).iter().zip(params.iter()) {
            let q = spline.eval(t);
            assert_relative_eq!(p.x, q.x, epsilon = 1e-14);
            assert_relative_eq!(p.y, q.y, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_transpose_apply() {
        let a = linear();
        let delta = [
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 1.0),
            Point2::new(4.0, 0.0),
        ];
        let out = a.transpose_apply(&delta);
        assert_relative_eq!(out[0].x, 2.0, epsilon = 1e-15);
        assert_relative_eq!(out[0].y, 1.0, epsilon = 1e-15);
        assert_relative_eq!(out[1].x, 1.0, epsilon = 1e-15);
        assert_relative_eq!(out[1].y, 2.0, epsilon = 1e-15);
        assert_relative_eq!(out[2].x, 4.0, epsilon = 1e-15);
        assert_relative_eq!(out[2].y, 0.0, epsilon = 1e-15);
    }
}
