//! Flat, serializable form of a fitted curve.
//!
//! With the `serde` feature the record (de)serializes with the field names
//! `degree`, `knot_vector`, `control_point` and `parameter`:
//!
//! ```json
//! {
//!     "control_point": [[0.0, 0.0, 0.0], [1.0, 2.0, 1.0]],
//!     "degree": 4,
//!     "knot_vector": [0.0, 0.0, 1.0, 1.0],
//!     "parameter": [0.0, 0.5, 1.0]
//! }
//! ```

use crate::curves::BSpline;
use crate::error::{LineaError, Result};
use crate::fit::{FittedCurve, Parameterization};
use crate::primitives::Coordinates;
use num_traits::Float;

/// A B-spline and the sample parameters it was fitted with.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BSplineRecord<F> {
    /// Spline degree.
    pub degree: usize,
    /// Knots, `control_point.len() + degree + 1` of them.
    pub knot_vector: Vec<F>,
    /// Control points as coordinate rows.
    pub control_point: Vec<Vec<F>>,
    /// Sample parameters; empty when unknown.
    pub parameter: Vec<F>,
}

impl<F: Float> BSplineRecord<F> {
    /// Flattens a curve and its sample parameters.
    pub fn new<P: Coordinates<F>>(curve: &BSpline<P, F>, parameter: &[F]) -> Self {
        Self {
            degree: curve.degree(),
            knot_vector: curve.knots().as_slice().to_vec(),
            control_point: curve
                .control_points()
                .iter()
                .map(|p| p.to_coords())
                .collect(),
            parameter: parameter.to_vec(),
        }
    }

    /// Flattens the result of [`fit`](crate::fit::fit).
    pub fn from_fitted<P: Coordinates<F>>(fitted: &FittedCurve<P, F>) -> Self {
        Self::new(&fitted.curve, fitted.parameterization.as_slice())
    }

    /// Rebuilds the curve with point type `P`.
    ///
    /// Fails with [`LineaError::InvalidInput`] when a control point does not
    /// have `P::DIM` coordinates or the lengths are inconsistent.
    pub fn to_curve<P: Coordinates<F>>(&self) -> Result<BSpline<P, F>> {
        let control_points = self
            .control_point
            .iter()
            .enumerate()
            .map(|(i, row)| {
                P::from_coords(row).ok_or_else(|| {
                    LineaError::invalid(format!(
                        "control point {} has {} coordinates, expected {}",
                        i,
                        row.len(),
                        P::DIM
                    ))
                })
            })
            .collect::<Result<Vec<P>>>()?;
        BSpline::new(control_points, self.degree, self.knot_vector.clone())
    }

    /// Rebuilds the sample parameterization.
    pub fn parameterization(&self) -> Result<Parameterization<F>> {
        Parameterization::from_params(self.parameter.clone())
    }
}
