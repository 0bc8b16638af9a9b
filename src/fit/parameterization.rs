//! Chord-length parameterization of sample sequences.

use crate::error::{LineaError, Result};
use crate::primitives::Coordinates;
use num_traits::Float;

/// Curve parameters assigned to a sequence of samples.
///
/// Parameters are non-decreasing, start at 0 and end at 1. Each one is the
/// fraction of the polyline length travelled up to its sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameterization<F> {
    params: Vec<F>,
}

impl<F: Float> Parameterization<F> {
    /// Chord-length parameters of `samples`.
    ///
    /// Fails with [`LineaError::InvalidInput`] for fewer than two samples or
    /// when every sample coincides.
    pub fn chord_length<P: Coordinates<F>>(samples: &[P]) -> Result<Self> {
        if samples.len() < 2 {
            return Err(LineaError::invalid("need at least two samples"));
        }

        let mut params = Vec::with_capacity(samples.len());
        params.push(F::zero());
        let mut total = F::zero();
        for pair in samples.windows(2) {
            total = total + pair[1].minus(pair[0]).norm();
            params.push(total);
        }

        if !(total > F::zero()) || !total.is_finite() {
            return Err(LineaError::invalid(
                "samples have zero total chord length",
            ));
        }
        for t in params.iter_mut() {
            *t = *t / total;
        }
        if let Some(last) = params.last_mut() {
            *last = F::one();
        }
        Ok(Self { params })
    }

    /// Wraps existing parameters, validating their shape.
    pub fn from_params(params: Vec<F>) -> Result<Self> {
        if params.len() < 2 {
            return Err(LineaError::invalid("need at least two parameters"));
        }
        if params[0] != F::zero() || params[params.len() - 1] != F::one() {
            return Err(LineaError::invalid("parameters must run from 0 to 1"));
        }
        if params.windows(2).any(|w| !(w[0] <= w[1])) {
            return Err(LineaError::invalid("parameters must be non-decreasing"));
        }
        Ok(Self { params })
    }

    /// Number of parameters.
    #[inline]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Always `false`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// The parameters.
    #[inline]
    pub fn as_slice(&self) -> &[F] {
        &self.params
    }

    /// Index of the first sample whose parameter is at least `t`.
    ///
    /// Maps a curve parameter back to a frame of the recorded trajectory;
    /// `None` when `t` is beyond the last parameter.
    pub fn sample_index_at(&self, t: F) -> Option<usize> {
        let i = self.params.partition_point(|&p| p < t);
        (i < self.params.len()).then_some(i)
    }
}

impl<F> From<Parameterization<F>> for Vec<F> {
    fn from(p: Parameterization<F>) -> Self {
        p.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{Point2, Point3};
    use approx::assert_relative_eq;

    #[test]
    fn test_chord_length() {
        let samples = [
            Point2::new(0.0, 0.0),
            Point2::new(3.0, 4.0),
            Point2::new(3.0, 4.0),
            Point2::new(3.0, 9.0),
        ];
        let t = Parameterization::chord_length(&samples).unwrap();
        assert_eq!(t.len(), 4);
        assert_eq!(t.as_slice()[0], 0.0);
        assert_relative_eq!(t.as_slice()[1], 0.5, epsilon = 1e-15);
        assert_relative_eq!(t.as_slice()[2], 0.5, epsilon = 1e-15);
        assert_eq!(t.as_slice()[3], 1.0);
    }

    #[test]
    fn test_rejects_coincident_samples() {
        let samples = [Point3::new(1.0, 1.0, 1.0); 5];
        assert!(Parameterization::chord_length(&samples).is_err());
        assert!(Parameterization::<f64>::chord_length::<Point3<f64>>(&[]).is_err());
    }

    #[test]
    fn test_sample_index_at() {
        let t = Parameterization::from_params(vec![0.0, 0.25, 0.5, 1.0]).unwrap();
        assert_eq!(t.sample_index_at(0.0), Some(0));
        assert_eq!(t.sample_index_at(0.3), Some(2));
        assert_eq!(t.sample_index_at(0.5), Some(2));
        assert_eq!(t.sample_index_at(1.0), Some(3));
        assert_eq!(t.sample_index_at(1.5), None);
    }

    #[test]
    fn test_from_params_validates() {
        assert!(Parameterization::from_params(vec![0.0, 0.6, 0.4, 1.0]).is_err());
        assert!(Parameterization::from_params(vec![0.1, 1.0]).is_err());
        assert!(Parameterization::<f64>::from_params(vec![0.0]).is_err());
    }
}
