//! Scalar numerics: bracketed root finding and adaptive quadrature.

mod quad;
mod root;

pub use quad::{quad, QuadOptions, QuadResult};
pub use root::{brentq, try_brentq, RootResult, ScalarOptions};

use num_traits::Float;

/// Converts an `f64` constant into `F`.
#[inline]
pub(crate) fn from_f64<F: Float>(x: f64) -> F {
    F::from(x).unwrap_or_else(F::nan)
}

/// Converts a count or index into `F`.
#[inline]
pub(crate) fn from_usize<F: Float>(n: usize) -> F {
    F::from(n).unwrap_or_else(F::infinity)
}

/// Converts `F` to `f64` for logging and error reports.
#[inline]
pub(crate) fn to_f64<F: Float>(x: F) -> f64 {
    x.to_f64().unwrap_or(f64::NAN)
}
