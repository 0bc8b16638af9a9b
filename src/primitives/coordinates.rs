//! Vector-space operations shared by every point type.

use num_traits::Float;
use std::fmt::Debug;

/// A fixed-dimension point that can be blended linearly.
///
/// B-spline evaluation, knot insertion and the LSPIA update only need affine
/// combinations and a Euclidean norm, so they are written against this trait
/// instead of a concrete dimension.
pub trait Coordinates<F: Float>: Copy + Debug + PartialEq {
    /// Number of coordinates.
    const DIM: usize;

    /// The origin.
    fn zero() -> Self;

    /// Returns coordinate `axis` (`0 = x`, `1 = y`, ...).
    ///
    /// # Panics
    ///
    /// Panics if `axis >= Self::DIM`.
    fn coord(&self, axis: usize) -> F;

    /// Builds a point from exactly `Self::DIM` coordinates.
    fn from_coords(coords: &[F]) -> Option<Self>;

    /// Component-wise sum.
    fn plus(self, other: Self) -> Self;

    /// Component-wise difference `self - other`.
    fn minus(self, other: Self) -> Self;

    /// Multiplies every coordinate by `s`.
    fn scaled(self, s: F) -> Self;

    /// Squared Euclidean norm of the position vector.
    fn norm_squared(self) -> F;

    /// Euclidean norm of the position vector.
    #[inline]
    fn norm(self) -> F {
        self.norm_squared().sqrt()
    }

    /// Affine blend `(1 - a) * self + a * other`.
    #[inline]
    fn blend(self, other: Self, a: F) -> Self {
        self.scaled(F::one() - a).plus(other.scaled(a))
    }

    /// Returns `true` when no coordinate is NaN or infinite.
    fn is_finite(&self) -> bool {
        (0..Self::DIM).all(|axis| self.coord(axis).is_finite())
    }

    /// Coordinates in axis order.
    fn to_coords(&self) -> Vec<F> {
        (0..Self::DIM).map(|axis| self.coord(axis)).collect()
    }
}
