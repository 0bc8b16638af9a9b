//! 2D point type.

use super::{Coordinates, Vec2};
use num_traits::Float;
use std::ops::Sub;

/// A 2D point, typically a sample or control point on a view plane.
///
/// Generic over floating-point types (`f32` or `f64`).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point2<F> {
    pub x: F,
    pub y: F,
}

impl<F: Float> Point2<F> {
    /// Creates a new point.
    #[inline]
    pub fn new(x: F, y: F) -> Self {
        Self { x, y }
    }

    /// Creates a point at the origin.
    #[inline]
    pub fn origin() -> Self {
        Self::new(F::zero(), F::zero())
    }

    /// Computes the Euclidean distance to another point.
    #[inline]
    pub fn distance(self, other: Self) -> F {
        (other - self).magnitude()
    }

    /// Linearly interpolates between `self` and `other`.
    #[inline]
    pub fn lerp(self, other: Self, t: F) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    /// Converts this point to a vector from the origin.
    #[inline]
    pub fn to_vec(self) -> Vec2<F> {
        Vec2::new(self.x, self.y)
    }
}

// Point - Point = Vec2
impl<F: Float> Sub for Point2<F> {
    type Output = Vec2<F>;

    #[inline]
    fn sub(self, other: Self) -> Vec2<F> {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl<F: Float> Default for Point2<F> {
    fn default() -> Self {
        Self::origin()
    }
}

impl<F: Float> From<(F, F)> for Point2<F> {
    fn from((x, y): (F, F)) -> Self {
        Self::new(x, y)
    }
}

impl<F: Float + std::fmt::Debug> Coordinates<F> for Point2<F> {
    const DIM: usize = 2;

    #[inline]
    fn zero() -> Self {
        Self::origin()
    }

    #[inline]
    fn coord(&self, axis: usize) -> F {
        match axis {
            0 => self.x,
            1 => self.y,
            _ => panic!("Point2 has no axis {}", axis),
        }
    }

    fn from_coords(coords: &[F]) -> Option<Self> {
        match coords {
            [x, y] => Some(Self::new(*x, *y)),
            _ => None,
        }
    }

    #[inline]
    fn plus(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    #[inline]
    fn minus(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    #[inline]
    fn scaled(self, s: F) -> Self {
        Self::new(self.x * s, self.y * s)
    }

    #[inline]
    fn norm_squared(self) -> F {
        self.x * self.x + self.y * self.y
    }
}
