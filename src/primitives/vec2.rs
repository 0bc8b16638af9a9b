//! Planar derivative vectors.

use crate::numeric::from_f64;
use num_traits::Float;

/// First or second derivative of a planar curve at one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec2<F> {
    pub x: F,
    pub y: F,
}

impl<F: Float> Vec2<F> {
    /// Creates a new vector.
    #[inline]
    pub fn new(x: F, y: F) -> Self {
        Self { x, y }
    }

    /// `x₁ y₂ - y₁ x₂`; positive when `other` turns counter-clockwise from `self`.
    #[inline]
    pub fn cross(self, other: Self) -> F {
        self.x * other.y - self.y * other.x
    }

    /// Squared length.
    #[inline]
    pub fn magnitude_squared(self) -> F {
        self.x * self.x + self.y * self.y
    }

    /// Length; the speed when `self` is a first derivative.
    #[inline]
    pub fn magnitude(self) -> F {
        self.x.hypot(self.y)
    }

    /// Signed curvature of a curve with velocity `self` and acceleration
    /// `acceleration`.
    ///
    /// Not finite where the velocity vanishes.
    #[inline]
    pub fn signed_curvature(self, acceleration: Self) -> F {
        self.cross(acceleration) / self.magnitude_squared().powf(from_f64(1.5))
    }
}
