//! 3D vector type, used for view-plane axes.

use num_traits::Float;
use std::ops::{Mul, Neg};

/// A 3D vector representing a direction or offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec3<F> {
    pub x: F,
    pub y: F,
    pub z: F,
}

impl<F: Float> Vec3<F> {
    /// Creates a new vector.
    #[inline]
    pub fn new(x: F, y: F, z: F) -> Self {
        Self { x, y, z }
    }

    /// Unit vector along X.
    #[inline]
    pub fn unit_x() -> Self {
        Self::new(F::one(), F::zero(), F::zero())
    }

    /// Unit vector along Y.
    #[inline]
    pub fn unit_y() -> Self {
        Self::new(F::zero(), F::one(), F::zero())
    }

    /// Unit vector along Z.
    #[inline]
    pub fn unit_z() -> Self {
        Self::new(F::zero(), F::zero(), F::one())
    }

    /// Computes the dot product with another vector.
    #[inline]
    pub fn dot(self, other: Self) -> F {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Computes the cross product with another vector.
    #[inline]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Returns the magnitude (length) of the vector.
    #[inline]
    pub fn magnitude(self) -> F {
        self.dot(self).sqrt()
    }
}

impl<F: Float> Mul<F> for Vec3<F> {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: F) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl<F: Float> Neg for Vec3<F> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_product() {
        let x: Vec3<f64> = Vec3::unit_x();
        let y = Vec3::unit_y();
        assert_eq!(x.cross(y), Vec3::unit_z());
        assert_eq!(y.cross(x), -Vec3::unit_z());
    }

    #[test]
    fn test_magnitude() {
        let v: Vec3<f64> = Vec3::new(2.0, 3.0, 6.0);
        assert_eq!(v.magnitude(), 7.0);
        assert_eq!((v * 0.5).dot(Vec3::unit_z()), 3.0);
    }
}
