//! 3D point type.

use super::{Coordinates, Vec3};
use num_traits::Float;
use std::ops::Sub;

/// A 3D point with x, y, and z coordinates.
///
/// Motion-capture samples and the control points of fitted trajectories
/// are `Point3` values.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point3<F> {
    pub x: F,
    pub y: F,
    pub z: F,
}

impl<F: Float> Point3<F> {
    /// Creates a new point.
    #[inline]
    pub fn new(x: F, y: F, z: F) -> Self {
        Self { x, y, z }
    }

    /// Creates a point at the origin (0, 0, 0).
    #[inline]
    pub fn origin() -> Self {
        Self::new(F::zero(), F::zero(), F::zero())
    }

    /// Computes the Euclidean distance to another point.
    #[inline]
    pub fn distance(self, other: Self) -> F {
        (other - self).magnitude()
    }

    /// Converts this point to a vector from the origin.
    #[inline]
    pub fn to_vec(self) -> Vec3<F> {
        Vec3::new(self.x, self.y, self.z)
    }
}

// Point - Point = Vec3
impl<F: Float> Sub for Point3<F> {
    type Output = Vec3<F>;

    #[inline]
    fn sub(self, other: Self) -> Vec3<F> {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl<F: Float> Default for Point3<F> {
    fn default() -> Self {
        Self::origin()
    }
}

impl<F: Float> From<Vec3<F>> for Point3<F> {
    fn from(v: Vec3<F>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl<F: Float + std::fmt::Debug> Coordinates<F> for Point3<F> {
    const DIM: usize = 3;

    #[inline]
    fn zero() -> Self {
        Self::origin()
    }

    #[inline]
    fn coord(&self, axis: usize) -> F {
        match axis {
            0 => self.x,
            1 => self.y,
            2 => self.z,
            _ => panic!("Point3 has no axis {}", axis),
        }
    }

    fn from_coords(coords: &[F]) -> Option<Self> {
        match coords {
            [x, y, z] => Some(Self::new(*x, *y, *z)),
            _ => None,
        }
    }

    #[inline]
    fn plus(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    #[inline]
    fn minus(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    #[inline]
    fn scaled(self, s: F) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }

    #[inline]
    fn norm_squared(self) -> F {
        self.x * self.x + self.y * self.y + self.z * self.z
    }
}
