//! 3×3 linear maps for viewing trajectories.

use crate::error::{LineaError, Result};
use crate::primitives::{Point3, Vec3};
use num_traits::Float;
use std::ops::Mul;

/// A coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// The x axis.
    X,
    /// The y axis.
    Y,
    /// The z axis.
    Z,
}

impl Axis {
    /// Parses `"x"`, `"y"` or `"z"`.
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            "z" => Ok(Axis::Z),
            _ => Err(LineaError::invalid(format!("unknown axis {:?}", name))),
        }
    }

    /// Unit vector along the axis.
    pub fn unit<F: Float>(self) -> Vec3<F> {
        match self {
            Axis::X => Vec3::unit_x(),
            Axis::Y => Vec3::unit_y(),
            Axis::Z => Vec3::unit_z(),
        }
    }
}

/// A 3×3 matrix in row-major order.
///
/// Points are column vectors: [`Mat3::transform`] computes `M p`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3<F> {
    /// Matrix rows.
    pub rows: [[F; 3]; 3],
}

impl<F: Float> Mat3<F> {
    /// Creates a matrix from its rows.
    #[inline]
    pub fn from_rows(rows: [[F; 3]; 3]) -> Self {
        Self { rows }
    }

    /// Creates a matrix whose rows are the given vectors.
    pub fn from_row_vectors(r0: Vec3<F>, r1: Vec3<F>, r2: Vec3<F>) -> Self {
        Self::from_rows([[r0.x, r0.y, r0.z], [r1.x, r1.y, r1.z], [r2.x, r2.y, r2.z]])
    }

    /// The identity.
    pub fn identity() -> Self {
        let (o, z) = (F::one(), F::zero());
        Self::from_rows([[o, z, z], [z, o, z], [z, z, o]])
    }

    /// Axis-aligned scaling.
    pub fn scale(x: F, y: F, z: F) -> Self {
        let o = F::zero();
        Self::from_rows([[x, o, o], [o, y, o], [o, o, z]])
    }

    /// Rotation of the view plane about the x axis by `rad`.
    ///
    /// This is the rotation of the viewing frame, not of the scene: right
    /// multiplying a view matrix by it turns the projection plane.
    pub fn rotation_x(rad: F) -> Self {
        let (s, c) = rad.sin_cos();
        let (o, z) = (F::one(), F::zero());
        Self::from_rows([[o, z, z], [z, c, s], [z, -s, c]])
    }

    /// Rotation of the view plane about the y axis by `rad`.
    pub fn rotation_y(rad: F) -> Self {
        let (s, c) = rad.sin_cos();
        let (o, z) = (F::one(), F::zero());
        Self::from_rows([[c, z, -s], [z, o, z], [s, z, c]])
    }

    /// Rotation of the view plane about the z axis by `rad`.
    pub fn rotation_z(rad: F) -> Self {
        let (s, c) = rad.sin_cos();
        let (o, z) = (F::one(), F::zero());
        Self::from_rows([[c, s, z], [-s, c, z], [z, z, o]])
    }

    /// View-plane rotation about `axis`.
    pub fn rotation(axis: Axis, rad: F) -> Self {
        match axis {
            Axis::X => Self::rotation_x(rad),
            Axis::Y => Self::rotation_y(rad),
            Axis::Z => Self::rotation_z(rad),
        }
    }

    /// Returns `self * Mat3::rotation(axis, rad)`.
    pub fn rotated(&self, axis: Axis, rad: F) -> Self {
        *self * Self::rotation(axis, rad)
    }

    /// Row `i` as a vector.
    pub fn row(&self, i: usize) -> Vec3<F> {
        let r = self.rows[i];
        Vec3::new(r[0], r[1], r[2])
    }

    /// Transposed matrix.
    pub fn transpose(&self) -> Self {
        let r = &self.rows;
        Self::from_rows([
            [r[0][0], r[1][0], r[2][0]],
            [r[0][1], r[1][1], r[2][1]],
            [r[0][2], r[1][2], r[2][2]],
        ])
    }

    /// Applies the matrix to a point.
    pub fn transform(&self, p: Point3<F>) -> Point3<F> {
        let v = p.to_vec();
        Point3::new(self.row(0).dot(v), self.row(1).dot(v), self.row(2).dot(v))
    }
}

impl<F: Float> Mul for Mat3<F> {
    type Output = Self;

    /// Matrix product `self * other`.
    fn mul(self, other: Self) -> Self {
        let mut rows = [[F::zero(); 3]; 3];
        for (i, row) in rows.iter_mut().enumerate() {
            for (j, entry) in row.iter_mut().enumerate() {
                *entry = (0..3).fold(F::zero(), |acc, k| {
                    acc + self.rows[i][k] * other.rows[k][j]
                });
            }
        }
        Self { rows }
    }
}

impl<F: Float> Mul<Point3<F>> for Mat3<F> {
    type Output = Point3<F>;

    fn mul(self, p: Point3<F>) -> Point3<F> {
        self.transform(p)
    }
}
