//! Viewing planes named by signed axes.

use super::{Axis, Mat3};
use crate::error::{LineaError, Result};
use crate::primitives::Vec3;
use num_traits::Float;
use std::fmt;
use std::str::FromStr;

/// An axis with an orientation, e.g. `-z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignedAxis {
    /// The axis.
    pub axis: Axis,
    /// Whether the axis points the negative way.
    pub negated: bool,
}

impl SignedAxis {
    /// Unit vector of the signed axis.
    pub fn unit<F: Float>(self) -> Vec3<F> {
        let u = self.axis.unit();
        if self.negated {
            -u
        } else {
            u
        }
    }
}

/// The plane an audience looks at, spanned by a horizontal and a vertical
/// screen axis.
///
/// `"xy"` looks down the z axis with x to the right; `"-zy"` looks along
/// the x axis with negative z to the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewPlane {
    /// Screen-right direction.
    pub horizontal: SignedAxis,
    /// Screen-up direction.
    pub vertical: SignedAxis,
}

impl ViewPlane {
    /// Parses a plane name of two signed axes such as `"xy"` or `"-zy"`.
    ///
    /// Fails with [`LineaError::InvalidInput`] for unknown characters, a count
    /// other than two axes, or a repeated axis.
    pub fn parse(name: &str) -> Result<Self> {
        let mut axes = Vec::with_capacity(2);
        let mut negated = false;
        for c in name.chars() {
            match c {
                '-' if !negated => negated = true,
                'x' | 'y' | 'z' => {
                    let mut buf = [0u8; 4];
                    axes.push(SignedAxis {
                        axis: Axis::parse(c.encode_utf8(&mut buf))?,
                        negated,
                    });
                    negated = false;
                }
                _ => {
                    return Err(LineaError::invalid(format!(
                        "unexpected {:?} in view plane {:?}",
                        c, name
                    )))
                }
            }
        }
        match axes.as_slice() {
            [horizontal, vertical] if !negated => {
                if horizontal.axis == vertical.axis {
                    return Err(LineaError::invalid(format!(
                        "view plane {:?} repeats an axis",
                        name
                    )));
                }
                Ok(Self {
                    horizontal: *horizontal,
                    vertical: *vertical,
                })
            }
            _ => Err(LineaError::invalid(format!(
                "view plane {:?} must name exactly two axes",
                name
            ))),
        }
    }

    /// The two screen axes as rows of a 2×3 projection.
    pub fn plane_rows<F: Float>(&self) -> [Vec3<F>; 2] {
        [self.horizontal.unit(), self.vertical.unit()]
    }

    /// The view matrix: the two screen axes followed by their cross product,
    /// the viewing direction.
    pub fn matrix<F: Float>(&self) -> Mat3<F> {
        let [h, v] = self.plane_rows();
        Mat3::from_row_vectors(h, v, h.cross(v))
    }
}

impl FromStr for ViewPlane {
    type Err = LineaError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ViewPlane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for a in [self.horizontal, self.vertical] {
            if a.negated {
                write!(f, "-")?;
            }
            let name = match a.axis {
                Axis::X => "x",
                Axis::Y => "y",
                Axis::Z => "z",
            };
            write!(f, "{}", name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xy_is_identity() {
        let m: Mat3<f64> = ViewPlane::parse("xy").unwrap().matrix();
        assert_eq!(m, Mat3::identity());
    }

    #[test]
    fn test_negated_axis() {
        let plane: ViewPlane = "-zy".parse().unwrap();
        assert!(plane.horizontal.negated);
        assert_eq!(plane.horizontal.axis, Axis::Z);
        let m: Mat3<f64> = plane.matrix();
        assert_eq!(m.row(0), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(m.row(1), Vec3::new(0.0, 1.0, 0.0));
        // (-z) x y = x
        assert_eq!(m.row(2), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(plane.to_string(), "-zy");
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(ViewPlane::parse("x").is_err());
        assert!(ViewPlane::parse("xyz").is_err());
        assert!(ViewPlane::parse("xx").is_err());
        assert!(ViewPlane::parse("x-").is_err());
        assert!(ViewPlane::parse("--xy").is_err());
        assert!(ViewPlane::parse("xw").is_err());
    }
}
