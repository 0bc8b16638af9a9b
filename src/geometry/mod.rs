//! Viewing transforms and curve decorators.
//!
//! A fitted trajectory lives in 3-D; the curvature analysis runs on what an
//! audience sees. The decorators here wrap any [`ParametricCurve`] and are
//! themselves differentiable, so a chain such as
//! `Planar<Projected<BSpline3<f64>, f64>>` can be handed straight to the
//! analysis.
//!
//! # Example
//!
//! ```
//! use linea::curves::BSpline3;
//! use linea::geometry::{project_to_plane, ViewPlane};
//! use linea::Point3;
//!
//! let spline = BSpline3::with_uniform_knots(
//!     vec![
//!         Point3::new(0.0, 0.0, 0.0),
//!         Point3::new(1.0, 1.0, 2.0),
//!         Point3::new(2.0, 0.0, 4.0),
//!     ],
//!     2,
//! )
//! .unwrap();
//! let view = ViewPlane::parse("-zy").unwrap();
//! let screen = project_to_plane(spline, view.matrix());
//! ```
//!
//! [`ParametricCurve`]: crate::curves::ParametricCurve

mod homogeneous;
mod matrix;
mod transform;
mod view;

pub use homogeneous::{Dehomogenized, HPoint3, Homogeneous, HomogeneousVector};
pub use matrix::{Axis, Mat3};
pub use transform::{project_to_plane, Planar, Projected};
pub use view::{SignedAxis, ViewPlane};
