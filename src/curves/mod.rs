//! B-spline curves and the capability traits shared by curve decorators.

mod basis;
mod bspline;
mod collocation;
mod curve;
mod knots;

pub use basis::BasisWeights;
pub use bspline::{BSpline, BSpline2, BSpline3};
pub use collocation::CollocationMatrix;
pub use curve::{Differentiable, ParametricCurve};
pub use knots::KnotVector;
