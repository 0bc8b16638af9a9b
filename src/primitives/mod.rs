//! Floating-point points and vectors.
//!
//! Control points and samples are generic over [`Coordinates`], which both
//! [`Point2`] and [`Point3`] implement.

mod coordinates;
mod point2;
mod point3;
mod vec2;
mod vec3;

pub use coordinates::Coordinates;
pub use point2::Point2;
pub use point3::Point3;
pub use vec2::Vec2;
pub use vec3::Vec3;
