//! linea - B-spline approximation and curvature analysis of motion trajectories
//!
//! Recorded trajectories are noisy point sequences. This library fits them with
//! smooth B-splines by progressive iterative approximation, projects them onto
//! a view plane and finds the S-shaped stretches whose arcs turn by a pleasing
//! amount.
//!
//! ```
//! use linea::analysis::{analyze, AnalysisOptions, SegmentOptions};
//! use linea::fit::{fit, FitOptions};
//! use linea::Point2;
//!
//! let samples: Vec<_> = (0..40)
//!     .map(|i| {
//!         let t = i as f64 / 39.0;
//!         Point2::new(4.0 * t, (2.0 * std::f64::consts::PI * t).sin())
//!     })
//!     .collect();
//!
//! let options = FitOptions::default().with_error_threshold(0.04);
//! let fitted = fit(&samples, &options).unwrap();
//!
//! let analysis = AnalysisOptions::default()
//!     .with_segment(SegmentOptions::default().with_splits(2000));
//! let report = analyze(&fitted.curve, &analysis).unwrap();
//! assert!(report.inflection_points.len() >= 3);
//! ```

pub mod analysis;
pub mod curves;
pub mod error;
pub mod fit;
pub mod geometry;
pub mod numeric;
pub mod primitives;
pub mod record;

pub use error::{LineaError, Result};
pub use primitives::{Coordinates, Point2, Point3, Vec2, Vec3};
