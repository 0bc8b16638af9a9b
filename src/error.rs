//! Error types for linea operations.

use thiserror::Error;

/// Errors that can occur while fitting or analyzing curves.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LineaError {
    /// Input rejected at construction time (too few samples, bad knots, ...).
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// What was wrong with the input.
        reason: String,
    },

    /// The derivative of a degree-0 curve was requested.
    #[error("cannot differentiate a degree-0 curve")]
    DegenerateDerivative,

    /// Knot refinement found no admissible split point.
    #[error("knot refinement stalled at iteration {iteration}: no admissible split point")]
    RefinementStalled {
        /// Fitter iteration at which refinement was attempted.
        iteration: usize,
    },

    /// Algorithm did not converge within the iteration limit.
    #[error("convergence failed after {iterations} iterations")]
    ConvergenceFailed {
        /// Number of iterations attempted.
        iterations: usize,
    },

    /// The function does not change sign over the bracket.
    #[error("root is not bracketed by [{a}, {b}]")]
    RootNotBracketed {
        /// Left end of the bracket.
        a: f64,
        /// Right end of the bracket.
        b: f64,
    },

    /// Root finding ran out of iterations.
    #[error("root finding did not converge after {iterations} iterations")]
    RootNotConverged {
        /// Number of iterations attempted.
        iterations: usize,
    },

    /// A half-arc whose total curvature exceeds the target could not be trimmed.
    #[error("could not trim arc [{begin}, {end}]: {source}")]
    TrimFailed {
        /// Start of the half-arc.
        begin: f64,
        /// End of the half-arc.
        end: f64,
        /// Underlying root-finding failure.
        #[source]
        source: Box<LineaError>,
    },

    /// Adaptive quadrature did not reach the requested tolerance.
    #[error("could not compute integral over [{a}, {b}] within {subintervals} subintervals")]
    QuadratureFailed {
        /// Lower limit.
        a: f64,
        /// Upper limit.
        b: f64,
        /// Subinterval budget that was exhausted.
        subintervals: usize,
    },
}

impl LineaError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        LineaError::InvalidInput {
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LineaError>;
