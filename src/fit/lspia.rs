//! Least-squares progressive-iterative approximation (LSPIA).
//!
//! Starting from a Bézier-like spline with `degree + 1` control points, every
//! step moves all control points at once by `mu * Aᵀ delta`, where `A` is the
//! collocation matrix and `delta` the residuals at the samples. With
//! `mu = 2 / max_i Σ_k (AᵀA)[i,k]` the iteration converges to the
//! least-squares fit for the current knots. Once the control points stop
//! moving a knot is inserted where the residual is largest, until either the
//! residual drops below the threshold or the control point budget is spent.

use super::refine::select_knot;
use super::{FitOptions, Parameterization};
use crate::curves::{BSpline, CollocationMatrix, KnotVector};
use crate::error::{LineaError, Result};
use crate::numeric::{from_f64, to_f64};
use crate::primitives::Coordinates;
use num_traits::Float;
use tracing::{debug, info, trace};

/// Why fitting stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvergenceReason {
    /// The summed residual norm reached the error threshold.
    ErrorThreshold,
    /// The control points stopped moving with no control point left to add.
    SteadyState,
}

/// What a step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitStatus {
    /// Control points moved.
    Iterating,
    /// A knot was inserted before the control points moved.
    InsertedKnot,
    /// Fitting is finished; the control points were left in place.
    Converged(ConvergenceReason),
}

impl FitStatus {
    /// Returns `true` for [`FitStatus::Converged`].
    pub fn is_converged(&self) -> bool {
        matches!(self, FitStatus::Converged(_))
    }
}

/// Snapshot of the fitter after one step.
#[derive(Debug, Clone, PartialEq)]
pub struct FitStep<P, F> {
    /// Number of steps taken so far, this one included.
    pub iteration: usize,
    /// Spline degree.
    pub degree: usize,
    /// Current knot vector.
    pub knots: KnotVector<F>,
    /// Current control points.
    pub control_points: Vec<P>,
    /// `Σ |delta[j]|` before this step's move.
    pub total_error: F,
    /// `Σ |delta[j]|²` before this step's move.
    pub squared_error: F,
    /// What the step did.
    pub status: FitStatus,
}

/// Iterative B-spline approximation of a sample sequence.
///
/// The fitter is an [`Iterator`] of steps: drive it to exhaustion for the
/// final curve, or stop at any step boundary and read [`Lspia::curve`].
///
/// # Example
///
/// ```
/// use linea::fit::{FitOptions, Lspia};
/// use linea::Point2;
///
/// let samples = vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(1.0, 2.0),
///     Point2::new(2.0, 2.0),
///     Point2::new(3.0, 0.0),
///     Point2::new(4.0, -2.0),
///     Point2::new(5.0, -2.0),
///     Point2::new(6.0, 0.0),
/// ];
/// let options = FitOptions::default()
///     .with_degree(3)
///     .with_error_threshold(0.01)
///     .with_movement_threshold(1e-6);
///
/// let mut lspia = Lspia::new(&samples, &options).unwrap();
/// let last = lspia.by_ref().last().unwrap().unwrap();
/// assert!(last.status.is_converged());
/// assert!(last.total_error <= 0.01);
/// ```
#[derive(Debug, Clone)]
pub struct Lspia<P, F> {
    samples: Vec<P>,
    params: Parameterization<F>,
    curve: BSpline<P, F>,
    matrix: CollocationMatrix<F>,
    mu: F,
    norms: Vec<F>,
    last_move: Option<Vec<P>>,
    total_error: F,
    squared_error: F,
    iteration: usize,
    max_control_points: usize,
    options: FitOptions<F>,
    converged: Option<ConvergenceReason>,
    done: bool,
}

impl<P: Coordinates<F>, F: Float> Lspia<P, F> {
    /// Prepares a fit of `samples`.
    ///
    /// Fails with [`LineaError::InvalidInput`] when the degree is 0, there are
    /// fewer than `degree + 2` samples, a coordinate is not finite, a
    /// threshold is not positive, the control point cap is below
    /// `degree + 1`, or all samples coincide.
    pub fn new(samples: &[P], options: &FitOptions<F>) -> Result<Self> {
        let p = options.degree;
        if p == 0 {
            return Err(LineaError::invalid("degree must be at least 1"));
        }
        if samples.len() < p + 2 {
            return Err(LineaError::invalid(format!(
                "degree {} needs at least {} samples, got {}",
                p,
                p + 2,
                samples.len()
            )));
        }
        if samples.iter().any(|q| !q.is_finite()) {
            return Err(LineaError::invalid("samples contain a non-finite coordinate"));
        }
        if !(options.error_threshold > F::zero()) || !(options.movement_threshold > F::zero()) {
            return Err(LineaError::invalid("thresholds must be positive"));
        }
        let max_control_points = options.max_control_points.unwrap_or(samples.len());
        if max_control_points < p + 1 {
            return Err(LineaError::invalid(format!(
                "control point cap {} is below degree + 1",
                max_control_points
            )));
        }

        let params = Parameterization::chord_length(samples)?;
        let knots = KnotVector::averaged(p, p, params.as_slice())?;

        // nearest-sample seeding: P[i] = Q[round(i m / n)]
        let m = samples.len() - 1;
        let seeds = (0..=p).map(|i| samples[(2 * i * m + p) / (2 * p)]).collect();
        let curve = BSpline::from_knot_vector(seeds, p, knots)?;

        let matrix = CollocationMatrix::new(params.as_slice(), curve.knots(), p);
        let mu = step_weight(&matrix)?;

        Ok(Self {
            samples: samples.to_vec(),
            params,
            curve,
            matrix,
            mu,
            norms: Vec::new(),
            last_move: None,
            total_error: F::infinity(),
            squared_error: F::infinity(),
            iteration: 0,
            max_control_points,
            options: *options,
            converged: None,
            done: false,
        })
    }

    /// The current curve.
    pub fn curve(&self) -> &BSpline<P, F> {
        &self.curve
    }

    /// The sample parameters.
    pub fn parameterization(&self) -> &Parameterization<F> {
        &self.params
    }

    /// Steps taken so far.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Summed residual norm of the latest step (infinite before the first).
    pub fn total_error(&self) -> F {
        self.total_error
    }

    /// Current step weight `mu`.
    pub fn mu(&self) -> F {
        self.mu
    }

    /// Why fitting stopped, once it has.
    pub fn convergence(&self) -> Option<ConvergenceReason> {
        self.converged
    }

    /// Consumes the fitter, returning the curve and the parameterization.
    pub fn into_parts(self) -> (BSpline<P, F>, Parameterization<F>) {
        (self.curve, self.params)
    }

    fn snapshot(&self, status: FitStatus) -> FitStep<P, F> {
        FitStep {
            iteration: self.iteration,
            degree: self.curve.degree(),
            knots: self.curve.knots().clone(),
            control_points: self.curve.control_points().to_vec(),
            total_error: self.total_error,
            squared_error: self.squared_error,
            status,
        }
    }

    fn is_steady(&self) -> bool {
        let threshold = self.options.movement_threshold;
        self.last_move.as_ref().is_some_and(|moves| {
            moves
                .iter()
                .all(|m| (0..P::DIM).all(|axis| m.coord(axis).abs() <= threshold))
        })
    }

    fn finish(&mut self, reason: ConvergenceReason) -> FitStep<P, F> {
        self.converged = Some(reason);
        info!(
            iterations = self.iteration,
            total_error = to_f64(self.total_error),
            control_points = self.curve.control_points().len(),
            reason = ?reason,
            "lspia converged"
        );
        self.snapshot(FitStatus::Converged(reason))
    }

    /// Performs one step.
    ///
    /// A step either completes or leaves the fitter untouched. After
    /// convergence it returns the final snapshot again.
    ///
    /// # Errors
    ///
    /// * [`LineaError::ConvergenceFailed`] once `max_iterations` steps ran.
    /// * [`LineaError::RefinementStalled`] when a knot is due but no
    ///   admissible split exists.
    pub fn step(&mut self) -> Result<FitStep<P, F>> {
        if let Some(reason) = self.converged {
            return Ok(self.snapshot(FitStatus::Converged(reason)));
        }
        if self.iteration >= self.options.max_iterations {
            return Err(LineaError::ConvergenceFailed {
                iterations: self.iteration,
            });
        }

        let mut status = FitStatus::Iterating;
        if self.is_steady() {
            if self.curve.control_points().len() >= self.max_control_points {
                self.iteration += 1;
                return Ok(self.finish(ConvergenceReason::SteadyState));
            }
            self.refine()?;
            status = FitStatus::InsertedKnot;
        }

        let fitted = self.matrix.apply(self.curve.control_points());
        let residuals: Vec<P> = self
            .samples
            .iter()
            .zip(&fitted)
            .map(|(q, c)| q.minus(*c))
            .collect();
        let squares: Vec<F> = residuals.iter().map(|d| d.norm_squared()).collect();
        self.squared_error = squares.iter().fold(F::zero(), |acc, &s| acc + s);
        self.norms = squares.into_iter().map(F::sqrt).collect();
        self.total_error = self.norms.iter().fold(F::zero(), |acc, &e| acc + e);
        self.iteration += 1;

        if self.total_error <= self.options.error_threshold {
            return Ok(self.finish(ConvergenceReason::ErrorThreshold));
        }

        let mu = self.mu;
        let moves: Vec<P> = self
            .matrix
            .transpose_apply(&residuals)
            .into_iter()
            .map(|m| m.scaled(mu))
            .collect();
        for (point, m) in self.curve.control_points_mut().iter_mut().zip(&moves) {
            *point = point.plus(*m);
        }
        self.last_move = Some(moves);

        trace!(
            iteration = self.iteration,
            total_error = to_f64(self.total_error),
            squared_error = to_f64(self.squared_error),
            "lspia step"
        );
        Ok(self.snapshot(status))
    }

    fn refine(&mut self) -> Result<()> {
        let split = select_knot(
            self.curve.knots(),
            self.params.as_slice(),
            &self.norms,
            self.iteration,
        )?;
        let curve = self.curve.insert_knot_in_span(split.value, split.span);
        let matrix = CollocationMatrix::new(self.params.as_slice(), curve.knots(), curve.degree());
        let mu = step_weight(&matrix)?;

        debug!(
            iteration = self.iteration,
            span = split.span,
            knot = to_f64(split.value),
            control_points = curve.control_points().len(),
            total_error = to_f64(self.total_error),
            "inserted knot"
        );
        self.curve = curve;
        self.matrix = matrix;
        self.mu = mu;
        self.last_move = None;
        Ok(())
    }
}

fn step_weight<F: Float>(matrix: &CollocationMatrix<F>) -> Result<F> {
    let row_sum = matrix.max_row_sum_of_normal();
    if row_sum > F::zero() && row_sum.is_finite() {
        Ok(from_f64::<F>(2.0) / row_sum)
    } else {
        Err(LineaError::invalid("collocation matrix has no positive row sum"))
    }
}

impl<P: Coordinates<F>, F: Float> Iterator for Lspia<P, F> {
    type Item = Result<FitStep<P, F>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let step = self.step();
        match &step {
            Ok(s) if !s.status.is_converged() => {}
            _ => self.done = true,
        }
        Some(step)
    }
}
