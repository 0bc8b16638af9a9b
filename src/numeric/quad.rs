//! Adaptive Gauss–Kronrod quadrature.
//!
//! Each subinterval is integrated with the 15-point Kronrod rule; the
//! difference to the embedded 7-point Gauss rule is its error estimate. The
//! subinterval with the largest estimate is bisected until the summed
//! estimate meets the tolerance or the subinterval budget runs out.

use crate::error::{LineaError, Result};

/// Kronrod abscissae on `[-1, 1]`, descending; odd indices are Gauss nodes.
const XGK: [f64; 8] = [
    0.991_455_371_120_812_6,
    0.949_107_912_342_758_5,
    0.864_864_423_359_769_1,
    0.741_531_185_599_394_4,
    0.586_087_235_467_691_1,
    0.405_845_151_377_397_2,
    0.207_784_955_007_898_5,
    0.0,
];

/// Kronrod weights matching [`XGK`].
const WGK: [f64; 8] = [
    0.022_935_322_010_529_22,
    0.063_092_092_629_978_55,
    0.104_790_010_322_250_18,
    0.140_653_259_715_525_92,
    0.169_004_726_639_267_9,
    0.190_350_578_064_785_4,
    0.204_432_940_075_298_9,
    0.209_482_141_084_727_83,
];

/// Gauss weights for `XGK[1], XGK[3], XGK[5], XGK[7]`.
const WG: [f64; 4] = [
    0.129_484_966_168_869_7,
    0.279_705_391_489_276_7,
    0.381_830_050_505_118_9,
    0.417_959_183_673_469_4,
];

/// Options for [`quad`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadOptions {
    /// Absolute error tolerance.
    pub abs_tol: f64,
    /// Relative error tolerance.
    pub rel_tol: f64,
    /// Maximum number of subintervals.
    pub max_subintervals: usize,
}

impl Default for QuadOptions {
    fn default() -> Self {
        Self {
            abs_tol: 1.49e-8,
            rel_tol: 1.49e-8,
            max_subintervals: 10_000,
        }
    }
}

impl QuadOptions {
    /// Sets both tolerances.
    pub fn with_tolerance(mut self, abs_tol: f64, rel_tol: f64) -> Self {
        self.abs_tol = abs_tol;
        self.rel_tol = rel_tol;
        self
    }

    /// Sets the subinterval budget.
    pub fn with_max_subintervals(mut self, max_subintervals: usize) -> Self {
        self.max_subintervals = max_subintervals;
        self
    }
}

/// Value of a definite integral together with its error estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadResult {
    /// Integral estimate.
    pub value: f64,
    /// Estimated absolute error.
    pub error_estimate: f64,
    /// Number of subintervals used.
    pub subintervals: usize,
}

#[derive(Debug, Clone, Copy)]
struct Segment {
    a: f64,
    b: f64,
    value: f64,
    error: f64,
}

fn kronrod<G: Fn(f64) -> f64>(f: &G, a: f64, b: f64) -> Segment {
    let center = 0.5 * (a + b);
    let half = 0.5 * (b - a);

    let fc = f(center);
    let mut kronrod = WGK[7] * fc;
    let mut gauss = WG[3] * fc;

    for (j, (&x, &w)) in XGK.iter().zip(WGK.iter()).take(7).enumerate() {
        let dx = half * x;
        let pair = f(center - dx) + f(center + dx);
        kronrod += w * pair;
        if j % 2 == 1 {
            gauss += WG[j / 2] * pair;
        }
    }

    Segment {
        a,
        b,
        value: kronrod * half,
        error: ((kronrod - gauss) * half).abs(),
    }
}

/// Integrates `f` over `[a, b]`.
///
/// `a > b` integrates the reversed range and negates; `a == b` is zero.
///
/// # Errors
///
/// * [`LineaError::InvalidInput`] for non-finite limits.
/// * [`LineaError::QuadratureFailed`] when the tolerance is not met within
///   `options.max_subintervals` subintervals or before a subinterval shrinks to
///   machine precision, or when the integrand is not finite.
///
/// # Example
///
/// ```
/// use linea::numeric::{quad, QuadOptions};
///
/// let r = quad(|x: f64| x.sin(), 0.0, std::f64::consts::PI, &QuadOptions::default()).unwrap();
/// assert!((r.value - 2.0).abs() < 1e-10);
/// ```
pub fn quad<G>(f: G, a: f64, b: f64, options: &QuadOptions) -> Result<QuadResult>
where
    G: Fn(f64) -> f64,
{
    if !(a.is_finite() && b.is_finite()) {
        return Err(LineaError::invalid("integration limits must be finite"));
    }
    if a == b {
        return Ok(QuadResult {
            value: 0.0,
            error_estimate: 0.0,
            subintervals: 0,
        });
    }
    if a > b {
        let r = quad(f, b, a, options)?;
        return Ok(QuadResult {
            value: -r.value,
            ..r
        });
    }

    let failed = || LineaError::QuadratureFailed {
        a,
        b,
        subintervals: options.max_subintervals,
    };

    let mut segments = vec![kronrod(&f, a, b)];
    let mut value = segments[0].value;
    let mut error = segments[0].error;

    loop {
        if !value.is_finite() || !error.is_finite() {
            return Err(failed());
        }
        if error <= options.abs_tol.max(options.rel_tol * value.abs()) {
            break;
        }
        if segments.len() >= options.max_subintervals {
            return Err(failed());
        }

        let (worst, _) = segments
            .iter()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |best, (i, s)| {
                if s.error > best.1 {
                    (i, s.error)
                } else {
                    best
                }
            });
        let segment = segments[worst];
        let mid = 0.5 * (segment.a + segment.b);
        if mid <= segment.a || mid >= segment.b {
            // interval exhausted at machine precision
            return Err(failed());
        }

        let left = kronrod(&f, segment.a, mid);
        let right = kronrod(&f, mid, segment.b);
        value += left.value + right.value - segment.value;
        error += left.error + right.error - segment.error;
        segments[worst] = left;
        segments.push(right);
    }

    // re-sum to shed the drift of incremental updates
    let value: f64 = segments.iter().map(|s| s.value).sum();
    let error_estimate: f64 = segments.iter().map(|s| s.error).sum();
    Ok(QuadResult {
        value,
        error_estimate,
        subintervals: segments.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_polynomial_is_exact() {
        let r = quad(|x| x.powi(5) - 2.0 * x, 0.0, 2.0, &QuadOptions::default()).unwrap();
        assert_relative_eq!(r.value, 64.0 / 6.0 - 4.0, epsilon = 1e-12);
        assert_eq!(r.subintervals, 1);
    }

    #[test]
    fn test_reversed_limits() {
        let forward = quad(|x| x.exp(), 0.0, 1.0, &QuadOptions::default()).unwrap();
        let backward = quad(|x| x.exp(), 1.0, 0.0, &QuadOptions::default()).unwrap();
        assert_relative_eq!(forward.value, std::f64::consts::E - 1.0, epsilon = 1e-12);
        assert_relative_eq!(backward.value, -forward.value, epsilon = 1e-15);
    }

    #[test]
    fn test_kink_needs_subdivision() {
        let r = quad(|x: f64| (x - 0.3).abs(), 0.0, 1.0, &QuadOptions::default()).unwrap();
        assert_relative_eq!(r.value, 0.045 + 0.245, epsilon = 1e-8);
        assert!(r.subintervals > 1);
    }

    #[test]
    fn test_empty_range() {
        let r = quad(|x| x, 2.0, 2.0, &QuadOptions::default()).unwrap();
        assert_eq!(r.value, 0.0);
    }

    #[test]
    fn test_budget_exhausted() {
        let options = QuadOptions::default()
            .with_tolerance(1e-14, 0.0)
            .with_max_subintervals(2);
        let err = quad(|x: f64| x.abs().sqrt(), -1.0, 1.0, &options).unwrap_err();
        assert_eq!(
            err,
            LineaError::QuadratureFailed {
                a: -1.0,
                b: 1.0,
                subintervals: 2
            }
        );
    }

    #[test]
    fn test_non_finite_integrand() {
        let err = quad(|x| 1.0 / x, 0.0, 1.0, &QuadOptions::default()).unwrap_err();
        assert!(matches!(err, LineaError::QuadratureFailed { .. }));
    }
}
