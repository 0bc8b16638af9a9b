//! Bracketed root finding with Brent's method.

use crate::error::{LineaError, Result};

/// Options for scalar root finding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalarOptions {
    /// Maximum number of iterations.
    pub max_iter: usize,
    /// Absolute tolerance on the root.
    pub tol: f64,
    /// Relative tolerance on the root.
    pub rtol: f64,
}

impl Default for ScalarOptions {
    fn default() -> Self {
        Self {
            max_iter: 100,
            tol: 1e-12,
            rtol: 4.0 * f64::EPSILON,
        }
    }
}

impl ScalarOptions {
    /// Sets the iteration limit.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Sets the absolute tolerance.
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }
}

/// A root located by [`brentq`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootResult {
    /// The root.
    pub root: f64,
    /// Function value at the root.
    pub function_value: f64,
    /// Number of function evaluations after the two bracket ends.
    pub iterations: usize,
    /// Width of the final bracket.
    pub bracket_width: f64,
}

/// Finds a root of `f` in `[a, b]` with Brent's method.
///
/// Combines bisection, secant and inverse quadratic interpolation, keeping a
/// bracket `[x, x_blk]` on which `f` changes sign at every step, so it
/// converges whenever bisection would.
///
/// # Errors
///
/// * [`LineaError::RootNotBracketed`] if `f(a)` and `f(b)` have the same
///   sign or either is not finite.
/// * [`LineaError::RootNotConverged`] if `options.max_iter` is exhausted.
///
/// # Example
///
/// ```
/// use linea::numeric::{brentq, ScalarOptions};
///
/// let r = brentq(|x| x * x - 2.0, 0.0, 2.0, &ScalarOptions::default()).unwrap();
/// assert!((r.root - 2.0_f64.sqrt()).abs() < 1e-12);
/// ```
pub fn brentq<G>(f: G, a: f64, b: f64, options: &ScalarOptions) -> Result<RootResult>
where
    G: Fn(f64) -> f64,
{
    try_brentq(|x| Ok(f(x)), a, b, options)
}

/// [`brentq`] for functions whose evaluation can fail.
///
/// The first evaluation error aborts the search and is returned unchanged.
pub fn try_brentq<G>(mut f: G, a: f64, b: f64, options: &ScalarOptions) -> Result<RootResult>
where
    G: FnMut(f64) -> Result<f64>,
{
    let mut xpre = a;
    let mut xcur = b;
    let mut fpre = f(xpre)?;
    let mut fcur = f(xcur)?;

    if !(fpre.is_finite() && fcur.is_finite()) || fpre * fcur > 0.0 {
        return Err(LineaError::RootNotBracketed { a, b });
    }
    if fpre == 0.0 {
        return Ok(RootResult {
            root: xpre,
            function_value: fpre,
            iterations: 0,
            bracket_width: (b - a).abs(),
        });
    }
    if fcur == 0.0 {
        return Ok(RootResult {
            root: xcur,
            function_value: fcur,
            iterations: 0,
            bracket_width: (b - a).abs(),
        });
    }

    let mut xblk = 0.0;
    let mut fblk = 0.0;
    let mut spre = 0.0;
    let mut scur = 0.0;

    for iter in 0..options.max_iter {
        if fpre != 0.0 && fcur != 0.0 && fpre.is_sign_negative() != fcur.is_sign_negative() {
            xblk = xpre;
            fblk = fpre;
            spre = xcur - xpre;
            scur = spre;
        }
        if fblk.abs() < fcur.abs() {
            xpre = xcur;
            xcur = xblk;
            xblk = xpre;
            fpre = fcur;
            fcur = fblk;
            fblk = fpre;
        }

        let delta = 0.5 * (options.tol + options.rtol * xcur.abs());
        let sbis = 0.5 * (xblk - xcur);
        if fcur == 0.0 || sbis.abs() < delta {
            return Ok(RootResult {
                root: xcur,
                function_value: fcur,
                iterations: iter,
                bracket_width: (xblk - xcur).abs(),
            });
        }

        if spre.abs() > delta && fcur.abs() < fpre.abs() {
            let stry = if xpre == xblk {
                // secant
                -fcur * (xcur - xpre) / (fcur - fpre)
            } else {
                // inverse quadratic interpolation
                let dpre = (fpre - fcur) / (xpre - xcur);
                let dblk = (fblk - fcur) / (xblk - xcur);
                -fcur * (fblk * dblk - fpre * dpre) / (dblk * dpre * (fblk - fpre))
            };
            if 2.0 * stry.abs() < spre.abs().min(3.0 * sbis.abs() - delta) {
                spre = scur;
                scur = stry;
            } else {
                spre = sbis;
                scur = sbis;
            }
        } else {
            spre = sbis;
            scur = sbis;
        }

        xpre = xcur;
        fpre = fcur;
        if scur.abs() > delta {
            xcur += scur;
        } else {
            xcur += if sbis > 0.0 { delta } else { -delta };
        }
        fcur = f(xcur)?;
    }

    Err(LineaError::RootNotConverged {
        iterations: options.max_iter,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_quadratic_root() {
        let r = brentq(|x| x * x - 4.0, 0.0, 5.0, &ScalarOptions::default()).unwrap();
        assert_relative_eq!(r.root, 2.0, epsilon = 1e-10);
        assert!(r.function_value.abs() < 1e-9);
    }

    #[test]
    fn test_reversed_bracket() {
        let r = brentq(|x| x.cos(), 3.0, 0.0, &ScalarOptions::default()).unwrap();
        assert_relative_eq!(r.root, std::f64::consts::FRAC_PI_2, epsilon = 1e-10);
    }

    #[test]
    fn test_root_at_endpoint() {
        let r = brentq(|x| x - 1.0, 1.0, 3.0, &ScalarOptions::default()).unwrap();
        assert_eq!(r.root, 1.0);
        assert_eq!(r.iterations, 0);
    }

    #[test]
    fn test_not_bracketed() {
        let err = brentq(|x| x * x + 1.0, -1.0, 1.0, &ScalarOptions::default()).unwrap_err();
        assert_eq!(err, LineaError::RootNotBracketed { a: -1.0, b: 1.0 });
    }

    #[test]
    fn test_iteration_limit() {
        let options = ScalarOptions::default().with_max_iter(2).with_tol(1e-15);
        let err = brentq(|x| x.powi(3) - 0.3, 0.0, 10.0, &options).unwrap_err();
        assert_eq!(err, LineaError::RootNotConverged { iterations: 2 });
    }

    #[test]
    fn test_flat_cubic() {
        let options = ScalarOptions::default().with_max_iter(500);
        let r = brentq(|x: f64| (x - 0.7).powi(3), 0.0, 1.0, &options).unwrap();
        assert!((r.root - 0.7).abs() < 1e-4);
    }

    #[test]
    fn test_fallible_evaluation_propagates() {
        let err = try_brentq(
            |x| {
                if x > 0.5 {
                    Err(LineaError::invalid("out of range"))
                } else {
                    Ok(x - 0.25)
                }
            },
            0.0,
            0.4,
            &ScalarOptions::default(),
        );
        assert_relative_eq!(err.unwrap().root, 0.25, epsilon = 1e-12);

        let err = try_brentq(
            |_| Err::<f64, _>(LineaError::DegenerateDerivative),
            0.0,
            1.0,
            &ScalarOptions::default(),
        );
        assert_eq!(err, Err(LineaError::DegenerateDerivative));
    }
}
