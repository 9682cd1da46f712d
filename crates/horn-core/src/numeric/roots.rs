//! Scalar root finding.
//!
//! Newton-Raphson and bisection report absence of a root as a tagged
//! [`Root::NotFound`] so callers can chain them; the bracketed
//! secant/bisection solver is the strict one and returns an error when its
//! bracket is unusable.

use crate::error::{HornError, Result};
use log::warn;

/// Default absolute tolerance for the solvers.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;
/// Default iteration budget for the solvers.
pub const DEFAULT_MAX_ITER: usize = 200;
/// Newton steps are abandoned when |f'(x)| drops below this.
const FLAT_DERIVATIVE: f64 = 1e-10;

/// Why a search produced no root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RootFailure {
    /// |f'(x)| fell below the flatness threshold at `x`.
    FlatDerivative { x: f64 },
    /// f(a) and f(b) have the same sign.
    SignCondition { fa: f64, fb: f64 },
    /// An iterate or function value became NaN or infinite.
    NonFinite,
    /// The iteration budget ran out.
    MaxIterations,
}

/// Outcome of a Newton-Raphson or bisection search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Root {
    Found { x: f64, iterations: usize },
    NotFound(RootFailure),
}

impl Root {
    pub fn value(&self) -> Option<f64> {
        match *self {
            Root::Found { x, .. } => Some(x),
            Root::NotFound(_) => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Root::Found { .. })
    }
}

/// Newton-Raphson iteration from `x0`.
pub fn newton_raphson<F, D>(f: F, df: D, x0: f64, tol: f64, max_iter: usize) -> Root
where
    F: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
{
    let mut x = x0;
    for i in 0..max_iter {
        let fx = f(x);
        if !fx.is_finite() {
            return Root::NotFound(RootFailure::NonFinite);
        }
        if fx.abs() < tol {
            return Root::Found { x, iterations: i };
        }
        let d = df(x);
        if d.is_nan() || d.abs() < FLAT_DERIVATIVE {
            return Root::NotFound(RootFailure::FlatDerivative { x });
        }
        let next = x - fx / d;
        if !next.is_finite() {
            return Root::NotFound(RootFailure::NonFinite);
        }
        if (next - x).abs() < tol {
            return Root::Found {
                x: next,
                iterations: i + 1,
            };
        }
        x = next;
    }
    Root::NotFound(RootFailure::MaxIterations)
}

/// Bisection on `[a, b]`. Requires f(a)·f(b) ≤ 0.
///
/// Stops when |f(mid)| < `tol` or the width of the bracket drops below `tol`.
pub fn bisection<F>(f: F, a: f64, b: f64, tol: f64, max_iter: usize) -> Root
where
    F: Fn(f64) -> f64,
{
    let (mut lo, mut hi) = if a <= b { (a, b) } else { (b, a) };
    let mut f_lo = f(lo);
    let f_hi = f(hi);

    let product = f_lo * f_hi;
    if product.is_nan() || product > 0.0 {
        return Root::NotFound(RootFailure::SignCondition { fa: f_lo, fb: f_hi });
    }
    if f_lo == 0.0 {
        return Root::Found { x: lo, iterations: 0 };
    }
    if f_hi == 0.0 {
        return Root::Found { x: hi, iterations: 0 };
    }

    for i in 0..max_iter {
        let mid = 0.5 * (lo + hi);
        let f_mid = f(mid);
        if !f_mid.is_finite() {
            return Root::NotFound(RootFailure::NonFinite);
        }
        if f_mid.abs() < tol || hi - lo < tol {
            return Root::Found {
                x: mid,
                iterations: i + 1,
            };
        }
        if f_lo * f_mid <= 0.0 {
            hi = mid;
        } else {
            lo = mid;
            f_lo = f_mid;
        }
    }
    Root::NotFound(RootFailure::MaxIterations)
}

/// Newton-Raphson from `x0`, accepted only if the root lies in `[lo, hi]`;
/// otherwise bisection over `[lo, hi]`.
#[allow(clippy::too_many_arguments)]
pub fn solve_with_fallback<F, D>(
    f: F,
    df: D,
    x0: f64,
    lo: f64,
    hi: f64,
    tol: f64,
    max_iter: usize,
) -> Root
where
    F: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
{
    let newton = newton_raphson(&f, &df, x0, tol, max_iter);
    if let Root::Found { x, .. } = newton {
        if x >= lo && x <= hi {
            return newton;
        }
        warn!("newton root {x} outside [{lo}, {hi}], falling back to bisection");
    } else {
        warn!("newton failed ({newton:?}), falling back to bisection on [{lo}, {hi}]");
    }
    bisection(f, lo, hi, tol, max_iter)
}

/// Bracketed secant/bisection hybrid on `[a, b]`.
///
/// Each step takes the secant estimate through the bracket ends, replacing
/// it with the midpoint when it leaves the bracket or when the same end has
/// been kept twice in a row. The sub-interval still holding the sign change
/// is kept. Returns the first iterate with |f| < `tol`, or the midpoint once
/// the bracket is narrower than `tol`.
pub fn solve_bracketed<F>(f: F, a: f64, b: f64, tol: f64, max_iter: usize) -> Result<f64>
where
    F: Fn(f64) -> f64,
{
    let (mut a, mut b) = if a <= b { (a, b) } else { (b, a) };
    let mut fa = f(a);
    let mut fb = f(b);
    if !fa.is_finite() {
        return Err(HornError::NonFiniteEvaluation { x: a });
    }
    if !fb.is_finite() {
        return Err(HornError::NonFiniteEvaluation { x: b });
    }
    if fa * fb > 0.0 {
        return Err(HornError::UnbracketedRoot { a, b, fa, fb });
    }
    if fa == 0.0 {
        return Ok(a);
    }
    if fb == 0.0 {
        return Ok(b);
    }

    // -1 = lower end moved last, +1 = upper end moved last.
    let mut last_side = 0i8;
    let mut repeats = 0u8;

    for _ in 0..max_iter {
        let mid = 0.5 * (a + b);
        let secant = b - fb * (b - a) / (fb - fa);
        let mut x = if repeats >= 2 || !secant.is_finite() || secant <= a || secant >= b {
            mid
        } else {
            secant
        };

        let mut fx = f(x);
        if !fx.is_finite() && x != mid {
            x = mid;
            fx = f(x);
        }
        if !fx.is_finite() {
            return Err(HornError::NonFiniteEvaluation { x });
        }
        if fx.abs() < tol {
            return Ok(x);
        }

        let side = if fa * fx < 0.0 {
            b = x;
            fb = fx;
            1
        } else {
            a = x;
            fa = fx;
            -1
        };
        if side == last_side {
            repeats = repeats.saturating_add(1);
        } else {
            repeats = 0;
        }
        last_side = side;

        if (b - a).abs() < tol {
            return Ok(0.5 * (a + b));
        }
    }
    Err(HornError::NoConvergence {
        iterations: max_iter,
    })
}

/// Grow `hi` geometrically from `lo` until f changes sign on `[lo, hi]`.
///
/// Returns the bracket. `factor` must exceed 1.
pub fn expand_upper_bracket<F>(f: F, lo: f64, hi: f64, factor: f64, max_tries: usize) -> Result<(f64, f64)>
where
    F: Fn(f64) -> f64,
{
    let f_lo = f(lo);
    if !f_lo.is_finite() {
        return Err(HornError::NonFiniteEvaluation { x: lo });
    }
    let mut hi = hi;
    let mut f_hi = f(hi);
    for _ in 0..max_tries {
        if !f_hi.is_finite() {
            return Err(HornError::NonFiniteEvaluation { x: hi });
        }
        if f_lo * f_hi <= 0.0 {
            return Ok((lo, hi));
        }
        hi = lo + (hi - lo) * factor;
        f_hi = f(hi);
    }
    Err(HornError::UnbracketedRoot {
        a: lo,
        b: hi,
        fa: f_lo,
        fb: f_hi,
    })
}
