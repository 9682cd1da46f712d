//! Special functions used by the radiation-impedance and directivity code.
//!
//! J1 and H1 switch from their power series to Hankel-type asymptotic
//! expansions at [`SERIES_LIMIT`]; the two agree to better than 1e-6
//! absolute at the seam.

use std::f64::consts::PI;

/// Argument above which the asymptotic expansions are used.
pub const SERIES_LIMIT: f64 = 16.0;

const SERIES_MAX_TERMS: usize = 300;

/// Bessel function of the first kind, order 1.
pub fn bessel_j1(x: f64) -> f64 {
    let ax = x.abs();
    if ax < SERIES_LIMIT {
        return j1_series(x);
    }
    let (p, q) = hankel_pq(ax);
    let chi = ax - 0.75 * PI;
    let value = (2.0 / (PI * ax)).sqrt() * (p * chi.cos() - q * chi.sin());
    if x < 0.0 {
        -value
    } else {
        value
    }
}

/// Struve function H1.
///
/// Even in x; the acoustic callers only pass non-negative arguments.
pub fn struve_h1(x: f64) -> f64 {
    let ax = x.abs();
    if ax < SERIES_LIMIT {
        return h1_series(ax);
    }
    let x2 = ax * ax;
    let x4 = x2 * x2;
    // H1(x) − Y1(x) ~ (2/π)(1 + 1/x² − 3/x⁴ + 45/x⁶)
    bessel_y1_asymptotic(ax) + 2.0 / PI * (1.0 + 1.0 / x2 - 3.0 / x4 + 45.0 / (x4 * x2))
}

/// 2·J1(x)/x, the circular piston directivity, with jinc(0) = 1.
pub fn jinc(x: f64) -> f64 {
    if x.abs() < 1e-10 {
        1.0
    } else {
        2.0 * bessel_j1(x) / x
    }
}

/// sin(x)/x with sinc(0) = 1.
pub fn sinc(x: f64) -> f64 {
    if x.abs() < 1e-12 {
        1.0
    } else {
        x.sin() / x
    }
}

/// Σ (−1)^k (x/2)^(2k+1) / (k! (k+1)!)
fn j1_series(x: f64) -> f64 {
    let half = 0.5 * x;
    let half_sq = half * half;
    let mut term = half;
    let mut sum = term;
    for k in 1..SERIES_MAX_TERMS {
        let k = k as f64;
        term *= -half_sq / (k * (k + 1.0));
        sum += term;
        if term.abs() < 1e-17 * sum.abs() {
            break;
        }
    }
    sum
}

/// Σ (−1)^k (x/2)^(2k+2) / (Γ(k+3/2) Γ(k+5/2))
fn h1_series(x: f64) -> f64 {
    let half = 0.5 * x;
    let half_sq = half * half;
    // Γ(3/2)·Γ(5/2) = 3π/8
    let mut term = half_sq / (3.0 * PI / 8.0);
    let mut sum = term;
    for k in 0..SERIES_MAX_TERMS {
        let k = k as f64;
        term *= -half_sq / ((k + 1.5) * (k + 2.5));
        sum += term;
        if term.abs() < 1e-17 * sum.abs() {
            break;
        }
    }
    sum
}

/// Hankel asymptotic P and Q for order 1 (μ = 4).
fn hankel_pq(x: f64) -> (f64, f64) {
    let mu = 4.0;
    let z = 8.0 * x;
    let z2 = z * z;
    let a1 = mu - 1.0;
    let a2 = a1 * (mu - 9.0);
    let a3 = a2 * (mu - 25.0);
    let a4 = a3 * (mu - 49.0);
    let a5 = a4 * (mu - 81.0);
    let a6 = a5 * (mu - 121.0);
    let p = 1.0 - a2 / (2.0 * z2) + a4 / (24.0 * z2 * z2) - a6 / (720.0 * z2 * z2 * z2);
    let q = a1 / z - a3 / (6.0 * z2 * z) + a5 / (120.0 * z2 * z2 * z);
    (p, q)
}

fn bessel_y1_asymptotic(x: f64) -> f64 {
    let (p, q) = hankel_pq(x);
    let chi = x - 0.75 * PI;
    (2.0 / (PI * x)).sqrt() * (p * chi.sin() + q * chi.cos())
}

const LANCZOS_G: f64 = 7.0;
const LANCZOS_COEFFICIENTS: [f64; 9] = [
    0.999_999_999_999_809_9,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_1,
    -176.615_029_162_140_59,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_571_6e-6,
    1.505_632_735_149_311_6e-7,
];

/// Gamma function by the Lanczos approximation (g = 7, nine terms), with
/// the reflection formula below 0.5.
pub fn gamma(x: f64) -> f64 {
    if x < 0.5 {
        return PI / ((PI * x).sin() * gamma(1.0 - x));
    }
    let x = x - 1.0;
    let mut a = LANCZOS_COEFFICIENTS[0];
    for (i, &c) in LANCZOS_COEFFICIENTS.iter().enumerate().skip(1) {
        a += c / (x + i as f64);
    }
    let t = x + LANCZOS_G + 0.5;
    (2.0 * PI).sqrt() * t.powf(x + 0.5) * (-t).exp() * a
}
