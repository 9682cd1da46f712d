/// Magnitudes below this are floored before conversion to dB (−200 dB).
pub const MIN_AMPLITUDE: f64 = 1e-10;

/// Composite Simpson's rule over `[a, b]` with `intervals` sub-intervals
/// (rounded up to the next even number, minimum 2).
pub fn simpson<F>(f: F, a: f64, b: f64, intervals: usize) -> f64
where
    F: Fn(f64) -> f64,
{
    let n = intervals.max(2);
    let n = if n % 2 == 1 { n + 1 } else { n };
    let h = (b - a) / n as f64;

    let mut sum = f(a) + f(b);
    for i in 1..n {
        let weight = if i % 2 == 1 { 4.0 } else { 2.0 };
        sum += weight * f(a + i as f64 * h);
    }
    sum * h / 3.0
}

/// Linear interpolation of `ys` over ascending `xs`, clamped to the end
/// values outside the sampled range.
///
/// Returns NaN for empty input.
pub fn interpolate_linear(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    let n = xs.len().min(ys.len());
    if n == 0 {
        return f64::NAN;
    }
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[n - 1] {
        return ys[n - 1];
    }
    // First index with xs[i] > x; guaranteed in 1..n by the checks above.
    let i = xs[..n].partition_point(|&v| v <= x);
    let (x0, x1) = (xs[i - 1], xs[i]);
    let (y0, y1) = (ys[i - 1], ys[i]);
    if x1 == x0 {
        return y1;
    }
    y0 + (y1 - y0) * (x - x0) / (x1 - x0)
}

/// Amplitude ratio to dB, floored at −200 dB. NaN stays NaN.
pub fn amplitude_to_db(amplitude: f64) -> f64 {
    if amplitude.is_nan() {
        return f64::NAN;
    }
    20.0 * amplitude.max(MIN_AMPLITUDE).log10()
}

pub fn db_to_amplitude(db: f64) -> f64 {
    10f64.powf(db / 20.0)
}

/// Power ratio to dB, floored at −200 dB. NaN stays NaN.
pub fn power_to_db(power: f64) -> f64 {
    if power.is_nan() {
        return f64::NAN;
    }
    10.0 * power.max(MIN_AMPLITUDE * MIN_AMPLITUDE).log10()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_simpson_exact_for_cubics() {
        let integral = simpson(|x| x * x * x - 2.0 * x + 1.0, 0.0, 2.0, 2);
        // ∫₀² (x³ − 2x + 1) dx = 4 − 4 + 2 = 2
        assert!((integral - 2.0).abs() < 1e-12, "integral = {integral}");
    }

    #[test]
    fn test_simpson_sine() {
        let integral = simpson(f64::sin, 0.0, PI, 101);
        assert!((integral - 2.0).abs() < 1e-7, "integral = {integral}");
    }

    #[test]
    fn test_interpolate_linear() {
        let xs = [0.0, 1.0, 3.0];
        let ys = [0.0, 10.0, 30.0];
        assert_eq!(interpolate_linear(&xs, &ys, 0.5), 5.0);
        assert_eq!(interpolate_linear(&xs, &ys, 2.0), 20.0);
        assert_eq!(interpolate_linear(&xs, &ys, 1.0), 10.0);
        assert_eq!(interpolate_linear(&xs, &ys, -1.0), 0.0);
        assert_eq!(interpolate_linear(&xs, &ys, 5.0), 30.0);
        assert!(interpolate_linear(&[], &[], 1.0).is_nan());
    }

    #[test]
    fn test_db_conversions() {
        assert_eq!(amplitude_to_db(1.0), 0.0);
        assert!((amplitude_to_db(10.0) - 20.0).abs() < 1e-12);
        assert_eq!(amplitude_to_db(0.0), -200.0);
        assert!(amplitude_to_db(f64::NAN).is_nan());
        assert_eq!(amplitude_to_db(f64::INFINITY), f64::INFINITY);
        assert!((db_to_amplitude(-6.0) - 0.501_187_233_627_272_2).abs() < 1e-12);
        assert!((power_to_db(100.0) - 20.0).abs() < 1e-12);
        assert_eq!(power_to_db(0.0), -200.0);
    }
}
