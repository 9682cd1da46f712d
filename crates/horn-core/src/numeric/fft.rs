use crate::error::{HornError, Result};
use num_complex::Complex64;
use std::f64::consts::PI;

/// Forward FFT by recursive radix-2 Cooley-Tukey.
///
/// `input.len()` must be an exact power of two; pad with
/// [`pad_to_power_of_two`] first if it is not.
pub fn fft(input: &[Complex64]) -> Result<Vec<Complex64>> {
    if !input.len().is_power_of_two() {
        return Err(HornError::NotPowerOfTwo { len: input.len() });
    }
    Ok(fft_recursive(input))
}

/// Inverse FFT: conjugate, forward transform, conjugate and scale by 1/N.
pub fn ifft(input: &[Complex64]) -> Result<Vec<Complex64>> {
    let conjugated: Vec<Complex64> = input.iter().map(|c| c.conj()).collect();
    let n = input.len() as f64;
    let spectrum = fft(&conjugated)?;
    Ok(spectrum.into_iter().map(|c| c.conj() / n).collect())
}

fn fft_recursive(input: &[Complex64]) -> Vec<Complex64> {
    let n = input.len();
    if n == 1 {
        return vec![input[0]];
    }

    let even: Vec<Complex64> = input.iter().step_by(2).copied().collect();
    let odd: Vec<Complex64> = input.iter().skip(1).step_by(2).copied().collect();
    let even = fft_recursive(&even);
    let odd = fft_recursive(&odd);

    let half = n / 2;
    let mut out = vec![Complex64::new(0.0, 0.0); n];
    for k in 0..half {
        let twiddle = Complex64::from_polar(1.0, -2.0 * PI * k as f64 / n as f64) * odd[k];
        out[k] = even[k] + twiddle;
        out[k + half] = even[k] - twiddle;
    }
    out
}

/// Smallest power of two ≥ `n` (1 for `n == 0`).
pub fn next_power_of_two(n: usize) -> usize {
    n.max(1).next_power_of_two()
}

/// Copy `data` and append `fill` up to the next power of two.
pub fn pad_to_power_of_two(data: &[Complex64], fill: Complex64) -> Vec<Complex64> {
    let mut padded = data.to_vec();
    padded.resize(next_power_of_two(data.len()), fill);
    padded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn max_error(a: &[Complex64], b: &[Complex64]) -> f64 {
        a.iter()
            .zip(b)
            .map(|(x, y)| (x - y).norm())
            .fold(0.0, f64::max)
    }

    #[test]
    fn test_delta_transforms_to_flat_spectrum() {
        let mut x = vec![Complex64::new(0.0, 0.0); 8];
        x[0] = Complex64::new(1.0, 0.0);
        let spectrum = fft(&x).unwrap();
        for (k, bin) in spectrum.iter().enumerate() {
            assert!(
                (bin - Complex64::new(1.0, 0.0)).norm() < 1e-12,
                "bin {k} = {bin}"
            );
        }
    }

    #[test]
    fn test_single_tone_lands_in_its_bin() {
        let n = 16;
        let x: Vec<Complex64> = (0..n)
            .map(|i| Complex64::from_polar(1.0, 2.0 * PI * 3.0 * i as f64 / n as f64))
            .collect();
        let spectrum = fft(&x).unwrap();
        assert!((spectrum[3].norm() - n as f64).abs() < 1e-9);
        for (k, bin) in spectrum.iter().enumerate() {
            if k != 3 {
                assert!(bin.norm() < 1e-9, "leakage at bin {k}: {bin}");
            }
        }
    }

    #[test]
    fn test_ifft_inverts_fft() {
        let x: Vec<Complex64> = (0..64)
            .map(|i| {
                let t = i as f64;
                Complex64::new((0.3 * t).sin() + 0.1 * t, (0.7 * t).cos())
            })
            .collect();
        let back = ifft(&fft(&x).unwrap()).unwrap();
        let err = max_error(&x, &back);
        assert!(err < 1e-10, "round-trip error {err}");
    }

    #[test]
    fn test_matches_realfft_on_real_input() {
        use realfft::RealFftPlanner;

        let n = 32;
        let signal: Vec<f64> = (0..n).map(|i| ((i * i) % 7) as f64 - 3.0).collect();

        let mut planner = RealFftPlanner::<f64>::new();
        let r2c = planner.plan_fft_forward(n);
        let mut input = signal.clone();
        let mut reference = r2c.make_output_vec();
        r2c.process(&mut input, &mut reference).unwrap();

        let complex: Vec<Complex64> = signal.iter().map(|&s| Complex64::new(s, 0.0)).collect();
        let ours = fft(&complex).unwrap();
        for (k, r) in reference.iter().enumerate() {
            let diff = (ours[k] - Complex64::new(r.re, r.im)).norm();
            assert!(diff < 1e-9, "bin {k}: ours {} vs realfft {r}", ours[k]);
        }
    }

    #[test]
    fn test_rejects_non_power_of_two() {
        let x = vec![Complex64::new(1.0, 0.0); 6];
        assert_eq!(fft(&x), Err(HornError::NotPowerOfTwo { len: 6 }));
        assert_eq!(ifft(&x), Err(HornError::NotPowerOfTwo { len: 6 }));
        assert!(fft(&[]).is_err());
    }

    #[test]
    fn test_padding() {
        let x = vec![Complex64::new(1.0, 0.0); 5];
        let fill = Complex64::new(0.0, 0.0);
        let padded = pad_to_power_of_two(&x, fill);
        assert_eq!(padded.len(), 8);
        assert_eq!(padded[4], x[4]);
        assert_eq!(padded[7], fill);
        assert_eq!(next_power_of_two(0), 1);
        assert_eq!(next_power_of_two(8), 8);
        assert_eq!(next_power_of_two(9), 16);
    }
}
