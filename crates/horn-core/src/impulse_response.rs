use crate::constants::MediumProperties;
use crate::error::{HornError, Result};
use crate::frequency_response::sweep_bins;
use crate::profiles::Profile;
use num_complex::Complex64;
use realfft::RealFftPlanner;
use serde::Serialize;
use std::f64::consts::PI;

/// Time-domain response of a horn at a fixed sample rate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpulseResponse {
    pub sample_rate: f64,
    pub samples: Vec<f64>,
}

impl ImpulseResponse {
    /// Sweep `profile` over the bins of an `fft_size` real FFT and return the
    /// windowed impulse response.
    pub fn from_profile(
        profile: &Profile,
        fft_size: usize,
        sample_rate: f64,
        medium: Option<&MediumProperties>,
    ) -> Result<Self> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(HornError::InvalidParameter {
                name: "sample_rate",
                value: sample_rate,
                reason: "must be finite and positive",
            });
        }
        let (_, hf) = sweep_bins(profile, fft_size, sample_rate, medium);
        Ok(Self {
            sample_rate,
            samples: compute(&hf, fft_size)?,
        })
    }

    /// Length in seconds.
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate
    }

    /// Index and value of the sample with the largest magnitude.
    pub fn peak(&self) -> Option<(usize, f64)> {
        self.samples
            .iter()
            .copied()
            .enumerate()
            .fold(None, |best, (i, s)| match best {
                Some((_, b)) if b.abs() >= s.abs() => best,
                _ => Some((i, s)),
            })
    }
}

/// Inverse real FFT of `fft_size/2 + 1` bins, scaled by `1/fft_size` so a
/// flat unit spectrum gives a unit delta. DC and Nyquist are taken as real.
pub fn inverse_real_fft(transfer_function: &[Complex64], fft_size: usize) -> Result<Vec<f64>> {
    let expected_bins = fft_size / 2 + 1;
    let length_error = || HornError::FftLength {
        expected: expected_bins,
        actual: transfer_function.len(),
    };
    if fft_size < 2 || transfer_function.len() != expected_bins {
        return Err(length_error());
    }

    let mut planner = RealFftPlanner::<f64>::new();
    let ifft = planner.plan_fft_inverse(fft_size);

    let mut spectrum: Vec<_> = transfer_function
        .iter()
        .map(|&c| realfft::num_complex::Complex { re: c.re, im: c.im })
        .collect();
    spectrum[0].im = 0.0;
    spectrum[expected_bins - 1].im = 0.0;

    let mut output = vec![0.0f64; fft_size];
    ifft.process(&mut spectrum, &mut output)
        .map_err(|_| length_error())?;

    let norm = 1.0 / fft_size as f64;
    output.iter_mut().for_each(|s| *s *= norm);
    Ok(output)
}

/// Impulse response from `fft_size/2 + 1` bins of H(f): the first
/// `fft_size / 2` samples of the inverse transform, faded out by the falling
/// half of a Hann window.
pub fn compute(transfer_function: &[Complex64], fft_size: usize) -> Result<Vec<f64>> {
    let raw = inverse_real_fft(transfer_function, fft_size)?;
    let ir_len = fft_size / 2;
    Ok(raw
        .into_iter()
        .take(ir_len)
        .enumerate()
        .map(|(i, s)| s * 0.5 * (1.0 + (PI * i as f64 / ir_len as f64).cos()))
        .collect())
}
