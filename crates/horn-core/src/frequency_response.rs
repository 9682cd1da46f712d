use crate::constants::MediumProperties;
use crate::horn_line::{HornLine, Termination};
use crate::numeric::amplitude_to_db;
use crate::profiles::Profile;
use log::{debug, warn};
use num_complex::Complex64;
use serde::Serialize;
use std::f64::consts::PI;

/// Solver output at one frequency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrequencyResponse {
    /// Frequency in Hz.
    pub frequency: f64,
    /// Matched-termination pressure transfer H = 1/T₁₁.
    pub transfer_function: Complex64,
    /// Impedance at the throat with the mouth load applied (Pa·s/m³).
    pub throat_impedance: Complex64,
    /// 20·log₁₀|H|, floored at −200 dB.
    pub spl_db: f64,
    /// arg(H) in radians, within [−π, π].
    pub phase: f64,
    /// −dφ/dω against the previous record, in milliseconds. Absent for the
    /// first record and whenever the frequency did not increase.
    pub group_delay_ms: Option<f64>,
}

/// Solve the horn described by `profile` at each of `frequencies`, in the
/// given order.
///
/// `medium` defaults to air at 343 m/s and 1.204 kg/m³. `termination`
/// replaces the baffled-piston mouth load when given.
pub fn solve(
    profile: &Profile,
    frequencies: &[f64],
    medium: Option<&MediumProperties>,
    termination: Option<Complex64>,
) -> Vec<FrequencyResponse> {
    let medium = medium.copied().unwrap_or_default();
    let mut line = HornLine::from_profile(profile);
    if let Some(z) = termination {
        line = line.with_termination(Termination::Fixed(z));
    }
    debug!(
        "solving {} segments at {} frequencies (c = {:.2} m/s)",
        line.len(),
        frequencies.len(),
        medium.effective_speed_of_sound()
    );

    let mut results: Vec<FrequencyResponse> = Vec::with_capacity(frequencies.len());
    for &frequency in frequencies {
        let k = medium.wave_number(frequency);
        let total = line.total_transfer_matrix(k, &medium);
        let throat_impedance = total.input_impedance(line.termination.impedance(k, &medium));
        let h = total.pressure_transfer();

        let spl_db = amplitude_to_db(h.norm());
        let phase = h.arg();
        if !spl_db.is_finite() {
            warn!("non-finite SPL at {frequency} Hz (T11 = {})", total.a);
        }

        let group_delay_ms = results
            .last()
            .and_then(|prev| group_delay(prev.frequency, prev.phase, frequency, phase));

        results.push(FrequencyResponse {
            frequency,
            transfer_function: h,
            throat_impedance,
            spl_db,
            phase,
            group_delay_ms,
        });
    }
    results
}

/// −1000·Δφ/(2πΔf), or `None` when Δf ≤ 0.
fn group_delay(f_prev: f64, phase_prev: f64, f: f64, phase: f64) -> Option<f64> {
    let df = f - f_prev;
    if df.is_nan() || df <= 0.0 {
        return None;
    }
    Some(-1000.0 * (phase - phase_prev) / (2.0 * PI * df))
}

/// Evaluate the horn at the `fft_size/2 + 1` bins of a real FFT at
/// `sample_rate`.
///
/// The DC bin is forced to unity transfer.
pub fn sweep_bins(
    profile: &Profile,
    fft_size: usize,
    sample_rate: f64,
    medium: Option<&MediumProperties>,
) -> (Vec<f64>, Vec<Complex64>) {
    let num_bins = fft_size / 2 + 1;
    let bin_width = sample_rate / fft_size as f64;
    let frequencies: Vec<f64> = (0..num_bins).map(|i| i as f64 * bin_width).collect();

    let responses = solve(profile, &frequencies, medium, None);
    let hf = responses
        .iter()
        .map(|r| {
            if r.frequency < 1.0 {
                Complex64::new(1.0, 0.0)
            } else {
                r.transfer_function
            }
        })
        .collect();
    (frequencies, hf)
}
