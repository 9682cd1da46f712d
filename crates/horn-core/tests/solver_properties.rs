//! Transmission-line, numeric and directivity properties across modules.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use horn_core::numeric::{fft, ifft, pad_to_power_of_two};
use horn_core::profiles::area::calculate_area_drift;
use horn_core::{
    compute_beamwidth, compute_polar_pattern, generate_profile, impulse_response,
    solve_transmission_line, ApertureSpec, HornError, ImpulseResponse, MediumProperties, Plane,
    ProfileKind, ProfileParams,
};
use num_complex::Complex64;
use std::f64::consts::PI;

#[test]
fn test_conical_reference_horn() {
    let profile = generate_profile(&ProfileKind::Conical, &ProfileParams::new(0.025, 0.175, 0.3, 6)).unwrap();
    let frequencies: Vec<f64> = (1..=40).map(|i| 50.0 * i as f64).collect();
    let responses = solve_transmission_line(&profile, &frequencies, None, None);
    assert_eq!(responses.len(), frequencies.len());

    let at_1k = responses.iter().find(|r| r.frequency == 1000.0).unwrap();
    assert!(at_1k.spl_db.is_finite());
    assert!(at_1k.spl_db > -60.0 && at_1k.spl_db < 20.0);

    for (i, r) in responses.iter().enumerate() {
        assert!(r.phase >= -PI && r.phase <= PI, "phase {} at {} Hz", r.phase, r.frequency);
        if i == 0 {
            assert!(r.group_delay_ms.is_none());
        } else {
            assert!(r.group_delay_ms.is_some(), "missing group delay at {} Hz", r.frequency);
        }
    }
}

#[test]
fn test_warmer_air_shifts_the_response() {
    let profile = generate_profile(&ProfileKind::Conical, &ProfileParams::new(0.025, 0.175, 0.3, 6)).unwrap();
    let cold = MediumProperties::from_temperature(0.0);
    let hot = MediumProperties::from_temperature(40.0);
    let a = solve_transmission_line(&profile, &[1500.0], Some(&cold), None)[0];
    let b = solve_transmission_line(&profile, &[1500.0], Some(&hot), None)[0];
    assert!((a.spl_db - b.spl_db).abs() > 1e-6);
}

#[test]
fn test_impulse_response_from_horn_sweep() {
    let profile = generate_profile(&ProfileKind::Parabolic, &ProfileParams::new(0.025, 0.175, 0.3, 30)).unwrap();
    let fft_size = 1024;
    let (_, hf) = horn_core::frequency_response::sweep_bins(&profile, fft_size, 48_000.0, None);
    let ir = impulse_response::compute(&hf, fft_size).unwrap();
    assert_eq!(ir.len(), fft_size / 2);
    assert!(ir.iter().all(|s| s.is_finite()));

    let response = ImpulseResponse::from_profile(&profile, fft_size, 48_000.0, None).unwrap();
    assert_eq!(response.samples, ir);
    assert_eq!(response.sample_rate, 48_000.0);
}

#[test]
fn test_fft_round_trip_after_padding() {
    let data: Vec<Complex64> = (0..100)
        .map(|i| Complex64::new((i as f64 * 0.37).sin(), (i as f64 * 0.11).cos()))
        .collect();
    let padded = pad_to_power_of_two(&data, Complex64::new(0.0, 0.0));
    assert_eq!(padded.len(), 128);
    let back = ifft(&fft(&padded).unwrap()).unwrap();
    for (a, b) in padded.iter().zip(&back) {
        assert_abs_diff_eq!(a.re, b.re, epsilon = 1e-12);
        assert_abs_diff_eq!(a.im, b.im, epsilon = 1e-12);
    }
    assert_eq!(fft(&data).unwrap_err(), HornError::NotPowerOfTwo { len: 100 });
}

#[test]
fn test_area_drift() {
    assert_relative_eq!(calculate_area_drift(100.0, 105.0), 5.0, epsilon = 1e-12);
    assert_eq!(calculate_area_drift(100.0, 100.0), 0.0);
}

#[test]
fn test_circular_directivity_properties() {
    for (diameter, f) in [(0.1, 500.0), (0.35, 2000.0), (0.6, 12_000.0)] {
        let pattern = compute_polar_pattern(&ApertureSpec::circle(diameter), f, 2.0).unwrap();
        let boresight = pattern.azimuth.iter().find(|r| r.angle_deg == 0.0).unwrap();
        assert_eq!(boresight.magnitude, 1.0);
        assert_eq!(boresight.db, 0.0);
        let n = pattern.azimuth.len();
        for i in 0..n {
            assert_abs_diff_eq!(
                pattern.azimuth[i].magnitude,
                pattern.azimuth[n - 1 - i].magnitude,
                epsilon = 1e-12
            );
            assert!(pattern.azimuth[i].db >= -200.0);
        }
    }
}

#[test]
fn test_rectangular_boresight_is_unity() {
    for (w, h, f) in [(0.1, 0.05, 300.0), (0.5, 0.2, 5000.0), (1.2, 0.8, 16_000.0)] {
        let pattern = compute_polar_pattern(&ApertureSpec::rectangle(w, h), f, 30.0).unwrap();
        for plane in [Plane::Azimuth, Plane::Elevation] {
            let on_axis = pattern
                .plane(plane)
                .iter()
                .find(|r| r.angle_deg == 0.0)
                .unwrap();
            assert_eq!(on_axis.magnitude, 1.0);
        }
    }
}

#[test]
fn test_beamwidth_narrows_with_frequency() {
    let spec = ApertureSpec::circle(0.3);
    let low = compute_polar_pattern(&spec, 2000.0, 1.0).unwrap();
    let high = compute_polar_pattern(&spec, 8000.0, 1.0).unwrap();
    let bw_low = compute_beamwidth(&low.azimuth);
    let bw_high = compute_beamwidth(&high.azimuth);
    assert!(bw_low.minus_6db > bw_high.minus_6db, "{bw_low:?} vs {bw_high:?}");
    assert!(bw_high.minus_3db > 0.0);
}
