//! CLI report for a horn design.
//!
//! Generates every profile kind for one geometry, solves the transmission
//! line of a hypex horn across a few frequencies, and prints the mouth
//! beamwidth at each of them.
//!
//! Run with:
//!   RUST_LOG=debug cargo run -p horn-core --example horn_report

use horn_core::{
    analyze, compute_beamwidth, generate_profile, HornDesign, ImpulseResponse, MediumProperties,
    Plane, ProfileKind, ProfileParams,
};

fn main() -> horn_core::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("=== Horn Report ===");

    // 1. Every profile kind on the same geometry.
    let geometry = ProfileParams::new(0.025, 0.175, 0.35, 40);
    println!(
        "Geometry: throat {:.1} mm, mouth {:.1} mm, length {:.1} mm, {} segments",
        geometry.throat_radius * 1e3,
        geometry.mouth_radius.unwrap_or_default() * 1e3,
        geometry.length.unwrap_or_default() * 1e3,
        geometry.segments
    );
    for kind in ProfileKind::all_with_defaults() {
        match generate_profile(&kind, &geometry) {
            Ok(profile) => println!(
                "  {:<18} length {:6.1} mm  volume {:7.3} L  max area step {:5.1} %",
                kind.name(),
                profile.length() * 1e3,
                profile.volume() * 1e3,
                profile.max_area_drift()
            ),
            Err(e) => println!("  {:<18} failed: {e}", kind.name()),
        }
    }

    // 2. Full analysis of one design.
    let design = HornDesign {
        profile: ProfileKind::Hypex(Default::default()),
        geometry,
        medium: MediumProperties::from_temperature(20.0),
        aperture: None,
        angle_step_deg: 2.5,
    };
    let frequencies = [250.0, 500.0, 1000.0, 2000.0, 4000.0, 8000.0];
    let analysis = analyze(&design, &frequencies)?;

    println!();
    println!("{:>8}  {:>9}  {:>8}  {:>10}  {:>8}  {:>8}", "f (Hz)", "SPL (dB)", "phase", "GD (ms)", "-3 dB", "-6 dB");
    for (r, pattern) in analysis.response.iter().zip(&analysis.polar_patterns) {
        let bw = compute_beamwidth(pattern.plane(Plane::Azimuth));
        let gd = r
            .group_delay_ms
            .map_or_else(|| "-".to_string(), |gd| format!("{gd:.3}"));
        println!(
            "{:>8.0}  {:>9.2}  {:>8.3}  {:>10}  {:>7.1}°  {:>7.1}°",
            r.frequency, r.spl_db, r.phase, gd, bw.minus_3db, bw.minus_6db
        );
    }

    // 3. Impulse response of the same horn.
    let ir = ImpulseResponse::from_profile(&analysis.profile, 4096, 48_000.0, Some(&design.medium))?;
    if let Some((index, value)) = ir.peak() {
        println!();
        println!(
            "Impulse response: {} samples ({:.1} ms), peak {value:.4} at sample {index}",
            ir.samples.len(),
            ir.duration() * 1e3
        );
    }

    println!("Done.");
    Ok(())
}
