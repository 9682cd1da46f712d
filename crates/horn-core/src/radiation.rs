//! Mouth termination: rigid circular piston in an infinite baffle.

use crate::constants::{area_from_radius, MediumProperties};
use crate::numeric::special::{bessel_j1, struve_h1};
use num_complex::Complex64;

/// Below this argument 2ka the impedance is taken as zero.
const MIN_ARGUMENT: f64 = 1e-12;

/// Radiation impedance (Pa·s/m³) of a baffled piston of `radius` at wave
/// number `k`.
///
/// Z = ρc/(πa²)·[(1 − 2J₁(2ka)/(2ka)) + j·2H₁(2ka)/(2ka)]
pub fn piston_impedance(radius: f64, k: f64, medium: &MediumProperties) -> Complex64 {
    let x = 2.0 * k * radius;
    if x.abs() < MIN_ARGUMENT {
        return Complex64::new(0.0, 0.0);
    }
    let z0 = medium.characteristic_impedance() / area_from_radius(radius);
    let resistance = 1.0 - 2.0 * bessel_j1(x) / x;
    let reactance = 2.0 * struve_h1(x) / x;
    Complex64::new(z0 * resistance, z0 * reactance)
}
