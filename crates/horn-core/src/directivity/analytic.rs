//! Closed-form far-field patterns of baffled circular and rectangular
//! pistons.

use crate::numeric::{jinc, sinc};

/// |2·J₁(ka·sinθ)/(ka·sinθ)| for a piston of radius `a`.
pub fn circular(k: f64, radius: f64, theta: f64) -> f64 {
    jinc(k * radius * theta.sin()).abs()
}

/// |sinc(k·d·sinθ/2)| for a rectangular piston of extent `d` in the plane
/// of observation.
pub fn rectangular(k: f64, extent: f64, theta: f64) -> f64 {
    sinc(0.5 * k * extent * theta.sin()).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circular_first_null() {
        // First zero of J1 at 3.8317: sinθ = 3.8317/(ka).
        let k: f64 = 100.0;
        let a = 0.1;
        let theta = (3.831_705_970_207_512 / (k * a)).asin();
        assert!(circular(k, a, theta) < 1e-6);
        assert_eq!(circular(k, a, 0.0), 1.0);
    }

    #[test]
    fn test_rectangular_first_null() {
        // sinc zero at k·d·sinθ/2 = π.
        let k = 50.0;
        let d = 0.4;
        let theta = (2.0 * std::f64::consts::PI / (k * d)).asin();
        assert!(rectangular(k, d, theta) < 1e-12);
        assert_eq!(rectangular(k, d, 0.0), 1.0);
    }
}
