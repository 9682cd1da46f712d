//! Profiles defined through an auxiliary constant found numerically.

use super::{finalize, rescale_to_mouth, Geometry, Profile};
use crate::error::{HornError, Result};
use crate::numeric::roots::{expand_upper_bracket, solve_bracketed, DEFAULT_MAX_ITER};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

const SOLVER_TOLERANCE: f64 = 1e-12;
const BRACKET_GROWTH: f64 = 2.0;
const BRACKET_TRIES: usize = 60;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SphericalParams {
    /// Wall angle at the throat in degrees, measured from the axis.
    #[serde(default)]
    pub throat_angle_deg: Option<f64>,
}

impl SphericalParams {
    pub fn throat_angle_deg(&self) -> f64 {
        self.throat_angle_deg.unwrap_or(0.0)
    }
}

/// Axial coordinate of a tractrix with asymptote `a`, measured back from the
/// point where the wall turns perpendicular to the axis (r = a).
fn tractrix_x(a: f64, r: f64) -> f64 {
    let s = (a * a - r * r).max(0.0).sqrt();
    a * ((a + s) / r).ln() - s
}

/// Constant-radius profile for a throat and mouth of equal size.
fn straight_tube(g: &Geometry) -> Profile {
    let xs = g.axial_samples();
    let rs = vec![g.throat_radius; xs.len()];
    finalize(&xs, &rs, g.throat_radius, g.mouth_radius)
}

pub(crate) fn tractrix(g: &Geometry) -> Result<Profile> {
    let (r0, rm) = (g.throat_radius, g.mouth_radius);
    // No flare means no asymptote to solve for.
    if rm <= r0 {
        return Ok(straight_tube(g));
    }
    let span = |a: f64| tractrix_x(a, r0) - tractrix_x(a, rm);

    let natural = span(rm);
    let (a, axial_scale) = if g.length < natural {
        warn!(
            "tractrix: length {:.4} m is shorter than the natural length {natural:.4} m, compressing the axis",
            g.length
        );
        (rm, natural / g.length)
    } else {
        let target = |a: f64| span(a) - g.length;
        let (lo, hi) = expand_upper_bracket(target, rm, 2.0 * rm, BRACKET_GROWTH, BRACKET_TRIES)?;
        let a = solve_bracketed(target, lo, hi, SOLVER_TOLERANCE, DEFAULT_MAX_ITER)?;
        (a, 1.0)
    };
    debug!("tractrix asymptote a = {a:.6} m");

    let x0 = tractrix_x(a, r0);
    let xs = g.axial_samples();
    let mut rs = Vec::with_capacity(xs.len());
    for &x in &xs {
        let target = x * axial_scale;
        // x0 − X_a(r) grows with r, so the root lies in [r0, rm].
        let r = if target <= 0.0 {
            r0
        } else {
            match solve_bracketed(
                |r| x0 - tractrix_x(a, r) - target,
                r0,
                rm,
                SOLVER_TOLERANCE,
                DEFAULT_MAX_ITER,
            ) {
                Ok(r) => r,
                Err(HornError::UnbracketedRoot { .. }) => rm,
                Err(e) => return Err(e),
            }
        };
        rs.push(r);
    }
    Ok(finalize(&xs, &rs, r0, rm))
}

pub(crate) fn spherical(g: &Geometry, p: &SphericalParams) -> Result<Profile> {
    let (r0, rm, length) = (g.throat_radius, g.mouth_radius, g.length);
    let theta_deg = p.throat_angle_deg();
    let limit = ((rm - r0) / length).atan();
    let theta = theta_deg.to_radians();
    if rm <= r0 && theta == 0.0 {
        return Ok(straight_tube(g));
    }
    if !theta_deg.is_finite() || theta < 0.0 || theta >= limit {
        return Err(HornError::InvalidParameter {
            name: "throat_angle_deg",
            value: theta_deg,
            reason: "must be non-negative and below atan((mouth - throat) / length)",
        });
    }
    let (sin_t, cos_t) = theta.sin_cos();

    // Wall radius of the arc with sphere radius `big_r` at axial distance x.
    let arc = move |big_r: f64, x: f64| {
        let dx = x + big_r * sin_t;
        r0 + big_r * cos_t - (big_r * big_r - dx * dx).max(0.0).sqrt()
    };

    let r_min = length / (1.0 - sin_t);
    let miss = |big_r: f64| arc(big_r, length) - rm;

    let (big_r, rescale) = if miss(r_min) < 0.0 {
        warn!("spherical: no arc reaches the mouth radius, using the minimal arc R = {r_min:.4} m");
        (r_min, true)
    } else {
        let (lo, hi) = expand_upper_bracket(miss, r_min, 2.0 * r_min, BRACKET_GROWTH, BRACKET_TRIES)?;
        (solve_bracketed(miss, lo, hi, SOLVER_TOLERANCE, DEFAULT_MAX_ITER)?, false)
    };
    debug!("spherical arc radius R = {big_r:.6} m");

    let xs = g.axial_samples();
    let mut rs: Vec<f64> = xs.iter().map(|&x| arc(big_r, x)).collect();
    if rescale {
        rescale_to_mouth(&mut rs, r0, rm);
    }
    Ok(finalize(&xs, &rs, r0, rm))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(length: f64) -> Geometry {
        Geometry {
            throat_radius: 0.025,
            mouth_radius: 0.175,
            length,
            segments: 40,
            speed_of_sound: 343.0,
        }
    }

    fn assert_well_formed(profile: &Profile, g: &Geometry) {
        let pts = profile.points();
        assert_eq!(pts.len(), g.segments + 1);
        assert_eq!(pts[0].radius, g.throat_radius);
        assert_eq!(pts[g.segments].radius, g.mouth_radius);
        for pair in pts.windows(2) {
            assert!(pair[1].x > pair[0].x);
            assert!(pair[1].radius >= pair[0].radius, "{pair:?}");
        }
    }

    #[test]
    fn test_tractrix_natural_length() {
        let natural = tractrix_x(0.175, 0.025) - tractrix_x(0.175, 0.175);
        assert!((natural - 0.287_730_183).abs() < 1e-6, "natural = {natural}");
    }

    #[test]
    fn test_tractrix_longer_than_natural() {
        let g = geometry(0.4);
        let profile = tractrix(&g).unwrap();
        assert_well_formed(&profile, &g);
    }

    #[test]
    fn test_tractrix_shorter_than_natural_compresses() {
        let g = geometry(0.2);
        let profile = tractrix(&g).unwrap();
        assert_well_formed(&profile, &g);
        assert!((profile.length() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_tractrix_inverts_the_curve() {
        let g = geometry(0.4);
        let profile = tractrix(&g).unwrap();
        // The wall turns towards perpendicular as r approaches a.
        let pts = profile.points();
        let early = pts[2].radius - pts[1].radius;
        let late = pts[g.segments].radius - pts[g.segments - 1].radius;
        assert!(late > early, "tractrix should open up towards the mouth");
    }

    #[test]
    fn test_spherical_passes_through_mouth() {
        let g = geometry(0.3);
        let profile = spherical(&g, &SphericalParams::default()).unwrap();
        assert_well_formed(&profile, &g);
        // The arc is convex: slope increases along the axis.
        let pts = profile.points();
        let first = pts[1].radius - pts[0].radius;
        let last = pts[g.segments - 1].radius - pts[g.segments - 2].radius;
        assert!(last > first);
    }

    #[test]
    fn test_spherical_with_throat_angle() {
        let g = geometry(0.3);
        let p = SphericalParams {
            throat_angle_deg: Some(10.0),
        };
        let profile = spherical(&g, &p).unwrap();
        assert_well_formed(&profile, &g);
        // The initial slope follows the throat angle.
        let pts = profile.points();
        let slope = (pts[1].radius - pts[0].radius) / (pts[1].x - pts[0].x);
        assert!(slope > 10f64.to_radians().tan() * 0.95, "slope {slope}");
    }

    #[test]
    fn test_spherical_minimal_arc_fallback() {
        // The minimal arc (R = L) ends at r0 + L, short of this mouth.
        let g = Geometry {
            throat_radius: 0.025,
            mouth_radius: 2.0,
            length: 0.5,
            segments: 20,
            speed_of_sound: 343.0,
        };
        let profile = spherical(&g, &SphericalParams::default()).unwrap();
        assert_well_formed(&profile, &g);
    }

    #[test]
    fn test_equal_radii_give_a_straight_tube() {
        let g = Geometry {
            mouth_radius: 0.025,
            ..geometry(0.3)
        };
        for profile in [
            tractrix(&g).unwrap(),
            spherical(&g, &SphericalParams::default()).unwrap(),
        ] {
            assert_well_formed(&profile, &g);
            assert!(profile.points().iter().all(|p| p.radius == 0.025));
            assert!((profile.length() - 0.3).abs() < 1e-12);
        }
        // A flared throat cannot close back onto the same radius.
        let p = SphericalParams {
            throat_angle_deg: Some(5.0),
        };
        assert!(spherical(&g, &p).unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_spherical_rejects_steep_throat_angle() {
        let g = geometry(0.3);
        let p = SphericalParams {
            throat_angle_deg: Some(40.0),
        };
        let err = spherical(&g, &p).unwrap_err();
        assert!(err.is_invalid_input());
    }
}
