//! Le Cléac'h style profile: the wall is traced so that a spherical
//! wavefront cap at every point has the area of a hypex expansion.

use super::{finalize, rescale_to_mouth, validate_mouth, Profile, ProfileParams};
use crate::error::{require_positive, HornError, Result};
use crate::numeric::ode::heun_step;
use crate::numeric::roots::{expand_upper_bracket, solve_bracketed, DEFAULT_MAX_ITER};
use log::debug;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

pub const DEFAULT_T_FACTOR: f64 = 0.64;
pub const DEFAULT_CUTOFF_HZ: f64 = 400.0;
pub const DEFAULT_MOUTH_ANGLE_DEG: f64 = 90.0;

/// Heun steps per output segment.
const SUBSTEPS: usize = 8;
const SHOOT_TOLERANCE: f64 = 1e-10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct JmlcParams {
    #[serde(default)]
    pub t_factor: Option<f64>,
    #[serde(default)]
    pub cutoff_hz: Option<f64>,
    /// Wavefront angle at the mouth in degrees, in (0, 90].
    #[serde(default)]
    pub mouth_angle_deg: Option<f64>,
}

impl JmlcParams {
    pub fn t_factor(&self) -> f64 {
        self.t_factor.unwrap_or(DEFAULT_T_FACTOR)
    }

    pub fn cutoff_hz(&self) -> f64 {
        self.cutoff_hz.unwrap_or(DEFAULT_CUTOFF_HZ)
    }

    pub fn mouth_angle_deg(&self) -> f64 {
        self.mouth_angle_deg.unwrap_or(DEFAULT_MOUTH_ANGLE_DEG)
    }
}

/// Wall trajectory parameterised by path length along the wall.
struct Trajectory {
    throat_area: f64,
    flare: f64,
    t_factor: f64,
}

/// End state of an integration: axial position, radius, wavefront angle.
#[derive(Debug, Clone, Copy)]
struct Endpoint {
    x: f64,
    radius: f64,
    angle: f64,
}

impl Trajectory {
    fn wavefront_area(&self, s: f64) -> f64 {
        let ms = self.flare * s;
        let g = ms.cosh() + self.t_factor * ms.sinh();
        self.throat_area * g * g
    }

    /// Half-angle of the spherical cap of area A(s) bounded by a wall of
    /// radius `r`.
    fn angle(&self, r: f64, s: f64) -> f64 {
        let cos_phi = 2.0 * PI * r * r / self.wavefront_area(s) - 1.0;
        cos_phi.clamp(-1.0, 1.0).acos()
    }

    /// Integrate over `[0, path_length]` in `steps` Heun steps, calling
    /// `visit` after each one with the step index and the (x, r) state.
    fn integrate<V>(&self, r0: f64, path_length: f64, steps: usize, mut visit: V) -> Endpoint
    where
        V: FnMut(usize, f64, f64),
    {
        let rhs = |s: f64, y: &[f64; 2]| {
            let phi = self.angle(y[1], s);
            [phi.cos(), phi.sin()]
        };
        let h = path_length / steps as f64;
        let mut y = [0.0, r0];
        for i in 0..steps {
            y = heun_step(&rhs, i as f64 * h, &y, h);
            visit(i + 1, y[0], y[1]);
        }
        Endpoint {
            x: y[0],
            radius: y[1],
            angle: self.angle(y[1], path_length),
        }
    }

    fn endpoint(&self, r0: f64, path_length: f64, steps: usize) -> Endpoint {
        self.integrate(r0, path_length, steps, |_, _, _| {})
    }
}

/// Path length at which the wavefront angle reaches `target` radians.
fn path_length_for_angle(
    trajectory: &Trajectory,
    r0: f64,
    target: f64,
    steps: usize,
    initial: f64,
) -> Result<f64> {
    let miss = |s: f64| {
        if s <= 0.0 {
            -target
        } else {
            trajectory.endpoint(r0, s, steps).angle - target
        }
    };
    let (lo, hi) = expand_upper_bracket(miss, 0.0, initial, 2.0, 40)?;
    solve_bracketed(miss, lo, hi, SHOOT_TOLERANCE, DEFAULT_MAX_ITER)
}

pub(crate) fn generate(params: &ProfileParams, p: &JmlcParams) -> Result<Profile> {
    params.validate_common()?;
    if params.mouth_radius.is_none() && params.length.is_none() {
        return Err(HornError::MissingParameter {
            profile: "jmlc",
            name: "mouth_radius or length",
        });
    }
    let r0 = params.throat_radius;
    let mouth_radius = params
        .mouth_radius
        .map(|rm| validate_mouth(r0, rm))
        .transpose()?;
    let length = params
        .length
        .map(|l| require_positive("length", l))
        .transpose()?;

    let t_factor = p.t_factor();
    if !t_factor.is_finite() || t_factor < 0.0 {
        return Err(HornError::InvalidParameter {
            name: "t_factor",
            value: t_factor,
            reason: "must be finite and non-negative",
        });
    }
    let cutoff = require_positive("cutoff_hz", p.cutoff_hz())?;
    let mouth_angle = p.mouth_angle_deg();
    if !(mouth_angle > 0.0 && mouth_angle <= 90.0) {
        return Err(HornError::InvalidParameter {
            name: "mouth_angle_deg",
            value: mouth_angle,
            reason: "must lie in (0, 90]",
        });
    }

    let flare = 2.0 * PI * cutoff / params.speed_of_sound;
    let trajectory = Trajectory {
        throat_area: PI * r0 * r0,
        flare,
        t_factor,
    };
    let steps = params.segments * SUBSTEPS;

    let angle_limit = path_length_for_angle(&trajectory, r0, mouth_angle.to_radians(), steps, 1.0 / flare)?;
    let path_length = match length {
        None => angle_limit,
        Some(target) => {
            let reach = trajectory.endpoint(r0, angle_limit, steps).x;
            if reach < target {
                return Err(HornError::InvalidParameter {
                    name: "length",
                    value: target,
                    reason: "the wall reaches the mouth angle before this axial length",
                });
            }
            let miss = |s: f64| {
                if s <= 0.0 {
                    -target
                } else {
                    trajectory.endpoint(r0, s, steps).x - target
                }
            };
            solve_bracketed(miss, 0.0, angle_limit, SHOOT_TOLERANCE, DEFAULT_MAX_ITER)?
        }
    };
    debug!("jmlc: flare {flare:.4} 1/m, wall path length {path_length:.5} m");

    let mut xs = Vec::with_capacity(params.segments + 1);
    let mut rs = Vec::with_capacity(params.segments + 1);
    xs.push(0.0);
    rs.push(r0);
    let end = trajectory.integrate(r0, path_length, steps, |i, x, r| {
        if i % SUBSTEPS == 0 {
            xs.push(x);
            rs.push(r);
        }
    });

    let mouth = match mouth_radius {
        Some(rm) => {
            rescale_to_mouth(&mut rs, r0, rm);
            rm
        }
        None => end.radius.max(r0),
    };
    Ok(finalize(&xs, &rs, r0, mouth))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(mouth: Option<f64>, length: Option<f64>) -> ProfileParams {
        ProfileParams {
            throat_radius: 0.025,
            mouth_radius: mouth,
            length,
            segments: 40,
            speed_of_sound: 343.0,
        }
    }

    #[test]
    fn test_wavefront_angle_starts_flat() {
        let t = Trajectory {
            throat_area: PI * 0.025 * 0.025,
            flare: 7.0,
            t_factor: 0.64,
        };
        assert!(t.angle(0.025, 0.0).abs() < 1e-7);
        assert!(t.angle(0.025, 0.1) > 0.0);
    }

    #[test]
    fn test_shoots_to_mouth_angle() {
        let profile = generate(&params(Some(0.2), None), &JmlcParams::default()).unwrap();
        assert_eq!(profile.len(), 41);
        assert_eq!(profile.throat_radius(), 0.025);
        assert_eq!(profile.mouth_radius(), 0.2);
        // Natural length for fc = 400 Hz, T = 0.64 is about 0.275 m.
        let length = profile.length();
        assert!((length - 0.275).abs() < 0.01, "length = {length}");
        for pair in profile.points().windows(2) {
            assert!(pair[1].x > pair[0].x);
            assert!(pair[1].radius >= pair[0].radius);
        }
    }

    #[test]
    fn test_natural_mouth_when_only_length_given() {
        let profile = generate(&params(None, Some(0.2)), &JmlcParams::default()).unwrap();
        assert!((profile.length() - 0.2).abs() < 1e-6, "length = {}", profile.length());
        assert!(profile.mouth_radius() > 0.025);
    }

    #[test]
    fn test_unreachable_length_is_an_error() {
        let err = generate(&params(Some(0.2), Some(0.5)), &JmlcParams::default()).unwrap_err();
        assert!(matches!(err, HornError::InvalidParameter { name: "length", .. }));
    }

    #[test]
    fn test_requires_mouth_or_length() {
        let err = generate(&params(None, None), &JmlcParams::default()).unwrap_err();
        assert!(matches!(err, HornError::MissingParameter { profile: "jmlc", .. }));
    }

    #[test]
    fn test_rejects_bad_mouth_angle() {
        let p = JmlcParams {
            mouth_angle_deg: Some(120.0),
            ..Default::default()
        };
        assert!(generate(&params(Some(0.2), None), &p).is_err());
    }

    #[test]
    fn test_lower_cutoff_gives_longer_horn() {
        let low = JmlcParams {
            cutoff_hz: Some(250.0),
            ..Default::default()
        };
        let long = generate(&params(Some(0.3), None), &low).unwrap();
        let short = generate(&params(Some(0.3), None), &JmlcParams::default()).unwrap();
        assert!(long.length() > short.length());
    }
}
