//! Profiles with an explicit r(x) law.
//!
//! Laws that do not land on the mouth radius by construction are rescaled
//! with [`rescale_to_mouth`] before finalisation.

use super::{finalize, rescale_to_mouth, Geometry, Profile};
use crate::error::{require_positive, HornError, Result};
use serde::{Deserialize, Serialize};

/// Default hypex T-factor.
pub const DEFAULT_T_FACTOR: f64 = 0.707;
/// Default PETF T-factor at the throat.
pub const DEFAULT_PETF_T_THROAT: f64 = 1.0;
/// Default PETF T-factor at the mouth.
pub const DEFAULT_PETF_T_MOUTH: f64 = 0.5;
/// Default Neile exponent (semicubical parabola).
pub const DEFAULT_NEILE_EXPONENT: f64 = 1.5;
/// Default hyperbolic-spiral sweep rate.
pub const DEFAULT_SPIRAL_RATE: f64 = 1.0;
/// Default oblate-spheroid coverage angle in degrees.
pub const DEFAULT_COVERAGE_DEG: f64 = 90.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ExponentialParams {
    /// Flare cutoff in Hz. Without it the flare is fitted to the mouth.
    #[serde(default)]
    pub cutoff_hz: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HypexParams {
    /// Blend between catenoidal (0) and exponential (1) expansion.
    #[serde(default)]
    pub t_factor: Option<f64>,
    #[serde(default)]
    pub cutoff_hz: Option<f64>,
}

impl HypexParams {
    pub fn t_factor(&self) -> f64 {
        self.t_factor.unwrap_or(DEFAULT_T_FACTOR)
    }
}

/// Progressive-expansion T-factor: hypex with T varying along the axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PetfParams {
    #[serde(default)]
    pub t_throat: Option<f64>,
    #[serde(default)]
    pub t_mouth: Option<f64>,
    #[serde(default)]
    pub cutoff_hz: Option<f64>,
}

impl PetfParams {
    pub fn t_throat(&self) -> f64 {
        self.t_throat.unwrap_or(DEFAULT_PETF_T_THROAT)
    }

    pub fn t_mouth(&self) -> f64 {
        self.t_mouth.unwrap_or(DEFAULT_PETF_T_MOUTH)
    }
}

/// Neile parabola family: r − r0 ∝ x^p.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NeileParams {
    #[serde(default)]
    pub exponent: Option<f64>,
}

impl NeileParams {
    pub fn exponent(&self) -> f64 {
        self.exponent.unwrap_or(DEFAULT_NEILE_EXPONENT)
    }
}

/// Radius inversely proportional to a spiral angle swept along the axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HyperbolicSpiralParams {
    #[serde(default)]
    pub rate: Option<f64>,
}

impl HyperbolicSpiralParams {
    pub fn rate(&self) -> f64 {
        self.rate.unwrap_or(DEFAULT_SPIRAL_RATE)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OblateSpheroidParams {
    /// Full coverage angle in degrees; the wall tends to half of it.
    #[serde(default)]
    pub coverage_deg: Option<f64>,
    /// Wall angle at the throat in degrees.
    #[serde(default)]
    pub throat_angle_deg: Option<f64>,
}

impl OblateSpheroidParams {
    pub fn coverage_deg(&self) -> f64 {
        self.coverage_deg.unwrap_or(DEFAULT_COVERAGE_DEG)
    }

    pub fn throat_angle_deg(&self) -> f64 {
        self.throat_angle_deg.unwrap_or(0.0)
    }
}

fn sample<F>(g: &Geometry, law: F, rescale: bool) -> Profile
where
    F: Fn(f64) -> f64,
{
    let xs = g.axial_samples();
    let mut rs: Vec<f64> = xs.iter().map(|&x| law(x)).collect();
    if rescale {
        rescale_to_mouth(&mut rs, g.throat_radius, g.mouth_radius);
    }
    finalize(&xs, &rs, g.throat_radius, g.mouth_radius)
}

fn require_non_negative(name: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(HornError::InvalidParameter {
            name,
            value,
            reason: "must be finite and non-negative",
        });
    }
    Ok(value)
}

/// Flare constant from an optional cutoff, else the exponential fit
/// ln(rm/r0)/L.
fn flare_constant(g: &Geometry, cutoff_hz: Option<f64>) -> Result<f64> {
    match cutoff_hz {
        Some(fc) => Ok(g.flare_constant(require_positive("cutoff_hz", fc)?)),
        None => Ok((g.mouth_radius / g.throat_radius).ln() / g.length),
    }
}

pub(crate) fn conical(g: &Geometry) -> Profile {
    let slope = (g.mouth_radius - g.throat_radius) / g.length;
    sample(g, |x| g.throat_radius + slope * x, false)
}

pub(crate) fn exponential(g: &Geometry, p: &ExponentialParams) -> Result<Profile> {
    let m = flare_constant(g, p.cutoff_hz)?;
    Ok(sample(
        g,
        |x| g.throat_radius * (m * x).exp(),
        p.cutoff_hz.is_some(),
    ))
}

pub(crate) fn hyperbolic(g: &Geometry) -> Profile {
    let m = (g.mouth_radius / g.throat_radius).acosh() / g.length;
    sample(g, |x| g.throat_radius * (m * x).cosh(), false)
}

pub(crate) fn hypex(g: &Geometry, p: &HypexParams) -> Result<Profile> {
    let t = require_non_negative("t_factor", p.t_factor())?;
    let m = flare_constant(g, p.cutoff_hz)?;
    Ok(sample(
        g,
        |x| g.throat_radius * ((m * x).cosh() + t * (m * x).sinh()),
        true,
    ))
}

pub(crate) fn parabolic(g: &Geometry) -> Profile {
    let r0_sq = g.throat_radius * g.throat_radius;
    let growth = (g.mouth_radius * g.mouth_radius - r0_sq) / g.length;
    sample(g, |x| (r0_sq + growth * x).sqrt(), false)
}

pub(crate) fn petf(g: &Geometry, p: &PetfParams) -> Result<Profile> {
    let t0 = require_non_negative("t_throat", p.t_throat())?;
    let t1 = require_non_negative("t_mouth", p.t_mouth())?;
    let m = flare_constant(g, p.cutoff_hz)?;
    Ok(sample(
        g,
        |x| {
            let t = t0 + (t1 - t0) * x / g.length;
            g.throat_radius * ((m * x).cosh() + t * (m * x).sinh())
        },
        true,
    ))
}

pub(crate) fn neile(g: &Geometry, p: &NeileParams) -> Result<Profile> {
    let exponent = require_positive("exponent", p.exponent())?;
    let span = g.mouth_radius - g.throat_radius;
    Ok(sample(
        g,
        |x| g.throat_radius + span * (x / g.length).powf(exponent),
        false,
    ))
}

pub(crate) fn hyperbolic_spiral(g: &Geometry, p: &HyperbolicSpiralParams) -> Result<Profile> {
    let rate = require_positive("rate", p.rate())?;
    // r = a/θ with θ swept from θ0 at the throat to θ0·r0/rm at the mouth.
    let closure = 1.0 - g.throat_radius / g.mouth_radius;
    Ok(sample(
        g,
        |x| g.throat_radius / (1.0 - closure * (x / g.length).powf(rate)),
        false,
    ))
}

pub(crate) fn oblate_spheroid(g: &Geometry, p: &OblateSpheroidParams) -> Result<Profile> {
    let coverage = p.coverage_deg();
    if !(coverage > 0.0 && coverage < 180.0) {
        return Err(HornError::InvalidParameter {
            name: "coverage_deg",
            value: coverage,
            reason: "must lie in (0, 180)",
        });
    }
    let throat_angle = p.throat_angle_deg();
    if !(0.0..90.0).contains(&throat_angle) {
        return Err(HornError::InvalidParameter {
            name: "throat_angle_deg",
            value: throat_angle,
            reason: "must lie in [0, 90)",
        });
    }
    let tan_mouth = (0.5 * coverage).to_radians().tan();
    let tan_throat = throat_angle.to_radians().tan();
    let r0 = g.throat_radius;
    Ok(sample(
        g,
        |x| (r0 * r0 + 2.0 * r0 * x * tan_throat + x * x * tan_mouth * tan_mouth).sqrt(),
        true,
    ))
}
