//! Horn flare profile generators.
//!
//! Each [`ProfileKind`] carries its own parameter record; [`generate`]
//! dispatches on it. Every generator ends in [`finalize`], which clamps
//! radii into `[throat, mouth]`, makes them non-decreasing, and pins both
//! ends exactly.

pub mod area;
pub mod closed_form;
pub mod implicit;
pub mod jmlc;

use crate::constants::{area_from_radius, SPEED_OF_SOUND};
use crate::error::{require_positive, HornError, Result};
use crate::numeric::{interpolate_linear, simpson};
use log::debug;
use serde::{Deserialize, Serialize};

pub use closed_form::{
    ExponentialParams, HyperbolicSpiralParams, HypexParams, NeileParams, OblateSpheroidParams,
    PetfParams,
};
pub use implicit::SphericalParams;
pub use jmlc::JmlcParams;

/// One sample of a profile: axial distance from the throat and wall radius,
/// both in metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfilePoint {
    pub x: f64,
    pub radius: f64,
}

impl ProfilePoint {
    pub fn new(x: f64, radius: f64) -> Self {
        Self { x, radius }
    }
}

/// A throat-to-mouth radius curve with strictly increasing axial positions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    points: Vec<ProfilePoint>,
}

impl Profile {
    /// Build a profile from caller-supplied points.
    ///
    /// Requires at least two points, strictly increasing `x` starting at 0,
    /// and finite positive radii.
    pub fn from_points(points: Vec<ProfilePoint>) -> Result<Self> {
        if points.len() < 2 {
            return Err(HornError::InvalidParameter {
                name: "points",
                value: points.len() as f64,
                reason: "a profile needs at least two points",
            });
        }
        if points[0].x != 0.0 {
            return Err(HornError::InvalidParameter {
                name: "x",
                value: points[0].x,
                reason: "the first point must sit at the throat (x = 0)",
            });
        }
        for p in &points {
            require_positive("radius", p.radius)?;
            if !p.x.is_finite() {
                return Err(HornError::InvalidParameter {
                    name: "x",
                    value: p.x,
                    reason: "must be finite",
                });
            }
        }
        for pair in points.windows(2) {
            if pair[1].x <= pair[0].x {
                return Err(HornError::InvalidParameter {
                    name: "x",
                    value: pair[1].x,
                    reason: "axial positions must be strictly increasing",
                });
            }
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[ProfilePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn throat_radius(&self) -> f64 {
        self.points[0].radius
    }

    pub fn mouth_radius(&self) -> f64 {
        self.points[self.points.len() - 1].radius
    }

    /// Axial length from throat to mouth.
    pub fn length(&self) -> f64 {
        self.points[self.points.len() - 1].x
    }

    /// Radius at axial distance `x`, linearly interpolated and clamped to
    /// the throat/mouth values outside `[0, length]`.
    pub fn radius_at(&self, x: f64) -> f64 {
        let xs: Vec<f64> = self.points.iter().map(|p| p.x).collect();
        let rs: Vec<f64> = self.points.iter().map(|p| p.radius).collect();
        interpolate_linear(&xs, &rs, x)
    }

    /// Cross-sectional area at every point (m²).
    pub fn areas(&self) -> Vec<f64> {
        self.points.iter().map(|p| area_from_radius(p.radius)).collect()
    }

    /// Enclosed air volume (m³), Simpson's rule over the interpolated profile.
    pub fn volume(&self) -> f64 {
        let intervals = 2 * (self.points.len() - 1).max(1);
        simpson(
            |x| area_from_radius(self.radius_at(x)),
            0.0,
            self.length(),
            intervals,
        )
    }

    /// Largest percentage area change between adjacent cross-sections.
    pub fn max_area_drift(&self) -> f64 {
        area::adjacent_area_drifts(self)
            .into_iter()
            .fold(0.0, f64::max)
    }
}

fn default_speed_of_sound() -> f64 {
    SPEED_OF_SOUND
}

/// Geometry shared by every profile kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfileParams {
    /// Throat radius in metres.
    pub throat_radius: f64,
    /// Mouth radius in metres. Optional only for JMLC.
    #[serde(default)]
    pub mouth_radius: Option<f64>,
    /// Axial length in metres. Optional only for JMLC.
    #[serde(default)]
    pub length: Option<f64>,
    /// Number of segments; the profile has `segments + 1` points.
    pub segments: usize,
    /// Speed of sound used to turn cutoff frequencies into flare constants.
    #[serde(default = "default_speed_of_sound")]
    pub speed_of_sound: f64,
}

impl ProfileParams {
    pub fn new(throat_radius: f64, mouth_radius: f64, length: f64, segments: usize) -> Self {
        Self {
            throat_radius,
            mouth_radius: Some(mouth_radius),
            length: Some(length),
            segments,
            speed_of_sound: SPEED_OF_SOUND,
        }
    }

    /// Validate and resolve into a [`Geometry`] that requires both mouth
    /// radius and length.
    pub(crate) fn geometry(&self, profile: &'static str) -> Result<Geometry> {
        self.validate_common()?;
        let mouth_radius = self.mouth_radius.ok_or(HornError::MissingParameter {
            profile,
            name: "mouth_radius",
        })?;
        let length = self.length.ok_or(HornError::MissingParameter {
            profile,
            name: "length",
        })?;
        let mouth_radius = validate_mouth(self.throat_radius, mouth_radius)?;
        let length = require_positive("length", length)?;
        Ok(Geometry {
            throat_radius: self.throat_radius,
            mouth_radius,
            length,
            segments: self.segments,
            speed_of_sound: self.speed_of_sound,
        })
    }

    pub(crate) fn validate_common(&self) -> Result<()> {
        require_positive("throat_radius", self.throat_radius)?;
        require_positive("speed_of_sound", self.speed_of_sound)?;
        if self.segments < 2 {
            return Err(HornError::InvalidParameter {
                name: "segments",
                value: self.segments as f64,
                reason: "at least two segments are required",
            });
        }
        Ok(())
    }
}

pub(crate) fn validate_mouth(throat_radius: f64, mouth_radius: f64) -> Result<f64> {
    require_positive("mouth_radius", mouth_radius)?;
    if mouth_radius < throat_radius {
        return Err(HornError::InvalidParameter {
            name: "mouth_radius",
            value: mouth_radius,
            reason: "must not be smaller than the throat radius",
        });
    }
    Ok(mouth_radius)
}

/// Validated geometry with both ends known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Geometry {
    pub throat_radius: f64,
    pub mouth_radius: f64,
    pub length: f64,
    pub segments: usize,
    pub speed_of_sound: f64,
}

impl Geometry {
    /// Evenly spaced axial samples over `[0, length]`.
    pub fn axial_samples(&self) -> Vec<f64> {
        let n = self.segments as f64;
        (0..=self.segments)
            .map(|i| self.length * i as f64 / n)
            .collect()
    }

    /// Flare constant (1/m) for a cutoff frequency: m = 2πf/c.
    pub fn flare_constant(&self, cutoff_hz: f64) -> f64 {
        2.0 * std::f64::consts::PI * cutoff_hz / self.speed_of_sound
    }
}

/// The closed set of flare laws, each with its own parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProfileKind {
    Conical,
    Exponential(ExponentialParams),
    Hyperbolic,
    Hypex(HypexParams),
    Parabolic,
    Petf(PetfParams),
    Neile(NeileParams),
    HyperbolicSpiral(HyperbolicSpiralParams),
    OblateSpheroid(OblateSpheroidParams),
    Tractrix,
    Spherical(SphericalParams),
    Jmlc(JmlcParams),
}

impl ProfileKind {
    pub fn name(&self) -> &'static str {
        match self {
            ProfileKind::Conical => "conical",
            ProfileKind::Exponential(_) => "exponential",
            ProfileKind::Hyperbolic => "hyperbolic",
            ProfileKind::Hypex(_) => "hypex",
            ProfileKind::Parabolic => "parabolic",
            ProfileKind::Petf(_) => "petf",
            ProfileKind::Neile(_) => "neile",
            ProfileKind::HyperbolicSpiral(_) => "hyperbolic_spiral",
            ProfileKind::OblateSpheroid(_) => "oblate_spheroid",
            ProfileKind::Tractrix => "tractrix",
            ProfileKind::Spherical(_) => "spherical",
            ProfileKind::Jmlc(_) => "jmlc",
        }
    }

    /// Every kind with default parameters.
    pub fn all_with_defaults() -> Vec<ProfileKind> {
        vec![
            ProfileKind::Conical,
            ProfileKind::Exponential(ExponentialParams::default()),
            ProfileKind::Hyperbolic,
            ProfileKind::Hypex(HypexParams::default()),
            ProfileKind::Parabolic,
            ProfileKind::Petf(PetfParams::default()),
            ProfileKind::Neile(NeileParams::default()),
            ProfileKind::HyperbolicSpiral(HyperbolicSpiralParams::default()),
            ProfileKind::OblateSpheroid(OblateSpheroidParams::default()),
            ProfileKind::Tractrix,
            ProfileKind::Spherical(SphericalParams::default()),
            ProfileKind::Jmlc(JmlcParams::default()),
        ]
    }
}

/// Generate the profile for `kind` from `params`.
pub fn generate(kind: &ProfileKind, params: &ProfileParams) -> Result<Profile> {
    let name = kind.name();
    let geometry = || params.geometry(name);
    let profile = match kind {
        ProfileKind::Conical => closed_form::conical(&geometry()?),
        ProfileKind::Exponential(p) => closed_form::exponential(&geometry()?, p)?,
        ProfileKind::Hyperbolic => closed_form::hyperbolic(&geometry()?),
        ProfileKind::Hypex(p) => closed_form::hypex(&geometry()?, p)?,
        ProfileKind::Parabolic => closed_form::parabolic(&geometry()?),
        ProfileKind::Petf(p) => closed_form::petf(&geometry()?, p)?,
        ProfileKind::Neile(p) => closed_form::neile(&geometry()?, p)?,
        ProfileKind::HyperbolicSpiral(p) => closed_form::hyperbolic_spiral(&geometry()?, p)?,
        ProfileKind::OblateSpheroid(p) => closed_form::oblate_spheroid(&geometry()?, p)?,
        ProfileKind::Tractrix => implicit::tractrix(&geometry()?)?,
        ProfileKind::Spherical(p) => implicit::spherical(&geometry()?, p)?,
        ProfileKind::Jmlc(p) => jmlc::generate(params, p)?,
    };
    debug!(
        "generated {name} profile: {} points, length {:.4} m, {:.4} → {:.4} m",
        profile.len(),
        profile.length(),
        profile.throat_radius(),
        profile.mouth_radius()
    );
    Ok(profile)
}

/// Clamp radii into `[throat, mouth]`, force them non-decreasing, pin both
/// ends, and pair them with the axial positions.
pub(crate) fn finalize(xs: &[f64], rs: &[f64], throat_radius: f64, mouth_radius: f64) -> Profile {
    let n = xs.len().min(rs.len());
    let mut points = Vec::with_capacity(n);
    let mut floor = throat_radius;
    for i in 0..n {
        let r = if rs[i].is_nan() { floor } else { rs[i] };
        let r = r.min(mouth_radius).max(throat_radius).max(floor);
        floor = r;
        points.push(ProfilePoint::new(xs[i], r));
    }
    if let Some(first) = points.first_mut() {
        first.radius = throat_radius;
        first.x = 0.0;
    }
    if let Some(last) = points.last_mut() {
        last.radius = mouth_radius;
    }
    Profile { points }
}

/// Affine correction `r' = r0 + (r − r0)·(rm − r0)/(r_end − r0)` so the last
/// sample lands on the mouth. Degrades to a linear ramp when the curve has
/// no usable span.
pub(crate) fn rescale_to_mouth(rs: &mut [f64], throat_radius: f64, mouth_radius: f64) {
    let n = rs.len();
    if n == 0 {
        return;
    }
    let span = rs[n - 1] - throat_radius;
    if !span.is_finite() || span.abs() < 1e-12 {
        let steps = (n - 1).max(1) as f64;
        for (i, r) in rs.iter_mut().enumerate() {
            *r = throat_radius + (mouth_radius - throat_radius) * i as f64 / steps;
        }
        return;
    }
    let scale = (mouth_radius - throat_radius) / span;
    for r in rs.iter_mut() {
        *r = throat_radius + (*r - throat_radius) * scale;
    }
}
