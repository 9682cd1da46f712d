//! Far-field directivity of a baffled aperture.
//!
//! Circles and rectangles use their closed-form patterns. Ellipses and
//! superellipses are integrated over a sampled aperture mask; masks are
//! cached per engine because they do not depend on angle or frequency.
//! Angles are in degrees off-axis, signed, and every magnitude is
//! normalised so boresight is 1.

pub mod analytic;
pub mod aperture;
pub mod mask;

pub use aperture::{ApertureShape, ApertureSpec, DEFAULT_SUPERELLIPSE_EXPONENT};
pub use mask::ApertureMask;

use crate::constants::MediumProperties;
use crate::error::{require_positive, HornError, Result};
use crate::numeric::amplitude_to_db;
use log::debug;
use mask::{MaskKey, ELLIPSE_GRID, SUPERELLIPSE_GRID};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Finest polar sweep resolution accepted, in degrees.
pub const MIN_ANGLE_STEP_DEG: f64 = 1e-3;

/// Plane of observation: azimuth varies across the aperture width,
/// elevation across its height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Plane {
    Azimuth,
    Elevation,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DirectivityResult {
    pub angle_deg: f64,
    /// Linear magnitude relative to boresight.
    pub magnitude: f64,
    /// 20·log₁₀(magnitude), floored at −200 dB.
    pub db: f64,
}

impl DirectivityResult {
    pub fn new(angle_deg: f64, magnitude: f64) -> Self {
        Self {
            angle_deg,
            magnitude,
            db: amplitude_to_db(magnitude),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolarPattern {
    pub frequency: f64,
    pub azimuth: Vec<DirectivityResult>,
    pub elevation: Vec<DirectivityResult>,
}

impl PolarPattern {
    pub fn plane(&self, plane: Plane) -> &[DirectivityResult] {
        match plane {
            Plane::Azimuth => &self.azimuth,
            Plane::Elevation => &self.elevation,
        }
    }
}

/// Full −3 dB and −6 dB widths in degrees. Zero means the threshold was
/// never crossed within the pattern.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Beamwidth {
    pub minus_3db: f64,
    pub minus_6db: f64,
}

/// Evaluates directivity patterns and keeps the sampled masks of the
/// apertures it has seen.
#[derive(Debug, Default)]
pub struct DirectivityEngine {
    medium: MediumProperties,
    masks: HashMap<MaskKey, Arc<ApertureMask>>,
}

impl DirectivityEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_medium(medium: MediumProperties) -> Self {
        Self {
            medium,
            masks: HashMap::new(),
        }
    }

    /// Number of distinct masks built so far.
    pub fn cached_masks(&self) -> usize {
        self.masks.len()
    }

    fn mask_for(&mut self, spec: &ApertureSpec) -> Option<Arc<ApertureMask>> {
        let key = match spec.shape {
            ApertureShape::Circle | ApertureShape::Rectangle => return None,
            ApertureShape::Ellipse => MaskKey {
                shape: ApertureShape::Ellipse,
                exponent_bits: 2f64.to_bits(),
                grid: ELLIPSE_GRID,
            },
            ApertureShape::Superellipse => MaskKey {
                shape: ApertureShape::Superellipse,
                exponent_bits: spec.exponent().to_bits(),
                grid: SUPERELLIPSE_GRID,
            },
        };
        let mask = self.masks.entry(key).or_insert_with(|| {
            let mask = match key.shape {
                ApertureShape::Ellipse => ApertureMask::ellipse(key.grid),
                _ => ApertureMask::superellipse(f64::from_bits(key.exponent_bits), key.grid),
            };
            debug!(
                "built {:?} mask: {} of {} cells inside",
                key.shape,
                mask.len(),
                key.grid * key.grid
            );
            Arc::new(mask)
        });
        Some(Arc::clone(mask))
    }

    /// Directivity of `spec` at one angle in one plane.
    pub fn compute_directivity(
        &mut self,
        spec: &ApertureSpec,
        frequency: f64,
        angle_deg: f64,
        plane: Plane,
    ) -> Result<DirectivityResult> {
        spec.validate()?;
        let k = self.medium.wave_number(frequency);
        let mask = self.mask_for(spec);
        Ok(evaluate(spec, mask.as_deref(), k, angle_deg, plane))
    }

    /// Azimuth and elevation patterns from −90° to +90° in steps of
    /// `angle_step_deg`.
    pub fn compute_polar_pattern(
        &mut self,
        spec: &ApertureSpec,
        frequency: f64,
        angle_step_deg: f64,
    ) -> Result<PolarPattern> {
        spec.validate()?;
        if !frequency.is_finite() || frequency < 0.0 {
            return Err(HornError::InvalidParameter {
                name: "frequency",
                value: frequency,
                reason: "must be finite and non-negative",
            });
        }
        let step = require_positive("angle_step_deg", angle_step_deg)?;
        if step < MIN_ANGLE_STEP_DEG {
            return Err(HornError::InvalidParameter {
                name: "angle_step_deg",
                value: step,
                reason: "must be at least 0.001 degrees",
            });
        }
        let angles = sweep_angles(step);
        let k = self.medium.wave_number(frequency);
        let mask = self.mask_for(spec);
        debug!(
            "polar pattern: {:?} {:.3}×{:.3} m at {frequency} Hz, {} angles",
            spec.shape,
            spec.width,
            spec.height,
            angles.len()
        );

        let sweep = |plane: Plane| -> Vec<DirectivityResult> {
            angles
                .par_iter()
                .map(|&angle| evaluate(spec, mask.as_deref(), k, angle, plane))
                .collect()
        };

        let azimuth = sweep(Plane::Azimuth);
        let elevation = if spec.shape == ApertureShape::Circle {
            azimuth.clone()
        } else {
            sweep(Plane::Elevation)
        };
        Ok(PolarPattern {
            frequency,
            azimuth,
            elevation,
        })
    }
}

/// Angles from −90° towards +90° in steps of `step`, never exceeding +90°.
fn sweep_angles(step: f64) -> Vec<f64> {
    let count = (180.0 / step + 1e-9).floor() as usize;
    (0..=count).map(|i| -90.0 + i as f64 * step).collect()
}

fn evaluate(
    spec: &ApertureSpec,
    mask: Option<&ApertureMask>,
    k: f64,
    angle_deg: f64,
    plane: Plane,
) -> DirectivityResult {
    let theta = angle_deg.to_radians();
    let extent = match plane {
        Plane::Azimuth => spec.width,
        Plane::Elevation => spec.height,
    };
    let magnitude = match (spec.shape, mask) {
        (ApertureShape::Circle, _) => analytic::circular(k, 0.5 * spec.width, theta),
        (ApertureShape::Rectangle, _) => analytic::rectangular(k, extent, theta),
        (ApertureShape::Ellipse, Some(mask)) => mask.cosine_sum(k, extent, theta, plane),
        (ApertureShape::Superellipse, Some(mask)) => mask.phasor_sum(k, extent, theta, plane),
        (_, None) => f64::NAN,
    };
    DirectivityResult::new(angle_deg, magnitude)
}

/// Full −3 dB and −6 dB beamwidths of one plane of a pattern.
///
/// Walks the non-negative angles outward from boresight and takes the first
/// angle at or below each threshold, doubled.
pub fn compute_beamwidth(results: &[DirectivityResult]) -> Beamwidth {
    let boresight = results
        .iter()
        .min_by(|a, b| a.angle_deg.abs().total_cmp(&b.angle_deg.abs()))
        .map(|r| r.db);
    let Some(reference) = boresight else {
        return Beamwidth {
            minus_3db: 0.0,
            minus_6db: 0.0,
        };
    };

    let mut side: Vec<&DirectivityResult> = results.iter().filter(|r| r.angle_deg >= 0.0).collect();
    side.sort_by(|a, b| a.angle_deg.total_cmp(&b.angle_deg));

    let width_at = |drop: f64| {
        side.iter()
            .find(|r| r.db <= reference - drop)
            .map_or(0.0, |r| 2.0 * r.angle_deg)
    };
    Beamwidth {
        minus_3db: width_at(3.0),
        minus_6db: width_at(6.0),
    }
}

/// Polar pattern with a fresh engine in standard air.
pub fn compute_polar_pattern(
    spec: &ApertureSpec,
    frequency: f64,
    angle_step_deg: f64,
) -> Result<PolarPattern> {
    DirectivityEngine::new().compute_polar_pattern(spec, frequency, angle_step_deg)
}
