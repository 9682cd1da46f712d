use crate::error::{require_positive, HornError, Result};
use crate::numeric::gamma;
use crate::profiles::Profile;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Superellipse exponent used when none is given.
pub const DEFAULT_SUPERELLIPSE_EXPONENT: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApertureShape {
    Circle,
    Ellipse,
    Rectangle,
    Superellipse,
}

/// Radiating aperture. `width` spans the azimuth plane and `height` the
/// elevation plane; a circle uses `width` as its diameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ApertureSpec {
    pub shape: ApertureShape,
    pub width: f64,
    pub height: f64,
    /// Superellipse exponent n in |x|ⁿ + |y|ⁿ ≤ 1.
    #[serde(default)]
    pub exponent: Option<f64>,
}

impl ApertureSpec {
    pub fn circle(diameter: f64) -> Self {
        Self {
            shape: ApertureShape::Circle,
            width: diameter,
            height: diameter,
            exponent: None,
        }
    }

    pub fn ellipse(width: f64, height: f64) -> Self {
        Self {
            shape: ApertureShape::Ellipse,
            width,
            height,
            exponent: None,
        }
    }

    pub fn rectangle(width: f64, height: f64) -> Self {
        Self {
            shape: ApertureShape::Rectangle,
            width,
            height,
            exponent: None,
        }
    }

    pub fn superellipse(width: f64, height: f64, exponent: f64) -> Self {
        Self {
            shape: ApertureShape::Superellipse,
            width,
            height,
            exponent: Some(exponent),
        }
    }

    /// Circular aperture matching a profile's mouth.
    pub fn from_profile_mouth(profile: &Profile) -> Self {
        Self::circle(2.0 * profile.mouth_radius())
    }

    pub fn exponent(&self) -> f64 {
        self.exponent.unwrap_or(DEFAULT_SUPERELLIPSE_EXPONENT)
    }

    pub fn validate(&self) -> Result<()> {
        require_positive("width", self.width)?;
        if self.shape != ApertureShape::Circle {
            require_positive("height", self.height)?;
        }
        if self.shape == ApertureShape::Superellipse {
            let n = self.exponent();
            if !n.is_finite() || n <= 0.0 {
                return Err(HornError::InvalidParameter {
                    name: "exponent",
                    value: n,
                    reason: "superellipse exponent must be finite and positive",
                });
            }
        }
        Ok(())
    }

    /// Aperture area in m².
    pub fn area(&self) -> f64 {
        let (a, b) = (0.5 * self.width, 0.5 * self.height);
        match self.shape {
            ApertureShape::Circle => PI * a * a,
            ApertureShape::Ellipse => PI * a * b,
            ApertureShape::Rectangle => self.width * self.height,
            ApertureShape::Superellipse => {
                let n = self.exponent();
                4.0 * a * b * gamma(1.0 + 1.0 / n).powi(2) / gamma(1.0 + 2.0 / n)
            }
        }
    }
}
