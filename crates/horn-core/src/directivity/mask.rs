//! Sampled apertures for shapes without a closed-form pattern.
//!
//! A mask is the list of cell centres of an `N×N` grid over `[-1, 1]²` that
//! fall inside the normalised shape. It depends only on the shape, so it is
//! built once and reused for every angle and frequency.

use super::{ApertureShape, Plane};
use num_complex::Complex64;

/// Grid resolution for elliptical apertures.
pub const ELLIPSE_GRID: usize = 100;
/// Grid resolution for superelliptical apertures.
pub const SUPERELLIPSE_GRID: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct MaskKey {
    pub shape: ApertureShape,
    pub exponent_bits: u64,
    pub grid: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApertureMask {
    /// Normalised (u, v) of every in-aperture cell centre.
    samples: Vec<(f64, f64)>,
    grid: usize,
}

impl ApertureMask {
    /// Cells with |u|ⁿ + |v|ⁿ ≤ 1.
    pub fn superellipse(exponent: f64, grid: usize) -> Self {
        let step = 2.0 / grid as f64;
        let mut samples = Vec::new();
        for i in 0..grid {
            let u = -1.0 + (i as f64 + 0.5) * step;
            for j in 0..grid {
                let v = -1.0 + (j as f64 + 0.5) * step;
                if u.abs().powf(exponent) + v.abs().powf(exponent) <= 1.0 {
                    samples.push((u, v));
                }
            }
        }
        Self { samples, grid }
    }

    /// Cells inside the unit disk.
    pub fn ellipse(grid: usize) -> Self {
        Self::superellipse(2.0, grid)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn grid(&self) -> usize {
        self.grid
    }

    fn coordinates(&self, plane: Plane) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(move |&(u, v)| match plane {
            Plane::Azimuth => u,
            Plane::Elevation => v,
        })
    }

    /// Real quadrature Σ cos(k·(d/2)·u·sinθ) over the samples, divided by
    /// the sample count.
    pub fn cosine_sum(&self, k: f64, extent: f64, theta: f64, plane: Plane) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let scale = 0.5 * k * extent * theta.sin();
        let sum: f64 = self.coordinates(plane).map(|c| (scale * c).cos()).sum();
        (sum / self.samples.len() as f64).abs()
    }

    /// Complex phasor sum Σ exp(j·k·(d/2)·u·sinθ) over the samples,
    /// divided by the sample count.
    pub fn phasor_sum(&self, k: f64, extent: f64, theta: f64, plane: Plane) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let scale = 0.5 * k * extent * theta.sin();
        let sum: Complex64 = self
            .coordinates(plane)
            .map(|c| Complex64::from_polar(1.0, scale * c))
            .sum();
        sum.norm() / self.samples.len() as f64
    }
}
