use crate::constants::{area_from_radius, MediumProperties};
use crate::profiles::ProfilePoint;
use crate::transfer_matrix::TransferMatrix;
use crate::AcousticElement;
use num_complex::Complex64;

/// A short lossless duct between two profile stations, treated as a
/// uniform tube of the average cross-section with an area-step correction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HornSegment {
    /// Radius at the upstream (throat-side) end in metres.
    pub r1: f64,
    /// Radius at the downstream (mouth-side) end in metres.
    pub r2: f64,
    /// Axial length in metres.
    pub length: f64,
}

impl HornSegment {
    pub fn new(r1: f64, r2: f64, length: f64) -> Self {
        Self { r1, r2, length }
    }

    /// Segment between two adjacent profile points.
    pub fn between(p1: &ProfilePoint, p2: &ProfilePoint) -> Self {
        Self::new(p1.radius, p2.radius, p2.x - p1.x)
    }

    pub fn average_area(&self) -> f64 {
        0.5 * (area_from_radius(self.r1) + area_from_radius(self.r2))
    }

    /// Characteristic impedance Z0 = ρc/S_avg.
    pub fn impedance(&self, medium: &MediumProperties) -> f64 {
        medium.characteristic_impedance() / self.average_area()
    }

    /// Area-discontinuity factor (1 + S2/S1)/2.
    pub fn area_correction(&self) -> f64 {
        0.5 * (1.0 + area_from_radius(self.r2) / area_from_radius(self.r1))
    }
}

impl AcousticElement for HornSegment {
    fn transfer_matrix(&self, k: f64, medium: &MediumProperties) -> TransferMatrix {
        if self.length <= 0.0 {
            return TransferMatrix::identity();
        }
        let z = self.impedance(medium);
        let corr = self.area_correction();
        let (sin_kl, cos_kl) = (k * self.length).sin_cos();
        let j = Complex64::new(0.0, 1.0);

        TransferMatrix::new(
            Complex64::new(cos_kl * corr, 0.0),
            j * z * sin_kl,
            j * sin_kl / z,
            Complex64::new(cos_kl / corr, 0.0),
        )
    }
}
