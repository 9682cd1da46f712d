use crate::constants::MediumProperties;
use crate::elements::HornSegment;
use crate::profiles::Profile;
use crate::radiation::piston_impedance;
use crate::transfer_matrix::TransferMatrix;
use crate::AcousticElement;
use num_complex::Complex64;

/// Load seen by the mouth end of the line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Termination {
    /// Baffled piston of the mouth radius.
    Piston { radius: f64 },
    /// Fixed impedance at every frequency.
    Fixed(Complex64),
}

impl Termination {
    pub fn impedance(&self, k: f64, medium: &MediumProperties) -> Complex64 {
        match *self {
            Termination::Piston { radius } => piston_impedance(radius, k, medium),
            Termination::Fixed(z) => z,
        }
    }
}

/// An ordered throat-to-mouth chain of acoustic elements with a mouth load.
pub struct HornLine {
    elements: Vec<Box<dyn AcousticElement>>,
    pub termination: Termination,
}

impl HornLine {
    /// Create a line from a custom list of elements and termination.
    pub fn new(elements: Vec<Box<dyn AcousticElement>>, termination: Termination) -> Self {
        Self {
            elements,
            termination,
        }
    }

    /// One segment per pair of adjacent profile points, radiating into a
    /// baffle at the mouth. Segments with non-positive length are dropped.
    pub fn from_profile(profile: &Profile) -> Self {
        let elements = profile
            .points()
            .windows(2)
            .map(|pair| HornSegment::between(&pair[0], &pair[1]))
            .filter(|seg| seg.length > 0.0)
            .map(|seg| Box::new(seg) as Box<dyn AcousticElement>)
            .collect();
        Self {
            elements,
            termination: Termination::Piston {
                radius: profile.mouth_radius(),
            },
        }
    }

    pub fn with_termination(mut self, termination: Termination) -> Self {
        self.termination = termination;
        self
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Total transfer matrix at wave number `k`. Elements are visited
    /// throat first and each one left-multiplies the running product, so
    /// the result is `Mn·…·M2·M1`.
    pub fn total_transfer_matrix(&self, k: f64, medium: &MediumProperties) -> TransferMatrix {
        let mut total = TransferMatrix::identity();
        for elem in &self.elements {
            let t = elem.transfer_matrix(k, medium);
            total = t.chain(&total);
        }
        total
    }

    /// Impedance at the throat looking into the loaded line.
    pub fn throat_impedance(&self, k: f64, medium: &MediumProperties) -> Complex64 {
        let t = self.total_transfer_matrix(k, medium);
        t.input_impedance(self.termination.impedance(k, medium))
    }

    /// Matched-termination pressure transfer 1/T₁₁ at wave number `k`.
    pub fn pressure_transfer(&self, k: f64, medium: &MediumProperties) -> Complex64 {
        self.total_transfer_matrix(k, medium).pressure_transfer()
    }
}
