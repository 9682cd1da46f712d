use num_complex::Complex64;

/// A 2×2 complex transfer (ABCD) matrix relating throat to mouth.
///
/// ```text
/// [p_in ]   [a  b] [p_out]
/// [U_in ] = [c  d] [U_out]
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferMatrix {
    pub a: Complex64,
    pub b: Complex64,
    pub c: Complex64,
    pub d: Complex64,
}

impl TransferMatrix {
    pub fn new(a: Complex64, b: Complex64, c: Complex64, d: Complex64) -> Self {
        Self { a, b, c, d }
    }

    /// Identity matrix (zero-length element).
    pub fn identity() -> Self {
        Self {
            a: Complex64::new(1.0, 0.0),
            b: Complex64::new(0.0, 0.0),
            c: Complex64::new(0.0, 0.0),
            d: Complex64::new(1.0, 0.0),
        }
    }

    /// Chain (multiply) this matrix with the next element downstream:
    /// self · other.
    pub fn chain(&self, other: &TransferMatrix) -> TransferMatrix {
        TransferMatrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
        }
    }

    pub fn determinant(&self) -> Complex64 {
        self.a * self.d - self.b * self.c
    }

    /// Input impedance seen at the throat when the mouth is loaded by
    /// `z_termination`.
    ///
    /// Z_in = (T₁₁·Z + T₁₂) / (T₂₁·Z + T₂₂)
    pub fn input_impedance(&self, z_termination: Complex64) -> Complex64 {
        (self.a * z_termination + self.b) / (self.c * z_termination + self.d)
    }

    /// Pressure transfer under a matched termination: H = 1/T₁₁.
    pub fn pressure_transfer(&self) -> Complex64 {
        Complex64::new(1.0, 0.0) / self.a
    }
}
