//! Error types for horn-core.
//!
//! Only invalid input is reported as an error. Numeric degeneracy inside the
//! solvers is either recovered by a documented fallback or left visible as a
//! non-finite value in the returned record.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum HornError {
    /// A parameter is outside its valid domain.
    #[error("invalid parameter '{name}' = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// A profile needs a parameter (or one of a pair) that was not supplied.
    #[error("profile '{profile}' requires {name}")]
    MissingParameter {
        profile: &'static str,
        name: &'static str,
    },

    /// FFT input length is not an exact power of two.
    #[error("FFT length {len} is not a power of two")]
    NotPowerOfTwo { len: usize },

    /// Spectrum length does not match the requested FFT size.
    #[error("spectrum has {actual} bins, expected {expected}")]
    FftLength { expected: usize, actual: usize },

    /// The bracket handed to a root solver does not straddle a sign change.
    #[error("root not bracketed on [{a}, {b}]: f(a) = {fa}, f(b) = {fb}")]
    UnbracketedRoot { a: f64, b: f64, fa: f64, fb: f64 },

    /// A function evaluated to NaN or infinity where a finite value is required.
    #[error("function is not finite at x = {x}")]
    NonFiniteEvaluation { x: f64 },

    /// A bracketed solve ran out of iterations.
    #[error("no convergence after {iterations} iterations")]
    NoConvergence { iterations: usize },
}

/// Result type alias for horn-core operations.
pub type Result<T> = std::result::Result<T, HornError>;

impl HornError {
    /// Returns true for errors caused by what the caller passed in.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            HornError::InvalidParameter { .. }
                | HornError::MissingParameter { .. }
                | HornError::NotPowerOfTwo { .. }
                | HornError::FftLength { .. }
                | HornError::UnbracketedRoot { .. }
        )
    }

    /// Returns true for failures raised by a root search.
    pub fn is_root_failure(&self) -> bool {
        matches!(
            self,
            HornError::UnbracketedRoot { .. }
                | HornError::NonFiniteEvaluation { .. }
                | HornError::NoConvergence { .. }
        )
    }
}

/// Reject a non-finite or non-positive value.
pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(HornError::InvalidParameter {
            name,
            value,
            reason: "must be finite",
        });
    }
    if value <= 0.0 {
        return Err(HornError::InvalidParameter {
            name,
            value,
            reason: "must be positive",
        });
    }
    Ok(value)
}
