pub mod constants;
pub mod directivity;
pub mod elements;
pub mod error;
pub mod frequency_response;
pub mod horn_line;
pub mod impulse_response;
pub mod numeric;
pub mod profiles;
pub mod radiation;
pub mod transfer_matrix;

use serde::{Deserialize, Serialize};

pub use constants::MediumProperties;
pub use directivity::{
    compute_beamwidth, compute_polar_pattern, ApertureShape, ApertureSpec, Beamwidth,
    DirectivityEngine, DirectivityResult, Plane, PolarPattern,
};
pub use error::{HornError, Result};
pub use frequency_response::FrequencyResponse;
pub use impulse_response::ImpulseResponse;
pub use profiles::{Profile, ProfileKind, ProfileParams, ProfilePoint};

use num_complex::Complex64;

// ---------------------------------------------------------------------------
// Shared interface types
// ---------------------------------------------------------------------------

/// Everything needed to analyse one horn, loadable from JSON or TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HornDesign {
    /// Flare law and its parameters.
    pub profile: ProfileKind,
    /// Throat, mouth, length and resolution.
    pub geometry: ProfileParams,
    #[serde(default)]
    pub medium: MediumProperties,
    /// Mouth aperture for directivity; a circle of the mouth diameter when
    /// absent.
    #[serde(default)]
    pub aperture: Option<ApertureSpec>,
    /// Polar sweep resolution in degrees.
    #[serde(default = "default_angle_step")]
    pub angle_step_deg: f64,
}

fn default_angle_step() -> f64 {
    5.0
}

/// Results of [`analyze`]: the profile, its response at each requested
/// frequency, and a polar pattern at each of those frequencies.
#[derive(Debug, Clone, Serialize)]
pub struct HornAnalysis {
    pub profile: Profile,
    pub response: Vec<FrequencyResponse>,
    pub polar_patterns: Vec<PolarPattern>,
}

/// Trait for acoustic elements that can produce a 2×2 transfer matrix
/// at a given wave number.
pub trait AcousticElement: Send + Sync {
    /// Compute the 2×2 transfer matrix at wave number `k` (rad/m) in
    /// `medium`.
    fn transfer_matrix(&self, k: f64, medium: &MediumProperties) -> transfer_matrix::TransferMatrix;
}

/// Generate the throat-to-mouth profile for `kind`.
pub fn generate_profile(kind: &ProfileKind, params: &ProfileParams) -> Result<Profile> {
    profiles::generate(kind, params)
}

/// Solve the transmission line for `profile` at each frequency, in order.
/// `termination` overrides the baffled-piston mouth load.
pub fn solve_transmission_line(
    profile: &Profile,
    frequencies: &[f64],
    medium: Option<&MediumProperties>,
    termination: Option<Complex64>,
) -> Vec<FrequencyResponse> {
    frequency_response::solve(profile, frequencies, medium, termination)
}

/// Run the full pipeline for a design: generate the profile, solve the
/// line, and compute polar patterns of the mouth at each frequency.
pub fn analyze(design: &HornDesign, frequencies: &[f64]) -> Result<HornAnalysis> {
    let profile = generate_profile(&design.profile, &design.geometry)?;
    let response = solve_transmission_line(&profile, frequencies, Some(&design.medium), None);

    let aperture = design
        .aperture
        .unwrap_or_else(|| ApertureSpec::from_profile_mouth(&profile));
    let mut engine = DirectivityEngine::with_medium(design.medium);
    let polar_patterns = frequencies
        .iter()
        .map(|&f| engine.compute_polar_pattern(&aperture, f, design.angle_step_deg))
        .collect::<Result<Vec<_>>>()?;

    Ok(HornAnalysis {
        profile,
        response,
        polar_patterns,
    })
}
