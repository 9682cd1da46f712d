use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Speed of sound in air at 20 °C (m/s).
pub const SPEED_OF_SOUND: f64 = 343.0;
/// Density of air at 20 °C (kg/m³).
pub const AIR_DENSITY: f64 = 1.204;

/// Speed of sound in air (m/s) and density (kg/m³) as a function of
/// temperature in °C. Uses the ideal-gas approximation.
pub fn speed_of_sound_and_density(temperature_c: f64) -> (f64, f64) {
    let t_kelvin = temperature_c + 273.15;
    // c = 331.3 * sqrt(T/273.15)
    let c = 331.3 * (t_kelvin / 273.15).sqrt();
    // ρ = p / (R_specific * T), with p = 101325 Pa, R_specific = 287.05 J/(kg·K)
    let rho = 101325.0 / (287.05 * t_kelvin);
    (c, rho)
}

/// Circular cross-sectional area from radius (both in metres).
pub fn area_from_radius(radius: f64) -> f64 {
    PI * radius * radius
}

/// Radius of the circle with the given area.
pub fn radius_from_area(area: f64) -> f64 {
    (area / PI).sqrt()
}

/// Acoustic medium the horn radiates into. Constant for one solve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MediumProperties {
    /// Speed of sound in m/s.
    pub speed_of_sound: f64,
    /// Density in kg/m³.
    pub density: f64,
    /// Temperature in °C. When set, overrides `speed_of_sound`.
    #[serde(default)]
    pub temperature_c: Option<f64>,
}

impl Default for MediumProperties {
    fn default() -> Self {
        Self {
            speed_of_sound: SPEED_OF_SOUND,
            density: AIR_DENSITY,
            temperature_c: None,
        }
    }
}

impl MediumProperties {
    /// Air at the given temperature, with both speed and density derived
    /// from the ideal-gas model.
    pub fn from_temperature(temperature_c: f64) -> Self {
        let (c, rho) = speed_of_sound_and_density(temperature_c);
        Self {
            speed_of_sound: c,
            density: rho,
            temperature_c: Some(temperature_c),
        }
    }

    /// Speed of sound used by the solvers.
    pub fn effective_speed_of_sound(&self) -> f64 {
        match self.temperature_c {
            Some(t) => speed_of_sound_and_density(t).0,
            None => self.speed_of_sound,
        }
    }

    /// Plane-wave characteristic impedance ρc of the medium (Pa·s/m).
    pub fn characteristic_impedance(&self) -> f64 {
        self.density * self.effective_speed_of_sound()
    }

    /// Wave number k = 2πf/c at `frequency` Hz.
    pub fn wave_number(&self, frequency: f64) -> f64 {
        2.0 * PI * frequency / self.effective_speed_of_sound()
    }
}
