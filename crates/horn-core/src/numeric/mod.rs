//! Numeric foundation shared by the profile, transmission-line and
//! directivity code. Complex arithmetic comes from `num_complex::Complex64`.

pub mod fft;
pub mod integrate;
pub mod ode;
pub mod roots;
pub mod special;

pub use fft::{fft, ifft, next_power_of_two, pad_to_power_of_two};
pub use integrate::{amplitude_to_db, db_to_amplitude, interpolate_linear, simpson};
pub use roots::{bisection, newton_raphson, solve_bracketed, solve_with_fallback, Root, RootFailure};
pub use special::{bessel_j1, gamma, jinc, sinc, struve_h1};
