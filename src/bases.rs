//! # Bases
//! Periodic Fourier basis functions which implement forward/backward
//! transforms, differentiation and other methods to conveniently work
//! in physical and spectral space.
//!
//! Implemented:
//! - `FourierC2c` (complex-to-complex)
//! - `FourierR2c` (real-to-complex, physical field is real valued)
pub mod fourier;
pub use fourier::{FourierC2c, FourierR2c};
use std::f64::consts::PI;

/// Return complex-to-complex Fourier base on `[-2pi, 2pi]`,
/// the canonical cube of this crate.
#[must_use]
pub fn fourier_c2c(n: usize) -> FourierC2c {
    FourierC2c::new(n, (-2. * PI, 2. * PI))
}

/// Return real-to-complex Fourier base on `[-2pi, 2pi]`.
///
/// Use on the innermost axis of real valued fields; the redundant
/// negative wavenumber half is dropped.
#[must_use]
pub fn fourier_r2c(n: usize) -> FourierR2c {
    FourierR2c::new(n, (-2. * PI, 2. * PI))
}
