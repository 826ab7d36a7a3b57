//! Time stepping solvers
//!
//! Periodic Fourier bases diagonalize every operator this crate
//! needs, so the solvers act mode by mode on the spectral
//! coefficients.
pub mod etdrk4;
pub use etdrk4::Etdrk4;
