#![warn(missing_docs)]
//! # kleingordon: pseudospectral Klein-Gordon solver on triply periodic domains
//!
//! Solves the nonlinear Klein-Gordon equation
//!
//! ```text
//! u_tt = div(grad(u)) - gamma*u + gamma*u*|u|^2
//! ```
//!
//! on the cube `[-2pi, 2pi]^3` with periodic boundary conditions,
//! discretized in space with a Fourier basis in all three directions
//! and in time with a fourth order exponential time differencing
//! Runge-Kutta scheme (ETDRK4).
//!
//! The second order equation is reduced to a first order system
//! by the auxiliary velocity `f = u_t`:
//!
//! ```text
//! f_t = div(grad(u)) - gamma*u + gamma*u*|u|^2
//! u_t = f
//! ```
//!
//! # Example
//! Simulate the dispersion of a Gaussian pulse
//! ```ignore
//! use kleingordon::integrate;
//! use kleingordon::kg::KleinGordon3D;
//!
//! fn main() {
//!     let mut kg = KleinGordon3D::new(32, 1.0, 0.005);
//!     kg.write_intervall = Some(0.25);
//!     kg.diag_intervall = Some(0.5);
//!     kg.callback();
//!     integrate(&mut kg, 100., Some(0.05));
//! }
//! ```
pub mod bases;
pub mod field;
pub mod hdf5;
pub mod integrate;
pub mod kg;
pub mod solver;
pub mod space;
pub mod xdmf;
pub use bases::{fourier_c2c, fourier_r2c, FourierC2c, FourierR2c};
pub use field::Field3;
pub use integrate::{integrate, Integrate};
pub use space::Space3;

/// Real type
pub type Real = f64;
