//! # Multidimensional field of basis functions
//!
//! Field is derived from a space, which defines the forward/backward
//! transform from physical to spectral space and differentiation in
//! spectral space.
use crate::space::Space3;
use crate::Real;
use ndarray::prelude::*;
use num_complex::Complex;

/// Triply periodic field, this crates backbone
///
/// v: ndarray
///
///   Holds data in physical space
///
/// vhat: ndarray
///
///   Holds data in spectral space
///
/// x: list of ndarrays
///
///   Grid points (physical space)
pub struct Field3 {
    /// Space
    pub space: Space3,
    /// Field in physical space
    pub v: Array3<Real>,
    /// Field in spectral space
    pub vhat: Array3<Complex<f64>>,
    /// Grid coordinates
    pub x: [Array1<f64>; 3],
}

impl Field3 {
    /// Returns field
    #[must_use]
    pub fn new(space: &Space3) -> Self {
        Self {
            space: space.clone(),
            v: space.ndarr_phys(),
            vhat: space.ndarr_spec(),
            x: space.coords(),
        }
    }

    /// Transform physical -> spectral space
    pub fn forward(&mut self) {
        self.space.forward(&self.v, &mut self.vhat);
    }

    /// Transform spectral -> physical space
    pub fn backward(&mut self) {
        self.space.backward(&self.vhat, &mut self.v);
    }

    /// Differentiate n_times along axis, returns spectral coefficients
    #[must_use]
    pub fn gradient(&self, axis: usize, n_times: usize) -> Array3<Complex<f64>> {
        self.space.gradient(&self.vhat, axis, n_times)
    }

    /// Volume mean of `v^2`, evaluated from the spectral coefficients
    #[must_use]
    pub fn energy(&self) -> f64 {
        self.space.energy(&self.vhat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bases::{fourier_c2c, fourier_r2c};

    #[test]
    fn test_field_energy() {
        // energy of cos(x/2) is 1/2 * 1/2 = two modes of amplitude 1/2
        let n = 16;
        let space = Space3::new(&fourier_c2c(n), &fourier_c2c(n), &fourier_r2c(n));
        let mut field = Field3::new(&space);
        for (index, vi) in field.v.indexed_iter_mut() {
            let (i, _, _) = index;
            *vi = (0.5 * field.x[0][i]).cos();
        }
        field.forward();
        assert!((field.energy() - 0.5).abs() < 1e-10);
    }
}
