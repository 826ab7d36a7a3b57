//! Space initializes Field
//!
//! `Space3` composes two complex-to-complex Fourier bases (outer axes)
//! with one real-to-complex base (innermost axis) into the tensor
//! product space of a real valued field on a triply periodic box.
use crate::bases::{FourierC2c, FourierR2c};
use crate::Real;
use ndarray::prelude::*;
use num_complex::Complex;

/// Tensor product space of a real valued, triply periodic field.
///
/// Axis layout follows the transform order of the mixed
/// real/complex representation: the r2c base sits on the innermost
/// axis, so its conjugate-redundant half is dropped before the
/// (cheaper) complex transforms of the outer axes run.
#[derive(Clone)]
pub struct Space3 {
    /// Bases of the two outer axes
    bases_c2c: [FourierC2c; 2],
    /// Base of the innermost axis
    base_r2c: FourierR2c,
}

impl Space3 {
    /// Return new space
    #[must_use]
    pub fn new(base_x: &FourierC2c, base_y: &FourierC2c, base_z: &FourierR2c) -> Self {
        Self {
            bases_c2c: [base_x.clone(), base_y.clone()],
            base_r2c: base_z.clone(),
        }
    }

    /// Shape in physical space
    #[must_use]
    pub fn shape_phys(&self) -> [usize; 3] {
        [
            self.bases_c2c[0].len_phys(),
            self.bases_c2c[1].len_phys(),
            self.base_r2c.len_phys(),
        ]
    }

    /// Shape in spectral space
    #[must_use]
    pub fn shape_spec(&self) -> [usize; 3] {
        [
            self.bases_c2c[0].len_spec(),
            self.bases_c2c[1].len_spec(),
            self.base_r2c.len_spec(),
        ]
    }

    /// Return ndarray with shape of physical space
    #[must_use]
    pub fn ndarr_phys(&self) -> Array3<Real> {
        Array3::zeros(self.shape_phys())
    }

    /// Return ndarray with shape of spectral space
    #[must_use]
    pub fn ndarr_spec(&self) -> Array3<Complex<f64>> {
        Array3::zeros(self.shape_spec())
    }

    /// Return array of coordinates \[x, y, z\]
    #[must_use]
    pub fn coords(&self) -> [Array1<f64>; 3] {
        [
            self.bases_c2c[0].coords(),
            self.bases_c2c[1].coords(),
            self.base_r2c.coords(),
        ]
    }

    /// Return array of wavenumbers per axis
    #[must_use]
    pub fn wavenumbers(&self) -> [Array1<f64>; 3] {
        [
            self.bases_c2c[0].wavenumbers(),
            self.bases_c2c[1].wavenumbers(),
            self.base_r2c.wavenumbers(),
        ]
    }

    /// Return `|k|^2` over the spectral shape
    #[must_use]
    pub fn k_squared(&self) -> Array3<f64> {
        let k = self.wavenumbers();
        let mut k2 = Array3::zeros(self.shape_spec());
        for (i, ki) in k[0].iter().enumerate() {
            for (j, kj) in k[1].iter().enumerate() {
                for (l, kl) in k[2].iter().enumerate() {
                    k2[[i, j, l]] = ki * ki + kj * kj + kl * kl;
                }
            }
        }
        k2
    }

    /// Transform physical -> spectral space
    pub fn forward(&mut self, v: &Array3<Real>, vhat: &mut Array3<Complex<f64>>) {
        let [nx, ny, _] = self.shape_phys();
        let nzs = self.base_r2c.len_spec();
        let mut buf1 = Array3::<Complex<f64>>::zeros((nx, ny, nzs));
        let mut buf2 = Array3::<Complex<f64>>::zeros((nx, ny, nzs));
        self.base_r2c.forward(v, &mut buf1, 2);
        self.bases_c2c[1].forward(&buf1, &mut buf2, 1);
        self.bases_c2c[0].forward(&buf2, vhat, 0);
    }

    /// Transform spectral -> physical space
    pub fn backward(&mut self, vhat: &Array3<Complex<f64>>, v: &mut Array3<Real>) {
        let [nx, ny, _] = self.shape_phys();
        let nzs = self.base_r2c.len_spec();
        let mut buf1 = Array3::<Complex<f64>>::zeros((nx, ny, nzs));
        let mut buf2 = Array3::<Complex<f64>>::zeros((nx, ny, nzs));
        self.bases_c2c[0].backward(vhat, &mut buf1, 0);
        self.bases_c2c[1].backward(&buf1, &mut buf2, 1);
        self.base_r2c.backward(&buf2, v, 2);
    }

    /// Differentiate n_times along axis (performed in spectral space)
    #[must_use]
    pub fn gradient(
        &self,
        vhat: &Array3<Complex<f64>>,
        axis: usize,
        n_times: usize,
    ) -> Array3<Complex<f64>> {
        let mut out = self.ndarr_spec();
        match axis {
            0 | 1 => self.bases_c2c[axis].differentiate(vhat, &mut out, n_times, axis),
            2 => self.base_r2c.differentiate(vhat, &mut out, n_times, 2),
            _ => panic!("Space3 has 3 axes, got axis {}", axis),
        };
        out
    }

    /// Volume mean of `f^2`, evaluated from the spectral coefficients
    /// (Parseval). Modes on the interior of the r2c axis stand for a
    /// conjugate pair and count twice.
    #[must_use]
    pub fn energy(&self, vhat: &Array3<Complex<f64>>) -> f64 {
        let nzs = self.base_r2c.len_spec();
        let mut sum = 0.;
        for (index, x) in vhat.indexed_iter() {
            let (_, _, l) = index;
            let weight = if l == 0 || l == nzs - 1 { 1. } else { 2. };
            sum += weight * x.norm_sqr();
        }
        sum
    }

    /// Dealias spectral field (2/3 rule)
    pub fn dealias(&self, vhat: &mut Array3<Complex<f64>>) {
        let zero = Complex::new(0., 0.);
        let [nx, ny, _] = self.shape_phys();
        let nz = self.base_r2c.len_phys();
        let nzs = self.base_r2c.len_spec();
        let (cx, cy, cz) = (nx / 3, ny / 3, nz / 3);
        // c2c axes hold negative wavenumbers in the upper half
        vhat.slice_mut(s![cx + 1..nx - cx, .., ..]).fill(zero);
        vhat.slice_mut(s![.., cy + 1..ny - cy, ..]).fill(zero);
        vhat.slice_mut(s![.., .., cz + 1..nzs]).fill(zero);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bases::{fourier_c2c, fourier_r2c};
    use ndarray_rand::rand_distr::Uniform;
    use ndarray_rand::RandomExt;

    fn approx_eq(a: f64, b: f64) {
        let dif = 1e-10;
        if (a - b).abs() > dif {
            panic!("Large difference of values, got {} expected {}.", b, a)
        }
    }

    fn space(n: usize) -> Space3 {
        Space3::new(&fourier_c2c(n), &fourier_c2c(n), &fourier_r2c(n))
    }

    #[test]
    fn test_space_roundtrip() {
        let n = 8;
        let mut space = space(n);
        let v = Array3::random((n, n, n), Uniform::new(-1., 1.));
        let mut vhat = space.ndarr_spec();
        let mut w = space.ndarr_phys();
        space.forward(&v, &mut vhat);
        space.backward(&vhat, &mut w);
        for (a, b) in v.iter().zip(w.iter()) {
            approx_eq(*a, *b);
        }
    }

    #[test]
    fn test_space_parseval() {
        let n = 8;
        let mut space = space(n);
        let v = Array3::random((n, n, n), Uniform::new(-1., 1.));
        let mut vhat = space.ndarr_spec();
        space.forward(&v, &mut vhat);
        let mean_sq = v.iter().map(|x| x * x).sum::<f64>() / (n * n * n) as f64;
        approx_eq(space.energy(&vhat), mean_sq);
    }

    #[test]
    fn test_space_gradient() {
        // d/dy sin(y/2) = 1/2 cos(y/2)
        let n = 16;
        let mut space = space(n);
        let x = space.coords();
        let mut v = space.ndarr_phys();
        for (index, vi) in v.indexed_iter_mut() {
            let (_, j, _) = index;
            *vi = (0.5 * x[1][j]).sin();
        }
        let mut vhat = space.ndarr_spec();
        space.forward(&v, &mut vhat);
        let dvhat = space.gradient(&vhat, 1, 1);
        let mut dv = space.ndarr_phys();
        space.backward(&dvhat, &mut dv);
        for (index, di) in dv.indexed_iter() {
            let (_, j, _) = index;
            approx_eq(*di, 0.5 * (0.5 * x[1][j]).cos());
        }
    }

    #[test]
    fn test_space_dealias() {
        let n = 12;
        let space = space(n);
        let mut vhat = space.ndarr_spec();
        vhat.fill(Complex::new(1., 0.));
        space.dealias(&mut vhat);
        // cut = 4: index 5..7 zeroed on c2c axes, 5.. on the r2c axis
        assert_eq!(vhat[[4, 0, 0]], Complex::new(1., 0.));
        assert_eq!(vhat[[5, 0, 0]], Complex::new(0., 0.));
        assert_eq!(vhat[[8, 0, 0]], Complex::new(1., 0.));
        assert_eq!(vhat[[0, 6, 0]], Complex::new(0., 0.));
        assert_eq!(vhat[[0, 0, 4]], Complex::new(1., 0.));
        assert_eq!(vhat[[0, 0, 5]], Complex::new(0., 0.));
    }
}
