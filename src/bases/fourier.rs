//! # Fourier base
//! Transforms of periodic fields on equispaced grids, backed by
//! `ndrustfft`.
//!
//! Normalization: the forward transform divides by the number of grid
//! points, so the spectral coefficients are the Fourier amplitudes of
//! the signal and Parseval's identity holds without extra factors.
//! The backward transform is the plain inverse sum.
use ndarray::prelude::*;
use ndarray::{Data, DataMut, RemoveAxis};
use ndrustfft::{ndfft, ndifft, ndfft_r2c, ndifft_r2c, FftHandler, R2cFftHandler};
use num_complex::Complex;

/// Complex-to-complex Fourier base.
///
/// Spectral and physical size coincide; the wavenumber layout is
/// `[0, 1, .., n/2-1, -n/2, .., -1] * 2*pi/length`.
#[derive(Clone)]
pub struct FourierC2c {
    /// Number of grid points
    n: usize,
    /// Left edge of the domain
    left: f64,
    /// Domain length
    length: f64,
    /// Fft plan
    fft: FftHandler<f64>,
}

impl FourierC2c {
    /// Return new base on `domain = (left, right)`.
    #[must_use]
    pub fn new(n: usize, domain: (f64, f64)) -> Self {
        assert!(n % 2 == 0, "FourierC2c expects an even number of points, got {}", n);
        Self {
            n,
            left: domain.0,
            length: domain.1 - domain.0,
            fft: FftHandler::new(n),
        }
    }

    /// Size in physical space
    #[must_use]
    pub fn len_phys(&self) -> usize {
        self.n
    }

    /// Size in spectral space
    #[must_use]
    pub fn len_spec(&self) -> usize {
        self.n
    }

    /// Equispaced grid points; the right edge is excluded (periodic).
    #[must_use]
    pub fn coords(&self) -> Array1<f64> {
        let h = self.length / self.n as f64;
        Array1::from_iter((0..self.n).map(|i| self.left + i as f64 * h))
    }

    /// Wavenumbers, scaled by `2*pi/length`.
    #[must_use]
    pub fn wavenumbers(&self) -> Array1<f64> {
        let scale = 2. * std::f64::consts::PI / self.length;
        let n = self.n as isize;
        Array1::from_iter((0..n).map(|i| {
            let k = if i < n / 2 { i } else { i - n };
            k as f64 * scale
        }))
    }

    /// Transform physical -> spectral space along axis.
    pub fn forward<S1, S2, D>(
        &mut self,
        input: &ArrayBase<S1, D>,
        output: &mut ArrayBase<S2, D>,
        axis: usize,
    ) where
        S1: Data<Elem = Complex<f64>>,
        S2: Data<Elem = Complex<f64>> + DataMut,
        D: Dimension,
    {
        ndfft(input, output, &mut self.fft, axis);
        let norm = 1. / self.n as f64;
        output.mapv_inplace(|x| x * norm);
    }

    /// Transform spectral -> physical space along axis.
    pub fn backward<S1, S2, D>(
        &mut self,
        input: &ArrayBase<S1, D>,
        output: &mut ArrayBase<S2, D>,
        axis: usize,
    ) where
        S1: Data<Elem = Complex<f64>>,
        S2: Data<Elem = Complex<f64>> + DataMut,
        D: Dimension,
    {
        // ndifft normalizes by 1/n, which the forward transform
        // already did. Undo on a buffer.
        let buf = input.mapv(|x| x * self.n as f64);
        ndifft(&buf, output, &mut self.fft, axis);
    }

    /// Differentiate n_times along axis (performed in spectral space),
    /// i.e. multiply the coefficients by `(i*k)^n_times`.
    pub fn differentiate<S1, S2, D>(
        &self,
        input: &ArrayBase<S1, D>,
        output: &mut ArrayBase<S2, D>,
        n_times: usize,
        axis: usize,
    ) where
        S1: Data<Elem = Complex<f64>>,
        S2: Data<Elem = Complex<f64>> + DataMut,
        D: Dimension + RemoveAxis,
    {
        output.assign(input);
        let k = self.wavenumbers();
        for (i, mut lane) in output.axis_iter_mut(Axis(axis)).enumerate() {
            let factor = Complex::new(0., k[i]).powu(n_times as u32);
            lane.map_inplace(|x| *x = *x * factor);
        }
    }
}

/// Real-to-complex Fourier base.
///
/// The physical field is real valued; conjugate symmetry makes the
/// negative wavenumber half redundant, so the spectral size is
/// `n/2 + 1` with wavenumbers `[0, 1, .., n/2] * 2*pi/length`.
#[derive(Clone)]
pub struct FourierR2c {
    /// Number of grid points
    n: usize,
    /// Left edge of the domain
    left: f64,
    /// Domain length
    length: f64,
    /// Fft plan
    fft: R2cFftHandler<f64>,
}

impl FourierR2c {
    /// Return new base on `domain = (left, right)`.
    #[must_use]
    pub fn new(n: usize, domain: (f64, f64)) -> Self {
        assert!(n % 2 == 0, "FourierR2c expects an even number of points, got {}", n);
        Self {
            n,
            left: domain.0,
            length: domain.1 - domain.0,
            fft: R2cFftHandler::new(n),
        }
    }

    /// Size in physical space
    #[must_use]
    pub fn len_phys(&self) -> usize {
        self.n
    }

    /// Size in spectral space
    #[must_use]
    pub fn len_spec(&self) -> usize {
        self.n / 2 + 1
    }

    /// Equispaced grid points; the right edge is excluded (periodic).
    #[must_use]
    pub fn coords(&self) -> Array1<f64> {
        let h = self.length / self.n as f64;
        Array1::from_iter((0..self.n).map(|i| self.left + i as f64 * h))
    }

    /// Wavenumbers, scaled by `2*pi/length`.
    #[must_use]
    pub fn wavenumbers(&self) -> Array1<f64> {
        let scale = 2. * std::f64::consts::PI / self.length;
        Array1::from_iter((0..=self.n / 2).map(|i| i as f64 * scale))
    }

    /// Transform physical -> spectral space along axis.
    pub fn forward<S1, S2, D>(
        &mut self,
        input: &ArrayBase<S1, D>,
        output: &mut ArrayBase<S2, D>,
        axis: usize,
    ) where
        S1: Data<Elem = f64>,
        S2: Data<Elem = Complex<f64>> + DataMut,
        D: Dimension,
    {
        ndfft_r2c(input, output, &mut self.fft, axis);
        let norm = 1. / self.n as f64;
        output.mapv_inplace(|x| x * norm);
    }

    /// Transform spectral -> physical space along axis.
    pub fn backward<S1, S2, D>(
        &mut self,
        input: &ArrayBase<S1, D>,
        output: &mut ArrayBase<S2, D>,
        axis: usize,
    ) where
        S1: Data<Elem = Complex<f64>>,
        S2: Data<Elem = f64> + DataMut,
        D: Dimension,
    {
        let buf = input.mapv(|x| x * self.n as f64);
        ndifft_r2c(&buf, output, &mut self.fft, axis);
    }

    /// Differentiate n_times along axis (performed in spectral space).
    pub fn differentiate<S1, S2, D>(
        &self,
        input: &ArrayBase<S1, D>,
        output: &mut ArrayBase<S2, D>,
        n_times: usize,
        axis: usize,
    ) where
        S1: Data<Elem = Complex<f64>>,
        S2: Data<Elem = Complex<f64>> + DataMut,
        D: Dimension + RemoveAxis,
    {
        output.assign(input);
        let k = self.wavenumbers();
        for (i, mut lane) in output.axis_iter_mut(Axis(axis)).enumerate() {
            let factor = Complex::new(0., k[i]).powu(n_times as u32);
            lane.map_inplace(|x| *x = *x * factor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bases::{fourier_c2c, fourier_r2c};

    fn approx_eq(a: f64, b: f64) {
        let dif = 1e-10;
        if (a - b).abs() > dif {
            panic!("Large difference of values, got {} expected {}.", b, a)
        }
    }

    #[test]
    fn test_fourier_c2c_wavenumbers() {
        // length 4*pi -> scale 1/2
        let base = fourier_c2c(8);
        let k = base.wavenumbers();
        let expected = [0., 0.5, 1., 1.5, -2., -1.5, -1., -0.5];
        for (a, b) in k.iter().zip(expected.iter()) {
            approx_eq(*a, *b);
        }
    }

    #[test]
    fn test_fourier_r2c_wavenumbers() {
        let base = fourier_r2c(8);
        let k = base.wavenumbers();
        let expected = [0., 0.5, 1., 1.5, 2.];
        for (a, b) in k.iter().zip(expected.iter()) {
            approx_eq(*a, *b);
        }
    }

    #[test]
    fn test_fourier_r2c_transform() {
        // cos of the first harmonic has amplitude 1/2 at k = 2*pi/L.
        // Coefficients are indexed from the left domain edge -2pi,
        // which contributes the phase exp(-i*pi) = -1.
        let n = 16;
        let mut base = fourier_r2c(n);
        let x = base.coords();
        let v = x.mapv(|xi| (0.5 * xi).cos());
        let mut vhat = Array1::<Complex<f64>>::zeros(base.len_spec());
        base.forward(&v, &mut vhat, 0);
        approx_eq(vhat[1].re, -0.5);
        approx_eq(vhat[1].im, 0.);
        approx_eq(vhat[0].norm(), 0.);
        approx_eq(vhat[2].norm(), 0.);
        // roundtrip
        let mut w = Array1::<f64>::zeros(n);
        base.backward(&vhat, &mut w, 0);
        for (a, b) in v.iter().zip(w.iter()) {
            approx_eq(*a, *b);
        }
    }

    #[test]
    fn test_fourier_c2c_roundtrip() {
        let n = 8;
        let mut base = fourier_c2c(n);
        let v = Array1::from_iter((0..n).map(|i| Complex::new(i as f64, -(i as f64))));
        let mut vhat = Array1::<Complex<f64>>::zeros(n);
        let mut w = Array1::<Complex<f64>>::zeros(n);
        base.forward(&v, &mut vhat, 0);
        base.backward(&vhat, &mut w, 0);
        for (a, b) in v.iter().zip(w.iter()) {
            approx_eq(a.re, b.re);
            approx_eq(a.im, b.im);
        }
    }

    #[test]
    fn test_fourier_differentiate() {
        // d/dx sin(x/2) = 1/2 cos(x/2) on [-2pi, 2pi]
        let n = 16;
        let mut base = fourier_r2c(n);
        let x = base.coords();
        let v = x.mapv(|xi| (0.5 * xi).sin());
        let mut vhat = Array1::<Complex<f64>>::zeros(base.len_spec());
        base.forward(&v, &mut vhat, 0);
        let mut dvhat = Array1::<Complex<f64>>::zeros(base.len_spec());
        base.differentiate(&vhat, &mut dvhat, 1, 0);
        let mut dv = Array1::<f64>::zeros(n);
        base.backward(&dvhat, &mut dv, 0);
        for (xi, di) in x.iter().zip(dv.iter()) {
            approx_eq(*di, 0.5 * (0.5 * xi).cos());
        }
    }
}
