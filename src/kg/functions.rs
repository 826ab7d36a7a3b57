//! Energy and momentum diagnostics of the Klein-Gordon system
//!
//! All quantities are volume means over the periodic box. Spectral
//! sums rely on the Parseval identity of the amplitude-normalized
//! transforms; physical space sums expect `v` to be in sync with
//! `vhat` (transform backward before calling).
use crate::field::Field3;

/// Kinetic energy
/// $$
/// e_kin = 1/2 < f^2 >
/// $$
#[must_use]
pub fn energy_kinetic(f: &Field3) -> f64 {
    0.5 * f.energy()
}

/// Strain (gradient) energy, evaluated in spectral space
/// $$
/// e_s = 1/2 < |grad(u)|^2 >
/// $$
#[must_use]
pub fn energy_strain(u: &Field3) -> f64 {
    let mut energy = 0.;
    for axis in 0..3 {
        energy += 0.5 * u.space.energy(&u.gradient(axis, 1));
    }
    energy
}

/// Potential energy
/// $$
/// e_g = gamma * < 1/2 u^2 - 1/4 u^4 >
/// $$
#[must_use]
pub fn energy_potential(u: &Field3, gamma: f64) -> f64 {
    let n = u.v.len() as f64;
    let sum: f64 = u.v.iter().map(|x| 0.5 * x * x - 0.25 * x.powi(4)).sum();
    gamma * sum / n
}

/// Linear momentum
/// $$
/// e_p = sum_j < f du/dx_j >
/// $$
#[must_use]
pub fn momentum_linear(f: &Field3, u: &Field3, field: &mut Field3) -> f64 {
    let n = u.v.len() as f64;
    let mut momentum = 0.;
    for axis in 0..3 {
        field.vhat = u.gradient(axis, 1);
        field.backward();
        momentum += f
            .v
            .iter()
            .zip(field.v.iter())
            .map(|(fi, gi)| fi * gi)
            .sum::<f64>()
            / n;
    }
    momentum
}

/// Position weighted momentum
/// $$
/// e_a = sum_j < x_j ( 1/2 f^2 + 1/2 (du/dx_j)^2 - (1/2 u^2 - 1/4 u^4) f ) >
/// $$
#[must_use]
pub fn momentum_angular(f: &Field3, u: &Field3, field: &mut Field3) -> f64 {
    let n = u.v.len() as f64;
    let mut momentum = 0.;
    for axis in 0..3 {
        field.vhat = u.gradient(axis, 1);
        field.backward();
        let mut sum = 0.;
        for (index, gi) in field.v.indexed_iter() {
            let i = [index.0, index.1, index.2][axis];
            let xj = u.x[axis][i];
            let fi = f.v[[index.0, index.1, index.2]];
            let ui = u.v[[index.0, index.1, index.2]];
            sum += xj * (0.5 * fi * fi + 0.5 * gi * gi - (0.5 * ui * ui - 0.25 * ui.powi(4)) * fi);
        }
        momentum += sum / n;
    }
    momentum
}
