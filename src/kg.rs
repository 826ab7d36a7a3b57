//! # Klein-Gordon equation
//! Pseudospectral solver for the nonlinear Klein-Gordon equation on
//! the triply periodic cube `[-2pi, 2pi]^3`
//!
//! ```text
//! u_tt = div(grad(u)) - gamma*u + gamma*u*|u|^2
//! ```
//!
//! reduced to a first order system with the auxiliary velocity
//! `f = u_t`. In spectral space:
//!
//! ```text
//! d fhat / dt = -(|k|^2 + gamma) uhat + gamma * F(u^3)
//! d uhat / dt = fhat
//! ```
//!
//! The linear coupling of the pair is off-diagonal, so no linear term
//! acts on a component's own equation and the whole right hand side
//! is handed to the nonlinear part of the ETDRK4 scheme.
//!
//! # Example
//! Simulate the dispersion of a Gaussian pulse
//! ```ignore
//! use kleingordon::{integrate, Integrate};
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
pub mod functions;
use crate::bases::{fourier_c2c, fourier_r2c};
use crate::field::Field3;
use crate::hdf5::{read_from_hdf5_into, read_scalar_from_hdf5, write_scalar_to_hdf5, write_to_hdf5, Result};
use crate::solver::Etdrk4;
use crate::space::Space3;
use crate::xdmf::XdmfWriter;
use crate::Integrate;
use functions::{energy_kinetic, energy_potential, energy_strain, momentum_angular, momentum_linear};
use ndarray::prelude::*;
use num_complex::Complex;
use std::collections::HashMap;

type C64 = Complex<f64>;

/// Solve the Klein-Gordon equation as coupled first order system
///
/// Struct must be mutable, to perform the update step, which
/// advances the solution by 1 timestep.
pub struct KleinGordon3D {
    /// Scalar unknown
    pub u: Field3,
    /// Auxiliary velocity f = u_t
    pub f: Field3,
    /// Field for derivatives and transforms
    field: Field3,
    /// ETDRK4 coefficients; the per component diagonal operator is
    /// zero (see module docs), under which the scheme reduces to RK4
    etdrk4: Etdrk4<Ix3>,
    /// Linear factor -(|k|^2 + gamma) of the rhs
    lin: Array3<f64>,
    /// Defocusing (+1) or focusing (-1)
    pub gamma: f64,
    /// Time
    pub time: f64,
    /// Time step size
    pub dt: f64,
    /// diagnostics like energy, ...
    pub diagnostics: HashMap<String, Vec<f64>>,
    /// Time intervall for write of full checkpoints
    /// If none, write at every callback
    pub write_intervall: Option<f64>,
    /// Time intervall for energy/momentum diagnostics
    /// If none, compute at every callback
    pub diag_intervall: Option<f64>,
    /// Set true and the cubic term will be dealiased (2/3 rule)
    pub dealias: bool,
}

impl KleinGordon3D {
    /// Bases: Fourier in x, y & z
    ///
    /// The initial condition is the Gaussian pulse
    /// `u = 0.1 exp(-(x^2 + y^2 + z^2))`, `f = 0`.
    ///
    /// # Arguments
    ///
    /// * `n` - The number of grid points per direction
    ///
    /// * `gamma` - Defocusing (+1) or focusing (-1) parameter
    ///
    /// * `dt` - Timestep size
    #[must_use]
    pub fn new(n: usize, gamma: f64, dt: f64) -> Self {
        let space = Space3::new(&fourier_c2c(n), &fourier_c2c(n), &fourier_r2c(n));
        let mut u = Field3::new(&space);
        let f = Field3::new(&space);
        let field = Field3::new(&space);

        // Initial condition (f is initialized to zero, so all set)
        let x = space.coords();
        for (index, vi) in u.v.indexed_iter_mut() {
            let (i, j, l) = index;
            let r2 = x[0][i] * x[0][i] + x[1][j] * x[1][j] + x[2][l] * x[2][l];
            *vi = 0.1 * (-r2).exp();
        }
        u.forward();

        // Linear part of the rhs
        let lin = space.k_squared().mapv(|k2| -(k2 + gamma));

        // No linear term in a component's own equation
        let lambda = Array3::<C64>::zeros(space.shape_spec());
        let etdrk4 = Etdrk4::new(&lambda, dt);

        // Diagnostics
        let mut diagnostics = HashMap::new();
        diagnostics.insert("time".to_string(), Vec::<f64>::new());
        diagnostics.insert("energy".to_string(), Vec::<f64>::new());
        diagnostics.insert("momentum".to_string(), Vec::<f64>::new());
        diagnostics.insert("angular".to_string(), Vec::<f64>::new());

        Self {
            u,
            f,
            field,
            etdrk4,
            lin,
            gamma,
            time: 0.,
            dt,
            diagnostics,
            write_intervall: None,
            diag_intervall: None,
            dealias: true,
        }
    }

    /// Right hand side of the coupled system
    ///
    /// `d fhat / dt = -(|k|^2 + gamma) uhat + gamma * F(u^3)`
    /// `d uhat / dt = fhat`
    fn rhs(&mut self, fhat: &Array3<C64>, uhat: &Array3<C64>) -> (Array3<C64>, Array3<C64>) {
        // Cubic term, pseudospectral
        self.field.vhat.assign(uhat);
        if self.dealias {
            self.u.space.dealias(&mut self.field.vhat);
        }
        self.field.backward();
        self.field.v.par_mapv_inplace(|x| x * x * x);
        self.field.forward();

        let gamma = self.gamma;
        let mut df = self.field.vhat.mapv(|x| x * gamma);
        // + linear contribution
        ndarray::Zip::from(&mut df)
            .and(uhat)
            .and(&self.lin)
            .for_each(|d, &ui, &li| *d += ui * li);
        let du = fhat.to_owned();
        (df, du)
    }

    /// Reset time
    pub fn reset_time(&mut self) {
        self.time = 0.;
    }

    /// Restart from file
    pub fn read(&mut self, filename: &str) {
        read_from_hdf5_into(filename, "v", Some("u"), self.u.v.view_mut());
        read_from_hdf5_into(filename, "v", Some("f"), self.f.v.view_mut());
        self.u.forward();
        self.f.forward();
        self.time = read_scalar_from_hdf5::<f64>(filename, "time", None).unwrap();
        println!(" <== {:?}", filename);
    }

    /// Write fields to hdf5 file, plus an xmf companion for paraview
    pub fn write(&mut self, filename: &str) {
        let result = self.write_return_result(filename);
        match result {
            Ok(_) => println!(" ==> {:?}", filename),
            Err(_) => println!("Error while writing file {:?}.", filename),
        }
        if let Err(e) = self.xdmf().write(filename, &[("u", "u/v"), ("f", "f/v")], self.time) {
            println!("Couldn't write xmf file: {}", e);
        }
    }

    fn write_return_result(&mut self, filename: &str) -> Result<()> {
        self.u.backward();
        self.f.backward();
        // Fields
        write_to_hdf5(filename, "v", Some("u"), &self.u.v)?;
        write_to_hdf5(filename, "v", Some("f"), &self.f.v)?;
        // Grid
        write_to_hdf5(filename, "x", None, &self.u.x[0])?;
        write_to_hdf5(filename, "y", None, &self.u.x[1])?;
        write_to_hdf5(filename, "z", None, &self.u.x[2])?;
        // Scalars
        write_scalar_to_hdf5(filename, "time", None, self.time)?;
        write_scalar_to_hdf5(filename, "gamma", None, self.gamma)?;
        write_scalar_to_hdf5(filename, "dt", None, self.dt)?;
        Ok(())
    }

    /// Write two coordinate planes of u, a cheap alternative to the
    /// full checkpoint for monitoring the wave propagation
    fn write_slices(&mut self, filename: &str) -> Result<()> {
        let [_, ny, nz] = self.u.space.shape_phys();
        let uxy = self.u.v.slice(s![.., .., nz / 2]).to_owned();
        let uxz = self.u.v.slice(s![.., ny / 2, ..]).to_owned();
        write_to_hdf5(filename, "uxy", None, &uxy)?;
        write_to_hdf5(filename, "uxz", None, &uxz)?;
        write_to_hdf5(filename, "x", None, &self.u.x[0])?;
        write_to_hdf5(filename, "y", None, &self.u.x[1])?;
        write_to_hdf5(filename, "z", None, &self.u.x[2])?;
        write_scalar_to_hdf5(filename, "time", None, self.time)?;
        Ok(())
    }

    fn xdmf(&self) -> XdmfWriter {
        let shape = self.u.space.shape_phys();
        let x = &self.u.x;
        let origin = [x[0][0], x[1][0], x[2][0]];
        let spacing = [x[0][1] - x[0][0], x[1][1] - x[1][0], x[2][1] - x[2][0]];
        XdmfWriter::new(shape, origin, spacing)
    }

    fn intervall_reached(&self, intervall: Option<f64>) -> bool {
        intervall.map_or(true, |dt_save| {
            (self.time % dt_save) < self.dt / 2. || (self.time % dt_save) > dt_save - self.dt / 2.
        })
    }

    fn report_line(time: f64, energy: f64, ep: f64, ea: f64) -> String {
        format!(
            "Time = {:2.2} Total energy = {:2.8e} Linear momentum {:2.8e} Angular momentum {:2.8e}",
            time, energy, ep, ea,
        )
    }
}

impl Integrate for KleinGordon3D {
    /// Update 1 timestep with the ETDRK4 stage recursion, run on the
    /// system level since the rhs couples both unknowns
    fn update(&mut self) {
        let two = Complex::new(2., 0.);
        let fh = self.f.vhat.clone();
        let uh = self.u.vhat.clone();

        let (n0f, n0u) = self.rhs(&fh, &uh);
        let af = &self.etdrk4.e2 * &fh + &self.etdrk4.q * &n0f;
        let au = &self.etdrk4.e2 * &uh + &self.etdrk4.q * &n0u;
        let (naf, nau) = self.rhs(&af, &au);
        let bf = &self.etdrk4.e2 * &fh + &self.etdrk4.q * &naf;
        let bu = &self.etdrk4.e2 * &uh + &self.etdrk4.q * &nau;
        let (nbf, nbu) = self.rhs(&bf, &bu);
        let cf = &self.etdrk4.e2 * &af + &self.etdrk4.q * &(&nbf * two - &n0f);
        let cu = &self.etdrk4.e2 * &au + &self.etdrk4.q * &(&nbu * two - &n0u);
        let (ncf, ncu) = self.rhs(&cf, &cu);

        self.f.vhat = &self.etdrk4.e * &fh
            + &self.etdrk4.f1 * &n0f
            + &self.etdrk4.f2 * &(&naf + &nbf) * two
            + &self.etdrk4.f3 * &ncf;
        self.u.vhat = &self.etdrk4.e * &uh
            + &self.etdrk4.f1 * &n0u
            + &self.etdrk4.f2 * &(&nau + &nbu) * two
            + &self.etdrk4.f3 * &ncu;

        // update time
        self.time += self.dt;
    }

    fn get_time(&self) -> f64 {
        self.time
    }

    fn get_dt(&self) -> f64 {
        self.dt
    }

    fn callback(&mut self) {
        use std::io::Write;

        std::fs::create_dir_all("data").unwrap();
        self.u.backward();
        self.f.backward();

        // Slices at every callback
        let fname = format!("data/kg_slice{:0>8.2}.h5", self.time);
        if self.write_slices(&fname).is_err() {
            println!("Error while writing file {:?}.", fname);
        }

        // Full checkpoint
        if self.intervall_reached(self.write_intervall) {
            let fname = format!("data/kg{:0>8.2}.h5", self.time);
            self.write(&fname);
        }

        // Diagnostics
        if self.intervall_reached(self.diag_intervall) {
            let ekin = energy_kinetic(&self.f);
            let es = energy_strain(&self.u);
            let eg = energy_potential(&self.u, self.gamma);
            let energy = ekin + es + eg;
            let ep = momentum_linear(&self.f, &self.u, &mut self.field);
            let ea = momentum_angular(&self.f, &self.u, &mut self.field);
            println!("{}", Self::report_line(self.time, energy, ep, ea));

            if let Some(d) = self.diagnostics.get_mut("time") {
                d.push(self.time);
            }
            if let Some(d) = self.diagnostics.get_mut("energy") {
                d.push(energy);
            }
            if let Some(d) = self.diagnostics.get_mut("momentum") {
                d.push(ep);
            }
            if let Some(d) = self.diagnostics.get_mut("angular") {
                d.push(ea);
            }
            let mut file = std::fs::OpenOptions::new()
                .append(true)
                .create(true)
                .open("data/info.txt")
                .unwrap();
            if let Err(e) = writeln!(file, "{} {} {} {}", self.time, energy, ep, ea) {
                eprintln!("Couldn't write to file: {}", e);
            }
        }
    }

    fn exit(&mut self) -> bool {
        // Break if kinetic energy is nan
        energy_kinetic(&self.f).is_nan()
    }
}

/// Apply random disturbance [-c, c] to the field and transform
/// forward
pub fn apply_random_disturbance(field: &mut Field3, c: f64) {
    use ndarray_rand::rand_distr::Uniform;
    use ndarray_rand::RandomExt;
    let shape = field.space.shape_phys();
    let rand: Array3<f64> = Array3::random(shape, Uniform::new(-c, c));
    field.v.assign(&rand);
    field.forward();
}
