//! Integrate trait and driver loop
const MAX_TIMESTEP: usize = 10_000_000;

/// Integrate trait, step forward in time, and write results
pub trait Integrate {
    /// Update solution
    fn update(&mut self);
    /// Receive current time
    fn get_time(&self) -> f64;
    /// Get timestep
    fn get_dt(&self) -> f64;
    /// Callback function (can be used for diagnostics and output)
    fn callback(&mut self);
    /// Additional break criteria, evaluated each timestep
    fn exit(&mut self) -> bool;
}

/// Integrate pde, that implements the Integrate trait.
///
/// Specify `save_intervall` to invoke the pde's callback
/// in fixed time intervalls.
///
/// Stop criteria:
/// 1. Timestep limit
/// 2. Time limit
/// 3. `exit` returns true (blow up detection)
pub fn integrate<T: Integrate>(pde: &mut T, max_time: f64, save_intervall: Option<f64>) {
    let mut timestep: usize = 0;
    let eps_dt = pde.get_dt() * 1e-4;
    loop {
        // Update
        pde.update();
        timestep += 1;

        // Save
        if let Some(dt_save) = &save_intervall {
            if (pde.get_time() % dt_save) < pde.get_dt() / 2.
                || (pde.get_time() % dt_save) > dt_save - pde.get_dt() / 2.
            {
                pde.callback();
            }
        }

        // Break
        if pde.get_time() + eps_dt >= max_time {
            println!("time limit reached: {:?}", pde.get_time());
            break;
        }
        if timestep >= MAX_TIMESTEP {
            println!("timestep limit reached: {:?}", timestep);
            break;
        }
        if pde.exit() {
            println!("break criteria triggered");
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dummy {
        time: f64,
        dt: f64,
        callbacks: usize,
    }

    impl Integrate for Dummy {
        fn update(&mut self) {
            self.time += self.dt;
        }
        fn get_time(&self) -> f64 {
            self.time
        }
        fn get_dt(&self) -> f64 {
            self.dt
        }
        fn callback(&mut self) {
            self.callbacks += 1;
        }
        fn exit(&mut self) -> bool {
            false
        }
    }

    #[test]
    fn test_integrate_loop() {
        let mut pde = Dummy {
            time: 0.,
            dt: 0.1,
            callbacks: 0,
        };
        integrate(&mut pde, 1., Some(0.5));
        assert!((pde.time - 1.).abs() < 1e-10);
        assert_eq!(pde.callbacks, 2);
    }
}
