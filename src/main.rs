//! Run the Klein-Gordon demo
//!
//! cargo run --release
use kleingordon::integrate;
use kleingordon::kg::KleinGordon3D;
use kleingordon::Integrate;

fn main() {
    // Parameters
    let (n, gamma, dt) = (32, 1.0, 0.005);
    let mut kg = KleinGordon3D::new(n, gamma, dt);
    kg.write_intervall = Some(0.25);
    kg.diag_intervall = Some(0.5);
    // Initial state
    kg.callback();
    integrate(&mut kg, 100., Some(0.05));
}
