//! Simulation and EM initialisation in a simple example.
//!
//! A scalar state observed through a coupled model, then the observations seed EM.

use na::{DMatrix, DVector};
use nalgebra as na;
use rand::SeedableRng;

use tkalman::estimators::em_init;
use tkalman::models::{CoupledModel, StatePrior};
use tkalman::simulators;

fn main() {
    // We need random numbers, seeded so the run is repeatable
    let mut rng = rand::rngs::StdRng::seed_from_u64(1);

    // Coupled model t = [x; y], x decays, y observes the previous x
    let model = CoupledModel::new(
        DMatrix::from_row_slice(2, 2, &[0.9, 0., 1., 0.]),
        DMatrix::identity(2, 2) * 0.1,
        1,
    )
    .unwrap();

    // Initially at 0 with a little uncertainty
    let prior = StatePrior::new(DVector::from_element(1, 0.), DMatrix::from_element(1, 1, 0.1)).unwrap();

    let trajectory = simulators::simulate(&prior, &model, 100, &mut rng).unwrap();
    println!("x[100] {:.3} y[99] {:.3}", trajectory.x[100], trajectory.y[99]);

    // Seed EM from the simulated observations
    let seed = em_init::estimate(&trajectory.y).unwrap();
    println!("x0 {:.3} sqrt(Q_yy) {:.3}", seed.x0, seed.sqrt_Q_yy);
}
