//! Simulation with Markov switching dynamics.
//!
//! The regime sequence is supplied by the caller, see [`RegimeChain`] for drawing one.
//!
//! [`RegimeChain`]: ../../regime/struct.RegimeChain.html

use nalgebra::RealField;

use super::coupled::{initial_joint, recurse};
use crate::error::{check_dim, Error, Result};
use crate::models::{JointPrior, MarkovModel, Trajectory};
use crate::noise::NormalSource;

/// Simulate `n` steps with the regime `process[k-1]` governing the transition into step k.
///
/// With every label equal this draws exactly the same trajectory as
/// [`simulate_with_initial_joint`](../coupled/fn.simulate_with_initial_joint.html) with that regime's model.
pub fn simulate_markov<N, R>(
    prior: &JointPrior<N>,
    model: &MarkovModel<N>,
    process: &[usize],
    n: usize,
    rng: &mut R,
) -> Result<Trajectory<N>>
where
    N: RealField + Copy,
    R: NormalSource<N> + ?Sized,
{
    for regime in model.regimes() {
        regime.check()?;
    }
    let mut trajectory = Trajectory::zeros(n, model.n_x(), model.n_y());
    simulate_markov_into(&mut trajectory, prior, model, process, n, rng)?;
    Ok(trajectory)
}

/// Markov switching simulation into a caller allocated trajectory.
pub fn simulate_markov_into<N, R>(
    trajectory: &mut Trajectory<N>,
    prior: &JointPrior<N>,
    model: &MarkovModel<N>,
    process: &[usize],
    n: usize,
    rng: &mut R,
) -> Result<()>
where
    N: RealField + Copy,
    R: NormalSource<N> + ?Sized,
{
    if n == 0 {
        return Err(Error::TooFewSteps);
    }
    for regime in model.regimes() {
        regime.check()?;
    }
    prior.check()?;
    check_dim("t0", model.n_t(), prior.dim())?;
    check_dim("regime sequence", n, process.len())?;
    let regimes = model.regime_count();
    if let Some(step) = process.iter().position(|&regime| regime >= regimes) {
        return Err(Error::RegimeOutOfRange {
            step,
            regime: process[step],
            regimes,
        });
    }
    trajectory.check_shape(n, model.n_x(), model.n_y())?;
    log::debug!(
        "simulate markov n_x={} n_y={} regimes={} steps={}",
        model.n_x(),
        model.n_y(),
        regimes,
        n
    );

    let t = initial_joint(trajectory, prior, model.n_x(), rng)?;
    let models = model.regimes();
    recurse(trajectory, t, n, rng, |k| &models[process[k - 1]]);
    Ok(())
}
