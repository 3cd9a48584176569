//! Simulation with fixed coupled dynamics.

use nalgebra::RealField;

use crate::error::{check_dim, Error, Result};
use crate::models::{CoupledModel, CoupledVector, JointPrior, StatePrior, Trajectory};
use crate::noise::{add_sqrt_noise, NormalSource};

/// Simulate `n` steps from a prior on the state only.
///
/// x[0] = x0 + sqrt(P0)'.e, the observation part of the coupled vector is zero before the first transition.
pub fn simulate<N, R>(prior: &StatePrior<N>, model: &CoupledModel<N>, n: usize, rng: &mut R) -> Result<Trajectory<N>>
where
    N: RealField + Copy,
    R: NormalSource<N> + ?Sized,
{
    model.check()?;
    let mut trajectory = Trajectory::zeros(n, model.n_x(), model.n_y());
    simulate_into(&mut trajectory, prior, model, n, rng)?;
    Ok(trajectory)
}

/// Simulate `n` steps from a prior on the state only into a caller allocated trajectory.
pub fn simulate_into<N, R>(
    trajectory: &mut Trajectory<N>,
    prior: &StatePrior<N>,
    model: &CoupledModel<N>,
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
    model.check()?;
    prior.check()?;
    check_dim("x0", model.n_x(), prior.dim())?;
    trajectory.check_shape(n, model.n_x(), model.n_y())?;
    log::debug!("simulate n_x={} n_y={} steps={}", model.n_x(), model.n_y(), n);

    let mut t = CoupledVector::zeros(model.n_x(), model.n_y());
    {
        let x0 = &mut trajectory.x[0];
        x0.copy_from(&prior.x0);
        add_sqrt_noise(x0, &prior.sqrt_P0, rng);
        t.x_mut().copy_from(&*x0);
    }

    recurse(trajectory, t, n, rng, |_| model);
    Ok(())
}

/// Simulate `n` steps from a prior on the whole coupled vector.
///
/// t(0) = t0 + sqrt(Q0)'.e, x[0] is the state part of t(0). The observation part conditions the first transition.
pub fn simulate_with_initial_joint<N, R>(
    prior: &JointPrior<N>,
    model: &CoupledModel<N>,
    n: usize,
    rng: &mut R,
) -> Result<Trajectory<N>>
where
    N: RealField + Copy,
    R: NormalSource<N> + ?Sized,
{
    model.check()?;
    let mut trajectory = Trajectory::zeros(n, model.n_x(), model.n_y());
    simulate_with_initial_joint_into(&mut trajectory, prior, model, n, rng)?;
    Ok(trajectory)
}

/// Simulate `n` steps from a prior on the whole coupled vector into a caller allocated trajectory.
pub fn simulate_with_initial_joint_into<N, R>(
    trajectory: &mut Trajectory<N>,
    prior: &JointPrior<N>,
    model: &CoupledModel<N>,
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
    model.check()?;
    prior.check()?;
    check_dim("t0", model.n_t(), prior.dim())?;
    trajectory.check_shape(n, model.n_x(), model.n_y())?;
    log::debug!("simulate joint n_x={} n_y={} steps={}", model.n_x(), model.n_y(), n);

    let t = initial_joint(trajectory, prior, model.n_x(), rng)?;
    recurse(trajectory, t, n, rng, |_| model);
    Ok(())
}

/// Draw the initial coupled vector and record its state part as x[0].
pub(crate) fn initial_joint<N, R>(
    trajectory: &mut Trajectory<N>,
    prior: &JointPrior<N>,
    n_x: usize,
    rng: &mut R,
) -> Result<CoupledVector<N>>
where
    N: RealField + Copy,
    R: NormalSource<N> + ?Sized,
{
    let mut t0 = prior.t0.clone();
    add_sqrt_noise(&mut t0, &prior.sqrt_Q0, rng);
    let t = CoupledVector::from_parts(t0, n_x)?;
    trajectory.x[0].copy_from(&t.x());
    Ok(t)
}

/// The coupled recursion t(k) = F.t(k-1) + sqrt(Q)'.e for k = 1..n.
///
/// `model_at(k)` selects the model governing the transition into step k.
pub(crate) fn recurse<'m, N, R, M>(
    trajectory: &mut Trajectory<N>,
    mut t: CoupledVector<N>,
    n: usize,
    rng: &mut R,
    model_at: M,
)
where
    N: RealField + Copy,
    R: NormalSource<N> + ?Sized,
    N: 'm,
    M: Fn(usize) -> &'m CoupledModel<N>,
{
    for k in 1..=n {
        let model = model_at(k);
        let mut t_next = &model.F * &t.t;
        add_sqrt_noise(&mut t_next, &model.sqrt_Q, rng);
        t.t = t_next;

        trajectory.x[k].copy_from(&t.x());
        trajectory.y[k - 1].copy_from(&t.y());
    }
}
