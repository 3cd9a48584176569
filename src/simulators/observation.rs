#![allow(non_snake_case)]

//! Observation noise for a known state sequence.

use nalgebra::{DVector, RealField};

use crate::error::{check_dim, Error, Result};
use crate::models::ObservationModel;
use crate::noise::{add_sqrt_noise, NormalSource};

/// Observe each state independently: y[k] = F_yx.x[k] + sqrt(Q_yy)'.e(k).
pub fn simulate_observation_only<N, R>(
    states: &[DVector<N>],
    model: &ObservationModel<N>,
    rng: &mut R,
) -> Result<Vec<DVector<N>>>
where
    N: RealField + Copy,
    R: NormalSource<N> + ?Sized,
{
    let mut y = vec![DVector::zeros(model.n_y()); states.len()];
    simulate_observation_only_into(&mut y, states, model, rng)?;
    Ok(y)
}

/// Observation of a known state sequence into caller allocated observations.
pub fn simulate_observation_only_into<N, R>(
    y: &mut [DVector<N>],
    states: &[DVector<N>],
    model: &ObservationModel<N>,
    rng: &mut R,
) -> Result<()>
where
    N: RealField + Copy,
    R: NormalSource<N> + ?Sized,
{
    let n = states.len();
    if n == 0 {
        return Err(Error::TooFewSteps);
    }
    model.check()?;
    check_dim("observations", n, y.len())?;
    for x in states {
        check_dim("observed state", model.n_x(), x.nrows())?;
    }
    for yk in y.iter() {
        check_dim("observation", model.n_y(), yk.nrows())?;
    }
    log::debug!("simulate observations n_x={} n_y={} steps={}", model.n_x(), model.n_y(), n);

    let F_yx = &model.F_yx;
    for (yk, xk) in y.iter_mut().zip(states) {
        yk.gemv(N::one(), F_yx, xk, N::zero());
        add_sqrt_noise(yk, &model.sqrt_Q_yy, rng);
    }
    Ok(())
}
