#![allow(non_snake_case)]

//! Moment based initialisation of EM parameter estimation.
//!
//! The sample mean and the Cholesky factor of the sample covariance of an observation sequence seed the
//! initial state mean, the initial state covariance and the observation noise covariance.
//!
//! The initial state covariance guess is the observation noise covariance guess, sqrt(P0) = sqrt(Q_yy).
//! This is a heuristic of the seed, not a property of the model.

use nalgebra as na;
use na::{DMatrix, DVector, RealField};

use crate::error::{check_dim, Error, Result};
use crate::linalg;
use crate::linalg::cholesky::UpperCholesky;

/// Minimum number of observations for a sample covariance.
pub const MIN_SAMPLES: usize = 2;

/// Initial guess for EM.
#[derive(PartialEq, Clone, Debug)]
pub struct EmSeed<N: RealField> {
    /// Initial state mean
    pub x0: DVector<N>,
    /// Square root of the initial state covariance
    pub sqrt_P0: DMatrix<N>,
    /// Square root of the observation noise covariance
    pub sqrt_Q_yy: DMatrix<N>,
}

impl<N: RealField + Copy> EmSeed<N> {
    pub fn zeros(dim: usize) -> Self {
        EmSeed {
            x0: DVector::zeros(dim),
            sqrt_P0: DMatrix::zeros(dim, dim),
            sqrt_Q_yy: DMatrix::zeros(dim, dim),
        }
    }

    pub fn dim(&self) -> usize {
        self.x0.nrows()
    }

    /// The estimated sample covariance, sqrt(Q_yy)'.sqrt(Q_yy).
    pub fn covariance(&self) -> DMatrix<N> {
        UpperCholesky::recompose(&self.sqrt_Q_yy)
    }

    fn check_shape(&self) -> Result<()> {
        let dim = self.dim();
        check_dim("sqrt(P0) rows", dim, self.sqrt_P0.nrows())?;
        check_dim("sqrt(P0) cols", dim, self.sqrt_P0.ncols())?;
        check_dim("sqrt(Q_yy) rows", dim, self.sqrt_Q_yy.nrows())?;
        check_dim("sqrt(Q_yy) cols", dim, self.sqrt_Q_yy.ncols())
    }
}

/// Estimate the EM seed from an observation sequence of at least two samples.
pub fn estimate<N: RealField + Copy>(observations: &[DVector<N>]) -> Result<EmSeed<N>> {
    let first = observations.first().ok_or(Error::InsufficientSamples {
        found: 0,
        required: MIN_SAMPLES,
    })?;
    let mut seed = EmSeed::zeros(first.nrows());
    estimate_into(&mut seed, observations)?;
    Ok(seed)
}

/// Estimate the EM seed overwriting caller allocated outputs.
///
/// `seed` must be sized to the observation dimension. On error `seed` is unmodified.
pub fn estimate_into<N: RealField + Copy>(seed: &mut EmSeed<N>, observations: &[DVector<N>]) -> Result<()> {
    if observations.len() < MIN_SAMPLES {
        return Err(Error::InsufficientSamples {
            found: observations.len(),
            required: MIN_SAMPLES,
        });
    }
    seed.check_shape()?;
    let mean = sample_mean(observations)?;
    check_dim("observation", seed.dim(), mean.nrows())?;
    let S = sample_covariance(observations, &mean)?;
    log::debug!("estimate em seed dim={} samples={}", seed.dim(), observations.len());

    let U = linalg::cholesky_upper(&S, "sample covariance not PD")?;

    seed.x0.copy_from(&mean);
    seed.sqrt_Q_yy.copy_from(&U);
    seed.sqrt_P0.copy_from(&U);
    Ok(())
}

/// Sample mean (1/n).sum(observations).
pub fn sample_mean<N: RealField + Copy>(observations: &[DVector<N>]) -> Result<DVector<N>> {
    let first = observations.first().ok_or(Error::InsufficientSamples {
        found: 0,
        required: 1,
    })?;
    let mut mean = DVector::zeros(first.nrows());
    for o in observations {
        check_dim("observation", mean.nrows(), o.nrows())?;
        mean += o;
    }
    mean /= count::<N>(observations.len());
    Ok(mean)
}

/// Unbiased sample covariance (1/(n-1)).sum((o-mean).(o-mean)') about a given mean.
pub fn sample_covariance<N: RealField + Copy>(observations: &[DVector<N>], mean: &DVector<N>) -> Result<DMatrix<N>> {
    let n = observations.len();
    if n < MIN_SAMPLES {
        return Err(Error::InsufficientSamples {
            found: n,
            required: MIN_SAMPLES,
        });
    }

    let dim = mean.nrows();
    let mut S = DMatrix::zeros(dim, dim);
    for o in observations {
        check_dim("observation", dim, o.nrows())?;
        let d = o - mean;
        S.ger(N::one(), &d, &d, N::one());
    }
    S /= count::<N>(n - 1);
    Ok(S)
}

fn count<N: RealField>(n: usize) -> N {
    na::convert(n as f64)
}
