#![allow(non_snake_case)]

//! Gaussian noise in square root form.
//!
//! All randomness enters through a [`NormalSource`] supplied by the caller, never a global generator.
//! Correlated noise is injected as U'.e with e ~ N(0, I) and U an upper triangular factor of the covariance.
//!
//! [`NormalSource`]: trait.NormalSource.html

use nalgebra as na;
use na::{DMatrix, DVector, RealField};
use rand_core::RngCore;
use rand_distr::{Distribution, StandardNormal};

use crate::error::{check_dim, Error, Result};
use crate::linalg::{self, cholesky::UpperCholesky};

/// A source of i.i.d. standard normal draws.
pub trait NormalSource<N> {
    /// Draw from N(0, 1).
    fn standard_normal(&mut self) -> N;
}

/// Any random number generator is a normal source by way of the `StandardNormal` distribution.
impl<N, R: RngCore + ?Sized> NormalSource<N> for R
where
    StandardNormal: Distribution<N>,
{
    fn standard_normal(&mut self) -> N {
        StandardNormal.sample(self)
    }
}

/// Vector of `dim` i.i.d. standard normal draws.
pub fn standard_normal_vector<N, R>(dim: usize, rng: &mut R) -> DVector<N>
where
    N: RealField + Copy,
    R: NormalSource<N> + ?Sized,
{
    DVector::from_fn(dim, |_, _| rng.standard_normal())
}

/// Add correlated noise U'.e to `mean`, e ~ N(0, I).
///
/// Draws exactly U.nrows() normals.
pub fn add_sqrt_noise<N, R>(mean: &mut DVector<N>, U: &DMatrix<N>, rng: &mut R)
where
    N: RealField + Copy,
    R: NormalSource<N> + ?Sized,
{
    let e = standard_normal_vector(U.nrows(), rng);
    mean.gemv_tr(N::one(), U, &e, N::one());
}

/// Additive noise.
///
/// Noise represented as the upper triangular square root U of the noise covariance, U'U = Q.
#[derive(PartialEq, Clone, Debug)]
pub struct SqrtNoise<N: RealField> {
    /// Square root of the noise covariance
    pub U: DMatrix<N>,
}

impl<N: RealField + Copy> SqrtNoise<N> {
    /// Creates a SqrtNoise from a square root factor.
    pub fn new(U: DMatrix<N>) -> Result<Self> {
        if !U.is_square() {
            return Err(Error::NotSquare {
                what: "noise square root",
                rows: U.nrows(),
                cols: U.ncols(),
            });
        }
        Ok(SqrtNoise { U })
    }

    /// Noise free.
    pub fn zeros(dim: usize) -> Self {
        SqrtNoise {
            U: DMatrix::zeros(dim, dim),
        }
    }

    /// Creates a SqrtNoise from a noise covariance.
    /// The covariance must be PD.
    pub fn from_covariance(Q: &DMatrix<N>) -> Result<Self> {
        let U = linalg::cholesky_upper(Q, "noise covariance not PD")?;
        Ok(SqrtNoise { U })
    }

    /// Creates a SqrtNoise from independent noise variances.
    pub fn from_variances(q: &DVector<N>) -> Result<Self> {
        let mut U = DMatrix::zeros(q.nrows(), q.nrows());
        for i in 0..q.nrows() {
            if q[i] < N::zero() || q[i] != q[i] {
                return Err(Error::DecompositionFailed("negative noise variance"));
            }
            U[(i, i)] = q[i].sqrt();
        }
        Ok(SqrtNoise { U })
    }

    pub fn dim(&self) -> usize {
        self.U.nrows()
    }

    /// The noise covariance Q = U'U.
    pub fn covariance(&self) -> DMatrix<N> {
        UpperCholesky::recompose(&self.U)
    }

    /// Draw a sample of the noise added to `mean`.
    pub fn sample<R: NormalSource<N> + ?Sized>(&self, mean: &DVector<N>, rng: &mut R) -> Result<DVector<N>> {
        check_dim("noise mean", self.dim(), mean.nrows())?;
        let mut s = mean.clone();
        add_sqrt_noise(&mut s, &self.U, rng);
        Ok(s)
    }
}
