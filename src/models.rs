#![allow(non_snake_case)]

//! Coupled Kalman models.
//!
//! The hidden state x and the observation y are stacked into one coupled vector t = [x; y]
//! driven by a single linear Gaussian recursion
//!
//! t(k) = F.t(k-1) + U'.e(k),  e(k) ~ N(0, I),  U'U = Q
//!
//! Models are plain structs. Constructors validate the shapes so the simulators can assume them.

use nalgebra as na;
use na::{DMatrix, DVector, DVectorSlice, DVectorSliceMut, RealField};

use crate::error::{check_dim, Error, Result};
use crate::noise::SqrtNoise;

fn check_square<N: RealField>(what: &'static str, M: &DMatrix<N>) -> Result<()> {
    if M.is_square() {
        Ok(())
    } else {
        Err(Error::NotSquare {
            what,
            rows: M.nrows(),
            cols: M.ncols(),
        })
    }
}

/// Coupled transition model.
///
/// Transition matrix F and the square root of the coupled noise covariance, both n_t by n_t.
/// The leading n_x elements of the coupled vector are the state, the trailing n_t - n_x the observation.
#[derive(PartialEq, Clone, Debug)]
pub struct CoupledModel<N: RealField> {
    /// Coupled transition matrix
    pub F: DMatrix<N>,
    /// Square root of the coupled noise covariance (upper triangular)
    pub sqrt_Q: DMatrix<N>,
    n_x: usize,
}

impl<N: RealField + Copy> CoupledModel<N> {
    pub fn new(F: DMatrix<N>, sqrt_Q: DMatrix<N>, n_x: usize) -> Result<Self> {
        let model = CoupledModel { F, sqrt_Q, n_x };
        model.check()?;
        Ok(model)
    }

    /// Checks the shapes, the public matrices may have been replaced since construction.
    pub fn check(&self) -> Result<()> {
        check_square("F", &self.F)?;
        check_square("sqrt(Q)", &self.sqrt_Q)?;
        check_dim("sqrt(Q)", self.F.nrows(), self.sqrt_Q.nrows())?;
        if self.n_x > self.F.nrows() {
            return Err(Error::DimensionMismatch {
                what: "state split",
                expected: self.F.nrows(),
                found: self.n_x,
            });
        }
        Ok(())
    }

    /// Creates a CoupledModel from the coupled noise covariance Q, which must be PD.
    pub fn from_covariance(F: DMatrix<N>, Q: &DMatrix<N>, n_x: usize) -> Result<Self> {
        let noise = SqrtNoise::from_covariance(Q)?;
        CoupledModel::new(F, noise.U, n_x)
    }

    /// Coupled dimension.
    pub fn n_t(&self) -> usize {
        self.F.nrows()
    }

    /// State dimension.
    pub fn n_x(&self) -> usize {
        self.n_x
    }

    /// Observation dimension.
    pub fn n_y(&self) -> usize {
        self.F.nrows() - self.n_x
    }
}

/// Prior of the state only at time 0.
#[derive(PartialEq, Clone, Debug)]
pub struct StatePrior<N: RealField> {
    pub x0: DVector<N>,
    /// Square root of the initial state covariance
    pub sqrt_P0: DMatrix<N>,
}

impl<N: RealField + Copy> StatePrior<N> {
    pub fn new(x0: DVector<N>, sqrt_P0: DMatrix<N>) -> Result<Self> {
        let prior = StatePrior { x0, sqrt_P0 };
        prior.check()?;
        Ok(prior)
    }

    pub fn check(&self) -> Result<()> {
        check_square("sqrt(P0)", &self.sqrt_P0)?;
        check_dim("sqrt(P0)", self.x0.nrows(), self.sqrt_P0.nrows())
    }

    pub fn dim(&self) -> usize {
        self.x0.nrows()
    }
}

/// Prior of the whole coupled vector at time 0.
#[derive(PartialEq, Clone, Debug)]
pub struct JointPrior<N: RealField> {
    pub t0: DVector<N>,
    /// Square root of the initial coupled covariance
    pub sqrt_Q0: DMatrix<N>,
}

impl<N: RealField + Copy> JointPrior<N> {
    pub fn new(t0: DVector<N>, sqrt_Q0: DMatrix<N>) -> Result<Self> {
        let prior = JointPrior { t0, sqrt_Q0 };
        prior.check()?;
        Ok(prior)
    }

    pub fn check(&self) -> Result<()> {
        check_square("sqrt(Q0)", &self.sqrt_Q0)?;
        check_dim("sqrt(Q0)", self.t0.nrows(), self.sqrt_Q0.nrows())
    }

    pub fn dim(&self) -> usize {
        self.t0.nrows()
    }
}

/// Linear observation of a known state sequence.
///
/// y = F_yx.x + U'.e with U'U = Q_yy.
#[derive(PartialEq, Clone, Debug)]
pub struct ObservationModel<N: RealField> {
    /// Observation matrix, n_y by n_x
    pub F_yx: DMatrix<N>,
    /// Square root of the observation noise covariance
    pub sqrt_Q_yy: DMatrix<N>,
}

impl<N: RealField + Copy> ObservationModel<N> {
    pub fn new(F_yx: DMatrix<N>, sqrt_Q_yy: DMatrix<N>) -> Result<Self> {
        let model = ObservationModel { F_yx, sqrt_Q_yy };
        model.check()?;
        Ok(model)
    }

    pub fn check(&self) -> Result<()> {
        check_square("sqrt(Q_yy)", &self.sqrt_Q_yy)?;
        check_dim("sqrt(Q_yy)", self.F_yx.nrows(), self.sqrt_Q_yy.nrows())
    }

    pub fn n_x(&self) -> usize {
        self.F_yx.ncols()
    }

    pub fn n_y(&self) -> usize {
        self.F_yx.nrows()
    }
}

/// Markov switching coupled model.
///
/// One (F, sqrt(Q)) pair per regime. All regimes share the same split of the coupled vector.
#[derive(PartialEq, Clone, Debug)]
pub struct MarkovModel<N: RealField> {
    regimes: Vec<CoupledModel<N>>,
}

impl<N: RealField + Copy> MarkovModel<N> {
    pub fn new(regimes: Vec<CoupledModel<N>>) -> Result<Self> {
        let first = regimes.first().ok_or(Error::NoRegimes)?;
        for regime in &regimes[1..] {
            check_dim("regime coupled dimension", first.n_t(), regime.n_t())?;
            check_dim("regime state dimension", first.n_x(), regime.n_x())?;
        }
        Ok(MarkovModel { regimes })
    }

    pub fn regimes(&self) -> &[CoupledModel<N>] {
        &self.regimes
    }

    pub fn regime_count(&self) -> usize {
        self.regimes.len()
    }

    pub fn n_t(&self) -> usize {
        self.regimes[0].n_t()
    }

    pub fn n_x(&self) -> usize {
        self.regimes[0].n_x()
    }

    pub fn n_y(&self) -> usize {
        self.regimes[0].n_y()
    }
}

/// Coupled vector t = [x; y].
///
/// A single backing vector viewed as state and observation parts without copying.
#[derive(PartialEq, Clone, Debug)]
pub struct CoupledVector<N: RealField> {
    pub t: DVector<N>,
    n_x: usize,
}

impl<N: RealField + Copy> CoupledVector<N> {
    pub fn zeros(n_x: usize, n_y: usize) -> Self {
        CoupledVector {
            t: DVector::zeros(n_x + n_y),
            n_x,
        }
    }

    pub fn from_parts(t: DVector<N>, n_x: usize) -> Result<Self> {
        if n_x > t.nrows() {
            return Err(Error::DimensionMismatch {
                what: "state split",
                expected: t.nrows(),
                found: n_x,
            });
        }
        Ok(CoupledVector { t, n_x })
    }

    pub fn n_x(&self) -> usize {
        self.n_x
    }

    pub fn n_y(&self) -> usize {
        self.t.nrows() - self.n_x
    }

    pub fn x(&self) -> DVectorSlice<'_, N> {
        self.t.rows(0, self.n_x)
    }

    pub fn y(&self) -> DVectorSlice<'_, N> {
        self.t.rows(self.n_x, self.n_y())
    }

    pub fn x_mut(&mut self) -> DVectorSliceMut<'_, N> {
        let n_x = self.n_x;
        self.t.rows_mut(0, n_x)
    }

    pub fn y_mut(&mut self) -> DVectorSliceMut<'_, N> {
        let (n_x, n_y) = (self.n_x, self.n_y());
        self.t.rows_mut(n_x, n_y)
    }
}

/// Trajectory of a coupled model.
///
/// n+1 states x[0..n] and n observations y[0..n-1]; y[k-1] is emitted together with x[k].
#[derive(PartialEq, Clone, Debug)]
pub struct Trajectory<N: RealField> {
    pub x: Vec<DVector<N>>,
    pub y: Vec<DVector<N>>,
}

impl<N: RealField + Copy> Trajectory<N> {
    /// Pre-allocate a trajectory of `n` steps.
    pub fn zeros(n: usize, n_x: usize, n_y: usize) -> Self {
        Trajectory {
            x: vec![DVector::zeros(n_x); n + 1],
            y: vec![DVector::zeros(n_y); n],
        }
    }

    /// Number of transitions, the number of observations.
    pub fn steps(&self) -> usize {
        self.y.len()
    }

    /// Checks the trajectory buffers hold exactly `n` steps of the given dimensions.
    pub fn check_shape(&self, n: usize, n_x: usize, n_y: usize) -> Result<()> {
        check_dim("trajectory states", n + 1, self.x.len())?;
        check_dim("trajectory observations", n, self.y.len())?;
        for x in &self.x {
            check_dim("trajectory state", n_x, x.nrows())?;
        }
        for y in &self.y {
            check_dim("trajectory observation", n_y, y.nrows())?;
        }
        Ok(())
    }

    /// The coupled vector [x[k]; y[k-1]] for 1 <= k <= steps.
    pub fn coupled(&self, k: usize) -> Option<CoupledVector<N>> {
        if k == 0 || k > self.steps() {
            return None;
        }
        let (x, y) = (&self.x[k], &self.y[k - 1]);
        let mut c = CoupledVector::zeros(x.nrows(), y.nrows());
        c.x_mut().copy_from(x);
        c.y_mut().copy_from(y);
        Some(c)
    }
}
