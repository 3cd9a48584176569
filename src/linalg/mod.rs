//! Dense linear algebra support for the square root form.

pub mod cholesky;
pub mod rcond;

use nalgebra::{DMatrix, RealField};

use crate::error::{Error, Result};
use cholesky::UpperCholesky;

/// Reciprocal condition numbers below this many epsilons are reported as ill conditioned.
const ILL_CONDITIONED_EPSILONS: f64 = 1e5;

/// Relative pivots at or below this many epsilons are rounding residue of a singular matrix.
const SINGULAR_EPSILONS: f64 = 1e3;

/// Checks the reciprocal condition number is > 0.
///
/// IEC 559 NaN values are never true
pub fn check_positive<N: RealField + Copy>(rcond: N, what: &'static str) -> Result<N> {
    if rcond > N::zero() {
        Ok(rcond)
    } else {
        Err(Error::DecompositionFailed(what))
    }
}

/// Upper triangular Cholesky factor U of a positive definite matrix M, U'U = M.
///
/// Only the upper triangle of M is used.
/// A factor whose relative pivot is lost in rounding is rejected as for a singular M.
pub fn cholesky_upper<N: RealField + Copy>(M: &DMatrix<N>, what: &'static str) -> Result<DMatrix<N>> {
    if !M.is_square() {
        return Err(Error::NotSquare {
            what,
            rows: M.nrows(),
            cols: M.ncols(),
        });
    }

    let mut U = M.clone();
    let rcond = UpperCholesky::new().factor(&mut U);
    check_positive(rcond, what)?;

    let singular = N::default_epsilon() * nalgebra::convert::<f64, N>(SINGULAR_EPSILONS);
    if rcond::relative_pivot(M, &U) <= singular {
        return Err(Error::DecompositionFailed(what));
    }

    let limit = N::default_epsilon() * nalgebra::convert::<f64, N>(ILL_CONDITIONED_EPSILONS);
    if rcond < limit {
        log::warn!("{} is ill conditioned, rcond {:?}", what, rcond);
    }
    Ok(U)
}
