//! Upper triangular Cholesky factorisation.
//!
//! U'U factorisation of positive (semi-)definite matrices. Where:
//! U is upper triangular with a non negative diagonal
//!
//! Storage:
//! upper_triangle(M) = U, strict_lower_triangle(M) zeroed
//!
//! This is the square root form used for all covariances of the coupled model:
//! a noise with covariance Q = U'U is generated as U'.e where e ~ N(0, I).

use nalgebra as na;
use na::{allocator::Allocator, DefaultAllocator};
use na::{Dim, MatrixMN, MatrixN, RealField};

use super::rcond;

pub struct UpperCholesky<N: RealField> {
    pub zero: N,
    pub one: N,
    pub minus_one: N,
}

impl<N: RealField + Copy> UpperCholesky<N> {
    pub fn new() -> UpperCholesky<N> {
        UpperCholesky {
            zero: N::zero(),
            one: N::one(),
            minus_one: -N::one(),
        }
    }

    /// In place upper triangular Cholesky factor of a Positive definite or semi-definite matrix M.
    ///
    /// Row oriented: row j of U is computed from rows 0..j which are already factorised.
    ///
    /// Input: M, Strict lower triangle of M is ignored in computation
    ///
    /// Output: M as U'U factor, upper_triangle(M) = U, strict_lower_triangle(M) = 0
    ///
    /// Return: reciprocal condition number, -1 if negative, 0 if semi-definite (including zero)
    pub fn factor<D: Dim>(&self, M: &mut MatrixN<N, D>) -> N
    where
        DefaultAllocator: Allocator<N, D, D>,
    {
        let n = M.nrows();
        for j in 0..n {
            let mut d = M[(j, j)];
            for k in 0..j {
                let u = M[(k, j)];
                d -= u * u;
            }

            // Diagonal element
            if d > self.zero {
                // Positive definite
                d = d.sqrt();
                M[(j, j)] = d;

                for i in j + 1..n {
                    let mut e = M[(j, i)];
                    for k in 0..j {
                        e -= M[(k, j)] * M[(k, i)];
                    }
                    M[(j, i)] = e / d;
                }
            } else if d == self.zero {
                // Possibly semi-definite, the rest of the row must vanish
                M[(j, j)] = self.zero;
                for i in j + 1..n {
                    let mut e = M[(j, i)];
                    for k in 0..j {
                        e -= M[(k, j)] * M[(k, i)];
                    }
                    if e != self.zero {
                        return self.minus_one;
                    }
                    M[(j, i)] = self.zero;
                }
            } else {
                // Negative or NaN
                return self.minus_one;
            }
        }

        self.Lzero(M);

        // Estimate the reciprocal condition number
        rcond::rcond_factor(&*M)
    }

    /// Recompose the symmetric matrix U'U from its factor.
    pub fn recompose<R: Dim, C: Dim>(U: &MatrixMN<N, R, C>) -> MatrixN<N, C>
    where
        DefaultAllocator: Allocator<N, R, C> + Allocator<N, C, C>,
    {
        U.tr_mul(U)
    }

    /// Zero strict lower triangle of Matrix.
    pub fn Lzero<D: Dim>(&self, M: &mut MatrixN<N, D>)
    where
        DefaultAllocator: Allocator<N, D, D>,
    {
        let n = M.nrows();
        for i in 1..n {
            for j in 0..i {
                M[(i, j)] = self.zero;
            }
        }
    }
}

impl<N: RealField + Copy> Default for UpperCholesky<N> {
    fn default() -> Self {
        UpperCholesky::new()
    }
}

/// Check the factor is truly upper triangular with a non negative diagonal.
pub fn is_upper_factor<N: RealField + Copy, D: Dim>(U: &MatrixN<N, D>) -> bool
where
    DefaultAllocator: Allocator<N, D, D>,
{
    let n = U.nrows();
    for i in 0..n {
        if !(U[(i, i)] >= N::zero()) {
            return false;
        }
        for j in 0..i {
            if U[(i, j)] != N::zero() {
                return false;
            }
        }
    }
    true
}
