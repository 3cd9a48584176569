use nalgebra::{allocator::Allocator, DefaultAllocator, Dim, MatrixMN, RealField};

/* Estimate the reciprocal condition number of a matrix for inversion from its diagonal.
 *
 * The Condition Number is defined from a matrix norm.
 *  Choose max element of the diagonal as the norm of the matrix.
 *  Assume this norm for inverse matrix is min element of the diagonal.
 *  Therefore rcond = min/max
 *
 * Note:
 *  Defined to be 0 for semi-definite and 0 for an empty matrix
 *  Defined to be 0 for max and min infinite
 *  Defined to be <0 for negative matrix (diagonal element < 0)
 *  Defined to be <0 with any NaN element
 *
 *  By definition rcond <= 1 as min<=max
 */
pub fn rcond_diagonal<N: RealField + Copy, R: Dim, C: Dim>(sm: &MatrixMN<N, R, C>) -> N
where
    DefaultAllocator: Allocator<N, R, C>,
{
    let n = sm.nrows().min(sm.ncols());
    if n == 0 {
        return N::zero();
    }

    let mut mind = sm[(0, 0)];
    let mut maxd = mind;
    for i in 0..n {
        let d = sm[(i, i)];
        if d != d {
            // NaN
            mind = -N::one();
            break;
        }
        if d < mind {
            mind = d;
        }
        if d > maxd {
            maxd = d;
        }
    }

    rcond_min_max(mind, maxd)
}

/// Reciprocal condition number of the matrix U'U for an upper triangular factor U.
///
/// The rcond of U'U is the square of the rcond of diagonal(U).
pub fn rcond_factor<N: RealField + Copy, R: Dim, C: Dim>(U: &MatrixMN<N, R, C>) -> N
where
    DefaultAllocator: Allocator<N, R, C>,
{
    let rcond = rcond_diagonal(U);
    // Square, keeping the sign of a negative result
    if rcond < N::zero() {
        -(rcond * rcond)
    } else {
        rcond * rcond
    }
}

fn rcond_min_max<N: RealField + Copy>(mind: N, maxd: N) -> N {
    if mind < N::zero() {
        // matrix is negative
        mind
    } else {
        let rcond = mind / maxd;
        if rcond != rcond {
            // NaN, singular due to (mind == maxd) == (zero or infinity)
            N::zero()
        } else {
            rcond
        }
    }
}

/// Smallest squared pivot of the factor U of M relative to the diagonal of M, min(U[j,j]^2 / M[j,j]).
///
/// Invariant to a diagonal scaling of M, in [0,1] for a PD M and of the order of epsilon when M is numerically singular.
pub fn relative_pivot<N: RealField + Copy, D: Dim>(M: &MatrixMN<N, D, D>, U: &MatrixMN<N, D, D>) -> N
where
    DefaultAllocator: Allocator<N, D, D>,
{
    let mut minp = N::one();
    for j in 0..M.nrows().min(U.nrows()) {
        let u = U[(j, j)];
        let p = u * u / M[(j, j)];
        if p < minp {
            minp = p;
        }
    }
    minp
}
