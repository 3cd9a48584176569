#![allow(non_snake_case)]

//! Test the square root linear algebra.

use na::{DMatrix, Matrix2};
use nalgebra as na;

use tkalman::linalg::cholesky::{is_upper_factor, UpperCholesky};
use tkalman::linalg::{cholesky_upper, rcond};
use tkalman::Error;

#[test]
fn test_factor_known() {
    let M = DMatrix::from_row_slice(2, 2, &[4., 2., 2., 3.]);
    let mut U = M.clone();
    let rcond = UpperCholesky::new().factor(&mut U);
    println!("U {:}", U);

    assert!(rcond > 0.);
    assert!(is_upper_factor(&U));
    approx::assert_relative_eq!(U[(0, 0)], 2., max_relative = 1e-12);
    approx::assert_relative_eq!(U[(0, 1)], 1., max_relative = 1e-12);
    approx::assert_relative_eq!(U[(1, 1)], 2f64.sqrt(), max_relative = 1e-12);
    assert_eq!(U[(1, 0)], 0.);

    approx::assert_relative_eq!(UpperCholesky::recompose(&U), M, max_relative = 1e-12);
}

#[test]
fn test_factor_matches_nalgebra() {
    let M = DMatrix::from_row_slice(3, 3, &[
        2.0, 0.3, -0.4,
        0.3, 1.5, 0.2,
        -0.4, 0.2, 0.9]);
    let U = cholesky_upper(&M, "M").unwrap();
    let L = M.clone().cholesky().unwrap().l();
    approx::assert_relative_eq!(U, L.transpose(), max_relative = 1e-10);
}

#[test]
fn test_factor_lower_triangle_ignored() {
    let mut M = Matrix2::new(4., 2., 100., 3.);
    let rcond = UpperCholesky::new().factor(&mut M);
    assert!(rcond > 0.);
    approx::assert_relative_eq!(M, Matrix2::new(2., 1., 0., 2f64.sqrt()), max_relative = 1e-12);
}

#[test]
fn test_factor_semi_definite() {
    let mut M = DMatrix::from_row_slice(2, 2, &[1., 1., 1., 1.]);
    let rcond = UpperCholesky::new().factor(&mut M);
    assert_eq!(rcond, 0.);
    assert!(is_upper_factor(&M));
}

#[test]
fn test_factor_negative() {
    let mut M = DMatrix::from_row_slice(2, 2, &[1., 2., 2., 1.]);
    let rcond = UpperCholesky::new().factor(&mut M);
    assert!(rcond < 0.);

    let mut N = DMatrix::from_row_slice(1, 1, &[f64::NAN]);
    assert!(UpperCholesky::new().factor(&mut N) < 0.);
}

#[test]
fn test_cholesky_upper_errors() {
    let not_square = DMatrix::<f64>::zeros(2, 3);
    assert_eq!(
        cholesky_upper(&not_square, "M"),
        Err(Error::NotSquare { what: "M", rows: 2, cols: 3 })
    );

    let zero = DMatrix::<f64>::zeros(2, 2);
    assert_eq!(cholesky_upper(&zero, "zero"), Err(Error::DecompositionFailed("zero")));
}

#[test]
fn test_cholesky_upper_singular_residue() {
    // Singular up to rounding, the last pivot is a few epsilon
    let M = DMatrix::from_row_slice(2, 2, &[1., 1., 1., 1. + 4. * f64::EPSILON]);
    assert_eq!(cholesky_upper(&M, "M"), Err(Error::DecompositionFailed("M")));

    // Badly scaled but regular, accepted with its tiny rcond
    let scaled = DMatrix::from_row_slice(2, 2, &[1., 0., 0., 1e-20]);
    let U = cholesky_upper(&scaled, "scaled").unwrap();
    approx::assert_relative_eq!(U[(1, 1)], 1e-10, max_relative = 1e-12);
    approx::assert_relative_eq!(rcond::relative_pivot(&scaled, &U), 1., max_relative = 1e-12);
}

#[test]
fn test_rcond() {
    assert_eq!(rcond::rcond_diagonal(&DMatrix::<f64>::identity(3, 3)), 1.);
    assert_eq!(rcond::rcond_diagonal(&Matrix2::new(1., 9., 9., 4.)), 0.25);
    assert_eq!(rcond::rcond_factor(&Matrix2::new(1., 9., 0., 4.)), 0.0625);
    assert_eq!(rcond::rcond_diagonal(&DMatrix::<f64>::zeros(0, 0)), 0.);
    assert!(rcond::rcond_diagonal(&Matrix2::new(f64::NAN, 0., 0., 1.)) < 0.);
    assert!(rcond::rcond_factor(&Matrix2::new(-1., 0., 0., 1.)) < 0.);
}
