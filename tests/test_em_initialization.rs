#![allow(non_snake_case)]

//! Test the moment based EM initialisation.

use na::{DMatrix, DVector};
use nalgebra as na;
use num_traits::pow;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use tkalman::estimators::em_init::{self, EmSeed};
use tkalman::noise::{standard_normal_vector, NormalSource, SqrtNoise};
use tkalman::Error;

fn scalars(values: &[f64]) -> Vec<DVector<f64>> {
    values.iter().map(|&v| DVector::from_element(1, v)).collect()
}

#[test]
fn test_scalar_known() {
    let seed = em_init::estimate(&scalars(&[1., 2., 3., 4.])).unwrap();

    approx::assert_relative_eq!(seed.x0[0], 2.5, max_relative = 1e-12);
    // Unbiased variance 5/3
    approx::assert_relative_eq!(pow(seed.sqrt_Q_yy[(0, 0)], 2), 5. / 3., max_relative = 1e-12);
    assert_eq!(seed.sqrt_P0, seed.sqrt_Q_yy);
}

#[test]
fn test_two_dimensional_known() {
    let observations = vec![
        DVector::from_row_slice(&[0., 0.]),
        DVector::from_row_slice(&[2., 0.]),
        DVector::from_row_slice(&[0., 2.]),
        DVector::from_row_slice(&[2., 2.]),
    ];
    let seed = em_init::estimate(&observations).unwrap();
    println!("x0 {:} sqrt(Q_yy) {:}", seed.x0, seed.sqrt_Q_yy);

    approx::assert_relative_eq!(seed.x0, DVector::from_row_slice(&[1., 1.]), max_relative = 1e-12);
    let s = (4f64 / 3.).sqrt();
    approx::assert_abs_diff_eq!(seed.sqrt_Q_yy, DMatrix::from_row_slice(2, 2, &[s, 0., 0., s]), epsilon = 1e-12);
    approx::assert_abs_diff_eq!(seed.covariance(), DMatrix::identity(2, 2) * (4. / 3.), epsilon = 1e-12);
    assert_eq!(seed.sqrt_P0, seed.sqrt_Q_yy);
}

#[test]
fn test_factor_is_upper() {
    let observations = vec![
        DVector::from_row_slice(&[1., 0.3, 2.]),
        DVector::from_row_slice(&[0.2, 1.1, -1.]),
        DVector::from_row_slice(&[-0.5, 0.4, 0.5]),
        DVector::from_row_slice(&[0.7, -0.9, 1.2]),
        DVector::from_row_slice(&[0.1, 0.6, -0.3]),
    ];
    let seed = em_init::estimate(&observations).unwrap();
    let mean = em_init::sample_mean(&observations).unwrap();
    let S = em_init::sample_covariance(&observations, &mean).unwrap();

    assert!(tkalman::linalg::cholesky::is_upper_factor(&seed.sqrt_Q_yy));
    approx::assert_relative_eq!(seed.sqrt_Q_yy.transpose() * &seed.sqrt_Q_yy, S, max_relative = 1e-10);
}

#[test]
fn test_insufficient_samples() {
    assert_eq!(
        em_init::estimate(&scalars(&[1.])),
        Err(Error::InsufficientSamples { found: 1, required: 2 })
    );
    assert_eq!(
        em_init::estimate::<f64>(&[]),
        Err(Error::InsufficientSamples { found: 0, required: 2 })
    );

    let mut seed = EmSeed::zeros(1);
    assert!(em_init::estimate_into(&mut seed, &scalars(&[3.])).is_err());
    assert_eq!(seed, EmSeed::zeros(1));
}

#[test]
fn test_not_positive_definite() {
    // Identical observations, zero covariance
    assert_eq!(
        em_init::estimate(&scalars(&[2., 2., 2.])),
        Err(Error::DecompositionFailed("sample covariance not PD"))
    );

    // Collinear observations, singular covariance
    let collinear: Vec<DVector<f64>> = (0..3).map(|i| DVector::from_element(2, i as f64)).collect();
    assert_eq!(
        em_init::estimate(&collinear),
        Err(Error::DecompositionFailed("sample covariance not PD"))
    );
}

#[test]
fn test_rounded_collinear_rejected() {
    // Collinear observations whose covariance pivot is rounding residue rather than exactly zero
    let direction = DVector::from_row_slice(&[0.1, 0.3, 0.7]);
    let collinear: Vec<DVector<f64>> = [0.3, 1.7, -2.9, 0.11].iter().map(|&a| &direction * a).collect();
    assert_eq!(
        em_init::estimate(&collinear),
        Err(Error::DecompositionFailed("sample covariance not PD"))
    );

    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..500 {
        let dim = rng.gen_range(2..5);
        let n = rng.gen_range(2..8);
        let direction: DVector<f64> = standard_normal_vector(dim, &mut rng);
        let collinear: Vec<DVector<f64>> = (0..n)
            .map(|_| &direction * NormalSource::<f64>::standard_normal(&mut rng))
            .collect();
        assert_eq!(
            em_init::estimate(&collinear),
            Err(Error::DecompositionFailed("sample covariance not PD")),
            "direction {} accepted",
            direction
        );
    }
}

#[test]
fn test_dimension_mismatch() {
    let observations = vec![DVector::from_row_slice(&[1., 2.]), DVector::from_row_slice(&[1.])];
    assert!(em_init::estimate(&observations).is_err());

    let mut seed = EmSeed::zeros(3);
    assert_eq!(
        em_init::estimate_into(&mut seed, &scalars(&[1., 2.])),
        Err(Error::DimensionMismatch { what: "observation", expected: 3, found: 1 })
    );
}

#[test]
fn test_estimate_into_overwrites() {
    let mut seed = EmSeed::zeros(1);
    em_init::estimate_into(&mut seed, &scalars(&[10., 20., 30.])).unwrap();
    em_init::estimate_into(&mut seed, &scalars(&[1., 2., 3., 4.])).unwrap();
    assert_eq!(seed, em_init::estimate(&scalars(&[1., 2., 3., 4.])).unwrap());
}

#[test]
fn test_convergence() {
    let mu = DVector::from_row_slice(&[1., -1.]);
    let Sigma = DMatrix::from_row_slice(2, 2, &[1., 0.3, 0.3, 0.5]);
    let noise = SqrtNoise::from_covariance(&Sigma).unwrap();
    approx::assert_relative_eq!(noise.covariance(), Sigma, max_relative = 1e-12);

    let mut rng = StdRng::seed_from_u64(31);
    for &n in &[1000usize, 40000] {
        let observations: Vec<DVector<f64>> = (0..n).map(|_| noise.sample(&mu, &mut rng).unwrap()).collect();
        let seed = em_init::estimate(&observations).unwrap();

        // Tolerance shrinks as 1/sqrt(n)
        let tolerance = 5. / (n as f64).sqrt();
        println!("n {} x0 {:.4} covariance {:.4}", n, seed.x0, seed.covariance());
        approx::assert_abs_diff_eq!(seed.x0, mu, epsilon = tolerance);
        approx::assert_abs_diff_eq!(seed.covariance(), Sigma, epsilon = tolerance);
    }
}
