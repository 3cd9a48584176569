//! Discrete Markov chain of regimes.
//!
//! Draws the regime sequence consumed by the Markov switching simulator.
//! A regime is chosen where a uniform random draw intersects the cumulative probabilities.

use nalgebra as na;
use na::{DMatrix, DVector, RealField};
use rand_core::RngCore;
use rand_distr::{Distribution, Standard};

use crate::error::{check_dim, Error, Result};

/// Markov chain of regimes.
///
/// Row i of the transition matrix is the distribution of the next regime given regime i.
#[derive(PartialEq, Clone, Debug)]
pub struct RegimeChain<N: RealField> {
    /// Distribution of the first regime
    pub initial: DVector<N>,
    /// Row stochastic transition matrix
    pub transition: DMatrix<N>,
}

impl<N: RealField + Copy> RegimeChain<N>
where
    Standard: Distribution<N>,
{
    pub fn new(initial: DVector<N>, transition: DMatrix<N>) -> Result<Self> {
        if !transition.is_square() {
            return Err(Error::NotSquare {
                what: "regime transition",
                rows: transition.nrows(),
                cols: transition.ncols(),
            });
        }
        check_dim("initial regime distribution", transition.nrows(), initial.nrows())?;
        check_distribution(initial.iter().cloned())?;
        for row in transition.row_iter() {
            check_distribution(row.iter().cloned())?;
        }
        Ok(RegimeChain { initial, transition })
    }

    pub fn regime_count(&self) -> usize {
        self.initial.nrows()
    }

    /// Draw a regime sequence of length `n`.
    pub fn sample<R: RngCore + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<usize> {
        let mut process = Vec::with_capacity(n);
        if n == 0 {
            return process;
        }

        let mut regime = draw(self.initial.iter().cloned(), Standard.sample(rng));
        process.push(regime);
        for k in 1..n {
            regime = draw(self.transition.row(regime).iter().cloned(), Standard.sample(rng));
            log::trace!("regime {} at step {}", regime, k);
            process.push(regime);
        }
        process
    }
}

fn check_distribution<N: RealField + Copy>(p: impl Iterator<Item = N>) -> Result<()> {
    let mut sum = N::zero();
    for pi in p {
        if !(pi >= N::zero() && pi <= N::one()) {
            return Err(Error::InvalidProbabilities("probability outside [0,1]"));
        }
        sum += pi;
    }
    if (sum - N::one()).abs() > na::convert::<f64, N>(1e-6) {
        return Err(Error::InvalidProbabilities("probabilities do not sum to one"));
    }
    Ok(())
}

/// Index where the uniform draw `u` falls in the cumulative probabilities.
///
/// Rounding of the cumulative sum below `u` selects the last regime with a non zero probability.
fn draw<N: RealField + Copy>(p: impl Iterator<Item = N>, u: N) -> usize {
    let mut cumulative = N::zero();
    let mut last = 0;
    for (i, pi) in p.enumerate() {
        if pi > N::zero() {
            last = i;
        }
        cumulative += pi;
        if u < cumulative {
            return i;
        }
    }
    last
}
