//! Errors reported by the coupled Kalman simulation and initialisation operations.
//!
//! Every error is a caller contract violation or a numerical impossibility.
//! Nothing is retried or recovered locally, errors surface to the immediate caller.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A vector or matrix does not have the dimension required by the model.
    #[error("{what}: expected dimension {expected}, found {found}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// A matrix which must be square is not.
    #[error("{what} is not square ({rows}x{cols})")]
    NotSquare {
        what: &'static str,
        rows: usize,
        cols: usize,
    },

    /// A trajectory needs at least one transition.
    #[error("trajectory must have at least one step")]
    TooFewSteps,

    /// Sample covariance needs more samples than supplied.
    #[error("insufficient sample size: {found} samples, at least {required} required")]
    InsufficientSamples { found: usize, required: usize },

    /// Cholesky factorisation of a matrix which is not positive definite.
    #[error("decomposition failed: {0}")]
    DecompositionFailed(&'static str),

    /// A regime label selects a regime the model does not have.
    #[error("regime {regime} at step {step} out of range, model has {regimes} regimes")]
    RegimeOutOfRange {
        step: usize,
        regime: usize,
        regimes: usize,
    },

    /// A Markov switching model without any regime.
    #[error("Markov model has no regime")]
    NoRegimes,

    /// Regime probabilities are not a valid distribution.
    #[error("invalid probabilities: {0}")]
    InvalidProbabilities(&'static str),
}

/// Checks a vector or matrix dimension.
pub(crate) fn check_dim(what: &'static str, expected: usize, found: usize) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(Error::DimensionMismatch {
            what,
            expected,
            found,
        })
    }
}
