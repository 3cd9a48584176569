//! Parameter estimators for coupled Kalman models.

pub mod em_init;

pub use em_init::{estimate, estimate_into, EmSeed};
