//! TKalman coupled Kalman model library.
//! Copyright (c) 2020 Michael Stevens
//!
//! A coupled (or triplet) Kalman model stacks the hidden state x and the observation y into one vector t = [x; y]
//! driven by a single linear Gaussian recursion, rather than the classical separate state and observation equations.
//!
//! The library provides generative simulation of such models: trajectories from a state or coupled prior,
//! trajectories under Markov switching dynamics selected by a regime sequence, and observation noise for known
//! state sequences. It also provides the moment based seed used to start EM parameter estimation.
//!
//! All covariances are represented by upper triangular square root factors U with U'U equal to the covariance.
//! Random draws come from a caller supplied [`NormalSource`], so every operation is reentrant and deterministic for a seeded generator.
//!
//! The default `std` feature only enables the [`regime`] chain sampler. The crate is not `no_std` without it.
//!
//! [`NormalSource`]: noise/trait.NormalSource.html
//! [`regime`]: regime/index.html
//
//! # Licensing
//!
//! Permission is hereby granted, free of charge, to any person obtaining a copy of this software and associated documentation files (the "Software"), to deal in the Software without restriction,
//! including without limitation the rights to use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of the Software,
//! and to permit persons to whom the Software is furnished to do so, subject to the following conditions:
//!
//! The above copyright notice and this permission notice shall be included in all copies or substantial portions of the Software.
//!
//! THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
//! FITNESS FOR A PARTICULAR PURPOSE AND NON INFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY,
//! WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

#![allow(non_snake_case)]

pub mod error;
pub mod estimators;
pub mod linalg;
pub mod models;
pub mod noise;
#[cfg(feature = "std")]
pub mod regime;
pub mod simulators;

pub use error::{Error, Result};
