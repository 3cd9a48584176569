//! Generative simulation of coupled Kalman models.
//!
//! Trajectories are produced strictly in time order, each step depends on the realised previous step.
//! Every operation comes in an `_into` form filling caller allocated buffers and a form returning a new trajectory.
//! All shapes are checked before the first random draw.

pub mod coupled;
pub mod markov;
pub mod observation;

pub use coupled::{simulate, simulate_into, simulate_with_initial_joint, simulate_with_initial_joint_into};
pub use markov::{simulate_markov, simulate_markov_into};
pub use observation::{simulate_observation_only, simulate_observation_only_into};
