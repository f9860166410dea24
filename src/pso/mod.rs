//! Particle Swarm Optimization (PSO).
//!
//! A population of candidate designs moves through the search space
//! mapped from the variable catalog. Each particle is pulled toward its
//! own best design and the best design in its k-nearest neighborhood
//! (measured in baseline-normalized coordinates), with an inertia weight
//! that decays over the run. Discrete variables are searched in the same
//! continuous space and snapped back onto their allowed sets after every
//! move.
//!
//! # References
//!
//! - Kennedy & Eberhart (1995), "Particle Swarm Optimization"
//! - Shi & Eberhart (1998), "A Modified Particle Swarm Optimizer"

mod config;
mod runner;
mod space;
mod swarm;
mod topology;
mod types;

pub use config::PsoConfig;
pub use runner::PsoOptimizer;
pub use space::{Dimension, SearchSpace};
pub use types::{IterationReport, Objective, PsoResult};
