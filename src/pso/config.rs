//! Swarm configuration.
//!
//! [`PsoConfig`] holds the parameters fixed at optimizer construction.
//! The iteration budget is not part of the config: it is an argument to
//! `optimize`, matching the run-per-call shape of the engine.

use crate::error::{Error, Result};

/// Configuration for the particle swarm optimizer.
///
/// # Defaults
///
/// ```
/// use optflow::pso::PsoConfig;
///
/// let config = PsoConfig::default();
/// assert_eq!(config.particles, 30);
/// assert_eq!(config.neighbour, 5);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use optflow::pso::PsoConfig;
///
/// let config = PsoConfig::default()
///     .with_particles(50)
///     .with_neighbour(10)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PsoConfig {
    /// Number of particles in the swarm.
    ///
    /// More particles cover the space better at a linear evaluation cost.
    /// Typical range: 20–100.
    pub particles: usize,

    /// Neighborhood size for the local-best topology, `1..=particles`.
    ///
    /// `1` makes every particle independent (its own personal best is its
    /// social target); `particles` recovers the classic global-best swarm.
    pub neighbour: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for PsoConfig {
    fn default() -> Self {
        Self {
            particles: 30,
            neighbour: 5,
            seed: None,
        }
    }
}

impl PsoConfig {
    /// Sets the particle count.
    pub fn with_particles(mut self, n: usize) -> Self {
        self.particles = n;
        self
    }

    /// Sets the neighborhood size.
    pub fn with_neighbour(mut self, k: usize) -> Self {
        self.neighbour = k;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.particles == 0 {
            return Err(Error::InvalidParticleCount {
                particles: self.particles,
            });
        }
        if self.neighbour == 0 || self.neighbour > self.particles {
            return Err(Error::InvalidNeighbourCount {
                neighbour: self.neighbour,
                particles: self.particles,
            });
        }
        Ok(())
    }
}
