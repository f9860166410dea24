//! Swarm state.
//!
//! Positions, velocities, and best-so-far records for every particle, laid
//! out as flat row-major `P x D` buffers. The state is created once by the
//! optimizer and owned by it for the run; nothing here persists beyond a
//! run.

use super::space::SearchSpace;
use rand::Rng;

/// The population state of one optimization run.
///
/// `pbest_eval` starts at `f64::INFINITY` and is seeded unconditionally
/// from the first evaluation pass; `gbest_eval` likewise until the first
/// global-best recomputation.
#[derive(Debug, Clone)]
pub struct Swarm {
    /// Number of particles P.
    pub(crate) particles: usize,
    /// Number of dimensions D.
    pub(crate) dimensions: usize,
    /// Current positions, row-major P x D.
    pub(crate) position: Vec<f64>,
    /// Current velocities, row-major P x D.
    pub(crate) velocity: Vec<f64>,
    /// Current evaluation per particle.
    pub(crate) evaluation: Vec<f64>,
    /// Personal-best positions, row-major P x D.
    pub(crate) pbest_pos: Vec<f64>,
    /// Personal-best evaluation per particle.
    pub(crate) pbest_eval: Vec<f64>,
    /// Global-best position.
    pub(crate) gbest_pos: Vec<f64>,
    /// Global-best evaluation.
    pub(crate) gbest_eval: f64,
}

impl Swarm {
    /// Creates a swarm with uniformly drawn positions and velocities.
    ///
    /// Positions are drawn from `[lower, upper)` per dimension; velocities
    /// from the symmetric interval `[-(upper-lower)/2, (upper-lower)/2)`,
    /// independent of the velocity limit. Personal-best positions start as
    /// copies of the initial positions.
    pub fn new<R: Rng>(particles: usize, space: &SearchSpace, rng: &mut R) -> Self {
        let dimensions = space.len();
        let mut position = Vec::with_capacity(particles * dimensions);
        let mut velocity = Vec::with_capacity(particles * dimensions);
        for _ in 0..particles {
            for d in space.dimensions() {
                position.push(rng.random_range(d.lower..d.upper));
                let half = (d.upper - d.lower) / 2.0;
                velocity.push(rng.random_range(-half..half));
            }
        }
        let pbest_pos = position.clone();
        Self {
            particles,
            dimensions,
            position,
            velocity,
            evaluation: vec![f64::INFINITY; particles],
            pbest_pos,
            pbest_eval: vec![f64::INFINITY; particles],
            gbest_pos: vec![0.0; dimensions],
            gbest_eval: f64::INFINITY,
        }
    }

    /// Number of particles.
    pub fn particles(&self) -> usize {
        self.particles
    }

    /// Number of dimensions.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Position row of particle `p`.
    pub fn position(&self, p: usize) -> &[f64] {
        &self.position[p * self.dimensions..(p + 1) * self.dimensions]
    }

    /// Personal-best row of particle `p`.
    pub fn pbest(&self, p: usize) -> &[f64] {
        &self.pbest_pos[p * self.dimensions..(p + 1) * self.dimensions]
    }

    /// Seeds every personal best from the current evaluation.
    ///
    /// Iteration 0 only: no comparison, the first evaluation *is* the
    /// personal best.
    pub fn seed_personal_bests(&mut self) {
        self.pbest_eval.copy_from_slice(&self.evaluation);
        self.pbest_pos.copy_from_slice(&self.position);
    }

    /// Updates personal bests where the current evaluation strictly
    /// improves on the stored one.
    pub fn update_personal_bests(&mut self) {
        for p in 0..self.particles {
            if self.evaluation[p] < self.pbest_eval[p] {
                self.pbest_eval[p] = self.evaluation[p];
                let row = p * self.dimensions..(p + 1) * self.dimensions;
                self.pbest_pos[row.clone()].copy_from_slice(&self.position[row]);
            }
        }
    }

    /// Recomputes the global best as the minimum over all personal bests.
    ///
    /// Full recomputation every iteration; ties go to the lowest particle
    /// index.
    pub fn update_global_best(&mut self) {
        let mut best = 0;
        for p in 1..self.particles {
            if self.pbest_eval[p] < self.pbest_eval[best] {
                best = p;
            }
        }
        self.gbest_eval = self.pbest_eval[best];
        let row = best * self.dimensions..(best + 1) * self.dimensions;
        self.gbest_pos.copy_from_slice(&self.pbest_pos[row]);
    }

    /// Asserts the position/velocity bound invariants.
    ///
    /// A violation after clamping is an implementation bug, not a runtime
    /// condition, so this is debug-only.
    pub fn debug_assert_bounds(&self, space: &SearchSpace) {
        if cfg!(debug_assertions) {
            for p in 0..self.particles {
                for (i, d) in space.dimensions().iter().enumerate() {
                    let x = self.position[p * self.dimensions + i];
                    let v = self.velocity[p * self.dimensions + i];
                    debug_assert!(
                        x >= d.lower && x <= d.upper,
                        "particle {p} dimension {i}: position {x} outside [{}, {}]",
                        d.lower,
                        d.upper
                    );
                    debug_assert!(
                        v >= -d.v_limit && v <= d.v_limit,
                        "particle {p} dimension {i}: velocity {v} outside +/-{}",
                        d.v_limit
                    );
                }
            }
        }
    }
}
