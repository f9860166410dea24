//! The optimization loop.
//!
//! [`PsoOptimizer`] owns the catalog, the search space derived from it,
//! and the swarm state for the duration of a run. Each iteration:
//! evaluate every particle, update personal and global bests, advance
//! velocities and positions with the inertia-weighted update rule, then
//! snap discrete dimensions back onto their allowed sets.

use super::config::PsoConfig;
use super::space::SearchSpace;
use super::swarm::Swarm;
use super::topology::local_bests;
use super::types::{IterationReport, Objective, PsoResult};
use crate::error::Result;
use crate::parameter::Catalog;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

/// Acceleration coefficient shared by the cognitive and social terms.
const ACCELERATION: f64 = 2.0;

/// Particle swarm optimizer over a mixed continuous/discrete space.
///
/// # Usage
///
/// ```
/// use optflow::parameter::{Catalog, Variable};
/// use optflow::pso::{PsoConfig, PsoOptimizer};
///
/// let mut catalog = Catalog::new();
/// catalog.add_variable(Variable::continuous("a", -1.0, 1.0, 0.5, 10).unwrap()).unwrap();
/// catalog.add_variable(Variable::continuous("b", -1.0, 1.0, 0.5, 10).unwrap()).unwrap();
///
/// let config = PsoConfig::default().with_particles(20).with_neighbour(20).with_seed(3);
/// let mut optimizer = PsoOptimizer::new(config, catalog).unwrap();
/// let result = optimizer
///     .optimize(60, &mut |c: &mut Catalog| {
///         let a = c.variable("a").unwrap().value();
///         let b = c.variable("b").unwrap().value();
///         a * a + b * b
///     })
///     .unwrap();
/// assert!(result.best_evaluation < 0.5);
/// ```
#[derive(Debug)]
pub struct PsoOptimizer {
    config: PsoConfig,
    space: SearchSpace,
    swarm: Swarm,
    catalog: Catalog,
    rng: StdRng,
}

impl PsoOptimizer {
    /// Builds the optimizer: validates the configuration, maps the
    /// catalog onto a search space, and initializes the swarm.
    ///
    /// Discrete dimensions are snapped immediately so the very first
    /// evaluation already sees admissible values.
    pub fn new(config: PsoConfig, catalog: Catalog) -> Result<Self> {
        config.validate()?;
        let space = SearchSpace::from_catalog(&catalog)?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        let swarm = Swarm::new(config.particles, &space, &mut rng);
        let mut optimizer = Self {
            config,
            space,
            swarm,
            catalog,
            rng,
        };
        optimizer.discretize();
        Ok(optimizer)
    }

    /// The catalog, including the value slots of the last evaluation.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Consumes the optimizer, releasing the catalog.
    pub fn into_catalog(self) -> Catalog {
        self.catalog
    }

    /// The search space mapped from the catalog.
    pub fn space(&self) -> &SearchSpace {
        &self.space
    }

    /// Runs the optimization for a fixed iteration budget.
    ///
    /// There is no convergence criterion and no cancellation: exactly
    /// `iterations` iterations run, each evaluating every particle once.
    /// A zero budget returns immediately with an unevaluated (infinite)
    /// best. Evaluation errors abort the run and propagate unaltered.
    pub fn optimize<O: Objective>(
        &mut self,
        iterations: usize,
        objective: &mut O,
    ) -> Result<PsoResult> {
        let run_start = Instant::now();
        let mut history = Vec::with_capacity(iterations);

        for iteration in 0..iterations {
            let iter_start = Instant::now();

            // evaluate every particle at its current position
            for p in 0..self.swarm.particles() {
                self.write_into_catalog(p)?;
                self.swarm.evaluation[p] = objective.evaluate(&mut self.catalog)?;
            }

            // iteration 0 seeds unconditionally; afterwards only strict
            // improvements count
            if iteration == 0 {
                self.swarm.seed_personal_bests();
            } else {
                self.swarm.update_personal_bests();
            }
            self.swarm.update_global_best();

            self.advance(iterations, iteration);
            self.discretize();
            self.swarm.debug_assert_bounds(&self.space);

            history.push(self.swarm.gbest_eval);
            let report = IterationReport {
                iteration,
                iterations,
                best_position: self.swarm.gbest_pos.clone(),
                best_evaluation: self.swarm.gbest_eval,
                elapsed: iter_start.elapsed(),
            };
            debug!(
                "iteration {}/{}: best evaluation {:.6e} ({:?})",
                iteration, iterations, report.best_evaluation, report.elapsed
            );
            objective.on_iteration(&report);
        }

        let elapsed = run_start.elapsed();
        info!(
            "optimization done after {} iterations: best evaluation {:.6e} ({:?})",
            iterations, self.swarm.gbest_eval, elapsed
        );
        Ok(PsoResult {
            best_position: self.swarm.gbest_pos.clone(),
            best_evaluation: self.swarm.gbest_eval,
            iterations,
            evaluations: iterations * self.swarm.particles(),
            history,
            elapsed,
        })
    }

    /// Writes particle `p`'s coordinates into the catalog's variable
    /// slots, in search-space dimension order. Fixed variables keep
    /// their constant values.
    fn write_into_catalog(&mut self, p: usize) -> Result<()> {
        let dims = self.swarm.dimensions();
        for (d, dim) in self.space.dimensions().iter().enumerate() {
            self.catalog
                .set_value(&dim.name, self.swarm.position[p * dims + d])?;
        }
        Ok(())
    }

    /// Advances velocities and positions by one step.
    ///
    /// `v' = w v + 2 r1 (pbest - x) + 2 r2 (lbest - x)`, hard-clamped to
    /// the velocity limit; `x' = x + v'`, hard-clamped to the bounds.
    /// The inertia weight decays linearly from 0.9 toward 0.4 over the
    /// iteration budget.
    fn advance(&mut self, iterations: usize, current: usize) {
        let lbest = local_bests(&self.swarm, &self.space, self.config.neighbour);
        let w = 0.5 * (iterations - current) as f64 / iterations as f64 + 0.4;
        let dims = self.swarm.dimensions();
        for p in 0..self.swarm.particles() {
            for (d, dim) in self.space.dimensions().iter().enumerate() {
                let idx = p * dims + d;
                let r1: f64 = self.rng.random_range(0.0..1.0);
                let r2: f64 = self.rng.random_range(0.0..1.0);
                let cognitive =
                    ACCELERATION * r1 * (self.swarm.pbest_pos[idx] - self.swarm.position[idx]);
                let social = ACCELERATION * r2 * (lbest[idx] - self.swarm.position[idx]);
                let velocity = (w * self.swarm.velocity[idx] + cognitive + social)
                    .clamp(-dim.v_limit, dim.v_limit);
                self.swarm.velocity[idx] = velocity;
                self.swarm.position[idx] =
                    (self.swarm.position[idx] + velocity).clamp(dim.lower, dim.upper);
            }
        }
    }

    /// Snaps every discrete dimension onto its allowed set.
    fn discretize(&mut self) {
        let dims = self.swarm.dimensions();
        for (d, dim) in self.space.dimensions().iter().enumerate() {
            if !dim.is_discrete() {
                continue;
            }
            for p in 0..self.swarm.particles() {
                let idx = p * dims + d;
                self.swarm.position[idx] = dim.snap(self.swarm.position[idx]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::parameter::Variable;

    fn quadratic_catalog(dims: usize) -> Catalog {
        let mut catalog = Catalog::new();
        for i in 0..dims {
            catalog
                .add_variable(
                    Variable::continuous(format!("x{i}"), -5.0, 5.0, 1.0, 100).unwrap(),
                )
                .unwrap();
        }
        catalog
    }

    fn sphere(catalog: &mut Catalog) -> f64 {
        catalog
            .variables()
            .iter()
            .filter(|v| !v.is_fixed())
            .map(|v| v.value() * v.value())
            .sum()
    }

    #[test]
    fn test_sphere_convergence_global_topology() {
        let config = PsoConfig::default()
            .with_particles(30)
            .with_neighbour(30)
            .with_seed(42);
        let mut optimizer = PsoOptimizer::new(config, quadratic_catalog(2)).unwrap();
        let result = optimizer.optimize(200, &mut sphere).unwrap();

        assert!(
            result.best_evaluation < 0.1,
            "expected convergence near 0 on a separable quadratic, got {}",
            result.best_evaluation
        );
        assert_eq!(result.iterations, 200);
        assert_eq!(result.evaluations, 200 * 30);
    }

    #[test]
    fn test_global_best_monotonically_non_increasing() {
        let config = PsoConfig::default()
            .with_particles(15)
            .with_neighbour(3)
            .with_seed(9);
        let mut optimizer = PsoOptimizer::new(config, quadratic_catalog(3)).unwrap();
        let result = optimizer.optimize(80, &mut sphere).unwrap();

        for window in result.history.windows(2) {
            assert!(
                window[1] <= window[0],
                "global best worsened: {} -> {}",
                window[0],
                window[1]
            );
        }
    }

    #[test]
    fn test_iteration_zero_seeds_personal_bests() {
        let config = PsoConfig::default()
            .with_particles(8)
            .with_neighbour(2)
            .with_seed(5);
        let mut optimizer = PsoOptimizer::new(config, quadratic_catalog(2)).unwrap();
        optimizer.optimize(1, &mut sphere).unwrap();

        // after a single iteration the evaluations have not been
        // overwritten, so the unconditional seeding is still visible
        assert_eq!(optimizer.swarm.pbest_eval, optimizer.swarm.evaluation);
    }

    #[test]
    fn test_positions_and_velocities_stay_bounded() {
        let config = PsoConfig::default()
            .with_particles(12)
            .with_neighbour(4)
            .with_seed(17);
        let mut optimizer = PsoOptimizer::new(config, quadratic_catalog(2)).unwrap();
        optimizer.optimize(50, &mut sphere).unwrap();

        let dims = optimizer.swarm.dimensions();
        for p in 0..optimizer.swarm.particles() {
            for (d, dim) in optimizer.space.dimensions().iter().enumerate() {
                let x = optimizer.swarm.position[p * dims + d];
                let v = optimizer.swarm.velocity[p * dims + d];
                assert!(x >= dim.lower && x <= dim.upper);
                assert!(v >= -dim.v_limit && v <= dim.v_limit);
            }
        }
    }

    #[test]
    fn test_determinism_with_fixed_seed() {
        let run = || {
            let config = PsoConfig::default()
                .with_particles(10)
                .with_neighbour(5)
                .with_seed(1234);
            let mut optimizer = PsoOptimizer::new(config, quadratic_catalog(2)).unwrap();
            optimizer.optimize(30, &mut sphere).unwrap()
        };
        let a = run();
        let b = run();
        assert_eq!(a.best_position, b.best_position);
        assert_eq!(a.best_evaluation, b.best_evaluation);
        assert_eq!(a.history, b.history);
    }

    #[test]
    fn test_discrete_best_is_member_of_set() {
        let mut catalog = Catalog::new();
        catalog
            .add_variable(Variable::continuous("x", -5.0, 5.0, 1.0, 100).unwrap())
            .unwrap();
        catalog
            .add_variable(
                Variable::discrete("n", vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0], 4.0).unwrap(),
            )
            .unwrap();

        let config = PsoConfig::default()
            .with_particles(20)
            .with_neighbour(20)
            .with_seed(8);
        let mut optimizer = PsoOptimizer::new(config, catalog).unwrap();
        // optimum at x = 0, n = 1
        let result = optimizer
            .optimize(80, &mut |c: &mut Catalog| {
                let x = c.variable("x").unwrap().value();
                let n = c.variable("n").unwrap().value();
                x * x + n
            })
            .unwrap();

        let allowed = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        assert!(allowed.contains(&result.best_position[1]));
    }

    #[test]
    fn test_discrete_optimum_found() {
        let mut catalog = Catalog::new();
        catalog
            .add_variable(Variable::continuous("x", -5.0, 5.0, 1.0, 100).unwrap())
            .unwrap();
        catalog
            .add_variable(Variable::discrete("n", vec![1.0, 7.0], 1.0).unwrap())
            .unwrap();

        let config = PsoConfig::default()
            .with_particles(30)
            .with_neighbour(30)
            .with_seed(13);
        let mut optimizer = PsoOptimizer::new(config, catalog).unwrap();
        let result = optimizer
            .optimize(60, &mut |c: &mut Catalog| {
                let x = c.variable("x").unwrap().value();
                let n = c.variable("n").unwrap().value();
                x * x + n
            })
            .unwrap();

        assert_eq!(result.best_position[1], 1.0);
    }

    #[test]
    fn test_fixed_variable_slot_untouched() {
        let mut catalog = quadratic_catalog(1);
        catalog
            .add_variable(Variable::fixed("gravity", 9.81))
            .unwrap();

        let config = PsoConfig::default()
            .with_particles(5)
            .with_neighbour(2)
            .with_seed(3);
        let mut optimizer = PsoOptimizer::new(config, catalog).unwrap();
        optimizer.optimize(10, &mut sphere).unwrap();
        assert_eq!(optimizer.catalog().variable("gravity").unwrap().value(), 9.81);
    }

    #[test]
    fn test_observer_hook_called_every_iteration() {
        struct Counting {
            reports: Vec<(usize, f64)>,
        }
        impl Objective for Counting {
            fn evaluate(&mut self, catalog: &mut Catalog) -> crate::error::Result<f64> {
                Ok(sphere(catalog))
            }
            fn on_iteration(&mut self, report: &IterationReport) {
                self.reports.push((report.iteration, report.best_evaluation));
            }
        }

        let config = PsoConfig::default()
            .with_particles(6)
            .with_neighbour(2)
            .with_seed(11);
        let mut optimizer = PsoOptimizer::new(config, quadratic_catalog(2)).unwrap();
        let mut objective = Counting { reports: Vec::new() };
        let result = optimizer.optimize(25, &mut objective).unwrap();

        assert_eq!(objective.reports.len(), 25);
        for (i, (iteration, best)) in objective.reports.iter().enumerate() {
            assert_eq!(*iteration, i);
            assert_eq!(*best, result.history[i]);
        }
    }

    #[test]
    fn test_evaluation_error_aborts_run() {
        struct Failing {
            calls: usize,
        }
        impl Objective for Failing {
            fn evaluate(&mut self, _catalog: &mut Catalog) -> crate::error::Result<f64> {
                self.calls += 1;
                if self.calls >= 4 {
                    Err(Error::ModuleExecution {
                        module: "solver".into(),
                        message: "diverged".into(),
                    })
                } else {
                    Ok(1.0)
                }
            }
        }

        let config = PsoConfig::default()
            .with_particles(10)
            .with_neighbour(2)
            .with_seed(2);
        let mut optimizer = PsoOptimizer::new(config, quadratic_catalog(1)).unwrap();
        let mut objective = Failing { calls: 0 };
        let err = optimizer.optimize(5, &mut objective).unwrap_err();
        assert!(matches!(err, Error::ModuleExecution { .. }));
        assert_eq!(objective.calls, 4);
    }

    #[test]
    fn test_rejects_empty_space() {
        let mut catalog = Catalog::new();
        catalog.add_variable(Variable::fixed("c", 1.0)).unwrap();
        let err = PsoOptimizer::new(PsoConfig::default(), catalog).unwrap_err();
        assert!(matches!(err, Error::EmptySearchSpace));
    }

    #[test]
    fn test_rejects_bad_neighbourhood() {
        let config = PsoConfig::default().with_particles(4).with_neighbour(9);
        let err = PsoOptimizer::new(config, quadratic_catalog(1)).unwrap_err();
        assert!(matches!(err, Error::InvalidNeighbourCount { .. }));
    }

    #[test]
    fn test_neighbour_one_runs_independently() {
        // degenerate topology: no social pull between particles; the run
        // must still complete and respect all invariants
        let config = PsoConfig::default()
            .with_particles(10)
            .with_neighbour(1)
            .with_seed(21);
        let mut optimizer = PsoOptimizer::new(config, quadratic_catalog(2)).unwrap();
        let result = optimizer.optimize(40, &mut sphere).unwrap();
        for window in result.history.windows(2) {
            assert!(window[1] <= window[0]);
        }
    }
}
