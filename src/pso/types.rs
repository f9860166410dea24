//! Contracts between the swarm engine and the caller.
//!
//! [`Objective`] is the evaluation contract: given the catalog with the
//! candidate values already written into the variable slots, produce one
//! scalar (lower is better). The engine does not interpret the scalar —
//! NaN or infinite results pass through and simply never win a strict
//! improvement comparison.

use crate::error::Result;
use crate::parameter::Catalog;
use std::time::Duration;

/// An evaluation target for the swarm.
///
/// Implemented automatically for `FnMut(&mut Catalog) -> f64` closures;
/// implement the trait directly when evaluation can fail or when progress
/// reports are wanted.
///
/// # Examples
///
/// ```
/// use optflow::parameter::{Catalog, Variable};
/// use optflow::pso::{PsoConfig, PsoOptimizer};
///
/// let mut catalog = Catalog::new();
/// catalog.add_variable(Variable::continuous("x", -5.0, 5.0, 1.0, 10).unwrap()).unwrap();
///
/// let config = PsoConfig::default().with_seed(1);
/// let mut optimizer = PsoOptimizer::new(config, catalog).unwrap();
/// let result = optimizer
///     .optimize(50, &mut |c: &mut Catalog| c.variable("x").unwrap().value().powi(2))
///     .unwrap();
/// assert!(result.best_evaluation < 1.0);
/// ```
pub trait Objective {
    /// Evaluates the candidate currently written into the catalog.
    ///
    /// Called exactly once per particle per iteration. An `Err` aborts
    /// the run immediately — the engine performs no retries.
    fn evaluate(&mut self, catalog: &mut Catalog) -> Result<f64>;

    /// Observability hook, called once at the end of each iteration.
    ///
    /// The default implementation does nothing; the engine never prints.
    fn on_iteration(&mut self, _report: &IterationReport) {}
}

impl<F> Objective for F
where
    F: FnMut(&mut Catalog) -> f64,
{
    fn evaluate(&mut self, catalog: &mut Catalog) -> Result<f64> {
        Ok(self(catalog))
    }
}

/// Progress snapshot for one completed iteration.
#[derive(Debug, Clone)]
pub struct IterationReport {
    /// Iteration index, starting at 0.
    pub iteration: usize,
    /// Total iteration budget of this run.
    pub iterations: usize,
    /// Best position found so far.
    pub best_position: Vec<f64>,
    /// Best evaluation found so far.
    pub best_evaluation: f64,
    /// Wall time spent in this iteration.
    pub elapsed: Duration,
}

/// Result of a swarm optimization run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PsoResult {
    /// The best position found, in search-space dimension order.
    pub best_position: Vec<f64>,
    /// Evaluation of the best position.
    pub best_evaluation: f64,
    /// Number of iterations executed.
    pub iterations: usize,
    /// Total number of objective evaluations.
    pub evaluations: usize,
    /// Best evaluation at the end of each iteration.
    pub history: Vec<f64>,
    /// Total wall time of the run.
    pub elapsed: Duration,
}
