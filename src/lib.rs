//! Engineering design optimization core.
//!
//! Provides the two subsystems a design-optimization workbench is built
//! around:
//!
//! - **Particle Swarm Optimization (PSO)**: population search over a
//!   mixed continuous/discrete bounded space derived from a catalog of
//!   design variables, with a k-nearest-neighbor local-best topology and
//!   post-update discretization.
//! - **Workflow scheduling**: computational modules linked through the
//!   responses they produce and consume, topologically sorted into
//!   dependency levels that a collaborator may execute sequentially or
//!   in parallel within a level.
//!
//! # Architecture
//!
//! The [`parameter::Catalog`] is the contract between the pieces: the
//! optimizer maps it onto a search space and writes candidate values
//! into its variable slots; module executors read those slots and write
//! response values back; an aggregation step reduces the responses to
//! the scalar the swarm minimizes. Catalog persistence, change tracking,
//! and user interfaces all live with consumers of this crate.
//!
//! # Example
//!
//! ```
//! use optflow::parameter::{Catalog, Variable};
//! use optflow::pso::{PsoConfig, PsoOptimizer};
//!
//! let mut catalog = Catalog::new();
//! catalog.add_variable(Variable::continuous("x", -5.0, 5.0, 1.0, 100).unwrap()).unwrap();
//! catalog.add_variable(Variable::discrete("n", vec![1.0, 2.0, 4.0], 2.0).unwrap()).unwrap();
//!
//! let config = PsoConfig::default().with_particles(25).with_neighbour(25).with_seed(7);
//! let mut optimizer = PsoOptimizer::new(config, catalog).unwrap();
//! let result = optimizer
//!     .optimize(60, &mut |c: &mut Catalog| {
//!         let x = c.variable("x").unwrap().value();
//!         let n = c.variable("n").unwrap().value();
//!         x * x + n
//!     })
//!     .unwrap();
//! assert!(result.best_evaluation < 2.5);
//! ```

mod error;
pub mod parameter;
pub mod pso;
pub mod workflow;

pub use error::{Error, Result};
