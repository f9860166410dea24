//! Workflow modules and their dependency schedule.
//!
//! A process is an ordered set of computational modules tied together by
//! the responses they produce and consume. Scheduling sorts the modules
//! into dependency levels: everything in one level is independent, so a
//! collaborator may execute a level's modules in any order or in
//! parallel, provided each writes exactly its declared outputs.

mod module;
mod process;
mod schedule;

pub use module::{Module, ModuleExecutor, PortRef};
pub use process::{weighted_objective_sum, Process, ProcessObjective};
pub use schedule::organize;
