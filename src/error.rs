//! Crate-wide error taxonomy.
//!
//! Three families of failures exist, matching where they are raised:
//!
//! - **Configuration**: malformed variables, empty search spaces, bad
//!   swarm parameters. Raised at construction time, never retried.
//! - **Catalog edits**: duplicate or unknown names when mutating a
//!   catalog or a process.
//! - **Structural**: a cyclic module graph discovered while scheduling,
//!   or running a process that was never organized.
//!
//! Evaluation failures are deliberately absent: the evaluation callback
//! returns a bare scalar and module executors return their own errors,
//! which propagate through [`crate::workflow::Process::run`] untouched.

/// Errors raised by catalog construction, search-space mapping, and
/// workflow scheduling.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Continuous variable with `min >= max`.
    #[error("variable '{name}': range minimum {min} must be below maximum {max}")]
    InvalidRange { name: String, min: f64, max: f64 },

    /// Baseline outside the variable's range or allowed set.
    #[error("variable '{name}': baseline {baseline} is not within the allowed range")]
    BaselineOutOfRange { name: String, baseline: f64 },

    /// Discrete variable with fewer than two allowed values.
    #[error("variable '{name}': a discrete value set needs at least 2 values, got {count}")]
    DiscreteSetTooSmall { name: String, count: usize },

    /// Discrete variable whose value set is not strictly ascending.
    #[error("variable '{name}': discrete values must be sorted ascending without duplicates")]
    DiscreteSetUnsorted { name: String },

    /// Objective weight must be positive.
    #[error("response '{name}': objective weight {weight} must be greater than 0")]
    InvalidWeight { name: String, weight: f64 },

    /// Constraint with `min > max`.
    #[error("response '{name}': constraint minimum {min} must not exceed maximum {max}")]
    InvalidConstraintRange { name: String, min: f64, max: f64 },

    /// Catalog or process already contains this name.
    #[error("name '{name}' already exists")]
    DuplicateName { name: String },

    /// Lookup or edit referenced a name that does not exist.
    #[error("'{name}' not found")]
    NotFound { name: String },

    /// An edit targeted a field the variable's kind does not carry.
    #[error("variable '{name}' is not {expected}")]
    KindMismatch {
        name: String,
        expected: &'static str,
    },

    /// A module references a variable or response the catalog does not hold.
    #[error("module '{module}': undeclared port '{port}'")]
    UndeclaredPort { module: String, port: String },

    /// The catalog holds no searchable (non-fixed) variables.
    #[error("search space is empty: every variable is fixed")]
    EmptySearchSpace,

    /// A baseline of zero cannot normalize positions for the neighbor metric.
    #[error("variable '{name}': baseline must be nonzero, it scales the neighbor metric")]
    ZeroScale { name: String },

    /// Swarm must contain at least one particle.
    #[error("particle count must be at least 1, got {particles}")]
    InvalidParticleCount { particles: usize },

    /// Neighbourhood size must be in `1..=particles`.
    #[error("neighbour size {neighbour} must be between 1 and the particle count {particles}")]
    InvalidNeighbourCount { neighbour: usize, particles: usize },

    /// The module graph contains a dependency cycle.
    #[error("modules {modules:?} form a dependency cycle; the process cannot be scheduled")]
    CyclicDependency { modules: Vec<String> },

    /// `Process::run` was called before a successful `organize`.
    #[error("process '{process}' is not organized yet")]
    NotOrganized { process: String },

    /// A module executor reported a failure; aborts the current run.
    #[error("module '{module}' failed: {message}")]
    ModuleExecution { module: String, message: String },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
