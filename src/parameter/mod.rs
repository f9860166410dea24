//! Design variables, responses, and the catalog that holds them.
//!
//! The catalog is the contract between the optimization core and its
//! collaborators: an ordered list of variables with bounds and a settable
//! current-value slot, plus the responses that modules produce. The
//! optimizer reads bounds from it and writes candidate values into it;
//! module executors write response values back.

mod catalog;
mod response;
mod variable;

pub use catalog::Catalog;
pub use response::{Response, ResponseKind, Sense};
pub use variable::{Variable, VariableKind};
