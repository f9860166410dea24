//! Computational module descriptions.
//!
//! A [`Module`] declares what it reads and writes; *how* it computes is
//! behind the [`ModuleExecutor`] seam. The scheduler works from the
//! declared sets alone.

use crate::error::Result;
use crate::parameter::Catalog;

/// A reference to a catalog entry used as a module input.
///
/// Inputs may be design variables or responses computed by upstream
/// modules; outputs are always responses.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PortRef {
    /// A design variable, read from its current-value slot.
    Variable(String),
    /// A response produced by another module.
    Response(String),
}

impl PortRef {
    /// The referenced name.
    pub fn name(&self) -> &str {
        match self {
            PortRef::Variable(name) | PortRef::Response(name) => name,
        }
    }
}

/// One computational step of a process.
///
/// # Examples
///
/// ```
/// use optflow::workflow::Module;
///
/// let aero = Module::new("aero")
///     .with_input_variable("span")
///     .with_input_variable("chord")
///     .with_output("lift");
/// assert!(aero.produces("lift"));
/// assert!(!aero.consumes("lift"));
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Module {
    /// Module name (unique within a process).
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Declared inputs.
    inputs: Vec<PortRef>,
    /// Declared outputs (response names).
    outputs: Vec<String>,
}

impl Module {
    /// Creates a module with empty port sets.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Attaches a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Declares a design-variable input.
    pub fn with_input_variable(mut self, name: impl Into<String>) -> Self {
        self.inputs.push(PortRef::Variable(name.into()));
        self
    }

    /// Declares a response input.
    pub fn with_input_response(mut self, name: impl Into<String>) -> Self {
        self.inputs.push(PortRef::Response(name.into()));
        self
    }

    /// Declares a response output.
    pub fn with_output(mut self, name: impl Into<String>) -> Self {
        self.outputs.push(name.into());
        self
    }

    /// The declared inputs.
    pub fn inputs(&self) -> &[PortRef] {
        &self.inputs
    }

    /// The declared outputs.
    pub fn outputs(&self) -> &[String] {
        &self.outputs
    }

    /// Whether this module writes the named response.
    pub fn produces(&self, response: &str) -> bool {
        self.outputs.iter().any(|o| o == response)
    }

    /// Whether this module reads the named response.
    ///
    /// Variable inputs never count: only shared responses create
    /// dependencies between modules.
    pub fn consumes(&self, response: &str) -> bool {
        self.inputs
            .iter()
            .any(|p| matches!(p, PortRef::Response(name) if name == response))
    }
}

/// The external execution contract.
///
/// An executor reads the module's declared inputs from the catalog and
/// writes exactly its declared outputs back. Internal behavior — solver
/// invocations, surrogate lookups, external tools — is unspecified here;
/// an `Err` aborts the enclosing run.
pub trait ModuleExecutor {
    /// Executes one module against the catalog.
    fn execute(&mut self, module: &Module, catalog: &mut Catalog) -> Result<()>;
}
