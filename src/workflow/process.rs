//! Processes: ordered module collections with a cached schedule.
//!
//! A [`Process`] owns its modules and remembers the leveled order
//! produced by the last successful [`Process::organize`] call. Any module
//! mutation clears the cache, so a stale schedule can never run.

use super::module::{Module, ModuleExecutor, PortRef};
use super::schedule;
use crate::error::{Error, Result};
use crate::parameter::{Catalog, ResponseKind, Sense};
use crate::pso::Objective;
use log::debug;

/// An ordered collection of modules plus its derived leveled order.
///
/// # Examples
///
/// ```
/// use optflow::parameter::{Catalog, Response, Variable};
/// use optflow::workflow::{Module, Process};
///
/// let mut catalog = Catalog::new();
/// catalog.add_variable(Variable::continuous("x", 0.0, 1.0, 0.5, 10).unwrap()).unwrap();
/// catalog.add_response(Response::monitored("r1")).unwrap();
/// catalog.add_response(Response::monitored("r2")).unwrap();
///
/// let mut process = Process::new("analysis");
/// process.add_module(Module::new("a").with_input_variable("x").with_output("r1")).unwrap();
/// process.add_module(Module::new("b").with_input_response("r1").with_output("r2")).unwrap();
///
/// let levels = process.organize(&catalog).unwrap();
/// assert_eq!(levels, &[vec![0], vec![1]]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Process {
    /// Process name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    modules: Vec<Module>,
    /// Leveled order from the last successful `organize`; empty until
    /// scheduling succeeds.
    organized: Vec<Vec<usize>>,
}

impl Process {
    /// Creates an empty process.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            modules: Vec::new(),
            organized: Vec::new(),
        }
    }

    /// The modules in insertion order.
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// The cached leveled order; empty until [`organize`](Self::organize)
    /// succeeds.
    pub fn organized(&self) -> &[Vec<usize>] {
        &self.organized
    }

    /// Appends a module; its name must be unique within the process.
    /// Clears the cached schedule.
    pub fn add_module(&mut self, module: Module) -> Result<()> {
        if self.modules.iter().any(|m| m.name == module.name) {
            return Err(Error::DuplicateName { name: module.name });
        }
        self.modules.push(module);
        self.organized.clear();
        Ok(())
    }

    /// Removes a module by name, returning it. Clears the cached
    /// schedule.
    pub fn remove_module(&mut self, name: &str) -> Result<Module> {
        match self.modules.iter().position(|m| m.name == name) {
            Some(i) => {
                self.organized.clear();
                Ok(self.modules.remove(i))
            }
            None => Err(Error::NotFound {
                name: name.to_string(),
            }),
        }
    }

    /// Looks up a module by name.
    pub fn module(&self, name: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.name == name)
    }

    /// Schedules the modules into dependency levels against the
    /// catalog's response list.
    ///
    /// Every declared port must exist in the catalog
    /// ([`Error::UndeclaredPort`] otherwise); a dependency cycle fails
    /// the whole call and leaves the cache empty.
    pub fn organize(&mut self, catalog: &Catalog) -> Result<&[Vec<usize>]> {
        self.validate_ports(catalog)?;
        let responses: Vec<&str> = catalog.responses().iter().map(|r| r.name.as_str()).collect();
        match schedule::organize(&self.modules, &responses) {
            Ok(levels) => {
                debug!(
                    "process '{}' organized into {} levels",
                    self.name,
                    levels.len()
                );
                self.organized = levels;
                Ok(&self.organized)
            }
            Err(e) => {
                self.organized.clear();
                Err(e)
            }
        }
    }

    /// Executes every module in level order through the executor.
    ///
    /// Within a level the insertion order is kept; the contract only
    /// requires that no module runs before its producers. Fails with
    /// [`Error::NotOrganized`] when modules exist but no schedule is
    /// cached; executor errors abort immediately and propagate.
    pub fn run(&self, catalog: &mut Catalog, executor: &mut dyn ModuleExecutor) -> Result<()> {
        if self.organized.is_empty() && !self.modules.is_empty() {
            return Err(Error::NotOrganized {
                process: self.name.clone(),
            });
        }
        for level in &self.organized {
            for &m in level {
                executor.execute(&self.modules[m], catalog)?;
            }
        }
        Ok(())
    }

    /// Checks every declared port against the catalog.
    fn validate_ports(&self, catalog: &Catalog) -> Result<()> {
        for module in &self.modules {
            for input in module.inputs() {
                let known = match input {
                    PortRef::Variable(name) => catalog.variable(name).is_some(),
                    PortRef::Response(name) => catalog.response(name).is_some(),
                };
                if !known {
                    return Err(Error::UndeclaredPort {
                        module: module.name.clone(),
                        port: input.name().to_string(),
                    });
                }
            }
            for output in module.outputs() {
                if catalog.response(output).is_none() {
                    return Err(Error::UndeclaredPort {
                        module: module.name.clone(),
                        port: output.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Combines the catalog's objective responses into one scalar.
///
/// Minimized objectives add `weight * value`, maximized ones subtract
/// it, so lower stays better. A response that was never computed
/// contributes NaN — surfacing the missing value instead of masking it.
pub fn weighted_objective_sum(catalog: &Catalog) -> f64 {
    catalog
        .responses()
        .iter()
        .filter_map(|r| match *r.kind() {
            ResponseKind::Objective { sense, weight } => {
                let value = r.value().unwrap_or(f64::NAN);
                Some(match sense {
                    Sense::Minimize => weight * value,
                    Sense::Maximize => -weight * value,
                })
            }
            _ => None,
        })
        .sum()
}

/// Adapts a scheduled process into the swarm's evaluation contract.
///
/// Each evaluation runs the modules in level order against the catalog
/// (whose variable slots the orchestrator has already written), then
/// reduces the response values to one scalar with the aggregation step.
pub struct ProcessObjective<E, F>
where
    E: ModuleExecutor,
    F: FnMut(&Catalog) -> f64,
{
    process: Process,
    executor: E,
    aggregate: F,
}

impl<E, F> std::fmt::Debug for ProcessObjective<E, F>
where
    E: ModuleExecutor,
    F: FnMut(&Catalog) -> f64,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessObjective").finish_non_exhaustive()
    }
}

impl<E, F> ProcessObjective<E, F>
where
    E: ModuleExecutor,
    F: FnMut(&Catalog) -> f64,
{
    /// Wraps an organized process. Fails with [`Error::NotOrganized`]
    /// when the process has modules but no cached schedule.
    pub fn new(process: Process, executor: E, aggregate: F) -> Result<Self> {
        if process.organized().is_empty() && !process.modules().is_empty() {
            return Err(Error::NotOrganized {
                process: process.name.clone(),
            });
        }
        Ok(Self {
            process,
            executor,
            aggregate,
        })
    }

    /// Releases the wrapped process.
    pub fn into_process(self) -> Process {
        self.process
    }
}

impl<E, F> Objective for ProcessObjective<E, F>
where
    E: ModuleExecutor,
    F: FnMut(&Catalog) -> f64,
{
    fn evaluate(&mut self, catalog: &mut Catalog) -> Result<f64> {
        self.process.run(catalog, &mut self.executor)?;
        Ok((self.aggregate)(catalog))
    }
}
