//! The design catalog: ordered variables and responses with unique names.
//!
//! A [`Catalog`] is handed to the optimizer at construction and owned by it
//! for the whole run; there is no ambient registry. Names are unique across
//! *both* collections so a module port reference is never ambiguous.

use super::response::Response;
use super::variable::Variable;
use crate::error::{Error, Result};

/// Ordered variables and responses for one project.
///
/// # Examples
///
/// ```
/// use optflow::parameter::{Catalog, Response, Sense, Variable};
///
/// let mut catalog = Catalog::new();
/// catalog.add_variable(Variable::continuous("span", 8.0, 14.0, 10.0, 100).unwrap()).unwrap();
/// catalog.add_response(Response::objective("mass", Sense::Minimize, 1.0).unwrap()).unwrap();
/// assert_eq!(catalog.variables().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Catalog {
    variables: Vec<Variable>,
    responses: Vec<Response>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The variables in declaration order.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// The responses in declaration order.
    pub fn responses(&self) -> &[Response] {
        &self.responses
    }

    /// Whether any variable or response carries this name.
    pub fn contains(&self, name: &str) -> bool {
        self.variables.iter().any(|v| v.name == name)
            || self.responses.iter().any(|r| r.name == name)
    }

    /// Appends a variable; its name must be unused by either collection.
    pub fn add_variable(&mut self, variable: Variable) -> Result<()> {
        if self.contains(&variable.name) {
            return Err(Error::DuplicateName {
                name: variable.name,
            });
        }
        self.variables.push(variable);
        Ok(())
    }

    /// Removes a variable by name, returning it.
    pub fn remove_variable(&mut self, name: &str) -> Result<Variable> {
        match self.variables.iter().position(|v| v.name == name) {
            Some(i) => Ok(self.variables.remove(i)),
            None => Err(Error::NotFound {
                name: name.to_string(),
            }),
        }
    }

    /// Appends a response; its name must be unused by either collection.
    pub fn add_response(&mut self, response: Response) -> Result<()> {
        if self.contains(&response.name) {
            return Err(Error::DuplicateName {
                name: response.name,
            });
        }
        self.responses.push(response);
        Ok(())
    }

    /// Removes a response by name, returning it.
    pub fn remove_response(&mut self, name: &str) -> Result<Response> {
        match self.responses.iter().position(|r| r.name == name) {
            Some(i) => Ok(self.responses.remove(i)),
            None => Err(Error::NotFound {
                name: name.to_string(),
            }),
        }
    }

    /// Looks up a variable by name.
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }

    /// Looks up a variable for mutation.
    pub fn variable_mut(&mut self, name: &str) -> Option<&mut Variable> {
        self.variables.iter_mut().find(|v| v.name == name)
    }

    /// Looks up a response by name.
    pub fn response(&self, name: &str) -> Option<&Response> {
        self.responses.iter().find(|r| r.name == name)
    }

    /// Looks up a response for mutation.
    pub fn response_mut(&mut self, name: &str) -> Option<&mut Response> {
        self.responses.iter_mut().find(|r| r.name == name)
    }

    /// Writes a variable's current value slot.
    pub fn set_value(&mut self, name: &str, value: f64) -> Result<()> {
        match self.variable_mut(name) {
            Some(v) => {
                v.set_value(value);
                Ok(())
            }
            None => Err(Error::NotFound {
                name: name.to_string(),
            }),
        }
    }

    /// Records a response's computed value.
    pub fn set_response_value(&mut self, name: &str, value: f64) -> Result<()> {
        match self.response_mut(name) {
            Some(r) => {
                r.set_value(value);
                Ok(())
            }
            None => Err(Error::NotFound {
                name: name.to_string(),
            }),
        }
    }

    /// Renames a variable, keeping names unique across both collections.
    pub fn rename_variable(&mut self, name: &str, new_name: impl Into<String>) -> Result<()> {
        let new_name = new_name.into();
        if new_name != name && self.contains(&new_name) {
            return Err(Error::DuplicateName { name: new_name });
        }
        match self.variable_mut(name) {
            Some(v) => {
                v.name = new_name;
                Ok(())
            }
            None => Err(Error::NotFound {
                name: name.to_string(),
            }),
        }
    }

    /// Renames a response, keeping names unique across both collections.
    pub fn rename_response(&mut self, name: &str, new_name: impl Into<String>) -> Result<()> {
        let new_name = new_name.into();
        if new_name != name && self.contains(&new_name) {
            return Err(Error::DuplicateName { name: new_name });
        }
        match self.response_mut(name) {
            Some(r) => {
                r.name = new_name;
                Ok(())
            }
            None => Err(Error::NotFound {
                name: name.to_string(),
            }),
        }
    }
}
