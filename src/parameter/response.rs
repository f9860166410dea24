//! Response types.
//!
//! A [`Response`] is a quantity produced by module execution: an objective
//! contributing to the fitness, a constraint with an allowed band, or a
//! monitored value recorded for inspection only.

use crate::error::{Error, Result};

/// Direction of an objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sense {
    /// Smaller is better.
    Minimize,
    /// Larger is better.
    Maximize,
}

/// The kind-specific data of a response.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResponseKind {
    /// A weighted objective term.
    Objective {
        /// Optimization direction.
        sense: Sense,
        /// Positive weight used when objectives are combined.
        weight: f64,
    },

    /// A constrained response with an allowed band `[min, max]`.
    Constraint {
        /// Lower limit.
        min: f64,
        /// Upper limit.
        max: f64,
    },

    /// A value recorded for inspection; never constrains the search.
    Monitored,
}

/// A named response with a settable current value.
///
/// The current value slot is written by module execution and read by the
/// caller's aggregation step; the core never interprets it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Response {
    /// Response name (unique within a catalog).
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Kind-specific data.
    kind: ResponseKind,
    /// Latest computed value, if any.
    value: Option<f64>,
}

impl Response {
    /// Creates an objective response.
    pub fn objective(name: impl Into<String>, sense: Sense, weight: f64) -> Result<Self> {
        let name = name.into();
        if !(weight > 0.0) {
            return Err(Error::InvalidWeight { name, weight });
        }
        Ok(Self {
            name,
            description: String::new(),
            kind: ResponseKind::Objective { sense, weight },
            value: None,
        })
    }

    /// Creates a constraint response with an allowed band.
    pub fn constraint(name: impl Into<String>, min: f64, max: f64) -> Result<Self> {
        let name = name.into();
        if !(min <= max) {
            return Err(Error::InvalidConstraintRange { name, min, max });
        }
        Ok(Self {
            name,
            description: String::new(),
            kind: ResponseKind::Constraint { min, max },
            value: None,
        })
    }

    /// Creates a monitored response.
    pub fn monitored(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            kind: ResponseKind::Monitored,
            value: None,
        }
    }

    /// Attaches a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// The kind-specific data.
    pub fn kind(&self) -> &ResponseKind {
        &self.kind
    }

    /// Latest computed value, `None` before the first module execution.
    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// Records a computed value. Called by module executors.
    pub fn set_value(&mut self, value: f64) {
        self.value = Some(value);
    }

    /// Clears the computed value, e.g. between evaluations.
    pub fn clear_value(&mut self) {
        self.value = None;
    }

    /// Re-weights an objective, re-validating.
    pub fn set_weight(&mut self, weight: f64) -> Result<()> {
        match self.kind {
            ResponseKind::Objective { sense, .. } => {
                if !(weight > 0.0) {
                    return Err(Error::InvalidWeight {
                        name: self.name.clone(),
                        weight,
                    });
                }
                self.kind = ResponseKind::Objective { sense, weight };
                Ok(())
            }
            _ => Err(Error::KindMismatch {
                name: self.name.clone(),
                expected: "an objective",
            }),
        }
    }

    /// Moves the allowed band of a constraint, re-validating.
    pub fn set_band(&mut self, min: f64, max: f64) -> Result<()> {
        match self.kind {
            ResponseKind::Constraint { .. } => {
                if !(min <= max) {
                    return Err(Error::InvalidConstraintRange {
                        name: self.name.clone(),
                        min,
                        max,
                    });
                }
                self.kind = ResponseKind::Constraint { min, max };
                Ok(())
            }
            _ => Err(Error::KindMismatch {
                name: self.name.clone(),
                expected: "a constraint",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_objective() {
        let r = Response::objective("mass", Sense::Minimize, 1.0).unwrap();
        assert_eq!(
            *r.kind(),
            ResponseKind::Objective {
                sense: Sense::Minimize,
                weight: 1.0
            }
        );
        assert_eq!(r.value(), None);
    }

    #[test]
    fn test_objective_rejects_nonpositive_weight() {
        assert!(Response::objective("mass", Sense::Minimize, 0.0).is_err());
        assert!(Response::objective("mass", Sense::Minimize, -2.0).is_err());
    }

    #[test]
    fn test_constraint_band() {
        let r = Response::constraint("stress", 0.0, 250.0).unwrap();
        assert_eq!(*r.kind(), ResponseKind::Constraint { min: 0.0, max: 250.0 });
        // a point band is allowed
        assert!(Response::constraint("tight", 5.0, 5.0).is_ok());
        assert!(Response::constraint("bad", 1.0, 0.0).is_err());
    }

    #[test]
    fn test_value_slot() {
        let mut r = Response::monitored("tip_deflection");
        r.set_value(0.83);
        assert_eq!(r.value(), Some(0.83));
        r.clear_value();
        assert_eq!(r.value(), None);
    }

    #[test]
    fn test_set_weight_revalidates() {
        let mut r = Response::objective("mass", Sense::Minimize, 1.0).unwrap();
        assert!(r.set_weight(-1.0).is_err());
        r.set_weight(2.5).unwrap();

        let mut m = Response::monitored("aux");
        assert!(matches!(m.set_weight(1.0), Err(Error::KindMismatch { .. })));
    }

    #[test]
    fn test_set_band_revalidates() {
        let mut r = Response::constraint("stress", 0.0, 100.0).unwrap();
        assert!(r.set_band(10.0, 5.0).is_err());
        r.set_band(-50.0, 50.0).unwrap();
    }
}
