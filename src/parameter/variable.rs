//! Design variable types.
//!
//! A [`Variable`] is one entry of the design catalog: a named quantity the
//! optimizer may (or, when fixed, may not) vary. The three kinds carry only
//! their own fields and are validated at construction; later edits go
//! through setters that re-validate.

use crate::error::{Error, Result};

/// The kind-specific data of a design variable.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VariableKind {
    /// A real-valued variable on a closed interval.
    Continuous {
        /// Lower bound (exclusive of `max`).
        min: f64,
        /// Upper bound.
        max: f64,
        /// Base design value, within `[min, max]`. Doubles as the
        /// normalization scale for the neighbor metric.
        baseline: f64,
        /// Reporting resolution hint. Never used by the search.
        resolution: u32,
    },

    /// A variable restricted to a sorted set of allowed values.
    Discrete {
        /// Allowed values, strictly ascending, at least two.
        values: Vec<f64>,
        /// Base design value, a member of `values`.
        baseline: f64,
    },

    /// A constant excluded from the search space.
    Fixed {
        /// The constant value.
        value: f64,
    },
}

/// A named design variable with a settable current value.
///
/// The current value starts at the baseline (or the fixed constant) and is
/// overwritten by the evaluation orchestrator before each evaluation.
///
/// # Examples
///
/// ```
/// use optflow::parameter::Variable;
///
/// let thickness = Variable::continuous("thickness", 0.5, 4.0, 1.0, 100).unwrap();
/// assert!(!thickness.is_fixed());
/// assert_eq!(thickness.value(), 1.0);
///
/// let plies = Variable::discrete("plies", vec![2.0, 4.0, 6.0, 8.0], 4.0).unwrap();
/// assert_eq!(plies.baseline(), Some(4.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Variable {
    /// Variable name (unique within a catalog).
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Kind-specific bounds and baseline.
    kind: VariableKind,
    /// Current design value, written before each evaluation.
    value: f64,
}

impl Variable {
    /// Creates a continuous variable on `[min, max]`.
    pub fn continuous(
        name: impl Into<String>,
        min: f64,
        max: f64,
        baseline: f64,
        resolution: u32,
    ) -> Result<Self> {
        let name = name.into();
        let kind = VariableKind::Continuous {
            min,
            max,
            baseline,
            resolution,
        };
        validate_kind(&name, &kind)?;
        Ok(Self {
            name,
            description: String::new(),
            kind,
            value: baseline,
        })
    }

    /// Creates a discrete variable over a sorted value set.
    pub fn discrete(name: impl Into<String>, values: Vec<f64>, baseline: f64) -> Result<Self> {
        let name = name.into();
        let kind = VariableKind::Discrete { values, baseline };
        validate_kind(&name, &kind)?;
        Ok(Self {
            name,
            description: String::new(),
            kind,
            value: baseline,
        })
    }

    /// Creates a fixed variable. Contributes no search dimension.
    pub fn fixed(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            kind: VariableKind::Fixed { value },
            value,
        }
    }

    /// Attaches a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// The kind-specific data.
    pub fn kind(&self) -> &VariableKind {
        &self.kind
    }

    /// Whether this variable is excluded from the search space.
    pub fn is_fixed(&self) -> bool {
        matches!(self.kind, VariableKind::Fixed { .. })
    }

    /// The base design value. `None` for fixed variables.
    pub fn baseline(&self) -> Option<f64> {
        match self.kind {
            VariableKind::Continuous { baseline, .. } => Some(baseline),
            VariableKind::Discrete { baseline, .. } => Some(baseline),
            VariableKind::Fixed { .. } => None,
        }
    }

    /// The current design value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Overwrites the current design value.
    ///
    /// The orchestrator calls this for every searchable variable before
    /// each evaluation; no range check is applied because the swarm
    /// guarantees its positions stay within bounds.
    pub fn set_value(&mut self, value: f64) {
        self.value = value;
    }

    /// Replaces the range of a continuous variable, re-validating.
    ///
    /// Fails on non-continuous variables and keeps the old range on error.
    pub fn set_range(&mut self, min: f64, max: f64) -> Result<()> {
        match self.kind {
            VariableKind::Continuous {
                baseline,
                resolution,
                ..
            } => {
                let candidate = VariableKind::Continuous {
                    min,
                    max,
                    baseline,
                    resolution,
                };
                validate_kind(&self.name, &candidate)?;
                self.kind = candidate;
                Ok(())
            }
            _ => Err(Error::KindMismatch {
                name: self.name.clone(),
                expected: "continuous",
            }),
        }
    }

    /// Replaces the allowed set of a discrete variable, re-validating.
    pub fn set_values(&mut self, values: Vec<f64>) -> Result<()> {
        match self.kind {
            VariableKind::Discrete { baseline, .. } => {
                let candidate = VariableKind::Discrete { values, baseline };
                validate_kind(&self.name, &candidate)?;
                self.kind = candidate;
                Ok(())
            }
            _ => Err(Error::KindMismatch {
                name: self.name.clone(),
                expected: "discrete",
            }),
        }
    }

    /// Moves the baseline, re-validating it against the range or set.
    pub fn set_baseline(&mut self, baseline: f64) -> Result<()> {
        let candidate = match &self.kind {
            VariableKind::Continuous {
                min,
                max,
                resolution,
                ..
            } => VariableKind::Continuous {
                min: *min,
                max: *max,
                baseline,
                resolution: *resolution,
            },
            VariableKind::Discrete { values, .. } => VariableKind::Discrete {
                values: values.clone(),
                baseline,
            },
            VariableKind::Fixed { .. } => VariableKind::Fixed { value: baseline },
        };
        validate_kind(&self.name, &candidate)?;
        if let VariableKind::Fixed { value } = &candidate {
            // a fixed variable's slot always holds its constant
            self.value = *value;
        }
        self.kind = candidate;
        Ok(())
    }
}

/// Checks the kind invariants, returning the first violation.
fn validate_kind(name: &str, kind: &VariableKind) -> Result<()> {
    match kind {
        VariableKind::Continuous {
            min, max, baseline, ..
        } => {
            if !(min < max) {
                return Err(Error::InvalidRange {
                    name: name.to_string(),
                    min: *min,
                    max: *max,
                });
            }
            if !(*baseline >= *min && *baseline <= *max) {
                return Err(Error::BaselineOutOfRange {
                    name: name.to_string(),
                    baseline: *baseline,
                });
            }
            Ok(())
        }
        VariableKind::Discrete { values, baseline } => {
            if values.len() < 2 {
                return Err(Error::DiscreteSetTooSmall {
                    name: name.to_string(),
                    count: values.len(),
                });
            }
            if values.windows(2).any(|w| !(w[0] < w[1])) {
                return Err(Error::DiscreteSetUnsorted {
                    name: name.to_string(),
                });
            }
            if !values.contains(baseline) {
                return Err(Error::BaselineOutOfRange {
                    name: name.to_string(),
                    baseline: *baseline,
                });
            }
            Ok(())
        }
        VariableKind::Fixed { .. } => Ok(()),
    }
}
