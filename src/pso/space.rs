//! Search-space mapping.
//!
//! Derives the swarm's coordinate system from a catalog: one [`Dimension`]
//! per non-fixed variable, in catalog order, carrying bounds, the baseline
//! scale used to normalize the neighbor metric, and the velocity limit.
//! Discrete dimensions also carry their allowed set and know how to snap a
//! continuous candidate onto it.

use crate::error::{Error, Result};
use crate::parameter::{Catalog, VariableKind};

/// Divisor applied to a dimension's extent to obtain its velocity limit.
const V_LIMIT_DIVISOR: f64 = 40.0;

/// One searchable axis of the design space.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimension {
    /// Name of the variable this dimension drives.
    pub name: String,
    /// Lower bound.
    pub lower: f64,
    /// Upper bound.
    pub upper: f64,
    /// Baseline value; normalizes positions for the neighbor metric.
    pub scale: f64,
    /// Velocity clamp, `(upper - lower) / 40`.
    pub v_limit: f64,
    /// Allowed values for a discrete dimension, ascending. Empty when
    /// continuous.
    values: Vec<f64>,
}

impl Dimension {
    /// Whether this dimension is restricted to a discrete set.
    pub fn is_discrete(&self) -> bool {
        !self.values.is_empty()
    }

    /// The allowed set of a discrete dimension (empty when continuous).
    pub fn allowed_values(&self) -> &[f64] {
        &self.values
    }

    /// Snaps a candidate onto the allowed set of a discrete dimension.
    ///
    /// Candidates at or below the smallest value take the smallest; above
    /// the largest take the largest. In between, the nearer of the two
    /// bracketing values wins and exact midpoints go to the lower value.
    /// Continuous dimensions return the candidate unchanged.
    pub fn snap(&self, x: f64) -> f64 {
        if self.values.is_empty() {
            return x;
        }
        let first = self.values[0];
        let last = self.values[self.values.len() - 1];
        if x <= first {
            return first;
        }
        if x > last {
            return last;
        }
        for k in 1..self.values.len() {
            let next = self.values[k];
            if x <= next {
                let prev = self.values[k - 1];
                // midpoint ties favor the lower value
                return if x - prev <= next - x { prev } else { next };
            }
        }
        last
    }
}

/// The full coordinate system of a search: the non-fixed dimensions in
/// catalog order.
///
/// Fixed variables contribute nothing here; the orchestrator leaves their
/// value slots untouched.
#[derive(Debug, Clone)]
pub struct SearchSpace {
    dimensions: Vec<Dimension>,
}

impl SearchSpace {
    /// Maps a catalog onto a search space.
    ///
    /// Fails when no variable is searchable ([`Error::EmptySearchSpace`])
    /// or when a searchable variable's baseline is zero
    /// ([`Error::ZeroScale`]) — a zero scale cannot normalize the
    /// neighbor metric.
    pub fn from_catalog(catalog: &Catalog) -> Result<Self> {
        let mut dimensions = Vec::new();
        for var in catalog.variables() {
            let (lower, upper, scale, values) = match var.kind() {
                VariableKind::Continuous {
                    min, max, baseline, ..
                } => (*min, *max, *baseline, Vec::new()),
                VariableKind::Discrete { values, baseline } => (
                    values[0],
                    values[values.len() - 1],
                    *baseline,
                    values.clone(),
                ),
                VariableKind::Fixed { .. } => continue,
            };
            if scale == 0.0 {
                return Err(Error::ZeroScale {
                    name: var.name.clone(),
                });
            }
            dimensions.push(Dimension {
                name: var.name.clone(),
                lower,
                upper,
                scale,
                v_limit: (upper - lower) / V_LIMIT_DIVISOR,
                values,
            });
        }
        if dimensions.is_empty() {
            return Err(Error::EmptySearchSpace);
        }
        Ok(Self { dimensions })
    }

    /// Number of searchable dimensions.
    pub fn len(&self) -> usize {
        self.dimensions.len()
    }

    /// Whether the space has no dimensions. Never true for a constructed
    /// space; present for slice-like completeness.
    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }

    /// The dimensions in catalog order.
    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameter::Variable;
    use proptest::prelude::*;

    fn space_of(vars: Vec<Variable>) -> Result<SearchSpace> {
        let mut catalog = Catalog::new();
        for v in vars {
            catalog.add_variable(v).unwrap();
        }
        SearchSpace::from_catalog(&catalog)
    }

    #[test]
    fn test_fixed_variables_excluded() {
        let space = space_of(vec![
            Variable::continuous("x", 0.0, 10.0, 5.0, 10).unwrap(),
            Variable::fixed("g", 9.81),
            Variable::discrete("n", vec![1.0, 2.0, 3.0], 2.0).unwrap(),
        ])
        .unwrap();
        assert_eq!(space.len(), 2);
        assert_eq!(space.dimensions()[0].name, "x");
        assert_eq!(space.dimensions()[1].name, "n");
    }

    #[test]
    fn test_bounds_scale_and_v_limit() {
        let space = space_of(vec![Variable::continuous("x", -2.0, 6.0, 1.0, 10).unwrap()])
            .unwrap();
        let d = &space.dimensions()[0];
        assert_eq!(d.lower, -2.0);
        assert_eq!(d.upper, 6.0);
        assert_eq!(d.scale, 1.0);
        assert!((d.v_limit - 0.2).abs() < 1e-12);
        assert!(!d.is_discrete());
    }

    #[test]
    fn test_discrete_bounds_are_set_ends() {
        let space =
            space_of(vec![Variable::discrete("n", vec![2.0, 5.0, 9.0], 5.0).unwrap()]).unwrap();
        let d = &space.dimensions()[0];
        assert_eq!(d.lower, 2.0);
        assert_eq!(d.upper, 9.0);
        assert!(d.is_discrete());
    }

    #[test]
    fn test_all_fixed_fails() {
        let err = space_of(vec![Variable::fixed("a", 1.0), Variable::fixed("b", 2.0)])
            .unwrap_err();
        assert!(matches!(err, Error::EmptySearchSpace));
    }

    #[test]
    fn test_zero_baseline_rejected() {
        let err = space_of(vec![Variable::continuous("x", -1.0, 1.0, 0.0, 10).unwrap()])
            .unwrap_err();
        assert!(matches!(err, Error::ZeroScale { .. }));
    }

    // ---- snapping ----

    fn seven() -> Dimension {
        let space = space_of(vec![Variable::discrete(
            "n",
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0],
            1.0,
        )
        .unwrap()])
        .unwrap();
        space.dimensions()[0].clone()
    }

    #[test]
    fn test_snap_nearest() {
        let d = seven();
        assert_eq!(d.snap(2.4), 2.0);
        assert_eq!(d.snap(2.6), 3.0);
        assert_eq!(d.snap(6.9), 7.0);
    }

    #[test]
    fn test_snap_tie_goes_lower() {
        let d = seven();
        assert_eq!(d.snap(2.5), 2.0);
        assert_eq!(d.snap(5.5), 5.0);
    }

    #[test]
    fn test_snap_clamps_to_ends() {
        let d = seven();
        assert_eq!(d.snap(0.2), 1.0);
        assert_eq!(d.snap(1.0), 1.0);
        assert_eq!(d.snap(9.3), 7.0);
        assert_eq!(d.snap(7.0), 7.0);
    }

    #[test]
    fn test_snap_continuous_is_identity() {
        let space =
            space_of(vec![Variable::continuous("x", 0.0, 1.0, 0.5, 10).unwrap()]).unwrap();
        assert_eq!(space.dimensions()[0].snap(0.731), 0.731);
    }

    proptest! {
        /// The snapped value is always a member of the allowed set, and no
        /// other member is strictly nearer to the candidate.
        #[test]
        fn prop_snap_is_nearest_member(x in -20.0f64..20.0) {
            let d = seven();
            let snapped = d.snap(x);
            prop_assert!(d.allowed_values().contains(&snapped));
            let nearest = d
                .allowed_values()
                .iter()
                .map(|v| (v - x).abs())
                .fold(f64::INFINITY, f64::min);
            prop_assert!((snapped - x).abs() <= nearest + 1e-12);
        }
    }
}
