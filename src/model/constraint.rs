use serde::Serialize;
use std::collections::BTreeMap;

use crate::network::ArcKey;

use super::LinearExpr;

/// Direction of a linear constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum_macros::Display)]
pub enum Relation {
    #[strum(serialize = "<=")]
    Le,
    #[strum(serialize = ">=")]
    Ge,
    #[strum(serialize = "=")]
    Eq,
}

/// A named linear constraint `lhs <relation> rhs`.
///
/// Immutable once added to a model; the solver consumes the full constraint
/// set atomically.
#[derive(Debug, Clone, Serialize)]
pub struct FlowConstraint {
    pub name: String,
    pub lhs: LinearExpr,
    pub relation: Relation,
    pub rhs: f64,
}

impl FlowConstraint {
    pub fn new(name: impl Into<String>, lhs: LinearExpr, relation: Relation, rhs: f64) -> Self {
        Self {
            name: name.into(),
            lhs,
            relation,
            rhs,
        }
    }

    /// Whether a solved flow assignment satisfies this constraint within the
    /// given tolerance.
    pub fn satisfied_by(&self, flows: &BTreeMap<ArcKey, f64>, tolerance: f64) -> bool {
        let lhs = self.lhs.eval(flows);
        match self.relation {
            Relation::Le => lhs <= self.rhs + tolerance,
            Relation::Ge => lhs >= self.rhs - tolerance,
            Relation::Eq => (lhs - self.rhs).abs() <= tolerance,
        }
    }
}
