use serde::Serialize;
use std::collections::BTreeMap;

use crate::network::ArcKey;

/// Optimal value of one objective, in lexicographic order.
#[derive(Debug, Clone, Serialize)]
pub struct ObjectiveValue {
    pub name: String,
    pub priority: usize,
    pub value: f64,
}

/// Optimal flow assignment returned by the solver.
///
/// Only constructed for solves whose every pass reached a proof of
/// optimality; read-only afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct FlowSolution {
    flows: BTreeMap<ArcKey, f64>,
    objective_values: Vec<ObjectiveValue>,
}

impl FlowSolution {
    pub(crate) fn new(flows: BTreeMap<ArcKey, f64>, objective_values: Vec<ObjectiveValue>) -> Self {
        Self {
            flows,
            objective_values,
        }
    }

    pub fn flow(&self, arc: &ArcKey) -> f64 {
        self.flows.get(arc).copied().unwrap_or(0.0)
    }

    pub fn flows(&self) -> &BTreeMap<ArcKey, f64> {
        &self.flows
    }

    pub fn objective_values(&self) -> &[ObjectiveValue] {
        &self.objective_values
    }

    /// Value of the highest-priority objective.
    pub fn primary_objective(&self) -> f64 {
        self.objective_values[0].value
    }

    pub fn objective_value(&self, name: &str) -> Option<f64> {
        self.objective_values
            .iter()
            .find(|o| o.name == name)
            .map(|o| o.value)
    }
}
