use serde::Serialize;
use std::collections::BTreeMap;

use crate::network::ArcKey;

/// Sparse linear expression over per-arc flow variables.
///
/// Terms are keyed by arc so coefficient accumulation is deterministic;
/// a term whose coefficient cancels to zero is dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LinearExpr {
    terms: BTreeMap<ArcKey, f64>,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expression with coefficient 1 on every given arc.
    pub fn sum_of<'a>(arcs: impl IntoIterator<Item = &'a ArcKey>) -> Self {
        let mut expr = Self::new();
        for arc in arcs {
            expr.add_term(arc, 1.0);
        }
        expr
    }

    pub fn add_term(&mut self, arc: &ArcKey, coefficient: f64) {
        let entry = self.terms.entry(arc.clone()).or_insert(0.0);
        *entry += coefficient;
        if *entry == 0.0 {
            self.terms.remove(arc);
        }
    }

    pub fn terms(&self) -> impl Iterator<Item = (&ArcKey, f64)> {
        self.terms.iter().map(|(arc, coefficient)| (arc, *coefficient))
    }

    pub fn coefficient(&self, arc: &ArcKey) -> f64 {
        self.terms.get(arc).copied().unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Value of the expression under a solved flow assignment. Arcs missing
    /// from the assignment contribute nothing.
    pub fn eval(&self, flows: &BTreeMap<ArcKey, f64>) -> f64 {
        self.terms
            .iter()
            .map(|(arc, coefficient)| coefficient * flows.get(arc).copied().unwrap_or(0.0))
            .sum()
    }
}
