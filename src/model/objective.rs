use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::network::SupplyNetwork;

use super::LinearExpr;

/// A named minimized linear objective with a lexicographic priority.
/// Priority 0 is the highest; objectives never mutate variables.
#[derive(Debug, Clone, Serialize)]
pub struct FlowObjective {
    pub name: String,
    pub priority: usize,
    pub expr: LinearExpr,
}

/// Which objectives a planning run minimizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectivePolicy {
    /// Single objective: total transportation cost.
    TransportCost,
    /// Lexicographic pair: transportation cost first, then flow-weighted road
    /// cost among all transport-cost-optimal plans.
    TransportThenRoads,
}

impl ObjectivePolicy {
    pub fn objectives(&self, network: &SupplyNetwork) -> Result<Vec<FlowObjective>, PlanError> {
        let mut transport = LinearExpr::new();
        for arc in network.arcs() {
            transport.add_term(arc, network.unit_cost(arc)?);
        }

        let mut objectives = vec![FlowObjective {
            name: "transport_cost".to_string(),
            priority: 0,
            expr: transport,
        }];

        if let ObjectivePolicy::TransportThenRoads = self {
            let mut roads = LinearExpr::new();
            for arc in network.arcs() {
                roads.add_term(arc, network.road_cost(arc)?);
            }
            objectives.push(FlowObjective {
                name: "road_cost".to_string(),
                priority: 1,
                expr: roads,
            });
        }

        Ok(objectives)
    }
}
