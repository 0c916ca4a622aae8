use std::collections::BTreeMap;

use crate::config::{NetworkConfig, NodeSpec};
use crate::error::{ParameterKind, PlanError};

use super::{ArcKey, NodeId};

/// Immutable supply-chain network built once per run from configuration.
///
/// Holds the arc whitelist in declaration order plus the parameter tables the
/// model builder reads. Lookups for a key that is absent from its table are a
/// contract violation and surface as [`PlanError::MissingParameter`].
#[derive(Debug, Clone)]
pub struct SupplyNetwork {
    factories: Vec<NodeId>,
    hubs: Vec<NodeId>,
    warehouses: Vec<NodeId>,
    arcs: Vec<ArcKey>,
    supply: BTreeMap<NodeId, f64>,
    inbound_capacity: BTreeMap<NodeId, f64>,
    demand: BTreeMap<NodeId, f64>,
    unit_cost: BTreeMap<ArcKey, f64>,
    road_cost: BTreeMap<ArcKey, f64>,
    arc_capacity: BTreeMap<ArcKey, f64>,
}

impl SupplyNetwork {
    pub fn from_config(cfg: &NetworkConfig) -> Result<Self, PlanError> {
        cfg.validate().map_err(PlanError::InvalidConfig)?;

        let mut network = Self {
            factories: Vec::new(),
            hubs: Vec::new(),
            warehouses: Vec::new(),
            arcs: Vec::new(),
            supply: BTreeMap::new(),
            inbound_capacity: BTreeMap::new(),
            demand: BTreeMap::new(),
            unit_cost: BTreeMap::new(),
            road_cost: BTreeMap::new(),
            arc_capacity: BTreeMap::new(),
        };

        for node in &cfg.nodes {
            match node {
                NodeSpec::Factory { id, supply } => {
                    network.factories.push(id.clone());
                    network.supply.insert(id.clone(), *supply);
                }
                NodeSpec::Hub { id, inbound_capacity } => {
                    network.hubs.push(id.clone());
                    network.inbound_capacity.insert(id.clone(), *inbound_capacity);
                }
                NodeSpec::Warehouse { id, demand } => {
                    network.warehouses.push(id.clone());
                    network.demand.insert(id.clone(), *demand);
                }
            }
        }

        for arc in &cfg.arcs {
            let key = arc.key();
            network.unit_cost.insert(key.clone(), arc.unit_cost);
            network.road_cost.insert(key.clone(), arc.road_cost);
            if let Some(capacity) = arc.capacity {
                network.arc_capacity.insert(key.clone(), capacity);
            }
            network.arcs.push(key);
        }

        Ok(network)
    }

    /// Arcs in declaration order; also the variable order of the model.
    pub fn arcs(&self) -> &[ArcKey] {
        &self.arcs
    }

    pub fn factories(&self) -> &[NodeId] {
        &self.factories
    }

    pub fn hubs(&self) -> &[NodeId] {
        &self.hubs
    }

    pub fn warehouses(&self) -> &[NodeId] {
        &self.warehouses
    }

    pub fn is_factory(&self, node: &NodeId) -> bool {
        self.factories.contains(node)
    }

    /// Arcs leaving `node`: select(node, *).
    pub fn outgoing<'a>(&'a self, node: &'a NodeId) -> impl Iterator<Item = &'a ArcKey> {
        self.arcs.iter().filter(move |arc| &arc.from == node)
    }

    /// Arcs entering `node`: select(*, node).
    pub fn incoming<'a>(&'a self, node: &'a NodeId) -> impl Iterator<Item = &'a ArcKey> {
        self.arcs.iter().filter(move |arc| &arc.to == node)
    }

    pub fn supply(&self, node: &NodeId) -> Result<f64, PlanError> {
        self.supply
            .get(node)
            .copied()
            .ok_or_else(|| PlanError::missing(ParameterKind::Supply, node.to_string()))
    }

    pub fn inbound_capacity(&self, node: &NodeId) -> Result<f64, PlanError> {
        self.inbound_capacity
            .get(node)
            .copied()
            .ok_or_else(|| PlanError::missing(ParameterKind::InboundCapacity, node.to_string()))
    }

    pub fn demand(&self, node: &NodeId) -> Result<f64, PlanError> {
        self.demand
            .get(node)
            .copied()
            .ok_or_else(|| PlanError::missing(ParameterKind::Demand, node.to_string()))
    }

    pub fn unit_cost(&self, arc: &ArcKey) -> Result<f64, PlanError> {
        self.unit_cost
            .get(arc)
            .copied()
            .ok_or_else(|| PlanError::missing(ParameterKind::UnitCost, arc.to_string()))
    }

    pub fn road_cost(&self, arc: &ArcKey) -> Result<f64, PlanError> {
        self.road_cost
            .get(arc)
            .copied()
            .ok_or_else(|| PlanError::missing(ParameterKind::RoadCost, arc.to_string()))
    }

    /// Per-arc flow limit, if one was declared. Absence is not an error: most
    /// arcs are uncapacitated.
    pub fn arc_capacity(&self, arc: &ArcKey) -> Option<f64> {
        self.arc_capacity.get(arc).copied()
    }
}
