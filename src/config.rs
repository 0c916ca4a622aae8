use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::network::{ArcKey, NodeId, NodeRole};

/// Declarative description of one node and its role-specific parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum NodeSpec {
    Factory { id: NodeId, supply: f64 },
    Hub { id: NodeId, inbound_capacity: f64 },
    Warehouse { id: NodeId, demand: f64 },
}

impl NodeSpec {
    pub fn id(&self) -> &NodeId {
        match self {
            NodeSpec::Factory { id, .. }
            | NodeSpec::Hub { id, .. }
            | NodeSpec::Warehouse { id, .. } => id,
        }
    }

    pub fn role(&self) -> NodeRole {
        match self {
            NodeSpec::Factory { .. } => NodeRole::Factory,
            NodeSpec::Hub { .. } => NodeRole::Hub,
            NodeSpec::Warehouse { .. } => NodeRole::Warehouse,
        }
    }
}

/// Declarative description of one directed arc.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcSpec {
    pub from: NodeId,
    pub to: NodeId,
    /// Transportation cost per unit of flow.
    pub unit_cost: f64,
    /// Fixed road-construction cost, charged once if the arc carries any flow.
    #[serde(default)]
    pub road_cost: f64,
    /// Optional hard limit on the flow this arc can carry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<f64>,
}

impl ArcSpec {
    pub fn key(&self) -> ArcKey {
        ArcKey {
            from: self.from.clone(),
            to: self.to.clone(),
        }
    }
}

/// The full graph-configuration structure: nodes, arcs and their parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub nodes: Vec<NodeSpec>,
    pub arcs: Vec<ArcSpec>,
}

impl NetworkConfig {
    /// Validate literal consistency of the configured graph.
    ///
    /// Feasibility of the resulting model is NOT checked here; that verdict
    /// belongs to the solver.
    pub fn validate(&self) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("network must declare at least one node".to_string());
        }
        if self.arcs.is_empty() {
            return Err("network must declare at least one arc".to_string());
        }

        let mut ids: Vec<&NodeId> = Vec::new();
        for node in &self.nodes {
            if ids.contains(&node.id()) {
                return Err(format!("node '{}' is declared twice", node.id()));
            }
            ids.push(node.id());

            let (value, what) = match node {
                NodeSpec::Factory { supply, .. } => (*supply, "supply"),
                NodeSpec::Hub { inbound_capacity, .. } => (*inbound_capacity, "inbound_capacity"),
                NodeSpec::Warehouse { demand, .. } => (*demand, "demand"),
            };
            if value < 0.0 {
                return Err(format!(
                    "{} node '{}' has negative {}",
                    node.role(),
                    node.id(),
                    what
                ));
            }
        }

        let mut keys: Vec<ArcKey> = Vec::new();
        for arc in &self.arcs {
            if arc.from == arc.to {
                return Err(format!("arc '{}' is a self-loop", arc.key()));
            }
            if !ids.contains(&&arc.from) {
                return Err(format!("arc '{}' starts at an undeclared node", arc.key()));
            }
            if !ids.contains(&&arc.to) {
                return Err(format!("arc '{}' ends at an undeclared node", arc.key()));
            }
            if keys.contains(&arc.key()) {
                return Err(format!("arc '{}' is declared twice", arc.key()));
            }
            if arc.unit_cost < 0.0 {
                return Err(format!("arc '{}' has negative unit_cost", arc.key()));
            }
            if arc.road_cost < 0.0 {
                return Err(format!("arc '{}' has negative road_cost", arc.key()));
            }
            if arc.capacity.is_some_and(|c| c < 0.0) {
                return Err(format!("arc '{}' has negative capacity", arc.key()));
            }
            keys.push(arc.key());
        }

        Ok(())
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        let factory = |id: &str, supply: f64| NodeSpec::Factory {
            id: NodeId::from(id),
            supply,
        };
        let warehouse = |id: &str, demand: f64| NodeSpec::Warehouse {
            id: NodeId::from(id),
            demand,
        };
        let arc = |from: &str, to: &str, unit_cost: f64| ArcSpec {
            from: NodeId::from(from),
            to: NodeId::from(to),
            unit_cost,
            road_cost: 1000.0,
            capacity: None,
        };

        Self {
            nodes: vec![
                factory("F1", 50.0),
                factory("F2", 40.0),
                NodeSpec::Hub {
                    id: NodeId::from("DC"),
                    inbound_capacity: 80.0,
                },
                warehouse("W1", 30.0),
                warehouse("W2", 60.0),
            ],
            arcs: vec![
                arc("F1", "DC", 400.0),
                ArcSpec {
                    capacity: Some(10.0),
                    ..arc("F1", "F2", 200.0)
                },
                arc("F1", "W1", 900.0),
                arc("F2", "DC", 300.0),
                arc("DC", "W2", 100.0),
                arc("W1", "W2", 300.0),
                arc("W2", "W1", 200.0),
            ],
        }
    }
}

/// Where the plain-text model dumps are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    pub transport_model_path: PathBuf,
    pub road_model_path: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            transport_model_path: PathBuf::from("transport_model.lp"),
            road_model_path: PathBuf::from("road_model.lp"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    pub network: NetworkConfig,
    pub export: ExportConfig,
}

impl Config {
    pub fn load() -> Result<Self> {
        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file("config/default.toml"))
            .merge(Env::prefixed("SFP__").split("__"));
        let cfg: Config = figment.extract()?;
        cfg.network.validate().map_err(anyhow::Error::msg)?;
        Ok(cfg)
    }
}
