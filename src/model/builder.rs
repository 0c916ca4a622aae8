use serde::Serialize;

use crate::error::PlanError;
use crate::network::{ArcKey, SupplyNetwork};

use super::{FlowConstraint, FlowObjective, LinearExpr, ObjectivePolicy, Relation};

/// A fully specified flow model: one non-negative continuous variable per
/// arc, the constraint system, and the minimized objective(s).
///
/// Built in one shot; nothing is added or modified after construction.
#[derive(Debug, Clone, Serialize)]
pub struct FlowModel {
    pub name: String,
    /// Variable order, identical to the network's arc declaration order.
    pub arcs: Vec<ArcKey>,
    pub constraints: Vec<FlowConstraint>,
    /// Sorted by ascending priority (0 = highest).
    pub objectives: Vec<FlowObjective>,
}

impl FlowModel {
    pub fn constraint(&self, name: &str) -> Option<&FlowConstraint> {
        self.constraints.iter().find(|c| c.name == name)
    }
}

/// Builds the flow model for a [`SupplyNetwork`]: one variable per arc plus
/// the supply / capacity / conservation / demand constraint system.
pub struct ModelBuilder<'a> {
    network: &'a SupplyNetwork,
}

impl<'a> ModelBuilder<'a> {
    pub fn new(network: &'a SupplyNetwork) -> Self {
        Self { network }
    }

    pub fn build(&self, name: &str, policy: ObjectivePolicy) -> Result<FlowModel, PlanError> {
        let net = self.network;
        let mut constraints = Vec::new();

        // Factory supply: outflow may not exceed own production plus whatever
        // arrives from sibling factories for transshipment.
        for factory in net.factories() {
            let mut lhs = LinearExpr::sum_of(net.outgoing(factory));
            for arc in net.incoming(factory) {
                if net.is_factory(&arc.from) {
                    lhs.add_term(arc, -1.0);
                }
            }
            constraints.push(FlowConstraint::new(
                format!("supply_{}", factory.slug()),
                lhs,
                Relation::Le,
                net.supply(factory)?,
            ));
        }

        // Per-arc road capacity.
        for arc in net.arcs() {
            if let Some(capacity) = net.arc_capacity(arc) {
                let mut lhs = LinearExpr::new();
                lhs.add_term(arc, 1.0);
                constraints.push(FlowConstraint::new(
                    format!("capacity_{}_{}", arc.from.slug(), arc.to.slug()),
                    lhs,
                    Relation::Le,
                    capacity,
                ));
            }
        }

        // Hub inbound road capacity.
        for hub in net.hubs() {
            constraints.push(FlowConstraint::new(
                format!("capacity_{}_inbound", hub.slug()),
                LinearExpr::sum_of(net.incoming(hub)),
                Relation::Le,
                net.inbound_capacity(hub)?,
            ));
        }

        // Hub flow conservation: everything entering a hub leaves it.
        for hub in net.hubs() {
            let mut lhs = LinearExpr::sum_of(net.outgoing(hub));
            for arc in net.incoming(hub) {
                lhs.add_term(arc, -1.0);
            }
            constraints.push(FlowConstraint::new(
                format!("{}_balance", hub.slug()),
                lhs,
                Relation::Eq,
                0.0,
            ));
        }

        // Warehouse conservation: a warehouse may re-ship at most what it
        // receives. Emitted per warehouse that has an outgoing arc.
        for warehouse in net.warehouses() {
            if net.outgoing(warehouse).next().is_none() {
                continue;
            }
            let mut lhs = LinearExpr::sum_of(net.outgoing(warehouse));
            for arc in net.incoming(warehouse) {
                lhs.add_term(arc, -1.0);
            }
            constraints.push(FlowConstraint::new(
                format!("{}_conservation", warehouse.slug()),
                lhs,
                Relation::Le,
                0.0,
            ));
        }

        // Warehouse demand: inbound flow covers the fixed demand plus
        // whatever the warehouse ships onward.
        for warehouse in net.warehouses() {
            let mut lhs = LinearExpr::sum_of(net.incoming(warehouse));
            for arc in net.outgoing(warehouse) {
                lhs.add_term(arc, -1.0);
            }
            constraints.push(FlowConstraint::new(
                format!("{}_demand", warehouse.slug()),
                lhs,
                Relation::Eq,
                net.demand(warehouse)?,
            ));
        }

        let mut objectives = policy.objectives(net)?;
        objectives.sort_by_key(|o| o.priority);

        Ok(FlowModel {
            name: name.to_string(),
            arcs: net.arcs().to_vec(),
            constraints,
            objectives,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn build(policy: ObjectivePolicy) -> FlowModel {
        let network = SupplyNetwork::from_config(&Config::default().network).unwrap();
        ModelBuilder::new(&network).build("test_model", policy).unwrap()
    }

    #[test]
    fn test_default_topology_yields_nine_constraints() {
        let model = build(ObjectivePolicy::TransportCost);
        let names: Vec<&str> = model.constraints.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "supply_f1",
                "supply_f2",
                "capacity_f1_f2",
                "capacity_dc_inbound",
                "dc_balance",
                "w1_conservation",
                "w2_conservation",
                "w1_demand",
                "w2_demand",
            ]
        );
        assert_eq!(model.arcs.len(), 7);
    }

    #[test]
    fn test_supply_f1_covers_all_outgoing_arcs() {
        let model = build(ObjectivePolicy::TransportCost);
        let c = model.constraint("supply_f1").unwrap();
        assert_eq!(c.relation, Relation::Le);
        assert_eq!(c.rhs, 50.0);
        assert_eq!(c.lhs.coefficient(&ArcKey::new("F1", "DC")), 1.0);
        assert_eq!(c.lhs.coefficient(&ArcKey::new("F1", "F2")), 1.0);
        assert_eq!(c.lhs.coefficient(&ArcKey::new("F1", "W1")), 1.0);
        assert_eq!(c.lhs.terms().count(), 3);
    }

    #[test]
    fn test_supply_f2_extends_supply_by_transshipped_flow() {
        let model = build(ObjectivePolicy::TransportCost);
        let c = model.constraint("supply_f2").unwrap();
        assert_eq!(c.relation, Relation::Le);
        assert_eq!(c.rhs, 40.0);
        assert_eq!(c.lhs.coefficient(&ArcKey::new("F2", "DC")), 1.0);
        assert_eq!(c.lhs.coefficient(&ArcKey::new("F1", "F2")), -1.0);
        assert_eq!(c.lhs.terms().count(), 2);
    }

    #[test]
    fn test_capacity_rows() {
        let model = build(ObjectivePolicy::TransportCost);

        let arc = model.constraint("capacity_f1_f2").unwrap();
        assert_eq!(arc.rhs, 10.0);
        assert_eq!(arc.lhs.terms().count(), 1);

        let hub = model.constraint("capacity_dc_inbound").unwrap();
        assert_eq!(hub.rhs, 80.0);
        assert_eq!(hub.lhs.coefficient(&ArcKey::new("F1", "DC")), 1.0);
        assert_eq!(hub.lhs.coefficient(&ArcKey::new("F2", "DC")), 1.0);
    }

    #[test]
    fn test_dc_balance_is_equality() {
        let model = build(ObjectivePolicy::TransportCost);
        let c = model.constraint("dc_balance").unwrap();
        assert_eq!(c.relation, Relation::Eq);
        assert_eq!(c.rhs, 0.0);
        assert_eq!(c.lhs.coefficient(&ArcKey::new("DC", "W2")), 1.0);
        assert_eq!(c.lhs.coefficient(&ArcKey::new("F1", "DC")), -1.0);
        assert_eq!(c.lhs.coefficient(&ArcKey::new("F2", "DC")), -1.0);
    }

    #[test]
    fn test_each_warehouse_gets_its_own_conservation_row() {
        let model = build(ObjectivePolicy::TransportCost);

        let w1 = model.constraint("w1_conservation").unwrap();
        assert_eq!(w1.relation, Relation::Le);
        assert_eq!(w1.lhs.coefficient(&ArcKey::new("W1", "W2")), 1.0);
        assert_eq!(w1.lhs.coefficient(&ArcKey::new("F1", "W1")), -1.0);
        assert_eq!(w1.lhs.coefficient(&ArcKey::new("W2", "W1")), -1.0);

        let w2 = model.constraint("w2_conservation").unwrap();
        assert_eq!(w2.lhs.coefficient(&ArcKey::new("W2", "W1")), 1.0);
        assert_eq!(w2.lhs.coefficient(&ArcKey::new("DC", "W2")), -1.0);
        assert_eq!(w2.lhs.coefficient(&ArcKey::new("W1", "W2")), -1.0);
    }

    #[test]
    fn test_demand_rows_are_equalities() {
        let model = build(ObjectivePolicy::TransportCost);

        let w1 = model.constraint("w1_demand").unwrap();
        assert_eq!(w1.relation, Relation::Eq);
        assert_eq!(w1.rhs, 30.0);
        assert_eq!(w1.lhs.coefficient(&ArcKey::new("F1", "W1")), 1.0);
        assert_eq!(w1.lhs.coefficient(&ArcKey::new("W2", "W1")), 1.0);
        assert_eq!(w1.lhs.coefficient(&ArcKey::new("W1", "W2")), -1.0);

        let w2 = model.constraint("w2_demand").unwrap();
        assert_eq!(w2.rhs, 60.0);
    }

    #[test]
    fn test_lexicographic_model_carries_both_objectives() {
        let model = build(ObjectivePolicy::TransportThenRoads);
        assert_eq!(model.objectives.len(), 2);
        assert_eq!(model.objectives[0].name, "transport_cost");
        assert_eq!(model.objectives[1].name, "road_cost");
    }
}
