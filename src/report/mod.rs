use std::fmt;

use crate::error::PlanError;
use crate::network::{NodeId, SupplyNetwork};
use crate::solve::FlowSolution;

/// One table line: an arc, its solved flow, and its costs.
#[derive(Debug, Clone)]
pub struct ReportRow {
    pub from: NodeId,
    pub to: NodeId,
    pub flow: f64,
    pub unit_cost: f64,
    pub road_cost: Option<f64>,
    pub total_cost: f64,
}

/// Tabular view of a solved flow assignment plus the final cost total.
///
/// The transport-only report keeps zero-flow arcs (filter is >= 0); the road
/// report hides them (filter is > 0). The asymmetry is deliberate and pinned
/// by tests.
#[derive(Debug, Clone)]
pub struct FlowReport {
    rows: Vec<ReportRow>,
    total_cost: f64,
    with_road_cost: bool,
}

impl FlowReport {
    /// Report for the single-objective transport plan. Every arc with
    /// non-negative flow appears, including unused ones.
    pub fn transport(
        network: &SupplyNetwork,
        solution: &FlowSolution,
    ) -> Result<Self, PlanError> {
        let mut rows = Vec::new();
        for arc in network.arcs() {
            let flow = solution.flow(arc);
            if flow < 0.0 {
                continue;
            }
            let unit_cost = network.unit_cost(arc)?;
            rows.push(ReportRow {
                from: arc.from.clone(),
                to: arc.to.clone(),
                flow,
                unit_cost,
                road_cost: None,
                total_cost: unit_cost * flow,
            });
        }

        Ok(Self {
            rows,
            total_cost: solution.primary_objective(),
            with_road_cost: false,
        })
    }

    /// Report for the lexicographic plan. Only arcs that carry flow appear;
    /// each used arc is charged its full road-construction cost once,
    /// independent of volume, on top of the transport optimum.
    pub fn with_road_costs(
        network: &SupplyNetwork,
        solution: &FlowSolution,
    ) -> Result<Self, PlanError> {
        let mut rows = Vec::new();
        let mut activation_cost = 0.0;
        for arc in network.arcs() {
            let flow = solution.flow(arc);
            if flow <= 0.0 {
                continue;
            }
            let unit_cost = network.unit_cost(arc)?;
            let road_cost = network.road_cost(arc)?;
            activation_cost += road_cost;
            rows.push(ReportRow {
                from: arc.from.clone(),
                to: arc.to.clone(),
                flow,
                unit_cost,
                road_cost: Some(road_cost),
                total_cost: unit_cost * flow + road_cost,
            });
        }

        Ok(Self {
            rows,
            total_cost: solution.primary_objective() + activation_cost,
            with_road_cost: true,
        })
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }
}

fn money(value: f64) -> i64 {
    value.round() as i64
}

impl fmt::Display for FlowReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "-".repeat(74))?;
        writeln!(f)?;
        if self.with_road_cost {
            writeln!(
                f,
                "  {:<6} {:<4} {:>6}  {:>11}  {:>9}  {:>10}",
                "From", "To", "Flow", "CostPerUnit", "RoadCost", "TotalCost"
            )?;
        } else {
            writeln!(
                f,
                "  {:<6} {:<4} {:>6}  {:>11}  {:>10}",
                "From", "To", "Flow", "CostPerUnit", "TotalCost"
            )?;
        }
        for row in &self.rows {
            let from = format!("{} ->", row.from);
            match row.road_cost {
                Some(road_cost) => writeln!(
                    f,
                    "  {:<6} {:<4} {:>6}  {:>10}$  {:>8}$  {:>9}$",
                    from,
                    row.to,
                    money(row.flow),
                    money(row.unit_cost),
                    money(road_cost),
                    money(row.total_cost)
                )?,
                None => writeln!(
                    f,
                    "  {:<6} {:<4} {:>6}  {:>10}$  {:>9}$",
                    from,
                    row.to,
                    money(row.flow),
                    money(row.unit_cost),
                    money(row.total_cost)
                )?,
            }
        }
        writeln!(f, "{}", "-".repeat(44))?;
        write!(f, "Sum of Total Cost: {} $", money(self.total_cost))
    }
}
