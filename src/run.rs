use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::PlanError;
use crate::export;
use crate::model::{FlowModel, ModelBuilder, ObjectivePolicy};
use crate::network::SupplyNetwork;
use crate::report::FlowReport;
use crate::solve::{FlowSolution, FlowSolver, SOLVER_TOLERANCE};

/// Everything a completed run produced.
#[derive(Debug)]
pub struct RunOutcome {
    pub model: FlowModel,
    pub solution: FlowSolution,
    pub report: FlowReport,
}

/// One planning run, owning its network, policy and solver.
///
/// Phases are explicit: build the model, dump it for audit, solve, report.
/// A fresh run constructs a fresh model; nothing is shared or retried.
pub struct OptimizationRun {
    network: SupplyNetwork,
    policy: ObjectivePolicy,
    model_name: String,
    export_path: Option<PathBuf>,
    solver: FlowSolver,
}

impl OptimizationRun {
    pub fn new(network: SupplyNetwork, policy: ObjectivePolicy) -> Self {
        let model_name = match policy {
            ObjectivePolicy::TransportCost => "transport_model",
            ObjectivePolicy::TransportThenRoads => "road_model",
        };
        Self {
            network,
            policy,
            model_name: model_name.to_string(),
            export_path: None,
            solver: FlowSolver::default(),
        }
    }

    /// Run against the given configuration, exporting the model dump to the
    /// configured path for the chosen policy.
    pub fn from_config(cfg: &Config, policy: ObjectivePolicy) -> Result<Self, PlanError> {
        let network = SupplyNetwork::from_config(&cfg.network)?;
        let export_path = match policy {
            ObjectivePolicy::TransportCost => cfg.export.transport_model_path.clone(),
            ObjectivePolicy::TransportThenRoads => cfg.export.road_model_path.clone(),
        };
        Ok(Self::new(network, policy).with_export_path(export_path))
    }

    pub fn with_export_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.export_path = Some(path.into());
        self
    }

    pub fn with_model_name(mut self, name: impl Into<String>) -> Self {
        self.model_name = name.into();
        self
    }

    /// Execute the run: build, export, solve, report.
    pub fn execute(&self) -> Result<RunOutcome, PlanError> {
        let model = ModelBuilder::new(&self.network).build(&self.model_name, self.policy)?;
        info!(
            model = %model.name,
            variables = model.arcs.len(),
            constraints = model.constraints.len(),
            objectives = model.objectives.len(),
            "model built"
        );

        if let Some(path) = &self.export_path {
            export::write_model(&model, path)?;
            info!(path = %path.display(), "model exported");
        }

        let solution = self.solver.solve(&model)?;
        for c in &model.constraints {
            if !c.satisfied_by(solution.flows(), SOLVER_TOLERANCE) {
                warn!(constraint = %c.name, "solved flows violate constraint beyond solver tolerance");
            }
        }
        info!(
            objective = solution.primary_objective(),
            "solve finished optimal"
        );

        let report = match self.policy {
            ObjectivePolicy::TransportCost => FlowReport::transport(&self.network, &solution)?,
            ObjectivePolicy::TransportThenRoads => {
                FlowReport::with_road_costs(&self.network, &solution)?
            }
        };

        Ok(RunOutcome {
            model,
            solution,
            report,
        })
    }
}
