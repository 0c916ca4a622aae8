use good_lp::{
    constraint, default_solver, variable, Expression, ProblemVariables, ResolutionError, Solution,
    SolverModel, Variable,
};
use std::collections::BTreeMap;
use tracing::debug;

use crate::error::PlanError;
use crate::model::{FlowModel, LinearExpr, Relation};
use crate::network::ArcKey;

use super::{FlowSolution, ObjectiveValue};

/// Drives the external LP solver over a [`FlowModel`].
///
/// Objectives are minimized in strict priority order: after each pass the
/// just-optimized objective is pinned to its optimum (plus a small relative
/// slack against solver round-off) before the next objective is minimized.
pub struct FlowSolver {
    pin_gap: f64,
}

impl Default for FlowSolver {
    fn default() -> Self {
        Self { pin_gap: 1e-6 }
    }
}

impl FlowSolver {
    pub fn new(pin_gap: f64) -> Self {
        Self { pin_gap }
    }

    /// One blocking solve. Returns flow values only when every pass proved
    /// optimality; any other terminal status maps to a [`PlanError`].
    pub fn solve(&self, model: &FlowModel) -> Result<FlowSolution, PlanError> {
        if model.objectives.is_empty() {
            return Err(PlanError::InvalidConfig(
                "model declares no objective".to_string(),
            ));
        }

        let mut pinned: Vec<(&LinearExpr, f64)> = Vec::new();
        let mut objective_values = Vec::new();
        let mut flows = BTreeMap::new();

        for objective in &model.objectives {
            flows = self.solve_pass(model, &objective.expr, &pinned)?;
            let value = objective.expr.eval(&flows);
            debug!(objective = %objective.name, priority = objective.priority, value, "objective pass optimal");
            pinned.push((&objective.expr, value));
            objective_values.push(ObjectiveValue {
                name: objective.name.clone(),
                priority: objective.priority,
                value,
            });
        }

        Ok(FlowSolution::new(flows, objective_values))
    }

    fn solve_pass(
        &self,
        model: &FlowModel,
        objective: &LinearExpr,
        pinned: &[(&LinearExpr, f64)],
    ) -> Result<BTreeMap<ArcKey, f64>, PlanError> {
        let mut vars = ProblemVariables::new();
        let by_arc: BTreeMap<ArcKey, Variable> = model
            .arcs
            .iter()
            .map(|arc| {
                let var = vars.add(variable().min(0.0).name(arc.var_name()));
                (arc.clone(), var)
            })
            .collect();

        let mut problem = vars
            .minimise(to_expression(objective, &by_arc))
            .using(default_solver);

        for c in &model.constraints {
            let lhs = to_expression(&c.lhs, &by_arc);
            problem = problem.with(match c.relation {
                Relation::Le => constraint!(lhs <= c.rhs),
                Relation::Ge => constraint!(lhs >= c.rhs),
                Relation::Eq => constraint!(lhs == c.rhs),
            });
        }

        // Earlier objectives stay at their optima.
        for (expr, optimum) in pinned.iter().copied() {
            let lhs = to_expression(expr, &by_arc);
            let bound = optimum + self.pin_gap * optimum.abs().max(1.0);
            problem = problem.with(constraint!(lhs <= bound));
        }

        let solution = problem.solve().map_err(map_resolution_error)?;

        // Snap solver round-off on unused arcs to an exact zero so the
        // reporters' flow filters see 0, not +/-1e-13.
        Ok(model
            .arcs
            .iter()
            .map(|arc| {
                let value = solution.value(by_arc[arc]);
                let value = if value.abs() < super::SOLVER_TOLERANCE {
                    0.0
                } else {
                    value
                };
                (arc.clone(), value)
            })
            .collect())
    }
}

fn to_expression(expr: &LinearExpr, by_arc: &BTreeMap<ArcKey, Variable>) -> Expression {
    expr.terms()
        .map(|(arc, coefficient)| coefficient * by_arc[arc])
        .sum::<Expression>()
}

fn map_resolution_error(err: ResolutionError) -> PlanError {
    match err {
        ResolutionError::Infeasible => PlanError::Infeasible,
        ResolutionError::Unbounded => PlanError::Unbounded,
        other => PlanError::Interrupted(format!("{other:?}")),
    }
}
