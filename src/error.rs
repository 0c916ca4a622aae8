use thiserror::Error;

/// Parameter table a failed lookup was aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ParameterKind {
    Supply,
    InboundCapacity,
    Demand,
    UnitCost,
    RoadCost,
}

/// Errors surfaced by a planning run.
///
/// Every variant is terminal for the run it occurred in: there is no retry
/// and no degraded mode, and no flow values are reported alongside any of
/// them.
#[derive(Debug, Error)]
pub enum PlanError {
    /// A constraint or objective referenced a node or arc that has no entry
    /// in the corresponding parameter table.
    #[error("missing {kind} parameter for '{key}'")]
    MissingParameter { kind: ParameterKind, key: String },

    /// The configuration was rejected before any model was built.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The solver proved that no flow assignment satisfies all constraints.
    #[error("model is infeasible: no flow assignment satisfies all constraints")]
    Infeasible,

    /// The objective has no finite minimum.
    #[error("model is unbounded: the objective has no finite minimum")]
    Unbounded,

    /// The solver stopped before proving optimality. Any values it produced
    /// are provisional and are never reported.
    #[error("solver stopped before proving optimality: {0}")]
    Interrupted(String),

    /// The model audit file could not be written.
    #[error("failed to write model export")]
    Export(#[from] std::io::Error),
}

impl PlanError {
    pub fn missing(kind: ParameterKind, key: impl Into<String>) -> Self {
        Self::MissingParameter {
            kind,
            key: key.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parameter_display() {
        let err = PlanError::missing(ParameterKind::UnitCost, "F1 -> W2");
        assert_eq!(err.to_string(), "missing unit_cost parameter for 'F1 -> W2'");
    }

    #[test]
    fn test_terminal_status_display() {
        assert!(PlanError::Infeasible.to_string().contains("infeasible"));
        assert!(PlanError::Unbounded.to_string().contains("no finite minimum"));
    }
}
