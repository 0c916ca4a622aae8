/// Model Builder & Objective Policy
///
/// The model is held as plain data (a sparse linear-expression IR over arcs)
/// so it can be dumped to the audit file and lowered to the solver any number
/// of times without rebuilding.

pub mod builder;
pub mod constraint;
pub mod expr;
pub mod objective;

pub use builder::{FlowModel, ModelBuilder};
pub use constraint::{FlowConstraint, Relation};
pub use expr::LinearExpr;
pub use objective::{FlowObjective, ObjectivePolicy};
