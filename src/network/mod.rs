/// Graph & Parameter Loader
///
/// Immutable description of the supply-chain network: node identifiers and
/// roles, the directed arc whitelist, and the per-node / per-arc parameter
/// tables the model builder draws from.

pub mod arc;
pub mod graph;
pub mod node;

pub use arc::ArcKey;
pub use graph::SupplyNetwork;
pub use node::{NodeId, NodeRole};
