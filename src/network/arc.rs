use serde::{Deserialize, Serialize};
use std::fmt;

use super::NodeId;

/// Directed arc between two named nodes.
///
/// The arc set is exactly the configured whitelist; no arc is implied or
/// auto-generated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArcKey {
    pub from: NodeId,
    pub to: NodeId,
}

impl ArcKey {
    pub fn new(from: impl Into<NodeId>, to: impl Into<NodeId>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Name of the flow variable attached to this arc, e.g. `flow_f1_dc`.
    pub fn var_name(&self) -> String {
        format!("flow_{}_{}", self.from.slug(), self.to.slug())
    }
}

impl fmt::Display for ArcKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_var_name() {
        assert_eq!(ArcKey::new("F1", "DC").var_name(), "flow_f1_dc");
    }

    #[test]
    fn test_display() {
        assert_eq!(ArcKey::new("W2", "W1").to_string(), "W2 -> W1");
    }
}
