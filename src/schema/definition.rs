use super::node::Node;
use serde::{Deserialize, Serialize};

/// One complete form definition: a title plus the ordered node sequence.
///
/// The sequence order is the only ordering there is; editing and
/// rendering both follow it. All attributes are JSON-primitive, so a
/// schema round-trips through `serde_json` without loss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub title: String,
    #[serde(default)]
    pub nodes: Vec<Node>,
}

impl Default for Schema {
    fn default() -> Self {
        Self {
            title: "My Form".to_string(),
            nodes: Vec::new(),
        }
    }
}

impl Schema {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            nodes: Vec::new(),
        }
    }

    /// Position of a node in the top-level sequence, if present.
    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.id == id)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }
}
