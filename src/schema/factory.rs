use super::node::{Node, NodeKind, NodeType};
use uuid::Uuid;

/// Constructs a new node of the requested kind with a fresh identifier
/// and kind-appropriate defaults. Pure apart from the id generation.
pub fn create_node(node_type: NodeType) -> Node {
    let (label, kind) = match node_type {
        NodeType::Text => (
            "Text field",
            NodeKind::Text {
                placeholder: Some("Enter text".to_string()),
                regex: None,
            },
        ),
        NodeType::Number => (
            "Number",
            NodeKind::Number {
                min: Some(0.0),
                max: Some(100.0),
            },
        ),
        NodeType::Select => (
            "Select field",
            NodeKind::Select {
                options: vec!["Option A".to_string(), "Option B".to_string()],
                regex: None,
            },
        ),
        NodeType::Checkbox => ("Checkbox", NodeKind::Checkbox),
        NodeType::Section => (
            "Section",
            NodeKind::Section {
                children: Vec::new(),
            },
        ),
    };

    Node {
        id: fresh_id(),
        label: label.to_string(),
        required: false,
        visible_if: None,
        compute: None,
        kind,
    }
}

/// Identifiers are random UUIDv4, unique with overwhelming probability
/// for the lifetime of any schema.
fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}
