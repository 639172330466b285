//! Common test utilities for building schemas, nodes and value bags.
use kumiko::prelude::*;

/// Creates a node of the given kind with a fixed id, so tests can refer
/// to nodes deterministically.
#[allow(dead_code)]
pub fn node_with_id(node_type: NodeType, id: &str) -> Node {
    let mut node = create_node(node_type);
    node.id = id.to_string();
    node
}

/// A schema holding three text nodes with ids `A`, `B`, `C`.
#[allow(dead_code)]
pub fn schema_abc() -> Schema {
    let mut schema = Schema::default();
    schema.nodes = vec![
        node_with_id(NodeType::Text, "A"),
        node_with_id(NodeType::Text, "B"),
        node_with_id(NodeType::Text, "C"),
    ];
    schema
}

/// The node id sequence of a schema, for order assertions.
#[allow(dead_code)]
pub fn ids(schema: &Schema) -> Vec<&str> {
    schema.nodes.iter().map(|n| n.id.as_str()).collect()
}

/// Builds a value bag from literal pairs.
#[allow(dead_code)]
pub fn bag(entries: &[(&str, Value)]) -> ValueBag {
    entries
        .iter()
        .map(|(id, value)| (id.to_string(), value.clone()))
        .collect()
}

/// A number field with bounds and a required flag.
#[allow(dead_code)]
pub fn number_node(id: &str, min: Option<f64>, max: Option<f64>, required: bool) -> Node {
    let mut node = node_with_id(NodeType::Number, id);
    node.required = required;
    node.kind = NodeKind::Number { min, max };
    node
}

/// A text field with an optional validation pattern.
#[allow(dead_code)]
pub fn text_node(id: &str, regex: Option<&str>, required: bool) -> Node {
    let mut node = node_with_id(NodeType::Text, id);
    node.required = required;
    node.kind = NodeKind::Text {
        placeholder: None,
        regex: regex.map(str::to_string),
    };
    node
}

/// A text field that recomputes from other fields on every change.
#[allow(dead_code)]
pub fn computed_node(id: &str, compute: &str) -> Node {
    let mut node = node_with_id(NodeType::Text, id);
    node.compute = Some(compute.to_string());
    node
}

/// A schema wrapping the given nodes.
#[allow(dead_code)]
pub fn schema_of(nodes: Vec<Node>) -> Schema {
    let mut schema = Schema::default();
    schema.nodes = nodes;
    schema
}
