use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One field or section definition within a form schema.
///
/// The identifier is assigned at creation and never changes; the kind tag
/// is structurally immutable because every mutation goes through
/// [`Node::patched`], which refuses to re-discriminate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    /// Boolean-valued expression gating whether this node renders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_if: Option<String>,
    /// Value-producing expression re-applied on every value change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compute: Option<String>,
    #[serde(flatten)]
    pub kind: NodeKind,
}

/// Kind-specific attributes, discriminated by the serialized `type` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeKind {
    Text {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        regex: Option<String>,
    },
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    Select {
        #[serde(default)]
        options: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        regex: Option<String>,
    },
    Checkbox,
    Section {
        #[serde(default)]
        children: Vec<Node>,
    },
}

/// The bare kind tag, used by the factory and by create-drag payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Text,
    Number,
    Select,
    Checkbox,
    Section,
}

impl NodeType {
    /// All kinds, in the order the palette lists them.
    pub const ALL: [NodeType; 5] = [
        NodeType::Text,
        NodeType::Number,
        NodeType::Select,
        NodeType::Checkbox,
        NodeType::Section,
    ];
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeType::Text => "text",
            NodeType::Number => "number",
            NodeType::Select => "select",
            NodeType::Checkbox => "checkbox",
            NodeType::Section => "section",
        };
        write!(f, "{}", name)
    }
}

/// Attribute edits for one node. `None` leaves an attribute untouched;
/// the double-`Option` fields distinguish "leave alone" from "clear".
///
/// There is deliberately no way to express a change of `id` or kind.
#[derive(Debug, Clone, Default)]
pub struct NodePatch {
    pub label: Option<String>,
    pub required: Option<bool>,
    pub visible_if: Option<Option<String>>,
    pub compute: Option<Option<String>>,
    pub kind: Option<KindPatch>,
}

/// Kind-specific attribute edits, typed per variant so a patch written
/// for one kind can never be applied to another.
///
/// Checkbox and section nodes have no kind-specific editable attributes
/// (section children are surfaced only as a count), so no variants exist
/// for them.
#[derive(Debug, Clone)]
pub enum KindPatch {
    Text {
        placeholder: Option<Option<String>>,
        regex: Option<Option<String>>,
    },
    Number {
        min: Option<Option<f64>>,
        max: Option<Option<f64>>,
    },
    Select {
        options: Option<Vec<String>>,
        regex: Option<Option<String>>,
    },
}

impl Node {
    pub fn node_type(&self) -> NodeType {
        match self.kind {
            NodeKind::Text { .. } => NodeType::Text,
            NodeKind::Number { .. } => NodeType::Number,
            NodeKind::Select { .. } => NodeType::Select,
            NodeKind::Checkbox => NodeType::Checkbox,
            NodeKind::Section { .. } => NodeType::Section,
        }
    }

    /// Number of children of a section node; `None` for field kinds.
    pub fn child_count(&self) -> Option<usize> {
        match &self.kind {
            NodeKind::Section { children } => Some(children.len()),
            _ => None,
        }
    }

    /// Returns a copy of this node with the patch applied.
    ///
    /// The id and kind tag always carry over unchanged. A kind patch
    /// whose variant does not match the node's kind is refused with
    /// [`SchemaError::KindMismatch`] and nothing is applied.
    pub fn patched(&self, patch: &NodePatch) -> Result<Node, SchemaError> {
        let mut next = self.clone();

        if let Some(kind_patch) = &patch.kind {
            next.kind = self.patched_kind(kind_patch)?;
        }
        if let Some(label) = &patch.label {
            next.label = label.clone();
        }
        if let Some(required) = patch.required {
            next.required = required;
        }
        if let Some(visible_if) = &patch.visible_if {
            next.visible_if = normalize_expr(visible_if.clone());
        }
        if let Some(compute) = &patch.compute {
            next.compute = normalize_expr(compute.clone());
        }

        Ok(next)
    }

    fn patched_kind(&self, patch: &KindPatch) -> Result<NodeKind, SchemaError> {
        match (&self.kind, patch) {
            (
                NodeKind::Text { placeholder, regex },
                KindPatch::Text {
                    placeholder: new_placeholder,
                    regex: new_regex,
                },
            ) => Ok(NodeKind::Text {
                placeholder: apply_opt(placeholder, new_placeholder),
                regex: apply_opt(regex, new_regex),
            }),
            (
                NodeKind::Number { min, max },
                KindPatch::Number {
                    min: new_min,
                    max: new_max,
                },
            ) => Ok(NodeKind::Number {
                min: apply_opt(min, new_min),
                max: apply_opt(max, new_max),
            }),
            (
                NodeKind::Select { options, regex },
                KindPatch::Select {
                    options: new_options,
                    regex: new_regex,
                },
            ) => Ok(NodeKind::Select {
                options: new_options.clone().unwrap_or_else(|| options.clone()),
                regex: apply_opt(regex, new_regex),
            }),
            (_, mismatched) => Err(SchemaError::KindMismatch {
                node_id: self.id.clone(),
                node_kind: self.node_type().to_string(),
                patch_kind: match mismatched {
                    KindPatch::Text { .. } => "text".to_string(),
                    KindPatch::Number { .. } => "number".to_string(),
                    KindPatch::Select { .. } => "select".to_string(),
                },
            }),
        }
    }
}

fn apply_opt<T: Clone>(current: &Option<T>, patch: &Option<Option<T>>) -> Option<T> {
    match patch {
        Some(next) => next.clone(),
        None => current.clone(),
    }
}

/// A blank expression string means "no rule"; storing it as `None` keeps
/// visibility and compute checks from tripping over empty input.
fn normalize_expr(expr: Option<String>) -> Option<String> {
    expr.filter(|s| !s.trim().is_empty())
}

fn is_false(value: &bool) -> bool {
    !*value
}
