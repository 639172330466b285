use super::rules::{FieldError, build_defaults, validate};
use crate::expr::{Value, ValueBag, evaluate, is_visible};
use crate::schema::{Node, NodeKind, Schema};
use ahash::AHashSet;

/// The live runtime of one rendered form: the value bag, per-change
/// computed fields, visibility, validation, and submission.
///
/// The session snapshots the schema's node sequence when created (or
/// [`sync`]ed) and owns the bag from then on; every mutation goes
/// through [`set_value`], which is the "on value bag changed" hook.
///
/// [`sync`]: FormSession::sync
/// [`set_value`]: FormSession::set_value
#[derive(Debug, Clone)]
pub struct FormSession {
    nodes: Vec<Node>,
    values: ValueBag,
    dirty: AHashSet<String>,
}

impl FormSession {
    /// Opens a session over the schema with default values.
    pub fn new(schema: &Schema) -> Self {
        let nodes = schema.nodes.clone();
        let values = build_defaults(&nodes);
        let mut session = Self {
            nodes,
            values,
            dirty: AHashSet::new(),
        };
        // Computed fields are live from the first render, before any edit.
        session.run_compute_pass();
        session
    }

    pub fn values(&self) -> &ValueBag {
        &self.values
    }

    pub fn value(&self, id: &str) -> Option<&Value> {
        self.values.get(id)
    }

    /// Whether a field has been touched, by the user or by a compute rule.
    pub fn is_dirty(&self, id: &str) -> bool {
        self.dirty.contains(id)
    }

    /// Applies one user edit, then recomputes every computed field.
    ///
    /// The compute pass runs once per call, in node order, against the
    /// bag as it stood when the pass started. There is no fixed-point
    /// iteration: a field computed from another computed field sees that
    /// field's last-pass value and catches up on the next change. This
    /// keeps every keystroke bounded to a single pass over the nodes.
    pub fn set_value(&mut self, id: impl Into<String>, value: Value) {
        let id = id.into();
        self.dirty.insert(id.clone());
        self.values.insert(id, value);
        self.run_compute_pass();
    }

    fn run_compute_pass(&mut self) {
        let snapshot = self.values.clone();
        for node in &self.nodes {
            if matches!(node.kind, NodeKind::Section { .. }) {
                continue;
            }
            let Some(rule) = node.compute.as_deref() else {
                continue;
            };
            // An erroring compute rule leaves the field alone.
            if let Some(computed) = evaluate(rule, &snapshot) {
                self.values.insert(node.id.clone(), computed);
                self.dirty.insert(node.id.clone());
            }
        }
    }

    /// The render list: field nodes whose visibility rule currently
    /// holds, in sequence order. Sections render nothing and hidden
    /// fields are skipped entirely, though their values stay in the bag.
    pub fn visible_fields(&self) -> Vec<&Node> {
        self.nodes
            .iter()
            .filter(|node| !matches!(node.kind, NodeKind::Section { .. }))
            .filter(|node| is_visible(node.visible_if.as_deref(), &self.values))
            .collect()
    }

    /// Current per-field validation errors for the visible fields.
    pub fn errors(&self) -> Vec<FieldError> {
        validate(&self.nodes, &self.values)
    }

    /// Validates and, on success, surfaces the full value bag (hidden
    /// fields included) as the submission payload.
    pub fn submit(&self) -> Result<ValueBag, Vec<FieldError>> {
        let errors = self.errors();
        if errors.is_empty() {
            Ok(self.values.clone())
        } else {
            Err(errors)
        }
    }

    /// Re-derives the session against an edited schema. Values entered
    /// for fields that still exist are kept; fields that disappeared are
    /// dropped; new fields get their defaults.
    pub fn sync(&mut self, schema: &Schema) {
        let mut values = build_defaults(&schema.nodes);
        for (id, value) in &self.values {
            if values.contains_key(id) {
                values.insert(id.clone(), value.clone());
            }
        }
        self.dirty.retain(|id| values.contains_key(id));
        self.nodes = schema.nodes.clone();
        self.values = values;
        self.run_compute_pass();
    }
}
