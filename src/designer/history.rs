use crate::error::SchemaError;
use crate::schema::{Node, NodePatch, NodeType, Schema, create_node};
use log::debug;
use std::collections::VecDeque;

/// The designer state: current schema, current selection, and the linear
/// undo/redo history over full schema snapshots.
///
/// There is exactly one of these per editing session, owned by the
/// top-level controller and passed by reference to whatever needs it.
/// Every structural or attribute edit funnels through [`update_schema`];
/// that discipline is what makes each user action exactly one undo step.
///
/// [`update_schema`]: Designer::update_schema
#[derive(Debug, Default)]
pub struct Designer {
    schema: Schema,
    selected: Option<String>,
    past: Vec<Schema>,
    future: VecDeque<Schema>,
}

impl Designer {
    /// Starts a session with an empty schema and empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a session from a previously persisted schema.
    pub fn with_schema(schema: Schema) -> Self {
        Self {
            schema,
            ..Self::default()
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// The selected node, resolved against the current sequence. `None`
    /// when nothing is selected or the selection id is stale.
    pub fn selected_node(&self) -> Option<&Node> {
        self.selected.as_deref().and_then(|id| self.schema.node(id))
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// The single mutation gate.
    ///
    /// The transform receives the current schema and returns the
    /// candidate replacement, or `None` to signal "unchanged". A `None`
    /// leaves everything untouched: no history entry, no stack changes,
    /// and the call returns `false`. Otherwise the current schema is
    /// pushed onto the past stack, the future stack is discarded, and
    /// the candidate becomes current.
    ///
    /// Transforms must be pure with respect to anything outside the
    /// schema they receive; the result is adopted as the new
    /// authoritative state without further checks.
    pub fn update_schema<F>(&mut self, transform: F) -> bool
    where
        F: FnOnce(&Schema) -> Option<Schema>,
    {
        let Some(next) = transform(&self.schema) else {
            return false;
        };
        self.past.push(std::mem::replace(&mut self.schema, next));
        self.future.clear();
        debug!(
            "schema updated ({} nodes, {} past entries)",
            self.schema.nodes.len(),
            self.past.len()
        );
        true
    }

    /// Sets the selection. Not tracked in history.
    pub fn select(&mut self, id: Option<String>) {
        self.selected = id;
    }

    /// Steps back one edit. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.past.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.schema, previous);
        self.future.push_front(current);
        debug!("undo ({} past, {} future)", self.past.len(), self.future.len());
        true
    }

    /// Steps forward one undone edit. Returns `false` when the future
    /// stack is empty.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop_front() else {
            return false;
        };
        let current = std::mem::replace(&mut self.schema, next);
        self.past.push(current);
        debug!("redo ({} past, {} future)", self.past.len(), self.future.len());
        true
    }

    // --- Edit operations, all routed through the gate ---

    /// Palette click: appends a freshly created node of the given kind.
    /// Returns the new node's id.
    pub fn add_node(&mut self, node_type: NodeType) -> String {
        let node = create_node(node_type);
        let id = node.id.clone();
        self.update_schema(|schema| {
            let mut next = schema.clone();
            next.nodes.push(node);
            Some(next)
        });
        id
    }

    /// Applies an attribute patch to the node with the given id.
    ///
    /// Kind-mismatched patches are refused before anything is recorded,
    /// so a failed patch is not an undo step.
    pub fn patch_node(&mut self, id: &str, patch: &NodePatch) -> Result<(), SchemaError> {
        let index = self
            .schema
            .node_index(id)
            .ok_or_else(|| SchemaError::NodeNotFound(id.to_string()))?;
        let patched = self.schema.nodes[index].patched(patch)?;
        self.update_schema(|schema| {
            let mut next = schema.clone();
            next.nodes[index] = patched;
            Some(next)
        });
        Ok(())
    }

    /// Toolbar nudge: moves the selected node by `delta` positions,
    /// clamped to the sequence bounds. A nudge that lands on the node's
    /// own position is a no-op with no history entry.
    pub fn nudge_selected(&mut self, delta: isize) -> bool {
        let Some(from) = self
            .selected
            .as_deref()
            .and_then(|id| self.schema.node_index(id))
        else {
            return false;
        };
        let last = self.schema.nodes.len().saturating_sub(1);
        let to = from.saturating_add_signed(delta).min(last);
        if from == to {
            return false;
        }
        self.update_schema(|schema| {
            let mut next = schema.clone();
            let node = next.nodes.remove(from);
            next.nodes.insert(to, node);
            Some(next)
        })
    }
}
