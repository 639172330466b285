use super::history::Designer;
use crate::schema::{NodeType, Schema, create_node};
use log::warn;
use serde::{Deserialize, Serialize};

/// Private key the drag payload travels under in the platform's
/// drag-data channel.
pub const DRAG_MIME: &str = "application/x-schema-node";

/// The serializable message describing one in-flight drag: either
/// "create a node of this kind" (from the palette) or "move the node
/// currently at this index" (from the canvas). Exists only for the
/// duration of one gesture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DragPayload {
    Create {
        #[serde(rename = "type")]
        node_type: NodeType,
    },
    Move {
        index: usize,
    },
}

/// Where a drop landed: the canvas background or a specific item slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    Canvas,
    Item(usize),
}

/// Decodes a raw drag payload. Malformed or unrecognized payloads come
/// back as `None`; the consumer treats the drop as a no-op.
pub fn parse_payload(raw: &str) -> Option<DragPayload> {
    match serde_json::from_str(raw) {
        Ok(payload) => Some(payload),
        Err(error) => {
            warn!("discarding malformed drag payload: {}", error);
            None
        }
    }
}

/// State machine over one drag gesture: idle → dragging → (drop |
/// cancel) → idle. While dragging, a single hover index tracks where a
/// drop would insert; it is cleared on leave, cancel and drop.
#[derive(Debug, Default)]
pub struct DragSession {
    active: bool,
    hover: Option<usize>,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The tracked insertion point, for rendering a drop indicator.
    pub fn hover_index(&self) -> Option<usize> {
        self.hover
    }

    /// Drag entered the editing surface.
    pub fn begin(&mut self) {
        self.active = true;
        self.hover = None;
    }

    /// Pointer is over the item at `index`; a drop would target it.
    pub fn drag_over_item(&mut self, index: usize) {
        if self.active {
            self.hover = Some(index);
        }
    }

    /// Pointer is over the canvas background. Only meaningful as a
    /// target when the sequence is empty; otherwise the last item hover
    /// (or append) decides.
    pub fn drag_over_canvas(&mut self, node_count: usize) {
        if self.active && node_count == 0 {
            self.hover = Some(0);
        }
    }

    /// Pointer left the drop-eligible area.
    pub fn drag_leave(&mut self) {
        self.hover = None;
    }

    /// Gesture abandoned without a drop.
    pub fn cancel(&mut self) {
        self.active = false;
        self.hover = None;
    }

    /// Completes the gesture with a drop.
    ///
    /// `raw_payload` is the (possibly absent or malformed) content of
    /// the drag-data channel; anything unparseable makes the whole drop
    /// a no-op. A successful create or move is applied through the
    /// designer's history gate, so it is exactly one undo step. Returns
    /// whether the schema changed.
    pub fn drop(
        &mut self,
        designer: &mut Designer,
        raw_payload: Option<&str>,
        target: DropTarget,
    ) -> bool {
        self.active = false;
        let hover = self.hover.take();

        let Some(payload) = raw_payload
            .filter(|raw| !raw.is_empty())
            .and_then(parse_payload)
        else {
            return false;
        };

        let target_index = match target {
            DropTarget::Item(index) => index,
            DropTarget::Canvas => hover.unwrap_or(designer.schema().nodes.len()),
        };

        apply_drop(designer, payload, target_index)
    }
}

/// Applies a resolved drop to the designer through the history gate.
pub fn apply_drop(designer: &mut Designer, payload: DragPayload, target_index: usize) -> bool {
    match payload {
        DragPayload::Create { node_type } => {
            let node = create_node(node_type);
            designer.update_schema(move |schema| {
                let index = target_index.min(schema.nodes.len());
                let mut next = schema.clone();
                next.nodes.insert(index, node);
                Some(next)
            })
        }
        DragPayload::Move { index } => {
            designer.update_schema(|schema| move_node(schema, index, target_index))
        }
    }
}

/// The reorder rule: clamp both indices, remove the node at `from`, and
/// reinsert at `to - 1` when `to > from` (the removal shifted everything
/// after `from` left by one), otherwise at `to`.
///
/// When the effective reinsertion index equals `from` (a drop on the
/// item's own slot or on the gap just after it) the sequence would come
/// back unchanged, so the move reports "no change" and no history entry
/// is recorded.
pub fn move_node(schema: &Schema, from: usize, to: usize) -> Option<Schema> {
    if schema.nodes.is_empty() {
        return None;
    }
    let from = from.min(schema.nodes.len() - 1);
    let to = to.min(schema.nodes.len());
    let effective = if to > from { to - 1 } else { to };
    if effective == from {
        return None;
    }

    let mut next = schema.clone();
    let node = next.nodes.remove(from);
    next.nodes.insert(effective, node);
    Some(next)
}
