//! Tests for the drag-and-drop engine: payload parsing, target
//! resolution, and the clamp-then-adjust reorder rule.
mod common;
use common::*;
use kumiko::prelude::*;

#[test]
fn test_payload_wire_format() {
    let create = DragPayload::Create {
        node_type: NodeType::Text,
    };
    assert_eq!(
        serde_json::to_string(&create).unwrap(),
        r#"{"kind":"create","type":"text"}"#
    );

    let moved = DragPayload::Move { index: 2 };
    assert_eq!(
        serde_json::to_string(&moved).unwrap(),
        r#"{"kind":"move","index":2}"#
    );

    assert_eq!(
        parse_payload(r#"{"kind":"create","type":"checkbox"}"#),
        Some(DragPayload::Create {
            node_type: NodeType::Checkbox
        })
    );
}

#[test]
fn test_malformed_payloads_are_noops() {
    assert_eq!(parse_payload("not json"), None);
    assert_eq!(parse_payload(r#"{"kind":"teleport","index":1}"#), None);
    assert_eq!(parse_payload(r#"{"kind":"move","index":-1}"#), None);

    let mut designer = Designer::with_schema(schema_abc());
    let mut drag = DragSession::new();
    drag.begin();
    assert!(!drag.drop(&mut designer, Some("garbage"), DropTarget::Canvas));
    assert!(!drag.drop(&mut designer, Some(""), DropTarget::Item(0)));
    assert!(!drag.drop(&mut designer, None, DropTarget::Canvas));
    assert_eq!(ids(designer.schema()), vec!["A", "B", "C"]);
    assert!(!designer.can_undo());
}

#[test]
fn test_create_drop_on_empty_canvas() {
    let mut designer = Designer::new();
    let mut drag = DragSession::new();

    drag.begin();
    drag.drag_over_canvas(designer.schema().nodes.len());
    let changed = drag.drop(
        &mut designer,
        Some(r#"{"kind":"create","type":"text"}"#),
        DropTarget::Canvas,
    );

    assert!(changed);
    assert_eq!(designer.schema().nodes.len(), 1);
    assert_eq!(designer.schema().nodes[0].node_type(), NodeType::Text);

    // Exactly one history entry; one undo restores the empty schema.
    assert!(designer.undo());
    assert!(designer.schema().nodes.is_empty());
    assert!(!designer.undo());
}

#[test]
fn test_create_drop_does_not_change_selection() {
    let mut designer = Designer::with_schema(schema_abc());
    designer.select(Some("B".to_string()));

    let mut drag = DragSession::new();
    drag.begin();
    drag.drop(
        &mut designer,
        Some(r#"{"kind":"create","type":"number"}"#),
        DropTarget::Item(0),
    );
    assert_eq!(designer.selected_id(), Some("B"));
}

#[test]
fn test_move_forward_applies_adjustment() {
    // [A,B,C]: moving A (index 0) to drop-target 2 must land at
    // effective index 1, yielding [B,A,C].
    let mut designer = Designer::with_schema(schema_abc());
    let changed = apply_drop(&mut designer, DragPayload::Move { index: 0 }, 2);
    assert!(changed);
    assert_eq!(ids(designer.schema()), vec!["B", "A", "C"]);
}

#[test]
fn test_move_backward_keeps_target() {
    let mut designer = Designer::with_schema(schema_abc());
    let changed = apply_drop(&mut designer, DragPayload::Move { index: 2 }, 0);
    assert!(changed);
    assert_eq!(ids(designer.schema()), vec!["C", "A", "B"]);
}

#[test]
fn test_move_to_end() {
    let mut designer = Designer::with_schema(schema_abc());
    let changed = apply_drop(&mut designer, DragPayload::Move { index: 0 }, 3);
    assert!(changed);
    assert_eq!(ids(designer.schema()), vec!["B", "C", "A"]);
}

#[test]
fn test_move_onto_own_slot_is_a_true_noop() {
    // Both the item's own index and the gap just after it resolve to
    // the same effective position: no change, no history entry.
    for target in [1usize, 2] {
        let mut designer = Designer::with_schema(schema_abc());
        let changed = apply_drop(&mut designer, DragPayload::Move { index: 1 }, target);
        assert!(!changed, "target {} should be a no-op", target);
        assert_eq!(ids(designer.schema()), vec!["A", "B", "C"]);
        assert!(!designer.can_undo());
    }
}

#[test]
fn test_out_of_range_indices_clamp() {
    // A stale source index clamps to the last item.
    let mut designer = Designer::with_schema(schema_abc());
    assert!(apply_drop(&mut designer, DragPayload::Move { index: 99 }, 0));
    assert_eq!(ids(designer.schema()), vec!["C", "A", "B"]);

    // A wild target index clamps to append.
    let mut designer = Designer::with_schema(schema_abc());
    assert!(apply_drop(
        &mut designer,
        DragPayload::Create {
            node_type: NodeType::Checkbox
        },
        99,
    ));
    assert_eq!(designer.schema().nodes.len(), 4);
    assert_eq!(designer.schema().nodes[3].node_type(), NodeType::Checkbox);
}

#[test]
fn test_move_on_empty_schema_is_noop() {
    let mut designer = Designer::new();
    assert!(!apply_drop(&mut designer, DragPayload::Move { index: 0 }, 0));
    assert!(!designer.can_undo());
}

#[test]
fn test_canvas_drop_uses_tracked_hover_index() {
    let mut designer = Designer::with_schema(schema_abc());
    let mut drag = DragSession::new();

    drag.begin();
    drag.drag_over_item(1);
    assert_eq!(drag.hover_index(), Some(1));

    let changed = drag.drop(
        &mut designer,
        Some(r#"{"kind":"create","type":"select"}"#),
        DropTarget::Canvas,
    );
    assert!(changed);
    assert_eq!(designer.schema().nodes[1].node_type(), NodeType::Select);
    // The drop consumed the hover index.
    assert_eq!(drag.hover_index(), None);
}

#[test]
fn test_canvas_drop_without_hover_appends() {
    let mut designer = Designer::with_schema(schema_abc());
    let mut drag = DragSession::new();

    drag.begin();
    drag.drag_over_item(0);
    drag.drag_leave();
    assert_eq!(drag.hover_index(), None);

    drag.drop(
        &mut designer,
        Some(r#"{"kind":"create","type":"number"}"#),
        DropTarget::Canvas,
    );
    assert_eq!(designer.schema().nodes[3].node_type(), NodeType::Number);
}

#[test]
fn test_hover_is_only_tracked_while_dragging() {
    let mut drag = DragSession::new();
    drag.drag_over_item(2);
    assert_eq!(drag.hover_index(), None);

    drag.begin();
    assert!(drag.is_active());
    drag.drag_over_item(2);
    assert_eq!(drag.hover_index(), Some(2));

    drag.cancel();
    assert!(!drag.is_active());
    assert_eq!(drag.hover_index(), None);
}

#[test]
fn test_canvas_hover_only_set_when_empty() {
    let mut drag = DragSession::new();
    drag.begin();
    drag.drag_over_canvas(3);
    assert_eq!(drag.hover_index(), None);
    drag.drag_over_canvas(0);
    assert_eq!(drag.hover_index(), Some(0));
}

#[test]
fn test_move_node_is_pure() {
    let schema = schema_abc();
    let moved = move_node(&schema, 0, 2).unwrap();
    assert_eq!(ids(&moved), vec!["B", "A", "C"]);
    // The input schema is untouched.
    assert_eq!(ids(&schema), vec!["A", "B", "C"]);
    // Self-moves report "no change".
    assert!(move_node(&schema, 1, 1).is_none());
    assert!(move_node(&schema, 1, 2).is_none());
}
