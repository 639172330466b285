//! Tests for the boundary services: row listing, schema persistence,
//! and the last-request-wins gate.
mod common;
use common::*;
use kumiko::prelude::*;

#[test]
fn test_seed_is_deterministic() {
    let a = RowStore::seed(100);
    let b = RowStore::seed(100);
    assert_eq!(a.len(), 100);
    assert_eq!(a.row(42), b.row(42));
    assert_eq!(a.row(1).unwrap().name, "User 1");
    assert_eq!(a.row(1).unwrap().email, "user1@example.com");
}

#[test]
fn test_query_pages_and_totals() {
    let store = RowStore::seed(100);
    let result = store.query(&PageQuery {
        page: 2,
        size: 10,
        ..PageQuery::default()
    });
    assert_eq!(result.total, 100);
    assert_eq!(result.rows.len(), 10);
    assert_eq!(result.rows[0].id, 11);
    assert_eq!(result.rows[9].id, 20);
}

#[test]
fn test_query_past_the_end_is_empty() {
    let store = RowStore::seed(25);
    let result = store.query(&PageQuery {
        page: 4,
        size: 10,
        ..PageQuery::default()
    });
    assert_eq!(result.total, 25);
    assert!(result.rows.is_empty());
}

#[test]
fn test_query_free_text_search() {
    let store = RowStore::seed(200);
    let result = store.query(&PageQuery {
        q: "user123@".to_string(),
        ..PageQuery::default()
    });
    assert_eq!(result.total, 1);
    assert_eq!(result.rows[0].id, 123);

    // Search is case-insensitive and spans every displayed column.
    let admins = store.query(&PageQuery {
        q: "admin".to_string(),
        size: 500,
        ..PageQuery::default()
    });
    assert!(admins.total > 0);
    assert!(admins.rows.iter().all(|r| r.role == Role::Admin));
}

#[test]
fn test_query_sorting() {
    let store = RowStore::seed(50);

    let desc = store.query(&PageQuery {
        sort: SortField::Id,
        dir: SortDir::Desc,
        ..PageQuery::default()
    });
    assert_eq!(desc.rows[0].id, 50);

    // Name sorting is lexicographic: "User 10" sorts before "User 2".
    let by_name = store.query(&PageQuery {
        sort: SortField::Name,
        dir: SortDir::Asc,
        ..PageQuery::default()
    });
    assert_eq!(by_name.rows[0].name, "User 1");
    assert_eq!(by_name.rows[1].name, "User 10");
}

#[test]
fn test_patch_merges_partial_updates() {
    let mut store = RowStore::seed(10);
    let before = store.row(3).unwrap().clone();

    let updated = store
        .patch(
            3,
            &RowPatch {
                status: Some(Status::Inactive),
                ..RowPatch::default()
            },
        )
        .unwrap();

    assert_eq!(updated.status, Status::Inactive);
    // Untouched fields survive the merge.
    assert_eq!(updated.name, before.name);
    assert_eq!(updated.email, before.email);
    assert_eq!(store.row(3).unwrap().status, Status::Inactive);
}

#[test]
fn test_patch_unknown_row() {
    let mut store = RowStore::seed(10);
    let result = store.patch(999, &RowPatch::default());
    assert!(matches!(result, Err(ServiceError::RowNotFound(999))));
}

#[test]
fn test_schema_store_round_trip() {
    let mut store = SchemaStore::new();
    assert!(store.get().unwrap().is_none());

    let mut schema = schema_abc();
    schema.nodes[0].visible_if = Some("values.b == 'yes'".to_string());
    schema.nodes[1].required = true;

    store.put(&schema).unwrap();
    let loaded = store.get().unwrap().expect("schema was saved");
    assert_eq!(loaded, schema);
}

#[test]
fn test_schema_json_round_trip_is_lossless() {
    let mut schema = schema_abc();
    schema.nodes.push(node_with_id(NodeType::Number, "n"));
    schema.nodes.push(node_with_id(NodeType::Select, "s"));
    schema.nodes.push(node_with_id(NodeType::Checkbox, "c"));
    schema.nodes.push(node_with_id(NodeType::Section, "sec"));
    schema.nodes[0].compute = Some("values.n + 1".to_string());

    let json = serde_json::to_string(&schema).unwrap();
    let back: Schema = serde_json::from_str(&json).unwrap();
    assert_eq!(back, schema);
}

#[test]
fn test_schema_wire_shape() {
    let schema = schema_of(vec![node_with_id(NodeType::Checkbox, "c")]);
    let json = serde_json::to_value(&schema).unwrap();
    assert_eq!(json["title"], "My Form");
    assert_eq!(json["nodes"][0]["type"], "checkbox");
    assert_eq!(json["nodes"][0]["id"], "c");
    // Unset optional attributes stay off the wire.
    assert!(json["nodes"][0].get("visibleIf").is_none());
    assert!(json["nodes"][0].get("required").is_none());
}

#[test]
fn test_schema_file_round_trip() {
    let path = std::env::temp_dir().join(format!("kumiko-test-{}.json", std::process::id()));
    let schema = schema_abc();

    save_schema(&path, &schema).unwrap();
    let loaded = load_schema(&path).unwrap();
    assert_eq!(loaded, schema);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_latest_only_ignores_superseded_responses() {
    let mut gate = LatestOnly::new();
    let first = gate.begin();
    let second = gate.begin();

    // The older request resolves late; its result must be dropped.
    assert!(!gate.accept(first));
    assert!(gate.accept(second));

    let third = gate.begin();
    assert!(!gate.accept(second));
    assert!(gate.accept(third));
}
