//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from the kumiko
//! crate. Import this module to get access to the core functionality
//! without having to import each type individually.
//!
//! # Example
//!
//! ```rust
//! use kumiko::prelude::*;
//!
//! let mut designer = Designer::new();
//! designer.add_node(NodeType::Text);
//!
//! let session = FormSession::new(designer.schema());
//! assert_eq!(session.visible_fields().len(), 1);
//! ```

// Designer state, history and drag-and-drop
pub use crate::designer::{
    DRAG_MIME, Designer, DragPayload, DragSession, DropTarget, apply_drop, move_node,
    parse_payload,
};

// Schema model and factory
pub use crate::schema::{KindPatch, Node, NodeKind, NodePatch, NodeType, Schema, create_node};

// Expression language
pub use crate::expr::{Expression, Value, ValueBag, evaluate, is_visible, parse};

// Form runtime
pub use crate::form::{
    Constraint, FieldError, FieldRule, FormSession, Violation, build_defaults, build_rules,
    validate,
};

// Boundary services
pub use crate::service::{
    LatestOnly, PageQuery, PageResult, Role, Row, RowPatch, RowStore, SchemaEnvelope, SchemaStore,
    SortDir, SortField, Status, load_schema, save_schema,
};

// Error types
pub use crate::error::{ExprError, SchemaError, ServiceError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
