use crate::expr::Value;
use thiserror::Error;

/// Errors that can occur when editing a schema through the typed patch API.
#[derive(Error, Debug, Clone)]
pub enum SchemaError {
    #[error(
        "Patch for a '{patch_kind}' node cannot be applied to node '{node_id}' of kind '{node_kind}'"
    )]
    KindMismatch {
        node_id: String,
        node_kind: String,
        patch_kind: String,
    },

    #[error("Node '{0}' not found in the schema")]
    NodeNotFound(String),
}

/// Errors raised while parsing or evaluating an expression.
///
/// These never cross the public evaluation boundary: `expr::evaluate`
/// catches them and returns `None`, so a bad expression can only ever
/// degrade a single field, not the whole form.
#[derive(Error, Debug, Clone)]
pub enum ExprError {
    #[error("Unexpected character '{found}' at position {position}")]
    UnexpectedChar { found: char, position: usize },

    #[error("Unterminated string literal starting at position {0}")]
    UnterminatedString(usize),

    #[error("Unexpected token '{found}' at position {position}")]
    UnexpectedToken { found: String, position: usize },

    #[error("Unexpected end of expression")]
    UnexpectedEnd,

    #[error(
        "Type mismatch during operation '{operation}': expected {expected}, but found value '{found}'"
    )]
    TypeMismatch {
        operation: String,
        expected: String,
        found: Value,
    },

    #[error("Unknown name '{0}': only 'values' is bound during evaluation")]
    UnknownName(String),

    #[error("Division by zero")]
    DivisionByZero,
}

/// Errors from the boundary services (row data, schema persistence).
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Row {0} not found")]
    RowNotFound(u64),

    #[error("Failed to read or write persisted data: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode or decode JSON: {0}")]
    Json(#[from] serde_json::Error),
}
