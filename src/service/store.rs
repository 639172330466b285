use crate::error::ServiceError;
use crate::schema::Schema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// The wire envelope the persistence boundary speaks: `PUT` carries
/// `{"schema": {...}}`, `GET` answers the same shape with `null` when
/// nothing has been saved yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaEnvelope {
    pub schema: Option<Schema>,
}

/// In-memory schema persistence: keeps the last-saved schema as its
/// serialized JSON, so every `get` exercises the full encode/decode
/// round trip the real tier would.
#[derive(Debug, Default)]
pub struct SchemaStore {
    saved: Option<String>,
}

impl SchemaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Persists the schema, replacing whatever was saved before.
    pub fn put(&mut self, schema: &Schema) -> Result<(), ServiceError> {
        let envelope = SchemaEnvelope {
            schema: Some(schema.clone()),
        };
        self.saved = Some(serde_json::to_string(&envelope)?);
        Ok(())
    }

    /// The last-saved schema, or `None` when nothing was ever saved.
    pub fn get(&self) -> Result<Option<Schema>, ServiceError> {
        match &self.saved {
            None => Ok(None),
            Some(json) => {
                let envelope: SchemaEnvelope = serde_json::from_str(json)?;
                Ok(envelope.schema)
            }
        }
    }
}

/// Loads a schema from a plain-JSON file.
pub fn load_schema(path: impl AsRef<Path>) -> Result<Schema, ServiceError> {
    let content = fs::read_to_string(path)?;
    let schema = serde_json::from_str(&content)?;
    Ok(schema)
}

/// Writes a schema to a plain-JSON file, pretty-printed.
pub fn save_schema(path: impl AsRef<Path>, schema: &Schema) -> Result<(), ServiceError> {
    let json = serde_json::to_string_pretty(schema)?;
    fs::write(path, json)?;
    Ok(())
}
