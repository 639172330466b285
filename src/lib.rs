//! # Kumiko - Form Schema Modeling and Evaluation Engine
//!
//! **Kumiko** is the engine behind a form designer: a typed schema of
//! field nodes, linear undo/redo over every edit, a drag-and-drop
//! reorder/insert engine, and a sandboxed expression language that
//! drives per-field visibility and computed values in the rendered form.
//!
//! ## Core Workflow
//!
//! 1.  **Design**: Assemble a [`Schema`](schema::Schema) by creating
//!     nodes (palette clicks or drag-and-drop payloads) and editing them
//!     through typed patches. Every edit flows through the
//!     [`Designer`](designer::Designer)'s single mutation gate, so each
//!     user action is exactly one undo step.
//! 2.  **Preview**: Open a [`FormSession`](form::FormSession) over the
//!     schema. It derives validation rules and default values, keeps
//!     computed fields current on every change, and hides fields whose
//!     visibility expression does not hold.
//! 3.  **Submit**: Validation blocks submission while any visible
//!     required field fails; the accepted payload is the full value bag,
//!     hidden fields included.
//! 4.  **Persist**: Schemas are plain JSON and round-trip losslessly
//!     through the [`service`] boundary.
//!
//! ## Quick Start
//!
//! ```rust
//! use kumiko::prelude::*;
//!
//! fn main() -> Result<()> {
//!     // Assemble a schema in the designer.
//!     let mut designer = Designer::new();
//!     let mut drag = DragSession::new();
//!
//!     // Drag a text field from the palette onto the empty canvas.
//!     drag.begin();
//!     let payload = r#"{"kind":"create","type":"text"}"#;
//!     drag.drop(&mut designer, Some(payload), DropTarget::Canvas);
//!
//!     // Append a number field the non-drag way.
//!     designer.add_node(NodeType::Number);
//!
//!     // Edit the text field through its typed patch; the node's kind
//!     // and id cannot be changed this way.
//!     let name_id = designer.schema().nodes[0].id.clone();
//!     designer.patch_node(
//!         &name_id,
//!         &NodePatch {
//!             label: Some("Full name".to_string()),
//!             required: Some(true),
//!             ..NodePatch::default()
//!         },
//!     )?;
//!
//!     // Preview the form, fill it in, submit.
//!     let number_id = designer.schema().nodes[1].id.clone();
//!     let mut session = FormSession::new(designer.schema());
//!     session.set_value(name_id, Value::from("Jane Doe"));
//!     session.set_value(number_id, Value::from(42.0));
//!
//!     match session.submit() {
//!         Ok(values) => println!("submitted: {}", serde_json::to_string(&values)?),
//!         Err(errors) => println!("{} field(s) failed validation", errors.len()),
//!     }
//!
//!     // Every drop and patch above is one undo step.
//!     designer.undo();
//!     Ok(())
//! }
//! ```

pub mod designer;
pub mod error;
pub mod expr;
pub mod form;
pub mod prelude;
pub mod schema;
pub mod service;
