//! A minimal, sandboxed expression language for visibility and compute
//! rules.
//!
//! Expressions are single value-producing strings with one implicit
//! binding, `values`, mapping node identifiers to current form values:
//!
//! ```text
//! values.age >= 18 && values.country == 'DE'
//! values.first + ' ' + values.last
//! ```
//!
//! The grammar covers literals, member access into the bag, arithmetic
//! (`+` concatenates when either side is a string), comparison, and
//! short-circuit `&&`/`||`. There are no loops, no function calls, and no
//! bindings beyond `values`, so a single evaluation is always bounded.
//!
//! The public entry points fail closed: any parse or runtime error makes
//! [`evaluate`] return `None` and [`is_visible`] return `false`. A
//! malformed rule degrades one field; it never crashes a render pass.

pub mod parser;
pub mod token;
pub mod value;

mod eval;

pub use parser::{Expression, parse};
pub use value::{Value, ValueBag};

use eval::ExprEngine;

/// Evaluates an expression string against a value bag.
///
/// Returns `None` on any parse or evaluation error; missing bag keys read
/// as [`Value::Null`].
pub fn evaluate(expression: &str, values: &ValueBag) -> Option<Value> {
    let parsed = match parse(expression) {
        Ok(parsed) => parsed,
        Err(error) => {
            log::debug!("expression '{}' failed to parse: {}", expression, error);
            return None;
        }
    };
    match ExprEngine::new(values).evaluate(&parsed) {
        Ok(value) => Some(value),
        Err(error) => {
            log::debug!("expression '{}' failed to evaluate: {}", expression, error);
            None
        }
    }
}

/// Visibility check for a node: `true` when no expression is set,
/// otherwise the truthiness of the evaluated result. Errors coerce to
/// `false`, so a broken rule hides its field instead of crashing.
pub fn is_visible(expression: Option<&str>, values: &ValueBag) -> bool {
    match expression {
        // A blank rule means "always visible", same as no rule at all.
        None => true,
        Some(expr) if expr.trim().is_empty() => true,
        Some(expr) => evaluate(expr, values).is_some_and(|v| v.is_truthy()),
    }
}
