use crate::expr::{Value, ValueBag, is_visible};
use crate::schema::{Node, NodeKind};
use log::warn;
use regex::Regex;
use thiserror::Error;

/// One per-field validation failure, worded for display next to the
/// offending input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Violation {
    #[error("Required")]
    Required,
    #[error("Invalid format")]
    Pattern,
    #[error("Invalid number")]
    NotANumber,
    #[error("Must be at least {0}")]
    TooSmall(f64),
    #[error("Must be at most {0}")]
    TooBig(f64),
}

/// A violation attached to the field that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub violation: Violation,
}

/// The derived validation rule for one field. Field keys are node ids.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub id: String,
    pub required: bool,
    pub constraint: Constraint,
}

/// Kind-derived value constraint.
#[derive(Debug, Clone)]
pub enum Constraint {
    /// Text and select fields: a string, optionally matching a pattern.
    Text { pattern: Option<Regex> },
    /// Number fields: coerced to a finite number within inclusive bounds.
    Number { min: Option<f64>, max: Option<f64> },
    /// Checkbox fields: a boolean.
    Checkbox,
}

impl FieldRule {
    /// Derives the rule for one node; `None` for sections, which carry
    /// no field semantics.
    pub fn for_node(node: &Node) -> Option<FieldRule> {
        let constraint = match &node.kind {
            NodeKind::Section { .. } => return None,
            NodeKind::Text { regex, .. } | NodeKind::Select { regex, .. } => Constraint::Text {
                pattern: compile_pattern(regex.as_deref()),
            },
            NodeKind::Number { min, max } => Constraint::Number {
                min: *min,
                max: *max,
            },
            NodeKind::Checkbox => Constraint::Checkbox,
        };
        Some(FieldRule {
            id: node.id.clone(),
            required: node.required,
            constraint,
        })
    }

    /// Checks one value against this rule. `None` means the value passes.
    pub fn check(&self, value: Option<&Value>) -> Option<Violation> {
        match &self.constraint {
            Constraint::Text { pattern } => {
                let text = match value {
                    None | Some(Value::Null) => String::new(),
                    // Computed values may land as numbers or booleans;
                    // a text rule sees their rendered form.
                    Some(other) => other.to_string(),
                };
                if text.is_empty() {
                    return self.required.then_some(Violation::Required);
                }
                match pattern {
                    Some(pattern) if !pattern.is_match(&text) => Some(Violation::Pattern),
                    _ => None,
                }
            }
            Constraint::Number { min, max } => {
                let present = match value {
                    None | Some(Value::Null) => None,
                    Some(Value::Str(s)) if s.trim().is_empty() => None,
                    Some(v) => Some(v),
                };
                let Some(raw) = present else {
                    return self.required.then_some(Violation::Required);
                };
                let number = match raw {
                    Value::Number(n) => *n,
                    Value::Str(s) => match s.trim().parse::<f64>() {
                        Ok(n) => n,
                        Err(_) => return Some(Violation::NotANumber),
                    },
                    _ => return Some(Violation::NotANumber),
                };
                if !number.is_finite() {
                    return Some(Violation::NotANumber);
                }
                if let Some(min) = min {
                    if number < *min {
                        return Some(Violation::TooSmall(*min));
                    }
                }
                if let Some(max) = max {
                    if number > *max {
                        return Some(Violation::TooBig(*max));
                    }
                }
                None
            }
            Constraint::Checkbox => {
                let checked = matches!(value, Some(Value::Bool(true)));
                (self.required && !checked).then_some(Violation::Required)
            }
        }
    }
}

/// Derives the full rule set for a node sequence, in sequence order.
pub fn build_rules(nodes: &[Node]) -> Vec<FieldRule> {
    nodes.iter().filter_map(FieldRule::for_node).collect()
}

/// Default values per non-section node: checkboxes start unchecked,
/// numbers start unset, everything else starts as the empty string.
pub fn build_defaults(nodes: &[Node]) -> ValueBag {
    let mut defaults = ValueBag::default();
    for node in nodes {
        match node.kind {
            NodeKind::Section { .. } => {}
            NodeKind::Checkbox => {
                defaults.insert(node.id.clone(), Value::Bool(false));
            }
            NodeKind::Number { .. } => {
                defaults.insert(node.id.clone(), Value::Null);
            }
            _ => {
                defaults.insert(node.id.clone(), Value::Str(String::new()));
            }
        }
    }
    defaults
}

/// Validates the value bag against the visible fields of the sequence.
///
/// Hidden nodes are skipped entirely: their values persist in the bag
/// but are never held against the user.
pub fn validate(nodes: &[Node], values: &ValueBag) -> Vec<FieldError> {
    let mut errors = Vec::new();
    for node in nodes {
        let Some(rule) = FieldRule::for_node(node) else {
            continue;
        };
        if !is_visible(node.visible_if.as_deref(), values) {
            continue;
        }
        if let Some(violation) = rule.check(values.get(&node.id)) {
            errors.push(FieldError {
                field: node.id.clone(),
                violation,
            });
        }
    }
    errors
}

/// An unparseable pattern imposes no constraint rather than failing the
/// whole derivation.
fn compile_pattern(pattern: Option<&str>) -> Option<Regex> {
    let pattern = pattern?;
    match Regex::new(pattern) {
        Ok(compiled) => Some(compiled),
        Err(error) => {
            warn!("skipping invalid field pattern '{}': {}", pattern, error);
            None
        }
    }
}
