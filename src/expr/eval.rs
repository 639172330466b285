use super::parser::Expression;
use super::value::{Value, ValueBag};
use crate::error::ExprError;

/// The core recursive engine for evaluating a parsed expression against
/// a single value bag.
pub(super) struct ExprEngine<'a> {
    values: &'a ValueBag,
}

impl<'a> ExprEngine<'a> {
    pub(super) fn new(values: &'a ValueBag) -> Self {
        Self { values }
    }

    pub(super) fn evaluate(&self, expression: &Expression) -> Result<Value, ExprError> {
        match expression {
            // --- Arithmetic ---
            Expression::Sum(l, r) => self.eval_sum(l, r),
            Expression::Subtract(l, r) => self.eval_arithmetic(l, r, "-", |a, b| a - b),
            Expression::Multiply(l, r) => self.eval_arithmetic(l, r, "*", |a, b| a * b),
            Expression::Divide(l, r) => {
                let (lv, rv) = self.eval_numeric_pair(l, r, "/")?;
                if rv == 0.0 {
                    return Err(ExprError::DivisionByZero);
                }
                Ok(Value::Number(lv / rv))
            }
            Expression::Remainder(l, r) => {
                let (lv, rv) = self.eval_numeric_pair(l, r, "%")?;
                if rv == 0.0 {
                    return Err(ExprError::DivisionByZero);
                }
                Ok(Value::Number(lv % rv))
            }
            Expression::Negate(operand) => match self.evaluate(operand)? {
                Value::Number(n) => Ok(Value::Number(-n)),
                other => Err(type_mismatch("-", "Number", other)),
            },

            // --- Logical ---
            // And/Or return the deciding operand, so expressions like
            // `values.nickname || values.first` keep working as written.
            Expression::And(l, r) => {
                let left = self.evaluate(l)?;
                if !left.is_truthy() {
                    return Ok(left);
                }
                self.evaluate(r)
            }
            Expression::Or(l, r) => {
                let left = self.evaluate(l)?;
                if left.is_truthy() {
                    return Ok(left);
                }
                self.evaluate(r)
            }
            Expression::Not(operand) => {
                let value = self.evaluate(operand)?;
                Ok(Value::Bool(!value.is_truthy()))
            }

            // --- Equality (strict, no cross-type coercion) ---
            Expression::Equal(l, r) => {
                let outcome = self.evaluate(l)? == self.evaluate(r)?;
                Ok(Value::Bool(outcome))
            }
            Expression::NotEqual(l, r) => {
                let outcome = self.evaluate(l)? != self.evaluate(r)?;
                Ok(Value::Bool(outcome))
            }

            // --- Comparison ---
            Expression::GreaterThan(l, r) => self.eval_comparison(l, r, ">"),
            Expression::GreaterThanOrEqual(l, r) => self.eval_comparison(l, r, ">="),
            Expression::SmallerThan(l, r) => self.eval_comparison(l, r, "<"),
            Expression::SmallerThanOrEqual(l, r) => self.eval_comparison(l, r, "<="),

            // --- Leaf nodes ---
            Expression::Literal(value) => Ok(value.clone()),
            Expression::Field(name) => Ok(self.values.get(name).cloned().unwrap_or(Value::Null)),
        }
    }

    /// `+` concatenates as soon as either side is a string; otherwise it
    /// adds numbers. Null renders as the empty string in concatenation so
    /// an unset field does not leak "null" into a computed label.
    fn eval_sum(&self, l: &Expression, r: &Expression) -> Result<Value, ExprError> {
        let left = self.evaluate(l)?;
        let right = self.evaluate(r)?;
        match (left, right) {
            (Value::Number(lv), Value::Number(rv)) => Ok(Value::Number(lv + rv)),
            (lv @ Value::Str(_), rv) | (lv, rv @ Value::Str(_)) => {
                Ok(Value::Str(format!("{}{}", concat_part(&lv), concat_part(&rv))))
            }
            (lv, _) => Err(type_mismatch("+", "Number or String", lv)),
        }
    }

    fn eval_arithmetic<F>(
        &self,
        l: &Expression,
        r: &Expression,
        op: &str,
        f: F,
    ) -> Result<Value, ExprError>
    where
        F: Fn(f64, f64) -> f64,
    {
        let (lv, rv) = self.eval_numeric_pair(l, r, op)?;
        Ok(Value::Number(f(lv, rv)))
    }

    fn eval_comparison(
        &self,
        l: &Expression,
        r: &Expression,
        op: &str,
    ) -> Result<Value, ExprError> {
        let left = self.evaluate(l)?;
        let right = self.evaluate(r)?;
        let outcome = match (&left, &right) {
            (Value::Number(lv), Value::Number(rv)) => compare(op, lv.partial_cmp(rv)),
            (Value::Str(lv), Value::Str(rv)) => compare(op, Some(lv.cmp(rv))),
            _ => return Err(type_mismatch(op, "two Numbers or two Strings", left)),
        };
        Ok(Value::Bool(outcome))
    }

    fn eval_numeric_pair(
        &self,
        l: &Expression,
        r: &Expression,
        op: &str,
    ) -> Result<(f64, f64), ExprError> {
        let left = self.evaluate(l)?;
        let right = self.evaluate(r)?;
        match (left, right) {
            (Value::Number(lv), Value::Number(rv)) => Ok((lv, rv)),
            (Value::Number(_), rv) => Err(type_mismatch(op, "Number", rv)),
            (lv, _) => Err(type_mismatch(op, "Number", lv)),
        }
    }
}

fn compare(op: &str, ordering: Option<std::cmp::Ordering>) -> bool {
    use std::cmp::Ordering::*;
    match (op, ordering) {
        // NaN compares false against everything, as in the host language.
        (_, None) => false,
        (">", Some(o)) => o == Greater,
        (">=", Some(o)) => o != Less,
        ("<", Some(o)) => o == Less,
        ("<=", Some(o)) => o != Greater,
        _ => false,
    }
}

fn concat_part(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn type_mismatch(op: &str, expected: &str, found: Value) -> ExprError {
    ExprError::TypeMismatch {
        operation: op.to_string(),
        expected: expected.to_string(),
        found,
    }
}
