//! Integer and number constraints.

use std::cmp::Ordering;

use serde_json::{Map, Number, Value};

use super::{check_enum, Constraint};
use crate::errors::ValidationErrors;
use crate::validator::Validator;

/// Validates integer-valued numbers. `5.0` counts as an integer.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerConstraint;

/// Validates any JSON number.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberConstraint;

impl Constraint for IntegerConstraint {
    fn check(
        &self,
        _validator: &Validator,
        instance: &Value,
        schema: &Map<String, Value>,
        path: &str,
        errors: &mut ValidationErrors,
    ) {
        match as_number(instance) {
            Some(n) if is_integral(n) => check_bounds(n, instance, schema, path, errors),
            _ => errors.add(path, "must be an integer"),
        }
    }
}

impl Constraint for NumberConstraint {
    fn check(
        &self,
        _validator: &Validator,
        instance: &Value,
        schema: &Map<String, Value>,
        path: &str,
        errors: &mut ValidationErrors,
    ) {
        match as_number(instance) {
            Some(n) => check_bounds(n, instance, schema, path, errors),
            None => errors.add(path, "must be a number"),
        }
    }
}

fn as_number(instance: &Value) -> Option<&Number> {
    match instance {
        Value::Number(n) => Some(n),
        _ => None,
    }
}

fn is_integral(n: &Number) -> bool {
    as_exact_integer(n).is_some() || n.as_f64().is_some_and(|f| f.fract() == 0.0)
}

fn as_exact_integer(n: &Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}

/// Exact when both sides are integers, `f64` otherwise.
fn compare(a: &Number, b: &Number) -> Option<Ordering> {
    match (as_exact_integer(a), as_exact_integer(b)) {
        (Some(x), Some(y)) => Some(x.cmp(&y)),
        _ => a.as_f64()?.partial_cmp(&b.as_f64()?),
    }
}

fn check_bounds(
    n: &Number,
    instance: &Value,
    schema: &Map<String, Value>,
    path: &str,
    errors: &mut ValidationErrors,
) {
    if let Some(Value::Number(minimum)) = schema.get("minimum") {
        if compare(n, minimum) == Some(Ordering::Less) {
            errors.add(path, format!("must be greater than or equal to {minimum}"));
        }
    }
    if let Some(Value::Number(maximum)) = schema.get("maximum") {
        if compare(n, maximum) == Some(Ordering::Greater) {
            errors.add(path, format!("must be less than or equal to {maximum}"));
        }
    }
    check_enum(instance, schema, path, errors);
}
