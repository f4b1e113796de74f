//! # Constraints
//!
//! One [`Constraint`] implementation per concrete schema type. The
//! validator selects the implementation from the node's `type` through
//! [`for_type`]; unions are handled separately by [`union::check`] because
//! they re-enter the validator once per member type.

use jsv_core::SchemaType;
use serde_json::{Map, Value};

use crate::equality::values_equal;
use crate::errors::ValidationErrors;
use crate::validator::Validator;

pub mod array;
pub mod numeric;
pub mod object;
pub mod scalar;
pub mod string;
pub mod union;

/// A type-specific rule set applied to one instance value.
///
/// Implementations append messages to `errors` under `path` (or under
/// child paths when they recurse through `validator`) and never fail.
pub trait Constraint: Send + Sync {
    /// Check `instance` against the schema node `schema`.
    fn check(
        &self,
        validator: &Validator,
        instance: &Value,
        schema: &Map<String, Value>,
        path: &str,
        errors: &mut ValidationErrors,
    );
}

/// Returns the constraint for `ty`, or `None` for types that accept anything.
pub fn for_type(ty: SchemaType) -> Option<&'static dyn Constraint> {
    match ty {
        SchemaType::Object => Some(&object::ObjectConstraint),
        SchemaType::Array => Some(&array::ArrayConstraint),
        SchemaType::String => Some(&string::StringConstraint),
        SchemaType::Integer => Some(&numeric::IntegerConstraint),
        SchemaType::Number => Some(&numeric::NumberConstraint),
        SchemaType::Boolean => Some(&scalar::BooleanConstraint),
        SchemaType::Null => Some(&scalar::NullConstraint),
        SchemaType::Any => None,
    }
}

/// Report `instance` if the node declares an `enum` that does not contain it.
pub(crate) fn check_enum(
    instance: &Value,
    schema: &Map<String, Value>,
    path: &str,
    errors: &mut ValidationErrors,
) {
    let Some(Value::Array(allowed)) = schema.get("enum") else {
        return;
    };
    if allowed.iter().any(|v| values_equal(v, instance)) {
        return;
    }
    let listed = allowed
        .iter()
        .map(render_plain)
        .collect::<Vec<_>>()
        .join(", ");
    errors.add(path, format!("must have one of the given values: {listed}"));
}

/// Render a value for messages: strings without quotes, everything else as JSON.
pub(crate) fn render_plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Read a non-negative integer limit such as `minItems` or `maxLength`.
pub(crate) fn usize_limit(schema: &Map<String, Value>, key: &str) -> Option<usize> {
    let value = schema.get(key)?;
    if let Some(n) = value.as_u64() {
        return usize::try_from(n).ok();
    }
    value
        .as_f64()
        .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
        .map(|f| f as usize)
}
