//! Object constraint: declared properties, `required`, additional keys.

use serde_json::{Map, Value};

use super::Constraint;
use crate::errors::ValidationErrors;
use crate::validator::Validator;

/// Validates JSON objects against `properties` and `additionalProperties`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectConstraint;

impl Constraint for ObjectConstraint {
    fn check(
        &self,
        validator: &Validator,
        instance: &Value,
        schema: &Map<String, Value>,
        path: &str,
        errors: &mut ValidationErrors,
    ) {
        let Value::Object(object) = instance else {
            errors.add(path, "must be an object");
            return;
        };

        let declared = match schema.get("properties") {
            Some(Value::Object(declared)) => Some(declared),
            _ => None,
        };

        for (name, property) in declared.into_iter().flatten() {
            let child = format!("{path}.{name}");
            match object.get(name) {
                Some(value) => validator.check(value, property, &child, errors),
                None if is_required(property) => errors.add(child, "is not defined"),
                None => {}
            }
        }

        if allows_additional(validator, schema) {
            return;
        }
        for key in object.keys() {
            if !declared.is_some_and(|d| d.contains_key(key)) {
                errors.add(format!("{path}.{key}"), "is not listed in schema");
            }
        }
    }
}

/// `required` is read for truthiness: `1` and `"yes"` count, `0`, `""`,
/// `"0"`, `[]` and `null` do not.
fn is_required(property: &Value) -> bool {
    match property.get("required") {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty() && s != "0",
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(_)) => true,
    }
}

fn allows_additional(validator: &Validator, schema: &Map<String, Value>) -> bool {
    match schema.get("additionalProperties") {
        Some(Value::Bool(allowed)) => *allowed,
        None | Some(Value::Null) => validator.allows_additional_fields(),
        Some(_) => true,
    }
}
