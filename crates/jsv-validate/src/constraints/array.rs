//! Array constraint: length bounds, `uniqueItems`, item schemas.

use serde_json::{Map, Value};

use super::{usize_limit, Constraint};
use crate::equality::has_duplicates;
use crate::errors::ValidationErrors;
use crate::validator::Validator;

/// Validates JSON arrays.
///
/// A length outside `minItems`/`maxItems` is reported alone: elements of
/// such an array are not checked further.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayConstraint;

impl Constraint for ArrayConstraint {
    fn check(
        &self,
        validator: &Validator,
        instance: &Value,
        schema: &Map<String, Value>,
        path: &str,
        errors: &mut ValidationErrors,
    ) {
        let Value::Array(items) = instance else {
            errors.add(path, "is not an array");
            return;
        };

        let min = usize_limit(schema, "minItems").unwrap_or(0);
        if items.len() < min {
            errors.add(path, format!("must have at least {min} items"));
            return;
        }
        if let Some(max) = usize_limit(schema, "maxItems") {
            if items.len() > max {
                errors.add(path, format!("must have at most {max} items"));
                return;
            }
        }

        if schema.get("uniqueItems").and_then(Value::as_bool) == Some(true)
            && has_duplicates(items)
        {
            errors.add(path, "items must be unique");
        }

        match schema.get("items") {
            Some(Value::Array(tuple)) => {
                for (i, (item, item_schema)) in items.iter().zip(tuple).enumerate() {
                    validator.check(item, item_schema, &format!("{path}.{i}"), errors);
                }
            }
            Some(item_schema) => {
                for (i, item) in items.iter().enumerate() {
                    validator.check(item, item_schema, &format!("{path}.{i}"), errors);
                }
            }
            None => {}
        }
    }
}
