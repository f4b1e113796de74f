//! Union types: the instance must satisfy at least one member type.

use jsv_core::SchemaType;
use serde_json::{Map, Value};

use crate::errors::ValidationErrors;
use crate::validator::Validator;

/// Try each member of a union in order against a fresh error set.
///
/// The first member that reports nothing wins and `errors` is left
/// untouched. When every member fails, each member's messages are added
/// at `path`, prefixed with `type '<member>': `; messages that belong to a
/// deeper path also name that path.
pub fn check(
    validator: &Validator,
    members: &[SchemaType],
    instance: &Value,
    schema: &Map<String, Value>,
    path: &str,
    errors: &mut ValidationErrors,
) {
    let mut trials = Vec::with_capacity(members.len());
    for &member in members {
        let mut trial = ValidationErrors::new();
        validator.check_as(member, instance, schema, path, &mut trial);
        if trial.is_empty() {
            return;
        }
        trials.push((member, trial));
    }

    for (member, trial) in trials {
        for (at, messages) in trial {
            for message in messages {
                let message = if at == path {
                    format!("type '{member}': {message}")
                } else {
                    format!("type '{member}': {at} {message}")
                };
                errors.add(path, message);
            }
        }
    }
}
