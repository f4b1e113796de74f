//! Boolean and null constraints.

use serde_json::{Map, Value};

use super::Constraint;
use crate::errors::ValidationErrors;
use crate::validator::Validator;

#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanConstraint;

#[derive(Debug, Clone, Copy, Default)]
pub struct NullConstraint;

impl Constraint for BooleanConstraint {
    fn check(
        &self,
        _validator: &Validator,
        instance: &Value,
        _schema: &Map<String, Value>,
        path: &str,
        errors: &mut ValidationErrors,
    ) {
        if !instance.is_boolean() {
            errors.add(path, "must be a boolean");
        }
    }
}

impl Constraint for NullConstraint {
    fn check(
        &self,
        _validator: &Validator,
        instance: &Value,
        _schema: &Map<String, Value>,
        path: &str,
        errors: &mut ValidationErrors,
    ) {
        if !instance.is_null() {
            errors.add(path, "must be null");
        }
    }
}
