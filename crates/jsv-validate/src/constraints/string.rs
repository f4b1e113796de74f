//! String constraint: `pattern`, length bounds, `enum`.

use serde_json::{Map, Value};

use super::{check_enum, usize_limit, Constraint};
use crate::errors::ValidationErrors;
use crate::validator::Validator;

/// Validates JSON strings. Every applicable check runs; lengths count
/// characters, not bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringConstraint;

impl Constraint for StringConstraint {
    fn check(
        &self,
        validator: &Validator,
        instance: &Value,
        schema: &Map<String, Value>,
        path: &str,
        errors: &mut ValidationErrors,
    ) {
        let Value::String(text) = instance else {
            errors.add(path, "must be a string");
            return;
        };

        if let Some(Value::String(pattern)) = schema.get("pattern") {
            if !matches_pattern(validator, pattern, text) {
                errors.add(path, format!("does not match the regex pattern {pattern}"));
            }
        }

        let length = text.chars().count();
        if let Some(max) = usize_limit(schema, "maxLength") {
            if length > max {
                errors.add(path, format!("must be at most {max} characters long"));
            }
        }
        if let Some(min) = usize_limit(schema, "minLength") {
            if length < min {
                errors.add(path, format!("must be at least {min} characters long"));
            }
        }

        check_enum(instance, schema, path, errors);
    }
}

/// Unanchored search. A pattern that does not compile matches nothing.
fn matches_pattern(validator: &Validator, pattern: &str, text: &str) -> bool {
    validator
        .compiled_pattern(pattern)
        .is_some_and(|re| re.is_match(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn messages(instance: Value, schema: Value) -> Vec<String> {
        Validator::default()
            .validate_value(&instance, &schema)
            .errors
            .get("$")
            .map(<[String]>::to_vec)
            .unwrap_or_default()
    }

    #[test]
    fn non_string_stops() {
        assert_eq!(
            messages(json!(3), json!({"type": "string", "minLength": 10})),
            vec!["must be a string"]
        );
    }

    #[test]
    fn pattern_is_an_unanchored_search() {
        let schema = json!({"type": "string", "pattern": "[0-9]+"});
        assert!(messages(json!("abc123def"), schema.clone()).is_empty());
        assert_eq!(
            messages(json!("abc"), schema),
            vec!["does not match the regex pattern [0-9]+"]
        );
    }

    #[test]
    fn uncompilable_pattern_never_matches() {
        assert!(!matches_pattern(&Validator::default(), "(unclosed", "(unclosed"));
    }

    #[test]
    fn lengths_count_characters() {
        let schema = json!({"type": "string", "maxLength": 3, "minLength": 3});
        assert!(messages(json!("żółw"), json!({"type": "string", "maxLength": 4})).is_empty());
        assert_eq!(
            messages(json!("ab"), schema.clone()),
            vec!["must be at least 3 characters long"]
        );
        assert_eq!(
            messages(json!("abcd"), schema),
            vec!["must be at most 3 characters long"]
        );
    }

    #[test]
    fn all_failures_accumulate() {
        let schema = json!({
            "type": "string",
            "pattern": "^x",
            "maxLength": 2,
            "enum": ["x", "xy"]
        });
        assert_eq!(
            messages(json!("abc"), schema),
            vec![
                "does not match the regex pattern ^x",
                "must be at most 2 characters long",
                "must have one of the given values: x, xy",
            ]
        );
    }
}
