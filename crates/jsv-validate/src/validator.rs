//! # Validator
//!
//! Entry point of the validation engine. A [`Validator`] carries its
//! configuration and a cache of compiled `pattern` regexes; every call
//! produces an independent [`ValidationReport`].

use std::collections::HashMap;
use std::sync::Arc;

use jsv_core::{SchemaError, SchemaType, TypeDecl};
use parking_lot::RwLock;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constraints;
use crate::errors::ValidationErrors;

/// Path of the instance root in error reports.
pub const ROOT_PATH: &str = "$";

/// Validator-wide policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Accept object keys that the schema does not declare, unless the
    /// schema sets `additionalProperties: false`.
    pub allow_additional_fields: bool,
}

/// Outcome of a validation call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultCode {
    /// The instance satisfies the schema.
    Valid,
    /// The instance parsed but violates the schema.
    Invalid,
    /// The instance document is not valid JSON.
    MalformedInput,
    /// No validation has been run.
    #[default]
    NotPerformed,
}

/// Result code, error mapping and round-tripped instance of one validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Overall outcome.
    pub code: ResultCode,
    /// Messages keyed by instance path.
    pub errors: ValidationErrors,
    /// The parsed instance re-serialized, present whenever it parsed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl ValidationReport {
    /// Returns true if the code is [`ResultCode::Valid`].
    pub fn is_valid(&self) -> bool {
        self.code == ResultCode::Valid
    }

    fn from_errors(errors: ValidationErrors) -> Self {
        let code = if errors.is_empty() {
            ResultCode::Valid
        } else {
            ResultCode::Invalid
        };
        Self {
            code,
            errors,
            instance: None,
        }
    }
}

/// Compiled `pattern` values. `None` marks a pattern that does not compile.
type PatternCache = Arc<RwLock<HashMap<String, Option<Regex>>>>;

/// Type-directed recursive validator.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidatorConfig,
    patterns: PatternCache,
}

impl Validator {
    /// Create a validator with the given policy.
    pub fn new(config: ValidatorConfig) -> Self {
        Self {
            config,
            patterns: PatternCache::default(),
        }
    }

    /// Returns the validator's configuration.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Returns true if undeclared object keys are accepted by default.
    pub fn allows_additional_fields(&self) -> bool {
        self.config.allow_additional_fields
    }

    /// Returns the compiled form of `pattern`, compiling it on first use.
    ///
    /// A pattern that does not compile is logged once and yields `None`.
    pub(crate) fn compiled_pattern(&self, pattern: &str) -> Option<Regex> {
        if let Some(cached) = self.patterns.read().get(pattern) {
            return cached.clone();
        }
        let compiled = match Regex::new(pattern) {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::warn!(pattern, error = %e, "schema pattern does not compile");
                None
            }
        };
        self.patterns
            .write()
            .entry(pattern.to_string())
            .or_insert(compiled)
            .clone()
    }

    /// Validate instance text against built schema text.
    ///
    /// A malformed instance is not an error: it yields a report with code
    /// [`ResultCode::MalformedInput`] and a single root error.
    ///
    /// # Errors
    ///
    /// `SchemaError::UnparsableSchema` if `schema` is not a JSON object.
    pub fn validate(&self, instance: &str, schema: &str) -> Result<ValidationReport, SchemaError> {
        let schema = match serde_json::from_str::<Value>(schema) {
            Ok(schema @ Value::Object(_)) => schema,
            Ok(_) => {
                return Err(SchemaError::UnparsableSchema {
                    name: "<inline>".to_string(),
                    reason: "schema document must be a JSON object".to_string(),
                })
            }
            Err(e) => {
                return Err(SchemaError::UnparsableSchema {
                    name: "<inline>".to_string(),
                    reason: e.to_string(),
                })
            }
        };

        let instance: Value = match serde_json::from_str(instance) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!(error = %e, "instance is not valid JSON");
                let mut errors = ValidationErrors::new();
                errors.add(ROOT_PATH, "is not a valid JSON");
                return Ok(ValidationReport {
                    code: ResultCode::MalformedInput,
                    errors,
                    instance: None,
                });
            }
        };

        let mut report = self.validate_value(&instance, &schema);
        report.instance = Some(instance.to_string());
        Ok(report)
    }

    /// Validate a parsed instance against a parsed schema.
    pub fn validate_value(&self, instance: &Value, schema: &Value) -> ValidationReport {
        let mut errors = ValidationErrors::new();
        self.check(instance, schema, ROOT_PATH, &mut errors);
        tracing::debug!(
            paths = errors.len(),
            messages = errors.message_count(),
            "validation finished"
        );
        ValidationReport::from_errors(errors)
    }

    /// Check `instance` at `path` against one schema node, appending to `errors`.
    ///
    /// Nodes that are not objects, and nodes whose `type` is missing or
    /// unrecognised, accept everything.
    pub fn check(&self, instance: &Value, schema: &Value, path: &str, errors: &mut ValidationErrors) {
        let Value::Object(schema) = schema else {
            return;
        };
        let Some(decl) = schema
            .get("type")
            .and_then(|ty| TypeDecl::from_value(ty).ok())
        else {
            return;
        };
        match decl {
            TypeDecl::Single(ty) => self.check_as(ty, instance, schema, path, errors),
            TypeDecl::Union(members) => {
                constraints::union::check(self, &members, instance, schema, path, errors)
            }
        }
    }

    /// Check `instance` as if the node's type were exactly `ty`.
    pub(crate) fn check_as(
        &self,
        ty: SchemaType,
        instance: &Value,
        schema: &Map<String, Value>,
        path: &str,
        errors: &mut ValidationErrors,
    ) {
        if let Some(constraint) = constraints::for_type(ty) {
            constraint.check(self, instance, schema, path, errors);
        }
    }
}
