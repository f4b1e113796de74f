//! # Schema Builder
//!
//! Resolves `extends` inheritance and checks schema syntax.
//!
//! ## Algorithm
//!
//! For every node, outermost first:
//!
//! 1. Each `extends` reference (a string, or a list applied left to right)
//!    is resolved to a logical name, fetched in built form from the
//!    registry, and merged into the node with [`extend`]. `extends` is then
//!    removed.
//! 2. A missing `type` defaults to `any`.
//! 3. Every `type` member must be in the vocabulary.
//! 4. Every key must be allowed for the type; for a union, for at least
//!    one member.
//! 5. Children under `properties` and `items` are built the same way.
//!
//! ## Precedence
//!
//! A child's own declarations always win. Parents only fill keys the child
//! leaves undeclared, and with several parents the earlier ones fill first.
//! `properties` merge per property name, one level deep.
//!
//! ## Cycles
//!
//! The builder carries the chain of logical names under resolution. An
//! `extends` that points back into the chain fails with
//! [`SchemaError::CyclicExtend`] instead of recursing without bound.

use jsv_core::{is_property_allowed, SchemaError, TypeDecl, DEFAULT_TYPE};
use serde_json::{Map, Value};

use crate::registry::{parse_document, SchemaRegistry};

/// Builds one schema document against a registry.
#[derive(Debug)]
pub struct SchemaBuilder<'r> {
    registry: &'r SchemaRegistry,
    current_dir: String,
    chain: Vec<String>,
    use_cache: bool,
}

impl<'r> SchemaBuilder<'r> {
    /// Create a builder for a document living in `current_dir`.
    ///
    /// Extended schemas are fetched through the registry's cache setting.
    pub fn new(registry: &'r SchemaRegistry, current_dir: impl Into<String>) -> Self {
        Self {
            registry,
            current_dir: current_dir.into(),
            chain: Vec::new(),
            use_cache: registry.uses_cache(),
        }
    }

    pub(crate) fn for_document(
        registry: &'r SchemaRegistry,
        current_dir: String,
        chain: Vec<String>,
        use_cache: bool,
    ) -> Self {
        Self {
            registry,
            current_dir,
            chain,
            use_cache,
        }
    }

    /// Build a schema tree.
    ///
    /// # Errors
    ///
    /// `UnparsableSchema` if `schema` is not an object, `InvalidType` /
    /// `InvalidProperty` for grammar violations, `BrokenExtend` /
    /// `CyclicExtend` for inheritance failures.
    pub fn build(&self, schema: Value) -> Result<Value, SchemaError> {
        let Value::Object(mut node) = schema else {
            return Err(SchemaError::UnparsableSchema {
                name: self.document_name(),
                reason: "schema document must be a JSON object".to_string(),
            });
        };
        self.build_node(&mut node, "#")?;
        Ok(Value::Object(node))
    }

    fn document_name(&self) -> String {
        self.chain
            .last()
            .cloned()
            .unwrap_or_else(|| "<inline>".to_string())
    }

    fn build_node(&self, node: &mut Map<String, Value>, location: &str) -> Result<(), SchemaError> {
        // A null `type` counts as absent: inherited or defaulted like a missing one.
        if node.get("type").is_some_and(Value::is_null) {
            node.remove("type");
        }
        if let Some(extends) = node.remove("extends") {
            for reference in extends_references(&extends, location)? {
                self.apply_extend(node, reference)?;
            }
        }

        let ty = node
            .entry("type")
            .or_insert_with(|| Value::from(DEFAULT_TYPE.as_str()));
        let decl = TypeDecl::from_value(ty).map_err(|unknown| {
            SchemaError::InvalidType {
                type_name: unknown.0,
                location: location.to_string(),
            }
        })?;

        check_properties(&decl, node, location)?;

        if let Some(properties) = node.get_mut("properties") {
            let Value::Object(properties) = properties else {
                return Err(invalid_property(
                    "properties",
                    "must be an object mapping names to schemas",
                    location,
                ));
            };
            for (name, child) in properties.iter_mut() {
                let child_location = format!("{location}/properties/{}", escape_pointer(name));
                let Value::Object(child) = child else {
                    return Err(invalid_property(name, "must be a schema object", &child_location));
                };
                self.build_node(child, &child_location)?;
            }
        }

        if let Some(items) = node.get_mut("items") {
            let items_location = format!("{location}/items");
            match items {
                Value::Object(single) => self.build_node(single, &items_location)?,
                Value::Array(tuple) => {
                    for (i, item) in tuple.iter_mut().enumerate() {
                        let item_location = format!("{items_location}/{i}");
                        let Value::Object(item) = item else {
                            return Err(invalid_property(
                                "items",
                                "must hold only schema objects",
                                &item_location,
                            ));
                        };
                        self.build_node(item, &item_location)?;
                    }
                }
                _ => {
                    return Err(invalid_property(
                        "items",
                        "must be a schema object or a list of schema objects",
                        location,
                    ))
                }
            }
        }

        Ok(())
    }

    fn apply_extend(
        &self,
        node: &mut Map<String, Value>,
        reference: &str,
    ) -> Result<(), SchemaError> {
        let resolved = jsv_core::normalize_logical(
            &self.registry.resolve_extend(reference, &self.current_dir),
        );
        tracing::debug!(reference, resolved = %resolved, "resolving extends");

        if self.chain.contains(&resolved) {
            let mut chain = self.chain.clone();
            chain.push(resolved);
            return Err(SchemaError::CyclicExtend { chain });
        }

        let inherited = self
            .registry
            .fetch_built(&resolved, &self.chain, self.use_cache)
            .and_then(|text| parse_document(&resolved, &text))
            .map_err(|e| match e {
                cyclic @ SchemaError::CyclicExtend { .. } => cyclic,
                other => SchemaError::BrokenExtend {
                    reference: resolved.clone(),
                    source: Box::new(other),
                },
            })?;

        extend(node, inherited);
        Ok(())
    }
}

/// Build raw schema text living in `current_dir` and return the built text.
///
/// # Errors
///
/// `UnparsableSchema` if `raw` is not a JSON object, otherwise any error of
/// [`SchemaBuilder::build`].
pub fn build_schema(
    registry: &SchemaRegistry,
    raw: &str,
    current_dir: &str,
) -> Result<String, SchemaError> {
    let document = parse_document("<inline>", raw)?;
    let built = SchemaBuilder::new(registry, current_dir).build(Value::Object(document))?;
    Ok(built.to_string())
}

/// Merge `inherited` into `node`. The node's own declarations always win.
///
/// Top-level keys other than `properties` are copied only when `node` lacks
/// them. `properties` merge per name: a property both sides declare gets
/// only its missing keys filled in; a property only the parent declares is
/// adopted as is.
pub fn extend(node: &mut Map<String, Value>, mut inherited: Map<String, Value>) {
    let inherited_properties = inherited.remove("properties");

    for (key, value) in inherited {
        if !node.contains_key(&key) {
            node.insert(key, value);
        }
    }

    let Some(inherited_properties) = inherited_properties else {
        return;
    };

    match node.get_mut("properties") {
        Some(Value::Object(own)) => {
            let Value::Object(parent) = inherited_properties else {
                return;
            };
            for (name, parent_property) in parent {
                match own.get_mut(&name) {
                    Some(Value::Object(own_property)) => {
                        if let Value::Object(parent_property) = parent_property {
                            for (key, value) in parent_property {
                                own_property.entry(key).or_insert(value);
                            }
                        }
                    }
                    Some(_) => {}
                    None => {
                        own.insert(name, parent_property);
                    }
                }
            }
        }
        Some(_) => {}
        None => {
            node.insert("properties".to_string(), inherited_properties);
        }
    }
}

fn extends_references<'a>(
    extends: &'a Value,
    location: &str,
) -> Result<Vec<&'a str>, SchemaError> {
    let malformed =
        || invalid_property("extends", "must be a string or a list of strings", location);
    match extends {
        Value::String(reference) => Ok(vec![reference.as_str()]),
        Value::Array(references) => references
            .iter()
            .map(|r| r.as_str().ok_or_else(malformed))
            .collect(),
        _ => Err(malformed()),
    }
}

fn check_properties(
    decl: &TypeDecl,
    node: &Map<String, Value>,
    location: &str,
) -> Result<(), SchemaError> {
    for key in node.keys() {
        let allowed = decl
            .members()
            .iter()
            .any(|ty| is_property_allowed(*ty, key));
        if allowed {
            continue;
        }
        let reason = match decl {
            TypeDecl::Single(ty) => format!("is not allowed for type '{ty}'"),
            TypeDecl::Union(_) => format!("is not allowed for any of types '{decl}'"),
        };
        return Err(invalid_property(key, &reason, location));
    }
    Ok(())
}

fn invalid_property(property: &str, reason: &str, location: &str) -> SchemaError {
    SchemaError::InvalidProperty {
        property: property.to_string(),
        reason: reason.to_string(),
        location: location.to_string(),
    }
}

fn escape_pointer(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}
