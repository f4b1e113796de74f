//! # Schema Grammar: Types and Allowed Properties
//!
//! The fixed type vocabulary and, per type, the closed set of keys a schema
//! node of that type may declare. This table is pure data: the builder
//! consults it to reject malformed schemas, and the validator's constraints
//! only ever read keys that appear here.
//!
//! Every type additionally accepts the universal keys `type`, `required`,
//! `id` and `value`.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Keys accepted on a schema node of any type.
const UNIVERSAL_PROPERTIES: &[&str] = &["type", "required", "id", "value"];

const STRING_PROPERTIES: &[&str] = &[
    "pattern",
    "minLength",
    "maxLength",
    "enum",
    "description",
    "extends",
    "id",
    "format",
];

const NUMBER_PROPERTIES: &[&str] = &["minimum", "maximum", "enum", "description", "extends", "id"];

const INTEGER_PROPERTIES: &[&str] = &["minimum", "maximum", "enum", "description", "extends", "id"];

const BOOLEAN_PROPERTIES: &[&str] = &["description", "extends", "id"];

const OBJECT_PROPERTIES: &[&str] = &[
    "properties",
    "additionalProperties",
    "description",
    "extends",
    "id",
];

const ARRAY_PROPERTIES: &[&str] = &[
    "items",
    "minItems",
    "maxItems",
    "description",
    "extends",
    "id",
    "uniqueItems",
];

const ANY_PROPERTIES: &[&str] = &["description", "extends", "id", "properties"];

const NULL_PROPERTIES: &[&str] = &[];

/// The type assumed for a schema node that declares no `type`.
pub const DEFAULT_TYPE: SchemaType = SchemaType::Any;

/// One of the eight recognised schema types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    /// JSON string.
    String,
    /// Any JSON number.
    Number,
    /// Integer-valued JSON number.
    Integer,
    /// JSON `true` / `false`.
    Boolean,
    /// JSON object with declared properties.
    Object,
    /// JSON array with an item schema.
    Array,
    /// Accepts any value.
    Any,
    /// JSON `null`.
    Null,
}

impl SchemaType {
    /// All recognised types, in grammar order.
    pub const ALL: [SchemaType; 8] = [
        Self::String,
        Self::Number,
        Self::Integer,
        Self::Boolean,
        Self::Object,
        Self::Array,
        Self::Any,
        Self::Null,
    ];

    /// Look up a type by its schema name.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }

    /// Returns the schema name of this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
            Self::Any => "any",
            Self::Null => "null",
        }
    }

    fn specific_properties(&self) -> &'static [&'static str] {
        match self {
            Self::String => STRING_PROPERTIES,
            Self::Number => NUMBER_PROPERTIES,
            Self::Integer => INTEGER_PROPERTIES,
            Self::Boolean => BOOLEAN_PROPERTIES,
            Self::Object => OBJECT_PROPERTIES,
            Self::Array => ARRAY_PROPERTIES,
            Self::Any => ANY_PROPERTIES,
            Self::Null => NULL_PROPERTIES,
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns every key a node of type `ty` may declare, universal keys last.
pub fn allowed_properties(ty: SchemaType) -> Vec<&'static str> {
    ty.specific_properties()
        .iter()
        .chain(UNIVERSAL_PROPERTIES)
        .copied()
        .collect()
}

/// Returns true if `key` may be declared on a node of type `ty`.
pub fn is_property_allowed(ty: SchemaType, key: &str) -> bool {
    UNIVERSAL_PROPERTIES.contains(&key) || ty.specific_properties().contains(&key)
}

/// A `type` member that is not part of the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownType(pub String);

/// Typed view of a schema node's `type` key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDecl {
    /// A single type name.
    Single(SchemaType),
    /// An ordered list of acceptable types.
    Union(Vec<SchemaType>),
}

impl TypeDecl {
    /// Interpret a `type` value.
    ///
    /// A string must name a vocabulary type; an array must be non-empty and
    /// contain only such strings. Anything else is reported with a rendering
    /// of the first offending member.
    pub fn from_value(value: &Value) -> Result<Self, UnknownType> {
        match value {
            Value::String(name) => SchemaType::parse(name)
                .map(Self::Single)
                .ok_or_else(|| UnknownType(name.clone())),
            Value::Array(members) if members.is_empty() => Err(UnknownType("[]".to_string())),
            Value::Array(members) => members
                .iter()
                .map(|m| match m {
                    Value::String(name) => {
                        SchemaType::parse(name).ok_or_else(|| UnknownType(name.clone()))
                    }
                    other => Err(UnknownType(other.to_string())),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Union),
            other => Err(UnknownType(other.to_string())),
        }
    }

    /// Returns the member types in declaration order.
    pub fn members(&self) -> &[SchemaType] {
        match self {
            Self::Single(ty) => std::slice::from_ref(ty),
            Self::Union(types) => types,
        }
    }
}

impl fmt::Display for TypeDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.members().iter().map(SchemaType::as_str).collect();
        f.write_str(&names.join(", "))
    }
}
