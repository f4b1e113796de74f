//! # Error Types: Schema Build and Storage Failures
//!
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - `SchemaError` covers every reason a schema cannot be produced: it is
//!   missing, unparsable, grammatically invalid, its inheritance chain is
//!   broken or cyclic, or the cache is unusable. Any of these aborts the
//!   whole build; no partial schema is ever returned.
//! - Instance validation failures are not errors. `jsv-validate` reports
//!   them as data.
//! - `StoreError` is what a backing store reports. "Key absent" is not an
//!   error at that layer; the registry turns it into `SchemaNotFound`.

use thiserror::Error;

/// A schema could not be fetched, built, or cached.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The backing store has no document under this logical name.
    #[error("schema '{name}' not found")]
    SchemaNotFound {
        /// Logical schema name.
        name: String,
    },

    /// The document exists but is not a JSON object.
    #[error("unable to decode schema '{name}' as JSON: {reason}")]
    UnparsableSchema {
        /// Logical schema name, or `<inline>` for schema text passed directly.
        name: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// A `type` member is outside the fixed vocabulary.
    #[error("property type '{type_name}' is not allowed (at {location})")]
    InvalidType {
        /// Rendering of the offending type member.
        type_name: String,
        /// Location inside the schema document, e.g. `#/properties/name`.
        location: String,
    },

    /// A key is not allowed for the node's type, or is structurally malformed.
    #[error("property '{property}' {reason} (at {location})")]
    InvalidProperty {
        /// The offending key.
        property: String,
        /// Why it was rejected.
        reason: String,
        /// Location inside the schema document.
        location: String,
    },

    /// An `extends` target could not be loaded or built.
    #[error("cannot extend '{reference}': {source}")]
    BrokenExtend {
        /// The resolved logical path of the extend target.
        reference: String,
        /// Underlying failure.
        #[source]
        source: Box<SchemaError>,
    },

    /// An `extends` chain refers back to a schema still being resolved.
    #[error("cyclic extends: {}", .chain.join(" -> "))]
    CyclicExtend {
        /// Logical names from the outermost schema to the repeated one.
        chain: Vec<String>,
    },

    /// A cache entry exists but does not hold valid JSON.
    #[error("broken cache for schema '{name}', cache key '{key}'")]
    BrokenCache {
        /// Logical schema name.
        name: String,
        /// Cache key of the corrupt entry.
        key: String,
    },

    /// The cache store rejected a write.
    #[error("unable to write schema '{name}' to cache '{key}': {source}")]
    CacheWriteError {
        /// Logical schema name.
        name: String,
        /// Cache key that was being written.
        key: String,
        /// Store failure.
        #[source]
        source: StoreError,
    },

    /// The backing store failed for a reason other than a missing key.
    #[error("schema store error: {0}")]
    Store(#[from] StoreError),
}

impl SchemaError {
    /// Returns true when the failure lies in the schema documents themselves
    /// rather than in cache or store plumbing.
    pub fn is_invalid_schema(&self) -> bool {
        match self {
            Self::SchemaNotFound { .. }
            | Self::UnparsableSchema { .. }
            | Self::InvalidType { .. }
            | Self::InvalidProperty { .. }
            | Self::CyclicExtend { .. } => true,
            Self::BrokenExtend { source, .. } => source.is_invalid_schema(),
            Self::BrokenCache { .. } | Self::CacheWriteError { .. } | Self::Store(_) => false,
        }
    }
}

/// Failure reported by a key/blob store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading the key failed.
    #[error("cannot read '{key}': {source}")]
    Io {
        /// Store key.
        key: String,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },

    /// The store refused to persist the value.
    #[error("write to '{key}' rejected: {reason}")]
    WriteRejected {
        /// Store key.
        key: String,
        /// Reason given by the store.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cyclic_extend_display_shows_chain() {
        let err = SchemaError::CyclicExtend {
            chain: vec!["a.json".into(), "b.json".into(), "a.json".into()],
        };
        assert_eq!(err.to_string(), "cyclic extends: a.json -> b.json -> a.json");
    }

    #[test]
    fn broken_extend_keeps_source() {
        let err = SchemaError::BrokenExtend {
            reference: "base.json".into(),
            source: Box::new(SchemaError::SchemaNotFound {
                name: "base.json".into(),
            }),
        };
        let msg = err.to_string();
        assert!(msg.contains("cannot extend 'base.json'"));
        assert!(msg.contains("not found"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn classification_separates_cache_failures() {
        assert!(SchemaError::InvalidType {
            type_name: "foo".into(),
            location: "#".into(),
        }
        .is_invalid_schema());
        assert!(!SchemaError::BrokenCache {
            name: "a.json".into(),
            key: "00".into(),
        }
        .is_invalid_schema());
        let write = SchemaError::CacheWriteError {
            name: "a.json".into(),
            key: "00".into(),
            source: StoreError::WriteRejected {
                key: "00".into(),
                reason: "read-only".into(),
            },
        };
        assert!(!write.is_invalid_schema());
    }

    #[test]
    fn broken_extend_classified_by_its_source() {
        let missing = SchemaError::BrokenExtend {
            reference: "base.json".into(),
            source: Box::new(SchemaError::SchemaNotFound {
                name: "base.json".into(),
            }),
        };
        assert!(missing.is_invalid_schema());
        let corrupt_cache = SchemaError::BrokenExtend {
            reference: "base.json".into(),
            source: Box::new(SchemaError::BrokenCache {
                name: "base.json".into(),
                key: "00".into(),
            }),
        };
        assert!(!corrupt_cache.is_invalid_schema());
    }
}
