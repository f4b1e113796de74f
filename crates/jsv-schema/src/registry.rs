//! # Schema Registry
//!
//! Provides schema documents by logical name, either raw or fully built
//! (all `extends` resolved and merged), with an optional cache of built
//! schemas.
//!
//! ## Cache Semantics
//!
//! Cache entries are keyed by [`CacheKey::for_schema`] of the normalised
//! logical name and hold the built schema's JSON text. A hit is returned
//! verbatim without rebuilding. Entries are never invalidated: when a
//! source document changes, clearing the cache is the caller's job. A
//! cache entry that is not valid JSON is reported as
//! [`SchemaError::BrokenCache`] rather than silently rebuilt.

use std::path::PathBuf;
use std::sync::Arc;

use jsv_core::{logical_dirname, normalize_logical, CacheKey, SchemaError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::builder::SchemaBuilder;
use crate::resolver::{BasicResolver, PathResolver};
use crate::store::{FsStore, SchemaStore};

/// Filesystem-backed registry configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Directory holding the raw schema documents.
    pub schema_dir: PathBuf,
    /// Directory holding built-schema cache entries.
    pub cache_dir: Option<PathBuf>,
    /// Whether built schemas are read from and written to the cache.
    pub use_cache: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            schema_dir: PathBuf::from("schemas"),
            cache_dir: None,
            use_cache: false,
        }
    }
}

impl RegistryConfig {
    /// Configuration reading schemas from `schema_dir` with caching disabled.
    pub fn new(schema_dir: impl Into<PathBuf>) -> Self {
        Self {
            schema_dir: schema_dir.into(),
            ..Self::default()
        }
    }

    /// Enable caching into `cache_dir`.
    pub fn with_cache_dir(mut self, cache_dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(cache_dir.into());
        self.use_cache = true;
        self
    }
}

/// Fetches, builds and caches schema documents.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    schemas: Arc<dyn SchemaStore>,
    cache: Option<Arc<dyn SchemaStore>>,
    use_cache: bool,
    resolver: Arc<dyn PathResolver>,
}

impl SchemaRegistry {
    /// Create a registry over `schemas` with the default resolver and no cache.
    pub fn new(schemas: Arc<dyn SchemaStore>) -> Self {
        Self {
            schemas,
            cache: None,
            use_cache: false,
            resolver: Arc::new(BasicResolver),
        }
    }

    /// Create a filesystem-backed registry from configuration.
    ///
    /// Caching is enabled only if `use_cache` is set and a `cache_dir` is given.
    pub fn from_config(config: &RegistryConfig) -> Self {
        let mut registry = Self::new(Arc::new(FsStore::new(&config.schema_dir)));
        if let Some(cache_dir) = &config.cache_dir {
            registry = registry.with_cache(Arc::new(FsStore::new(cache_dir)));
        }
        registry.set_use_cache(config.use_cache);
        registry
    }

    /// Attach a cache store and enable caching.
    pub fn with_cache(mut self, cache: Arc<dyn SchemaStore>) -> Self {
        self.cache = Some(cache);
        self.use_cache = true;
        self
    }

    /// Replace the `extends` path resolver.
    pub fn with_resolver(mut self, resolver: impl PathResolver + 'static) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    /// Turn cache reads and writes on or off. Has no effect without a cache store.
    pub fn set_use_cache(&mut self, use_cache: bool) {
        self.use_cache = use_cache;
    }

    /// Returns true if lookups go through the cache.
    pub fn uses_cache(&self) -> bool {
        self.use_cache && self.cache.is_some()
    }

    /// Map an `extends` reference found in `current_dir` to a logical name.
    pub fn resolve_extend(&self, reference: &str, current_dir: &str) -> String {
        self.resolver.resolve(reference, current_dir)
    }

    /// Returns the fully built schema for `name` as JSON text.
    ///
    /// # Errors
    ///
    /// Any [`SchemaError`]: the document or one of its ancestors is missing,
    /// unparsable or grammatically invalid, the inheritance chain is cyclic,
    /// or the cache is broken or unwritable.
    pub fn get_schema(&self, name: &str) -> Result<String, SchemaError> {
        self.fetch_built(name, &[], self.uses_cache())
    }

    /// Like [`get_schema`](Self::get_schema) but bypasses the cache entirely,
    /// for this schema and every schema it extends.
    pub fn get_schema_uncached(&self, name: &str) -> Result<String, SchemaError> {
        self.fetch_built(name, &[], false)
    }

    /// Returns the fully built schema for `name` as a JSON value.
    pub fn get_schema_value(&self, name: &str) -> Result<Value, SchemaError> {
        let text = self.get_schema(name)?;
        parse_document(&normalize_logical(name), &text).map(Value::Object)
    }

    /// Returns the unresolved schema document for `name`.
    ///
    /// # Errors
    ///
    /// `SchemaNotFound` if the store has no such name, `UnparsableSchema` if
    /// the content is not a JSON object.
    pub fn get_raw_schema(&self, name: &str) -> Result<String, SchemaError> {
        let name = normalize_logical(name);
        self.load_raw(&name).map(|(text, _)| text)
    }

    /// Fetch a built schema while `chain` is being resolved.
    pub(crate) fn fetch_built(
        &self,
        name: &str,
        chain: &[String],
        use_cache: bool,
    ) -> Result<String, SchemaError> {
        let name = normalize_logical(name);

        if use_cache {
            if let Some(cached) = self.read_cache(&name)? {
                tracing::debug!(schema = %name, "schema served from cache");
                return Ok(cached);
            }
            tracing::debug!(schema = %name, "schema cache miss");
        }

        let (_, raw) = self.load_raw(&name)?;

        let mut chain = chain.to_vec();
        chain.push(name.clone());
        let builder = SchemaBuilder::for_document(self, logical_dirname(&name), chain, use_cache);
        let built = builder.build(Value::Object(raw))?.to_string();

        if use_cache {
            self.write_cache(&name, &built)?;
        }

        tracing::info!(schema = %name, "built schema");
        Ok(built)
    }

    fn load_raw(&self, name: &str) -> Result<(String, Map<String, Value>), SchemaError> {
        let bytes = self
            .schemas
            .get(name)?
            .ok_or_else(|| SchemaError::SchemaNotFound {
                name: name.to_string(),
            })?;
        let text = String::from_utf8(bytes).map_err(|e| SchemaError::UnparsableSchema {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
        let document = parse_document(name, &text)?;
        Ok((text, document))
    }

    fn read_cache(&self, name: &str) -> Result<Option<String>, SchemaError> {
        let Some(cache) = &self.cache else {
            return Ok(None);
        };
        let key = CacheKey::for_schema(name);
        let Some(bytes) = cache.get(key.as_str())? else {
            return Ok(None);
        };

        let broken = || SchemaError::BrokenCache {
            name: name.to_string(),
            key: key.to_string(),
        };
        let text = String::from_utf8(bytes).map_err(|_| broken())?;
        if serde_json::from_str::<Value>(&text).is_err() {
            return Err(broken());
        }
        Ok(Some(text))
    }

    fn write_cache(&self, name: &str, built: &str) -> Result<(), SchemaError> {
        let Some(cache) = &self.cache else {
            return Ok(());
        };
        let key = CacheKey::for_schema(name);
        cache
            .put(key.as_str(), built.as_bytes())
            .map_err(|source| SchemaError::CacheWriteError {
                name: name.to_string(),
                key: key.to_string(),
                source,
            })?;
        tracing::debug!(schema = %name, key = %key, "schema cached");
        Ok(())
    }
}

/// Parse schema text that must hold a JSON object.
pub(crate) fn parse_document(name: &str, text: &str) -> Result<Map<String, Value>, SchemaError> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(SchemaError::UnparsableSchema {
            name: name.to_string(),
            reason: "schema document must be a JSON object".to_string(),
        }),
        Err(e) => Err(SchemaError::UnparsableSchema {
            name: name.to_string(),
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    fn registry_with(docs: &[(&str, Value)]) -> (SchemaRegistry, Arc<MemoryStore>) {
        let store = MemoryStore::new();
        for (name, doc) in docs {
            store.insert(*name, doc.to_string());
        }
        let cache = Arc::new(MemoryStore::new());
        let registry = SchemaRegistry::new(Arc::new(store)).with_cache(cache.clone());
        (registry, cache)
    }

    #[test]
    fn raw_schema_is_returned_unresolved() {
        let doc = json!({"extends": "base.json", "type": "object"});
        let (registry, _) = registry_with(&[("q.json", doc.clone())]);
        let raw = registry.get_raw_schema("q.json").unwrap();
        assert_eq!(serde_json::from_str::<Value>(&raw).unwrap(), doc);
    }

    #[test]
    fn missing_schema_is_not_found() {
        let (registry, _) = registry_with(&[]);
        assert!(matches!(
            registry.get_raw_schema("nope.json"),
            Err(SchemaError::SchemaNotFound { name }) if name == "nope.json"
        ));
    }

    #[test]
    fn non_json_schema_is_unparsable() {
        let store = MemoryStore::new().with("bad.json", "{not json");
        let registry = SchemaRegistry::new(Arc::new(store));
        assert!(matches!(
            registry.get_raw_schema("bad.json"),
            Err(SchemaError::UnparsableSchema { .. })
        ));
    }

    #[test]
    fn non_object_schema_is_unparsable() {
        let store = MemoryStore::new().with("list.json", "[1, 2]");
        let registry = SchemaRegistry::new(Arc::new(store));
        assert!(matches!(
            registry.get_schema("list.json"),
            Err(SchemaError::UnparsableSchema { .. })
        ));
    }

    #[test]
    fn built_schema_is_written_to_cache() {
        let (registry, cache) = registry_with(&[("a.json", json!({"type": "string"}))]);
        let built = registry.get_schema("a.json").unwrap();
        let key = CacheKey::for_schema("a.json");
        assert!(cache.contains(key.as_str()));
        assert_eq!(cache.get(key.as_str()).unwrap().unwrap(), built.as_bytes());
    }

    #[test]
    fn cache_hit_is_returned_verbatim() {
        let (registry, cache) = registry_with(&[("a.json", json!({"type": "string"}))]);
        let key = CacheKey::for_schema("a.json");
        cache.insert(key.as_str(), r#"{"type":"integer","id":"from-cache"}"#);
        assert_eq!(
            registry.get_schema("a.json").unwrap(),
            r#"{"type":"integer","id":"from-cache"}"#
        );
    }

    #[test]
    fn uncached_lookup_ignores_cache() {
        let (registry, cache) = registry_with(&[("a.json", json!({"type": "string"}))]);
        let key = CacheKey::for_schema("a.json");
        cache.insert(key.as_str(), "{broken");
        let built = registry.get_schema_uncached("a.json").unwrap();
        assert_eq!(serde_json::from_str::<Value>(&built).unwrap(), json!({"type": "string"}));
    }

    #[test]
    fn broken_cache_is_reported() {
        let (registry, cache) = registry_with(&[("a.json", json!({"type": "string"}))]);
        let key = CacheKey::for_schema("a.json");
        cache.insert(key.as_str(), "{broken");
        let err = registry.get_schema("a.json").unwrap_err();
        assert!(matches!(err, SchemaError::BrokenCache { .. }), "got {err}");
        assert!(!err.is_invalid_schema());
    }

    #[test]
    fn rejected_cache_write_is_reported() {
        let store = MemoryStore::new().with("a.json", r#"{"type":"string"}"#);
        let registry = SchemaRegistry::new(Arc::new(store)).with_cache(Arc::new(MemoryStore::read_only()));
        assert!(matches!(
            registry.get_schema("a.json"),
            Err(SchemaError::CacheWriteError { .. })
        ));
    }

    #[test]
    fn disabled_cache_is_untouched() {
        let (mut registry, cache) = registry_with(&[("a.json", json!({"type": "string"}))]);
        registry.set_use_cache(false);
        assert!(!registry.uses_cache());
        registry.get_schema("a.json").unwrap();
        assert!(cache.is_empty());
    }

    #[test]
    fn names_are_normalised_before_lookup() {
        let (registry, cache) = registry_with(&[("forms/a.json", json!({"type": "null"}))]);
        registry.get_schema("forms/./a.json").unwrap();
        assert!(cache.contains(CacheKey::for_schema("forms/a.json").as_str()));
    }

    #[test]
    fn custom_resolver_is_used() {
        #[derive(Debug)]
        struct Flat;
        impl PathResolver for Flat {
            fn resolve(&self, reference: &str, _current_dir: &str) -> String {
                format!("shared/{reference}")
            }
        }
        let (registry, _) = registry_with(&[]);
        let registry = registry.with_resolver(Flat);
        assert_eq!(registry.resolve_extend("id.json", "forms"), "shared/id.json");
    }

    #[test]
    fn config_defaults() {
        let config = RegistryConfig::default();
        assert_eq!(config.schema_dir, PathBuf::from("schemas"));
        assert!(config.cache_dir.is_none());
        assert!(!config.use_cache);

        let config = RegistryConfig::new("s").with_cache_dir("c");
        assert!(config.use_cache);
        assert!(SchemaRegistry::from_config(&config).uses_cache());
    }
}
