//! # Schema Stores
//!
//! A schema store is a byte-addressable key → blob map. The registry uses
//! one store for raw schema documents (keyed by logical name) and,
//! optionally, a second one for built schemas (keyed by cache key).
//!
//! Every `put` replaces the whole value of one key. Two builders racing to
//! populate the same cache key may both write, but neither can leave a
//! partially written entry behind.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use jsv_core::StoreError;
use parking_lot::RwLock;

/// Key/blob storage consumed by the registry.
pub trait SchemaStore: Send + Sync + std::fmt::Debug {
    /// Fetch the bytes stored under `key`, or `None` if there are none.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Store `bytes` under `key`, replacing any previous value.
    fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError>;
}

/// A store backed by a directory; keys are relative file paths.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Create a store rooted at `root`. The directory need not exist yet.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the root directory of this store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a key to its file path under the root.
    pub fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(key.trim_start_matches('/'))
    }
}

impl SchemaStore for FsStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let path = self.key_path(key);
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        let path = self.key_path(key);
        let rejected = |e: std::io::Error| StoreError::WriteRejected {
            key: key.to_string(),
            reason: e.to_string(),
        };

        let dir = path.parent().unwrap_or(&self.root);
        std::fs::create_dir_all(dir).map_err(rejected)?;

        // Each writer gets its own sibling temp file, then renames it over the target.
        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(rejected)?;
        tmp.write_all(bytes).map_err(rejected)?;
        tmp.as_file().sync_all().map_err(rejected)?;
        tmp.persist(&path).map_err(|e| rejected(e.error))?;
        Ok(())
    }
}

/// An in-process store, mainly for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
    read_only: bool,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that rejects every `put`.
    pub fn read_only() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            read_only: true,
        }
    }

    /// Insert a value directly, bypassing the read-only flag.
    pub fn insert(&self, key: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.entries.write().insert(key.into(), bytes.into());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(self, key: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(key, bytes);
        self
    }

    /// Returns true if a value is stored under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.read().contains_key(key)
    }

    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl SchemaStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        if self.read_only {
            return Err(StoreError::WriteRejected {
                key: key.to_string(),
                reason: "store is read-only".to_string(),
            });
        }
        self.entries.write().insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}
