//! # Cache Keys
//!
//! Built schemas are cached under a key derived from the logical schema
//! name, never from the schema content: a lookup must be possible before
//! anything is built. The key is the lowercase SHA-256 hex digest of the
//! name, so every key is 64 characters and safe to use as a file name.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Fixed-width cache key for a logical schema name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derive the cache key for `name`.
    ///
    /// Callers should pass the normalised logical name so that `a/./b.json`
    /// and `a/b.json` share an entry.
    pub fn for_schema(name: &str) -> Self {
        let hash = Sha256::digest(name.as_bytes());
        Self(hash.iter().map(|b| format!("{b:02x}")).collect())
    }

    /// Returns the key as a hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_deterministic_and_fixed_width() {
        let a = CacheKey::for_schema("question.json");
        let b = CacheKey::for_schema("question.json");
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), 64);
        assert!(a.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn different_names_different_keys() {
        assert_ne!(
            CacheKey::for_schema("a.json"),
            CacheKey::for_schema("b.json")
        );
    }

    #[test]
    fn known_vector() {
        // SHA256("") is a published test vector.
        assert_eq!(
            CacheKey::for_schema("").as_str(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
