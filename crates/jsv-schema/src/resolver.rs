//! # Extend Path Resolution
//!
//! Maps the value of an `extends` reference, seen while building a schema
//! that lives in `current_dir`, to the logical name the registry fetches.

use jsv_core::join_logical;

/// Pluggable mapping from an `extends` reference to a logical schema name.
pub trait PathResolver: Send + Sync + std::fmt::Debug {
    /// Resolve `reference` relative to `current_dir`.
    fn resolve(&self, reference: &str, current_dir: &str) -> String;
}

/// Default resolver: `current_dir + "/" + reference`, normalised.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicResolver;

impl PathResolver for BasicResolver {
    fn resolve(&self, reference: &str, current_dir: &str) -> String {
        join_logical(current_dir, reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_directory_and_reference() {
        assert_eq!(BasicResolver.resolve("base.json", "forms"), "forms/base.json");
        assert_eq!(BasicResolver.resolve("../base.json", "forms/q"), "forms/base.json");
    }

    #[test]
    fn top_level_directory() {
        assert_eq!(BasicResolver.resolve("base.json", ""), "base.json");
    }
}
