//! # Validation Errors
//!
//! Path-keyed collection of human-readable validation messages.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Messages grouped by instance path.
///
/// Paths iterate in lexicographic order; messages for one path keep the
/// order in which they were reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `message` to the messages at `path`.
    pub fn add(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.0.entry(path.into()).or_default().push(message.into());
    }

    /// Returns true if nothing was reported.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of paths with at least one message.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the total number of messages across all paths.
    pub fn message_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    /// Returns the messages reported at `path`.
    pub fn get(&self, path: &str) -> Option<&[String]> {
        self.0.get(path).map(Vec::as_slice)
    }

    /// Iterate over the reported paths.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterate over `(path, messages)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(p, m)| (p.as_str(), m.as_slice()))
    }

    /// Consumes self and returns the inner map.
    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }
}

impl IntoIterator for ValidationErrors {
    type Item = (String, Vec<String>);
    type IntoIter = std::collections::btree_map::IntoIter<String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (path, messages) in &self.0 {
            for message in messages {
                if !first {
                    writeln!(f)?;
                }
                first = false;
                write!(f, "  {path}: {message}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_accumulate_per_path() {
        let mut errors = ValidationErrors::new();
        errors.add("$.name", "must be a string");
        errors.add("$.name", "is too long");
        errors.add("$", "must be an object");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.message_count(), 3);
        assert_eq!(
            errors.get("$.name").unwrap(),
            &["must be a string".to_string(), "is too long".to_string()]
        );
        assert_eq!(errors.paths().collect::<Vec<_>>(), vec!["$", "$.name"]);
    }

    #[test]
    fn display_lists_every_message() {
        let mut errors = ValidationErrors::new();
        errors.add("$.a", "first");
        errors.add("$.b", "second");
        assert_eq!(errors.to_string(), "  $.a: first\n  $.b: second");
    }

    #[test]
    fn serializes_as_plain_map() {
        let mut errors = ValidationErrors::new();
        errors.add("$", "is not a valid JSON");
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            serde_json::json!({"$": ["is not a valid JSON"]})
        );
    }
}
