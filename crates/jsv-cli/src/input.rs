//! # Instance Input
//!
//! Reads the document to validate from a file or standard input. Files
//! ending in `.yaml` or `.yml` are converted to JSON text first.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

/// Source name that selects standard input.
pub const STDIN: &str = "-";

/// Read the instance named by `source` as JSON text.
///
/// YAML that fails to parse or convert is passed through unchanged, so the
/// validator reports it as malformed input.
pub fn read_instance(source: &str) -> Result<String> {
    if source == STDIN {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read instance from stdin")?;
        return Ok(text);
    }

    let path = Path::new(source);
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read instance {}", path.display()))?;
    if !is_yaml(path) {
        return Ok(text);
    }

    match yaml_text_to_json(&text) {
        Ok(json) => Ok(json),
        Err(reason) => {
            tracing::debug!(path = %path.display(), %reason, "YAML instance not converted");
            Ok(text)
        }
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    )
}

/// Convert YAML text to compact JSON text.
pub fn yaml_text_to_json(text: &str) -> Result<String, String> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(text).map_err(|e| e.to_string())?;
    yaml_to_json_value(&yaml).map(|v| v.to_string())
}

/// Convert a parsed YAML value to JSON.
///
/// Map keys must be strings, numbers or booleans. Tags are dropped.
pub fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::from(i))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::from(u))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("cannot represent {f} in JSON"))
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => seq
            .iter()
            .map(yaml_to_json_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        serde_yaml::Value::Mapping(map) => {
            let mut object = serde_json::Map::with_capacity(map.len());
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => return Err(format!("unsupported YAML map key: {other:?}")),
                };
                object.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(object))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn yaml_document_converts_in_key_order() {
        let json = yaml_text_to_json("id: 7\ncontent: hello\ntags:\n  - a\n  - b\nscore: 1.5\nnote: ~\n")
            .unwrap();
        assert_eq!(
            json,
            r#"{"id":7,"content":"hello","tags":["a","b"],"score":1.5,"note":null}"#
        );
    }

    #[test]
    fn non_scalar_keys_are_rejected() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("? [a, b]\n: 1\n").unwrap();
        assert!(yaml_to_json_value(&yaml).is_err());
    }

    #[test]
    fn scalar_keys_become_strings() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("1: one\ntrue: yes\n").unwrap();
        assert_eq!(
            yaml_to_json_value(&yaml).unwrap(),
            json!({"1": "one", "true": "yes"})
        );
    }

    #[test]
    fn json_files_are_read_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        std::fs::write(&path, "{ \"a\" : 1 }").unwrap();
        assert_eq!(read_instance(path.to_str().unwrap()).unwrap(), "{ \"a\" : 1 }");
    }

    #[test]
    fn yaml_files_are_converted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.yml");
        std::fs::write(&path, "a: [1, 2]\n").unwrap();
        assert_eq!(read_instance(path.to_str().unwrap()).unwrap(), r#"{"a":[1,2]}"#);
    }

    #[test]
    fn broken_yaml_passes_through() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.yaml");
        std::fs::write(&path, "a: [1, 2\n").unwrap();
        assert_eq!(read_instance(path.to_str().unwrap()).unwrap(), "a: [1, 2\n");
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(read_instance("/nonexistent/instance.json").is_err());
    }
}
