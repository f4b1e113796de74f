//! # Logical Schema Paths
//!
//! Schemas are addressed by slash-separated logical names (`common/id.json`),
//! independent of how a store maps them to bytes. Names are normalised
//! before they reach a store, a cache key or the cycle detector, so that
//! `a/./b.json`, `a//b.json` and `a/c/../b.json` all denote `a/b.json`.

/// Normalise a logical name.
///
/// Empty and `.` segments are dropped and `..` removes the previous
/// segment. A `..` that would climb above the root is kept, so the store
/// can decide whether to honour it. A leading `/` is preserved.
pub fn normalize_logical(name: &str) -> String {
    let absolute = name.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();
    for segment in name.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if absolute => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }
    let joined = segments.join("/");
    if absolute {
        format!("/{joined}")
    } else {
        joined
    }
}

/// Returns the directory part of a logical name, or `""` for a top-level name.
pub fn logical_dirname(name: &str) -> String {
    let normalized = normalize_logical(name);
    match normalized.rfind('/') {
        Some(0) => "/".to_string(),
        Some(idx) => normalized[..idx].to_string(),
        None => String::new(),
    }
}

/// Join a reference onto a directory and normalise the result.
pub fn join_logical(dir: &str, reference: &str) -> String {
    if dir.is_empty() || reference.starts_with('/') {
        normalize_logical(reference)
    } else {
        normalize_logical(&format!("{dir}/{reference}"))
    }
}
