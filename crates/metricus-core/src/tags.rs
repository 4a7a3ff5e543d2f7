//! Tag model.
//!
//! Tags are opaque `key:value` strings. Instrument tag sets only ever grow by
//! appending into a freshly allocated vector; nothing is sorted or deduplicated.

/// Format a single `key:value` tag.
pub fn tag(key: &str, value: &str) -> String {
    format!("{key}:{value}")
}

/// Build a new tag set: `existing ++ extra`.
pub fn append(existing: &[String], extra: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(existing.len() + extra.len());
    out.extend_from_slice(existing);
    out.extend_from_slice(extra);
    out
}

/// Normalize facade-level global tags: trim, lowercase, drop empties.
pub fn normalize_global<S: AsRef<str>>(tags: &[S]) -> Vec<String> {
    tags.iter()
        .map(|t| t.as_ref().trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Ensure the namespace prefix ends with a `.` separator.
pub fn normalize_prefix(prefix: &str) -> String {
    if prefix.ends_with('.') {
        prefix.to_string()
    } else {
        format!("{prefix}.")
    }
}

/// Empty tag list for calls that take `&[impl AsRef<str>]`.
pub const NO_TAGS: &[&str] = &[];
