//! Path-value extraction from JSON response documents.
//!
//! Paths are dotted accessors with optional bracket indexes, e.g.
//! `data.items.0.id` or `data.items[0].id`. A leading `$` or `$.` is
//! accepted and ignored, and the empty path denotes the whole document.
//!
//! A miss is reported as `None`; callers skip the binding rather than raise.

use serde_json::Value as JsonValue;

/// Represents a segment in an accessor path.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PathSegment {
    /// Object field access, or array index when the segment is numeric and
    /// the current value is an array (e.g. `user`, `0`).
    Field(String),

    /// Bracketed array index (e.g. `[0]`).
    ArrayIndex(usize),
}

/// Resolves `path` against a JSON text blob.
///
/// Non-JSON documents simply resolve to nothing.
///
/// # Examples
///
/// ```
/// use rapid::variables::resolve;
/// use serde_json::json;
///
/// let doc = r#"{"data": {"items": [{"id": 7}]}}"#;
/// assert_eq!(resolve(doc, "data.items.0.id"), Some(json!(7)));
/// assert_eq!(resolve(doc, "data.missing"), None);
/// assert_eq!(resolve("not json", ""), None);
/// ```
pub fn resolve(document: &str, path: &str) -> Option<JsonValue> {
    let json: JsonValue = serde_json::from_str(document).ok()?;
    resolve_value(&json, path).cloned()
}

/// Resolves `path` against an already parsed JSON value.
pub fn resolve_value<'a>(json: &'a JsonValue, path: &str) -> Option<&'a JsonValue> {
    let path = normalize_path(path);

    let mut current = json;
    for segment in parse_path_segments(path) {
        current = match segment {
            PathSegment::Field(name) => match current {
                JsonValue::Object(map) => map.get(&name)?,
                JsonValue::Array(items) => items.get(name.parse::<usize>().ok()?)?,
                _ => return None,
            },
            PathSegment::ArrayIndex(index) => current.as_array()?.get(index)?,
        };
    }

    Some(current)
}

/// Strips the optional `$` root marker and a leading dot.
///
/// `$` only counts as the root when it stands alone or is followed by `.`
/// or `[`, so a field such as `$$auth` keeps its name.
fn normalize_path(path: &str) -> &str {
    let path = path.trim();
    let path = match path.strip_prefix('$') {
        Some(rest) if rest.is_empty() || rest.starts_with('.') || rest.starts_with('[') => rest,
        _ => path,
    };
    path.strip_prefix('.').unwrap_or(path)
}

/// Parses an accessor path into segments.
///
/// - `user.name` -> [Field("user"), Field("name")]
/// - `items[0].id` -> [Field("items"), ArrayIndex(0), Field("id")]
/// - `items["a.b"]` -> [Field("items"), Field("a.b")]
fn parse_path_segments(path: &str) -> Vec<PathSegment> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = path.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '.' => {
                if !current.is_empty() {
                    segments.push(PathSegment::Field(std::mem::take(&mut current)));
                }
            }
            '[' => {
                if !current.is_empty() {
                    segments.push(PathSegment::Field(std::mem::take(&mut current)));
                }

                let mut inner = String::new();
                for next_ch in chars.by_ref() {
                    if next_ch == ']' {
                        break;
                    }
                    inner.push(next_ch);
                }

                let inner = inner.trim();
                let quoted = inner
                    .strip_prefix('"')
                    .and_then(|s| s.strip_suffix('"'))
                    .or_else(|| inner.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')));

                match (quoted, inner.parse::<usize>()) {
                    (Some(key), _) => segments.push(PathSegment::Field(key.to_string())),
                    (None, Ok(index)) => segments.push(PathSegment::ArrayIndex(index)),
                    (None, Err(_)) => segments.push(PathSegment::Field(inner.to_string())),
                }
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        segments.push(PathSegment::Field(current));
    }

    segments
}
