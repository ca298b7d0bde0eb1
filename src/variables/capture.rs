//! Extraction mappings: binding response fields to variables.
//!
//! A mapping is the left-hand side of an extracting assignment:
//!
//! ```text
//! token = $              # field `token` -> variable `token`
//! {id, email} = $        # destructure two fields
//! {data.id:userId} = $   # field path `data.id` -> variable `userId`
//! ```
//!
//! Each element resolves independently, and a path that is not found in the
//! response skips that binding without an error.

use super::extract::resolve_value;
use super::store::VariableStore;
use serde_json::Value as JsonValue;

/// One `path -> variable` binding of an extraction mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureDirective {
    /// Accessor path into the response document.
    pub path: String,

    /// Name of the variable that receives the value.
    pub variable_name: String,
}

impl CaptureDirective {
    /// Creates a new CaptureDirective.
    pub fn new(path: impl Into<String>, variable_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            variable_name: variable_name.into(),
        }
    }
}

/// Parses an extraction mapping.
///
/// One optional enclosing `{}` pair is stripped, then the text is split on
/// top-level commas (commas inside `[...]` belong to the path). An element
/// with a `:` outside brackets is `path:name`, split at the last such colon;
/// a bare element is both path and name. Empty elements are ignored.
///
/// # Examples
///
/// ```
/// use rapid::variables::{parse_mapping, CaptureDirective};
///
/// let mapping = parse_mapping("{a, b:c}");
/// assert_eq!(mapping, vec![CaptureDirective::new("a", "a"), CaptureDirective::new("b", "c")]);
/// ```
pub fn parse_mapping(spec: &str) -> Vec<CaptureDirective> {
    let spec = spec.trim();
    let inner = spec
        .strip_prefix('{')
        .and_then(|s| s.strip_suffix('}'))
        .unwrap_or(spec);

    split_top_level(inner)
        .into_iter()
        .filter_map(|element| {
            let element = element.trim();
            if element.is_empty() {
                return None;
            }

            match last_top_level_colon(element) {
                Some(idx) => {
                    let (path, name) = (element[..idx].trim(), element[idx + 1..].trim());
                    if path.is_empty() || name.is_empty() {
                        None
                    } else {
                        Some(CaptureDirective::new(path, name))
                    }
                }
                None => Some(CaptureDirective::new(element, element)),
            }
        })
        .collect()
}

/// Splits on commas that are not inside square brackets.
fn split_top_level(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (idx, ch) in text.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&text[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);

    parts
}

/// Byte offset of the last `:` outside square brackets.
fn last_top_level_colon(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut found = None;

    for (idx, ch) in text.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            ':' if depth == 0 => found = Some(idx),
            _ => {}
        }
    }

    found
}

/// Applies `directives` to a response document, binding every path that
/// resolves.
///
/// # Returns
///
/// The `(variable, value)` pairs that were bound, in mapping order. A
/// document that is not JSON binds nothing.
pub fn apply_captures(
    directives: &[CaptureDirective],
    document: &str,
    store: &mut VariableStore,
) -> Vec<(String, JsonValue)> {
    let Ok(json) = serde_json::from_str::<JsonValue>(document) else {
        return Vec::new();
    };

    let mut bound = Vec::new();
    for directive in directives {
        if let Some(value) = resolve_value(&json, &directive.path) {
            store.set(directive.variable_name.clone(), value.clone());
            bound.push((directive.variable_name.clone(), value.clone()));
        } else {
            log::debug!("capture miss: '{}' not found in response", directive.path);
        }
    }

    bound
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_mapping_bare_name() {
        assert_eq!(parse_mapping("token"), vec![CaptureDirective::new("token", "token")]);
    }

    #[test]
    fn test_parse_mapping_braced_mixed() {
        assert_eq!(
            parse_mapping("{id, email, data.user.name : userName}"),
            vec![
                CaptureDirective::new("id", "id"),
                CaptureDirective::new("email", "email"),
                CaptureDirective::new("data.user.name", "userName"),
            ]
        );
    }

    #[test]
    fn test_parse_mapping_ignores_empty_elements() {
        assert_eq!(
            parse_mapping("{a,, b:, :c ,}"),
            vec![CaptureDirective::new("a", "a")]
        );
        assert!(parse_mapping("{}").is_empty());
        assert!(parse_mapping("").is_empty());
    }

    #[test]
    fn test_parse_mapping_commas_inside_brackets() {
        assert_eq!(
            parse_mapping(r#"{data["a,b"]:ab, id}"#),
            vec![
                CaptureDirective::new(r#"data["a,b"]"#, "ab"),
                CaptureDirective::new("id", "id"),
            ]
        );
    }

    #[test]
    fn test_parse_mapping_colon_inside_brackets() {
        assert_eq!(
            parse_mapping(r#"{["a:b"]:ab, data["x:y"]}"#),
            vec![
                CaptureDirective::new(r#"["a:b"]"#, "ab"),
                CaptureDirective::new(r#"data["x:y"]"#, r#"data["x:y"]"#),
            ]
        );
    }

    #[test]
    fn test_apply_captures_dollar_prefixed_names() {
        let mut store = VariableStore::new();
        let doc = r#"{"$$auth": "t-1", "a:b": 5}"#;

        let bound = apply_captures(&parse_mapping(r#"{$$auth, ["a:b"]:ab}"#), doc, &mut store);

        assert_eq!(bound.len(), 2);
        assert_eq!(store.get("$$auth"), Some(&json!("t-1")));
        assert_eq!(store.get("ab"), Some(&json!(5)));
    }

    #[test]
    fn test_apply_captures_binds_found_and_skips_missing() {
        let mut store = VariableStore::new();
        let doc = r#"{"id": 1, "email": "a@b.com", "other": "x"}"#;

        let bound = apply_captures(&parse_mapping("{id, email, missing}"), doc, &mut store);

        assert_eq!(bound.len(), 2);
        assert_eq!(store.get("id"), Some(&json!(1)));
        assert_eq!(store.get("email"), Some(&json!("a@b.com")));
        assert_eq!(store.get("other"), None);
        assert_eq!(store.get("missing"), None);
    }

    #[test]
    fn test_apply_captures_renames() {
        let mut store = VariableStore::new();
        let doc = r#"{"data": {"items": [{"id": 99}]}}"#;

        apply_captures(&parse_mapping("{data.items.0.id:firstId}"), doc, &mut store);
        assert_eq!(store.get("firstId"), Some(&json!(99)));
    }

    #[test]
    fn test_apply_captures_non_json_document() {
        let mut store = VariableStore::new();
        let bound = apply_captures(&parse_mapping("id"), "plain text", &mut store);

        assert!(bound.is_empty());
        assert!(store.variables.is_empty());
    }
}
