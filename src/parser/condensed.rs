//! Condensed-object body syntax.
//!
//! `{name:Bob, age:30}` is a shorthand for a flat JSON object whose keys and
//! values are all strings. Keys and values are bare tokens; either may be
//! wrapped in double quotes to keep commas or colons inside it. This is
//! deliberately not JSON, so it has its own small parser rather than going
//! through `serde_json`.

use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;

/// Parses a condensed object into a flat string-valued JSON map.
///
/// Elements without a `:` or with an empty key are skipped. Returns `None`
/// when the text is not wrapped in `{...}`.
pub fn parse_condensed(text: &str) -> Option<Map<String, JsonValue>> {
    let inner = text.trim().strip_prefix('{')?.strip_suffix('}')?;

    let mut object = Map::new();
    for pair in split_unquoted(inner, ',') {
        let Some((key, value)) = split_once_unquoted(pair, ':') else {
            continue;
        };

        let key = unquote(key.trim());
        if key.is_empty() {
            continue;
        }
        object.insert(key.to_string(), JsonValue::String(unquote(value.trim()).to_string()));
    }

    Some(object)
}

/// Parses a condensed object and re-serializes it as canonical JSON.
///
/// # Examples
///
/// ```
/// use rapid::parser::condensed::condensed_to_json;
///
/// let json = condensed_to_json("{name:Bob, age:30}").unwrap();
/// assert_eq!(json, r#"{"age":"30","name":"Bob"}"#);
/// ```
pub fn condensed_to_json(text: &str) -> Option<String> {
    // Sorted keys regardless of serde_json's `preserve_order` feature
    let sorted: BTreeMap<String, JsonValue> = parse_condensed(text)?.into_iter().collect();
    serde_json::to_string(&sorted).ok()
}

/// Splits on `sep` outside double quotes.
fn split_unquoted(text: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;

    for (idx, ch) in text.char_indices() {
        if ch == '"' {
            in_quotes = !in_quotes;
        } else if ch == sep && !in_quotes {
            parts.push(&text[start..idx]);
            start = idx + ch.len_utf8();
        }
    }
    parts.push(&text[start..]);

    parts
}

/// Splits at the first `sep` outside double quotes.
fn split_once_unquoted(text: &str, sep: char) -> Option<(&str, &str)> {
    let mut in_quotes = false;
    for (idx, ch) in text.char_indices() {
        if ch == '"' {
            in_quotes = !in_quotes;
        } else if ch == sep && !in_quotes {
            return Some((&text[..idx], &text[idx + ch.len_utf8()..]));
        }
    }
    None
}

/// Removes one pair of surrounding double quotes.
fn unquote(text: &str) -> &str {
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        &text[1..text.len() - 1]
    } else {
        text
    }
}
