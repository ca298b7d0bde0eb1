//! Response formatting.
//!
//! JSON payloads are re-serialized in a canonical pretty form with 1-space
//! indentation; that form is both what is displayed and what later
//! extraction runs against. Anything that does not parse as JSON is kept
//! byte-for-byte (lossily decoded as UTF-8 for display).

use crate::models::HttpResponse;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Errors that can occur during response formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// JSON parsing or formatting error.
    JsonError(String),

    /// UTF-8 encoding error.
    EncodingError(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::JsonError(msg) => write!(f, "JSON formatting error: {}", msg),
            FormatError::EncodingError(msg) => write!(f, "Encoding error: {}", msg),
        }
    }
}

impl std::error::Error for FormatError {}

/// Formats JSON with pretty-printing using 1-space indentation.
///
/// # Examples
///
/// ```
/// use rapid::formatter::format_json_pretty;
///
/// let pretty = format_json_pretty(r#"{"id":1,"tags":["a"]}"#).unwrap();
/// assert_eq!(pretty, "{\n \"id\": 1,\n \"tags\": [\n  \"a\"\n ]\n}");
/// ```
pub fn format_json_pretty(json: &str) -> Result<String, FormatError> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| FormatError::JsonError(e.to_string()))?;
    pretty_print_value(&value)
}

/// Serializes an already parsed value in the canonical pretty form.
pub fn pretty_print_value(value: &Value) -> Result<String, FormatError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b" ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);

    value
        .serialize(&mut serializer)
        .map_err(|e| FormatError::JsonError(e.to_string()))?;

    String::from_utf8(buf).map_err(|e| FormatError::EncodingError(e.to_string()))
}

/// Normalizes a raw response payload: the pretty form when the payload is
/// JSON, otherwise the raw payload.
pub fn normalize_body(raw: &[u8]) -> String {
    let text = String::from_utf8_lossy(raw);

    match format_json_pretty(&text) {
        Ok(pretty) => pretty,
        Err(_) => text.into_owned(),
    }
}

/// Renders the one-line status summary, e.g. `✓ 200 OK (12ms)`.
pub fn format_status_line(response: &HttpResponse) -> String {
    let marker = if response.is_error() { '✗' } else { '✓' };
    format!(
        "{} {} {} ({}ms)",
        marker,
        response.status_code,
        response.status_text,
        response.elapsed_ms()
    )
}

/// Renders the status line followed by the body, as shown after a request.
///
/// With `with_headers` set, the response headers are listed as indented
/// `name: value` lines between the status line and the body.
pub fn format_response(response: &HttpResponse, with_headers: bool) -> String {
    let mut lines = vec![format_status_line(response)];

    if with_headers {
        lines.extend(
            response
                .sorted_headers()
                .into_iter()
                .map(|(name, value)| format!("  {}: {}", name, value)),
        );
    }
    if !response.body.is_empty() {
        lines.push(response.body.clone());
    }

    lines.join("\n")
}
