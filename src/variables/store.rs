//! Interpreter variable and session-header storage.
//!
//! Variables hold JSON-typed values so that a number captured from a response
//! stays a number; session headers are plain strings keyed by lower-cased
//! header name.

use reqwest::header::{HeaderName, HeaderValue};
use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// Reserved variable whose value is sent as a bearer token on every request.
pub const AUTH_VARIABLE: &str = "$$auth";

/// Checks that `name` is a legal HTTP header field name.
pub fn is_valid_header_name(name: &str) -> bool {
    HeaderName::from_bytes(name.trim().as_bytes()).is_ok()
}

/// Checks that `value` can be sent as an HTTP header value.
pub fn is_valid_header_value(value: &str) -> bool {
    HeaderValue::from_bytes(value.as_bytes()).is_ok()
}

/// Variables and session headers of one interpreter session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableStore {
    /// Bound variables by name.
    pub variables: HashMap<String, JsonValue>,

    /// Session headers, keys lower-cased.
    pub headers: HashMap<String, String>,
}

impl VariableStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to `value`, replacing any previous binding.
    pub fn set(&mut self, name: impl Into<String>, value: JsonValue) {
        self.variables.insert(name.into(), value);
    }

    /// Looks up a variable.
    pub fn get(&self, name: &str) -> Option<&JsonValue> {
        self.variables.get(name)
    }

    /// Removes a variable, returning its previous value.
    pub fn unset(&mut self, name: &str) -> Option<JsonValue> {
        self.variables.remove(name)
    }

    /// Removes every variable. Calling it on an empty store is a no-op.
    pub fn clear_variables(&mut self) {
        self.variables.clear();
    }

    /// Sets a session header; the name is stored lower-cased.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.insert(name.trim().to_lowercase(), value.into());
    }

    /// Removes a session header (case-insensitive), returning its value.
    pub fn unset_header(&mut self, name: &str) -> Option<String> {
        self.headers.remove(&name.trim().to_lowercase())
    }

    /// Removes every session header.
    pub fn clear_headers(&mut self) {
        self.headers.clear();
    }

    /// Bearer token from the reserved `$$auth` variable, if bound.
    pub fn auth_token(&self) -> Option<String> {
        self.get(AUTH_VARIABLE).map(render_value)
    }

    /// Variables sorted by name, for listings.
    pub fn sorted_variables(&self) -> Vec<(&String, &JsonValue)> {
        let mut entries: Vec<_> = self.variables.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Session headers sorted by name, for listings.
    pub fn sorted_headers(&self) -> Vec<(&String, &String)> {
        let mut entries: Vec<_> = self.headers.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

/// Renders a variable value in its textual form.
///
/// Strings render unquoted, numbers and booleans in their natural form,
/// `null` as `null`, and arrays/objects as compact JSON.
pub fn render_value(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Null => "null".to_string(),
        JsonValue::Array(_) | JsonValue::Object(_) => value.to_string(),
    }
}
