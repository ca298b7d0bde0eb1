//! Variable interpolation for request expressions.
//!
//! Every `${name}` placeholder is replaced with the textual form of the bound
//! value. Placeholders naming unbound variables are left untouched so that a
//! partially bound template stays visible in the request that goes out.
//! Substitution is a single pass: a substituted value containing `${...}` is
//! not expanded again.

use super::store::render_value;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// Cached regex pattern for matching `${variableName}`.
static VARIABLE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^{}]+)\}").expect("Failed to compile variable regex"));

/// Substitutes all `${variable}` placeholders in `text`.
///
/// # Arguments
///
/// * `text` - The input text containing `${variable}` placeholders
/// * `variables` - Bound variables
///
/// # Returns
///
/// The text with every bound placeholder replaced.
///
/// # Examples
///
/// ```
/// use rapid::variables::substitute_variables;
/// use serde_json::json;
/// use std::collections::HashMap;
///
/// let mut vars = HashMap::new();
/// vars.insert("id".to_string(), json!(7));
///
/// assert_eq!(substitute_variables("users/${id}", &vars), "users/7");
/// assert_eq!(substitute_variables("users/${missing}", &vars), "users/${missing}");
/// ```
pub fn substitute_variables(text: &str, variables: &HashMap<String, JsonValue>) -> String {
    // Fast path: no placeholder markers at all
    if !text.contains("${") {
        return text.to_string();
    }

    VARIABLE_REGEX
        .replace_all(text, |caps: &Captures| {
            let name = caps[1].trim();
            match variables.get(name) {
                Some(value) => render_value(value),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Lists the variable names referenced by `text`, in order of appearance.
pub fn referenced_variables(text: &str) -> Vec<String> {
    VARIABLE_REGEX
        .captures_iter(text)
        .map(|caps| caps[1].trim().to_string())
        .collect()
}
