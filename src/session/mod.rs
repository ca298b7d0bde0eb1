//! Session file loading and saving.
//!
//! A session file is a flat JSON object in the working directory (by default
//! `.rapid.json`). Keys starting with `$$header:` are session headers; every
//! other key is a variable whose value keeps its JSON type.
//!
//! ```json
//! {
//!   "$$auth": "token-123",
//!   "userId": 7,
//!   "$$header:accept": "application/json"
//! }
//! ```

use crate::variables::{
    is_valid_header_name, is_valid_header_value, render_value, VariableStore,
};
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::Path;

/// Key prefix marking a session header.
pub const HEADER_PREFIX: &str = "$$header:";

/// Errors that can occur while reading or writing a session file.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    /// IO error occurred while reading or writing the file.
    Io(String),

    /// The file is not valid JSON.
    Parse(String),

    /// The file is JSON but not a flat object.
    InvalidFormat(String),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::Io(msg) => write!(f, "IO error: {}", msg),
            SessionError::Parse(msg) => write!(f, "Failed to parse session file: {}", msg),
            SessionError::InvalidFormat(msg) => write!(f, "Invalid session format: {}", msg),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<io::Error> for SessionError {
    fn from(err: io::Error) -> Self {
        SessionError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::Parse(err.to_string())
    }
}

/// Loads a session file into a fresh store.
///
/// # Returns
///
/// * `Ok(VariableStore)` - The loaded store, or an empty one when the file
///   does not exist
/// * `Err(SessionError)` - If the file exists but cannot be read or parsed
pub fn load_session(path: &Path) -> Result<VariableStore, SessionError> {
    if !path.exists() {
        log::debug!("no session file at {}", path.display());
        return Ok(VariableStore::new());
    }

    let content = fs::read_to_string(path)?;
    let store = parse_session(&content)?;

    log::info!(
        "loaded {} variables and {} headers from {}",
        store.variables.len(),
        store.headers.len(),
        path.display()
    );
    Ok(store)
}

/// Parses session file content.
pub fn parse_session(content: &str) -> Result<VariableStore, SessionError> {
    let root: Value = serde_json::from_str(content)?;

    let entries = match root {
        Value::Object(entries) => entries,
        other => {
            return Err(SessionError::InvalidFormat(format!(
                "expected an object at the top level, found {}",
                json_kind(&other)
            )))
        }
    };

    let mut store = VariableStore::new();
    for (key, value) in entries {
        match key.strip_prefix(HEADER_PREFIX) {
            Some(name) => {
                let value = render_value(&value);
                if is_valid_header_name(name) && is_valid_header_value(&value) {
                    store.set_header(name, value);
                } else {
                    log::warn!("ignoring invalid session header '{}'", name);
                }
            }
            None => store.set(key, value),
        }
    }

    Ok(store)
}

/// Writes the store to a session file, replacing any previous content.
pub fn save_session(path: &Path, store: &VariableStore) -> Result<(), SessionError> {
    let mut entries = Map::new();
    for (name, value) in store.sorted_variables() {
        entries.insert(name.clone(), value.clone());
    }
    for (name, value) in store.sorted_headers() {
        entries.insert(format!("{}{}", HEADER_PREFIX, name), Value::String(value.clone()));
    }

    let content = serde_json::to_string_pretty(&Value::Object(entries))?;
    fs::write(path, content + "\n")?;

    log::info!("saved session to {}", path.display());
    Ok(())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
