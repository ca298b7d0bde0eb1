//! Configuration management for RAPID.
//!
//! User settings are a JSON object merged over the defaults and validated.
//! The binary looks for them in the `--config` file, then the file named by
//! `RAPID_CONFIG`, then `.rapidrc.json` in the working directory.

pub mod schema;

pub use schema::RapidConfig;

use serde_json::Value;
use std::fs;
use std::path::Path;

/// Environment variable naming a configuration file.
pub const CONFIG_ENV_VAR: &str = "RAPID_CONFIG";

/// Configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".rapidrc.json";

/// Loads configuration from a JSON settings value.
///
/// Settings that fail to deserialize are reported and replaced by the
/// defaults; settings that deserialize but fail validation are an error.
///
/// # Example
///
/// ```
/// use rapid::config::load_config;
/// use serde_json::json;
///
/// let config = load_config(Some(json!({"timeout": 60000}))).unwrap();
/// assert_eq!(config.timeout, 60000);
/// assert!(config.validate_ssl);
/// ```
pub fn load_config(settings_json: Option<Value>) -> Result<RapidConfig, String> {
    let mut config = RapidConfig::default();

    if let Some(settings) = settings_json {
        match serde_json::from_value::<RapidConfig>(settings) {
            Ok(user_config) => {
                config = config.merge(&user_config);
            }
            Err(e) => {
                log::warn!("Failed to parse rapid settings: {}. Using defaults.", e);
            }
        }
    }

    config
        .validate()
        .map_err(|e| format!("Invalid configuration: {}", e))?;

    Ok(config)
}

/// Loads configuration from a JSON file.
///
/// A missing file yields the defaults. An unreadable file or invalid JSON is
/// an error.
pub fn load_config_file(path: &Path) -> Result<RapidConfig, String> {
    if !path.is_file() {
        log::debug!("no config file at {}, using defaults", path.display());
        return load_config(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let settings: Value = serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?;

    log::info!("loaded configuration from {}", path.display());
    load_config(Some(settings))
}
