//! Configuration schema for RAPID.
//!
//! This module defines the configuration structure and validation logic for all
//! user-configurable settings.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Main configuration structure.
///
/// Missing settings fall back to the defaults below.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RapidConfig {
    /// Request timeout in milliseconds.
    ///
    /// Maximum time to wait for a complete response (including connection,
    /// headers, and body download). Defaults to 30000ms (30 seconds).
    ///
    /// Must be greater than 0.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Whether to automatically follow HTTP redirects. Defaults to true.
    #[serde(default = "default_follow_redirects")]
    pub follow_redirects: bool,

    /// Maximum number of redirects to follow. Defaults to 10.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: u32,

    /// Whether to validate SSL/TLS certificates. Defaults to true.
    #[serde(default = "default_validate_ssl")]
    pub validate_ssl: bool,

    /// Timeout in milliseconds for the HTTPS probe used when the base URL
    /// has no scheme. Defaults to 3000ms.
    ///
    /// Must be greater than 0.
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout: u64,

    /// Path of the session file holding saved variables and headers,
    /// relative to the working directory. Defaults to ".rapid.json".
    #[serde(default = "default_session_file")]
    pub session_file: String,

    /// Whether the session is written back to `session_file` on exit.
    /// Defaults to false.
    #[serde(default)]
    pub save_session_on_exit: bool,

    /// Headers sent with every request at the transport level.
    ///
    /// Session and inline headers of the same name take precedence.
    /// Defaults to a `User-Agent` header only.
    #[serde(default = "default_headers")]
    pub default_headers: HashMap<String, String>,
}

impl Default for RapidConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            follow_redirects: default_follow_redirects(),
            max_redirects: default_max_redirects(),
            validate_ssl: default_validate_ssl(),
            probe_timeout: default_probe_timeout(),
            session_file: default_session_file(),
            save_session_on_exit: false,
            default_headers: default_headers(),
        }
    }
}

impl RapidConfig {
    /// Validates the configuration and returns errors if any settings are invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout == 0 {
            return Err("timeout must be greater than 0".to_string());
        }

        if self.probe_timeout == 0 {
            return Err("probeTimeout must be greater than 0".to_string());
        }

        if self.session_file.trim().is_empty() {
            return Err("sessionFile must not be empty".to_string());
        }

        // max_redirects can be 0 (no redirects), so no validation needed

        Ok(())
    }

    /// Merges this configuration with another, using values from `other` where present.
    pub fn merge(&self, other: &RapidConfig) -> Self {
        Self {
            timeout: other.timeout,
            follow_redirects: other.follow_redirects,
            max_redirects: other.max_redirects,
            validate_ssl: other.validate_ssl,
            probe_timeout: other.probe_timeout,
            session_file: other.session_file.clone(),
            save_session_on_exit: other.save_session_on_exit,
            default_headers: other.default_headers.clone(),
        }
    }
}

// Default value functions for serde

fn default_timeout() -> u64 {
    30000 // 30 seconds in milliseconds
}

fn default_follow_redirects() -> bool {
    true
}

fn default_max_redirects() -> u32 {
    10
}

fn default_validate_ssl() -> bool {
    true
}

fn default_probe_timeout() -> u64 {
    3000
}

fn default_session_file() -> String {
    ".rapid.json".to_string()
}

fn default_headers() -> HashMap<String, String> {
    let mut headers = HashMap::new();
    headers.insert(
        "User-Agent".to_string(),
        format!("rapid/{}", env!("CARGO_PKG_VERSION")),
    );
    headers
}
