//! HTTP request execution configuration.
//!
//! This module turns the user configuration into the settings of the shared
//! `reqwest` client: timeouts, redirect policy, TLS validation and default
//! headers.

use super::error::RequestError;
use crate::config::RapidConfig;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::collections::HashMap;
use std::time::Duration;

/// Configuration for HTTP request execution.
#[derive(Debug, Clone)]
pub struct ExecutionConfig {
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,

    /// Timeout in milliseconds for the HTTPS availability probe.
    pub probe_timeout_ms: u64,

    /// Whether 3xx responses are followed.
    pub follow_redirects: bool,

    /// Redirect limit when `follow_redirects` is set.
    pub max_redirects: u32,

    /// Whether TLS certificates are verified.
    pub validate_ssl: bool,

    /// Headers attached to every request by the client.
    pub default_headers: HashMap<String, String>,
}

impl ExecutionConfig {
    /// Creates an ExecutionConfig from the user configuration.
    pub fn from_config(config: &RapidConfig) -> Self {
        Self {
            timeout_ms: config.timeout,
            probe_timeout_ms: config.probe_timeout,
            follow_redirects: config.follow_redirects,
            max_redirects: config.max_redirects,
            validate_ssl: config.validate_ssl,
            default_headers: config.default_headers.clone(),
        }
    }

    /// Returns the timeout as a `std::time::Duration`.
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Builds the client used for every request of a session.
    pub fn build_client(&self) -> Result<reqwest::Client, RequestError> {
        self.client_builder(self.timeout_duration())
            .build()
            .map_err(|e| RequestError::BuildError(e.to_string()))
    }

    /// Builds a short-timeout client for the HTTPS probe.
    pub fn build_probe_client(&self) -> Result<reqwest::Client, RequestError> {
        self.client_builder(Duration::from_millis(self.probe_timeout_ms))
            .build()
            .map_err(|e| RequestError::BuildError(e.to_string()))
    }

    fn client_builder(&self, timeout: Duration) -> reqwest::ClientBuilder {
        let redirect = if self.follow_redirects {
            reqwest::redirect::Policy::limited(self.max_redirects as usize)
        } else {
            reqwest::redirect::Policy::none()
        };

        reqwest::Client::builder()
            .timeout(timeout)
            .redirect(redirect)
            .danger_accept_invalid_certs(!self.validate_ssl)
            .default_headers(self.header_map())
    }

    /// Converts the default headers, skipping entries that are not valid
    /// HTTP header names or values.
    fn header_map(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in &self.default_headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => {
                    map.insert(name, value);
                }
                _ => log::warn!("skipping invalid default header '{}'", name),
            }
        }
        map
    }
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self::from_config(&RapidConfig::default())
    }
}
