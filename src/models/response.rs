//! HTTP response data models.
//!
//! This module defines the normalized response returned by the executor.
//! The body is already in display form: pretty-printed JSON when the payload
//! parsed as JSON, the raw payload otherwise.

use std::collections::HashMap;
use std::time::Duration;

/// Represents an HTTP response received from a server.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code (e.g., 200, 404, 500).
    pub status_code: u16,

    /// HTTP status text (e.g., "OK", "Not Found").
    pub status_text: String,

    /// Response headers by lower-cased name. Listed in the debug echo.
    pub headers: HashMap<String, String>,

    /// Normalized response body.
    ///
    /// Canonical 1-space pretty JSON when the payload parsed as JSON,
    /// otherwise the payload exactly as received.
    pub body: String,

    /// Wall-clock round trip, from sending the request to reading the last
    /// body byte.
    pub duration: Duration,
}

impl HttpResponse {
    /// Creates a new HttpResponse with the given status code and text.
    pub fn new(status_code: u16, status_text: String) -> Self {
        Self {
            status_code,
            status_text,
            headers: HashMap::new(),
            body: String::new(),
            duration: Duration::from_secs(0),
        }
    }

    /// Checks if the response status indicates a client or server error.
    pub fn is_error(&self) -> bool {
        self.status_code >= 400
    }

    /// Headers sorted by name.
    pub fn sorted_headers(&self) -> Vec<(&String, &String)> {
        let mut entries: Vec<_> = self.headers.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Elapsed time in whole milliseconds.
    pub fn elapsed_ms(&self) -> u128 {
        self.duration.as_millis()
    }
}
