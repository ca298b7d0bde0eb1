//! HTTP request execution error types.
//!
//! This module defines error types that can occur during HTTP request execution,
//! including network errors, timeouts, and protocol issues. None of them is
//! fatal to the interpreter: they are displayed and the session continues.

use std::fmt;

/// Errors that can occur during HTTP request execution.
#[derive(Debug)]
pub enum RequestError {
    /// Network error occurred during request execution.
    ///
    /// This includes connection failures, DNS resolution errors,
    /// and other network-level issues.
    NetworkError(String),

    /// Request timed out before completion.
    Timeout,

    /// Invalid URL provided in the request.
    InvalidUrl(String),

    /// TLS/SSL error occurred during HTTPS connection.
    TlsError(String),

    /// Request building error.
    ///
    /// Errors that occur when constructing the transport request, e.g. a
    /// header value that is not valid in HTTP.
    BuildError(String),

    /// The response arrived but its body could not be read completely.
    BodyReadError(String),

    /// Unsupported protocol.
    ///
    /// Only HTTP and HTTPS protocols are supported.
    UnsupportedProtocol(String),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            RequestError::Timeout => write!(f, "Request timed out"),
            RequestError::InvalidUrl(url) => write!(f, "Invalid URL: {}", url),
            RequestError::TlsError(msg) => write!(f, "TLS/SSL error: {}", msg),
            RequestError::BuildError(msg) => write!(f, "Request build error: {}", msg),
            RequestError::BodyReadError(msg) => {
                write!(f, "Could not read response body: {}", msg)
            }
            RequestError::UnsupportedProtocol(protocol) => {
                write!(f, "Unsupported protocol: {}", protocol)
            }
        }
    }
}

impl std::error::Error for RequestError {}

/// Convert reqwest errors to RequestError.
///
/// Maps reqwest's error types to our custom error variants for consistent
/// error handling throughout the application.
impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RequestError::Timeout
        } else if err.is_builder() {
            RequestError::BuildError(err.to_string())
        } else if is_tls_failure(&err) {
            RequestError::TlsError(describe(&err))
        } else if err.is_body() || err.is_decode() {
            RequestError::BodyReadError(describe(&err))
        } else {
            RequestError::NetworkError(describe(&err))
        }
    }
}

/// Convert URL parsing errors to RequestError.
impl From<url::ParseError> for RequestError {
    fn from(err: url::ParseError) -> Self {
        RequestError::InvalidUrl(err.to_string())
    }
}

/// Error message including the underlying causes.
///
/// reqwest's top-level message ("error sending request for url ...") hides
/// the actual cause, such as "Connection refused" or a DNS failure.
fn describe(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn is_tls_failure(err: &reqwest::Error) -> bool {
    let message = describe(err);
    message.contains("certificate") || message.contains("TLS") || message.contains("SSL")
}
