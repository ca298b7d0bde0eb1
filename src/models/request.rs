//! HTTP request data models.
//!
//! This module defines the request descriptor produced by the parser: the
//! method, the fully resolved URL, the merged header map and the optional
//! encoded body.

use std::collections::HashMap;

/// HTTP request method.
///
/// Only the five verbs reachable from the command shorthands exist; there is
/// no way to issue a custom verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// `g(...)`
    GET,
    /// `p(...)`
    POST,
    /// `pu(...)`
    PUT,
    /// `pa(...)`
    PATCH,
    /// `d(...)`
    DELETE,
}

impl HttpMethod {
    /// Returns the string representation of the HTTP method.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::DELETE => "DELETE",
        }
    }

    /// Maps a command verb (`g`, `p`, `pu`, `pa`, `d`) to its method.
    ///
    /// # Returns
    ///
    /// `Some(HttpMethod)` for a recognized verb, `None` otherwise.
    pub fn from_verb(verb: &str) -> Option<Self> {
        match verb {
            "g" => Some(HttpMethod::GET),
            "p" => Some(HttpMethod::POST),
            "pu" => Some(HttpMethod::PUT),
            "pa" => Some(HttpMethod::PATCH),
            "d" => Some(HttpMethod::DELETE),
            _ => None,
        }
    }

    /// Returns the command verb for this method.
    pub fn verb(&self) -> &'static str {
        match self {
            HttpMethod::GET => "g",
            HttpMethod::POST => "p",
            HttpMethod::PUT => "pu",
            HttpMethod::PATCH => "pa",
            HttpMethod::DELETE => "d",
        }
    }

    /// Whether requests with this method carry a body clause.
    ///
    /// GET and DELETE never do; POST, PUT and PATCH always require one.
    pub fn takes_body(&self) -> bool {
        matches!(self, HttpMethod::POST | HttpMethod::PUT | HttpMethod::PATCH)
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Content type of an encoded request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyContentType {
    /// Condensed-object bodies re-serialized as JSON.
    Json,
    /// `?key=value&...` bodies.
    FormUrlEncoded,
    /// Quoted string bodies.
    Text,
}

impl BodyContentType {
    /// Returns the MIME type sent in the `Content-Type` header.
    pub fn mime(&self) -> &'static str {
        match self {
            BodyContentType::Json => "application/json",
            BodyContentType::FormUrlEncoded => "application/x-www-form-urlencoded",
            BodyContentType::Text => "text/plain",
        }
    }
}

impl std::fmt::Display for BodyContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mime())
    }
}

/// An encoded request body together with its content type.
///
/// Pairing the two keeps the content type present exactly when a body is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBody {
    /// Encoded payload, never empty.
    pub content: String,

    /// How `content` is encoded.
    pub content_type: BodyContentType,
}

impl RequestBody {
    /// Creates a body, returning `None` for an empty payload.
    pub fn new(content: String, content_type: BodyContentType) -> Option<Self> {
        if content.is_empty() {
            None
        } else {
            Some(Self {
                content,
                content_type,
            })
        }
    }
}

/// A fully resolved HTTP request, ready for the executor.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: HttpMethod,

    /// Absolute target URL (base URL joined with the normalized path).
    pub url: String,

    /// Merged request headers.
    ///
    /// Keys are lower-cased. Session headers come first and are overridden
    /// by inline per-request headers of the same name.
    pub headers: HashMap<String, String>,

    /// Optional body; always `None` for GET and DELETE.
    pub body: Option<RequestBody>,
}

impl HttpRequest {
    /// Creates a new request without headers or body.
    pub fn new(method: HttpMethod, url: String) -> Self {
        Self {
            method,
            url,
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Adds a header, lower-casing its name.
    pub fn add_header(&mut self, name: &str, value: String) {
        self.headers.insert(name.to_lowercase(), value);
    }

    /// Checks if the request has a body.
    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    /// Gets the MIME type of the body, if any.
    pub fn content_type(&self) -> Option<&'static str> {
        self.body.as_ref().map(|b| b.content_type.mime())
    }

    /// Gets the body payload, or an empty string when there is none.
    pub fn body_str(&self) -> &str {
        self.body.as_ref().map_or("", |b| b.content.as_str())
    }
}
