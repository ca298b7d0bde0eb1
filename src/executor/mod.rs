//! HTTP request executor.
//!
//! Sends resolved [`HttpRequest`]s over a shared `reqwest` client and
//! normalizes what comes back into an [`HttpResponse`]. The executor only
//! returns the response; keeping it as the last response and printing it is
//! up to the interpreter.
//!
//! Also home to base-URL scheme detection, which needs the network.

pub mod config;
pub mod error;

pub use config::ExecutionConfig;
pub use error::RequestError;

use crate::formatter::normalize_body;
use crate::models::request::{HttpMethod, HttpRequest};
use crate::models::response::HttpResponse;
use crate::variables::VariableStore;
use std::collections::HashMap;
use std::time::Instant;

/// Executes an HTTP request.
///
/// When `$$auth` is bound and the request carries no `authorization` header
/// of its own, a bearer `Authorization` header is added. A `Content-Type`
/// header is sent only with a body, and only when the request does not set
/// one explicitly.
///
/// # Arguments
///
/// * `request` - The resolved request to send
/// * `store` - Variable store consulted for `$$auth`
/// * `client` - Client built from [`ExecutionConfig::build_client`]
///
/// # Returns
///
/// The normalized response for any status code, or a [`RequestError`] when
/// the request could not be completed.
///
/// # Examples
///
/// ```no_run
/// use rapid::executor::{execute_request, ExecutionConfig};
/// use rapid::models::{HttpMethod, HttpRequest};
/// use rapid::variables::VariableStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ExecutionConfig::default().build_client()?;
/// let request = HttpRequest::new(HttpMethod::GET, "https://httpbin.org/get".to_string());
/// let response = execute_request(&request, &VariableStore::new(), &client).await?;
/// println!("{}", response.status_code);
/// # Ok(())
/// # }
/// ```
pub async fn execute_request(
    request: &HttpRequest,
    store: &VariableStore,
    client: &reqwest::Client,
) -> Result<HttpResponse, RequestError> {
    validate_url(&request.url)?;

    let headers = outgoing_headers(request, store);
    let mut builder = client.request(to_reqwest_method(request.method), &request.url);
    for (name, value) in &headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    if let Some(body) = &request.body {
        builder = builder.body(body.content.clone());
    }

    log::debug!("{} {}", request.method, request.url);
    let start_time = Instant::now();

    let response = builder.send().await?;

    let status = response.status();
    let status_code = status.as_u16();
    let status_text = status.canonical_reason().unwrap_or("Unknown").to_string();

    let mut response_headers = HashMap::new();
    for (name, value) in response.headers() {
        if let Ok(value_str) = value.to_str() {
            response_headers.insert(name.as_str().to_string(), value_str.to_string());
        }
    }

    let raw = response
        .bytes()
        .await
        .map_err(|e| RequestError::BodyReadError(e.to_string()))?;
    let duration = start_time.elapsed();

    let body = normalize_body(&raw);
    log::debug!(
        "{} {} -> {} in {}ms ({} bytes)",
        request.method,
        request.url,
        status_code,
        duration.as_millis(),
        raw.len()
    );

    Ok(HttpResponse {
        status_code,
        status_text,
        headers: response_headers,
        body,
        duration,
    })
}

/// Final header set for a request: its own headers plus the implicit
/// bearer and content-type headers.
pub fn outgoing_headers(request: &HttpRequest, store: &VariableStore) -> HashMap<String, String> {
    let mut headers = request.headers.clone();

    if let Some(token) = store.auth_token() {
        headers
            .entry("authorization".to_string())
            .or_insert_with(|| format!("Bearer {}", token));
    }

    if let Some(mime) = request.content_type() {
        headers
            .entry("content-type".to_string())
            .or_insert_with(|| mime.to_string());
    }

    headers
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::GET => reqwest::Method::GET,
        HttpMethod::POST => reqwest::Method::POST,
        HttpMethod::PUT => reqwest::Method::PUT,
        HttpMethod::PATCH => reqwest::Method::PATCH,
        HttpMethod::DELETE => reqwest::Method::DELETE,
    }
}

/// Validates that a URL parses and uses HTTP or HTTPS.
pub fn validate_url(raw: &str) -> Result<url::Url, RequestError> {
    let parsed =
        url::Url::parse(raw).map_err(|e| RequestError::InvalidUrl(format!("{}: {}", raw, e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(RequestError::UnsupportedProtocol(other.to_string())),
    }
}

/// Resolves the base URL given on the command line.
///
/// A URL with an explicit scheme is validated and used as given. Without a
/// scheme, `probe` decides: with a probe client, `HEAD https://<base>` is
/// tried and any response at all selects HTTPS, while a failure falls back
/// to HTTP. Without a probe client HTTP is assumed.
///
/// Trailing slashes are stripped from the result.
pub async fn resolve_base_url(
    raw: &str,
    probe: Option<&reqwest::Client>,
) -> Result<String, RequestError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(RequestError::InvalidUrl("empty base URL".to_string()));
    }

    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        let host = trimmed.trim_start_matches('/');
        match probe {
            Some(client) => {
                let https = format!("https://{}", host);
                match client.head(&https).send().await {
                    Ok(_) => {
                        log::info!("{} answered over https", host);
                        https
                    }
                    Err(e) => {
                        log::info!("https probe for {} failed ({}), using http", host, e);
                        format!("http://{}", host)
                    }
                }
            }
            None => format!("http://{}", host),
        }
    };

    validate_url(&candidate)?;
    Ok(candidate.trim_end_matches('/').to_string())
}
