//! Request-expression parser.
//!
//! Turns one line such as `p(/users {name:Bob} <x-trace:1>)` into a
//! structured request. Parsing happens in two steps:
//!
//! 1. [`parse_request_expression`] is purely syntactic. It splits off the
//!    verb, checks the parentheses and strips inline `<name:value>` headers.
//! 2. [`RequestExpr::resolve`] interpolates variables into the remaining
//!    argument, then splits it into path and body clause, joins the path
//!    onto the base URL and encodes the body according to its form. Header
//!    values are interpolated separately, when headers are merged.
//!
//! Interpolating before the split lets a single variable carry a whole
//! `path body` argument.

pub mod condensed;
pub mod error;

use crate::models::{BodyContentType, HttpMethod, HttpRequest, RequestBody};
use crate::variables::{is_valid_header_name, substitute_variables, VariableStore};
use error::ParseError;
use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// Verbs that open a request expression, longest first so `pu(` is not
/// mistaken for `p(`.
const VERBS: &[&str] = &["pu", "pa", "g", "p", "d"];

/// A syntactically valid request expression, not yet interpolated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestExpr {
    /// Method selected by the verb.
    pub method: HttpMethod,

    /// Argument with inline headers removed: `path[ body]`, still raw.
    pub argument: String,

    /// Inline headers in order of appearance, names lower-cased, values raw.
    pub headers: Vec<(String, String)>,
}

/// Checks whether `input` has the shape of a request expression: a known
/// verb immediately followed by `(`.
///
/// # Examples
///
/// ```
/// use rapid::parser::is_request_expression;
///
/// assert!(is_request_expression("g(users)"));
/// assert!(is_request_expression("pu(users/1 {a:b})"));
/// assert!(!is_request_expression("get(users)"));
/// assert!(!is_request_expression("name = John"));
/// ```
pub fn is_request_expression(input: &str) -> bool {
    let input = input.trim_start();
    VERBS.iter().any(|verb| {
        input
            .strip_prefix(verb)
            .is_some_and(|rest| rest.starts_with('('))
    })
}

/// Parses a request expression into its syntactic parts.
///
/// # Arguments
///
/// * `input` - One trimmed line of input, e.g. `g(users/1)`
///
/// # Returns
///
/// A `RequestExpr` on success, or a `ParseError` for an unknown verb,
/// unbalanced parentheses or a malformed inline header. Path and body
/// checks happen in [`RequestExpr::split`], after interpolation.
///
/// # Examples
///
/// ```
/// use rapid::parser::parse_request_expression;
/// use rapid::models::HttpMethod;
///
/// let expr = parse_request_expression("p(/users {name:Bob} <X-Trace:1>)").unwrap();
/// assert_eq!(expr.method, HttpMethod::POST);
/// assert_eq!(expr.argument, "/users {name:Bob}");
/// assert_eq!(expr.headers, vec![("x-trace".to_string(), "1".to_string())]);
/// ```
pub fn parse_request_expression(input: &str) -> Result<RequestExpr, ParseError> {
    let input = input.trim();

    let verb_len = input
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(input.len());
    let verb = &input[..verb_len];
    let method = HttpMethod::from_verb(verb).ok_or_else(|| ParseError::UnknownVerb {
        verb: verb.to_string(),
    })?;

    let argument = input[verb_len..]
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .filter(|argument| parens_balanced(argument))
        .ok_or_else(|| ParseError::UnbalancedParens {
            input: input.to_string(),
        })?;

    let (remaining, headers) = extract_inline_headers(argument)?;

    Ok(RequestExpr {
        method,
        argument: remaining.trim().to_string(),
        headers,
    })
}

impl RequestExpr {
    /// Interpolates the argument, then splits it at the first whitespace
    /// into the path and the body clause.
    ///
    /// # Returns
    ///
    /// `(path, body)` where `body` is present exactly for POST/PUT/PATCH.
    pub fn split(
        &self,
        variables: &HashMap<String, JsonValue>,
    ) -> Result<(String, Option<String>), ParseError> {
        let argument = substitute_variables(&self.argument, variables);
        let argument = argument.trim();
        let method = self.method;

        let (path, body) = match argument.split_once(char::is_whitespace) {
            Some((path, body)) => (path, body.trim()),
            None => (argument, ""),
        };

        if path.is_empty() {
            return Err(ParseError::MissingPath { method });
        }

        let body = match (method.takes_body(), body.is_empty()) {
            (true, true) => return Err(ParseError::MissingBody { method }),
            (true, false) => Some(body.to_string()),
            (false, true) => None,
            (false, false) => {
                return Err(ParseError::UnexpectedBody {
                    method,
                    body: body.to_string(),
                })
            }
        };

        Ok((path.to_string(), body))
    }

    /// Resolves the expression against the base URL and current state.
    ///
    /// Session headers are merged first and inline headers override them;
    /// header values are interpolated as they are merged.
    pub fn resolve(&self, base_url: &str, store: &VariableStore) -> Result<HttpRequest, ParseError> {
        let (path, body) = self.split(&store.variables)?;
        let mut request = HttpRequest::new(self.method, build_url(base_url, &path));

        for (name, value) in &store.headers {
            request.add_header(name, substitute_variables(value, &store.variables));
        }
        for (name, value) in &self.headers {
            request.add_header(name, substitute_variables(value, &store.variables));
        }

        if let Some(clause) = body {
            request.body = Some(encode_body(self.method, &clause)?);
        }

        Ok(request)
    }
}

/// Joins a request path onto the base URL.
///
/// - `http://...` / `https://...` paths are already absolute and used as-is.
/// - `//host/...` is scheme-relative and becomes `https://host/...`.
/// - Anything else is joined with exactly one `/` between base and path.
///
/// # Examples
///
/// ```
/// use rapid::parser::build_url;
///
/// assert_eq!(build_url("https://api.test/", "/users"), "https://api.test/users");
/// assert_eq!(build_url("https://api.test", "users"), "https://api.test/users");
/// assert_eq!(build_url("https://api.test", "//cdn.test/a"), "https://cdn.test/a");
/// ```
pub fn build_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    if path.starts_with("//") {
        return format!("https:{}", path);
    }

    let base = base_url.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

/// Encodes an interpolated body clause according to its form.
///
/// - `?k=v&...` becomes a URL-encoded form
/// - `"..."` becomes the unquoted text
/// - `{k:v,...}` becomes canonical JSON
///
/// Any other clause, or one that encodes to an empty payload, is an error.
pub fn encode_body(method: HttpMethod, clause: &str) -> Result<RequestBody, ParseError> {
    let clause = clause.trim();
    let invalid = || ParseError::InvalidBody {
        method,
        body: clause.to_string(),
    };

    let (content, content_type) = if let Some(form) = clause.strip_prefix('?') {
        (encode_form(form), BodyContentType::FormUrlEncoded)
    } else if clause.len() >= 2 && clause.starts_with('"') && clause.ends_with('"') {
        (clause[1..clause.len() - 1].to_string(), BodyContentType::Text)
    } else if clause.starts_with('{') {
        let json = condensed::condensed_to_json(clause).ok_or_else(invalid)?;
        (json, BodyContentType::Json)
    } else {
        return Err(invalid());
    };

    RequestBody::new(content, content_type).ok_or_else(invalid)
}

/// Percent-encodes `k=v&k2=v2` pairs into a form body.
fn encode_form(pairs: &str) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for pair in pairs.split('&').filter(|pair| !pair.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

/// Strips `<name:value>` clauses from the argument.
///
/// A `<...>` without a colon, or without a closing `>`, is left in place as
/// ordinary text. Text inside double quotes is never scanned.
fn extract_inline_headers(argument: &str) -> Result<(String, Vec<(String, String)>), ParseError> {
    let mut remaining = String::with_capacity(argument.len());
    let mut headers = Vec::new();
    let mut in_quotes = false;
    let mut rest = argument;

    while let Some(ch) = rest.chars().next() {
        if ch == '"' {
            in_quotes = !in_quotes;
        }

        if ch == '<' && !in_quotes {
            if let Some(end) = rest.find('>') {
                let clause = &rest[1..end];
                if let Some((name, value)) = clause.split_once(':') {
                    let name = name.trim();
                    if !is_valid_header_name(name) {
                        return Err(ParseError::InvalidHeader {
                            header: rest[..=end].to_string(),
                        });
                    }
                    headers.push((name.to_lowercase(), value.trim().to_string()));
                    remaining.push(' ');
                    rest = &rest[end + 1..];
                    continue;
                }
            }
        }

        remaining.push(ch);
        rest = &rest[ch.len_utf8()..];
    }

    Ok((remaining, headers))
}

/// Checks that parentheses outside double quotes are balanced.
fn parens_balanced(text: &str) -> bool {
    let mut depth = 0i32;
    let mut in_quotes = false;

    for ch in text.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            '(' if !in_quotes => depth += 1,
            ')' if !in_quotes => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }

    depth == 0
}
