//! Error types for request-expression parsing.
//!
//! Every variant is recoverable: the interpreter shows it as a short `?`
//! marker with a usage hint and keeps running.

use crate::models::HttpMethod;
use std::fmt;

/// Errors that can occur while parsing a request expression such as
/// `p(/users {name:Bob})`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The verb before `(` is not one of `g`, `p`, `pu`, `pa`, `d`.
    UnknownVerb {
        /// The verb that was encountered
        verb: String,
    },

    /// Missing `(`, missing trailing `)`, or unbalanced parentheses inside
    /// the argument.
    UnbalancedParens {
        /// The full expression
        input: String,
    },

    /// The argument has no path token.
    MissingPath {
        /// Method of the expression
        method: HttpMethod,
    },

    /// POST/PUT/PATCH without a body clause.
    MissingBody {
        /// Method of the expression
        method: HttpMethod,
    },

    /// GET/DELETE given a body clause.
    UnexpectedBody {
        /// Method of the expression
        method: HttpMethod,
        /// The rejected clause
        body: String,
    },

    /// A body clause that is none of the recognized forms, or encodes to an
    /// empty payload.
    InvalidBody {
        /// Method of the expression
        method: HttpMethod,
        /// The rejected clause (after interpolation)
        body: String,
    },

    /// An inline `<name:value>` header whose name is not a legal header name.
    InvalidHeader {
        /// The header clause as written
        header: String,
    },
}

impl ParseError {
    /// Usage hint for the command that failed to parse.
    pub fn usage(&self) -> String {
        match self {
            ParseError::UnknownVerb { .. } | ParseError::UnbalancedParens { .. } => {
                "g(path) | d(path) | p(path body) | pu(path body) | pa(path body)".to_string()
            }
            ParseError::MissingPath { method } | ParseError::UnexpectedBody { method, .. } => {
                method_usage(*method)
            }
            ParseError::MissingBody { method } | ParseError::InvalidBody { method, .. } => {
                format!(
                    "{}  where body is {{key:value,...}} | ?key=value&... | \"text\"",
                    method_usage(*method)
                )
            }
            ParseError::InvalidHeader { .. } => "<name:value> inside the parentheses".to_string(),
        }
    }
}

fn method_usage(method: HttpMethod) -> String {
    if method.takes_body() {
        format!("{}(path body)", method.verb())
    } else {
        format!("{}(path)", method.verb())
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnknownVerb { verb } => write!(f, "Unknown request verb '{}'", verb),
            ParseError::UnbalancedParens { input } => {
                write!(f, "Malformed parentheses in '{}'", input)
            }
            ParseError::MissingPath { method } => write!(f, "Missing path for {}", method),
            ParseError::MissingBody { method } => write!(f, "{} requires a body", method),
            ParseError::UnexpectedBody { method, body } => {
                write!(f, "{} does not take a body (got '{}')", method, body)
            }
            ParseError::InvalidBody { method, body } => {
                write!(f, "Unrecognized {} body '{}'", method, body)
            }
            ParseError::InvalidHeader { header } => {
                write!(f, "Invalid inline header '{}'", header)
            }
        }
    }
}

impl std::error::Error for ParseError {}
