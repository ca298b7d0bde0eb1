//! Line classification.
//!
//! Several command shapes overlap (`x = g(y)` is both an assignment and,
//! after the `=`, a request), so [`classify`] tries them in a fixed order
//! and the first match wins:
//!
//! 1. exit tokens
//! 2. `?d`
//! 3. `?`
//! 4. `$`
//! 5. `?v`, `?h`, `?vc`, `?hc`
//! 6. `?h name: value` / `?h name`
//! 7. `name=`
//! 8. `target = source`
//! 9. request expressions
//! 10. anything else is unrecognized

use crate::parser::is_request_expression;

/// Tokens that end the session.
pub const EXIT_TOKENS: &[&str] = &["exit", "quit", "q", "x"];

/// Right-hand side of an assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// `$`: extract from the last response using the target as a mapping.
    LastResponse,

    /// `$.path`: extract a single value from the last response.
    Path(String),

    /// A request expression: execute it, then extract from its response
    /// using the target as a mapping.
    Request(String),

    /// Anything else, stored as an interpolated string.
    Literal(String),
}

/// A classified input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Blank line.
    Empty,
    Exit,
    ToggleDebug,
    Help,
    ShowLastResponse,
    ListVariables,
    ListHeaders,
    ClearVariables,
    ClearHeaders,
    SetHeader { name: String, value: String },
    UnsetHeader { name: String },
    /// `name=` with nothing on the right.
    Unbind { name: String },
    Assign { target: String, source: Source },
    Request(String),
    Unrecognized,
}

/// Classifies one line of input.
///
/// # Examples
///
/// ```
/// use rapid::interpreter::command::{classify, Command, Source};
///
/// assert_eq!(classify("q"), Command::Exit);
/// assert_eq!(
///     classify("x = g(y)"),
///     Command::Assign { target: "x".to_string(), source: Source::Request("g(y)".to_string()) }
/// );
/// assert_eq!(classify("token="), Command::Unbind { name: "token".to_string() });
/// ```
pub fn classify(line: &str) -> Command {
    let line = line.trim();

    if line.is_empty() {
        return Command::Empty;
    }
    if EXIT_TOKENS.contains(&line) {
        return Command::Exit;
    }

    match line {
        "?d" => return Command::ToggleDebug,
        "?" => return Command::Help,
        "$" => return Command::ShowLastResponse,
        "?v" => return Command::ListVariables,
        "?h" => return Command::ListHeaders,
        "?vc" => return Command::ClearVariables,
        "?hc" => return Command::ClearHeaders,
        _ => {}
    }

    if let Some(rest) = line.strip_prefix("?h ") {
        return classify_header(rest.trim());
    }

    if let Some(name) = line.strip_suffix('=') {
        let name = name.trim_end();
        if is_plain_name(name) {
            return Command::Unbind {
                name: name.to_string(),
            };
        }
    }

    if let Some((target, source)) = line.split_once(" = ") {
        return Command::Assign {
            target: target.trim().to_string(),
            source: classify_source(source.trim()),
        };
    }

    if is_request_expression(line) {
        return Command::Request(line.to_string());
    }

    Command::Unrecognized
}

fn classify_header(rest: &str) -> Command {
    match rest.split_once(':') {
        Some((name, value)) if !name.trim().is_empty() => Command::SetHeader {
            name: name.trim().to_string(),
            value: value.trim().to_string(),
        },
        Some(_) => Command::Unrecognized,
        None => Command::UnsetHeader {
            name: rest.to_string(),
        },
    }
}

fn classify_source(source: &str) -> Source {
    if source == "$" {
        Source::LastResponse
    } else if source.starts_with("$.") || source.starts_with("$[") {
        Source::Path(source.to_string())
    } else if is_request_expression(source) {
        Source::Request(source.to_string())
    } else {
        Source::Literal(source.to_string())
    }
}

/// Whether `name` can be bound directly: non-empty, no whitespace, and none
/// of the characters that start other command shapes.
pub fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('?')
        && !name
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '(' | ')' | '{' | '}' | '=' | ','))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_exit_tokens() {
        for token in ["exit", "quit", "q", "x", "  q  "] {
            assert_eq!(classify(token), Command::Exit);
        }
        assert_eq!(classify("exit now"), Command::Unrecognized);
    }

    #[test]
    fn test_classify_metacommands() {
        assert_eq!(classify("?d"), Command::ToggleDebug);
        assert_eq!(classify("?"), Command::Help);
        assert_eq!(classify("$"), Command::ShowLastResponse);
        assert_eq!(classify("?v"), Command::ListVariables);
        assert_eq!(classify("?h"), Command::ListHeaders);
        assert_eq!(classify("?vc"), Command::ClearVariables);
        assert_eq!(classify("?hc"), Command::ClearHeaders);
        assert_eq!(classify(""), Command::Empty);
        assert_eq!(classify("   "), Command::Empty);
    }

    #[test]
    fn test_classify_header_commands() {
        assert_eq!(
            classify("?h auth: secret"),
            Command::SetHeader {
                name: "auth".to_string(),
                value: "secret".to_string()
            }
        );
        assert_eq!(
            classify("?h Accept: application/json; q=1"),
            Command::SetHeader {
                name: "Accept".to_string(),
                value: "application/json; q=1".to_string()
            }
        );
        assert_eq!(
            classify("?h auth"),
            Command::UnsetHeader {
                name: "auth".to_string()
            }
        );
        assert_eq!(classify("?h : x"), Command::Unrecognized);
    }

    #[test]
    fn test_classify_unbind() {
        assert_eq!(
            classify("name="),
            Command::Unbind {
                name: "name".to_string()
            }
        );
        assert_eq!(
            classify("name ="),
            Command::Unbind {
                name: "name".to_string()
            }
        );
        assert_eq!(
            classify("$$auth="),
            Command::Unbind {
                name: "$$auth".to_string()
            }
        );
        assert_eq!(classify("{a,b}="), Command::Unrecognized);
    }

    #[test]
    fn test_classify_assignment_sources() {
        assert_eq!(
            classify("name = John"),
            Command::Assign {
                target: "name".to_string(),
                source: Source::Literal("John".to_string())
            }
        );
        assert_eq!(
            classify("{id, email} = $"),
            Command::Assign {
                target: "{id, email}".to_string(),
                source: Source::LastResponse
            }
        );
        assert_eq!(
            classify("first = $.items.0.id"),
            Command::Assign {
                target: "first".to_string(),
                source: Source::Path("$.items.0.id".to_string())
            }
        );
        assert_eq!(
            classify("{id} = p(/users {name:Bob})"),
            Command::Assign {
                target: "{id}".to_string(),
                source: Source::Request("p(/users {name:Bob})".to_string())
            }
        );
    }

    #[test]
    fn test_assignment_wins_over_request() {
        assert_eq!(
            classify("x = g(y)"),
            Command::Assign {
                target: "x".to_string(),
                source: Source::Request("g(y)".to_string())
            }
        );
    }

    #[test]
    fn test_classify_request() {
        assert_eq!(
            classify("g(users)"),
            Command::Request("g(users)".to_string())
        );
        assert_eq!(
            classify("p(users"),
            Command::Request("p(users".to_string())
        );
        assert_eq!(classify("get(users)"), Command::Unrecognized);
        assert_eq!(classify("hello"), Command::Unrecognized);
    }

    #[test]
    fn test_is_plain_name() {
        assert!(is_plain_name("userId"));
        assert!(is_plain_name("$$auth"));
        assert!(!is_plain_name(""));
        assert!(!is_plain_name("a b"));
        assert!(!is_plain_name("{a}"));
        assert!(!is_plain_name("?v"));
        assert!(!is_plain_name("g(x)"));
    }
}
