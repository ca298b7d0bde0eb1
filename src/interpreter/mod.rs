//! The request-expression interpreter.
//!
//! [`Interpreter`] owns all session state (variables, session headers, the
//! last response body and the debug flag) and evaluates one input line at a
//! time. Nothing short of an exit token ends a session: every failure is
//! turned into output and the previous state is left as it was.

pub mod command;
pub mod help;

pub use command::{classify, Command, Source};

use crate::executor::{execute_request, outgoing_headers, RequestError};
use crate::formatter::format_response;
use crate::models::HttpRequest;
use crate::parser::error::ParseError;
use crate::parser::parse_request_expression;
use crate::variables::{
    apply_captures, is_valid_header_name, is_valid_header_value, parse_mapping,
    referenced_variables, render_value, resolve, substitute_variables, VariableStore,
};
use command::is_plain_name;
use serde_json::Value as JsonValue;
use std::fmt;

/// Outcome of evaluating one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    /// Keep reading; the string is the output to show (possibly empty).
    Continue(String),

    /// An exit token was entered.
    Exit,
}

/// Errors produced while evaluating a line. All of them are displayed and
/// the session continues.
#[derive(Debug)]
pub enum CommandError {
    /// The request expression did not parse.
    Parse(ParseError),

    /// The request could not be completed.
    Request(RequestError),

    /// The left-hand side of an assignment cannot receive this source.
    InvalidTarget { target: String },

    /// `?h name: value` with a name or value HTTP does not allow.
    InvalidHeader { header: String },

    /// The line matched no command shape.
    Unrecognized,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Parse(err) => write!(f, "? {}\n  usage: {}", err, err.usage()),
            CommandError::Request(err) => write!(f, "? could not complete request: {}", err),
            CommandError::InvalidTarget { target } => write!(
                f,
                "? cannot assign to '{}'\n  usage: name = value | name = $.path | {{a, b:c}} = $ | {{a}} = g(path)",
                target
            ),
            CommandError::InvalidHeader { header } => write!(
                f,
                "? invalid header '{}'\n  usage: ?h name: value",
                header
            ),
            CommandError::Unrecognized => write!(f, "?"),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<ParseError> for CommandError {
    fn from(err: ParseError) -> Self {
        CommandError::Parse(err)
    }
}

impl From<RequestError> for CommandError {
    fn from(err: RequestError) -> Self {
        CommandError::Request(err)
    }
}

/// Interpreter state for one session.
pub struct Interpreter {
    base_url: String,
    store: VariableStore,
    last_response: String,
    debug: bool,
    client: reqwest::Client,
    /// Request echo produced before a failure, shown ahead of the error.
    echo: Option<String>,
}

impl Interpreter {
    /// Creates an interpreter for `base_url` starting from `store`.
    ///
    /// `base_url` must already carry a scheme; see
    /// [`crate::executor::resolve_base_url`].
    pub fn new(base_url: impl Into<String>, store: VariableStore, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            store,
            last_response: String::new(),
            debug: false,
            client,
            echo: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn store(&self) -> &VariableStore {
        &self.store
    }

    /// Body of the most recent completed request, empty before the first.
    pub fn last_response(&self) -> &str {
        &self.last_response
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Evaluates one input line.
    ///
    /// # Examples
    ///
    /// ```
    /// use rapid::interpreter::{Flow, Interpreter};
    /// use rapid::variables::VariableStore;
    ///
    /// # async fn example() {
    /// let mut interpreter =
    ///     Interpreter::new("http://localhost:8080", VariableStore::new(), reqwest::Client::new());
    ///
    /// let flow = interpreter.eval_line("name = John").await;
    /// assert_eq!(flow, Flow::Continue("name = John".to_string()));
    /// assert_eq!(interpreter.eval_line("quit").await, Flow::Exit);
    /// # }
    /// ```
    pub async fn eval_line(&mut self, line: &str) -> Flow {
        let result = self.dispatch(classify(line)).await;
        let echo = self.echo.take();

        match result {
            Ok(Flow::Continue(output)) => Flow::Continue(join_output(echo, output)),
            Ok(Flow::Exit) => Flow::Exit,
            Err(err) => {
                log::debug!("command failed: {:?}", err);
                Flow::Continue(join_output(echo, err.to_string()))
            }
        }
    }

    async fn dispatch(&mut self, command: Command) -> Result<Flow, CommandError> {
        let output = match command {
            Command::Empty => String::new(),
            Command::Exit => return Ok(Flow::Exit),
            Command::ToggleDebug => {
                self.debug = !self.debug;
                format!("debug {}", if self.debug { "on" } else { "off" })
            }
            Command::Help => help::HELP_TEXT.trim_matches('\n').to_string(),
            Command::ShowLastResponse => self.last_response.clone(),
            Command::ListVariables => self.list_variables(),
            Command::ListHeaders => self.list_headers(),
            Command::ClearVariables => {
                self.store.clear_variables();
                String::new()
            }
            Command::ClearHeaders => {
                self.store.clear_headers();
                String::new()
            }
            Command::SetHeader { name, value } => {
                if !is_valid_header_name(&name) || !is_valid_header_value(&value) {
                    return Err(CommandError::InvalidHeader {
                        header: format!("{}: {}", name, value),
                    });
                }
                self.store.set_header(&name, value.as_str());
                format!("{}: {}", name.to_lowercase(), value)
            }
            Command::UnsetHeader { name } => {
                self.store.unset_header(&name);
                String::new()
            }
            Command::Unbind { name } => {
                self.store.unset(&name);
                String::new()
            }
            Command::Assign { target, source } => self.assign(&target, source).await?,
            Command::Request(text) => self.run_request(&text).await?,
            Command::Unrecognized => return Err(CommandError::Unrecognized),
        };

        Ok(Flow::Continue(output))
    }

    async fn assign(&mut self, target: &str, source: Source) -> Result<String, CommandError> {
        match source {
            Source::Literal(literal) => {
                require_plain_name(target)?;
                let value = substitute_variables(&literal, &self.store.variables);
                let output = format!("{} = {}", target, value);
                self.store.set(target, JsonValue::String(value));
                Ok(output)
            }
            Source::Path(path) => {
                require_plain_name(target)?;
                match resolve(&self.last_response, &path) {
                    Some(value) => {
                        let output = format!("{} = {}", target, render_value(&value));
                        self.store.set(target, value);
                        Ok(output)
                    }
                    None => {
                        log::debug!("'{}' not found in last response", path);
                        Ok(String::new())
                    }
                }
            }
            Source::LastResponse => {
                let directives = parse_mapping(target);
                if directives.is_empty() {
                    return Err(invalid_target(target));
                }
                let bound = apply_captures(&directives, &self.last_response, &mut self.store);
                Ok(render_bindings(&bound))
            }
            Source::Request(text) => {
                let directives = parse_mapping(target);
                if directives.is_empty() {
                    return Err(invalid_target(target));
                }
                let shown = self.run_request(&text).await?;
                let bound = apply_captures(&directives, &self.last_response, &mut self.store);
                Ok(join_output(Some(shown), render_bindings(&bound)))
            }
        }
    }

    /// Parses, resolves and sends a request expression, keeping its body as
    /// the last response.
    async fn run_request(&mut self, text: &str) -> Result<String, CommandError> {
        let expr = parse_request_expression(text)?;
        let request = expr.resolve(&self.base_url, &self.store)?;

        if self.debug {
            self.echo = Some(self.render_echo(&request));
        }

        let response = execute_request(&request, &self.store, &self.client).await?;
        self.last_response = response.body.clone();

        Ok(format_response(&response, self.debug))
    }

    fn render_echo(&self, request: &HttpRequest) -> String {
        let mut lines = vec![format!("→ {} {}", request.method, request.url)];

        let headers = outgoing_headers(request, &self.store);
        let mut names: Vec<_> = headers.keys().collect();
        names.sort();
        for name in names {
            lines.push(format!("  {}: {}", name, headers[name]));
        }

        if request.has_body() {
            lines.push(request.body_str().to_string());
        }

        let mut unbound = referenced_variables(&request.url);
        unbound.extend(referenced_variables(request.body_str()));
        for value in headers.values() {
            unbound.extend(referenced_variables(value));
        }
        unbound.sort();
        unbound.dedup();
        if !unbound.is_empty() {
            lines.push(format!("  unbound: {}", unbound.join(", ")));
        }

        lines.join("\n")
    }

    fn list_variables(&self) -> String {
        let entries = self.store.sorted_variables();
        if entries.is_empty() {
            return "(no variables)".to_string();
        }
        entries
            .iter()
            .map(|(name, value)| format!("{} = {}", name, render_value(value)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn list_headers(&self) -> String {
        let entries = self.store.sorted_headers();
        if entries.is_empty() {
            return "(no headers)".to_string();
        }
        entries
            .iter()
            .map(|(name, value)| format!("{}: {}", name, value))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn require_plain_name(target: &str) -> Result<(), CommandError> {
    if is_plain_name(target) {
        Ok(())
    } else {
        Err(invalid_target(target))
    }
}

fn invalid_target(target: &str) -> CommandError {
    CommandError::InvalidTarget {
        target: target.to_string(),
    }
}

fn render_bindings(bound: &[(String, JsonValue)]) -> String {
    bound
        .iter()
        .map(|(name, value)| format!("{} = {}", name, render_value(value)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn join_output(first: Option<String>, second: String) -> String {
    match first {
        Some(first) if second.is_empty() => first,
        Some(first) if first.is_empty() => second,
        Some(first) => format!("{}\n{}", first, second),
        None => second,
    }
}
