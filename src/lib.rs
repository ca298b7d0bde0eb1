//! RAPID: Rapid API Dialogue
//!
//! An interactive shell for exploring HTTP APIs. Each input line is a terse
//! command that either manipulates session state or sends a request against
//! a base URL:
//!
//! ```text
//! > ?h accept: application/json
//! > {token:$$auth} = p(login {user:ann,password:pw})
//! > g(users/${id})
//! > {id, email} = $
//! ```
//!
//! # Architecture
//!
//! - **models**: resolved request descriptor and normalized response
//! - **parser**: request expressions (`g(path)`, `p(path body)`, ...) and
//!   the condensed `{k:v}` body syntax
//! - **variables**: the variable store, `${name}` interpolation, path
//!   extraction and extraction mappings
//! - **executor**: sends requests with `reqwest` and detects the base URL
//!   scheme
//! - **formatter**: canonical JSON pretty printing and status lines
//! - **interpreter**: line classification and dispatch over the session
//!   state
//! - **repl**: the line-reading loops
//! - **session**: the `.rapid.json` session file
//! - **config**: user settings

pub mod config;
pub mod executor;
pub mod formatter;
pub mod interpreter;
pub mod models;
pub mod parser;
pub mod repl;
pub mod session;
pub mod variables;
