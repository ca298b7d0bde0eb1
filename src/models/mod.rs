//! Data models for HTTP requests and responses.
//!
//! This module contains the core data structures passed between the parser,
//! the executor and the interpreter: the resolved request descriptor and the
//! normalized response.

pub mod request;
pub mod response;

pub use request::{BodyContentType, HttpMethod, HttpRequest, RequestBody};
pub use response::HttpResponse;
