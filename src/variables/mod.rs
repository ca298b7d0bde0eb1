//! Variables module for RAPID
//!
//! This module holds the interpreter's variable store and the three operations
//! that move values in and out of it: interpolation into request text,
//! path-value extraction from responses, and extraction-mapping parsing.

pub mod capture;
pub mod extract;
pub mod store;
pub mod substitution;

pub use capture::{apply_captures, parse_mapping, CaptureDirective};
pub use extract::{resolve, resolve_value};
pub use store::{
    is_valid_header_name, is_valid_header_value, render_value, VariableStore, AUTH_VARIABLE,
};
pub use substitution::{referenced_variables, substitute_variables};
