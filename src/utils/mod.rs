//! Utility functions for code generation and request handling.
//!
//! - [`code_generator`] - Short code generation and validation
//! - [`public_base`] - Public base URL resolution from HTTP headers

pub mod code_generator;
pub mod public_base;
