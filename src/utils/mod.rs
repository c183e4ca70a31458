//! Helper functions used across the application.
//!
//! - [`code_generator`] - Short code generation and validation
//! - [`url_validator`] - Target URL validation
//! - [`base_url`] - Base URL resolution for short links

pub mod base_url;
pub mod code_generator;
pub mod url_validator;
