//! HTTP middleware for request processing.
//!
//! - [`tracing`] - Request/response logging
//! - [`timeout`] - Per-request time limit

pub mod timeout;
pub mod tracing;
