//! REST API layer for HTTP request/response handling.
//!
//! - [`dto`] - Request/response bodies
//! - [`extractors`] - Request extractors with service-style rejections
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request processing middleware
//! - [`routes`] - Route configuration

pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routes;
