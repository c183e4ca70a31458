//! Application layer services implementing business logic.
//!
//! Services validate input, coordinate repository calls and turn missing
//! records into domain errors. HTTP handlers and the admin CLI both go
//! through them.
//!
//! - [`services::link_service::LinkService`] - Link creation, lookup, deletion and redirects

pub mod services;
