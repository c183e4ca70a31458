//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx
//! prepared statements.

pub mod pg_link_repository;

pub use pg_link_repository::PgLinkRepository;
