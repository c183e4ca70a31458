//! Core domain entities.
//!
//! - [`Link`] - A stored short-code-to-URL mapping with click counters
//! - [`NewLink`] - Input for inserting a new link

pub mod link;

pub use link::{Link, NewLink};
