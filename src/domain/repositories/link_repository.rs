//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing short links.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link with `clicks = 0` and no `last_clicked`.
    ///
    /// The insert is a single statement; uniqueness of `code` is enforced by
    /// the store, not checked beforehand.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the code is already taken.
    /// Returns [`AppError::Database`] on any other database error.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on database errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Lists every link, newest first.
    async fn list(&self) -> Result<Vec<Link>, AppError>;

    /// Removes a link.
    ///
    /// Returns `Ok(true)` if a row was removed, `Ok(false)` if none matched.
    async fn delete(&self, code: &str) -> Result<bool, AppError>;

    /// Atomically increments `clicks`, bumps `last_clicked` and returns the
    /// target URL.
    ///
    /// Returns `Ok(None)` when no link has this code; nothing is written in
    /// that case.
    async fn record_click(&self, code: &str) -> Result<Option<String>, AppError>;

    /// Round-trips to the store to confirm it is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
