//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::domain::errors::StoreError;
use async_trait::async_trait;

/// The Link Store port.
///
/// Implementations must enforce uniqueness of `code` themselves (the insert
/// is the authoritative guard) and increment visits atomically.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteLinkRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Finds a link by its short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] on database errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, StoreError>;

    /// Finds the earliest auto-generated link for a target URL.
    ///
    /// Links created with a custom code are never returned.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] on database errors.
    async fn find_by_target(&self, target: &str) -> Result<Option<Link>, StoreError>;

    /// Inserts a new link.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UniqueViolation`] if the code already exists.
    /// Returns [`StoreError::Unavailable`] on database errors.
    async fn insert(&self, new_link: NewLink) -> Result<Link, StoreError>;

    /// Increments the visit counter of a link by one, atomically.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no link has this code.
    /// Returns [`StoreError::Unavailable`] on database errors.
    async fn increment_visits(&self, code: &str) -> Result<(), StoreError>;

    /// Lists the most recently created links, newest first.
    async fn list_recent(&self, limit: i64) -> Result<Vec<Link>, StoreError>;

    /// Counts all stored links.
    async fn count(&self) -> Result<i64, StoreError>;

    /// Checks that the store answers queries.
    async fn ping(&self) -> Result<(), StoreError>;
}
