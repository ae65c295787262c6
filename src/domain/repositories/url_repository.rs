//! Repository trait for URL record storage.

use crate::error::AppError;
use async_trait::async_trait;

/// Store contract for URL records.
///
/// The store is the only authority for durable state and serializes concurrent
/// writes to the same row itself.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Inserts a record with no short code and returns the store-assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Dependency`] on database errors.
    async fn create_url(&self, original_url: &str) -> Result<i64, AppError>;

    /// Attaches the short code to the record with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Dependency`] on database errors, including a unique
    /// violation on the code.
    async fn update_short_code(&self, id: i64, short_code: &str) -> Result<(), AppError>;

    /// Looks up the original URL for a short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` if a record carries this code
    /// - `Ok(None)` if no record matches
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Dependency`] on database errors.
    async fn get_url_by_short_code(&self, short_code: &str) -> Result<Option<String>, AppError>;

    /// Deletes a record by id. Deleting a missing id is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Dependency`] on database errors.
    async fn delete_url(&self, id: i64) -> Result<(), AppError>;

    /// Checks if the store answers queries. Used by the health endpoint.
    async fn health_check(&self) -> bool;
}
