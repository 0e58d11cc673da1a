//! Record store trait: the durable key-value boundary.

use crate::error::AppError;
use async_trait::async_trait;

/// Durable key-value store holding serialized short link records.
///
/// The store is an external collaborator: single-key get/put/delete plus
/// prefix enumeration, with no transactions and no conditional writes.
/// Concurrent writers to the same key are last-write-wins.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::RedisStore`] - Redis implementation
/// - [`crate::infrastructure::persistence::MemoryStore`] - in-process map for
///   tests and local development
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Reads the value at `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(bytes))` if the key exists
    /// - `Ok(None)` if it does not
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store is unreachable.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, AppError>;

    /// Writes `value` at `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the write fails.
    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), AppError>;

    /// Removes the value at `key`. Deleting an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the delete fails.
    async fn delete(&self, key: &str) -> Result<(), AppError>;

    /// Lists every key sharing the byte prefix `prefix`.
    ///
    /// Ordering is unspecified; callers sort. A key returned here may have
    /// been deleted by the time it is read back.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the enumeration fails.
    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, AppError>;

    /// Reports whether the store backend is reachable.
    async fn health_check(&self) -> bool;
}
