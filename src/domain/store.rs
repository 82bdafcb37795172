//! Storage contract for redirections.

use async_trait::async_trait;

/// Errors a store backend can report.
///
/// The in-memory backend never produces one; remote backends surface
/// connection and command failures here.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store connection error: {0}")]
    Connection(String),

    #[error("Store operation error: {0}")]
    Operation(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Key/value table mapping short keys to resources.
///
/// Implementations are shared across request tasks behind an `Arc` and must
/// synchronize internally.
///
/// # Implementations
///
/// - [`crate::infrastructure::store::MemoryStore`] - Sharded in-process map
/// - [`crate::infrastructure::store::RedisStore`] - Redis-backed, survives restarts
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RedirectionStore: Send + Sync {
    /// Inserts or overwrites the resource for `short_key`.
    ///
    /// A later put with the same key replaces the earlier resource; there is
    /// no conflict error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] only when a remote backend fails.
    async fn put(&self, short_key: &str, resource: &str) -> StoreResult<()>;

    /// Looks up the resource registered for `short_key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(resource))` if registered
    /// - `Ok(None)` if not
    async fn get(&self, short_key: &str) -> StoreResult<Option<String>>;
}
