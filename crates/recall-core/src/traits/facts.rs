//! The key-value fact store contract

use async_trait::async_trait;

use crate::error::Result;

/// A trivial persistent map for durable facts ("user.name" and friends),
/// kept outside the conversational stores.
#[async_trait]
pub trait FactStore: Send + Sync {
    /// Inserts or overwrites the value for `key`.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Returns the value for `key`, or `None` if absent. Absence is not an
    /// error.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Removes `key`. Deleting an absent key is a silent no-op.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Lists every currently-set key.
    async fn keys(&self) -> Result<Vec<String>>;
}
