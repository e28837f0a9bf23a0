//! Storage slot trait — single async interface for persistence.
//!
//! The profile store serializes its whole list as one JSON document kept
//! under a single fixed key, so the only surface a backend needs is an
//! opaque string get/set.

use async_trait::async_trait;

use crate::error::StorageError;

/// Backend-agnostic key-value slot.
///
/// Values are opaque strings; callers own the encoding. The only guarantee
/// a backend must provide is that a completed `set` is what the next `get`
/// returns.
#[async_trait]
pub trait StorageSlot: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
