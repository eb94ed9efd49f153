//! Trait definitions for MarketCart.
//!
//! The cart never talks to a storage engine directly; it goes through
//! [`CartStorage`], a minimal string key-value contract.

use async_trait::async_trait;

use crate::error::CoreError;

/// Key-value persistence used to keep the cart across restarts.
///
/// Values are opaque strings. The cart stores its whole snapshot under a
/// single key, replacing it on every write.
///
/// ## Implementing a Backend
///
/// ```ignore
/// struct NullStorage;
///
/// #[async_trait]
/// impl CartStorage for NullStorage {
///     async fn get(&self, _key: &str) -> Result<Option<String>, CoreError> {
///         Ok(None)
///     }
///
///     async fn set(&self, _key: &str, _value: String) -> Result<(), CoreError> {
///         Ok(())
///     }
///
///     async fn clear(&self) -> Result<(), CoreError> {
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait CartStorage: Send + Sync {
    /// Reads the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, CoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: String) -> Result<(), CoreError>;

    /// Removes every key.
    async fn clear(&self) -> Result<(), CoreError>;

    /// Human-readable backend name for logs.
    fn name(&self) -> &str {
        "storage"
    }
}
