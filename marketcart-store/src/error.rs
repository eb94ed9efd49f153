//! Store error types.

use marketcart_core::CoreError;
use thiserror::Error;

/// Errors that can occur in the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The cart was requested outside of a provider scope.
    #[error("use_cart must be used within a CartProvider")]
    MissingProvider,

    /// Error from a core type or a storage backend.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Core(inner) => inner,
            StoreError::Serialization(e) => CoreError::Serialization(e),
            other => CoreError::Storage(other.to_string()),
        }
    }
}
