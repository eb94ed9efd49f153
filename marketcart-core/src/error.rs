//! Core error types for `MarketCart`.

use thiserror::Error;

/// Core error type for cart models and storage collaborators.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A cart snapshot violates an invariant.
    #[error("Invalid cart: {0}")]
    InvalidCart(String),

    /// The storage backend failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
