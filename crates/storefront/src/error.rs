//! Unified error handling.
//!
//! Provides a unified `StoreError` type for storefront operations. Checkout
//! and validation failures are user-facing and leave state unchanged;
//! storage failures on the history mirror are logged by the state holder
//! instead of being returned.

use thiserror::Error;

use crate::config::ConfigError;
use crate::models::CustomerDataError;
use crate::services::CheckoutError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Order placement was rejected.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// Checkout form input was invalid.
    #[error("Invalid customer data: {0}")]
    CustomerData(#[from] CustomerDataError),

    /// Storage operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from the caller.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl StoreError {
    /// Whether the error is the user's to fix (as opposed to an environment
    /// problem worth reporting).
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::Checkout(_) | Self::CustomerData(_) | Self::NotFound(_) | Self::BadRequest(_)
        )
    }
}

/// Result type alias for `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;
