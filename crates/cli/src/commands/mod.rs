//! Command implementations.
//!
//! Every command takes the storefront plus an output sink, so tests can run
//! them against a `MemoryStore` and a byte buffer.

use std::io;

use buraq_storefront::config::StorefrontConfig;
use buraq_storefront::models::CustomerDataError;
use buraq_storefront::services::CheckoutError;
use buraq_storefront::storage::FileStore;
use buraq_storefront::{Dashboard, StoreError, Storefront};
use thiserror::Error;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod orders;
pub mod promotions;
pub mod shipping;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Storefront operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Checkout was rejected.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// Checkout form input was invalid.
    #[error("Invalid customer data: {0}")]
    CustomerData(#[from] CustomerDataError),

    /// Writing output failed.
    #[error("Output error: {0}")]
    Io(#[from] io::Error),

    /// The named item does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl CommandError {
    /// Whether the error was caused by the user's input rather than the
    /// environment.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        match self {
            Self::Store(e) => e.is_user_facing(),
            Self::Checkout(_) | Self::CustomerData(_) | Self::NotFound(_) => true,
            Self::Io(_) => false,
        }
    }
}

/// Open the file-backed storefront and restore the saved session.
///
/// The configured seller profile replaces the one saved in the session.
///
/// # Errors
///
/// Returns `StoreError::Storage` if the saved session cannot be read.
pub fn open(config: &StorefrontConfig) -> Result<Storefront<FileStore>, StoreError> {
    let store = FileStore::new(config.data_dir.clone());
    let mut shop = Storefront::open(store, config.seller_profile.clone());
    if !shop.restore_session()? {
        tracing::debug!(data_dir = %config.data_dir.display(), "Starting a fresh session");
    }
    shop.update_profile(Dashboard::Seller, config.seller_profile.clone());
    Ok(shop)
}

const fn dashboard_name(dashboard: Dashboard) -> &'static str {
    match dashboard {
        Dashboard::Seller => "seller",
        Dashboard::Management => "management",
    }
}
