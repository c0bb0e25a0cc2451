//! Session snapshot persistence.
//!
//! A command-line run is one short-lived "browser tab". To let consecutive
//! runs behave like one session, everything in memory except the customer
//! history (which has its own entry) is written to [`SESSION_ENTRY`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{KeyValueStore, StorageError};
use crate::models::SellerProfile;
use crate::services::{Boosts, Cart, Catalog, OrderBook, ShippingRules, Vouchers};

/// Entry name for the session snapshot.
pub const SESSION_ENTRY: &str = "buraq_session";

/// Everything a storefront holds in memory besides the customer history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub seller_profile: SellerProfile,
    pub management_profile: SellerProfile,
    pub seller_products: Catalog,
    pub management_products: Catalog,
    pub cart: Cart,
    pub seller_orders: OrderBook,
    pub management_orders: OrderBook,
    pub shipping_rules: ShippingRules,
    pub vouchers: Vouchers,
    pub boosted_products: Boosts,
}

/// Load the session snapshot, if one was saved.
///
/// # Errors
///
/// Returns `StorageError::DataCorruption` if the entry does not decode, or
/// the backend's error if it cannot be read.
pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Result<Option<SessionSnapshot>, StorageError> {
    let Some(raw) = store.get(SESSION_ENTRY)? else {
        return Ok(None);
    };
    let snapshot = serde_json::from_str(&raw).map_err(|e| StorageError::DataCorruption {
        entry: SESSION_ENTRY.to_string(),
        reason: e.to_string(),
    })?;
    Ok(Some(snapshot))
}

/// Save the session snapshot.
///
/// # Errors
///
/// Returns `StorageError` if encoding or the write fails.
pub fn save<S: KeyValueStore + ?Sized>(
    store: &mut S,
    snapshot: &SessionSnapshot,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(snapshot)?;
    store.set(SESSION_ENTRY, &json)?;
    debug!(bytes = json.len(), "Saved session snapshot");
    Ok(())
}
