//! Customer order history persistence.
//!
//! The history is one JSON array of orders under [`CUSTOMER_ORDERS_ENTRY`],
//! newest first. A missing entry is an empty history. A payload that is not
//! a JSON array is corrupt: it is cleared and replaced by an empty history.
//! Array elements that are not valid orders are dropped one by one, so a
//! single bad record never costs the rest.

use serde_json::Value;
use tracing::{debug, error, info, warn};

use super::{KeyValueStore, StorageError};
use crate::models::Order;

/// Entry name for the customer's order history.
pub const CUSTOMER_ORDERS_ENTRY: &str = "buraq_customer_orders";

/// Load the customer order history.
///
/// Corrupt payloads are removed from the store so the next write starts
/// clean.
///
/// # Errors
///
/// Returns `StorageError` if the store cannot be read. The stored history
/// may still be intact, so callers must not overwrite it.
pub fn load<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<Vec<Order>, StorageError> {
    let Some(raw) = store.get(CUSTOMER_ORDERS_ENTRY)? else {
        debug!("No stored customer order history");
        return Ok(Vec::new());
    };

    match decode(&raw) {
        Ok(orders) => {
            info!(count = orders.len(), "Loaded customer order history");
            Ok(orders)
        }
        Err(e) => {
            warn!(error = %e, "Discarding corrupt customer order history");
            if let Err(e) = store.remove(CUSTOMER_ORDERS_ENTRY) {
                error!(error = %e, "Failed to clear corrupt customer order history");
            }
            Ok(Vec::new())
        }
    }
}

/// Write the full customer order history, replacing what was stored.
///
/// # Errors
///
/// Returns `StorageError` if encoding or the write fails. Callers treat this
/// as non-fatal: in-memory state stays authoritative.
pub fn save<S: KeyValueStore + ?Sized>(
    store: &mut S,
    orders: &[Order],
) -> Result<(), StorageError> {
    let json = serde_json::to_string(orders)?;
    store.set(CUSTOMER_ORDERS_ENTRY, &json)?;
    debug!(count = orders.len(), "Saved customer order history");
    Ok(())
}

fn decode(raw: &str) -> Result<Vec<Order>, StorageError> {
    let corrupt = |reason: String| StorageError::DataCorruption {
        entry: CUSTOMER_ORDERS_ENTRY.to_string(),
        reason,
    };

    let value: Value = serde_json::from_str(raw).map_err(|e| corrupt(e.to_string()))?;
    let Value::Array(elements) = value else {
        return Err(corrupt("payload is not an array".to_string()));
    };

    let orders: Vec<Order> = elements
        .into_iter()
        .enumerate()
        .filter_map(|(index, element)| {
            serde_json::from_value(element)
                .inspect_err(|e| warn!(index, error = %e, "Skipping malformed stored order"))
                .ok()
        })
        .collect();
    Ok(orders)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};

    use buraq_core::{Email, OrderId, OrderStatus, Price};

    use super::*;
    use crate::storage::MemoryStore;

    fn order(id: &str) -> Order {
        Order {
            id: OrderId::new(id),
            customer_name: "Siti".to_string(),
            customer_phone: Some("0812".to_string()),
            customer_email: Email::parse("siti@buraq.id").unwrap(),
            customer_address: "Jl. Pahlawan 5, Jawa Timur".to_string(),
            customer_province: "Jawa Timur".to_string(),
            items: Vec::new(),
            subtotal: Price::new(40_000),
            shipping_cost: Price::new(15_000),
            voucher_used: None,
            total: Price::new(55_000),
            status: OrderStatus::Shipped,
            date: Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let mut store = MemoryStore::new();
        let orders = vec![order("ORD-2"), order("ORD-1")];

        save(&mut store, &orders).unwrap();
        assert_eq!(load(&mut store).unwrap(), orders);
    }

    #[test]
    fn test_missing_entry_is_empty() {
        let mut store = MemoryStore::new();
        assert!(load(&mut store).unwrap().is_empty());
    }

    #[test]
    fn test_non_array_payload_is_cleared() {
        let mut store = MemoryStore::with_entry(CUSTOMER_ORDERS_ENTRY, "{\"id\":\"ORD-1\"}");
        assert!(load(&mut store).unwrap().is_empty());
        assert!(!store.contains(CUSTOMER_ORDERS_ENTRY));
    }

    #[test]
    fn test_unparsable_payload_is_cleared() {
        let mut store = MemoryStore::with_entry(CUSTOMER_ORDERS_ENTRY, "not json at all");
        assert!(load(&mut store).unwrap().is_empty());
        assert!(!store.contains(CUSTOMER_ORDERS_ENTRY));
    }

    #[test]
    fn test_malformed_elements_are_skipped() {
        let good = serde_json::to_string(&order("ORD-1")).unwrap();
        let raw = format!("[1, {good}, {{\"id\":\"ORD-0\"}}]");
        let mut store = MemoryStore::with_entry(CUSTOMER_ORDERS_ENTRY, &raw);

        assert_eq!(load(&mut store).unwrap(), vec![order("ORD-1")]);
        assert!(store.contains(CUSTOMER_ORDERS_ENTRY));
    }

    #[test]
    fn test_read_failure_is_an_error_and_keeps_entry() {
        let mut store = MemoryStore::new();
        save(&mut store, &[order("ORD-1")]).unwrap();
        store.set_unreadable(true);

        assert!(matches!(load(&mut store), Err(StorageError::Unavailable(_))));

        store.set_unreadable(false);
        assert_eq!(load(&mut store).unwrap(), vec![order("ORD-1")]);
    }

    #[test]
    fn test_save_surfaces_unavailable_storage() {
        let mut store = MemoryStore::new();
        store.set_unavailable(true);
        assert!(matches!(
            save(&mut store, &[order("ORD-1")]),
            Err(StorageError::Unavailable(_))
        ));
    }
}
