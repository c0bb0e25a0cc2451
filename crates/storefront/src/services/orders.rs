//! Order collections and status propagation.
//!
//! Every dashboard keeps its own copy of the orders it can see. An
//! [`OrderBook`] is one such copy; transitions consume the book and return
//! the next one, so a collection is always swapped in whole and never seen
//! half-updated.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use buraq_core::{OrderId, OrderStatus};

use crate::models::Order;

/// Prefix of generated order IDs.
pub const ORDER_ID_PREFIX: &str = "ORD-";

/// One view's copy of the orders, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderBook(Vec<Order>);

impl OrderBook {
    /// An empty book.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// The orders, newest first.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.0
    }

    /// Number of orders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the book holds no orders.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up an order by ID.
    #[must_use]
    pub fn get(&self, id: &OrderId) -> Option<&Order> {
        self.0.iter().find(|order| &order.id == id)
    }

    /// The book with `order` added at the front.
    #[must_use]
    pub fn prepended(mut self, order: Order) -> Self {
        self.0.insert(0, order);
        self
    }

    /// The book with every status in `updates` applied, and how many orders
    /// changed. Orders not named in `updates` are left as they were.
    #[must_use]
    pub fn with_statuses(self, updates: &StatusUpdates) -> (Self, usize) {
        let mut changed = 0;
        let orders = self
            .0
            .into_iter()
            .map(|order| match updates.get(&order.id) {
                Some(status) if status != order.status => {
                    changed += 1;
                    Order { status, ..order }
                }
                _ => order,
            })
            .collect();
        (Self(orders), changed)
    }

    /// The book with the order sharing `replacement`'s ID swapped out, and
    /// whether one was found.
    #[must_use]
    pub fn with_replaced(mut self, replacement: Order) -> (Self, bool) {
        let found = match self.0.iter_mut().find(|o| o.id == replacement.id) {
            Some(slot) => {
                *slot = replacement;
                true
            }
            None => false,
        };
        (self, found)
    }

    /// The book without the order `id`, and whether it was present.
    #[must_use]
    pub fn without(mut self, id: &OrderId) -> (Self, bool) {
        let before = self.0.len();
        self.0.retain(|order| &order.id != id);
        let removed = self.0.len() != before;
        (self, removed)
    }

    /// The book with every order from `older` whose ID it does not already
    /// hold appended after its own orders.
    #[must_use]
    pub fn merged(mut self, older: Vec<Order>) -> Self {
        let missing: Vec<Order> = older
            .into_iter()
            .filter(|order| self.get(&order.id).is_none())
            .collect();
        self.0.extend(missing);
        self
    }

    /// The newest order ID timestamp in the book, for seeding the
    /// [`OrderIdGenerator`].
    #[must_use]
    pub fn latest_id_millis(&self) -> Option<i64> {
        self.0.iter().filter_map(|o| id_millis(&o.id)).max()
    }
}

impl From<Vec<Order>> for OrderBook {
    fn from(orders: Vec<Order>) -> Self {
        Self(orders)
    }
}

/// A batch of status changes keyed by order ID.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusUpdates(BTreeMap<OrderId, OrderStatus>);

impl StatusUpdates {
    /// An empty batch.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Add or overwrite the target status for one order.
    pub fn set(&mut self, id: OrderId, status: OrderStatus) {
        self.0.insert(id, status);
    }

    /// Target status for `id`, if it is part of the batch.
    #[must_use]
    pub fn get(&self, id: &OrderId) -> Option<OrderStatus> {
        self.0.get(id).copied()
    }

    /// Number of orders in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the batch is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(OrderId, OrderStatus)> for StatusUpdates {
    fn from_iter<I: IntoIterator<Item = (OrderId, OrderStatus)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Outcome of a status propagation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PropagationReport {
    /// Orders changed in the seller's collection.
    pub seller: usize,
    /// Orders changed in the management collection.
    pub management: usize,
    /// Orders changed in the customer history.
    pub customer: usize,
    /// Whether the customer history reached durable storage.
    pub persisted: bool,
}

impl PropagationReport {
    /// Total number of order copies that changed.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.seller + self.management + self.customer
    }
}

/// Generates `ORD-<unix millis>` order IDs.
///
/// IDs are strictly increasing: when two orders are placed within the same
/// millisecond (or the clock steps backwards) the next ID takes the previous
/// timestamp plus one.
#[derive(Debug, Clone, Default)]
pub struct OrderIdGenerator {
    last_millis: Option<i64>,
}

impl OrderIdGenerator {
    /// A generator with no history.
    #[must_use]
    pub const fn new() -> Self {
        Self { last_millis: None }
    }

    /// Make sure future IDs sort after `millis` (an existing order's
    /// timestamp).
    pub fn observe(&mut self, millis: i64) {
        self.last_millis = Some(self.last_millis.map_or(millis, |last| last.max(millis)));
    }

    /// The next ID for an order created at `now`.
    pub fn next(&mut self, now: DateTime<Utc>) -> OrderId {
        let now_millis = now.timestamp_millis();
        let millis = match self.last_millis {
            Some(last) if now_millis <= last => last.saturating_add(1),
            _ => now_millis,
        };
        self.last_millis = Some(millis);
        OrderId::new(format!("{ORDER_ID_PREFIX}{millis}"))
    }
}

fn id_millis(id: &OrderId) -> Option<i64> {
    id.as_str().strip_prefix(ORDER_ID_PREFIX)?.parse().ok()
}
