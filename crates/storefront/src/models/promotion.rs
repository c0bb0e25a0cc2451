//! Promotional placement types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use buraq_core::ProductId;

/// A product boosted to the top of the catalog until `end_date`.
///
/// The product reference is not checked; a boost may outlive its product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoostedProduct {
    pub product_id: ProductId,
    pub end_date: DateTime<Utc>,
}

impl BoostedProduct {
    /// Whether the boost is still running at `now`.
    #[must_use]
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.end_date > now
    }
}
