//! Boosted (promoted) products.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use buraq_core::ProductId;

use crate::models::BoostedProduct;

/// Products currently or previously boosted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Boosts(Vec<BoostedProduct>);

impl Boosts {
    /// Every recorded boost, expired ones included.
    #[must_use]
    pub fn all(&self) -> &[BoostedProduct] {
        &self.0
    }

    /// Boost `product_id` for `days` days from `now`, replacing any earlier
    /// boost of the same product. Returns the new boost.
    ///
    /// Returns `None`, leaving existing boosts alone, if the expiry would
    /// fall outside the representable date range.
    pub fn boost(
        &mut self,
        product_id: ProductId,
        days: u32,
        now: DateTime<Utc>,
    ) -> Option<BoostedProduct> {
        let end_date = Duration::try_days(i64::from(days))
            .and_then(|duration| now.checked_add_signed(duration))?;

        self.0.retain(|b| b.product_id != product_id);
        let boost = BoostedProduct {
            product_id,
            end_date,
        };
        self.0.push(boost.clone());
        Some(boost)
    }

    /// Stop boosting a product. Returns `false` if it was not boosted.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let before = self.0.len();
        self.0.retain(|b| &b.product_id != product_id);
        self.0.len() != before
    }

    /// Boosts still running at `now`.
    pub fn active_at(&self, now: DateTime<Utc>) -> impl Iterator<Item = &BoostedProduct> {
        self.0.iter().filter(move |b| b.is_active_at(now))
    }
}
