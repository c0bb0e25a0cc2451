//! Cart line type.

use serde::{Deserialize, Serialize};

use buraq_core::{Price, PriceOverflow, ProductId};

use super::product::Product;

/// A product snapshot plus the requested quantity.
///
/// Serialized flat (product fields alongside `quantity`), which is also how
/// line items appear inside a stored order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    /// Create a cart line from a product snapshot.
    #[must_use]
    pub const fn new(product: Product, quantity: u32) -> Self {
        Self { product, quantity }
    }

    /// The product ID, which doubles as the cart line ID.
    #[must_use]
    pub const fn id(&self) -> &ProductId {
        &self.product.id
    }

    /// Unit price times quantity.
    ///
    /// # Errors
    ///
    /// Returns [`PriceOverflow`] if the line total does not fit.
    pub fn line_total(&self) -> Result<Price, PriceOverflow> {
        self.product.price.checked_mul(self.quantity)
    }
}
