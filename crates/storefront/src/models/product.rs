//! Catalog product types.

use serde::{Deserialize, Serialize};

use buraq_core::{Category, Price, ProductId};

/// Public identity of the store that listed a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerInfo {
    /// Store name shown on the product card.
    pub store_name: String,
    /// Store avatar URL.
    pub profile_picture: String,
}

/// A product listed by the seller or by a management (sub-seller) account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Unit price in whole rupiah.
    pub price: Price,
    /// Image URLs, first one is the cover.
    pub images: Vec<String>,
    pub category: Category,
    pub stock: u32,
    /// Owning store. Overwritten with the acting profile when the product is
    /// added to a catalog.
    pub seller_info: SellerInfo,
}

impl Product {
    /// The cover image, if the product has any images.
    #[must_use]
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}
