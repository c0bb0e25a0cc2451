//! Product catalogs.
//!
//! The seller and each management account own separate catalogs. Shoppers
//! browse the seller's products followed by the management products.

use serde::{Deserialize, Serialize};

use buraq_core::{Category, ProductId};

use crate::models::{Product, SellerInfo};

/// One account's products, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog(Vec<Product>);

impl Catalog {
    /// An empty catalog.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Products, newest first.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.0
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.0.iter().find(|p| &p.id == id)
    }

    /// Add a product at the front, stamping `owner` as its seller.
    pub fn add(&mut self, mut product: Product, owner: SellerInfo) {
        product.seller_info = owner;
        self.0.insert(0, product);
    }

    /// Replace the product with the same ID. Returns `false` if absent.
    pub fn update(&mut self, product: Product) -> bool {
        match self.0.iter_mut().find(|p| p.id == product.id) {
            Some(slot) => {
                *slot = product;
                true
            }
            None => false,
        }
    }

    /// Remove a product. Returns `false` if absent.
    pub fn delete(&mut self, id: &ProductId) -> bool {
        let before = self.0.len();
        self.0.retain(|p| &p.id != id);
        self.0.len() != before
    }

    /// Products in one category.
    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &Product> {
        self.0.iter().filter(move |p| p.category == category)
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use buraq_core::Price;

    use super::*;

    fn product(id: &str, category: Category) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Produk {id}"),
            description: "Deskripsi".to_string(),
            price: Price::new(25_000),
            images: vec!["https://img.buraq.id/1.png".to_string()],
            category,
            stock: 5,
            seller_info: SellerInfo {
                store_name: "Unknown".to_string(),
                profile_picture: String::new(),
            },
        }
    }

    fn owner() -> SellerInfo {
        SellerInfo {
            store_name: "Manajemen BURAQ".to_string(),
            profile_picture: "https://i.pravatar.cc/150?u=manajemen-buraq".to_string(),
        }
    }

    #[test]
    fn test_add_prepends_and_stamps_owner() {
        let mut catalog = Catalog::new();
        catalog.add(product("a", Category::Food), owner());
        catalog.add(product("b", Category::Drinks), owner());

        assert_eq!(catalog.products()[0].id, ProductId::new("b"));
        assert_eq!(catalog.products()[1].seller_info, owner());
    }

    #[test]
    fn test_update_and_delete() {
        let mut catalog = Catalog::new();
        catalog.add(product("a", Category::Food), owner());

        let mut edited = catalog.products()[0].clone();
        edited.stock = 0;
        assert!(catalog.update(edited));
        assert_eq!(catalog.get(&ProductId::new("a")).map(|p| p.stock), Some(0));

        assert!(!catalog.update(product("zzz", Category::Food)));
        assert!(catalog.delete(&ProductId::new("a")));
        assert!(!catalog.delete(&ProductId::new("a")));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_in_category() {
        let mut catalog = Catalog::new();
        catalog.add(product("a", Category::Food), owner());
        catalog.add(product("b", Category::Drinks), owner());
        catalog.add(product("c", Category::Food), owner());

        assert_eq!(catalog.in_category(Category::Food).count(), 2);
        assert_eq!(catalog.in_category(Category::Electronics).count(), 0);
    }
}
