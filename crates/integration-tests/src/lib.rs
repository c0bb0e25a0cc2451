//! Integration tests for the BURAQ storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p buraq-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `checkout_flow` - Cart selection, vouchers and shipping at checkout
//! - `order_propagation` - Status changes across the three order copies
//! - `history_persistence` - Customer history on disk, including corrupt files
//!
//! This library holds the shared fixtures.

#![cfg_attr(not(test), forbid(unsafe_code))]

use buraq_core::{Category, Price, ProductId};
use buraq_storefront::clock::ManualClock;
use buraq_storefront::models::{CustomerData, CustomerDataError, Product, SellerInfo};
use buraq_storefront::storage::KeyValueStore;
use buraq_storefront::{Dashboard, Storefront, defaults};
use chrono::{DateTime, Utc};

/// The instant every fixture clock starts at (2026-10-19 08:00 UTC).
#[must_use]
pub fn start_time() -> DateTime<Utc> {
    DateTime::from_timestamp(1_792_396_800, 0).unwrap_or_default()
}

/// A product with the given ID, name and unit price.
#[must_use]
pub fn product(id: &str, name: &str, price: u64, category: Category) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        description: format!("{name} pilihan"),
        price: Price::new(price),
        images: vec![defaults::PLACEHOLDER_IMAGE_URL.to_string()],
        category,
        stock: 25,
        seller_info: SellerInfo {
            store_name: String::new(),
            profile_picture: String::new(),
        },
    }
}

/// A storefront on `store` with a frozen clock and a small catalog:
///
/// - seller: `batik` (Rp150.000) and `kopi` (Rp25.000)
/// - management: `sambal` (Rp18.000)
pub fn storefront<S: KeyValueStore>(store: S, clock: &ManualClock) -> Storefront<S> {
    let mut shop = Storefront::open(store, defaults::seller_profile()).with_clock(clock.clone());
    shop.add_product(
        Dashboard::Seller,
        product("batik", "Kemeja Batik", 150_000, Category::TeenFashion),
    );
    shop.add_product(
        Dashboard::Seller,
        product("kopi", "Kopi Gayo", 25_000, Category::Drinks),
    );
    shop.add_product(
        Dashboard::Management,
        product("sambal", "Sambal Bawang", 18_000, Category::Food),
    );
    shop
}

/// Checkout form for a Jakarta customer.
///
/// # Errors
///
/// Never for the fixed fields; the `voucher` is passed through unchanged.
pub fn jakarta_customer(voucher: Option<&str>) -> Result<CustomerData, CustomerDataError> {
    CustomerData::new(
        "Budi Santoso",
        Some("081234567890"),
        "budi@buraq.id",
        "DKI Jakarta",
        "Jl. Merdeka 1",
        voucher,
    )
}
