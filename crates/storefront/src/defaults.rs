//! Seed data for a fresh storefront.

use buraq_core::{Price, ShippingRuleId, VoucherId};

use crate::models::{SellerProfile, ShippingRule, Voucher};
use crate::services::{ShippingRules, Vouchers};

/// Default store name of the main seller.
pub const STORE_NAME: &str = "BURAQ Official Store";

/// Default avatar of the main seller.
pub const STORE_PICTURE: &str = "https://i.pravatar.cc/150?u=buraq-store";

/// Placeholder shown for products without images.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://i.ibb.co/9v0Gyt8/placeholder.png";

/// The main seller's starting profile.
#[must_use]
pub fn seller_profile() -> SellerProfile {
    SellerProfile {
        store_name: STORE_NAME.to_string(),
        profile_picture: STORE_PICTURE.to_string(),
        username: "naraskaryanusantara".to_string(),
        phone: Some("08563231191".to_string()),
    }
}

/// The management (sub-seller) account's starting profile.
#[must_use]
pub fn management_profile() -> SellerProfile {
    SellerProfile {
        store_name: "Manajemen BURAQ".to_string(),
        profile_picture: "https://i.pravatar.cc/150?u=manajemen-buraq".to_string(),
        username: "manajemen".to_string(),
        phone: Some("081122334455".to_string()),
    }
}

/// Standard and express rates for the Java provinces.
#[must_use]
pub fn shipping_rules() -> ShippingRules {
    let rule = |id: &str, destination: &str, standard: u64, express: u64| ShippingRule {
        id: ShippingRuleId::new(id),
        destination: destination.to_string(),
        standard_cost: Price::new(standard),
        express_cost: Price::new(express),
    };

    ShippingRules::from(vec![
        rule("ship-1", "DKI Jakarta", 10_000, 20_000),
        rule("ship-2", "Jawa Timur", 15_000, 25_000),
        rule("ship-3", "Jawa Barat", 12_000, 22_000),
        rule("ship-4", "Jawa Tengah", 13_000, 23_000),
    ])
}

/// The free-shipping voucher.
#[must_use]
pub fn vouchers() -> Vouchers {
    Vouchers::from(vec![Voucher {
        id: VoucherId::new("free-shipping-1"),
        name: "Ekstra Gratis Ongkir".to_string(),
        code: "ONGKIRGRATIS".to_string(),
        description: "Dapatkan gratis ongkir untuk pesanan Anda.".to_string(),
        is_active: true,
        minimum_purchase: Price::new(50_000),
    }])
}
