//! Integration tests for checkout: selection, shipping and vouchers.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use buraq_core::{OrderStatus, Price, ProductId};
use buraq_integration_tests::{jakarta_customer, start_time, storefront};
use buraq_storefront::Dashboard;
use buraq_storefront::clock::ManualClock;
use buraq_storefront::models::CustomerData;
use buraq_storefront::services::CheckoutError;
use buraq_storefront::storage::MemoryStore;
use chrono::Duration;

fn id(raw: &str) -> ProductId {
    ProductId::new(raw)
}

#[test]
fn test_only_selected_lines_are_ordered() {
    let clock = ManualClock::new(start_time());
    let mut shop = storefront(MemoryStore::new(), &clock);
    shop.add_to_cart(&id("batik"), 1).unwrap();
    shop.add_to_cart(&id("kopi"), 2).unwrap();
    shop.add_to_cart(&id("sambal"), 1).unwrap();
    shop.toggle_cart_selection(&id("sambal")).unwrap();

    let placed = shop
        .place_order(&jakarta_customer(Some("ongkirgratis")).unwrap())
        .unwrap();
    let order = placed.order;

    let ordered: Vec<&str> = order.items.iter().map(|item| item.id().as_str()).collect();
    assert_eq!(ordered, ["batik", "kopi"]);
    assert_eq!(order.subtotal, Price::new(200_000));
    assert_eq!(order.shipping_cost, Price::ZERO);
    assert_eq!(order.total, Price::new(200_000));
    assert_eq!(order.voucher_used.as_deref(), Some("ONGKIRGRATIS"));
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.date, start_time());
    assert_eq!(order.customer_address, "Jl. Merdeka 1, DKI Jakarta");

    // Unselected lines stay behind, unselected
    assert_eq!(shop.cart().items().len(), 1);
    assert_eq!(shop.cart().items()[0].id(), &id("sambal"));
    assert!(shop.cart().selected().is_empty());
}

#[test]
fn test_shipping_follows_customer_province() {
    let clock = ManualClock::new(start_time());
    let mut shop = storefront(MemoryStore::new(), &clock);
    shop.add_to_cart(&id("sambal"), 2).unwrap();

    let customer = CustomerData::new(
        "Siti",
        None,
        "siti@buraq.id",
        "Jawa Timur",
        "Jl. Tunjungan 5",
        None,
    )
    .unwrap();
    let order = shop.place_order(&customer).unwrap().order;

    assert_eq!(order.subtotal, Price::new(36_000));
    assert_eq!(order.shipping_cost, Price::new(15_000));
    assert_eq!(order.total, Price::new(51_000));
    assert_eq!(order.customer_phone, None);
    assert_eq!(order.items[0].product.seller_info.store_name, "Manajemen BURAQ");
}

#[test]
fn test_voucher_below_minimum_changes_nothing() {
    let clock = ManualClock::new(start_time());
    let mut shop = storefront(MemoryStore::new(), &clock);
    shop.add_to_cart(&id("kopi"), 1).unwrap();
    let cart_before = shop.cart().clone();

    let err = shop
        .place_order(&jakarta_customer(Some("ONGKIRGRATIS")).unwrap())
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Minimal pembelian untuk voucher ONGKIRGRATIS adalah Rp50.000."
    );
    assert_eq!(shop.cart(), &cart_before);
    assert!(shop.orders(Dashboard::Seller).is_empty());
    assert!(shop.orders(Dashboard::Management).is_empty());
    assert!(shop.customer_orders().is_empty());
    assert_eq!(shop.store().writes(), 0);
}

#[test]
fn test_inactive_voucher_is_invalid() {
    let clock = ManualClock::new(start_time());
    let mut shop = storefront(MemoryStore::new(), &clock);
    let mut voucher = shop.vouchers().find_by_code("ONGKIRGRATIS").unwrap().clone();
    voucher.is_active = false;
    assert!(shop.update_voucher(voucher));
    shop.add_to_cart(&id("batik"), 1).unwrap();

    let err = shop
        .place_order(&jakarta_customer(Some("ONGKIRGRATIS")).unwrap())
        .unwrap_err();
    assert_eq!(
        err,
        CheckoutError::VoucherInvalid {
            code: "ONGKIRGRATIS".to_string()
        }
    );
    assert_eq!(shop.cart().items().len(), 1);
}

#[test]
fn test_checkout_requires_a_selection() {
    let clock = ManualClock::new(start_time());
    let mut shop = storefront(MemoryStore::new(), &clock);
    shop.add_to_cart(&id("batik"), 1).unwrap();
    shop.add_to_cart(&id("kopi"), 1).unwrap();

    // Everything is selected, so this clears the selection
    shop.toggle_select_all();
    let err = shop.place_order(&jakarta_customer(None).unwrap()).unwrap_err();
    assert_eq!(err, CheckoutError::NoItemsSelected);

    shop.toggle_select_all();
    assert!(shop.place_order(&jakarta_customer(None).unwrap()).is_ok());
    assert!(shop.cart().is_empty());
}

#[test]
fn test_deleted_product_stays_in_cart_and_order() {
    let clock = ManualClock::new(start_time());
    let mut shop = storefront(MemoryStore::new(), &clock);
    shop.add_to_cart(&id("batik"), 1).unwrap();
    assert!(shop.delete_product(Dashboard::Seller, &id("batik")));

    let order = shop.place_order(&jakarta_customer(None).unwrap()).unwrap().order;
    assert_eq!(order.items[0].product.name, "Kemeja Batik");
    assert_eq!(order.total, Price::new(160_000));
}

#[test]
fn test_order_ids_increase_even_within_one_millisecond() {
    let clock = ManualClock::new(start_time());
    let mut shop = storefront(MemoryStore::new(), &clock);

    let mut ids = Vec::new();
    for _ in 0..3 {
        shop.add_to_cart(&id("kopi"), 1).unwrap();
        ids.push(shop.place_order(&jakarta_customer(None).unwrap()).unwrap().order.id);
    }
    clock.advance(Duration::seconds(5));
    shop.add_to_cart(&id("kopi"), 1).unwrap();
    ids.push(shop.place_order(&jakarta_customer(None).unwrap()).unwrap().order.id);

    assert_eq!(ids[0].as_str(), "ORD-1792396800000");
    assert_eq!(ids[1].as_str(), "ORD-1792396800001");
    assert_eq!(ids[2].as_str(), "ORD-1792396800002");
    assert_eq!(ids[3].as_str(), "ORD-1792396805000");

    // Newest first everywhere
    let seller: Vec<_> = shop
        .orders(Dashboard::Seller)
        .orders()
        .iter()
        .map(|o| o.id.clone())
        .collect();
    let mut expected = ids;
    expected.reverse();
    assert_eq!(seller, expected);
}
