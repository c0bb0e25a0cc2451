//! Order placement.
//!
//! Checkout is split in two pure steps so it can be tested without any
//! state holder:
//!
//! 1. [`quote`] prices the selected cart lines: subtotal, shipping by
//!    province, and voucher validation.
//! 2. [`build_order`] turns a quote plus customer data into a `Pending`
//!    [`Order`].
//!
//! Applying the order to the collections, cart and storage is the job of
//! [`crate::state::Storefront::place_order`].

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::debug;

use buraq_core::{OrderId, OrderStatus, Price, PriceOverflow};

use super::shipping::ShippingRules;
use super::vouchers::Vouchers;
use crate::models::{CartItem, CustomerData, Order};

/// Reasons an order cannot be placed. None of them change any state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// No cart line was selected.
    #[error("Tidak ada item yang dipilih untuk di-checkout.")]
    NoItemsSelected,

    /// The voucher code does not name an active voucher.
    #[error("Kode voucher \"{code}\" tidak valid.")]
    VoucherInvalid {
        /// The code as the customer typed it.
        code: String,
    },

    /// The voucher exists but the subtotal is below its minimum purchase.
    #[error("Minimal pembelian untuk voucher {code} adalah {minimum}.")]
    VoucherThresholdNotMet {
        /// The voucher's own code.
        code: String,
        /// Required subtotal.
        minimum: Price,
    },

    /// Line totals or the order total exceeded the representable amount.
    #[error("Total pesanan terlalu besar.")]
    AmountOverflow,
}

impl From<PriceOverflow> for CheckoutError {
    fn from(_: PriceOverflow) -> Self {
        Self::AmountOverflow
    }
}

/// Priced selection, ready to become an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub items: Vec<CartItem>,
    pub subtotal: Price,
    pub shipping_cost: Price,
    /// The applied voucher's own code.
    pub voucher_used: Option<String>,
    pub total: Price,
}

/// Price the selected cart lines for delivery to `province`.
///
/// A blank or absent `voucher_code` means no voucher. A supplied code must
/// name an active voucher (case-insensitive) whose minimum purchase the
/// subtotal reaches; the voucher then makes shipping free.
///
/// # Errors
///
/// - `NoItemsSelected` if `items` is empty
/// - `VoucherInvalid` if the code names no active voucher
/// - `VoucherThresholdNotMet` if the subtotal is below the voucher minimum
/// - `AmountOverflow` if the amounts do not fit
pub fn quote(
    items: Vec<CartItem>,
    province: &str,
    voucher_code: Option<&str>,
    rules: &ShippingRules,
    vouchers: &Vouchers,
) -> Result<Quote, CheckoutError> {
    if items.is_empty() {
        return Err(CheckoutError::NoItemsSelected);
    }

    let subtotal = items.iter().try_fold(Price::ZERO, |sum, item| {
        sum.checked_add(item.line_total()?)
    })?;

    let mut shipping_cost = rules.quote(province);
    let mut voucher_used = None;

    if let Some(code) = voucher_code.map(str::trim).filter(|c| !c.is_empty()) {
        let voucher = vouchers
            .find_active(code)
            .ok_or_else(|| CheckoutError::VoucherInvalid {
                code: code.to_string(),
            })?;

        if subtotal < voucher.minimum_purchase {
            return Err(CheckoutError::VoucherThresholdNotMet {
                code: voucher.code.clone(),
                minimum: voucher.minimum_purchase,
            });
        }

        debug!(code = %voucher.code, "Voucher applied, shipping waived");
        shipping_cost = Price::ZERO;
        voucher_used = Some(voucher.code.clone());
    }

    let total = subtotal.checked_add(shipping_cost)?;

    Ok(Quote {
        items,
        subtotal,
        shipping_cost,
        voucher_used,
        total,
    })
}

/// Build the `Pending` order for a quote.
#[must_use]
pub fn build_order(
    id: OrderId,
    customer: &CustomerData,
    quote: Quote,
    now: DateTime<Utc>,
) -> Order {
    Order {
        id,
        customer_name: customer.name.clone(),
        customer_phone: customer.phone.clone(),
        customer_email: customer.email.clone(),
        customer_address: customer.full_address(),
        customer_province: customer.province.clone(),
        items: quote.items,
        subtotal: quote.subtotal,
        shipping_cost: quote.shipping_cost,
        voucher_used: quote.voucher_used,
        total: quote.total,
        status: OrderStatus::Pending,
        date: now,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use buraq_core::{Category, ProductId};

    use super::*;
    use crate::defaults;
    use crate::models::{Product, SellerInfo};

    fn line(id: &str, price: u64, quantity: u32) -> CartItem {
        CartItem::new(
            Product {
                id: ProductId::new(id),
                name: format!("Produk {id}"),
                description: String::new(),
                price: Price::new(price),
                images: Vec::new(),
                category: Category::Others,
                stock: 100,
                seller_info: SellerInfo {
                    store_name: "BURAQ Official Store".to_string(),
                    profile_picture: String::new(),
                },
            },
            quantity,
        )
    }

    fn rules() -> ShippingRules {
        defaults::shipping_rules()
    }

    fn vouchers() -> Vouchers {
        defaults::vouchers()
    }

    #[test]
    fn test_quote_without_voucher() {
        let quote = quote(
            vec![line("p1", 10_000, 2)],
            "DKI Jakarta",
            None,
            &rules(),
            &vouchers(),
        )
        .unwrap();

        assert_eq!(quote.subtotal, Price::new(20_000));
        assert_eq!(quote.shipping_cost, Price::new(10_000));
        assert_eq!(quote.total, Price::new(30_000));
        assert_eq!(quote.voucher_used, None);
    }

    #[test]
    fn test_quote_sums_every_line() {
        let quote = quote(
            vec![line("p1", 12_500, 3), line("p2", 1_000, 7)],
            "Jawa Tengah",
            None,
            &rules(),
            &vouchers(),
        )
        .unwrap();

        assert_eq!(quote.subtotal, Price::new(44_500));
        assert_eq!(quote.total, Price::new(44_500 + 13_000));
    }

    #[test]
    fn test_quote_unknown_province_ships_free() {
        let quote = quote(
            vec![line("p1", 10_000, 1)],
            "Papua Barat",
            None,
            &rules(),
            &vouchers(),
        )
        .unwrap();
        assert_eq!(quote.shipping_cost, Price::ZERO);
        assert_eq!(quote.total, Price::new(10_000));
    }

    #[test]
    fn test_quote_requires_items() {
        let err = quote(Vec::new(), "DKI Jakarta", None, &rules(), &vouchers()).unwrap_err();
        assert_eq!(err, CheckoutError::NoItemsSelected);
        assert_eq!(
            err.to_string(),
            "Tidak ada item yang dipilih untuk di-checkout."
        );
    }

    #[test]
    fn test_voucher_below_threshold_fails() {
        let err = quote(
            vec![line("p1", 10_000, 2)],
            "DKI Jakarta",
            Some("ONGKIRGRATIS"),
            &rules(),
            &vouchers(),
        )
        .unwrap_err();

        assert_eq!(
            err,
            CheckoutError::VoucherThresholdNotMet {
                code: "ONGKIRGRATIS".to_string(),
                minimum: Price::new(50_000),
            }
        );
        assert_eq!(
            err.to_string(),
            "Minimal pembelian untuk voucher ONGKIRGRATIS adalah Rp50.000."
        );
    }

    #[test]
    fn test_voucher_waives_shipping_and_records_own_code() {
        let quote = quote(
            vec![line("p1", 30_000, 2)],
            "DKI Jakarta",
            Some("ongkirgratis"),
            &rules(),
            &vouchers(),
        )
        .unwrap();

        assert_eq!(quote.shipping_cost, Price::ZERO);
        assert_eq!(quote.total, Price::new(60_000));
        assert_eq!(quote.voucher_used.as_deref(), Some("ONGKIRGRATIS"));
    }

    #[test]
    fn test_voucher_at_exact_threshold_applies() {
        let quote = quote(
            vec![line("p1", 50_000, 1)],
            "Jawa Barat",
            Some("ONGKIRGRATIS"),
            &rules(),
            &vouchers(),
        )
        .unwrap();
        assert_eq!(quote.shipping_cost, Price::ZERO);
    }

    #[test]
    fn test_unknown_voucher_fails() {
        let err = quote(
            vec![line("p1", 100_000, 1)],
            "DKI Jakarta",
            Some("DISKON99"),
            &rules(),
            &vouchers(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            CheckoutError::VoucherInvalid {
                code: "DISKON99".to_string()
            }
        );
        assert_eq!(err.to_string(), "Kode voucher \"DISKON99\" tidak valid.");
    }

    #[test]
    fn test_blank_voucher_is_ignored() {
        let quote = quote(
            vec![line("p1", 10_000, 1)],
            "DKI Jakarta",
            Some("   "),
            &rules(),
            &vouchers(),
        )
        .unwrap();
        assert_eq!(quote.voucher_used, None);
        assert_eq!(quote.shipping_cost, Price::new(10_000));
    }

    #[test]
    fn test_overflow_is_reported() {
        let err = quote(
            vec![line("p1", u64::MAX, 2)],
            "DKI Jakarta",
            None,
            &rules(),
            &vouchers(),
        )
        .unwrap_err();
        assert_eq!(err, CheckoutError::AmountOverflow);
    }

    #[test]
    fn test_build_order() {
        let customer = CustomerData::new(
            "Budi",
            Some("08123456789"),
            "budi@buraq.id",
            "DKI Jakarta",
            "Jl. Merdeka 1",
            None,
        )
        .unwrap();
        let quote = quote(
            vec![line("p1", 10_000, 2)],
            &customer.province,
            None,
            &rules(),
            &vouchers(),
        )
        .unwrap();
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap();

        let order = build_order(OrderId::new("ORD-1"), &customer, quote, now);

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.customer_address, "Jl. Merdeka 1, DKI Jakarta");
        assert_eq!(order.customer_phone.as_deref(), Some("08123456789"));
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.total, Price::new(30_000));
        assert_eq!(order.date, now);
    }
}
