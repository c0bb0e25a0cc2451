//! Checkout command.

use std::io::Write;

use buraq_storefront::Storefront;
use buraq_storefront::models::CustomerData;
use buraq_storefront::storage::KeyValueStore;

use super::CommandError;

/// Raw checkout form input.
pub struct CheckoutForm {
    pub name: String,
    pub phone: Option<String>,
    pub email: String,
    pub province: String,
    pub address: String,
    pub voucher: Option<String>,
}

/// Place an order for the selected cart lines and print the receipt.
pub fn place<S: KeyValueStore>(
    shop: &mut Storefront<S>,
    out: &mut impl Write,
    form: &CheckoutForm,
) -> Result<(), CommandError> {
    let customer = CustomerData::new(
        &form.name,
        form.phone.as_deref(),
        &form.email,
        &form.province,
        &form.address,
        form.voucher.as_deref(),
    )?;

    let placed = shop.place_order(&customer)?;
    let order = &placed.order;

    writeln!(out, "Pesanan {} dibuat ({})", order.id, order.status)?;
    for item in &order.items {
        writeln!(out, "  {} x{} @ {}", item.product.name, item.quantity, item.product.price)?;
    }
    writeln!(out, "Subtotal: {}", order.subtotal)?;
    writeln!(out, "Ongkir:   {}", order.shipping_cost)?;
    if let Some(code) = &order.voucher_used {
        writeln!(out, "Voucher:  {code}")?;
    }
    writeln!(out, "Total:    {}", order.total)?;
    writeln!(out, "Kirim ke: {}", order.customer_address)?;

    if !placed.persisted {
        tracing::warn!(order_id = %order.id, "Order history could not be saved");
    }
    Ok(())
}
