//! Cart commands.

use std::io::Write;

use buraq_core::ProductId;
use buraq_storefront::Storefront;
use buraq_storefront::storage::KeyValueStore;

use super::CommandError;

/// Add a catalog product to the cart.
pub fn add<S: KeyValueStore>(
    shop: &mut Storefront<S>,
    out: &mut impl Write,
    product_id: &ProductId,
    quantity: u32,
) -> Result<(), CommandError> {
    shop.add_to_cart(product_id, quantity)?;
    show(shop, out)
}

/// Set a cart line's quantity.
pub fn set<S: KeyValueStore>(
    shop: &mut Storefront<S>,
    out: &mut impl Write,
    product_id: &ProductId,
    quantity: u32,
) -> Result<(), CommandError> {
    shop.update_cart_quantity(product_id, quantity)?;
    show(shop, out)
}

/// Flip a cart line's checkout selection.
pub fn toggle<S: KeyValueStore>(
    shop: &mut Storefront<S>,
    out: &mut impl Write,
    product_id: &ProductId,
) -> Result<(), CommandError> {
    shop.toggle_cart_selection(product_id)?;
    show(shop, out)
}

/// Select all lines, or clear the selection.
pub fn toggle_all<S: KeyValueStore>(
    shop: &mut Storefront<S>,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    shop.toggle_select_all();
    show(shop, out)
}

/// Print the cart with selection marks.
pub fn show<S: KeyValueStore>(
    shop: &Storefront<S>,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let cart = shop.cart();
    if cart.is_empty() {
        writeln!(out, "Cart is empty.")?;
        return Ok(());
    }

    for item in cart.items() {
        let mark = if cart.is_selected(item.id()) { 'x' } else { ' ' };
        let line_total = item
            .line_total()
            .map_or_else(|_| "overflow".to_string(), |total| total.to_string());
        writeln!(
            out,
            "[{mark}] {}\t{} x{}\t{}",
            item.id(),
            item.product.name,
            item.quantity,
            line_total
        )?;
    }
    writeln!(out, "{} of {} lines selected", cart.selected().len(), cart.items().len())?;
    Ok(())
}
