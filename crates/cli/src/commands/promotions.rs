//! Voucher and boost commands.

use std::io::Write;

use buraq_core::ProductId;
use buraq_storefront::Storefront;
use buraq_storefront::storage::KeyValueStore;

use super::CommandError;

/// Print every voucher.
pub fn list_vouchers<S: KeyValueStore>(
    shop: &Storefront<S>,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    for voucher in shop.vouchers().all() {
        let state = if voucher.is_active { "active" } else { "inactive" };
        writeln!(
            out,
            "{}\t{}\t{state}\tmin {}\t{}",
            voucher.code, voucher.name, voucher.minimum_purchase, voucher.description
        )?;
    }
    Ok(())
}

/// Flip a voucher between active and inactive.
pub fn toggle_voucher<S: KeyValueStore>(
    shop: &mut Storefront<S>,
    out: &mut impl Write,
    code: &str,
) -> Result<(), CommandError> {
    let mut voucher = shop
        .vouchers()
        .find_by_code(code)
        .ok_or_else(|| CommandError::NotFound(format!("voucher {code}")))?
        .clone();
    voucher.is_active = !voucher.is_active;

    let state = if voucher.is_active { "active" } else { "inactive" };
    writeln!(out, "Voucher {} is now {state}", voucher.code)?;
    shop.update_voucher(voucher);
    Ok(())
}

/// Boost a catalog product.
pub fn boost<S: KeyValueStore>(
    shop: &mut Storefront<S>,
    out: &mut impl Write,
    product_id: ProductId,
    days: u32,
) -> Result<(), CommandError> {
    if shop.find_product(&product_id).is_none() {
        return Err(CommandError::NotFound(format!("product {product_id}")));
    }
    let boost = shop.boost_product(product_id, days)?;
    writeln!(
        out,
        "Boosted {} until {}",
        boost.product_id,
        boost.end_date.format("%Y-%m-%d %H:%M")
    )?;
    Ok(())
}

/// Stop boosting a product.
pub fn unboost<S: KeyValueStore>(
    shop: &mut Storefront<S>,
    out: &mut impl Write,
    product_id: &ProductId,
) -> Result<(), CommandError> {
    if !shop.remove_boost(product_id) {
        return Err(CommandError::NotFound(format!("boost for {product_id}")));
    }
    writeln!(out, "Removed boost for {product_id}")?;
    Ok(())
}

/// Print the running boosts.
pub fn list_boosts<S: KeyValueStore>(
    shop: &Storefront<S>,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let boosts = shop.active_boosts();
    if boosts.is_empty() {
        writeln!(out, "No running boosts.")?;
        return Ok(());
    }
    for boost in boosts {
        let name = shop
            .find_product(&boost.product_id)
            .map_or("(deleted)", |product| product.name.as_str());
        writeln!(
            out,
            "{}\t{name}\tuntil {}",
            boost.product_id,
            boost.end_date.format("%Y-%m-%d %H:%M")
        )?;
    }
    Ok(())
}
