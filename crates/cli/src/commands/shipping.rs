//! Shipping table commands.

use std::io::Write;

use buraq_core::{Price, ShippingRuleId};
use buraq_storefront::Storefront;
use buraq_storefront::models::ShippingRule;
use buraq_storefront::storage::KeyValueStore;

use super::CommandError;

/// Print every shipping rule.
pub fn list<S: KeyValueStore>(
    shop: &Storefront<S>,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    for rule in shop.shipping_rules().rules() {
        writeln!(
            out,
            "{}\t{}\tstandard {}\texpress {}",
            rule.id, rule.destination, rule.standard_cost, rule.express_cost
        )?;
    }
    Ok(())
}

/// Add a shipping rule.
pub fn add<S: KeyValueStore>(
    shop: &mut Storefront<S>,
    out: &mut impl Write,
    destination: String,
    standard: u64,
    express: u64,
) -> Result<(), CommandError> {
    let rule = ShippingRule {
        id: ShippingRuleId::random(),
        destination: destination.trim().to_string(),
        standard_cost: Price::new(standard),
        express_cost: Price::new(express),
    };
    writeln!(out, "Added shipping rule {} for {}", rule.id, rule.destination)?;
    shop.add_shipping_rule(rule);
    Ok(())
}

/// Edit a shipping rule; `None` keeps the current value.
pub fn update<S: KeyValueStore>(
    shop: &mut Storefront<S>,
    out: &mut impl Write,
    id: &ShippingRuleId,
    destination: Option<String>,
    standard: Option<u64>,
    express: Option<u64>,
) -> Result<(), CommandError> {
    let mut rule = shop
        .shipping_rules()
        .rules()
        .iter()
        .find(|rule| &rule.id == id)
        .ok_or_else(|| CommandError::NotFound(format!("shipping rule {id}")))?
        .clone();

    if let Some(destination) = destination {
        rule.destination = destination.trim().to_string();
    }
    if let Some(standard) = standard {
        rule.standard_cost = Price::new(standard);
    }
    if let Some(express) = express {
        rule.express_cost = Price::new(express);
    }

    writeln!(out, "Updated shipping rule {id} for {}", rule.destination)?;
    shop.update_shipping_rule(rule);
    Ok(())
}

/// Delete a shipping rule.
pub fn delete<S: KeyValueStore>(
    shop: &mut Storefront<S>,
    out: &mut impl Write,
    id: &ShippingRuleId,
) -> Result<(), CommandError> {
    if !shop.delete_shipping_rule(id) {
        return Err(CommandError::NotFound(format!("shipping rule {id}")));
    }
    writeln!(out, "Deleted shipping rule {id}")?;
    Ok(())
}

/// Print the standard shipping cost to a province.
pub fn quote<S: KeyValueStore>(
    shop: &Storefront<S>,
    out: &mut impl Write,
    province: &str,
) -> Result<(), CommandError> {
    writeln!(out, "{province}: {}", shop.shipping_quote(province))?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use buraq_storefront::defaults;
    use buraq_storefront::storage::MemoryStore;

    use super::*;

    #[test]
    fn test_add_takes_precedence_in_quotes() {
        let mut shop = Storefront::open(MemoryStore::new(), defaults::seller_profile());
        let mut out = Vec::new();

        quote(&shop, &mut out, "Bali").unwrap();
        add(&mut shop, &mut out, " Bali ".to_string(), 30_000, 45_000).unwrap();
        quote(&shop, &mut out, "Bali").unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Bali: Rp0\n"));
        assert!(out.ends_with("Bali: Rp30.000\n"));
    }

    #[test]
    fn test_delete_default_rule() {
        let mut shop = Storefront::open(MemoryStore::new(), defaults::seller_profile());
        delete(&mut shop, &mut Vec::new(), &ShippingRuleId::new("ship-1")).unwrap();

        let mut out = Vec::new();
        quote(&shop, &mut out, "DKI Jakarta").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "DKI Jakarta: Rp0\n");
        assert!(matches!(
            delete(&mut shop, &mut Vec::new(), &ShippingRuleId::new("ship-1")),
            Err(CommandError::NotFound(_))
        ));
    }

    #[test]
    fn test_update_rule_cost() {
        let mut shop = Storefront::open(MemoryStore::new(), defaults::seller_profile());
        let id = ShippingRuleId::new("ship-1");
        let mut out = Vec::new();

        update(&mut shop, &mut out, &id, None, Some(9_000), None).unwrap();
        quote(&shop, &mut out, "DKI Jakarta").unwrap();

        let out = String::from_utf8(out).unwrap();
        assert_eq!(
            out,
            "Updated shipping rule ship-1 for DKI Jakarta\nDKI Jakarta: Rp9.000\n"
        );
        assert!(matches!(
            update(&mut shop, &mut Vec::new(), &ShippingRuleId::new("nope"), None, None, None),
            Err(CommandError::NotFound(_))
        ));
    }
}
