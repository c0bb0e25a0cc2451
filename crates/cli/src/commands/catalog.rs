//! Catalog commands.

use std::io::Write;

use buraq_core::{Category, Price, ProductId};
use buraq_storefront::models::{Product, SellerInfo};
use buraq_storefront::storage::KeyValueStore;
use buraq_storefront::{Dashboard, Storefront, defaults};

use super::{CommandError, dashboard_name};

/// Product fields supplied on the command line.
pub struct NewProduct {
    pub id: Option<ProductId>,
    pub name: String,
    pub description: String,
    pub price: u64,
    pub images: Vec<String>,
    pub category: Category,
    pub stock: u32,
}

/// Product fields to change; `None` keeps the current value.
#[derive(Default)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<u64>,
    pub category: Option<Category>,
    pub stock: Option<u32>,
}

/// Add a product to a dashboard's catalog.
pub fn add<S: KeyValueStore>(
    shop: &mut Storefront<S>,
    out: &mut impl Write,
    dashboard: Dashboard,
    new: NewProduct,
) -> Result<(), CommandError> {
    let product = Product {
        id: new.id.unwrap_or_else(ProductId::random),
        name: new.name,
        description: new.description,
        price: Price::new(new.price),
        images: new.images,
        category: new.category,
        stock: new.stock,
        // Stamped with the dashboard's profile by `add_product`
        seller_info: SellerInfo {
            store_name: String::new(),
            profile_picture: String::new(),
        },
    };
    let id = product.id.clone();
    shop.add_product(dashboard, product);
    writeln!(out, "Added product {id} to the {} catalog", dashboard_name(dashboard))?;
    Ok(())
}

/// List a dashboard's catalog, or the shopper view when `dashboard` is `None`,
/// optionally narrowed to one category.
pub fn list<S: KeyValueStore>(
    shop: &Storefront<S>,
    out: &mut impl Write,
    dashboard: Option<Dashboard>,
    category: Option<Category>,
) -> Result<(), CommandError> {
    let products: Vec<&Product> = match (dashboard, category) {
        (Some(dashboard), Some(category)) => {
            shop.catalog(dashboard).in_category(category).collect()
        }
        (Some(dashboard), None) => shop.catalog(dashboard).products().iter().collect(),
        (None, Some(category)) => shop
            .customer_catalog()
            .filter(|product| product.category == category)
            .collect(),
        (None, None) => shop.customer_catalog().collect(),
    };

    if products.is_empty() {
        writeln!(out, "No products.")?;
        return Ok(());
    }
    for product in products {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\tstock {}\t{}\t{}",
            product.id,
            product.name,
            product.price,
            product.category,
            product.stock,
            product.seller_info.store_name,
            product.cover_image().unwrap_or(defaults::PLACEHOLDER_IMAGE_URL)
        )?;
    }
    Ok(())
}

/// Edit a product in a dashboard's catalog.
pub fn update<S: KeyValueStore>(
    shop: &mut Storefront<S>,
    out: &mut impl Write,
    dashboard: Dashboard,
    id: &ProductId,
    changes: ProductChanges,
) -> Result<(), CommandError> {
    let mut product = shop
        .catalog(dashboard)
        .get(id)
        .ok_or_else(|| {
            CommandError::NotFound(format!(
                "product {id} in the {} catalog",
                dashboard_name(dashboard)
            ))
        })?
        .clone();

    if let Some(name) = changes.name {
        product.name = name;
    }
    if let Some(description) = changes.description {
        product.description = description;
    }
    if let Some(price) = changes.price {
        product.price = Price::new(price);
    }
    if let Some(category) = changes.category {
        product.category = category;
    }
    if let Some(stock) = changes.stock {
        product.stock = stock;
    }

    shop.update_product(dashboard, product);
    writeln!(out, "Updated product {id}")?;
    Ok(())
}

/// Delete a product from a dashboard's catalog.
pub fn delete<S: KeyValueStore>(
    shop: &mut Storefront<S>,
    out: &mut impl Write,
    dashboard: Dashboard,
    id: &ProductId,
) -> Result<(), CommandError> {
    if !shop.delete_product(dashboard, id) {
        return Err(CommandError::NotFound(format!(
            "product {id} in the {} catalog",
            dashboard_name(dashboard)
        )));
    }
    writeln!(out, "Deleted product {id}")?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use buraq_storefront::defaults;
    use buraq_storefront::storage::MemoryStore;

    use super::*;

    fn rendang() -> NewProduct {
        NewProduct {
            id: Some(ProductId::new("rendang")),
            name: "Rendang".to_string(),
            description: String::new(),
            price: 45_000,
            images: Vec::new(),
            category: Category::Food,
            stock: 5,
        }
    }

    #[test]
    fn test_add_then_list() {
        let mut shop = Storefront::open(MemoryStore::new(), defaults::seller_profile());
        let mut out = Vec::new();

        add(&mut shop, &mut out, Dashboard::Management, rendang()).unwrap();
        list(&shop, &mut out, None, None).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Added product rendang to the management catalog"));
        assert!(out.contains(&format!(
            "rendang\tRendang\tRp45.000\tMakanan\tstock 5\tManajemen BURAQ\t{}",
            defaults::PLACEHOLDER_IMAGE_URL
        )));
    }

    #[test]
    fn test_delete_unknown_product() {
        let mut shop = Storefront::open(MemoryStore::new(), defaults::seller_profile());
        add(&mut shop, &mut Vec::new(), Dashboard::Management, rendang()).unwrap();

        let id = ProductId::new("rendang");
        let err = delete(&mut shop, &mut Vec::new(), Dashboard::Seller, &id).unwrap_err();
        assert!(matches!(err, CommandError::NotFound(_)));
        assert!(delete(&mut shop, &mut Vec::new(), Dashboard::Management, &id).is_ok());
    }

    #[test]
    fn test_update_changes_only_given_fields() {
        let mut shop = Storefront::open(MemoryStore::new(), defaults::seller_profile());
        let mut new = rendang();
        new.images = vec!["https://img.buraq.id/rendang.jpg".to_string()];
        add(&mut shop, &mut Vec::new(), Dashboard::Seller, new).unwrap();
        let id = ProductId::new("rendang");

        let changes = ProductChanges {
            price: Some(50_000),
            stock: Some(2),
            ..ProductChanges::default()
        };
        let mut out = Vec::new();
        update(&mut shop, &mut out, Dashboard::Seller, &id, changes).unwrap();
        list(&shop, &mut out, Some(Dashboard::Seller), None).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("Updated product rendang\n"));
        assert!(out.contains(
            "rendang\tRendang\tRp50.000\tMakanan\tstock 2\tBURAQ Official Store\t\
             https://img.buraq.id/rendang.jpg"
        ));
    }

    #[test]
    fn test_update_respects_dashboard() {
        let mut shop = Storefront::open(MemoryStore::new(), defaults::seller_profile());
        add(&mut shop, &mut Vec::new(), Dashboard::Seller, rendang()).unwrap();

        let err = update(
            &mut shop,
            &mut Vec::new(),
            Dashboard::Management,
            &ProductId::new("rendang"),
            ProductChanges::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CommandError::NotFound(_)));
    }

    #[test]
    fn test_list_by_category() {
        let mut shop = Storefront::open(MemoryStore::new(), defaults::seller_profile());
        add(&mut shop, &mut Vec::new(), Dashboard::Seller, rendang()).unwrap();
        let mut kipas = rendang();
        kipas.id = Some(ProductId::new("kipas"));
        kipas.category = Category::Electronics;
        add(&mut shop, &mut Vec::new(), Dashboard::Management, kipas).unwrap();

        let mut out = Vec::new();
        list(&shop, &mut out, None, Some(Category::Electronics)).unwrap();
        list(&shop, &mut out, Some(Dashboard::Seller), Some(Category::Food)).unwrap();
        list(&shop, &mut out, Some(Dashboard::Seller), Some(Category::Electronics)).unwrap();

        let lines: Vec<String> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|line| line.split('\t').next().unwrap_or_default().to_string())
            .collect();
        assert_eq!(lines, ["kipas", "rendang", "No products."]);
    }
}
