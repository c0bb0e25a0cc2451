//! Order commands.

use std::io::Write;

use buraq_core::{OrderId, OrderStatus};
use buraq_storefront::services::StatusUpdates;
use buraq_storefront::storage::KeyValueStore;
use buraq_storefront::{Dashboard, Storefront};

use super::CommandError;

/// Which copy of the orders to list.
#[derive(Debug, Clone, Copy)]
pub enum View {
    Dashboard(Dashboard),
    Customer,
}

/// List orders, newest first.
pub fn list<S: KeyValueStore>(
    shop: &Storefront<S>,
    out: &mut impl Write,
    view: View,
) -> Result<(), CommandError> {
    let book = match view {
        View::Dashboard(dashboard) => shop.orders(dashboard),
        View::Customer => shop.customer_orders(),
    };

    if book.is_empty() {
        writeln!(out, "No orders.")?;
        return Ok(());
    }
    for order in book.orders() {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{} items\t{}",
            order.id,
            order.date.format("%Y-%m-%d %H:%M"),
            order.status,
            order.customer_name,
            order.item_count(),
            order.total
        )?;
    }
    Ok(())
}

/// Apply status changes to every copy of the named orders.
pub fn set_status<S: KeyValueStore>(
    shop: &mut Storefront<S>,
    out: &mut impl Write,
    changes: Vec<(String, OrderStatus)>,
) -> Result<(), CommandError> {
    let updates: StatusUpdates = changes
        .into_iter()
        .map(|(id, status)| (OrderId::new(id), status))
        .collect();

    let report = shop.batch_update_order_statuses(&updates);
    writeln!(
        out,
        "Updated {} seller, {} management and {} customer orders",
        report.seller, report.management, report.customer
    )?;
    if !report.persisted {
        tracing::warn!("Customer order history could not be saved");
    }
    Ok(())
}

/// Delete an order from both dashboards.
pub fn delete<S: KeyValueStore>(
    shop: &mut Storefront<S>,
    out: &mut impl Write,
    id: &str,
) -> Result<(), CommandError> {
    let id = OrderId::new(id);
    if !shop.delete_order(&id) {
        return Err(CommandError::NotFound(format!("order {id}")));
    }
    writeln!(out, "Deleted order {id}")?;
    Ok(())
}
