//! Storefront state holder.
//!
//! [`Storefront`] owns every collection the storefront works with. Each
//! collection has exactly one owner field; orders are deliberately kept as
//! three independent copies (seller, management, customer history) and
//! kept in step by [`Storefront::place_order`] and
//! [`Storefront::batch_update_order_statuses`].
//!
//! The customer history is mirrored to the key/value store after every
//! change. A failed mirror write is logged and reported, never returned as
//! an error: the in-memory copy stays authoritative for the session.

use std::mem;

use tracing::{error, info, instrument, warn};

use buraq_core::{OrderId, Price, ProductId, ShippingRuleId};

use crate::clock::{Clock, SystemClock};
use crate::defaults;
use crate::error::{Result, StoreError};
use crate::models::{
    BoostedProduct, CustomerData, Order, Product, SellerProfile, ShippingRule, Voucher,
};
use crate::services::checkout::{self, CheckoutError};
use crate::services::{
    Boosts, Cart, Catalog, OrderBook, OrderIdGenerator, PropagationReport, ShippingRules,
    StatusUpdates, Vouchers,
};
use crate::storage::session::{self, SessionSnapshot};
use crate::storage::{KeyValueStore, history};

/// Which dashboard an operation acts for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dashboard {
    /// The main seller.
    Seller,
    /// The management (sub-seller) account.
    Management,
}

/// A successfully placed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedOrder {
    pub order: Order,
    /// Whether the updated customer history reached durable storage.
    pub persisted: bool,
}

/// The storefront's in-memory state plus its durable store.
#[derive(Debug)]
pub struct Storefront<S> {
    store: S,
    clock: Box<dyn Clock>,
    order_ids: OrderIdGenerator,
    seller_profile: SellerProfile,
    management_profile: SellerProfile,
    seller_products: Catalog,
    management_products: Catalog,
    cart: Cart,
    seller_orders: OrderBook,
    management_orders: OrderBook,
    customer_orders: OrderBook,
    shipping_rules: ShippingRules,
    vouchers: Vouchers,
    boosts: Boosts,
    /// Set while the stored customer history could not be read. Writes are
    /// held back until a read succeeds and the stored orders are merged in.
    history_unreadable: bool,
}

impl<S: KeyValueStore> Storefront<S> {
    /// Open a storefront on `store`.
    ///
    /// Loads the customer history (a corrupt history is cleared and starts
    /// empty) and seeds the default shipping rules and vouchers. If the
    /// history cannot be read it starts empty in memory and the stored copy
    /// is left untouched.
    pub fn open(mut store: S, seller_profile: SellerProfile) -> Self {
        let (customer_orders, history_unreadable) = match history::load(&mut store) {
            Ok(orders) => (OrderBook::from(orders), false),
            Err(e) => {
                error!(error = %e, "Failed to read customer order history");
                (OrderBook::new(), true)
            }
        };
        let mut order_ids = OrderIdGenerator::new();
        if let Some(millis) = customer_orders.latest_id_millis() {
            order_ids.observe(millis);
        }

        Self {
            store,
            clock: Box::new(SystemClock),
            order_ids,
            seller_profile,
            management_profile: defaults::management_profile(),
            seller_products: Catalog::new(),
            management_products: Catalog::new(),
            cart: Cart::new(),
            seller_orders: OrderBook::new(),
            management_orders: OrderBook::new(),
            customer_orders,
            shipping_rules: defaults::shipping_rules(),
            vouchers: defaults::vouchers(),
            boosts: Boosts::default(),
            history_unreadable,
        }
    }

    /// Replace the time source.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Everything in memory except the customer history.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            seller_profile: self.seller_profile.clone(),
            management_profile: self.management_profile.clone(),
            seller_products: self.seller_products.clone(),
            management_products: self.management_products.clone(),
            cart: self.cart.clone(),
            seller_orders: self.seller_orders.clone(),
            management_orders: self.management_orders.clone(),
            shipping_rules: self.shipping_rules.clone(),
            vouchers: self.vouchers.clone(),
            boosted_products: self.boosts.clone(),
        }
    }

    /// Restore a saved session snapshot, if there is one.
    ///
    /// Returns whether a snapshot was found.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the snapshot cannot be read or
    /// decoded.
    #[instrument(skip(self))]
    pub fn restore_session(&mut self) -> Result<bool> {
        let Some(snapshot) = session::load(&self.store)? else {
            return Ok(false);
        };

        self.seller_profile = snapshot.seller_profile;
        self.management_profile = snapshot.management_profile;
        self.seller_products = snapshot.seller_products;
        self.management_products = snapshot.management_products;
        self.cart = snapshot.cart;
        self.seller_orders = snapshot.seller_orders;
        self.management_orders = snapshot.management_orders;
        self.shipping_rules = snapshot.shipping_rules;
        self.vouchers = snapshot.vouchers;
        self.boosts = snapshot.boosted_products;

        for book in [&self.seller_orders, &self.management_orders] {
            if let Some(millis) = book.latest_id_millis() {
                self.order_ids.observe(millis);
            }
        }

        info!(
            products = self.seller_products.len() + self.management_products.len(),
            cart_lines = self.cart.items().len(),
            "Restored session"
        );
        Ok(true)
    }

    /// Save the session snapshot.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the write fails.
    pub fn save_session(&mut self) -> Result<()> {
        let snapshot = self.snapshot();
        session::save(&mut self.store, &snapshot)?;
        Ok(())
    }

    /// The underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the underlying store.
    pub const fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    // =========================================================================
    // Read access
    // =========================================================================

    /// Profile of a dashboard account.
    #[must_use]
    pub const fn profile(&self, dashboard: Dashboard) -> &SellerProfile {
        match dashboard {
            Dashboard::Seller => &self.seller_profile,
            Dashboard::Management => &self.management_profile,
        }
    }

    /// A dashboard's own catalog.
    #[must_use]
    pub const fn catalog(&self, dashboard: Dashboard) -> &Catalog {
        match dashboard {
            Dashboard::Seller => &self.seller_products,
            Dashboard::Management => &self.management_products,
        }
    }

    /// A dashboard's copy of the orders.
    #[must_use]
    pub const fn orders(&self, dashboard: Dashboard) -> &OrderBook {
        match dashboard {
            Dashboard::Seller => &self.seller_orders,
            Dashboard::Management => &self.management_orders,
        }
    }

    /// The customer's order history.
    #[must_use]
    pub const fn customer_orders(&self) -> &OrderBook {
        &self.customer_orders
    }

    /// The active cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The shipping table.
    #[must_use]
    pub const fn shipping_rules(&self) -> &ShippingRules {
        &self.shipping_rules
    }

    /// The vouchers.
    #[must_use]
    pub const fn vouchers(&self) -> &Vouchers {
        &self.vouchers
    }

    /// What shoppers browse: the seller's products, then management's.
    pub fn customer_catalog(&self) -> impl Iterator<Item = &Product> {
        self.seller_products
            .products()
            .iter()
            .chain(self.management_products.products())
    }

    /// Look up a product across both catalogs.
    #[must_use]
    pub fn find_product(&self, id: &ProductId) -> Option<&Product> {
        self.seller_products
            .get(id)
            .or_else(|| self.management_products.get(id))
    }

    /// Products with a running boost, in boost order. Boosts whose product
    /// no longer exists are skipped.
    #[must_use]
    pub fn featured_products(&self) -> Vec<&Product> {
        let now = self.clock.now();
        self.boosts
            .active_at(now)
            .filter_map(|boost| self.find_product(&boost.product_id))
            .collect()
    }

    /// Boosts that have not yet expired.
    #[must_use]
    pub fn active_boosts(&self) -> Vec<&BoostedProduct> {
        self.boosts.active_at(self.clock.now()).collect()
    }

    /// Standard shipping cost to `province`.
    #[must_use]
    pub fn shipping_quote(&self, province: &str) -> Price {
        self.shipping_rules.quote(province)
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Put `quantity` of a catalog product in the cart and select it.
    ///
    /// # Errors
    ///
    /// Returns `BadRequest` for a zero quantity and `NotFound` for an
    /// unknown product.
    #[instrument(skip(self, product_id), fields(product_id = %product_id))]
    pub fn add_to_cart(&mut self, product_id: &ProductId, quantity: u32) -> Result<()> {
        if quantity == 0 {
            return Err(StoreError::BadRequest("quantity must be at least 1".to_string()));
        }
        let product = self
            .find_product(product_id)
            .ok_or_else(|| StoreError::NotFound(format!("product {product_id}")))?
            .clone();
        self.cart.add(&product, quantity);
        Ok(())
    }

    /// Set a cart line's quantity; zero removes the line.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the product is not in the cart.
    pub fn update_cart_quantity(&mut self, product_id: &ProductId, quantity: u32) -> Result<()> {
        if self.cart.set_quantity(product_id, quantity) {
            Ok(())
        } else {
            Err(StoreError::NotFound(format!("cart line {product_id}")))
        }
    }

    /// Flip a cart line's checkout selection.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the product is not in the cart.
    pub fn toggle_cart_selection(&mut self, product_id: &ProductId) -> Result<()> {
        if self.cart.toggle_selection(product_id) {
            Ok(())
        } else {
            Err(StoreError::NotFound(format!("cart line {product_id}")))
        }
    }

    /// Select every cart line, or clear the selection if all are selected.
    pub fn toggle_select_all(&mut self) {
        self.cart.toggle_select_all();
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Check out the selected cart lines.
    ///
    /// On success the order is prepended to the seller, management and
    /// customer collections, the customer history is written to storage,
    /// and the purchased lines leave the cart. On failure nothing changes.
    ///
    /// # Errors
    ///
    /// Returns the [`CheckoutError`] that blocked the order.
    #[instrument(skip(self, customer), fields(province = %customer.province))]
    pub fn place_order(
        &mut self,
        customer: &CustomerData,
    ) -> std::result::Result<PlacedOrder, CheckoutError> {
        let quote = checkout::quote(
            self.cart.selected_items(),
            &customer.province,
            customer.voucher_code.as_deref(),
            &self.shipping_rules,
            &self.vouchers,
        )
        .inspect_err(|e| warn!(error = %e, "Checkout rejected"))?;

        let now = self.clock.now();
        let order = checkout::build_order(self.order_ids.next(now), customer, quote, now);

        self.seller_orders = mem::take(&mut self.seller_orders).prepended(order.clone());
        self.management_orders =
            mem::take(&mut self.management_orders).prepended(order.clone());
        self.customer_orders = mem::take(&mut self.customer_orders).prepended(order.clone());
        let persisted = self.persist_customer_orders();

        self.cart.remove_selected();

        info!(
            order_id = %order.id,
            subtotal = %order.subtotal,
            shipping = %order.shipping_cost,
            total = %order.total,
            voucher = ?order.voucher_used,
            persisted,
            "Order placed"
        );
        Ok(PlacedOrder { order, persisted })
    }

    /// Apply a batch of status changes to every copy of the orders, then
    /// write the customer history to storage.
    #[instrument(skip(self, updates), fields(orders = updates.len()))]
    pub fn batch_update_order_statuses(&mut self, updates: &StatusUpdates) -> PropagationReport {
        let (seller_orders, seller) = mem::take(&mut self.seller_orders).with_statuses(updates);
        self.seller_orders = seller_orders;

        let (management_orders, management) =
            mem::take(&mut self.management_orders).with_statuses(updates);
        self.management_orders = management_orders;

        let (customer_orders, customer) =
            mem::take(&mut self.customer_orders).with_statuses(updates);
        self.customer_orders = customer_orders;
        let persisted = self.persist_customer_orders();

        let report = PropagationReport {
            seller,
            management,
            customer,
            persisted,
        };
        info!(
            seller,
            management,
            customer,
            persisted,
            "Propagated order statuses"
        );
        report
    }

    /// Replace a whole order in the seller and management collections.
    ///
    /// Returns whether either collection held the order.
    pub fn update_order(&mut self, order: Order) -> bool {
        let (seller_orders, in_seller) =
            mem::take(&mut self.seller_orders).with_replaced(order.clone());
        self.seller_orders = seller_orders;
        let (management_orders, in_management) =
            mem::take(&mut self.management_orders).with_replaced(order);
        self.management_orders = management_orders;
        in_seller || in_management
    }

    /// Delete an order from the seller and management collections. The
    /// customer's history keeps its copy.
    ///
    /// Returns whether either collection held the order.
    pub fn delete_order(&mut self, id: &OrderId) -> bool {
        let (seller_orders, in_seller) = mem::take(&mut self.seller_orders).without(id);
        self.seller_orders = seller_orders;
        let (management_orders, in_management) =
            mem::take(&mut self.management_orders).without(id);
        self.management_orders = management_orders;
        in_seller || in_management
    }

    fn persist_customer_orders(&mut self) -> bool {
        if self.history_unreadable && !self.recover_customer_history() {
            return false;
        }
        match history::save(&mut self.store, self.customer_orders.orders()) {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, "Failed to save customer orders");
                false
            }
        }
    }

    /// Retry reading the stored history and merge it under the in-memory
    /// orders. Returns whether the stored copy is now safe to overwrite.
    fn recover_customer_history(&mut self) -> bool {
        match history::load(&mut self.store) {
            Ok(stored) => {
                info!(count = stored.len(), "Recovered customer order history");
                self.customer_orders = mem::take(&mut self.customer_orders).merged(stored);
                if let Some(millis) = self.customer_orders.latest_id_millis() {
                    self.order_ids.observe(millis);
                }
                self.history_unreadable = false;
                true
            }
            Err(e) => {
                error!(error = %e, "Customer order history still unreadable, not saving");
                false
            }
        }
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Add a product to a dashboard's catalog, stamped with its profile.
    pub fn add_product(&mut self, dashboard: Dashboard, product: Product) {
        let owner = self.profile(dashboard).seller_info();
        info!(product_id = %product.id, ?dashboard, "Adding product");
        self.catalog_mut(dashboard).add(product, owner);
    }

    /// Replace a product in a dashboard's catalog.
    pub fn update_product(&mut self, dashboard: Dashboard, product: Product) -> bool {
        self.catalog_mut(dashboard).update(product)
    }

    /// Remove a product from a dashboard's catalog. Boosts and cart lines
    /// referring to it are left alone.
    pub fn delete_product(&mut self, dashboard: Dashboard, id: &ProductId) -> bool {
        self.catalog_mut(dashboard).delete(id)
    }

    /// Replace a dashboard's profile.
    pub fn update_profile(&mut self, dashboard: Dashboard, profile: SellerProfile) {
        match dashboard {
            Dashboard::Seller => self.seller_profile = profile,
            Dashboard::Management => self.management_profile = profile,
        }
    }

    const fn catalog_mut(&mut self, dashboard: Dashboard) -> &mut Catalog {
        match dashboard {
            Dashboard::Seller => &mut self.seller_products,
            Dashboard::Management => &mut self.management_products,
        }
    }

    // =========================================================================
    // Shipping, vouchers, boosts
    // =========================================================================

    /// Add a shipping rule ahead of the existing ones.
    pub fn add_shipping_rule(&mut self, rule: ShippingRule) {
        self.shipping_rules.add(rule);
    }

    /// Replace a shipping rule.
    pub fn update_shipping_rule(&mut self, rule: ShippingRule) -> bool {
        self.shipping_rules.update(rule)
    }

    /// Remove a shipping rule.
    pub fn delete_shipping_rule(&mut self, id: &ShippingRuleId) -> bool {
        self.shipping_rules.delete(id)
    }

    /// Replace a voucher.
    pub fn update_voucher(&mut self, voucher: Voucher) -> bool {
        self.vouchers.update(voucher)
    }

    /// Boost a product for `days` days from now.
    ///
    /// # Errors
    ///
    /// Returns `BadRequest` if the expiry date would be out of range.
    pub fn boost_product(&mut self, product_id: ProductId, days: u32) -> Result<BoostedProduct> {
        let now = self.clock.now();
        self.boosts
            .boost(product_id, days, now)
            .ok_or_else(|| StoreError::BadRequest(format!("boost of {days} days is too long")))
    }

    /// Stop boosting a product.
    pub fn remove_boost(&mut self, product_id: &ProductId) -> bool {
        self.boosts.remove(product_id)
    }
}
