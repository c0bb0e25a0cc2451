//! Customer cart with per-line selection.
//!
//! Only selected lines are checked out. Adding a product selects it;
//! dropping a line to zero quantity removes it along with its selection.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use buraq_core::ProductId;

use crate::models::{CartItem, Product};

/// The active customer's cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    items: Vec<CartItem>,
    selected: BTreeSet<ProductId>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cart lines in the order they were first added.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether a line is marked for checkout.
    #[must_use]
    pub fn is_selected(&self, id: &ProductId) -> bool {
        self.selected.contains(id)
    }

    /// IDs of the lines marked for checkout.
    #[must_use]
    pub const fn selected(&self) -> &BTreeSet<ProductId> {
        &self.selected
    }

    /// Add `quantity` of `product`, merging with an existing line, and mark
    /// the line selected.
    pub fn add(&mut self, product: &Product, quantity: u32) {
        match self.items.iter_mut().find(|item| item.id() == &product.id) {
            Some(item) => item.quantity = item.quantity.saturating_add(quantity),
            None => self.items.push(CartItem::new(product.clone(), quantity)),
        }
        self.selected.insert(product.id.clone());
    }

    /// Set a line's quantity. Zero removes the line and its selection.
    ///
    /// Returns `false` if no line has that ID.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: u32) -> bool {
        if quantity == 0 {
            self.selected.remove(id);
            let before = self.items.len();
            self.items.retain(|item| item.id() != id);
            return self.items.len() != before;
        }

        match self.items.iter_mut().find(|item| item.id() == id) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Flip the selection mark on one line.
    ///
    /// Returns `false` (and changes nothing) if no line has that ID.
    pub fn toggle_selection(&mut self, id: &ProductId) -> bool {
        if !self.items.iter().any(|item| item.id() == id) {
            return false;
        }
        if !self.selected.remove(id) {
            self.selected.insert(id.clone());
        }
        true
    }

    /// Clear the selection if every line is selected, otherwise select
    /// every line.
    pub fn toggle_select_all(&mut self) {
        if self.selected.len() == self.items.len() {
            self.selected.clear();
        } else {
            self.selected = self.items.iter().map(|item| item.id().clone()).collect();
        }
    }

    /// Snapshot of the selected lines, in cart order.
    #[must_use]
    pub fn selected_items(&self) -> Vec<CartItem> {
        self.items
            .iter()
            .filter(|item| self.selected.contains(item.id()))
            .cloned()
            .collect()
    }

    /// Remove the selected lines and clear the selection.
    pub fn remove_selected(&mut self) {
        let selected = std::mem::take(&mut self.selected);
        self.items.retain(|item| !selected.contains(item.id()));
    }
}
