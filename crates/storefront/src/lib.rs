//! BURAQ storefront library.
//!
//! Catalogs for the seller and management dashboards, the shopping cart,
//! checkout with shipping rules and vouchers, and order status propagation
//! across the seller, management and customer copies of each order. The
//! customer's order history is mirrored to a key/value store.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod clock;
pub mod config;
pub mod defaults;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;

pub use error::{Result, StoreError};
pub use state::{Dashboard, PlacedOrder, Storefront};
