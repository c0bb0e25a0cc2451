//! Storefront business logic.
//!
//! Each module owns one collection or one rule set and exposes plain
//! methods on it; [`crate::state::Storefront`] wires them together.
//!
//! - [`cart`] - Cart lines and checkout selection
//! - [`catalog`] - Seller and management product catalogs
//! - [`checkout`] - Quoting and building orders
//! - [`orders`] - Order collections and status propagation
//! - [`promotions`] - Boosted products
//! - [`shipping`] - Shipping rules
//! - [`vouchers`] - Voucher lookup

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod orders;
pub mod promotions;
pub mod shipping;
pub mod vouchers;

pub use cart::Cart;
pub use catalog::Catalog;
pub use checkout::{CheckoutError, Quote};
pub use orders::{OrderBook, OrderIdGenerator, PropagationReport, StatusUpdates};
pub use promotions::Boosts;
pub use shipping::ShippingRules;
pub use vouchers::Vouchers;
