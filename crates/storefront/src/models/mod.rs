//! Domain models for the storefront.
//!
//! These are plain records; the rules that move them around live in
//! [`crate::services`].

pub mod cart;
pub mod order;
pub mod product;
pub mod profile;
pub mod promotion;
pub mod shipping;
pub mod voucher;

pub use cart::CartItem;
pub use order::{CustomerData, CustomerDataError, Order};
pub use product::{Product, SellerInfo};
pub use profile::SellerProfile;
pub use promotion::BoostedProduct;
pub use shipping::ShippingRule;
pub use voucher::Voucher;
