//! Voucher type.

use serde::{Deserialize, Serialize};

use buraq_core::{Price, VoucherId};

/// A free-shipping voucher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voucher {
    pub id: VoucherId,
    pub name: String,
    pub code: String,
    pub description: String,
    pub is_active: bool,
    /// Subtotal the order must reach for the voucher to apply.
    pub minimum_purchase: Price,
}

impl Voucher {
    /// Whether `code` names this voucher (case-insensitive, surrounding
    /// whitespace ignored).
    #[must_use]
    pub fn matches_code(&self, code: &str) -> bool {
        self.code.to_lowercase() == code.trim().to_lowercase()
    }
}
