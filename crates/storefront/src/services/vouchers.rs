//! Voucher lookup.

use serde::{Deserialize, Serialize};

use crate::models::Voucher;

/// The seller's vouchers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vouchers(Vec<Voucher>);

impl Vouchers {
    /// All vouchers, active or not.
    #[must_use]
    pub fn all(&self) -> &[Voucher] {
        &self.0
    }

    /// The active voucher whose code matches `code`, ignoring case.
    #[must_use]
    pub fn find_active(&self, code: &str) -> Option<&Voucher> {
        self.0.iter().find(|v| v.is_active && v.matches_code(code))
    }

    /// Any voucher (active or not) whose code matches `code`.
    #[must_use]
    pub fn find_by_code(&self, code: &str) -> Option<&Voucher> {
        self.0.iter().find(|v| v.matches_code(code))
    }

    /// Replace the voucher with the same ID. Returns `false` if absent.
    pub fn update(&mut self, voucher: Voucher) -> bool {
        match self.0.iter_mut().find(|v| v.id == voucher.id) {
            Some(slot) => {
                *slot = voucher;
                true
            }
            None => false,
        }
    }
}

impl From<Vec<Voucher>> for Vouchers {
    fn from(vouchers: Vec<Voucher>) -> Self {
        Self(vouchers)
    }
}
