//! Order domain types.
//!
//! An [`Order`] is the immutable record of a completed checkout. After
//! creation only its `status` moves, and only through status propagation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use buraq_core::{Email, EmailError, OrderId, OrderStatus, Price};

use super::cart::CartItem;

/// A placed customer order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_email: Email,
    /// Street address joined with the province (`"Jl. Merdeka 1, DKI Jakarta"`).
    pub customer_address: String,
    pub customer_province: String,
    pub items: Vec<CartItem>,
    pub subtotal: Price,
    pub shipping_cost: Price,
    /// The voucher's own code (not the casing the customer typed).
    pub voucher_used: Option<String>,
    pub total: Price,
    pub status: OrderStatus,
    pub date: DateTime<Utc>,
}

impl Order {
    /// Number of units across all line items.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}

/// Errors from validating checkout form input.
#[derive(Debug, Clone, Error)]
pub enum CustomerDataError {
    /// A required text field is blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The email address is malformed.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),
}

/// Customer-supplied checkout details, validated at the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerData {
    pub name: String,
    pub phone: Option<String>,
    pub email: Email,
    pub province: String,
    /// Street details only; the province is appended when the order is built.
    pub address: String,
    pub voucher_code: Option<String>,
}

impl CustomerData {
    /// Validate raw form input.
    ///
    /// Text fields are trimmed. Blank `phone` and `voucher_code` become
    /// `None`; blank `name`, `province` or `address` are rejected.
    ///
    /// # Errors
    ///
    /// Returns `CustomerDataError::MissingField` for a blank required field
    /// and `CustomerDataError::InvalidEmail` for a malformed email.
    pub fn new(
        name: &str,
        phone: Option<&str>,
        email: &str,
        province: &str,
        address: &str,
        voucher_code: Option<&str>,
    ) -> Result<Self, CustomerDataError> {
        Ok(Self {
            name: required("name", name)?,
            phone: optional(phone),
            email: Email::parse(email)?,
            province: required("province", province)?,
            address: required("address", address)?,
            voucher_code: optional(voucher_code),
        })
    }

    /// Street address joined with the province.
    #[must_use]
    pub fn full_address(&self) -> String {
        format!("{}, {}", self.address, self.province)
    }
}

fn required(field: &'static str, value: &str) -> Result<String, CustomerDataError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CustomerDataError::MissingField(field));
    }
    Ok(value.to_string())
}

fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_data_trims_and_normalizes_optionals() {
        let data = CustomerData::new(
            "  Budi ",
            Some("   "),
            "budi@buraq.id",
            "DKI Jakarta",
            "Jl. Merdeka 1",
            Some(""),
        )
        .unwrap();

        assert_eq!(data.name, "Budi");
        assert_eq!(data.phone, None);
        assert_eq!(data.voucher_code, None);
        assert_eq!(data.full_address(), "Jl. Merdeka 1, DKI Jakarta");
    }

    #[test]
    fn test_customer_data_rejects_blank_required_fields() {
        let err = CustomerData::new("Budi", None, "budi@buraq.id", " ", "Jl. Merdeka 1", None)
            .unwrap_err();
        assert!(matches!(err, CustomerDataError::MissingField("province")));

        let err = CustomerData::new("", None, "budi@buraq.id", "Bali", "Jl. Kuta", None)
            .unwrap_err();
        assert!(matches!(err, CustomerDataError::MissingField("name")));
    }

    #[test]
    fn test_customer_data_rejects_bad_email() {
        let err = CustomerData::new("Budi", None, "budi", "Bali", "Jl. Kuta", None).unwrap_err();
        assert!(matches!(err, CustomerDataError::InvalidEmail(_)));
    }

    #[test]
    fn test_order_serializes_with_camel_case_fields() {
        let order = Order {
            id: OrderId::new("ORD-1"),
            customer_name: "Budi".to_string(),
            customer_phone: None,
            customer_email: Email::parse("budi@buraq.id").unwrap(),
            customer_address: "Jl. Merdeka 1, DKI Jakarta".to_string(),
            customer_province: "DKI Jakarta".to_string(),
            items: Vec::new(),
            subtotal: Price::ZERO,
            shipping_cost: Price::ZERO,
            voucher_used: None,
            total: Price::ZERO,
            status: OrderStatus::Pending,
            date: DateTime::parse_from_rfc3339("2026-01-02T03:04:05Z")
                .unwrap()
                .with_timezone(&Utc),
        };

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["customerName"], "Budi");
        assert_eq!(json["shippingCost"], 0);
        assert!(json["voucherUsed"].is_null());
        assert_eq!(json["status"], "Pending");
        assert_eq!(json["date"], "2026-01-02T03:04:05Z");
    }
}
