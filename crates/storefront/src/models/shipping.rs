//! Shipping rule type.

use serde::{Deserialize, Serialize};

use buraq_core::{Price, ShippingRuleId};

/// Flat shipping cost for one destination province.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingRule {
    pub id: ShippingRuleId,
    /// Province name, compared exactly against the customer's province.
    pub destination: String,
    pub standard_cost: Price,
    pub express_cost: Price,
}
