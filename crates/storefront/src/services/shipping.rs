//! Shipping rules and cost lookup.

use serde::{Deserialize, Serialize};
use tracing::debug;

use buraq_core::{Price, ShippingRuleId};

use crate::models::ShippingRule;

/// The seller's shipping table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShippingRules(Vec<ShippingRule>);

impl ShippingRules {
    /// The rules in lookup order.
    #[must_use]
    pub fn rules(&self) -> &[ShippingRule] {
        &self.0
    }

    /// The first rule whose destination equals `province`.
    #[must_use]
    pub fn find(&self, province: &str) -> Option<&ShippingRule> {
        self.0.iter().find(|rule| rule.destination == province)
    }

    /// Standard shipping cost to `province`.
    ///
    /// Provinces without a rule ship for free.
    #[must_use]
    pub fn quote(&self, province: &str) -> Price {
        self.find(province).map_or_else(
            || {
                debug!(province, "No shipping rule for province, charging nothing");
                Price::ZERO
            },
            |rule| rule.standard_cost,
        )
    }

    /// Add a rule in front of the existing ones.
    pub fn add(&mut self, rule: ShippingRule) {
        self.0.insert(0, rule);
    }

    /// Replace the rule with the same ID. Returns `false` if absent.
    pub fn update(&mut self, rule: ShippingRule) -> bool {
        match self.0.iter_mut().find(|r| r.id == rule.id) {
            Some(slot) => {
                *slot = rule;
                true
            }
            None => false,
        }
    }

    /// Remove a rule. Returns `false` if absent.
    pub fn delete(&mut self, id: &ShippingRuleId) -> bool {
        let before = self.0.len();
        self.0.retain(|r| &r.id != id);
        self.0.len() != before
    }
}

impl From<Vec<ShippingRule>> for ShippingRules {
    fn from(rules: Vec<ShippingRule>) -> Self {
        Self(rules)
    }
}
