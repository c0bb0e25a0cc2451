//! Seller profile types.

use serde::{Deserialize, Serialize};

use super::product::SellerInfo;

/// Profile of a dashboard account (the main seller or a management account).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerProfile {
    pub store_name: String,
    pub profile_picture: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl SellerProfile {
    /// The public part of the profile that gets stamped onto products.
    #[must_use]
    pub fn seller_info(&self) -> SellerInfo {
        SellerInfo {
            store_name: self.store_name.clone(),
            profile_picture: self.profile_picture.clone(),
        }
    }
}
