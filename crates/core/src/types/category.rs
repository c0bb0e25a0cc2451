//! Product categories.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returned when a category label or slug is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category: {0}")]
pub struct CategoryError(pub String);

/// The closed set of product categories.
///
/// Serialized with the storefront's Indonesian display labels so stored
/// products and orders stay compatible with the web client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Fashion Remaja")]
    TeenFashion,
    #[serde(rename = "Fashion Anak-anak")]
    KidsFashion,
    #[serde(rename = "Makanan")]
    Food,
    #[serde(rename = "Minuman")]
    Drinks,
    #[serde(rename = "Alat-alat Rumah Tangga")]
    Household,
    #[serde(rename = "Alat Elektronik")]
    Electronics,
    #[serde(rename = "Lain-lain")]
    Others,
}

impl Category {
    /// Every category, in catalog display order.
    pub const ALL: [Self; 7] = [
        Self::TeenFashion,
        Self::KidsFashion,
        Self::Food,
        Self::Drinks,
        Self::Household,
        Self::Electronics,
        Self::Others,
    ];

    /// Display label shown to shoppers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::TeenFashion => "Fashion Remaja",
            Self::KidsFashion => "Fashion Anak-anak",
            Self::Food => "Makanan",
            Self::Drinks => "Minuman",
            Self::Household => "Alat-alat Rumah Tangga",
            Self::Electronics => "Alat Elektronik",
            Self::Others => "Lain-lain",
        }
    }

    /// Short ASCII slug for command-line use.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::TeenFashion => "teen-fashion",
            Self::KidsFashion => "kids-fashion",
            Self::Food => "food",
            Self::Drinks => "drinks",
            Self::Household => "household",
            Self::Electronics => "electronics",
            Self::Others => "others",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Category {
    type Err = CategoryError;

    /// Accepts either the slug or the display label, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.slug().eq_ignore_ascii_case(s) || c.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| CategoryError(s.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_uses_labels() {
        assert_eq!(
            serde_json::to_string(&Category::Household).unwrap(),
            "\"Alat-alat Rumah Tangga\""
        );
        let parsed: Category = serde_json::from_str("\"Minuman\"").unwrap();
        assert_eq!(parsed, Category::Drinks);
    }

    #[test]
    fn test_from_str_accepts_slug_and_label() {
        assert_eq!("food".parse::<Category>(), Ok(Category::Food));
        assert_eq!("makanan".parse::<Category>(), Ok(Category::Food));
        assert_eq!(
            "Alat Elektronik".parse::<Category>(),
            Ok(Category::Electronics)
        );
        assert!("weapons".parse::<Category>().is_err());
    }

    #[test]
    fn test_labels_round_trip_through_display() {
        for category in Category::ALL {
            assert_eq!(category.to_string().parse::<Category>(), Ok(category));
        }
    }
}
