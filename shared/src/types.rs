//! Domain types: product categories and listing sort parameters
//!
//! Product types form a closed set. Values are normalized (trimmed,
//! uppercased) before storage or comparison anywhere in the system, so
//! `"  flower "` and `"FLOWER"` name the same category.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Normalize a user-supplied name or category for storage and comparison.
pub fn normalize(value: &str) -> String {
    value.trim().to_uppercase()
}

/// The recognized product categories.
///
/// Serialized in SCREAMING_SNAKE_CASE, matching the normalized wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductType {
    Flower,
    Topical,
    Vaporizer,
    Edible,
    Preroll,
    Concentrate,
    Tincture,
    Pet,
    Accessory,
    Other,
}

/// Unrecognized product type error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized product type: {0}")]
pub struct InvalidProductType(pub String);

impl ProductType {
    /// Parse a raw value, normalizing it first.
    pub fn parse(raw: &str) -> Result<Self, InvalidProductType> {
        match normalize(raw).as_str() {
            "FLOWER" => Ok(Self::Flower),
            "TOPICAL" => Ok(Self::Topical),
            "VAPORIZER" => Ok(Self::Vaporizer),
            "EDIBLE" => Ok(Self::Edible),
            "PREROLL" => Ok(Self::Preroll),
            "CONCENTRATE" => Ok(Self::Concentrate),
            "TINCTURE" => Ok(Self::Tincture),
            "PET" => Ok(Self::Pet),
            "ACCESSORY" => Ok(Self::Accessory),
            "OTHER" => Ok(Self::Other),
            other => Err(InvalidProductType(other.to_string())),
        }
    }

    /// The normalized string form, as stored and sent over the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flower => "FLOWER",
            Self::Topical => "TOPICAL",
            Self::Vaporizer => "VAPORIZER",
            Self::Edible => "EDIBLE",
            Self::Preroll => "PREROLL",
            Self::Concentrate => "CONCENTRATE",
            Self::Tincture => "TINCTURE",
            Self::Pet => "PET",
            Self::Accessory => "ACCESSORY",
            Self::Other => "OTHER",
        }
    }
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProductType {
    type Err = InvalidProductType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Fields the cached listing can be sorted by.
///
/// Listing is served entirely from the local cache, so only cached fields
/// are sortable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    ClientProductId,
    Name,
    ProductType,
    CostInCents,
}

/// Unknown sort field error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort field: {0}")]
pub struct InvalidSortField(pub String);

impl SortField {
    /// Parse a query-string value against the allow-list.
    pub fn parse(raw: &str) -> Result<Self, InvalidSortField> {
        match raw.trim() {
            "product_id" | "client_product_id" => Ok(Self::ClientProductId),
            "name" => Ok(Self::Name),
            "product_type" => Ok(Self::ProductType),
            "cost_in_cents" => Ok(Self::CostInCents),
            other => Err(InvalidSortField(other.to_string())),
        }
    }
}

/// Listing sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Unknown sort order error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort order: {0}")]
pub struct InvalidSortOrder(pub String);

impl SortOrder {
    /// Parse a query-string value ("asc" / "desc").
    pub fn parse(raw: &str) -> Result<Self, InvalidSortOrder> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            other => Err(InvalidSortOrder(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_normalizes_case_and_whitespace() {
        assert_eq!(ProductType::parse("  flower "), Ok(ProductType::Flower));
        assert_eq!(ProductType::parse("Edible"), Ok(ProductType::Edible));
        assert_eq!(ProductType::parse("VAPORIZER"), Ok(ProductType::Vaporizer));
    }

    #[test]
    fn parse_rejects_unknown_types() {
        let err = ProductType::parse("beverage").unwrap_err();
        assert_eq!(err, InvalidProductType("BEVERAGE".to_string()));
    }

    #[test]
    fn serde_uses_normalized_form() {
        let json = serde_json::to_string(&ProductType::Preroll).unwrap();
        assert_eq!(json, "\"PREROLL\"");
        let back: ProductType = serde_json::from_str("\"CONCENTRATE\"").unwrap();
        assert_eq!(back, ProductType::Concentrate);
    }

    #[test]
    fn sort_field_allow_list() {
        assert_eq!(SortField::parse("cost_in_cents"), Ok(SortField::CostInCents));
        assert_eq!(SortField::parse("product_id"), Ok(SortField::ClientProductId));
        assert!(SortField::parse("version").is_err());
    }

    #[test]
    fn sort_order_accepts_both_spellings() {
        assert_eq!(SortOrder::parse("desc"), Ok(SortOrder::Desc));
        assert_eq!(SortOrder::parse("ASCENDING"), Ok(SortOrder::Asc));
    }

    #[test]
    fn sort_order_errors_name_the_order_not_the_field() {
        let err = SortOrder::parse("sideways").unwrap_err();
        assert_eq!(err, InvalidSortOrder("sideways".to_string()));
        assert_eq!(err.to_string(), "unknown sort order: sideways");
    }
}
