//! Wire types for the remote catalog API
//!
//! The remote service models one logical product as two catalog objects:
//! an `ITEM` carrying the descriptive fields and an `ITEM_VARIATION`
//! carrying price/sku/upc, linked through the variation's `item_id`.
//! Upsert and retrieve responses return a flat object list; pairing the
//! list back into exactly one item plus one linked variation is the
//! caller's response-validation step, not the transport's.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Catalog object type discriminator for items.
pub const OBJECT_TYPE_ITEM: &str = "ITEM";
/// Catalog object type discriminator for item variations.
pub const OBJECT_TYPE_VARIATION: &str = "ITEM_VARIATION";
/// The only pricing model this integration uses.
pub const PRICING_TYPE_FIXED: &str = "FIXED_PRICING";
/// Currency for all price amounts.
pub const CURRENCY_USD: &str = "USD";
/// Number of leading name characters sent as the item abbreviation.
pub const ABBREVIATION_CHARS: usize = 3;

/// An integer amount of money in minor units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub amount: i64,
    pub currency: String,
}

impl Money {
    /// US-dollar amount in cents.
    pub fn cents(amount: i64) -> Self {
        Self {
            amount,
            currency: CURRENCY_USD.to_string(),
        }
    }
}

/// Descriptive fields of a catalog item.
///
/// All fields are optional on the wire: update requests carry only the
/// fields being changed (the remote service merges), while responses
/// carry the full current state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abbreviation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_online: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_for_pickup: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_electronically: Option<bool>,
}

/// Price-bearing fields of a catalog item variation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogVariation {
    /// Id of the parent item this variation belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_money: Option<Money>,
}

/// One object in the remote catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogObject {
    /// Remote-assigned id; absent on create requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub object_type: String,
    /// Optimistic concurrency token; changes on every write.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_deleted: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub present_at_all_locations: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_data: Option<CatalogItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variation_data: Option<CatalogVariation>,
}

impl CatalogObject {
    pub fn is_item(&self) -> bool {
        self.object_type == OBJECT_TYPE_ITEM
    }

    pub fn is_variation(&self) -> bool {
        self.object_type == OBJECT_TYPE_VARIATION
    }
}

/// Transport-level error entry relayed by the remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteApiError {
    pub category: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Raw object list returned by upsert and retrieve calls.
///
/// Deliberately unvalidated: object counts, pair linkage and field echoes
/// are checked by the server's response validator, which turns this into
/// a [`CatalogPair`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogObjects {
    #[serde(default)]
    pub objects: Vec<CatalogObject>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<RemoteApiError>,
}

/// Body of a pair upsert request.
///
/// The request side is a typed pair: exactly one item and one variation,
/// by construction. `idempotency_key` is a per-call correlation value,
/// unrelated to any client-facing id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertPairRequest {
    pub idempotency_key: String,
    pub item: CatalogObject,
    pub variation: CatalogObject,
}

/// Body of a batch retrieve request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievePairRequest {
    pub object_ids: Vec<String>,
    pub include_related_objects: bool,
}

/// Response to a pair delete. Deleting an item cascades to its variation,
/// so both ids are reported.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeletePairResponse {
    #[serde(default)]
    pub deleted_object_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<RemoteApiError>,
}

/// The two-object remote representation, validated into one aggregate.
///
/// Holds exactly one item and exactly one variation by type; the 1:1
/// multiplicity is enforced when the server's response validator builds
/// this from a [`CatalogObjects`] list.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogPair {
    pub item_id: String,
    pub variation_id: String,
    pub version: i64,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
    pub item: CatalogItem,
    pub variation: CatalogVariation,
}
