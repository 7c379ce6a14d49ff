//! Adapter boundary and request translation
//!
//! [`RemoteCatalog`] is the only network dependency of the edge service.
//! The translation here is a stateless mapping from the internal upsert
//! shape to the remote two-object graph; it performs no validation.

use async_trait::async_trait;

use crate::error::RemoteResult;
use crate::types::{
    ABBREVIATION_CHARS, CatalogItem, CatalogObject, CatalogObjects, CatalogVariation,
    DeletePairResponse, Money, OBJECT_TYPE_ITEM, OBJECT_TYPE_VARIATION, PRICING_TYPE_FIXED,
};

/// Internal upsert request shape.
///
/// For creates every canonical field is set and the remote ids are `None`.
/// For updates the remote ids and `version` come from the cache and only
/// the fields being changed are set; the remote service merges the rest.
/// Callers normalize `name` and `product_type` before building this.
#[derive(Debug, Clone, Default)]
pub struct CatalogUpsert {
    pub name: Option<String>,
    pub product_type: Option<String>,
    pub cost_in_cents: Option<i64>,
    pub description: Option<String>,
    pub label_color: Option<String>,
    pub sku: Option<String>,
    pub upc: Option<String>,
    pub available_online: Option<bool>,
    pub available_for_pickup: Option<bool>,
    pub available_electronically: Option<bool>,
    /// Remote item id; set on updates, `None` on creates.
    pub item_id: Option<String>,
    /// Remote variation id; set on updates, `None` on creates.
    pub variation_id: Option<String>,
    /// Optimistic concurrency token; required by the remote on updates.
    pub version: Option<i64>,
}

impl CatalogUpsert {
    pub fn is_update(&self) -> bool {
        self.item_id.is_some()
    }
}

/// Narrow interface over the remote catalog's item/variation operations.
///
/// Implementations: [`crate::HttpCatalog`] for the real service, and
/// `MemoryCatalog` (feature `mock`) as an in-process test double.
#[async_trait]
pub trait RemoteCatalog: Send + Sync {
    /// Create or update one item+variation pair.
    ///
    /// `idempotency_key` is a server-generated correlation id for this
    /// physical call, distinct from any client-supplied product id.
    async fn upsert_pair(
        &self,
        idempotency_key: &str,
        upsert: &CatalogUpsert,
    ) -> RemoteResult<CatalogObjects>;

    /// Retrieve the full current state of a pair by its remote ids.
    async fn retrieve_pair(
        &self,
        item_id: &str,
        variation_id: &str,
    ) -> RemoteResult<CatalogObjects>;

    /// Delete a pair by item id. Deletion cascades to the variation, so
    /// the variation id must not be passed separately.
    async fn delete_pair(&self, item_id: &str) -> RemoteResult<DeletePairResponse>;
}

/// First `ABBREVIATION_CHARS` characters of a name, for the item record.
pub fn abbreviate(name: &str) -> String {
    name.chars().take(ABBREVIATION_CHARS).collect()
}

/// Build the item and variation objects for an upsert call.
///
/// The variation is linked to the item via `item_id`; on creates, where
/// no remote id exists yet, the link is left for the remote service to
/// assign together with the ids.
pub fn build_upsert_objects(upsert: &CatalogUpsert) -> (CatalogObject, CatalogObject) {
    let item = CatalogObject {
        id: upsert.item_id.clone(),
        object_type: OBJECT_TYPE_ITEM.to_string(),
        version: upsert.version,
        item_data: Some(CatalogItem {
            name: upsert.name.clone(),
            abbreviation: upsert.name.as_deref().map(abbreviate),
            description: upsert.description.clone(),
            label_color: upsert.label_color.clone(),
            product_type: upsert.product_type.clone(),
            available_online: upsert.available_online,
            available_for_pickup: upsert.available_for_pickup,
            available_electronically: upsert.available_electronically,
        }),
        ..Default::default()
    };

    let variation = CatalogObject {
        id: upsert.variation_id.clone(),
        object_type: OBJECT_TYPE_VARIATION.to_string(),
        version: upsert.version,
        variation_data: Some(CatalogVariation {
            item_id: upsert.item_id.clone(),
            name: upsert.name.clone(),
            sku: upsert.sku.clone(),
            upc: upsert.upc.clone(),
            pricing_type: Some(PRICING_TYPE_FIXED.to_string()),
            price_money: upsert.cost_in_cents.map(Money::cents),
        }),
        ..Default::default()
    };

    (item, variation)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_upsert() -> CatalogUpsert {
        CatalogUpsert {
            name: Some("WIDGET".to_string()),
            product_type: Some("FLOWER".to_string()),
            cost_in_cents: Some(2500),
            sku: Some("SKU-1".to_string()),
            available_online: Some(true),
            ..Default::default()
        }
    }

    #[test]
    fn abbreviation_is_first_three_chars() {
        assert_eq!(abbreviate("WIDGET"), "WID");
        assert_eq!(abbreviate("AB"), "AB");
        assert_eq!(abbreviate(""), "");
    }

    #[test]
    fn create_builds_item_and_variation_without_ids() {
        let (item, variation) = build_upsert_objects(&create_upsert());

        assert!(item.is_item());
        assert!(item.id.is_none());
        let item_data = item.item_data.unwrap();
        assert_eq!(item_data.name.as_deref(), Some("WIDGET"));
        assert_eq!(item_data.abbreviation.as_deref(), Some("WID"));
        assert_eq!(item_data.product_type.as_deref(), Some("FLOWER"));
        assert_eq!(item_data.available_online, Some(true));

        assert!(variation.is_variation());
        assert!(variation.id.is_none());
        let var_data = variation.variation_data.unwrap();
        assert_eq!(var_data.sku.as_deref(), Some("SKU-1"));
        assert_eq!(var_data.pricing_type.as_deref(), Some(PRICING_TYPE_FIXED));
        assert_eq!(var_data.price_money, Some(Money::cents(2500)));
    }

    #[test]
    fn update_carries_ids_version_and_only_set_fields() {
        let upsert = CatalogUpsert {
            cost_in_cents: Some(3000),
            item_id: Some("I-1".to_string()),
            variation_id: Some("V-1".to_string()),
            version: Some(7),
            ..Default::default()
        };
        assert!(upsert.is_update());

        let (item, variation) = build_upsert_objects(&upsert);
        assert_eq!(item.id.as_deref(), Some("I-1"));
        assert_eq!(item.version, Some(7));
        assert!(item.item_data.unwrap().name.is_none());

        assert_eq!(variation.id.as_deref(), Some("V-1"));
        let var_data = variation.variation_data.unwrap();
        assert_eq!(var_data.item_id.as_deref(), Some("I-1"));
        assert_eq!(var_data.price_money, Some(Money::cents(3000)));
        assert!(var_data.sku.is_none());
    }
}
