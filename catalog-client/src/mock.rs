//! In-memory catalog double (feature `mock`)
//!
//! Behaves like the remote service at the adapter boundary: it assigns
//! ids and version tokens, merges update fields into the stored state,
//! enforces optimistic concurrency, and cascades deletes from item to
//! variation. Tests can count calls and inject one-shot failures.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;

use crate::catalog::{CatalogUpsert, RemoteCatalog, abbreviate};
use crate::error::{RemoteError, RemoteResult};
use crate::types::{
    CatalogItem, CatalogObject, CatalogObjects, CatalogVariation, DeletePairResponse, Money,
    OBJECT_TYPE_ITEM, OBJECT_TYPE_VARIATION, PRICING_TYPE_FIXED,
};

#[derive(Debug, Clone)]
struct StoredPair {
    item: CatalogObject,
    variation: CatalogObject,
}

/// In-memory implementation of [`RemoteCatalog`].
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    pairs: Mutex<HashMap<String, StoredPair>>,
    sequence: AtomicI64,
    upsert_calls: AtomicUsize,
    retrieve_calls: AtomicUsize,
    delete_calls: AtomicUsize,
    fail_next_call: AtomicBool,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live pairs.
    pub fn len(&self) -> usize {
        self.pairs.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a non-deleted item with this id exists.
    pub fn contains_item(&self, item_id: &str) -> bool {
        self.pairs.lock().contains_key(item_id)
    }

    /// Current version token of an item, if it exists.
    pub fn item_version(&self, item_id: &str) -> Option<i64> {
        self.pairs.lock().get(item_id).and_then(|p| p.item.version)
    }

    pub fn upsert_calls(&self) -> usize {
        self.upsert_calls.load(Ordering::SeqCst)
    }

    pub fn retrieve_calls(&self) -> usize {
        self.retrieve_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    /// Make the next call of any kind fail with a 500 status.
    pub fn fail_next_call(&self) {
        self.fail_next_call.store(true, Ordering::SeqCst);
    }

    fn check_failure(&self) -> RemoteResult<()> {
        if self.fail_next_call.swap(false, Ordering::SeqCst) {
            return Err(RemoteError::Status {
                status: 500,
                body: "injected failure".to_string(),
            });
        }
        Ok(())
    }

    fn next_version(&self) -> i64 {
        // Tokens only need to be opaque and to differ on every write.
        self.sequence.fetch_add(1, Ordering::SeqCst) + 1000
    }

    fn next_id(&self, prefix: &str) -> String {
        format!("{prefix}-{}", self.sequence.fetch_add(1, Ordering::SeqCst))
    }

    fn create_pair(&self, upsert: &CatalogUpsert) -> StoredPair {
        let item_id = self.next_id("ITEM");
        let variation_id = self.next_id("VAR");
        let version = self.next_version();
        let now = Utc::now();

        let item = CatalogObject {
            id: Some(item_id.clone()),
            object_type: OBJECT_TYPE_ITEM.to_string(),
            version: Some(version),
            updated_at: Some(now),
            is_deleted: Some(false),
            present_at_all_locations: Some(true),
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
            id: Some(variation_id),
            object_type: OBJECT_TYPE_VARIATION.to_string(),
            version: Some(version),
            updated_at: Some(now),
            is_deleted: Some(false),
            present_at_all_locations: Some(true),
            variation_data: Some(CatalogVariation {
                item_id: Some(item_id),
                name: upsert.name.clone(),
                sku: upsert.sku.clone(),
                upc: upsert.upc.clone(),
                pricing_type: Some(PRICING_TYPE_FIXED.to_string()),
                price_money: upsert.cost_in_cents.map(Money::cents),
            }),
            ..Default::default()
        };

        StoredPair { item, variation }
    }

    fn merge_pair(pair: &mut StoredPair, upsert: &CatalogUpsert, version: i64) {
        let now = Utc::now();
        let item_data = pair.item.item_data.get_or_insert_with(Default::default);
        if let Some(name) = &upsert.name {
            item_data.name = Some(name.clone());
            item_data.abbreviation = Some(abbreviate(name));
        }
        if let Some(description) = &upsert.description {
            item_data.description = Some(description.clone());
        }
        if let Some(label_color) = &upsert.label_color {
            item_data.label_color = Some(label_color.clone());
        }
        if let Some(product_type) = &upsert.product_type {
            item_data.product_type = Some(product_type.clone());
        }
        if let Some(v) = upsert.available_online {
            item_data.available_online = Some(v);
        }
        if let Some(v) = upsert.available_for_pickup {
            item_data.available_for_pickup = Some(v);
        }
        if let Some(v) = upsert.available_electronically {
            item_data.available_electronically = Some(v);
        }

        let var_data = pair
            .variation
            .variation_data
            .get_or_insert_with(Default::default);
        if let Some(name) = &upsert.name {
            var_data.name = Some(name.clone());
        }
        if let Some(sku) = &upsert.sku {
            var_data.sku = Some(sku.clone());
        }
        if let Some(upc) = &upsert.upc {
            var_data.upc = Some(upc.clone());
        }
        if let Some(cost) = upsert.cost_in_cents {
            var_data.price_money = Some(Money::cents(cost));
        }

        pair.item.version = Some(version);
        pair.item.updated_at = Some(now);
        pair.variation.version = Some(version);
        pair.variation.updated_at = Some(now);
    }

    fn to_response(pair: &StoredPair) -> CatalogObjects {
        CatalogObjects {
            objects: vec![pair.item.clone(), pair.variation.clone()],
            errors: vec![],
        }
    }
}

#[async_trait]
impl RemoteCatalog for MemoryCatalog {
    async fn upsert_pair(
        &self,
        _idempotency_key: &str,
        upsert: &CatalogUpsert,
    ) -> RemoteResult<CatalogObjects> {
        self.upsert_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;

        let mut pairs = self.pairs.lock();
        match &upsert.item_id {
            None => {
                let pair = self.create_pair(upsert);
                let response = Self::to_response(&pair);
                let item_id = pair.item.id.clone().unwrap_or_default();
                pairs.insert(item_id, pair);
                Ok(response)
            }
            Some(item_id) => {
                let pair = pairs.get_mut(item_id).ok_or_else(|| RemoteError::Status {
                    status: 404,
                    body: format!("no such object: {item_id}"),
                })?;
                if pair.item.version != upsert.version {
                    return Err(RemoteError::VersionConflict(format!(
                        "stale version for {item_id}: sent {:?}, current {:?}",
                        upsert.version, pair.item.version
                    )));
                }
                let version = self.next_version();
                Self::merge_pair(pair, upsert, version);
                Ok(Self::to_response(pair))
            }
        }
    }

    async fn retrieve_pair(
        &self,
        item_id: &str,
        _variation_id: &str,
    ) -> RemoteResult<CatalogObjects> {
        self.retrieve_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;

        let pairs = self.pairs.lock();
        let pair = pairs.get(item_id).ok_or_else(|| RemoteError::Status {
            status: 404,
            body: format!("no such object: {item_id}"),
        })?;
        Ok(Self::to_response(pair))
    }

    async fn delete_pair(&self, item_id: &str) -> RemoteResult<DeletePairResponse> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;

        let mut pairs = self.pairs.lock();
        let pair = pairs.remove(item_id).ok_or_else(|| RemoteError::Status {
            status: 404,
            body: format!("no such object: {item_id}"),
        })?;

        let mut deleted = vec![item_id.to_string()];
        if let Some(variation_id) = pair.variation.id {
            deleted.push(variation_id);
        }
        Ok(DeletePairResponse {
            deleted_object_ids: deleted,
            deleted_at: Some(Utc::now()),
            errors: vec![],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> CatalogUpsert {
        CatalogUpsert {
            name: Some("WIDGET".to_string()),
            product_type: Some("FLOWER".to_string()),
            cost_in_cents: Some(2500),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_assigns_linked_ids_and_version() {
        let catalog = MemoryCatalog::new();
        let response = catalog.upsert_pair("key-1", &widget()).await.unwrap();

        assert_eq!(response.objects.len(), 2);
        let item = &response.objects[0];
        let variation = &response.objects[1];
        assert!(item.is_item());
        assert!(variation.is_variation());
        assert_eq!(
            variation.variation_data.as_ref().unwrap().item_id,
            item.id
        );
        assert!(item.version.is_some());
        assert_eq!(catalog.len(), 1);
    }

    #[tokio::test]
    async fn update_merges_and_bumps_version() {
        let catalog = MemoryCatalog::new();
        let created = catalog.upsert_pair("key-1", &widget()).await.unwrap();
        let item = &created.objects[0];
        let variation = &created.objects[1];

        let update = CatalogUpsert {
            cost_in_cents: Some(3000),
            item_id: item.id.clone(),
            variation_id: variation.id.clone(),
            version: item.version,
            ..Default::default()
        };
        let updated = catalog.upsert_pair("key-2", &update).await.unwrap();

        let new_item = &updated.objects[0];
        assert_ne!(new_item.version, item.version);
        // Unset fields keep their stored value.
        assert_eq!(
            new_item.item_data.as_ref().unwrap().name.as_deref(),
            Some("WIDGET")
        );
        let new_var = &updated.objects[1];
        assert_eq!(
            new_var.variation_data.as_ref().unwrap().price_money,
            Some(Money::cents(3000))
        );
    }

    #[tokio::test]
    async fn update_with_stale_version_conflicts() {
        let catalog = MemoryCatalog::new();
        let created = catalog.upsert_pair("key-1", &widget()).await.unwrap();
        let item = &created.objects[0];

        let update = CatalogUpsert {
            cost_in_cents: Some(3000),
            item_id: item.id.clone(),
            variation_id: created.objects[1].id.clone(),
            version: Some(item.version.unwrap() - 1),
            ..Default::default()
        };
        let err = catalog.upsert_pair("key-2", &update).await.unwrap_err();
        assert!(matches!(err, RemoteError::VersionConflict(_)));
    }

    #[tokio::test]
    async fn delete_cascades_to_variation() {
        let catalog = MemoryCatalog::new();
        let created = catalog.upsert_pair("key-1", &widget()).await.unwrap();
        let item_id = created.objects[0].id.clone().unwrap();
        let variation_id = created.objects[1].id.clone().unwrap();

        let response = catalog.delete_pair(&item_id).await.unwrap();
        assert_eq!(response.deleted_object_ids, vec![item_id, variation_id]);
        assert!(response.deleted_at.is_some());
        assert!(catalog.is_empty());
    }

    #[tokio::test]
    async fn injected_failure_fires_once() {
        let catalog = MemoryCatalog::new();
        catalog.fail_next_call();
        assert!(catalog.upsert_pair("key-1", &widget()).await.is_err());
        assert!(catalog.upsert_pair("key-2", &widget()).await.is_ok());
    }
}
