//! Product coordinator
//!
//! Orchestrates every product operation as the same five-step sequence:
//! validate the request, consult the cache, call the remote catalog,
//! validate the response, then (for writes) mutate the cache and assemble
//! the reply. The cache is the existence oracle: a miss answers "not
//! found" without any remote call, and a remote call is only ever
//! addressed through ids taken from a cache hit.
//!
//! Writes to the same client product id are serialized through a per-id
//! async mutex, so two concurrent creates of one id resolve to exactly
//! one remote pair; ids only contend with themselves.

use std::sync::Arc;

use dashmap::DashMap;
use shared::{
    CreateProductRequest, ListParams, Page, ProductResponse, SortField, SortOrder,
    UpdateProductRequest, normalize,
};
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use catalog_client::{CatalogUpsert, RemoteCatalog};

use crate::cache::{LiteProduct, ProductCache};
use crate::services::assemble;
use crate::utils::{AppError, AppResult};
use crate::validation::request::{validate_client_id, validate_create, validate_update};
use crate::validation::response::{check_delete, check_retrieve, check_upsert};

/// Coordinator over the local cache and the remote catalog.
pub struct ProductCatalogService {
    cache: ProductCache,
    remote: Arc<dyn RemoteCatalog>,
    write_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl ProductCatalogService {
    pub fn new(remote: Arc<dyn RemoteCatalog>) -> Self {
        Self {
            cache: ProductCache::new(),
            remote,
            write_locks: DashMap::new(),
        }
    }

    /// Number of products currently cached.
    pub fn cached_products(&self) -> usize {
        self.cache.len()
    }

    fn write_lock(&self, client_product_id: &str) -> Arc<Mutex<()>> {
        self.write_locks
            .entry(client_product_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Drop our handle on a per-id lock and evict the map entry once no
    /// other writer holds or awaits it, keeping the lock table bounded
    /// by in-flight writes rather than by distinct ids ever seen.
    fn prune_write_lock(&self, client_product_id: &str, lock: Arc<Mutex<()>>) {
        drop(lock);
        self.write_locks
            .remove_if(client_product_id, |_, l| Arc::strong_count(l) == 1);
    }

    fn lite_from_pair(
        client_product_id: &str,
        pair: &catalog_client::CatalogPair,
    ) -> AppResult<LiteProduct> {
        let response = assemble::from_pair(client_product_id, pair)?;
        Ok(LiteProduct {
            client_product_id: response.client_product_id,
            item_id: response.item_id,
            variation_id: response.variation_id,
            name: response.name,
            product_type: response.product_type,
            cost_in_cents: response.cost_in_cents,
            version: pair.version,
        })
    }

    /// Create a product under a client-chosen id.
    ///
    /// Duplicate ids are rejected from the cache before any remote call;
    /// the per-id lock makes that check-then-create atomic, so at most
    /// one remote pair is ever created per id.
    pub async fn create(&self, req: CreateProductRequest) -> AppResult<ProductResponse> {
        validate_create(&req)?;

        let lock = self.write_lock(&req.client_product_id);
        let result = {
            let _guard = lock.lock().await;
            self.create_locked(&req).await
        };
        self.prune_write_lock(&req.client_product_id, lock);
        result
    }

    async fn create_locked(&self, req: &CreateProductRequest) -> AppResult<ProductResponse> {
        if self.cache.get(&req.client_product_id).is_some() {
            return Err(AppError::conflict(format!(
                "product {}",
                req.client_product_id
            )));
        }

        let upsert = CatalogUpsert {
            name: Some(normalize(&req.name)),
            product_type: Some(normalize(&req.product_type)),
            cost_in_cents: Some(req.cost_in_cents),
            description: req.description.clone(),
            label_color: req.label_color.clone(),
            sku: req.sku.clone(),
            upc: req.upc.clone(),
            available_online: req.available_online,
            available_for_pickup: req.available_for_pickup,
            available_electronically: req.available_electronically,
            ..Default::default()
        };

        let idempotency_key = Uuid::new_v4().to_string();
        let response = self.remote.upsert_pair(&idempotency_key, &upsert).await?;
        let pair = check_upsert(&upsert, &response)?;

        self.cache
            .put(Self::lite_from_pair(&req.client_product_id, &pair)?);
        info!(
            product_id = %req.client_product_id,
            item_id = %pair.item_id,
            "Product created"
        );
        assemble::from_pair(&req.client_product_id, &pair)
    }

    /// Read one product: cache hit supplies the remote ids, the remote
    /// catalog supplies the full current field values.
    pub async fn get(&self, client_product_id: &str) -> AppResult<ProductResponse> {
        validate_client_id(client_product_id)?;

        let cached = self
            .cache
            .get(client_product_id)
            .ok_or_else(|| AppError::not_found(format!("product {client_product_id}")))?;

        let response = self
            .remote
            .retrieve_pair(&cached.item_id, &cached.variation_id)
            .await?;
        let pair = check_retrieve(&cached, &response)?;
        assemble::from_pair(client_product_id, &pair)
    }

    /// Paginated, sorted listing served entirely from the cache.
    pub fn list(&self, params: &ListParams) -> AppResult<Page<ProductResponse>> {
        let sort_by = match &params.sort_by {
            Some(raw) => SortField::parse(raw).map_err(|e| AppError::validation(e.to_string()))?,
            None => SortField::default(),
        };
        let order = match &params.order {
            Some(raw) => SortOrder::parse(raw).map_err(|e| AppError::validation(e.to_string()))?,
            None => SortOrder::default(),
        };

        let page = self.cache.list(params.page, params.page_size, sort_by, order);
        Ok(page.map(|lite| assemble::from_lite(&lite)))
    }

    /// Update a product. Only the fields set on the request change; the
    /// merge happens at the remote catalog, and the cache entry is then
    /// replaced wholesale from the validated response so the new version
    /// token lands atomically with the new field values.
    pub async fn update(
        &self,
        client_product_id: &str,
        req: UpdateProductRequest,
    ) -> AppResult<ProductResponse> {
        validate_update(client_product_id, &req)?;

        let lock = self.write_lock(client_product_id);
        let result = {
            let _guard = lock.lock().await;
            self.update_locked(client_product_id, &req).await
        };
        self.prune_write_lock(client_product_id, lock);
        result
    }

    async fn update_locked(
        &self,
        client_product_id: &str,
        req: &UpdateProductRequest,
    ) -> AppResult<ProductResponse> {
        let cached = self
            .cache
            .get(client_product_id)
            .ok_or_else(|| AppError::not_found(format!("product {client_product_id}")))?;

        let upsert = CatalogUpsert {
            name: req.name.as_deref().map(normalize),
            product_type: req.product_type.as_deref().map(normalize),
            cost_in_cents: req.cost_in_cents,
            description: req.description.clone(),
            label_color: req.label_color.clone(),
            sku: req.sku.clone(),
            upc: req.upc.clone(),
            available_online: req.available_online,
            available_for_pickup: req.available_for_pickup,
            available_electronically: req.available_electronically,
            item_id: Some(cached.item_id.clone()),
            variation_id: Some(cached.variation_id.clone()),
            version: req.version,
        };

        let idempotency_key = Uuid::new_v4().to_string();
        let response = self.remote.upsert_pair(&idempotency_key, &upsert).await?;
        let pair = check_upsert(&upsert, &response)?;

        self.cache
            .put(Self::lite_from_pair(client_product_id, &pair)?);
        info!(
            product_id = %client_product_id,
            version = pair.version,
            "Product updated"
        );
        assemble::from_pair(client_product_id, &pair)
    }

    /// Delete a product. The remote delete cascades from the item to its
    /// variation; the cache entry is removed only after the response has
    /// been checked to report exactly both remote ids.
    pub async fn delete(&self, client_product_id: &str) -> AppResult<ProductResponse> {
        validate_client_id(client_product_id)?;

        let lock = self.write_lock(client_product_id);
        let result = {
            let _guard = lock.lock().await;
            self.delete_locked(client_product_id).await
        };
        self.prune_write_lock(client_product_id, lock);
        result
    }

    async fn delete_locked(&self, client_product_id: &str) -> AppResult<ProductResponse> {
        let cached = self
            .cache
            .get(client_product_id)
            .ok_or_else(|| AppError::not_found(format!("product {client_product_id}")))?;

        let response = self.remote.delete_pair(&cached.item_id).await?;
        check_delete(&cached, &response)?;

        self.cache.remove(client_product_id);
        info!(
            product_id = %client_product_id,
            item_id = %cached.item_id,
            "Product deleted"
        );
        Ok(assemble::deleted(&cached, response.deleted_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_client::MemoryCatalog;

    fn widget(id: &str) -> CreateProductRequest {
        CreateProductRequest {
            client_product_id: id.to_string(),
            name: "Widget".to_string(),
            product_type: "flower".to_string(),
            cost_in_cents: 2500,
            description: None,
            label_color: None,
            sku: None,
            upc: None,
            available_online: None,
            available_for_pickup: None,
            available_electronically: None,
        }
    }

    #[tokio::test]
    async fn write_lock_entries_are_pruned_after_each_write() {
        let service = ProductCatalogService::new(Arc::new(MemoryCatalog::new()));

        service.create(widget("P1")).await.unwrap();
        assert!(service.write_locks.is_empty());

        // Failed attempts do not leak entries either.
        let err = service.create(widget("P1")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert!(service.write_locks.is_empty());

        service.delete("P1").await.unwrap();
        assert!(service.write_locks.is_empty());

        let err = service.delete("P1").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(service.write_locks.is_empty());
    }

    #[tokio::test]
    async fn pruning_never_splits_a_contended_lock() {
        let service = Arc::new(ProductCatalogService::new(Arc::new(MemoryCatalog::new())));

        let (a, b) = tokio::join!(
            service.create(widget("P1")),
            service.create(widget("P1"))
        );

        // Still exactly one winner: the second writer waited on the same
        // lock rather than a freshly inserted one.
        assert_eq!([&a, &b].iter().filter(|r| r.is_ok()).count(), 1);
        assert!(service.write_locks.is_empty());
    }
}
