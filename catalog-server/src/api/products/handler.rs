//! Product API handlers
//!
//! Thin layer over [`ProductCatalogService`]: extract, delegate, wrap in
//! `Json`. All validation and orchestration live in the service.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::{CreateProductRequest, ListParams, Page, ProductResponse, UpdateProductRequest};

use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/products - paginated, sorted listing from the cache
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Page<ProductResponse>>> {
    Ok(Json(state.products.list(&params)?))
}

/// POST /api/products - create a product under a client-chosen id
pub async fn create(
    State(state): State<ServerState>,
    Json(req): Json<CreateProductRequest>,
) -> AppResult<Json<ProductResponse>> {
    Ok(Json(state.products.create(req).await?))
}

/// GET /api/products/:id - read one product
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ProductResponse>> {
    Ok(Json(state.products.get(&id).await?))
}

/// PUT /api/products/:id - partial update with a mandatory version token
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateProductRequest>,
) -> AppResult<Json<ProductResponse>> {
    Ok(Json(state.products.update(&id, req).await?))
}

/// DELETE /api/products/:id - delete and echo the last known state
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ProductResponse>> {
    Ok(Json(state.products.delete(&id).await?))
}
