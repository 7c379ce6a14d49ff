//! Response assembly
//!
//! Pure construction of client-facing [`ProductResponse`] bodies from a
//! validated [`CatalogPair`] or a cached [`LiteProduct`]. No I/O, no cache
//! access; runs only after response validation has passed.

use catalog_client::CatalogPair;
use chrono::{DateTime, Utc};
use shared::{ProductResponse, ProductType};

use crate::cache::LiteProduct;
use crate::utils::{AppError, AppResult};
use crate::validation::ProtocolViolation;

/// Build the full response for create/read/update from a validated pair.
pub fn from_pair(client_product_id: &str, pair: &CatalogPair) -> AppResult<ProductResponse> {
    let name = pair
        .item
        .name
        .clone()
        .ok_or(ProtocolViolation::MissingField("item.name"))?;
    let raw_type = pair
        .item
        .product_type
        .as_deref()
        .ok_or(ProtocolViolation::MissingField("item.product_type"))?;
    let product_type = ProductType::parse(raw_type).map_err(|e| {
        // The type was validated on the way in; an unparseable value can
        // only come from the remote side.
        AppError::Protocol(ProtocolViolation::FieldMismatch {
            field: "product_type",
            sent: "a recognized product type".to_string(),
            received: e.0,
        })
    })?;
    let cost_in_cents = pair
        .variation
        .price_money
        .as_ref()
        .map(|m| m.amount)
        .ok_or(ProtocolViolation::MissingField("variation.price_money"))?;

    Ok(ProductResponse {
        client_product_id: client_product_id.to_string(),
        name,
        product_type,
        cost_in_cents,
        description: pair.item.description.clone(),
        label_color: pair.item.label_color.clone(),
        sku: pair.variation.sku.clone(),
        upc: pair.variation.upc.clone(),
        available_online: pair.item.available_online,
        available_for_pickup: pair.item.available_for_pickup,
        available_electronically: pair.item.available_electronically,
        item_id: pair.item_id.clone(),
        variation_id: pair.variation_id.clone(),
        version: Some(pair.version),
        updated_at: Some(pair.updated_at),
        is_deleted: pair.is_deleted,
    })
}

/// Build a listing row from the cache alone. Fields the cache does not
/// hold stay `None`; the remote catalog is never consulted for listing.
pub fn from_lite(lite: &LiteProduct) -> ProductResponse {
    ProductResponse {
        client_product_id: lite.client_product_id.clone(),
        name: lite.name.clone(),
        product_type: lite.product_type,
        cost_in_cents: lite.cost_in_cents,
        description: None,
        label_color: None,
        sku: None,
        upc: None,
        available_online: None,
        available_for_pickup: None,
        available_electronically: None,
        item_id: lite.item_id.clone(),
        variation_id: lite.variation_id.clone(),
        version: Some(lite.version),
        updated_at: None,
        is_deleted: false,
    }
}

/// Build the final echo of a deleted product from its last cached state.
pub fn deleted(lite: &LiteProduct, deleted_at: Option<DateTime<Utc>>) -> ProductResponse {
    ProductResponse {
        updated_at: deleted_at,
        is_deleted: true,
        ..from_lite(lite)
    }
}
