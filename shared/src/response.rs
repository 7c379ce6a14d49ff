//! Outbound response bodies

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::ProductType;

/// The client-facing view of one product.
///
/// Server-owned fields (`item_id`, `variation_id`, `version`, `updated_at`)
/// are assigned by the remote catalog and never supplied by the client.
/// Listing responses are assembled from the local cache alone, so fields
/// the cache does not hold are `None` there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductResponse {
    #[serde(rename = "product_id")]
    pub client_product_id: String,
    pub name: String,
    pub product_type: ProductType,
    pub cost_in_cents: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_online: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_for_pickup: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_electronically: Option<bool>,
    /// Remote catalog item id.
    pub item_id: String,
    /// Remote catalog variation id.
    pub variation_id: String,
    /// Optimistic concurrency token; required on later updates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    pub is_deleted: bool,
}

/// One page of a sorted cache listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Zero-based page index this page was cut from.
    pub page: usize,
    pub page_size: usize,
    /// Total number of entries across all pages.
    pub total: usize,
}

impl<T> Page<T> {
    /// Map the page's items while keeping the paging envelope.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total: self.total,
        }
    }
}
