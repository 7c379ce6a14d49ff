//! Inbound request bodies
//!
//! JSON shapes accepted by the product API. Field names follow the
//! snake_case wire convention; `product_id` is the client-chosen key.

use serde::{Deserialize, Serialize};

/// POST /api/products request body.
///
/// `name` and `product_type` are normalized (trimmed, uppercased) before
/// any storage or comparison. Optional fields are forwarded verbatim to
/// the remote catalog and must be echoed back unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductRequest {
    #[serde(rename = "product_id")]
    pub client_product_id: String,
    pub name: String,
    pub product_type: String,
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
}

/// PUT /api/products/{id} request body.
///
/// All product fields are optional; unset fields keep their current value
/// (the merge happens at the remote catalog, never locally). `version` is
/// mandatory: the client must echo the version token it last observed so
/// the remote service can detect lost updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProductRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_in_cents: Option<i64>,
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
    /// Optimistic concurrency token from the last observed response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
}

fn default_page_size() -> usize {
    20
}

/// GET /api/products query parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListParams {
    /// Zero-based page index.
    #[serde(default)]
    pub page: usize,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Sort field name; must be in the [`crate::SortField`] allow-list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    /// "asc" (default) or "desc".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: default_page_size(),
            sort_by: None,
            order: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_deserializes_with_optional_fields_absent() {
        let req: CreateProductRequest = serde_json::from_str(
            r#"{"product_id":"P1","name":"Widget","product_type":"flower","cost_in_cents":2500}"#,
        )
        .unwrap();
        assert_eq!(req.client_product_id, "P1");
        assert_eq!(req.cost_in_cents, 2500);
        assert!(req.sku.is_none());
        assert!(req.available_online.is_none());
    }

    #[test]
    fn update_request_requires_nothing_but_parses_version() {
        let req: UpdateProductRequest =
            serde_json::from_str(r#"{"cost_in_cents":3000,"version":42}"#).unwrap();
        assert_eq!(req.cost_in_cents, Some(3000));
        assert_eq!(req.version, Some(42));
        assert!(req.name.is_none());
    }

    #[test]
    fn list_params_default_page_size() {
        let params: ListParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.page, 0);
        assert_eq!(params.page_size, 20);
    }
}
