//! Remote response validation
//!
//! Every remote call's response is checked here before any cache
//! mutation. A failure is a [`ProtocolViolation`] - a mismatch between
//! this service's assumptions and the remote catalog's actual contract -
//! and is never surfaced as a user input error.
//!
//! The checks also perform the pairing step: a raw [`CatalogObjects`]
//! list becomes a typed [`CatalogPair`] only after the 1-item/1-variation
//! multiplicity, the parent link, and the field echoes have been
//! verified.

use catalog_client::{
    CatalogObject, CatalogObjects, CatalogPair, CatalogUpsert, DeletePairResponse,
};
use shared::normalize;
use thiserror::Error;

use crate::cache::LiteProduct;

/// A remote response that passed transport but broke the contract.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProtocolViolation {
    #[error("remote error envelope: {0}")]
    TransportErrors(String),

    #[error("expected exactly one item and one variation, got {items} item(s), {variations} variation(s)")]
    WrongObjectCount { items: usize, variations: usize },

    #[error("remote response is missing {0}")]
    MissingField(&'static str),

    #[error("variation {variation_id} is linked to {linked_to:?}, not to item {item_id}")]
    UnlinkedVariation {
        item_id: String,
        variation_id: String,
        linked_to: Option<String>,
    },

    #[error("item {item_id} is marked deleted in an upsert response")]
    AlreadyDeleted { item_id: String },

    #[error("field {field} was not echoed: sent {sent}, received {received}")]
    FieldMismatch {
        field: &'static str,
        sent: String,
        received: String,
    },

    #[error("remote {field} disagrees with the cache: cached {cached}, remote {remote}")]
    CacheMismatch {
        field: &'static str,
        cached: String,
        remote: String,
    },

    #[error("delete reported ids {actual:?}, expected exactly {expected:?}")]
    WrongDeletedIds {
        expected: Vec<String>,
        actual: Vec<String>,
    },
}

fn no_transport_errors(errors: &[catalog_client::RemoteApiError]) -> Result<(), ProtocolViolation> {
    if errors.is_empty() {
        return Ok(());
    }
    let joined = errors
        .iter()
        .map(|e| format!("{}/{}: {}", e.category, e.code, e.detail.as_deref().unwrap_or("-")))
        .collect::<Vec<_>>()
        .join("; ");
    Err(ProtocolViolation::TransportErrors(joined))
}

/// Pair the raw object list into exactly one item plus one linked
/// variation, requiring the remote-assigned identifiers, version token
/// and update timestamp to be present.
fn build_pair(response: &CatalogObjects) -> Result<CatalogPair, ProtocolViolation> {
    no_transport_errors(&response.errors)?;

    let items: Vec<&CatalogObject> = response.objects.iter().filter(|o| o.is_item()).collect();
    let variations: Vec<&CatalogObject> =
        response.objects.iter().filter(|o| o.is_variation()).collect();
    if items.len() != 1 || variations.len() != 1 || response.objects.len() != 2 {
        return Err(ProtocolViolation::WrongObjectCount {
            items: items.len(),
            variations: variations.len(),
        });
    }
    let (item, variation) = (items[0], variations[0]);

    let item_id = item
        .id
        .clone()
        .ok_or(ProtocolViolation::MissingField("item.id"))?;
    let variation_id = variation
        .id
        .clone()
        .ok_or(ProtocolViolation::MissingField("variation.id"))?;
    let version = item
        .version
        .ok_or(ProtocolViolation::MissingField("item.version"))?;
    let updated_at = item
        .updated_at
        .ok_or(ProtocolViolation::MissingField("item.updated_at"))?;
    let item_data = item
        .item_data
        .clone()
        .ok_or(ProtocolViolation::MissingField("item.item_data"))?;
    let variation_data = variation
        .variation_data
        .clone()
        .ok_or(ProtocolViolation::MissingField("variation.variation_data"))?;

    if variation_data.item_id.as_deref() != Some(item_id.as_str()) {
        return Err(ProtocolViolation::UnlinkedVariation {
            item_id,
            variation_id,
            linked_to: variation_data.item_id.clone(),
        });
    }

    Ok(CatalogPair {
        item_id,
        variation_id,
        version,
        updated_at,
        is_deleted: item.is_deleted.unwrap_or(false),
        item: item_data,
        variation: variation_data,
    })
}

fn echoed<T: PartialEq + std::fmt::Debug>(
    field: &'static str,
    sent: &Option<T>,
    received: &Option<T>,
) -> Result<(), ProtocolViolation> {
    // Absent in the request means no constraint: the response may carry
    // a previously stored value (updates) or nothing at all.
    if sent.is_some() && sent != received {
        return Err(ProtocolViolation::FieldMismatch {
            field,
            sent: format!("{sent:?}"),
            received: format!("{received:?}"),
        });
    }
    Ok(())
}

/// Check a create/update response against the upsert that produced it.
pub fn check_upsert(
    request: &CatalogUpsert,
    response: &CatalogObjects,
) -> Result<CatalogPair, ProtocolViolation> {
    let pair = build_pair(response)?;

    if pair.is_deleted {
        return Err(ProtocolViolation::AlreadyDeleted {
            item_id: pair.item_id.clone(),
        });
    }

    // Canonical fields every live pair must carry.
    if pair.item.name.is_none() {
        return Err(ProtocolViolation::MissingField("item.name"));
    }
    if pair.variation.price_money.is_none() {
        return Err(ProtocolViolation::MissingField("variation.price_money"));
    }

    // Updates address known remote objects; the response must agree.
    if let Some(sent_item_id) = &request.item_id
        && sent_item_id != &pair.item_id
    {
        return Err(ProtocolViolation::FieldMismatch {
            field: "item_id",
            sent: sent_item_id.clone(),
            received: pair.item_id.clone(),
        });
    }
    if let Some(sent_variation_id) = &request.variation_id
        && sent_variation_id != &pair.variation_id
    {
        return Err(ProtocolViolation::FieldMismatch {
            field: "variation_id",
            sent: sent_variation_id.clone(),
            received: pair.variation_id.clone(),
        });
    }

    // Every field explicitly set on the request must be echoed unchanged.
    echoed("name", &request.name, &pair.item.name)?;
    echoed("product_type", &request.product_type, &pair.item.product_type)?;
    echoed(
        "cost_in_cents",
        &request.cost_in_cents,
        &pair.variation.price_money.as_ref().map(|m| m.amount),
    )?;
    echoed("description", &request.description, &pair.item.description)?;
    echoed("label_color", &request.label_color, &pair.item.label_color)?;
    echoed("sku", &request.sku, &pair.variation.sku)?;
    echoed("upc", &request.upc, &pair.variation.upc)?;
    echoed(
        "available_online",
        &request.available_online,
        &pair.item.available_online,
    )?;
    echoed(
        "available_for_pickup",
        &request.available_for_pickup,
        &pair.item.available_for_pickup,
    )?;
    echoed(
        "available_electronically",
        &request.available_electronically,
        &pair.item.available_electronically,
    )?;

    Ok(pair)
}

/// Check a retrieve response against the cache entry that addressed it.
///
/// A disagreement means the cache is corrupt relative to the remote
/// store - an internal error, never the client's fault.
pub fn check_retrieve(
    cached: &LiteProduct,
    response: &CatalogObjects,
) -> Result<CatalogPair, ProtocolViolation> {
    let pair = build_pair(response)?;

    if pair.is_deleted {
        return Err(ProtocolViolation::AlreadyDeleted {
            item_id: pair.item_id.clone(),
        });
    }
    if pair.item_id != cached.item_id {
        return Err(ProtocolViolation::CacheMismatch {
            field: "item_id",
            cached: cached.item_id.clone(),
            remote: pair.item_id.clone(),
        });
    }
    if pair.variation_id != cached.variation_id {
        return Err(ProtocolViolation::CacheMismatch {
            field: "variation_id",
            cached: cached.variation_id.clone(),
            remote: pair.variation_id.clone(),
        });
    }

    let remote_name = pair
        .item
        .name
        .as_deref()
        .ok_or(ProtocolViolation::MissingField("item.name"))?;
    if normalize(remote_name) != cached.name {
        return Err(ProtocolViolation::CacheMismatch {
            field: "name",
            cached: cached.name.clone(),
            remote: remote_name.to_string(),
        });
    }

    let remote_type = pair
        .item
        .product_type
        .as_deref()
        .ok_or(ProtocolViolation::MissingField("item.product_type"))?;
    if normalize(remote_type) != cached.product_type.as_str() {
        return Err(ProtocolViolation::CacheMismatch {
            field: "product_type",
            cached: cached.product_type.to_string(),
            remote: remote_type.to_string(),
        });
    }

    if pair.variation.price_money.is_none() {
        return Err(ProtocolViolation::MissingField("variation.price_money"));
    }

    Ok(pair)
}

/// Check a delete response: exactly the cached item and variation ids
/// must be reported deleted (remote deletion cascades item -> variation).
pub fn check_delete(
    cached: &LiteProduct,
    response: &DeletePairResponse,
) -> Result<(), ProtocolViolation> {
    no_transport_errors(&response.errors)?;

    let expected = vec![cached.item_id.clone(), cached.variation_id.clone()];
    let actual = &response.deleted_object_ids;
    let matches = actual.len() == 2
        && actual.contains(&cached.item_id)
        && actual.contains(&cached.variation_id);
    if !matches {
        return Err(ProtocolViolation::WrongDeletedIds {
            expected,
            actual: actual.clone(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_client::{
        CatalogItem, CatalogVariation, Money, OBJECT_TYPE_ITEM, OBJECT_TYPE_VARIATION,
        RemoteApiError,
    };
    use chrono::Utc;
    use shared::ProductType;

    fn good_response() -> CatalogObjects {
        CatalogObjects {
            objects: vec![
                CatalogObject {
                    id: Some("ITEM-1".to_string()),
                    object_type: OBJECT_TYPE_ITEM.to_string(),
                    version: Some(1000),
                    updated_at: Some(Utc::now()),
                    is_deleted: Some(false),
                    present_at_all_locations: Some(true),
                    item_data: Some(CatalogItem {
                        name: Some("WIDGET".to_string()),
                        abbreviation: Some("WID".to_string()),
                        product_type: Some("FLOWER".to_string()),
                        ..Default::default()
                    }),
                    ..Default::default()
                },
                CatalogObject {
                    id: Some("VAR-1".to_string()),
                    object_type: OBJECT_TYPE_VARIATION.to_string(),
                    version: Some(1000),
                    updated_at: Some(Utc::now()),
                    is_deleted: Some(false),
                    variation_data: Some(CatalogVariation {
                        item_id: Some("ITEM-1".to_string()),
                        name: Some("WIDGET".to_string()),
                        price_money: Some(Money::cents(2500)),
                        ..Default::default()
                    }),
                    ..Default::default()
                },
            ],
            errors: vec![],
        }
    }

    fn create_request() -> CatalogUpsert {
        CatalogUpsert {
            name: Some("WIDGET".to_string()),
            product_type: Some("FLOWER".to_string()),
            cost_in_cents: Some(2500),
            ..Default::default()
        }
    }

    fn cached() -> LiteProduct {
        LiteProduct {
            client_product_id: "P1".to_string(),
            item_id: "ITEM-1".to_string(),
            variation_id: "VAR-1".to_string(),
            name: "WIDGET".to_string(),
            product_type: ProductType::Flower,
            cost_in_cents: 2500,
            version: 1000,
        }
    }

    #[test]
    fn good_upsert_response_builds_pair() {
        let pair = check_upsert(&create_request(), &good_response()).unwrap();
        assert_eq!(pair.item_id, "ITEM-1");
        assert_eq!(pair.variation_id, "VAR-1");
        assert_eq!(pair.version, 1000);
        assert!(!pair.is_deleted);
    }

    #[test]
    fn error_envelope_is_a_violation() {
        let mut response = good_response();
        response.errors.push(RemoteApiError {
            category: "API".to_string(),
            code: "RATE_LIMITED".to_string(),
            detail: None,
        });
        let err = check_upsert(&create_request(), &response).unwrap_err();
        assert!(matches!(err, ProtocolViolation::TransportErrors(_)));
    }

    #[test]
    fn wrong_multiplicity_is_a_violation() {
        let mut response = good_response();
        let extra = response.objects[1].clone();
        response.objects.push(extra);
        let err = check_upsert(&create_request(), &response).unwrap_err();
        assert_eq!(
            err,
            ProtocolViolation::WrongObjectCount {
                items: 1,
                variations: 2
            }
        );

        let mut response = good_response();
        response.objects.truncate(1);
        let err = check_upsert(&create_request(), &response).unwrap_err();
        assert_eq!(
            err,
            ProtocolViolation::WrongObjectCount {
                items: 1,
                variations: 0
            }
        );
    }

    #[test]
    fn unlinked_variation_is_a_violation() {
        let mut response = good_response();
        response.objects[1]
            .variation_data
            .as_mut()
            .unwrap()
            .item_id = Some("ITEM-9".to_string());
        let err = check_upsert(&create_request(), &response).unwrap_err();
        assert!(matches!(err, ProtocolViolation::UnlinkedVariation { .. }));
    }

    #[test]
    fn deleted_item_in_upsert_is_a_violation() {
        let mut response = good_response();
        response.objects[0].is_deleted = Some(true);
        let err = check_upsert(&create_request(), &response).unwrap_err();
        assert!(matches!(err, ProtocolViolation::AlreadyDeleted { .. }));
    }

    #[test]
    fn missing_version_is_a_violation() {
        let mut response = good_response();
        response.objects[0].version = None;
        let err = check_upsert(&create_request(), &response).unwrap_err();
        assert_eq!(err, ProtocolViolation::MissingField("item.version"));
    }

    #[test]
    fn missing_remote_id_is_a_violation() {
        let mut response = good_response();
        response.objects[1].id = None;
        let err = check_upsert(&create_request(), &response).unwrap_err();
        assert_eq!(err, ProtocolViolation::MissingField("variation.id"));
    }

    #[test]
    fn unechoed_optional_field_is_a_violation() {
        let mut request = create_request();
        request.sku = Some("SKU-1".to_string());
        // Response does not carry the sku back.
        let err = check_upsert(&request, &good_response()).unwrap_err();
        assert!(matches!(
            err,
            ProtocolViolation::FieldMismatch { field: "sku", .. }
        ));
    }

    #[test]
    fn absent_in_both_is_not_a_violation() {
        // No optional fields set on either side: nothing to compare.
        assert!(check_upsert(&create_request(), &good_response()).is_ok());
    }

    #[test]
    fn update_response_must_address_the_sent_ids() {
        let request = CatalogUpsert {
            cost_in_cents: Some(3000),
            item_id: Some("ITEM-OTHER".to_string()),
            variation_id: Some("VAR-1".to_string()),
            version: Some(1000),
            ..Default::default()
        };
        let mut response = good_response();
        response.objects[1].variation_data.as_mut().unwrap().price_money =
            Some(Money::cents(3000));
        let err = check_upsert(&request, &response).unwrap_err();
        assert!(matches!(
            err,
            ProtocolViolation::FieldMismatch { field: "item_id", .. }
        ));
    }

    #[test]
    fn retrieve_agreeing_with_cache_passes() {
        assert!(check_retrieve(&cached(), &good_response()).is_ok());
    }

    #[test]
    fn retrieve_name_disagreement_is_cache_corruption() {
        let mut entry = cached();
        entry.name = "GIZMO".to_string();
        let err = check_retrieve(&entry, &good_response()).unwrap_err();
        assert!(matches!(
            err,
            ProtocolViolation::CacheMismatch { field: "name", .. }
        ));
    }

    #[test]
    fn retrieve_id_disagreement_is_cache_corruption() {
        let mut entry = cached();
        entry.variation_id = "VAR-9".to_string();
        let err = check_retrieve(&entry, &good_response()).unwrap_err();
        assert!(matches!(
            err,
            ProtocolViolation::CacheMismatch {
                field: "variation_id",
                ..
            }
        ));
    }

    #[test]
    fn delete_must_report_both_ids() {
        let response = DeletePairResponse {
            deleted_object_ids: vec!["ITEM-1".to_string(), "VAR-1".to_string()],
            deleted_at: Some(Utc::now()),
            errors: vec![],
        };
        assert!(check_delete(&cached(), &response).is_ok());

        let response = DeletePairResponse {
            deleted_object_ids: vec!["ITEM-1".to_string()],
            deleted_at: Some(Utc::now()),
            errors: vec![],
        };
        assert!(matches!(
            check_delete(&cached(), &response).unwrap_err(),
            ProtocolViolation::WrongDeletedIds { .. }
        ));

        let response = DeletePairResponse {
            deleted_object_ids: vec!["ITEM-1".to_string(), "VAR-9".to_string()],
            deleted_at: Some(Utc::now()),
            errors: vec![],
        };
        assert!(matches!(
            check_delete(&cached(), &response).unwrap_err(),
            ProtocolViolation::WrongDeletedIds { .. }
        ));
    }
}
